//! HTTP handler functions for the council district lookup API.

use actix_web::{HttpResponse, web};
use council_lookup_server_models::{ApiHealth, ApiLookupResponse, ApiSources, LookupQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/lookup?address=...`
///
/// Resolves an address to its district. A missing `address` is treated
/// as blank input.
pub async fn lookup(
    state: web::Data<AppState>,
    params: web::Query<LookupQueryParams>,
) -> HttpResponse {
    let address = params.address.as_deref().unwrap_or_default();

    match state.lookup.search(address).await {
        Ok(outcome) => HttpResponse::Ok().json(ApiLookupResponse {
            status: outcome.status(),
            message: outcome.message().map(str::to_string),
            results: outcome.rows().to_vec(),
        }),
        Err(e) => {
            log::error!("Failed to look up {address:?}: {e}");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": e.message()
            }))
        }
    }
}

/// `GET /api/sources`
///
/// Lists the configured street data sources and the load status.
pub async fn sources(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiSources {
        sources: state.sources.clone(),
        status: state.lookup.store().status(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};
    use council_lookup::Lookup;
    use council_lookup_source::{DatasetStore, Datasets, SourceDefinition, all_sources};
    use council_lookup_street::{DatasetFormat, build_dataset_from_cells};

    use crate::{AppState, api_scope};

    fn ready_state() -> AppState {
        let primary = build_dataset_from_cells(
            &[vec!["1", "999", "all", "S Salina St", "3", "04"]],
            DatasetFormat::Ranged,
        );
        AppState {
            lookup: Arc::new(Lookup::new(Arc::new(DatasetStore::ready(Datasets {
                primary,
                backup: Vec::new(),
            })))),
            sources: all_sources().iter().map(SourceDefinition::summary).collect(),
        }
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(App::new().service(api_scope())).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn lookup_returns_match() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ready_state()))
                .service(api_scope()),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/lookup?address=500%20S%20Salina%20St")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "match");
        assert_eq!(body["results"][0]["address"], "500 South Salina Street");
        assert_eq!(body["results"][0]["district"], "4");
        assert_eq!(body["results"][0]["councilor"], "Patrona Jones-Rowser");
    }

    #[actix_web::test]
    async fn lookup_without_address_is_empty_input() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ready_state()))
                .service(api_scope()),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/lookup").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "empty_input");
        assert_eq!(
            body["message"],
            "Enter a Syracuse address to see district details."
        );
    }

    #[actix_web::test]
    async fn load_failure_is_service_unavailable() {
        let state = AppState::new(vec![SourceDefinition::csv_override(
            "/nonexistent/council_lookup/streets.csv",
        )]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/lookup?address=1%20Main%20St")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "Unable to load district data. Check street_data.csv."
        );
    }

    #[actix_web::test]
    async fn sources_lists_registry_and_status() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ready_state()))
                .service(api_scope()),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/sources").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["sources"][0]["id"], "street_data_v2");
        assert_eq!(body["sources"][0]["role"], "primary");
        assert_eq!(body["status"]["state"], "ready");
    }
}
