//! Memoized dataset store.
//!
//! The store owns the one-time load of the primary and backup datasets.
//! The load attempt itself is kept as a shared future, so concurrent
//! callers wait on the same attempt and all see the same outcome. A
//! successful load is kept for the life of the store; a failed one is
//! reported to every waiter and then dropped, so the next call tries again.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use council_lookup_source_models::{DatasetStats, LoadStatus, SourceRole};
use council_lookup_street_models::StreetRecord;
use futures::future::{BoxFuture, FutureExt, Shared};

use crate::SourceError;
use crate::source_def::SourceDefinition;

/// The loaded reference tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datasets {
    /// Searched first.
    pub primary: Vec<StreetRecord>,
    /// Searched when the primary dataset has no candidates.
    pub backup: Vec<StreetRecord>,
}

impl Datasets {
    /// Record counts.
    #[must_use]
    pub const fn stats(&self) -> DatasetStats {
        DatasetStats {
            primary_records: self.primary.len(),
            backup_records: self.backup.len(),
        }
    }

    /// Primary records followed by backup records.
    pub fn all_records(&self) -> impl Iterator<Item = &StreetRecord> {
        self.primary.iter().chain(&self.backup)
    }
}

/// Failure of a dataset load, shared by every caller that waited on it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unable to load street data: {0}")]
pub struct LoadError(#[source] Arc<SourceError>);

impl LoadError {
    /// The underlying source error.
    #[must_use]
    pub fn source_error(&self) -> &SourceError {
        &self.0
    }
}

impl From<SourceError> for LoadError {
    fn from(value: SourceError) -> Self {
        Self(Arc::new(value))
    }
}

/// Something that can produce both datasets.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Loads the primary and backup datasets.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if any source fails, or
    /// [`SourceError::NoData`] if both datasets come back empty.
    async fn load(&self) -> Result<Datasets, SourceError>;
}

/// Loads datasets from an ordered list of source definitions.
///
/// For each role, enabled sources are tried in priority order and the
/// first one that yields records wins. A role with no yielding source gets
/// an empty dataset.
#[derive(Debug, Clone)]
pub struct SourceChain {
    sources: Vec<SourceDefinition>,
}

impl SourceChain {
    /// Creates a chain over the given sources. Order within a role is
    /// taken from each source's priority, not from the vector.
    #[must_use]
    pub fn new(mut sources: Vec<SourceDefinition>) -> Self {
        sources.sort_by_key(|s| (s.role, s.priority));
        Self { sources }
    }

    /// The sources in the order they will be tried.
    #[must_use]
    pub fn sources(&self) -> &[SourceDefinition] {
        &self.sources
    }

    async fn load_role(&self, role: SourceRole) -> Result<Vec<StreetRecord>, SourceError> {
        for source in self.sources.iter().filter(|s| s.role == role) {
            if !source.enabled {
                log::debug!("[{}] Disabled, skipping", source.id());
                continue;
            }

            match source.fetch().await? {
                Some(records) => {
                    log::info!(
                        "[{}] Using {} records for the {role} dataset",
                        source.id(),
                        records.len()
                    );
                    return Ok(records);
                }
                None => log::warn!("[{}] Yielded no records, trying next source", source.id()),
            }
        }

        log::warn!("No source yielded records for the {role} dataset");
        Ok(Vec::new())
    }
}

#[async_trait]
impl DatasetLoader for SourceChain {
    async fn load(&self) -> Result<Datasets, SourceError> {
        let primary = self.load_role(SourceRole::Primary).await?;
        let backup = self.load_role(SourceRole::Backup).await?;

        if primary.is_empty() && backup.is_empty() {
            return Err(SourceError::NoData);
        }

        Ok(Datasets { primary, backup })
    }
}

/// A load attempt that any number of callers can await.
type SharedLoad = Shared<BoxFuture<'static, Result<Arc<Datasets>, LoadError>>>;

/// One-time, shared dataset load.
pub struct DatasetStore {
    loader: Arc<dyn DatasetLoader>,
    load: Mutex<Option<SharedLoad>>,
    status: Arc<RwLock<LoadStatus>>,
}

impl std::fmt::Debug for DatasetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetStore")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl DatasetStore {
    /// Creates a store that loads lazily through `loader`.
    #[must_use]
    pub fn new(loader: impl DatasetLoader + 'static) -> Self {
        Self {
            loader: Arc::new(loader),
            load: Mutex::new(None),
            status: Arc::new(RwLock::new(LoadStatus::Uninitialized)),
        }
    }

    /// Creates a store over a list of source definitions.
    #[must_use]
    pub fn from_sources(sources: Vec<SourceDefinition>) -> Self {
        Self::new(SourceChain::new(sources))
    }

    /// Creates a store that is already loaded.
    #[must_use]
    pub fn ready(datasets: Datasets) -> Self {
        let stats = datasets.stats();
        let loaded: SharedLoad = futures::future::ready(Ok(Arc::new(datasets)))
            .boxed()
            .shared();

        Self {
            loader: Arc::new(SourceChain::new(Vec::new())),
            load: Mutex::new(Some(loaded)),
            status: Arc::new(RwLock::new(LoadStatus::Ready { stats })),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the datasets, loading them on first use.
    ///
    /// Callers that arrive while a load is running wait for that load and
    /// get its result, success or failure.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the load fails. The store stays unloaded
    /// and the next call starts a fresh attempt.
    pub async fn get(&self) -> Result<Arc<Datasets>, LoadError> {
        let load = {
            let mut slot = self.load.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(current) if !matches!(current.peek(), Some(Err(_))) => current.clone(),
                _ => {
                    let started = self.start_load();
                    *slot = Some(started.clone());
                    started
                }
            }
        };

        let result = load.clone().await;

        if result.is_err() {
            let mut slot = self.load.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.as_ref().is_some_and(|current| current.ptr_eq(&load)) {
                *slot = None;
            }
        }

        result
    }

    fn start_load(&self) -> SharedLoad {
        let loader = Arc::clone(&self.loader);
        let status = Arc::clone(&self.status);
        set_status(&status, LoadStatus::Loading);

        async move {
            log::info!("Loading street datasets");

            match loader.load().await {
                Ok(datasets) => {
                    let stats = datasets.stats();
                    log::info!(
                        "Loaded {} primary and {} backup street records",
                        stats.primary_records,
                        stats.backup_records
                    );
                    set_status(&status, LoadStatus::Ready { stats });
                    Ok(Arc::new(datasets))
                }
                Err(e) => {
                    log::error!("Failed to load street datasets: {e}");
                    set_status(
                        &status,
                        LoadStatus::Failed {
                            reason: e.to_string(),
                        },
                    );
                    Err(LoadError::from(e))
                }
            }
        }
        .boxed()
        .shared()
    }
}

fn set_status(status: &RwLock<LoadStatus>, value: LoadStatus) {
    *status.write().unwrap_or_else(PoisonError::into_inner) = value;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use council_lookup_source_models::FetcherKind;
    use council_lookup_street::{DatasetFormat, build_dataset_from_cells};

    use super::*;
    use crate::source_def::FetcherConfig;

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        fail_first: bool,
    }

    #[async_trait]
    impl DatasetLoader for CountingLoader {
        async fn load(&self) -> Result<Datasets, SourceError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;

            if self.fail_first && call == 0 {
                return Err(SourceError::NoData);
            }

            Ok(Datasets {
                primary: build_dataset_from_cells(
                    &[vec!["1", "99", "all", "Main St", "1", "2"]],
                    DatasetFormat::Ranged,
                ),
                backup: Vec::new(),
            })
        }
    }

    struct FailingLoader {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DatasetLoader for FailingLoader {
        async fn load(&self) -> Result<Datasets, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err(SourceError::NoData)
        }
    }

    fn embedded(id: &str, role: SourceRole, priority: u32, dataset: &str) -> SourceDefinition {
        SourceDefinition {
            id: id.to_string(),
            name: id.to_string(),
            role,
            priority,
            enabled: true,
            fetcher: FetcherConfig::Embedded {
                dataset: dataset.to_string(),
                format: None,
            },
        }
    }

    #[tokio::test]
    async fn concurrent_gets_share_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(DatasetStore::new(CountingLoader {
            calls: Arc::clone(&calls),
            fail_first: false,
        }));

        let (a, b, c) = tokio::join!(store.get(), store.get(), store.get());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(c.unwrap().primary.len(), 1);
        assert!(matches!(store.status(), LoadStatus::Ready { .. }));
    }

    #[tokio::test]
    async fn failed_load_is_retried_on_next_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = DatasetStore::new(CountingLoader {
            calls: Arc::clone(&calls),
            fail_first: true,
        });

        assert_eq!(store.status(), LoadStatus::Uninitialized);

        let err = store.get().await.unwrap_err();
        assert!(matches!(err.source_error(), SourceError::NoData));
        assert!(matches!(store.status(), LoadStatus::Failed { .. }));

        let datasets = store.get().await.unwrap();
        assert_eq!(datasets.stats().primary_records, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_gets_share_one_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = DatasetStore::new(FailingLoader {
            calls: Arc::clone(&calls),
        });

        let (a, b, c) = tokio::join!(store.get(), store.get(), store.get());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for result in [a, b, c] {
            assert!(matches!(
                result.unwrap_err().source_error(),
                SourceError::NoData
            ));
        }
        assert!(matches!(store.status(), LoadStatus::Failed { .. }));

        assert!(store.get().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ready_store_does_not_load() {
        let store = DatasetStore::ready(Datasets::default());
        assert!(store.get().await.unwrap().primary.is_empty());
        assert_eq!(
            store.status(),
            LoadStatus::Ready {
                stats: DatasetStats {
                    primary_records: 0,
                    backup_records: 0,
                }
            }
        );
    }

    #[tokio::test]
    async fn chain_uses_first_yielding_source_per_role() {
        let chain = SourceChain::new(vec![
            embedded("legacy", SourceRole::Backup, 10, "street_data"),
            embedded("v2", SourceRole::Primary, 10, "street_data_v2"),
        ]);

        let datasets = chain.load().await.unwrap();
        assert!(datasets.primary.iter().all(|r| r.street_number.is_some()));
        assert!(datasets.backup.iter().all(|r| r.street_number.is_none()));
        assert_eq!(
            datasets.all_records().count(),
            datasets.primary.len() + datasets.backup.len()
        );
    }

    #[tokio::test]
    async fn chain_skips_disabled_sources() {
        let mut disabled = embedded("v2", SourceRole::Primary, 1, "street_data_v2");
        disabled.enabled = false;
        let chain = SourceChain::new(vec![
            disabled,
            embedded("legacy", SourceRole::Primary, 2, "street_data"),
        ]);

        let datasets = chain.load().await.unwrap();
        assert!(datasets.primary.iter().all(|r| r.street_number.is_none()));
        assert!(datasets.backup.is_empty());
    }

    #[tokio::test]
    async fn chain_error_aborts_the_load() {
        let chain = SourceChain::new(vec![
            SourceDefinition::csv_override("/nonexistent/council_lookup/streets.csv"),
            embedded("v2", SourceRole::Primary, 10, "street_data_v2"),
        ]);
        assert_eq!(chain.sources()[0].fetcher.kind(), FetcherKind::CsvFile);

        let err = chain.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[tokio::test]
    async fn empty_chain_has_no_data() {
        let chain = SourceChain::new(Vec::new());
        assert!(matches!(chain.load().await, Err(SourceError::NoData)));
    }
}
