use super::strategy::{self, DEFAULT_PARALLEL_THRESHOLD, Strategy};
use super::trace::{SearchEvent, SearchObserver, TracingObserver};
use super::types::{SearchError, SearchOutcome};
use super::validator::validate;
use crate::books::types::Book;
use crate::storage::repository::BookStore;

use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Snapshots with at least this many records use the parallel scan.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Validates queries, snapshots the store and runs the selected scan strategy.
///
/// Holds no per-search state, so one instance is shared by all in-flight requests.
pub struct SearchEngine {
    store: Arc<dyn BookStore>,
    config: SearchConfig,
    observer: Arc<dyn SearchObserver>,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            store,
            config: SearchConfig::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Searches the current contents of the store.
    ///
    /// Validation runs first; an invalid query never touches the store. The
    /// snapshot is read on the blocking pool. A store failure is returned as
    /// [`SearchError::StoreUnavailable`], distinct from an empty result.
    pub async fn search(&self, raw_query: &str) -> Result<SearchOutcome, SearchError> {
        let query = raw_query.trim();
        if let Some(rejected) = self.reject(query) {
            return Ok(rejected);
        }

        let started = Instant::now();
        let store = self.store.clone();
        let records = tokio::task::spawn_blocking(move || store.list_all())
            .await
            .map_err(|e| SearchError::Worker(e.to_string()))?
            .map_err(SearchError::StoreUnavailable)?;
        self.observer.on_event(&SearchEvent::SnapshotLoaded {
            records: records.len(),
            elapsed: started.elapsed(),
        });

        self.execute(query, records).await
    }

    /// Searches a snapshot supplied by the caller instead of reading the store.
    pub async fn search_snapshot(
        &self,
        raw_query: &str,
        records: Vec<Book>,
    ) -> Result<SearchOutcome, SearchError> {
        let query = raw_query.trim();
        if let Some(rejected) = self.reject(query) {
            return Ok(rejected);
        }
        self.execute(query, records).await
    }

    fn reject(&self, query: &str) -> Option<SearchOutcome> {
        let reason = validate(query).err()?;
        self.observer
            .on_event(&SearchEvent::QueryRejected { query, reason });
        Some(SearchOutcome::InvalidQuery(reason))
    }

    async fn execute(&self, query: &str, records: Vec<Book>) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let lower_query = query.to_lowercase();
        let scanned = records.len();

        let chosen = strategy::select(scanned, self.config.parallel_threshold);
        self.observer.on_event(&SearchEvent::StrategySelected {
            strategy: chosen,
            records: scanned,
        });

        let matched = match chosen {
            Strategy::Sequential => {
                strategy::sequential_scan(&records, &lower_query, self.observer.as_ref())
            }
            Strategy::Parallel => {
                strategy::parallel_scan(
                    Arc::from(records),
                    Arc::from(lower_query.as_str()),
                    self.observer.clone(),
                )
                .await?
            }
        };

        self.observer.on_event(&SearchEvent::Completed {
            query,
            scanned,
            matches: matched.len(),
            elapsed: started.elapsed(),
        });

        if matched.is_empty() {
            Ok(SearchOutcome::NoMatches {
                query: query.to_string(),
            })
        } else {
            Ok(SearchOutcome::Matches(matched))
        }
    }
}
