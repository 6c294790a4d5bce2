//! Search Observability Hook
//!
//! The engine reports what it does through a [`SearchObserver`] instead of
//! writing logs directly. Per-record events are only useful when debugging a
//! query, so the default observer emits them at `trace` level and everything
//! else at `debug`.

use super::matcher::BookField;
use super::strategy::Strategy;
use super::validator::QueryError;

use std::time::Duration;

#[derive(Debug)]
pub enum SearchEvent<'a> {
    QueryRejected {
        query: &'a str,
        reason: QueryError,
    },
    SnapshotLoaded {
        records: usize,
        elapsed: Duration,
    },
    StrategySelected {
        strategy: Strategy,
        records: usize,
    },
    /// Emitted once per chunk by the parallel scan.
    ChunkScanned {
        start: usize,
        len: usize,
        matches: usize,
    },
    RecordMatched {
        book_id: &'a str,
        field: BookField,
    },
    RecordSkipped {
        book_id: &'a str,
    },
    Completed {
        query: &'a str,
        scanned: usize,
        matches: usize,
        elapsed: Duration,
    },
}

/// Receives search events. Implementations must be cheap: `on_event` runs
/// inline on the scan path, once per record.
pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&self, event: &SearchEvent<'_>) {
        match event {
            SearchEvent::QueryRejected { query, reason } => {
                tracing::debug!("Rejected query {:?}: {}", query, reason);
            }
            SearchEvent::SnapshotLoaded { records, elapsed } => {
                tracing::debug!("Loaded {} books in {:?}", records, elapsed);
            }
            SearchEvent::StrategySelected { strategy, records } => {
                tracing::debug!("Using {:?} search for {} books", strategy, records);
            }
            SearchEvent::ChunkScanned {
                start,
                len,
                matches,
            } => {
                tracing::trace!(
                    "Chunk [{}..{}) produced {} matches",
                    start,
                    start + len,
                    matches
                );
            }
            SearchEvent::RecordMatched { book_id, field } => {
                tracing::trace!("Match in book {} on field {}", book_id, field);
            }
            SearchEvent::RecordSkipped { book_id } => {
                tracing::trace!("No match in book {}", book_id);
            }
            SearchEvent::Completed {
                query,
                scanned,
                matches,
                elapsed,
            } => {
                tracing::debug!(
                    "Search {:?} scanned {} books, {} matches in {:?}",
                    query,
                    scanned,
                    matches,
                    elapsed
                );
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&self, _event: &SearchEvent<'_>) {}
}
