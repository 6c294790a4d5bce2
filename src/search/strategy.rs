//! Scan strategies.
//!
//! Small snapshots are scanned sequentially on the calling task. Larger ones are
//! split into contiguous chunks and every chunk is matched on its own tokio task;
//! the chunk results are merged through a channel once all tasks have finished.

use super::matcher::matching_field;
use super::trace::{SearchEvent, SearchObserver};
use super::types::SearchError;
use crate::books::types::Book;

use std::ops::Range;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 20;
pub const MIN_CHUNK_SIZE: usize = 20;
pub const MAX_CHUNK_SIZE: usize = 50;
pub const IDEAL_WORKERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sequential,
    Parallel,
}

/// Record counts strictly below `threshold` are scanned sequentially.
pub fn select(record_count: usize, threshold: usize) -> Strategy {
    if record_count < threshold {
        Strategy::Sequential
    } else {
        Strategy::Parallel
    }
}

/// Target chunk size: `record_count / IDEAL_WORKERS`, clamped to
/// `[MIN_CHUNK_SIZE, MAX_CHUNK_SIZE]`.
pub fn chunk_size(record_count: usize) -> usize {
    (record_count / IDEAL_WORKERS).clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// Splits `0..record_count` into contiguous ranges of at most `size` items.
/// Only the last range may be shorter.
pub fn chunk_ranges(record_count: usize, size: usize) -> Vec<Range<usize>> {
    let size = size.max(1);
    (0..record_count)
        .step_by(size)
        .map(|start| start..(start + size).min(record_count))
        .collect()
}

fn check(book: &Book, lower_query: &str, observer: &dyn SearchObserver) -> bool {
    match matching_field(book, lower_query) {
        Some(field) => {
            observer.on_event(&SearchEvent::RecordMatched {
                book_id: &book.book_id,
                field,
            });
            true
        }
        None => {
            observer.on_event(&SearchEvent::RecordSkipped {
                book_id: &book.book_id,
            });
            false
        }
    }
}

/// Returns the matching records in snapshot order.
pub fn sequential_scan(
    records: &[Book],
    lower_query: &str,
    observer: &dyn SearchObserver,
) -> Vec<Book> {
    records
        .iter()
        .filter(|book| check(book, lower_query, observer))
        .cloned()
        .collect()
}

/// Matches every chunk concurrently and merges the chunk results.
///
/// The merged list holds the same records as [`sequential_scan`] would return,
/// grouped by chunk in the order the chunks completed. If any chunk task fails
/// the whole scan fails; partial results are never returned.
pub async fn parallel_scan(
    snapshot: Arc<[Book]>,
    lower_query: Arc<str>,
    observer: Arc<dyn SearchObserver>,
) -> Result<Vec<Book>, SearchError> {
    let size = chunk_size(snapshot.len());
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<usize>>();

    let mut handles = Vec::new();
    for range in chunk_ranges(snapshot.len(), size) {
        let snapshot = snapshot.clone();
        let lower_query = lower_query.clone();
        let observer = observer.clone();
        let tx = tx.clone();

        handles.push(tokio::spawn(async move {
            let start = range.start;
            let len = range.len();
            let local: Vec<usize> = range
                .filter(|&i| check(&snapshot[i], &lower_query, observer.as_ref()))
                .collect();

            observer.on_event(&SearchEvent::ChunkScanned {
                start,
                len,
                matches: local.len(),
            });

            tx.send(local)
                .map_err(|_| format!("merge channel closed for chunk starting at {}", start))
        }));
    }
    drop(tx);

    let mut failure = None;
    for handle in handles.iter_mut() {
        if failure.is_some() {
            handle.abort();
            continue;
        }
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => failure = Some(e),
            Err(e) => failure = Some(e.to_string()),
        }
    }
    if let Some(reason) = failure {
        tracing::error!("Parallel search aborted: {}", reason);
        return Err(SearchError::Worker(reason));
    }

    let mut matched = Vec::new();
    while let Some(indices) = rx.recv().await {
        matched.extend(indices.into_iter().map(|i| snapshot[i].clone()));
    }
    Ok(matched)
}
