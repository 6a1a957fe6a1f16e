//! # Core Fan-out/Fan-in Primitive
//!
//! This module defines the generic building blocks for running simulated fetches.
//!
//! ## Key Types
//!
//! - [`FetchTask`]: One `(source_name, delay)` unit of work.
//! - [`FetchSource`]: The trait that performs a single fetch (the "I/O").
//! - [`SimulatedSource`]: The production source. Waits for `delay`, then yields the name.
//! - [`FetchError`]: Errors that make the aggregate fail.
//!
//! ## Key Functions
//!
//! - [`run_concurrent`]: Launch every task, then wait for all of them.
//! - [`run_sequential`]: The comparison baseline. One task after another.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{FuturesOrdered, StreamExt};
use futures::FutureExt;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Task, Source trait, Errors)
// =============================================================================

/// A single simulated fetch: wait `delay`, then yield `source_name`.
///
/// Built once per request and discarded after completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchTask {
    pub source_name: String,
    #[serde(serialize_with = "serialize_secs")]
    pub delay: Duration,
}

impl FetchTask {
    pub fn new(source_name: impl Into<String>, delay: Duration) -> Self {
        Self {
            source_name: source_name.into(),
            delay,
        }
    }

    /// Convenience constructor taking the delay in (fractional) seconds.
    ///
    /// Negative or non-finite values collapse to a zero delay. Use the record
    /// decoder when the input comes from outside and must be rejected instead.
    pub fn from_secs(source_name: impl Into<String>, secs: f64) -> Self {
        let delay = Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO);
        Self::new(source_name, delay)
    }

    /// The delay in (fractional) seconds, as it appears on the wire and in logs.
    pub fn delay_secs(&self) -> f64 {
        self.delay.as_secs_f64()
    }
}

fn serialize_secs<S: serde::Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(delay.as_secs_f64())
}

/// Errors that make a fetch (and therefore the whole aggregate) fail.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FetchError {
    #[error("Source '{source_name}' failed: {reason}")]
    SourceFailed { source_name: String, reason: String },
    #[error("Fetch task for '{source_name}' did not complete: {reason}")]
    TaskAborted { source_name: String, reason: String },
}

/// Trait for anything that can perform a single fetch.
///
/// # Architecture Note
/// The fan-out logic in [`run_concurrent`] is written *once* against this trait.
/// Production code plugs in [`SimulatedSource`]; tests plug in
/// [`MockSource`](crate::framework::mock::MockSource) to observe launch order and
/// inject failures without waiting on real delays.
#[async_trait]
pub trait FetchSource: Send + Sync + 'static {
    /// Performs the fetch and returns the source name on success.
    async fn fetch(&self, task: &FetchTask) -> Result<String, FetchError>;
}

/// Simulated I/O: a non-blocking timed wait followed by the source name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSource;

#[async_trait]
impl FetchSource for SimulatedSource {
    async fn fetch(&self, task: &FetchTask) -> Result<String, FetchError> {
        tokio::time::sleep(task.delay).await;
        Ok(task.source_name.clone())
    }
}

// =============================================================================
// 2. A SINGLE FETCH (with signals)
// =============================================================================

/// Runs one task against the source, emitting the "Fetching..." and "Done!" signals.
pub async fn fetch_one<S: FetchSource + ?Sized>(source: &S, task: &FetchTask) -> Result<String, FetchError> {
    info!(source = %task.source_name, delay_secs = task.delay_secs(), "Fetching...");
    let result = source.fetch(task).await;
    match &result {
        Ok(_) => info!(source = %task.source_name, "Done!"),
        Err(e) => warn!(source = %task.source_name, error = %e, "Fetch failed"),
    }
    result
}

// =============================================================================
// 3. FAN-OUT / FAN-IN
// =============================================================================

/// Runs every task concurrently and returns the names in INPUT order.
///
/// **Concurrency Model**:
/// Each fetch is one lightweight future. All of them are driven by the calling task
/// through a [`FuturesOrdered`], which polls them for the first time in input order,
/// so every fetch starts (and emits "Fetching...") in input order before any of them
/// is awaited to completion, whatever runtime flavor the caller is on. Completions
/// happen in whatever order the delays dictate; the output is yielded by input
/// position, so the result order never depends on completion order.
///
/// Every launched fetch runs to completion. A fetch that panics is caught and
/// reported as [`FetchError::TaskAborted`] for its own position. If any fetch
/// failed, the first failure by input index is returned once all of them are done.
#[instrument(skip(source, tasks), fields(total = tasks.len()))]
pub async fn run_concurrent(source: Arc<dyn FetchSource>, tasks: Vec<FetchTask>) -> Result<Vec<String>, FetchError> {
    let source: &dyn FetchSource = source.as_ref();

    // Fan-out
    let in_flight: FuturesOrdered<_> = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| async move {
            let outcome = AssertUnwindSafe(fetch_one(source, task)).catch_unwind().await;
            debug!(index, source = %task.source_name, "Task completed");
            outcome.unwrap_or_else(|payload| {
                let reason = panic_reason(payload.as_ref());
                warn!(index, source = %task.source_name, %reason, "Fetch task aborted");
                Err(FetchError::TaskAborted {
                    source_name: task.source_name.clone(),
                    reason,
                })
            })
        })
        .collect();
    debug!(queued = in_flight.len(), "All tasks queued");

    // Fan-in
    let outcomes: Vec<Result<String, FetchError>> = in_flight.collect().await;
    outcomes.into_iter().collect()
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    match payload.downcast_ref::<&str>() {
        Some(message) => format!("task panicked: {message}"),
        None => match payload.downcast_ref::<String>() {
            Some(message) => format!("task panicked: {message}"),
            None => "task panicked".to_string(),
        },
    }
}

/// Runs the tasks one after another. Total time is the SUM of the delays.
#[instrument(skip(source, tasks), fields(total = tasks.len()))]
pub async fn run_sequential<S: FetchSource + ?Sized>(source: &S, tasks: &[FetchTask]) -> Result<Vec<String>, FetchError> {
    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(fetch_one(source, task).await?);
    }
    Ok(results)
}

// =============================================================================
// 4. TIMING
// =============================================================================

/// The outcome of a timed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Formats the elapsed time as `"1.23 seconds"`.
    pub fn execution_time(&self) -> String {
        format_seconds(self.elapsed)
    }
}

/// Awaits `fut` and measures it on the tokio clock (which a paused test clock drives).
pub async fn timed<F, T>(fut: F) -> Timed<T>
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    let value = fut.await;
    let elapsed = start.elapsed();
    debug!(elapsed_secs = elapsed.as_secs_f64(), "Timed run finished");
    Timed { value, elapsed }
}

pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.2} seconds", elapsed.as_secs_f64())
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<FetchTask> {
        vec![
            FetchTask::from_secs("SourceA", 2.0),
            FetchTask::from_secs("SourceB", 1.0),
            FetchTask::from_secs("SourceC", 1.5),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_input_order() {
        let source: Arc<dyn FetchSource> = Arc::new(SimulatedSource);
        let results = run_concurrent(source, abc()).await.unwrap();
        assert_eq!(results, vec!["SourceA", "SourceB", "SourceC"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_takes_max_delay() {
        let source: Arc<dyn FetchSource> = Arc::new(SimulatedSource);
        let run = timed(run_concurrent(source, abc())).await;
        assert!(run.value.is_ok());
        assert!(run.elapsed >= Duration::from_secs(2));
        assert!(run.elapsed < Duration::from_millis(2100), "took {:?}", run.elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_takes_sum_of_delays() {
        let run = timed(run_sequential(&SimulatedSource, &abc())).await;
        assert_eq!(run.value.unwrap(), vec!["SourceA", "SourceB", "SourceC"]);
        assert!(run.elapsed >= Duration::from_millis(4500));
        assert!(run.elapsed < Duration::from_millis(4600), "took {:?}", run.elapsed);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let source: Arc<dyn FetchSource> = Arc::new(SimulatedSource);
        let results = run_concurrent(source, Vec::new()).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_from_secs_clamps_invalid_delays() {
        assert_eq!(FetchTask::from_secs("x", -1.0).delay, Duration::ZERO);
        assert_eq!(FetchTask::from_secs("x", f64::NAN).delay, Duration::ZERO);
        assert_eq!(FetchTask::from_secs("x", 1.5).delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_delay_secs_keeps_very_long_delays() {
        let task = FetchTask::new("slow", Duration::from_secs(u64::MAX));
        assert_eq!(task.delay_secs(), u64::MAX as f64);
        assert_eq!(serde_json::to_value(&task).unwrap()["delay"], serde_json::json!(u64::MAX as f64));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::from_millis(2004)), "2.00 seconds");
        assert_eq!(format_seconds(Duration::from_millis(4519)), "4.52 seconds");
    }
}
