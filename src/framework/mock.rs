//! # Mock Source & Testing Guide
//!
//! [`MockSource`] implements [`FetchSource`] entirely in memory. It lets you declare
//! which sources a test expects to be fetched, what each fetch returns, and then
//! inspect the exact order in which fetches were started and finished.
//!
//! ## When to use the Mock vs the Simulated Source
//!
//! | Feature | MockSource | SimulatedSource |
//! |---------|------------|-----------------|
//! | **Launch/finish log** | Recorded | Only in tracing output |
//! | **Error Injection** | Easy (`return_err`, `return_panic`) | Impossible (never fails) |
//! | **Delays** | Honoured (use a paused clock) | Honoured |
//! | **Use Case** | Asserting fan-out/fan-in behaviour | Production, timing demos |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use typed_gather::framework::mock::{MockEvent, MockSource};
//! use typed_gather::framework::{run_concurrent, FetchSource, FetchTask};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockSource::new();
//!     mock.expect_fetch("A").return_ok();
//!     mock.expect_fetch("B").return_ok();
//!     let mock = Arc::new(mock);
//!
//!     let source: Arc<dyn FetchSource> = mock.clone();
//!     let tasks = vec![FetchTask::from_secs("A", 0.0), FetchTask::from_secs("B", 0.0)];
//!     let results = run_concurrent(source, tasks).await.unwrap();
//!
//!     assert_eq!(results, vec!["A", "B"]);
//!     assert_eq!(mock.started(), vec!["A", "B"]);
//!     mock.verify();
//! }
//! ```
//!
//! Pair it with `#[tokio::test(start_paused = true)]` so delays resolve instantly
//! while keeping their relative order.
//!
//! Expectations for the same source name are queued: two tasks named `"A"` consume
//! two `expect_fetch("A")` entries in the order they were declared.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::core::{FetchError, FetchSource, FetchTask};

/// One entry in the mock's event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    Started(String),
    Finished(String),
}

#[derive(Debug, Clone)]
enum Expectation {
    Ok,
    Err(String),
    Panic(String),
}

type ExpectationQueues = Arc<Mutex<HashMap<String, VecDeque<Expectation>>>>;

/// An in-memory [`FetchSource`] with expectations and an event log.
#[derive(Debug, Default)]
pub struct MockSource {
    expectations: ExpectationQueues,
    events: Arc<Mutex<Vec<MockEvent>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a fetch of `source_name`.
    pub fn expect_fetch(&mut self, source_name: impl Into<String>) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            source_name: source_name.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Full start/finish log, in the order the events happened.
    pub fn events(&self) -> Vec<MockEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Source names in the order their fetches started.
    pub fn started(&self) -> Vec<String> {
        self.filter(|e| match e {
            MockEvent::Started(name) => Some(name.clone()),
            MockEvent::Finished(_) => None,
        })
    }

    /// Source names in the order their fetches finished.
    pub fn finished(&self) -> Vec<String> {
        self.filter(|e| match e {
            MockEvent::Finished(name) => Some(name.clone()),
            MockEvent::Started(_) => None,
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        let mut remaining: Vec<(&String, usize)> = exps
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(name, queue)| (name, queue.len()))
            .collect();
        if !remaining.is_empty() {
            remaining.sort();
            panic!("Not all expectations were met. Remaining: {:?}", remaining);
        }
    }

    fn filter(&self, f: impl Fn(&MockEvent) -> Option<String>) -> Vec<String> {
        self.events.lock().unwrap().iter().filter_map(f).collect()
    }

    fn next_expectation(&self, source_name: &str) -> Option<Expectation> {
        let mut exps = self.expectations.lock().unwrap();
        let queue = exps.get_mut(source_name)?;
        let expectation = queue.pop_front();
        if queue.is_empty() {
            exps.remove(source_name);
        }
        expectation
    }

    fn record(&self, event: MockEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl FetchSource for MockSource {
    async fn fetch(&self, task: &FetchTask) -> Result<String, FetchError> {
        self.record(MockEvent::Started(task.source_name.clone()));
        let expectation = self.next_expectation(&task.source_name);

        tokio::time::sleep(task.delay).await;
        let result = match expectation {
            Some(Expectation::Ok) => Ok(task.source_name.clone()),
            Some(Expectation::Err(reason)) => Err(FetchError::SourceFailed {
                source_name: task.source_name.clone(),
                reason,
            }),
            Some(Expectation::Panic(message)) => panic!("{message}"),
            None => Err(FetchError::SourceFailed {
                source_name: task.source_name.clone(),
                reason: "unexpected fetch".to_string(),
            }),
        };
        self.record(MockEvent::Finished(task.source_name.clone()));
        result
    }
}

/// Builder for fetch expectations.
pub struct FetchExpectationBuilder {
    source_name: String,
    expectations: ExpectationQueues,
}

impl FetchExpectationBuilder {
    /// The fetch succeeds and yields its source name.
    pub fn return_ok(self) {
        self.push(Expectation::Ok);
    }

    /// The fetch fails with `reason`.
    pub fn return_err(self, reason: impl Into<String>) {
        self.push(Expectation::Err(reason.into()));
    }

    /// The fetch panics with `message` once its delay has elapsed.
    pub fn return_panic(self, message: impl Into<String>) {
        self.push(Expectation::Panic(message.into()));
    }

    fn push(self, expectation: Expectation) {
        let mut exps = self.expectations.lock().unwrap();
        exps.entry(self.source_name).or_default().push_back(expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{run_concurrent, run_sequential};

    #[tokio::test(start_paused = true)]
    async fn test_every_launch_precedes_every_completion() {
        let mut mock = MockSource::new();
        for name in ["A", "B", "C"] {
            mock.expect_fetch(name).return_ok();
        }
        let mock = Arc::new(mock);

        let tasks = vec![
            FetchTask::from_secs("A", 2.0),
            FetchTask::from_secs("B", 1.0),
            FetchTask::from_secs("C", 1.5),
        ];
        let results = run_concurrent(mock.clone(), tasks).await.unwrap();

        assert_eq!(results, vec!["A", "B", "C"]);
        assert_eq!(mock.started(), vec!["A", "B", "C"]);
        assert_eq!(mock.finished(), vec!["B", "C", "A"]);

        let events = mock.events();
        let last_start = events.iter().rposition(|e| matches!(e, MockEvent::Started(_))).unwrap();
        let first_finish = events.iter().position(|e| matches!(e, MockEvent::Finished(_))).unwrap();
        assert!(last_start < first_finish, "fan-out must precede fan-in: {:?}", events);

        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_waits_for_every_task() {
        let mut mock = MockSource::new();
        mock.expect_fetch("A").return_ok();
        mock.expect_fetch("B").return_err("connection reset");
        mock.expect_fetch("C").return_ok();
        let mock = Arc::new(mock);

        let tasks = vec![
            FetchTask::from_secs("A", 3.0),
            FetchTask::from_secs("B", 0.5),
            FetchTask::from_secs("C", 1.0),
        ];
        let result = run_concurrent(mock.clone(), tasks).await;

        assert_eq!(
            result,
            Err(FetchError::SourceFailed {
                source_name: "B".to_string(),
                reason: "connection reset".to_string(),
            })
        );
        // No cancellation: A and C still ran to completion.
        assert_eq!(mock.finished(), vec!["B", "C", "A"]);
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_fetch_is_reported_after_every_task() {
        let mut mock = MockSource::new();
        mock.expect_fetch("A").return_ok();
        mock.expect_fetch("B").return_panic("source exploded");
        mock.expect_fetch("C").return_ok();
        let mock = Arc::new(mock);

        let tasks = vec![
            FetchTask::from_secs("A", 3.0),
            FetchTask::from_secs("B", 0.5),
            FetchTask::from_secs("C", 1.0),
        ];
        let run = crate::framework::timed(run_concurrent(mock.clone(), tasks)).await;

        match run.value {
            Err(FetchError::TaskAborted { source_name, reason }) => {
                assert_eq!(source_name, "B");
                assert!(reason.contains("source exploded"), "reason: {reason}");
            }
            other => panic!("expected TaskAborted for B, got {:?}", other),
        }
        // B never finished; A and C ran to completion before the aggregate resolved.
        assert_eq!(mock.finished(), vec!["C", "A"]);
        assert!(run.elapsed >= std::time::Duration::from_secs(3));
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_source_name_consumes_queued_expectations() {
        let mut mock = MockSource::new();
        mock.expect_fetch("A").return_ok();
        mock.expect_fetch("A").return_err("second call refused");
        let mock = Arc::new(mock);

        let tasks = vec![FetchTask::from_secs("A", 0.2), FetchTask::from_secs("A", 0.1)];
        let result = run_concurrent(mock.clone(), tasks).await;

        assert_eq!(
            result,
            Err(FetchError::SourceFailed {
                source_name: "A".to_string(),
                reason: "second call refused".to_string(),
            })
        );
        assert_eq!(mock.started(), vec!["A", "A"]);
        assert_eq!(mock.finished(), vec!["A", "A"]);
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_never_overlaps() {
        let mut mock = MockSource::new();
        mock.expect_fetch("X").return_ok();
        mock.expect_fetch("Y").return_ok();

        let tasks = vec![FetchTask::from_secs("X", 1.0), FetchTask::from_secs("Y", 1.0)];
        let results = run_sequential(&mock, &tasks).await.unwrap();

        assert_eq!(results, vec!["X", "Y"]);
        assert_eq!(
            mock.events(),
            vec![
                MockEvent::Started("X".into()),
                MockEvent::Finished("X".into()),
                MockEvent::Started("Y".into()),
                MockEvent::Finished("Y".into()),
            ]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_fetch_fails() {
        let mock = MockSource::new();
        let result = mock.fetch(&FetchTask::from_secs("ghost", 0.0)).await;
        assert!(matches!(result, Err(FetchError::SourceFailed { .. })));
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_unmet_expectations() {
        let mut mock = MockSource::new();
        mock.expect_fetch("never").return_ok();
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_counts_leftover_duplicates() {
        let mut mock = MockSource::new();
        mock.expect_fetch("A").return_ok();
        mock.expect_fetch("A").return_ok();
        mock.fetch(&FetchTask::from_secs("A", 0.0)).await.unwrap();
        mock.verify();
    }
}
