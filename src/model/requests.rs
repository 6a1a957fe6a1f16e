//! Request wrappers decoded from HTTP bodies.

use serde::Serialize;
use serde_json::Value;

use crate::framework::FetchTask;
use crate::record::{Decode, FieldPath, Fields, Record, ValidationErrors};

/// `{"words": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordListRequest {
    pub words: Vec<String>,
}

impl Decode for WordListRequest {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let words = fields.required("words");
        fields.finish(|| Some(Self { words: words? }))
    }
}

impl Record for WordListRequest {
    const NAME: &'static str = "WordListRequest";
}

/// `{"numbers": [...], "operation": "square"}`
///
/// The operation stays a plain string here; resolving it against the supported
/// set is the handler's job so an unknown name can be reported softly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRequest {
    pub numbers: Vec<f64>,
    pub operation: String,
}

impl Decode for OperationRequest {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let numbers = fields.required("numbers");
        let operation = fields.required("operation");
        fields.finish(|| {
            Some(Self {
                numbers: numbers?,
                operation: operation?,
            })
        })
    }
}

impl Record for OperationRequest {
    const NAME: &'static str = "OperationRequest";
}

/// `{"source_name": "A", "delay": 1.5}` with `delay` in seconds.
impl Decode for FetchTask {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let source_name = fields.required::<String>("source_name");
        let delay = fields.required("delay");
        fields.finish(|| Some(FetchTask::new(source_name?, delay?)))
    }
}

impl Record for FetchTask {
    const NAME: &'static str = "FetchTask";
}

/// `{"tasks": [{"source_name": ..., "delay": ...}, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcurrentFetchRequest {
    pub tasks: Vec<FetchTask>,
}

impl Decode for ConcurrentFetchRequest {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let tasks = fields.required("tasks");
        fields.finish(|| Some(Self { tasks: tasks? }))
    }
}

impl Record for ConcurrentFetchRequest {
    const NAME: &'static str = "ConcurrentFetchRequest";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_decode_concurrent_request() {
        let request = ConcurrentFetchRequest::decode(&json!({
            "tasks": [
                {"source_name": "A", "delay": 2},
                {"source_name": "B", "delay": 0.25},
            ]
        }))
        .unwrap();
        assert_eq!(
            request.tasks,
            vec![
                FetchTask::new("A", Duration::from_secs(2)),
                FetchTask::new("B", Duration::from_millis(250)),
            ]
        );
    }

    #[test]
    fn test_nested_task_errors_carry_paths() {
        let err = ConcurrentFetchRequest::decode(&json!({
            "tasks": [
                {"source_name": "A", "delay": 1},
                {"delay": -3},
            ]
        }))
        .unwrap_err();
        let fields: Vec<&str> = err.errors().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["tasks.1.source_name", "tasks.1.delay"]);
    }

    #[test]
    fn test_operation_request_accepts_mixed_numbers() {
        let request = OperationRequest::decode(&json!({"numbers": [1, 2.5, "3"], "operation": "cube"})).unwrap();
        assert_eq!(request.numbers, vec![1.0, 2.5, 3.0]);
        assert_eq!(request.operation, "cube");
    }

    #[test]
    fn test_word_list_rejects_non_strings() {
        let err = WordListRequest::decode(&json!({"words": ["ok", 5]})).unwrap_err();
        assert_eq!(err.errors()[0].field(), "words.1");
    }

    #[test]
    fn test_fetch_task_echo_serializes_seconds() {
        let task = FetchTask::new("A", Duration::from_millis(1500));
        assert_eq!(task.to_mapping(), json!({"source_name": "A", "delay": 1.5}));
    }
}
