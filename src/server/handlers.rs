//! Route handlers.
//!
//! Handlers are thin: decode (via [`Validated`]), call a transform or the fetch
//! primitive, shape the JSON answer.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::context::AppContext;
use super::error::ApiError;
use super::extract::Validated;
use crate::framework::{fetch_one, run_concurrent, run_sequential, timed, FetchTask};
use crate::model::{BlogPost, ConcurrentFetchRequest, OperationRequest, Person, Product, WordListRequest};
use crate::record::Record;
use crate::transform::{capitalize_words, Operation};

const FLOW_NOTE: &str = "Check the server log for the detailed execution flow";

// === Basics ===

pub async fn root() -> Json<Value> {
    Json(json!({"message": "Typed Gather API"}))
}

pub async fn health() -> &'static str {
    "OK"
}

// === Transforms ===

#[instrument(skip_all, fields(words = request.words.len()))]
pub async fn capitalize(Validated(request): Validated<WordListRequest>) -> Json<Value> {
    let result = capitalize_words(&request.words);
    Json(json!({"input": request.words, "result": result}))
}

/// Unknown operation names are answered with a soft `{"error": ...}` payload.
#[instrument(skip_all, fields(operation = %request.operation))]
pub async fn apply_operation(Validated(request): Validated<OperationRequest>) -> Json<Value> {
    match request.operation.parse::<Operation>() {
        Ok(op) => Json(json!({
            "input": request.numbers,
            "operation": op,
            "result": op.apply_all(&request.numbers),
        })),
        Err(e) => {
            warn!(error = %e, "Unsupported operation");
            Json(json!({"error": e.to_string()}))
        }
    }
}

pub async fn test_examples() -> Json<Value> {
    let words = ["apple", "banana", "cherry"];
    let numbers = [1.5, 2.0, 3.5];
    Json(json!({
        "capitalize_words_example": {
            "input": words,
            "result": capitalize_words(&words),
        },
        "apply_operation_example": {
            "input": numbers,
            "operation": Operation::Square,
            "result": Operation::Square.apply_all(&numbers),
        },
    }))
}

// === Records ===

pub async fn create_person(Validated(person): Validated<Person>) -> Json<Value> {
    info!(name = %person.name, "Person created");
    Json(json!({
        "message": "Person created successfully",
        "person_dict": person.to_mapping(),
        "person_model": person,
    }))
}

pub async fn create_product(Validated(product): Validated<Product>) -> Json<Value> {
    info!(name = %product.name, "Product created");
    Json(json!({
        "message": "Product created successfully",
        "product_dict": product.to_mapping(),
        "product_model": product,
    }))
}

pub async fn create_products_batch(Validated(products): Validated<Vec<Product>>) -> Json<Value> {
    info!(count = products.len(), "Products created");
    let products: Vec<Value> = products.iter().map(|p| p.to_mapping()).collect();
    Json(json!({
        "message": "Products created successfully",
        "products": products,
    }))
}

pub async fn create_blogpost(Validated(post): Validated<BlogPost>) -> Json<Value> {
    info!(title = %post.title, author = %post.author.name, "Blog post created");
    Json(json!({
        "message": "Blog post created successfully",
        "blogpost_dict": post.to_mapping(),
        "blogpost_model": post,
    }))
}

/// Decodes a fixed set of payloads to show defaults, coercion and nesting.
pub async fn record_examples() -> Result<Json<Value>, ApiError> {
    let person = Person::decode(&json!({"name": "Alice", "age": 30}))?;

    let item1_input = json!({"name": "Laptop", "price": 1299.99});
    let item2_input = json!({"name": "Phone", "price": "999.99", "in_stock": false});
    let item1 = Product::decode(&item1_input)?;
    let item2 = Product::decode(&item2_input)?;

    let post_input = json!({
        "title": "My First Post",
        "content": "Hello, typed records!",
        "author": {"name": "Bob", "email": "bob@example.com"},
    });
    let post = BlogPost::decode(&post_input)?;

    Ok(Json(json!({
        "q1_person_example": {
            "description": "Person model with name and age",
            "person_dict": person.to_mapping(),
            "person_model": person,
        },
        "q2_product_examples": {
            "description": "Product models with type conversion and default values",
            "item1": {"input": item1_input, "result": item1.to_mapping()},
            "item2": {"input": item2_input, "result": item2.to_mapping()},
        },
        "q3_blogpost_example": {
            "description": "Nested models - BlogPost with Author",
            "input_data": post_input,
            "result": post.to_mapping(),
        },
    })))
}

/// Decodes a post with a malformed author email and reports the expected failure.
pub async fn test_validation() -> Json<Value> {
    let invalid = json!({
        "title": "Test Post",
        "content": "Testing validation",
        "author": {"name": "Invalid User", "email": "invalid-email"},
    });
    match BlogPost::decode(&invalid) {
        Ok(post) => Json(json!({"message": "Validation passed", "data": post.to_mapping()})),
        Err(errors) => Json(json!({
            "message": "Validation failed as expected",
            "error": errors.to_string(),
            "error_details": errors.details(),
        })),
    }
}

// === Concurrency ===

fn secs(source_name: &str, secs: f64) -> FetchTask {
    FetchTask::from_secs(source_name, secs)
}

/// Runs SourceA (2.0s), SourceB (1.0s) and SourceC (1.5s) concurrently.
#[instrument(skip_all)]
pub async fn async_demo(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    let tasks = vec![secs("SourceA", 2.0), secs("SourceB", 1.0), secs("SourceC", 1.5)];
    let run = timed(run_concurrent(ctx.source.clone(), tasks)).await;
    let execution_time = run.execution_time();
    let results = run.value?;
    info!(?results, "Async demo finished");

    Ok(Json(json!({
        "message": "Async concurrent execution completed",
        "results": results,
        "execution_time": execution_time,
        "note": FLOW_NOTE,
    })))
}

#[instrument(skip_all, fields(source = %task.source_name))]
pub async fn fetch_single(
    State(ctx): State<Arc<AppContext>>,
    Validated(task): Validated<FetchTask>,
) -> Result<Json<Value>, ApiError> {
    let run = timed(fetch_one(ctx.source.as_ref(), &task)).await;
    let execution_time = run.execution_time();
    let source_name = run.value?;

    Ok(Json(json!({
        "message": "Single async fetch completed",
        "source_name": source_name,
        "delay": task.delay_secs(),
        "execution_time": execution_time,
    })))
}

#[instrument(skip_all, fields(tasks = request.tasks.len()))]
pub async fn fetch_concurrent(
    State(ctx): State<Arc<AppContext>>,
    Validated(request): Validated<ConcurrentFetchRequest>,
) -> Result<Json<Value>, ApiError> {
    let total_tasks = request.tasks.len();
    let run = timed(run_concurrent(ctx.source.clone(), request.tasks)).await;
    let execution_time = run.execution_time();
    let results = run.value?;

    Ok(Json(json!({
        "message": "Concurrent async fetch completed",
        "results": results,
        "total_tasks": total_tasks,
        "execution_time": execution_time,
        "note": FLOW_NOTE,
    })))
}

/// Same three one-second fetches, first one after another, then concurrently.
#[instrument(skip_all)]
pub async fn sync_vs_async_demo(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    let sequential_tasks = vec![secs("SyncA", 1.0), secs("SyncB", 1.0), secs("SyncC", 1.0)];
    let sequential = timed(run_sequential(ctx.source.as_ref(), &sequential_tasks)).await;

    let concurrent_tasks = vec![secs("AsyncA", 1.0), secs("AsyncB", 1.0), secs("AsyncC", 1.0)];
    let concurrent = timed(run_concurrent(ctx.source.clone(), concurrent_tasks)).await;

    let improvement = speedup(sequential.elapsed, concurrent.elapsed);
    let (sequential_time, concurrent_time) = (sequential.execution_time(), concurrent.execution_time());

    Ok(Json(json!({
        "synchronous": {
            "results": sequential.value?,
            "execution_time": sequential_time,
            "description": "Sequential execution - each task waits for previous",
        },
        "asynchronous": {
            "results": concurrent.value?,
            "execution_time": concurrent_time,
            "description": "Concurrent execution - tasks run simultaneously",
        },
        "performance_improvement": improvement,
    })))
}

fn speedup(sequential: Duration, concurrent: Duration) -> String {
    if concurrent.is_zero() {
        return "n/a".to_string();
    }
    format!("{:.1}x faster", sequential.as_secs_f64() / concurrent.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup_formatting() {
        assert_eq!(speedup(Duration::from_secs(3), Duration::from_secs(1)), "3.0x faster");
        assert_eq!(speedup(Duration::from_secs(5), Duration::from_secs(2)), "2.5x faster");
        assert_eq!(speedup(Duration::from_secs(1), Duration::ZERO), "n/a");
    }
}
