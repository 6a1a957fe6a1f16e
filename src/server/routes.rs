use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::context::AppContext;
use super::handlers;

/// Builds the route table over an explicitly supplied context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Transforms
        .route("/capitalize-words", post(handlers::capitalize))
        .route("/apply-operation", post(handlers::apply_operation))
        .route("/test-examples", get(handlers::test_examples))
        // Validated records
        .route("/person", post(handlers::create_person))
        .route("/product", post(handlers::create_product))
        .route("/products/batch", post(handlers::create_products_batch))
        .route("/blogpost", post(handlers::create_blogpost))
        .route("/pydantic-examples", get(handlers::record_examples))
        .route("/test-validation", post(handlers::test_validation))
        // Concurrency
        .route("/async-demo", get(handlers::async_demo))
        .route("/fetch-single", post(handlers::fetch_single))
        .route("/fetch-concurrent", post(handlers::fetch_concurrent))
        .route("/sync-vs-async-demo", get(handlers::sync_vs_async_demo))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}
