use axum::debug_handler;

/// A handler for a simple liveness check
#[debug_handler]
pub async fn index_handler() -> &'static str {
    "Study Gateway is running!"
}
