pub mod rest;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::service::NoteService;

/// Full application router: liveness root plus the notes API under `/api`.
pub fn app(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", rest::router(service))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}
