//! Read-only HTTP view of the map model for browser map front-ends.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use stacks::MapModel;

type ModelRx = watch::Receiver<MapModel>;

pub fn router(model: ModelRx) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/model", get(model_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(model)
}

pub async fn serve(listener: TcpListener, model: ModelRx) {
    if let Err(e) = axum::serve(listener, router(model)).await {
        error!("Model server stopped: {}", e);
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    generation: u64,
}

/// Health check endpoint
async fn health_handler(State(model): State<ModelRx>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        generation: model.borrow().generation,
    })
}

/// Current map model snapshot
async fn model_handler(State(model): State<ModelRx>) -> Json<MapModel> {
    let snapshot = model.borrow().clone();
    Json(snapshot)
}
