use crate::domain::model::{iso_timestamp, ContactRow};
use crate::domain::ports::SheetSink;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const SAVED_MESSAGE: &str = "Data saved successfully";
pub const SAVE_FAILED: &str = "Failed to save data";

/// 所有請求共用，不保存單一請求的狀態
#[derive(Clone)]
pub struct AppState {
    sink: Arc<dyn SheetSink>,
}

impl AppState {
    pub fn new(sink: Arc<dyn SheetSink>) -> Self {
        Self { sink }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Response {
    let row = ContactRow {
        name: request.name,
        email: request.email,
        message: request.message,
        timestamp: iso_timestamp(chrono::Utc::now()),
    };
    let from = row.email.clone();

    match state.sink.append_row(row).await {
        Ok(()) => {
            tracing::info!("Saved contact message from {}", from);
            (StatusCode::OK, Json(json!({ "message": SAVED_MESSAGE }))).into_response()
        }
        Err(e) => {
            tracing::error!("Error saving data: {} ({})", e, e.user_friendly_message());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": SAVE_FAILED })),
            )
                .into_response()
        }
    }
}

/// 收到 Ctrl-C 時結束，讓進行中的 append 完成
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
