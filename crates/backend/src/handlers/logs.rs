use axum::{extract::Query, Json};
use contracts::shared::logger::LogEntry;
use serde::Deserialize;
use serde_json::json;

use crate::shared::logger::repository;

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<u64>,
}

/// GET /api/logs
pub async fn list_all(
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<LogEntry>>, axum::http::StatusCode> {
    let limit = query.limit.unwrap_or(500);
    match repository::list_recent(limit).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub category: String,
    pub message: String,
}

/// POST /api/logs
pub async fn create(
    Json(request): Json<CreateLogRequest>,
) -> Result<(), axum::http::StatusCode> {
    match repository::log_event("client", &request.category, &request.message).await {
        Ok(()) => Ok(()),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// DELETE /api/logs
pub async fn clear_all() -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match repository::clear_all().await {
        Ok(deleted) => Ok(Json(json!({"deleted": deleted}))),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
