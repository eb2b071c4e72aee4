use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a005_project_period;
use crate::shared::error::status_for;

/// GET /api/project_period
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a005_project_period::aggregate::ProjectPeriod>>,
    axum::http::StatusCode,
> {
    match a005_project_period::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/project_period/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<
    Json<contracts::domain::a005_project_period::aggregate::ProjectPeriod>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a005_project_period::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/project_period
pub async fn upsert(
    Json(dto): Json<contracts::domain::a005_project_period::aggregate::ProjectPeriodDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a005_project_period::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a005_project_period::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::warn!("project_period upsert failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// DELETE /api/project_period/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a005_project_period::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/project_period/by-project/:project_id
pub async fn list_by_project(
    Path(project_id): Path<String>,
) -> Result<
    Json<Vec<contracts::domain::a005_project_period::aggregate::ProjectPeriod>>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&project_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a005_project_period::service::list_by_project(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}
