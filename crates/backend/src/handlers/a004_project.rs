use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a004_project;
use crate::shared::error::status_for;

/// GET /api/project
pub async fn list_all(
) -> Result<Json<Vec<contracts::domain::a004_project::aggregate::Project>>, axum::http::StatusCode>
{
    match a004_project::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/project/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a004_project::aggregate::Project>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_project::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/project
pub async fn upsert(
    Json(dto): Json<contracts::domain::a004_project::aggregate::ProjectDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a004_project::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a004_project::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::warn!("project upsert failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// DELETE /api/project/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_project::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/project/by-client/:client_id
pub async fn list_by_client(
    Path(client_id): Path<String>,
) -> Result<Json<Vec<contracts::domain::a004_project::aggregate::Project>>, axum::http::StatusCode>
{
    let uuid = match uuid::Uuid::parse_str(&client_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_project::service::list_by_client(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/project/:id/costs
pub async fn cost_summary(
    Path(id): Path<String>,
) -> Result<
    Json<contracts::domain::a004_project::aggregate::ProjectCostSummary>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_project::service::cost_summary(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}
