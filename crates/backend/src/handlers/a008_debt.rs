use axum::{extract::Path, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a008_debt;
use crate::shared::error::status_for;

/// GET /api/debt
pub async fn list_all(
) -> Result<Json<Vec<contracts::domain::a008_debt::aggregate::Debt>>, axum::http::StatusCode> {
    match a008_debt::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/debt/outstanding-total
pub async fn outstanding_total() -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a008_debt::service::outstanding_total().await {
        Ok(total) => Ok(Json(json!({"outstandingTotal": total}))),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/debt/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a008_debt::aggregate::Debt>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a008_debt::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/debt
pub async fn upsert(
    Json(dto): Json<contracts::domain::a008_debt::aggregate::DebtDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a008_debt::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a008_debt::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::warn!("debt upsert failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// DELETE /api/debt/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a008_debt::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    #[serde(rename = "settledDate")]
    pub settled_date: Option<NaiveDate>,
}

/// POST /api/debt/:id/settle
pub async fn settle(
    Path(id): Path<String>,
    Json(request): Json<SettleRequest>,
) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a008_debt::service::settle(uuid, request.settled_date).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!("debt settle failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// GET /api/debt/by-client/:client_id
pub async fn list_by_client(
    Path(client_id): Path<String>,
) -> Result<Json<Vec<contracts::domain::a008_debt::aggregate::Debt>>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&client_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a008_debt::service::list_by_client(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}
