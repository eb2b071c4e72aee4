use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a006_contract;
use crate::shared::error::status_for;

/// GET /api/contract
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a006_contract::aggregate::Contract>>,
    axum::http::StatusCode,
> {
    match a006_contract::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/contract/next-number
pub async fn next_number() -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a006_contract::service::next_contract_number().await {
        Ok(number) => Ok(Json(json!({"contractNumber": number}))),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/contract/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a006_contract::aggregate::Contract>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_contract::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/contract
pub async fn upsert(
    Json(dto): Json<contracts::domain::a006_contract::aggregate::ContractDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a006_contract::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a006_contract::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::warn!("contract upsert failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// DELETE /api/contract/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_contract::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/contract/by-client/:client_id
pub async fn list_by_client(
    Path(client_id): Path<String>,
) -> Result<
    Json<Vec<contracts::domain::a006_contract::aggregate::Contract>>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&client_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_contract::service::list_by_client(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}
