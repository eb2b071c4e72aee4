use axum::extract::{Path, Query};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a007_invoice;
use crate::shared::error::status_for;

/// GET /api/invoice
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a007_invoice::aggregate::Invoice>>,
    axum::http::StatusCode,
> {
    match a007_invoice::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/invoice/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a007_invoice::aggregate::Invoice>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_invoice::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/invoice
pub async fn upsert(
    Json(dto): Json<contracts::domain::a007_invoice::aggregate::InvoiceDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a007_invoice::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a007_invoice::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::warn!("invoice upsert failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// DELETE /api/invoice/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_invoice::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    #[serde(rename = "paidDate")]
    pub paid_date: Option<NaiveDate>,
}

/// POST /api/invoice/:id/pay
pub async fn mark_paid(
    Path(id): Path<String>,
    Json(request): Json<MarkPaidRequest>,
) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_invoice::service::mark_paid(uuid, request.paid_date).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!("invoice mark_paid failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// GET /api/invoice/by-client/:client_id
pub async fn list_by_client(
    Path(client_id): Path<String>,
) -> Result<
    Json<Vec<contracts::domain::a007_invoice::aggregate::Invoice>>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&client_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_invoice::service::list_by_client(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct CommissionQuery {
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
}

/// GET /api/invoice/commission-summary?employeeId=...&dateFrom=...&dateTo=...
pub async fn commission_summary(
    Query(query): Query<CommissionQuery>,
) -> Result<
    Json<contracts::domain::a007_invoice::aggregate::CommissionSummary>,
    axum::http::StatusCode,
> {
    let employee_id = match uuid::Uuid::parse_str(&query.employee_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_invoice::service::commission_total(employee_id, query.date_from, query.date_to).await
    {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}
