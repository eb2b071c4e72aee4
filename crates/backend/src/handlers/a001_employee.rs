use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::{a001_employee, a009_absence_day};
use crate::shared::error::status_for;

/// GET /api/employee
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a001_employee::aggregate::Employee>>,
    axum::http::StatusCode,
> {
    match a001_employee::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("employee list_all failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// GET /api/employee/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a001_employee::aggregate::Employee>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_employee::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/employee
pub async fn upsert(
    Json(dto): Json<contracts::domain::a001_employee::aggregate::EmployeeDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a001_employee::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a001_employee::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::warn!("employee upsert failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// DELETE /api/employee/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_employee::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/employee/:id/absences
pub async fn get_absences(
    Path(id): Path<String>,
) -> Result<
    Json<Vec<contracts::domain::a009_absence_day::aggregate::AbsenceDay>>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a009_absence_day::service::list_by_employee(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}
