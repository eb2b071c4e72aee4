use super::repository;
use chrono::NaiveDate;
use contracts::domain::a007_invoice::aggregate::{CommissionSummary, Invoice, InvoiceDto};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание нового счёта
pub async fn create(dto: InvoiceDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("INV-{}", Uuid::new_v4()));
    let invoice_number = dto.invoice_number.clone().unwrap_or_default();
    let mut aggregate = Invoice::new_for_insert(
        code,
        dto.description,
        dto.client_id.unwrap_or_default(),
        dto.project_id,
        dto.employee_id,
        invoice_number,
        dto.issue_date,
        dto.due_date,
        dto.net_amount.unwrap_or(0.0),
        dto.vat_rate.unwrap_or(0.0),
        dto.commission_rate.unwrap_or(0.0),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующего счёта
pub async fn update(dto: InvoiceDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Invoice"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Пометить счёт оплаченным
pub async fn mark_paid(id: Uuid, paid_date: Option<NaiveDate>) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Invoice"))?;

    if aggregate.is_paid {
        return Err(AppError::Validation("Invoice is already paid".into()).into());
    }

    let date = paid_date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    if date < aggregate.issue_date {
        return Err(AppError::Validation("Дата оплаты раньше даты выставления".into()).into());
    }

    aggregate.mark_paid(date);
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление счёта
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение счёта по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Invoice>> {
    repository::get_by_id(id).await
}

/// Список всех счетов
pub async fn list_all() -> anyhow::Result<Vec<Invoice>> {
    repository::list_all().await
}

/// Счета клиента
pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<Invoice>> {
    repository::list_by_client(client_id).await
}

/// Комиссия сотрудника по счетам, выставленным в периоде
pub async fn commission_total(
    employee_id: Uuid,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<CommissionSummary> {
    if date_to < date_from {
        return Err(AppError::Validation("Некорректный период".into()).into());
    }

    let (invoice_count, commission_total) =
        repository::sum_commission(employee_id, date_from, date_to).await?;

    Ok(CommissionSummary {
        employee_id: employee_id.to_string(),
        date_from,
        date_to,
        invoice_count,
        commission_total,
    })
}
