use super::repository;
use chrono::NaiveDate;
use contracts::domain::a008_debt::aggregate::{Debt, DebtDto};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание новой задолженности
pub async fn create(dto: DebtDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("DBT-{}", Uuid::new_v4()));
    let mut aggregate = Debt::new_for_insert(
        code,
        dto.description,
        dto.client_id.unwrap_or_default(),
        dto.amount.unwrap_or(0.0),
        dto.due_date,
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующей задолженности
pub async fn update(dto: DebtDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Debt"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Погашение задолженности
pub async fn settle(id: Uuid, settled_date: Option<NaiveDate>) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Debt"))?;

    if aggregate.is_settled {
        return Err(AppError::Validation("Debt is already settled".into()).into());
    }

    let date = settled_date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    aggregate.settle(date);
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление задолженности
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение задолженности по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Debt>> {
    repository::get_by_id(id).await
}

/// Список всех задолженностей
pub async fn list_all() -> anyhow::Result<Vec<Debt>> {
    repository::list_all().await
}

/// Задолженности клиента
pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<Debt>> {
    repository::list_by_client(client_id).await
}

/// Сумма непогашенных задолженностей
pub async fn outstanding_total() -> anyhow::Result<f64> {
    repository::outstanding_total().await
}
