use super::repository;
use contracts::domain::a009_absence_day::aggregate::{AbsenceDay, AbsenceDayDto};
use contracts::enums::AbsenceKind;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание записи об отсутствии. На сотрудника и дату — не более одной записи.
pub async fn create(dto: AbsenceDayDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("ABS-{}", Uuid::new_v4()));
    let mut aggregate = AbsenceDay::new_for_insert(
        code,
        dto.description.clone(),
        dto.employee_id.unwrap_or_default(),
        dto.date,
        dto.kind.unwrap_or(AbsenceKind::Other),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if repository::exists_by_employee_and_date(&aggregate.employee_id, aggregate.date, None).await?
    {
        return Err(AppError::Duplicate(format!(
            "absence already registered for employee {} on {}",
            aggregate.employee_id, aggregate.date
        ))
        .into());
    }

    repository::insert(&aggregate).await
}

/// Обновление записи. Дубликат (сотрудник, дата) перепроверяется
/// только если эта пара изменилась.
pub async fn update(dto: AbsenceDayDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("AbsenceDay"))?;

    let needs_duplicate_check = aggregate.identity_changed(&dto);

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if needs_duplicate_check
        && repository::exists_by_employee_and_date(&aggregate.employee_id, aggregate.date, Some(id))
            .await?
    {
        return Err(AppError::Duplicate(format!(
            "absence already registered for employee {} on {}",
            aggregate.employee_id, aggregate.date
        ))
        .into());
    }

    repository::update(&aggregate).await
}

/// Мягкое удаление записи
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение записи по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<AbsenceDay>> {
    repository::get_by_id(id).await
}

/// Список всех записей
pub async fn list_all() -> anyhow::Result<Vec<AbsenceDay>> {
    repository::list_all().await
}

/// Дни отсутствия сотрудника
pub async fn list_by_employee(employee_id: Uuid) -> anyhow::Result<Vec<AbsenceDay>> {
    repository::list_by_employee(employee_id).await
}
