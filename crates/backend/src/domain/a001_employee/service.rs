use super::repository;
use contracts::domain::a001_employee::aggregate::{Employee, EmployeeDto};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание нового сотрудника
pub async fn create(dto: EmployeeDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("EMP-{}", Uuid::new_v4()));
    let mut aggregate = Employee::new_for_insert(
        code,
        dto.first_name,
        dto.last_name,
        dto.email.unwrap_or_default(),
        dto.phone.unwrap_or_default(),
        dto.position.unwrap_or_default(),
        dto.hire_date,
        dto.monthly_salary.unwrap_or(0.0),
        dto.comment,
    );
    aggregate.termination_date = dto.termination_date;

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующего сотрудника
pub async fn update(dto: EmployeeDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление сотрудника
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение сотрудника по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Employee>> {
    repository::get_by_id(id).await
}

/// Список сотрудников, отсортированный по фамилии
pub async fn list_all() -> anyhow::Result<Vec<Employee>> {
    repository::list_all().await
}
