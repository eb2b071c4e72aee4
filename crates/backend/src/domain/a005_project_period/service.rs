use super::repository;
use contracts::domain::a005_project_period::aggregate::{ProjectPeriod, ProjectPeriodDto};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание периода проекта. Пересечение с существующими периодами запрещено.
pub async fn create(dto: ProjectPeriodDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PP-{}", Uuid::new_v4()));
    let mut aggregate = ProjectPeriod::new_for_insert(
        code,
        dto.description,
        dto.project_id.unwrap_or_default(),
        dto.date_from,
        dto.date_to,
        dto.note.unwrap_or_default(),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if repository::exists_overlapping(
        &aggregate.project_id,
        aggregate.date_from,
        aggregate.date_to,
        None,
    )
    .await?
    {
        return Err(AppError::Duplicate(
            "project period overlaps an existing period".into(),
        )
        .into());
    }

    repository::insert(&aggregate).await
}

/// Обновление периода. Пересечения перепроверяются только если
/// изменился проект или границы периода.
pub async fn update(dto: ProjectPeriodDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("ProjectPeriod"))?;

    let needs_overlap_check = aggregate.bounds_changed(&dto);

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if needs_overlap_check
        && repository::exists_overlapping(
            &aggregate.project_id,
            aggregate.date_from,
            aggregate.date_to,
            Some(id),
        )
        .await?
    {
        return Err(AppError::Duplicate(
            "project period overlaps an existing period".into(),
        )
        .into());
    }

    repository::update(&aggregate).await
}

/// Мягкое удаление периода
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение периода по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ProjectPeriod>> {
    repository::get_by_id(id).await
}

/// Список всех периодов
pub async fn list_all() -> anyhow::Result<Vec<ProjectPeriod>> {
    repository::list_all().await
}

/// Периоды одного проекта по возрастанию даты начала
pub async fn list_by_project(project_id: Uuid) -> anyhow::Result<Vec<ProjectPeriod>> {
    repository::list_by_project(project_id).await
}
