use super::repository;
use contracts::domain::a004_project::aggregate::{Project, ProjectCostSummary, ProjectDto};
use contracts::enums::ProjectStatus;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание нового проекта
pub async fn create(dto: ProjectDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PRJ-{}", Uuid::new_v4()));
    let mut aggregate = Project::new_for_insert(
        code,
        dto.description,
        dto.client_id.unwrap_or_default(),
        dto.date_from,
        dto.date_to,
        dto.budget.unwrap_or(0.0),
        dto.status.unwrap_or(ProjectStatus::Planned),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующего проекта
pub async fn update(dto: ProjectDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Project"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление проекта
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение проекта по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Project>> {
    repository::get_by_id(id).await
}

/// Список всех проектов
pub async fn list_all() -> anyhow::Result<Vec<Project>> {
    repository::list_all().await
}

/// Проекты клиента
pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<Project>> {
    repository::list_by_client(client_id).await
}

/// Сводка затрат по проекту: бюджет против суммы выставленных счетов
pub async fn cost_summary(id: Uuid) -> anyhow::Result<ProjectCostSummary> {
    let project = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Project"))?;

    let invoiced_net = crate::domain::a007_invoice::repository::sum_net_by_project(id).await?;

    Ok(ProjectCostSummary {
        project_id: project.to_string_id(),
        budget: project.budget,
        invoiced_net,
        remaining: project.budget - invoiced_net,
    })
}
