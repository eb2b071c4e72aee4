use super::repository;
use contracts::domain::a003_client::aggregate::{Client, ClientDto};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание нового клиента
pub async fn create(dto: ClientDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CLT-{}", Uuid::new_v4()));
    let mut aggregate = Client::new_for_insert(
        code,
        dto.description,
        dto.tax_id.unwrap_or_default(),
        dto.address.unwrap_or_default(),
        dto.contact_person.unwrap_or_default(),
        dto.email.unwrap_or_default(),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующего клиента
pub async fn update(dto: ClientDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Client"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление клиента
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение клиента по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Client>> {
    repository::get_by_id(id).await
}

/// Список всех клиентов
pub async fn list_all() -> anyhow::Result<Vec<Client>> {
    repository::list_all().await
}
