use super::repository;
use contracts::domain::a002_contractor::aggregate::{Contractor, ContractorDto};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Создание нового подрядчика с проверкой уникальности налогового номера
pub async fn create(dto: ContractorDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CTR-{}", Uuid::new_v4()));
    let mut aggregate = Contractor::new_for_insert(
        code,
        dto.description,
        dto.tax_id.unwrap_or_default(),
        dto.contact_email.unwrap_or_default(),
        dto.phone.unwrap_or_default(),
        dto.specialization.unwrap_or_default(),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if repository::exists_by_tax_id(&aggregate.tax_id).await? {
        return Err(AppError::Duplicate(format!(
            "contractor with tax id {} already exists",
            aggregate.tax_id
        ))
        .into());
    }

    repository::insert(&aggregate).await
}

/// Обновление подрядчика. Дубликат налогового номера проверяется
/// только если номер действительно изменился.
pub async fn update(dto: ContractorDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Contractor"))?;

    let needs_duplicate_check = aggregate.tax_id_changed(&dto);

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if needs_duplicate_check
        && repository::exists_by_tax_id_excluding_id(&aggregate.tax_id, id).await?
    {
        return Err(AppError::Duplicate(format!(
            "contractor with tax id {} already exists",
            aggregate.tax_id
        ))
        .into());
    }

    repository::update(&aggregate).await
}

/// Мягкое удаление подрядчика
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение подрядчика по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Contractor>> {
    repository::get_by_id(id).await
}

/// Список всех подрядчиков
pub async fn list_all() -> anyhow::Result<Vec<Contractor>> {
    repository::list_all().await
}
