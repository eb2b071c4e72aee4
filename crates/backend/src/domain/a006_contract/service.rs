use super::repository;
use contracts::domain::a006_contract::aggregate::{
    self, Contract, ContractDto,
};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Следующий свободный номер договора текущего года ("<номер>/<год>")
pub async fn next_contract_number() -> anyhow::Result<String> {
    let existing = repository::list_numbers().await?;
    Ok(aggregate::next_number_for_year(
        &existing,
        aggregate::current_year(),
    ))
}

/// Создание договора. Если номер не передан, присваивается следующий
/// свободный номер текущего года.
pub async fn create(dto: ContractDto) -> anyhow::Result<Uuid> {
    let contract_number = match dto.contract_number.clone() {
        Some(number) if !number.trim().is_empty() => number,
        _ => next_contract_number().await?,
    };

    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CON-{}", contract_number.replace('/', "-")));
    let mut aggregate = Contract::new_for_insert(
        code,
        dto.description,
        dto.client_id.unwrap_or_default(),
        contract_number,
        dto.signed_date,
        dto.valid_from,
        dto.valid_to,
        dto.total_amount.unwrap_or(0.0),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if repository::exists_by_number(&aggregate.contract_number, None).await? {
        return Err(AppError::Duplicate(format!(
            "contract number {} already exists",
            aggregate.contract_number
        ))
        .into());
    }

    repository::insert(&aggregate).await
}

/// Обновление договора. Уникальность номера перепроверяется только
/// если номер изменился.
pub async fn update(dto: ContractDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Contract"))?;

    let old_number = aggregate.contract_number.clone();

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(AppError::Validation)?;
    aggregate.before_write();

    if aggregate.contract_number != old_number
        && repository::exists_by_number(&aggregate.contract_number, Some(id)).await?
    {
        return Err(AppError::Duplicate(format!(
            "contract number {} already exists",
            aggregate.contract_number
        ))
        .into());
    }

    repository::update(&aggregate).await
}

/// Мягкое удаление договора
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение договора по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Contract>> {
    repository::get_by_id(id).await
}

/// Список всех договоров
pub async fn list_all() -> anyhow::Result<Vec<Contract>> {
    repository::list_all().await
}

/// Договоры клиента
pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<Contract>> {
    repository::list_by_client(client_id).await
}
