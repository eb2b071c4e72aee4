use chrono::Utc;
use contracts::domain::a006_contract::aggregate::{Contract, ContractId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_contract")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub client_id: String,
    pub contract_number: String,
    pub signed_date: chrono::NaiveDate,
    pub valid_from: chrono::NaiveDate,
    pub valid_to: Option<chrono::NaiveDate>,
    pub total_amount: f64,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Contract {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Contract {
            base: BaseAggregate::with_metadata(
                ContractId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            client_id: m.client_id,
            contract_number: m.contract_number,
            signed_date: m.signed_date,
            valid_from: m.valid_from,
            valid_to: m.valid_to,
            total_amount: m.total_amount,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Contract>> {
    let items: Vec<Contract> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::SignedDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<Contract>> {
    let items: Vec<Contract> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ClientId.eq(client_id.to_string()))
        .order_by_desc(Column::SignedDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Contract>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Номера всех живых договоров (для вычисления следующего номера)
pub async fn list_numbers() -> anyhow::Result<Vec<String>> {
    let numbers: Vec<String> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .select_only()
        .column(Column::ContractNumber)
        .into_tuple()
        .all(conn())
        .await?;
    Ok(numbers)
}

/// Есть ли живой договор с таким номером
pub async fn exists_by_number(number: &str, exclude_id: Option<Uuid>) -> anyhow::Result<bool> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ContractNumber.eq(number));
    if let Some(exclude) = exclude_id {
        query = query.filter(Column::Id.ne(exclude.to_string()));
    }
    let count = query.count(conn()).await?;
    Ok(count > 0)
}

pub async fn insert(aggregate: &Contract) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        client_id: Set(aggregate.client_id.clone()),
        contract_number: Set(aggregate.contract_number.clone()),
        signed_date: Set(aggregate.signed_date),
        valid_from: Set(aggregate.valid_from),
        valid_to: Set(aggregate.valid_to),
        total_amount: Set(aggregate.total_amount),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Обновление с проверкой версии (optimistic locking)
pub async fn update(aggregate: &Contract) -> anyhow::Result<()> {
    let loaded_version = aggregate.base.metadata.version;
    let result = Entity::update_many()
        .col_expr(Column::Code, Expr::value(aggregate.base.code.clone()))
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(Column::ClientId, Expr::value(aggregate.client_id.clone()))
        .col_expr(
            Column::ContractNumber,
            Expr::value(aggregate.contract_number.clone()),
        )
        .col_expr(Column::SignedDate, Expr::value(aggregate.signed_date))
        .col_expr(Column::ValidFrom, Expr::value(aggregate.valid_from))
        .col_expr(Column::ValidTo, Expr::value(aggregate.valid_to))
        .col_expr(Column::TotalAmount, Expr::value(aggregate.total_amount))
        .col_expr(
            Column::UpdatedAt,
            Expr::value(Some(aggregate.base.metadata.updated_at)),
        )
        .col_expr(Column::Version, Expr::value(loaded_version + 1))
        .filter(Column::Id.eq(aggregate.base.id.value().to_string()))
        .filter(Column::Version.eq(loaded_version))
        .exec(conn())
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::VersionConflict.into());
    }
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
