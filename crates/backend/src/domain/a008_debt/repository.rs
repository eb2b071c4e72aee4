use chrono::Utc;
use contracts::domain::a008_debt::aggregate::{Debt, DebtId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, Set,
    Statement,
};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a008_debt")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub client_id: String,
    pub amount: f64,
    pub due_date: chrono::NaiveDate,
    pub is_settled: bool,
    pub settled_date: Option<chrono::NaiveDate>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Debt {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Debt {
            base: BaseAggregate::with_metadata(
                DebtId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            client_id: m.client_id,
            amount: m.amount,
            due_date: m.due_date,
            is_settled: m.is_settled,
            settled_date: m.settled_date,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Debt>> {
    let items: Vec<Debt> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::DueDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<Debt>> {
    let items: Vec<Debt> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ClientId.eq(client_id.to_string()))
        .order_by_asc(Column::DueDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Debt>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Сумма непогашенных задолженностей (всех клиентов)
pub async fn outstanding_total() -> anyhow::Result<f64> {
    let result = conn()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COALESCE(SUM(amount), 0.0) AS total
             FROM a008_debt
             WHERE is_deleted = 0 AND is_settled = 0"
                .to_string(),
        ))
        .await?;

    match result {
        Some(row) => Ok(row.try_get("", "total")?),
        None => Ok(0.0),
    }
}

pub async fn insert(aggregate: &Debt) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        client_id: Set(aggregate.client_id.clone()),
        amount: Set(aggregate.amount),
        due_date: Set(aggregate.due_date),
        is_settled: Set(aggregate.is_settled),
        settled_date: Set(aggregate.settled_date),
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
pub async fn update(aggregate: &Debt) -> anyhow::Result<()> {
    let loaded_version = aggregate.base.metadata.version;
    let result = Entity::update_many()
        .col_expr(Column::Code, Expr::value(aggregate.base.code.clone()))
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(Column::ClientId, Expr::value(aggregate.client_id.clone()))
        .col_expr(Column::Amount, Expr::value(aggregate.amount))
        .col_expr(Column::DueDate, Expr::value(aggregate.due_date))
        .col_expr(Column::IsSettled, Expr::value(aggregate.is_settled))
        .col_expr(Column::SettledDate, Expr::value(aggregate.settled_date))
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
