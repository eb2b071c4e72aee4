use chrono::Utc;
use contracts::domain::a003_client::aggregate::{Client, ClientId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub tax_id: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Client {
            base: BaseAggregate::with_metadata(
                ClientId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            tax_id: m.tax_id,
            address: m.address,
            contact_person: m.contact_person,
            email: m.email,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Client>> {
    let mut items: Vec<Client> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.base
            .description
            .to_lowercase()
            .cmp(&b.base.description.to_lowercase())
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Client>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Client) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        tax_id: Set(aggregate.tax_id.clone()),
        address: Set(aggregate.address.clone()),
        contact_person: Set(aggregate.contact_person.clone()),
        email: Set(aggregate.email.clone()),
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
pub async fn update(aggregate: &Client) -> anyhow::Result<()> {
    let loaded_version = aggregate.base.metadata.version;
    let result = Entity::update_many()
        .col_expr(Column::Code, Expr::value(aggregate.base.code.clone()))
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(Column::TaxId, Expr::value(aggregate.tax_id.clone()))
        .col_expr(Column::Address, Expr::value(aggregate.address.clone()))
        .col_expr(
            Column::ContactPerson,
            Expr::value(aggregate.contact_person.clone()),
        )
        .col_expr(Column::Email, Expr::value(aggregate.email.clone()))
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
