use chrono::{NaiveDate, Utc};
use contracts::domain::a005_project_period::aggregate::{ProjectPeriod, ProjectPeriodId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_project_period")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub project_id: String,
    pub date_from: chrono::NaiveDate,
    pub date_to: chrono::NaiveDate,
    pub note: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProjectPeriod {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        ProjectPeriod {
            base: BaseAggregate::with_metadata(
                ProjectPeriodId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            project_id: m.project_id,
            date_from: m.date_from,
            date_to: m.date_to,
            note: m.note,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ProjectPeriod>> {
    let items: Vec<ProjectPeriod> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::ProjectId)
        .order_by_asc(Column::DateFrom)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_project(project_id: Uuid) -> anyhow::Result<Vec<ProjectPeriod>> {
    let items: Vec<ProjectPeriod> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ProjectId.eq(project_id.to_string()))
        .order_by_asc(Column::DateFrom)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ProjectPeriod>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Есть ли у проекта живой период, пересекающийся с [date_from, date_to].
/// Для update сама запись исключается через exclude_id.
pub async fn exists_overlapping(
    project_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
    exclude_id: Option<Uuid>,
) -> anyhow::Result<bool> {
    // Включающие диапазоны: пересечение = a.from <= b.to && b.from <= a.to
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::DateFrom.lte(date_to))
        .filter(Column::DateTo.gte(date_from));
    if let Some(exclude) = exclude_id {
        query = query.filter(Column::Id.ne(exclude.to_string()));
    }
    let count = query.count(conn()).await?;
    Ok(count > 0)
}

pub async fn insert(aggregate: &ProjectPeriod) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        project_id: Set(aggregate.project_id.clone()),
        date_from: Set(aggregate.date_from),
        date_to: Set(aggregate.date_to),
        note: Set(aggregate.note.clone()),
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
pub async fn update(aggregate: &ProjectPeriod) -> anyhow::Result<()> {
    let loaded_version = aggregate.base.metadata.version;
    let result = Entity::update_many()
        .col_expr(Column::Code, Expr::value(aggregate.base.code.clone()))
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(Column::ProjectId, Expr::value(aggregate.project_id.clone()))
        .col_expr(Column::DateFrom, Expr::value(aggregate.date_from))
        .col_expr(Column::DateTo, Expr::value(aggregate.date_to))
        .col_expr(Column::Note, Expr::value(aggregate.note.clone()))
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
