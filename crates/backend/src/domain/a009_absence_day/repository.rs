use chrono::{NaiveDate, Utc};
use contracts::domain::a009_absence_day::aggregate::{AbsenceDay, AbsenceDayId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::AbsenceKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a009_absence_day")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub employee_id: String,
    pub date: chrono::NaiveDate,
    pub kind: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AbsenceDay {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        AbsenceDay {
            base: BaseAggregate::with_metadata(
                AbsenceDayId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            employee_id: m.employee_id,
            date: m.date,
            kind: AbsenceKind::from_code(&m.kind).unwrap_or(AbsenceKind::Other),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<AbsenceDay>> {
    let items: Vec<AbsenceDay> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::Date)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Дни отсутствия сотрудника (новые первыми)
pub async fn list_by_employee(employee_id: Uuid) -> anyhow::Result<Vec<AbsenceDay>> {
    let items: Vec<AbsenceDay> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::EmployeeId.eq(employee_id.to_string()))
        .order_by_desc(Column::Date)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<AbsenceDay>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Есть ли у сотрудника живая запись на эту дату.
/// Для update сама запись исключается через exclude_id.
pub async fn exists_by_employee_and_date(
    employee_id: &str,
    date: NaiveDate,
    exclude_id: Option<Uuid>,
) -> anyhow::Result<bool> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::EmployeeId.eq(employee_id))
        .filter(Column::Date.eq(date));
    if let Some(exclude) = exclude_id {
        query = query.filter(Column::Id.ne(exclude.to_string()));
    }
    let count = query.count(conn()).await?;
    Ok(count > 0)
}

pub async fn insert(aggregate: &AbsenceDay) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        employee_id: Set(aggregate.employee_id.clone()),
        date: Set(aggregate.date),
        kind: Set(aggregate.kind.code().to_string()),
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
pub async fn update(aggregate: &AbsenceDay) -> anyhow::Result<()> {
    let loaded_version = aggregate.base.metadata.version;
    let result = Entity::update_many()
        .col_expr(Column::Code, Expr::value(aggregate.base.code.clone()))
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(
            Column::EmployeeId,
            Expr::value(aggregate.employee_id.clone()),
        )
        .col_expr(Column::Date, Expr::value(aggregate.date))
        .col_expr(Column::Kind, Expr::value(aggregate.kind.code().to_string()))
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
