use chrono::Utc;
use contracts::domain::a001_employee::aggregate::{Employee, EmployeeId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub hire_date: chrono::NaiveDate,
    pub termination_date: Option<chrono::NaiveDate>,
    pub monthly_salary: f64,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Employee {
            base: BaseAggregate::with_metadata(
                EmployeeId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            position: m.position,
            hire_date: m.hire_date,
            termination_date: m.termination_date,
            monthly_salary: m.monthly_salary,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Employee>> {
    let mut items: Vec<Employee> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    // Sort by last name, then first name (case-insensitive)
    items.sort_by(|a, b| {
        (a.last_name.to_lowercase(), a.first_name.to_lowercase())
            .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase()))
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Employee>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Employee) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        first_name: Set(aggregate.first_name.clone()),
        last_name: Set(aggregate.last_name.clone()),
        email: Set(aggregate.email.clone()),
        phone: Set(aggregate.phone.clone()),
        position: Set(aggregate.position.clone()),
        hire_date: Set(aggregate.hire_date),
        termination_date: Set(aggregate.termination_date),
        monthly_salary: Set(aggregate.monthly_salary),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Обновление с проверкой версии (optimistic locking).
/// Несовпадение версии означает параллельное изменение записи.
pub async fn update(aggregate: &Employee) -> anyhow::Result<()> {
    let loaded_version = aggregate.base.metadata.version;
    let result = Entity::update_many()
        .col_expr(Column::Code, Expr::value(aggregate.base.code.clone()))
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(
            Column::FirstName,
            Expr::value(aggregate.first_name.clone()),
        )
        .col_expr(Column::LastName, Expr::value(aggregate.last_name.clone()))
        .col_expr(Column::Email, Expr::value(aggregate.email.clone()))
        .col_expr(Column::Phone, Expr::value(aggregate.phone.clone()))
        .col_expr(Column::Position, Expr::value(aggregate.position.clone()))
        .col_expr(Column::HireDate, Expr::value(aggregate.hire_date))
        .col_expr(
            Column::TerminationDate,
            Expr::value(aggregate.termination_date),
        )
        .col_expr(
            Column::MonthlySalary,
            Expr::value(aggregate.monthly_salary),
        )
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
