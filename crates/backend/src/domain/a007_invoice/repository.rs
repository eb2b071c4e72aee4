use chrono::{NaiveDate, Utc};
use contracts::domain::a007_invoice::aggregate::{Invoice, InvoiceId};
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
#[sea_orm(table_name = "a007_invoice")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub client_id: String,
    pub project_id: Option<String>,
    pub employee_id: Option<String>,
    pub invoice_number: String,
    pub issue_date: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
    pub net_amount: f64,
    pub vat_rate: f64,
    pub commission_rate: f64,
    pub is_paid: bool,
    pub paid_date: Option<chrono::NaiveDate>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Invoice {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Invoice {
            base: BaseAggregate::with_metadata(
                InvoiceId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            client_id: m.client_id,
            project_id: m.project_id,
            employee_id: m.employee_id,
            invoice_number: m.invoice_number,
            issue_date: m.issue_date,
            due_date: m.due_date,
            net_amount: m.net_amount,
            vat_rate: m.vat_rate,
            commission_rate: m.commission_rate,
            is_paid: m.is_paid,
            paid_date: m.paid_date,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Invoice>> {
    let items: Vec<Invoice> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::IssueDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<Invoice>> {
    let items: Vec<Invoice> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ClientId.eq(client_id.to_string()))
        .order_by_desc(Column::IssueDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Invoice>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Сумма нетто всех живых счетов проекта
pub async fn sum_net_by_project(project_id: Uuid) -> anyhow::Result<f64> {
    let result = conn()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COALESCE(SUM(net_amount), 0.0) AS total
             FROM a007_invoice
             WHERE is_deleted = 0 AND project_id = ?",
            [project_id.to_string().into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(row.try_get("", "total")?),
        None => Ok(0.0),
    }
}

/// Комиссия сотрудника по счетам, выставленным в периоде [date_from, date_to]:
/// количество счетов и SUM(net_amount * commission_rate)
pub async fn sum_commission(
    employee_id: Uuid,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<(u64, f64)> {
    let result = conn()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(1) AS cnt, COALESCE(SUM(net_amount * commission_rate), 0.0) AS total
             FROM a007_invoice
             WHERE is_deleted = 0 AND employee_id = ? AND issue_date >= ? AND issue_date <= ?",
            [
                employee_id.to_string().into(),
                date_from.into(),
                date_to.into(),
            ],
        ))
        .await?;

    match result {
        Some(row) => {
            let count: i64 = row.try_get("", "cnt")?;
            let total: f64 = row.try_get("", "total")?;
            Ok((count as u64, total))
        }
        None => Ok((0, 0.0)),
    }
}

pub async fn insert(aggregate: &Invoice) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        client_id: Set(aggregate.client_id.clone()),
        project_id: Set(aggregate.project_id.clone()),
        employee_id: Set(aggregate.employee_id.clone()),
        invoice_number: Set(aggregate.invoice_number.clone()),
        issue_date: Set(aggregate.issue_date),
        due_date: Set(aggregate.due_date),
        net_amount: Set(aggregate.net_amount),
        vat_rate: Set(aggregate.vat_rate),
        commission_rate: Set(aggregate.commission_rate),
        is_paid: Set(aggregate.is_paid),
        paid_date: Set(aggregate.paid_date),
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
pub async fn update(aggregate: &Invoice) -> anyhow::Result<()> {
    let loaded_version = aggregate.base.metadata.version;
    let result = Entity::update_many()
        .col_expr(Column::Code, Expr::value(aggregate.base.code.clone()))
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(Column::ClientId, Expr::value(aggregate.client_id.clone()))
        .col_expr(Column::ProjectId, Expr::value(aggregate.project_id.clone()))
        .col_expr(
            Column::EmployeeId,
            Expr::value(aggregate.employee_id.clone()),
        )
        .col_expr(
            Column::InvoiceNumber,
            Expr::value(aggregate.invoice_number.clone()),
        )
        .col_expr(Column::IssueDate, Expr::value(aggregate.issue_date))
        .col_expr(Column::DueDate, Expr::value(aggregate.due_date))
        .col_expr(Column::NetAmount, Expr::value(aggregate.net_amount))
        .col_expr(Column::VatRate, Expr::value(aggregate.vat_rate))
        .col_expr(
            Column::CommissionRate,
            Expr::value(aggregate.commission_rate),
        )
        .col_expr(Column::IsPaid, Expr::value(aggregate.is_paid))
        .col_expr(Column::PaidDate, Expr::value(aggregate.paid_date))
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
