use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, Origin,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(pub Uuid);

impl InvoiceId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for InvoiceId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(InvoiceId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Счёт клиенту. Сотрудник (если указан) получает комиссию от нетто-суммы.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(flatten)]
    pub base: BaseAggregate<InvoiceId>,

    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(rename = "employeeId")]
    pub employee_id: Option<String>,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: String,
    #[serde(rename = "issueDate")]
    pub issue_date: NaiveDate,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    #[serde(rename = "netAmount", default)]
    pub net_amount: f64,
    /// Ставка НДС как доля (0.20 = 20%)
    #[serde(rename = "vatRate", default)]
    pub vat_rate: f64,
    /// Ставка комиссии сотрудника как доля от нетто-суммы
    #[serde(rename = "commissionRate", default)]
    pub commission_rate: f64,
    #[serde(rename = "isPaid", default)]
    pub is_paid: bool,
    #[serde(rename = "paidDate")]
    pub paid_date: Option<NaiveDate>,
}

impl Invoice {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        client_id: String,
        project_id: Option<String>,
        employee_id: Option<String>,
        invoice_number: String,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        net_amount: f64,
        vat_rate: f64,
        commission_rate: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(InvoiceId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            client_id,
            project_id,
            employee_id,
            invoice_number,
            issue_date,
            due_date,
            net_amount,
            vat_rate,
            commission_rate,
            is_paid: false,
            paid_date: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Сумма с НДС
    pub fn gross_amount(&self) -> f64 {
        self.net_amount * (1.0 + self.vat_rate)
    }

    /// Комиссия сотрудника с этого счёта
    pub fn commission_amount(&self) -> f64 {
        self.net_amount * self.commission_rate
    }

    /// Пометить счёт оплаченным
    pub fn mark_paid(&mut self, paid_date: NaiveDate) {
        self.is_paid = true;
        self.paid_date = Some(paid_date);
    }

    pub fn update(&mut self, dto: &InvoiceDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.client_id = dto.client_id.clone().unwrap_or_default();
        self.project_id = dto.project_id.clone();
        self.employee_id = dto.employee_id.clone();
        if let Some(number) = dto.invoice_number.clone() {
            self.invoice_number = number;
        }
        self.issue_date = dto.issue_date;
        self.due_date = dto.due_date;
        self.net_amount = dto.net_amount.unwrap_or(0.0);
        self.vat_rate = dto.vat_rate.unwrap_or(0.0);
        self.commission_rate = dto.commission_rate.unwrap_or(0.0);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.client_id.trim().is_empty() {
            return Err("Не указан клиент".into());
        }
        if self.invoice_number.trim().is_empty() {
            return Err("Не указан номер счёта".into());
        }
        if self.due_date < self.issue_date {
            return Err("Срок оплаты раньше даты выставления".into());
        }
        if self.net_amount < 0.0 {
            return Err("Сумма не может быть отрицательной".into());
        }
        if !(0.0..=1.0).contains(&self.vat_rate) {
            return Err("Ставка НДС должна быть в диапазоне 0..1".into());
        }
        if !(0.0..=1.0).contains(&self.commission_rate) {
            return Err("Ставка комиссии должна быть в диапазоне 0..1".into());
        }
        if self.commission_rate > 0.0 && self.employee_id.is_none() {
            return Err("Комиссия указана, но не указан сотрудник".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn events(&self) -> &EventStore {
        &self.base.events
    }

    fn events_mut(&mut self) -> &mut EventStore {
        &mut self.base.events
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "invoice"
    }

    fn element_name() -> &'static str {
        "Счёт"
    }

    fn list_name() -> &'static str {
        "Счета"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InvoiceDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(rename = "employeeId")]
    pub employee_id: Option<String>,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: Option<String>,
    #[serde(rename = "issueDate", default = "default_date")]
    pub issue_date: NaiveDate,
    #[serde(rename = "dueDate", default = "default_date")]
    pub due_date: NaiveDate,
    #[serde(rename = "netAmount")]
    pub net_amount: Option<f64>,
    #[serde(rename = "vatRate")]
    pub vat_rate: Option<f64>,
    #[serde(rename = "commissionRate")]
    pub commission_rate: Option<f64>,
    pub comment: Option<String>,
}

fn default_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Итог комиссии сотрудника за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionSummary {
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
    #[serde(rename = "invoiceCount")]
    pub invoice_count: u64,
    #[serde(rename = "commissionTotal")]
    pub commission_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> Invoice {
        Invoice::new_for_insert(
            "INV-001".into(),
            "Счёт за январь".into(),
            Uuid::new_v4().to_string(),
            None,
            Some(Uuid::new_v4().to_string()),
            "И-17".into(),
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            100_000.0,
            0.20,
            0.05,
            None,
        )
    }

    #[test]
    fn test_gross_amount() {
        let inv = invoice();
        assert!((inv.gross_amount() - 120_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_commission_amount() {
        let inv = invoice();
        assert!((inv.commission_amount() - 5_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rates() {
        let mut inv = invoice();
        inv.vat_rate = 0.0;
        inv.commission_rate = 0.0;
        inv.employee_id = None;
        assert!((inv.gross_amount() - inv.net_amount).abs() < 1e-6);
        assert_eq!(inv.commission_amount(), 0.0);
        assert!(inv.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_due_before_issue() {
        let mut inv = invoice();
        inv.due_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(inv.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_rates() {
        let mut inv = invoice();
        inv.vat_rate = 1.5;
        assert!(inv.validate().is_err());

        let mut inv = invoice();
        inv.commission_rate = -0.1;
        assert!(inv.validate().is_err());
    }

    #[test]
    fn test_validate_commission_requires_employee() {
        let mut inv = invoice();
        inv.employee_id = None;
        assert!(inv.validate().is_err());
    }

    #[test]
    fn test_mark_paid() {
        let mut inv = invoice();
        assert!(!inv.is_paid);
        let date = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        inv.mark_paid(date);
        assert!(inv.is_paid);
        assert_eq!(inv.paid_date, Some(date));
    }
}
