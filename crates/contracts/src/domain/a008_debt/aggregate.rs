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
pub struct DebtId(pub Uuid);

impl DebtId {
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

impl AggregateId for DebtId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DebtId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Задолженность клиента
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    #[serde(flatten)]
    pub base: BaseAggregate<DebtId>,

    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    #[serde(rename = "isSettled", default)]
    pub is_settled: bool,
    #[serde(rename = "settledDate")]
    pub settled_date: Option<NaiveDate>,
}

impl Debt {
    pub fn new_for_insert(
        code: String,
        description: String,
        client_id: String,
        amount: f64,
        due_date: NaiveDate,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(DebtId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            client_id,
            amount,
            due_date,
            is_settled: false,
            settled_date: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Погасить задолженность
    pub fn settle(&mut self, settled_date: NaiveDate) {
        self.is_settled = true;
        self.settled_date = Some(settled_date);
    }

    pub fn update(&mut self, dto: &DebtDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.client_id = dto.client_id.clone().unwrap_or_default();
        self.amount = dto.amount.unwrap_or(0.0);
        self.due_date = dto.due_date;
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
        if self.amount <= 0.0 {
            return Err("Сумма задолженности должна быть положительной".into());
        }
        if self.is_settled && self.settled_date.is_none() {
            return Err("Не указана дата погашения".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Debt {
    type Id = DebtId;

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
        "a008"
    }

    fn collection_name() -> &'static str {
        "debt"
    }

    fn element_name() -> &'static str {
        "Задолженность"
    }

    fn list_name() -> &'static str {
        "Задолженности"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebtDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "dueDate", default = "default_date")]
    pub due_date: NaiveDate,
    pub comment: Option<String>,
}

fn default_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debt() -> Debt {
        Debt::new_for_insert(
            "DBT-001".into(),
            "Просрочка по счёту И-17".into(),
            Uuid::new_v4().to_string(),
            42_000.0,
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            None,
        )
    }

    #[test]
    fn test_validate_requires_positive_amount() {
        let mut d = debt();
        assert!(d.validate().is_ok());
        d.amount = 0.0;
        assert!(d.validate().is_err());
        d.amount = -5.0;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_settle() {
        let mut d = debt();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        d.settle(date);
        assert!(d.is_settled);
        assert_eq!(d.settled_date, Some(date));
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_settled_without_date_is_invalid() {
        let mut d = debt();
        d.is_settled = true;
        assert!(d.validate().is_err());
    }
}
