use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, Origin,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub Uuid);

impl ContractId {
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

impl AggregateId for ContractId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ContractId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Договор с клиентом. Номер в формате "<номер>/<год>",
/// нумерация начинается заново каждый календарный год.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    #[serde(flatten)]
    pub base: BaseAggregate<ContractId>,

    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "contractNumber")]
    pub contract_number: String,
    #[serde(rename = "signedDate")]
    pub signed_date: NaiveDate,
    #[serde(rename = "validFrom")]
    pub valid_from: NaiveDate,
    #[serde(rename = "validTo")]
    pub valid_to: Option<NaiveDate>,
    #[serde(rename = "totalAmount", default)]
    pub total_amount: f64,
}

impl Contract {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        client_id: String,
        contract_number: String,
        signed_date: NaiveDate,
        valid_from: NaiveDate,
        valid_to: Option<NaiveDate>,
        total_amount: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ContractId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            client_id,
            contract_number,
            signed_date,
            valid_from,
            valid_to,
            total_amount,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &ContractDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.client_id = dto.client_id.clone().unwrap_or_default();
        if let Some(number) = dto.contract_number.clone() {
            self.contract_number = number;
        }
        self.signed_date = dto.signed_date;
        self.valid_from = dto.valid_from;
        self.valid_to = dto.valid_to;
        self.total_amount = dto.total_amount.unwrap_or(0.0);
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
        if parse_number(&self.contract_number).is_none() {
            return Err("Номер договора должен иметь вид <номер>/<год>".into());
        }
        if let Some(valid_to) = self.valid_to {
            if valid_to < self.valid_from {
                return Err("Срок действия окончен раньше начала".into());
            }
        }
        if self.total_amount < 0.0 {
            return Err("Сумма не может быть отрицательной".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

/// Разобрать номер договора "<номер>/<год>" → (номер, год)
pub fn parse_number(value: &str) -> Option<(u32, i32)> {
    let (seq, year) = value.split_once('/')?;
    let seq: u32 = seq.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    if seq == 0 || !(1900..=9999).contains(&year) {
        return None;
    }
    Some((seq, year))
}

/// Собрать номер договора из номера и года
pub fn format_number(seq: u32, year: i32) -> String {
    format!("{}/{}", seq, year)
}

/// Следующий номер договора для года по списку существующих номеров.
/// Номера других лет и нечитаемые значения игнорируются.
pub fn next_number_for_year(existing: &[String], year: i32) -> String {
    let max_seq = existing
        .iter()
        .filter_map(|n| parse_number(n))
        .filter(|(_, y)| *y == year)
        .map(|(seq, _)| seq)
        .max()
        .unwrap_or(0);
    format_number(max_seq + 1, year)
}

/// Текущий календарный год
pub fn current_year() -> i32 {
    chrono::Utc::now().date_naive().year()
}

impl AggregateRoot for Contract {
    type Id = ContractId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "contract"
    }

    fn element_name() -> &'static str {
        "Договор"
    }

    fn list_name() -> &'static str {
        "Договоры"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    /// При создании может отсутствовать — номер будет присвоен автоматически
    #[serde(rename = "contractNumber")]
    pub contract_number: Option<String>,
    #[serde(rename = "signedDate", default = "default_date")]
    pub signed_date: NaiveDate,
    #[serde(rename = "validFrom", default = "default_date")]
    pub valid_from: NaiveDate,
    #[serde(rename = "validTo")]
    pub valid_to: Option<NaiveDate>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Option<f64>,
    pub comment: Option<String>,
}

fn default_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("17/2025"), Some((17, 2025)));
        assert_eq!(parse_number(" 3 / 2024 "), Some((3, 2024)));
        assert_eq!(parse_number("0/2025"), None);
        assert_eq!(parse_number("17-2025"), None);
        assert_eq!(parse_number("17/25"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc/2025"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1, 2025), "1/2025");
        assert_eq!(format_number(142, 2024), "142/2024");
    }

    #[test]
    fn test_next_number_empty() {
        assert_eq!(next_number_for_year(&[], 2025), "1/2025");
    }

    #[test]
    fn test_next_number_continues_sequence() {
        let existing = vec!["1/2025".to_string(), "7/2025".into(), "3/2025".into()];
        assert_eq!(next_number_for_year(&existing, 2025), "8/2025");
    }

    #[test]
    fn test_next_number_restarts_each_year() {
        let existing = vec!["41/2024".to_string(), "42/2024".into()];
        assert_eq!(next_number_for_year(&existing, 2025), "1/2025");
    }

    #[test]
    fn test_next_number_skips_garbage() {
        let existing = vec!["abc".to_string(), "5/2025".into(), "9/x".into()];
        assert_eq!(next_number_for_year(&existing, 2025), "6/2025");
    }

    fn contract() -> Contract {
        Contract::new_for_insert(
            "CON-001".into(),
            "Договор поставки".into(),
            Uuid::new_v4().to_string(),
            "1/2025".into(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            None,
            500_000.0,
            None,
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(contract().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_number() {
        let mut c = contract();
        c.contract_number = "первый".into();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_validity() {
        let mut c = contract();
        c.valid_to = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_update_keeps_number_when_absent() {
        let mut c = contract();
        let dto = ContractDto {
            description: "Договор поставки (ред. 2)".into(),
            client_id: Some(c.client_id.clone()),
            contract_number: None,
            signed_date: c.signed_date,
            valid_from: c.valid_from,
            valid_to: None,
            total_amount: Some(600_000.0),
            ..Default::default()
        };
        c.update(&dto);
        assert_eq!(c.contract_number, "1/2025");
        assert_eq!(c.total_amount, 600_000.0);
    }
}
