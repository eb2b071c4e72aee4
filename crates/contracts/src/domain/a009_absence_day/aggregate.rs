use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, Origin,
};
use crate::enums::AbsenceKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsenceDayId(pub Uuid);

impl AbsenceDayId {
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

impl AggregateId for AbsenceDayId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AbsenceDayId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// День отсутствия сотрудника. На одного сотрудника и дату — не более одной записи.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceDay {
    #[serde(flatten)]
    pub base: BaseAggregate<AbsenceDayId>,

    #[serde(rename = "employeeId")]
    pub employee_id: String,
    pub date: NaiveDate,
    pub kind: AbsenceKind,
}

impl AbsenceDay {
    pub fn new_for_insert(
        code: String,
        description: String,
        employee_id: String,
        date: NaiveDate,
        kind: AbsenceKind,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(AbsenceDayId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            employee_id,
            date,
            kind,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Изменилась ли пара (сотрудник, дата) относительно DTO.
    /// Повторная проверка дубликата при обновлении нужна только тогда.
    pub fn identity_changed(&self, dto: &AbsenceDayDto) -> bool {
        let incoming_employee = dto.employee_id.as_deref().unwrap_or_default();
        self.employee_id != incoming_employee || self.date != dto.date
    }

    pub fn update(&mut self, dto: &AbsenceDayDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.employee_id = dto.employee_id.clone().unwrap_or_default();
        self.date = dto.date;
        if let Some(kind) = dto.kind {
            self.kind = kind;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.employee_id.trim().is_empty() {
            return Err("Не указан сотрудник".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        if self.base.description.trim().is_empty() {
            self.base.description =
                format!("{} — {}", self.date.format("%d.%m.%Y"), self.kind.display_name());
        }
        self.touch_updated();
    }
}

impl AggregateRoot for AbsenceDay {
    type Id = AbsenceDayId;

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
        "a009"
    }

    fn collection_name() -> &'static str {
        "absence_day"
    }

    fn element_name() -> &'static str {
        "День отсутствия"
    }

    fn list_name() -> &'static str {
        "Дни отсутствия"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AbsenceDayDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "employeeId")]
    pub employee_id: Option<String>,
    #[serde(default = "default_date")]
    pub date: NaiveDate,
    pub kind: Option<AbsenceKind>,
    pub comment: Option<String>,
}

fn default_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absence() -> AbsenceDay {
        AbsenceDay::new_for_insert(
            "ABS-001".into(),
            "".into(),
            Uuid::new_v4().to_string(),
            NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
            AbsenceKind::Vacation,
            None,
        )
    }

    #[test]
    fn test_identity_changed_same_pair() {
        let a = absence();
        let dto = AbsenceDayDto {
            employee_id: Some(a.employee_id.clone()),
            date: a.date,
            kind: Some(AbsenceKind::SickLeave), // вид не входит в инвариант
            ..Default::default()
        };
        assert!(!a.identity_changed(&dto));
    }

    #[test]
    fn test_identity_changed_date() {
        let a = absence();
        let dto = AbsenceDayDto {
            employee_id: Some(a.employee_id.clone()),
            date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            ..Default::default()
        };
        assert!(a.identity_changed(&dto));
    }

    #[test]
    fn test_identity_changed_employee() {
        let a = absence();
        let dto = AbsenceDayDto {
            employee_id: Some(Uuid::new_v4().to_string()),
            date: a.date,
            ..Default::default()
        };
        assert!(a.identity_changed(&dto));
    }

    #[test]
    fn test_before_write_fills_description() {
        let mut a = absence();
        a.before_write();
        assert_eq!(a.base.description, "14.07.2025 — Отпуск");
    }

    #[test]
    fn test_validate_requires_employee() {
        let mut a = absence();
        a.employee_id = "".into();
        assert!(a.validate().is_err());
    }
}
