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
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
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

impl AggregateId for EmployeeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EmployeeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    pub base: BaseAggregate<EmployeeId>,

    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(rename = "hireDate")]
    pub hire_date: NaiveDate,
    #[serde(rename = "terminationDate")]
    pub termination_date: Option<NaiveDate>,
    #[serde(rename = "monthlySalary", default)]
    pub monthly_salary: f64,
}

impl Employee {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        position: String,
        hire_date: NaiveDate,
        monthly_salary: f64,
        comment: Option<String>,
    ) -> Self {
        let description = display_name(&last_name, &first_name);
        let mut base = BaseAggregate::new(EmployeeId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            first_name,
            last_name,
            email,
            phone,
            position,
            hire_date,
            termination_date: None,
            monthly_salary,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &EmployeeDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.first_name = dto.first_name.clone();
        self.last_name = dto.last_name.clone();
        self.email = dto.email.clone().unwrap_or_default();
        self.phone = dto.phone.clone().unwrap_or_default();
        self.position = dto.position.clone().unwrap_or_default();
        self.hire_date = dto.hire_date;
        self.termination_date = dto.termination_date;
        self.monthly_salary = dto.monthly_salary.unwrap_or(0.0);
        self.base.comment = dto.comment.clone();
        self.base.description = display_name(&self.last_name, &self.first_name);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("Имя не может быть пустым".into());
        }
        if self.last_name.trim().is_empty() {
            return Err("Фамилия не может быть пустой".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            return Err("Некорректный email".into());
        }
        if let Some(termination) = self.termination_date {
            if termination < self.hire_date {
                return Err("Дата увольнения раньше даты приёма".into());
            }
        }
        if self.monthly_salary < 0.0 {
            return Err("Оклад не может быть отрицательным".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.description = display_name(&self.last_name, &self.first_name);
        self.touch_updated();
    }
}

/// Отображаемое имя сотрудника: "Фамилия Имя"
pub fn display_name(last_name: &str, first_name: &str) -> String {
    format!("{} {}", last_name.trim(), first_name.trim())
        .trim()
        .to_string()
}

impl AggregateRoot for Employee {
    type Id = EmployeeId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "employee"
    }

    fn element_name() -> &'static str {
        "Сотрудник"
    }

    fn list_name() -> &'static str {
        "Сотрудники"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmployeeDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "hireDate", default = "default_hire_date")]
    pub hire_date: NaiveDate,
    #[serde(rename = "terminationDate")]
    pub termination_date: Option<NaiveDate>,
    #[serde(rename = "monthlySalary")]
    pub monthly_salary: Option<f64>,
    pub comment: Option<String>,
}

fn default_hire_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> Employee {
        Employee::new_for_insert(
            "EMP-001".into(),
            "Иван".into(),
            "Петров".into(),
            "petrov@example.com".into(),
            "".into(),
            "Инженер".into(),
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            85_000.0,
            None,
        )
    }

    #[test]
    fn test_new_for_insert_builds_description() {
        let e = employee();
        assert_eq!(e.base.description, "Петров Иван");
        assert_eq!(e.base.metadata.version, 0);
        assert!(!e.base.metadata.is_deleted);
    }

    #[test]
    fn test_validate_ok() {
        assert!(employee().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let mut e = employee();
        e.first_name = "  ".into();
        assert!(e.validate().is_err());

        let mut e = employee();
        e.last_name = "".into();
        assert!(e.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut e = employee();
        e.email = "not-an-email".into();
        assert!(e.validate().is_err());

        // Пустой email допустим
        e.email = "".into();
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_termination_before_hire() {
        let mut e = employee();
        e.termination_date = NaiveDate::from_ymd_opt(2022, 12, 31);
        assert!(e.validate().is_err());

        e.termination_date = NaiveDate::from_ymd_opt(2023, 3, 1);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_salary() {
        let mut e = employee();
        e.monthly_salary = -1.0;
        assert!(e.validate().is_err());
    }

    #[test]
    fn test_update_copies_fields_and_rebuilds_description() {
        let mut e = employee();
        let dto = EmployeeDto {
            id: Some(e.to_string_id()),
            code: None,
            first_name: "Пётр".into(),
            last_name: "Сидоров".into(),
            email: Some("sidorov@example.com".into()),
            phone: Some("+7 900 000-00-00".into()),
            position: Some("Старший инженер".into()),
            hire_date: e.hire_date,
            termination_date: None,
            monthly_salary: Some(95_000.0),
            comment: Some("перевод".into()),
        };
        e.update(&dto);
        assert_eq!(e.base.description, "Сидоров Пётр");
        assert_eq!(e.monthly_salary, 95_000.0);
        assert_eq!(e.base.code, "EMP-001"); // код не затирается пустым DTO
        assert_eq!(e.base.comment.as_deref(), Some("перевод"));
    }

    #[test]
    fn test_before_write_touches_timestamp() {
        let mut e = employee();
        let before = e.base.metadata.updated_at;
        e.before_write();
        assert!(e.base.metadata.updated_at >= before);
    }
}
