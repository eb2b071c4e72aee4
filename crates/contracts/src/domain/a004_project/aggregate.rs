use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, Origin,
};
use crate::enums::ProjectStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
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

impl AggregateId for ProjectId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProjectId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub base: BaseAggregate<ProjectId>,

    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    /// Открытые проекты не имеют даты окончания
    #[serde(rename = "dateTo")]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub budget: f64,
    pub status: ProjectStatus,
}

impl Project {
    pub fn new_for_insert(
        code: String,
        description: String,
        client_id: String,
        date_from: NaiveDate,
        date_to: Option<NaiveDate>,
        budget: f64,
        status: ProjectStatus,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProjectId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            client_id,
            date_from,
            date_to,
            budget,
            status,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &ProjectDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.client_id = dto.client_id.clone().unwrap_or_default();
        self.date_from = dto.date_from;
        self.date_to = dto.date_to;
        self.budget = dto.budget.unwrap_or(0.0);
        if let Some(status) = dto.status {
            self.status = status;
        }
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
        if let Some(date_to) = self.date_to {
            if date_to < self.date_from {
                return Err("Дата окончания раньше даты начала".into());
            }
        }
        if self.budget < 0.0 {
            return Err("Бюджет не может быть отрицательным".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Project {
    type Id = ProjectId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "project"
    }

    fn element_name() -> &'static str {
        "Проект"
    }

    fn list_name() -> &'static str {
        "Проекты"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    #[serde(rename = "dateFrom", default = "default_date_from")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub status: Option<ProjectStatus>,
    pub comment: Option<String>,
}

fn default_date_from() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Сводка затрат по проекту (бюджет против выставленных счетов)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCostSummary {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub budget: f64,
    #[serde(rename = "invoicedNet")]
    pub invoiced_net: f64,
    pub remaining: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new_for_insert(
            "PRJ-001".into(),
            "Реконструкция склада".into(),
            Uuid::new_v4().to_string(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
            1_500_000.0,
            ProjectStatus::Active,
            None,
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(project().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_dates() {
        let mut p = project();
        p.date_to = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_allows_open_ended() {
        let mut p = project();
        p.date_to = None;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_client() {
        let mut p = project();
        p.client_id = "".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_update_keeps_status_when_absent() {
        let mut p = project();
        let dto = ProjectDto {
            description: p.base.description.clone(),
            client_id: Some(p.client_id.clone()),
            date_from: p.date_from,
            date_to: p.date_to,
            budget: Some(p.budget),
            status: None,
            ..Default::default()
        };
        p.update(&dto);
        assert_eq!(p.status, ProjectStatus::Active);
    }
}
