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
pub struct ProjectPeriodId(pub Uuid);

impl ProjectPeriodId {
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

impl AggregateId for ProjectPeriodId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProjectPeriodId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Отчётный период проекта. Периоды одного проекта не пересекаются.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPeriod {
    #[serde(flatten)]
    pub base: BaseAggregate<ProjectPeriodId>,

    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
    #[serde(default)]
    pub note: String,
}

impl ProjectPeriod {
    pub fn new_for_insert(
        code: String,
        description: String,
        project_id: String,
        date_from: NaiveDate,
        date_to: NaiveDate,
        note: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProjectPeriodId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            project_id,
            date_from,
            date_to,
            note,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Изменились ли поля, входящие в инвариант непересечения.
    /// Только при их изменении update() перепроверяет пересечения.
    pub fn bounds_changed(&self, dto: &ProjectPeriodDto) -> bool {
        let incoming_project = dto.project_id.as_deref().unwrap_or_default();
        self.project_id != incoming_project
            || self.date_from != dto.date_from
            || self.date_to != dto.date_to
    }

    pub fn update(&mut self, dto: &ProjectPeriodDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.project_id = dto.project_id.clone().unwrap_or_default();
        self.date_from = dto.date_from;
        self.date_to = dto.date_to;
        self.note = dto.note.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.project_id.trim().is_empty() {
            return Err("Не указан проект".into());
        }
        if self.date_to < self.date_from {
            return Err("Дата окончания раньше даты начала".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

/// Пересекаются ли два включающих диапазона дат
pub fn ranges_overlap(
    a_from: NaiveDate,
    a_to: NaiveDate,
    b_from: NaiveDate,
    b_to: NaiveDate,
) -> bool {
    a_from <= b_to && b_from <= a_to
}

impl AggregateRoot for ProjectPeriod {
    type Id = ProjectPeriodId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "project_period"
    }

    fn element_name() -> &'static str {
        "Период проекта"
    }

    fn list_name() -> &'static str {
        "Периоды проектов"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectPeriodDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(rename = "dateFrom", default = "default_date")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo", default = "default_date")]
    pub date_to: NaiveDate,
    pub note: Option<String>,
    pub comment: Option<String>,
}

fn default_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_ranges_overlap_disjoint() {
        assert!(!ranges_overlap(
            d(2025, 1, 1),
            d(2025, 1, 31),
            d(2025, 2, 1),
            d(2025, 2, 28)
        ));
    }

    #[test]
    fn test_ranges_overlap_touching_boundary() {
        // Включающие диапазоны: общий день — это пересечение
        assert!(ranges_overlap(
            d(2025, 1, 1),
            d(2025, 1, 31),
            d(2025, 1, 31),
            d(2025, 2, 28)
        ));
    }

    #[test]
    fn test_ranges_overlap_containment() {
        assert!(ranges_overlap(
            d(2025, 1, 1),
            d(2025, 12, 31),
            d(2025, 6, 1),
            d(2025, 6, 30)
        ));
    }

    #[test]
    fn test_ranges_overlap_partial() {
        assert!(ranges_overlap(
            d(2025, 1, 15),
            d(2025, 2, 15),
            d(2025, 2, 1),
            d(2025, 3, 1)
        ));
    }

    #[test]
    fn test_ranges_overlap_symmetric() {
        assert_eq!(
            ranges_overlap(d(2025, 1, 1), d(2025, 1, 10), d(2025, 1, 5), d(2025, 1, 20)),
            ranges_overlap(d(2025, 1, 5), d(2025, 1, 20), d(2025, 1, 1), d(2025, 1, 10))
        );
    }

    fn period() -> ProjectPeriod {
        ProjectPeriod::new_for_insert(
            "PP-001".into(),
            "Январь 2025".into(),
            Uuid::new_v4().to_string(),
            d(2025, 1, 1),
            d(2025, 1, 31),
            "".into(),
            None,
        )
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut p = period();
        assert!(p.validate().is_ok());
        p.date_to = d(2024, 12, 1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_allows_single_day() {
        let mut p = period();
        p.date_to = p.date_from;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_bounds_changed() {
        let p = period();
        let mut dto = ProjectPeriodDto {
            description: p.base.description.clone(),
            project_id: Some(p.project_id.clone()),
            date_from: p.date_from,
            date_to: p.date_to,
            ..Default::default()
        };
        assert!(!p.bounds_changed(&dto));

        dto.date_to = d(2025, 2, 15);
        assert!(p.bounds_changed(&dto));

        dto.date_to = p.date_to;
        dto.project_id = Some(Uuid::new_v4().to_string());
        assert!(p.bounds_changed(&dto));
    }
}
