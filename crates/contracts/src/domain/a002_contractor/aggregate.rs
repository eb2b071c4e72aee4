use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, Origin,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractorId(pub Uuid);

impl ContractorId {
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

impl AggregateId for ContractorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ContractorId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Подрядчик. Налоговый номер уникален среди неудалённых записей.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contractor {
    #[serde(flatten)]
    pub base: BaseAggregate<ContractorId>,

    #[serde(rename = "taxId", default)]
    pub tax_id: String,
    #[serde(rename = "contactEmail", default)]
    pub contact_email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialization: String,
}

impl Contractor {
    pub fn new_for_insert(
        code: String,
        description: String,
        tax_id: String,
        contact_email: String,
        phone: String,
        specialization: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ContractorId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            tax_id,
            contact_email,
            phone,
            specialization,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Изменился ли налоговый номер относительно DTO.
    /// Проверка дубликата при обновлении нужна только в этом случае.
    pub fn tax_id_changed(&self, dto: &ContractorDto) -> bool {
        let incoming = dto.tax_id.as_deref().unwrap_or_default().trim();
        self.tax_id.trim() != incoming
    }

    pub fn update(&mut self, dto: &ContractorDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.tax_id = dto.tax_id.clone().unwrap_or_default();
        self.contact_email = dto.contact_email.clone().unwrap_or_default();
        self.phone = dto.phone.clone().unwrap_or_default();
        self.specialization = dto.specialization.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.tax_id.trim().is_empty() {
            return Err("Налоговый номер не может быть пустым".into());
        }
        if !self.contact_email.trim().is_empty() && !self.contact_email.contains('@') {
            return Err("Некорректный email".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.tax_id = self.tax_id.trim().to_string();
        self.touch_updated();
    }
}

impl AggregateRoot for Contractor {
    type Id = ContractorId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "contractor"
    }

    fn element_name() -> &'static str {
        "Подрядчик"
    }

    fn list_name() -> &'static str {
        "Подрядчики"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractorDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "taxId")]
    pub tax_id: Option<String>,
    #[serde(rename = "contactEmail")]
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contractor() -> Contractor {
        Contractor::new_for_insert(
            "CTR-001".into(),
            "СтройМонтаж".into(),
            "7701234567".into(),
            "office@sm.example".into(),
            "".into(),
            "Монтажные работы".into(),
            None,
        )
    }

    #[test]
    fn test_validate_requires_tax_id() {
        let mut c = contractor();
        assert!(c.validate().is_ok());
        c.tax_id = "   ".into();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_tax_id_changed_detection() {
        let c = contractor();

        let mut dto = ContractorDto {
            description: c.base.description.clone(),
            tax_id: Some("7701234567".into()),
            ..Default::default()
        };
        assert!(!c.tax_id_changed(&dto));

        // Пробелы не считаются изменением
        dto.tax_id = Some("  7701234567  ".into());
        assert!(!c.tax_id_changed(&dto));

        dto.tax_id = Some("7709999999".into());
        assert!(c.tax_id_changed(&dto));

        dto.tax_id = None;
        assert!(c.tax_id_changed(&dto));
    }

    #[test]
    fn test_before_write_normalizes_tax_id() {
        let mut c = contractor();
        c.tax_id = " 7701234567 ".into();
        c.before_write();
        assert_eq!(c.tax_id, "7701234567");
    }

    #[test]
    fn test_update_copies_fields() {
        let mut c = contractor();
        let dto = ContractorDto {
            id: Some(c.to_string_id()),
            code: Some("CTR-002".into()),
            description: "СтройМонтаж Плюс".into(),
            tax_id: Some("7709999999".into()),
            contact_email: None,
            phone: Some("+7 495 111-22-33".into()),
            specialization: None,
            comment: None,
        };
        c.update(&dto);
        assert_eq!(c.base.code, "CTR-002");
        assert_eq!(c.base.description, "СтройМонтаж Плюс");
        assert_eq!(c.tax_id, "7709999999");
        assert_eq!(c.contact_email, "");
    }
}
