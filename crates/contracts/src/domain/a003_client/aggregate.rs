use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, Origin,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
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

impl AggregateId for ClientId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ClientId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(flatten)]
    pub base: BaseAggregate<ClientId>,

    #[serde(rename = "taxId", default)]
    pub tax_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "contactPerson", default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
}

impl Client {
    pub fn new_for_insert(
        code: String,
        description: String,
        tax_id: String,
        address: String,
        contact_person: String,
        email: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ClientId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            tax_id,
            address,
            contact_person,
            email,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &ClientDto) {
        if let Some(code) = dto.code.clone() {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.tax_id = dto.tax_id.clone().unwrap_or_default();
        self.address = dto.address.clone().unwrap_or_default();
        self.contact_person = dto.contact_person.clone().unwrap_or_default();
        self.email = dto.email.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            return Err("Некорректный email".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Client {
    type Id = ClientId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "client"
    }

    fn element_name() -> &'static str {
        "Клиент"
    }

    fn list_name() -> &'static str {
        "Клиенты"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "taxId")]
    pub tax_id: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "contactPerson")]
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut c = Client::new_for_insert(
            "CLT-001".into(),
            "ООО \"Заказчик\"".into(),
            "7712345678".into(),
            "г. Москва".into(),
            "Иванова А.А.".into(),
            "a.ivanova@example.com".into(),
            None,
        );
        assert!(c.validate().is_ok());

        c.base.description = "".into();
        assert!(c.validate().is_err());
    }
}
