use serde::{Deserialize, Serialize};

/// Статусы проекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planned,
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            ProjectStatus::Planned => "planned",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectStatus::Planned => "Запланирован",
            ProjectStatus::Active => "В работе",
            ProjectStatus::Completed => "Завершён",
            ProjectStatus::Archived => "В архиве",
        }
    }

    /// Получить все статусы
    pub fn all() -> Vec<ProjectStatus> {
        vec![
            ProjectStatus::Planned,
            ProjectStatus::Active,
            ProjectStatus::Completed,
            ProjectStatus::Archived,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "planned" => Some(ProjectStatus::Planned),
            "active" => Some(ProjectStatus::Active),
            "completed" => Some(ProjectStatus::Completed),
            "archived" => Some(ProjectStatus::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for status in ProjectStatus::all() {
            assert_eq!(ProjectStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ProjectStatus::from_code("frozen"), None);
        assert_eq!(ProjectStatus::from_code(""), None);
    }
}
