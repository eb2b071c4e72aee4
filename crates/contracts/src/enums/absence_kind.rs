use serde::{Deserialize, Serialize};

/// Виды отсутствия сотрудника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceKind {
    Vacation,
    SickLeave,
    Unpaid,
    Other,
}

impl AbsenceKind {
    /// Получить код вида отсутствия
    pub fn code(&self) -> &'static str {
        match self {
            AbsenceKind::Vacation => "vacation",
            AbsenceKind::SickLeave => "sick-leave",
            AbsenceKind::Unpaid => "unpaid",
            AbsenceKind::Other => "other",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            AbsenceKind::Vacation => "Отпуск",
            AbsenceKind::SickLeave => "Больничный",
            AbsenceKind::Unpaid => "Без содержания",
            AbsenceKind::Other => "Прочее",
        }
    }

    /// Получить все виды
    pub fn all() -> Vec<AbsenceKind> {
        vec![
            AbsenceKind::Vacation,
            AbsenceKind::SickLeave,
            AbsenceKind::Unpaid,
            AbsenceKind::Other,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "vacation" => Some(AbsenceKind::Vacation),
            "sick-leave" => Some(AbsenceKind::SickLeave),
            "unpaid" => Some(AbsenceKind::Unpaid),
            "other" => Some(AbsenceKind::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for AbsenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for kind in AbsenceKind::all() {
            assert_eq!(AbsenceKind::from_code(kind.code()), Some(kind));
        }
    }
}
