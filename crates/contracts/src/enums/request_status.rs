use serde::{Deserialize, Serialize};

/// Статус расчёта CPI
///
/// Переходы однонаправленные: `Draft -> Formed -> Completed | Rejected`,
/// и `Draft -> Deleted` (удаление пустого черновика).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Draft,
    Formed,
    Completed,
    Rejected,
    Deleted,
}

impl RequestStatus {
    /// Код статуса в формате API
    pub fn code(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "DRAFT",
            RequestStatus::Formed => "FORMED",
            RequestStatus::Completed => "COMPLETED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Deleted => "DELETED",
        }
    }

    /// Человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "Черновик",
            RequestStatus::Formed => "Оформлен",
            RequestStatus::Completed => "Завершен",
            RequestStatus::Rejected => "Отклонен",
            RequestStatus::Deleted => "Удален",
        }
    }

    /// Вариант бейджа для отображения статуса
    pub fn badge_variant(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "neutral",
            RequestStatus::Formed => "primary",
            RequestStatus::Completed => "success",
            RequestStatus::Rejected => "error",
            RequestStatus::Deleted => "warning",
        }
    }

    pub fn all() -> Vec<RequestStatus> {
        vec![
            RequestStatus::Draft,
            RequestStatus::Formed,
            RequestStatus::Completed,
            RequestStatus::Rejected,
            RequestStatus::Deleted,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DRAFT" => Some(RequestStatus::Draft),
            "FORMED" => Some(RequestStatus::Formed),
            "COMPLETED" => Some(RequestStatus::Completed),
            "REJECTED" => Some(RequestStatus::Rejected),
            "DELETED" => Some(RequestStatus::Deleted),
            _ => None,
        }
    }

    /// Терминальные статусы не имеют исходящих переходов
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Rejected | RequestStatus::Deleted
        )
    }

    /// Разрешён ли переход в указанный статус
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Draft, RequestStatus::Formed)
                | (RequestStatus::Draft, RequestStatus::Deleted)
                | (RequestStatus::Formed, RequestStatus::Completed)
                | (RequestStatus::Formed, RequestStatus::Rejected)
        )
    }

    /// Статус, в который переводит решение модератора
    pub fn moderation_outcome(approve: bool) -> RequestStatus {
        if approve {
            RequestStatus::Completed
        } else {
            RequestStatus::Rejected
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert!(RequestStatus::Draft.can_transition_to(RequestStatus::Formed));
        assert!(RequestStatus::Draft.can_transition_to(RequestStatus::Deleted));
        assert!(RequestStatus::Formed.can_transition_to(RequestStatus::Completed));
        assert!(RequestStatus::Formed.can_transition_to(RequestStatus::Rejected));

        assert!(!RequestStatus::Draft.can_transition_to(RequestStatus::Completed));
        assert!(!RequestStatus::Formed.can_transition_to(RequestStatus::Draft));
        assert!(!RequestStatus::Formed.can_transition_to(RequestStatus::Deleted));
    }

    #[test]
    fn test_terminal_states_have_no_transitions() {
        for status in RequestStatus::all().into_iter().filter(|s| s.is_terminal()) {
            for next in RequestStatus::all() {
                assert!(!status.can_transition_to(next), "{} -> {}", status, next);
            }
        }
    }

    #[test]
    fn test_moderation_outcome() {
        assert_eq!(RequestStatus::moderation_outcome(true), RequestStatus::Completed);
        assert_eq!(RequestStatus::moderation_outcome(false), RequestStatus::Rejected);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&RequestStatus::Formed).unwrap();
        assert_eq!(json, "\"FORMED\"");
        let parsed: RequestStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(parsed, RequestStatus::Completed);
        assert_eq!(RequestStatus::from_code("nope"), None);
    }
}
