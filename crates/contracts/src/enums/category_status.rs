use serde::{Deserialize, Serialize};

/// Статус категории в справочнике
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    #[default]
    Active,
    Deleted,
}

impl CategoryStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CategoryStatus::Active)
    }
}
