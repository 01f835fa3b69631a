use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::a001_category::Category;
use crate::enums::RequestStatus;

// ============================================================================
// Line item
// ============================================================================

/// Позиция расчёта: категория, сумма расходов пользователя и коэффициент,
/// рассчитанный бэкендом
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(flatten)]
    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_spent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<f64>,
}

impl LineItem {
    pub fn category_id(&self) -> i64 {
        self.category.id
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Расчёт персонального индекса потребительских цен
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub status: RequestStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    /// Дата, с которой сравниваются цены
    #[serde(
        default,
        deserialize_with = "deserialize_comparison_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub comparison_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator_username: Option<String>,

    #[serde(rename = "personalCPI", default, skip_serializing_if = "Option::is_none")]
    pub personal_cpi: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_success: Option<bool>,

    #[serde(rename = "categories", default)]
    pub line_items: Vec<LineItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_categories_count: Option<i32>,
}

/// Идентичность расчёта.
///
/// Ответы бэкенда после мутаций иногда приходят без `id`; в этом случае
/// расчёт опознаётся по паре статус + дата создания.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKey {
    Id(i64),
    Unidentified {
        status: RequestStatus,
        created_at: Option<String>,
    },
}

/// Результат вычисления индекса для завершённого расчёта
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalculationOutcome {
    /// Расчёт ещё не завершён или результат не пришёл
    Pending,
    Success(f64),
    Failed,
}

impl CalculationRequest {
    pub fn key(&self) -> RequestKey {
        match self.id {
            Some(id) => RequestKey::Id(id),
            None => RequestKey::Unidentified {
                status: self.status,
                created_at: self.created_at.clone(),
            },
        }
    }

    /// Является ли `other` тем же расчётом, что и `self`
    pub fn is_same_request(&self, other: &CalculationRequest) -> bool {
        match other.key() {
            RequestKey::Id(id) => self.id == Some(id),
            RequestKey::Unidentified { status, created_at } => {
                created_at.is_some() && self.status == status && self.created_at == created_at
            }
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == RequestStatus::Draft
    }

    pub fn line_item_count(&self) -> usize {
        self.line_items.len()
    }

    pub fn line_item(&self, category_id: i64) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.category_id() == category_id)
    }

    /// Удаление последней позиции черновика должно удалить сам черновик
    pub fn removal_empties_draft(&self) -> bool {
        self.is_draft() && self.line_item_count() == 1
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.creator_username.as_deref() == Some(username)
    }

    pub fn outcome(&self) -> CalculationOutcome {
        if self.status != RequestStatus::Completed {
            return CalculationOutcome::Pending;
        }
        match (self.calculation_success, self.personal_cpi) {
            (Some(true), Some(value)) => CalculationOutcome::Success(value),
            (Some(_), _) => CalculationOutcome::Failed,
            (None, _) => CalculationOutcome::Pending,
        }
    }

    /// Дата создания в локальном времени
    pub fn created_at_local(&self) -> Option<NaiveDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// Дата сравнения приходит как `2024-03-01` или как `2024-03-01T00:00:00`
fn deserialize_comparison_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let date_part = value.split('T').next().unwrap_or(value);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Разбор временной метки бэкенда: RFC 3339 (переводится в локальное время)
/// или наивная дата-время без смещения
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

// ============================================================================
// Draft info
// ============================================================================

/// Краткая информация о текущем черновике пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftInfo {
    #[serde(default)]
    pub draft_id: Option<i64>,

    #[serde(default)]
    pub count_categories: Option<i32>,
}

impl DraftInfo {
    /// Идентификатор черновика, если он существует
    pub fn existing_draft_id(&self) -> Option<i64> {
        self.draft_id.filter(|id| *id != 0)
    }

    pub fn category_count(&self) -> i32 {
        self.count_categories.unwrap_or(0)
    }

    pub fn has_categories(&self) -> bool {
        self.category_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: Option<i64>, status: RequestStatus, created_at: Option<&str>) -> CalculationRequest {
        CalculationRequest {
            id,
            status,
            created_at: created_at.map(str::to_string),
            formed_at: None,
            completed_at: None,
            comparison_date: None,
            creator_username: None,
            moderator_username: None,
            personal_cpi: None,
            calculation_success: None,
            line_items: Vec::new(),
            filled_categories_count: None,
        }
    }

    #[test]
    fn test_same_request_by_id() {
        let current = request(Some(42), RequestStatus::Draft, Some("2025-01-01T10:00:00"));
        let updated = request(Some(42), RequestStatus::Formed, None);
        assert!(current.is_same_request(&updated));

        let other = request(Some(43), RequestStatus::Draft, Some("2025-01-01T10:00:00"));
        assert!(!current.is_same_request(&other));
    }

    #[test]
    fn test_same_request_without_id_uses_status_and_created_at() {
        let current = request(Some(42), RequestStatus::Draft, Some("2025-01-01T10:00:00"));
        let updated = request(None, RequestStatus::Draft, Some("2025-01-01T10:00:00"));
        assert!(current.is_same_request(&updated));

        let different_status = request(None, RequestStatus::Formed, Some("2025-01-01T10:00:00"));
        assert!(!current.is_same_request(&different_status));

        let no_created = request(None, RequestStatus::Draft, None);
        assert!(!request(None, RequestStatus::Draft, None).is_same_request(&no_created));
    }

    #[test]
    fn test_deserialize_with_line_items() {
        let json = r#"{
            "id": 42,
            "status": "DRAFT",
            "createdAt": "2025-03-01T12:30:00",
            "comparisonDate": "2024-03-01",
            "creatorUsername": "anna",
            "personalCPI": 7.25,
            "categories": [
                {"id": 7, "title": "Связь", "basePrice": 1200, "userSpent": 150.5, "coefficient": 1.1}
            ]
        }"#;
        let parsed: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, Some(42));
        assert_eq!(parsed.line_item_count(), 1);
        let item = parsed.line_item(7).unwrap();
        assert_eq!(item.user_spent, Some(150.5));
        assert_eq!(item.coefficient, Some(1.1));
        assert_eq!(item.category.title, "Связь");
        assert_eq!(parsed.comparison_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(parsed.is_owned_by("anna"));
        assert!(parsed.removal_empties_draft());
    }

    #[test]
    fn test_comparison_date_accepts_datetime() {
        let parsed: CalculationRequest = serde_json::from_str(
            r#"{"id": 1, "status": "FORMED", "comparisonDate": "2024-03-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(parsed.comparison_date, NaiveDate::from_ymd_opt(2024, 3, 1));

        let empty: CalculationRequest =
            serde_json::from_str(r#"{"status": "DRAFT", "comparisonDate": null}"#).unwrap();
        assert_eq!(empty.comparison_date, None);
    }

    #[test]
    fn test_outcome() {
        let mut r = request(Some(1), RequestStatus::Completed, None);
        assert_eq!(r.outcome(), CalculationOutcome::Pending);
        r.calculation_success = Some(true);
        r.personal_cpi = Some(5.5);
        assert_eq!(r.outcome(), CalculationOutcome::Success(5.5));
        r.calculation_success = Some(false);
        assert_eq!(r.outcome(), CalculationOutcome::Failed);
        r.status = RequestStatus::Formed;
        assert_eq!(r.outcome(), CalculationOutcome::Pending);
    }

    #[test]
    fn test_draft_info() {
        let info: DraftInfo = serde_json::from_str(r#"{"draftId":42,"countCategories":2}"#).unwrap();
        assert_eq!(info.existing_draft_id(), Some(42));
        assert!(info.has_categories());

        let empty: DraftInfo = serde_json::from_str(r#"{"draftId":null}"#).unwrap();
        assert_eq!(empty.existing_draft_id(), None);
        assert!(!empty.has_categories());
    }

    #[test]
    fn test_parse_timestamp() {
        let naive = parse_timestamp("2025-03-01T12:30:00.123").unwrap();
        assert_eq!(naive.date(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(parse_timestamp("2025-03-01T12:30:00Z").is_some());
        assert!(parse_timestamp("garbage").is_none());
    }
}
