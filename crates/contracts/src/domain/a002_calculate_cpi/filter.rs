use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::aggregate::CalculationRequest;
use crate::enums::RequestStatus;

/// Параметры запроса списка расчётов (`GET /api/calculate-cpi`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListQuery {
    /// Начало периода по дате создания
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,

    /// Конец периода по дате создания
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,

    /// Начало периода по дате формирования
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formed_from: Option<NaiveDate>,

    /// Конец периода по дате формирования
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formed_to: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
}

/// Клиентский фильтр списка расчётов.
///
/// Период включает оба конца (с начала дня `from` до конца дня `to`);
/// расчёты без даты создания не попадают в выборку.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestListFilter {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// `None` — любой статус
    pub status: Option<RequestStatus>,
}

impl Default for RequestListFilter {
    fn default() -> Self {
        Self::for_day(Local::now().date_naive())
    }
}

impl RequestListFilter {
    pub fn for_day(day: NaiveDate) -> Self {
        Self {
            from: day,
            to: day,
            status: None,
        }
    }

    pub fn matches(&self, request: &CalculationRequest) -> bool {
        let Some(created) = request.created_at_local() else {
            return false;
        };
        let day = created.date();
        if day < self.from || day > self.to {
            return false;
        }
        self.status.map_or(true, |status| request.status == status)
    }

    /// Отфильтровать и упорядочить расчёты
    pub fn apply(&self, requests: &[CalculationRequest]) -> Vec<CalculationRequest> {
        let mut filtered: Vec<CalculationRequest> = requests
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        sort_requests(&mut filtered);
        filtered
    }
}

/// Черновики первыми, затем по дате создания, новые сверху
pub fn sort_requests(requests: &mut [CalculationRequest]) {
    requests.sort_by(compare_requests);
}

fn compare_requests(a: &CalculationRequest, b: &CalculationRequest) -> Ordering {
    match (a.is_draft(), b.is_draft()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    b.created_at_local().cmp(&a.created_at_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: i64, status: RequestStatus, created_at: Option<&str>) -> CalculationRequest {
        CalculationRequest {
            id: Some(id),
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

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive_by_day() {
        let filter = RequestListFilter::for_day(day(2025, 3, 1));
        assert!(filter.matches(&request(1, RequestStatus::Formed, Some("2025-03-01T00:00:00"))));
        assert!(filter.matches(&request(2, RequestStatus::Formed, Some("2025-03-01T23:59:59.999"))));
        assert!(!filter.matches(&request(3, RequestStatus::Formed, Some("2025-03-02T00:00:00"))));
        assert!(!filter.matches(&request(4, RequestStatus::Formed, Some("2025-02-28T23:59:59"))));
    }

    #[test]
    fn test_missing_created_at_is_excluded() {
        let filter = RequestListFilter::for_day(day(2025, 3, 1));
        assert!(!filter.matches(&request(1, RequestStatus::Draft, None)));
    }

    #[test]
    fn test_status_filter() {
        let mut filter = RequestListFilter::for_day(day(2025, 3, 1));
        filter.status = Some(RequestStatus::Completed);
        assert!(!filter.matches(&request(1, RequestStatus::Formed, Some("2025-03-01T10:00:00"))));
        assert!(filter.matches(&request(2, RequestStatus::Completed, Some("2025-03-01T10:00:00"))));
    }

    #[test]
    fn test_drafts_first_then_newest() {
        let filter = RequestListFilter {
            from: day(2025, 3, 1),
            to: day(2025, 3, 31),
            status: None,
        };
        let items = vec![
            request(1, RequestStatus::Formed, Some("2025-03-02T10:00:00")),
            request(2, RequestStatus::Completed, Some("2025-03-10T10:00:00")),
            request(3, RequestStatus::Draft, Some("2025-03-01T10:00:00")),
            request(4, RequestStatus::Rejected, Some("2025-03-05T10:00:00")),
        ];
        let ids: Vec<_> = filter.apply(&items).iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_default_query_is_unfiltered() {
        let json = serde_json::to_value(RequestListQuery::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
