use contracts::domain::a002_calculate_cpi::{CalculationRequest, RequestListFilter};
use contracts::enums::RequestStatus;

/// Requests list page state: the full list is fetched once, the filter
/// only narrows what is shown
#[derive(Clone, Debug, Default)]
pub struct RequestsListState {
    pub filter: RequestListFilter,
    pub all: Vec<CalculationRequest>,
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestsListState {
    /// Rows for the current filter, drafts first then newest
    pub fn visible(&self) -> Vec<CalculationRequest> {
        self.filter.apply(&self.all)
    }

    pub fn set_status_code(&mut self, code: &str) {
        self.filter.status = RequestStatus::from_code(code);
    }

    pub fn status_code(&self) -> &'static str {
        self.filter.status.map_or("ALL", |s| s.code())
    }
}

/// Sum of the spends entered for a request
pub fn total_spent(request: &CalculationRequest) -> f64 {
    request
        .line_items
        .iter()
        .filter_map(|item| item.user_spent)
        .sum()
}

/// Page a list row links to
pub fn row_href(request: &CalculationRequest) -> Option<String> {
    request.id.map(|id| format!("/requests/{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(json: serde_json::Value) -> CalculationRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_status_code_round_trip() {
        let mut state = RequestsListState::default();
        assert_eq!(state.status_code(), "ALL");
        state.set_status_code("FORMED");
        assert_eq!(state.filter.status, Some(RequestStatus::Formed));
        assert_eq!(state.status_code(), "FORMED");
        state.set_status_code("ALL");
        assert_eq!(state.filter.status, None);
    }

    #[test]
    fn test_total_spent_skips_empty() {
        let r = request(serde_json::json!({
            "id": 1,
            "status": "FORMED",
            "categories": [
                {"id": 1, "userSpent": 100.5},
                {"id": 2},
                {"id": 3, "userSpent": 50.0}
            ]
        }));
        assert_eq!(total_spent(&r), 150.5);
    }

    #[test]
    fn test_row_href_links_by_id() {
        let draft = request(serde_json::json!({"id": 42, "status": "DRAFT"}));
        let formed = request(serde_json::json!({"id": 7, "status": "FORMED"}));
        assert_eq!(row_href(&draft).as_deref(), Some("/requests/42"));
        assert_eq!(row_href(&formed).as_deref(), Some("/requests/7"));
    }

    #[test]
    fn test_filter_change_narrows_fetched_list() {
        let mut state = RequestsListState {
            all: vec![
                request(serde_json::json!({"id": 1, "status": "FORMED", "createdAt": "2025-03-01T10:00:00"})),
                request(serde_json::json!({"id": 2, "status": "DRAFT", "createdAt": "2025-03-02T09:00:00"})),
                request(serde_json::json!({"id": 3, "status": "COMPLETED", "createdAt": "2025-03-02T12:00:00"})),
            ],
            ..Default::default()
        };
        state.filter.from = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        state.filter.to = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let ids: Vec<_> = state.visible().iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);

        state.filter.from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        state.set_status_code("FORMED");
        let ids: Vec<_> = state.visible().iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
