use contracts::domain::a002_calculate_cpi::{CalculationRequest, DraftInfo};

use super::lifecycle::{DraftSnapshot, RemovalOutcome, Removed};

/// Client-visible truth about the user's draft and the request on screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestsState {
    pub draft_info: Option<DraftInfo>,
    pub current_draft: Option<CalculationRequest>,
    pub current_request: Option<CalculationRequest>,
    pub has_draft: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestsState {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Number of categories in the draft, for the header badge
    pub fn draft_count(&self) -> i32 {
        self.draft_info.map_or(0, |info| info.category_count())
    }

    pub fn draft_id(&self) -> Option<i64> {
        self.current_draft
            .as_ref()
            .and_then(|d| d.id)
            .or_else(|| self.draft_info.and_then(|i| i.existing_draft_id()))
    }

    pub fn apply_draft(&mut self, snapshot: DraftSnapshot) {
        self.loading = false;
        self.has_draft = snapshot.draft.is_some();
        self.draft_info = snapshot.info;
        self.current_draft = snapshot.draft;
    }

    fn clear_draft(&mut self) {
        self.draft_info = None;
        self.current_draft = None;
        self.has_draft = false;
    }

    /// Put an updated request wherever the same request is held
    pub fn apply_updated(&mut self, updated: CalculationRequest) {
        if self
            .current_draft
            .as_ref()
            .map_or(false, |d| d.is_same_request(&updated))
        {
            self.current_draft = Some(updated.clone());
        }
        if self
            .current_request
            .as_ref()
            .map_or(false, |r| r.is_same_request(&updated))
        {
            self.current_request = Some(updated);
        }
    }

    pub fn apply_removal(&mut self, outcome: RemovalOutcome) {
        self.loading = false;

        if outcome.deleted == Removed::Request
            && self
                .current_request
                .as_ref()
                .map_or(false, |r| r.id == Some(outcome.request_id))
        {
            self.current_request = None;
        }

        let keep = outcome.info.map_or(false, |i| i.has_categories())
            && outcome
                .remaining_draft
                .as_ref()
                .map_or(false, |d| d.line_item_count() > 0);

        if let (Some(current), Some(draft)) =
            (self.current_request.as_mut(), outcome.remaining_draft.as_ref())
        {
            if current.id.is_some() && current.id == draft.id {
                *current = draft.clone();
            }
        }

        match outcome.remaining_draft {
            Some(draft) if keep => {
                self.draft_info = outcome.info;
                self.current_draft = Some(draft);
                self.has_draft = true;
            }
            _ => self.clear_draft(),
        }
    }

    /// The draft became a FORMED request
    pub fn apply_submitted(&mut self, formed: CalculationRequest) {
        self.loading = false;
        self.current_request = Some(formed);
        self.clear_draft();
    }

    pub fn apply_moderated(&mut self, request_id: i64, updated: CalculationRequest) {
        self.loading = false;
        if self
            .current_request
            .as_ref()
            .map_or(false, |r| r.id == Some(request_id))
        {
            self.current_request = Some(updated);
        }
    }

    pub fn apply_request(&mut self, request: CalculationRequest) {
        self.loading = false;
        self.current_request = Some(request);
    }

    /// Read failure: nothing to show, flag the error
    pub fn fail_request(&mut self, message: impl Into<String>) {
        self.current_request = None;
        self.fail(message);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
