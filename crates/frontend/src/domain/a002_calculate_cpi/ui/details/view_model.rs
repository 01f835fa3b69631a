use contracts::domain::a002_calculate_cpi::CalculationRequest;
use contracts::enums::RequestStatus;
use contracts::system::auth::UserInfo;

use crate::domain::a002_calculate_cpi::lifecycle::Removed;

/// What the current user may do with the request on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestPermissions {
    /// Owner of a DRAFT: edit spends, remove items, submit
    pub can_edit: bool,
    /// Moderator looking at a FORMED request
    pub can_moderate: bool,
}

impl RequestPermissions {
    pub fn resolve(request: Option<&CalculationRequest>, user: Option<&UserInfo>) -> Self {
        let (Some(request), Some(user)) = (request, user) else {
            return Self::default();
        };
        if request.id.is_none() {
            return Self::default();
        }
        Self {
            can_edit: request.is_draft() && request.is_owned_by(&user.username),
            can_moderate: user.moderator && request.status == RequestStatus::Formed,
        }
    }

    pub fn read_only(&self) -> bool {
        !self.can_edit
    }
}

/// Request shown by the page: the draft, or the one loaded by id
pub fn shown_request(
    draft_view: bool,
    current_draft: Option<&CalculationRequest>,
    current_request: Option<&CalculationRequest>,
    request_id: Option<i64>,
) -> Option<CalculationRequest> {
    if draft_view {
        return current_draft.cloned();
    }
    current_request
        .filter(|r| request_id.is_none() || r.id == request_id)
        .cloned()
}

/// Whether the page should leave after a line-item removal: the request
/// itself was deleted, or the draft shown here is gone
pub fn leaves_request(draft_view: bool, removed: Removed, has_draft: bool) -> bool {
    removed == Removed::Request || (draft_view && !has_draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: RequestStatus, creator: &str) -> CalculationRequest {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "status": status,
            "creatorUsername": creator,
        }))
        .unwrap()
    }

    fn user(name: &str, moderator: bool) -> UserInfo {
        UserInfo {
            id: None,
            username: name.to_string(),
            moderator,
        }
    }

    #[test]
    fn test_owner_edits_own_draft() {
        let r = request(RequestStatus::Draft, "anna");
        let p = RequestPermissions::resolve(Some(&r), Some(&user("anna", false)));
        assert!(p.can_edit);
        assert!(!p.can_moderate);

        let p = RequestPermissions::resolve(Some(&r), Some(&user("boris", true)));
        assert!(p.read_only());
    }

    #[test]
    fn test_formed_request_is_read_only_for_owner() {
        let r = request(RequestStatus::Formed, "anna");
        let p = RequestPermissions::resolve(Some(&r), Some(&user("anna", false)));
        assert!(p.read_only());
        assert!(!p.can_moderate);
    }

    #[test]
    fn test_moderator_moderates_formed_only() {
        let moderator = user("maria", true);
        let formed = request(RequestStatus::Formed, "anna");
        assert!(RequestPermissions::resolve(Some(&formed), Some(&moderator)).can_moderate);

        let completed = request(RequestStatus::Completed, "anna");
        assert!(!RequestPermissions::resolve(Some(&completed), Some(&moderator)).can_moderate);
    }

    #[test]
    fn test_anonymous_has_no_permissions() {
        let r = request(RequestStatus::Draft, "anna");
        assert_eq!(
            RequestPermissions::resolve(Some(&r), None),
            RequestPermissions::default()
        );
    }

    #[test]
    fn test_shown_request() {
        let draft = request(RequestStatus::Draft, "anna");
        let formed = request(RequestStatus::Formed, "anna");
        assert_eq!(
            shown_request(true, Some(&draft), Some(&formed), None),
            Some(draft.clone())
        );
        assert_eq!(
            shown_request(false, Some(&draft), Some(&formed), Some(42)),
            Some(formed.clone())
        );
        assert_eq!(shown_request(false, Some(&draft), Some(&formed), Some(7)), None);
    }

    #[test]
    fn test_leaves_after_last_item_on_any_view() {
        assert!(leaves_request(false, Removed::Request, false));
        assert!(leaves_request(true, Removed::Request, false));
        assert!(!leaves_request(false, Removed::Item, true));
        assert!(!leaves_request(false, Removed::Item, false));
        assert!(leaves_request(true, Removed::Item, false));
        assert!(!leaves_request(true, Removed::Item, true));
    }
}
