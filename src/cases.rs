//! Case Status Helpers
//!
//! Status parsing, progress and the in-memory counts/filters shown on the
//! dashboards.

use crate::models::Case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    Pending,
    UnderReview,
    InProgress,
    Resolved,
    Unknown,
}

/// Tracker steps in order, with their labels
pub const STATUS_STEPS: &[(CaseStatus, &str)] = &[
    (CaseStatus::Pending, "Submitted"),
    (CaseStatus::UnderReview, "Under Review"),
    (CaseStatus::InProgress, "In Progress"),
    (CaseStatus::Resolved, "Resolved"),
];

impl CaseStatus {
    /// Case-insensitive; anything unrecognised is `Unknown`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "under review" => Self::UnderReview,
            "in progress" => Self::InProgress,
            "resolved" => Self::Resolved,
            _ => Self::Unknown,
        }
    }

    /// Wire value, as sent in status updates
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under review",
            Self::InProgress => "in progress",
            Self::Resolved => "resolved",
            Self::Unknown => "unknown",
        }
    }

    pub fn progress(&self) -> u8 {
        match self {
            Self::Pending => 25,
            Self::UnderReview => 50,
            Self::InProgress => 75,
            Self::Resolved => 100,
            Self::Unknown => 0,
        }
    }

    /// Position in [`STATUS_STEPS`]
    pub fn step_index(&self) -> Option<usize> {
        STATUS_STEPS.iter().position(|(status, _)| status == self)
    }

    /// CSS modifier for badges
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Pending => "status-pending",
            Self::UnderReview => "status-review",
            Self::InProgress => "status-progress",
            Self::Resolved => "status-resolved",
            Self::Unknown => "status-unknown",
        }
    }
}

/// Status as seen by `viewer`: creator side, opposite side, or unknown
pub fn viewer_status<'a>(case: &'a Case, viewer: Option<i64>) -> &'a str {
    match viewer {
        Some(id) if id == case.user_id => &case.creator_status,
        Some(id) if Some(id) == case.opposite_party_user_id => &case.opposite_party_status,
        _ => "unknown",
    }
}

/// Viewer status of the case with `case_id`, or `"unknown"` once it leaves the list
pub fn status_of(cases: &[Case], case_id: i64, viewer: Option<i64>) -> String {
    cases
        .iter()
        .find(|c| c.id == case_id)
        .map(|c| viewer_status(c, viewer).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Dashboard filter choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CaseStatus),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "all" | "" => Self::All,
            other => Self::Only(CaseStatus::parse(other)),
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => CaseStatus::parse(status) == *wanted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match CaseStatus::parse(status) {
                CaseStatus::Pending => counts.pending += 1,
                CaseStatus::InProgress => counts.in_progress += 1,
                CaseStatus::Resolved => counts.resolved += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Counts from the viewer's perspective (user dashboard)
pub fn viewer_counts(cases: &[Case], viewer: Option<i64>) -> StatusCounts {
    StatusCounts::tally(cases.iter().map(|c| viewer_status(c, viewer)))
}

/// Counts by overall status (admin overview)
pub fn overall_counts(cases: &[Case]) -> StatusCounts {
    StatusCounts::tally(cases.iter().map(|c| c.status.as_str()))
}

/// Count cases per type, case-insensitively, for the given type names
pub fn type_counts(cases: &[Case], types: &[&str]) -> Vec<usize> {
    types
        .iter()
        .map(|t| cases.iter().filter(|c| c.case_type.eq_ignore_ascii_case(t)).count())
        .collect()
}

pub fn case_type_icon(case_type: &str) -> &'static str {
    match case_type.to_lowercase().as_str() {
        "family" => "👨‍👩‍👧‍👦",
        "business" => "💼",
        "criminal" => "⚖️",
        _ => "📋",
    }
}

pub fn filter_for_viewer(cases: &[Case], viewer: Option<i64>, filter: StatusFilter) -> Vec<Case> {
    cases
        .iter()
        .filter(|c| filter.matches(viewer_status(c, viewer)))
        .cloned()
        .collect()
}

/// Admin filter by overall status and type ("all" = any type)
pub fn filter_overall(cases: &[Case], filter: StatusFilter, case_type: &str) -> Vec<Case> {
    cases
        .iter()
        .filter(|c| filter.matches(&c.status))
        .filter(|c| case_type == "all" || c.case_type.eq_ignore_ascii_case(case_type))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: i64, user_id: i64, opposite: Option<i64>, creator: &str, other: &str) -> Case {
        Case {
            id,
            case_type: if id % 2 == 0 { "Family".into() } else { "Business".into() },
            description: "d".into(),
            opposite_party_name: "o".into(),
            opposite_party_phone: None,
            opposite_party_address: None,
            opposite_party_email: None,
            user_id,
            opposite_party_user_id: opposite,
            status: creator.into(),
            creator_status: creator.into(),
            opposite_party_status: other.into(),
            created_at: "2024-01-01T00:00:00".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_and_progress() {
        assert_eq!(CaseStatus::parse("In Progress"), CaseStatus::InProgress);
        assert_eq!(CaseStatus::parse(" RESOLVED "), CaseStatus::Resolved);
        assert_eq!(CaseStatus::parse("requested"), CaseStatus::Unknown);
        assert_eq!(CaseStatus::UnderReview.progress(), 50);
        assert_eq!(CaseStatus::Unknown.progress(), 0);
        assert_eq!(CaseStatus::InProgress.step_index(), Some(2));
        assert_eq!(CaseStatus::Unknown.step_index(), None);
    }

    #[test]
    fn test_viewer_status() {
        let c = case(1, 10, Some(20), "pending", "requested");
        assert_eq!(viewer_status(&c, Some(10)), "pending");
        assert_eq!(viewer_status(&c, Some(20)), "requested");
        assert_eq!(viewer_status(&c, Some(30)), "unknown");
        assert_eq!(viewer_status(&c, None), "unknown");
    }

    #[test]
    fn test_status_follows_refreshed_list() {
        let mut cases = vec![case(1, 10, None, "pending", ""), case(2, 10, None, "pending", "")];
        assert_eq!(status_of(&cases, 2, Some(10)), "pending");
        cases[1].creator_status = "in progress".into();
        assert_eq!(status_of(&cases, 2, Some(10)), "in progress");
        assert_eq!(status_of(&cases, 9, Some(10)), "unknown");
    }

    #[test]
    fn test_viewer_counts() {
        let cases = vec![
            case(1, 10, None, "pending", ""),
            case(2, 10, None, "resolved", ""),
            case(3, 5, Some(10), "pending", "in progress"),
            case(4, 10, None, "Resolved", ""),
        ];
        let counts = viewer_counts(&cases, Some(10));
        assert_eq!(
            counts,
            StatusCounts { total: 4, pending: 1, in_progress: 1, resolved: 2 }
        );
    }

    #[test]
    fn test_filters() {
        let cases = vec![
            case(1, 10, None, "pending", ""),
            case(2, 10, None, "resolved", ""),
            case(3, 5, Some(10), "resolved", "pending"),
        ];
        let pending = filter_for_viewer(&cases, Some(10), StatusFilter::parse("pending"));
        let ids: Vec<i64> = pending.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(filter_for_viewer(&cases, Some(10), StatusFilter::All).len(), 3);

        let resolved_family = filter_overall(&cases, StatusFilter::parse("resolved"), "family");
        assert_eq!(resolved_family.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(type_counts(&cases, &["family", "business", "criminal"]), vec![1, 2, 0]);
        assert_eq!(overall_counts(&cases).resolved, 2);
    }

    #[test]
    fn test_case_type_icon() {
        assert_eq!(case_type_icon("FAMILY"), "👨‍👩‍👧‍👦");
        assert_eq!(case_type_icon("Business"), "💼");
        assert_eq!(case_type_icon("other"), "📋");
    }
}
