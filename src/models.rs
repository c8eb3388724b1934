//! Frontend Models
//!
//! Data structures matching the ResolveIt API payloads.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Signed-in user / search result (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// First letter of the name, upper-cased, for the avatar
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// Mediation case (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: i64,
    #[serde(rename = "type")]
    pub case_type: String,
    pub description: String,
    pub opposite_party_name: String,
    #[serde(default)]
    pub opposite_party_phone: Option<String>,
    #[serde(default)]
    pub opposite_party_address: Option<String>,
    #[serde(default)]
    pub opposite_party_email: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub opposite_party_user_id: Option<i64>,
    /// Overall status, used by the admin overview
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub creator_status: String,
    #[serde(default)]
    pub opposite_party_status: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_in_court: bool,
    #[serde(default)]
    pub case_or_fir_number: Option<String>,
    #[serde(default)]
    pub court_or_police_name: Option<String>,
    /// Stored path of the uploaded evidence
    #[serde(default)]
    pub proof_file: Option<String>,
}

// ========================
// Notifications
// ========================

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Unknown kinds are treated as informational
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✕",
        }
    }

    /// CSS modifier shared by the panel rows and toasts
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Info => "kind-info",
            Self::Success => "kind-success",
            Self::Warning => "kind-warning",
            Self::Error => "kind-error",
        }
    }
}

/// Canonical notification held in local state and the durable cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

/// Wire shape of a pushed or fetched notification.
///
/// Older payloads use `read` instead of `is_read`, numeric ids and naive
/// timestamps; everything is folded into [`Notification`] on arrival.
#[derive(Debug, Deserialize)]
struct WireNotification {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default, alias = "read")]
    is_read: Option<bool>,
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

impl From<WireNotification> for Notification {
    fn from(wire: WireNotification) -> Self {
        let kind = wire.kind.as_deref().map(NotificationKind::parse).unwrap_or_default();
        Self {
            id: wire.id,
            kind,
            title: wire.title.unwrap_or_else(|| "Notification".to_string()),
            message: wire.message,
            created_at: wire
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_else(Utc::now),
            is_read: wire.is_read.unwrap_or(false),
        }
    }
}

/// Parse RFC 3339, or a naive ISO timestamp taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a single pushed message
pub fn parse_notification(text: &str) -> Result<Notification, serde_json::Error> {
    serde_json::from_str::<WireNotification>(text).map(Notification::from)
}

/// Parse a list returned by `GET /notifications/unread`
pub fn parse_notification_list(value: serde_json::Value) -> Result<Vec<Notification>, serde_json::Error> {
    let wire: Vec<WireNotification> = serde_json::from_value(value)?;
    Ok(wire.into_iter().map(Notification::from).collect())
}

/// Short human date, e.g. "May 1, 2024 09:30"
pub fn format_date_time(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %H:%M").to_string()
}

/// Date part of an API timestamp, e.g. "May 1, 2024"; unparsable input is shown as is
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(at) => at.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_full_payload() {
        let n = parse_notification(
            r#"{"id":"n1","type":"success","title":"Case accepted","message":"Your case was accepted","created_at":"2024-05-01T09:30:00Z","is_read":true}"#,
        )
        .unwrap();
        assert_eq!(n.id, "n1");
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(n.title, "Case accepted");
        assert!(n.is_read);
        assert_eq!(n.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_normalizes_legacy_fields() {
        let n = parse_notification(
            r#"{"id":42,"type":"alert","title":"Hi","message":"m","created_at":"2024-05-01T09:30:00.123456","read":true}"#,
        )
        .unwrap();
        assert_eq!(n.id, "42");
        assert_eq!(n.kind, NotificationKind::Info);
        assert!(n.is_read);
        assert_eq!(n.created_at.timestamp(), 1714555800);
    }

    #[test]
    fn test_missing_read_flag_means_unread() {
        let n = parse_notification(r#"{"id":"x","message":"hello"}"#).unwrap();
        assert!(!n.is_read);
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(n.title, "Notification");
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(parse_notification("ping").is_err());
        assert!(parse_notification(r#"{"message":"no id"}"#).is_err());
    }

    #[test]
    fn test_parse_list() {
        let value = serde_json::json!([
            {"id": 1, "type": "warning", "title": "a", "message": "b"},
            {"id": "2", "type": "error", "title": "c", "message": "d", "is_read": false}
        ]);
        let list = parse_notification_list(value).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].kind, NotificationKind::Warning);
        assert_eq!(list[1].id, "2");
    }

    #[test]
    fn test_user_helpers() {
        let user: User = serde_json::from_str(r#"{"id":7,"name":"amara","role":"admin"}"#).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.initial(), "A");
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_case_type_field() {
        let case: Case = serde_json::from_str(
            r#"{"id":1,"type":"Family","description":"d","opposite_party_name":"Bo","user_id":3,"status":"pending","creator_status":"pending","opposite_party_status":"requested","created_at":"2024-05-01T09:30:00"}"#,
        )
        .unwrap();
        assert_eq!(case.case_type, "Family");
        assert_eq!(case.opposite_party_user_id, None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-05-01T09:30:00"), "May 1, 2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
