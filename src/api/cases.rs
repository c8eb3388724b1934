//! Case Commands
//!
//! Case listing, submission and admin status updates.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use super::{authorized, multipart, read_json, ApiError};
use crate::config::AppConfig;
use crate::models::Case;
use crate::session::Session;

/// `GET /cases/user` wraps the list; `GET /cases/all` may not
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaseList {
    Wrapped { cases: Vec<Case> },
    Bare(Vec<Case>),
}

impl From<CaseList> for Vec<Case> {
    fn from(list: CaseList) -> Self {
        match list {
            CaseList::Wrapped { cases } | CaseList::Bare(cases) => cases,
        }
    }
}

/// Fields of a new case submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewCase {
    #[serde(rename = "type")]
    pub case_type: String,
    pub description: String,
    pub opposite_party_name: String,
    pub opposite_party_phone: String,
    pub opposite_party_address: String,
    pub opposite_party_email: Option<String>,
    pub opposite_party_user_id: Option<i64>,
    pub is_in_court: bool,
    pub case_or_fir_number: String,
    pub court_or_police_name: String,
}

impl NewCase {
    /// Multipart form pairs; `None` values are omitted
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("type", self.case_type.clone()),
            ("description", self.description.clone()),
            ("opposite_party_name", self.opposite_party_name.clone()),
            ("opposite_party_phone", self.opposite_party_phone.clone()),
            ("opposite_party_address", self.opposite_party_address.clone()),
            ("is_in_court", self.is_in_court.to_string()),
        ];
        if let Some(email) = &self.opposite_party_email {
            fields.push(("opposite_party_email", email.clone()));
        }
        if let Some(id) = self.opposite_party_user_id {
            fields.push(("opposite_party_user_id", id.to_string()));
        }
        if self.is_in_court {
            fields.push(("case_or_fir_number", self.case_or_fir_number.clone()));
            fields.push(("court_or_police_name", self.court_or_police_name.clone()));
        }
        fields
    }
}

#[derive(Serialize)]
struct StatusArgs<'a> {
    status: &'a str,
}

pub async fn list_user_cases(config: &AppConfig, session: &Session) -> Result<Vec<Case>, ApiError> {
    let url = config.endpoint("cases/user");
    let response = authorized(Request::get(&url), session)?.send().await?;
    read_json::<CaseList>(response).await.map(Vec::from)
}

pub async fn list_all_cases(config: &AppConfig, session: &Session) -> Result<Vec<Case>, ApiError> {
    let url = config.endpoint("cases/all");
    let response = authorized(Request::get(&url), session)?.send().await?;
    read_json::<CaseList>(response).await.map(Vec::from)
}

pub async fn get_case(config: &AppConfig, session: &Session, case_id: i64) -> Result<Case, ApiError> {
    let url = config.endpoint(&format!("cases/{}", case_id));
    let response = authorized(Request::get(&url), session)?.send().await?;
    read_json(response).await
}

/// Submit a case as multipart form data with an optional proof file
pub async fn create_case(
    config: &AppConfig,
    session: &Session,
    case: &NewCase,
    proof: Option<web_sys::File>,
) -> Result<Case, ApiError> {
    let form = multipart(&case.form_fields(), proof.as_ref().map(|file| ("proof", file)))?;
    let url = config.endpoint("cases/");
    let response = authorized(Request::post(&url), session)?.body(form)?.send().await?;
    read_json(response).await
}

pub async fn update_case_status(
    config: &AppConfig,
    session: &Session,
    case_id: i64,
    status: &str,
) -> Result<Case, ApiError> {
    let url = config.endpoint(&format!("cases/{}/status", case_id));
    let response = authorized(Request::put(&url), session)?
        .json(&StatusArgs { status })?
        .send()
        .await?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_list_shapes() {
        let case = r#"{"id":1,"type":"Business","description":"d","opposite_party_name":"X","user_id":2,"created_at":"2024-01-01T00:00:00"}"#;
        let wrapped: CaseList = serde_json::from_str(&format!(r#"{{"cases":[{}]}}"#, case)).unwrap();
        let bare: CaseList = serde_json::from_str(&format!("[{}]", case)).unwrap();
        assert_eq!(Vec::from(wrapped).len(), 1);
        assert_eq!(Vec::from(bare)[0].case_type, "Business");
    }

    #[test]
    fn test_form_fields_skip_absent_values() {
        let case = NewCase {
            case_type: "Family".into(),
            opposite_party_user_id: Some(9),
            ..Default::default()
        };
        let fields = case.form_fields();
        assert!(fields.contains(&("opposite_party_user_id", "9".to_string())));
        assert!(fields.iter().all(|(name, _)| *name != "opposite_party_email"));
        assert!(fields.iter().all(|(name, _)| *name != "case_or_fir_number"));
        assert!(fields.contains(&("is_in_court", "false".to_string())));
    }
}
