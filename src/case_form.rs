//! New Case Form Model
//!
//! Field state for the case registration page and its validation rules.

use crate::api::NewCase;
use crate::models::User;

/// Largest accepted proof upload
pub const MAX_PROOF_BYTES: f64 = 10.0 * 1024.0 * 1024.0;

pub const CASE_TYPES: &[&str] = &["Family", "Business", "Criminal"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseForm {
    pub case_type: String,
    pub description: String,
    pub opposite_party_name: String,
    pub opposite_party_phone: String,
    pub opposite_party_address: String,
    pub opposite_party_email: String,
    pub is_in_court: bool,
    pub case_or_fir_number: String,
    pub court_or_police_name: String,
    /// Registered user picked from the autocomplete
    pub opposite_party_user_id: Option<i64>,
}

/// First problem found, in the order the form shows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in all required fields marked with *.")]
    MissingRequired,
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhone,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("FIR/Case number is required when the case is in court.")]
    MissingCaseNumber,
    #[error("Court/Police station name is required when the case is in court.")]
    MissingCourt,
    #[error("Please select a file smaller than 10MB.")]
    ProofTooLarge,
}

impl CaseForm {
    /// Email is only asked for when no registered user was picked
    pub fn shows_email(&self) -> bool {
        self.opposite_party_user_id.is_none()
    }

    /// Autocomplete picked a registered user: fill contact details
    pub fn apply_user(&mut self, user: &User) {
        self.opposite_party_user_id = Some(user.id);
        self.opposite_party_name = user.name.clone();
        self.opposite_party_phone = user.phone.clone().unwrap_or_default();
        self.opposite_party_address = user.address.clone().unwrap_or_default();
        self.opposite_party_email.clear();
    }

    /// Autocomplete selection revoked
    pub fn forget_user(&mut self) {
        self.opposite_party_user_id = None;
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let required = [
            &self.case_type,
            &self.description,
            &self.opposite_party_name,
            &self.opposite_party_phone,
            &self.opposite_party_address,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(FormError::MissingRequired);
        }
        if !is_valid_phone(&self.opposite_party_phone) {
            return Err(FormError::InvalidPhone);
        }
        let email = self.opposite_party_email.trim();
        if self.shows_email() && !email.is_empty() && !is_valid_email(email) {
            return Err(FormError::InvalidEmail);
        }
        if self.is_in_court {
            if self.case_or_fir_number.trim().is_empty() {
                return Err(FormError::MissingCaseNumber);
            }
            if self.court_or_police_name.trim().is_empty() {
                return Err(FormError::MissingCourt);
            }
        }
        Ok(())
    }

    /// Submission payload; email only when shown and filled in
    pub fn to_new_case(&self) -> NewCase {
        let email = self.opposite_party_email.trim();
        NewCase {
            case_type: self.case_type.clone(),
            description: self.description.trim().to_string(),
            opposite_party_name: self.opposite_party_name.trim().to_string(),
            opposite_party_phone: self.opposite_party_phone.trim().to_string(),
            opposite_party_address: self.opposite_party_address.trim().to_string(),
            opposite_party_email: (self.shows_email() && !email.is_empty()).then(|| email.to_string()),
            opposite_party_user_id: self.opposite_party_user_id,
            is_in_court: self.is_in_court,
            case_or_fir_number: self.case_or_fir_number.trim().to_string(),
            court_or_police_name: self.court_or_police_name.trim().to_string(),
        }
    }
}

pub fn check_proof_size(bytes: f64) -> Result<(), FormError> {
    if bytes > MAX_PROOF_BYTES {
        Err(FormError::ProofTooLarge)
    } else {
        Ok(())
    }
}

/// Exactly ten ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// `local@domain.tld`, no whitespace, one `@`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CaseForm {
        CaseForm {
            case_type: "Family".into(),
            description: "Dispute over inheritance".into(),
            opposite_party_name: "Ravi".into(),
            opposite_party_phone: "9876543210".into(),
            opposite_party_address: "4 Lake View".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled();
        form.opposite_party_address = "   ".into();
        assert_eq!(form.validate(), Err(FormError::MissingRequired));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("0123456789"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("01234567890"));
        assert!(!is_valid_phone("01234-6789"));
        let mut form = filled();
        form.opposite_party_phone = "555".into();
        assert_eq!(form.validate(), Err(FormError::InvalidPhone));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b@c.de"));
        assert!(!is_valid_email("a@.de"));

        let mut form = filled();
        form.opposite_party_email = "nope".into();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_email_ignored_for_registered_user() {
        let mut form = filled();
        form.opposite_party_email = "nope".into();
        form.opposite_party_user_id = Some(3);
        assert_eq!(form.validate(), Ok(()));
        assert_eq!(form.to_new_case().opposite_party_email, None);
    }

    #[test]
    fn test_court_fields() {
        let mut form = filled();
        form.is_in_court = true;
        assert_eq!(form.validate(), Err(FormError::MissingCaseNumber));
        form.case_or_fir_number = "FIR-22".into();
        assert_eq!(form.validate(), Err(FormError::MissingCourt));
        form.court_or_police_name = "City Court".into();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_apply_and_forget_user() {
        let mut form = CaseForm {
            opposite_party_email: "old@mail.com".into(),
            ..Default::default()
        };
        let user = User {
            id: 8,
            name: "Mira".into(),
            phone: Some("1112223333".into()),
            address: Some("9 Elm".into()),
            ..Default::default()
        };
        form.apply_user(&user);
        assert!(!form.shows_email());
        assert_eq!(form.opposite_party_phone, "1112223333");
        assert_eq!(form.opposite_party_email, "");
        form.forget_user();
        assert!(form.shows_email());
        assert_eq!(form.to_new_case().opposite_party_user_id, None);
    }

    #[test]
    fn test_proof_size() {
        assert_eq!(check_proof_size(1024.0), Ok(()));
        assert_eq!(check_proof_size(MAX_PROOF_BYTES + 1.0), Err(FormError::ProofTooLarge));
    }
}
