//! Account Forms
//!
//! Field state and validation for sign-in, registration, profile editing
//! and password changes.

use crate::case_form::{is_valid_email, is_valid_phone};
use crate::models::User;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

/// Largest accepted profile photo
pub const MAX_PHOTO_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

pub const GENDERS: &[(&str, &str)] = &[
    ("male", "Male"),
    ("female", "Female"),
    ("other", "Other"),
    ("prefer-not-to-say", "Prefer not to say"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("Please fill in all required fields marked with *.")]
    MissingRequired,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhone,
    #[error("Age must be between 18 and 100.")]
    InvalidAge,
    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,
    #[error("New passwords do not match. Please try again.")]
    PasswordMismatch,
    #[error("Please select a photo smaller than 5MB.")]
    PhotoTooLarge,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AccountError::MissingRequired);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(AccountError::InvalidEmail);
        }
        Ok(())
    }
}

/// Personal and contact details shared by registration and profile editing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub zip_code: String,
}

impl ProfileForm {
    /// Prefill from the stored user record
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            age: user.age.map(|a| a.to_string()).unwrap_or_default(),
            gender: user.gender.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            street: user.street.clone().unwrap_or_default(),
            city: user.city.clone().unwrap_or_default(),
            zip_code: user.zip_code.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), AccountError> {
        let required = [
            &self.name,
            &self.age,
            &self.gender,
            &self.email,
            &self.phone,
            &self.street,
            &self.city,
            &self.zip_code,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AccountError::MissingRequired);
        }
        match self.age.trim().parse::<u32>() {
            Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => {}
            _ => return Err(AccountError::InvalidAge),
        }
        if !is_valid_email(self.email.trim()) {
            return Err(AccountError::InvalidEmail);
        }
        if !is_valid_phone(self.phone.trim()) {
            return Err(AccountError::InvalidPhone);
        }
        Ok(())
    }

    /// Multipart form pairs, trimmed
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.trim().to_string()),
            ("age", self.age.trim().to_string()),
            ("gender", self.gender.clone()),
            ("email", self.email.trim().to_string()),
            ("phone", self.phone.trim().to_string()),
            ("street", self.street.trim().to_string()),
            ("city", self.city.trim().to_string()),
            ("zip_code", self.zip_code.trim().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub profile: ProfileForm,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), AccountError> {
        self.profile.validate()?;
        check_new_password(&self.password, &self.confirm_password)
    }

    /// Profile fields plus the password; the confirmation is never sent
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = self.profile.form_fields();
        fields.push(("password", self.password.clone()));
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.current_password.is_empty() || self.new_password.is_empty() {
            return Err(AccountError::MissingRequired);
        }
        check_new_password(&self.new_password, &self.confirm_password)
    }
}

/// Mismatch is reported before length
fn check_new_password(password: &str, confirm: &str) -> Result<(), AccountError> {
    if password != confirm {
        return Err(AccountError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::PasswordTooShort);
    }
    Ok(())
}

pub fn check_photo_size(bytes: f64) -> Result<(), AccountError> {
    if bytes > MAX_PHOTO_BYTES {
        Err(AccountError::PhotoTooLarge)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ProfileForm {
        ProfileForm {
            name: "Lena".into(),
            age: "34".into(),
            gender: "female".into(),
            email: "lena@example.com".into(),
            phone: "9123456780".into(),
            street: "12 Hill Rd".into(),
            city: "Pune".into(),
            zip_code: "411001".into(),
        }
    }

    #[test]
    fn test_sign_in_rules() {
        let form = SignInForm {
            email: "lena@example.com".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate(), Ok(()));
        assert_eq!(SignInForm::default().validate(), Err(AccountError::MissingRequired));
        let bad = SignInForm {
            email: "lena".into(),
            password: "x".into(),
        };
        assert_eq!(bad.validate(), Err(AccountError::InvalidEmail));
    }

    #[test]
    fn test_profile_rules() {
        assert_eq!(profile().validate(), Ok(()));

        let mut form = profile();
        form.city = " ".into();
        assert_eq!(form.validate(), Err(AccountError::MissingRequired));

        let mut form = profile();
        form.age = "17".into();
        assert_eq!(form.validate(), Err(AccountError::InvalidAge));
        form.age = "abc".into();
        assert_eq!(form.validate(), Err(AccountError::InvalidAge));

        let mut form = profile();
        form.phone = "12345".into();
        assert_eq!(form.validate(), Err(AccountError::InvalidPhone));
    }

    #[test]
    fn test_profile_from_user() {
        let user = User {
            id: 4,
            name: "Lena".into(),
            age: Some(34),
            city: Some("Pune".into()),
            ..Default::default()
        };
        let form = ProfileForm::from_user(&user);
        assert_eq!(form.age, "34");
        assert_eq!(form.city, "Pune");
        assert_eq!(form.street, "");
    }

    #[test]
    fn test_register_omits_confirmation() {
        let form = RegisterForm {
            profile: profile(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
        };
        assert_eq!(form.validate(), Ok(()));
        let fields = form.form_fields();
        assert!(fields.contains(&("password", "longenough".to_string())));
        assert!(fields.iter().all(|(name, _)| *name != "confirm_password"));
    }

    #[test]
    fn test_password_rules() {
        let mut form = PasswordForm {
            current_password: "old-pass".into(),
            new_password: "short".into(),
            confirm_password: "other".into(),
        };
        assert_eq!(form.validate(), Err(AccountError::PasswordMismatch));
        form.confirm_password = "short".into();
        assert_eq!(form.validate(), Err(AccountError::PasswordTooShort));
        form.new_password = "much-longer".into();
        form.confirm_password = "much-longer".into();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_photo_size() {
        assert_eq!(check_photo_size(1024.0), Ok(()));
        assert_eq!(check_photo_size(MAX_PHOTO_BYTES + 1.0), Err(AccountError::PhotoTooLarge));
    }
}
