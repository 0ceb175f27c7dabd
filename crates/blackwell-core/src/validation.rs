//! Form checks for the sign-up and login modal.
//!
//! These run before the store is called, so the form can show every
//! problem at once. The store still enforces its own contract on top.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Credentials, RegisterPayload};

/// Minimum password length accepted by the sign-up form.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Mobile,
    Country,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email",
            Field::Mobile => "Mobile",
            Field::Country => "Country",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
        }
    }
}

/// Field -> message, ordered as the form lays the fields out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().copied().collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).unwrap_or("").is_empty()
}

/// Same loose shape the modal used: something, `@`, something, `.`, something.
/// Unanchored, so surrounding text is tolerated.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

pub fn looks_like_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_signup(payload: &RegisterPayload) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if is_blank(payload.first_name.as_deref()) {
        errors.insert(Field::FirstName, "First name is required");
    }
    if is_blank(payload.last_name.as_deref()) {
        errors.insert(Field::LastName, "Last name is required");
    }
    if payload.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !looks_like_email(&payload.email) {
        errors.insert(Field::Email, "Email is invalid");
    }
    if is_blank(payload.mobile.as_deref()) {
        errors.insert(Field::Mobile, "Mobile is required");
    }
    if is_blank(payload.country.as_deref()) {
        errors.insert(Field::Country, "Country is required");
    }
    if payload.password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(Field::Password, "Password must be at least 8 characters");
    }
    if payload.password != payload.confirm_password {
        errors.insert(Field::ConfirmPassword, "Passwords do not match");
    }

    errors.into_result()
}

pub fn validate_login(credentials: &Credentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if credentials.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    }
    if credentials.password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RegisterPayload {
        RegisterPayload {
            email: "bob@test.com".to_string(),
            password: "longenough".to_string(),
            confirm_password: "longenough".to_string(),
            first_name: Some("Bob".to_string()),
            last_name: Some("Builder".to_string()),
            mobile: Some("+60 12 345 6789".to_string()),
            country: Some("Malaysia".to_string()),
        }
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@x.com"));
        assert!(looks_like_email("first.last@sub.example.org"));
        assert!(!looks_like_email("a@x"));
        assert!(!looks_like_email("@x.com"));
        assert!(!looks_like_email("a @x.com"));
        assert!(!looks_like_email("ax.com"));
        assert!(!looks_like_email("a@.com"));
    }

    #[test]
    fn test_looks_like_email_is_unanchored() {
        assert!(looks_like_email("John Doe@x.com"));
        assert!(looks_like_email(" a@x.com"));
        assert!(looks_like_email("a@x.com "));
    }

    #[test]
    fn test_complete_signup_passes() {
        assert!(validate_signup(&complete()).is_ok());
    }

    #[test]
    fn test_signup_reports_every_field() {
        let errors = validate_signup(&RegisterPayload::default()).unwrap_err();

        assert_eq!(errors.get(Field::FirstName), Some("First name is required"));
        assert_eq!(errors.get(Field::LastName), Some("Last name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Mobile), Some("Mobile is required"));
        assert_eq!(errors.get(Field::Country), Some("Country is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        // Both empty, so they match.
        assert_eq!(errors.get(Field::ConfirmPassword), None);
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_signup_short_password_and_mismatch() {
        let mut payload = complete();
        payload.password = "short".to_string();
        payload.confirm_password = "shorter".to_string();

        let errors = validate_signup(&payload).unwrap_err();
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_signup_blank_names_rejected() {
        let mut payload = complete();
        payload.first_name = Some("   ".to_string());
        payload.email = "not-an-email".to_string();

        let errors = validate_signup(&payload).unwrap_err();
        assert_eq!(errors.get(Field::FirstName), Some("First name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
    }

    #[test]
    fn test_login_validation() {
        assert!(validate_login(&Credentials::new("a@x.com", "p")).is_ok());

        let errors = validate_login(&Credentials::new(" ", "")).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        assert_eq!(errors.to_string(), "Email is required; Password is required");
    }
}
