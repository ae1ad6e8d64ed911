//! Field validator.
//!
//! Pure, synchronous checks for the contact and credential forms plus the
//! as-you-type phone formatter. No state, no I/O.

mod errors;
mod phone;

pub use errors::FieldErrors;
pub use phone::{digits_only, format_phone_as_typed};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contact::{ContactField, ContactInfo};
use crate::credentials::{CredentialField, Credentials};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-']+$").expect("name pattern is valid"));
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
// Applied to the digits of the input, so separators in the pattern never match.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?1?\s?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$").expect("phone pattern is valid")
});

const MIN_NAME_LEN: usize = 2;
const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 4;

/// Result of validating one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation<F: Ord> {
    pub errors: FieldErrors<F>,
}

impl<F: Ord> Validation<F> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate_contact(info: &ContactInfo) -> Validation<ContactField> {
    let mut errors = FieldErrors::new();

    if let Some(message) = check_name("First name", &info.first_name) {
        errors.insert(ContactField::FirstName, message);
    }
    if let Some(message) = check_name("Last name", &info.last_name) {
        errors.insert(ContactField::LastName, message);
    }

    if info.email.trim().is_empty() {
        errors.insert(ContactField::Email, "Email is required");
    } else if !EMAIL_PATTERN.is_match(&info.email) {
        errors.insert(ContactField::Email, "Please enter a valid email address");
    }

    if info.phone.trim().is_empty() {
        errors.insert(ContactField::Phone, "Phone number is required");
    } else if !PHONE_PATTERN.is_match(&digits_only(&info.phone)) {
        errors.insert(ContactField::Phone, "Please enter a valid phone number");
    }

    Validation { errors }
}

pub fn validate_credentials(credentials: &Credentials) -> Validation<CredentialField> {
    let mut errors = FieldErrors::new();

    let username = credentials.username.trim();
    if username.is_empty() {
        errors.insert(CredentialField::Username, "Username is required");
    } else if username.chars().count() < MIN_USERNAME_LEN {
        errors.insert(
            CredentialField::Username,
            "Username must be at least 3 characters",
        );
    }

    let password = credentials.password.expose();
    if password.is_empty() {
        errors.insert(CredentialField::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            CredentialField::Password,
            "Password must be at least 4 characters",
        );
    }

    Validation { errors }
}

fn check_name(label: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(format!("{label} is required"))
    } else if trimmed.chars().count() < MIN_NAME_LEN {
        Some(format!("{label} must be at least 2 characters"))
    } else if !NAME_PATTERN.is_match(value) {
        Some(format!("{label} can only contain letters"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Provider;

    fn valid_contact() -> ContactInfo {
        ContactInfo {
            first_name: "Mary-Jane".into(),
            last_name: "O'Neil".into(),
            email: "mj@example.com".into(),
            phone: "(555) 123-4567".into(),
        }
    }

    #[test]
    fn well_formed_contact_is_valid() {
        let result = validate_contact(&valid_contact());
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn eleven_digit_number_with_country_code_is_valid() {
        let mut contact = valid_contact();
        contact.phone = "+1 555 123 4567".into();
        assert!(validate_contact(&contact).is_valid());
    }

    #[test]
    fn empty_first_name_is_required() {
        let mut contact = valid_contact();
        contact.first_name = "   ".into();
        let result = validate_contact(&contact);
        assert!(!result.is_valid());
        assert_eq!(
            result.errors.get(&ContactField::FirstName),
            Some("First name is required")
        );
    }

    #[test]
    fn short_and_non_letter_names_are_rejected() {
        let mut contact = valid_contact();
        contact.first_name = "J".into();
        contact.last_name = "D0e".into();
        let result = validate_contact(&contact);
        assert_eq!(
            result.errors.get(&ContactField::FirstName),
            Some("First name must be at least 2 characters")
        );
        assert_eq!(
            result.errors.get(&ContactField::LastName),
            Some("Last name can only contain letters")
        );
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut contact = valid_contact();
        contact.email = "mj.example.com".into();
        let result = validate_contact(&contact);
        assert!(!result.is_valid());
        assert_eq!(
            result.errors.get(&ContactField::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn nine_digit_phone_is_rejected() {
        let mut contact = valid_contact();
        contact.phone = "555123456".into();
        let result = validate_contact(&contact);
        assert!(!result.is_valid());
        assert_eq!(
            result.errors.get(&ContactField::Phone),
            Some("Please enter a valid phone number")
        );
        assert!(result.errors.get(&ContactField::Email).is_none());
    }

    #[test]
    fn eleven_digits_not_starting_with_one_are_rejected() {
        let mut contact = valid_contact();
        contact.phone = "25551234567".into();
        assert!(!validate_contact(&contact).is_valid());
    }

    #[test]
    fn credentials_require_minimum_lengths() {
        let creds = Credentials::new(Provider::SmartCredit, "jd", "123".into());
        let result = validate_credentials(&creds);
        assert_eq!(
            result.errors.get(&CredentialField::Username),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(
            result.errors.get(&CredentialField::Password),
            Some("Password must be at least 4 characters")
        );
    }

    #[test]
    fn empty_credentials_are_required() {
        let result = validate_credentials(&Credentials::default());
        assert_eq!(
            result.errors.get(&CredentialField::Username),
            Some("Username is required")
        );
        assert_eq!(
            result.errors.get(&CredentialField::Password),
            Some("Password is required")
        );
    }

    #[test]
    fn valid_credentials_pass() {
        let creds = Credentials::new(Provider::IdentityIq, "jdoe", "12345".into());
        assert!(validate_credentials(&creds).is_valid());
    }
}
