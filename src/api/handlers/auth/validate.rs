//! Pure credential input validation. No I/O; safe to call before any
//! store lookup.

use regex::Regex;

use super::types::FieldErrors;

/// Minimum secret length in characters, not bytes.
const SECRET_MIN_CHARS: usize = 6;

pub const MSG_FIELDS_REQUIRED: &str = "Required fields are missing";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_PASSWORD_REQUIRED: &str = "Password is required";
pub const MSG_EMAIL_INVALID: &str = "Invalid email format";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

/// Credentials that passed shape validation. The identifier is trimmed;
/// the secret is carried unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCredentials {
    pub identifier: String,
    pub secret: String,
}

/// Shape failure with per-field detail so the transport layer can report
/// both email and password problems in one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub message: &'static str,
    pub details: FieldErrors,
}

/// Loose email shape check. Intentionally permissive and not RFC
/// compliant; mirrors what the system has always accepted.
fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Validate login input. Missing fields are reported per field, then the
/// identifier must look like an email and the secret must be at least
/// six characters.
///
/// # Errors
/// Returns a [`ValidationFailure`] naming the field(s) at fault.
pub fn validate(identifier: &str, secret: &str) -> Result<ValidCredentials, ValidationFailure> {
    let identifier = identifier.trim();

    if identifier.is_empty() || secret.is_empty() {
        return Err(ValidationFailure {
            message: MSG_FIELDS_REQUIRED,
            details: FieldErrors {
                email: identifier.is_empty().then(|| MSG_EMAIL_REQUIRED.to_string()),
                password: secret.is_empty().then(|| MSG_PASSWORD_REQUIRED.to_string()),
            },
        });
    }

    if !valid_email(identifier) {
        return Err(ValidationFailure {
            message: MSG_EMAIL_INVALID,
            details: FieldErrors {
                email: Some(MSG_EMAIL_INVALID.to_string()),
                password: None,
            },
        });
    }

    if secret.chars().count() < SECRET_MIN_CHARS {
        return Err(ValidationFailure {
            message: MSG_PASSWORD_TOO_SHORT,
            details: FieldErrors {
                email: None,
                password: Some(MSG_PASSWORD_TOO_SHORT.to_string()),
            },
        });
    }

    Ok(ValidCredentials {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_basic_credentials() {
        let valid = validate("admin@test.com", "password123").expect("valid");
        assert_eq!(valid.identifier, "admin@test.com");
        assert_eq!(valid.secret, "password123");
    }

    #[test]
    fn trims_identifier_only() {
        let valid = validate("  admin@test.com  ", "password123").expect("valid");
        assert_eq!(valid.identifier, "admin@test.com");
    }

    #[test]
    fn missing_fields_report_per_field() {
        let failure = validate("", "").expect_err("both missing");
        assert_eq!(failure.message, MSG_FIELDS_REQUIRED);
        assert_eq!(failure.details.email.as_deref(), Some(MSG_EMAIL_REQUIRED));
        assert_eq!(
            failure.details.password.as_deref(),
            Some(MSG_PASSWORD_REQUIRED)
        );

        let failure = validate("admin@test.com", "").expect_err("password missing");
        assert!(failure.details.email.is_none());
        assert!(failure.details.password.is_some());
    }

    #[test]
    fn rejects_malformed_emails() {
        for identifier in ["not-an-email", "missing-at.example.com", "missing-domain@", "a@b", "a b@c.d"] {
            let failure = validate(identifier, "password123").expect_err(identifier);
            assert_eq!(failure.message, MSG_EMAIL_INVALID);
            assert_eq!(failure.details.email.as_deref(), Some(MSG_EMAIL_INVALID));
            assert!(failure.details.password.is_none());
        }
    }

    #[test]
    fn rejects_short_secret_even_with_valid_email() {
        let failure = validate("admin@test.com", "12345").expect_err("short");
        assert_eq!(failure.message, MSG_PASSWORD_TOO_SHORT);
        assert!(failure.details.email.is_none());
    }

    #[test]
    fn secret_length_counts_characters_not_bytes() {
        // Five two-byte characters: ten bytes, still too short.
        assert!(validate("admin@test.com", "ééééé").is_err());
        // Six multi-byte characters pass.
        assert!(validate("admin@test.com", "éééééé").is_ok());
    }
}
