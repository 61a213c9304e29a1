//! Client-side input validation.
//!
//! Everything here runs before a request is built; a rejection means no
//! network traffic happened. The rules mirror what the backend enforces
//! so users get immediate, field-specific feedback.

use crate::models::NewAccount;
use thiserror::Error;

/// Maximum length of a comment, in characters.
pub const COMMENT_MAX_CHARS: usize = 30;

/// Minimum length of a password at signup.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Minimum length of a replacement password.
pub const NEW_PASSWORD_MIN_CHARS: usize = 6;

/// A locally rejected input. Carries the offending field so the caller
/// can point at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the rejected field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate login credentials.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new("email", "Email is required"));
    }
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }
    Ok(())
}

/// Validate a signup payload.
pub fn validate_signup(account: &NewAccount) -> Result<(), ValidationError> {
    if account.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Name is required"));
    }
    if !is_plausible_email(&account.email) {
        return Err(ValidationError::new("email", "Invalid email address"));
    }
    validate_new_password(&account.password)?;
    if account.re_password.is_empty() {
        return Err(ValidationError::new(
            "rePassword",
            "Please confirm your password",
        ));
    }
    if account.password != account.re_password {
        return Err(ValidationError::new("rePassword", "Passwords don't match"));
    }
    if account.date_of_birth.trim().is_empty() {
        return Err(ValidationError::new(
            "dateOfBirth",
            "Date of birth is required",
        ));
    }
    if account.gender != "male" && account.gender != "female" {
        return Err(ValidationError::new("gender", "Please select a gender"));
    }
    Ok(())
}

/// Validate a post body (create and update).
pub fn validate_post_body(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::new("body", "Post body cannot be empty"));
    }
    Ok(())
}

/// Validate comment content (create and update).
pub fn validate_comment_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::new("content", "Comment cannot be empty"));
    }
    if content.chars().count() > COMMENT_MAX_CHARS {
        return Err(ValidationError::new(
            "content",
            "Comment cannot be more than 30 characters",
        ));
    }
    Ok(())
}

/// Validate a password change request.
pub fn validate_password_change(old: &str, new: &str) -> Result<(), ValidationError> {
    if old.is_empty() {
        return Err(ValidationError::new("password", "Old password is required"));
    }
    if new.chars().count() < NEW_PASSWORD_MIN_CHARS {
        return Err(ValidationError::new(
            "newPassword",
            "New password must be at least 6 characters long",
        ));
    }
    Ok(())
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 8 characters long",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::new(
            "password",
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new(
            "password",
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "password",
            "Password must contain at least one number",
        ));
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new(
            "password",
            "Password must contain at least one special character",
        ));
    }
    Ok(())
}

/// Minimal shape check: `local@domain.tld`, no whitespace.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> NewAccount {
        NewAccount {
            name: "Dina".to_string(),
            email: "dina@example.com".to_string(),
            password: "Str0ng!pass".to_string(),
            re_password: "Str0ng!pass".to_string(),
            date_of_birth: "10-02-1998".to_string(),
            gender: "female".to_string(),
        }
    }

    #[test]
    fn test_valid_signup_passes() {
        assert!(validate_signup(&account()).is_ok());
    }

    #[test]
    fn test_signup_rejects_blank_name() {
        let mut a = account();
        a.name = "   ".to_string();
        let err = validate_signup(&a).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_signup_rejects_bad_emails() {
        for email in ["", "no-at-sign", "@missing.local", "user@", "user@nodot", "a b@x.com"] {
            let mut a = account();
            a.email = email.to_string();
            let err = validate_signup(&a).unwrap_err();
            assert_eq!(err.field, "email", "expected rejection for {email:?}");
        }
    }

    #[test]
    fn test_signup_password_complexity() {
        let cases = [
            ("Sh0r!t", "at least 8"),
            ("alllower1!x", "uppercase"),
            ("ALLUPPER1!X", "lowercase"),
            ("NoDigits!!x", "number"),
            ("NoSpecial1x", "special"),
        ];
        for (password, needle) in cases {
            let mut a = account();
            a.password = password.to_string();
            a.re_password = password.to_string();
            let err = validate_signup(&a).unwrap_err();
            assert_eq!(err.field, "password");
            assert!(
                err.message.contains(needle),
                "password {password:?}: got {:?}",
                err.message
            );
        }
    }

    #[test]
    fn test_signup_rejects_mismatched_confirmation() {
        let mut a = account();
        a.re_password = "Different1!".to_string();
        let err = validate_signup(&a).unwrap_err();
        assert_eq!(err.field, "rePassword");
    }

    #[test]
    fn test_signup_rejects_unknown_gender() {
        let mut a = account();
        a.gender = "other".to_string();
        let err = validate_signup(&a).unwrap_err();
        assert_eq!(err.field, "gender");
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("dina@example.com", "pw").is_ok());
        assert_eq!(validate_login("", "pw").unwrap_err().field, "email");
        assert_eq!(
            validate_login("dina@example.com", "").unwrap_err().field,
            "password"
        );
    }

    #[test]
    fn test_post_body_must_be_non_empty() {
        assert!(validate_post_body("hello").is_ok());
        assert!(validate_post_body("").is_err());
        assert!(validate_post_body("   ").is_err());
    }

    #[test]
    fn test_comment_length_bounds() {
        assert!(validate_comment_content("x").is_ok());
        assert!(validate_comment_content(&"y".repeat(COMMENT_MAX_CHARS)).is_ok());

        assert_eq!(
            validate_comment_content("").unwrap_err().message,
            "Comment cannot be empty"
        );
        let err = validate_comment_content(&"y".repeat(COMMENT_MAX_CHARS + 1)).unwrap_err();
        assert_eq!(err.message, "Comment cannot be more than 30 characters");
    }

    #[test]
    fn test_comment_length_counts_characters_not_bytes() {
        // 30 multi-byte characters are within the limit.
        let content = "é".repeat(COMMENT_MAX_CHARS);
        assert!(validate_comment_content(&content).is_ok());
    }

    #[test]
    fn test_password_change_rules() {
        assert!(validate_password_change("old-pw", "newpass").is_ok());
        assert_eq!(
            validate_password_change("", "newpass").unwrap_err().field,
            "password"
        );
        assert_eq!(
            validate_password_change("old-pw", "short").unwrap_err().field,
            "newPassword"
        );
    }
}
