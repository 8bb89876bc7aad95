//! Form validation shared by the page handlers.
//!
//! Checks run in a fixed order and stop at the first failure, so a form
//! shows one message at a time.

use bookverse_core::Email;
use thiserror::Error;

/// Minimum signup password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A form validation failure. `Display` is the message shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Every field must contain something other than whitespace.
///
/// # Errors
///
/// Returns `FormError::MissingFields` if any field is blank.
pub fn require_filled(fields: &[&str]) -> Result<(), FormError> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(FormError::MissingFields);
    }
    Ok(())
}

/// Parse an email address typed into a form.
///
/// # Errors
///
/// Returns `FormError::InvalidEmail` if the address is not `local@domain.tld`.
pub fn parse_email(email: &str) -> Result<Email, FormError> {
    Email::parse(email.trim()).map_err(|_| FormError::InvalidEmail)
}

/// Validate the login form. The credentials themselves are checked by the
/// session store.
///
/// # Errors
///
/// Returns `FormError::MissingFields` if either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<(), FormError> {
    require_filled(&[email, password])
}

/// Fields of the signup form.
#[derive(Debug, Clone, Copy)]
pub struct SignupInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub agree_to_terms: bool,
}

/// Validate the signup form and return the parsed email.
///
/// # Errors
///
/// Returns the first failing check, in form order.
pub fn validate_signup(input: &SignupInput<'_>) -> Result<Email, FormError> {
    require_filled(&[
        input.name,
        input.email,
        input.password,
        input.confirm_password,
    ])?;
    let email = parse_email(input.email)?;

    if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FormError::PasswordTooShort);
    }
    if input.password != input.confirm_password {
        return Err(FormError::PasswordMismatch);
    }
    if !input.agree_to_terms {
        return Err(FormError::TermsNotAccepted);
    }

    Ok(email)
}

/// Validate the contact form and return the parsed email.
///
/// # Errors
///
/// Returns `FormError::MissingFields` or `FormError::InvalidEmail`.
pub fn validate_contact(
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> Result<Email, FormError> {
    require_filled(&[name, email, subject, message])?;
    parse_email(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup<'a>(password: &'a str, confirm: &'a str, terms: bool) -> SignupInput<'a> {
        SignupInput {
            name: "Ada Lovelace",
            email: "ada@example.com",
            password,
            confirm_password: confirm,
            agree_to_terms: terms,
        }
    }

    #[test]
    fn test_require_filled_rejects_blank() {
        assert_eq!(require_filled(&["a", "  "]), Err(FormError::MissingFields));
        assert_eq!(require_filled(&["a", "b"]), Ok(()));
    }

    #[test]
    fn test_email_shape() {
        assert!(parse_email("reader@books.io").is_ok());
        assert_eq!(parse_email("reader@books"), Err(FormError::InvalidEmail));
        assert_eq!(parse_email("read er@books.io"), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_signup_checks_in_order() {
        let mut input = signup("secret1", "secret1", true);
        input.email = "nope";
        assert_eq!(validate_signup(&input), Err(FormError::InvalidEmail));

        assert_eq!(
            validate_signup(&signup("12345", "12345", true)),
            Err(FormError::PasswordTooShort)
        );
        assert_eq!(
            validate_signup(&signup("123456", "1234567", true)),
            Err(FormError::PasswordMismatch)
        );
        assert_eq!(
            validate_signup(&signup("123456", "123456", false)),
            Err(FormError::TermsNotAccepted)
        );
        assert_eq!(
            validate_signup(&signup("123456", "123456", true)).map(|e| e.into_inner()),
            Ok("ada@example.com".to_string())
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(FormError::MissingFields.to_string(), "Please fill in all fields");
        assert_eq!(
            FormError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }
}
