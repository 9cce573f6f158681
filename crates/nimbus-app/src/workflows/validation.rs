//! Synchronous input validation for the login form.
//!
//! The authority accepts either an email address or a phone number as
//! an account identifier. These checks are structural only: they gate
//! the submit button, they do not prove deliverability.

/// Check whether an identifier is a plausible email or phone number.
#[must_use]
pub fn is_valid_user_auth(input: &str) -> bool {
    let trimmed = input.trim();
    is_valid_email(trimmed) || is_valid_phone(trimmed)
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_valid_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if input.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Phone check: optional leading `+`, common separators, 7-15 digits.
#[must_use]
pub fn is_valid_phone(input: &str) -> bool {
    let rest = input.strip_prefix('+').unwrap_or(input);
    if rest.is_empty() {
        return false;
    }
    let mut digits = 0usize;
    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !matches!(c, ' ' | '-' | '.' | '(' | ')') {
            return false;
        }
    }
    (7..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@exa@mple.com"));
    }

    #[test]
    fn accepts_international_phone_numbers() {
        assert!(is_valid_phone("+81 90 1234 5678"));
        assert!(is_valid_phone("(212) 555-0123"));
        assert!(is_valid_phone("2125550123"));
    }

    #[test]
    fn rejects_non_numbers() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("123456789012345678"));
        assert!(!is_valid_phone("call-me-maybe"));
    }

    #[test]
    fn user_auth_accepts_either_shape_and_trims() {
        assert!(is_valid_user_auth("  user@example.com  "));
        assert!(is_valid_user_auth("+14155550123"));
        assert!(!is_valid_user_auth("nonsense"));
        assert!(!is_valid_user_auth(""));
    }
}
