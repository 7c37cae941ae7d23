//! Heuristic kind detection for identifiers arriving without a declared
//! kind, e.g. chat channels that address people by either email or phone.

use crate::models::IdentifierKind;
use crate::normalize::NON_DIGIT;

/// Guesses whether a raw identifier is an email address or a phone number.
///
/// Anything containing `@` is an email; a leading `+` or a mostly-digits
/// string of at least seven digits is a phone. Ambiguous short strings
/// default to email rather than phone.
pub fn classify(raw: &str) -> IdentifierKind {
    let raw = raw.trim();

    if raw.contains('@') {
        return IdentifierKind::Email;
    }

    if raw.starts_with('+') {
        return IdentifierKind::Phone;
    }

    let digits = NON_DIGIT.replace_all(raw, "");
    let total = raw.chars().count();
    if digits.len() >= 7 && (digits.len() as f64) / (total as f64) > 0.5 {
        return IdentifierKind::Phone;
    }

    IdentifierKind::Email
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_email() {
        assert_eq!(classify("john@example.com"), IdentifierKind::Email);
    }

    #[test]
    fn test_classify_phone_with_plus() {
        assert_eq!(classify("+15551234567"), IdentifierKind::Phone);
    }

    #[test]
    fn test_classify_phone_mostly_digits() {
        assert_eq!(classify("555-123-4567"), IdentifierKind::Phone);
        assert_eq!(classify("5551234567"), IdentifierKind::Phone);
    }

    #[test]
    fn test_classify_ambiguous_defaults_to_email() {
        assert_eq!(classify("johndoe"), IdentifierKind::Email);
        assert_eq!(classify(""), IdentifierKind::Email);
        // Six digits is below the phone threshold.
        assert_eq!(classify("123456"), IdentifierKind::Email);
    }

    #[test]
    fn test_classify_digit_ratio() {
        // Seven digits buried in mostly letters is not a phone.
        assert_eq!(classify("order1234567number"), IdentifierKind::Email);
    }
}
