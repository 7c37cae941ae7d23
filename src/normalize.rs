//! Canonicalizes raw identifier strings into comparable forms.
//!
//! Normalization is idempotent for every kind and never fails: unrecognized
//! or empty input yields an empty string, which comparison logic treats as
//! "no identifier to compare."

use crate::models::IdentifierKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches any non-digit character.
pub(crate) static NON_DIGIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\D").expect("Failed to compile non-digit regex pattern. This should not happen.")
});

/// Returns the normalized form of an identifier based on its kind.
///
/// Rules:
/// - Email: trim whitespace, lowercase.
/// - Phone and WhatsApp: strip non-digits, normalize to an E.164-shaped value.
/// - Chat handle: trim whitespace, strip a single leading `@`, lowercase.
pub fn normalize(raw: &str, kind: IdentifierKind) -> String {
    match kind {
        IdentifierKind::Email => normalize_email(raw),
        IdentifierKind::Phone | IdentifierKind::Whatsapp => normalize_phone(raw),
        IdentifierKind::ChatHandle => normalize_handle(raw),
    }
}

/// Normalizes an email address by trimming whitespace and lowercasing.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes a phone number to an E.164-shaped value.
///
/// A bare 10-digit number is treated as US and prefixed with `+1`; an
/// 11-digit number starting with `1` already carries the US country code and
/// gets a bare `+`. Everything else keeps its digits behind a `+` with no
/// country-code inference. This heuristic does not validate real
/// dialing-plan rules.
pub fn normalize_phone(phone: &str) -> String {
    let phone = phone.trim();
    if phone.is_empty() {
        return String::new();
    }

    let has_plus = phone.starts_with('+');
    let digits = NON_DIGIT.replace_all(phone, "");
    if digits.is_empty() {
        return String::new();
    }

    if digits.len() == 10 && !has_plus {
        return format!("+1{}", digits);
    }

    if digits.len() == 11 && digits.starts_with('1') {
        return format!("+{}", digits);
    }

    format!("+{}", digits)
}

/// Strips phone formatting but performs no country-code inference: digits
/// are kept as-is, with a leading `+` preserved when present. This matches
/// the looser comparison used when ranking import matches, where candidate
/// and stored values pass through the same function and country-code
/// guessing would only add noise.
pub fn normalize_phone_loose(phone: &str) -> String {
    let mut normalized = String::with_capacity(phone.len());
    for (i, c) in phone.char_indices() {
        if c == '+' && i == 0 {
            normalized.push(c);
        } else if c.is_ascii_digit() {
            normalized.push(c);
        }
    }
    normalized
}

/// Normalizes a chat handle by trimming whitespace, removing a single
/// leading `@`, and lowercasing.
pub fn normalize_handle(handle: &str) -> String {
    let handle = handle.trim();
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    handle.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("John.Doe@Example.COM"), "john.doe@example.com");
        assert_eq!(normalize_email("  john@example.com  "), "john@example.com");
        assert_eq!(normalize_email("john@example.com"), "john@example.com");
        assert_eq!(normalize_email(""), "");
    }

    #[test]
    fn test_normalize_email_unicode() {
        assert_eq!(normalize_email("JÖHN@EXAMPLE.COM"), "jöhn@example.com");
    }

    #[test]
    fn test_normalize_phone_us_shapes() {
        assert_eq!(normalize_phone("555-123-4567"), "+15551234567");
        assert_eq!(normalize_phone("(555) 123-4567"), "+15551234567");
        assert_eq!(normalize_phone("555 123 4567"), "+15551234567");
        assert_eq!(normalize_phone("+1-555-123-4567"), "+15551234567");
        assert_eq!(normalize_phone("1-555-123-4567"), "+15551234567");
    }

    #[test]
    fn test_normalize_phone_international() {
        assert_eq!(normalize_phone("+44 20 7946 0958"), "+442079460958");
        assert_eq!(normalize_phone("44 20 7946 0958"), "+442079460958");
        assert_eq!(normalize_phone("+49 30 12345678"), "+493012345678");
    }

    #[test]
    fn test_normalize_phone_empty_and_garbage() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("   "), "");
        assert_eq!(normalize_phone("abc-def-ghij"), "");
    }

    #[test]
    fn test_normalize_phone_short_numbers() {
        assert_eq!(normalize_phone("123"), "+123");
        assert_eq!(normalize_phone("1234567"), "+1234567");
    }

    #[test]
    fn test_normalize_phone_already_e164() {
        assert_eq!(normalize_phone("+15551234567"), "+15551234567");
    }

    #[test]
    fn test_normalize_phone_loose() {
        assert_eq!(normalize_phone_loose("+1 (555) 123-4567"), "+15551234567");
        assert_eq!(normalize_phone_loose("(555) 123-4567"), "5551234567");
        assert_eq!(normalize_phone_loose(""), "");
        // The + survives only in leading position.
        assert_eq!(normalize_phone_loose("555+123"), "555123");
    }

    #[test]
    fn test_normalize_handle() {
        assert_eq!(normalize_handle("@JohnDoe"), "johndoe");
        assert_eq!(normalize_handle("JohnDoe"), "johndoe");
        assert_eq!(normalize_handle("  @johndoe  "), "johndoe");
        assert_eq!(normalize_handle("johndoe"), "johndoe");
        assert_eq!(normalize_handle(""), "");
        assert_eq!(normalize_handle("@John123"), "john123");
    }

    #[test]
    fn test_normalize_whatsapp_uses_phone_rules() {
        assert_eq!(
            normalize("+1 555 123 4567", IdentifierKind::Whatsapp),
            "+15551234567"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let cases = [
            ("John.Doe@Example.COM", IdentifierKind::Email),
            ("(555) 123-4567", IdentifierKind::Phone),
            ("+44 20 7946 0958", IdentifierKind::Phone),
            ("123", IdentifierKind::Phone),
            ("@JohnDoe", IdentifierKind::ChatHandle),
            ("+1 555 123 4567", IdentifierKind::Whatsapp),
        ];
        for (raw, kind) in cases {
            let once = normalize(raw, kind);
            assert_eq!(normalize(&once, kind), once, "not idempotent for {:?}", raw);
        }
    }
}
