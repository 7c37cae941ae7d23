//! Decides whether an email address belongs in the personal or the work
//! slot, using the origin system's type hint when one is usable and a
//! free-provider domain list otherwise.

use crate::models::ContactMethodSlot;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Consumer email providers whose addresses default to the personal slot.
/// Process-wide immutable table; domains are compared lowercase and exact
/// (a subdomain of a corporate domain does not match).
static FREE_EMAIL_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "gmail.com",
        "googlemail.com",
        "yahoo.com",
        "yahoo.co.uk",
        "yahoo.fr",
        "yahoo.de",
        "yahoo.co.jp",
        "ymail.com",
        "hotmail.com",
        "hotmail.co.uk",
        "hotmail.fr",
        "hotmail.de",
        "outlook.com",
        "outlook.de",
        "live.com",
        "msn.com",
        "icloud.com",
        "me.com",
        "mac.com",
        "aol.com",
        "protonmail.com",
        "proton.me",
        "pm.me",
        "gmx.com",
        "gmx.de",
        "gmx.net",
        "web.de",
        "t-online.de",
        "mail.com",
        "mail.ru",
        "yandex.com",
        "yandex.ru",
        "zoho.com",
        "fastmail.com",
        "hey.com",
        "qq.com",
        "163.com",
        "126.com",
        "naver.com",
        "orange.fr",
        "free.fr",
        "comcast.net",
        "verizon.net",
        "att.net",
        "sbcglobal.net",
    ]
    .into_iter()
    .collect()
});

/// True when `domain` is a known free/consumer email provider.
pub fn is_free_email_domain(domain: &str) -> bool {
    FREE_EMAIL_DOMAINS.contains(domain.to_lowercase().as_str())
}

/// Infers the email slot for an address.
///
/// An origin hint of `work` or `other` forces the work slot, `personal` or
/// `home` the personal slot (case-insensitive); any other hint is ignored.
/// Without a usable hint, free-provider domains land in the personal slot
/// and everything else in the work slot.
///
/// An address with no `@` has no domain to judge and falls back to the
/// personal slot. The asymmetry (missing `@` is personal while an unknown
/// corporate domain is work) is deliberate; changing it would silently
/// alter merge recommendations.
pub fn infer_email_slot(email: &str, hint: Option<&str>) -> ContactMethodSlot {
    if let Some(hint) = hint {
        match hint.trim().to_lowercase().as_str() {
            "work" | "other" => return ContactMethodSlot::EmailWork,
            "personal" | "home" => return ContactMethodSlot::EmailPersonal,
            _ => {}
        }
    }

    let Some((_, domain)) = email.trim().rsplit_once('@') else {
        return ContactMethodSlot::EmailPersonal;
    };

    if is_free_email_domain(domain) {
        ContactMethodSlot::EmailPersonal
    } else {
        ContactMethodSlot::EmailWork
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_provider_is_personal() {
        assert_eq!(
            infer_email_slot("new@gmail.com", None),
            ContactMethodSlot::EmailPersonal
        );
        assert_eq!(
            infer_email_slot("a@ICLOUD.COM", None),
            ContactMethodSlot::EmailPersonal
        );
    }

    #[test]
    fn test_unknown_domain_is_work() {
        assert_eq!(
            infer_email_slot("new@company.com", None),
            ContactMethodSlot::EmailWork
        );
        // Subdomains of consumer providers don't match the exact table.
        assert_eq!(
            infer_email_slot("a@mail.gmail.com", None),
            ContactMethodSlot::EmailWork
        );
    }

    #[test]
    fn test_hint_overrides_domain() {
        assert_eq!(
            infer_email_slot("a@gmail.com", Some("work")),
            ContactMethodSlot::EmailWork
        );
        assert_eq!(
            infer_email_slot("a@company.com", Some("home")),
            ContactMethodSlot::EmailPersonal
        );
        assert_eq!(
            infer_email_slot("a@gmail.com", Some("Other")),
            ContactMethodSlot::EmailWork
        );
        assert_eq!(
            infer_email_slot("a@company.com", Some("PERSONAL")),
            ContactMethodSlot::EmailPersonal
        );
    }

    #[test]
    fn test_unusable_hint_falls_through_to_domain() {
        assert_eq!(
            infer_email_slot("a@gmail.com", Some("mobile")),
            ContactMethodSlot::EmailPersonal
        );
        assert_eq!(
            infer_email_slot("a@company.com", Some("")),
            ContactMethodSlot::EmailWork
        );
    }

    #[test]
    fn test_missing_at_sign_defaults_to_personal() {
        assert_eq!(
            infer_email_slot("not-an-email", None),
            ContactMethodSlot::EmailPersonal
        );
    }

    #[test]
    fn test_missing_at_sign_with_hint_respects_hint() {
        assert_eq!(
            infer_email_slot("not-an-email", Some("work")),
            ContactMethodSlot::EmailWork
        );
    }

    #[test]
    fn test_is_free_email_domain() {
        assert!(is_free_email_domain("gmail.com"));
        assert!(is_free_email_domain("Outlook.com"));
        assert!(!is_free_email_domain("company.com"));
    }
}
