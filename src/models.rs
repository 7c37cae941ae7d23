//! Defines the core data structures used for contact identity reconciliation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of an external identifier once its channel is known.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// An email address.
    Email,
    /// A phone number.
    Phone,
    /// A chat handle (e.g. a Telegram username).
    ChatHandle,
    /// A WhatsApp identifier. Normalizes as a phone number but occupies its
    /// own contact-method slot, so it keeps a distinct kind.
    Whatsapp,
}

impl IdentifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Email => "email",
            IdentifierKind::Phone => "phone",
            IdentifierKind::ChatHandle => "chat_handle",
            IdentifierKind::Whatsapp => "whatsapp",
        }
    }
}

/// A named position on a CRM contact that holds at most one method value.
/// Slot uniqueness is enforced by the storage collaborator and assumed true
/// on input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethodSlot {
    EmailPersonal,
    EmailWork,
    Phone,
    ChatHandle,
    Whatsapp,
}

impl ContactMethodSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethodSlot::EmailPersonal => "email_personal",
            ContactMethodSlot::EmailWork => "email_work",
            ContactMethodSlot::Phone => "phone",
            ContactMethodSlot::ChatHandle => "chat_handle",
            ContactMethodSlot::Whatsapp => "whatsapp",
        }
    }
}

/// A raw identifier as delivered by an origin system, before normalization.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RawIdentifier {
    /// The identifier string exactly as the origin system provided it.
    pub value: String,
    /// The declared kind, if the origin system tagged one. `None` means the
    /// kind must be taken from context or guessed via classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<IdentifierKind>,
    /// Free-text type hint from the origin system (e.g. "work", "home").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the origin system marked this identifier as primary.
    #[serde(default)]
    pub primary: bool,
}

impl RawIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        RawIdentifier {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_hint(value: impl Into<String>, hint: impl Into<String>) -> Self {
        RawIdentifier {
            value: value.into(),
            hint: Some(hint.into()),
            ..Default::default()
        }
    }
}

/// A canonicalized identifier value and the kind it resolved to.
/// Normalization is idempotent: normalizing an already-normalized value
/// returns the same value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIdentifier {
    pub value: String,
    pub kind: IdentifierKind,
}

impl RawIdentifier {
    /// Resolves this identifier's kind (its own tag when present, else
    /// `default_kind`) and normalizes its value. Returns `None` when
    /// nothing comparable remains after normalization.
    pub fn normalized(&self, default_kind: IdentifierKind) -> Option<NormalizedIdentifier> {
        let kind = self.kind.unwrap_or(default_kind);
        let value = crate::normalize::normalize(&self.value, kind);
        if value.is_empty() {
            None
        } else {
            Some(NormalizedIdentifier { value, kind })
        }
    }
}

/// An external-system contact being considered for import or linking.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExternalCandidate {
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Raw email identifiers, in origin order.
    #[serde(default)]
    pub emails: Vec<RawIdentifier>,
    /// Raw phone identifiers, in origin order.
    #[serde(default)]
    pub phones: Vec<RawIdentifier>,
    /// Raw chat-handle identifiers, in origin order.
    #[serde(default)]
    pub handles: Vec<RawIdentifier>,
    /// Origin-system fields carried through untouched.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExternalCandidate {
    /// Returns the best display name available for this candidate: the
    /// display name, else "first last", else the first name alone.
    pub fn candidate_name(&self) -> Option<String> {
        if let Some(name) = &self.display_name {
            return Some(name.clone());
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.clone()),
            _ => None,
        }
    }
}

/// A contact method already stored on a CRM contact. Read-only input; the
/// `id` is owned by the storage collaborator and treated as opaque here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExistingMethod {
    pub id: String,
    pub slot: ContactMethodSlot,
    pub value: String,
}

/// How an external identifier's value and slot relate to what the CRM
/// contact already has.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Nothing on the contact matches by value or by slot.
    None,
    /// Same value in the same slot.
    Identical,
    /// Same value filed under a different slot.
    TypeConflict,
    /// The suggested slot is occupied by a different value.
    ValueConflict,
}

impl ConflictType {
    /// The display state a conflict type maps to when rendered by the
    /// decision layer.
    pub fn display_state(&self) -> DisplayState {
        match self {
            ConflictType::None => DisplayState::Adding,
            ConflictType::Identical => DisplayState::Unchanged,
            ConflictType::TypeConflict | ConflictType::ValueConflict => DisplayState::Conflict,
        }
    }
}

/// The badge the decision layer renders for a comparison row.
///
/// `NameMismatch` is never produced by conflict detection itself; it is
/// applied upstream when a candidate is shown against a suggested match
/// whose name similarity falls below the caller's threshold.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Adding,
    Unchanged,
    Conflict,
    NameMismatch,
}

/// The classified comparison of one external identifier against a CRM
/// contact's existing methods. Constructed fresh per comparison call, never
/// mutated, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MethodComparison {
    /// The external identifier exactly as the candidate carries it.
    pub value: String,
    /// The resolved kind of the external identifier.
    pub kind: IdentifierKind,
    /// The normalized form used for matching.
    pub normalized: String,
    /// The slot this identifier should occupy on the CRM contact.
    pub suggested_slot: ContactMethodSlot,
    /// The existing method this identifier matched, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<ExistingMethod>,
    pub conflict: ConflictType,
    pub state: DisplayState,
}

/// The full comparison output for one candidate against one CRM contact:
/// per-identifier comparisons plus the overall display-name similarity.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CandidateReview {
    pub comparisons: Vec<MethodComparison>,
    pub name_similarity: f64,
}

impl CandidateReview {
    /// True when the candidate's name scores below `threshold` against the
    /// contact it is being reviewed against.
    pub fn name_mismatch(&self, threshold: f64) -> bool {
        self.name_similarity < threshold
    }
}

/// A CRM contact as seen by the match ranker: identity plus stored methods.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ContactRecord {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub methods: Vec<ExistingMethod>,
}

/// An externally consumable match proposal: which CRM contact a candidate
/// likely corresponds to, and at what confidence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SuggestedMatch {
    pub contact_id: String,
    pub contact_name: String,
    pub confidence: f64,
}

/// A human-confirmed choice of where one candidate value should land.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MethodSelection {
    /// The candidate value exactly as it appears on the external contact.
    pub original_value: String,
    /// The slot the user picked for it.
    pub slot: ContactMethodSlot,
}

/// How the user resolved a value conflict for one candidate value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    /// Keep the value already stored on the CRM contact.
    UseCrm,
    /// Replace the stored value with the external one.
    UseExternal,
}

/// One storage-neutral step of a confirmed merge. Consumed by the
/// persistence collaborator; this crate never executes these.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MergeAction {
    /// Add a new method in an open slot.
    Add {
        slot: ContactMethodSlot,
        value: String,
    },
    /// Overwrite the value of an existing method, keeping its slot.
    Replace {
        method_id: String,
        slot: ContactMethodSlot,
        value: String,
    },
    /// Leave an existing method untouched; records that a conflict was
    /// resolved in favor of the CRM.
    Keep { method_id: String },
}

/// The ordered outcome of planning a confirmed merge.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MergePlan {
    pub actions: Vec<MergeAction>,
    /// Messages for selections that named values absent from the candidate.
    /// These indicate a collaborator bug upstream, surfaced rather than
    /// silently dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_name_prefers_display_name() {
        let candidate = ExternalCandidate {
            display_name: Some("Johnny D".to_string()),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            ..Default::default()
        };
        assert_eq!(candidate.candidate_name().as_deref(), Some("Johnny D"));
    }

    #[test]
    fn test_candidate_name_falls_back_to_name_parts() {
        let candidate = ExternalCandidate {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            ..Default::default()
        };
        assert_eq!(candidate.candidate_name().as_deref(), Some("John Doe"));

        let first_only = ExternalCandidate {
            first_name: Some("John".to_string()),
            ..Default::default()
        };
        assert_eq!(first_only.candidate_name().as_deref(), Some("John"));

        let nameless = ExternalCandidate::default();
        assert_eq!(nameless.candidate_name(), None);
    }

    #[test]
    fn test_raw_identifier_normalized() {
        let raw = RawIdentifier::new("  John@Example.COM  ");
        let normalized = raw.normalized(IdentifierKind::Email).unwrap();
        assert_eq!(normalized.value, "john@example.com");
        assert_eq!(normalized.kind, IdentifierKind::Email);

        // An explicit kind tag beats the list default.
        let mut tagged = RawIdentifier::new("+1 555 123 4567");
        tagged.kind = Some(IdentifierKind::Whatsapp);
        let normalized = tagged.normalized(IdentifierKind::Phone).unwrap();
        assert_eq!(normalized.kind, IdentifierKind::Whatsapp);
        assert_eq!(normalized.value, "+15551234567");

        let garbage = RawIdentifier::new("   ");
        assert!(garbage.normalized(IdentifierKind::Phone).is_none());
    }

    #[test]
    fn test_conflict_type_display_state() {
        assert_eq!(ConflictType::None.display_state(), DisplayState::Adding);
        assert_eq!(
            ConflictType::Identical.display_state(),
            DisplayState::Unchanged
        );
        assert_eq!(
            ConflictType::TypeConflict.display_state(),
            DisplayState::Conflict
        );
        assert_eq!(
            ConflictType::ValueConflict.display_state(),
            DisplayState::Conflict
        );
    }

    #[test]
    fn test_enums_serialize_snake_case() {
        let json = serde_json::to_string(&ContactMethodSlot::EmailPersonal).unwrap();
        assert_eq!(json, "\"email_personal\"");
        let json = serde_json::to_string(&ContactMethodSlot::Whatsapp).unwrap();
        assert_eq!(json, "\"whatsapp\"");
        let json = serde_json::to_string(&DisplayState::NameMismatch).unwrap();
        assert_eq!(json, "\"name_mismatch\"");
        let json = serde_json::to_string(&ConflictType::ValueConflict).unwrap();
        assert_eq!(json, "\"value_conflict\"");
    }
}
