//! Reconciles contact identifiers collected from external channels (email,
//! phone, chat handles) against CRM contact records.
//!
//! The crate is pure computation over in-memory inputs: it normalizes raw
//! identifiers, infers which contact-method slot each one belongs in,
//! classifies per-identifier conflicts against a contact's existing
//! methods, scores display-name similarity, ranks suggested matches, and
//! plans human-confirmed merges. Persistence, transport, and UI are
//! external collaborators reached only through the types in [`models`].
//!
//! Calls are independent and allocate only local state, so they may run
//! concurrently for different candidates without coordination.

pub mod classify;
pub mod config;
pub mod conflict;
pub mod error;
pub mod infer;
pub mod models;
pub mod normalize;
pub mod rank;
pub mod selection;
pub mod similarity;
pub mod slots;

pub use classify::classify;
pub use config::MatchConfig;
pub use conflict::{detect_conflicts, review_candidate};
pub use error::{AppError, Result};
pub use infer::{infer_email_slot, is_free_email_domain};
pub use models::{
    CandidateReview, ConflictResolution, ConflictType, ContactMethodSlot, ContactRecord,
    DisplayState, ExistingMethod, ExternalCandidate, IdentifierKind, MergeAction, MergePlan,
    MethodComparison, MethodSelection, NormalizedIdentifier, RawIdentifier, SuggestedMatch,
};
pub use normalize::{
    normalize, normalize_email, normalize_handle, normalize_phone, normalize_phone_loose,
};
pub use rank::find_best_match;
pub use selection::plan_merge;
pub use similarity::{are_similar, similarity, DEFAULT_NAME_SIMILARITY_THRESHOLD};
pub use slots::{slot_kind, slots_for};
