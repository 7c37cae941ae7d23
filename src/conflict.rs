//! Classifies how each identifier on an external candidate relates to a CRM
//! contact's existing methods.
//!
//! This is the orchestrator over the normalization, slot-mapping, and
//! email-type-inference leaves. All comparisons run over normalized values;
//! the raw candidate values are carried through untouched for display.

use crate::infer::infer_email_slot;
use crate::models::{
    CandidateReview, ConflictType, ExistingMethod, ExternalCandidate, IdentifierKind,
    MethodComparison, RawIdentifier,
};
use crate::normalize::normalize;
use crate::similarity::similarity;
use crate::slots::{slot_kind, slots_for};

/// Compares every identifier on `candidate` against the contact's existing
/// methods and classifies each one.
///
/// Identifiers are processed in candidate order: emails, then phones, then
/// chat handles, each list in its input order, and the output preserves that
/// order. An identifier that normalizes to the empty string is skipped with
/// no comparison emitted. Each existing method can back at most one
/// comparison per call; ties among equal stored values resolve in
/// existing-list order.
pub fn detect_conflicts(
    candidate: &ExternalCandidate,
    existing: &[ExistingMethod],
) -> Vec<MethodComparison> {
    let normalized_existing: Vec<String> = existing
        .iter()
        .map(|m| normalize(&m.value, slot_kind(m.slot)))
        .collect();
    let mut consumed = vec![false; existing.len()];

    let mut comparisons = Vec::new();
    for (raw, default_kind) in candidate_identifiers(candidate) {
        let Some(normalized) = raw.normalized(default_kind) else {
            tracing::debug!("Skipping unnormalizable identifier: {:?}", raw.value);
            continue;
        };
        let kind = normalized.kind;

        let suggested_slot = match kind {
            IdentifierKind::Email => infer_email_slot(&raw.value, raw.hint.as_deref()),
            other => slots_for(other)[0],
        };

        // Value match first, independent of slot: the same real-world
        // identifier may be filed anywhere on the contact.
        let value_match = (0..existing.len())
            .find(|&i| !consumed[i] && normalized_existing[i] == normalized.value);

        let (conflict, matched) = if let Some(i) = value_match {
            consumed[i] = true;
            if existing[i].slot == suggested_slot {
                (ConflictType::Identical, Some(existing[i].clone()))
            } else {
                (ConflictType::TypeConflict, Some(existing[i].clone()))
            }
        } else if let Some(i) =
            (0..existing.len()).find(|&i| !consumed[i] && existing[i].slot == suggested_slot)
        {
            // The suggested slot is occupied by a different value.
            consumed[i] = true;
            (ConflictType::ValueConflict, Some(existing[i].clone()))
        } else {
            (ConflictType::None, None)
        };

        comparisons.push(MethodComparison {
            value: raw.value.clone(),
            kind,
            normalized: normalized.value,
            suggested_slot,
            existing: matched,
            conflict,
            state: conflict.display_state(),
        });
    }

    comparisons
}

/// Runs [`detect_conflicts`] and scores the candidate's display name against
/// the contact's, producing the full review bundle the decision layer
/// renders.
pub fn review_candidate(
    candidate: &ExternalCandidate,
    contact_name: &str,
    existing: &[ExistingMethod],
) -> CandidateReview {
    let comparisons = detect_conflicts(candidate, existing);
    let name_similarity = candidate
        .candidate_name()
        .map(|name| similarity(&name, contact_name))
        .unwrap_or(0.0);

    tracing::debug!(
        "Reviewed candidate against {:?}: {} comparisons, name similarity {:.2}",
        contact_name,
        comparisons.len(),
        name_similarity
    );

    CandidateReview {
        comparisons,
        name_similarity,
    }
}

/// Candidate identifiers in comparison order, paired with the kind implied
/// by the list they came from. An explicit kind tag on the identifier
/// itself (e.g. a WhatsApp-flagged phone) takes precedence over the list.
fn candidate_identifiers(
    candidate: &ExternalCandidate,
) -> impl Iterator<Item = (&RawIdentifier, IdentifierKind)> {
    candidate
        .emails
        .iter()
        .map(|raw| (raw, IdentifierKind::Email))
        .chain(candidate.phones.iter().map(|raw| (raw, IdentifierKind::Phone)))
        .chain(
            candidate
                .handles
                .iter()
                .map(|raw| (raw, IdentifierKind::ChatHandle)),
        )
}
