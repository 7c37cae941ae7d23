//! Ranks CRM contacts as suggested matches for an import candidate.
//!
//! This is the producer of the "suggested match" fact the conflict review
//! consumes. It is deliberately decoupled from per-identifier conflict
//! classification: input is a candidate plus an in-memory corpus of contact
//! records, output is at most one scored proposal.

use crate::config::MatchConfig;
use crate::models::{ContactMethodSlot, ContactRecord, ExternalCandidate, SuggestedMatch};
use crate::normalize::{normalize_email, normalize_phone_loose};
use crate::similarity::similarity;
use std::collections::HashSet;

/// Finds the best-matching CRM contact for an external candidate.
///
/// Contacts are scored by name similarity weighted with contact-method
/// overlap; only scores at or above `config.confidence_threshold` are
/// proposed. Returns `None` for a nameless candidate or when nothing scores
/// high enough. Ties keep the earlier corpus entry.
pub fn find_best_match(
    candidate: &ExternalCandidate,
    contacts: &[ContactRecord],
    config: &MatchConfig,
) -> Option<SuggestedMatch> {
    let candidate_name = candidate.candidate_name()?;
    if candidate_name.trim().is_empty() {
        return None;
    }

    let candidate_emails: HashSet<String> = candidate
        .emails
        .iter()
        .map(|email| normalize_email(&email.value))
        .collect();
    let candidate_phones: HashSet<String> = candidate
        .phones
        .iter()
        .map(|phone| normalize_phone_loose(&phone.value))
        .collect();

    let mut best_match: Option<SuggestedMatch> = None;
    let mut best_score = 0.0;

    for contact in contacts {
        let name_similarity = similarity(&candidate_name, &contact.full_name);
        if name_similarity < config.min_similarity_threshold {
            continue;
        }

        let (method_matches, total_methods) =
            count_method_overlap(contact, &candidate_emails, &candidate_phones);
        let score = config.score(name_similarity, method_matches, total_methods);

        if score >= config.confidence_threshold && score > best_score {
            best_score = score;
            best_match = Some(SuggestedMatch {
                contact_id: contact.id.clone(),
                contact_name: contact.full_name.clone(),
                confidence: score,
            });
        }
    }

    if let Some(suggested) = &best_match {
        tracing::debug!(
            "Best match for {:?}: {:?} at confidence {:.2}",
            candidate_name,
            suggested.contact_name,
            suggested.confidence
        );
    }

    best_match
}

/// Counts how many of the contact's email and phone methods the candidate
/// also carries. Chat-handle slots are not counted; import candidates carry
/// handles too rarely for them to move the score.
fn count_method_overlap(
    contact: &ContactRecord,
    candidate_emails: &HashSet<String>,
    candidate_phones: &HashSet<String>,
) -> (usize, usize) {
    let mut method_matches = 0;
    let mut total_methods = 0;

    for method in &contact.methods {
        match method.slot {
            ContactMethodSlot::EmailPersonal | ContactMethodSlot::EmailWork => {
                total_methods += 1;
                if candidate_emails.contains(&normalize_email(&method.value)) {
                    method_matches += 1;
                }
            }
            ContactMethodSlot::Phone => {
                total_methods += 1;
                if candidate_phones.contains(&normalize_phone_loose(&method.value)) {
                    method_matches += 1;
                }
            }
            ContactMethodSlot::ChatHandle | ContactMethodSlot::Whatsapp => {}
        }
    }

    (method_matches, total_methods)
}
