//! Turns human-confirmed method selections into a storage-neutral merge
//! plan. The decision layer collects one selection per candidate value the
//! user wants to keep, plus a resolution for every conflicted value; this
//! module validates the selections against the candidate and the contact's
//! current methods and emits the actions the persistence collaborator
//! should take.

use crate::models::{
    ConflictResolution, ContactMethodSlot, ExistingMethod, ExternalCandidate, MergeAction,
    MergePlan, MethodSelection,
};
use crate::normalize::normalize;
use crate::slots::slot_kind;
use std::collections::{HashMap, HashSet};

/// Plans a confirmed merge of selected candidate values onto a contact.
///
/// Selections are processed in order. A selection naming a value that does
/// not exist on the candidate is rejected with a message rather than acted
/// on. A value the contact already carries (compared normalized) produces
/// no action. A selection for an occupied slot consults `resolutions` for
/// that value: `UseExternal` replaces the stored value, anything else keeps
/// it. When several selections target one slot, the first wins. Everything
/// else becomes an add into the open slot.
pub fn plan_merge(
    candidate: &ExternalCandidate,
    existing: &[ExistingMethod],
    selections: &[MethodSelection],
    resolutions: &HashMap<String, ConflictResolution>,
) -> MergePlan {
    let available: HashSet<&str> = candidate
        .emails
        .iter()
        .chain(&candidate.phones)
        .chain(&candidate.handles)
        .map(|raw| raw.value.as_str())
        .collect();

    let existing_by_slot: HashMap<ContactMethodSlot, &ExistingMethod> =
        existing.iter().map(|m| (m.slot, m)).collect();
    let mut existing_normalized: HashSet<String> = existing
        .iter()
        .map(|m| normalize(&m.value, slot_kind(m.slot)))
        .collect();

    let mut plan = MergePlan::default();
    let mut filled: HashSet<ContactMethodSlot> = HashSet::new();

    for selection in selections {
        if !available.contains(selection.original_value.as_str()) {
            tracing::warn!(
                "Selected value {:?} not found on candidate; skipping",
                selection.original_value
            );
            plan.rejected.push(format!(
                "value {:?} not found in external contact",
                selection.original_value
            ));
            continue;
        }

        let normalized = normalize(&selection.original_value, slot_kind(selection.slot));
        if existing_normalized.contains(&normalized) {
            // The contact already carries this value; nothing to do.
            continue;
        }

        if filled.contains(&selection.slot) {
            // A previous selection already decided this slot.
            continue;
        }

        if let Some(method) = existing_by_slot.get(&selection.slot) {
            match resolutions.get(&selection.original_value) {
                Some(ConflictResolution::UseExternal) => {
                    plan.actions.push(MergeAction::Replace {
                        method_id: method.id.clone(),
                        slot: selection.slot,
                        value: selection.original_value.clone(),
                    });
                }
                _ => {
                    plan.actions.push(MergeAction::Keep {
                        method_id: method.id.clone(),
                    });
                }
            }
            filled.insert(selection.slot);
            continue;
        }

        plan.actions.push(MergeAction::Add {
            slot: selection.slot,
            value: selection.original_value.clone(),
        });
        filled.insert(selection.slot);
        existing_normalized.insert(normalized);
    }

    plan
}
