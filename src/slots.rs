//! Static mapping between identifier kinds and the CRM contact-method slots
//! they are permitted to occupy.

use crate::models::{ContactMethodSlot, IdentifierKind};

/// Every slot an identifier of this kind may occupy, in preference order.
///
/// The table only defines permission; choosing between the two email slots
/// is the email-type inferrer's job. For single-slot kinds the first entry
/// is the suggestion. A WhatsApp identifier may also match a plain phone
/// slot, since it is a phone number underneath.
pub fn slots_for(kind: IdentifierKind) -> &'static [ContactMethodSlot] {
    match kind {
        IdentifierKind::Email => &[
            ContactMethodSlot::EmailPersonal,
            ContactMethodSlot::EmailWork,
        ],
        IdentifierKind::Phone => &[ContactMethodSlot::Phone],
        IdentifierKind::ChatHandle => &[ContactMethodSlot::ChatHandle],
        IdentifierKind::Whatsapp => &[ContactMethodSlot::Whatsapp, ContactMethodSlot::Phone],
    }
}

/// The identifier kind used to normalize values stored in a slot. Needed to
/// compare stored method values against incoming candidate values.
pub fn slot_kind(slot: ContactMethodSlot) -> IdentifierKind {
    match slot {
        ContactMethodSlot::EmailPersonal | ContactMethodSlot::EmailWork => IdentifierKind::Email,
        ContactMethodSlot::Phone => IdentifierKind::Phone,
        ContactMethodSlot::ChatHandle => IdentifierKind::ChatHandle,
        ContactMethodSlot::Whatsapp => IdentifierKind::Whatsapp,
    }
}
