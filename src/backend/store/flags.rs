//! Store flag rewriting module.
//!
//! The host automation service marks every item it creates as an
//! unsent draft. This module rewrites the flag bitmask and the time
//! properties of a freshly saved item so it reads as a genuinely
//! received message instead.

use chrono::{DateTime, Local};
use log::debug;

use crate::StoreFlags;

use super::session::{
    self, ItemId, PropertyValue, StoreSession, PR_CLIENT_SUBMIT_TIME, PR_MESSAGE_DELIVERY_TIME,
    PR_MESSAGE_FLAGS,
};

/// Marks a saved item received: unsent cleared, read set, delivery and
/// submit times pinned to the declared date when there is one (absent
/// or unparseable dates leave the store-assigned creation times).
///
/// The item must have been saved once already. Flags are not settable
/// at construction time, and the save at the end of this function is
/// what persists them. Applying the rewrite twice ends in the same
/// bitmask as applying it once.
pub fn rewrite_as_received<S: StoreSession>(
    session: &mut S,
    item: ItemId,
    date: Option<DateTime<Local>>,
) -> session::Result<()> {
    let current = match session.get_property(item, PR_MESSAGE_FLAGS) {
        Ok(Some(PropertyValue::Long(bits))) => StoreFlags::new(bits),
        // unreadable flags are assumed to be the fresh-draft default
        _ => StoreFlags::default(),
    };

    let next = current.as_received();
    debug!("message flags: {} -> {}", current, next);
    session.set_property(item, PR_MESSAGE_FLAGS, PropertyValue::Long(next.bits()))?;

    if let Some(date) = date {
        debug!("delivery and submit time: {}", date.to_rfc2822());
        session.set_property(item, PR_MESSAGE_DELIVERY_TIME, PropertyValue::Time(date))?;
        session.set_property(item, PR_CLIENT_SUBMIT_TIME, PropertyValue::Time(date))?;
    }

    session.save(item)
}
