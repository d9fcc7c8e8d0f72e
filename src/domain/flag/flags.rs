use serde::Serialize;
use std::fmt;

/// Bit marking a store message as read.
pub const MSGFLAG_READ: u32 = 0x0001;

/// Bit marking a store message as unsent, i.e. a draft still open for
/// composition.
pub const MSGFLAG_UNSENT: u32 = 0x0008;

/// Store-level state carried by a source message.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct MessageFlags {
    pub read: bool,
    pub draft: bool,
}

/// Typed view over the store flag bitmask.
///
/// Store items encode their state in a single integer property. The
/// bits this crate rewrites get named predicates and transitions, so
/// the receive rewrite stays a pair of idempotent bit operations and
/// unrelated bits pass through untouched.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct StoreFlags(u32);

impl StoreFlags {
    pub fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_read(self) -> bool {
        self.0 & MSGFLAG_READ != 0
    }

    pub fn is_unsent(self) -> bool {
        self.0 & MSGFLAG_UNSENT != 0
    }

    pub fn mark_read(self) -> Self {
        Self(self.0 | MSGFLAG_READ)
    }

    pub fn clear_unsent(self) -> Self {
        Self(self.0 & !MSGFLAG_UNSENT)
    }

    /// State of a genuinely received message: not unsent, read.
    pub fn as_received(self) -> Self {
        self.clear_unsent().mark_read()
    }
}

/// A freshly created store item is an unsent draft. This is also the
/// fallback when the flag property cannot be read back.
impl Default for StoreFlags {
    fn default() -> Self {
        Self(MSGFLAG_UNSENT)
    }
}

impl From<u32> for StoreFlags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for StoreFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

#[cfg(test)]
mod test_store_flags {
    use super::{StoreFlags, MSGFLAG_READ, MSGFLAG_UNSENT};

    #[test]
    fn test_fresh_item_is_an_unsent_draft() {
        let flags = StoreFlags::default();

        assert!(flags.is_unsent());
        assert!(!flags.is_read());
    }

    #[test]
    fn test_as_received_clears_unsent_and_sets_read() {
        let received = StoreFlags::default().as_received();

        assert!(!received.is_unsent());
        assert!(received.is_read());
        assert_eq!(MSGFLAG_READ, received.bits());
    }

    #[test]
    fn test_as_received_is_idempotent() {
        let once = StoreFlags::new(MSGFLAG_UNSENT | 0x0100).as_received();
        let twice = once.as_received();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unrelated_bits_pass_through() {
        let received = StoreFlags::new(0x0200 | MSGFLAG_UNSENT).as_received();

        assert_eq!(0x0200 | MSGFLAG_READ, received.bits());
    }
}
