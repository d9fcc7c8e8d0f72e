pub mod session;

mod backend;
mod flags;
mod writer;

pub use self::backend::{Error, Result, StoreBackend};
pub use self::flags::rewrite_as_received;
pub use self::session::{
    FolderId, ItemId, PropertyValue, RecipientKind, StoreSession, PR_CLIENT_SUBMIT_TIME,
    PR_MESSAGE_DELIVERY_TIME, PR_MESSAGE_FLAGS, PR_SENDER_EMAIL_ADDRESS, PR_SENDER_NAME,
};
pub use self::writer::CompoundWriter;
