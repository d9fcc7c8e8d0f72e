mod backend;

pub mod eml;
pub mod mbox;
pub mod store;

pub use self::backend::{Backend, Error, Result, Writer};
pub use self::eml::EmlWriter;
pub use self::mbox::MboxBackend;
pub use self::store::{
    CompoundWriter, FolderId, ItemId, PropertyValue, RecipientKind, StoreBackend, StoreSession,
    PR_CLIENT_SUBMIT_TIME, PR_MESSAGE_DELIVERY_TIME, PR_MESSAGE_FLAGS, PR_SENDER_EMAIL_ADDRESS,
    PR_SENDER_NAME,
};
