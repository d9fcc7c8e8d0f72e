pub mod domain;
pub use domain::*;

pub mod source;
pub use source::{
    CompoundAttachment, CompoundMail, CompoundParser, CompoundSource, EmlSource, ParseError,
    Source,
};

pub mod backend;
pub use backend::{
    Backend, CompoundWriter, EmlWriter, FolderId, ItemId, MboxBackend, PropertyValue,
    RecipientKind, StoreBackend, StoreSession, Writer, PR_CLIENT_SUBMIT_TIME,
    PR_MESSAGE_DELIVERY_TIME, PR_MESSAGE_FLAGS, PR_SENDER_EMAIL_ADDRESS, PR_SENDER_NAME,
};

pub mod batch;
pub use batch::{find_inputs, generate_folder_name, BatchFailure, BatchImporter, BatchReport};
