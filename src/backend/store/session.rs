//! Store session module.
//!
//! Boundary to the host automation service that physically owns the
//! bulk mail-store container. This crate drives a session through the
//! operations below; it never writes store bytes itself. A session is
//! single-threaded, so one destination container has exactly one
//! writer at a time.

use chrono::{DateTime, Local};
use std::{path::Path, result};
use thiserror::Error;

/// Store property tag for the message flag bitmask.
pub const PR_MESSAGE_FLAGS: &str = "http://schemas.microsoft.com/mapi/proptag/0x0E070003";

/// Store property tag for the delivery time.
pub const PR_MESSAGE_DELIVERY_TIME: &str =
    "http://schemas.microsoft.com/mapi/proptag/0x0E060040";

/// Store property tag for the client submit time.
pub const PR_CLIENT_SUBMIT_TIME: &str = "http://schemas.microsoft.com/mapi/proptag/0x00390040";

/// Store property tag for the sender display name.
pub const PR_SENDER_NAME: &str = "http://schemas.microsoft.com/mapi/proptag/0x0C1A001F";

/// Store property tag for the sender email address.
pub const PR_SENDER_EMAIL_ADDRESS: &str =
    "http://schemas.microsoft.com/mapi/proptag/0x0C1F001F";

#[derive(Debug, Error)]
pub enum Error {
    #[error("store service unavailable: {0}")]
    UnavailableError(String),
    #[error("folder {0} already exists")]
    FolderAlreadyExistsError(String),
    #[error("cannot find folder {0}")]
    FindFolderError(String),
    #[error("cannot find item {0}")]
    FindItemError(u64),
    #[error("store operation failed: {0}")]
    OperationError(String),
}

pub type Result<T> = result::Result<T, Error>;

/// Handle of a message item within a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ItemId(pub u64);

/// Handle of a folder within a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FolderId(pub u64);

/// Recipient kinds of the host item model.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RecipientKind {
    To,
    Cc,
    Bcc,
}

/// Value of a named store property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Long(u32),
    Time(DateTime<Local>),
    Unicode(String),
}

/// Session with the host automation service.
///
/// Two-phase save contract: the flag and time properties of an item
/// are unobservable and unsettable before the first [`save`], which
/// assigns the item its store identity, and a second [`save`] is
/// mandatory for later property changes to persist.
///
/// [`save`]: StoreSession::save
pub trait StoreSession {
    /// Availability probe, run once before any per-message work. An
    /// absent host platform or application surfaces here as
    /// [`Error::UnavailableError`], never as a per-message failure.
    fn check_up(&self) -> Result<()>;

    /// Creates a fresh store container file at the given path and
    /// scopes the session to it.
    fn create_store(&mut self, path: &Path) -> Result<()>;

    /// Creates a folder under the store root.
    fn create_folder(&mut self, name: &str) -> Result<FolderId>;

    /// Opens an existing folder under the store root.
    fn find_folder(&self, name: &str) -> Result<FolderId>;

    /// Creates a blank message item. The host always creates it as an
    /// unsent draft.
    fn create_item(&mut self) -> Result<ItemId>;

    fn set_subject(&mut self, item: ItemId, subject: &str) -> Result<()>;
    fn set_body_plain(&mut self, item: ItemId, body: &str) -> Result<()>;
    fn set_body_html(&mut self, item: ItemId, body: &str) -> Result<()>;
    fn add_recipient(&mut self, item: ItemId, addr: &str, kind: RecipientKind) -> Result<()>;

    /// Attaches the file at the given path to the item. The path only
    /// has to live until this call returns.
    fn add_attachment(&mut self, item: ItemId, path: &Path) -> Result<()>;

    fn save(&mut self, item: ItemId) -> Result<()>;

    fn get_property(&self, item: ItemId, tag: &str) -> Result<Option<PropertyValue>>;
    fn set_property(&mut self, item: ItemId, tag: &str, value: PropertyValue) -> Result<()>;

    fn move_to_folder(&mut self, item: ItemId, folder: FolderId) -> Result<()>;

    /// Saves the item as a standalone compound mail file.
    fn save_as_compound(&mut self, item: ItemId, path: &Path) -> Result<()>;
}
