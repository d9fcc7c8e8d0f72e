//! Store backend module.
//!
//! This module imports messages into a bulk mail-store container
//! through the host automation session: content first, one save to
//! obtain a store identity, then the flag rewrite and its second
//! save, then the move into the destination folder.

use log::{debug, trace, warn};
use std::{
    cell::RefCell,
    env, fs, io,
    path::{Path, PathBuf},
    result,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    backend::{self, Backend},
    parse_single_address, Attachment, Message,
};

use super::flags::rewrite_as_received;
use super::session::{
    self, ItemId, PropertyValue, RecipientKind, StoreSession, PR_SENDER_EMAIL_ADDRESS,
    PR_SENDER_NAME,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot stage attachment {1}")]
    StageAttachmentError(#[source] io::Error, String),
    #[error(transparent)]
    SessionError(#[from] session::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Attachment payload staged as a temporary file so the session can
/// pick it up by path. The file and its directory are removed when
/// the guard drops, on the success and the failure path alike.
struct StagedAttachment {
    dir: PathBuf,
    path: PathBuf,
}

impl StagedAttachment {
    fn new(attachment: &Attachment) -> Result<Self> {
        let dir = env::temp_dir().join(format!("mailport-{}", Uuid::new_v4()));
        fs::create_dir(&dir)
            .map_err(|err| Error::StageAttachmentError(err, attachment.filename.clone()))?;

        let path = dir.join(&attachment.filename);
        fs::write(&path, &attachment.body)
            .map_err(|err| Error::StageAttachmentError(err, attachment.filename.clone()))?;
        trace!("staged attachment at {:?}", path);

        Ok(Self { dir, path })
    }
}

impl Drop for StagedAttachment {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            warn!("cannot remove staged attachment {:?}: {}", self.path, err);
        }
        if let Err(err) = fs::remove_dir(&self.dir) {
            warn!("cannot remove staging directory {:?}: {}", self.dir, err);
        }
    }
}

/// Builds a blank item out of a message: subject, body, sender
/// properties, recipients and attachments. Shared between the store
/// backend and the compound writer. The item is not saved here.
pub(super) fn write_item<S: StoreSession>(session: &mut S, msg: &Message) -> Result<ItemId> {
    let item = session.create_item()?;

    session.set_subject(item, msg.subject.as_deref().unwrap_or(""))?;

    // the HTML body wins when both are present, the host renders only
    // one of them
    if let Some(html) = msg.body_html.as_deref() {
        session.set_body_html(item, html)?;
    } else {
        session.set_body_plain(item, msg.body_plain_or_empty())?;
    }

    if let Some(sender) = msg.sender() {
        let (name, email) = parse_single_address(sender);
        if !name.is_empty() {
            session.set_property(item, PR_SENDER_NAME, PropertyValue::Unicode(name))?;
        }
        if !email.is_empty() {
            session.set_property(item, PR_SENDER_EMAIL_ADDRESS, PropertyValue::Unicode(email))?;
        }
    }

    for addr in &msg.to {
        session.add_recipient(item, addr, RecipientKind::To)?;
    }
    for addr in &msg.cc {
        session.add_recipient(item, addr, RecipientKind::Cc)?;
    }
    for addr in &msg.bcc {
        session.add_recipient(item, addr, RecipientKind::Bcc)?;
    }

    for attachment in &msg.attachments {
        let staged = StagedAttachment::new(attachment)?;
        session.add_attachment(item, &staged.path)?;
    }

    Ok(item)
}

/// Represents the store backend.
pub struct StoreBackend<S: StoreSession> {
    session: RefCell<S>,
}

impl<S: StoreSession> std::fmt::Debug for StoreBackend<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreBackend").finish_non_exhaustive()
    }
}

impl<S: StoreSession> StoreBackend<S> {
    /// Opens a backend over a session and creates the destination
    /// store container. Availability is verified first, so an absent
    /// host service fails here, before any message is touched.
    pub fn create(session: S, store_path: &Path) -> Result<Self> {
        session.check_up()?;

        let backend = Self {
            session: RefCell::new(session),
        };
        backend.session.borrow_mut().create_store(store_path)?;
        debug!("created store at {:?}", store_path);

        Ok(backend)
    }
}

impl<S: StoreSession> Backend for StoreBackend<S> {
    fn check_up(&self) -> backend::Result<()> {
        Ok(self
            .session
            .borrow()
            .check_up()
            .map_err(Error::SessionError)?)
    }

    fn add_folder(&self, folder: &str) -> backend::Result<()> {
        let mut session = self.session.borrow_mut();

        match session.create_folder(folder) {
            Ok(id) => {
                debug!("created folder {}: {:?}", folder, id);
                Ok(())
            }
            Err(session::Error::FolderAlreadyExistsError(_)) => {
                debug!("folder {} already exists, reusing it", folder);
                session
                    .find_folder(folder)
                    .map_err(Error::SessionError)?;
                Ok(())
            }
            Err(err) => Err(Error::SessionError(err).into()),
        }
    }

    fn add_message(&self, folder: &str, msg: &Message) -> backend::Result<String> {
        let mut session = self.session.borrow_mut();

        let folder_id = session.find_folder(folder).map_err(Error::SessionError)?;
        let item = write_item(&mut *session, msg)?;

        // first save: the item gets its store identity
        session.save(item).map_err(Error::SessionError)?;

        // flag rewrite owns the mandatory second save
        rewrite_as_received(&mut *session, item, msg.date).map_err(Error::SessionError)?;

        session
            .move_to_folder(item, folder_id)
            .map_err(Error::SessionError)?;
        debug!("imported message {:?} into folder {}", item, folder);

        Ok(item.0.to_string())
    }
}
