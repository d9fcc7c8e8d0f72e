//! Compound writer module.
//!
//! Saves single messages as standalone compound mail files through
//! the host automation session. No flag rewriting happens on this
//! path: a direct save-as keeps whatever state the host assigns.

use log::debug;
use std::{cell::RefCell, path::Path};

use crate::{
    backend::{self, Writer},
    Message,
};

use super::backend::{write_item, Error};
use super::session::StoreSession;

/// Writes each message to its own compound mail file.
pub struct CompoundWriter<S: StoreSession> {
    session: RefCell<S>,
}

impl<S: StoreSession> std::fmt::Debug for CompoundWriter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompoundWriter").finish_non_exhaustive()
    }
}

impl<S: StoreSession> CompoundWriter<S> {
    /// Wraps a session, verifying its availability first.
    pub fn new(session: S) -> super::Result<Self> {
        session.check_up()?;

        Ok(Self {
            session: RefCell::new(session),
        })
    }
}

impl<S: StoreSession> Writer for CompoundWriter<S> {
    fn check_up(&self) -> backend::Result<()> {
        Ok(self
            .session
            .borrow()
            .check_up()
            .map_err(Error::SessionError)?)
    }

    fn extension(&self) -> &'static str {
        "msg"
    }

    fn write(&self, msg: &Message, path: &Path) -> backend::Result<()> {
        let mut session = self.session.borrow_mut();

        let item = write_item(&mut *session, msg)?;
        session
            .save_as_compound(item, path)
            .map_err(Error::SessionError)?;
        debug!("saved compound mail file at {:?}", path);

        Ok(())
    }
}
