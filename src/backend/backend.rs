//! Backend module.
//!
//! This module exposes the traits every destination container
//! implements, plus the aggregated error type.

use std::{path::Path, result};
use thiserror::Error;

use crate::{backend, Message};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    EmlWriterError(#[from] backend::eml::Error),
    #[error(transparent)]
    StoreBackendError(#[from] backend::store::Error),
    #[error(transparent)]
    MboxBackendError(#[from] backend::mbox::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// A destination that collects many messages under folders inside one
/// container (mail store, mailbox file).
pub trait Backend {
    /// Verifies the destination is usable at all. Meant to run once,
    /// before any per-message work.
    fn check_up(&self) -> Result<()> {
        Ok(())
    }

    /// Creates a folder, reusing an existing folder of the same name.
    fn add_folder(&self, folder: &str) -> Result<()>;

    /// Writes one message into a folder and returns its identifier
    /// within the container.
    fn add_message(&self, folder: &str, msg: &Message) -> Result<String>;
}

/// A destination that produces one output file per message.
pub trait Writer {
    /// Verifies the destination format is producible at all.
    fn check_up(&self) -> Result<()> {
        Ok(())
    }

    /// Extension of the produced files, without the dot.
    fn extension(&self) -> &'static str;

    /// Writes one message to the given path.
    fn write(&self, msg: &Message, path: &Path) -> Result<()>;
}
