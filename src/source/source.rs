//! Source module.
//!
//! This module exposes the source trait, implemented by every input
//! format a conversion can start from.

use std::result;
use thiserror::Error;

use crate::{source, Message};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    CompoundSourceError(#[from] source::compound::Error),
    #[error(transparent)]
    EmlSourceError(#[from] source::eml::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Reads raw container bytes into the canonical message model.
pub trait Source {
    fn read(&self, raw: &[u8]) -> Result<Message>;
}
