//! Mbox backend module.
//!
//! Append-only mailbox container, the cross-platform fallback used
//! when the host automation service is unavailable. Messages are
//! preserved as plain internet mail; per-message store flags do not
//! exist in this format.

use chrono::Local;
use log::debug;
use std::{
    cell::Cell,
    fs::OpenOptions,
    io::{self, Write as _},
    path::PathBuf,
    result,
};
use thiserror::Error;

use crate::{
    backend::{self, eml, Backend},
    parse_single_address, Message,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open mbox file at {1}")]
    OpenMboxFileError(#[source] io::Error, PathBuf),
    #[error("cannot append message to mbox file at {1}")]
    AppendMessageError(#[source] io::Error, PathBuf),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the mbox backend.
pub struct MboxBackend {
    path: PathBuf,
    count: Cell<u64>,
}

impl MboxBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            count: Cell::new(0),
        }
    }
}

impl Backend for MboxBackend {
    /// Folders do not exist in an mbox container. Creation is
    /// accepted and ignored so batches stay destination-agnostic.
    fn add_folder(&self, _folder: &str) -> backend::Result<()> {
        Ok(())
    }

    fn add_message(&self, _folder: &str, msg: &Message) -> backend::Result<String> {
        let raw = eml::render(msg)?;

        let from = msg
            .sender()
            .map(|sender| parse_single_address(sender).1)
            .filter(|addr| !addr.is_empty())
            .unwrap_or_else(|| "MAILER-DAEMON".into());
        let date = msg
            .date
            .unwrap_or_else(Local::now)
            .format("%a %b %d %H:%M:%S %Y");

        let mut out = Vec::with_capacity(raw.len() + 64);
        out.extend_from_slice(format!("From {} {}\n", from, date).as_bytes());

        // lines starting with "From " inside the body get the usual
        // ">" escape so readers do not mistake them for separators
        let mut in_body = false;
        for line in raw.split(|&b| b == b'\n') {
            if !in_body && (line.is_empty() || line == b"\r") {
                in_body = true;
            }
            if in_body && line.starts_with(b"From ") {
                out.push(b'>');
            }
            out.extend_from_slice(line);
            out.push(b'\n');
        }
        out.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| Error::OpenMboxFileError(err, self.path.clone()))?;
        file.write_all(&out)
            .map_err(|err| Error::AppendMessageError(err, self.path.clone()))?;

        let id = self.count.get() + 1;
        self.count.set(id);
        debug!("appended message {} to mbox at {:?}", id, self.path);

        Ok(id.to_string())
    }
}
