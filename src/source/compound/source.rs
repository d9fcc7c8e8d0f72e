//! Compound mail source module.
//!
//! Reading the proprietary compound-document mail object is delegated
//! to an external parser. This module defines that boundary and maps
//! its structured result onto the canonical message model.

use chrono::{DateTime, Local};
use log::{debug, warn};
use std::result;
use thiserror::Error;

use crate::{
    source::{self, Source},
    split_address_list, Attachment, Importance, Message, MessageFlags,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("not a genuine compound mail file: {0}")]
    NotACompoundFileError(String),
    #[error("cannot open compound mail file: {0}")]
    OpenCompoundFileError(String),
}

pub type Result<T> = result::Result<T, Error>;

/// Failure modes the external parser must distinguish: bytes that are
/// not a compound document at all (a renamed extension, typically)
/// versus a genuine document whose content cannot be read.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not a compound document: {0}")]
    NotACompoundFile(String),
    #[error("unsupported compound content: {0}")]
    Unsupported(String),
}

/// Structured message returned by the external compound parser.
#[derive(Debug, Clone, Default)]
pub struct CompoundMail {
    pub subject: Option<String>,
    /// Sender in `name <email>` or bare email form.
    pub sender: Option<String>,
    /// Recipient lists as raw address-list header values.
    pub to: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub date: Option<DateTime<Local>>,
    pub message_id: Option<String>,
    pub body_plain: Option<String>,
    pub body_html: Option<String>,
    /// Numeric importance level (0 = low, 1 = normal, 2 = high).
    pub importance: Option<u8>,
    pub read: Option<bool>,
    pub draft: Option<bool>,
    pub attachments: Vec<CompoundAttachment>,
}

/// Attachment entry returned by the external compound parser.
///
/// `payload: None` is the defined "unavailable" outcome. Probing
/// alternative data fields of the underlying document is the parser's
/// business and ends at this boundary.
#[derive(Debug, Clone, Default)]
pub struct CompoundAttachment {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub payload: Option<Vec<u8>>,
}

/// Boundary to the external compound-document parsing service.
pub trait CompoundParser {
    fn parse(&self, raw: &[u8]) -> result::Result<CompoundMail, ParseError>;
}

/// Reads compound mail objects through an external parser.
pub struct CompoundSource<P: CompoundParser> {
    parser: P,
}

impl<P: CompoundParser> CompoundSource<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: CompoundParser> Source for CompoundSource<P> {
    fn read(&self, raw: &[u8]) -> source::Result<Message> {
        let mail = self.parser.parse(raw).map_err(|err| match err {
            ParseError::NotACompoundFile(reason) => Error::NotACompoundFileError(reason),
            ParseError::Unsupported(reason) => Error::OpenCompoundFileError(reason),
        })?;

        Ok(from_compound_mail(mail))
    }
}

/// Maps the parser's structured result onto the canonical model.
/// Attachments whose payload is unavailable are dropped here, with a
/// warning, so the rest of the message still converts.
pub fn from_compound_mail(mail: CompoundMail) -> Message {
    let mut msg = Message {
        subject: mail.subject,
        from: mail.sender.map(split_address_list).unwrap_or_default(),
        to: mail.to.map(split_address_list).unwrap_or_default(),
        cc: mail.cc.map(split_address_list).unwrap_or_default(),
        bcc: mail.bcc.map(split_address_list).unwrap_or_default(),
        date: mail.date,
        message_id: mail.message_id,
        body_plain: mail.body_plain,
        body_html: mail.body_html,
        importance: mail.importance.map(Importance::from_level),
        ..Message::default()
    };

    if mail.read.is_some() || mail.draft.is_some() {
        msg.flags = Some(MessageFlags {
            read: mail.read.unwrap_or_default(),
            draft: mail.draft.unwrap_or_default(),
        });
    }

    for attachment in mail.attachments {
        let filename = attachment
            .filename
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| Attachment::DEFAULT_FILENAME.into());

        match attachment.payload {
            Some(body) => msg.attachments.push(Attachment {
                filename,
                mime: attachment
                    .content_type
                    .filter(|mime| !mime.is_empty())
                    .unwrap_or_else(|| Attachment::DEFAULT_MIME.into()),
                body,
            }),
            None => warn!("no payload for attachment {}, skipping it", filename),
        }
    }
    debug!("attachments kept: {}", msg.attachments.len());

    msg
}
