//! EML writer module.
//!
//! Serializes the canonical message model into the standard internet
//! mail format. Headers are emitted only when the message carries
//! them; the part tree follows [`BodyStructure`] so a message is never
//! wrapped in multipart structure it does not need.

use chrono::Local;
use log::debug;
use mail_builder::{
    headers::{address::Address, raw::Raw},
    mime::MimePart,
    MessageBuilder,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
    result,
};
use thiserror::Error;

use crate::{
    backend::{self, Writer},
    parse_single_address, Attachment, BodyStructure, Importance, Message, TextStructure,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot serialize message as eml")]
    SerializeEmlError(#[source] io::Error),
    #[error("cannot write eml file at {1}")]
    WriteEmlFileError(#[source] io::Error, PathBuf),
}

pub type Result<T> = result::Result<T, Error>;

fn to_address_list(tokens: &[String]) -> Address<'static> {
    let addrs = tokens
        .iter()
        .map(|token| {
            let (name, email) = parse_single_address(token);
            if name.is_empty() {
                Address::new_address(None::<String>, email)
            } else {
                Address::new_address(Some(name), email)
            }
        })
        .collect::<Vec<_>>();

    Address::new_list(addrs)
}

fn text_part(msg: &Message, structure: TextStructure) -> MimePart<'_> {
    match structure {
        TextStructure::Alternative => MimePart::new(
            "multipart/alternative",
            vec![
                MimePart::new("text/plain", msg.body_plain_or_empty()),
                MimePart::new("text/html", msg.body_html.as_deref().unwrap_or("")),
            ],
        ),
        TextStructure::Html => MimePart::new("text/html", msg.body_html.as_deref().unwrap_or("")),
        TextStructure::Plain => MimePart::new("text/plain", msg.body_plain_or_empty()),
    }
}

fn attachment_part(attachment: &Attachment) -> MimePart<'_> {
    let mime = if attachment.mime.is_empty() {
        Attachment::DEFAULT_MIME
    } else {
        attachment.mime.as_str()
    };

    // textual payloads are embedded as text, decoded with replacement,
    // so a broken encoding never aborts the whole message; everything
    // else goes out base64
    let part = if attachment.is_text() {
        MimePart::new(mime, String::from_utf8_lossy(&attachment.body).into_owned())
    } else {
        MimePart::new(mime, attachment.body.as_slice())
    };

    part.attachment(attachment.filename.as_str())
}

fn part_tree(msg: &Message) -> MimePart<'_> {
    let structure = BodyStructure::of(msg);
    debug!("body structure: {:?}", structure);

    match structure {
        BodyStructure::Mixed(text) => {
            let mut parts = vec![text_part(msg, text)];
            parts.extend(msg.attachments.iter().map(attachment_part));
            MimePart::new("multipart/mixed", parts)
        }
        BodyStructure::Text(text) => text_part(msg, text),
    }
}

/// Serializes a message as standard internet mail bytes.
pub fn render(msg: &Message) -> Result<Vec<u8>> {
    let mut builder = MessageBuilder::new();

    if let Some(subject) = msg.subject.as_deref() {
        builder = builder.subject(subject);
    }
    if !msg.from.is_empty() {
        builder = builder.from(to_address_list(&msg.from));
    }
    if !msg.to.is_empty() {
        builder = builder.to(to_address_list(&msg.to));
    }
    if !msg.cc.is_empty() {
        builder = builder.cc(to_address_list(&msg.cc));
    }
    if !msg.bcc.is_empty() {
        builder = builder.bcc(to_address_list(&msg.bcc));
    }

    // declared date with its local offset, else the current local time
    let date = msg.date.unwrap_or_else(Local::now);
    builder = builder.header("Date", Raw::new(date.to_rfc2822()));

    if let Some(id) = msg.message_id.as_deref() {
        builder = builder.header("Message-ID", Raw::new(id.to_owned()));
    }

    // neutral messages stay unannotated
    match msg.importance.unwrap_or_default() {
        Importance::High => {
            builder = builder
                .header("X-Priority", Raw::new("1"))
                .header("Importance", Raw::new("High"));
        }
        Importance::Low => {
            builder = builder
                .header("X-Priority", Raw::new("5"))
                .header("Importance", Raw::new("Low"));
        }
        Importance::Normal => (),
    }

    builder = builder.body(part_tree(msg));

    let eml = builder
        .write_to_string()
        .map_err(Error::SerializeEmlError)?;

    Ok(eml.into_bytes())
}

/// Writes each message to its own `.eml` file.
#[derive(Debug, Default)]
pub struct EmlWriter;

impl Writer for EmlWriter {
    fn extension(&self) -> &'static str {
        "eml"
    }

    fn write(&self, msg: &Message, path: &Path) -> backend::Result<()> {
        let eml = render(msg)?;
        fs::write(path, eml).map_err(|err| Error::WriteEmlFileError(err, path.to_owned()))?;

        Ok(())
    }
}
