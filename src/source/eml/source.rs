//! EML source module.
//!
//! This module reads standard internet mail messages (RFC 822 header
//! block plus optional MIME multipart body) into the canonical message
//! model.

use chrono::{Local, TimeZone, Utc};
use log::{trace, warn};
use mailparse::{DispositionType, MailHeaderMap};
use std::result;
use thiserror::Error;

use crate::{
    source::{self, Source},
    split_address_list, Attachment, Message,
};

use super::PartsIterator;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse message from raw data")]
    ParseRawEmlError(#[source] mailparse::MailParseError),
}

pub type Result<T> = result::Result<T, Error>;

/// Reads standard internet mail messages.
#[derive(Debug, Default)]
pub struct EmlSource;

impl Source for EmlSource {
    fn read(&self, raw: &[u8]) -> source::Result<Message> {
        Ok(read_eml(raw)?)
    }
}

fn read_eml(raw: &[u8]) -> Result<Message> {
    let parsed = mailparse::parse_mail(raw).map_err(Error::ParseRawEmlError)?;
    let mut msg = Message::default();

    for header in parsed.get_headers() {
        let key = header.get_key();
        let val = header.get_value();
        trace!("header {:?}: {:?}", key, val);

        match key.to_lowercase().as_str() {
            "subject" => msg.subject = Some(val),
            "message-id" => msg.message_id = Some(val),
            "date" => match mailparse::dateparse(&val) {
                Ok(timestamp) => {
                    msg.date = Some(Utc.timestamp(timestamp, 0).with_timezone(&Local))
                }
                Err(err) => {
                    warn!("cannot parse message date {:?}, skipping it", val);
                    warn!("{}", err);
                }
            },
            "from" => msg.from = split_address_list(&val),
            "to" => msg.to = split_address_list(&val),
            "cc" => msg.cc = split_address_list(&val),
            "bcc" => msg.bcc = split_address_list(&val),
            _ => (),
        }
    }

    for part in PartsIterator::new(&parsed) {
        let mimetype = part.ctype.mimetype.as_str();
        if mimetype.starts_with("multipart/") {
            continue;
        }

        let disposition = part.get_content_disposition();
        if disposition.disposition == DispositionType::Attachment {
            let filename = disposition
                .params
                .get("filename")
                .filter(|name| !name.is_empty())
                .cloned()
                .unwrap_or_else(|| Attachment::DEFAULT_FILENAME.into());

            // a part whose payload cannot be decoded is dropped, not
            // half-copied
            match part.get_body_raw() {
                Ok(body) => msg.attachments.push(Attachment {
                    filename,
                    mime: mimetype.into(),
                    body,
                }),
                Err(err) => {
                    warn!("cannot decode attachment {}, skipping it", filename);
                    warn!("{}", err);
                }
            }
            continue;
        }

        if mimetype == "text/plain" && msg.body_plain.is_none() {
            match part.get_body() {
                Ok(body) => msg.body_plain = Some(body),
                Err(err) => {
                    warn!("cannot decode text/plain part, skipping it");
                    warn!("{}", err);
                }
            }
        } else if mimetype == "text/html" && msg.body_html.is_none() {
            match part.get_body() {
                Ok(body) => msg.body_html = Some(body),
                Err(err) => {
                    warn!("cannot decode text/html part, skipping it");
                    warn!("{}", err);
                }
            }
        }
    }

    Ok(msg)
}
