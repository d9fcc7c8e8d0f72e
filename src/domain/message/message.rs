use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{Attachment, MessageFlags};

/// Represents the priority of a message.
///
/// Only the non-normal variants leave a trace in the produced headers,
/// so neutral messages stay unannotated.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

impl Importance {
    /// Maps the numeric importance level of compound mail objects
    /// (0 = low, 1 = normal, 2 = high).
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Low,
            2 => Self::High,
            _ => Self::Normal,
        }
    }
}

/// Representation of a message.
///
/// This is the canonical pivot between all container formats: every
/// conversion parses its input into a [`Message`], hands it to exactly
/// one destination writer and discards it.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub subject: Option<String>,
    /// Address tokens in input order, duplicates kept.
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    /// Declared date; writers stamp the current local time when absent.
    pub date: Option<DateTime<Local>>,
    pub message_id: Option<String>,
    pub body_plain: Option<String>,
    pub body_html: Option<String>,
    pub attachments: Vec<Attachment>,
    pub importance: Option<Importance>,
    /// Store-level state, absent for header-only source formats.
    pub flags: Option<MessageFlags>,
}

impl Message {
    /// Returns the plain body, treating a message without any body as
    /// carrying an empty plain one.
    pub fn body_plain_or_empty(&self) -> &str {
        self.body_plain.as_deref().unwrap_or("")
    }

    /// Returns the first sender token, if any.
    pub fn sender(&self) -> Option<&str> {
        self.from.first().map(String::as_str)
    }
}
