//! Body structure module.
//!
//! This module decides the MIME part-tree shape of an outgoing message
//! from the presence of its bodies and attachments.

use crate::Message;

/// Shape of the textual body of a message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TextStructure {
    /// Plain and HTML bodies side by side in an alternative container.
    Alternative,
    /// A single HTML body.
    Html,
    /// A single plain text body, possibly empty.
    Plain,
}

/// Shape of the whole MIME part tree.
///
/// Selection is minimal-nesting: a message is never wrapped in
/// multipart structure it does not need, since some receiving clients
/// render superfluous alternative wrappers inconsistently. An
/// alternative container can never end up inside another one.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BodyStructure {
    /// Top-level mixed container holding the body part plus the
    /// attachment parts.
    Mixed(TextStructure),
    /// No attachments: the body stands alone.
    Text(TextStructure),
}

impl BodyStructure {
    pub fn select(has_plain: bool, has_html: bool, has_attachments: bool) -> Self {
        let text = match (has_plain, has_html) {
            (true, true) => TextStructure::Alternative,
            (false, true) => TextStructure::Html,
            // no body at all is treated as an empty plain body
            _ => TextStructure::Plain,
        };

        if has_attachments {
            Self::Mixed(text)
        } else {
            Self::Text(text)
        }
    }

    pub fn of(msg: &Message) -> Self {
        Self::select(
            msg.body_plain.is_some(),
            msg.body_html.is_some(),
            !msg.attachments.is_empty(),
        )
    }
}
