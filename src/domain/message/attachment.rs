/// Represents a message attachment.
///
/// The payload is always present: source entries whose payload cannot
/// be retrieved are dropped at the source boundary and never reach
/// this type.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub mime: String,
    pub body: Vec<u8>,
}

impl Attachment {
    /// Content type used when the source declares none.
    pub const DEFAULT_MIME: &'static str = "application/octet-stream";

    /// Filename used when the source exposes none.
    pub const DEFAULT_FILENAME: &'static str = "attachment";

    pub fn is_text(&self) -> bool {
        self.mime.starts_with("text/")
    }
}
