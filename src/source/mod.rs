mod source;

pub mod compound;
pub mod eml;

pub use self::compound::{
    CompoundAttachment, CompoundMail, CompoundParser, CompoundSource, ParseError,
};
pub use self::eml::EmlSource;
pub use self::source::{Error, Result, Source};
