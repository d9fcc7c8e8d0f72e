mod parts;
mod source;

pub use self::parts::PartsIterator;
pub use self::source::{EmlSource, Error, Result};
