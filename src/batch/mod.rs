mod import;

pub use self::import::*;
