mod backend;

pub use self::backend::*;
