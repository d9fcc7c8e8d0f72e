pub mod flag;
pub use flag::*;

pub mod message;
pub use message::*;
