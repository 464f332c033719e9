//! Shared types for the $BISOU frame server.

mod frame;
mod record;
mod token;

pub use frame::*;
pub use record::*;
pub use token::*;
