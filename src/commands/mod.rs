//! CLI command implementations.

pub mod message;
pub mod search;
pub mod sold;

pub use message::{Button, MessageCommand};
pub use search::SearchCommand;
pub use sold::SoldCommand;
