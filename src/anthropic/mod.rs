pub mod messages;

pub use messages::{ChatMessage, Role, complete};
