//! Outbound service clients.

pub mod chat;
pub mod email;

pub use chat::{ChatClient, ChatError};
pub use email::{EmailError, EmailService};
