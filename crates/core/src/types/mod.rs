//! Core type definitions shared across the workspace.

pub mod chat;
pub mod email;
pub mod id;
pub mod progress;
pub mod slug;
pub mod status;

pub use chat::{CONTACT_CARD_SENTINEL, ChatRole, ChatTurn, strip_contact_card};
pub use email::{Email, EmailError};
pub use id::{GoalId, MediaId, PostId, SubmissionId, WorkId};
pub use progress::{Progress, ProgressError};
pub use slug::{Slug, SlugError};
pub use status::{PostStatus, StatusParseError, Visibility};
