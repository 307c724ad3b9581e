//! Domain models for the content entities.
//!
//! The model is flat: no content entity references another. Everything is
//! owned by the Postgres store; these structs are what the repositories
//! hand back after row conversion.

pub mod content;

pub use content::{
    ContactSubmission, Goal, GoalChanges, MediaItem, NewGoal, NewMedia, NewPost, NewSubmission,
    NewWork, Post, PostChanges, Work, WorkChanges,
};
