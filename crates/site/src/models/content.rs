//! Content entity structs and their write payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use atelier_core::{
    Email, GoalId, MediaId, PostId, PostStatus, Progress, Slug, SubmissionId, Visibility, WorkId,
};

/// A blog post.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    /// Rich-text body as an HTML string; the editor owns its shape.
    pub content: String,
    pub image_url: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a post. Identity and timestamps are store-assigned.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub image_url: Option<String>,
    pub status: PostStatus,
}

/// Full replacement field set for updating a post (last writer wins).
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub image_url: Option<String>,
    pub status: PostStatus,
}

/// A case study shown on the work page.
#[derive(Debug, Clone, Serialize)]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    pub slug: Slug,
    /// Ordered technology list, as entered in the admin form.
    pub tech_stack: Vec<String>,
    pub description: String,
    pub visibility: Visibility,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a case study.
#[derive(Debug, Clone)]
pub struct NewWork {
    pub title: String,
    pub slug: Slug,
    pub tech_stack: Vec<String>,
    pub description: String,
    pub visibility: Visibility,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

/// Full replacement field set for updating a case study.
#[derive(Debug, Clone)]
pub struct WorkChanges {
    pub title: String,
    pub slug: Slug,
    pub tech_stack: Vec<String>,
    pub description: String,
    pub visibility: Visibility,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

/// A checklist goal.
#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub progress: Progress,
    /// Free-text grouping key for the checklist page.
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub title: String,
    pub progress: Progress,
    pub category: String,
}

/// Full replacement field set for updating a goal.
#[derive(Debug, Clone)]
pub struct GoalChanges {
    pub title: String,
    pub progress: Progress,
    pub category: String,
}

/// An uploaded media record. The bytes live with the hosting provider;
/// this is only the bookkeeping row.
#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub id: MediaId,
    pub url: String,
    pub name: String,
    /// Mime/category string, e.g. "image/png".
    pub kind: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields for recording an upload.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub url: String,
    pub name: String,
    pub kind: String,
    pub size_bytes: i64,
}

/// A contact form submission. Write-once from the public surface.
#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub id: SubmissionId,
    pub name: String,
    pub email: Email,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new submission, already validated by the contact route.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: Email,
    pub message: String,
}
