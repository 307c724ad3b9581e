//! Visibility/status enums gating what appears on public read surfaces.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error parsing a status string from the database or a form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value:?}")]
pub struct StatusParseError {
    /// Which enum failed to parse ("post status" or "visibility").
    pub kind: &'static str,
    /// The offending value.
    pub value: String,
}

/// Publication status of a blog post.
///
/// Only `Published` posts appear on the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    /// Stable string form, used as the database column value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for PostStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(StatusParseError {
                kind: "post status",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility of a case study.
///
/// Only `Public` case studies appear on the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
    Archived,
}

impl Visibility {
    /// Stable string form, used as the database column value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for Visibility {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "archived" => Ok(Self::Archived),
            other => Err(StatusParseError {
                kind: "visibility",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
