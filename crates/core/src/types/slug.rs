//! URL-safe slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty (or empty after normalization).
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters outside `[a-z0-9-]`, or has leading,
    /// trailing, or doubled hyphens.
    #[error("slug must be lowercase alphanumeric with single hyphens: {0:?}")]
    NotCanonical(String),
}

/// Maximum slug length. Generous for titles, short enough for sane URLs.
const MAX_SLUG_LENGTH: usize = 200;

/// A URL-safe content identifier, distinct from the record's primary id.
///
/// A canonical slug is non-empty, at most 200 characters, and consists of
/// lowercase ASCII alphanumerics separated by single hyphens with no hyphen
/// at either end.
///
/// ## Examples
///
/// ```
/// use atelier_core::Slug;
///
/// assert!(Slug::parse("hello-world").is_ok());
/// assert!(Slug::parse("Hello World").is_err()); // not canonical
///
/// // Derivation normalizes a free-form title:
/// assert_eq!(Slug::derive("  Hello   World! ").unwrap().as_str(), "hello-world");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Parse a string that is expected to already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if the input is empty, too long, or not canonical.
    pub fn parse(input: &str) -> Result<Self, SlugError> {
        if input.is_empty() {
            return Err(SlugError::Empty);
        }
        if input.len() > MAX_SLUG_LENGTH {
            return Err(SlugError::TooLong {
                max: MAX_SLUG_LENGTH,
            });
        }
        let canonical = input.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
            && !input.starts_with('-')
            && !input.ends_with('-')
            && !input.contains("--");
        if !canonical {
            return Err(SlugError::NotCanonical(input.to_owned()));
        }
        Ok(Self(input.to_owned()))
    }

    /// Derive a canonical slug from a free-form title.
    ///
    /// Lowercases, trims, treats runs of whitespace, hyphens, and
    /// underscores as a single separator hyphen, and drops everything else.
    /// Underscores become hyphens rather than surviving, so the output is
    /// always canonical under [`Slug::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] if nothing survives normalization
    /// (e.g., a title made entirely of punctuation), or
    /// [`SlugError::TooLong`] if the result exceeds the length limit.
    pub fn derive(title: &str) -> Result<Self, SlugError> {
        let mut out = String::with_capacity(title.len());
        let mut pending_hyphen = false;

        for c in title.trim().to_lowercase().chars() {
            if c.is_whitespace() || c == '-' || c == '_' {
                pending_hyphen = !out.is_empty();
            } else if c.is_ascii_alphanumeric() {
                if pending_hyphen {
                    out.push('-');
                    pending_hyphen = false;
                }
                out.push(c);
            }
            // Anything else (punctuation, symbols) is dropped.
        }

        if out.is_empty() {
            return Err(SlugError::Empty);
        }
        if out.len() > MAX_SLUG_LENGTH {
            return Err(SlugError::TooLong {
                max: MAX_SLUG_LENGTH,
            });
        }
        Ok(Self(out))
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        assert_eq!(Slug::parse("hello-world").unwrap().as_str(), "hello-world");
        assert_eq!(Slug::parse("v2").unwrap().as_str(), "v2");
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        assert!(matches!(
            Slug::parse("Hello-World"),
            Err(SlugError::NotCanonical(_))
        ));
        assert!(matches!(
            Slug::parse("hello world"),
            Err(SlugError::NotCanonical(_))
        ));
        assert!(matches!(
            Slug::parse("-leading"),
            Err(SlugError::NotCanonical(_))
        ));
        assert!(matches!(
            Slug::parse("trailing-"),
            Err(SlugError::NotCanonical(_))
        ));
        assert!(matches!(
            Slug::parse("double--hyphen"),
            Err(SlugError::NotCanonical(_))
        ));
    }

    #[test]
    fn test_derive_normalizes_title() {
        // Leading/trailing trimmed, internal runs collapsed, punctuation stripped.
        assert_eq!(
            Slug::derive("  Hello   World! ").unwrap().as_str(),
            "hello-world"
        );
    }

    #[test]
    fn test_derive_collapses_hyphen_runs() {
        assert_eq!(
            Slug::derive("rust -- the good parts").unwrap().as_str(),
            "rust-the-good-parts"
        );
        assert_eq!(Slug::derive("a_b-c d").unwrap().as_str(), "a-b-c-d");
    }

    #[test]
    fn test_derive_canonicalizes_underscores_to_hyphens() {
        // Underscores act as separators, not slug characters; the derived
        // form must always round-trip through parse.
        let derived = Slug::derive("snake_case_title").unwrap();
        assert_eq!(derived.as_str(), "snake-case-title");
        assert!(Slug::parse(derived.as_str()).is_ok());
        assert_eq!(Slug::derive("a __ b").unwrap().as_str(), "a-b");
    }

    #[test]
    fn test_derive_strips_edge_punctuation() {
        assert_eq!(Slug::derive("...Ship It!!!").unwrap().as_str(), "ship-it");
        assert_eq!(Slug::derive("2024 in review").unwrap().as_str(), "2024-in-review");
    }

    #[test]
    fn test_derive_empty_after_normalization() {
        assert_eq!(Slug::derive("!!! ???"), Err(SlugError::Empty));
        assert_eq!(Slug::derive(""), Err(SlugError::Empty));
    }

    #[test]
    fn test_derived_slug_is_parseable() {
        let derived = Slug::derive("A Fairly Normal Title").unwrap();
        assert!(Slug::parse(derived.as_str()).is_ok());
    }
}
