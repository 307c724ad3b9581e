//! Chat turn types and the contact-card sentinel convention.
//!
//! The assistant is instructed to append [`CONTACT_CARD_SENTINEL`] to its
//! reply when the visitor asks for contact information. The relay forwards
//! replies unmodified; stripping the marker and rendering the card is the
//! consuming UI's job, via [`strip_contact_card`].

use serde::{Deserialize, Serialize};

/// Marker string the model appends when the visitor asked for contact info.
pub const CONTACT_CARD_SENTINEL: &str = "[[CONTACT_CARD]]";

/// Role of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Wire-format string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One turn of a conversation, as resent by the client on every request.
///
/// The widget has no server-side conversation state - the full history
/// rides along with each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who produced this turn.
    pub role: ChatRole,
    /// The turn's text content.
    pub content: String,
}

/// Split a model reply into display text and the contact-card flag.
///
/// Returns the reply with every occurrence of the sentinel removed (and
/// surrounding whitespace tidied), plus `true` if the sentinel was present.
#[must_use]
pub fn strip_contact_card(reply: &str) -> (String, bool) {
    if !reply.contains(CONTACT_CARD_SENTINEL) {
        return (reply.to_owned(), false);
    }
    let stripped = reply
        .split(CONTACT_CARD_SENTINEL)
        .collect::<Vec<_>>()
        .join("");
    (stripped.trim().to_owned(), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply_untouched() {
        let (text, card) = strip_contact_card("Happy to help!");
        assert_eq!(text, "Happy to help!");
        assert!(!card);
    }

    #[test]
    fn test_sentinel_detected_and_removed() {
        let (text, card) = strip_contact_card("You can reach Mara by email. [[CONTACT_CARD]]");
        assert_eq!(text, "You can reach Mara by email.");
        assert!(card);
    }

    #[test]
    fn test_sentinel_mid_text() {
        let (text, card) = strip_contact_card("Here: [[CONTACT_CARD]] ask away.");
        assert_eq!(text, "Here:  ask away.");
        assert!(card);
    }

    #[test]
    fn test_repeated_sentinel() {
        let (text, card) = strip_contact_card("[[CONTACT_CARD]][[CONTACT_CARD]]hi");
        assert_eq!(text, "hi");
        assert!(card);
    }

    #[test]
    fn test_role_wire_form() {
        assert_eq!(ChatRole::User.as_str(), "user");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
