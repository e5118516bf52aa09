use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{present, Capacity, Record, ValidationError};

/// Chat history keeps this many messages.
pub const MESSAGE_WINDOW: usize = 100;

const WELCOME_AUTHOR: &str = "Mentat";
const WELCOME_TEXT: &str = "Welcome to Mentat Party! 🎉 Let the conversation begin!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Millisecond timestamp, rendered as a string.
    pub id: String,
    pub username: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewMessage {
    pub username: Option<String>,
    pub text: Option<String>,
}

impl NewMessage {
    /// The message a fresh chat room opens with.
    pub fn welcome() -> Self {
        Self {
            username: Some(WELCOME_AUTHOR.to_owned()),
            text: Some(WELCOME_TEXT.to_owned()),
        }
    }
}

impl Record for Message {
    type Draft = NewMessage;
    type Fields = (String, String);

    const CAPACITY: Capacity = Capacity::Window(MESSAGE_WINDOW);

    fn validate(
        NewMessage { username, text }: NewMessage,
    ) -> Result<Self::Fields, ValidationError> {
        match (present(username), present(text)) {
            (Some(username), Some(text)) => Ok((username, text)),
            _ => Err(ValidationError::MissingField { required: &["username", "text"] }),
        }
    }

    fn next_id(previous: u64, now: OffsetDateTime) -> u64 {
        let millis = (now.unix_timestamp_nanos() / 1_000_000).max(0) as u64;
        millis.max(previous + 1)
    }

    fn stamp((username, text): Self::Fields, id: u64, timestamp: OffsetDateTime) -> Self {
        Self {
            id: id.to_string(),
            username,
            text,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_follows_the_clock() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(Message::next_id(0, now), 1_700_000_000_000);
    }

    #[test]
    fn id_never_repeats_within_a_millisecond() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let first = Message::next_id(0, now);
        assert_eq!(Message::next_id(first, now), first + 1);
    }

    #[test]
    fn requires_both_fields() {
        let err = Message::validate(NewMessage {
            username: None,
            text: Some("x".to_owned()),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Username and text are required");
    }

    #[test]
    fn serializes_timestamp_as_rfc3339() {
        let message = Message::stamp(
            ("ann".to_owned(), "hi".to_owned()),
            42,
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["timestamp"], "1970-01-01T00:00:00Z");
    }
}
