use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{present, Capacity, Record, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub text: String,
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewComment {
    pub text: Option<String>,
    pub author: Option<String>,
}

impl Record for Comment {
    type Draft = NewComment;
    type Fields = (String, String);

    const CAPACITY: Capacity = Capacity::Unbounded;

    fn validate(NewComment { text, author }: NewComment) -> Result<Self::Fields, ValidationError> {
        match (present(text), present(author)) {
            (Some(text), Some(author)) => Ok((text, author)),
            _ => Err(ValidationError::MissingField { required: &["text", "author"] }),
        }
    }

    fn next_id(previous: u64, _now: OffsetDateTime) -> u64 {
        previous + 1
    }

    fn stamp((text, author): Self::Fields, id: u64, timestamp: OffsetDateTime) -> Self {
        Self {
            id,
            text,
            author,
            timestamp,
        }
    }
}
