//! Append-only, in-memory record logs.
//!
//! A [`Log`] holds records of one shape in insertion order. Records are never
//! updated or removed by callers; a log with a [`Capacity::Window`] policy drops
//! its oldest entries once an append pushes it past the window.

mod comment;
mod error;
mod message;

use std::{
    collections::VecDeque,
    sync::{Arc, PoisonError, RwLock},
};

use time::OffsetDateTime;

pub use comment::{Comment, NewComment};
pub use error::ValidationError;
pub use message::{Message, NewMessage, MESSAGE_WINDOW};

/// How many records a log keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Unbounded,
    /// Keep only the newest `n` records.
    Window(usize),
}

/// A record shape that can live in a [`Log`].
pub trait Record: Clone + Send + Sync + 'static {
    /// What a client submits.
    type Draft;
    /// The validated, trimmed contents of a draft.
    type Fields;

    const CAPACITY: Capacity;

    fn validate(draft: Self::Draft) -> Result<Self::Fields, ValidationError>;

    /// Id following `previous`, which is 0 before the first append.
    fn next_id(previous: u64, now: OffsetDateTime) -> u64;

    fn stamp(fields: Self::Fields, id: u64, timestamp: OffsetDateTime) -> Self;
}

struct Entries<R> {
    records: VecDeque<R>,
    last_id: u64,
}

/// Shared handle to an append-only log. Clones point at the same records.
pub struct Log<R> {
    inner: Arc<RwLock<Entries<R>>>,
}

impl<R> Clone for Log<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: Record> Default for Log<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Log<R> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Entries {
                records: VecDeque::new(),
                last_id: 0,
            })),
        }
    }

    /// Every record currently held, oldest first.
    pub fn list(&self) -> Vec<R> {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries.records.iter().cloned().collect()
    }

    /// Validates `draft`, stamps it with an id and the current time, and stores it.
    ///
    /// A rejected draft leaves the log untouched.
    pub fn append(&self, draft: R::Draft) -> Result<R, ValidationError> {
        let fields = R::validate(draft)?;
        let now = OffsetDateTime::now_utc();

        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = R::next_id(entries.last_id, now);
        let record = R::stamp(fields, id, now);

        entries.last_id = id;
        entries.records.push_back(record.clone());
        if let Capacity::Window(cap) = R::CAPACITY {
            while entries.records.len() > cap {
                entries.records.pop_front();
            }
        }

        Ok(record)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trims `value`, treating absent and blank input alike.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(username: &str, text: &str) -> NewMessage {
        NewMessage {
            username: Some(username.to_owned()),
            text: Some(text.to_owned()),
        }
    }

    #[test]
    fn lists_in_insertion_order() {
        let log = Log::<Message>::new();
        for i in 0..5 {
            log.append(message("ann", &format!("msg {i}"))).unwrap();
        }

        let texts: Vec<_> = log.list().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, ["msg 0", "msg 1", "msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn rejected_draft_leaves_log_untouched() {
        let log = Log::<Message>::new();
        log.append(message("ann", "first")).unwrap();

        let err = log.append(message("   ", "second")).unwrap_err();
        assert_eq!(err.to_string(), "Username and text are required");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn message_window_drops_oldest() {
        let log = Log::<Message>::new();
        for i in 0..=MESSAGE_WINDOW {
            log.append(message("ann", &format!("msg {i}"))).unwrap();
        }

        let list = log.list();
        assert_eq!(list.len(), MESSAGE_WINDOW);
        assert_eq!(list.first().unwrap().text, "msg 1");
        assert_eq!(list.last().unwrap().text, format!("msg {MESSAGE_WINDOW}"));
    }

    #[test]
    fn comments_are_unbounded() {
        let log = Log::<Comment>::new();
        for i in 0..(MESSAGE_WINDOW * 2) {
            log.append(NewComment {
                text: Some(format!("c{i}")),
                author: Some("bob".to_owned()),
            })
            .unwrap();
        }

        assert_eq!(log.len(), MESSAGE_WINDOW * 2);
        assert_eq!(log.list()[0].id, 1);
    }

    #[test]
    fn ids_are_unique_within_a_burst() {
        let log = Log::<Message>::new();
        for i in 0..50 {
            log.append(message("ann", &i.to_string())).unwrap();
        }

        let mut ids: Vec<u64> = log.list().iter().map(|m| m.id.parse().unwrap()).collect();
        let sorted = ids.clone();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert!(sorted.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn clones_share_records() {
        let log = Log::<Comment>::new();
        let other = log.clone();
        other
            .append(NewComment {
                text: Some("hi".to_owned()),
                author: Some("Bob".to_owned()),
            })
            .unwrap();

        assert!(!log.is_empty());
        assert_eq!(log.list()[0].author, "Bob");
    }

    #[test]
    fn present_trims_and_rejects_blank() {
        assert_eq!(present(Some("  hi \n".to_owned())).as_deref(), Some("hi"));
        assert_eq!(present(Some(" \t ".to_owned())), None);
        assert_eq!(present(None), None);
    }
}
