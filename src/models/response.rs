//! Responses and their deduplication key.

use std::sync::Arc;

use crate::models::thread::Thread;
use serde::Serialize;

/// A single response (post) in a thread's message dump.
///
/// Field values are kept exactly as the board sent them:
/// the date is not parsed and the content still carries its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// The thread this response was read from.
    thread: Arc<Thread>,

    /// Sequence number within the thread.
    id: u64,

    /// Poster name.
    name: String,

    /// Poster email or trip.
    email: String,

    /// Post date, as displayed by the board.
    date: String,

    /// Post body.
    content: String,

    /// Thread title at the time of the dump.
    thread_title: String,

    /// Poster id.
    author_id: String,
}

/// Identity of a response across snapshots: its thread id and its number in that thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResponseKey {
    /// Id of the containing thread.
    pub thread_id: String,
    /// Response number within the thread.
    pub response_id: u64,
}

impl Response {
    pub(crate) fn new(thread: Arc<Thread>, id: u64, fields: [&str; 6]) -> Self {
        let [name, email, date, content, thread_title, author_id] = fields;
        Response {
            thread,
            id,
            name: name.to_string(),
            email: email.to_string(),
            date: date.to_string(),
            content: content.to_string(),
            thread_title: thread_title.to_string(),
            author_id: author_id.to_string(),
        }
    }

    /// Returns the thread this response belongs to.
    pub fn thread(&self) -> &Arc<Thread> {
        &self.thread
    }

    /// Returns the response number. `0` marks a placeholder record.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the poster's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the poster's email or trip.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the raw date string.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the raw, unsanitized body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the thread title recorded alongside the response.
    pub fn thread_title(&self) -> &str {
        &self.thread_title
    }

    /// Returns the poster's id.
    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    /// Returns the key under which this response is deduplicated.
    pub fn key(&self) -> ResponseKey {
        ResponseKey {
            thread_id: self.thread.id().to_string(),
            response_id: self.id,
        }
    }
}
