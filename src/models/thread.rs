//! Threads and their message dumps.

use std::sync::Arc;

use crate::{
    error::Error::MalformedResponse,
    models::{board::Board, response::Response},
    parse::parse_response,
    result::Result,
    FetchLines,
};
use serde::Serialize;

/// One thread as it appeared in a board listing.
///
/// A `Thread` is a snapshot: fetching the listing again yields new values,
/// possibly with a different [`num_responses`](Thread::num_responses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thread {
    /// The board listing this thread.
    board: Board,

    /// Numeric thread id, unique within the board.
    id: String,

    /// Thread title as listed.
    title: String,

    /// Response count reported by the listing.
    num_responses: u64,
}

impl Thread {
    /// Constructs a thread of `board` without fetching anything.
    pub fn new(board: Board, id: &str, title: &str, num_responses: u64) -> Self {
        Thread {
            board,
            id: id.to_string(),
            title: title.to_string(),
            num_responses,
        }
    }

    /// Returns the board this thread belongs to.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the thread id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the thread title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the number of responses the listing reported.
    pub fn num_responses(&self) -> u64 {
        self.num_responses
    }

    /// Returns the URL of the thread's raw message dump.
    pub fn url(&self) -> String {
        self.board.thread_url(&self.id)
    }

    /// Fetches every response of the thread.
    ///
    /// Responses are returned in the order of the dump; they are not re-sorted.
    ///
    /// # Errors
    ///
    /// This function will return an error if the fetch fails,
    /// or [`MalformedResponse`] for the first line that does not parse.
    pub async fn responses(self: &Arc<Self>, fetcher: &dyn FetchLines) -> Result<Vec<Response>> {
        let lines = fetcher.fetch_lines(&self.url()).await?;
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                parse_response(self, &line).ok_or(MalformedResponse { index, line })
            })
            .collect()
    }
}
