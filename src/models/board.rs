//! Boards and their thread listings.

use std::sync::Arc;

use crate::{
    error::Error::MalformedListing, models::thread::Thread, parse::parse_listing,
    result::Result, FetchLines,
};
use serde::Serialize;

/// Scheme and host every board lives under.
pub const ORIGIN: &str = "http://jbbs.shitaraba.net";

/// A JBBS board, addressed by its category and numeric id.
///
/// Building a board does no I/O; it only derives the board's URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    category: String,
    id: String,
    url: String,
}

impl Board {
    /// Constructs the board `category/id`, e.g. `Board::new("computer", "12345")`.
    pub fn new(category: &str, id: &str) -> Self {
        Board {
            category: category.to_string(),
            id: id.to_string(),
            url: format!("{ORIGIN}/{category}/{id}/"),
        }
    }

    /// Returns the board's category, e.g. `computer`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the board's id within its category.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human facing board page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the URL of the thread listing.
    pub fn subject_url(&self) -> String {
        format!("{}subject.txt", self.url)
    }

    /// Returns the URL of the raw message dump of `thread_id`.
    pub fn thread_url(&self, thread_id: &str) -> String {
        format!(
            "{ORIGIN}/bbs/rawmode.cgi/{}/{}/{thread_id}",
            self.category, self.id
        )
    }

    /// Fetches the board's thread listing.
    ///
    /// Threads come back in listing order, which is the order the board itself shows.
    ///
    /// # Errors
    ///
    /// This function will return an error if the fetch fails,
    /// or [`MalformedListing`] for the first line that does not parse.
    /// No partial listing is returned.
    pub async fn threads(&self, fetcher: &dyn FetchLines) -> Result<Vec<Arc<Thread>>> {
        let lines = fetcher.fetch_lines(&self.subject_url()).await?;
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| match parse_listing(self, &line) {
                Some(thread) => Ok(Arc::new(thread)),
                None => Err(MalformedListing { index, line }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, transport::canned::CannedLines};

    #[test]
    fn urls() {
        let b = Board::new("computer", "12345");
        assert_eq!(b.url(), "http://jbbs.shitaraba.net/computer/12345/");
        assert_eq!(
            b.subject_url(),
            "http://jbbs.shitaraba.net/computer/12345/subject.txt"
        );
        assert_eq!(
            b.thread_url("67890"),
            "http://jbbs.shitaraba.net/bbs/rawmode.cgi/computer/12345/67890"
        );
    }

    #[tokio::test]
    async fn threads_keep_listing_order() {
        let b = Board::new("computer", "12345");
        let canned = CannedLines::new();
        canned.push(
            &b.subject_url(),
            ["3.cgi,newest(1)", "999.cgi,hoge.cgi,(20)fuga(42)", "1.cgi,oldest(1000)"],
        );

        let threads = b.threads(&canned).await.unwrap();
        let ids: Vec<_> = threads.iter().map(|t| t.id()).collect();
        assert_eq!(ids, ["3", "999", "1"]);

        let complex = &threads[1];
        assert_eq!(complex.board(), &b);
        assert_eq!(complex.title(), "hoge.cgi,(20)fuga");
        assert_eq!(complex.num_responses(), 42);
    }

    #[tokio::test]
    async fn one_bad_line_fails_the_listing() {
        let b = Board::new("computer", "12345");
        for bad in ["999.cgihog,(20)", "999.cgi,(2a)", "1.cgi,t(2a)"] {
            let canned = CannedLines::new();
            canned.push(&b.subject_url(), ["1.cgi,fine(1)", bad, "2.cgi,fine(2)"]);

            match b.threads(&canned).await {
                Err(Error::MalformedListing { index, line }) => {
                    assert_eq!(index, 1);
                    assert_eq!(line, bad);
                }
                other => panic!("{bad}: expected malformed listing, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn fetch_errors_propagate() {
        let b = Board::new("computer", "12345");
        let canned = CannedLines::new();
        assert!(matches!(b.threads(&canned).await, Err(Error::Io(_))));
    }
}
