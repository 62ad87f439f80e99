use thiserror::Error;

/// Everything that can go wrong while reading a board.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be completed.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// A non-HTTP line source failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A `subject.txt` line did not match `<id>.cgi,<title>(<count>)`.
    #[error("malformed listing line {index}: {line:?}")]
    MalformedListing {
        /// 0-based position of the line in the listing.
        index: usize,
        /// The offending line, verbatim.
        line: String,
    },

    /// A rawmode line did not hold seven `<>` separated fields with a numeric id.
    #[error("malformed response line {index}: {line:?}")]
    MalformedResponse {
        /// 0-based position of the line in the message dump.
        index: usize,
        /// The offending line, verbatim.
        line: String,
    },
}
