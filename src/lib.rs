#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # jbbs-reader
//!
//! jbbs-reader reads a JBBS (shitaraba) board and streams the responses
//! that appear on it while you watch.
//!
//! This library can fetch:
//! - the thread listing of a [`Board`]
//! - every [`Response`] of a [`Thread`]
//! - a never-ending stream of *new* responses on a board
//!
//! While respecting:
//! - a shared token-bucket limit of 3 requests per minute (burst 3) by default.
//!
//! ## Example: Printing new responses as they arrive.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use std::sync::Arc;
//!
//! use jbbs_reader::board::Board;
//! use jbbs_reader::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(Client::new());
//!     let board = Board::new("computer", "12345");
//!
//!     let mut new = board.poll_new_responses(client);
//!     while let Some(res) = new.responses.recv().await {
//!         println!("{} {}: {}", res.thread().title(), res.id(), res.content());
//!     }
//!     if let Ok(err) = new.error.await {
//!         eprintln!("polling stopped: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`Board`]:    crate::board::Board
//! [`Thread`]:   crate::thread::Thread
//! [`Response`]: crate::response::Response

/// Client module contains [`Client`], the rate-limited HTTP line fetcher.
pub mod client;

/// Contains [`Error`]s that can be thrown by the libary.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// Parsers for `subject.txt` listing lines and rawmode response lines.
pub mod parse;

/// Background polling that turns repeated snapshots into a stream of new responses.
pub mod poll;

/// Token-bucket [`RateLimiter`] shared by every request.
pub mod ratelimit;

/// The [`FetchLines`] seam and EUC-JP line decoding.
pub mod transport;

pub(crate) mod models;

pub(crate) mod result;

pub use client::Client;
pub use models::*;
pub use poll::NewResponses;
pub use ratelimit::RateLimiter;
pub use result::Result;
pub use transport::FetchLines;
