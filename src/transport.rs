use async_trait::async_trait;
use encoding_rs::EUC_JP;

use crate::result::Result;

/// Something that can fetch a URL and hand back its body as decoded, non-empty lines.
///
/// [`Client`](crate::Client) is the HTTP implementation; anything else that can
/// produce decoded lines per URL can stand in for it.
#[async_trait]
pub trait FetchLines: Send + Sync {
    /// Fetches `url` and returns its non-empty lines in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines could not be retrieved at all.
    async fn fetch_lines(&self, url: &str) -> Result<Vec<String>>;
}

/// Splits an EUC-JP encoded body into UTF-8 lines.
///
/// CR, LF and CRLF all end a line. Empty lines are dropped.
/// A line that is not valid EUC-JP is logged and skipped so that
/// one broken record does not cost the rest of the body.
pub fn decode_lines(body: &[u8]) -> Vec<String> {
    body.split(|b| matches!(b, b'\n' | b'\r'))
        .filter(|raw| !raw.is_empty())
        .filter_map(|raw| {
            match EUC_JP.decode_without_bom_handling_and_without_replacement(raw) {
                Some(line) => Some(line.into_owned()),
                None => {
                    log::warn!(
                        "could not decode EUC-JP line {:?}, ignored",
                        String::from_utf8_lossy(raw)
                    );
                    None
                }
            }
        })
        .collect()
}

/// In-memory fetcher for the crate's own tests.
#[cfg(test)]
pub(crate) mod canned {
    use std::{
        collections::{HashMap, VecDeque},
        io,
        sync::{Mutex, MutexGuard, PoisonError},
    };

    use async_trait::async_trait;

    use super::FetchLines;
    use crate::result::Result;

    /// An in-memory [`FetchLines`] that replays queued answers per URL.
    ///
    /// Each fetch of a URL pops the next queued answer for it. Fetching a URL
    /// with nothing left queued fails with an [`io::ErrorKind::NotFound`] error.
    #[derive(Debug, Default)]
    pub(crate) struct CannedLines {
        answers: Mutex<HashMap<String, VecDeque<Vec<String>>>>,
    }

    impl CannedLines {
        /// Creates an empty fetcher.
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Queues `lines` as the next answer for `url`.
        pub(crate) fn push<I, S>(&self, url: &str, lines: I) -> &Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.answers()
                .entry(url.to_string())
                .or_default()
                .push_back(lines.into_iter().map(Into::into).collect());
            self
        }

        /// Returns how many answers are still queued for `url`.
        pub(crate) fn remaining(&self, url: &str) -> usize {
            self.answers().get(url).map_or(0, VecDeque::len)
        }

        fn answers(&self) -> MutexGuard<'_, HashMap<String, VecDeque<Vec<String>>>> {
            self.answers.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl FetchLines for CannedLines {
        async fn fetch_lines(&self, url: &str) -> Result<Vec<String>> {
            self.answers()
                .get_mut(url)
                .and_then(VecDeque::pop_front)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no lines for {url}")))
                .map_err(Into::into)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::canned::CannedLines;
    use super::*;

    #[test]
    fn every_terminator_gives_the_same_lines() {
        let want = vec!["a", "b", "c"];
        assert_eq!(decode_lines(b"a\nb\nc\n"), want);
        assert_eq!(decode_lines(b"a\r\nb\r\nc\r\n"), want);
        assert_eq!(decode_lines(b"a\rb\rc"), want);
        assert_eq!(decode_lines(b"a\r\nb\rc\n"), want);
    }

    #[test]
    fn blank_lines_are_dropped() {
        assert_eq!(decode_lines(b"\n\r\n\r\na\n\n\nb\r\n\r\n"), vec!["a", "b"]);
        assert!(decode_lines(b"").is_empty());
        assert!(decode_lines(b"\r\n\n\r").is_empty());
    }

    #[test]
    fn decodes_euc_jp() {
        // "テスト" in EUC-JP
        let body = [0xA5, 0xC6, 0xA5, 0xB9, 0xA5, 0xC8, b'\n'];
        assert_eq!(decode_lines(&body), vec!["テスト"]);
    }

    #[test]
    fn undecodable_line_is_skipped() {
        // 0xA5 opens a two byte sequence that never completes
        let body = [b'o', b'k', b'\n', 0xA5, b'\n', b'f', b'i', b'n', b'e'];
        assert_eq!(decode_lines(&body), vec!["ok", "fine"]);
    }

    #[tokio::test]
    async fn canned_lines_replay_in_order() {
        let canned = CannedLines::new();
        canned.push("u", ["1"]).push("u", ["2", "3"]);

        assert_eq!(canned.fetch_lines("u").await.unwrap(), vec!["1"]);
        assert_eq!(canned.remaining("u"), 1);
        assert_eq!(canned.fetch_lines("u").await.unwrap(), vec!["2", "3"]);
        assert!(canned.fetch_lines("u").await.is_err());
        assert!(canned.fetch_lines("other").await.is_err());
    }
}
