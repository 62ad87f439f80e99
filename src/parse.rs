use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::models::{board::Board, response::Response, thread::Thread};

// greedy title so the last `(<digits>)` on the line is the count
static LISTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.cgi,(.*)\(([0-9]+)\)$").expect("listing pattern is valid")
});

const FIELD_SEPARATOR: &str = "<>";

/// Parses one `subject.txt` line of the form `<id>.cgi,<title>(<count>)`.
///
/// Returns `None` when the line does not have that shape
/// or the count does not fit a `u64`.
pub fn parse_listing(board: &Board, line: &str) -> Option<Thread> {
    let caps = LISTING.captures(line)?;
    let num_responses = caps[3].parse().ok()?;
    Some(Thread::new(board.clone(), &caps[1], &caps[2], num_responses))
}

/// Parses one rawmode line:
/// `id<>name<>email<>date<>content<>title<>author-id`.
///
/// Returns `None` unless there are exactly seven fields and `id` is a decimal number.
pub fn parse_response(thread: &Arc<Thread>, line: &str) -> Option<Response> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [id, name, email, date, content, title, author_id] = fields[..] else {
        return None;
    };
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = id.parse().ok()?;
    Some(Response::new(
        Arc::clone(thread),
        id,
        [name, email, date, content, title, author_id],
    ))
}
