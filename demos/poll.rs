//! Example demonstrating how to watch boards for new responses using jbbs-reader
//!
//! This example shows:
//! - Sharing one rate limiter between several boards
//! - Raising the rate limit at runtime
//! - Printing every new response as it arrives
//!
//! Usage: `cargo run --example poll -- <category>/<id> [<category>/<id> ...]`

use std::sync::Arc;

use anyhow::{bail, Context};
use jbbs_reader::board::Board;
use jbbs_reader::{Client, RateLimiter};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This is just for seeing the logs
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let boards = std::env::args()
        .skip(1)
        .map(|arg| -> anyhow::Result<Board> {
            let (category, id) = arg
                .split_once('/')
                .with_context(|| format!("expected <category>/<id>, got {arg:?}"))?;
            Ok(Board::new(category, id))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if boards.is_empty() {
        bail!("usage: poll <category>/<id> [<category>/<id> ...]");
    }

    // One limiter for every board, so the whole process stays under the limit
    let limiter = Arc::new(RateLimiter::default());
    limiter.set_rate(6, 3);
    let client = Arc::new(Client::with_limiter(limiter));

    let mut tasks = vec![];
    for board in boards {
        let mut new = board.poll_new_responses(client.clone());
        tasks.push(tokio::spawn(async move {
            while let Some(res) = new.responses.recv().await {
                println!(
                    "[{}] {} #{} {} ({}): {}",
                    board.url(),
                    res.thread().title(),
                    res.id(),
                    res.name(),
                    res.date(),
                    res.content().replace("<br>", "\n")
                );
            }
            if let Ok(err) = new.error.await {
                eprintln!("[{}] polling stopped: {err}", board.url());
            }
        }));
    }

    for task in tasks {
        task.await?;
    }
    Ok(())
}
