use std::{collections::HashSet, sync::Arc};

use log::{debug, error, info};
use tokio::sync::{mpsc, oneshot};

use crate::{
    error::Error,
    models::{
        board::Board,
        response::{Response, ResponseKey},
    },
    result::Result,
    FetchLines,
};

/// The two streams handed out by [`Board::poll_new_responses`].
///
/// `responses` yields every response that was not on the board when polling
/// started, once each. When the poller stops, `responses` closes and `error`
/// resolves with the reason, if there was one.
#[derive(Debug)]
pub struct NewResponses {
    /// Newly seen responses, in listing order and then thread order.
    pub responses: mpsc::Receiver<Response>,
    /// The error that stopped polling. Closed without a value if polling ended cleanly.
    pub error: oneshot::Receiver<Error>,
}

impl Board {
    /// Starts polling this board for new responses on a background task.
    ///
    /// The first full snapshot of the board only primes the poller; nothing in it
    /// is reported. After that the board is re-read back to back, forever, and
    /// every response whose (thread id, response id) pair has not been seen is sent
    /// on [`NewResponses::responses`]. Pacing comes entirely from the fetcher,
    /// i.e. the [`RateLimiter`](crate::RateLimiter) behind a [`Client`](crate::Client).
    ///
    /// The first fetch or parse error ends polling for good; it is delivered on
    /// [`NewResponses::error`]. Nothing is retried.
    ///
    /// Sending blocks until the consumer takes the response, so an idle consumer
    /// stalls polling. Dropping the `responses` receiver stops the poller before
    /// its next snapshot or send; there is no other way to cancel it.
    ///
    /// The set of seen keys grows with every distinct response and is never pruned.
    ///
    /// Must be called inside a tokio runtime.
    pub fn poll_new_responses(&self, fetcher: Arc<dyn FetchLines>) -> NewResponses {
        let (response_tx, responses) = mpsc::channel(1);
        let (error_tx, error) = oneshot::channel();
        let board = self.clone();

        tokio::spawn(async move {
            let outcome = poll(&board, &*fetcher, &response_tx).await;
            // close the response stream before reporting
            drop(response_tx);
            if let Err(e) = outcome {
                error!("stopped polling {}: {}", board.url(), e);
                // the consumer may have dropped the receiver already
                let _ = error_tx.send(e);
            }
        });

        NewResponses { responses, error }
    }
}

async fn poll(board: &Board, fetcher: &dyn FetchLines, tx: &mpsc::Sender<Response>) -> Result<()> {
    info!("priming {}", board.url());
    let mut seen: HashSet<ResponseKey> = snapshot(board, fetcher)
        .await?
        .iter()
        .map(Response::key)
        .collect();
    info!("primed {} with {} responses", board.url(), seen.len());

    loop {
        if tx.is_closed() {
            info!("receiver for {} dropped, stopping", board.url());
            return Ok(());
        }
        let mut emitted = 0usize;
        for response in snapshot(board, fetcher).await? {
            if !seen.insert(response.key()) {
                continue;
            }
            if tx.send(response).await.is_err() {
                info!("receiver for {} dropped, stopping", board.url());
                return Ok(());
            }
            emitted += 1;
        }
        debug!(
            "{}: {} new responses, {} seen",
            board.url(),
            emitted,
            seen.len()
        );
    }
}

/// Reads every response on the board: threads in listing order, each in dump order.
async fn snapshot(board: &Board, fetcher: &dyn FetchLines) -> Result<Vec<Response>> {
    let mut responses = vec![];
    let threads = board.threads(fetcher).await?;
    for thread in &threads {
        responses.extend(thread.responses(fetcher).await?);
    }
    debug!(
        "{}: {} threads, {} responses",
        board.url(),
        threads.len(),
        responses.len()
    );
    Ok(responses)
}
