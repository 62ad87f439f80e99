use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    sync::Semaphore,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};

/// Requests per minute allowed by [`RateLimiter::default`].
pub const DEFAULT_RATE_PER_MINUTE: u32 = 3;

/// Standing reserve of [`RateLimiter::default`].
pub const DEFAULT_BURST: u32 = 3;

/// A token bucket shared by every fetch that should count against the same budget.
///
/// Tokens are topped up one at a time every `60s / per_minute`, never beyond `burst`.
/// Share one instance (behind an [`Arc`]) between clients to get a process-wide limit.
///
/// Creating or reconfiguring a limiter spawns its replenisher,
/// so it must happen inside a tokio runtime.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    permits: Arc<Semaphore>,
    replenisher: JoinHandle<()>,
}

impl Bucket {
    fn start(per_minute: u32, burst: u32) -> Self {
        let per_minute = per_minute.max(1);
        let burst = burst.max(1) as usize;
        let period = Duration::from_secs(60) / per_minute;

        let permits = Arc::new(Semaphore::new(burst));
        let clone = permits.clone();

        let replenisher = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                // a full reserve drops the token
                if clone.available_permits() < burst {
                    clone.add_permits(1);
                    log::debug!("token added, {} available", clone.available_permits());
                }
            }
        });

        Bucket {
            permits,
            replenisher,
        }
    }
}

impl Drop for Bucket {
    fn drop(&mut self) {
        self.replenisher.abort();
        // wake anyone still queued so they move over to the replacement bucket
        self.permits.close();
    }
}

impl RateLimiter {
    /// Creates a limiter allowing `per_minute` requests per minute with a reserve of `burst`.
    ///
    /// The reserve starts full. Zero values are treated as one.
    pub fn new(per_minute: u32, burst: u32) -> Self {
        RateLimiter {
            bucket: Mutex::new(Bucket::start(per_minute, burst)),
        }
    }

    /// Replaces the rate and reserve.
    ///
    /// Unused tokens are discarded and a fresh, full reserve of `burst` tokens is loaded.
    /// Tasks already waiting in [`acquire`](Self::acquire) carry on against the new bucket.
    pub fn set_rate(&self, per_minute: u32, burst: u32) {
        let fresh = Bucket::start(per_minute, burst);
        let stale = std::mem::replace(&mut *self.bucket(), fresh);
        drop(stale);
        log::info!("rate limit set to {per_minute}/min, burst {burst}");
    }

    /// Waits until a token is available and consumes it.
    ///
    /// This never fails and has no timeout.
    pub async fn acquire(&self) {
        loop {
            let permits = self.bucket().permits.clone();
            let acquired = permits.acquire().await;
            // an error means `set_rate` swapped the bucket out, so retry on the new one
            if let Ok(permit) = acquired {
                // reduce the permit count
                permit.forget();
                return;
            }
        }
    }

    /// Returns the number of tokens that can be taken without waiting.
    pub fn available(&self) -> usize {
        self.bucket().permits.available_permits()
    }

    fn bucket(&self) -> MutexGuard<'_, Bucket> {
        self.bucket.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_PER_MINUTE, DEFAULT_BURST)
    }
}
