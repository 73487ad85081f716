//! Bounded status polling for long-running backend jobs.
//!
//! After a trigger endpoint accepts a job, the backend flips a boolean flag
//! on the article's status record once the job finishes. [`StatusPoller`]
//! watches that flag on a fixed cadence until it is set, a status check
//! fails, the time budget runs out, or the poll is cancelled. Checks are
//! serialized: a fetch that outlives the interval delays the next one, so at
//! most one request per poll is ever in flight.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::models::status::{CompletionFlag, ContentStatus};
use crate::services::api::ApiError;

/// Source of status snapshots. Implemented by the API client; tests use
/// scripted fakes, keeping the poller free of HTTP.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(
        &self,
        news_id: i64,
    ) -> impl Future<Output = Result<ContentStatus, ApiError>> + Send;
}

/// Parameters for one polling session.
#[derive(Debug, Clone)]
pub struct PollJob {
    news_id: i64,
    flag: CompletionFlag,
    every: Duration,
    give_up_after: Duration,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("news id must be positive, got {0}")]
    InvalidNewsId(i64),

    #[error("poll interval must be non-zero")]
    ZeroInterval,

    #[error("poll timeout {timeout:?} is shorter than the interval {interval:?}")]
    TimeoutTooShort { timeout: Duration, interval: Duration },
}

impl PollJob {
    pub fn new(
        news_id: i64,
        flag: CompletionFlag,
        every: Duration,
        give_up_after: Duration,
    ) -> Result<Self, PollError> {
        if news_id <= 0 {
            return Err(PollError::InvalidNewsId(news_id));
        }
        if every.is_zero() {
            return Err(PollError::ZeroInterval);
        }
        if give_up_after < every {
            return Err(PollError::TimeoutTooShort {
                timeout: give_up_after,
                interval: every,
            });
        }
        Ok(Self {
            news_id,
            flag,
            every,
            give_up_after,
        })
    }

    pub fn news_id(&self) -> i64 {
        self.news_id
    }

    pub fn flag(&self) -> CompletionFlag {
        self.flag
    }
}

/// Terminal state of a polling session. Every poll resolves to exactly one
/// of these.
#[derive(Debug)]
pub enum PollOutcome {
    /// The completion flag was set; carries the snapshot that reported it.
    Completed(ContentStatus),
    /// A status check failed. Polling stops on the first failure.
    Failed(ApiError),
    /// The flag never appeared within the time budget.
    TimedOut,
    /// The session was cancelled, or replaced by a newer poll for the same
    /// article and flag.
    Cancelled,
}

type PollKey = (i64, CompletionFlag);

struct ActivePoll {
    generation: u64,
    cancel: CancellationToken,
}

/// Spawns and tracks polling sessions, keeping at most one live session per
/// (article, flag) pair.
pub struct StatusPoller<S> {
    source: Arc<S>,
    active: Arc<Mutex<HashMap<PollKey, ActivePoll>>>,
    generation: AtomicU64,
}

impl<S: StatusSource> StatusPoller<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            active: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Start a polling session. A session already running for the same
    /// article and flag is cancelled before the new one is registered.
    pub fn start(&self, job: PollJob) -> PollHandle {
        let key = (job.news_id, job.flag);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();

        let replaced = self
            .active
            .lock()
            .expect("poll registry poisoned")
            .insert(
                key,
                ActivePoll {
                    generation,
                    cancel: cancel.clone(),
                },
            );
        if let Some(prev) = replaced {
            tracing::debug!(news_id = job.news_id, flag = %job.flag, "replacing active poll");
            prev.cancel.cancel();
        }

        let source = Arc::clone(&self.source);
        let registry = Arc::clone(&self.active);
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            let outcome = run(source.as_ref(), &job, &token).await;
            // Deregister, unless a replacement already took the slot.
            let mut active = registry.lock().expect("poll registry poisoned");
            if active
                .get(&key)
                .is_some_and(|entry| entry.generation == generation)
            {
                active.remove(&key);
            }
            outcome
        });

        PollHandle { cancel, task }
    }
}

async fn run<S: StatusSource>(
    source: &S,
    job: &PollJob,
    cancel: &CancellationToken,
) -> PollOutcome {
    let started = Instant::now();
    let deadline = started + job.give_up_after;
    let mut ticks = interval_at(started + job.every, job.every);
    // A check that outlives the interval swallows the overlapping tick
    // instead of queueing a burst behind it.
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut checks = 0u32;
    loop {
        let tick = tokio::select! {
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            tick = ticks.tick() => tick,
        };
        if cancel.is_cancelled() {
            return PollOutcome::Cancelled;
        }
        if tick > deadline {
            tracing::debug!(
                news_id = job.news_id,
                flag = %job.flag,
                checks,
                "giving up on poll"
            );
            return PollOutcome::TimedOut;
        }

        let result = source.fetch_status(job.news_id).await;
        checks += 1;
        // A cancellation that raced the request wins; the result is dropped.
        if cancel.is_cancelled() {
            return PollOutcome::Cancelled;
        }
        match result {
            Ok(status) if status.flag(job.flag) => {
                tracing::debug!(news_id = job.news_id, flag = %job.flag, checks, "job finished");
                return PollOutcome::Completed(status);
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    news_id = job.news_id,
                    flag = %job.flag,
                    error = %err,
                    "status check failed, stopping poll"
                );
                return PollOutcome::Failed(err);
            }
        }
    }
}

/// Handle to a running polling session.
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Stop the session. No snapshot or error is reported after this
    /// returns, even if a status check is already in flight.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the session's terminal state.
    pub async fn join(self) -> PollOutcome {
        self.task.await.expect("status poll task panicked")
    }
}
