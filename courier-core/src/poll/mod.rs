//! Background polling tasks.

mod status;

pub use status::{OrderStatusWatcher, StatusSignal};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Whether a polling task should keep running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollControl {
    Continue,
    Stop,
}

/// Repeating background task with explicit cancellation.
///
/// The first tick fires immediately, then every `period`; missed ticks
/// are skipped rather than bursted. The task ends when the closure
/// reports [`PollControl::Stop`], when [`stop`](Self::stop) is called,
/// or when the handle is dropped (screen teardown).
#[derive(Debug)]
pub struct PollTask {
    shutdown: Arc<RwLock<bool>>,
    handle: JoinHandle<()>,
}

impl PollTask {
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = PollControl> + Send + 'static,
    {
        let shutdown = Arc::new(RwLock::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                if *flag.read().await {
                    debug!("poll task shutting down");
                    break;
                }

                if tick().await == PollControl::Stop {
                    break;
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Signal the task to stop before its next tick.
    pub async fn stop(&self) {
        *self.shutdown.write().await = true;
    }

    /// Tear the task down immediately.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn stops_when_the_tick_says_so() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);

        let task = PollTask::spawn(Duration::from_millis(1), move || {
            let seen = Arc::clone(&seen);
            async move {
                if seen.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                    PollControl::Stop
                } else {
                    PollControl::Continue
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(task.is_finished());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn first_tick_fires_immediately() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);

        let _task = PollTask::spawn(Duration::from_secs(3600), move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                PollControl::Continue
            }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_tears_the_task_down() {
        let task = PollTask::spawn(Duration::from_millis(1), || async {
            PollControl::Continue
        });

        task.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(task.is_finished());
    }
}
