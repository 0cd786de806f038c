use super::{REQUESTS_PER_WINDOW, WINDOW_DURATION};

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

#[derive(Debug)]
struct Window {
    started: Instant,
    remaining: u8,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RateLimit {
    // Use a tokio mutex for fairness: waiting tasks are served in order once the window reopens.
    window: Arc<Mutex<Option<Window>>>,
}

impl RateLimit {
    async fn acquire(&self) {
        loop {
            let now = Instant::now();

            let reopens_at = {
                let mut guard = self.window.lock().await;
                let window = guard.get_or_insert_with(|| Window {
                    started: now,
                    remaining: REQUESTS_PER_WINDOW,
                });

                if now.duration_since(window.started) >= WINDOW_DURATION {
                    window.started = now;
                    window.remaining = REQUESTS_PER_WINDOW;
                }

                if window.remaining > 0 {
                    window.remaining -= 1;
                    return;
                }

                window.started + WINDOW_DURATION
            };

            log::warn!(
                "request budget exhausted, waiting {:?}",
                reopens_at.saturating_duration_since(now)
            );
            sleep_until(reopens_at).await;
        }
    }

    pub(crate) async fn check<F, R>(&self, fut: F) -> R
    where
        F: Future<Output = R>,
    {
        self.acquire().await;
        fut.await
    }
}
