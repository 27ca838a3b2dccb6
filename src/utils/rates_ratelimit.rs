/// Exchange rates API limiter - the free plan allows a small monthly quota,
/// so requests are capped to a handful per minute on top of the rates cache
use lazy_static::lazy_static;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use std::collections::VecDeque;

lazy_static! {
    static ref RATES_RATE_LIMITER: Mutex<RatesRateLimiter> = Mutex::new(RatesRateLimiter::new());
}

const MAX_REQUESTS: usize = 5;
const WINDOW_SECONDS: u64 = 60;

pub struct RatesRateLimiter {
    /// Queue of request timestamps inside the window
    request_times: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
}

impl RatesRateLimiter {
    fn new() -> Self {
        Self {
            request_times: VecDeque::new(),
            max_requests: MAX_REQUESTS,
            window: Duration::from_secs(WINDOW_SECONDS),
        }
    }

    fn check_and_record(&mut self, now: Instant) -> Duration {
        // Remove old timestamps outside the window
        while let Some(&front) = self.request_times.front() {
            if now.duration_since(front) > self.window {
                self.request_times.pop_front();
            } else {
                break;
            }
        }

        // If we're at the limit, calculate how long to wait
        if self.request_times.len() >= self.max_requests {
            if let Some(&oldest) = self.request_times.front() {
                let elapsed = now.duration_since(oldest);
                if elapsed < self.window {
                    return self.window - elapsed;
                }
            }
        }

        self.request_times.push_back(now);
        Duration::from_secs(0)
    }
}

/// Wait if necessary to respect the request cap for the exchange rates API
pub async fn rate_limit_rates_api() {
    loop {
        let wait_duration = {
            let mut limiter = match RATES_RATE_LIMITER.lock() {
                Ok(limiter) => limiter,
                Err(poisoned) => poisoned.into_inner(),
            };
            limiter.check_and_record(Instant::now())
        };

        if wait_duration.is_zero() {
            return;
        }

        tracing::debug!("Rates API rate limit: waiting {}ms", wait_duration.as_millis());
        tokio::time::sleep(wait_duration).await;
    }
}
