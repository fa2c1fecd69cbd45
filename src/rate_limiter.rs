use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct RateLimiter {
    limit: u32,
    interval: Duration,
    timestamps: Mutex<VecDeque<Instant>>, // admissions still inside the window
}

impl RateLimiter {
    pub fn new(limit: u32, interval: Duration) -> Self {
        Self {
            limit,
            interval,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn check_rate_limit(&self) -> bool {
        self.check_at(Instant::now())
    }

    // Admission decision against an explicit clock reading. `now` must not
    // run backwards across calls on the same limiter.
    pub fn check_at(&self, now: Instant) -> bool {
        let mut q = self.timestamps.lock().expect("rate limiter mutex poisoned");

        // Evict timestamps older than window
        while let Some(&front) = q.front() {
            if now.duration_since(front) >= self.interval {
                q.pop_front();
            } else {
                break;
            }
        }

        if q.len() < self.limit as usize {
            q.push_back(now);
            true
        } else {
            false
        }
    }
}
