//! Reusable countdown timers.
//!
//! Every fetch races its work against a timer. Rather than allocating a new
//! boxed [`Sleep`] each time, timers are taken from a [`TimerPool`], re-armed
//! for the requested duration and handed back when the fetch finishes.
//!
//! ```rust,ignore
//! let pool = TimerPool::new();
//! let mut timer = pool.acquire(Duration::from_millis(100));
//! (&mut *timer).await; // fires once, after 100ms
//! // dropping the guard disarms the timer and returns it to the pool
//! ```
//!
//! Tokio timers are bound to the runtime that created them, so a pool should
//! live no longer than the runtime it is used on.

use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::time::{Instant, Sleep};

/// Idle timers kept around for reuse; extra releases are dropped.
pub const MAX_IDLE_TIMERS: usize = 64;

/// How far out a released timer is pushed so it can never fire.
const DISARMED_FOR: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// A one-shot countdown. Completes once its deadline has passed.
#[derive(Debug)]
pub struct Timer {
    sleep: Pin<Box<Sleep>>,
}

impl Timer {
    fn new(duration: Duration) -> Self {
        Self {
            sleep: Box::pin(tokio::time::sleep(duration)),
        }
    }

    fn arm(&mut self, duration: Duration) {
        self.sleep.as_mut().reset(Instant::now() + duration);
    }

    fn disarm(&mut self) {
        self.arm(DISARMED_FOR);
    }

    pub fn deadline(&self) -> Instant {
        self.sleep.deadline()
    }

    pub fn is_elapsed(&self) -> bool {
        self.sleep.is_elapsed()
    }
}

impl Future for Timer {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.sleep.as_mut().poll(cx)
    }
}

/// Free list of disarmed timers.
#[derive(Debug, Default)]
pub struct TimerPool {
    idle: Mutex<Vec<Timer>>,
}

impl TimerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a timer armed to fire after `duration`, released when the guard drops.
    ///
    /// Must be called from within a tokio runtime.
    pub fn acquire(&self, duration: Duration) -> TimerGuard<'_> {
        TimerGuard {
            pool: self,
            timer: Some(self.acquire_timer(duration)),
        }
    }

    /// Take a timer without a guard. Pair with [`TimerPool::release`].
    pub fn acquire_timer(&self, duration: Duration) -> Timer {
        let reused = self.idle.lock().unwrap_or_else(|e| e.into_inner()).pop();
        match reused {
            Some(mut timer) => {
                timer.arm(duration);
                timer
            }
            None => Timer::new(duration),
        }
    }

    /// Disarm `timer` and keep it for the next [`TimerPool::acquire`].
    pub fn release(&self, mut timer: Timer) {
        timer.disarm();
        let mut idle = self.idle.lock().unwrap_or_else(|e| e.into_inner());
        if idle.len() < MAX_IDLE_TIMERS {
            idle.push(timer);
        }
    }

    /// Number of timers currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Scoped timer; returns itself to the pool on every exit path.
#[derive(Debug)]
pub struct TimerGuard<'a> {
    pool: &'a TimerPool,
    timer: Option<Timer>,
}

impl Deref for TimerGuard<'_> {
    type Target = Timer;

    fn deref(&self) -> &Timer {
        // Only `drop` takes the timer out.
        self.timer.as_ref().expect("timer taken before guard drop")
    }
}

impl DerefMut for TimerGuard<'_> {
    fn deref_mut(&mut self) -> &mut Timer {
        self.timer.as_mut().expect("timer taken before guard drop")
    }
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.pool.release(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_duration() {
        let pool = TimerPool::new();
        let mut timer = pool.acquire(Duration::from_millis(100));
        let started = Instant::now();

        (&mut *timer).await;

        assert!(timer.is_elapsed());
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guard_derefs_to_armed_timer() {
        let pool = TimerPool::new();
        let mut timer = pool.acquire(Duration::from_secs(1));
        let deadline = timer.deadline();
        assert!(!timer.is_elapsed());

        tokio::time::advance(Duration::from_secs(2)).await;
        (&mut *timer).await;
        assert!(timer.is_elapsed());
        assert!(Instant::now() >= deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_guard_returns_timer_to_pool() {
        let pool = TimerPool::new();
        {
            let _timer = pool.acquire(Duration::from_millis(10));
            assert_eq!(pool.idle(), 0);
        }
        assert_eq!(pool.idle(), 1);

        let _timer = pool.acquire(Duration::from_millis(10));
        assert_eq!(pool.idle(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_released_timer_is_disarmed() {
        let pool = TimerPool::new();
        let timer = pool.acquire_timer(Duration::from_millis(10));
        pool.release(timer);

        tokio::time::advance(Duration::from_secs(60)).await;

        let idle = pool.idle.lock().unwrap();
        assert!(!idle[0].is_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reused_timer_is_rearmed() {
        let pool = TimerPool::new();
        let mut first = pool.acquire_timer(Duration::from_millis(5));
        (&mut first).await;
        assert!(first.is_elapsed());
        pool.release(first);

        let second = pool.acquire_timer(Duration::from_secs(5));
        assert!(!second.is_elapsed());
        assert!(second.deadline() > Instant::now());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_keeps_bounded_number_of_timers() {
        let pool = TimerPool::new();
        let timers: Vec<Timer> = (0..MAX_IDLE_TIMERS + 3)
            .map(|_| pool.acquire_timer(Duration::from_millis(1)))
            .collect();
        for timer in timers {
            pool.release(timer);
        }
        assert_eq!(pool.idle(), MAX_IDLE_TIMERS);
    }
}
