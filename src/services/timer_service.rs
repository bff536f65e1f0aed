use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Countdown bound to one attempt. Each period removes one second from the clock.
#[derive(Clone, Copy, Debug)]
pub struct CountdownTimer {
    period: Duration,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl CountdownTimer {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the countdown on the current tokio runtime.
    ///
    /// `on_tick` receives the remaining seconds after every decrement. `on_expire` runs once,
    /// right after the tick that reaches zero, and the task then ends. A zero duration expires
    /// on the first poll without ticking.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start<T, E>(&self, duration_seconds: u32, mut on_tick: T, on_expire: E) -> TimerHandle
    where
        T: FnMut(u32) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut remaining = duration_seconds;
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            while remaining > 0 {
                ticks.tick().await;
                remaining -= 1;
                log::debug!("Countdown tick, {}s remaining", remaining);
                on_tick(remaining);
            }

            log::debug!("Countdown of {}s expired", duration_seconds);
            on_expire();
        });

        TimerHandle { task: Some(task) }
    }
}

/// Owns a running countdown. Dropping the handle cancels it.
#[derive(Debug)]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    /// Stops ticking. Safe to repeat and harmless after expiry.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                log::debug!("Cancelling countdown");
            }
            task.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
