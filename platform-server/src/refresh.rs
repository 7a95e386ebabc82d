//! Refresh scheduling primitives.
//!
//! The departure board is pure request/response, but the polling around it
//! needs three pieces of coordination: a periodic refresh whose schedule
//! restarts on a manual refresh (so triggers never overlap), a debounce
//! window that coalesces rapid search keystrokes into one upstream call,
//! and a generation counter so only the newest in-flight fetch gets to
//! apply its result.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Fixed poll interval, matching the browser client.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Quiet window for coalescing station-search keystrokes.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

fn swap_task(slot: &Mutex<Option<JoinHandle<()>>>, next: Option<JoinHandle<()>>) {
    let old = {
        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    };
    if let Some(old) = old {
        old.abort();
    }
}

/// Holds at most one periodic refresh task.
///
/// Restarting aborts the previous schedule before starting the new one, so
/// a user-initiated refresh resets the countdown instead of stacking a
/// second timer on top.
#[derive(Debug, Default)]
pub struct RefreshTimer {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the periodic schedule. The first tick fires one
    /// full interval from now; callers wanting an immediate refresh do
    /// that themselves before restarting.
    pub fn restart<F, Fut>(&self, interval: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.tick().await; // the immediate first tick
            loop {
                timer.tick().await;
                tick().await;
            }
        });

        swap_task(&self.handle, Some(handle));
    }

    /// Cancel the schedule, if any.
    pub fn stop(&self) {
        swap_task(&self.handle, None);
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Monotonic ticket dispenser for in-flight fetches.
///
/// Each outbound fetch takes a ticket; when the response lands, the result
/// is applied only if no newer fetch has started since. Superseded
/// responses are discarded instead of clobbering fresher state.
#[derive(Debug, Default)]
pub struct FetchGeneration(AtomicU64);

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, invalidating all earlier tickets.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` still belongs to the newest fetch.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// Coalesces bursts of triggers into a single call.
///
/// Each trigger cancels the previously pending one and schedules the new
/// future to run after the quiet window, mirroring the classic
/// clear-timeout/set-timeout keystroke debounce.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `fut` to run after the quiet window, superseding any
    /// not-yet-run trigger.
    pub fn call<Fut>(&self, fut: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            fut.await;
        });

        swap_task(&self.pending, Some(handle));
    }

    /// Drop any pending trigger without running it.
    pub fn cancel(&self) {
        swap_task(&self.pending, None);
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicU32;

    #[tokio::test(start_paused = true)]
    async fn timer_ticks_on_the_interval() {
        let ticks = Arc::new(AtomicU32::new(0));
        let timer = RefreshTimer::new();

        let counter = ticks.clone();
        timer.restart(Duration::from_secs(30), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        // Nothing fires before the first full interval.
        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(66)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_the_previous_schedule() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let timer = RefreshTimer::new();

        let counter = first.clone();
        timer.restart(Duration::from_secs(30), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(65)).await;
        assert_eq!(first.load(Ordering::SeqCst), 2);

        let counter = second.clone();
        timer.restart(Duration::from_secs(30), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(95)).await;
        // The old schedule is dead; only the new one advances.
        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticking() {
        let ticks = Arc::new(AtomicU32::new(0));
        let timer = RefreshTimer::new();

        let counter = ticks.clone();
        timer.restart(Duration::from_secs(30), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(35)).await;
        timer.stop();
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_runs_only_the_last_trigger() {
        let ran = Arc::new(Mutex::new(Vec::new()));
        let debouncer = Debouncer::new(Duration::from_millis(300));

        for id in 1..=3u32 {
            let ran = ran.clone();
            debouncer.call(async move {
                ran.lock().unwrap().push(id);
            });
            // Let the spawned sleep get registered before superseding it.
            tokio::task::yield_now().await;
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(*ran.lock().unwrap(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_cancel_discards_pending() {
        let ran = Arc::new(AtomicU32::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let counter = ran.clone();
        debouncer.call(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::task::yield_now().await;
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stale_generations_are_not_current() {
        let generation = FetchGeneration::new();

        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
