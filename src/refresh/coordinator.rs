//! The live-refresh coordinator.
//!
//! A self-contained object owning every timer it starts, so multiple
//! instances (one per open day view) never interfere. The poll task exists
//! only while auto-refresh is enabled and the page is visible; it is
//! spawned and cancelled on those transitions rather than left ticking
//! behind a guard clause. The staleness ticker runs for the whole lifetime
//! of a started coordinator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{RotaError, RotaResult};
use crate::refresh::clock::Clock;
use crate::refresh::staleness::staleness_text;

/// The external fetch trigger the coordinator drives.
///
/// Implementations front the data provider and its cache. Request
/// deduplication below this seam is the fetch layer's concern; the
/// coordinator additionally coalesces its own concurrent triggers so it
/// never defeats that guarantee by spawning independent calls per trigger.
#[async_trait]
pub trait RotaFetcher: Send + Sync {
    /// Fetches a fresh rota snapshot.
    async fn fetch(&self) -> RotaResult<()>;
}

/// Timer configuration for a coordinator.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between automatic refetches.
    pub poll_interval: Duration,
    /// Interval between recomputations of the staleness text.
    pub staleness_tick: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            staleness_tick: Duration::from_secs(30),
        }
    }
}

/// State shared between the coordinator handle and its background tasks.
struct Shared {
    auto_refresh: AtomicBool,
    page_visible: AtomicBool,
    refreshing: AtomicBool,
    last_updated: RwLock<Option<DateTime<Utc>>>,
    last_updated_text: RwLock<String>,
    fetch_gate: tokio::sync::Mutex<()>,
    fetch_outcome: RwLock<RotaResult<()>>,
}

type PollTask = Mutex<Option<(CancellationToken, JoinHandle<()>)>>;

/// Orchestrates periodic and visibility-triggered refetches for one day
/// view and maintains the staleness indicator.
pub struct RefreshCoordinator {
    fetcher: Arc<dyn RotaFetcher>,
    clock: Arc<dyn Clock>,
    config: RefreshConfig,
    shared: Arc<Shared>,
    cancel: Mutex<CancellationToken>,
    poll_task: PollTask,
    ticker_task: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshCoordinator {
    /// Creates a coordinator. Auto-refresh starts enabled and the page is
    /// assumed visible; no task runs until [`start`](Self::start).
    pub fn new(fetcher: Arc<dyn RotaFetcher>, clock: Arc<dyn Clock>, config: RefreshConfig) -> Self {
        Self {
            fetcher,
            clock,
            config,
            shared: Arc::new(Shared {
                auto_refresh: AtomicBool::new(true),
                page_visible: AtomicBool::new(true),
                refreshing: AtomicBool::new(false),
                last_updated: RwLock::new(None),
                last_updated_text: RwLock::new(staleness_text(None, Utc::now())),
                fetch_gate: tokio::sync::Mutex::new(()),
                fetch_outcome: RwLock::new(Ok(())),
            }),
            cancel: Mutex::new(CancellationToken::new()),
            poll_task: Mutex::new(None),
            ticker_task: Mutex::new(None),
        }
    }

    /// Starts the coordinator: spawns the staleness ticker and, while both
    /// gates are open, the poll task.
    ///
    /// # Errors
    ///
    /// Returns [`RotaError::RefreshAlreadyRunning`] if already started.
    pub fn start(&self) -> RotaResult<()> {
        if self.is_running() {
            return Err(RotaError::RefreshAlreadyRunning);
        }

        info!("Starting refresh coordinator");

        // Fresh root token so a stopped coordinator can be restarted.
        let root = CancellationToken::new();
        *lock(&self.cancel) = root.clone();

        let shared = Arc::clone(&self.shared);
        let clock = Arc::clone(&self.clock);
        let tick = self.config.staleness_tick;
        let ticker = tokio::spawn(async move {
            Self::ticker_loop(shared, clock, tick, root).await;
        });
        *lock(&self.ticker_task) = Some(ticker);

        self.sync_poll_task();
        Ok(())
    }

    /// Stops the coordinator and awaits both background tasks.
    ///
    /// After this returns no timer callback fires again.
    ///
    /// # Errors
    ///
    /// Returns [`RotaError::RefreshNotRunning`] if not started.
    pub async fn stop(&self) -> RotaResult<()> {
        if !self.is_running() {
            return Err(RotaError::RefreshNotRunning);
        }

        info!("Stopping refresh coordinator");
        lock(&self.cancel).cancel();

        let poll = lock(&self.poll_task).take();
        if let Some((token, handle)) = poll {
            token.cancel();
            let _ = handle.await;
        }

        let ticker = lock(&self.ticker_task).take();
        if let Some(handle) = ticker {
            let _ = handle.await;
        }

        Ok(())
    }

    /// Whether the coordinator has been started and not yet stopped.
    pub fn is_running(&self) -> bool {
        lock(&self.ticker_task)
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Toggles automatic refreshing. Disabling stops the poll timer
    /// outright; re-enabling while the page is visible restarts it.
    pub fn set_auto_refresh(&self, enabled: bool) {
        self.shared.auto_refresh.store(enabled, Ordering::SeqCst);
        debug!(enabled, "Auto-refresh toggled");
        self.sync_poll_task();
    }

    /// Records a page-visibility change from the host environment.
    ///
    /// Regaining visibility while auto-refresh is enabled triggers one
    /// immediate refetch; the poll timer is started or stopped to match
    /// the new state.
    pub fn set_page_visible(&self, visible: bool) {
        let was_visible = self.shared.page_visible.swap(visible, Ordering::SeqCst);
        debug!(visible, "Page visibility changed");

        if visible
            && !was_visible
            && self.shared.auto_refresh.load(Ordering::SeqCst)
            && self.is_running()
        {
            let shared = Arc::clone(&self.shared);
            let fetcher = Arc::clone(&self.fetcher);
            let clock = Arc::clone(&self.clock);
            tokio::spawn(async move {
                if let Err(error) = Self::run_fetch(&shared, &fetcher, &clock).await {
                    warn!(error = %error, "Refetch on visibility regain failed");
                }
            });
        }

        self.sync_poll_task();
    }

    /// Manually triggers a refetch, bypassing the auto-refresh and
    /// visibility gates. Concurrent triggers coalesce into the in-flight
    /// fetch.
    pub async fn refresh(&self) -> RotaResult<()> {
        Self::run_fetch(&self.shared, &self.fetcher, &self.clock).await
    }

    /// Instant of the most recent successful fetch.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        *read(&self.shared.last_updated)
    }

    /// Display text for the age of the last successful fetch.
    pub fn last_updated_text(&self) -> String {
        read(&self.shared.last_updated_text).clone()
    }

    /// Whether a fetch is currently in flight.
    pub fn is_refreshing(&self) -> bool {
        self.shared.refreshing.load(Ordering::SeqCst)
    }

    /// Whether automatic refreshing is enabled.
    pub fn is_auto_refresh_enabled(&self) -> bool {
        self.shared.auto_refresh.load(Ordering::SeqCst)
    }

    /// Whether the page is currently visible.
    pub fn is_page_visible(&self) -> bool {
        self.shared.page_visible.load(Ordering::SeqCst)
    }

    /// Starts or cancels the poll task to match the current gates.
    fn sync_poll_task(&self) {
        let should_poll = self.is_running()
            && self.shared.auto_refresh.load(Ordering::SeqCst)
            && self.shared.page_visible.load(Ordering::SeqCst);

        let mut slot = lock(&self.poll_task);
        match (slot.is_some(), should_poll) {
            (false, true) => {
                let token = lock(&self.cancel).child_token();
                let shared = Arc::clone(&self.shared);
                let fetcher = Arc::clone(&self.fetcher);
                let clock = Arc::clone(&self.clock);
                let interval = self.config.poll_interval;
                let loop_token = token.clone();
                let handle = tokio::spawn(async move {
                    Self::poll_loop(shared, fetcher, clock, interval, loop_token).await;
                });
                *slot = Some((token, handle));
                debug!("Poll timer started");
            }
            (true, false) => {
                if let Some((token, _handle)) = slot.take() {
                    token.cancel();
                    debug!("Poll timer stopped");
                }
            }
            _ => {}
        }
    }

    /// The gated poll timer: one refetch per interval while alive.
    async fn poll_loop(
        shared: Arc<Shared>,
        fetcher: Arc<dyn RotaFetcher>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Poll loop cancelled");
                    break;
                }
                _ = tokio::time::sleep(interval) => {
                    if let Err(error) = Self::run_fetch(&shared, &fetcher, &clock).await {
                        warn!(error = %error, "Scheduled rota refresh failed");
                    }
                }
            }
        }
    }

    /// The always-on staleness ticker: keeps the display text accurate
    /// even while polling is paused.
    async fn ticker_loop(
        shared: Arc<Shared>,
        clock: Arc<dyn Clock>,
        tick: Duration,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Staleness ticker cancelled");
                    break;
                }
                _ = tokio::time::sleep(tick) => {
                    let text = staleness_text(*read(&shared.last_updated), clock.now());
                    *write(&shared.last_updated_text) = text;
                }
            }
        }
    }

    /// Runs one fetch, coalescing concurrent triggers.
    ///
    /// The first trigger takes the gate and performs the fetch; any trigger
    /// arriving while it is in flight waits for it to finish and resolves
    /// with that result instead of issuing a second request.
    async fn run_fetch(
        shared: &Arc<Shared>,
        fetcher: &Arc<dyn RotaFetcher>,
        clock: &Arc<dyn Clock>,
    ) -> RotaResult<()> {
        let _guard = match shared.fetch_gate.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                // The holder records its outcome before releasing the gate,
                // so the value read here is that fetch's result.
                let _in_flight = shared.fetch_gate.lock().await;
                return read(&shared.fetch_outcome).clone();
            }
        };

        shared.refreshing.store(true, Ordering::SeqCst);
        let result = fetcher.fetch().await;
        match &result {
            Ok(()) => {
                let now = clock.now();
                *write(&shared.last_updated) = Some(now);
                *write(&shared.last_updated_text) = staleness_text(Some(now), now);
            }
            Err(error) => {
                // Keep the previous snapshot displayable; staleness text
                // keeps aging from the last success.
                warn!(error = %error, "Rota refresh failed, keeping stale view");
            }
        }
        *write(&shared.fetch_outcome) = result.clone();
        shared.refreshing.store(false, Ordering::SeqCst);
        result
    }
}

impl Drop for RefreshCoordinator {
    fn drop(&mut self) {
        // Best-effort teardown for coordinators dropped without stop().
        let root = lock(&self.cancel);
        if !root.is_cancelled() {
            root.cancel();
        }
        if let Some((token, _)) = lock(&self.poll_task).take() {
            token.cancel();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().expect("coordinator mutex poisoned")
}

fn read<T>(rwlock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    rwlock.read().expect("coordinator lock poisoned")
}

fn write<T>(rwlock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    rwlock.write().expect("coordinator lock poisoned")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use chrono::TimeZone;

    struct FakeClock {
        now: RwLock<DateTime<Utc>>,
    }

    impl FakeClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self {
                now: RwLock::new(now),
            })
        }

        fn advance(&self, duration: chrono::Duration) {
            let mut now = self.now.write().unwrap();
            *now += duration;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.read().unwrap()
        }
    }

    /// Counts fetches; optionally blocks each fetch on a semaphore permit.
    struct MockFetcher {
        calls: AtomicUsize,
        gate: Option<tokio::sync::Semaphore>,
        fail: AtomicBool,
    }

    impl MockFetcher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: None,
                fail: AtomicBool::new(false),
            })
        }

        fn gated() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: Some(tokio::sync::Semaphore::new(0)),
                fail: AtomicBool::new(false),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RotaFetcher for MockFetcher {
        async fn fetch(&self) -> RotaResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                let permit = gate.acquire().await.expect("semaphore closed");
                permit.forget();
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(RotaError::Transport {
                    message: "connection reset".to_string(),
                });
            }
            Ok(())
        }
    }

    fn start_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap()
    }

    fn coordinator(fetcher: Arc<MockFetcher>, clock: Arc<FakeClock>) -> RefreshCoordinator {
        RefreshCoordinator::new(fetcher, clock, RefreshConfig::default())
    }

    /// Let spawned tasks observe an advanced virtual clock.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifecycle() {
        let coordinator = coordinator(MockFetcher::new(), FakeClock::at(start_instant()));
        assert!(!coordinator.is_running());

        coordinator.start().unwrap();
        assert!(coordinator.is_running());
        assert!(matches!(
            coordinator.start(),
            Err(RotaError::RefreshAlreadyRunning)
        ));

        coordinator.stop().await.unwrap();
        assert!(!coordinator.is_running());
        assert!(matches!(
            coordinator.stop().await,
            Err(RotaError::RefreshNotRunning)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_timer_fires_while_enabled_and_visible() {
        let fetcher = MockFetcher::new();
        let coordinator = coordinator(Arc::clone(&fetcher), FakeClock::at(start_instant()));
        coordinator.start().unwrap();
        settle().await;

        tokio::time::advance(Duration::from_secs(61)).await;
        settle().await;
        assert_eq!(fetcher.calls(), 1);

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(fetcher.calls(), 2);

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabling_auto_refresh_stops_the_timer() {
        let fetcher = MockFetcher::new();
        let coordinator = coordinator(Arc::clone(&fetcher), FakeClock::at(start_instant()));
        coordinator.start().unwrap();

        coordinator.set_auto_refresh(false);
        settle().await;
        tokio::time::advance(Duration::from_secs(300)).await;
        settle().await;
        assert_eq!(fetcher.calls(), 0);

        coordinator.set_auto_refresh(true);
        settle().await;
        tokio::time::advance(Duration::from_secs(61)).await;
        settle().await;
        assert_eq!(fetcher.calls(), 1);

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_page_stops_the_timer() {
        let fetcher = MockFetcher::new();
        let coordinator = coordinator(Arc::clone(&fetcher), FakeClock::at(start_instant()));
        coordinator.start().unwrap();

        coordinator.set_page_visible(false);
        settle().await;
        tokio::time::advance(Duration::from_secs(300)).await;
        settle().await;
        assert_eq!(fetcher.calls(), 0);

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_regain_triggers_immediate_fetch() {
        let fetcher = MockFetcher::new();
        let coordinator = coordinator(Arc::clone(&fetcher), FakeClock::at(start_instant()));
        coordinator.start().unwrap();

        coordinator.set_page_visible(false);
        settle().await;
        coordinator.set_page_visible(true);
        settle().await;

        // No timer advance needed: the refetch fires on the transition.
        assert_eq!(fetcher.calls(), 1);

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_regain_without_auto_refresh_stays_quiet() {
        let fetcher = MockFetcher::new();
        let coordinator = coordinator(Arc::clone(&fetcher), FakeClock::at(start_instant()));
        coordinator.start().unwrap();

        coordinator.set_auto_refresh(false);
        coordinator.set_page_visible(false);
        settle().await;
        coordinator.set_page_visible(true);
        settle().await;
        assert_eq!(fetcher.calls(), 0);

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh_bypasses_gating() {
        let fetcher = MockFetcher::new();
        let clock = FakeClock::at(start_instant());
        let coordinator = coordinator(Arc::clone(&fetcher), Arc::clone(&clock));
        coordinator.start().unwrap();

        coordinator.set_auto_refresh(false);
        coordinator.set_page_visible(false);
        settle().await;

        coordinator.refresh().await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(coordinator.last_updated(), Some(start_instant()));
        assert_eq!(coordinator.last_updated_text(), "Updated just now");

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_triggers_coalesce() {
        let fetcher = MockFetcher::gated();
        let clock = FakeClock::at(start_instant());
        let coordinator = Arc::new(RefreshCoordinator::new(
            Arc::clone(&fetcher) as Arc<dyn RotaFetcher>,
            clock,
            RefreshConfig::default(),
        ));
        coordinator.start().unwrap();

        let first = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.refresh().await }
        });
        settle().await;
        assert!(coordinator.is_refreshing());

        let second = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.refresh().await }
        });
        settle().await;

        // Release the in-flight fetch; both triggers resolve from it.
        fetcher.gate.as_ref().unwrap().add_permits(1);
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert!(!coordinator.is_refreshing());

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesced_trigger_reports_in_flight_failure() {
        let fetcher = MockFetcher::gated();
        fetcher.fail.store(true, Ordering::SeqCst);
        let coordinator = Arc::new(RefreshCoordinator::new(
            Arc::clone(&fetcher) as Arc<dyn RotaFetcher>,
            FakeClock::at(start_instant()),
            RefreshConfig::default(),
        ));
        coordinator.start().unwrap();

        let first = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.refresh().await }
        });
        settle().await;
        let second = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.refresh().await }
        });
        settle().await;

        // One underlying fetch fails; both triggers must see that failure.
        fetcher.gate.as_ref().unwrap().add_permits(1);
        assert!(matches!(
            first.await.unwrap(),
            Err(RotaError::Transport { .. })
        ));
        assert!(matches!(
            second.await.unwrap(),
            Err(RotaError::Transport { .. })
        ));
        assert_eq!(fetcher.calls(), 1);

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_previous_timestamp() {
        let fetcher = MockFetcher::new();
        let clock = FakeClock::at(start_instant());
        let coordinator = coordinator(Arc::clone(&fetcher), Arc::clone(&clock));
        coordinator.start().unwrap();

        coordinator.refresh().await.unwrap();
        let first_update = coordinator.last_updated();
        assert!(first_update.is_some());

        clock.advance(chrono::Duration::minutes(5));
        fetcher.fail.store(true, Ordering::SeqCst);
        assert!(coordinator.refresh().await.is_err());
        assert_eq!(coordinator.last_updated(), first_update);

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_staleness_ticker_updates_text_while_paused() {
        let fetcher = MockFetcher::new();
        let clock = FakeClock::at(start_instant());
        let coordinator = coordinator(Arc::clone(&fetcher), Arc::clone(&clock));
        coordinator.start().unwrap();

        coordinator.refresh().await.unwrap();
        assert_eq!(coordinator.last_updated_text(), "Updated just now");

        // Pause polling entirely; the text must keep aging.
        coordinator.set_auto_refresh(false);
        settle().await;
        clock.advance(chrono::Duration::minutes(5));
        tokio::time::advance(Duration::from_secs(31)).await;
        settle().await;
        assert_eq!(coordinator.last_updated_text(), "Updated 5m ago");

        coordinator.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fetch_after_teardown() {
        let fetcher = MockFetcher::new();
        let coordinator = coordinator(Arc::clone(&fetcher), FakeClock::at(start_instant()));
        coordinator.start().unwrap();
        coordinator.stop().await.unwrap();

        tokio::time::advance(Duration::from_secs(600)).await;
        settle().await;
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let fetcher = MockFetcher::new();
        let coordinator = coordinator(Arc::clone(&fetcher), FakeClock::at(start_instant()));
        coordinator.start().unwrap();
        coordinator.stop().await.unwrap();

        coordinator.start().unwrap();
        settle().await;
        tokio::time::advance(Duration::from_secs(61)).await;
        settle().await;
        assert_eq!(fetcher.calls(), 1);

        coordinator.stop().await.unwrap();
    }
}
