/*
[INPUT]:  SessionManager, StatusSink, schedule timing, shutdown token
[OUTPUT]: Startup sequence plus recurring check-in and stats refresh
[POS]:    Lifecycle layer - top-level error boundary of the bot
[UPDATE]: When changing startup order, timer periods, or failure policy
*/

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result as AnyResult, ensure};
use parasail_adapter::{NodeStats, Result, SessionManager};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::sink::{StatusSink, format_countdown};

pub const DEFAULT_CHECKIN_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_STATS_PERIOD: Duration = Duration::from_secs(60);
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Timer periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTiming {
    pub checkin_period: Duration,
    pub stats_period: Duration,
    pub countdown_tick: Duration,
}

impl Default for ScheduleTiming {
    fn default() -> Self {
        Self {
            checkin_period: DEFAULT_CHECKIN_PERIOD,
            stats_period: DEFAULT_STATS_PERIOD,
            countdown_tick: COUNTDOWN_TICK,
        }
    }
}

impl ScheduleTiming {
    pub fn new(checkin_period: Duration, stats_period: Duration) -> AnyResult<Self> {
        ensure!(!checkin_period.is_zero(), "check-in interval must be positive");
        ensure!(!stats_period.is_zero(), "stats interval must be positive");
        Ok(Self {
            checkin_period,
            stats_period,
            countdown_tick: COUNTDOWN_TICK,
        })
    }
}

/// Drives onboarding, check-in and stats refresh.
///
/// Timers are armed only after the startup sequence succeeds. Errors inside a
/// timer callback are logged and the timer keeps running.
pub struct Scheduler {
    session: Arc<SessionManager>,
    sink: Arc<dyn StatusSink>,
    timing: ScheduleTiming,
}

impl Scheduler {
    pub fn new(
        session: Arc<SessionManager>,
        sink: Arc<dyn StatusSink>,
        timing: ScheduleTiming,
    ) -> Self {
        Self {
            session,
            sink,
            timing,
        }
    }

    /// Startup sequence: authenticate if needed, onboard, check in, fetch stats.
    pub async fn start(&self) -> Result<()> {
        info!("Starting Parasail Node Bot");

        if !self.session.session().await.is_authenticated() {
            self.session.authenticate().await?;
        }

        let wallet_address = self.session.wallet_address().await;
        info!("Wallet Address: {wallet_address}");

        self.session.onboard().await?;
        self.session.check_in().await?;
        self.refresh_stats().await?;
        Ok(())
    }

    /// One check-in period: re-assert onboarding, check in, refresh stats.
    pub async fn run_checkin_cycle(&self) -> Result<()> {
        self.session.onboard().await?;
        self.session.check_in().await?;
        self.refresh_stats().await?;
        Ok(())
    }

    /// Fetch stats and push them to the sink
    pub async fn refresh_stats(&self) -> Result<NodeStats> {
        let stats = self.session.node_stats().await?;
        self.sink.publish_stats(&stats);
        Ok(stats)
    }

    /// Run the startup sequence, then both timers until `shutdown` fires.
    ///
    /// Returns the startup error, after logging it, without arming any timer.
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) -> Result<()> {
        if let Err(err) = self.start().await {
            error!("Initialization failed: {err}");
            return Err(err);
        }

        let checkin = tokio::spawn(self.clone().checkin_loop(shutdown.clone()));
        let stats = tokio::spawn(self.clone().stats_loop(shutdown.clone()));

        shutdown.cancelled().await;

        for handle in [checkin, stats] {
            if let Err(err) = handle.await {
                warn!(error = %err, "timer task ended abnormally");
            }
        }
        Ok(())
    }

    async fn checkin_loop(self: Arc<Self>, shutdown: CancellationToken) {
        loop {
            let deadline = Instant::now() + self.timing.checkin_period;
            if !self.count_down(deadline, &shutdown).await {
                return;
            }

            info!("Time to check in!");
            if let Err(err) = self.run_checkin_cycle().await {
                error!("Routine tasks failed: {err}");
            }
        }
    }

    /// Publish the countdown every tick until `deadline`.
    ///
    /// Returns `false` if shutdown was requested first.
    async fn count_down(&self, deadline: Instant, shutdown: &CancellationToken) -> bool {
        let mut ticker = tokio::time::interval(self.timing.countdown_tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let fire = tokio::time::sleep_until(deadline);
        tokio::pin!(fire);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return false,
                _ = &mut fire => {
                    self.sink.publish_countdown(&format_countdown(Duration::ZERO));
                    return true;
                }
                _ = ticker.tick() => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    self.sink.publish_countdown(&format_countdown(remaining));
                }
            }
        }
    }

    async fn stats_loop(self: Arc<Self>, shutdown: CancellationToken) {
        let period = self.timing.stats_period;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return,
                _ = ticker.tick() => {
                    if let Err(err) = self.refresh_stats().await {
                        warn!("Stats update failed: {err}");
                    }
                }
            }
        }
    }
}
