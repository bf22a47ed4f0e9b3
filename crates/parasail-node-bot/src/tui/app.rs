/*
[INPUT]:  Stats and countdown updates published by the scheduler
[OUTPUT]: DashboardState snapshot and the DashboardSink that fills it
[POS]:    TUI app state shared between the scheduler and the draw loop
[UPDATE]: When adding panels or fields shown on the dashboard
*/

use std::sync::{Arc, Mutex as StdMutex};

use parasail_adapter::NodeStats;
use parasail_node_bot::sink::{StatusSink, format_stats};

use crate::tui::runtime::LogBufferHandle;

pub type DashboardHandle = Arc<StdMutex<DashboardState>>;

/// Shown until the check-in timer publishes its first tick
pub const COUNTDOWN_PLACEHOLDER: &str = "Next Check-in: --:--:--";

/// What the stats panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub countdown: String,
    pub stats_lines: Vec<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            countdown: COUNTDOWN_PLACEHOLDER.to_string(),
            stats_lines: vec!["Waiting for node stats...".to_string()],
        }
    }
}

/// [`StatusSink`] backed by the dashboard state
#[derive(Clone)]
pub struct DashboardSink {
    state: DashboardHandle,
}

impl DashboardSink {
    pub fn new(state: DashboardHandle) -> Self {
        Self { state }
    }

    pub fn state(&self) -> DashboardHandle {
        self.state.clone()
    }

    fn update(&self, apply: impl FnOnce(&mut DashboardState)) {
        match self.state.lock() {
            Ok(mut guard) => apply(&mut guard),
            Err(poisoned) => apply(&mut poisoned.into_inner()),
        }
    }
}

impl StatusSink for DashboardSink {
    fn publish_stats(&self, stats: &NodeStats) {
        let lines = format_stats(stats);
        self.update(|state| state.stats_lines = lines);
    }

    fn publish_countdown(&self, countdown: &str) {
        self.update(|state| state.countdown = countdown.to_string());
    }
}

/// Copy of everything one frame needs, taken without holding locks while drawing
pub(super) struct FrameSnapshot {
    pub(super) dashboard: DashboardState,
    pub(super) log_lines: Vec<String>,
}

impl FrameSnapshot {
    pub(super) fn capture(
        dashboard: &DashboardHandle,
        log_buffer: &LogBufferHandle,
        log_rows: usize,
    ) -> Self {
        let dashboard = match dashboard.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let log_lines = match log_buffer.lock() {
            Ok(guard) => guard.tail(log_rows),
            Err(poisoned) => poisoned.into_inner().tail(log_rows),
        };
        Self {
            dashboard,
            log_lines,
        }
    }
}
