/*
[INPUT]:  Dashboard state and log buffer handles
[OUTPUT]: Full dashboard frame: banner, logs, stats, footer
[POS]:    TUI UI module root
[UPDATE]: When adding or rearranging panels
*/

mod layout;
mod logs;
mod stats;

use crate::tui::app::{DashboardHandle, FrameSnapshot};
use crate::tui::runtime::LogBufferHandle;

pub(in crate::tui) fn draw_dashboard(
    frame: &mut ratatui::Frame,
    dashboard: &DashboardHandle,
    log_buffer: &LogBufferHandle,
) {
    let regions = layout::split(frame.area());
    let log_rows = regions.logs.height.saturating_sub(2) as usize;
    let snapshot = FrameSnapshot::capture(dashboard, log_buffer, log_rows);

    layout::draw_banner(frame, regions.banner);
    logs::draw_logs(frame, regions.logs, &snapshot.log_lines);
    stats::draw_stats(frame, regions.stats, &snapshot.dashboard);
    layout::draw_footer(frame, regions.footer);
}
