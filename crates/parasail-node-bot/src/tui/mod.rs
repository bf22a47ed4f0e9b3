/*
[INPUT]:  Scheduler status updates and tracing output
[OUTPUT]: Ratatui dashboard with logs, node stats and check-in countdown
[POS]:    TUI module for the parasail-node-bot binary
[UPDATE]: When changing TUI layout, keybindings, or log capture
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub(crate) use app::DashboardSink;
pub(crate) use runtime::{LOG_BUFFER_CAPACITY, LogBuffer, LogWriterFactory, run_dashboard};
