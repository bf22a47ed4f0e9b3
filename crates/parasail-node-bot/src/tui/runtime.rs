/*
[INPUT]:  Dashboard state, tracing output, crossterm key events, shutdown token
[OUTPUT]: Dashboard run loop plus the log buffer fed by the tracing subscriber
[POS]:    TUI runtime loop and log capture
[UPDATE]: When changing refresh cadence, log capture, or quit handling
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use super::app::DashboardHandle;
use super::events::is_quit_key;
use super::terminal::TerminalGuard;
use super::ui::draw_dashboard;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

/// Bounded ring of rendered log lines, oldest dropped first
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn handle(capacity: usize) -> LogBufferHandle {
        Arc::new(StdMutex::new(Self::new(capacity)))
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(start).cloned().collect()
    }
}

/// `MakeWriter` that routes formatted tracing events into a [`LogBuffer`]
#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) -> io::Result<()> {
        let mut guard = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("log buffer lock poisoned"))?;
        guard.push_line(line);
        Ok(())
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            self.push(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line)?;
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

/// Draw the dashboard until a quit key is pressed or `shutdown` fires.
///
/// A quit key cancels `shutdown` so the scheduler stops with the UI.
pub async fn run_dashboard(
    dashboard: DashboardHandle,
    log_buffer: LogBufferHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tick.tick() => {}
            Some(event) = event_rx.recv() => {
                if let CrosstermEvent::Key(key) = event {
                    if is_quit_key(&key) {
                        shutdown.cancel();
                        break;
                    }
                }
            }
        }

        terminal.draw(|frame| draw_dashboard(frame, &dashboard, &log_buffer))?;
    }

    input_shutdown.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_buffer_drops_oldest_line() {
        let mut buffer = LogBuffer::new(2);
        buffer.push_line("a".to_string());
        buffer.push_line("b".to_string());
        buffer.push_line("c".to_string());
        assert_eq!(buffer.tail(10), vec!["b", "c"]);
        assert_eq!(buffer.tail(1), vec!["c"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut buffer = LogBuffer::new(0);
        buffer.push_line("a".to_string());
        assert!(buffer.tail(10).is_empty());
    }

    #[test]
    fn test_writer_splits_lines_and_flushes_remainder() {
        let buffer = LogBuffer::handle(10);
        let factory = LogWriterFactory::new(buffer.clone());

        {
            let mut writer = factory.make_writer();
            writer.write_all(b"first\r\nsecond\nthi").unwrap();
            writer.write_all(b"rd").unwrap();
        }

        let lines = buffer.lock().unwrap().tail(10);
        assert_eq!(lines, vec!["first", "second", "third"]);
    }
}
