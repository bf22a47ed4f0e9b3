/*
[INPUT]:  Tail of the log buffer sized to the panel
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: When changing log line styling
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::layout::border_style;

pub(super) fn draw_logs(frame: &mut ratatui::Frame, area: Rect, lines: &[String]) {
    let text = lines
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), line_style(line))))
        .collect::<Vec<_>>();
    let log_widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Logs"),
    );
    frame.render_widget(log_widget, area);
}

fn line_style(line: &str) -> Style {
    if line.contains("ERROR") {
        Style::default().fg(Color::LightRed)
    } else if line.contains("WARN") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}
