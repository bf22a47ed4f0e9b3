/*
[INPUT]:  Frame area
[OUTPUT]: Dashboard regions, banner and footer widgets, shared styles
[POS]:    TUI UI layout module
[UPDATE]: When changing panel proportions or the colour palette
*/

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub(super) struct Regions {
    pub(super) banner: Rect,
    pub(super) logs: Rect,
    pub(super) stats: Rect,
    pub(super) footer: Rect,
}

/// Banner on top, logs 70% and stats 30% side by side, footer at the bottom
pub(super) fn split(area: Rect) -> Regions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    Regions {
        banner: rows[0],
        logs: middle[0],
        stats: middle[1],
        footer: rows[2],
    }
}

pub(super) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(super) fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn draw_banner(frame: &mut ratatui::Frame, area: Rect) {
    let banner = Paragraph::new(Line::from(Span::styled("Parasail Node Bot", title_style())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        );
    frame.render_widget(banner, area);
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::raw("Press "),
        Span::styled("Q", key_style),
        Span::raw(" to Quit"),
    ]);
    let footer = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_gives_logs_the_wider_column() {
        let regions = split(Rect::new(0, 0, 100, 40));
        assert_eq!(regions.banner.height, 3);
        assert_eq!(regions.footer.height, 3);
        assert_eq!(regions.logs.width, 70);
        assert_eq!(regions.stats.width, 30);
        assert_eq!(regions.logs.height, 34);
    }
}
