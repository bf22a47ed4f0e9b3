/*
[INPUT]:  DashboardState countdown and formatted stats lines
[OUTPUT]: Node stats panel rendered into Ratatui frame
[POS]:    TUI UI stats panel rendering
[UPDATE]: When changing what the stats panel shows
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::layout::border_style;
use crate::tui::app::DashboardState;

pub(super) fn draw_stats(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let countdown_style = Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);

    let mut text = vec![
        Line::from(Span::styled(state.countdown.clone(), countdown_style)),
        Line::default(),
    ];
    text.extend(state.stats_lines.iter().map(|line| Line::from(line.clone())));

    let widget = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Node Stats"),
    );
    frame.render_widget(widget, area);
}
