use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    components::Component,
    state::{InputMode, State},
    tui::Frame,
};

/// Bottom bar with the key hints for the active page.
#[derive(Default)]
pub struct FooterComponent;

impl FooterComponent {
    pub fn new() -> Self {
        Self
    }

    fn hints(state: &State) -> Vec<(&'static str, &'static str)> {
        if state.input_mode == InputMode::Insert {
            return vec![("Enter", "commit"), ("Esc", "cancel")];
        }
        let mut hints = match state.active_page {
            0 => vec![
                ("↑/↓/Tab", "fields"),
                ("Enter", "edit / submit"),
            ],
            _ => vec![
                ("←↑↓→", "cursor"),
                ("Enter/Space", "flip"),
                ("s", "start"),
                ("r", "reset"),
                ("d", "difficulty"),
            ],
        };
        hints.extend([("1/2", "page"), ("q", "quit")]);
        hints
    }
}

impl Component for FooterComponent {
    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, what)) in Self::hints(state).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {what}"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let para = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::TOP))
            .style(Style::default());
        f.render_widget(para, area);
        Ok(())
    }
}
