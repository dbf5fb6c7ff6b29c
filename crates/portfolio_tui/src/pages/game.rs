use std::time::Instant;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use portfolio_core::game::{CardState, Difficulty, GameSession, RESOLVE_DELAY};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

use crate::{
    action::Action,
    components::popup::centered_rect_fixed,
    state::State,
    tui::{EventResponse, Frame},
};

use super::Page;

/// Terminal cell footprint of one card (bordered 5x3 block plus spacing).
const CELL_W: u16 = 7;
const CELL_H: u16 = 3;

/// The memory matching game: a shuffled board of symbol pairs, cursor- or
/// mouse-driven flips, and a fixed delay before each pair resolves.
pub struct GamePage {
    difficulty: Difficulty,
    session: Option<GameSession>,
    cursor: usize,
    /// When the pending pair gets compared; armed by the second flip and
    /// dropped on restart/reset so a stale resolve can never fire.
    resolve_at: Option<Instant>,
    /// Board rect from the last draw, for mouse hit-testing.
    board_area: Option<Rect>,
}

impl GamePage {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            session: None,
            cursor: 0,
            resolve_at: None,
            board_area: None,
        }
    }

    fn start(&mut self) {
        self.session = Some(GameSession::new(self.difficulty, &mut rand::thread_rng()));
        self.cursor = 0;
        self.resolve_at = None;
        tracing::info!(difficulty = %self.difficulty, "new round dealt");
    }

    fn reset(&mut self) {
        self.session = None;
        self.cursor = 0;
        self.resolve_at = None;
    }

    fn try_flip(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.flip(index) == portfolio_core::game::FlipOutcome::PairPending {
            // let the player see both symbols before the comparison
            self.resolve_at = Some(Instant::now() + RESOLVE_DELAY);
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let Some(session) = &self.session else {
            return;
        };
        let cols = session.difficulty().columns() as isize;
        let total = session.cards().len() as isize;
        let rows = total / cols;

        let mut col = self.cursor as isize % cols + dx;
        let mut row = self.cursor as isize / cols + dy;
        col = col.rem_euclid(cols);
        row = row.rem_euclid(rows);
        self.cursor = (row * cols + col) as usize;
    }

    /// Map a mouse position to a board cell index.
    fn cell_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.board_area?;
        let session = self.session.as_ref()?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let col = ((column - area.x) / CELL_W) as usize;
        let line = ((row - area.y) / CELL_H) as usize;
        let cols = session.difficulty().columns();
        if col >= cols {
            return None;
        }
        let index = line * cols + col;
        (index < session.cards().len()).then_some(index)
    }

    fn header_line(&self) -> Line<'static> {
        let (moves, matches, pairs) = match &self.session {
            Some(s) => (s.moves(), s.matches(), s.difficulty().pair_count() as u32),
            None => (0, 0, self.difficulty.pair_count() as u32),
        };
        Line::from(vec![
            Span::styled("Sudėtingumas: ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.difficulty.to_string()),
            Span::styled("   Ėjimai: ", Style::default().fg(Color::DarkGray)),
            Span::raw(moves.to_string()),
            Span::styled("   Poros: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{matches}/{pairs}")),
        ])
    }

    fn draw_board(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let Some(session) = &self.session else {
            self.board_area = None;
            let hint = Paragraph::new("Spausk 's' pradėti žaidimą").centered();
            frame.render_widget(hint, centered_rect_fixed(area, 40, 1));
            return;
        };

        let cols = session.difficulty().columns() as u16;
        let rows = (session.cards().len() as u16).div_ceil(cols);
        let board = centered_rect_fixed(area, cols * CELL_W, rows * CELL_H);
        self.board_area = Some(board);

        for (i, card) in session.cards().iter().enumerate() {
            let cell = Rect {
                x: board.x + (i as u16 % cols) * CELL_W,
                y: board.y + (i as u16 / cols) * CELL_H,
                width: CELL_W - 1,
                height: CELL_H,
            };
            if cell.right() > area.right() || cell.bottom() > area.bottom() {
                continue;
            }

            let (content, style) = match card.state {
                CardState::Hidden => ("·".to_string(), Style::default().fg(Color::DarkGray)),
                CardState::Flipped => (
                    card.symbol.to_string(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                CardState::Matched => (
                    card.symbol.to_string(),
                    Style::default().fg(Color::Green),
                ),
            };
            let border_style = if i == self.cursor {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let cell_widget = Paragraph::new(Line::from(Span::styled(content, style)).centered())
                .block(Block::default().borders(Borders::ALL).border_style(border_style));
            frame.render_widget(cell_widget, cell);
        }

        if session.is_won() {
            self.draw_win_banner(frame, area, session.moves());
        }
    }

    fn draw_win_banner(&self, frame: &mut Frame<'_>, area: Rect, moves: u32) {
        let banner = centered_rect_fixed(area, 44, 7);
        frame.render_widget(Clear, banner);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
            banner,
        );
        let inner = Rect {
            x: banner.x + 1,
            y: banner.y + 1,
            width: banner.width.saturating_sub(2),
            height: banner.height.saturating_sub(2),
        };
        // big-text font only covers ASCII, so the banner word stays plain
        let big = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::default().fg(Color::Green))
            .lines(vec!["Valio!".into()])
            .alignment(ratatui::layout::Alignment::Center)
            .build();
        frame.render_widget(
            big,
            Rect {
                height: inner.height.saturating_sub(1),
                ..inner
            },
        );
        frame.render_widget(
            Paragraph::new(format!("Sveikiname, laimėjai! Ėjimų: {moves}")).centered(),
            Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            },
        );
    }
}

impl Page for GamePage {
    fn name(&self) -> &'static str {
        "game"
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Char('s') => self.start(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('d') => self.difficulty = self.difficulty.cycle(),
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.try_flip(self.cursor),
            _ => return Ok(None),
        }
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let Some(index) = self.cell_at(mouse.column, mouse.row) else {
            return Ok(None);
        };
        self.cursor = index;
        self.try_flip(index);
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn update(&mut self, action: Action, _state: &mut State) -> Result<Option<Action>> {
        if action == Action::Tick {
            if let Some(at) = self.resolve_at {
                if Instant::now() >= at {
                    self.resolve_at = None;
                    if let Some(session) = self.session.as_mut() {
                        session.resolve_pending();
                        if session.is_won() {
                            tracing::info!(moves = session.moves(), "round won");
                        }
                    }
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        let block = Block::default()
            .title(" Atminties žaidimas ")
            .borders(Borders::ALL)
            .border_set(ratatui::symbols::border::ROUNDED);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Rect {
            height: 1.min(inner.height),
            ..inner
        };
        frame.render_widget(Paragraph::new(self.header_line()), header);

        let board_area = Rect {
            y: inner.y.saturating_add(2),
            height: inner.height.saturating_sub(2),
            ..inner
        };
        self.draw_board(frame, board_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn started_page() -> GamePage {
        let mut page = GamePage::new(Difficulty::Easy);
        page.start();
        page
    }

    #[test]
    fn start_deals_a_board_and_clears_the_timer() {
        let mut page = GamePage::new(Difficulty::Easy);
        assert!(page.session.is_none());
        page.start();
        assert_eq!(page.session.as_ref().unwrap().cards().len(), 12);
        assert_eq!(page.resolve_at, None);
    }

    #[test]
    fn second_flip_arms_the_resolve_timer() {
        let mut page = started_page();
        page.try_flip(0);
        assert!(page.resolve_at.is_none());
        page.try_flip(1);
        assert!(page.resolve_at.is_some());
        assert_eq!(page.session.as_ref().unwrap().moves(), 1);
    }

    #[test]
    fn restart_mid_flip_cancels_the_pending_resolution() {
        let mut page = started_page();
        page.try_flip(0);
        page.try_flip(1);
        assert!(page.resolve_at.is_some());

        page.start();
        assert!(page.resolve_at.is_none());
        let session = page.session.as_ref().unwrap();
        assert_eq!(session.moves(), 0);
        assert!(session.pending_pair().is_empty());
    }

    #[test]
    fn elapsed_timer_resolves_the_pair_on_tick() {
        let mut page = started_page();
        page.try_flip(0);
        page.try_flip(1);
        // pretend the delay already elapsed
        page.resolve_at = Some(Instant::now() - std::time::Duration::from_millis(1));

        let mut state = State::default();
        page.update(Action::Tick, &mut state).unwrap();
        assert_eq!(page.resolve_at, None);
        assert!(page.session.as_ref().unwrap().pending_pair().is_empty());
    }

    #[test]
    fn cursor_wraps_around_the_grid() {
        let mut page = started_page();
        assert_eq!(page.cursor, 0);
        page.move_cursor(-1, 0);
        assert_eq!(page.cursor, 3); // 4 columns on easy
        page.move_cursor(1, 0);
        assert_eq!(page.cursor, 0);
        page.move_cursor(0, -1);
        assert_eq!(page.cursor, 8); // 3 rows of 4
    }

    #[test]
    fn clicking_a_cell_maps_through_the_board_rect_and_flips() {
        let mut page = started_page();
        page.board_area = Some(Rect::new(10, 5, 4 * CELL_W, 3 * CELL_H));

        // second column, second row on the easy 4-column grid
        assert_eq!(page.cell_at(10 + CELL_W, 5 + CELL_H), Some(5));
        assert_eq!(page.cell_at(0, 0), None);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 5,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        let mut state = State::default();
        let response = page.handle_mouse_events(click, &mut state).unwrap();
        assert_eq!(response, Some(EventResponse::Stop(Action::Update)));
        assert_eq!(page.cursor, 0);
        assert_eq!(
            page.session.as_ref().unwrap().cards()[0].state,
            CardState::Flipped
        );
    }

    #[test]
    fn clicks_off_the_board_are_ignored() {
        let mut page = started_page();
        page.board_area = Some(Rect::new(10, 5, 4 * CELL_W, 3 * CELL_H));
        let miss = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 9,
            row: 4,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        let mut state = State::default();
        assert_eq!(page.handle_mouse_events(miss, &mut state).unwrap(), None);
        assert!(page
            .session
            .as_ref()
            .unwrap()
            .cards()
            .iter()
            .all(|c| c.state == CardState::Hidden));
    }

    #[test]
    fn difficulty_cycles_but_only_applies_on_next_deal() {
        let mut page = started_page();
        let mut state = State::default();
        page.handle_key_events(
            KeyEvent::new(KeyCode::Char('d'), crossterm::event::KeyModifiers::NONE),
            &mut state,
        )
        .unwrap();
        assert_eq!(page.difficulty, Difficulty::Hard);
        assert_eq!(page.session.as_ref().unwrap().cards().len(), 12);

        page.start();
        assert_eq!(page.session.as_ref().unwrap().cards().len(), 24);
    }
}
