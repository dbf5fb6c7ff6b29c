use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use portfolio_core::contact::ContactSubmission;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::{
        popup::{centered_rect_fixed, draw_popup_frame, render_backdrop},
        Component,
    },
    state::State,
    tui::{EventResponse, Frame},
};

/// Modal confirmation shown after a valid submit. Dismissable via the close
/// control (Enter/Esc) or a mouse click outside the dialog content area.
pub struct SuccessPopup {
    submission: ContactSubmission,
    /// Dialog rect from the last draw, for the click-outside check.
    dialog: Option<Rect>,
}

impl SuccessPopup {
    pub fn new(submission: ContactSubmission) -> Self {
        Self {
            submission,
            dialog: None,
        }
    }

    fn summary_lines(&self) -> Vec<Line<'static>> {
        let s = &self.submission;
        vec![
            Line::from(vec![
                Span::styled("Siuntėjas: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{} {}", s.first_name, s.last_name)),
            ]),
            Line::from(vec![
                Span::styled("Vidurkis: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(s.formatted_average()),
            ]),
        ]
    }
}

impl Component for SuccessPopup {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                Ok(Some(EventResponse::Stop(Action::ClosePopup)))
            }
            // modal: swallow everything else
            _ => Ok(Some(EventResponse::Stop(Action::Update))),
        }
    }

    fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if let MouseEventKind::Down(_) = mouse.kind {
            let inside = self
                .dialog
                .map(|d| d.contains(Position::new(mouse.column, mouse.row)))
                .unwrap_or(true);
            if !inside {
                return Ok(Some(EventResponse::Stop(Action::ClosePopup)));
            }
        }
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        render_backdrop(f, area);

        let dialog = centered_rect_fixed(area, 48, 10);
        draw_popup_frame(f, dialog, "Žinutė išsiųsta");
        self.dialog = Some(dialog);

        let inner = Rect {
            x: dialog.x.saturating_add(2),
            y: dialog.y.saturating_add(1),
            width: dialog.width.saturating_sub(4),
            height: dialog.height.saturating_sub(2),
        };

        let mut lines = vec![Line::from(Span::styled(
            "Ačiū! Tavo žinutė gauta.",
            Style::default().fg(Color::Green),
        ))];
        lines.push(Line::raw(""));
        lines.extend(self.summary_lines());
        lines.push(Line::raw(""));
        lines.push(
            Line::from(Span::styled(
                "[ Uždaryti ]",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );

        let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(para, inner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};
    use portfolio_core::contact::FieldKey;
    use pretty_assertions::assert_eq;

    fn popup() -> SuccessPopup {
        let submission = ContactSubmission::from_values(|key| {
            match key {
                FieldKey::FirstName => "Jonas",
                FieldKey::LastName => "Jonaitis",
                FieldKey::Email => "j@j.com",
                FieldKey::Phone => "+370 612 34567",
                FieldKey::Address => "Vilnius",
                FieldKey::Q1 => "8",
                FieldKey::Q2 => "7",
                FieldKey::Q3 => "9",
            }
            .to_string()
        })
        .expect("all fields valid");
        SuccessPopup::new(submission)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn enter_and_escape_close_the_popup() {
        let mut popup = popup();
        let mut state = State::default();
        for code in [KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(
                popup.handle_key_events(key(code), &mut state).unwrap(),
                Some(EventResponse::Stop(Action::ClosePopup))
            );
        }
    }

    #[test]
    fn other_keys_are_swallowed_without_closing() {
        let mut popup = popup();
        let mut state = State::default();
        assert_eq!(
            popup
                .handle_key_events(key(KeyCode::Char('q')), &mut state)
                .unwrap(),
            Some(EventResponse::Stop(Action::Update))
        );
    }

    #[test]
    fn click_outside_the_dialog_closes_it_click_inside_does_not() {
        let mut popup = popup();
        popup.dialog = Some(Rect::new(20, 10, 48, 10));
        let mut state = State::default();

        assert_eq!(
            popup.handle_mouse_events(click(5, 5), &mut state).unwrap(),
            Some(EventResponse::Stop(Action::ClosePopup))
        );
        assert_eq!(
            popup.handle_mouse_events(click(25, 12), &mut state).unwrap(),
            Some(EventResponse::Stop(Action::Update))
        );
    }

    #[test]
    fn clicks_before_the_first_draw_never_close() {
        // no dialog rect recorded yet, so there is no "outside"
        let mut popup = popup();
        let mut state = State::default();
        assert_eq!(
            popup.handle_mouse_events(click(0, 0), &mut state).unwrap(),
            Some(EventResponse::Stop(Action::Update))
        );
    }
}
