use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use portfolio_core::contact::ContactSubmission;
use portfolio_core::validation::format_phone;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::Action,
    form::{contact_schema, FieldKind, FormSchema, FormState},
    state::{InputMode, State},
    tui::{EventResponse, Frame},
};

use super::Page;

/// Focus slot index of the submit control, one past the last field.
const SUBMIT_SLOT: usize = 8;
/// Each field renders as a value line plus a message line.
const FIELD_ROWS: u16 = 2;
/// Fixed label column width; the editor cursor is offset by this.
const LABEL_W: u16 = 14;

/// The contact form: live per-keystroke validation, phone auto-formatting,
/// submit gating and the results block.
pub struct ContactPage {
    schema: FormSchema,
    form: FormState,
    focused: usize,
    editing: bool,
    input: Input,
    edit_backup: String,
    submit_enabled: bool,
    submission: Option<ContactSubmission>,
    /// Inner form rect from the last draw, for mouse hit-testing.
    form_area: Option<Rect>,
}

impl ContactPage {
    pub fn new() -> Self {
        Self {
            schema: contact_schema(),
            form: FormState::default(),
            focused: 0,
            editing: false,
            input: Input::default(),
            edit_backup: String::new(),
            submit_enabled: false,
            submission: None,
            form_area: None,
        }
    }

    fn slot_count(&self) -> usize {
        self.schema.field_count() + 1
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.slot_count();
    }

    fn focus_prev(&mut self) {
        self.focused = self
            .focused
            .checked_sub(1)
            .unwrap_or(self.slot_count() - 1);
    }

    /// Re-run all validators and refresh the submit-control enablement.
    fn revalidate(&mut self) {
        self.submit_enabled = self.form.validate_all(&self.schema);
    }

    fn start_editing(&mut self, state: &mut State) {
        let key = match self.schema.fields.get(self.focused) {
            Some(field) => field.key,
            None => return,
        };
        self.edit_backup = self.form.value(key).to_string();
        self.input = Input::new(self.edit_backup.clone());
        self.editing = true;
        state.input_mode = InputMode::Insert;
    }

    fn commit_editing(&mut self, state: &mut State) {
        // Values are written through on every keystroke; just leave edit mode.
        self.editing = false;
        self.input = Input::default();
        state.input_mode = InputMode::Normal;
        self.revalidate();
    }

    fn cancel_editing(&mut self, state: &mut State) {
        if let Some(field) = self.schema.fields.get(self.focused) {
            let backup = std::mem::take(&mut self.edit_backup);
            self.form.set_value(field.key, backup);
        }
        self.editing = false;
        self.input = Input::default();
        state.input_mode = InputMode::Normal;
        self.revalidate();
    }

    /// One keystroke inside the active editor: update the editor, apply the
    /// phone auto-format, write the value through and re-validate.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        let (field_key, kind) = match self.schema.fields.get(self.focused) {
            Some(field) => (field.key, field.kind),
            None => return,
        };
        self.input
            .handle_event(&crossterm::event::Event::Key(key));
        if kind == FieldKind::Phone {
            let formatted = format_phone(self.input.value());
            if formatted != self.input.value() {
                self.input = Input::new(formatted);
            }
        }
        self.form.set_value(field_key, self.input.value().to_string());
        self.revalidate();
    }

    /// Activate the submit control. No-op while any field is invalid.
    fn try_submit(&mut self) -> Option<Action> {
        self.revalidate();
        if !self.submit_enabled {
            return None;
        }
        let form = &self.form;
        let submission = ContactSubmission::from_values(|key| form.value(key).to_string())?;
        tracing::info!(email = %submission.email, "contact form submitted");
        self.submission = Some(submission.clone());
        Some(Action::ContactSubmitted(submission))
    }

    /// Map a mouse position to a focus slot, per the draw layout.
    fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.form_area?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let r = row - area.y;
        let field_rows = self.schema.field_count() as u16 * FIELD_ROWS;
        if r < field_rows {
            Some((r / FIELD_ROWS) as usize)
        } else if r == field_rows + 1 {
            Some(SUBMIT_SLOT)
        } else {
            None
        }
    }

    fn submit_line(&self) -> Line<'static> {
        let focused = self.focused == SUBMIT_SLOT;
        let mut style = if self.submit_enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Line::from(Span::styled("[ Siųsti ]", style))
    }

    /// Summary block shown under the form after a successful submit.
    fn results_lines(&self) -> Vec<Line<'static>> {
        let Some(s) = &self.submission else {
            return Vec::new();
        };
        let entry = |label: String, value: String| {
            Line::from(vec![
                Span::styled(
                    format!("{label}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(value),
            ])
        };
        vec![
            Line::from(Span::styled(
                "Rezultatai",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            entry("Vardas".into(), s.first_name.clone()),
            entry("Pavardė".into(), s.last_name.clone()),
            entry("El. paštas".into(), s.email.clone()),
            entry("Tel. numeris".into(), s.phone.clone()),
            entry("Adresas".into(), s.address.clone()),
            entry("Įvertinimai".into(), format!("{}, {}, {}", s.q1, s.q2, s.q3)),
            entry(
                format!("{} {}", s.first_name, s.last_name),
                s.formatted_average(),
            ),
        ]
    }
}

impl Page for ContactPage {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn init(&mut self, _state: &mut State) -> Result<()> {
        // Validate up front so required-field messages show immediately and
        // the submit control starts disabled.
        self.revalidate();
        Ok(())
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if self.editing {
            match key.code {
                KeyCode::Enter => self.commit_editing(state),
                KeyCode::Esc => self.cancel_editing(state),
                _ => self.handle_edit_key(key),
            }
            return Ok(Some(EventResponse::Stop(Action::Update)));
        }

        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_prev();
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next();
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Enter => {
                if self.focused == SUBMIT_SLOT {
                    let action = self.try_submit().unwrap_or(Action::Update);
                    Ok(Some(EventResponse::Stop(action)))
                } else {
                    self.start_editing(state);
                    Ok(Some(EventResponse::Stop(Action::Update)))
                }
            }
            _ => Ok(None),
        }
    }

    fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let Some(slot) = self.slot_at(mouse.column, mouse.row) else {
            return Ok(None);
        };
        if self.editing {
            self.commit_editing(state);
        }
        self.focused = slot;
        if slot == SUBMIT_SLOT {
            let action = self.try_submit().unwrap_or(Action::Update);
            return Ok(Some(EventResponse::Stop(action)));
        }
        self.start_editing(state);
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        let block = Block::default()
            .title(format!(" {} ", self.schema.title))
            .borders(Borders::ALL)
            .border_set(symbols::border::ROUNDED);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.form_area = Some(inner);

        let mut lines: Vec<Line> = Vec::new();
        for (i, field) in self.schema.fields.iter().enumerate() {
            let focused = i == self.focused;
            let editing_this = focused && self.editing;

            let value = if editing_this {
                self.input.value().to_string()
            } else {
                self.form.value(field.key).to_string()
            };
            let label_style = if focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value_style = if focused {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Cyan)
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", format!("{}:", field.label), width = LABEL_W as usize),
                    label_style,
                ),
                Span::styled(value, value_style),
            ]));

            // message line: inline error wins over the help hint
            let message = match (self.form.error(field.key), field.help) {
                (Some(err), _) => Span::styled(err, Style::default().fg(Color::Red)),
                (None, Some(help)) => Span::styled(help, Style::default().fg(Color::DarkGray)),
                (None, None) => Span::raw(""),
            };
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(LABEL_W as usize)),
                message,
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(self.submit_line());
        if self.submission.is_some() {
            lines.push(Line::raw(""));
            lines.extend(self.results_lines());
        }

        frame.render_widget(Paragraph::new(Text::from(lines)), inner);

        if self.editing {
            frame.set_cursor_position(Position::new(
                inner.x + LABEL_W + self.input.visual_cursor() as u16,
                inner.y + self.focused as u16 * FIELD_ROWS,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::contact::FieldKey;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
    }

    fn type_str(page: &mut ContactPage, state: &mut State, text: &str) {
        for c in text.chars() {
            page.handle_key_events(key(KeyCode::Char(c)), state).unwrap();
        }
    }

    fn fill_valid(page: &mut ContactPage) {
        page.form.set_value(FieldKey::FirstName, "Jonas");
        page.form.set_value(FieldKey::LastName, "Jonaitis");
        page.form.set_value(FieldKey::Email, "j@j.com");
        page.form.set_value(FieldKey::Phone, "+370 612 34567");
        page.form.set_value(FieldKey::Address, "Vilnius");
        page.form.set_value(FieldKey::Q1, "8");
        page.form.set_value(FieldKey::Q2, "7");
        page.form.set_value(FieldKey::Q3, "9");
        page.revalidate();
    }

    #[test]
    fn init_disables_submit_and_flags_required_fields() {
        let mut page = ContactPage::new();
        let mut state = State::default();
        page.init(&mut state).unwrap();
        assert!(!page.submit_enabled);
        assert!(page.form.error(FieldKey::FirstName).is_some());
    }

    #[test]
    fn typing_into_the_phone_field_formats_live() {
        let mut page = ContactPage::new();
        let mut state = State::default();
        page.focused = 3; // phone
        page.handle_key_events(key(KeyCode::Enter), &mut state).unwrap();
        assert!(page.editing);
        assert_eq!(state.input_mode, InputMode::Insert);

        type_str(&mut page, &mut state, "37061");
        assert_eq!(page.form.value(FieldKey::Phone), "+370 61");

        type_str(&mut page, &mut state, "234567");
        assert_eq!(page.form.value(FieldKey::Phone), "+370 612 34567");
        assert!(page.form.error(FieldKey::Phone).is_none());
    }

    #[test]
    fn escape_restores_the_pre_edit_value() {
        let mut page = ContactPage::new();
        let mut state = State::default();
        page.form.set_value(FieldKey::FirstName, "Jonas");
        page.focused = 0;
        page.handle_key_events(key(KeyCode::Enter), &mut state).unwrap();
        type_str(&mut page, &mut state, "99");
        assert_eq!(page.form.value(FieldKey::FirstName), "Jonas99");

        page.handle_key_events(key(KeyCode::Esc), &mut state).unwrap();
        assert_eq!(page.form.value(FieldKey::FirstName), "Jonas");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn submit_is_a_no_op_until_every_field_is_valid() {
        let mut page = ContactPage::new();
        let mut state = State::default();
        page.focused = SUBMIT_SLOT;
        let response = page.handle_key_events(key(KeyCode::Enter), &mut state).unwrap();
        assert_eq!(response, Some(EventResponse::Stop(Action::Update)));
        assert!(page.submission.is_none());

        fill_valid(&mut page);
        let response = page.handle_key_events(key(KeyCode::Enter), &mut state).unwrap();
        match response {
            Some(EventResponse::Stop(Action::ContactSubmitted(sub))) => {
                assert_eq!(sub.formatted_average(), "8.0");
                assert_eq!(sub.phone, "+370 612 34567");
            }
            other => panic!("expected a submission, got {other:?}"),
        }
        assert!(page.submission.is_some());
    }

    #[test]
    fn invalidating_one_field_disables_submit_again() {
        let mut page = ContactPage::new();
        fill_valid(&mut page);
        assert!(page.submit_enabled);

        page.form.set_value(FieldKey::Email, "broken");
        page.revalidate();
        assert!(!page.submit_enabled);
    }

    #[test]
    fn focus_wraps_across_fields_and_submit() {
        let mut page = ContactPage::new();
        page.focused = SUBMIT_SLOT;
        page.focus_next();
        assert_eq!(page.focused, 0);
        page.focus_prev();
        assert_eq!(page.focused, SUBMIT_SLOT);
    }
}
