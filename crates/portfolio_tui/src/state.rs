/// State shared across pages and components.
#[derive(Default)]
pub struct State {
    pub input_mode: InputMode,
    pub active_page: usize,
}

/// Normal: keys navigate; Insert: a field editor owns the keyboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}
