use portfolio_core::contact::ContactSubmission;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    /// Generic "state changed, redraw on next frame" signal.
    Update,
    /// Switch the active page by index.
    Navigate(usize),
    /// A valid contact form was submitted; opens the success popup.
    ContactSubmitted(ContactSubmission),
    ClosePopup,
}
