//! Domain core for the portfolio terminal app.
//!
//! Everything in here is pure and free of terminal / rendering concerns so
//! the UI crate can stay a thin adapter:
//! - [`validation`]: single-field validators and the phone auto-formatter
//! - [`contact`]: the eight tracked contact fields and the submission record
//! - [`game`]: the memory game session state machine

pub mod contact;
pub mod game;
pub mod validation;
