use clap::{Parser, Subcommand};
use portfolio_core::game::Difficulty;

#[derive(Parser)]
#[command(name = "portfolio-tui", version, about = "Portfolio terminal app")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Clone, Copy)]
pub enum Cmd {
    /// Run interactive TUI
    Run {
        #[command(subcommand)]
        mode: RunMode,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum RunMode {
    /// Contact form with live validation
    Contact,
    /// Memory matching game
    Game {
        /// Board size: easy = 12 cards, hard = 24
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
    },
}

impl Cli {
    /// Mode to start in; plain `portfolio-tui` opens the contact form.
    pub fn start_mode(&self) -> RunMode {
        match self.cmd {
            Some(Cmd::Run { mode }) => mode,
            None => RunMode::Contact,
        }
    }
}
