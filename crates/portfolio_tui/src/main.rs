mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod form;
mod logging;
mod pages;
mod state;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::app::App;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    crate::errors::init()?;
    crate::logging::init()?;

    let mut app = App::new(&args)?;
    app.run().await?;
    Ok(())
}
