mod calendar;
mod cli;
mod commands;
mod model;
mod storage;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        cli::Command::Add { content, date } => commands::add(content, date),
        cli::Command::List { date, month } => commands::list(date, month),
        cli::Command::Toggle { id } => commands::toggle(id),
        cli::Command::Remove { id } => commands::remove(id),
        cli::Command::Tui => commands::tui(),
    }
}
