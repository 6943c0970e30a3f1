use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "daykeep", version, about = "Terminal calendar to-do tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a to-do item
    Add {
        /// To-do text
        content: String,
        /// Target date in YYYY-MM-DD format (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List to-dos for a date
    List {
        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Show every dated to-do in that date's month
        #[arg(long)]
        month: bool,
    },
    /// Flip a to-do's done flag
    Toggle {
        /// To-do id
        id: u64,
    },
    /// Remove a to-do
    Remove {
        /// To-do id
        id: u64,
    },
    /// Launch the interactive TUI
    Tui,
}
