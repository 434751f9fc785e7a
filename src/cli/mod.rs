pub mod categories;
pub mod history;
pub mod import;
pub mod init;
pub mod patterns;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "penny",
    about = "Import bank statements, categorize transactions, keep a ledger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Penny: choose a data directory and initialize the database.
    Init {
        /// Path for Penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Date order for ambiguous slash dates: mdy or dmy
        #[arg(long = "date-order")]
        date_order: Option<String>,
    },
    /// Import a statement file: parse, categorize, review, commit.
    Import {
        /// Path to a CSV, PDF or plain-text statement file
        file: String,
        /// Override format detection: csv, pdf, text
        #[arg(long)]
        format: Option<String>,
        /// Commit without the interactive preview
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Manage learned categorization patterns.
    Patterns {
        #[command(subcommand)]
        command: PatternsCommands,
    },
    /// Show the category taxonomy.
    Categories,
    /// Show past imports.
    History,
}

#[derive(Subcommand)]
pub enum PatternsCommands {
    /// Add a pattern by hand.
    Add {
        /// Substring to match against transaction descriptions
        pattern: String,
        /// Category key (see `penny categories`)
        #[arg(long)]
        category: String,
        /// Subcategory name
        #[arg(long)]
        subcategory: Option<String>,
    },
    /// List all learned patterns.
    List,
    /// Delete a pattern by ID.
    Rm {
        /// Pattern ID (shown in `penny patterns list`)
        id: i64,
    },
}
