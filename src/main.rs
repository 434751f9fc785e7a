mod classifier;
mod cli;
mod db;
mod dedupe;
mod error;
mod fields;
mod fmt;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
mod reconciler;
mod settings;
mod statement_text;
mod store;
mod tabular;
mod taxonomy;

use clap::Parser;

use cli::{Cli, Commands, PatternsCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            data_dir,
            date_order,
        } => cli::init::run(data_dir, date_order),
        Commands::Import { file, format, yes } => cli::import::run(&file, format.as_deref(), yes),
        Commands::Patterns { command } => match command {
            PatternsCommands::Add {
                pattern,
                category,
                subcategory,
            } => cli::patterns::add(&pattern, &category, subcategory.as_deref()),
            PatternsCommands::List => cli::patterns::list(),
            PatternsCommands::Rm { id } => cli::patterns::rm(id),
        },
        Commands::Categories => cli::categories::run(),
        Commands::History => cli::history::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
