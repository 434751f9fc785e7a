use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};
use dialoguer::Input;

use crate::db::{
    compute_checksum, date_range, get_connection, is_duplicate_import, record_import, SqliteStore,
};
use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::models::{ColumnMapping, CommitSummary, Direction, ImportRecord, LearnedPattern};
use crate::reconciler::ImportSession;
use crate::settings::{get_data_dir, load_settings};
use crate::store::PatternStore;
#[cfg(feature = "pdf")]
use crate::store::TextExtractor;
use crate::taxonomy::{format_category, ALL_CATEGORIES};

#[derive(Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Csv,
    Pdf,
    Text,
}

impl SourceFormat {
    fn key(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Text => "text",
        }
    }
}

fn detect_format(path: &Path, format: Option<&str>) -> Result<SourceFormat> {
    let key = match format {
        Some(f) => f.to_lowercase(),
        None => path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    };
    match key.as_str() {
        "csv" => Ok(SourceFormat::Csv),
        "pdf" => Ok(SourceFormat::Pdf),
        "text" | "txt" => Ok(SourceFormat::Text),
        other => Err(PennyError::UnknownFormat(other.to_string())),
    }
}

pub fn run(file: &str, format: Option<&str>, yes: bool) -> Result<()> {
    let file_path = PathBuf::from(file);
    let settings = load_settings();
    let source = detect_format(&file_path, format)?;
    let checksum = compute_checksum(&file_path)?;

    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    if is_duplicate_import(&conn, &checksum)? {
        println!("This file has already been imported (duplicate checksum).");
        return Ok(());
    }

    let patterns = SqliteStore::new(&conn).list_patterns()?;

    let mut session = load_session(&file_path, source, settings.date_order(), &patterns)?;

    if session.skipped > 0 {
        println!(
            "{}",
            format!("{} unparseable row(s) skipped", session.skipped).yellow()
        );
    }

    if !yes && !preview_loop(&mut session, &patterns)? {
        println!("{}", "Import cancelled; nothing was written.".yellow());
        return Ok(());
    }

    let record_count = session.candidates.len();
    let dates = session.included_dates();

    let mut ledger = SqliteStore::new(&conn);
    let mut pattern_store = SqliteStore::new(&conn);
    let summary = session.commit(&mut ledger, &mut pattern_store);

    let (start, end) = date_range(&dates);
    record_import(
        &conn,
        &ImportRecord {
            id: None,
            filename: file_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.to_string()),
            source: source.key().to_string(),
            record_count: record_count as i64,
            imported: summary.imported as i64,
            failed: summary.failed as i64,
            date_range_start: start,
            date_range_end: end,
            checksum,
        },
    )?;

    print_summary(&summary);
    Ok(())
}

fn load_session(
    path: &Path,
    source: SourceFormat,
    order: crate::fields::DateOrder,
    patterns: &[LearnedPattern],
) -> Result<ImportSession> {
    match source {
        SourceFormat::Csv => {
            let content = std::fs::read_to_string(path)?;
            ImportSession::from_csv(&content, order, patterns)
        }
        SourceFormat::Text => {
            let content = std::fs::read_to_string(path)?;
            ImportSession::from_text(&content, order, patterns)
        }
        #[cfg(feature = "pdf")]
        SourceFormat::Pdf => {
            let text = crate::pdf::PdfTextExtractor.extract_text(path)?;
            ImportSession::from_text(&text, order, patterns)
        }
        #[cfg(not(feature = "pdf"))]
        SourceFormat::Pdf => Err(PennyError::UnknownFormat(
            "pdf (this build was compiled without the pdf feature)".to_string(),
        )),
    }
}

/// Interactive preview. Returns true to commit, false to cancel.
fn preview_loop(session: &mut ImportSession, patterns: &[LearnedPattern]) -> Result<bool> {
    loop {
        print_preview(session);

        let choice: String = Input::new()
            .with_prompt("i=import, x N=toggle, e N=edit category, m=remap columns, q=cancel")
            .interact_text()
            .unwrap_or_else(|_| "q".to_string());
        let choice = choice.trim().to_lowercase();
        let (cmd, arg) = match choice.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (choice.as_str(), ""),
        };

        match cmd {
            "i" => return Ok(true),
            "q" => return Ok(false),
            "x" => match parse_row_number(arg, session.candidates.len()) {
                Some(idx) => {
                    let current = session.include[idx];
                    session.set_include(idx, !current);
                }
                None => println!("{}", "Invalid row number.".red()),
            },
            "e" => match parse_row_number(arg, session.candidates.len()) {
                Some(idx) => edit_category(session, idx),
                None => println!("{}", "Invalid row number.".red()),
            },
            "m" => remap_columns(session, patterns)?,
            _ => println!("{}", "Unknown command.".red()),
        }
    }
}

fn parse_row_number(arg: &str, len: usize) -> Option<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Some(n - 1),
        _ => None,
    }
}

fn print_preview(session: &ImportSession) {
    let mut table = Table::new();
    table.set_header(vec!["#", "", "Date", "Description", "Amount", "Category"]);
    for (i, txn) in session.candidates.iter().enumerate() {
        let marker = if session.include[i] { "\u{2713}" } else { " " };
        let amount = match txn.direction {
            Direction::Credit => format!("+{}", money(txn.amount)).green().to_string(),
            Direction::Debit => format!("-{}", money(txn.amount)).red().to_string(),
        };
        let mut description = txn.description.clone();
        if description.chars().count() > 40 {
            description = description.chars().take(39).collect::<String>() + "\u{2026}";
        }
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(marker),
            Cell::new(txn.date.format("%Y-%m-%d")),
            Cell::new(description),
            Cell::new(amount),
            Cell::new(format_category(txn.parent, txn.subcategory.as_deref())),
        ]);
    }

    let included = session.include.iter().filter(|f| **f).count();
    println!("\n{table}");
    println!("{included} of {} selected for import", session.candidates.len());
}

fn edit_category(session: &mut ImportSession, idx: usize) {
    let mut cat_table = Table::new();
    cat_table.set_header(vec!["#", "Category"]);
    for (i, cat) in ALL_CATEGORIES.iter().enumerate() {
        cat_table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{} {}", cat.icon(), cat.name())),
        ]);
    }
    println!("{cat_table}");

    let choice: String = Input::new()
        .with_prompt("Category #")
        .interact_text()
        .unwrap_or_default();
    let parent = match parse_row_number(choice.trim(), ALL_CATEGORIES.len()) {
        Some(i) => ALL_CATEGORIES[i],
        None => {
            println!("{}", "Invalid choice.".red());
            return;
        }
    };

    let subs = parent.subcategories();
    for (i, sub) in subs.iter().enumerate() {
        println!("  {}. {sub}", i + 1);
    }
    let sub_choice: String = Input::new()
        .with_prompt("Subcategory # (Enter to skip)")
        .default(String::new())
        .interact_text()
        .unwrap_or_default();
    let subcategory = parse_row_number(sub_choice.trim(), subs.len()).map(|i| subs[i].to_string());

    session.set_category(idx, parent, subcategory);
    println!(
        "{}",
        format!(
            "\u{2192} Row {} set to {}",
            idx + 1,
            format_category(parent, session.candidates[idx].subcategory.as_deref())
        )
        .green()
    );
}

fn remap_columns(session: &mut ImportSession, patterns: &[LearnedPattern]) -> Result<()> {
    let headers: Vec<String> = match session.headers() {
        Some(h) => h.to_vec(),
        None => {
            println!("{}", "Column mapping only applies to CSV imports.".red());
            return Ok(());
        }
    };

    for (i, header) in headers.iter().enumerate() {
        println!("  {}. {header}", i + 1);
    }

    let current = session.mapping().unwrap_or_default();
    let date = prompt_column("Date column #", current.date, headers.len());
    let description = prompt_column("Description column #", current.description, headers.len());
    let amount = prompt_column("Amount column #", current.amount, headers.len());

    session.set_mapping(
        ColumnMapping {
            date,
            description,
            amount,
        },
        patterns,
    )?;

    if session.candidates.is_empty() {
        println!(
            "{}",
            "No rows parse under this mapping; adjust it or cancel.".yellow()
        );
    }
    Ok(())
}

fn prompt_column(prompt: &str, current: usize, len: usize) -> usize {
    let choice: String = Input::new()
        .with_prompt(format!("{prompt} [{}]", current + 1))
        .default(String::new())
        .interact_text()
        .unwrap_or_default();
    parse_row_number(choice.trim(), len).unwrap_or(current)
}

fn print_summary(summary: &CommitSummary) {
    println!(
        "{}",
        format!("{} imported, {} failed", summary.imported, summary.failed).green()
    );
    for (idx, reason) in &summary.failures {
        println!("{}", format!("  row {}: {reason}", idx + 1).red());
    }
    for (idx, reason) in &summary.pattern_failures {
        println!(
            "{}",
            format!("  row {}: pattern not saved ({reason})", idx + 1).yellow()
        );
    }
}
