use chrono::NaiveDate;

use crate::taxonomy::ParentCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// A candidate or committed transaction. `amount` is always >= 0; the money
/// flow is carried by `direction` and category membership, never by sign.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub direction: Direction,
    pub parent: ParentCategory,
    pub subcategory: Option<String>,
    /// Index of the raw statement row this candidate came from.
    pub source_row: usize,
}

/// A description substring the user has previously confirmed maps to a
/// category. Stored lowercase; matched longest-first at classification time.
#[derive(Debug, Clone)]
pub struct LearnedPattern {
    pub id: Option<i64>,
    pub pattern: String,
    pub parent: ParentCategory,
    pub subcategory: Option<String>,
}

/// Intermediate representation from an extractor, before classification.
#[derive(Debug, Clone)]
pub struct ExtractedRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub direction: Direction,
    pub source_row: usize,
}

/// Which raw columns hold the date, description and amount of a CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date: 0,
            description: 1,
            amount: 2,
        }
    }
}

/// Outcome of committing one import batch. Commit is best-effort per row:
/// failures are recorded here, they never abort the batch.
#[derive(Debug, Default)]
pub struct CommitSummary {
    pub imported: usize,
    pub failed: usize,
    /// (candidate index, reason) for each row that failed the ledger write.
    pub failures: Vec<(usize, String)>,
    /// Pattern-save problems are warnings; the row itself still committed.
    pub pattern_failures: Vec<(usize, String)>,
}

#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub id: Option<i64>,
    pub filename: String,
    pub source: String,
    pub record_count: i64,
    pub imported: i64,
    pub failed: i64,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
    pub checksum: String,
}
