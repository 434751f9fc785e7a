//! Import session: one uploaded statement file, from raw text to committed
//! ledger rows.
//!
//! The session moves through loaded -> parsed -> previewing -> committed.
//! Parsing runs extraction, classification, and deduplication once and
//! yields an ordered candidate list; preview edits (category, include flag,
//! CSV column remapping) keep candidate indices stable; `commit` consumes
//! the session, so cancellation is just dropping it — nothing touches the
//! ledger before commit.

use chrono::NaiveDate;

use crate::classifier::classify;
use crate::dedupe::dedupe;
use crate::error::{PennyError, Result};
use crate::fields::DateOrder;
use crate::models::{
    ColumnMapping, CommitSummary, Direction, ExtractedRow, LearnedPattern, Transaction,
};
use crate::statement_text;
use crate::store::{LedgerStore, PatternStore};
use crate::tabular::CsvStatement;
use crate::taxonomy::ParentCategory;

/// Committed descriptions are clipped to this length.
const MAX_DESCRIPTION_LEN: usize = 100;

enum RawStatement {
    Csv(CsvStatement),
    Text(String),
}

pub struct ImportSession {
    raw: RawStatement,
    order: DateOrder,
    pub candidates: Vec<Transaction>,
    pub include: Vec<bool>,
    /// Raw rows/lines that failed field parsing in the last extraction.
    pub skipped: usize,
}

impl ImportSession {
    /// Parse CSV statement text into a reviewable batch. Fails with
    /// `EmptyInput` when the file has no data rows or none of them parse.
    pub fn from_csv(
        content: &str,
        order: DateOrder,
        patterns: &[LearnedPattern],
    ) -> Result<ImportSession> {
        let statement = CsvStatement::parse(content)?;
        let mut session = ImportSession {
            raw: RawStatement::Csv(statement),
            order,
            candidates: Vec::new(),
            include: Vec::new(),
            skipped: 0,
        };
        session.rebuild(patterns);
        if session.candidates.is_empty() {
            return Err(PennyError::EmptyInput(
                "no transactions could be parsed; try adjusting the column mapping".to_string(),
            ));
        }
        Ok(session)
    }

    /// Parse the extracted text layer of a statement document.
    pub fn from_text(
        text: &str,
        order: DateOrder,
        patterns: &[LearnedPattern],
    ) -> Result<ImportSession> {
        let mut session = ImportSession {
            raw: RawStatement::Text(text.to_string()),
            order,
            candidates: Vec::new(),
            include: Vec::new(),
            skipped: 0,
        };
        session.rebuild(patterns);
        if session.candidates.is_empty() {
            return Err(PennyError::EmptyInput(
                "no transactions could be extracted from this document".to_string(),
            ));
        }
        Ok(session)
    }

    /// Extraction + classification + deduplication over the unchanged raw
    /// rows. Every include flag resets to true.
    fn rebuild(&mut self, patterns: &[LearnedPattern]) {
        let (rows, skipped) = match &self.raw {
            RawStatement::Csv(statement) => statement.extract(self.order),
            RawStatement::Text(text) => statement_text::extract(text),
        };
        self.skipped = skipped;

        let candidates: Vec<Transaction> = rows
            .into_iter()
            .map(|row| {
                let (parent, subcategory) = suggest(&row, patterns);
                Transaction {
                    date: row.date,
                    description: row.description,
                    amount: row.amount,
                    direction: row.direction,
                    parent,
                    subcategory,
                    source_row: row.source_row,
                }
            })
            .collect();
        self.candidates = dedupe(candidates);
        self.include = vec![true; self.candidates.len()];
    }

    pub fn headers(&self) -> Option<&[String]> {
        match &self.raw {
            RawStatement::Csv(statement) => Some(&statement.headers),
            RawStatement::Text(_) => None,
        }
    }

    pub fn mapping(&self) -> Option<ColumnMapping> {
        match &self.raw {
            RawStatement::Csv(statement) => Some(statement.mapping),
            RawStatement::Text(_) => None,
        }
    }

    /// Change the CSV column mapping and recompute the candidate list from
    /// the original raw rows. Prior per-row edits are discarded along with
    /// the candidates they applied to.
    pub fn set_mapping(
        &mut self,
        mapping: ColumnMapping,
        patterns: &[LearnedPattern],
    ) -> Result<()> {
        match &mut self.raw {
            RawStatement::Csv(statement) => statement.mapping = mapping,
            RawStatement::Text(_) => {
                return Err(PennyError::Other(
                    "column mapping only applies to CSV imports".to_string(),
                ))
            }
        }
        self.rebuild(patterns);
        Ok(())
    }

    pub fn set_include(&mut self, index: usize, included: bool) {
        if let Some(flag) = self.include.get_mut(index) {
            *flag = included;
        }
    }

    pub fn set_category(
        &mut self,
        index: usize,
        parent: ParentCategory,
        subcategory: Option<String>,
    ) {
        if let Some(txn) = self.candidates.get_mut(index) {
            txn.parent = parent;
            txn.subcategory = subcategory;
            txn.direction = if parent.is_income() {
                Direction::Credit
            } else {
                txn.direction
            };
        }
    }

    /// Dates of the rows that would be committed right now.
    pub fn included_dates(&self) -> Vec<NaiveDate> {
        self.candidates
            .iter()
            .zip(&self.include)
            .filter(|(_, inc)| **inc)
            .map(|(t, _)| t.date)
            .collect()
    }

    /// Commit every included candidate, in order. Best-effort per row:
    /// a failed ledger write is counted and the batch continues. Each
    /// committed row feeds a learned pattern back into the store unless it
    /// resolved to the uncategorized fallback; pattern-save failures are
    /// recorded as warnings and never undo the commit.
    pub fn commit(
        self,
        ledger: &mut dyn LedgerStore,
        patterns: &mut dyn PatternStore,
    ) -> CommitSummary {
        let mut summary = CommitSummary::default();

        for (index, (mut txn, included)) in self
            .candidates
            .into_iter()
            .zip(self.include.into_iter())
            .enumerate()
        {
            if !included {
                continue;
            }
            // Extraction already guarantees these; re-check rather than
            // hand the store a NaN if an edit path slipped.
            if txn.amount.is_nan() || txn.amount < 0.0 {
                summary.failed += 1;
                summary
                    .failures
                    .push((index, "invalid amount".to_string()));
                continue;
            }
            if txn.description.chars().count() > MAX_DESCRIPTION_LEN {
                txn.description = txn.description.chars().take(MAX_DESCRIPTION_LEN).collect();
            }

            match ledger.create_transaction(&txn) {
                Ok(_) => {
                    summary.imported += 1;
                    if txn.parent != ParentCategory::Other {
                        let pattern = txn.description.to_lowercase();
                        if let Err(e) = patterns.save_pattern(
                            &pattern,
                            txn.parent,
                            txn.subcategory.as_deref(),
                        ) {
                            summary.pattern_failures.push((index, e.to_string()));
                        }
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    summary.failures.push((index, e.to_string()));
                }
            }
        }

        summary
    }
}

/// Credits carry no description signal worth classifying against expense
/// keywords; they default to the income parent, as the preview UI did.
fn suggest(row: &ExtractedRow, patterns: &[LearnedPattern]) -> (ParentCategory, Option<String>) {
    match row.direction {
        Direction::Credit => (ParentCategory::Income, None),
        Direction::Debit => classify(&row.description, patterns),
    }
}
