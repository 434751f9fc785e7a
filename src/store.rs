use std::path::Path;

use crate::error::Result;
use crate::models::{LearnedPattern, Transaction};
use crate::taxonomy::ParentCategory;

/// Ledger collaborator: the reconciler only ever appends.
pub trait LedgerStore {
    /// Persist a committed transaction, returning its id.
    fn create_transaction(&mut self, txn: &Transaction) -> Result<i64>;
}

/// Learned-pattern collaborator. Append-only from the reconciler's point of
/// view; duplicate or overlapping patterns are tolerated by the classifier.
pub trait PatternStore {
    fn list_patterns(&self) -> Result<Vec<LearnedPattern>>;
    fn save_pattern(
        &mut self,
        pattern: &str,
        parent: ParentCategory,
        subcategory: Option<&str>,
    ) -> Result<()>;
}

/// Turns a binary statement document into its concatenated page text, in
/// reading order.
pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String>;
}
