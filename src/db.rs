use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::error::{PennyError, Result};
use crate::models::{ImportRecord, LearnedPattern, Transaction};
use crate::store::{LedgerStore, PatternStore};
use crate::taxonomy::ParentCategory;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    date TEXT NOT NULL,
    description TEXT NOT NULL,
    amount REAL NOT NULL CHECK (amount >= 0),
    direction TEXT NOT NULL DEFAULT 'debit',
    parent_category TEXT NOT NULL,
    subcategory TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS patterns (
    id INTEGER PRIMARY KEY,
    pattern TEXT NOT NULL,
    parent_category TEXT NOT NULL,
    subcategory TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    source TEXT NOT NULL,
    record_count INTEGER,
    imported INTEGER,
    failed INTEGER,
    date_range_start TEXT,
    date_range_end TEXT,
    checksum TEXT,
    import_date TEXT DEFAULT (datetime('now'))
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

/// True when a file with this checksum has already been imported.
pub fn is_duplicate_import(conn: &Connection, checksum: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM imports WHERE checksum = ?1")?;
    Ok(stmt.exists([checksum])?)
}

pub fn record_import(conn: &Connection, record: &ImportRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO imports (filename, source, record_count, imported, failed, date_range_start, date_range_end, checksum) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            record.filename,
            record.source,
            record.record_count,
            record.imported,
            record.failed,
            record.date_range_start,
            record.date_range_end,
            record.checksum,
        ],
    )?;
    Ok(())
}

pub struct ImportHistoryRow {
    pub id: i64,
    pub filename: String,
    pub source: String,
    pub imported: i64,
    pub failed: i64,
    pub import_date: String,
}

pub fn list_imports(conn: &Connection) -> Result<Vec<ImportHistoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, filename, source, imported, failed, import_date FROM imports \
         ORDER BY import_date DESC, id DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ImportHistoryRow {
                id: row.get(0)?,
                filename: row.get(1)?,
                source: row.get(2)?,
                imported: row.get(3)?,
                failed: row.get(4)?,
                import_date: row.get(5)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();
    Ok(rows)
}

pub fn delete_pattern(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM patterns WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

/// Production store: both collaborator seams backed by the same SQLite
/// connection.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl LedgerStore for SqliteStore<'_> {
    fn create_transaction(&mut self, txn: &Transaction) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO transactions (date, description, amount, direction, parent_category, subcategory) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    txn.date.format("%Y-%m-%d").to_string(),
                    txn.description,
                    txn.amount,
                    txn.direction.key(),
                    txn.parent.key(),
                    txn.subcategory,
                ],
            )
            .map_err(|e| PennyError::Store(e.to_string()))?;
        Ok(self.conn.last_insert_rowid())
    }
}

impl PatternStore for SqliteStore<'_> {
    fn list_patterns(&self) -> Result<Vec<LearnedPattern>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, pattern, parent_category, subcategory FROM patterns \
             ORDER BY length(pattern) DESC, id",
        )?;
        let rows: Vec<(i64, String, String, Option<String>)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .filter_map(|r| r.ok())
            .collect();

        let mut patterns = Vec::with_capacity(rows.len());
        for (id, pattern, parent_key, subcategory) in rows {
            let parent = ParentCategory::from_key(&parent_key)
                .ok_or_else(|| PennyError::UnknownCategory(parent_key.clone()))?;
            patterns.push(LearnedPattern {
                id: Some(id),
                pattern,
                parent,
                subcategory,
            });
        }
        Ok(patterns)
    }

    fn save_pattern(
        &mut self,
        pattern: &str,
        parent: ParentCategory,
        subcategory: Option<&str>,
    ) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO patterns (pattern, parent_category, subcategory) VALUES (?1, ?2, ?3)",
                rusqlite::params![pattern, parent.key(), subcategory],
            )
            .map_err(|e| PennyError::Store(e.to_string()))?;
        Ok(())
    }
}

/// Date range of a committed batch, for the import history row.
pub fn date_range(dates: &[NaiveDate]) -> (Option<String>, Option<String>) {
    let min = dates.iter().min().map(|d| d.format("%Y-%m-%d").to_string());
    let max = dates.iter().max().map(|d| d.format("%Y-%m-%d").to_string());
    (min, max)
}
