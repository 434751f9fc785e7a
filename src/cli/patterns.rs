use comfy_table::{Cell, Table};

use crate::db::{delete_pattern, get_connection, SqliteStore};
use crate::error::{PennyError, Result};
use crate::settings::get_data_dir;
use crate::store::PatternStore;
use crate::taxonomy::{format_category, ParentCategory};

pub fn add(pattern: &str, category: &str, subcategory: Option<&str>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;

    let parent = ParentCategory::from_key(category)
        .ok_or_else(|| PennyError::UnknownCategory(category.to_string()))?;
    if let Some(sub) = subcategory {
        if !parent.subcategories().contains(&sub) {
            return Err(PennyError::UnknownCategory(format!(
                "{category} has no subcategory '{sub}'"
            )));
        }
    }

    let pattern = pattern.to_lowercase();
    SqliteStore::new(&conn).save_pattern(&pattern, parent, subcategory)?;
    println!(
        "Added pattern: '{pattern}' \u{2192} {}",
        format_category(parent, subcategory)
    );
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let patterns = SqliteStore::new(&conn).list_patterns()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Pattern", "Category"]);
    for p in patterns {
        table.add_row(vec![
            Cell::new(p.id.unwrap_or_default()),
            Cell::new(&p.pattern),
            Cell::new(format_category(p.parent, p.subcategory.as_deref())),
        ]);
    }
    println!("Patterns (matched longest-first)\n{table}");
    Ok(())
}

pub fn rm(id: i64) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    if delete_pattern(&conn, id)? {
        println!("Deleted pattern {id}");
        Ok(())
    } else {
        Err(PennyError::Other(format!("No pattern with ID {id}")))
    }
}
