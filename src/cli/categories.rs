use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::taxonomy::ALL_CATEGORIES;

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Category", "Subcategories"]);
    for cat in ALL_CATEGORIES {
        table.add_row(vec![
            Cell::new(cat.key()),
            Cell::new(format!("{} {}", cat.icon(), cat.name())),
            Cell::new(cat.subcategories().join(", ")),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}
