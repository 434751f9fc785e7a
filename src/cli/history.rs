use comfy_table::{Cell, Table};

use crate::db::{get_connection, list_imports};
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let imports = list_imports(&conn)?;

    if imports.is_empty() {
        println!("No imports yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "File", "Source", "Imported", "Failed", "When"]);
    for row in imports {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(&row.filename),
            Cell::new(&row.source),
            Cell::new(row.imported),
            Cell::new(row.failed),
            Cell::new(&row.import_date),
        ]);
    }
    println!("Imports\n{table}");
    Ok(())
}
