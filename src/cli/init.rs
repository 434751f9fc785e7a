use std::path::PathBuf;

use crate::db::{get_connection, init_db};
use crate::error::{PennyError, Result};
use crate::fields::DateOrder;
use crate::settings::{load_settings, save_settings, Settings};

pub fn run(data_dir: Option<String>, date_order: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    let defaults = Settings::default();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if settings.data_dir == defaults.data_dir {
        // First run — prompt for data dir
        let default = &settings.data_dir;
        println!("Data directory [{}]: ", default);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(chosen);
        }
    }

    if let Some(order) = date_order {
        if DateOrder::from_key(&order).is_none() {
            return Err(PennyError::Settings(format!(
                "unknown date order '{order}' (use mdy or dmy)"
            )));
        }
        settings.date_order = order;
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let conn = get_connection(&resolved.join("penny.db"))?;
    init_db(&conn)?;

    println!("Initialized penny at {}", resolved.display());
    Ok(())
}

fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
