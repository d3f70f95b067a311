#![allow(dead_code)]

use assessgen_core::storage::store::Store;
use rusqlite::{params, Connection};
use std::path::Path;

/// Create the dashboard tables at `path` and fill them with `entities`
/// (one worker per entry) and `per_category` items for every category.
pub fn seed_fixture(path: &Path, entities: &[&str], per_category: usize) -> anyhow::Result<()> {
    let conn = Connection::open(path)?;
    Store::open(path)?.init_schema()?;

    for (i, entity) in entities.iter().enumerate() {
        conn.execute(
            "INSERT INTO workers (employee_id, name, entity) VALUES (?1, ?2, ?3)",
            params![format!("E{:03}", i + 1), format!("Worker {}", i + 1), entity],
        )?;
    }
    for category in ["Level2", "Level3", "Level4"] {
        for n in 0..per_category {
            conn.execute(
                "INSERT INTO supervisor_assessment_items (category, item_name) VALUES (?1, ?2)",
                params![category, format!("{} skill {}", category, n + 1)],
            )?;
        }
    }
    Ok(())
}
