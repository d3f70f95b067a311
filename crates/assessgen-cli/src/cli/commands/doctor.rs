use assessgen_core::config::SeedConfig;
use assessgen_core::storage::store::Store;

use super::{exit_codes, with_db};
use crate::cli::args::DbArgs;

pub fn run(args: DbArgs, cfg: SeedConfig) -> anyhow::Result<i32> {
    let cfg = with_db(cfg, &args);

    let mut s = String::new();
    s.push_str(&format!("Assessgen Doctor (v{})\n", env!("CARGO_PKG_VERSION")));
    s.push_str(&format!("Database: {}\n", cfg.db_path.display()));

    let store = Store::open(&cfg.db_path)?;
    let missing = store.missing_tables()?;
    for c in store.table_counts()? {
        let rows = c
            .rows
            .map(|n| n.to_string())
            .unwrap_or_else(|| "missing".into());
        s.push_str(&format!("- {:<28} {}\n", c.table, rows));
    }

    if missing.is_empty() {
        s.push_str("\nAll tables present.\n");
        print!("{}", s);
        Ok(exit_codes::OK)
    } else {
        s.push_str(&format!("\nMissing tables: {}\n", missing.join(", ")));
        print!("{}", s);
        Ok(exit_codes::CONFIG_ERROR)
    }
}
