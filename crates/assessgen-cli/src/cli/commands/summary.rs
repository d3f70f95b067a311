use assessgen_core::config::SeedConfig;
use assessgen_core::report::{console, json};
use assessgen_core::storage::store::Store;

use super::{exit_codes, with_db};
use crate::cli::args::{OutputFormat, SummaryArgs};

pub fn run(args: SummaryArgs, cfg: SeedConfig) -> anyhow::Result<i32> {
    let cfg = with_db(cfg, &args.db);
    let store = Store::open(&cfg.db_path)?;
    let entities = store.entity_summary()?;

    match args.format {
        OutputFormat::Text => {
            print!("{}", console::format_entity_table(&entities));
            let total: i64 = entities.iter().map(|e| e.assessments).sum();
            println!("Total assessments: {}", total);
        }
        OutputFormat::Json => println!("{}", json::render(None, &entities)?),
    }
    Ok(exit_codes::OK)
}
