use assessgen_core::config::SeedConfig;
use assessgen_core::report::console;
use assessgen_core::storage::store::Store;

use super::{exit_codes, with_db};
use crate::cli::args::CleanArgs;

pub fn run(args: CleanArgs, cfg: SeedConfig) -> anyhow::Result<i32> {
    let cfg = with_db(cfg, &args.db);

    let store = Store::open(&cfg.db_path)?;

    if !args.yes {
        println!(
            "📊 {} assessment records currently in supervisor_assessments",
            store.count_assessments()?
        );
        print!("{}", console::format_cleanup_hint());
        println!(
            "(re-run with --yes to execute it against {})",
            cfg.db_path.display()
        );
        return Ok(exit_codes::OK);
    }

    let deleted = store.delete_all_assessments()?;
    println!("🗑️  Deleted {} assessment records", deleted);
    Ok(exit_codes::OK)
}
