use anyhow::Context;
use assessgen_core::config::SeedConfig;
use assessgen_core::generator::{seed, Generator, GeneratorSettings};
use assessgen_core::model::ItemCatalog;
use assessgen_core::report::{console, json};
use assessgen_core::storage::store::Store;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{exit_codes, with_db};
use crate::cli::args::{GenerateArgs, OutputFormat};

pub fn run(args: GenerateArgs, cfg: SeedConfig) -> anyhow::Result<i32> {
    let mut cfg = with_db(cfg, &args.db);
    if let Some(name) = args.assessed_by {
        cfg.assessed_by = name;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()
        .map_err(|e| anyhow::anyhow!("config error: {}", e))?;
    let text = args.format == OutputFormat::Text;

    let store = Store::open(&cfg.db_path)?;

    if text {
        println!("{}", console::FETCHING_BANNER);
    }
    let workers = store.load_workers()?;
    let catalog = ItemCatalog::from_items(store.load_items()?);
    if text {
        print!("{}", console::format_reference(workers.len(), &catalog));
        println!("\n{}", console::GENERATING_BANNER);
    }

    let generator = Generator::new(GeneratorSettings {
        assessed_by: cfg.assessed_by.clone(),
    })?;
    let mut rng = match cfg.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let start = chrono::Local::now().naive_local();

    let report = seed(
        &store,
        &generator,
        &workers,
        &catalog,
        start,
        &mut rng,
        args.dry_run,
    )
    .context("failed to seed supervisor assessments")?;

    let entities = store.entity_summary()?;

    match args.format {
        OutputFormat::Text => {
            println!();
            print!("{}", console::format_run(&report, &entities));
        }
        OutputFormat::Json => println!("{}", json::render(Some(&report), &entities)?),
    }

    Ok(exit_codes::OK)
}
