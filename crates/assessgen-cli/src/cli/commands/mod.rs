use super::args::*;
use assessgen_core::config::{load_config, SeedConfig};

pub mod clean;
pub mod doctor;
pub mod generate;
pub mod summary;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
}

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let cfg = base_config(&cli.global)?;
    crate::logging::init_logging(&cfg.log_level, cli.global.log_json);
    tracing::debug!(event = "config_resolved", config = ?cfg);

    match cli.cmd {
        None => generate::run(GenerateArgs::default(), cfg),
        Some(Command::Generate(args)) => generate::run(args, cfg),
        Some(Command::Summary(args)) => summary::run(args, cfg),
        Some(Command::Clean(args)) => clean::run(args, cfg),
        Some(Command::Doctor(args)) => doctor::run(args, cfg),
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// Config file, then environment, then global flags.
fn base_config(global: &GlobalArgs) -> anyhow::Result<SeedConfig> {
    let mut cfg = load_config(global.config.as_deref())
        .map_err(|e| anyhow::anyhow!("config error: {}", e))?
        .with_env();
    if let Some(level) = &global.log_level {
        cfg.log_level = level.clone();
    }
    Ok(cfg)
}

/// `--db` wins over config and environment.
pub(crate) fn with_db(mut cfg: SeedConfig, db: &DbArgs) -> SeedConfig {
    if let Some(p) = &db.db {
        cfg.db_path = p.clone();
    }
    cfg
}
