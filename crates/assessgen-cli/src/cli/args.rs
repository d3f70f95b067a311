use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "assessgen",
    version,
    about = "Seed a dashboard database with synthetic supervisor assessments"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `generate`
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate assessments for every worker and print the summary
    Generate(GenerateArgs),
    /// Print the per-entity summary without generating anything
    Summary(SummaryArgs),
    /// Delete all rows from supervisor_assessments
    Clean(CleanArgs),
    /// Check that the expected tables exist and count their rows
    Doctor(DbArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// YAML config file (assessgen.yaml is used when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// tracing filter, e.g. `info` or `assessgen_core=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// SQLite database file (overrides config and ASSESSGEN_DB)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// RNG seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Value written to assessed_by
    #[arg(long)]
    pub assessed_by: Option<String>,

    /// Generate and report without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub db: DbArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CleanArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Actually run the delete; without it the statement is only printed
    #[arg(long)]
    pub yes: bool,
}
