use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "assessgen.yaml";
pub const DEFAULT_DB_PATH: &str = ".wrangler/state/v3/d1/miniflare-D1DatabaseObject/db.sqlite";

pub const ENV_DB: &str = "ASSESSGEN_DB";
pub const ENV_LOG: &str = "ASSESSGEN_LOG";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedConfig {
    pub db_path: PathBuf,
    pub assessed_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            assessed_by: crate::generator::DEFAULT_ASSESSED_BY.to_string(),
            seed: None,
            log_level: "warn".to_string(),
        }
    }
}

impl SeedConfig {
    /// Apply `ASSESSGEN_DB` / `ASSESSGEN_LOG` on top of the current values.
    pub fn with_env(mut self) -> Self {
        self.apply_env_from(|k| std::env::var(k).ok());
        self
    }

    fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get(ENV_DB).filter(|v| !v.trim().is_empty()) {
            self.db_path = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_level = v;
        }
    }

    /// Checks that hold whichever layer (file, env, flag) set the value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assessed_by.trim().is_empty() {
            return Err(ConfigError("assessed_by must not be empty".into()));
        }
        Ok(())
    }
}

/// Config file as written; absent keys stay `None`.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    db_path: Option<PathBuf>,
    assessed_by: Option<String>,
    seed: Option<u64>,
    log_level: Option<String>,
}

impl RawConfig {
    /// Merge onto defaults. A relative `db_path` from the file is joined to
    /// `base_dir` when one is given.
    fn into_config(self, base_dir: Option<&Path>) -> SeedConfig {
        let defaults = SeedConfig::default();
        let db_path = match (self.db_path, base_dir) {
            (Some(p), Some(dir)) if p.is_relative() => dir.join(p),
            (Some(p), _) => p,
            (None, _) => defaults.db_path,
        };
        SeedConfig {
            db_path,
            assessed_by: self.assessed_by.unwrap_or(defaults.assessed_by),
            seed: self.seed,
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}

/// Load the YAML config.
///
/// An explicit `path` must exist. Without one, `assessgen.yaml` in the
/// working directory is used when present and defaults otherwise. A relative
/// `db_path` in the file is resolved against the file's directory.
pub fn load_config(path: Option<&Path>) -> Result<SeedConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(SeedConfig::default());
            }
            p
        }
    };

    let raw = std::fs::read_to_string(&path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let with_file = |e: ConfigError| ConfigError(format!("{} (file: {})", e.0, path.display()));

    let base_dir = path.parent().filter(|d| !d.as_os_str().is_empty());
    let cfg = parse_raw(&raw).map_err(with_file)?.into_config(base_dir);
    cfg.validate().map_err(with_file)?;
    Ok(cfg)
}

pub fn parse_config(raw: &str) -> Result<SeedConfig, ConfigError> {
    let cfg = parse_raw(raw)?.into_config(None);
    cfg.validate()?;
    Ok(cfg)
}

fn parse_raw(raw: &str) -> Result<RawConfig, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(RawConfig::default());
    }

    let mut ignored_keys = std::collections::BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(raw);
    let cfg: RawConfig = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    if !ignored_keys.is_empty() {
        tracing::warn!(event = "config_unknown_keys", keys = ?ignored_keys);
    }
    Ok(cfg)
}
