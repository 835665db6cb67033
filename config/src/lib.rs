#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod field;

use app_config::AppConfig;
pub use app_config::get_config_dir;
pub use args::Args;
use color_eyre::Result;
use eyre::{
    eyre,
    WrapErr as _,
};
pub use field::{
    FieldConfig,
    FieldKind,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    path::Path,
    time::Duration,
};

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

/// Commented configuration file, as printed by `--sample-config`.
pub const SAMPLE_CONFIG: &str = DEFAULT_CONFIG;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    app_config: AppConfig,
    #[serde(default)]
    pub servers: Vec<String>,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

fn default_interval() -> String {
    "10s".to_string()
}

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl Config {
    /// Layers the embedded defaults, the optional `config.yaml` in the config
    /// directory and the command line arguments, in that order.
    pub fn new(args: Args) -> Result<Self> {
        Self::from_dir(&get_config_dir(), args)
    }

    pub fn from_dir(config_dir: &Path, args: Args) -> Result<Self> {
        let config_file = config_dir.join("config.yaml");
        debug!(path = %config_file.display(), "Loading configuration");

        let cfg: Self = config::Config::builder()
            .set_default("config_dir", config_dir.to_string_lossy().into_owned())?
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml))
            .add_source(
                config::File::from(config_file.clone())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(args)
            .build()
            .and_then(|built| built.try_deserialize())
            .wrap_err_with(|| format!("Failed to load configuration from {:?}", config_file))?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn config_dir(&self) -> &Path {
        &self.app_config.config_dir
    }

    /// The collection interval, parsed from its humantime form.
    pub fn interval(&self) -> Result<Duration> {
        humantime::parse_duration(&self.interval)
            .map_err(|e| eyre!("Invalid interval '{}': {}", self.interval, e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval()?.is_zero() {
            return Err(eyre!("interval must be greater than zero"));
        }
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(eyre!("fields: every field needs a non-empty name"));
            }
            if !field.path.starts_with('/') {
                return Err(eyre!(
                    "fields: path '{}' of field '{}' must be a JSON pointer starting with '/'",
                    field.path,
                    field.name
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn empty_dir() -> PathBuf {
        PathBuf::from("/nonexistent/roach-stats-config-test")
    }

    #[test]
    fn embedded_defaults() {
        let cfg = Config::default();
        assert!(cfg.servers.is_empty());
        assert_eq!(cfg.interval().unwrap(), Duration::from_secs(10));
        assert!(cfg.fields.is_empty());
    }

    #[test]
    fn args_override_defaults() {
        let args = Args {
            servers: vec!["http://roach1:8080".to_string(), "http://roach2:8080".to_string()],
            interval: Some("1m".to_string()),
            ..Args::default()
        };
        let cfg = Config::from_dir(&empty_dir(), args).unwrap();
        assert_eq!(cfg.servers, vec!["http://roach1:8080", "http://roach2:8080"]);
        assert_eq!(cfg.interval().unwrap(), Duration::from_secs(60));
        assert_eq!(cfg.config_dir(), empty_dir().as_path());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let args = Args {
            interval: Some("0s".to_string()),
            ..Args::default()
        };
        assert!(Config::from_dir(&empty_dir(), args).is_err());
    }

    #[test]
    fn garbage_interval_is_rejected() {
        let args = Args {
            interval: Some("soon".to_string()),
            ..Args::default()
        };
        assert!(Config::from_dir(&empty_dir(), args).is_err());
    }

    #[test]
    fn extra_fields_need_a_pointer() {
        let mut cfg = Config::default();
        cfg.fields.push(FieldConfig {
            name: "sql.conns".to_string(),
            path: "metrics.sql.conns".to_string(),
            kind: FieldKind::Integer,
        });
        assert!(cfg.validate().is_err());

        cfg.fields[0].path = "/metrics/sql.conns".to_string();
        assert!(cfg.validate().is_ok());
    }
}
