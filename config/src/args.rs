use clap::Parser;

/// Polls CockroachDB node status endpoints and prints the extracted metrics as JSON lines.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Node admin URL to poll (repeatable). Overrides `servers` from the config file.
    #[clap(long = "server", value_name = "URL")]
    pub servers: Vec<String>,

    /// Time between collection cycles, e.g. `10s` or `1m`.
    #[clap(long, value_name = "DURATION")]
    pub interval: Option<String>,

    /// Run a single collection cycle and exit.
    #[clap(long, action)]
    pub once: bool,

    /// Print a sample configuration file and exit.
    #[clap(long = "sample-config", action)]
    pub sample_config: bool,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[clap(short, long, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if !self.servers.is_empty() {
                cache.insert("servers".to_string(), self.servers.clone().into());
            }
            if let Some(interval) = &self.interval {
                cache.insert("interval".to_string(), interval.clone().into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "{}

Authors: {author}

Config directory: {config_dir_path}",
        clap::crate_version!()
    )
}
