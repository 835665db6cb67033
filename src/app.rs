use crate::sink::JsonLinesAccumulator;
use color_eyre::Result;
use roach_stats_config::{
    get_config_dir,
    Args,
    Config,
    SAMPLE_CONFIG,
};
use roach_stats_gatherer::{
    Collector,
    Orchestrator,
};
use std::path::Path;
use tokio::time::{
    interval,
    MissedTickBehavior,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Collect on every interval tick until Ctrl-C.
    Periodic,
    /// A single collection cycle.
    Once,
    /// Print the sample configuration.
    SampleConfig,
}

pub struct App {
    config: Config,
    mode: Mode,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        Self::with_config_dir(&get_config_dir(), args)
    }

    pub fn with_config_dir(config_dir: &Path, args: Args) -> Result<Self> {
        let mode = if args.sample_config {
            Mode::SampleConfig
        } else if args.once {
            Mode::Once
        } else {
            Mode::Periodic
        };

        // The sample is printed even when the local configuration is broken.
        let config = if mode == Mode::SampleConfig {
            Config::default()
        } else {
            let config = Config::from_dir(config_dir, args)?;
            debug!(config_dir = %config.config_dir().display(), "Configuration loaded");
            config
        };

        Ok(Self { config, mode })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn run(&self) -> Result<()> {
        if self.mode == Mode::SampleConfig {
            print!("{SAMPLE_CONFIG}");
            return Ok(());
        }

        let orchestrator = Orchestrator::from_config(&self.config)?;
        let sink = JsonLinesAccumulator::stdout();
        info!(
            servers = ?orchestrator.servers(),
            fields = orchestrator.extraction().fields().len(),
            "{}",
            orchestrator.description()
        );

        if self.mode == Mode::Once {
            orchestrator.collect(&sink).await;
            return Ok(());
        }

        let period = self.config.interval()?;
        info!(?period, "Collecting periodically, press Ctrl-C to stop");

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping collection");
                    break;
                }
                _ = ticker.tick() => orchestrator.collect(&sink).await,
            }
        }

        Ok(())
    }
}
