use std::path::PathBuf;

use clap::Parser;
use glossa_config::Config;

#[derive(Parser, Debug)]
#[command(name = "glossa", about = "Translate text typed on stdin as it changes")]
pub struct Args {
    /// JSON profile replacing the environment variables; `RUST_LOG` still
    /// overrides the profile's `log_filter`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Source language code
    #[arg(long)]
    pub from: Option<String>,

    /// Target language code
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Start with translation turned off
    #[arg(long)]
    pub disabled: bool,

    /// Translate a single string and exit
    #[arg(long)]
    pub once: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Args {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => {
                let mut config = Config::from_json_file(path)?;
                if let Ok(filter) = std::env::var("RUST_LOG") {
                    config.log_filter = filter;
                }
                config
            }
            None => Config::new(),
        };

        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: Config) -> Config {

        if let Some(from) = &self.from {
            config.binding.source_lang = from.clone();
        }
        if let Some(to) = &self.to {
            config.binding.target_lang = to.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.binding.debounce_ms = debounce_ms;
        }
        if self.disabled {
            config.binding.enabled = false;
        }

        config
    }
}
