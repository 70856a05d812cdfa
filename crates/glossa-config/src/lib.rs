use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::binding::BindingConfig;
use self::translator::TranslatorConfig;

pub mod binding;
pub mod translator;

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub binding: BindingConfig,
    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            binding: BindingConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Read the process environment once, falling back to defaults.
    pub fn new() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        Self::from_vars(|key| vars.get(key).cloned())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = var("RUST_LOG").unwrap_or_else(default_log_filter);

        Config {
            translator: TranslatorConfig::from_vars(&var),
            binding: BindingConfig::from_vars(&var),
            log_filter,
        }
    }

    /// Load a JSON profile. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }
}

pub(crate) fn parse_var<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    var(key).and_then(|v| v.trim().parse().ok())
}
