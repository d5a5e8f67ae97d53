//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use pos_client::InventoryClient;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["pos.toml", ".pos.toml", "pos.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        let config = config.with_env_overrides();

        tracing::debug!(
            config = ?config_path,
            base_url = %config.api.base_url,
            "configuration loaded"
        );

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Build a client for the configured service.
    pub fn client(&self) -> Result<InventoryClient> {
        InventoryClient::new(self.config.client_config())
            .with_context(|| format!("Failed to create client for {}", self.config.api.base_url))
    }
}
