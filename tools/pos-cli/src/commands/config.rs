//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, API_URL_ENV};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.kv("override", API_URL_ENV);
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv(
        "timeout_secs",
        &ctx.config
            .api
            .timeout_secs
            .map_or_else(|| "none".to_string(), |s| s.to_string()),
    );

    ctx.output.info("");
    ctx.output.info("[sales]");
    ctx.output.kv("currency", &ctx.config.sales.currency);
    ctx.output
        .kv("tax_rate_percent", &ctx.config.sales.tax_rate_percent.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len());
}
