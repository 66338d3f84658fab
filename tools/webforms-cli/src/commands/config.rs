//! `webforms config`.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{default_config, render_config, CONFIG_FILE_NAMES};
use crate::context::Context;

pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
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

    ctx.output.header("Engine configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[routing]");
    ctx.output
        .kv("application_path", &ctx.config.routing.application_path);
    ctx.output
        .kv("routes", &ctx.config.routing.routes.len().to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output
        .kv("log_level", &ctx.config.logging.log_level.to_string());
    ctx.output
        .kv("log_format", &format!("{:?}", ctx.config.logging.log_format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = render_config(&default_config(), &config_path)?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `webforms config init` to create one.");
    };

    let routes = ctx.route_table()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "file": path.display().to_string(),
            "valid": true,
            "routes": routes.len(),
        }));
    } else {
        ctx.output.success(&format!(
            "{} is valid ({} route(s))",
            path.display(),
            routes.len()
        ));
    }
    Ok(())
}
