//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Init { force, as_json } => init_config(force, as_json, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    // Store section
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("catalog", &ctx.config.store.catalog);
    ctx.output.kv("cart_file", &ctx.config.store.cart_file);

    // Mail section
    ctx.output.info("");
    ctx.output.info("[mail]");
    ctx.output.kv("to", &ctx.config.mail.to);
    if let Some(cc) = ctx.config.mail.cc() {
        ctx.output.kv("cc", cc);
    }

    ctx.output.info("");
    ctx.output.info("Resolved paths:");
    ctx.output.list_item(
        &ctx.resolve_path(&ctx.config.store.catalog)
            .display()
            .to_string(),
    );
    ctx.output.list_item(
        &ctx.resolve_path(&ctx.config.store.cart_file)
            .display()
            .to_string(),
    );

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = ctx.config_path.as_ref().map(|p| p.display().to_string());

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "path": path }));
        return Ok(());
    }

    match path {
        Some(path) => ctx.output.line(&path),
        None => ctx.output.info(&format!(
            "No config file found (looked for {})",
            CONFIG_FILE_NAMES.join(", ")
        )),
    }

    Ok(())
}

fn init_config(force: bool, as_json: bool, ctx: &Context) -> Result<()> {
    let name = if as_json {
        CONFIG_FILE_NAMES[2]
    } else {
        CONFIG_FILE_NAMES[0]
    };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if as_json {
        CliConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
