use anyhow::Context;
use colored::Colorize;
use paddock_server::{PaddockServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Config(args) => cmd_config(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.overrides)?;
    let server = PaddockServer::new(config)?;
    let config = server.config();

    println!("{} Paddock on {}", "✓".green().bold(), format!("http://{}", config.bind_addr).bold());
    for name in &config.collections {
        println!("  {} /{}", "collection:".green(), name.cyan());
    }
    if config.auth_token.is_some() {
        let reads = if config.allow_anonymous_read { "open" } else { "token" };
        println!("  Auth: {} (reads: {})", "bearer token".yellow(), reads);
    }

    server.serve().await?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.overrides)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Load the configuration file (if any), apply command-line overrides on
/// top and validate the result.
pub fn resolve_config(overrides: &ConfigOverrides) -> anyhow::Result<ServerConfig> {
    let mut config = match &overrides.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = overrides.bind {
        config.bind_addr = bind;
    }
    if !overrides.collections.is_empty() {
        config.collections = overrides.collections.clone();
    }
    if let Some(field) = &overrides.id_field {
        config.id_field = field.clone();
    }
    if let Some(strategy) = overrides.id_strategy {
        config.id_strategy = strategy;
    }
    if let Some(token) = &overrides.token {
        config.auth_token = Some(token.clone());
    }
    if overrides.no_access_log {
        config.access_log = false;
    }

    config.validate().context("invalid configuration")?;
    tracing::debug!(bind = %config.bind_addr, collections = ?config.collections, "resolved configuration");
    Ok(config)
}
