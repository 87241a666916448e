mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde_json::json;

use tmdb_core::config::PROVIDER_TYPE_NAME;
use tmdb_core::{ClientSettings, Diagnostics};
use tmdb_provider::{ProviderConfig, ProviderHost, TmdbProvider};

/// Load client settings and turn their warnings into diagnostics.
fn load_settings(path: Option<&Path>) -> Result<(ClientSettings, Diagnostics)> {
    let settings = ClientSettings::load_or_default(path)?;
    let mut diagnostics = Diagnostics::new();
    for warning in settings.validate() {
        tracing::warn!("Settings: {}", warning);
        diagnostics.add_warning("Client Settings", warning);
    }
    Ok((settings, diagnostics))
}

/// Build the data source configuration from `--input` plus convenience flags.
fn read_input(
    input: Option<&str>,
    id: Option<i64>,
    query: Option<String>,
) -> Result<serde_json::Value> {
    let mut config = match input {
        Some(raw) => serde_json::from_str(raw).context("--input is not valid JSON")?,
        None => json!({}),
    };
    if let Some(object) = config.as_object_mut() {
        if let Some(id) = id {
            object.insert("id".into(), json!(id));
        }
        if let Some(query) = query {
            object.insert("query".into(), json!(query));
        }
    }
    Ok(config)
}

async fn read(
    settings: ClientSettings,
    mut diagnostics: Diagnostics,
    data_source: String,
    key: Option<String>,
    config: serde_json::Value,
) -> Result<ExitCode> {
    let type_name = if data_source.starts_with(&format!("{PROVIDER_TYPE_NAME}_")) {
        data_source
    } else {
        format!("{PROVIDER_TYPE_NAME}_{data_source}")
    };

    let mut host = ProviderHost::new(TmdbProvider::with_settings(
        env!("CARGO_PKG_VERSION"),
        settings,
    ));

    let provider_config = ProviderConfig { key: key.into() };
    diagnostics.append(host.configure_from_env(&provider_config));
    let mut state = None;
    if !diagnostics.has_error() {
        let resp = host.read_data_source(&type_name, &config).await;
        diagnostics.append(resp.diagnostics);
        state = resp.state;
    }

    let output = json!({
        "data_source": type_name,
        "state": state,
        "diagnostics": diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if diagnostics.has_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose picks the default directives.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tmdb_provider=debug,tmdb_client=debug,tmdb_core=debug".to_string()
        } else {
            "tmdb_provider=info,tmdb_client=info".to_string()
        }
    });

    // Logs go to stderr; stdout carries JSON output only.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Schema => {
            let host = ProviderHost::new(TmdbProvider::new(env!("CARGO_PKG_VERSION")));
            let output = json!({
                "metadata": host.metadata(),
                "schemas": host.schemas(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Read {
            data_source,
            config,
            key,
            id,
            query,
            input,
        } => {
            let (settings, warnings) = load_settings(config.as_deref())?;
            let input = read_input(input.as_deref(), id, query)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(read(settings, warnings, data_source, key, input))
        }

        Commands::Validate { config: path } => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file: {:?}", path))?;
            let settings = ClientSettings::from_toml(&contents)?;

            let warnings = settings.validate();
            if warnings.is_empty() {
                println!("Settings are valid: {}", path.display());
            } else {
                println!("Settings have {} warning(s):", warnings.len());
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
