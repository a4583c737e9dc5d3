/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use tasksmart::config::{ApiConfig, AppConfig, StorageConfig, UiConfig};
use tasksmart_client::DEFAULT_BASE_URL;

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to TaskSmart Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a client configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = AppConfig::default();

    println!("\n{}", style("--- API ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .default(DEFAULT_BASE_URL.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            url::Url::parse(input)
                .map(|_| ())
                .map_err(|err| format!("invalid URL: {err}"))
        })
        .interact_text()?;

    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(defaults.api.timeout_secs)
        .interact_text()?;

    let connect_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Connect timeout (seconds)")
        .default(defaults.api.connect_timeout_secs)
        .interact_text()?;

    println!("\n{}", style("--- Storage ---").bold());
    let custom_dir = Confirm::with_theme(&theme)
        .with_prompt("Use a custom data directory?")
        .default(false)
        .interact()?;
    let data_dir = if custom_dir {
        let dir: String = Input::with_theme(&theme)
            .with_prompt("Data directory")
            .interact_text()?;
        Some(PathBuf::from(dir))
    } else {
        None
    };

    println!("\n{}", style("--- Interface ---").bold());
    let refresh_interval_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Task refresh interval (seconds)")
        .default(defaults.ui.refresh_interval_secs)
        .interact_text()?;

    let conversion_banner_threshold: usize = Input::with_theme(&theme)
        .with_prompt("Guest task count before suggesting an account")
        .default(defaults.ui.conversion_banner_threshold)
        .interact_text()?;

    let config = AppConfig {
        api: ApiConfig {
            base_url,
            timeout_secs,
            connect_timeout_secs,
        },
        storage: StorageConfig { data_dir },
        ui: UiConfig {
            refresh_interval_secs,
            conversion_banner_threshold,
        },
    };
    config.validate()?;

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;

    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
