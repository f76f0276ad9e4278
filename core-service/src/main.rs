//! Migraine Risk - CLI Entry Point
//!
//! Refreshes the risk screen once (or a few times), applies driver
//! selections and prints the dashboard.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use migraine_core::api::{get_dashboard, render_text};
use migraine_core::constants;
use migraine_core::logic::config::{ClientConfig, DataSource};
use migraine_core::logic::controller::PresentationController;
use migraine_core::logic::notify::{StaticTokenSource, TokenRegistrar};
use migraine_core::logic::provider::{HttpRiskProvider, MockRiskProvider, RiskDataProvider};

#[derive(Debug, Parser)]
#[command(name = "migraine", version, about = "Show the current migraine risk dashboard")]
struct Cli {
    /// Data source: mock or live (overrides MIGRAINE_DATA_SOURCE)
    #[arg(long)]
    source: Option<DataSource>,

    /// Provider base URL (overrides MIGRAINE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Number of refresh cycles before rendering
    #[arg(long, default_value_t = 1)]
    refreshes: u32,

    /// Driver key to tap; repeat to tap several times
    #[arg(long = "select")]
    selections: Vec<String>,

    /// Tap a recommended action of the selected driver
    #[arg(long)]
    log_action: Option<String>,

    /// Skip push token registration
    #[arg(long)]
    no_push: bool,

    /// Print the dashboard as JSON
    #[arg(long)]
    json: bool,
}

fn build_provider(config: &ClientConfig) -> anyhow::Result<Arc<dyn RiskDataProvider>> {
    Ok(match config.data_source {
        DataSource::Mock => Arc::new(MockRiskProvider::new()),
        DataSource::Live => Arc::new(
            HttpRiskProvider::new(config).context("creating risk provider client")?,
        ),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(source) = cli.source {
        config.data_source = source;
    }
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if cli.no_push {
        config.push_enabled = false;
    }

    log::info!("Starting {} v{} ({:?} data)", constants::APP_NAME, constants::APP_VERSION, config.data_source);

    let controller = PresentationController::new(build_provider(&config)?, &config);
    let registrar = TokenRegistrar::new(&config).context("creating push registrar client")?;
    let token_source = StaticTokenSource::new(config.push_token.clone());

    // Registration runs alongside the first refresh; its result is only logged
    let (_, registration) = tokio::join!(
        controller.refresh(),
        registrar.register_quietly(&token_source)
    );
    log::debug!("Push registration: {:?} (session {})", registration, registrar.session_id());

    for _ in 1..cli.refreshes {
        controller.refresh().await;
    }

    for key in &cli.selections {
        controller.select(key);
    }

    if let Some(action) = &cli.log_action {
        if !controller.log_action(action) {
            log::warn!("'{}' is not a recommended action for the current selection", action);
        }
    }

    let view = get_dashboard(&controller);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&view));
    }

    Ok(())
}
