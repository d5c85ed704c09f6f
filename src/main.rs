// Main entry point - Dependency injection and console setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::application::chart_adapter::ChartAdapter;
use crate::application::chart_backend::ChartBackend;
use crate::application::dashboard_app::DashboardApp;
use crate::application::view_state::ViewState;
use crate::application::widget_renderer::WidgetRenderer;
use crate::infrastructure::chartjs_backend::ChartJsBackend;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_repository::HttpDashboardRepository;
use crate::presentation::console::Console;

const PAGE_TITLE: &str = "WazuhBoard";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    tracing::info!("Using dashboard API at {}", config.api.base_url);

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpDashboardRepository::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
        config.api.time_range.clone(),
    )?);

    // Chart backend is optional; without it the page renders placeholders only
    let charts = if config.display.charts_enabled {
        let backend: Box<dyn ChartBackend> = Box::new(ChartJsBackend::new());
        ChartAdapter::new(Some(backend), config.display.hour_label_format.clone())
    } else {
        tracing::info!("Charts disabled");
        ChartAdapter::disabled()
    };

    // Create application
    let state = ViewState::new(config.layout.clone(), charts);
    let renderer = WidgetRenderer::new(config.display.trend_date_format.clone());
    let app = DashboardApp::new(repository, renderer, state);

    let console = Console::new(app, &config.output.html_path, PAGE_TITLE);
    match console.app().on_load().await {
        Some(outcome) => tracing::info!("Initial load: {:?}", outcome),
        None => tracing::warn!("No client to display"),
    }
    console.publish().await?;

    if config.output.interactive {
        console.run().await?;
    }

    Ok(())
}
