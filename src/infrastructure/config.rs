use crate::application::chart_adapter::DEFAULT_HOUR_LABEL_FORMAT;
use crate::application::widget_renderer::DEFAULT_TREND_DATE_FORMAT;
use crate::domain::view::ViewLayout;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub display: DisplaySettings,
    pub layout: ViewLayout,
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Sent as `time_range` in the stats request when set (`24h`, `7d`, `30d`).
    pub time_range: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            time_range: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplaySettings {
    pub hour_label_format: String,
    pub trend_date_format: String,
    pub charts_enabled: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            hour_label_format: DEFAULT_HOUR_LABEL_FORMAT.to_string(),
            trend_date_format: DEFAULT_TREND_DATE_FORMAT.to_string(),
            charts_enabled: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputSettings {
    pub html_path: String,
    pub interactive: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            html_path: "dashboard.html".to_string(),
            interactive: true,
        }
    }
}

/// Loads `config/dashboard.*` (optional) overlaid with `WAZUHBOARD__*` environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("WAZUHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &DashboardConfig) -> anyhow::Result<()> {
    if config.api.base_url.trim().is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    if let Some(range) = &config.api.time_range {
        if !matches!(range.as_str(), "24h" | "7d" | "30d") {
            anyhow::bail!("api.time_range must be one of 24h, 7d, 30d (got {})", range);
        }
    }
    Ok(())
}
