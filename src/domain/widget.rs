// Widget tree - Typed descriptors produced from a stats payload
use super::chart::ChartSlot;

/// Placeholder shown when no client is selected.
pub const NO_CLIENT: &str = "\u{2014}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetId {
    Summary,
    TotalAgents,
    AlertsPerHour,
    Severity,
    AgentHealth,
    TopRules,
    TopAgents,
    TopSourceIps,
    AlertTrends,
    Error,
}

impl WidgetId {
    /// Element id used by the HTML renderer.
    pub fn dom_id(&self) -> &'static str {
        match self {
            WidgetId::Summary => "summary-strip",
            WidgetId::TotalAgents => "total-agents",
            WidgetId::AlertsPerHour => "alerts-per-hour",
            WidgetId::Severity => "severity",
            WidgetId::AgentHealth => "agent-health",
            WidgetId::TopRules => "top-rules",
            WidgetId::TopAgents => "top-agents",
            WidgetId::TopSourceIps => "top-source-ips",
            WidgetId::AlertTrends => "alert-trends",
            WidgetId::Error => "dashboard-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStrip {
    pub client: String,
    pub alerts_24h: u64,
    pub critical: u64,
    pub total_agents: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthGauge {
    pub percent_online: u8,
    pub online: u64,
    pub offline: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub label: String,
    pub detail: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRow {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetBody {
    Summary(SummaryStrip),
    Value(String),
    /// Canvas the chart adapter draws into.
    Chart(ChartSlot),
    Gauge(HealthGauge),
    List(Vec<ListItem>),
    Trends(Vec<TrendRow>),
    Error { message: String, note: Option<String> },
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub id: WidgetId,
    pub title: &'static str,
    pub body: WidgetBody,
}

impl Widget {
    pub fn new(id: WidgetId, title: &'static str, body: WidgetBody) -> Self {
        Self { id, title, body }
    }

    #[cfg(test)]
    pub fn is_placeholder(&self) -> bool {
        self.body == WidgetBody::NoData
    }
}

/// Full content of the stats container after one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    pub widgets: Vec<Widget>,
}

impl RenderedView {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self { widgets }
    }

    pub fn error(message: impl Into<String>, note: Option<String>) -> Self {
        Self::new(vec![Widget::new(
            WidgetId::Error,
            "Error",
            WidgetBody::Error {
                message: message.into(),
                note,
            },
        )])
    }

    #[cfg(test)]
    pub fn find(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn is_error(&self) -> bool {
        self.widgets
            .iter()
            .any(|w| matches!(w.body, WidgetBody::Error { .. }))
    }

    pub fn has_chart_placeholder(&self, slot: ChartSlot) -> bool {
        self.widgets
            .iter()
            .any(|w| w.body == WidgetBody::Chart(slot))
    }
}
