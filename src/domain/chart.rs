// Chart domain model
use serde::Serialize;

/// Colours cycled over donut buckets.
pub const SEVERITY_PALETTE: [&str; 8] = [
    "#dc3545", "#fd7e14", "#ffc107", "#20c997", "#0dcaf0", "#0d6efd", "#6f42c1", "#6c757d",
];

/// The two places a chart can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    AlertsLine,
    SeverityDonut,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 2] = [ChartSlot::AlertsLine, ChartSlot::SeverityDonut];

    /// Id of the canvas element the chart is drawn into.
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::AlertsLine => "alertsChart",
            ChartSlot::SeverityDonut => "severityChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
}

/// Opaque id of a live chart instance, issued by the chart backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityBucket {
    pub level: u32,
    pub count: u64,
}

impl SeverityBucket {
    pub fn new(level: u32, count: u64) -> Self {
        Self { level, count }
    }

    pub fn label(&self) -> String {
        format!("L{}", self.level)
    }
}

/// Everything a charting library needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<String>,
    pub begin_at_zero: bool,
    pub show_legend: bool,
}

impl ChartSpec {
    pub fn is_consistent(&self) -> bool {
        self.labels.len() == self.values.len()
            && (self.colors.is_empty() || self.colors.len() == self.values.len())
    }
}

/// Palette entries for `count` buckets, cycling when there are more than eight.
pub fn palette_for(count: usize) -> Vec<String> {
    SEVERITY_PALETTE
        .iter()
        .cycle()
        .take(count)
        .map(|c| c.to_string())
        .collect()
}
