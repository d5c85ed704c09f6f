// Chart adapter - Maps a stats payload onto the two chart slots
use crate::application::chart_backend::ChartBackend;
use crate::domain::chart::{
    ChartHandle, ChartKind, ChartSlot, ChartSpec, SeverityBucket, palette_for,
};
use crate::domain::stats::{CRITICAL_LEVEL, DashboardStats, SeveritySummary};
use crate::domain::view::SummaryLabels;
use crate::domain::widget::RenderedView;
use chrono::{DateTime, Local, NaiveDateTime};
use std::collections::HashMap;

/// Hourly buckets shown on the line chart.
pub const HOURLY_WINDOW: usize = 24;

pub const DEFAULT_HOUR_LABEL_FORMAT: &str = "%H:%M";

/// Levels the four summary counts are charted at when no breakdown is available.
const SUMMARY_LEVELS: [u32; 4] = [CRITICAL_LEVEL, 13, 9, 3];

#[derive(Debug, Clone, PartialEq)]
pub struct LiveChart {
    pub handle: ChartHandle,
    pub spec: ChartSpec,
}

/// Owns the chart slots. Each slot holds at most one live instance.
pub struct ChartAdapter {
    backend: Option<Box<dyn ChartBackend>>,
    slots: HashMap<ChartSlot, LiveChart>,
    hour_label_format: String,
}

impl ChartAdapter {
    pub fn new(backend: Option<Box<dyn ChartBackend>>, hour_label_format: impl Into<String>) -> Self {
        Self {
            backend,
            slots: HashMap::new(),
            hour_label_format: hour_label_format.into(),
        }
    }

    /// An adapter with no charting library; placeholders stay empty.
    pub fn disabled() -> Self {
        Self::new(None, DEFAULT_HOUR_LABEL_FORMAT)
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn live(&self, slot: ChartSlot) -> Option<&LiveChart> {
        self.slots.get(&slot)
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    /// Rebuilds both charts for a freshly committed view.
    ///
    /// Every slot is released first, since the canvases it was drawn into have been
    /// replaced. An error view gets no charts.
    pub fn apply(
        &mut self,
        stats: &DashboardStats,
        view: &RenderedView,
        labels: Option<&mut SummaryLabels>,
    ) {
        self.release_all();
        if view.is_error() {
            return;
        }

        if let Some(labels) = labels {
            if let Some(summary) = stats.severity_summary() {
                push_summary_labels(summary, labels);
            } else if !stats.severity_breakdown.is_empty() {
                push_summary_labels(&SeveritySummary::from_breakdown(&stats.severity_breakdown), labels);
            }
        }

        if self.backend.is_none() {
            tracing::debug!("No charting library configured, leaving chart placeholders empty");
            return;
        }

        if view.has_chart_placeholder(ChartSlot::AlertsLine) && !stats.alerts_per_hour.is_empty() {
            let spec = self.alerts_line_spec(stats);
            self.install(ChartSlot::AlertsLine, spec);
        }

        if view.has_chart_placeholder(ChartSlot::SeverityDonut) && stats.has_severity_data() {
            let spec = severity_donut_spec(&severity_buckets(stats));
            self.install(ChartSlot::SeverityDonut, spec);
        }
    }

    pub fn release_all(&mut self) {
        for slot in ChartSlot::ALL {
            self.release(slot);
        }
    }

    fn release(&mut self, slot: ChartSlot) {
        if let Some(live) = self.slots.remove(&slot) {
            if let Some(backend) = self.backend.as_mut() {
                backend.destroy(live.handle);
            }
            tracing::debug!("Released {:?} chart {:?}", slot, live.handle);
        }
    }

    fn install(&mut self, slot: ChartSlot, spec: ChartSpec) {
        self.release(slot);
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match backend.create(slot, &spec) {
            Ok(handle) => {
                self.slots.insert(slot, LiveChart { handle, spec });
            }
            Err(e) => {
                tracing::warn!("Could not draw {:?} chart: {}", slot, e);
            }
        }
    }

    fn alerts_line_spec(&self, stats: &DashboardStats) -> ChartSpec {
        let start = stats.alerts_per_hour.len().saturating_sub(HOURLY_WINDOW);
        let window = &stats.alerts_per_hour[start..];

        ChartSpec {
            kind: ChartKind::Line,
            dataset_label: "Alerts".to_string(),
            labels: window
                .iter()
                .map(|b| format_hour_label(&b.timestamp, &self.hour_label_format))
                .collect(),
            values: window.iter().map(|b| b.count).collect(),
            colors: Vec::new(),
            begin_at_zero: true,
            show_legend: false,
        }
    }
}

/// Buckets charted on the donut: the breakdown by descending level, or four fixed
/// buckets synthesized from the summary.
pub fn severity_buckets(stats: &DashboardStats) -> Vec<SeverityBucket> {
    if !stats.severity_breakdown.is_empty() {
        let mut buckets: Vec<_> = stats
            .severity_breakdown
            .iter()
            .map(|b| SeverityBucket::new(b.level, b.count))
            .collect();
        buckets.sort_by(|a, b| b.level.cmp(&a.level));
        return buckets;
    }

    match stats.severity_summary() {
        Some(summary) => {
            let counts = [summary.critical, summary.high, summary.medium, summary.low];
            SUMMARY_LEVELS
                .iter()
                .zip(counts)
                .map(|(level, count)| SeverityBucket::new(*level, count.unwrap_or(0)))
                .collect()
        }
        None => Vec::new(),
    }
}

fn severity_donut_spec(buckets: &[SeverityBucket]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        dataset_label: "Alerts by level".to_string(),
        labels: buckets.iter().map(SeverityBucket::label).collect(),
        values: buckets.iter().map(|b| b.count).collect(),
        colors: palette_for(buckets.len()),
        begin_at_zero: false,
        show_legend: true,
    }
}

fn push_summary_labels(summary: &SeveritySummary, labels: &mut SummaryLabels) {
    let text = |v: Option<u64>| Some(v.unwrap_or(0).to_string());
    labels.critical = text(summary.critical);
    labels.high = text(summary.high);
    labels.medium = text(summary.medium);
    labels.low = text(summary.low);
}

/// Hour:minute label for a histogram bucket; unparseable timestamps are shown as received.
pub fn format_hour_label(raw: &str, format: &str) -> String {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return naive.format(format).to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(format).to_string();
    }
    raw.to_string()
}
