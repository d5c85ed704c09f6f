// Chart.js backend - Tracks chart instances and builds their Chart.js configuration
use crate::application::chart_backend::{ChartBackend, ChartError};
use crate::domain::chart::{ChartHandle, ChartKind, ChartSlot, ChartSpec};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Line colour of the hourly chart.
const LINE_COLOR: &str = "#0d6efd";
const LINE_FILL: &str = "rgba(13, 110, 253, 0.1)";

#[derive(Debug, Default)]
pub struct ChartJsBackend {
    instances: HashMap<ChartHandle, ChartSlot>,
    next_id: u64,
}

impl ChartJsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn live_instances(&self) -> usize {
        self.instances.len()
    }
}

impl ChartBackend for ChartJsBackend {
    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Result<ChartHandle, ChartError> {
        if !spec.is_consistent() {
            return Err(ChartError::Mismatched(slot, spec.labels.len(), spec.values.len()));
        }
        if let Some((handle, _)) = self.instances.iter().find(|(_, s)| **s == slot) {
            return Err(ChartError::Backend(format!(
                "canvas {} is already in use by chart {}",
                slot.canvas_id(),
                handle.0
            )));
        }

        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.instances.insert(handle, slot);
        tracing::debug!("Created Chart.js instance {} on #{}", handle.0, slot.canvas_id());
        Ok(handle)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.instances.remove(&handle).is_none() {
            tracing::warn!("Asked to destroy unknown chart instance {}", handle.0);
        }
    }
}

/// The `new Chart(ctx, config)` configuration for a spec.
pub fn chart_config(spec: &ChartSpec) -> Value {
    match spec.kind {
        ChartKind::Line => json!({
            "type": spec.kind,
            "data": {
                "labels": spec.labels,
                "datasets": [{
                    "label": spec.dataset_label,
                    "data": spec.values,
                    "borderColor": LINE_COLOR,
                    "backgroundColor": LINE_FILL,
                    "fill": true,
                    "tension": 0.3
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": { "legend": { "display": spec.show_legend } },
                "scales": { "y": { "beginAtZero": spec.begin_at_zero } }
            }
        }),
        ChartKind::Doughnut => json!({
            "type": spec.kind,
            "data": {
                "labels": spec.labels,
                "datasets": [{
                    "label": spec.dataset_label,
                    "data": spec.values,
                    "backgroundColor": spec.colors
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": { "legend": { "display": spec.show_legend, "position": "right" } }
            }
        }),
    }
}
