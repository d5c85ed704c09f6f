// View elements - Layout, selector and summary labels
use super::client::{Client, ClientRegistry};
use serde::Deserialize;

/// Which optional page elements exist. Only the stats container is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewLayout {
    pub selector: bool,
    pub refresh_button: bool,
    pub summary_labels: bool,
    pub stats_container: bool,
}

impl Default for ViewLayout {
    fn default() -> Self {
        Self {
            selector: true,
            refresh_button: true,
            summary_labels: true,
            stats_container: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSelector {
    pub options: Vec<SelectorOption>,
    pub selected: Option<String>,
}

impl ClientSelector {
    /// Replaces the option set and selects the registry's initial client.
    pub fn populate(&mut self, registry: &ClientRegistry) {
        self.options = registry
            .clients
            .iter()
            .map(|c: &Client| SelectorOption {
                value: c.name.clone(),
                label: c.label().to_string(),
            })
            .collect();
        self.selected = registry.initial_client().map(|c| c.name.clone());
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn select(&mut self, value: &str) -> bool {
        if self.contains(value) {
            self.selected = Some(value.to_string());
            true
        } else {
            false
        }
    }
}

/// Text of the four severity labels outside the stats container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryLabels {
    pub critical: Option<String>,
    pub high: Option<String>,
    pub medium: Option<String>,
    pub low: Option<String>,
}
