// View state - Everything the page currently shows
use crate::application::chart_adapter::ChartAdapter;
use crate::application::notifications::NotificationSurface;
use crate::domain::view::{ClientSelector, SummaryLabels, ViewLayout};
use crate::domain::widget::RenderedView;

pub struct ViewState {
    pub layout: ViewLayout,
    pub selector: ClientSelector,
    /// Content of the stats container; `None` until the first render.
    pub content: Option<RenderedView>,
    pub summary_labels: SummaryLabels,
    pub notifications: NotificationSurface,
    pub charts: ChartAdapter,
}

impl ViewState {
    pub fn new(layout: ViewLayout, charts: ChartAdapter) -> Self {
        Self {
            layout,
            selector: ClientSelector::default(),
            content: None,
            summary_labels: SummaryLabels::default(),
            notifications: NotificationSurface::new(),
            charts,
        }
    }

    /// Client the next stats request is scoped to. Without a selector there is none.
    pub fn selected_client(&self) -> Option<&str> {
        if !self.layout.selector {
            return None;
        }
        self.selector.selected.as_deref()
    }
}
