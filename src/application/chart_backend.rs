// Chart backend trait - Lifecycle of chart instances in the charting library
use crate::domain::chart::{ChartHandle, ChartSlot, ChartSpec};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart for {0:?} has {1} labels but {2} values")]
    Mismatched(ChartSlot, usize, usize),
    #[error("charting library rejected the chart: {0}")]
    Backend(String),
}

pub trait ChartBackend: Send {
    /// Draw a chart into the slot's canvas and return its instance handle
    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Result<ChartHandle, ChartError>;

    /// Release a live instance
    fn destroy(&mut self, handle: ChartHandle);
}
