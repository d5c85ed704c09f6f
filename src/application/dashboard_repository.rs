// Repository trait for dashboard data access
use crate::domain::client::ClientRegistry;
use crate::domain::stats::DashboardStats;
use async_trait::async_trait;
use thiserror::Error;

/// Why a request produced no usable payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// List the configured clients and the default one
    async fn fetch_clients(&self) -> Result<ClientRegistry, FetchError>;

    /// Fetch dashboard statistics, scoped to `client` when one is selected
    async fn fetch_stats(&self, client: Option<&str>) -> Result<DashboardStats, FetchError>;
}
