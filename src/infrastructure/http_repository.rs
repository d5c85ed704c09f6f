// WazuhBoard HTTP API repository implementation
use crate::application::dashboard_repository::{DashboardRepository, FetchError};
use crate::domain::client::ClientRegistry;
use crate::domain::stats::DashboardStats;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDashboardRepository {
    client: reqwest::Client,
    base_url: String,
    time_range: Option<String>,
}

/// Body of `POST /api/stats/dashboard`; absent fields are left out, so no selection sends `{}`.
#[derive(Debug, Serialize)]
struct StatsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    client: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_range: Option<&'a str>,
}

impl HttpDashboardRepository {
    pub fn new(base_url: &str, timeout: Duration, time_range: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wazuhboard-viewer/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            time_range,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DashboardRepository for HttpDashboardRepository {
    async fn fetch_clients(&self) -> Result<ClientRegistry, FetchError> {
        let url = self.url("/api/clients");
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn fetch_stats(&self, client: Option<&str>) -> Result<DashboardStats, FetchError> {
        let url = self.url("/api/stats/dashboard");
        let request = StatsRequest {
            client,
            time_range: self.time_range.as_deref(),
        };
        tracing::debug!("POST {} client={:?}", url, client);

        // `.json()` sets the `Content-Type: application/json` header.
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repository(server: &MockServer, time_range: Option<&str>) -> HttpDashboardRepository {
        HttpDashboardRepository::new(
            &format!("{}/", server.uri()),
            Duration::from_secs(5),
            time_range.map(str::to_string),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_clients() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clients": [{"name": "lab", "description": "Lab"}],
                "default_client": "lab"
            })))
            .mount(&server)
            .await;

        let registry = repository(&server, None).fetch_clients().await.unwrap();
        assert_eq!(registry.clients.len(), 1);
        assert_eq!(registry.default_client.as_deref(), Some("lab"));
    }

    #[tokio::test]
    async fn test_fetch_stats_sends_selected_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/stats/dashboard"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"client": "lab"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "alerts_per_hour": [{"timestamp": "2025-01-01 10:00:00", "count": 4}],
                "severity_summary": {"critical": 1, "high": 2, "medium": 3, "low": 4}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let stats = repository(&server, None).fetch_stats(Some("lab")).await.unwrap();
        assert_eq!(stats.alerts_total(), 4);
        assert_eq!(stats.critical_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_stats_without_client_sends_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/stats/dashboard"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let stats = repository(&server, None).fetch_stats(None).await.unwrap();
        assert_eq!(stats, DashboardStats::default());
    }

    #[tokio::test]
    async fn test_fetch_stats_includes_time_range() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"client": "lab", "time_range": "7d"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"note": "7 day window"})))
            .expect(1)
            .mount(&server)
            .await;

        let stats = repository(&server, Some("7d")).fetch_stats(Some("lab")).await.unwrap();
        assert_eq!(stats.note_message(), Some("7 day window"));
    }

    #[tokio::test]
    async fn test_error_status_and_bad_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/stats/dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let repo = repository(&server, None);
        assert!(matches!(repo.fetch_clients().await, Err(FetchError::Status(500))));
        assert!(matches!(repo.fetch_stats(None).await, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let repo = HttpDashboardRepository::new("http://127.0.0.1:9", Duration::from_secs(1), None).unwrap();
        assert!(matches!(repo.fetch_stats(None).await, Err(FetchError::Transport(_))));
    }
}
