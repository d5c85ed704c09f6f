// Dashboard application - Load, client change and refresh entry points
use crate::application::dashboard_repository::DashboardRepository;
use crate::application::notifications::BANNER_LIFETIME;
use crate::application::view_state::ViewState;
use crate::application::widget_renderer::WidgetRenderer;
use crate::domain::notification::BannerKind;
use crate::domain::stats::DashboardStats;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, watch};

pub const NO_CLIENTS_MESSAGE: &str = "No clients configured";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load dashboard statistics";

/// What a stats fetch ended up doing to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Widgets were rendered.
    Rendered,
    /// The payload carried an error; only the error view was rendered.
    ErrorView,
    /// The request failed; the previous view is untouched.
    TransportFailed,
    /// A newer request was issued while this one was in flight; the response was dropped.
    Stale,
    /// The page has no stats container to render into.
    ContainerMissing,
}

pub struct DashboardApp {
    repository: Arc<dyn DashboardRepository>,
    renderer: WidgetRenderer,
    state: Arc<Mutex<ViewState>>,
    latest_request: AtomicU64,
    banner_lifetime: Duration,
    dismissed: Arc<watch::Sender<u64>>,
}

impl DashboardApp {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        renderer: WidgetRenderer,
        state: ViewState,
    ) -> Self {
        Self {
            repository,
            renderer,
            state: Arc::new(Mutex::new(state)),
            latest_request: AtomicU64::new(0),
            banner_lifetime: BANNER_LIFETIME,
            dismissed: Arc::new(watch::channel(0).0),
        }
    }

    /// Loads the client list, fills the selector and renders the initial client.
    ///
    /// Returns `None` when there is no client to show.
    pub async fn on_load(&self) -> Option<RefreshOutcome> {
        let registry = match self.repository.fetch_clients().await {
            Ok(registry) if !registry.is_empty() => registry,
            Ok(_) => {
                tracing::warn!("Client registry is empty");
                self.notify(BannerKind::Error, NO_CLIENTS_MESSAGE).await;
                return None;
            }
            Err(e) => {
                tracing::warn!("Error fetching clients: {}", e);
                self.notify(BannerKind::Error, NO_CLIENTS_MESSAGE).await;
                return None;
            }
        };

        tracing::debug!("Loaded {} clients", registry.clients.len());
        {
            let mut state = self.state.lock().await;
            state.selector.populate(&registry);
            if let (Some(missing), Some(initial)) = (registry.unknown_default(), registry.initial_client()) {
                tracing::warn!("Default client {} is not configured", missing);
                let message = format!("Default client {} not found, showing {}", missing, initial.label());
                self.show_banner(&mut state, BannerKind::Warning, &message);
            }
        }

        Some(self.fetch_and_render().await)
    }

    /// Selects `client` and renders it. Returns `None` when the page has no selector or the
    /// client is not in it.
    pub async fn on_client_change(&self, client: &str) -> Option<RefreshOutcome> {
        {
            let mut state = self.state.lock().await;
            if !state.layout.selector {
                tracing::warn!("Ignoring selection of {}, the page has no client selector", client);
                return None;
            }
            if !state.selector.select(client) {
                tracing::warn!("Ignoring selection of unknown client {}", client);
                return None;
            }
        }
        Some(self.fetch_and_render().await)
    }

    pub async fn on_refresh(&self) -> RefreshOutcome {
        self.fetch_and_render().await
    }

    /// Receives the id of every banner removed by its timer.
    pub fn dismissals(&self) -> watch::Receiver<u64> {
        self.dismissed.subscribe()
    }

    /// Runs `f` against the current view state.
    pub async fn with_view<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    async fn fetch_and_render(&self) -> RefreshOutcome {
        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let client = self
            .state
            .lock()
            .await
            .selected_client()
            .map(str::to_string);

        tracing::debug!("Fetching stats for client={:?} (request {})", client, token);
        let result = self.repository.fetch_stats(client.as_deref()).await;

        let mut state = self.state.lock().await;
        if token != self.latest_request.load(Ordering::SeqCst) {
            tracing::debug!("Dropping response to request {}, a newer one was issued", token);
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(stats) => self.render(&mut state, &stats, client.as_deref()),
            Err(e) => {
                tracing::warn!("Error fetching dashboard stats: {}", e);
                self.show_banner(&mut state, BannerKind::Error, FETCH_FAILED_MESSAGE);
                RefreshOutcome::TransportFailed
            }
        }
    }

    fn render(
        &self,
        state: &mut ViewState,
        stats: &DashboardStats,
        client: Option<&str>,
    ) -> RefreshOutcome {
        if !state.layout.stats_container {
            tracing::error!("Stats container is missing from the page, skipping render");
            return RefreshOutcome::ContainerMissing;
        }

        let view = self.renderer.render(stats, client);
        let is_error = view.is_error();

        let ViewState {
            layout,
            content,
            summary_labels,
            charts,
            ..
        } = &mut *state;
        let view = content.insert(view);
        charts.apply(stats, view, layout.summary_labels.then_some(summary_labels));

        if let Some(message) = stats.error_message() {
            tracing::warn!("Dashboard stats reported an error: {}", message);
            self.show_banner(state, BannerKind::Error, message);
        } else if let Some(note) = stats.note_message() {
            self.show_banner(state, BannerKind::Info, note);
        }

        if is_error {
            RefreshOutcome::ErrorView
        } else {
            RefreshOutcome::Rendered
        }
    }

    async fn notify(&self, kind: BannerKind, message: &str) {
        let mut state = self.state.lock().await;
        self.show_banner(&mut state, kind, message);
    }

    /// Shows a banner and schedules its removal.
    fn show_banner(&self, state: &mut ViewState, kind: BannerKind, message: &str) {
        let id = state.notifications.show(kind, message);
        let shared = Arc::clone(&self.state);
        let dismissed = Arc::clone(&self.dismissed);
        let lifetime = self.banner_lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if shared.lock().await.notifications.dismiss(id) {
                dismissed.send_replace(id);
            }
        });
    }
}
