// Application layer - Dashboard use cases and the seams they depend on
pub mod chart_adapter;
pub mod chart_backend;
pub mod dashboard_app;
pub mod dashboard_repository;
pub mod notifications;
pub mod view_state;
pub mod widget_renderer;
