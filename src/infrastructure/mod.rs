// Infrastructure layer - External dependencies and adapters
pub mod chartjs_backend;
pub mod config;
pub mod http_repository;
