// Domain layer - Payload, widget and view models
pub mod chart;
pub mod client;
pub mod notification;
pub mod stats;
pub mod view;
pub mod widget;
