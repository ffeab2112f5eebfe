//! Dockdash - a terminal dashboard for Docker
//!
//! Panels for containers, images, volumes, and networks over the Docker
//! Engine API, plus one-shot stats, logs, and inspect views.

pub mod app;
pub mod config;
pub mod core;
pub mod docker;
pub mod state;
pub mod ui;
