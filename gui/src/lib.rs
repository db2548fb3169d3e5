// Stock trading simulator dashboard: view state, controllers and rendering.
// The desktop window itself sits behind the `desktop` feature.
#![allow(non_snake_case)] // Dioxus components

pub mod config;
pub mod render;
pub mod services;
pub mod state;

#[cfg(feature = "desktop")]
pub mod app;
#[cfg(feature = "desktop")]
pub mod components;

pub use config::AppConfig;
pub use services::{AppController, DashboardController};
pub use state::DashboardState;
