// Client library for the stock simulator backend.

pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use config::{BackendSettings, RetryPolicy};
pub use error::{ClientError, FailureKind};
pub use services::{HttpBackend, SimulatorBackend};
