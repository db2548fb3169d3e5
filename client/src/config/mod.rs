pub mod settings;

pub use settings::{BackendSettings, RetryPolicy};
