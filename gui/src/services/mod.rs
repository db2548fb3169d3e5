// Dashboard controllers bridging the view state and the simulator backend.
pub mod dashboard;

pub use dashboard::{DashboardController, TradeCallback};

/// Controller the desktop app runs against.
pub type AppController = DashboardController<client::HttpBackend>;
