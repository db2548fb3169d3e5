// Backend access: the trait the dashboard programs against and its HTTP implementation.
pub mod backend;
pub mod http_backend;

pub use backend::SimulatorBackend;
pub use http_backend::HttpBackend;
