// Dashboard state container: state, events, the reducer, and request sequencing.
pub mod app_state;
pub mod event;
pub mod reducer;
pub mod sequence;

pub use app_state::{
    ChartStatus, DashboardState, PriceChartState, RegistryState, SimulationStatus, TradeField,
    TradeFormState,
};
pub use event::{BackendEvent, DashboardEvent, UiEvent};
pub use reducer::reduce;
pub use sequence::{RequestTracker, SequencePolicy, Ticket};
