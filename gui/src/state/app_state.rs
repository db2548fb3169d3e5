// Dashboard view state. Everything here is transient: it is rebuilt from the
// backend on start-up and mutated only through `reducer::reduce` and the
// `begin_*` request transitions below.

use client::ClientError;
use shared::models::{
    NewTrade, PatternName, PriceBar, SimulationRequest, SimulationResult, StockSymbol,
    TradeRecord, TradeType,
};
use std::fmt::Display;

use super::sequence::{RequestTracker, SequencePolicy, Ticket};

/// Values held in a backend registry (pattern names, stock symbols).
pub trait RegistryEntry: Clone + PartialEq + Display {
    const KIND: &'static str;

    fn is_blank(&self) -> bool;
}

impl RegistryEntry for PatternName {
    const KIND: &'static str = "pattern";

    fn is_blank(&self) -> bool {
        PatternName::is_blank(self)
    }
}

impl RegistryEntry for StockSymbol {
    const KIND: &'static str = "stock";

    fn is_blank(&self) -> bool {
        StockSymbol::is_blank(self)
    }
}

/// A backend-held list plus its add-input field.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryState<T> {
    pub items: Vec<T>,
    pub input: String,
    pub error: Option<ClientError>,
    pub loaded: bool,
    pending_adds: Vec<PendingAdd<T>>,
    tracker: RequestTracker,
}

/// An add the registry list does not reflect yet. Once the POST succeeds the
/// entry stays until a refresh issued after that point settles.
#[derive(Debug, Clone, PartialEq)]
struct PendingAdd<T> {
    item: T,
    /// Last refresh ticket issued when the POST succeeded.
    confirmed_after: Option<Ticket>,
}

impl<T: RegistryEntry> Default for RegistryState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            input: String::new(),
            error: None,
            loaded: false,
            pending_adds: Vec::new(),
            tracker: RequestTracker::new(SequencePolicy::LatestApplied),
        }
    }
}

impl<T: RegistryEntry> RegistryState<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn is_pending(&self, item: &T) -> bool {
        self.pending_adds.iter().any(|p| &p.item == item)
    }

    pub fn begin_refresh(&mut self) -> Ticket {
        self.tracker.issue()
    }

    /// Guards an add before it is sent: blank values are invalid, and values
    /// already listed or already being added are conflicts.
    pub fn begin_add(&mut self, item: &T) -> Result<(), ClientError> {
        let verdict = if item.is_blank() {
            Err(ClientError::Validation(format!("{} must not be empty", T::KIND)))
        } else if self.contains(item) || self.is_pending(item) {
            Err(ClientError::Conflict(format!("{} '{}' already exists", T::KIND, item)))
        } else {
            Ok(())
        };

        match verdict {
            Ok(()) => {
                self.pending_adds.push(PendingAdd { item: item.clone(), confirmed_after: None });
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(kind = T::KIND, value = %item, error = %err, "Add rejected before sending");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub(crate) fn apply_loaded(&mut self, ticket: Ticket, result: Result<Vec<T>, ClientError>) -> bool {
        if !self.tracker.settle(ticket) {
            tracing::warn!(kind = T::KIND, ticket = ticket.0, "Discarding stale registry response");
            return false;
        }
        // The refresh was issued after these adds landed, so the list (or
        // the failure) now accounts for them.
        self.pending_adds
            .retain(|p| !matches!(p.confirmed_after, Some(after) if ticket > after));
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
                self.error = None;
            }
            Err(err) => {
                tracing::error!(kind = T::KIND, error = %err, "Registry refresh failed; keeping previous list");
                self.error = Some(err);
            }
        }
        true
    }

    pub(crate) fn apply_add_finished(&mut self, item: &T, result: Result<(), ClientError>) -> bool {
        match result {
            Ok(()) => {
                let after = self.tracker.last_issued();
                for pending in self.pending_adds.iter_mut().filter(|p| &p.item == item) {
                    pending.confirmed_after = Some(after);
                }
                if self.input.trim() == item.to_string() {
                    self.input.clear();
                }
                self.error = None;
            }
            Err(err) => {
                self.pending_adds.retain(|p| &p.item != item);
                tracing::error!(kind = T::KIND, value = %item, error = %err, "Add failed");
                self.error = Some(err);
            }
        }
        true
    }

    pub(crate) fn apply_remove_finished(&mut self, item: &T, result: Result<(), ClientError>) -> bool {
        match result {
            Ok(()) => {
                // Drop it now; the follow-up refresh may fail.
                self.items.retain(|i| i != item);
                self.error = None;
                true
            }
            Err(err) => {
                tracing::error!(kind = T::KIND, value = %item, error = %err, "Remove failed");
                self.error = Some(err);
                true
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationStatus {
    Idle,
    Running { ticket: Ticket },
    Failed(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeField {
    UserId,
    StockSymbol,
    Quantity,
    Price,
}

/// Raw trade form fields; nothing is validated client-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFormState {
    pub user_id: String,
    pub stock_symbol: String,
    pub trade_type: TradeType,
    pub quantity: String,
    pub price: String,
}

impl TradeFormState {
    pub fn set(&mut self, field: TradeField, value: String) {
        match field {
            TradeField::UserId => self.user_id = value,
            TradeField::StockSymbol => self.stock_symbol = value,
            TradeField::Quantity => self.quantity = value,
            TradeField::Price => self.price = value,
        }
    }

    pub fn to_new_trade(&self) -> NewTrade {
        NewTrade {
            user_id: self.user_id.clone(),
            stock_symbol: self.stock_symbol.clone(),
            trade_type: self.trade_type,
            quantity: self.quantity.clone(),
            price: self.price.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartStatus {
    Loading,
    Ready(Vec<PriceBar>),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceChartState {
    pub symbol: StockSymbol,
    pub status: ChartStatus,
    tracker: RequestTracker,
}

impl PriceChartState {
    pub fn new(symbol: StockSymbol) -> Self {
        Self {
            symbol,
            status: ChartStatus::Loading,
            tracker: RequestTracker::new(SequencePolicy::LatestIssued),
        }
    }

    /// Switches to `symbol` and shows the loading state until its series lands.
    pub fn begin(&mut self, symbol: StockSymbol) -> Ticket {
        self.symbol = symbol;
        self.status = ChartStatus::Loading;
        self.tracker.issue()
    }

    /// Bars to draw. An empty series keeps the chart in its loading state.
    pub fn bars(&self) -> Option<&[PriceBar]> {
        match &self.status {
            ChartStatus::Ready(bars) if !bars.is_empty() => Some(bars),
            _ => None,
        }
    }

    pub(crate) fn apply_loaded(
        &mut self,
        ticket: Ticket,
        symbol: &StockSymbol,
        result: Result<Vec<PriceBar>, ClientError>,
    ) -> bool {
        if symbol != &self.symbol || !self.tracker.settle(ticket) {
            tracing::warn!(symbol = %symbol, ticket = ticket.0, "Discarding stale price series");
            return false;
        }
        self.status = match result {
            Ok(bars) => {
                tracing::info!(symbol = %symbol, bars = bars.len(), "Price series loaded");
                ChartStatus::Ready(bars)
            }
            Err(err) => {
                tracing::error!(symbol = %symbol, error = %err, "Price series rejected");
                ChartStatus::Failed(err)
            }
        };
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub patterns: RegistryState<PatternName>,
    pub stocks: RegistryState<StockSymbol>,
    /// Patterns chosen as input to the next simulation run, in selection order.
    pub selection: Vec<PatternName>,

    pub simulation: SimulationStatus,
    pub results: Option<SimulationResult>,
    simulation_tracker: RequestTracker,

    pub trades: Vec<TradeRecord>,
    pub trades_error: Option<ClientError>,
    trades_tracker: RequestTracker,
    pub trade_form: TradeFormState,
    pub trade_form_error: Option<ClientError>,
    pub trade_submitting: bool,

    pub price_chart: PriceChartState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(StockSymbol::from("AAPL"))
    }
}

impl DashboardState {
    pub fn new(chart_symbol: StockSymbol) -> Self {
        Self {
            patterns: RegistryState::default(),
            stocks: RegistryState::default(),
            selection: Vec::new(),
            simulation: SimulationStatus::Idle,
            results: None,
            simulation_tracker: RequestTracker::new(SequencePolicy::LatestIssued),
            trades: Vec::new(),
            trades_error: None,
            trades_tracker: RequestTracker::new(SequencePolicy::LatestApplied),
            trade_form: TradeFormState::default(),
            trade_form_error: None,
            trade_submitting: false,
            price_chart: PriceChartState::new(chart_symbol),
        }
    }

    pub fn is_selected(&self, name: &PatternName) -> bool {
        self.selection.contains(name)
    }

    pub fn is_simulating(&self) -> bool {
        matches!(self.simulation, SimulationStatus::Running { .. })
    }

    /// Starts a simulation run. Any run still in flight is superseded.
    pub fn begin_simulation(&mut self) -> (Ticket, SimulationRequest) {
        let ticket = self.simulation_tracker.issue();
        self.simulation = SimulationStatus::Running { ticket };
        let request = SimulationRequest {
            patterns: self.selection.clone(),
            stocks: self.stocks.items.clone(),
        };
        (ticket, request)
    }

    pub fn begin_trades_load(&mut self) -> Ticket {
        self.trades_tracker.issue()
    }

    pub fn begin_trade_submit(&mut self) -> NewTrade {
        self.trade_submitting = true;
        self.trade_form.to_new_trade()
    }

    pub(crate) fn apply_simulation(
        &mut self,
        ticket: Ticket,
        result: Result<SimulationResult, ClientError>,
    ) -> bool {
        if !self.simulation_tracker.settle(ticket) {
            tracing::warn!(ticket = ticket.0, "Discarding superseded simulation response");
            return false;
        }
        match result {
            Ok(result) => {
                tracing::info!(ticket = ticket.0, stocks = result.len(), "Simulation results received");
                self.results = Some(result);
                self.simulation = SimulationStatus::Idle;
            }
            Err(err) => {
                tracing::error!(ticket = ticket.0, error = %err, "Simulation failed; keeping previous results");
                self.simulation = SimulationStatus::Failed(err);
            }
        }
        true
    }

    pub(crate) fn apply_trades(&mut self, ticket: Ticket, result: Result<Vec<TradeRecord>, ClientError>) -> bool {
        if !self.trades_tracker.settle(ticket) {
            return false;
        }
        match result {
            Ok(trades) => {
                self.trades = trades;
                self.trades_error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "Loading trade history failed");
                self.trades_error = Some(err);
            }
        }
        true
    }

    /// Appends a trade the backend just created. History loads issued before
    /// this point would not contain it, so their responses are dropped.
    pub(crate) fn record_trade(&mut self, record: TradeRecord) {
        self.trades_tracker.supersede();
        self.trades.push(record);
    }

    /// Drops selections whose pattern is no longer in the registry.
    pub(crate) fn prune_selection(&mut self) -> bool {
        let before = self.selection.len();
        let registry = &self.patterns.items;
        self.selection.retain(|name| registry.contains(name));
        before != self.selection.len()
    }
}
