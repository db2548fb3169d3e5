// Controllers for the dashboard: each operation issues its backend call,
// then feeds the response through the reducer. The state lock is never held
// across an await.

use client::{ClientError, SimulatorBackend};
use shared::models::{NewTrade, PatternName, StockSymbol, TradeRecord};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::state::{reduce, BackendEvent, DashboardEvent, DashboardState, UiEvent};

pub type TradeCallback = Arc<dyn Fn(&TradeRecord) + Send + Sync>;

pub struct DashboardController<B: SimulatorBackend + ?Sized> {
    backend: Arc<B>,
    state: Arc<Mutex<DashboardState>>,
    on_trade: Option<TradeCallback>,
}

impl<B: SimulatorBackend + ?Sized> Clone for DashboardController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
            on_trade: self.on_trade.clone(),
        }
    }
}

impl<B: SimulatorBackend + ?Sized> DashboardController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_state(backend, DashboardState::default())
    }

    pub fn with_state(backend: Arc<B>, state: DashboardState) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(state)),
            on_trade: None,
        }
    }

    /// Registers a callback that receives every trade the backend creates.
    pub fn on_trade_created(mut self, callback: impl Fn(&TradeRecord) + Send + Sync + 'static) -> Self {
        self.on_trade = Some(Arc::new(callback));
        self
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        // A panic while holding the lock cannot leave the state half-reduced
        // in a way later events can't repair, so poisoning is ignored.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> DashboardState {
        self.lock().clone()
    }

    pub fn dispatch(&self, event: impl Into<DashboardEvent>) -> bool {
        reduce(&mut self.lock(), event.into())
    }

    /// Initial load: registries and trade history in parallel.
    pub async fn load_all(&self) {
        let (patterns, stocks, trades) =
            tokio::join!(self.refresh_patterns(), self.refresh_stocks(), self.load_trades());
        for err in [patterns.err(), stocks.err(), trades.err()].into_iter().flatten() {
            tracing::warn!(error = %err, "Initial load incomplete");
        }
    }

    // --- Pattern registry ---

    pub async fn refresh_patterns(&self) -> Result<(), ClientError> {
        let ticket = self.lock().patterns.begin_refresh();
        let result = self.backend.list_patterns().await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.dispatch(BackendEvent::PatternsLoaded { ticket, result });
        outcome
    }

    /// Adds a pattern. Surrounding whitespace is not part of the name.
    pub async fn add_pattern(&self, name: PatternName) -> Result<(), ClientError> {
        let name = PatternName::new(name.as_str().trim());
        self.lock().patterns.begin_add(&name)?;
        tracing::info!(pattern = %name, "Adding pattern");
        let result = self.backend.add_pattern(&name).await;
        self.dispatch(BackendEvent::PatternAdded { name, result: result.clone() });
        self.refresh_after_mutation(self.refresh_patterns().await);
        result
    }

    /// Adds whatever is currently typed in the pattern input.
    pub async fn add_pattern_from_input(&self) -> Result<(), ClientError> {
        let name = PatternName::new(self.lock().patterns.input.clone());
        self.add_pattern(name).await
    }

    pub async fn remove_pattern(&self, name: PatternName) -> Result<(), ClientError> {
        tracing::info!(pattern = %name, "Removing pattern");
        let result = self.backend.remove_pattern(&name).await;
        self.dispatch(BackendEvent::PatternRemoved { name, result: result.clone() });
        self.refresh_after_mutation(self.refresh_patterns().await);
        result
    }

    pub fn set_pattern_input(&self, value: String) {
        self.dispatch(UiEvent::PatternInputChanged { value });
    }

    pub fn toggle_pattern(&self, name: PatternName) -> bool {
        self.dispatch(UiEvent::PatternToggled { name })
    }

    // --- Stock registry ---

    pub async fn refresh_stocks(&self) -> Result<(), ClientError> {
        let ticket = self.lock().stocks.begin_refresh();
        let result = self.backend.list_stocks().await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.dispatch(BackendEvent::StocksLoaded { ticket, result });
        outcome
    }

    pub async fn add_stock(&self, symbol: StockSymbol) -> Result<(), ClientError> {
        let symbol = StockSymbol::new(symbol.as_str().trim());
        self.lock().stocks.begin_add(&symbol)?;
        tracing::info!(stock = %symbol, "Adding stock");
        let result = self.backend.add_stock(&symbol).await;
        self.dispatch(BackendEvent::StockAdded { symbol, result: result.clone() });
        self.refresh_after_mutation(self.refresh_stocks().await);
        result
    }

    pub async fn add_stock_from_input(&self) -> Result<(), ClientError> {
        let symbol = StockSymbol::new(self.lock().stocks.input.clone());
        self.add_stock(symbol).await
    }

    pub async fn remove_stock(&self, symbol: StockSymbol) -> Result<(), ClientError> {
        tracing::info!(stock = %symbol, "Removing stock");
        let result = self.backend.remove_stock(&symbol).await;
        self.dispatch(BackendEvent::StockRemoved { symbol, result: result.clone() });
        self.refresh_after_mutation(self.refresh_stocks().await);
        result
    }

    pub fn set_stock_input(&self, value: String) {
        self.dispatch(UiEvent::StockInputChanged { value });
    }

    fn refresh_after_mutation(&self, refresh: Result<(), ClientError>) {
        if let Err(err) = refresh {
            tracing::warn!(error = %err, "Registry refresh after mutation failed");
        }
    }

    // --- Simulation ---

    /// Runs a simulation over the current selection and stock registry.
    /// A run started while another is in flight supersedes it; the older
    /// response is dropped when it arrives.
    pub async fn run_simulation(&self) -> Result<(), ClientError> {
        let (ticket, request) = self.lock().begin_simulation();
        tracing::info!(
            ticket = ticket.0,
            patterns = request.patterns.len(),
            stocks = request.stocks.len(),
            "Starting simulation run"
        );
        let result = self.backend.simulate(&request).await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.dispatch(BackendEvent::SimulationFinished { ticket, result });
        outcome
    }

    // --- Trades ---

    pub async fn load_trades(&self) -> Result<(), ClientError> {
        let ticket = self.lock().begin_trades_load();
        let result = self.backend.fetch_trades().await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.dispatch(BackendEvent::TradesLoaded { ticket, result });
        outcome
    }

    /// Submits the trade form as typed.
    pub async fn submit_trade(&self) -> Result<TradeRecord, ClientError> {
        let trade = self.lock().begin_trade_submit();
        self.send_trade(trade).await
    }

    pub async fn submit_trade_with(&self, trade: NewTrade) -> Result<TradeRecord, ClientError> {
        self.lock().trade_submitting = true;
        self.send_trade(trade).await
    }

    async fn send_trade(&self, trade: NewTrade) -> Result<TradeRecord, ClientError> {
        let result = self.backend.create_trade(&trade).await;
        if let (Ok(record), Some(callback)) = (&result, &self.on_trade) {
            callback(record);
        }
        self.dispatch(BackendEvent::TradeCreated { result: result.clone() });
        result
    }

    pub fn dispatch_ui(&self, event: UiEvent) -> bool {
        self.dispatch(event)
    }

    // --- Price chart ---

    pub async fn load_price_chart(&self, symbol: StockSymbol) -> Result<(), ClientError> {
        let ticket = self.lock().price_chart.begin(symbol.clone());
        tracing::info!(symbol = %symbol, ticket = ticket.0, "Loading price chart");
        let result = self.backend.fetch_stock_series(&symbol).await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.dispatch(BackendEvent::PriceSeriesLoaded { ticket, symbol, result });
        outcome
    }
}
