// The simulator backend's REST surface as seen by the dashboard.
use async_trait::async_trait;
use shared::models::{
    NewTrade, PatternName, PriceBar, SimulationRequest, SimulationResult, StockSymbol,
    TradeRecord,
};

use crate::error::ClientError;

/// Every call the dashboard makes against the backend. `HttpBackend` is the
/// production implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait SimulatorBackend: Send + Sync {
    /// `GET /stock/{symbol}`, validated as a complete OHLC series.
    async fn fetch_stock_series(&self, symbol: &StockSymbol) -> Result<Vec<PriceBar>, ClientError>;

    /// `GET /trades`
    async fn fetch_trades(&self) -> Result<Vec<TradeRecord>, ClientError>;

    /// `POST /trade`, returning the record the backend created.
    async fn create_trade(&self, trade: &NewTrade) -> Result<TradeRecord, ClientError>;

    async fn list_patterns(&self) -> Result<Vec<PatternName>, ClientError>;
    async fn add_pattern(&self, name: &PatternName) -> Result<(), ClientError>;
    async fn remove_pattern(&self, name: &PatternName) -> Result<(), ClientError>;

    async fn list_stocks(&self) -> Result<Vec<StockSymbol>, ClientError>;
    async fn add_stock(&self, symbol: &StockSymbol) -> Result<(), ClientError>;
    async fn remove_stock(&self, symbol: &StockSymbol) -> Result<(), ClientError>;

    /// `POST /simulate`
    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, ClientError>;
}
