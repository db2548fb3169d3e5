use client::ClientError;
use shared::models::{PatternName, PriceBar, SimulationResult, StockSymbol, TradeRecord, TradeType};

use super::app_state::TradeField;
use super::sequence::Ticket;

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    Ui(UiEvent),
    Backend(BackendEvent),
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    PatternInputChanged { value: String },
    StockInputChanged { value: String },
    PatternToggled { name: PatternName },

    TradeFieldChanged { field: TradeField, value: String },
    TradeTypeChanged { trade_type: TradeType },
}

#[derive(Debug, Clone)]
pub enum BackendEvent {
    PatternsLoaded {
        ticket: Ticket,
        result: Result<Vec<PatternName>, ClientError>,
    },
    PatternAdded {
        name: PatternName,
        result: Result<(), ClientError>,
    },
    PatternRemoved {
        name: PatternName,
        result: Result<(), ClientError>,
    },

    StocksLoaded {
        ticket: Ticket,
        result: Result<Vec<StockSymbol>, ClientError>,
    },
    StockAdded {
        symbol: StockSymbol,
        result: Result<(), ClientError>,
    },
    StockRemoved {
        symbol: StockSymbol,
        result: Result<(), ClientError>,
    },

    SimulationFinished {
        ticket: Ticket,
        result: Result<SimulationResult, ClientError>,
    },

    TradesLoaded {
        ticket: Ticket,
        result: Result<Vec<TradeRecord>, ClientError>,
    },
    TradeCreated {
        result: Result<TradeRecord, ClientError>,
    },

    PriceSeriesLoaded {
        ticket: Ticket,
        symbol: StockSymbol,
        result: Result<Vec<PriceBar>, ClientError>,
    },
}

impl From<UiEvent> for DashboardEvent {
    fn from(ev: UiEvent) -> Self {
        DashboardEvent::Ui(ev)
    }
}

impl From<BackendEvent> for DashboardEvent {
    fn from(ev: BackendEvent) -> Self {
        DashboardEvent::Backend(ev)
    }
}
