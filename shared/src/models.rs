use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::lenient_string;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_newtype!(
    /// Name of a chart pattern known to the backend detector, e.g. "Double Top".
    PatternName
);
string_newtype!(
    /// Ticker symbol in the simulation stock registry.
    StockSymbol
);

/// One OHLC candle as served by `GET /stock/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A point of a simulated stock's price series.
///
/// Some backends emit `{Date, Close}` pairs, others full point objects;
/// both decode into this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(alias = "Date", deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(alias = "Close")]
    pub close: f64,
    #[serde(default, alias = "Open", skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, alias = "High", skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, alias = "Low", skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternPoint {
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    pub price: f64,
}

/// A pattern occurrence found by the backend during a simulation run.
///
/// The variant is picked by which fields are present in the payload:
/// `start`/`end` pairs, or a trigger `date` with a three point outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternMatch {
    StartEnd {
        name: PatternName,
        performance: f64,
        start: PatternPoint,
        end: PatternPoint,
    },
    Trigger {
        name: PatternName,
        performance: f64,
        #[serde(deserialize_with = "lenient_string")]
        date: String,
        #[serde(alias = "points")]
        coordinates: [PatternPoint; 3],
    },
}

impl PatternMatch {
    pub fn name(&self) -> &PatternName {
        match self {
            PatternMatch::StartEnd { name, .. } | PatternMatch::Trigger { name, .. } => name,
        }
    }

    pub fn performance(&self) -> f64 {
        match self {
            PatternMatch::StartEnd { performance, .. }
            | PatternMatch::Trigger { performance, .. } => *performance,
        }
    }

    /// Points outlining the pattern on the price chart, in drawing order.
    pub fn points(&self) -> Vec<&PatternPoint> {
        match self {
            PatternMatch::StartEnd { start, end, .. } => vec![start, end],
            PatternMatch::Trigger { coordinates, .. } => coordinates.iter().collect(),
        }
    }

    pub fn trigger_date(&self) -> Option<&str> {
        match self {
            PatternMatch::Trigger { date, .. } => Some(date),
            PatternMatch::StartEnd { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAction {
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(alias = "type")]
    pub action: TradeDirection,
}

/// Per-stock outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockResult {
    pub performance: f64,
    #[serde(default, alias = "data")]
    pub series: Vec<PricePoint>,
    #[serde(default)]
    pub patterns: Vec<PatternMatch>,
    #[serde(default)]
    pub actions: Vec<TradeAction>,
}

/// Response of `POST /simulate`, keyed by stock symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationResult(pub BTreeMap<StockSymbol, StockResult>);

impl SimulationResult {
    pub fn get(&self, symbol: &StockSymbol) -> Option<&StockResult> {
        self.0.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StockSymbol, &StockResult)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of `POST /simulate`. Both lists are always sent so a run never
/// depends on stock state held only by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub patterns: Vec<PatternName>,
    pub stocks: Vec<StockSymbol>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternPayload {
    pub pattern: PatternName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPayload {
    pub stock: StockSymbol,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    #[default]
    Buy,
    Sell,
    Short,
}

impl TradeType {
    pub const ALL: [TradeType; 3] = [TradeType::Buy, TradeType::Sell, TradeType::Short];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "buy",
            TradeType::Sell => "sell",
            TradeType::Short => "short",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradeType::Buy => "Buy",
            TradeType::Sell => "Sell",
            TradeType::Short => "Short",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /trade`. Quantity and price are forwarded exactly as typed;
/// the backend owns numeric validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub user_id: String,
    pub stock_symbol: String,
    pub trade_type: TradeType,
    pub quantity: String,
    pub price: String,
}

/// A trade as reported by `GET /trades` or echoed by `POST /trade`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub stock_symbol: String,
    pub trade_type: TradeType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
}

impl TradeRecord {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} {} shares of {} at ${}",
            self.date, self.trade_type, self.quantity, self.stock_symbol, self.price
        )
    }
}
