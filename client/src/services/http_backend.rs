// reqwest implementation of SimulatorBackend.
use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    NewTrade, PatternName, PatternPayload, PriceBar, SimulationRequest, SimulationResult,
    StockPayload, StockSymbol, TradeRecord,
};

use super::backend::SimulatorBackend;
use crate::config::BackendSettings;
use crate::data::validate_price_series;
use crate::error::ClientError;

#[derive(Clone)]
pub struct HttpBackend {
    settings: BackendSettings,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, ClientError> {
        settings.validate()?;
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!("stock-sim-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        tracing::info!(base_url = %settings.base_url, timeout_secs = settings.timeout_secs, "HTTP backend client ready");
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn stock_url(&self, symbol: &StockSymbol) -> Result<String, ClientError> {
        let mut url = Url::parse(&self.settings.endpoint("stock"))
            .map_err(|e| ClientError::Config(format!("invalid backend URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("backend URL cannot carry a path".to_string()))?
            .push(symbol.as_str());
        Ok(url.to_string())
    }

    /// Sends one request and returns the body text of a success response.
    async fn execute(&self, method: Method, url: &str, body: Option<Value>) -> Result<String, ClientError> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body.as_ref() {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%method, url, status = status.as_u16(), bytes = text.len(), "Backend responded");

        if !status.is_success() {
            let err = ClientError::from_status(status.as_u16(), &text);
            tracing::warn!(%method, url, status = status.as_u16(), error = %err, "Backend request failed");
            return Err(err);
        }
        Ok(text)
    }

    /// GETs are idempotent, so transport failures are retried with backoff.
    async fn get_text(&self, url: &str) -> Result<String, ClientError> {
        let policy = &self.settings.retry;
        let mut attempt = 1;
        loop {
            match self.execute(Method::GET, url, None).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                    let delay = policy.delay_for(attempt);
                    tracing::warn!(url, attempt, delay_ms = delay.as_millis() as u64, error = %err, "Retrying backend GET");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(url, attempt, error = %err, "Backend GET gave up");
                    return Err(err);
                }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let text = self.get_text(&self.settings.endpoint(path)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_json(&self, method: Method, path: &str, body: Value) -> Result<String, ClientError> {
        self.execute(method, &self.settings.endpoint(path), Some(body)).await
    }
}

fn to_body<T: serde::Serialize>(payload: &T) -> Result<Value, ClientError> {
    serde_json::to_value(payload)
        .map_err(|e| ClientError::Validation(format!("could not encode request: {}", e)))
}

#[async_trait]
impl SimulatorBackend for HttpBackend {
    async fn fetch_stock_series(&self, symbol: &StockSymbol) -> Result<Vec<PriceBar>, ClientError> {
        let url = self.stock_url(symbol)?;
        let text = self.get_text(&url).await?;
        let payload: Value = serde_json::from_str(&text)?;
        validate_price_series(payload)
    }

    async fn fetch_trades(&self) -> Result<Vec<TradeRecord>, ClientError> {
        self.get_json("trades").await
    }

    async fn create_trade(&self, trade: &NewTrade) -> Result<TradeRecord, ClientError> {
        tracing::info!(symbol = %trade.stock_symbol, trade_type = %trade.trade_type, "Submitting trade");
        let text = self.send_json(Method::POST, "trade", to_body(trade)?).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn list_patterns(&self) -> Result<Vec<PatternName>, ClientError> {
        self.get_json("patterns").await
    }

    async fn add_pattern(&self, name: &PatternName) -> Result<(), ClientError> {
        let body = to_body(&PatternPayload { pattern: name.clone() })?;
        self.send_json(Method::POST, "patterns", body).await.map(|_| ())
    }

    async fn remove_pattern(&self, name: &PatternName) -> Result<(), ClientError> {
        let body = to_body(&PatternPayload { pattern: name.clone() })?;
        self.send_json(Method::DELETE, "patterns", body).await.map(|_| ())
    }

    async fn list_stocks(&self) -> Result<Vec<StockSymbol>, ClientError> {
        self.get_json("stocks").await
    }

    async fn add_stock(&self, symbol: &StockSymbol) -> Result<(), ClientError> {
        let body = to_body(&StockPayload { stock: symbol.clone() })?;
        self.send_json(Method::POST, "stocks", body).await.map(|_| ())
    }

    async fn remove_stock(&self, symbol: &StockSymbol) -> Result<(), ClientError> {
        let body = to_body(&StockPayload { stock: symbol.clone() })?;
        self.send_json(Method::DELETE, "stocks", body).await.map(|_| ())
    }

    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, ClientError> {
        tracing::info!(
            patterns = request.patterns.len(),
            stocks = request.stocks.len(),
            "Requesting simulation run"
        );
        let text = self.send_json(Method::POST, "simulate", to_body(request)?).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
