use super::app_state::*;
use super::event::*;

/// Applies one event to the dashboard state. Returns whether anything the
/// view shows has changed.
pub fn reduce(state: &mut DashboardState, ev: DashboardEvent) -> bool {
    match ev {
        DashboardEvent::Ui(u) => reduce_ui(state, u),
        DashboardEvent::Backend(b) => reduce_backend(state, b),
    }
}

fn reduce_ui(state: &mut DashboardState, ev: UiEvent) -> bool {
    match ev {
        UiEvent::PatternInputChanged { value } => {
            state.patterns.input = value;
            true
        }
        UiEvent::StockInputChanged { value } => {
            state.stocks.input = value;
            true
        }
        UiEvent::PatternToggled { name } => {
            if let Some(pos) = state.selection.iter().position(|p| p == &name) {
                state.selection.remove(pos);
                return true;
            }
            if !state.patterns.contains(&name) {
                tracing::warn!(pattern = %name, "Ignoring selection of unknown pattern");
                return false;
            }
            state.selection.push(name);
            true
        }
        UiEvent::TradeFieldChanged { field, value } => {
            state.trade_form.set(field, value);
            true
        }
        UiEvent::TradeTypeChanged { trade_type } => {
            state.trade_form.trade_type = trade_type;
            true
        }
    }
}

fn reduce_backend(state: &mut DashboardState, ev: BackendEvent) -> bool {
    match ev {
        BackendEvent::PatternsLoaded { ticket, result } => {
            if !state.patterns.apply_loaded(ticket, result) {
                return false;
            }
            if state.prune_selection() {
                tracing::info!(selected = state.selection.len(), "Pruned selection to current registry");
            }
            true
        }
        BackendEvent::PatternAdded { name, result } => state.patterns.apply_add_finished(&name, result),
        BackendEvent::PatternRemoved { name, result } => {
            if !state.patterns.apply_remove_finished(&name, result) {
                return false;
            }
            state.prune_selection();
            true
        }

        BackendEvent::StocksLoaded { ticket, result } => state.stocks.apply_loaded(ticket, result),
        BackendEvent::StockAdded { symbol, result } => state.stocks.apply_add_finished(&symbol, result),
        BackendEvent::StockRemoved { symbol, result } => state.stocks.apply_remove_finished(&symbol, result),

        BackendEvent::SimulationFinished { ticket, result } => state.apply_simulation(ticket, result),

        BackendEvent::TradesLoaded { ticket, result } => state.apply_trades(ticket, result),
        BackendEvent::TradeCreated { result } => {
            state.trade_submitting = false;
            match result {
                Ok(record) => {
                    tracing::info!(symbol = %record.stock_symbol, trade_type = %record.trade_type, "Trade recorded");
                    state.record_trade(record);
                    state.trade_form_error = None;
                }
                Err(err) => {
                    tracing::error!(error = %err, "Trade submission failed");
                    state.trade_form_error = Some(err);
                }
            }
            true
        }

        BackendEvent::PriceSeriesLoaded { ticket, symbol, result } => {
            state.price_chart.apply_loaded(ticket, &symbol, result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::ClientError;
    use shared::models::{
        PatternName, PriceBar, SimulationResult, StockResult, StockSymbol, TradeRecord, TradeType,
    };
    use std::collections::BTreeMap;

    fn names(raw: &[&str]) -> Vec<PatternName> {
        raw.iter().map(|s| PatternName::from(*s)).collect()
    }

    fn loaded_state(raw: &[&str]) -> DashboardState {
        let mut state = DashboardState::default();
        let ticket = state.patterns.begin_refresh();
        reduce(&mut state, BackendEvent::PatternsLoaded { ticket, result: Ok(names(raw)) }.into());
        state
    }

    fn toggle(state: &mut DashboardState, name: &str) -> bool {
        reduce(state, UiEvent::PatternToggled { name: name.into() }.into())
    }

    fn result_with(symbol: &str, performance: f64) -> SimulationResult {
        let mut map = BTreeMap::new();
        map.insert(
            StockSymbol::from(symbol),
            StockResult { performance, series: vec![], patterns: vec![], actions: vec![] },
        );
        SimulationResult(map)
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut state = loaded_state(&["Double Top", "Cup and Handle"]);
        let before = state.selection.clone();
        assert!(toggle(&mut state, "Double Top"));
        assert!(state.is_selected(&"Double Top".into()));
        assert!(toggle(&mut state, "Double Top"));
        assert_eq!(state.selection, before);
    }

    #[test]
    fn test_toggle_unknown_pattern_ignored() {
        let mut state = loaded_state(&["Double Top"]);
        assert!(!toggle(&mut state, "Triangle"));
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_refresh_prunes_removed_selection() {
        let mut state = loaded_state(&["Double Top", "Triangle"]);
        toggle(&mut state, "Double Top");
        toggle(&mut state, "Triangle");
        let ticket = state.patterns.begin_refresh();
        reduce(&mut state, BackendEvent::PatternsLoaded { ticket, result: Ok(names(&["Triangle"])) }.into());
        assert_eq!(state.selection, names(&["Triangle"]));
    }

    #[test]
    fn test_out_of_order_refresh_is_discarded() {
        let mut state = DashboardState::default();
        let older = state.patterns.begin_refresh();
        let newer = state.patterns.begin_refresh();
        assert!(reduce(
            &mut state,
            BackendEvent::PatternsLoaded { ticket: newer, result: Ok(names(&["A", "B"])) }.into()
        ));
        assert!(!reduce(
            &mut state,
            BackendEvent::PatternsLoaded { ticket: older, result: Ok(names(&["A"])) }.into()
        ));
        assert_eq!(state.patterns.items, names(&["A", "B"]));
    }

    #[test]
    fn test_failed_refresh_keeps_previous_list() {
        let mut state = loaded_state(&["Double Top"]);
        let ticket = state.patterns.begin_refresh();
        reduce(
            &mut state,
            BackendEvent::PatternsLoaded {
                ticket,
                result: Err(ClientError::Transport("connection refused".into())),
            }
            .into(),
        );
        assert_eq!(state.patterns.items, names(&["Double Top"]));
        assert!(state.patterns.error.is_some());
    }

    #[test]
    fn test_add_guard_rejects_blank_and_duplicates() {
        let mut state = loaded_state(&["Double Top"]);
        assert!(matches!(
            state.patterns.begin_add(&"   ".into()),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            state.patterns.begin_add(&"Double Top".into()),
            Err(ClientError::Conflict(_))
        ));
        assert!(state.patterns.begin_add(&"Triangle".into()).is_ok());
        assert!(matches!(
            state.patterns.begin_add(&"Triangle".into()),
            Err(ClientError::Conflict(_))
        ));
    }

    #[test]
    fn test_add_finished_clears_matching_input() {
        let mut state = loaded_state(&[]);
        reduce(&mut state, UiEvent::PatternInputChanged { value: "Triangle".into() }.into());
        state.patterns.begin_add(&"Triangle".into()).unwrap();
        reduce(&mut state, BackendEvent::PatternAdded { name: "Triangle".into(), result: Ok(()) }.into());
        assert!(state.patterns.input.is_empty());
    }

    #[test]
    fn test_added_pattern_stays_pending_until_later_refresh() {
        let mut state = loaded_state(&[]);
        let before_add = state.patterns.begin_refresh();
        state.patterns.begin_add(&"Triangle".into()).unwrap();
        reduce(&mut state, BackendEvent::PatternAdded { name: "Triangle".into(), result: Ok(()) }.into());
        assert!(state.patterns.is_pending(&"Triangle".into()));
        assert!(matches!(
            state.patterns.begin_add(&"Triangle".into()),
            Err(ClientError::Conflict(_))
        ));

        // A list requested before the add was confirmed may not contain it yet.
        reduce(&mut state, BackendEvent::PatternsLoaded { ticket: before_add, result: Ok(vec![]) }.into());
        assert!(state.patterns.is_pending(&"Triangle".into()));

        let after_add = state.patterns.begin_refresh();
        reduce(&mut state, BackendEvent::PatternsLoaded { ticket: after_add, result: Ok(names(&["Triangle"])) }.into());
        assert!(!state.patterns.is_pending(&"Triangle".into()));
        assert!(state.patterns.contains(&"Triangle".into()));
    }

    #[test]
    fn test_failed_add_releases_pending() {
        let mut state = loaded_state(&[]);
        state.patterns.begin_add(&"Triangle".into()).unwrap();
        let err = ClientError::Transport("connection reset".into());
        reduce(&mut state, BackendEvent::PatternAdded { name: "Triangle".into(), result: Err(err) }.into());
        assert!(!state.patterns.is_pending(&"Triangle".into()));
        assert!(state.patterns.begin_add(&"Triangle".into()).is_ok());
    }

    #[test]
    fn test_removed_pattern_leaves_selection_without_refresh() {
        let mut state = loaded_state(&["Double Top", "Triangle"]);
        toggle(&mut state, "Double Top");
        toggle(&mut state, "Triangle");
        assert!(reduce(
            &mut state,
            BackendEvent::PatternRemoved { name: "Double Top".into(), result: Ok(()) }.into()
        ));
        assert_eq!(state.patterns.items, names(&["Triangle"]));
        assert_eq!(state.selection, names(&["Triangle"]));
        let (_, request) = state.begin_simulation();
        assert_eq!(request.patterns, names(&["Triangle"]));
    }

    #[test]
    fn test_simulation_success_replaces_wholesale() {
        let mut state = DashboardState::default();
        let (first, _) = state.begin_simulation();
        reduce(&mut state, BackendEvent::SimulationFinished { ticket: first, result: Ok(result_with("AAPL", 1.0)) }.into());
        let (second, _) = state.begin_simulation();
        assert!(state.is_simulating());
        reduce(&mut state, BackendEvent::SimulationFinished { ticket: second, result: Ok(result_with("MSFT", 2.0)) }.into());
        assert_eq!(state.results, Some(result_with("MSFT", 2.0)));
        assert_eq!(state.simulation, SimulationStatus::Idle);
    }

    #[test]
    fn test_simulation_failure_keeps_prior_result() {
        let mut state = DashboardState::default();
        let (first, _) = state.begin_simulation();
        reduce(&mut state, BackendEvent::SimulationFinished { ticket: first, result: Ok(result_with("AAPL", 1.0)) }.into());
        let (second, _) = state.begin_simulation();
        let err = ClientError::Transport("timed out".into());
        reduce(&mut state, BackendEvent::SimulationFinished { ticket: second, result: Err(err.clone()) }.into());
        assert_eq!(state.results, Some(result_with("AAPL", 1.0)));
        assert_eq!(state.simulation, SimulationStatus::Failed(err));
    }

    #[test]
    fn test_superseded_simulation_dropped() {
        let mut state = DashboardState::default();
        let (first, _) = state.begin_simulation();
        let (second, _) = state.begin_simulation();
        reduce(&mut state, BackendEvent::SimulationFinished { ticket: second, result: Ok(result_with("MSFT", 2.0)) }.into());
        assert!(!reduce(&mut state, BackendEvent::SimulationFinished { ticket: first, result: Ok(result_with("AAPL", 1.0)) }.into()));
        assert_eq!(state.results, Some(result_with("MSFT", 2.0)));
    }

    #[test]
    fn test_simulation_request_carries_selection_and_stocks() {
        let mut state = loaded_state(&["Double Top", "Triangle"]);
        let ticket = state.stocks.begin_refresh();
        reduce(&mut state, BackendEvent::StocksLoaded { ticket, result: Ok(vec!["AAPL".into(), "MSFT".into()]) }.into());
        toggle(&mut state, "Triangle");
        let (_, request) = state.begin_simulation();
        assert_eq!(request.patterns, names(&["Triangle"]));
        assert_eq!(request.stocks, vec![StockSymbol::from("AAPL"), StockSymbol::from("MSFT")]);
    }

    #[test]
    fn test_created_trade_joins_history() {
        let mut state = DashboardState::default();
        let ticket = state.begin_trades_load();
        reduce(&mut state, BackendEvent::TradesLoaded { ticket, result: Ok(vec![]) }.into());
        let record = TradeRecord {
            date: "2024-05-01".into(),
            user_id: "1".into(),
            stock_symbol: "AAPL".into(),
            trade_type: TradeType::Buy,
            quantity: "5".into(),
            price: "180".into(),
        };
        state.begin_trade_submit();
        reduce(&mut state, BackendEvent::TradeCreated { result: Ok(record.clone()) }.into());
        assert_eq!(state.trades, vec![record]);
        assert!(!state.trade_submitting);
    }

    #[test]
    fn test_stale_trade_history_does_not_drop_created_trade() {
        let mut state = DashboardState::default();
        let stale = state.begin_trades_load();
        let record = TradeRecord {
            date: "2024-05-02".into(),
            user_id: "1".into(),
            stock_symbol: "MSFT".into(),
            trade_type: TradeType::Sell,
            quantity: "2".into(),
            price: "410".into(),
        };
        state.begin_trade_submit();
        reduce(&mut state, BackendEvent::TradeCreated { result: Ok(record.clone()) }.into());
        assert!(!reduce(&mut state, BackendEvent::TradesLoaded { ticket: stale, result: Ok(vec![]) }.into()));
        assert_eq!(state.trades, vec![record]);
    }

    #[test]
    fn test_price_series_for_old_symbol_discarded() {
        let mut state = DashboardState::default();
        let old = state.price_chart.begin("AAPL".into());
        let new = state.price_chart.begin("MSFT".into());
        let bar = PriceBar { date: "2024-01-01".into(), open: 1.0, high: 2.0, low: 0.5, close: 1.5 };
        assert!(!reduce(
            &mut state,
            BackendEvent::PriceSeriesLoaded { ticket: old, symbol: "AAPL".into(), result: Ok(vec![bar.clone()]) }.into()
        ));
        assert_eq!(state.price_chart.status, ChartStatus::Loading);
        assert!(reduce(
            &mut state,
            BackendEvent::PriceSeriesLoaded { ticket: new, symbol: "MSFT".into(), result: Ok(vec![bar]) }.into()
        ));
        assert_eq!(state.price_chart.bars().map(|b| b.len()), Some(1));
    }

    #[test]
    fn test_trade_form_edits() {
        let mut state = DashboardState::default();
        reduce(&mut state, UiEvent::TradeFieldChanged { field: TradeField::Quantity, value: "10".into() }.into());
        reduce(&mut state, UiEvent::TradeTypeChanged { trade_type: TradeType::Short }.into());
        let trade = state.trade_form.to_new_trade();
        assert_eq!(trade.quantity, "10");
        assert_eq!(trade.trade_type, TradeType::Short);
        assert_eq!(trade.price, "");
    }
}
