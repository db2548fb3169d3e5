// Trade entry form and trade history
use dioxus::prelude::*;
use shared::models::TradeType;

use super::{refresh_view, spawn_op, ErrorLine};
use crate::services::AppController;
use crate::state::{DashboardState, TradeField, UiEvent};

#[component]
pub fn TradeForm() -> Element {
    let controller = use_context::<AppController>();
    let view = use_context::<Signal<DashboardState>>();

    let (form, error, submitting) = {
        let state = view.read();
        (
            state.trade_form.clone(),
            state.trade_form_error.as_ref().map(|e| format!("Trade failed: {}", e)),
            state.trade_submitting,
        )
    };

    let fields = [
        (TradeField::UserId, "User ID", form.user_id.clone()),
        (TradeField::StockSymbol, "Stock Symbol", form.stock_symbol.clone()),
        (TradeField::Quantity, "Quantity", form.quantity.clone()),
        (TradeField::Price, "Price", form.price.clone()),
    ];
    let trade_type = form.trade_type.as_str();
    let options: Vec<(&str, &str, bool)> = TradeType::ALL
        .iter()
        .map(|t| (t.as_str(), t.label(), *t == form.trade_type))
        .collect();

    let c_field = controller.clone();
    let c_type = controller.clone();
    let c_submit = controller;

    rsx! {
        section {
            class: "trade-form",
            style: "padding: 8px;",
            h3 { "New Trade" }
            for (field, caption, value) in fields {
                label {
                    key: "{caption}",
                    style: "display: block; margin: 2px 0;",
                    "{caption} "
                    input {
                        r#type: "text",
                        value: "{value}",
                        oninput: {
                            let controller = c_field.clone();
                            move |evt: FormEvent| {
                                controller.dispatch_ui(UiEvent::TradeFieldChanged { field, value: evt.value() });
                                refresh_view(&controller, view);
                            }
                        },
                    }
                }
            }
            label {
                style: "display: block; margin: 2px 0;",
                "Trade Type "
                select {
                    value: "{trade_type}",
                    onchange: move |evt: FormEvent| {
                        if let Some(trade_type) = TradeType::parse(&evt.value()) {
                            c_type.dispatch_ui(UiEvent::TradeTypeChanged { trade_type });
                            refresh_view(&c_type, view);
                        }
                    },
                    for (value, caption, selected) in options {
                        option { key: "{value}", value: "{value}", selected, "{caption}" }
                    }
                }
            }
            button {
                disabled: submitting,
                onclick: move |_| {
                    spawn_op(&c_submit, view, |c| async move { c.submit_trade().await });
                },
                "Submit Trade"
            }
            ErrorLine { message: error }
        }
    }
}

#[component]
pub fn TradesList() -> Element {
    let view = use_context::<Signal<DashboardState>>();
    let (summaries, error) = {
        let state = view.read();
        let summaries: Vec<String> = state.trades.iter().map(|t| t.summary()).collect();
        (
            summaries,
            state.trades_error.as_ref().map(|e| format!("Could not load trades: {}", e)),
        )
    };

    rsx! {
        section {
            class: "trades",
            style: "padding: 8px;",
            h3 { "Trades" }
            ErrorLine { message: error }
            if summaries.is_empty() {
                div { style: "color: #888;", "No trades yet." }
            }
            ul {
                for (i, summary) in summaries.iter().enumerate() {
                    li { key: "{i}", "{summary}" }
                }
            }
        }
    }
}
