// Pattern and stock registry panels
use dioxus::prelude::*;
use shared::models::{PatternName, StockSymbol};

use super::{refresh_view, spawn_op, ErrorLine};
use crate::services::AppController;
use crate::state::DashboardState;

#[derive(Debug, Clone, PartialEq)]
struct RegistryRow {
    name: String,
    /// `None` when the registry has no selection (stocks).
    selected: Option<bool>,
}

#[component]
pub fn PatternRegistry() -> Element {
    let controller = use_context::<AppController>();
    let view = use_context::<Signal<DashboardState>>();

    let (rows, input, error, loaded) = {
        let state = view.read();
        let rows: Vec<RegistryRow> = state
            .patterns
            .items
            .iter()
            .map(|p| RegistryRow {
                name: p.to_string(),
                selected: Some(state.is_selected(p)),
            })
            .collect();
        (
            rows,
            state.patterns.input.clone(),
            state.patterns.error.as_ref().map(ToString::to_string),
            state.patterns.loaded,
        )
    };

    let c_input = controller.clone();
    let c_add = controller.clone();
    let c_remove = controller.clone();
    let c_toggle = controller;

    rsx! {
        RegistryPanel {
            title: "Patterns",
            placeholder: "New pattern name",
            rows,
            input,
            error,
            loaded,
            on_input: move |value: String| {
                c_input.set_pattern_input(value);
                refresh_view(&c_input, view);
            },
            on_add: move |_| {
                spawn_op(&c_add, view, |c| async move { c.add_pattern_from_input().await });
            },
            on_remove: move |name: String| {
                spawn_op(&c_remove, view, |c| async move {
                    c.remove_pattern(PatternName::new(name)).await
                });
            },
            on_toggle: move |name: String| {
                c_toggle.toggle_pattern(PatternName::new(name));
                refresh_view(&c_toggle, view);
            },
        }
    }
}

#[component]
pub fn StockRegistry() -> Element {
    let controller = use_context::<AppController>();
    let view = use_context::<Signal<DashboardState>>();

    let (rows, input, error, loaded) = {
        let state = view.read();
        let rows: Vec<RegistryRow> = state
            .stocks
            .items
            .iter()
            .map(|s| RegistryRow { name: s.to_string(), selected: None })
            .collect();
        (
            rows,
            state.stocks.input.clone(),
            state.stocks.error.as_ref().map(ToString::to_string),
            state.stocks.loaded,
        )
    };

    let c_input = controller.clone();
    let c_add = controller.clone();
    let c_remove = controller;

    rsx! {
        RegistryPanel {
            title: "Stocks",
            placeholder: "New stock symbol",
            rows,
            input,
            error,
            loaded,
            on_input: move |value: String| {
                c_input.set_stock_input(value);
                refresh_view(&c_input, view);
            },
            on_add: move |_| {
                spawn_op(&c_add, view, |c| async move { c.add_stock_from_input().await });
            },
            on_remove: move |symbol: String| {
                spawn_op(&c_remove, view, |c| async move {
                    c.remove_stock(StockSymbol::new(symbol)).await
                });
            },
            on_toggle: move |_: String| {},
        }
    }
}

#[component]
fn RegistryPanel(
    title: String,
    placeholder: String,
    rows: Vec<RegistryRow>,
    input: String,
    error: Option<String>,
    loaded: bool,
    on_input: EventHandler<String>,
    on_add: EventHandler<()>,
    on_remove: EventHandler<String>,
    on_toggle: EventHandler<String>,
) -> Element {
    rsx! {
        section {
            class: "registry",
            style: "padding: 8px; border-bottom: 1px solid #333;",
            h3 { "{title}" }
            if !loaded && rows.is_empty() {
                div { style: "color: #888;", "Loading..." }
            }
            ul {
                style: "list-style: none; padding: 0; margin: 0;",
                for row in rows {
                    li {
                        key: "{row.name}",
                        style: "display: flex; align-items: center; gap: 6px; padding: 2px 0;",
                        if let Some(selected) = row.selected {
                            input {
                                r#type: "checkbox",
                                checked: selected,
                                onchange: {
                                    let name = row.name.clone();
                                    move |_| on_toggle.call(name.clone())
                                },
                            }
                        }
                        span { style: "flex: 1;", "{row.name}" }
                        button {
                            onclick: {
                                let name = row.name.clone();
                                move |_| on_remove.call(name.clone())
                            },
                            "Remove"
                        }
                    }
                }
            }
            div {
                style: "display: flex; gap: 6px; margin-top: 6px;",
                input {
                    r#type: "text",
                    value: "{input}",
                    placeholder: "{placeholder}",
                    oninput: move |evt: FormEvent| on_input.call(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            on_add.call(());
                        }
                    },
                }
                button { onclick: move |_| on_add.call(()), "Add" }
            }
            ErrorLine { message: error }
        }
    }
}
