use dioxus::prelude::*;
use shared::models::StockSymbol;

use crate::components::{
    spawn_op, PatternRegistry, PriceChart, SimulationPanel, StockRegistry, TradeForm, TradesList,
};
use crate::config::AppConfig;
use crate::services::AppController;

#[component]
pub fn App() -> Element {
    let controller = use_context::<AppController>();
    let config = use_context::<AppConfig>();
    let palette = config.palette();

    let view = use_context_provider(|| Signal::new(controller.snapshot()));

    // Registries, trade history and the default price chart load once at startup.
    use_hook(|| {
        spawn_op(&controller, view, |c| async move { c.load_all().await });
        let symbol = StockSymbol::new(config.chart.default_symbol.clone());
        spawn_op(&controller, view, |c| async move { c.load_price_chart(symbol).await });
    });

    rsx! {
        div {
            class: "dashboard",
            style: "display: flex; min-height: 100vh; font-family: sans-serif; background-color: {palette.background}; color: {palette.foreground};",
            aside {
                style: "width: 280px; border-right: 1px solid {palette.secondary}; overflow-y: auto;",
                PatternRegistry {}
                StockRegistry {}
                TradeForm {}
                TradesList {}
            }
            main {
                style: "flex: 1; overflow-y: auto;",
                PriceChart {}
                SimulationPanel {}
            }
        }
    }
}
