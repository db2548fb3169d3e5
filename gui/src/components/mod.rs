// GUI components module
pub mod chart;
pub mod registry;
pub mod results;
pub mod trades;

use std::future::{poll_fn, Future};
use std::task::Poll;

use dioxus::prelude::*;

use crate::services::AppController;
use crate::state::DashboardState;

pub use chart::candlestick::PriceChart;
pub use registry::{PatternRegistry, StockRegistry};
pub use results::SimulationPanel;
pub use trades::{TradeForm, TradesList};

/// Publishes the controller state to the view.
pub fn refresh_view(controller: &AppController, mut view: Signal<DashboardState>) {
    view.set(controller.snapshot());
}

/// Runs a controller operation on the UI executor. The view is refreshed
/// once the operation has issued its request and again when it settles.
/// Failures are already recorded in the dashboard state by the controller.
pub fn spawn_op<F, Fut>(controller: &AppController, view: Signal<DashboardState>, op: F)
where
    F: FnOnce(AppController) -> Fut,
    Fut: Future + 'static,
{
    let controller = controller.clone();
    let mut pending = Box::pin(op(controller.clone()));
    spawn(async move {
        let first = poll_fn(|cx| Poll::Ready(pending.as_mut().poll(cx))).await;
        if first.is_pending() {
            refresh_view(&controller, view);
            pending.await;
        }
        refresh_view(&controller, view);
    });
}

#[component]
pub fn ErrorLine(message: Option<String>) -> Element {
    let message = message?;
    rsx! {
        div { class: "error-line", style: "color: #ef4444; margin: 4px 0;", "{message}" }
    }
}
