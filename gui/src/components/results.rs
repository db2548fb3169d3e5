// Simulation trigger and per-stock result panels
use dioxus::prelude::*;

use super::chart::series::ResultChart;
use super::{spawn_op, ErrorLine};
use crate::config::AppConfig;
use crate::render::{render_results, ChartFrame};
use crate::services::AppController;
use crate::state::{DashboardState, SimulationStatus};

#[component]
pub fn SimulationPanel() -> Element {
    let controller = use_context::<AppController>();
    let config = use_context::<AppConfig>();
    let view = use_context::<Signal<DashboardState>>();

    let palette = config.palette();
    let frame = ChartFrame::new(config.chart.width, config.chart.height, config.chart.margin);

    let (running, error, panels, selected) = {
        let state = view.read();
        let error = match &state.simulation {
            SimulationStatus::Failed(err) => Some(format!("Simulation failed: {}", err)),
            _ => None,
        };
        let panels = state
            .results
            .as_ref()
            .map(|r| render_results(r, &palette))
            .unwrap_or_default();
        (state.is_simulating(), error, panels, state.selection.len())
    };

    rsx! {
        section {
            class: "simulation",
            style: "padding: 8px;",
            div {
                style: "display: flex; align-items: center; gap: 12px;",
                button {
                    onclick: move |_| {
                        spawn_op(&controller, view, |c| async move { c.run_simulation().await });
                    },
                    "Start Simulation"
                }
                span { style: "color: #888;", "{selected} pattern(s) selected" }
                if running {
                    span { "Running simulation..." }
                }
            }
            ErrorLine { message: error }
            for panel in panels {
                ResultChart { key: "{panel.symbol}", panel: panel.clone(), frame }
            }
        }
    }
}
