// Candlestick price chart for a single symbol
use dioxus::prelude::*;
use shared::models::StockSymbol;
use shared::utils::axis_label;

use crate::components::{spawn_op, ErrorLine};
use crate::config::AppConfig;
use crate::render::{candles, ChartFrame};
use crate::services::AppController;
use crate::state::{ChartStatus, DashboardState};

#[component]
pub fn PriceChart() -> Element {
    let controller = use_context::<AppController>();
    let config = use_context::<AppConfig>();
    let view = use_context::<Signal<DashboardState>>();
    let mut symbol_input = use_signal(|| config.chart.default_symbol.clone());

    let frame = ChartFrame::new(config.chart.width, config.chart.height, config.chart.margin);
    let (symbol, shapes, error) = {
        let state = view.read();
        let chart = &state.price_chart;
        let shapes = chart.bars().map(|bars| candles(bars, &frame));
        let error = match &chart.status {
            ChartStatus::Failed(err) => Some(format!("Could not load {}: {}", chart.symbol, err)),
            _ => None,
        };
        (chart.symbol.to_string(), shapes, error)
    };

    let bullish = config.chart.candle.bullish_color.clone();
    let bearish = config.chart.candle.bearish_color.clone();
    let wick_width = config.chart.candle.wick_width;
    let grid = config.chart.grid.enabled.then(|| config.chart.grid.color.clone());
    let width = frame.width;
    let height = frame.height;
    let bottom = frame.height - frame.margin + 16.0;
    let (plot_x, plot_w, plot_h) = (frame.margin, frame.plot_width(), frame.plot_height());
    let chart = shapes.map(|shapes| {
        let span = match (shapes.first(), shapes.last()) {
            (Some(first), Some(last)) => Some((
                first.x,
                axis_label(&first.date),
                last.x,
                axis_label(&last.date),
            )),
            _ => None,
        };
        let colored: Vec<_> = shapes
            .into_iter()
            .map(|shape| {
                let color = if shape.bullish { bullish.clone() } else { bearish.clone() };
                (shape, color)
            })
            .collect();
        (colored, span)
    });

    let load = move |_| {
        let symbol = StockSymbol::new(symbol_input.read().trim().to_uppercase());
        if symbol.is_blank() {
            return;
        }
        spawn_op(&controller, view, |c| async move { c.load_price_chart(symbol).await });
    };

    rsx! {
        section {
            class: "price-chart",
            style: "padding: 8px;",
            div {
                style: "display: flex; gap: 6px; align-items: center;",
                h3 { "{symbol} Price" }
                input {
                    r#type: "text",
                    value: "{symbol_input}",
                    oninput: move |evt: FormEvent| symbol_input.set(evt.value()),
                }
                button { onclick: load, "Load" }
            }
            ErrorLine { message: error.clone() }
            {match chart {
                Some((colored, span)) => rsx! {
                    svg {
                        width: "{width}",
                        height: "{height}",
                        if let Some(grid_color) = grid {
                            rect {
                                x: "{plot_x}",
                                y: "{plot_x}",
                                width: "{plot_w}",
                                height: "{plot_h}",
                                fill: "none",
                                stroke: "{grid_color}",
                            }
                        }
                        for (shape, color) in colored.into_iter() {
                            g { key: "{shape.date}",
                                line {
                                    x1: "{shape.x}",
                                    y1: "{shape.wick_top}",
                                    x2: "{shape.x}",
                                    y2: "{shape.wick_bottom}",
                                    stroke: "{color}",
                                    stroke_width: "{wick_width}",
                                }
                                rect {
                                    x: "{shape.body_x}",
                                    y: "{shape.body_top}",
                                    width: "{shape.body_width}",
                                    height: "{shape.body_height}",
                                    fill: "{color}",
                                }
                            }
                        }
                        if let Some((first_x, first_label, last_x, last_label)) = span {
                            text { x: "{first_x}", y: "{bottom}", fill: "#888", font_size: "10", "{first_label}" }
                            text { x: "{last_x}", y: "{bottom}", fill: "#888", font_size: "10", text_anchor: "end", "{last_label}" }
                        }
                    }
                },
                None if error.is_none() => rsx! { div { style: "color: #888;", "Loading..." } },
                None => None,
            }}
        }
    }
}
