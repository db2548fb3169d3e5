// SVG chart for one stock of a simulation run: close line, pattern overlays
// and trade markers, with the pattern list underneath.
use dioxus::prelude::*;

use crate::render::{ChartFrame, StockPanel};

const GRID_COLOR: &str = "#2a2e39";
const AXIS_TEXT: &str = "#888";

#[component]
pub fn ResultChart(panel: StockPanel, frame: ChartFrame) -> Element {
    let geometry = panel.geometry(&frame);
    let width = frame.width;
    let height = frame.height;
    let axis_x = frame.margin;
    let axis_bottom = frame.height - frame.margin;
    let label_y = axis_bottom + 16.0;
    let grid_right = frame.width - frame.margin;
    let tick_x = frame.margin - 4.0;
    let series_color = panel.price_trace.color.clone();
    let markers: Vec<(f64, f64, f64, String, String)> = geometry
        .markers
        .iter()
        .map(|m| (m.x, m.y, m.y - 8.0, m.label.clone(), m.color.clone()))
        .collect();

    rsx! {
        div {
            class: "stock-panel",
            style: "margin: 12px 0; padding: 8px; border: 1px solid #333; border-radius: 4px;",
            h4 { "{panel.title}" }
            div { "Performance: {panel.performance_label}" }
            svg {
                width: "{width}",
                height: "{height}",
                for (i, (y, label)) in geometry.y_ticks.iter().enumerate() {
                    g { key: "y{i}",
                        line { x1: "{axis_x}", y1: "{y}", x2: "{grid_right}", y2: "{y}", stroke: GRID_COLOR }
                        text { x: "{tick_x}", y: "{y}", fill: AXIS_TEXT, font_size: "10", text_anchor: "end", "{label}" }
                    }
                }
                for (i, (x, label)) in geometry.x_labels.iter().enumerate() {
                    text { key: "x{i}", x: "{x}", y: "{label_y}", fill: AXIS_TEXT, font_size: "10", text_anchor: "middle", "{label}" }
                }
                polyline {
                    points: "{geometry.price_line}",
                    fill: "none",
                    stroke: "{series_color}",
                    stroke_width: "1.5",
                }
                for (i, overlay) in geometry.overlays.iter().enumerate() {
                    g { key: "o{i}",
                        polyline {
                            points: "{overlay.points}",
                            fill: "none",
                            stroke: "{overlay.color}",
                            stroke_width: "2",
                        }
                        if let Some((tx, ty)) = overlay.trigger {
                            circle { cx: "{tx}", cy: "{ty}", r: "5", fill: "none", stroke: "{overlay.color}", stroke_width: "2" }
                        }
                    }
                }
                for (i, (x, y, text_y, label, color)) in markers.into_iter().enumerate() {
                    g { key: "m{i}",
                        circle { cx: "{x}", cy: "{y}", r: "4", fill: "{color}" }
                        text { x: "{x}", y: "{text_y}", fill: "{color}", font_size: "10", text_anchor: "middle", "{label}" }
                    }
                }
            }
            div {
                class: "legend",
                style: "display: flex; flex-wrap: wrap; gap: 12px; font-size: 0.9em;",
                span { style: "color: {series_color};", "{panel.price_trace.name}" }
                for (i, overlay) in panel.pattern_overlays.iter().enumerate() {
                    span { key: "l{i}", style: "color: {overlay.color};", "{overlay.label}" }
                }
            }
            ul {
                style: "list-style: none; padding: 0; margin: 6px 0 0 0;",
                for (i, row) in panel.pattern_rows.iter().enumerate() {
                    li { key: "r{i}", style: "color: {row.color};", "{row.text}" }
                }
            }
        }
    }
}
