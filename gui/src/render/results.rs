// Projection of a simulation result into per-stock chart panels.
//
// Everything here is plain data so the desktop components stay thin and the
// projection can be checked without a window.
use std::collections::HashMap;

use shared::models::{PatternMatch, SimulationResult, StockResult, StockSymbol, TradeDirection};
use shared::utils::{axis_label, format_percent};

use super::chart::{polyline_points, ChartFrame, PriceRange};
use crate::config::ThemePalette;

/// A named line series.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub dates: Vec<String>,
    pub values: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub date: String,
    /// Close on `date`, when the series has that date.
    pub price: Option<f64>,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternOverlay {
    pub label: String,
    pub color: String,
    pub points: Vec<(String, f64)>,
    pub trigger: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternRow {
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockPanel {
    pub symbol: StockSymbol,
    pub title: String,
    pub performance_label: String,
    pub price_trace: Trace,
    pub pattern_overlays: Vec<PatternOverlay>,
    pub action_markers: Vec<Marker>,
    pub pattern_rows: Vec<PatternRow>,
}

pub fn render_results(result: &SimulationResult, palette: &ThemePalette) -> Vec<StockPanel> {
    result
        .iter()
        .map(|(symbol, stock)| render_stock(symbol, stock, palette))
        .collect()
}

pub fn render_stock(symbol: &StockSymbol, stock: &StockResult, palette: &ThemePalette) -> StockPanel {
    let closes: HashMap<&str, f64> = stock
        .series
        .iter()
        .map(|p| (p.date.as_str(), p.close))
        .collect();

    let price_trace = Trace {
        name: "Close Price".to_string(),
        dates: stock.series.iter().map(|p| p.date.clone()).collect(),
        values: stock.series.iter().map(|p| p.close).collect(),
        color: palette.series.clone(),
    };

    let pattern_overlays = stock
        .patterns
        .iter()
        .map(|m| pattern_overlay(m, &closes, palette))
        .collect();

    let action_markers = stock
        .actions
        .iter()
        .map(|a| {
            let (label, color) = match a.action {
                TradeDirection::Buy => ("Buy", &palette.buy),
                TradeDirection::Sell => ("Sell", &palette.sell),
            };
            Marker {
                date: a.date.clone(),
                price: closes.get(a.date.as_str()).copied(),
                label: label.to_string(),
                color: color.clone(),
            }
        })
        .collect();

    let pattern_rows = stock
        .patterns
        .iter()
        .map(|m| PatternRow {
            text: format!("{}: {:.2}%", m.name(), m.performance()),
            color: palette.performance_color(m.performance()).to_string(),
        })
        .collect();

    StockPanel {
        symbol: symbol.clone(),
        title: format!("{} Stock Price and Patterns", symbol),
        performance_label: format_percent(stock.performance),
        price_trace,
        pattern_overlays,
        action_markers,
        pattern_rows,
    }
}

fn pattern_overlay(
    m: &PatternMatch,
    closes: &HashMap<&str, f64>,
    palette: &ThemePalette,
) -> PatternOverlay {
    let outcome = if m.performance() >= 0.0 { "Profit" } else { "Loss" };
    let color = palette.performance_color(m.performance()).to_string();
    let trigger = m.trigger_date().map(|date| Marker {
        date: date.to_string(),
        price: closes.get(date).copied(),
        label: format!("{} trigger", m.name()),
        color: color.clone(),
    });
    PatternOverlay {
        label: format!("{} ({})", m.name(), outcome),
        points: m.points().into_iter().map(|p| (p.date.clone(), p.price)).collect(),
        color,
        trigger,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGeometry {
    pub label: String,
    pub color: String,
    pub points: String,
    pub trigger: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGeometry {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub color: String,
}

/// SVG-ready coordinates for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGeometry {
    pub price_line: String,
    pub overlays: Vec<OverlayGeometry>,
    pub markers: Vec<MarkerGeometry>,
    pub y_ticks: Vec<(f64, String)>,
    pub x_labels: Vec<(f64, String)>,
}

const X_LABELS: usize = 6;
const Y_TICKS: usize = 5;

impl StockPanel {
    /// Lays the panel out in `frame`. Points and markers whose date is not in
    /// the price series have no x position and are left out.
    pub fn geometry(&self, frame: &ChartFrame) -> PanelGeometry {
        let trace = &self.price_trace;
        let count = trace.dates.len();
        let index: HashMap<&str, usize> = trace
            .dates
            .iter()
            .enumerate()
            .map(|(i, d)| (d.as_str(), i))
            .collect();

        let overlay_prices = self
            .pattern_overlays
            .iter()
            .flat_map(|o| o.points.iter().map(|(_, p)| *p));
        let Some(range) = PriceRange::from_values(trace.values.iter().copied().chain(overlay_prices))
        else {
            return PanelGeometry {
                price_line: String::new(),
                overlays: Vec::new(),
                markers: Vec::new(),
                y_ticks: Vec::new(),
                x_labels: Vec::new(),
            };
        };

        let place = |date: &str, price: f64| {
            index
                .get(date)
                .map(|&i| (frame.x_for(i, count), frame.y_for(price, range)))
        };

        let price_line: Vec<(f64, f64)> = trace
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (frame.x_for(i, count), frame.y_for(*v, range)))
            .collect();

        let overlays = self
            .pattern_overlays
            .iter()
            .map(|o| {
                let points: Vec<(f64, f64)> =
                    o.points.iter().filter_map(|(d, p)| place(d, *p)).collect();
                OverlayGeometry {
                    label: o.label.clone(),
                    color: o.color.clone(),
                    points: polyline_points(&points),
                    trigger: o
                        .trigger
                        .as_ref()
                        .and_then(|t| t.price.and_then(|p| place(&t.date, p))),
                }
            })
            .collect();

        let markers = self
            .action_markers
            .iter()
            .filter_map(|m| {
                let (x, y) = place(&m.date, m.price?)?;
                Some(MarkerGeometry { x, y, label: m.label.clone(), color: m.color.clone() })
            })
            .collect();

        let step = (count / X_LABELS).max(1);
        let x_labels = trace
            .dates
            .iter()
            .enumerate()
            .step_by(step)
            .map(|(i, d)| (frame.x_for(i, count), axis_label(d)))
            .collect();

        PanelGeometry {
            price_line: polyline_points(&price_line),
            overlays,
            markers,
            y_ticks: frame.y_ticks(range, Y_TICKS),
            x_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(raw: serde_json::Value) -> SimulationResult {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_panel_for_losing_pattern() {
        let palette = ThemePalette::default_dark();
        let panels = render_results(
            &result(json!({
                "AAPL": {
                    "performance": 12.34,
                    "series": [
                        {"date": "2024-01-02", "close": 10.0},
                        {"date": "2024-01-09", "close": 9.5}
                    ],
                    "patterns": [{
                        "name": "Double Top",
                        "performance": -2.1,
                        "start": {"date": "2024-01-02", "price": 10.0},
                        "end": {"date": "2024-01-09", "price": 9.5}
                    }],
                    "actions": [{"date": "2024-01-09", "action": "sell"}]
                }
            })),
            &palette,
        );

        assert_eq!(panels.len(), 1);
        let panel = &panels[0];
        assert_eq!(panel.title, "AAPL Stock Price and Patterns");
        assert_eq!(panel.performance_label, "12.34%");
        assert_eq!(panel.price_trace.name, "Close Price");
        assert_eq!(panel.price_trace.values, vec![10.0, 9.5]);

        let overlay = &panel.pattern_overlays[0];
        assert_eq!(overlay.label, "Double Top (Loss)");
        assert_eq!(overlay.color, palette.negative);
        assert_eq!(overlay.points.len(), 2);
        assert!(overlay.trigger.is_none());

        assert_eq!(panel.pattern_rows[0].text, "Double Top: -2.10%");
        assert_eq!(panel.pattern_rows[0].color, palette.negative);

        let marker = &panel.action_markers[0];
        assert_eq!(marker.label, "Sell");
        assert_eq!(marker.price, Some(9.5));
        assert_eq!(marker.color, palette.sell);
    }

    #[test]
    fn test_empty_patterns_and_actions() {
        let palette = ThemePalette::default_dark();
        let panels = render_results(
            &result(json!({"MSFT": {"performance": 0.0, "series": []}})),
            &palette,
        );
        let panel = &panels[0];
        assert_eq!(panel.performance_label, "0.00%");
        assert!(panel.pattern_overlays.is_empty());
        assert!(panel.action_markers.is_empty());
        assert!(panel.pattern_rows.is_empty());
        assert_eq!(panel.geometry(&ChartFrame::new(720.0, 400.0, 50.0)).price_line, "");
    }

    #[test]
    fn test_trigger_pattern_gets_marker() {
        let palette = ThemePalette::default_light();
        let panels = render_results(
            &result(json!({
                "TSLA": {
                    "performance": 1.0,
                    "series": [
                        {"date": "2024-01-20", "close": 1.0},
                        {"date": "2024-01-25", "close": 2.0},
                        {"date": "2024-01-30", "close": 1.5},
                        {"date": "2024-02-01", "close": 1.8}
                    ],
                    "patterns": [{
                        "name": "Head and Shoulders",
                        "performance": 0.0,
                        "date": "2024-02-01",
                        "coordinates": [
                            {"date": "2024-01-20", "price": 1.0},
                            {"date": "2024-01-25", "price": 2.0},
                            {"date": "2024-01-30", "price": 1.5}
                        ]
                    }]
                }
            })),
            &palette,
        );
        let overlay = &panels[0].pattern_overlays[0];
        assert_eq!(overlay.label, "Head and Shoulders (Profit)");
        assert_eq!(overlay.color, palette.positive);
        assert_eq!(overlay.points.len(), 3);
        let trigger = overlay.trigger.as_ref().unwrap();
        assert_eq!(trigger.price, Some(1.8));

        let geometry = panels[0].geometry(&ChartFrame::new(450.0, 300.0, 25.0));
        assert_eq!(geometry.overlays[0].points.split(' ').count(), 3);
        assert!(geometry.overlays[0].trigger.is_some());
        assert_eq!(geometry.price_line.split(' ').count(), 4);
    }

    #[test]
    fn test_panels_follow_symbol_order() {
        let palette = ThemePalette::default_dark();
        let panels = render_results(
            &result(json!({
                "MSFT": {"performance": 1.0},
                "AAPL": {"performance": 2.0}
            })),
            &palette,
        );
        let symbols: Vec<&str> = panels.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_marker_off_series_is_not_placed() {
        let palette = ThemePalette::default_dark();
        let panels = render_results(
            &result(json!({
                "AAPL": {
                    "performance": 1.0,
                    "series": [{"date": "2024-01-02", "close": 10.0}],
                    "actions": [{"date": "2024-05-01", "action": "buy"}]
                }
            })),
            &palette,
        );
        assert_eq!(panels[0].action_markers[0].price, None);
        let geometry = panels[0].geometry(&ChartFrame::new(720.0, 400.0, 50.0));
        assert!(geometry.markers.is_empty());
        assert_eq!(geometry.x_labels[0].1, "Jan 02");
    }
}
