// Value-to-SVG coordinate mapping shared by the price chart and the
// simulation result charts.
use shared::models::PriceBar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Bounds of the finite values; `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<PriceRange>, v| match acc {
                None => Some(PriceRange { min: v, max: v }),
                Some(r) => Some(PriceRange { min: r.min.min(v), max: r.max.max(v) }),
            })
    }

    pub fn span(&self) -> f64 {
        if (self.max - self.min) > 0.0 {
            self.max - self.min
        } else {
            1.0
        }
    }
}

impl ChartFrame {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self { width, height, margin }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.margin).max(1.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.margin).max(1.0)
    }

    /// Horizontal slot width when `count` points share the plot.
    pub fn slot_width(&self, count: usize) -> f64 {
        self.plot_width() / count.max(1) as f64
    }

    /// Center of slot `index` out of `count`.
    pub fn x_for(&self, index: usize, count: usize) -> f64 {
        let slot = self.slot_width(count);
        self.margin + index as f64 * slot + slot / 2.0
    }

    pub fn y_for(&self, value: f64, range: PriceRange) -> f64 {
        self.margin + (range.max - value) * (self.plot_height() / range.span())
    }

    /// Evenly spaced price labels from the top of the range to the bottom.
    pub fn y_ticks(&self, range: PriceRange, count: usize) -> Vec<(f64, String)> {
        if count < 2 {
            return Vec::new();
        }
        let step = (range.max - range.min) / (count - 1) as f64;
        (0..count)
            .map(|i| {
                let value = range.max - step * i as f64;
                (self.y_for(value, range), format!("{:.2}", value))
            })
            .collect()
    }
}

/// SVG `points` attribute for a polyline.
pub fn polyline_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandleShape {
    pub date: String,
    /// Center line, where the wick is drawn.
    pub x: f64,
    pub body_x: f64,
    pub body_width: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub bullish: bool,
}

pub fn candles(bars: &[PriceBar], frame: &ChartFrame) -> Vec<CandleShape> {
    let Some(range) = PriceRange::from_values(bars.iter().flat_map(|b| [b.high, b.low])) else {
        return Vec::new();
    };
    let count = bars.len();
    let body_width = (frame.slot_width(count) * 0.7).max(1.0);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let x = frame.x_for(i, count);
            let open_y = frame.y_for(bar.open, range);
            let close_y = frame.y_for(bar.close, range);
            CandleShape {
                date: bar.date.clone(),
                x,
                body_x: x - body_width / 2.0,
                body_width,
                body_top: open_y.min(close_y),
                body_height: (open_y - close_y).abs().max(1.0),
                wick_top: frame.y_for(bar.high, range),
                wick_bottom: frame.y_for(bar.low, range),
                bullish: bar.close >= bar.open,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
        PriceBar { date: date.to_string(), open, high, low, close }
    }

    #[test]
    fn test_range_ignores_non_finite() {
        let range = PriceRange::from_values([3.0, f64::NAN, 1.0, 2.0]).unwrap();
        assert_eq!(range, PriceRange { min: 1.0, max: 3.0 });
        assert!(PriceRange::from_values(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn test_flat_range_does_not_divide_by_zero() {
        let frame = ChartFrame::new(200.0, 100.0, 0.0);
        let range = PriceRange { min: 5.0, max: 5.0 };
        assert_eq!(frame.y_for(5.0, range), 0.0);
    }

    #[test]
    fn test_y_maps_max_to_top_and_min_to_bottom() {
        let frame = ChartFrame::new(300.0, 200.0, 50.0);
        let range = PriceRange { min: 10.0, max: 20.0 };
        assert_eq!(frame.y_for(20.0, range), 50.0);
        assert_eq!(frame.y_for(10.0, range), 150.0);
    }

    #[test]
    fn test_x_slots() {
        let frame = ChartFrame::new(120.0, 100.0, 10.0);
        assert_eq!(frame.x_for(0, 2), 35.0);
        assert_eq!(frame.x_for(1, 2), 85.0);
    }

    #[test]
    fn test_polyline_points_format() {
        assert_eq!(polyline_points(&[(1.0, 2.0), (3.333, 4.5)]), "1.00,2.00 3.33,4.50");
        assert_eq!(polyline_points(&[]), "");
    }

    #[test]
    fn test_candle_direction_and_wicks() {
        let frame = ChartFrame::new(220.0, 120.0, 10.0);
        let shapes = candles(
            &[bar("2024-01-01", 1.0, 2.0, 0.0, 1.5), bar("2024-01-02", 1.5, 1.8, 0.5, 1.0)],
            &frame,
        );
        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].bullish);
        assert!(!shapes[1].bullish);
        assert_eq!(shapes[0].wick_top, 10.0);
        assert_eq!(shapes[0].wick_bottom, 110.0);
        assert!(shapes[0].body_top < shapes[0].wick_bottom);
    }

    #[test]
    fn test_y_ticks() {
        let frame = ChartFrame::new(100.0, 100.0, 0.0);
        let ticks = frame.y_ticks(PriceRange { min: 0.0, max: 10.0 }, 3);
        assert_eq!(ticks[0], (0.0, "10.00".to_string()));
        assert_eq!(ticks[2], (100.0, "0.00".to_string()));
    }
}
