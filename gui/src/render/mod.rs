// Pure projections from dashboard state to drawable data.
pub mod chart;
pub mod results;

pub use chart::{candles, polyline_points, CandleShape, ChartFrame, PriceRange};
pub use results::{
    render_results, render_stock, Marker, PanelGeometry, PatternOverlay, PatternRow, StockPanel,
    Trace,
};
