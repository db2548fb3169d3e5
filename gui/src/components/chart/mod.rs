// Chart components: candlestick price chart and simulation result series
pub mod candlestick;
pub mod series;
