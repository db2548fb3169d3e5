pub mod price_series;

pub use price_series::validate_price_series;
