// Theme palettes (colors used by components and the results renderer)
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub chart_bullish: String,
    pub chart_bearish: String,
    /// Price line of simulation charts.
    pub series: String,
    /// Patterns with a non-negative performance delta.
    pub positive: String,
    pub negative: String,
    pub buy: String,
    pub sell: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#d1d4dc".to_string(),
            primary: "#007acc".to_string(),
            secondary: "#565656".to_string(),
            accent: "#26a69a".to_string(),
            chart_bullish: "#26a69a".to_string(),
            chart_bearish: "#ef5350".to_string(),
            series: "#03a9f4".to_string(),
            positive: "#22c55e".to_string(),
            negative: "#ef4444".to_string(),
            buy: "#16a34a".to_string(),
            sell: "#dc2626".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            primary: "#007acc".to_string(),
            secondary: "#e0e0e0".to_string(),
            accent: "#009688".to_string(),
            chart_bullish: "#4caf50".to_string(),
            chart_bearish: "#f44336".to_string(),
            series: "#1f77b4".to_string(),
            positive: "#15803d".to_string(),
            negative: "#b91c1c".to_string(),
            buy: "#15803d".to_string(),
            sell: "#b91c1c".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::default_light(),
            _ => Self::default_dark(),
        }
    }

    /// Color for a signed performance figure: zero counts as positive.
    pub fn performance_color(&self, performance: f64) -> &str {
        if performance >= 0.0 {
            &self.positive
        } else {
            &self.negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_color_sign() {
        let palette = ThemePalette::default_dark();
        assert_eq!(palette.performance_color(3.5), palette.positive);
        assert_eq!(palette.performance_color(0.0), palette.positive);
        assert_eq!(palette.performance_color(-0.01), palette.negative);
    }

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(ThemePalette::by_name("Light"), ThemePalette::default_light());
        assert_eq!(ThemePalette::by_name("solarized"), ThemePalette::default_dark());
    }
}
