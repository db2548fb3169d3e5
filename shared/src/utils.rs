// Formatting and decoding helpers shared by the client and the GUI.
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Formats a percentage with two decimals, e.g. `12.34%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Accepts a string, a number or null and yields its display string.
/// Backends are loose about whether ids, dates and amounts are quoted.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    })
}

/// Parses the date formats seen in backend payloads: plain `YYYY-MM-DD`,
/// RFC 3339 timestamps, and `YYYY-MM-DD HH:MM:SS`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Short axis label for a backend date; unparseable dates are shown as-is.
pub fn axis_label(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.34), "12.34%");
        assert_eq!(format_percent(-2.1), "-2.10%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-02").unwrap().day(), 2);
        assert_eq!(parse_date("2024-01-02T15:30:00Z").unwrap().month(), 1);
        assert_eq!(parse_date("2024-03-04 00:00:00").unwrap().day(), 4);
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label("2024-01-02"), "Jan 02");
        assert_eq!(axis_label("Q1"), "Q1");
    }
}
