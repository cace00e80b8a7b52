//! Display helpers shared by list and detail views

use chrono::{Datelike, NaiveDate};

/// Year of a `YYYY-MM-DD` release date. Empty or malformed dates yield `None`.
pub fn release_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }
    date.split('-')
        .next()
        .filter(|y| y.len() == 4)
        .and_then(|y| y.parse().ok())
}

/// `125` -> `"2h 5m"`
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Vote average with one decimal, e.g. `7.456` -> `"7.5"`
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_year() {
        assert_eq!(release_year("2023-05-01"), Some(2023));
        assert_eq!(release_year("1999"), Some(1999));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("soon"), None);
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(125), "2h 5m");
        assert_eq!(format_runtime(45), "0h 45m");
        assert_eq!(format_runtime(120), "2h 0m");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(7.456), "7.5");
        assert_eq!(format_rating(8.0), "8.0");
    }
}
