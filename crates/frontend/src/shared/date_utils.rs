/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::NaiveDate;
use contracts::domain::a002_calculate_cpi::aggregate::parse_timestamp;

const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

/// Format a backend timestamp to DD.MM.YYYY HH:MM in local time
/// Example: "2024-03-15T14:02:26" -> "15.03.2024 14:02"
pub fn format_datetime(value: Option<&str>) -> String {
    match value {
        None => "—".to_string(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// Format a date to DD.MM.YYYY
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Long Russian form: "1 марта 2024 г."
pub fn format_date_long(date: NaiveDate) -> String {
    use chrono::Datelike;
    let month = MONTHS_GENITIVE[date.month0() as usize];
    format!("{} {} {} г.", date.day(), month, date.year())
}

/// Value for `<input type="date">`
pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parse `<input type="date">`; empty input means no date
pub fn parse_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime(Some("2024-03-15T14:02:26.123")),
            "15.03.2024 14:02"
        );
        assert_eq!(format_datetime(None), "—");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(date), "01.03.2024");
        assert_eq!(format_date_long(date), "1 марта 2024 г.");
    }

    #[test]
    fn test_input_value() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert_eq!(to_input_value(date), "2024-12-31");
        assert_eq!(parse_input_value("2024-12-31"), date);
        assert_eq!(parse_input_value(""), None);
        assert_eq!(to_input_value(None), "");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime(Some("invalid")), "invalid");
    }
}
