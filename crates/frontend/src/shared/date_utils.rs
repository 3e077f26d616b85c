//! Date and time formatting for table cells and detail views
use contracts::domain::a001_opportunity::aggregate::parse_local_timestamp;

/// Format an ISO timestamp as local `DD.MM.YYYY HH:MM`
/// Example: "2024-03-15T14:02:26.123" -> "15.03.2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_local_timestamp(datetime_str) {
        Some(dt) => dt.format("%d.%m.%Y %H:%M").to_string(),
        None => datetime_str.to_string(),
    }
}

/// Format an ISO date or timestamp as local `DD.MM.YYYY`
/// Example: "2024-03-15" or "2024-03-15T14:02:26" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    match parse_local_timestamp(date_str) {
        Some(dt) => dt.format("%d.%m.%Y").to_string(),
        None => date_str.to_string(),
    }
}

/// Same as `format_date`, with "-" for a missing value
pub fn format_date_opt(date_str: Option<&str>) -> String {
    match date_str {
        Some(s) if !s.trim().is_empty() => format_date(s),
        _ => "-".to_string(),
    }
}
