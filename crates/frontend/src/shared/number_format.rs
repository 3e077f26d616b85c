//! Number formatting for money and metric cells

/// Formats a number with a thousands separator (comma) and the given decimals
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_number_with_decimals;
///
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money amount prefixed with its currency symbol; fractional digits only when present
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_money;
///
/// assert_eq!(format_money(1500000.0, "₹"), "₹ 1,500,000");
/// assert_eq!(format_money(99.5, "$"), "$ 99.50");
/// ```
pub fn format_money(value: f64, symbol: &str) -> String {
    let decimals = if value.fract() == 0.0 { 0 } else { 2 };
    format!("{} {}", symbol, format_number_with_decimals(value, decimals))
}

/// Percentage with one decimal, halves rounded away from zero
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{}%", format_number_with_decimals(rounded, 1))
}
