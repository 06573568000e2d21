use chrono::{DateTime, Utc};

/// Returns `s` with its first character upper-cased, e.g. "pending" -> "Pending".
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Moves the decimal point of `decimal` `places` digits to the left, working on
/// the string so no floating-point rounding is involved.
///
/// "1234" shifted by 2 is "12.34", "5" is "0.05", "100" is "1".
/// Non-numeric input is returned unchanged.
pub fn decimal_shift(decimal: &str, places: usize) -> String {
    let (sign, digits) = split_sign(decimal.trim());
    if !is_unsigned_decimal(digits) {
        return decimal.to_string();
    }
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut int_part = int_part.to_string();
    if int_part.len() <= places {
        int_part = format!("{}{}", "0".repeat(places - int_part.len() + 1), int_part);
    }
    let split_at = int_part.len() - places;
    let whole = &int_part[..split_at];
    let frac = format!("{}{}", &int_part[split_at..], frac_part);

    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        if whole == "0" {
            return "0".to_string();
        }
        return format!("{}{}", sign, whole);
    }
    format!("{}{}.{}", sign, whole, frac)
}

/// Formats a decimal dollar string as a price: "$1,234.50", "-$0.05".
/// At least two fraction digits are kept; extra precision is preserved.
/// Non-numeric input is returned unchanged.
pub fn format_price(decimal: &str) -> String {
    let (sign, digits) = split_sign(decimal.trim());
    if !is_unsigned_decimal(digits) {
        return decimal.to_string();
    }
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    format!("{}${}.{}", sign, group_thousands(int_part), frac)
}

/// Formats cents as dollars with two decimals: 1250.0 -> "$12.50".
pub fn format_cents(cents: f64) -> String {
    format!("${:.2}", cents / 100.0)
}

/// Returns "Jan 2023" style month-year labels.
pub fn format_month_year(date: &DateTime<Utc>) -> String {
    date.format("%b %Y").to_string()
}

/// Returns "2023-01-31" style dates.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn split_sign(s: &str) -> (&'static str, &str) {
    match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    }
}

/// ASCII digits with at most one decimal point, e.g. "12", "0.5", "3.".
fn is_unsigned_decimal(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.matches('.').count() <= 1
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize("storxscan"), "Storxscan");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Paid"), "Paid");
    }

    #[test]
    fn decimal_shift_cents_to_dollars() {
        assert_eq!(decimal_shift("1234", 2), "12.34");
        assert_eq!(decimal_shift("5", 2), "0.05");
        assert_eq!(decimal_shift("100", 2), "1");
        assert_eq!(decimal_shift("0", 2), "0");
        assert_eq!(decimal_shift("-250", 2), "-2.5");
        assert_eq!(decimal_shift("12.5", 2), "0.125");
    }

    #[test]
    fn non_numeric_input_is_left_alone() {
        assert_eq!(decimal_shift("ab€", 2), "ab€");
        assert_eq!(decimal_shift("€", 2), "€");
        assert_eq!(decimal_shift("", 2), "");
        assert_eq!(decimal_shift("1.2.3", 2), "1.2.3");
        assert_eq!(format_price("ab€"), "ab€");
        assert_eq!(format_price("NaN"), "NaN");
    }

    #[test]
    fn format_price_pads_fraction() {
        assert_eq!(format_price("12.34"), "$12.34");
        assert_eq!(format_price("1"), "$1.00");
        assert_eq!(format_price("2.5"), "$2.50");
        assert_eq!(format_price("0.125"), "$0.125");
        assert_eq!(format_price("-0.05"), "-$0.05");
    }

    #[test]
    fn format_price_groups_thousands() {
        assert_eq!(format_price("1234567.8"), "$1,234,567.80");
        assert_eq!(format_price("123"), "$123.00");
        assert_eq!(format_price("1000"), "$1,000.00");
    }

    #[test]
    fn format_cents_two_decimals() {
        assert_eq!(format_cents(1250.0), "$12.50");
        assert_eq!(format_cents(0.0), "$0.00");
    }

    #[test]
    fn format_month_year_short_month() {
        let date = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(format_month_year(&date), "Jan 2023");
        assert_eq!(format_date(&date), "2023-01-15");
    }
}
