//! Display formats for dates, timestamps and money.

use chrono::{NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// `dd.MM.yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `dd.MM.yyyy HH:mm`
pub fn format_date_time(at: NaiveDateTime) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}

/// US dollar amount with thousands separators, e.g. `$9,600.00`.
/// Negative amounts are written `-$12.50`. Half-cent ties round to
/// the even cent.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round_ties_even() as u64;
    let dollars = cents / 100;
    let cents_part = cents % 100;

    let digits = dollars.to_string();
    let with_commas = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| String::from_utf8_lossy(c))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, with_commas, cents_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "07.03.2024");
        let at = date.and_hms_opt(9, 5, 59).unwrap();
        assert_eq!(format_date_time(at), "07.03.2024 09:05");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(10.0), "$10.00");
        assert_eq!(format_currency(9600.0), "$9,600.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(10.125), "$10.12");
        assert_eq!(format_currency(10.375), "$10.38");
        assert_eq!(format_currency(0.126), "$0.13");
        assert_eq!(format_currency(-12.5), "-$12.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }
}
