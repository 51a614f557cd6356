use chrono::{Datelike, NaiveDate};

/// Thousands separator of the fixed `fr-FR` locale the captions use
/// (narrow no-break space, what `Intl.NumberFormat` emits for French).
const THOUSANDS_SEPARATOR: char = '\u{202F}';

/// Format an integer count with locale thousands separators.
///
/// # Examples
///
/// ```
/// use reel_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(12345), "12\u{202F}345");
/// assert_eq!(format_count(1234567), "1\u{202F}234\u{202F}567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a calendar date as the fixed locale's short form, `dd/mm/yyyy`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use reel_core::formatting::format_date;
///
/// let day = NaiveDate::from_ymd_opt(2020, 3, 7).unwrap();
/// assert_eq!(format_date(day), "07/03/2020");
/// ```
pub fn format_date(day: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", day.day(), day.month(), day.year())
}

/// Abbreviated month label for axis ticks, `"janv. 2020"` style.
pub fn format_month(day: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ];
    format!("{} {}", MONTHS[day.month0() as usize], day.year())
}

/// Insert the locale separator every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_small_values() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_grouping() {
        assert_eq!(format_count(1_000), "1\u{202F}000");
        assert_eq!(format_count(12_345), "12\u{202F}345");
        assert_eq!(format_count(123_456), "123\u{202F}456");
        assert_eq!(format_count(1_234_567), "1\u{202F}234\u{202F}567");
    }

    #[test]
    fn test_format_date_zero_pads() {
        let day = NaiveDate::from_ymd_opt(2021, 1, 9).unwrap();
        assert_eq!(format_date(day), "09/01/2021");
    }

    #[test]
    fn test_format_date_full_components() {
        let day = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
        assert_eq!(format_date(day), "31/12/2019");
    }

    #[test]
    fn test_format_month() {
        let jan = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        assert_eq!(format_month(jan), "janv. 2020");
        let dec = NaiveDate::from_ymd_opt(2021, 12, 1).unwrap();
        assert_eq!(format_month(dec), "déc. 2021");
    }
}
