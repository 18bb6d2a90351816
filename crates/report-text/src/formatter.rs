//! Localized date and time formatting

use crate::{Result, TextError};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Arabic month names (Gregorian calendar)
const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// English month names
const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Arabic-Indic digits 0-9
const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Display locale for generated text
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    fn month_name(self, month: u32) -> &'static str {
        let idx = month.saturating_sub(1) as usize;
        let table = match self {
            Locale::Arabic => &ARABIC_MONTHS,
            Locale::English => &ENGLISH_MONTHS,
        };
        table.get(idx).copied().unwrap_or("")
    }

    fn day_period(self, hour: u32) -> &'static str {
        match (self, hour < 12) {
            (Locale::Arabic, true) => "ص",
            (Locale::Arabic, false) => "م",
            (Locale::English, true) => "AM",
            (Locale::English, false) => "PM",
        }
    }
}

/// Replace ASCII digits with the locale's native digits
///
/// # Examples
/// ```
/// use report_text::{localize_digits, Locale};
/// assert_eq!(localize_digits(Locale::Arabic, "2024"), "٢٠٢٤");
/// assert_eq!(localize_digits(Locale::English, "2024"), "2024");
/// ```
pub fn localize_digits(locale: Locale, text: &str) -> String {
    match locale {
        Locale::English => text.to_string(),
        Locale::Arabic => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if c.is_ascii_digit() => ARABIC_DIGITS[d as usize],
                _ => c,
            })
            .collect(),
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| TextError::InvalidDate(text.to_string()))
}

/// Locale-bound date/time formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl LocaleFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Format a date with a long month name and two-digit day
    ///
    /// Arabic: "٠١ مايو ٢٠٢٤", English: "May 01, 2024"
    pub fn date_long(&self, year: i32, month: u32, day: u32) -> String {
        let month_name = self.locale.month_name(month);
        let text = match self.locale {
            Locale::Arabic => format!("{day:02} {month_name} {year}"),
            Locale::English => format!("{month_name} {day:02}, {year}"),
        };
        localize_digits(self.locale, &text)
    }

    /// Format a date value
    pub fn date(&self, date: &NaiveDate) -> String {
        self.date_long(date.year(), date.month(), date.day())
    }

    /// Format a date and time of day (12-hour clock, two-digit fields)
    ///
    /// Arabic: "٠١ مايو ٢٠٢٤ في ٠٣:٠٥ م", English: "May 01, 2024, 03:05 PM"
    pub fn timestamp(&self, at: &NaiveDateTime) -> String {
        let date = self.date(&at.date());
        let (_, hour12) = at.hour12();
        let minute = at.minute();
        let period = self.locale.day_period(at.hour());

        let text = match self.locale {
            Locale::Arabic => format!("{date} في {hour12:02}:{minute:02} {period}"),
            Locale::English => format!("{date}, {hour12:02}:{minute:02} {period}"),
        };
        localize_digits(self.locale, &text)
    }

    /// Long date when `text` is `YYYY-MM-DD`, otherwise the text unchanged
    pub fn date_or_raw(&self, text: &str) -> String {
        match parse_iso_date(text) {
            Ok(date) => self.date(&date),
            Err(_) => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_date_long_english() {
        let f = LocaleFormatter::new(Locale::English);
        assert_eq!(f.date_long(2024, 5, 1), "May 01, 2024");
        assert_eq!(f.date_long(2025, 12, 31), "December 31, 2025");
    }

    #[test]
    fn test_date_long_arabic() {
        let f = LocaleFormatter::new(Locale::Arabic);
        assert_eq!(f.date_long(2024, 5, 1), "٠١ مايو ٢٠٢٤");
    }

    #[test]
    fn test_timestamp_english() {
        let f = LocaleFormatter::new(Locale::English);
        assert_eq!(f.timestamp(&at(2024, 5, 1, 15, 5)), "May 01, 2024, 03:05 PM");
        assert_eq!(f.timestamp(&at(2024, 5, 1, 0, 30)), "May 01, 2024, 12:30 AM");
    }

    #[test]
    fn test_timestamp_arabic() {
        let f = LocaleFormatter::new(Locale::Arabic);
        assert_eq!(f.timestamp(&at(2024, 5, 1, 9, 7)), "٠١ مايو ٢٠٢٤ في ٠٩:٠٧ ص");
    }

    #[test]
    fn test_date_or_raw() {
        let f = LocaleFormatter::new(Locale::English);
        assert_eq!(f.date_or_raw("2024-05-01"), "May 01, 2024");
        assert_eq!(f.date_or_raw("1447/01/01"), "1447/01/01");
        assert_eq!(f.date_or_raw(""), "");
    }

    #[test]
    fn test_month_out_of_range() {
        let f = LocaleFormatter::new(Locale::English);
        assert_eq!(f.date_long(2024, 13, 1), " 01, 2024");
    }

    #[test]
    fn test_locale_serde_names() {
        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::English);
        assert_eq!(serde_json::to_string(&Locale::Arabic).unwrap(), "\"ar\"");
    }
}
