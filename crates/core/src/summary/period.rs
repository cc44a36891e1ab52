//! Calendar month arithmetic for period windows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const LONG_NAMES: [&str; 12] = [
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

/// A calendar month, ordered chronologically.
///
/// `month0` is zero based (0 = January), matching budget goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 0 to 11.
    pub month0: u32,
}

impl Month {
    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Builds a month from a zero-based month number, or `None` if it is
    /// outside 0..=11.
    #[must_use]
    pub const fn new(year: i32, month0: u32) -> Option<Self> {
        if month0 < 12 {
            Some(Self { year, month0 })
        } else {
            None
        }
    }

    /// Moves by `delta` months, crossing year boundaries as needed.
    #[must_use]
    pub fn offset(self, delta: i32) -> Self {
        // month0 < 12 always fits in i32
        let index = self.year * 12 + self.month0.cast_signed() + delta;
        Self {
            year: index.div_euclid(12),
            month0: index.rem_euclid(12).cast_unsigned(),
        }
    }

    /// The previous calendar month.
    #[must_use]
    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    /// Whether `date` falls inside this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Whether `date` is on or after the first day of this month.
    #[must_use]
    pub fn starts_on_or_before(&self, date: NaiveDate) -> bool {
        Self::of(date) >= *self
    }

    /// First day of the month, if representable.
    #[must_use]
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    /// Last day of the month, if representable.
    #[must_use]
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.offset(1).first_day()?.pred_opt()
    }

    /// Three-letter English name, e.g. `"Feb"`.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        SHORT_NAMES[self.month0 as usize % 12]
    }

    /// Full English name with the year, e.g. `"February 2024"`.
    #[must_use]
    pub fn long_label(&self) -> String {
        format!("{} {}", LONG_NAMES[self.month0 as usize % 12], self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_of_date() {
        let month = Month::of(date(2024, 2, 15));
        assert_eq!(month, Month { year: 2024, month0: 1 });
        assert_eq!(month.short_name(), "Feb");
        assert_eq!(month.long_label(), "February 2024");
    }

    #[test]
    fn test_new_rejects_month_twelve() {
        assert!(Month::new(2024, 11).is_some());
        assert!(Month::new(2024, 12).is_none());
    }

    #[test]
    fn test_previous_crosses_year() {
        let jan = Month::of(date(2024, 1, 31));
        assert_eq!(jan.previous(), Month { year: 2023, month0: 11 });
    }

    #[test]
    fn test_offset_forward_and_back() {
        let start = Month { year: 2024, month0: 5 };
        assert_eq!(start.offset(-11), Month { year: 2023, month0: 6 });
        assert_eq!(start.offset(7), Month { year: 2025, month0: 0 });
        assert_eq!(start.offset(-11).offset(11), start);
    }

    #[test]
    fn test_contains_and_bounds() {
        let feb = Month { year: 2024, month0: 1 };
        assert!(feb.contains(date(2024, 2, 1)));
        assert!(feb.contains(date(2024, 2, 29)));
        assert!(!feb.contains(date(2024, 3, 1)));
        assert!(!feb.contains(date(2024, 1, 31)));

        assert!(feb.starts_on_or_before(date(2024, 2, 1)));
        assert!(feb.starts_on_or_before(date(2025, 1, 1)));
        assert!(!feb.starts_on_or_before(date(2024, 1, 31)));
    }

    #[test]
    fn test_first_and_last_day() {
        let feb = Month { year: 2024, month0: 1 };
        assert_eq!(feb.first_day(), Some(date(2024, 2, 1)));
        assert_eq!(feb.last_day(), Some(date(2024, 2, 29)));

        let dec = Month { year: 2023, month0: 11 };
        assert_eq!(dec.last_day(), Some(date(2023, 12, 31)));
    }
}
