use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Unit of a trailing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodUnit {
    /// `D`
    Day,
    /// `M`
    Month,
    /// `Y`
    Year,
}

impl PeriodUnit {
    /// Single-letter code used in period strings
    pub fn code(&self) -> char {
        match self {
            PeriodUnit::Day => 'D',
            PeriodUnit::Month => 'M',
            PeriodUnit::Year => 'Y',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'D' => Some(PeriodUnit::Day),
            'M' => Some(PeriodUnit::Month),
            'Y' => Some(PeriodUnit::Year),
            _ => None,
        }
    }
}

/// Trailing time window such as `7D`, `6M` or `1Y`
///
/// `0D` is a valid, empty window. Lengths too large for `u32` saturate; any
/// such window reaches past every representable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    length: u32,
    unit: PeriodUnit,
}

impl Period {
    pub fn new(length: u32, unit: PeriodUnit) -> Self {
        Self { length, unit }
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// Advance `date` forward by this period.
    ///
    /// Month and year steps clamp to the last day of the target month
    /// (31 Jan + 1M = 28/29 Feb). Returns `None` when the result is not
    /// representable.
    pub fn add_to(&self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.unit {
            PeriodUnit::Day => date.checked_add_days(Days::new(u64::from(self.length))),
            PeriodUnit::Month => date.checked_add_months(Months::new(self.length)),
            PeriodUnit::Year => self
                .length
                .checked_mul(12)
                .and_then(|months| date.checked_add_months(Months::new(months))),
        }
    }

    /// Whether `date` falls inside the window of this period ending at `now`.
    ///
    /// Inclusive: a date exactly one period before `now` is inside.
    pub fn contains(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        // An unrepresentable end lies beyond any `now`
        self.add_to(date).map_or(true, |end| end >= now)
    }
}

impl FromStr for Period {
    type Err = AppError;

    /// Parse `^[0-9]+(D|M|Y)$`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidPeriodFormat(s.to_string());

        let code = s.chars().last().ok_or_else(invalid)?;
        let unit = PeriodUnit::from_code(code).ok_or_else(invalid)?;
        let digits = &s[..s.len() - code.len_utf8()];

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // Only overflow can fail here
        let length = digits.parse::<u32>().unwrap_or(u32::MAX);
        Ok(Period::new(length, unit))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_valid_periods() {
        let p: Period = "7D".parse().unwrap();
        assert_eq!(p.length(), 7);
        assert_eq!(p.unit(), PeriodUnit::Day);

        let p: Period = "12M".parse().unwrap();
        assert_eq!((p.length(), p.unit()), (12, PeriodUnit::Month));

        let p: Period = "5Y".parse().unwrap();
        assert_eq!((p.length(), p.unit()), (5, PeriodUnit::Year));

        assert_eq!("007D".parse::<Period>().unwrap().length(), 7);
    }

    #[test]
    fn test_parse_invalid_periods() {
        for input in ["", "D", "10X", "7d", "-1D", "1.5M", " 7D", "7D ", "M7", "7DD", "7é"] {
            assert!(
                matches!(input.parse::<Period>(), Err(AppError::InvalidPeriodFormat(_))),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_zero_length_is_empty_window() {
        let p: Period = "0D".parse().unwrap();
        assert_eq!(p.length(), 0);

        let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 5, 10, 8, 59, 59).unwrap();
        assert!(p.contains(now, now));
        assert!(!p.contains(earlier, now));
    }

    #[test]
    fn test_parse_oversized_lengths_cover_everything() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let oldest = DateTime::<Utc>::MIN_UTC;

        for input in ["99999999999D", "5000000000Y", "4000000000Y", "123456789012345678901234567890M"] {
            let p: Period = input.parse().unwrap();
            assert!(p.contains(oldest, now), "expected {:?} to cover everything", input);
        }
        assert_eq!("99999999999D".parse::<Period>().unwrap().length(), u32::MAX);
    }

    #[test]
    fn test_display_round_trips_canonical_form() {
        assert_eq!("6M".parse::<Period>().unwrap().to_string(), "6M");
    }

    #[test]
    fn test_add_to_units() {
        let date = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();

        let days: Period = "7D".parse().unwrap();
        assert_eq!(days.add_to(date), Some(Utc.with_ymd_and_hms(2024, 2, 7, 12, 0, 0).unwrap()));

        // Clamped to end of February (leap year)
        let month: Period = "1M".parse().unwrap();
        assert_eq!(month.add_to(date), Some(Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()));

        let year: Period = "2Y".parse().unwrap();
        assert_eq!(year.add_to(date), Some(Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_add_to_is_deterministic() {
        let date = Utc.with_ymd_and_hms(2023, 6, 15, 8, 45, 10).unwrap();
        let p: Period = "3M".parse().unwrap();
        assert_eq!(p.add_to(date), p.add_to(date));
        assert!(p.add_to(date).unwrap() > date);
    }

    #[test]
    fn test_contains_is_inclusive_at_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let p: Period = "7D".parse().unwrap();

        let exactly = Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap();
        let just_older = Utc.with_ymd_and_hms(2024, 5, 3, 8, 59, 59).unwrap();

        assert!(p.contains(exactly, now));
        assert!(!p.contains(just_older, now));
        assert!(p.contains(now, now));
    }

    #[test]
    fn test_contains_huge_year_period() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let p: Period = "4000000000Y".parse().unwrap();
        assert!(p.contains(now, now));
    }
}
