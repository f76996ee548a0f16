//! Calendar-date utilities.
//!
//! Everything here works on whole calendar days. Dates cross the API
//! boundary as `YYYY-MM-DD` strings and are handled internally as
//! [`NaiveDate`], so day differences come from calendar subtraction and are
//! unaffected by daylight-saving shifts in the local timezone.

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateError;

/// Parse a strict `YYYY-MM-DD` string.
///
/// Rejects anything that is not exactly four digits, dash, two digits,
/// dash, two digits, and anything that names a day that does not exist
/// (e.g. `2023-02-29`).
pub fn parse_iso(input: &str) -> Result<NaiveDate, DateError> {
    let bytes = input.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return Err(DateError::Malformed {
            input: input.to_string(),
        });
    }

    // Shape is validated, so the slices are plain ASCII digits.
    let year: i32 = input[0..4].parse().map_err(|_| DateError::Malformed {
        input: input.to_string(),
    })?;
    let month: u32 = input[5..7].parse().map_err(|_| DateError::Malformed {
        input: input.to_string(),
    })?;
    let day: u32 = input[8..10].parse().map_err(|_| DateError::Malformed {
        input: input.to_string(),
    })?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::Impossible {
        input: input.to_string(),
    })
}

/// Format any date-like value as zero-padded `YYYY-MM-DD`.
///
/// For zoned timestamps the calendar date is taken in that value's own
/// timezone, so a `DateTime<Local>` formats as the local calendar day.
pub fn format_iso<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Today's date in the local calendar.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Years that fit the four-digit `YYYY` field.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Shift a date by `n` days (negative moves backwards).
///
/// Fails when the result leaves years 0000 to 9999, since it could not be
/// written back as `YYYY-MM-DD`.
pub fn shift_days(date: NaiveDate, n: i64) -> Result<NaiveDate, DateError> {
    let shifted = if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted
        .filter(|d| YEAR_RANGE.contains(&d.year()))
        .ok_or_else(|| DateError::OutOfRange {
            input: format_iso(&date),
            offset: n,
        })
}

/// Signed calendar-day count from `a` to `b`.
pub fn day_delta(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// The Monday on or before `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday();
    // At most six days back; only the first representable week can fail.
    date.checked_sub_days(Days::new(u64::from(back)))
        .unwrap_or(NaiveDate::MIN)
}

/// `n` days after the given `YYYY-MM-DD` date.
pub fn add_days(date: &str, n: i64) -> Result<String, DateError> {
    let parsed = parse_iso(date)?;
    Ok(format_iso(&shift_days(parsed, n)?))
}

/// Signed day count `b - a`.
pub fn days_between(a: &str, b: &str) -> Result<i64, DateError> {
    Ok(day_delta(parse_iso(a)?, parse_iso(b)?))
}

/// Monday on or before the given date.
pub fn week_start_monday(date: &str) -> Result<String, DateError> {
    let parsed = parse_iso(date)?;
    let back = i64::from(parsed.weekday().num_days_from_monday());
    Ok(format_iso(&shift_days(parsed, -back)?))
}

/// Sunday closing the week that starts at `start`.
pub fn week_end(start: &str) -> Result<String, DateError> {
    add_days(start, 6)
}

/// An inclusive range of calendar days.
///
/// A window whose `end` precedes its `start` is empty; it never has a
/// negative length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    #[serde(with = "iso_date")]
    pub start: NaiveDate,
    #[serde(with = "iso_date")]
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Monday through Sunday of the week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let start = monday_of(date);
        let end = shift_days(start, 6).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered; zero for an empty window.
    pub fn len_days(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            day_delta(self.start, self.end).unsigned_abs() + 1
        }
    }
}

/// Serde adapter for strict `YYYY-MM-DD` dates.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso(&raw).map_err(serde::de::Error::custom)
    }

    /// Same adapter for optional fields.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_some(&crate::dates::format_iso(d)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                Some(s) if !s.is_empty() => crate::dates::parse_iso(&s)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        parse_iso(s).unwrap()
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        for bad in ["", "2025-1-05", "2025/01/05", "25-01-05", "2025-01-05T00", "abcd-ef-gh"] {
            assert!(
                matches!(parse_iso(bad), Err(DateError::Malformed { .. })),
                "{bad} should be malformed"
            );
        }
    }

    #[test]
    fn parse_rejects_impossible_days() {
        assert!(matches!(parse_iso("2023-02-29"), Err(DateError::Impossible { .. })));
        assert!(matches!(parse_iso("2025-13-01"), Err(DateError::Impossible { .. })));
        assert!(matches!(parse_iso("2025-04-31"), Err(DateError::Impossible { .. })));
        assert!(parse_iso("2024-02-29").is_ok());
    }

    #[test]
    fn format_zero_pads() {
        assert_eq!(format_iso(&d("0987-03-04")), "0987-03-04");
        let ts = Local.with_ymd_and_hms(2025, 1, 5, 23, 30, 0).unwrap();
        assert_eq!(format_iso(&ts), "2025-01-05");
    }

    #[test]
    fn add_days_rolls_over_boundaries() {
        assert_eq!(add_days("2024-02-28", 1).unwrap(), "2024-02-29");
        assert_eq!(add_days("2023-02-28", 1).unwrap(), "2023-03-01");
        assert_eq!(add_days("2024-12-31", 1).unwrap(), "2025-01-01");
        assert_eq!(add_days("2025-01-01", -1).unwrap(), "2024-12-31");
        assert_eq!(add_days("2025-03-03", 13).unwrap(), "2025-03-16");
    }

    #[test]
    fn add_days_propagates_invalid_input() {
        assert!(add_days("2025-02-30", 1).is_err());
        assert!(days_between("nope", "2025-01-01").is_err());
        assert!(week_start_monday("2025-1-1").is_err());
    }

    #[test]
    fn add_days_stays_within_four_digit_years() {
        assert_eq!(add_days("9999-12-30", 1).unwrap(), "9999-12-31");
        assert!(matches!(
            add_days("9999-12-31", 1),
            Err(DateError::OutOfRange { offset: 1, .. })
        ));
        assert_eq!(add_days("0000-01-02", -1).unwrap(), "0000-01-01");
        assert!(matches!(
            add_days("0000-01-01", -1),
            Err(DateError::OutOfRange { offset: -1, .. })
        ));
        // 0000-01-01 is a Saturday; its Monday falls in year -1.
        assert!(week_start_monday("0000-01-01").is_err());
        assert!(week_end("9999-12-27").is_err());

        // Whatever comes back always parses again.
        let back = add_days("0000-01-01", 0).unwrap();
        assert_eq!(parse_iso(&back).unwrap(), d("0000-01-01"));
    }

    #[test]
    fn days_between_across_leap_day() {
        assert_eq!(days_between("2024-02-28", "2024-03-01").unwrap(), 2);
        assert_eq!(days_between("2023-02-28", "2023-03-01").unwrap(), 1);
        assert_eq!(days_between("2025-03-10", "2025-03-01").unwrap(), -9);
    }

    #[test]
    fn days_between_ignores_dst_transitions() {
        // US and EU spring-forward / fall-back weekends.
        assert_eq!(days_between("2025-03-08", "2025-03-10").unwrap(), 2);
        assert_eq!(days_between("2025-10-25", "2025-10-27").unwrap(), 2);
        assert_eq!(days_between("2025-11-01", "2025-11-03").unwrap(), 2);
    }

    #[test]
    fn week_start_and_end() {
        // 2025-01-15 is a Wednesday.
        assert_eq!(week_start_monday("2025-01-15").unwrap(), "2025-01-13");
        assert_eq!(week_start_monday("2025-01-13").unwrap(), "2025-01-13");
        assert_eq!(week_start_monday("2025-01-19").unwrap(), "2025-01-13");
        assert_eq!(week_end("2025-01-13").unwrap(), "2025-01-19");
        // Week straddling a year boundary.
        assert_eq!(week_start_monday("2025-01-01").unwrap(), "2024-12-30");
    }

    #[test]
    fn window_emptiness() {
        let w = DateWindow::new(d("2025-03-10"), d("2025-03-05"));
        assert!(w.is_empty());
        assert_eq!(w.len_days(), 0);
        assert!(!w.contains(d("2025-03-07")));

        let week = DateWindow::week_of(d("2025-01-15"));
        assert_eq!(week.start, d("2025-01-13"));
        assert_eq!(week.end, d("2025-01-19"));
        assert_eq!(week.len_days(), 7);
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        // 1900-01-01 ..= 2199-12-31 keeps add_days(±3650) inside four-digit years.
        (0i64..109_572).prop_map(|offset| {
            shift_days(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(), offset).unwrap()
        })
    }

    proptest! {
        #[test]
        fn format_parse_round_trip(date in any_date(), n in -3650i64..=3650) {
            let shifted = add_days(&format_iso(&date), n).unwrap();
            prop_assert_eq!(format_iso(&parse_iso(&shifted).unwrap()), shifted);
        }

        #[test]
        fn days_between_inverts_add_days(date in any_date(), n in -3650i64..=3650) {
            let a = format_iso(&date);
            let b = add_days(&a, n).unwrap();
            prop_assert_eq!(days_between(&a, &b).unwrap(), n);
        }

        #[test]
        fn week_start_is_idempotent_monday(date in any_date()) {
            let s = format_iso(&date);
            let start = week_start_monday(&s).unwrap();
            prop_assert_eq!(week_start_monday(&start).unwrap(), start.clone());
            prop_assert_eq!(parse_iso(&start).unwrap().weekday(), Weekday::Mon);
            let gap = days_between(&start, &s).unwrap();
            prop_assert!((0..=6).contains(&gap));
        }
    }
}
