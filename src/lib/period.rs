//! Reset windows of statement credits
//!
//! Everything here is a pure function of a `Date`: nothing in this module
//! decides whether a claim is accepted, it only tells which window a date
//! belongs to and how much of that window is left.

use std::fmt;

use crate::lib::date::{Date, Month};

/// How often a credit resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Monthly,
    SemiAnnual,
    Annual,
}

impl Cadence {
    /// Number of occurrences in a year, used to project an entered amount
    /// over the whole year
    pub fn factor(self) -> u32 {
        match self {
            Cadence::Monthly => 12,
            Cadence::SemiAnnual => 2,
            Cadence::Annual => 1,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Cadence::Monthly => "month",
            Cadence::SemiAnnual => "half",
            Cadence::Annual => "year",
        })
    }
}

/// Which half of the year a semi-annual credit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Half {
    /// January to June
    FirstHalf,
    /// July to December
    SecondHalf,
}

impl Half {
    /// Months covered, as `"Jan-Jun"` or `"Jul-Dec"`
    pub fn span(self) -> &'static str {
        match self {
            Half::FirstHalf => "Jan-Jun",
            Half::SecondHalf => "Jul-Dec",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Half::FirstHalf => "First Half",
            Half::SecondHalf => "Second Half",
        })
    }
}

pub fn current_half(date: Date) -> Half {
    if date.month() <= Month::Jun {
        Half::FirstHalf
    } else {
        Half::SecondHalf
    }
}

/// Days left after `date` in its month: 0 on the last day
pub fn days_remaining_in_month(date: Date) -> u8 {
    date.end_of_month().day() - date.day()
}

/// Identifies the reset window a date falls in for a given cadence
///
/// Two dates belong to the same window for a cadence exactly when
/// their keys compare equal. Keys of the same cadence are ordered
/// like the windows they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Month(u16, Month),
    Half(u16, Half),
    Year(u16),
}

impl PeriodKey {
    pub fn of(cadence: Cadence, date: Date) -> Self {
        match cadence {
            Cadence::Monthly => PeriodKey::Month(date.year(), date.month()),
            Cadence::SemiAnnual => PeriodKey::Half(date.year(), current_half(date)),
            Cadence::Annual => PeriodKey::Year(date.year()),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Month(y, m) => write!(f, "{}-{}", y, m),
            PeriodKey::Half(y, h) => write!(f, "{}-{}", y, h.span()),
            PeriodKey::Year(y) => write!(f, "{}", y),
        }
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
    use super::*;
    use crate::lib::date::Month::*;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {{
            Date::from($y, $m, $d).unwrap()
        }}
    }

    #[test]
    fn halves() {
        for year in [1999, 2026, 2100] {
            for m in [Jan, Feb, Mar, Apr, May, Jun] {
                assert_eq!(current_half(Date::from(year, m, 1).unwrap()), Half::FirstHalf);
            }
            for m in [Jul, Aug, Sep, Oct, Nov, Dec] {
                assert_eq!(current_half(Date::from(year, m, 28).unwrap()), Half::SecondHalf);
            }
        }
        assert_eq!(current_half(dt!(2026-Jun-30)), Half::FirstHalf);
        assert_eq!(current_half(dt!(2026-Jul-1)), Half::SecondHalf);
    }

    #[test]
    fn remaining_days() {
        assert_eq!(days_remaining_in_month(dt!(2026-Apr-30)), 0);
        assert_eq!(days_remaining_in_month(dt!(2026-Apr-1)), 29);
        assert_eq!(days_remaining_in_month(dt!(2026-Oct-18)), 13);
        assert_eq!(days_remaining_in_month(dt!(2028-Feb-1)), 28);
        assert_eq!(days_remaining_in_month(dt!(2026-Feb-1)), 27);
    }

    #[test]
    fn factors() {
        assert_eq!(Cadence::Monthly.factor(), 12);
        assert_eq!(Cadence::SemiAnnual.factor(), 2);
        assert_eq!(Cadence::Annual.factor(), 1);
    }

    #[test]
    fn period_keys() {
        let key = |c, d| PeriodKey::of(c, d);
        assert_eq!(key(Cadence::SemiAnnual, dt!(2026-Jan-3)), key(Cadence::SemiAnnual, dt!(2026-Jun-30)));
        assert_ne!(key(Cadence::SemiAnnual, dt!(2026-Jun-30)), key(Cadence::SemiAnnual, dt!(2026-Jul-1)));
        assert_ne!(key(Cadence::SemiAnnual, dt!(2026-Jul-1)), key(Cadence::SemiAnnual, dt!(2027-Jul-1)));
        assert_ne!(key(Cadence::Monthly, dt!(2026-Mar-31)), key(Cadence::Monthly, dt!(2026-Apr-1)));
        assert_eq!(key(Cadence::Annual, dt!(2026-Jan-1)), key(Cadence::Annual, dt!(2026-Dec-31)));
        assert_eq!(format!("{}", key(Cadence::SemiAnnual, dt!(2026-Oct-18))), "2026-Jul-Dec");
        assert_eq!(format!("{}", key(Cadence::Monthly, dt!(2026-Oct-18))), "2026-Oct");
    }

    #[test]
    fn period_keys_follow_time() {
        let key = |c, d| PeriodKey::of(c, d);
        assert!(key(Cadence::Monthly, dt!(2026-Dec-31)) < key(Cadence::Monthly, dt!(2027-Jan-1)));
        assert!(key(Cadence::Monthly, dt!(2026-Sep-30)) < key(Cadence::Monthly, dt!(2026-Oct-1)));
        assert!(key(Cadence::SemiAnnual, dt!(2026-Jul-1)) > key(Cadence::SemiAnnual, dt!(2026-Jun-30)));
        assert!(key(Cadence::SemiAnnual, dt!(2026-Dec-1)) < key(Cadence::SemiAnnual, dt!(2027-Jan-1)));
        assert!(key(Cadence::Annual, dt!(2025-Dec-31)) < key(Cadence::Annual, dt!(2026-Jan-1)));
    }
}
