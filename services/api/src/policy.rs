//! Day-count policy applied when a draft is submitted for review
//!
//! Programmer-class designations must book every remaining working day of
//! the month; everyone else books between the minimum and that same ceiling.
//! A draft carrying an attachment bypasses the count entirely.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar;

/// Minimum selected days for non-programmer designations
pub const MIN_SELECTED_DAYS: usize = 12;

/// Designations required to book every remaining working day
const PROGRAMMER_DESIGNATIONS: [&str; 2] = ["Programmer Analyst", "Programmer Analyst Trainee"];

/// Violation of the day-count policy
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Please select exactly {expected} working days or attach an image")]
    ExactCount { expected: usize },

    #[error("Please select at least {min} working days, up to {max} days, or attach an image")]
    RangeCount { min: usize, max: usize },
}

/// True for the programmer designation class
pub fn is_programmer(designation: &str) -> bool {
    PROGRAMMER_DESIGNATIONS.contains(&designation)
}

/// Check a selection's day count against its designation's rule.
pub fn check_day_count(
    designation: &str,
    selected: usize,
    has_attachment: bool,
    today: NaiveDate,
) -> Result<(), PolicyViolation> {
    if has_attachment {
        return Ok(());
    }

    let remaining = calendar::remaining_working_days(today) as usize;

    if is_programmer(designation) {
        if selected != remaining {
            return Err(PolicyViolation::ExactCount {
                expected: remaining,
            });
        }
    } else if selected < MIN_SELECTED_DAYS || selected > remaining {
        return Err(PolicyViolation::RangeCount {
            min: MIN_SELECTED_DAYS,
            max: remaining,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // Tuesday June 10, 2025: 15 working days remain in the month
    fn mid_june() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn programmer_class_membership() {
        assert!(is_programmer("Programmer Analyst"));
        assert!(is_programmer("Programmer Analyst Trainee"));
        assert!(!is_programmer("Technical Lead"));
        assert!(!is_programmer("Senior Manager"));
    }

    #[test]
    fn programmer_must_match_remaining_exactly() {
        assert_eq!(
            check_day_count("Programmer Analyst", 15, false, mid_june()),
            Ok(())
        );
        assert_eq!(
            check_day_count("Programmer Analyst", 14, false, mid_june()),
            Err(PolicyViolation::ExactCount { expected: 15 })
        );
        assert_eq!(
            check_day_count("Programmer Analyst Trainee", 16, false, mid_june()),
            Err(PolicyViolation::ExactCount { expected: 15 })
        );
    }

    #[test]
    fn others_book_between_minimum_and_remaining() {
        assert_eq!(check_day_count("Manager", 12, false, mid_june()), Ok(()));
        assert_eq!(check_day_count("Manager", 15, false, mid_june()), Ok(()));
        assert_eq!(
            check_day_count("Manager", 11, false, mid_june()),
            Err(PolicyViolation::RangeCount { min: 12, max: 15 })
        );
        assert_eq!(
            check_day_count("Manager", 16, false, mid_june()),
            Err(PolicyViolation::RangeCount { min: 12, max: 15 })
        );
    }

    #[test]
    fn attachment_bypasses_the_count() {
        assert_eq!(check_day_count("Manager", 0, true, mid_june()), Ok(()));
        assert_eq!(
            check_day_count("Programmer Analyst", 3, true, mid_june()),
            Ok(())
        );
    }

    #[test]
    fn late_month_range_can_be_unsatisfiable() {
        // Monday June 30, 2025: one working day remains, so non-programmers
        // cannot meet the 12-day minimum without an attachment
        let late = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(
            check_day_count("Manager", 1, false, late),
            Err(PolicyViolation::RangeCount { min: 12, max: 1 })
        );
        assert_eq!(check_day_count("Manager", 1, true, late), Ok(()));
    }
}
