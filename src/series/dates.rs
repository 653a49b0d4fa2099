//! Occurrence date generation
//!
//! Pure calendar arithmetic: given a frozen recurrence rule, produce the
//! ordered, finite sequence of occurrence dates. No I/O and no hidden state;
//! the iterator is `Clone` and restartable, and always yields the same
//! sequence for the same rule.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::recurrence::{Frequency, RecurrenceRule, Terminator};

/// Hard upper bound on generated occurrences, regardless of configuration
pub const MAX_SERIES_OCCURRENCES: usize = 100;

impl RecurrenceRule {
    /// Iterate the occurrence dates this rule generates.
    ///
    /// The rule's start date is always the first element. Termination is
    /// whichever comes first: a candidate past the inclusive end date, the
    /// configured occurrence count, or the hard safety cap.
    pub fn dates(&self) -> OccurrenceDates {
        OccurrenceDates::new(self)
    }
}

/// Iterator over the occurrence dates of a recurrence rule
#[derive(Debug, Clone)]
pub struct OccurrenceDates {
    upcoming: Option<NaiveDate>,
    frequency: Frequency,
    nominal_day: u32,
    until: Option<NaiveDate>,
    remaining: usize,
}

impl OccurrenceDates {
    fn new(rule: &RecurrenceRule) -> Self {
        let (until, remaining) = match rule.terminator {
            Terminator::Until(end) => (Some(end), MAX_SERIES_OCCURRENCES),
            Terminator::Count(count) => (None, (count as usize).min(MAX_SERIES_OCCURRENCES)),
        };
        Self {
            upcoming: Some(rule.start_date),
            frequency: rule.frequency,
            nominal_day: rule.nominal_day_of_month(),
            until,
            remaining,
        }
    }
}

impl Iterator for OccurrenceDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.upcoming?;
        if let Some(end) = self.until {
            // The end date itself is inclusive.
            if current > end {
                self.upcoming = None;
                return None;
            }
        }
        self.remaining -= 1;
        self.upcoming = step(current, self.frequency, self.nominal_day);
        Some(current)
    }
}

fn step(current: NaiveDate, frequency: Frequency, nominal_day: u32) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => current.checked_add_days(Days::new(1)),
        Frequency::Weekly => current.checked_add_days(Days::new(7)),
        Frequency::Monthly => {
            let (year, month) = if current.month() == 12 {
                (current.year() + 1, 1)
            } else {
                (current.year(), current.month() + 1)
            };
            clamp_to_month(year, month, nominal_day)
        }
    }
}

/// The nominal day in the given month, clamped to that month's last day
fn clamp_to_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}
