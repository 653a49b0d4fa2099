//! Recurrence rule model
//!
//! A `RecurrenceRule` is an immutable value object describing how often and
//! until when an event series repeats. It is constructed once per submission
//! through the builder and frozen before date generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::errors::{GatherlyError, Result};

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Parse a frequency from user input.
    ///
    /// Unrecognized values fall back to weekly stepping; the fallback is
    /// logged so it never happens silently.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            other => {
                warn!(frequency = other, "Unrecognized frequency, falling back to weekly");
                Frequency::Weekly
            }
        }
    }
}

/// Series terminator: an inclusive end date or a maximum occurrence count.
///
/// Exactly one terminator is active for a rule; the enum makes the invariant
/// structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Terminator {
    Until(NaiveDate),
    Count(u32),
}

/// Recurrence rule for an event series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub terminator: Terminator,
    /// Day of week (0-6, Sunday-based); only meaningful for weekly rules.
    pub weekly_day_of_week: Option<u8>,
    /// Nominal day of month (1-31); only meaningful for monthly rules.
    pub monthly_day_of_month: Option<u32>,
}

impl RecurrenceRule {
    /// Start building a new rule
    pub fn builder() -> RecurrenceRuleBuilder {
        RecurrenceRuleBuilder::default()
    }

    /// Validate a rule before it drives any persistence
    pub fn validate(&self) -> Result<()> {
        match self.terminator {
            Terminator::Count(0) => {
                return Err(GatherlyError::Validation(
                    "Occurrence count must be greater than 0".to_string(),
                ));
            }
            Terminator::Until(end) if end < self.start_date => {
                return Err(GatherlyError::Validation(format!(
                    "End date {} is before start date {}",
                    end, self.start_date
                )));
            }
            _ => {}
        }

        if let Some(day) = self.weekly_day_of_week {
            if day > 6 {
                return Err(GatherlyError::Validation(format!(
                    "Day of week must be 0-6, got {}",
                    day
                )));
            }
        }

        if let Some(day) = self.monthly_day_of_month {
            if !(1..=31).contains(&day) {
                return Err(GatherlyError::Validation(format!(
                    "Day of month must be 1-31, got {}",
                    day
                )));
            }
        }

        Ok(())
    }

    /// The nominal day of month monthly stepping aims for
    pub(crate) fn nominal_day_of_month(&self) -> u32 {
        use chrono::Datelike;
        self.monthly_day_of_month
            .unwrap_or_else(|| self.start_date.day())
    }
}

/// Builder for incremental rule construction from UI form state
#[derive(Debug, Clone, Default)]
pub struct RecurrenceRuleBuilder {
    frequency: Option<Frequency>,
    start_date: Option<NaiveDate>,
    until: Option<NaiveDate>,
    count: Option<u32>,
    weekly_day_of_week: Option<u8>,
    monthly_day_of_month: Option<u32>,
}

impl RecurrenceRuleBuilder {
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Set the frequency from raw user input, with the weekly fallback
    pub fn frequency_input(mut self, input: &str) -> Self {
        self.frequency = Some(Frequency::from_input(input));
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.until = Some(end_date);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn weekly_day_of_week(mut self, day: u8) -> Self {
        self.weekly_day_of_week = Some(day);
        self
    }

    pub fn monthly_day_of_month(mut self, day: u32) -> Self {
        self.monthly_day_of_month = Some(day);
        self
    }

    /// Freeze the builder into a validated rule
    pub fn build(self) -> Result<RecurrenceRule> {
        let frequency = self
            .frequency
            .ok_or_else(|| GatherlyError::Validation("Frequency is required".to_string()))?;
        let start_date = self
            .start_date
            .ok_or_else(|| GatherlyError::Validation("Start date is required".to_string()))?;

        let terminator = match (self.until, self.count) {
            (Some(end), None) => Terminator::Until(end),
            (None, Some(count)) => Terminator::Count(count),
            (Some(_), Some(_)) => {
                return Err(GatherlyError::Validation(
                    "End date and occurrence count are mutually exclusive".to_string(),
                ));
            }
            (None, None) => {
                return Err(GatherlyError::Validation(
                    "Either an end date or an occurrence count is required".to_string(),
                ));
            }
        };

        let rule = RecurrenceRule {
            frequency,
            start_date,
            terminator,
            weekly_day_of_week: self.weekly_day_of_week,
            monthly_day_of_month: self.monthly_day_of_month,
        };
        rule.validate()?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builder_requires_exactly_one_terminator() {
        let both = RecurrenceRule::builder()
            .frequency(Frequency::Daily)
            .start_date(date(2025, 3, 1))
            .until(date(2025, 3, 10))
            .count(5)
            .build();
        assert_matches!(both, Err(GatherlyError::Validation(_)));

        let neither = RecurrenceRule::builder()
            .frequency(Frequency::Daily)
            .start_date(date(2025, 3, 1))
            .build();
        assert_matches!(neither, Err(GatherlyError::Validation(_)));
    }

    #[test]
    fn builder_rejects_end_date_before_start() {
        let rule = RecurrenceRule::builder()
            .frequency(Frequency::Weekly)
            .start_date(date(2025, 3, 10))
            .until(date(2025, 3, 1))
            .build();
        assert_matches!(rule, Err(GatherlyError::Validation(_)));
    }

    #[test]
    fn builder_rejects_zero_count() {
        let rule = RecurrenceRule::builder()
            .frequency(Frequency::Weekly)
            .start_date(date(2025, 3, 10))
            .count(0)
            .build();
        assert_matches!(rule, Err(GatherlyError::Validation(_)));
    }

    #[test]
    fn builder_rejects_out_of_range_days() {
        let weekly = RecurrenceRule::builder()
            .frequency(Frequency::Weekly)
            .start_date(date(2025, 3, 10))
            .count(2)
            .weekly_day_of_week(7)
            .build();
        assert_matches!(weekly, Err(GatherlyError::Validation(_)));

        let monthly = RecurrenceRule::builder()
            .frequency(Frequency::Monthly)
            .start_date(date(2025, 3, 10))
            .count(2)
            .monthly_day_of_month(32)
            .build();
        assert_matches!(monthly, Err(GatherlyError::Validation(_)));
    }

    #[test]
    fn unrecognized_frequency_falls_back_to_weekly() {
        assert_eq!(Frequency::from_input("fortnightly"), Frequency::Weekly);
        assert_eq!(Frequency::from_input("Daily"), Frequency::Daily);
        assert_eq!(Frequency::from_input(" monthly "), Frequency::Monthly);
    }

    #[test]
    fn nominal_day_defaults_to_start_date() {
        let rule = RecurrenceRule::builder()
            .frequency(Frequency::Monthly)
            .start_date(date(2024, 1, 31))
            .count(3)
            .build()
            .unwrap();
        assert_eq!(rule.nominal_day_of_month(), 31);
    }
}
