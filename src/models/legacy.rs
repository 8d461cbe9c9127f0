//! Rows of the older single-table layout (`shifts`, `entries`).
//! They are only read during `import`, where each row is split into an
//! expected shift plus its entry.

use super::shift_entry::Earnings;
use super::{ExpectedShift, ShiftEntry, ShiftStatus, ensure_non_negative};
use crate::core::calculator::income;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the legacy `shifts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shift_date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub sales: f64,
    #[serde(default)]
    pub tips: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub employer_id: Option<Uuid>,
    #[serde(default)]
    pub cash_out: f64,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub other: f64,
    #[serde(default)]
    pub expected_hours: Option<f64>,
    #[serde(default)]
    pub lunch_break_minutes: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Shift {
    pub fn validate(&self) -> AppResult<()> {
        ensure_non_negative("hours", self.hours)?;
        ensure_non_negative("sales", self.sales)?;
        ensure_non_negative("tips", self.tips)?;
        ensure_non_negative("cash_out", self.cash_out)?;
        ensure_non_negative("other", self.other)?;
        if let Some(rate) = self.hourly_rate {
            ensure_non_negative("hourly_rate", rate)?;
        }
        Ok(())
    }

    /// rate × hours + tips + other - cash_out
    pub fn total_earnings(&self) -> f64 {
        self.hourly_rate.unwrap_or(0.0) * self.hours + self.tips + self.other - self.cash_out
    }

    pub fn tip_percentage(&self) -> f64 {
        income::tip_percentage(self.tips, self.sales)
    }

    pub fn effective_hourly_rate(&self) -> f64 {
        income::effective_hourly_rate(self.total_earnings(), self.hours)
    }

    /// Split into a completed expected shift and its entry. Missing times
    /// are reconstructed from `hours` starting at midnight; a row without a
    /// rate is paid at `fallback_rate`.
    pub fn split(
        &self,
        deduction_percentage: f64,
        fallback_rate: f64,
    ) -> AppResult<(ExpectedShift, ShiftEntry)> {
        self.validate()?;
        let start = self.start_time.unwrap_or(NaiveTime::MIN);
        let end = match self.end_time {
            Some(end) => end,
            None => {
                let span = TimeDelta::try_minutes((self.hours * 60.0).round() as i64)
                    .ok_or_else(|| {
                        AppError::Validation(format!("hours out of range: {}", self.hours))
                    })?;
                start + span
            }
        };
        let rate = self.hourly_rate.unwrap_or(fallback_rate);

        let mut shift = ExpectedShift::plan(
            self.user_id,
            self.employer_id,
            self.shift_date,
            start,
            end,
            rate,
            self.lunch_break_minutes,
        )?;
        shift.id = self.id;
        shift.expected_hours = self.expected_hours.unwrap_or(self.hours);
        shift.status = ShiftStatus::Completed;
        shift.created_at = self.created_at.or(shift.created_at);

        let mut entry = ShiftEntry::record(
            shift.id,
            self.user_id,
            start,
            end,
            self.hours,
            Earnings {
                sales: self.sales,
                tips: self.tips,
                cash_out: self.cash_out,
                other: self.other,
            },
        )?;
        entry.notes = self.notes.clone();
        entry.apply_snapshot(rate, deduction_percentage);
        Ok((shift, entry))
    }
}

/// Row of the legacy `entries` table: money recorded for a day without hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub employer_id: Option<Uuid>,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub sales: f64,
    #[serde(default)]
    pub tips: f64,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub cash_out: f64,
    #[serde(default)]
    pub other: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// tips + other - cash_out
    pub fn total_earnings(&self) -> f64 {
        self.tips + self.other - self.cash_out
    }

    pub fn tip_percentage(&self) -> f64 {
        income::tip_percentage(self.tips, self.sales)
    }

    /// Split into a zero-hour completed shift and its entry.
    pub fn split(
        &self,
        deduction_percentage: f64,
        fallback_rate: f64,
    ) -> AppResult<(ExpectedShift, ShiftEntry)> {
        let as_shift = Shift {
            id: self.id,
            user_id: self.user_id,
            shift_date: self.entry_date,
            hours: 0.0,
            hourly_rate: self.hourly_rate,
            sales: self.sales,
            tips: self.tips,
            notes: self.notes.clone(),
            employer_id: self.employer_id,
            cash_out: self.cash_out,
            start_time: None,
            end_time: None,
            other: self.other,
            expected_hours: Some(0.0),
            lunch_break_minutes: 0,
            created_at: self.created_at,
        };
        as_shift.split(deduction_percentage, fallback_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_shift() -> Shift {
        Shift {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            shift_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            hours: 8.0,
            hourly_rate: Some(15.0),
            sales: 200.0,
            tips: 50.0,
            notes: Some("brunch".into()),
            employer_id: None,
            cash_out: 10.0,
            start_time: NaiveTime::from_hms_opt(10, 0, 0),
            end_time: NaiveTime::from_hms_opt(18, 0, 0),
            other: 0.0,
            expected_hours: None,
            lunch_break_minutes: 0,
            created_at: None,
        }
    }

    #[test]
    fn legacy_shift_derived_values() {
        let s = legacy_shift();
        assert_eq!(s.total_earnings(), 160.0);
        assert_eq!(s.tip_percentage(), 25.0);
        assert_eq!(s.effective_hourly_rate(), 20.0);
    }

    #[test]
    fn split_keeps_id_and_money() {
        let s = legacy_shift();
        let (shift, entry) = s.split(30.0, 10.0).unwrap();
        assert_eq!(shift.id, s.id);
        assert_eq!(shift.status, ShiftStatus::Completed);
        assert_eq!(entry.shift_id, s.id);
        assert_eq!(entry.actual_hours, 8.0);
        assert_eq!(entry.gross_income, Some(120.0));
        assert_eq!(entry.net_income, Some(120.0 + 40.0 - 36.0));
        assert_eq!(entry.notes.as_deref(), Some("brunch"));
    }

    #[test]
    fn legacy_entry_becomes_zero_hour_shift() {
        let e = Entry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            employer_id: None,
            entry_date: NaiveDate::from_ymd_opt(2025, 2, 4).unwrap(),
            sales: 0.0,
            tips: 30.0,
            hourly_rate: None,
            cash_out: 5.0,
            other: 0.0,
            notes: None,
            created_at: None,
        };
        assert_eq!(e.total_earnings(), 25.0);
        assert_eq!(e.tip_percentage(), 0.0);
        let (shift, entry) = e.split(30.0, 15.0).unwrap();
        assert_eq!(shift.expected_hours, 0.0);
        assert_eq!(entry.tips, 30.0);
    }

    #[test]
    fn missing_rate_uses_the_fallback() {
        let mut s = legacy_shift();
        s.hourly_rate = None;
        s.cash_out = 0.0;
        let (shift, entry) = s.split(30.0, 15.0).unwrap();
        assert_eq!(shift.hourly_rate, 15.0);
        assert_eq!(entry.gross_income, Some(120.0));
        assert_eq!(entry.net_income, Some(84.0 + 50.0));
    }

    #[test]
    fn absurd_hours_are_rejected() {
        let mut s = legacy_shift();
        s.end_time = None;
        s.hours = 1e300;
        assert!(matches!(s.split(30.0, 15.0), Err(AppError::Validation(_))));
    }
}
