use super::{ensure_non_negative, ensure_non_negative_minutes, format_hours};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle of a planned shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    #[default]
    Planned,
    Completed,
    Missed,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Planned => "planned",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Missed => "missed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(ShiftStatus::Planned),
            "completed" => Some(ShiftStatus::Completed),
            "missed" => Some(ShiftStatus::Missed),
            _ => None,
        }
    }

    /// Helper: accept CLI input in any case
    pub fn parse(s: &str) -> AppResult<Self> {
        Self::from_db_str(&s.trim().to_lowercase()).ok_or_else(|| {
            AppError::Validation(format!(
                "Status must be planned, completed, or missed (got '{s}')"
            ))
        })
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the `expected_shifts` table: what the worker planned to work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedShift {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub employer_id: Option<Uuid>,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub expected_hours: f64,
    pub hourly_rate: f64,
    #[serde(default)]
    pub lunch_break_minutes: i32,
    /// `None` means "use the default target from the profile".
    #[serde(default)]
    pub sales_target: Option<f64>,
    #[serde(default)]
    pub status: ShiftStatus,
    #[serde(default)]
    pub alert_minutes: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExpectedShift {
    /// Plan a new shift. Expected hours are the start→end span (rolling over
    /// midnight when the end is earlier than the start) minus the unpaid lunch.
    pub fn plan(
        user_id: Uuid,
        employer_id: Option<Uuid>,
        shift_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        hourly_rate: f64,
        lunch_break_minutes: i32,
    ) -> AppResult<Self> {
        let shift = Self {
            id: Uuid::new_v4(),
            user_id,
            employer_id,
            shift_date,
            start_time,
            end_time,
            expected_hours: scheduled_hours(start_time, end_time, lunch_break_minutes),
            hourly_rate,
            lunch_break_minutes,
            sales_target: None,
            status: ShiftStatus::Planned,
            alert_minutes: None,
            notes: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        shift.validate()?;
        Ok(shift)
    }

    /// Move the shift and recompute its expected hours.
    pub fn reschedule(
        &mut self,
        shift_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        lunch_break_minutes: i32,
    ) -> AppResult<()> {
        self.shift_date = shift_date;
        self.start_time = start_time;
        self.end_time = end_time;
        self.lunch_break_minutes = lunch_break_minutes;
        self.expected_hours = scheduled_hours(start_time, end_time, lunch_break_minutes);
        self.updated_at = Some(Utc::now());
        self.validate()
    }

    pub fn validate(&self) -> AppResult<()> {
        ensure_non_negative("expected_hours", self.expected_hours)?;
        ensure_non_negative("hourly_rate", self.hourly_rate)?;
        ensure_non_negative_minutes("lunch_break_minutes", self.lunch_break_minutes)?;
        if let Some(target) = self.sales_target {
            ensure_non_negative("sales_target", target)?;
        }
        if let Some(alert) = self.alert_minutes {
            ensure_non_negative_minutes("alert_minutes", alert)?;
        }
        Ok(())
    }

    /// Expected gross earnings (before deductions).
    pub fn expected_gross_earnings(&self) -> f64 {
        self.hourly_rate * self.expected_hours
    }

    /// Expected hours minus the break time, never below zero.
    pub fn effective_expected_hours(&self) -> f64 {
        (self.expected_hours - self.lunch_break_minutes as f64 / 60.0).max(0.0)
    }

    /// Expected earnings once the unpaid break is taken out.
    pub fn expected_net_earnings(&self) -> f64 {
        self.hourly_rate * self.effective_expected_hours()
    }

    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.shift_date.and_time(self.start_time)
    }

    /// End instant; an overnight shift ends on the following day.
    pub fn ends_at(&self) -> NaiveDateTime {
        let end_date = if self.is_overnight() {
            self.shift_date
                .checked_add_days(Days::new(1))
                .unwrap_or(self.shift_date)
        } else {
            self.shift_date
        };
        end_date.and_time(self.end_time)
    }

    pub fn formatted_duration(&self) -> String {
        format_hours(self.expected_hours)
    }

    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Hours between two wall-clock times minus an unpaid break.
/// An end earlier than the start is taken as the next day.
pub fn scheduled_hours(start: NaiveTime, end: NaiveTime, lunch_break_minutes: i32) -> f64 {
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    let net = (minutes - lunch_break_minutes as i64).max(0);
    net as f64 / 60.0
}
