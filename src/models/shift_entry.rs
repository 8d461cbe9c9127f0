use super::{ensure_non_negative, ensure_percentage, format_hours};
use crate::core::calculator::income::{self, IncomeSnapshot};
use crate::errors::AppResult;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `shift_entries` table: what actually happened on a shift.
/// One entry per expected shift (`shift_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftEntry {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub user_id: Uuid,
    pub actual_start_time: NaiveTime,
    pub actual_end_time: NaiveTime,
    pub actual_hours: f64,
    #[serde(default)]
    pub sales: f64,
    #[serde(default)]
    pub tips: f64,
    /// Tip-out handed to other staff.
    #[serde(default)]
    pub cash_out: f64,
    #[serde(default)]
    pub other: f64,
    #[serde(default)]
    pub notes: Option<String>,

    // Snapshot of the income figures at entry time
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub gross_income: Option<f64>,
    #[serde(default)]
    pub total_income: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub deduction_percentage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Money fields recorded for a worked shift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Earnings {
    pub sales: f64,
    pub tips: f64,
    pub cash_out: f64,
    pub other: f64,
}

impl ShiftEntry {
    pub fn record(
        shift_id: Uuid,
        user_id: Uuid,
        actual_start_time: NaiveTime,
        actual_end_time: NaiveTime,
        actual_hours: f64,
        earnings: Earnings,
    ) -> AppResult<Self> {
        let entry = Self {
            id: Uuid::new_v4(),
            shift_id,
            user_id,
            actual_start_time,
            actual_end_time,
            actual_hours,
            sales: earnings.sales,
            tips: earnings.tips,
            cash_out: earnings.cash_out,
            other: earnings.other,
            notes: None,
            hourly_rate: None,
            gross_income: None,
            total_income: None,
            net_income: None,
            deduction_percentage: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> AppResult<()> {
        ensure_non_negative("actual_hours", self.actual_hours)?;
        ensure_non_negative("sales", self.sales)?;
        ensure_non_negative("tips", self.tips)?;
        ensure_non_negative("cash_out", self.cash_out)?;
        ensure_non_negative("other", self.other)?;
        if let Some(rate) = self.hourly_rate {
            ensure_non_negative("hourly_rate", rate)?;
        }
        if let Some(pct) = self.deduction_percentage {
            ensure_percentage("deduction_percentage", pct)?;
        }
        Ok(())
    }

    /// Freeze the income figures using the rate and deduction in force now.
    pub fn apply_snapshot(&mut self, hourly_rate: f64, deduction_percentage: f64) {
        let snap = IncomeSnapshot::compute(
            self.actual_hours,
            hourly_rate,
            self.tips,
            self.other,
            self.cash_out,
            deduction_percentage,
        );
        self.hourly_rate = Some(snap.hourly_rate);
        self.gross_income = Some(snap.gross_income);
        self.total_income = Some(snap.total_income);
        self.net_income = Some(snap.net_income);
        self.deduction_percentage = Some(snap.deduction_percentage);
    }

    /// tips + other - cash_out
    pub fn total_tip_income(&self) -> f64 {
        self.tips + self.other - self.cash_out
    }

    pub fn tip_percentage(&self) -> f64 {
        income::tip_percentage(self.tips, self.sales)
    }

    /// Wages only; the snapshot wins over a fresh calculation.
    pub fn gross_income(&self, employer_hourly_rate: f64) -> f64 {
        self.gross_income
            .unwrap_or_else(|| income::gross(self.actual_hours, employer_hourly_rate))
    }

    /// Wages plus tip income.
    pub fn total_income(&self, employer_hourly_rate: f64) -> f64 {
        self.total_income
            .unwrap_or_else(|| self.gross_income(employer_hourly_rate) + self.total_tip_income())
    }

    /// Total income minus the deduction taken on wages.
    pub fn net_income(&self, employer_hourly_rate: f64, deduction_percentage: f64) -> f64 {
        self.net_income.unwrap_or_else(|| {
            let gross = self.gross_income(employer_hourly_rate);
            self.total_income(employer_hourly_rate) - gross * (deduction_percentage / 100.0)
        })
    }

    pub fn effective_hourly_rate(&self, employer_hourly_rate: f64) -> f64 {
        income::effective_hourly_rate(self.total_income(employer_hourly_rate), self.actual_hours)
    }

    pub fn hours_variance(&self, expected_hours: f64) -> f64 {
        self.actual_hours - expected_hours
    }

    pub fn is_overtime(&self, expected_hours: f64) -> bool {
        self.actual_hours > expected_hours
    }

    pub fn formatted_duration(&self) -> String {
        format_hours(self.actual_hours)
    }

    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.actual_start_time.format("%H:%M"),
            self.actual_end_time.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn entry(hours: f64, earnings: Earnings) -> ShiftEntry {
        ShiftEntry::record(Uuid::new_v4(), Uuid::new_v4(), t(9), t(17), hours, earnings).unwrap()
    }

    #[test]
    fn derived_values_without_snapshot() {
        let e = entry(
            8.0,
            Earnings {
                sales: 200.0,
                tips: 50.0,
                cash_out: 10.0,
                other: 5.0,
            },
        );
        assert_eq!(e.total_tip_income(), 45.0);
        assert_eq!(e.tip_percentage(), 25.0);
        assert_eq!(e.gross_income(15.0), 120.0);
        assert_eq!(e.total_income(15.0), 165.0);
        assert_eq!(e.net_income(15.0, 30.0), 129.0);
        assert_eq!(e.hours_variance(7.0), 1.0);
        assert!(e.is_overtime(7.5));
    }

    #[test]
    fn snapshot_wins_over_current_rate() {
        let mut e = entry(
            8.0,
            Earnings {
                tips: 50.0,
                ..Default::default()
            },
        );
        e.apply_snapshot(15.0, 30.0);
        // a later rate change must not alter historical income
        assert_eq!(e.gross_income(25.0), 120.0);
        assert_eq!(e.total_income(25.0), 170.0);
        assert_eq!(e.net_income(25.0, 0.0), 134.0);
    }

    #[test]
    fn zero_hours_and_zero_sales_do_not_divide() {
        let e = entry(0.0, Earnings::default());
        assert_eq!(e.tip_percentage(), 0.0);
        assert_eq!(e.effective_hourly_rate(15.0), 0.0);
    }

    #[test]
    fn negative_money_is_rejected() {
        let res = ShiftEntry::record(
            Uuid::new_v4(),
            Uuid::new_v4(),
            t(9),
            t(17),
            8.0,
            Earnings {
                tips: -1.0,
                ..Default::default()
            },
        );
        assert!(res.is_err());
    }
}
