//! Aggregation of worked shifts into dashboard statistics.

use super::income;
use crate::models::CompletedShift;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub hours: f64,
    pub sales: f64,
    pub tips: f64,
    /// Sum of cash_out (tip-out handed to other staff)
    pub tip_out: f64,
    pub other: f64,
    /// GROSS wages: hours × rate
    pub income: f64,
    /// Wages after each shift's deduction
    pub net_salary: f64,
    pub tip_percentage: f64,
    /// net_salary + tips + other - tip_out
    pub total_revenue: f64,
    pub shift_count: usize,
}

impl Stats {
    /// Gross wages after a flat deduction.
    pub fn net_income(&self, deduction_percentage: f64) -> f64 {
        income::net_salary(self.income, deduction_percentage)
    }

    /// Total revenue per worked hour.
    pub fn average_hourly(&self) -> f64 {
        income::effective_hourly_rate(self.total_revenue, self.hours)
    }

    pub fn average_tips_per_shift(&self) -> f64 {
        if self.shift_count == 0 {
            0.0
        } else {
            self.tips / self.shift_count as f64
        }
    }
}

/// Wages of one worked shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftWages {
    pub rate: f64,
    pub gross: f64,
    pub deduction_percentage: f64,
}

impl ShiftWages {
    pub fn net(&self) -> f64 {
        income::net_salary(self.gross, self.deduction_percentage)
    }
}

/// `None` for a shift without entry. A complete snapshot (gross and net)
/// is trusted; otherwise gross is hours × the entry rate, the shift rate
/// when positive, or the default rate.
pub fn shift_wages(
    shift: &CompletedShift,
    average_deduction_percentage: f64,
    default_hourly_rate: f64,
) -> Option<ShiftWages> {
    let entry = shift.shift_entry.as_ref()?;
    let rate = entry
        .hourly_rate
        .or_else(|| {
            let r = shift.expected_shift.hourly_rate;
            (r > 0.0).then_some(r)
        })
        .unwrap_or(default_hourly_rate);
    let gross = match (entry.gross_income, entry.net_income) {
        (Some(gross), Some(_)) => gross,
        _ => income::gross(entry.actual_hours, rate),
    };
    Some(ShiftWages {
        rate,
        gross,
        deduction_percentage: entry
            .deduction_percentage
            .unwrap_or(average_deduction_percentage),
    })
}

/// Sum the worked shifts. Planned or missed shifts without an entry are
/// ignored. Entry snapshots win over the current rates.
pub fn calculate_stats(
    shifts: &[CompletedShift],
    average_deduction_percentage: f64,
    default_hourly_rate: f64,
) -> Stats {
    let mut stats = Stats::default();

    for shift in shifts {
        let (Some(entry), Some(wages)) = (
            &shift.shift_entry,
            shift_wages(shift, average_deduction_percentage, default_hourly_rate),
        ) else {
            continue;
        };

        stats.shift_count += 1;
        stats.hours += entry.actual_hours;
        stats.sales += entry.sales;
        stats.tips += entry.tips;
        stats.tip_out += entry.cash_out;
        stats.other += entry.other;

        stats.income += wages.gross;
        stats.net_salary += wages.net();
    }

    stats.total_revenue =
        income::total_income(stats.net_salary, stats.tips, stats.other, stats.tip_out);
    stats.tip_percentage = income::tip_percentage(stats.tips, stats.sales);
    stats
}

/// Relative change between two periods, in percent.
pub fn change_percentage(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Shift with the highest total earnings.
pub fn best_shift(shifts: &[CompletedShift]) -> Option<&CompletedShift> {
    shifts
        .iter()
        .filter(|s| s.is_worked())
        .max_by(|a, b| a.total_earnings().total_cmp(&b.total_earnings()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift_entry::Earnings;
    use crate::models::{ExpectedShift, ShiftEntry};
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn worked(rate: f64, hours: f64, tips: f64, sales: f64) -> CompletedShift {
        let user = Uuid::new_v4();
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
        let shift = ExpectedShift::plan(
            user,
            None,
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            start,
            end,
            rate,
            0,
        )
        .unwrap();
        let entry = ShiftEntry::record(
            shift.id,
            user,
            start,
            end,
            hours,
            Earnings {
                sales,
                tips,
                ..Default::default()
            },
        )
        .unwrap();
        CompletedShift::new(shift, Some(entry), None)
    }

    #[test]
    fn empty_list_is_all_zero() {
        let stats = calculate_stats(&[], 30.0, 15.0);
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.average_hourly(), 0.0);
        assert_eq!(stats.average_tips_per_shift(), 0.0);
    }

    #[test]
    fn single_shift_figures() {
        let stats = calculate_stats(&[worked(15.0, 8.0, 50.0, 200.0)], 30.0, 15.0);
        assert_eq!(stats.income, 120.0);
        assert!((stats.net_income(30.0) - 84.0).abs() < 1e-9);
        assert_eq!(stats.tip_percentage, 25.0);
        assert!((stats.total_revenue - 134.0).abs() < 1e-9);
        assert_eq!(stats.shift_count, 1);
    }

    #[test]
    fn planned_shifts_are_ignored() {
        let mut planned = worked(15.0, 8.0, 50.0, 200.0);
        planned.shift_entry = None;
        let stats = calculate_stats(&[planned], 30.0, 15.0);
        assert_eq!(stats.shift_count, 0);
        assert_eq!(stats.hours, 0.0);
    }

    #[test]
    fn snapshot_rate_and_deduction_win() {
        let mut s = worked(15.0, 4.0, 0.0, 0.0);
        if let Some(e) = s.shift_entry.as_mut() {
            e.apply_snapshot(20.0, 10.0);
        }
        let stats = calculate_stats(&[s], 30.0, 15.0);
        assert_eq!(stats.income, 80.0);
        assert!((stats.net_salary - 72.0).abs() < 1e-9);
    }

    #[test]
    fn zero_shift_rate_falls_back_to_default() {
        let stats = calculate_stats(&[worked(0.0, 2.0, 0.0, 0.0)], 0.0, 12.0);
        assert_eq!(stats.income, 24.0);
    }

    #[test]
    fn change_against_previous_period() {
        assert_eq!(change_percentage(150.0, 100.0), 50.0);
        assert_eq!(change_percentage(50.0, 100.0), -50.0);
        assert_eq!(change_percentage(10.0, 0.0), 100.0);
        assert_eq!(change_percentage(0.0, 0.0), 0.0);
    }

    #[test]
    fn best_shift_picks_highest_earnings() {
        let shifts = vec![worked(15.0, 8.0, 50.0, 200.0), worked(15.0, 8.0, 90.0, 300.0)];
        let best = best_shift(&shifts).unwrap();
        assert_eq!(best.tips(), 90.0);
    }
}
