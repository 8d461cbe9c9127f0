// src/export/model.rs

use crate::core::calculator::dashboard::{Stats, shift_wages};
use crate::models::CompletedShift;
use serde::Serialize;

fn money(v: f64) -> String {
    format!("{v:.2}")
}

/// One worked shift, flattened. Field names are the column headers.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ShiftExport {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Hours")]
    pub hours: String,
    #[serde(rename = "Hourly Rate")]
    pub hourly_rate: String,
    #[serde(rename = "Base Salary")]
    pub base_salary: String,
    #[serde(rename = "Sales")]
    pub sales: String,
    #[serde(rename = "Tips")]
    pub tips: String,
    #[serde(rename = "Tip Out")]
    pub tip_out: String,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: String,
    #[serde(rename = "Tip Percentage")]
    pub tip_percentage: String,
    #[serde(rename = "Employer")]
    pub employer: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl ShiftExport {
    /// `None` for a shift that was not worked. Wages are resolved the same
    /// way as the dashboard totals.
    pub fn from_shift(
        s: &CompletedShift,
        deduction_percentage: f64,
        default_hourly_rate: f64,
    ) -> Option<Self> {
        let entry = s.shift_entry.as_ref()?;
        let wages = shift_wages(s, deduction_percentage, default_hourly_rate)?;
        let revenue = wages.net() + entry.total_tip_income();
        Some(Self {
            date: s.shift_date().format("%Y-%m-%d").to_string(),
            start_time: entry.actual_start_time.format("%H:%M").to_string(),
            end_time: entry.actual_end_time.format("%H:%M").to_string(),
            hours: format!("{:.1}", entry.actual_hours),
            hourly_rate: money(wages.rate),
            base_salary: money(wages.gross),
            sales: money(entry.sales),
            tips: money(entry.tips),
            tip_out: money(entry.cash_out),
            total_revenue: money(revenue),
            tip_percentage: format!("{:.1}", entry.tip_percentage()),
            employer: s.employer_name().to_string(),
            notes: s.notes().unwrap_or_default().to_string(),
        })
    }

    pub(crate) fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.hours.clone(),
            self.hourly_rate.clone(),
            self.base_salary.clone(),
            self.sales.clone(),
            self.tips.clone(),
            self.tip_out.clone(),
            self.total_revenue.clone(),
            self.tip_percentage.clone(),
            self.employer.clone(),
            self.notes.clone(),
        ]
    }
}

pub(crate) fn shift_headers() -> Vec<&'static str> {
    vec![
        "Date",
        "Start Time",
        "End Time",
        "Hours",
        "Hourly Rate",
        "Base Salary",
        "Sales",
        "Tips",
        "Tip Out",
        "Total Revenue",
        "Tip Percentage",
        "Employer",
        "Notes",
    ]
}

/// Totals of an exported period.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SummaryExport {
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "Total Shifts")]
    pub total_shifts: usize,
    #[serde(rename = "Total Hours")]
    pub total_hours: String,
    #[serde(rename = "Total Sales")]
    pub total_sales: String,
    #[serde(rename = "Total Tips")]
    pub total_tips: String,
    #[serde(rename = "Total Tip Out")]
    pub total_tip_out: String,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: String,
    #[serde(rename = "Average Tip %")]
    pub average_tip_percentage: String,
    #[serde(rename = "Average Hourly Rate")]
    pub average_hourly_rate: String,
}

impl SummaryExport {
    /// `average_tip_percentage` is the mean of the per-shift percentages,
    /// not the ratio of the totals.
    pub fn from_stats(period: &str, stats: &Stats, average_tip_percentage: f64) -> Self {
        Self {
            period: period.to_string(),
            total_shifts: stats.shift_count,
            total_hours: format!("{:.1}", stats.hours),
            total_sales: money(stats.sales),
            total_tips: money(stats.tips),
            total_tip_out: money(stats.tip_out),
            total_revenue: money(stats.total_revenue),
            average_tip_percentage: format!("{average_tip_percentage:.1}"),
            average_hourly_rate: money(stats.average_hourly()),
        }
    }

    pub(crate) fn to_row(&self) -> Vec<String> {
        vec![
            self.period.clone(),
            self.total_shifts.to_string(),
            self.total_hours.clone(),
            self.total_sales.clone(),
            self.total_tips.clone(),
            self.total_tip_out.clone(),
            self.total_revenue.clone(),
            self.average_tip_percentage.clone(),
            self.average_hourly_rate.clone(),
        ]
    }
}

/// Mean tip percentage of the worked shifts that had sales.
pub(crate) fn mean_tip_percentage(shifts: &[CompletedShift]) -> f64 {
    let values: Vec<f64> = shifts
        .iter()
        .filter_map(|s| s.shift_entry.as_ref())
        .filter(|e| e.sales > 0.0)
        .map(|e| e.tip_percentage())
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub(crate) fn summary_headers() -> Vec<&'static str> {
    vec![
        "Period",
        "Total Shifts",
        "Total Hours",
        "Total Sales",
        "Total Tips",
        "Total Tip Out",
        "Total Revenue",
        "Average Tip %",
        "Average Hourly Rate",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift_entry::Earnings;
    use crate::models::{ExpectedShift, ShiftEntry};
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    #[test]
    fn detailed_row_uses_the_snapshot() {
        let user = Uuid::new_v4();
        let start = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        let shift = ExpectedShift::plan(
            user,
            None,
            NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            start,
            end,
            15.0,
            0,
        )
        .unwrap();
        let mut entry = ShiftEntry::record(
            shift.id,
            user,
            start,
            end,
            8.0,
            Earnings {
                sales: 200.0,
                tips: 50.0,
                cash_out: 5.0,
                other: 0.0,
            },
        )
        .unwrap();
        entry.apply_snapshot(15.0, 30.0);

        let completed = CompletedShift::new(shift, Some(entry), None);
        let row = ShiftExport::from_shift(&completed, 0.0, 0.0).unwrap();
        assert_eq!(row.hours, "8.0");
        assert_eq!(row.base_salary, "120.00");
        // 120 * 0.7 + 50 - 5
        assert_eq!(row.total_revenue, "129.00");
        assert_eq!(row.tip_percentage, "25.0");
        assert_eq!(row.to_row().len(), shift_headers().len());
        assert_eq!(mean_tip_percentage(&[completed]), 25.0);
    }

    #[test]
    fn unsnapshotted_row_matches_the_dashboard() {
        let user = Uuid::new_v4();
        let start = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        let shift = ExpectedShift::plan(
            user,
            None,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            start,
            end,
            0.0,
            0,
        )
        .unwrap();
        let entry = ShiftEntry::record(
            shift.id,
            user,
            start,
            end,
            6.0,
            Earnings {
                sales: 300.0,
                tips: 45.0,
                cash_out: 0.0,
                other: 0.0,
            },
        )
        .unwrap();

        let completed = CompletedShift::new(shift, Some(entry), None);
        let row = ShiftExport::from_shift(&completed, 30.0, 15.0).unwrap();
        assert_eq!(row.hourly_rate, "15.00");
        assert_eq!(row.base_salary, "90.00");
        // 90 * 0.7 + 45
        assert_eq!(row.total_revenue, "108.00");

        let stats = crate::core::calculator::dashboard::calculate_stats(&[completed], 30.0, 15.0);
        assert_eq!(row.total_revenue, format!("{:.2}", stats.total_revenue));
    }
}
