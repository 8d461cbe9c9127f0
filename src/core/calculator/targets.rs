//! Personal targets per period and progress against them.

use super::period::DashboardPeriod;
use crate::models::UserProfile;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserTargets {
    pub tip_target_percentage: f64,
    pub daily_sales: f64,
    pub weekly_sales: f64,
    pub monthly_sales: f64,
    pub daily_hours: f64,
    pub weekly_hours: f64,
    pub monthly_hours: f64,
    pub daily_tips: f64,
    pub weekly_tips: f64,
    pub monthly_tips: f64,
}

impl From<&UserProfile> for UserTargets {
    fn from(p: &UserProfile) -> Self {
        Self {
            tip_target_percentage: p.tip_target_percentage,
            daily_sales: p.target_sales_daily,
            weekly_sales: p.target_sales_weekly,
            monthly_sales: p.target_sales_monthly,
            daily_hours: p.target_hours_daily,
            weekly_hours: p.target_hours_weekly,
            monthly_hours: p.target_hours_monthly,
            daily_tips: p.target_tip_daily,
            weekly_tips: p.target_tip_weekly,
            monthly_tips: p.target_tip_monthly,
        }
    }
}

/// Pick the target for a period from its daily/weekly/monthly values.
/// Four-week spans use weekly × 4 when a weekly target exists and the
/// monthly target otherwise; the year view scales the monthly target by
/// the months elapsed.
fn for_period(
    period: DashboardPeriod,
    four_week_month: bool,
    today: NaiveDate,
    daily: f64,
    weekly: f64,
    monthly: f64,
) -> f64 {
    match period {
        DashboardPeriod::Today => daily,
        DashboardPeriod::Week => weekly,
        DashboardPeriod::Month => {
            if four_week_month && weekly > 0.0 {
                weekly * 4.0
            } else {
                monthly
            }
        }
        DashboardPeriod::Year => monthly * today.month() as f64,
        DashboardPeriod::FourWeeks => {
            if weekly > 0.0 {
                weekly * 4.0
            } else {
                monthly
            }
        }
        DashboardPeriod::Custom => 0.0,
    }
}

impl UserTargets {
    pub fn hours_target(&self, period: DashboardPeriod, four_week_month: bool, today: NaiveDate) -> f64 {
        for_period(
            period,
            four_week_month,
            today,
            self.daily_hours,
            self.weekly_hours,
            self.monthly_hours,
        )
    }

    pub fn sales_target(&self, period: DashboardPeriod, four_week_month: bool, today: NaiveDate) -> f64 {
        for_period(
            period,
            four_week_month,
            today,
            self.daily_sales,
            self.weekly_sales,
            self.monthly_sales,
        )
    }

    pub fn tips_target(&self, period: DashboardPeriod, four_week_month: bool, today: NaiveDate) -> f64 {
        for_period(
            period,
            four_week_month,
            today,
            self.daily_tips,
            self.weekly_tips,
            self.monthly_tips,
        )
    }

    /// Tip amount expected from the given sales at the tip target percentage.
    pub fn tip_amount_for_sales(&self, sales: f64) -> f64 {
        if self.tip_target_percentage > 0.0 && sales > 0.0 {
            sales * self.tip_target_percentage / 100.0
        } else {
            0.0
        }
    }
}

/// Percent of target reached; 0 when no target is set.
pub fn progress(value: f64, target: f64) -> f64 {
    if target > 0.0 {
        value / target * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressLevel {
    Met,
    Close,
    Halfway,
    Behind,
}

impl ProgressLevel {
    pub fn from_percent(pct: f64) -> Self {
        if pct >= 100.0 {
            Self::Met
        } else if pct >= 75.0 {
            Self::Close
        } else if pct >= 50.0 {
            Self::Halfway
        } else {
            Self::Behind
        }
    }
}
