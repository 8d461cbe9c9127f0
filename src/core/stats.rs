//! Dashboard report: period totals, comparison with the previous period
//! and progress toward the profile targets.

use crate::core::calculator::dashboard::{Stats, best_shift, calculate_stats, change_percentage};
use crate::core::calculator::period::{DashboardPeriod, DateRange, date_range, previous_range};
use crate::core::calculator::targets::{ProgressLevel, UserTargets, progress};
use crate::errors::AppResult;
use crate::models::CompletedShift;
use crate::store::Store;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct StatsRequest {
    pub period: DashboardPeriod,
    /// Explicit range; turns the period into `Custom`.
    pub range: Option<DateRange>,
    /// Month view spans the four weeks ending with the current one.
    pub four_weeks_view: bool,
    pub compare: bool,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetProgress {
    pub name: &'static str,
    pub value: f64,
    pub target: f64,
    pub percent: f64,
    pub level: ProgressLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub previous_range: DateRange,
    pub previous: Stats,
    pub revenue_change: f64,
    pub tips_change: f64,
    pub hours_change: f64,
    pub sales_change: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub period: DashboardPeriod,
    pub range: DateRange,
    pub stats: Stats,
    pub average_hourly: f64,
    pub average_tips_per_shift: f64,
    pub targets: Vec<TargetProgress>,
    pub comparison: Option<Comparison>,
    pub best_shift: Option<CompletedShift>,
}

fn target_row(name: &'static str, value: f64, target: f64) -> Option<TargetProgress> {
    (target > 0.0).then(|| {
        let percent = progress(value, target);
        TargetProgress {
            name,
            value,
            target,
            percent,
            level: ProgressLevel::from_percent(percent),
        }
    })
}

pub struct StatsLogic;

impl StatsLogic {
    pub fn report(store: &dyn Store, req: &StatsRequest) -> AppResult<StatsReport> {
        let profile = store.profile_or_default()?;

        let (period, range) = match req.range {
            Some(r) => (DashboardPeriod::Custom, r),
            None => {
                let period = if req.four_weeks_view && req.period == DashboardPeriod::Month {
                    DashboardPeriod::FourWeeks
                } else {
                    req.period
                };
                (period, date_range(period, req.today, profile.week_start))
            }
        };

        let ded = profile.average_deduction_percentage;
        let rate = profile.default_hourly_rate;
        let shifts = store.completed_shifts(Some(range))?;
        let stats = calculate_stats(&shifts, ded, rate);

        // the four-week view spans FourWeeks but keeps the month's targets
        let goal_period = match period {
            DashboardPeriod::FourWeeks if req.four_weeks_view => DashboardPeriod::Month,
            other => other,
        };
        let targets_cfg = UserTargets::from(&profile);
        let tips_goal = targets_cfg.tips_target(goal_period, req.four_weeks_view, req.today);
        let sales_goal = targets_cfg.sales_target(goal_period, req.four_weeks_view, req.today);
        let hours_goal = targets_cfg.hours_target(goal_period, req.four_weeks_view, req.today);
        let targets: Vec<TargetProgress> = [
            target_row("tips", stats.tips, tips_goal),
            target_row("sales", stats.sales, sales_goal),
            target_row("hours", stats.hours, hours_goal),
            target_row(
                "tip_percentage",
                stats.tip_percentage,
                targets_cfg.tip_target_percentage,
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        let comparison = if req.compare {
            let prev_range = previous_range(period, range);
            let prev_shifts = store.completed_shifts(Some(prev_range))?;
            let previous = calculate_stats(&prev_shifts, ded, rate);
            Some(Comparison {
                previous_range: prev_range,
                revenue_change: change_percentage(stats.total_revenue, previous.total_revenue),
                tips_change: change_percentage(stats.tips, previous.tips),
                hours_change: change_percentage(stats.hours, previous.hours),
                sales_change: change_percentage(stats.sales, previous.sales),
                previous,
            })
        } else {
            None
        };

        Ok(StatsReport {
            period,
            range,
            average_hourly: stats.average_hourly(),
            average_tips_per_shift: stats.average_tips_per_shift(),
            best_shift: best_shift(&shifts).cloned(),
            stats,
            targets,
            comparison,
        })
    }
}
