//! Achievement rules evaluated over the worked shifts.

use super::dashboard::calculate_stats;
use super::period::{DashboardPeriod, date_range};
use super::targets::UserTargets;
use crate::models::{AchievementType, CompletedShift};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet, HashSet};

const TIP_MASTER_PCT: f64 = 20.0;
const ELITE_SERVER_PCT: f64 = 25.0;
const TIP_CHAMPION_PCT: f64 = 30.0;
const HIGH_EARNER_RATE: f64 = 30.0;
const TOP_PERFORMER_RATE: f64 = 50.0;
const SALES_STAR_AMOUNT: f64 = 1000.0;
const TARGET_CRUSHER_FACTOR: f64 = 1.5;

pub struct AchievementInput<'a> {
    pub shifts: &'a [CompletedShift],
    pub targets: &'a UserTargets,
    pub today: NaiveDate,
    pub week_start: u32,
    pub average_deduction_percentage: f64,
    pub default_hourly_rate: f64,
}

/// Average of the per-shift tip percentages, counting only shifts with
/// both tips and sales.
pub fn average_tip_percentage(shifts: &[CompletedShift]) -> Option<f64> {
    let pcts: Vec<f64> = shifts
        .iter()
        .filter(|s| s.is_worked() && s.tips() > 0.0 && s.sales() > 0.0)
        .map(CompletedShift::tip_percentage)
        .collect();
    average(&pcts)
}

/// Average of the per-shift effective hourly rates for shifts with hours.
pub fn average_hourly_rate(shifts: &[CompletedShift]) -> Option<f64> {
    let rates: Vec<f64> = shifts
        .iter()
        .filter(|s| s.is_worked() && s.hours() > 0.0)
        .map(CompletedShift::effective_hourly_rate)
        .collect();
    average(&rates)
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Longest run of consecutive calendar days with at least one worked shift.
pub fn longest_streak(shifts: &[CompletedShift]) -> u32 {
    let days: BTreeSet<NaiveDate> = shifts
        .iter()
        .filter(|s| s.is_worked())
        .map(CompletedShift::shift_date)
        .collect();

    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for day in days {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}

/// A day where a non-zero daily target was beaten by at least 50%.
fn crushed_daily_target(shifts: &[CompletedShift], targets: &UserTargets) -> Option<NaiveDate> {
    let mut per_day: BTreeMap<NaiveDate, (f64, f64, f64)> = BTreeMap::new();
    for s in shifts.iter().filter(|s| s.is_worked()) {
        let day = per_day.entry(s.shift_date()).or_default();
        day.0 += s.tips();
        day.1 += s.sales();
        day.2 += s.hours();
    }
    let beats = |value: f64, target: f64| target > 0.0 && value >= target * TARGET_CRUSHER_FACTOR;
    per_day
        .into_iter()
        .find(|(_, (tips, sales, hours))| {
            beats(*tips, targets.daily_tips)
                || beats(*sales, targets.daily_sales)
                || beats(*hours, targets.daily_hours)
        })
        .map(|(day, _)| day)
}

/// Every non-zero target of the period met, with at least one target set.
fn all_targets_met(input: &AchievementInput<'_>, period: DashboardPeriod) -> bool {
    let range = date_range(period, input.today, input.week_start);
    let in_range: Vec<CompletedShift> = input
        .shifts
        .iter()
        .filter(|s| range.contains(s.shift_date()))
        .cloned()
        .collect();
    let stats = calculate_stats(
        &in_range,
        input.average_deduction_percentage,
        input.default_hourly_rate,
    );

    let checks = [
        (stats.tips, input.targets.tips_target(period, false, input.today)),
        (stats.sales, input.targets.sales_target(period, false, input.today)),
        (stats.hours, input.targets.hours_target(period, false, input.today)),
    ];
    let set: Vec<_> = checks.iter().filter(|(_, t)| *t > 0.0).collect();
    !set.is_empty() && set.iter().all(|(value, target)| value >= target)
}

/// Achievements whose rule is met now and which are not unlocked yet.
/// Each carries the figure that earned it.
pub fn evaluate(
    input: &AchievementInput<'_>,
    unlocked: &HashSet<AchievementType>,
) -> Vec<(AchievementType, Value)> {
    let mut out = Vec::new();
    let mut push = |kind: AchievementType, data: Value| {
        if !unlocked.contains(&kind) {
            out.push((kind, data));
        }
    };

    if let Some(avg) = average_tip_percentage(input.shifts) {
        for (kind, min) in [
            (AchievementType::TipMaster, TIP_MASTER_PCT),
            (AchievementType::EliteServer, ELITE_SERVER_PCT),
            (AchievementType::TipChampion, TIP_CHAMPION_PCT),
        ] {
            if avg >= min {
                push(kind, json!({ "average_tip_percentage": avg }));
            }
        }
    }

    let streak = longest_streak(input.shifts);
    for (kind, days) in [
        (AchievementType::SteadyTracker, 7),
        (AchievementType::DedicatedLogger, 30),
        (AchievementType::TrackingLegend, 100),
    ] {
        if streak >= days {
            push(kind, json!({ "streak_days": streak }));
        }
    }

    if let Some(rate) = average_hourly_rate(input.shifts) {
        for (kind, min) in [
            (AchievementType::HighEarner, HIGH_EARNER_RATE),
            (AchievementType::TopPerformer, TOP_PERFORMER_RATE),
        ] {
            if rate >= min {
                push(kind, json!({ "average_hourly_rate": rate }));
            }
        }
    }

    if let Some(best) = input
        .shifts
        .iter()
        .filter(|s| s.sales() >= SALES_STAR_AMOUNT)
        .max_by(|a, b| a.sales().total_cmp(&b.sales()))
    {
        push(
            AchievementType::SalesStar,
            json!({ "sales": best.sales(), "shift_date": best.shift_date() }),
        );
    }

    if let Some(day) = crushed_daily_target(input.shifts, input.targets) {
        push(AchievementType::TargetCrusher, json!({ "date": day }));
    }

    if all_targets_met(input, DashboardPeriod::Week) {
        push(AchievementType::GoalGetter, json!({ "week_of": input.today }));
    }
    if all_targets_met(input, DashboardPeriod::Month) {
        push(AchievementType::PerfectMonth, json!({ "month_of": input.today }));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift_entry::Earnings;
    use crate::models::{ExpectedShift, ShiftEntry};
    use chrono::{Days, NaiveTime};
    use uuid::Uuid;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .checked_add_days(Days::new(n))
            .unwrap()
    }

    fn worked(date: NaiveDate, hours: f64, tips: f64, sales: f64) -> CompletedShift {
        let user = Uuid::new_v4();
        let start = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        let shift = ExpectedShift::plan(user, None, date, start, end, 15.0, 0).unwrap();
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

    fn input<'a>(shifts: &'a [CompletedShift], targets: &'a UserTargets) -> AchievementInput<'a> {
        AchievementInput {
            shifts,
            targets,
            today: day(6),
            week_start: 0,
            average_deduction_percentage: 30.0,
            default_hourly_rate: 15.0,
        }
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut shifts: Vec<_> = (0..7).map(|n| worked(day(n), 8.0, 10.0, 100.0)).collect();
        assert_eq!(longest_streak(&shifts), 7);
        shifts.remove(3);
        assert_eq!(longest_streak(&shifts), 3);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn tip_and_streak_badges() {
        let shifts: Vec<_> = (0..7).map(|n| worked(day(n), 8.0, 52.0, 200.0)).collect();
        let targets = UserTargets::default();
        let found: Vec<_> = evaluate(&input(&shifts, &targets), &HashSet::new())
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert!(found.contains(&AchievementType::TipMaster));
        assert!(found.contains(&AchievementType::EliteServer));
        assert!(!found.contains(&AchievementType::TipChampion));
        assert!(found.contains(&AchievementType::SteadyTracker));
        assert!(!found.contains(&AchievementType::DedicatedLogger));
        // no targets set
        assert!(!found.contains(&AchievementType::GoalGetter));
    }

    #[test]
    fn already_unlocked_is_not_repeated() {
        let shifts = vec![worked(day(0), 8.0, 0.0, 1200.0)];
        let targets = UserTargets::default();
        let unlocked = HashSet::from([AchievementType::SalesStar]);
        let found = evaluate(&input(&shifts, &targets), &unlocked);
        assert!(found.iter().all(|(k, _)| *k != AchievementType::SalesStar));
    }

    #[test]
    fn hourly_and_target_badges() {
        // 8h at 15 + 200 tips = 320 → 40/h
        let shifts = vec![worked(day(6), 8.0, 200.0, 900.0)];
        let targets = UserTargets {
            daily_tips: 100.0,
            weekly_tips: 150.0,
            ..Default::default()
        };
        let found: Vec<_> = evaluate(&input(&shifts, &targets), &HashSet::new())
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert!(found.contains(&AchievementType::HighEarner));
        assert!(!found.contains(&AchievementType::TopPerformer));
        assert!(found.contains(&AchievementType::TargetCrusher));
        assert!(found.contains(&AchievementType::GoalGetter));
        assert!(!found.contains(&AchievementType::SalesStar));
    }
}
