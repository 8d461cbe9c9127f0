//! In-app notifications derived from the shift history.

use crate::core::achievements::AchievementLogic;
use crate::core::calculator::dashboard::calculate_stats;
use crate::core::calculator::period::DateRange;
use crate::core::calculator::targets::UserTargets;
use crate::errors::AppResult;
use crate::models::{Alert, AlertType, ShiftStatus};
use crate::store::Store;
use chrono::{Days, NaiveDate};
use serde_json::json;
use std::collections::HashSet;
use uuid::Uuid;

/// Identity of an alert for de-duplication, kept in `data.key`.
fn alert_key(alert: &Alert) -> Option<String> {
    alert
        .data
        .as_ref()
        .and_then(|d| d.get("key"))
        .and_then(|k| k.as_str())
        .map(str::to_string)
}

pub struct AlertLogic;

impl AlertLogic {
    /// Alerts that should exist for `today`, before de-duplication.
    pub fn pending(store: &dyn Store, today: NaiveDate) -> AppResult<Vec<Alert>> {
        let user = store.user_id();
        let mut out = Vec::new();

        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let day = DateRange::new(yesterday, yesterday);
        let shifts = store.completed_shifts(Some(day))?;

        if shifts.is_empty() {
            out.push(
                Alert::new(
                    user,
                    AlertType::MissingShift,
                    "No shift yesterday",
                    &format!("Nothing was logged for {yesterday}. Did you work?"),
                )
                .with_action("entry quick")
                .with_data(json!({ "key": format!("missing_shift:{yesterday}"), "date": yesterday })),
            );
        }
        for s in shifts
            .iter()
            .filter(|s| s.shift_entry.is_none() && s.expected_shift.status == ShiftStatus::Planned)
        {
            let shift = &s.expected_shift;
            out.push(
                Alert::new(
                    user,
                    AlertType::IncompleteShift,
                    "Shift without entry",
                    &format!(
                        "Your shift on {} ({}) has no earnings recorded.",
                        shift.shift_date,
                        shift.time_range()
                    ),
                )
                .with_action("entry add")
                .with_data(json!({
                    "key": format!("incomplete_shift:{}", shift.id),
                    "shift_id": shift.id,
                    "date": shift.shift_date,
                })),
            );
        }

        let profile = store.profile_or_default()?;
        let targets = UserTargets::from(&profile);
        let todays = store.completed_shifts(Some(DateRange::new(today, today)))?;
        let stats = calculate_stats(
            &todays,
            profile.average_deduction_percentage,
            profile.default_hourly_rate,
        );
        for (name, value, target) in [
            ("tips", stats.tips, targets.daily_tips),
            ("sales", stats.sales, targets.daily_sales),
            ("hours", stats.hours, targets.daily_hours),
        ] {
            if target > 0.0 && value >= target {
                out.push(
                    Alert::new(
                        user,
                        AlertType::TargetAchieved,
                        "Daily target reached",
                        &format!("You reached your daily {name} target ({value:.2} / {target:.2})."),
                    )
                    .with_data(json!({
                        "key": format!("target_achieved:{today}:{name}"),
                        "target": name,
                        "value": value,
                    })),
                );
            }
        }
        Ok(out)
    }

    /// Create the pending alerts not raised yet, plus one per newly
    /// unlocked achievement. Returns what was created.
    pub fn check(store: &dyn Store, today: NaiveDate) -> AppResult<Vec<Alert>> {
        let known: HashSet<String> = store
            .list_alerts(false)?
            .iter()
            .filter_map(alert_key)
            .collect();

        let mut candidates = Self::pending(store, today)?;
        for a in AchievementLogic::check(store, today)? {
            let kind = a.achievement_type;
            candidates.push(
                Alert::new(
                    store.user_id(),
                    AlertType::AchievementUnlocked,
                    &format!("Achievement unlocked: {}", kind.display_name()),
                    kind.description(),
                )
                .with_data(json!({ "key": format!("achievement:{}", kind.as_str()) })),
            );
        }

        let mut created = Vec::new();
        for alert in candidates {
            if alert_key(&alert).is_some_and(|k| known.contains(&k)) {
                continue;
            }
            created.push(store.create_alert(&alert)?);
        }
        if !created.is_empty() {
            store.audit(
                "alerts_check",
                &today.to_string(),
                &format!("{} alert(s) raised", created.len()),
            )?;
        }
        Ok(created)
    }

    pub fn read(store: &dyn Store, id: Option<Uuid>) -> AppResult<usize> {
        match id {
            Some(id) => store.mark_alert_read(id).map(|_| 1),
            None => store.mark_all_alerts_read(),
        }
    }

    pub fn clear(store: &dyn Store, id: Uuid) -> AppResult<()> {
        store.delete_alert(id)?;
        store.audit("alert_delete", &id.to_string(), "Alert deleted")
    }

    pub fn purge(store: &dyn Store, days: u32) -> AppResult<usize> {
        let removed = store.delete_alerts_older_than(days)?;
        store.audit(
            "alerts_purge",
            &format!("{days}d"),
            &format!("{removed} alert(s) removed"),
        )?;
        Ok(removed)
    }
}
