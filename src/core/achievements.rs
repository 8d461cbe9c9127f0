use crate::core::calculator::achievements::{AchievementInput, evaluate};
use crate::core::calculator::targets::UserTargets;
use crate::errors::AppResult;
use crate::models::{Achievement, AchievementType};
use crate::store::Store;
use chrono::NaiveDate;
use std::collections::HashSet;

pub struct AchievementLogic;

impl AchievementLogic {
    /// Unlock every achievement whose rule is met; returns the new ones.
    pub fn check(store: &dyn Store, today: NaiveDate) -> AppResult<Vec<Achievement>> {
        let profile = store.profile_or_default()?;
        let shifts = store.completed_shifts(None)?;
        let targets = UserTargets::from(&profile);
        let unlocked: HashSet<AchievementType> = store
            .list_achievements()?
            .into_iter()
            .map(|a| a.achievement_type)
            .collect();

        let input = AchievementInput {
            shifts: &shifts,
            targets: &targets,
            today,
            week_start: profile.week_start,
            average_deduction_percentage: profile.average_deduction_percentage,
            default_hourly_rate: profile.default_hourly_rate,
        };

        let mut out = Vec::new();
        for (kind, data) in evaluate(&input, &unlocked) {
            let stored =
                store.unlock_achievement(&Achievement::unlock(store.user_id(), kind, Some(data)))?;
            store.audit(
                "achievement",
                kind.as_str(),
                &format!("Unlocked {}", kind.display_name()),
            )?;
            out.push(stored);
        }
        Ok(out)
    }

    /// Every achievement type with its unlock record, if any.
    pub fn list(store: &dyn Store) -> AppResult<Vec<(AchievementType, Option<Achievement>)>> {
        let mut unlocked = store.list_achievements()?;
        Ok(AchievementType::ALL
            .into_iter()
            .map(|kind| {
                let found = unlocked
                    .iter()
                    .position(|a| a.achievement_type == kind)
                    .map(|i| unlocked.swap_remove(i));
                (kind, found)
            })
            .collect())
    }
}
