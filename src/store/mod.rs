//! Repository traits over the ProTip365 tables.
//!
//! Every store is scoped to one user. `LocalStore` keeps the tables in a
//! SQLite file, `RemoteStore` talks to the Supabase Postgrest API.

pub mod local;
pub mod remote;

use crate::config::{Backend, Config};
use crate::core::calculator::overlap;
use crate::core::calculator::period::DateRange;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Achievement, Alert, CompletedShift, Employer, ExpectedShift, ShiftEntry, ShiftStatus,
    UserProfile, UserSubscription,
};
use chrono::{DateTime, Days, TimeDelta, Utc};
use std::collections::HashMap;
use uuid::Uuid;

pub use local::LocalStore;
pub use remote::RemoteStore;

pub trait EmployerRepository {
    fn list_employers(&self, active_only: bool) -> AppResult<Vec<Employer>>;
    fn get_employer(&self, id: Uuid) -> AppResult<Option<Employer>>;
    fn create_employer(&self, employer: &Employer) -> AppResult<Employer>;
    fn update_employer(&self, employer: &Employer) -> AppResult<Employer>;
    fn delete_employer(&self, id: Uuid) -> AppResult<()>;

    fn set_employer_active(&self, id: Uuid, active: bool) -> AppResult<Employer> {
        let mut employer = self
            .get_employer(id)?
            .ok_or_else(|| AppError::not_found("Employer", id))?;
        employer.active = active;
        self.update_employer(&employer)
    }
}

pub trait ShiftRepository {
    /// Planned shifts ordered by date and start time.
    fn list_expected_shifts(
        &self,
        range: Option<DateRange>,
        status: Option<ShiftStatus>,
    ) -> AppResult<Vec<ExpectedShift>>;
    fn get_expected_shift(&self, id: Uuid) -> AppResult<Option<ExpectedShift>>;
    fn create_expected_shift(&self, shift: &ExpectedShift) -> AppResult<ExpectedShift>;
    fn update_expected_shift(&self, shift: &ExpectedShift) -> AppResult<ExpectedShift>;
    /// Removes the shift and its entry.
    fn delete_expected_shift(&self, id: Uuid) -> AppResult<()>;

    /// Entries whose shift falls inside `range` (all entries when `None`).
    fn list_shift_entries(&self, range: Option<DateRange>) -> AppResult<Vec<ShiftEntry>>;
    fn get_shift_entry(&self, id: Uuid) -> AppResult<Option<ShiftEntry>>;
    fn get_entry_for_shift(&self, shift_id: Uuid) -> AppResult<Option<ShiftEntry>>;
    fn create_shift_entry(&self, entry: &ShiftEntry) -> AppResult<ShiftEntry>;
    fn update_shift_entry(&self, entry: &ShiftEntry) -> AppResult<ShiftEntry>;
    fn delete_shift_entry(&self, id: Uuid) -> AppResult<()>;

    fn set_shift_status(&self, id: Uuid, status: ShiftStatus) -> AppResult<ExpectedShift> {
        let mut shift = self
            .get_expected_shift(id)?
            .ok_or_else(|| AppError::not_found("Shift", id))?;
        shift.status = status;
        shift.updated_at = Some(Utc::now());
        self.update_expected_shift(&shift)
    }

    /// Stored shifts the candidate would overlap. The day before is loaded
    /// too so overnight shifts are seen.
    fn overlapping_shifts(&self, candidate: &ExpectedShift) -> AppResult<Vec<ExpectedShift>> {
        let date = candidate.shift_date;
        let range = DateRange::new(
            date.checked_sub_days(Days::new(1)).unwrap_or(date),
            date.checked_add_days(Days::new(1)).unwrap_or(date),
        );
        let nearby = self.list_expected_shifts(Some(range), None)?;
        Ok(overlap::find_overlaps(candidate, &nearby)
            .into_iter()
            .cloned()
            .collect())
    }
}

pub trait ProfileRepository {
    fn get_profile(&self) -> AppResult<Option<UserProfile>>;
    fn upsert_profile(&self, profile: &UserProfile) -> AppResult<UserProfile>;
}

pub trait AlertRepository {
    /// Newest first.
    fn list_alerts(&self, unread_only: bool) -> AppResult<Vec<Alert>>;
    fn create_alert(&self, alert: &Alert) -> AppResult<Alert>;
    fn mark_alert_read(&self, id: Uuid) -> AppResult<()>;
    fn mark_all_alerts_read(&self) -> AppResult<usize>;
    fn delete_alert(&self, id: Uuid) -> AppResult<()>;
    fn delete_alerts_older_than(&self, days: u32) -> AppResult<usize>;

    fn unread_alert_count(&self) -> AppResult<usize> {
        Ok(self.list_alerts(true)?.len())
    }
}

pub trait AchievementRepository {
    fn list_achievements(&self) -> AppResult<Vec<Achievement>>;
    fn unlock_achievement(&self, achievement: &Achievement) -> AppResult<Achievement>;
}

pub trait SubscriptionRepository {
    fn current_subscription(&self) -> AppResult<Option<UserSubscription>>;
    fn upsert_subscription(&self, subscription: &UserSubscription) -> AppResult<UserSubscription>;
}

pub trait Store:
    EmployerRepository
    + ShiftRepository
    + ProfileRepository
    + AlertRepository
    + AchievementRepository
    + SubscriptionRepository
{
    fn backend_name(&self) -> &'static str;

    fn user_id(&self) -> Uuid;

    /// Record a mutating operation in the audit trail.
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    /// Stored profile, or the defaults when none was saved yet.
    fn profile_or_default(&self) -> AppResult<UserProfile> {
        Ok(self
            .get_profile()?
            .unwrap_or_else(|| UserProfile::new(self.user_id())))
    }

    /// Shifts of the range joined with their entry and employer.
    fn completed_shifts(&self, range: Option<DateRange>) -> AppResult<Vec<CompletedShift>> {
        let shifts = self.list_expected_shifts(range, None)?;
        let mut entries: HashMap<Uuid, ShiftEntry> = self
            .list_shift_entries(range)?
            .into_iter()
            .map(|e| (e.shift_id, e))
            .collect();
        let employers: HashMap<Uuid, Employer> = self
            .list_employers(false)?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        Ok(shifts
            .into_iter()
            .map(|s| {
                let entry = entries.remove(&s.id);
                let employer = s.employer_id.and_then(|id| employers.get(&id).cloned());
                CompletedShift::new(s, entry, employer)
            })
            .collect())
    }
}

/// Creation cutoff for purging alerts older than `days`. `None` when the
/// cutoff predates the earliest representable instant: nothing is that old.
pub(crate) fn purge_cutoff(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(i64::from(days)).and_then(|age| now.checked_sub_signed(age))
}

/// Open the store selected by the configuration.
pub fn open(cfg: &Config) -> AppResult<Box<dyn Store>> {
    let user_id = cfg.user_uuid()?;
    match cfg.backend {
        Backend::Local => Ok(Box::new(LocalStore::open(&cfg.database, user_id)?)),
        Backend::Remote => Ok(Box::new(RemoteStore::from_config(cfg, user_id)?)),
    }
}
