//! SQLite-backed store (the default backend).

use super::{
    AchievementRepository, AlertRepository, EmployerRepository, ProfileRepository,
    ShiftRepository, Store, SubscriptionRepository,
};
use crate::core::calculator::period::DateRange;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    achievements, alerts, employers, entries, profile, shifts, subscriptions,
};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Achievement, Alert, Employer, ExpectedShift, ShiftEntry, ShiftStatus, UserProfile,
    UserSubscription,
};
use chrono::Utc;
use uuid::Uuid;

pub struct LocalStore {
    pool: DbPool,
    user_id: Uuid,
}

impl LocalStore {
    /// Open (creating if needed) the database file and bring its schema up to date.
    pub fn open(path: &str, user_id: Uuid) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        tracing::debug!(path, %user_id, "local store opened");
        Ok(Self { pool, user_id })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn ensure_owned(&self, owner: Uuid) -> AppResult<()> {
        if owner != self.user_id {
            return Err(AppError::Security(format!(
                "record belongs to another user ({owner})"
            )));
        }
        Ok(())
    }
}

fn changed_or_not_found(rows: usize, entity: &'static str, id: Uuid) -> AppResult<()> {
    if rows == 0 {
        Err(AppError::not_found(entity, id))
    } else {
        Ok(())
    }
}

impl EmployerRepository for LocalStore {
    fn list_employers(&self, active_only: bool) -> AppResult<Vec<Employer>> {
        employers::list(&self.pool.conn, self.user_id, active_only)
    }

    fn get_employer(&self, id: Uuid) -> AppResult<Option<Employer>> {
        employers::get(&self.pool.conn, self.user_id, id)
    }

    fn create_employer(&self, employer: &Employer) -> AppResult<Employer> {
        self.ensure_owned(employer.user_id)?;
        employer.validate()?;
        employers::insert(&self.pool.conn, employer)?;
        Ok(employer.clone())
    }

    fn update_employer(&self, employer: &Employer) -> AppResult<Employer> {
        self.ensure_owned(employer.user_id)?;
        employer.validate()?;
        let rows = employers::update(&self.pool.conn, employer)?;
        changed_or_not_found(rows, "Employer", employer.id)?;
        Ok(employer.clone())
    }

    fn delete_employer(&self, id: Uuid) -> AppResult<()> {
        let rows = employers::delete(&self.pool.conn, self.user_id, id)?;
        changed_or_not_found(rows, "Employer", id)
    }
}

impl ShiftRepository for LocalStore {
    fn list_expected_shifts(
        &self,
        range: Option<DateRange>,
        status: Option<ShiftStatus>,
    ) -> AppResult<Vec<ExpectedShift>> {
        shifts::list(&self.pool.conn, self.user_id, range, status)
    }

    fn get_expected_shift(&self, id: Uuid) -> AppResult<Option<ExpectedShift>> {
        shifts::get(&self.pool.conn, self.user_id, id)
    }

    fn create_expected_shift(&self, shift: &ExpectedShift) -> AppResult<ExpectedShift> {
        self.ensure_owned(shift.user_id)?;
        shift.validate()?;
        shifts::insert(&self.pool.conn, shift)?;
        Ok(shift.clone())
    }

    fn update_expected_shift(&self, shift: &ExpectedShift) -> AppResult<ExpectedShift> {
        self.ensure_owned(shift.user_id)?;
        shift.validate()?;
        let rows = shifts::update(&self.pool.conn, shift)?;
        changed_or_not_found(rows, "Shift", shift.id)?;
        Ok(shift.clone())
    }

    fn delete_expected_shift(&self, id: Uuid) -> AppResult<()> {
        let rows = shifts::delete(&self.pool.conn, self.user_id, id)?;
        changed_or_not_found(rows, "Shift", id)
    }

    fn list_shift_entries(&self, range: Option<DateRange>) -> AppResult<Vec<ShiftEntry>> {
        entries::list(&self.pool.conn, self.user_id, range)
    }

    fn get_shift_entry(&self, id: Uuid) -> AppResult<Option<ShiftEntry>> {
        entries::get(&self.pool.conn, self.user_id, id)
    }

    fn get_entry_for_shift(&self, shift_id: Uuid) -> AppResult<Option<ShiftEntry>> {
        entries::get_for_shift(&self.pool.conn, self.user_id, shift_id)
    }

    fn create_shift_entry(&self, entry: &ShiftEntry) -> AppResult<ShiftEntry> {
        self.ensure_owned(entry.user_id)?;
        entry.validate()?;
        if self.get_expected_shift(entry.shift_id)?.is_none() {
            return Err(AppError::not_found("Shift", entry.shift_id));
        }
        if self.get_entry_for_shift(entry.shift_id)?.is_some() {
            return Err(AppError::EntryExists(entry.shift_id.to_string()));
        }
        entries::insert(&self.pool.conn, entry)?;
        Ok(entry.clone())
    }

    fn update_shift_entry(&self, entry: &ShiftEntry) -> AppResult<ShiftEntry> {
        self.ensure_owned(entry.user_id)?;
        entry.validate()?;
        let rows = entries::update(&self.pool.conn, entry)?;
        changed_or_not_found(rows, "Entry", entry.id)?;
        Ok(entry.clone())
    }

    fn delete_shift_entry(&self, id: Uuid) -> AppResult<()> {
        let rows = entries::delete(&self.pool.conn, self.user_id, id)?;
        changed_or_not_found(rows, "Entry", id)
    }
}

impl ProfileRepository for LocalStore {
    fn get_profile(&self) -> AppResult<Option<UserProfile>> {
        profile::get(&self.pool.conn, self.user_id)
    }

    fn upsert_profile(&self, p: &UserProfile) -> AppResult<UserProfile> {
        self.ensure_owned(p.user_id)?;
        p.validate()?;
        let mut stored = p.clone();
        stored.updated_at = Some(Utc::now());
        profile::upsert(&self.pool.conn, &stored)?;
        Ok(stored)
    }
}

impl AlertRepository for LocalStore {
    fn list_alerts(&self, unread_only: bool) -> AppResult<Vec<Alert>> {
        alerts::list(&self.pool.conn, self.user_id, unread_only)
    }

    fn create_alert(&self, alert: &Alert) -> AppResult<Alert> {
        self.ensure_owned(alert.user_id)?;
        alerts::insert(&self.pool.conn, alert)?;
        Ok(alert.clone())
    }

    fn mark_alert_read(&self, id: Uuid) -> AppResult<()> {
        let rows = alerts::mark_read(&self.pool.conn, self.user_id, Some(id), Utc::now())?;
        changed_or_not_found(rows, "Alert", id)
    }

    fn mark_all_alerts_read(&self) -> AppResult<usize> {
        alerts::mark_read(&self.pool.conn, self.user_id, None, Utc::now())
    }

    fn delete_alert(&self, id: Uuid) -> AppResult<()> {
        let rows = alerts::delete(&self.pool.conn, self.user_id, id)?;
        changed_or_not_found(rows, "Alert", id)
    }

    fn delete_alerts_older_than(&self, days: u32) -> AppResult<usize> {
        let Some(cutoff) = super::purge_cutoff(Utc::now(), days) else {
            return Ok(0);
        };
        alerts::delete_created_before(&self.pool.conn, self.user_id, cutoff)
    }
}

impl AchievementRepository for LocalStore {
    fn list_achievements(&self) -> AppResult<Vec<Achievement>> {
        achievements::list(&self.pool.conn, self.user_id)
    }

    fn unlock_achievement(&self, achievement: &Achievement) -> AppResult<Achievement> {
        self.ensure_owned(achievement.user_id)?;
        if !achievements::insert(&self.pool.conn, achievement)? {
            tracing::debug!(
                kind = achievement.achievement_type.as_str(),
                "achievement already unlocked"
            );
        }
        achievements::list(&self.pool.conn, self.user_id)?
            .into_iter()
            .find(|a| a.achievement_type == achievement.achievement_type)
            .ok_or_else(|| AppError::not_found("Achievement", achievement.id))
    }
}

impl SubscriptionRepository for LocalStore {
    fn current_subscription(&self) -> AppResult<Option<UserSubscription>> {
        subscriptions::current(&self.pool.conn, self.user_id)
    }

    fn upsert_subscription(&self, s: &UserSubscription) -> AppResult<UserSubscription> {
        self.ensure_owned(s.user_id)?;
        s.validate()?;
        let mut stored = s.clone();
        stored.updated_at = Some(Utc::now());
        subscriptions::upsert(&self.pool.conn, &stored)?;
        Ok(stored)
    }
}

impl Store for LocalStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift_entry::Earnings;
    use crate::models::{AchievementType, AlertType};
    use chrono::{NaiveDate, NaiveTime};

    fn store() -> LocalStore {
        LocalStore::open(":memory:", Uuid::new_v4()).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn planned(s: &LocalStore, day: u32) -> ExpectedShift {
        let shift =
            ExpectedShift::plan(s.user_id(), None, d(day), t(10, 0), t(18, 0), 15.0, 0).unwrap();
        s.create_expected_shift(&shift).unwrap()
    }

    #[test]
    fn employer_crud_and_active_filter() {
        let s = store();
        let e = Employer::new(s.user_id(), "Bistro", 12.0).unwrap();
        s.create_employer(&e).unwrap();
        assert_eq!(s.list_employers(true).unwrap().len(), 1);

        s.set_employer_active(e.id, false).unwrap();
        assert!(s.list_employers(true).unwrap().is_empty());
        assert_eq!(s.list_employers(false).unwrap().len(), 1);

        s.delete_employer(e.id).unwrap();
        assert!(matches!(
            s.delete_employer(e.id),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn shifts_are_listed_by_range_and_status() {
        let s = store();
        planned(&s, 1);
        let second = planned(&s, 5);
        planned(&s, 20);

        let range = DateRange::new(d(1), d(7));
        assert_eq!(s.list_expected_shifts(Some(range), None).unwrap().len(), 2);

        s.set_shift_status(second.id, ShiftStatus::Missed).unwrap();
        let missed = s
            .list_expected_shifts(None, Some(ShiftStatus::Missed))
            .unwrap();
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].id, second.id);
    }

    #[test]
    fn one_entry_per_shift_and_cascade_on_delete() {
        let s = store();
        let shift = planned(&s, 3);
        let earnings = Earnings {
            sales: 500.0,
            tips: 100.0,
            cash_out: 10.0,
            other: 0.0,
        };
        let entry =
            ShiftEntry::record(shift.id, s.user_id(), t(10, 0), t(18, 0), 8.0, earnings).unwrap();
        s.create_shift_entry(&entry).unwrap();

        let again =
            ShiftEntry::record(shift.id, s.user_id(), t(10, 0), t(17, 0), 7.0, earnings).unwrap();
        assert!(matches!(
            s.create_shift_entry(&again),
            Err(AppError::EntryExists(_))
        ));

        s.delete_expected_shift(shift.id).unwrap();
        assert!(s.get_shift_entry(entry.id).unwrap().is_none());
    }

    #[test]
    fn records_of_other_users_are_rejected() {
        let s = store();
        let foreign = Employer::new(Uuid::new_v4(), "Elsewhere", 10.0).unwrap();
        assert!(matches!(
            s.create_employer(&foreign),
            Err(AppError::Security(_))
        ));
    }

    #[test]
    fn profile_defaults_then_upsert() {
        let s = store();
        assert!(s.get_profile().unwrap().is_none());
        let mut p = s.profile_or_default().unwrap();
        p.week_start = 1;
        p.target_sales_daily = 800.0;
        s.upsert_profile(&p).unwrap();

        p.target_sales_daily = 900.0;
        s.upsert_profile(&p).unwrap();
        let stored = s.get_profile().unwrap().unwrap();
        assert_eq!(stored.week_start, 1);
        assert_eq!(stored.target_sales_daily, 900.0);
    }

    #[test]
    fn alerts_read_and_cleanup() {
        let s = store();
        let a = Alert::new(s.user_id(), AlertType::MissingShift, "Missing", "Log it");
        let b = Alert::new(s.user_id(), AlertType::WeeklySummary, "Week", "Done");
        s.create_alert(&a).unwrap();
        s.create_alert(&b).unwrap();
        assert_eq!(s.unread_alert_count().unwrap(), 2);

        s.mark_alert_read(a.id).unwrap();
        assert_eq!(s.unread_alert_count().unwrap(), 1);
        assert_eq!(s.mark_all_alerts_read().unwrap(), 1);

        assert_eq!(s.delete_alerts_older_than(30).unwrap(), 0);
        assert_eq!(s.delete_alerts_older_than(0).unwrap(), 2);
    }

    #[test]
    fn achievements_unlock_once() {
        let s = store();
        let a = Achievement::unlock(s.user_id(), AchievementType::SalesStar, None);
        s.unlock_achievement(&a).unwrap();
        let again = Achievement::unlock(s.user_id(), AchievementType::SalesStar, None);
        s.unlock_achievement(&again).unwrap();
        assert_eq!(s.list_achievements().unwrap().len(), 1);
    }

    #[test]
    fn completed_shifts_join_entries() {
        let s = store();
        let worked = planned(&s, 2);
        planned(&s, 4);
        let entry = ShiftEntry::record(
            worked.id,
            s.user_id(),
            t(10, 0),
            t(18, 0),
            8.0,
            Earnings::default(),
        )
        .unwrap();
        s.create_shift_entry(&entry).unwrap();

        let joined = s.completed_shifts(None).unwrap();
        assert_eq!(joined.len(), 2);
        assert!(joined[0].shift_entry.is_some());
        assert!(joined[1].shift_entry.is_none());
    }

    #[test]
    fn audit_lines_land_in_the_log_table() {
        let s = store();
        s.audit("add_shift", "2025-03-01", "Planned").unwrap();
        let lines = crate::db::log::load_log(&s.pool().conn, Some(1)).unwrap();
        assert_eq!(lines[0].operation, "add_shift");
    }
}
