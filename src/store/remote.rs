//! Supabase-backed store. Every request is filtered on `user_id`; row level
//! security on the server enforces the same rule.

use super::{
    AchievementRepository, AlertRepository, EmployerRepository, ProfileRepository,
    ShiftRepository, Store, SubscriptionRepository,
};
use crate::config::Config;
use crate::core::calculator::overlap;
use crate::core::calculator::period::DateRange;
use crate::db::queries::date_str;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Achievement, Alert, Employer, ExpectedShift, ShiftEntry, ShiftStatus, UserProfile,
    UserSubscription,
};
use crate::remote::{PostgrestClient, Query};
use chrono::{Days, Utc};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

const EMPLOYERS: &str = "employers";
const SHIFTS: &str = "expected_shifts";
const ENTRIES: &str = "shift_entries";
const PROFILES: &str = "users_profile";
const ALERTS: &str = "alerts";
const ACHIEVEMENTS: &str = "achievements";
const SUBSCRIPTIONS: &str = "user_subscriptions";

pub struct RemoteStore {
    client: PostgrestClient,
    user_id: Uuid,
}

impl RemoteStore {
    pub fn from_config(cfg: &Config, user_id: Uuid) -> AppResult<Self> {
        let problems = cfg.remote_problems();
        if !problems.is_empty() {
            return Err(AppError::Config(format!(
                "remote backend is not configured: {}",
                problems.join(", ")
            )));
        }
        let client = PostgrestClient::new(
            &cfg.supabase_url,
            &cfg.supabase_anon_key,
            cfg.access_token.clone(),
        )?;
        tracing::debug!(url = %cfg.supabase_url, %user_id, "remote store ready");
        Ok(Self { client, user_id })
    }

    fn mine(&self) -> Query {
        Query::new().select("*").eq("user_id", self.user_id)
    }

    fn by_id(&self, id: Uuid) -> Query {
        self.mine().eq("id", id)
    }

    fn one<R: DeserializeOwned>(&self, table: &str, query: Query) -> AppResult<Option<R>> {
        let rows: Vec<R> = self.client.select(table, &query.limit(1))?;
        Ok(rows.into_iter().next())
    }

    /// First row of a write response; Postgrest returns an empty list when
    /// the filter matched nothing.
    fn written<R>(rows: Vec<R>, entity: &'static str, id: Uuid) -> AppResult<R> {
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(entity, id))
    }

    fn ensure_owned(&self, owner: Uuid) -> AppResult<()> {
        if owner != self.user_id {
            return Err(AppError::Security(format!(
                "record belongs to another user ({owner})"
            )));
        }
        Ok(())
    }

    fn removed(rows: usize, entity: &'static str, id: Uuid) -> AppResult<()> {
        if rows == 0 {
            Err(AppError::not_found(entity, id))
        } else {
            Ok(())
        }
    }
}

impl EmployerRepository for RemoteStore {
    fn list_employers(&self, active_only: bool) -> AppResult<Vec<Employer>> {
        let mut q = self.mine().order("name", true);
        if active_only {
            q = q.eq("active", true);
        }
        self.client.select(EMPLOYERS, &q)
    }

    fn get_employer(&self, id: Uuid) -> AppResult<Option<Employer>> {
        self.one(EMPLOYERS, self.by_id(id))
    }

    fn create_employer(&self, employer: &Employer) -> AppResult<Employer> {
        self.ensure_owned(employer.user_id)?;
        employer.validate()?;
        let rows = self.client.insert(EMPLOYERS, employer)?;
        Self::written(rows, "Employer", employer.id)
    }

    fn update_employer(&self, employer: &Employer) -> AppResult<Employer> {
        self.ensure_owned(employer.user_id)?;
        employer.validate()?;
        let rows = self
            .client
            .update(EMPLOYERS, &self.by_id(employer.id), employer)?;
        Self::written(rows, "Employer", employer.id)
    }

    fn delete_employer(&self, id: Uuid) -> AppResult<()> {
        Self::removed(self.client.delete(EMPLOYERS, &self.by_id(id))?, "Employer", id)
    }
}

impl ShiftRepository for RemoteStore {
    fn list_expected_shifts(
        &self,
        range: Option<DateRange>,
        status: Option<ShiftStatus>,
    ) -> AppResult<Vec<ExpectedShift>> {
        let mut q = self.mine();
        if let Some(r) = range {
            q = q
                .gte("shift_date", date_str(r.start))
                .lte("shift_date", date_str(r.end));
        }
        if let Some(s) = status {
            q = q.eq("status", s);
        }
        q = q.order("shift_date", true).order("start_time", true);
        self.client.select(SHIFTS, &q)
    }

    fn get_expected_shift(&self, id: Uuid) -> AppResult<Option<ExpectedShift>> {
        self.one(SHIFTS, self.by_id(id))
    }

    fn create_expected_shift(&self, shift: &ExpectedShift) -> AppResult<ExpectedShift> {
        self.ensure_owned(shift.user_id)?;
        shift.validate()?;
        let rows = self.client.insert(SHIFTS, shift)?;
        Self::written(rows, "Shift", shift.id)
    }

    fn update_expected_shift(&self, shift: &ExpectedShift) -> AppResult<ExpectedShift> {
        self.ensure_owned(shift.user_id)?;
        shift.validate()?;
        let rows = self.client.update(SHIFTS, &self.by_id(shift.id), shift)?;
        Self::written(rows, "Shift", shift.id)
    }

    fn delete_expected_shift(&self, id: Uuid) -> AppResult<()> {
        // entries are removed first in case the FK has no cascade
        self.client
            .delete(ENTRIES, &self.mine().eq("shift_id", id))?;
        Self::removed(self.client.delete(SHIFTS, &self.by_id(id))?, "Shift", id)
    }

    /// Same-day neighbours are filtered server side; the candidate and
    /// missed shifts never come back.
    fn overlapping_shifts(&self, candidate: &ExpectedShift) -> AppResult<Vec<ExpectedShift>> {
        let date = candidate.shift_date;
        let q = self
            .mine()
            .gte(
                "shift_date",
                date_str(date.checked_sub_days(Days::new(1)).unwrap_or(date)),
            )
            .lte(
                "shift_date",
                date_str(date.checked_add_days(Days::new(1)).unwrap_or(date)),
            )
            .neq("id", candidate.id)
            .neq("status", ShiftStatus::Missed);
        let nearby: Vec<ExpectedShift> = self.client.select(SHIFTS, &q)?;
        Ok(overlap::find_overlaps(candidate, &nearby)
            .into_iter()
            .cloned()
            .collect())
    }

    fn list_shift_entries(&self, range: Option<DateRange>) -> AppResult<Vec<ShiftEntry>> {
        let Some(r) = range else {
            return self.client.select(ENTRIES, &self.mine());
        };
        let ids: Vec<Uuid> = self
            .list_expected_shifts(Some(r), None)?
            .into_iter()
            .map(|s| s.id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.client
            .select(ENTRIES, &self.mine().in_list("shift_id", &ids))
    }

    fn get_shift_entry(&self, id: Uuid) -> AppResult<Option<ShiftEntry>> {
        self.one(ENTRIES, self.by_id(id))
    }

    fn get_entry_for_shift(&self, shift_id: Uuid) -> AppResult<Option<ShiftEntry>> {
        self.one(ENTRIES, self.mine().eq("shift_id", shift_id))
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
        let rows = self.client.insert(ENTRIES, entry)?;
        Self::written(rows, "Entry", entry.id)
    }

    fn update_shift_entry(&self, entry: &ShiftEntry) -> AppResult<ShiftEntry> {
        self.ensure_owned(entry.user_id)?;
        entry.validate()?;
        let rows = self.client.update(ENTRIES, &self.by_id(entry.id), entry)?;
        Self::written(rows, "Entry", entry.id)
    }

    fn delete_shift_entry(&self, id: Uuid) -> AppResult<()> {
        Self::removed(self.client.delete(ENTRIES, &self.by_id(id))?, "Entry", id)
    }
}

impl ProfileRepository for RemoteStore {
    fn get_profile(&self) -> AppResult<Option<UserProfile>> {
        self.one(PROFILES, self.mine())
    }

    fn upsert_profile(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        self.ensure_owned(profile.user_id)?;
        profile.validate()?;
        let mut stored = profile.clone();
        stored.updated_at = Some(Utc::now());
        let rows = self.client.upsert(PROFILES, "user_id", &stored)?;
        Self::written(rows, "Profile", profile.user_id)
    }
}

impl AlertRepository for RemoteStore {
    fn list_alerts(&self, unread_only: bool) -> AppResult<Vec<Alert>> {
        let mut q = self.mine();
        if unread_only {
            q = q.eq("is_read", false);
        }
        self.client.select(ALERTS, &q.order("created_at", false))
    }

    fn create_alert(&self, alert: &Alert) -> AppResult<Alert> {
        self.ensure_owned(alert.user_id)?;
        let rows = self.client.insert(ALERTS, alert)?;
        Self::written(rows, "Alert", alert.id)
    }

    fn mark_alert_read(&self, id: Uuid) -> AppResult<()> {
        let patch = json!({ "is_read": true, "read_at": Utc::now() });
        let rows: Vec<Alert> = self.client.update(ALERTS, &self.by_id(id), &patch)?;
        Self::written(rows, "Alert", id).map(|_| ())
    }

    fn mark_all_alerts_read(&self) -> AppResult<usize> {
        let patch = json!({ "is_read": true, "read_at": Utc::now() });
        let rows: Vec<Alert> =
            self.client
                .update(ALERTS, &self.mine().eq("is_read", false), &patch)?;
        Ok(rows.len())
    }

    fn delete_alert(&self, id: Uuid) -> AppResult<()> {
        Self::removed(self.client.delete(ALERTS, &self.by_id(id))?, "Alert", id)
    }

    fn delete_alerts_older_than(&self, days: u32) -> AppResult<usize> {
        let Some(cutoff) = super::purge_cutoff(Utc::now(), days) else {
            return Ok(0);
        };
        self.client
            .delete(ALERTS, &self.mine().lt("created_at", cutoff.to_rfc3339()))
    }
}

impl AchievementRepository for RemoteStore {
    fn list_achievements(&self) -> AppResult<Vec<Achievement>> {
        self.client
            .select(ACHIEVEMENTS, &self.mine().order("unlocked_at", true))
    }

    fn unlock_achievement(&self, achievement: &Achievement) -> AppResult<Achievement> {
        self.ensure_owned(achievement.user_id)?;
        let existing: Option<Achievement> = self.one(
            ACHIEVEMENTS,
            self.mine()
                .eq("achievement_type", achievement.achievement_type.as_str()),
        )?;
        if let Some(found) = existing {
            return Ok(found);
        }
        let rows = self.client.insert(ACHIEVEMENTS, achievement)?;
        Self::written(rows, "Achievement", achievement.id)
    }
}

impl SubscriptionRepository for RemoteStore {
    fn current_subscription(&self) -> AppResult<Option<UserSubscription>> {
        self.one(SUBSCRIPTIONS, self.mine().order("purchase_date", false))
    }

    fn upsert_subscription(&self, s: &UserSubscription) -> AppResult<UserSubscription> {
        self.ensure_owned(s.user_id)?;
        s.validate()?;
        let mut stored = s.clone();
        stored.updated_at = Some(Utc::now());
        let rows = self.client.upsert(SUBSCRIPTIONS, "id", &stored)?;
        Self::written(rows, "Subscription", s.id)
    }
}

impl Store for RemoteStore {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// The server keeps no audit table; the line goes to the tracing output.
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        tracing::info!(operation, target, message, "audit");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;

    #[test]
    fn incomplete_config_is_rejected_before_any_request() {
        let cfg = Config {
            backend: Backend::Remote,
            supabase_url: "abc.supabase.co".into(),
            ..Config::default()
        };
        match RemoteStore::from_config(&cfg, Uuid::new_v4()) {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains("supabase_anon_key"));
                assert!(msg.contains("user_id"));
            }
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("store should not open"),
        }
    }

    #[test]
    fn foreign_records_never_reach_the_server() {
        let id = Uuid::new_v4();
        let cfg = Config {
            backend: Backend::Remote,
            supabase_url: "localhost:1".into(),
            supabase_anon_key: "anon".into(),
            user_id: id.to_string(),
            ..Config::default()
        };
        let store = RemoteStore::from_config(&cfg, id).unwrap();
        let foreign = Employer::new(Uuid::new_v4(), "Elsewhere", 10.0).unwrap();
        assert!(matches!(
            store.create_employer(&foreign),
            Err(AppError::Security(_))
        ));

        let pairs = store.by_id(foreign.id).pairs();
        assert_eq!(pairs[0], ("select".to_string(), "*".to_string()));
        assert_eq!(pairs[1], ("user_id".to_string(), format!("eq.{id}")));
    }
}
