use crate::core::calculator::overlap::ensure_no_overlap;
use crate::core::calculator::period::DateRange;
use crate::core::subscription::SubscriptionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{CompletedShift, ExpectedShift, ShiftStatus, UserProfile};
use crate::store::Store;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

/// Input of `shift plan` (and of `entry quick`).
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub employer_id: Option<Uuid>,
    pub hourly_rate: Option<f64>,
    pub lunch_minutes: Option<i32>,
    pub sales_target: Option<f64>,
    pub alert_minutes: Option<i32>,
    pub notes: Option<String>,
}

/// Fields of `shift edit`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ShiftEdit {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub employer_id: Option<Uuid>,
    pub hourly_rate: Option<f64>,
    pub lunch_minutes: Option<i32>,
    pub sales_target: Option<f64>,
    pub alert_minutes: Option<i32>,
    pub notes: Option<String>,
}

pub struct ShiftLogic;

impl ShiftLogic {
    /// Explicit rate, then the employer's, then the profile default.
    pub(crate) fn resolve_rate(
        store: &dyn Store,
        profile: &UserProfile,
        employer_id: Option<Uuid>,
        explicit: Option<f64>,
    ) -> AppResult<f64> {
        if let Some(rate) = explicit {
            return Ok(rate);
        }
        if let Some(id) = employer_id {
            let employer = store
                .get_employer(id)?
                .ok_or_else(|| AppError::not_found("Employer", id))?;
            return Ok(employer.hourly_rate);
        }
        Ok(profile.default_hourly_rate)
    }

    pub fn plan(store: &dyn Store, req: PlanRequest) -> AppResult<ExpectedShift> {
        let (Some(date), Some(start), Some(end)) = (req.date, req.start, req.end) else {
            return Err(AppError::Validation(
                "A shift needs a date, a start time and an end time".into(),
            ));
        };

        let profile = store.profile_or_default()?;
        let employer_id = req.employer_id.or(profile.default_employer_id);
        let rate = Self::resolve_rate(store, &profile, employer_id, req.hourly_rate)?;

        let mut shift = ExpectedShift::plan(
            store.user_id(),
            employer_id,
            date,
            start,
            end,
            rate,
            req.lunch_minutes.unwrap_or(0),
        )?;
        shift.sales_target = req.sales_target;
        shift.alert_minutes = req.alert_minutes.or(profile.default_alert_minutes);
        shift.notes = req.notes.filter(|n| !n.trim().is_empty());
        shift.validate()?;

        SubscriptionLogic::ensure_can_add_shift(store, date)?;
        ensure_no_overlap(&shift, &store.overlapping_shifts(&shift)?)?;

        let created = store.create_expected_shift(&shift)?;
        store.audit(
            "shift_plan",
            &created.shift_date.to_string(),
            &format!("Planned {} ({:.2}h)", created.time_range(), created.expected_hours),
        )?;
        tracing::debug!(id = %created.id, "shift planned");
        Ok(created)
    }

    pub fn edit(store: &dyn Store, id: Uuid, edit: ShiftEdit) -> AppResult<ExpectedShift> {
        let mut shift = store
            .get_expected_shift(id)?
            .ok_or_else(|| AppError::not_found("Shift", id))?;

        let times_changed = edit.date.is_some()
            || edit.start.is_some()
            || edit.end.is_some()
            || edit.lunch_minutes.is_some();
        if times_changed {
            shift.reschedule(
                edit.date.unwrap_or(shift.shift_date),
                edit.start.unwrap_or(shift.start_time),
                edit.end.unwrap_or(shift.end_time),
                edit.lunch_minutes.unwrap_or(shift.lunch_break_minutes),
            )?;
        }

        if let Some(employer_id) = edit.employer_id {
            let profile = store.profile_or_default()?;
            shift.employer_id = Some(employer_id);
            shift.hourly_rate =
                Self::resolve_rate(store, &profile, Some(employer_id), edit.hourly_rate)?;
        } else if let Some(rate) = edit.hourly_rate {
            shift.hourly_rate = rate;
        }
        if let Some(target) = edit.sales_target {
            shift.sales_target = Some(target);
        }
        if let Some(alert) = edit.alert_minutes {
            shift.alert_minutes = Some(alert);
        }
        if let Some(notes) = edit.notes {
            shift.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        shift.updated_at = Some(Utc::now());
        shift.validate()?;

        if times_changed {
            ensure_no_overlap(&shift, &store.overlapping_shifts(&shift)?)?;
        }

        let updated = store.update_expected_shift(&shift)?;
        store.audit(
            "shift_edit",
            &updated.shift_date.to_string(),
            &format!("Shift {} now {}", updated.id, updated.time_range()),
        )?;
        Ok(updated)
    }

    /// A shift with an entry stays completed until the entry is deleted.
    pub fn set_status(store: &dyn Store, id: Uuid, status: ShiftStatus) -> AppResult<ExpectedShift> {
        if status != ShiftStatus::Completed && store.get_entry_for_shift(id)?.is_some() {
            return Err(AppError::Validation(format!(
                "Shift {id} has an entry; delete the entry before marking it {status}"
            )));
        }
        let updated = store.set_shift_status(id, status)?;
        store.audit(
            "shift_status",
            &updated.shift_date.to_string(),
            &format!("Shift {} marked {}", updated.id, status),
        )?;
        Ok(updated)
    }

    pub fn delete(store: &dyn Store, id: Uuid) -> AppResult<ExpectedShift> {
        let shift = store
            .get_expected_shift(id)?
            .ok_or_else(|| AppError::not_found("Shift", id))?;
        store.delete_expected_shift(id)?;
        store.audit(
            "shift_delete",
            &shift.shift_date.to_string(),
            &format!("Deleted shift {} ({})", shift.id, shift.time_range()),
        )?;
        Ok(shift)
    }

    /// Joined shifts of the range; `status` filters on the derived status.
    pub fn list(
        store: &dyn Store,
        range: Option<DateRange>,
        status: Option<ShiftStatus>,
    ) -> AppResult<Vec<CompletedShift>> {
        let mut shifts = store.completed_shifts(range)?;
        if let Some(wanted) = status {
            shifts.retain(|s| s.status() == wanted);
        }
        Ok(shifts)
    }
}
