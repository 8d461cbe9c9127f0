use crate::core::shift::{PlanRequest, ShiftLogic};
use crate::core::subscription::SubscriptionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::expected_shift::scheduled_hours;
use crate::models::shift_entry::Earnings;
use crate::models::{ExpectedShift, ShiftEntry, ShiftStatus};
use crate::store::Store;
use chrono::{NaiveTime, Utc};
use uuid::Uuid;

/// Input of `entry add`. Times default to the planned ones; hours default
/// to the actual span minus the planned lunch break.
#[derive(Debug, Clone, Default)]
pub struct EntryRequest {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub hours: Option<f64>,
    pub earnings: Earnings,
    pub notes: Option<String>,
}

/// Fields of `entry edit`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EntryEdit {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub hours: Option<f64>,
    pub sales: Option<f64>,
    pub tips: Option<f64>,
    pub cash_out: Option<f64>,
    pub other: Option<f64>,
    pub notes: Option<String>,
}

pub struct EntryLogic;

impl EntryLogic {
    /// Rate used for the income snapshot: the shift's own rate, or the
    /// employer/profile default when the shift carries none.
    fn snapshot_rate(store: &dyn Store, shift: &ExpectedShift) -> AppResult<f64> {
        if shift.hourly_rate > 0.0 {
            return Ok(shift.hourly_rate);
        }
        let profile = store.profile_or_default()?;
        ShiftLogic::resolve_rate(store, &profile, shift.employer_id, None)
    }

    pub fn add(store: &dyn Store, shift_id: Uuid, req: EntryRequest) -> AppResult<ShiftEntry> {
        let shift = store
            .get_expected_shift(shift_id)?
            .ok_or_else(|| AppError::not_found("Shift", shift_id))?;
        if store.get_entry_for_shift(shift_id)?.is_some() {
            return Err(AppError::EntryExists(shift_id.to_string()));
        }
        SubscriptionLogic::ensure_can_add_entry(store, shift.shift_date)?;

        let start = req.start.unwrap_or(shift.start_time);
        let end = req.end.unwrap_or(shift.end_time);
        let hours = req
            .hours
            .unwrap_or_else(|| scheduled_hours(start, end, shift.lunch_break_minutes));

        let mut entry =
            ShiftEntry::record(shift_id, store.user_id(), start, end, hours, req.earnings)?;
        entry.notes = req.notes.filter(|n| !n.trim().is_empty());

        let profile = store.profile_or_default()?;
        entry.apply_snapshot(
            Self::snapshot_rate(store, &shift)?,
            profile.average_deduction_percentage,
        );

        let created = store.create_shift_entry(&entry)?;
        store.set_shift_status(shift_id, ShiftStatus::Completed)?;
        store.audit(
            "entry_add",
            &shift.shift_date.to_string(),
            &format!(
                "{:.2}h, sales {:.2}, tips {:.2}",
                created.actual_hours, created.sales, created.tips
            ),
        )?;
        Ok(created)
    }

    /// Unplanned work: create the shift from the actual times, then its entry.
    pub fn quick(
        store: &dyn Store,
        plan: PlanRequest,
        req: EntryRequest,
    ) -> AppResult<(ExpectedShift, ShiftEntry)> {
        let shift = ShiftLogic::plan(store, plan)?;
        match Self::add(store, shift.id, req) {
            Ok(entry) => {
                let completed = store
                    .get_expected_shift(shift.id)?
                    .unwrap_or(shift);
                Ok((completed, entry))
            }
            Err(e) => {
                // keep the shift and entry together or not at all
                store.delete_expected_shift(shift.id)?;
                Err(e)
            }
        }
    }

    pub fn edit(store: &dyn Store, id: Uuid, edit: EntryEdit) -> AppResult<ShiftEntry> {
        let mut entry = store
            .get_shift_entry(id)?
            .ok_or_else(|| AppError::not_found("Entry", id))?;
        let shift = store
            .get_expected_shift(entry.shift_id)?
            .ok_or_else(|| AppError::not_found("Shift", entry.shift_id))?;

        let times_changed = edit.start.is_some() || edit.end.is_some();
        if let Some(start) = edit.start {
            entry.actual_start_time = start;
        }
        if let Some(end) = edit.end {
            entry.actual_end_time = end;
        }
        match edit.hours {
            Some(hours) => entry.actual_hours = hours,
            None if times_changed => {
                entry.actual_hours = scheduled_hours(
                    entry.actual_start_time,
                    entry.actual_end_time,
                    shift.lunch_break_minutes,
                )
            }
            None => {}
        }
        if let Some(v) = edit.sales {
            entry.sales = v;
        }
        if let Some(v) = edit.tips {
            entry.tips = v;
        }
        if let Some(v) = edit.cash_out {
            entry.cash_out = v;
        }
        if let Some(v) = edit.other {
            entry.other = v;
        }
        if let Some(notes) = edit.notes {
            entry.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }

        // the snapshot keeps the rate and deduction it was taken with
        let rate = match entry.hourly_rate {
            Some(rate) => rate,
            None => Self::snapshot_rate(store, &shift)?,
        };
        let deduction = match entry.deduction_percentage {
            Some(pct) => pct,
            None => store.profile_or_default()?.average_deduction_percentage,
        };
        entry.apply_snapshot(rate, deduction);
        entry.updated_at = Some(Utc::now());

        let updated = store.update_shift_entry(&entry)?;
        store.audit(
            "entry_edit",
            &shift.shift_date.to_string(),
            &format!("Entry {} updated", updated.id),
        )?;
        Ok(updated)
    }

    /// The shift goes back to planned.
    pub fn delete(store: &dyn Store, id: Uuid) -> AppResult<ShiftEntry> {
        let entry = store
            .get_shift_entry(id)?
            .ok_or_else(|| AppError::not_found("Entry", id))?;
        store.delete_shift_entry(id)?;
        let shift = store.set_shift_status(entry.shift_id, ShiftStatus::Planned)?;
        store.audit(
            "entry_delete",
            &shift.shift_date.to_string(),
            &format!("Deleted entry {}", entry.id),
        )?;
        Ok(entry)
    }
}
