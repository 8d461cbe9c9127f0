//! Profile settings and the daily/weekly/monthly targets.

use crate::errors::AppResult;
use crate::models::{Language, UserProfile};
use crate::store::Store;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub default_hourly_rate: Option<f64>,
    pub week_start: Option<u32>,
    pub average_deduction_percentage: Option<f64>,
    pub preferred_language: Option<Language>,
    pub default_alert_minutes: Option<i32>,
    pub use_multiple_employers: Option<bool>,
    pub default_employer_id: Option<Uuid>,
    pub auto_lock_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct TargetsUpdate {
    pub tip_daily: Option<f64>,
    pub tip_weekly: Option<f64>,
    pub tip_monthly: Option<f64>,
    pub sales_daily: Option<f64>,
    pub sales_weekly: Option<f64>,
    pub sales_monthly: Option<f64>,
    pub hours_daily: Option<f64>,
    pub hours_weekly: Option<f64>,
    pub hours_monthly: Option<f64>,
    pub tip_percentage: Option<f64>,
}

impl TargetsUpdate {
    pub fn is_empty(&self) -> bool {
        [
            self.tip_daily,
            self.tip_weekly,
            self.tip_monthly,
            self.sales_daily,
            self.sales_weekly,
            self.sales_monthly,
            self.hours_daily,
            self.hours_weekly,
            self.hours_monthly,
            self.tip_percentage,
        ]
        .iter()
        .all(Option::is_none)
    }
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *field = v;
    }
}

pub struct ProfileLogic;

impl ProfileLogic {
    pub fn update(store: &dyn Store, upd: ProfileUpdate) -> AppResult<UserProfile> {
        let mut p = store.profile_or_default()?;
        if let Some(name) = upd.name {
            p.name = Some(name).filter(|n| !n.trim().is_empty());
        }
        set(&mut p.default_hourly_rate, upd.default_hourly_rate);
        set(&mut p.week_start, upd.week_start);
        set(
            &mut p.average_deduction_percentage,
            upd.average_deduction_percentage,
        );
        set(&mut p.preferred_language, upd.preferred_language);
        if upd.default_alert_minutes.is_some() {
            p.default_alert_minutes = upd.default_alert_minutes;
        }
        set(&mut p.use_multiple_employers, upd.use_multiple_employers);
        if let Some(id) = upd.default_employer_id {
            if store.get_employer(id)?.is_none() {
                return Err(crate::errors::AppError::not_found("Employer", id));
            }
            p.default_employer_id = Some(id);
        }
        set(&mut p.auto_lock_minutes, upd.auto_lock_minutes);

        let saved = store.upsert_profile(&p)?;
        store.audit("profile", "", "Profile updated")?;
        Ok(saved)
    }

    pub fn set_targets(store: &dyn Store, upd: TargetsUpdate) -> AppResult<UserProfile> {
        let mut p = store.profile_or_default()?;
        set(&mut p.target_tip_daily, upd.tip_daily);
        set(&mut p.target_tip_weekly, upd.tip_weekly);
        set(&mut p.target_tip_monthly, upd.tip_monthly);
        set(&mut p.target_sales_daily, upd.sales_daily);
        set(&mut p.target_sales_weekly, upd.sales_weekly);
        set(&mut p.target_sales_monthly, upd.sales_monthly);
        set(&mut p.target_hours_daily, upd.hours_daily);
        set(&mut p.target_hours_weekly, upd.hours_weekly);
        set(&mut p.target_hours_monthly, upd.hours_monthly);
        set(&mut p.tip_target_percentage, upd.tip_percentage);

        let saved = store.upsert_profile(&p)?;
        store.audit("targets", "", "Targets updated")?;
        Ok(saved)
    }
}
