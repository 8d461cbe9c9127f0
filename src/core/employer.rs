use crate::errors::{AppError, AppResult};
use crate::models::Employer;
use crate::store::Store;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct EmployerEdit {
    pub name: Option<String>,
    pub hourly_rate: Option<f64>,
    pub color: Option<String>,
}

pub struct EmployerLogic;

impl EmployerLogic {
    pub fn add(
        store: &dyn Store,
        name: &str,
        hourly_rate: Option<f64>,
        color: Option<&str>,
    ) -> AppResult<Employer> {
        let rate = match hourly_rate {
            Some(r) => r,
            None => store.profile_or_default()?.default_hourly_rate,
        };
        let mut employer = Employer::new(store.user_id(), name, rate)?;
        if let Some(c) = color {
            employer = employer.with_color(c)?;
        }
        let created = store.create_employer(&employer)?;
        store.audit(
            "employer_add",
            &created.name,
            &format!("Employer added at {:.2}/h", created.hourly_rate),
        )?;
        Ok(created)
    }

    pub fn edit(store: &dyn Store, id: Uuid, edit: EmployerEdit) -> AppResult<Employer> {
        let mut employer = store
            .get_employer(id)?
            .ok_or_else(|| AppError::not_found("Employer", id))?;
        if let Some(name) = edit.name {
            employer.name = name.trim().to_string();
        }
        if let Some(rate) = edit.hourly_rate {
            employer.hourly_rate = rate;
        }
        if let Some(color) = edit.color {
            employer.color = color;
        }
        let updated = store.update_employer(&employer)?;
        store.audit("employer_edit", &updated.name, "Employer updated")?;
        Ok(updated)
    }

    pub fn set_active(store: &dyn Store, id: Uuid, active: bool) -> AppResult<Employer> {
        let updated = store.set_employer_active(id, active)?;
        let msg = if active { "Employer activated" } else { "Employer deactivated" };
        store.audit("employer_active", &updated.name, msg)?;
        Ok(updated)
    }

    /// Shifts keep their data; their employer link is cleared.
    pub fn delete(store: &dyn Store, id: Uuid) -> AppResult<Employer> {
        let employer = store
            .get_employer(id)?
            .ok_or_else(|| AppError::not_found("Employer", id))?;
        store.delete_employer(id)?;

        let mut profile = store.profile_or_default()?;
        if profile.default_employer_id == Some(id) {
            profile.default_employer_id = None;
            store.upsert_profile(&profile)?;
        }
        store.audit("employer_delete", &employer.name, "Employer deleted")?;
        Ok(employer)
    }
}
