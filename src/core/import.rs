//! Import of the legacy `shifts` / `entries` JSON dumps.

use crate::errors::{AppError, AppResult};
use crate::models::{Entry, ExpectedShift, Shift, ShiftEntry, UserProfile};
use crate::store::Store;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Either a bare array of shift rows or an object with both tables.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LegacyDump {
    Tables {
        #[serde(default)]
        shifts: Vec<Shift>,
        #[serde(default)]
        entries: Vec<Entry>,
    },
    Shifts(Vec<Shift>),
}

impl LegacyDump {
    pub fn parse(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn into_tables(self) -> (Vec<Shift>, Vec<Entry>) {
        match self {
            LegacyDump::Tables { shifts, entries } => (shifts, entries),
            LegacyDump::Shifts(shifts) => (shifts, Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub shifts: usize,
    pub entries: usize,
    /// Rows already present (same id)
    pub skipped: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn from_file(store: &dyn Store, path: &Path) -> AppResult<ImportSummary> {
        if !path.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Import file not found: {}", path.display()),
            )));
        }
        let content = fs::read_to_string(path)?;
        let summary = Self::apply(store, LegacyDump::parse(&content)?)?;
        store.audit(
            "import",
            &path.to_string_lossy(),
            &format!(
                "{} shift(s), {} entr(y/ies), {} skipped",
                summary.shifts, summary.entries, summary.skipped
            ),
        )?;
        Ok(summary)
    }

    /// Re-owns every row to the store user; re-importing the same dump
    /// skips rows whose id already exists.
    pub fn apply(store: &dyn Store, dump: LegacyDump) -> AppResult<ImportSummary> {
        let profile = store.profile_or_default()?;
        let deduction = profile.average_deduction_percentage;
        let (shifts, entries) = dump.into_tables();
        let mut summary = ImportSummary::default();

        for row in &shifts {
            let rate = Self::fallback_rate(store, &profile, row.employer_id)?;
            if Self::store_pair(store, row.split(deduction, rate)?)? {
                summary.shifts += 1;
            } else {
                summary.skipped += 1;
            }
        }
        for row in &entries {
            let rate = Self::fallback_rate(store, &profile, row.employer_id)?;
            if Self::store_pair(store, row.split(deduction, rate)?)? {
                summary.entries += 1;
            } else {
                summary.skipped += 1;
            }
        }
        tracing::info!(?summary, "legacy import finished");
        Ok(summary)
    }

    /// Rate for rows that carry none: the employer's when it is known here,
    /// the profile default otherwise.
    fn fallback_rate(
        store: &dyn Store,
        profile: &UserProfile,
        employer_id: Option<Uuid>,
    ) -> AppResult<f64> {
        if let Some(id) = employer_id
            && let Some(employer) = store.get_employer(id)?
        {
            return Ok(employer.hourly_rate);
        }
        Ok(profile.default_hourly_rate)
    }

    fn store_pair(store: &dyn Store, pair: (ExpectedShift, ShiftEntry)) -> AppResult<bool> {
        let (mut shift, mut entry) = pair;
        if store.get_expected_shift(shift.id)?.is_some() {
            return Ok(false);
        }
        shift.user_id = store.user_id();
        entry.user_id = store.user_id();
        if let Some(id) = shift.employer_id
            && store.get_employer(id)?.is_none()
        {
            tracing::warn!(employer = %id, "unknown employer dropped from imported shift");
            shift.employer_id = None;
        }
        store.create_expected_shift(&shift)?;
        store.create_shift_entry(&entry)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_dump_layouts_parse() {
        let bare = r#"[{"id":"6f0c2d4e-8f57-4a5a-9a1e-0d4b8a3c1e11","user_id":"6f0c2d4e-8f57-4a5a-9a1e-0d4b8a3c1e12","shift_date":"2025-02-03","hours":6}]"#;
        let (s, e) = LegacyDump::parse(bare).unwrap().into_tables();
        assert_eq!((s.len(), e.len()), (1, 0));

        let tables = r#"{"entries":[{"id":"6f0c2d4e-8f57-4a5a-9a1e-0d4b8a3c1e13","user_id":"6f0c2d4e-8f57-4a5a-9a1e-0d4b8a3c1e12","entry_date":"2025-02-04","tips":40}]}"#;
        let (s, e) = LegacyDump::parse(tables).unwrap().into_tables();
        assert_eq!((s.len(), e.len()), (0, 1));
    }
}
