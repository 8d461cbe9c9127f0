//! Records mirroring the remote tables.
//! Field names match the column names so the same structs serialize to the
//! Postgrest API and map to the local SQLite rows.

pub mod achievement;
pub mod alert;
pub mod completed_shift;
pub mod employer;
pub mod expected_shift;
pub mod legacy;
pub mod shift_entry;
pub mod subscription;
pub mod user_profile;

pub use achievement::{Achievement, AchievementType};
pub use alert::{Alert, AlertType};
pub use completed_shift::CompletedShift;
pub use employer::Employer;
pub use expected_shift::{ExpectedShift, ShiftStatus};
pub use legacy::{Entry, Shift};
pub use shift_entry::ShiftEntry;
pub use subscription::{SubscriptionEnvironment, UserSubscription};
pub use user_profile::{Language, SecurityType, SubscriptionStatus, SubscriptionTier, UserProfile};

use crate::errors::{AppError, AppResult};

/// Money and hour fields must be finite and >= 0 (NaN is rejected too).
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be a non-negative number (got {value})"
        )))
    }
}

pub(crate) fn ensure_percentage(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be between 0 and 100 (got {value})"
        )))
    }
}

pub(crate) fn ensure_non_negative_minutes(field: &str, value: i32) -> AppResult<()> {
    if value >= 0 {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be non-negative (got {value})"
        )))
    }
}

/// `7.5` → `7h 30m`, `8.0` → `8h`.
pub(crate) fn format_hours(hours: f64) -> String {
    let whole = hours.trunc() as i64;
    let minutes = ((hours - hours.trunc()) * 60.0).round() as i64;
    if minutes > 0 {
        format!("{whole}h {minutes}m")
    } else {
        format!("{whole}h")
    }
}

/// Optional text fields: blank strings behave like NULL.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_rejects_nan_and_negatives() {
        assert!(ensure_non_negative("tips", 0.0).is_ok());
        assert!(ensure_non_negative("tips", 12.5).is_ok());
        assert!(ensure_non_negative("tips", -0.01).is_err());
        assert!(ensure_non_negative("tips", f64::NAN).is_err());
    }

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(ensure_percentage("deduction", 0.0).is_ok());
        assert!(ensure_percentage("deduction", 100.0).is_ok());
        assert!(ensure_percentage("deduction", 100.5).is_err());
    }

    #[test]
    fn hours_are_formatted_like_the_app() {
        assert_eq!(format_hours(8.0), "8h");
        assert_eq!(format_hours(7.5), "7h 30m");
        assert_eq!(format_hours(0.25), "0h 15m");
    }
}
