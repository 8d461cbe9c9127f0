//! App lock: PIN hashing and the auto-lock timer.

use crate::errors::{AppError, AppResult};
use crate::models::SecurityType;
use crate::store::Store;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

pub const PIN_MIN_DIGITS: usize = 4;
pub const PIN_MAX_DIGITS: usize = 8;

pub fn validate_pin(pin: &str) -> AppResult<()> {
    let len = pin.chars().count();
    if !(PIN_MIN_DIGITS..=PIN_MAX_DIGITS).contains(&len) || !pin.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AppError::Security(format!(
            "PIN must be {PIN_MIN_DIGITS} to {PIN_MAX_DIGITS} digits"
        )));
    }
    Ok(())
}

/// SHA-256 of the PIN as lowercase hex.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

pub fn verify_pin(pin: &str, stored_hash: &str) -> bool {
    hash_pin(pin).eq_ignore_ascii_case(stored_hash)
}

/// `auto_lock_minutes` of 0 never locks.
pub fn should_lock(last_active: DateTime<Utc>, now: DateTime<Utc>, auto_lock_minutes: i32) -> bool {
    if auto_lock_minutes <= 0 {
        return false;
    }
    now - last_active > Duration::minutes(i64::from(auto_lock_minutes))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecurityStatus {
    pub security_type: SecurityType,
    pub pin_set: bool,
    pub auto_lock_minutes: i32,
}

pub struct SecurityLogic;

impl SecurityLogic {
    pub fn set_pin(store: &dyn Store, pin: &str, auto_lock: Option<i32>) -> AppResult<()> {
        validate_pin(pin)?;
        let mut profile = store.profile_or_default()?;
        profile.pin_code_hash = Some(hash_pin(pin));
        profile.security_type = match profile.security_type {
            SecurityType::Biometric | SecurityType::Both => SecurityType::Both,
            SecurityType::None | SecurityType::Pin => SecurityType::Pin,
        };
        if let Some(minutes) = auto_lock {
            profile.auto_lock_minutes = minutes;
        }
        store.upsert_profile(&profile)?;
        store.audit("pin_set", "", "PIN code set")?;
        Ok(())
    }

    /// `Ok(false)` on a wrong PIN; an error when no PIN is configured.
    pub fn verify(store: &dyn Store, pin: &str) -> AppResult<bool> {
        let profile = store.profile_or_default()?;
        let hash = profile
            .pin_code_hash
            .filter(|h| !h.is_empty())
            .ok_or_else(|| AppError::Security("no PIN is configured".into()))?;
        let ok = verify_pin(pin, &hash);
        if !ok {
            tracing::warn!("PIN verification failed");
        }
        Ok(ok)
    }

    pub fn clear(store: &dyn Store) -> AppResult<()> {
        let mut profile = store.profile_or_default()?;
        profile.pin_code_hash = None;
        profile.security_type = SecurityType::None;
        store.upsert_profile(&profile)?;
        store.audit("pin_clear", "", "PIN code removed")?;
        Ok(())
    }

    pub fn status(store: &dyn Store) -> AppResult<SecurityStatus> {
        let profile = store.profile_or_default()?;
        Ok(SecurityStatus {
            security_type: profile.security_type,
            pin_set: profile.pin_code_hash.is_some_and(|h| !h.is_empty()),
            auto_lock_minutes: profile.auto_lock_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_length_and_digits() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("12345678").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("123456789").is_err());
        assert!(validate_pin("12a4").is_err());
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_pin("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
        assert!(verify_pin("1234", &hash_pin("1234")));
        assert!(!verify_pin("4321", &hash_pin("1234")));
    }

    #[test]
    fn auto_lock_threshold() {
        let now = Utc::now();
        assert!(!should_lock(now - Duration::minutes(5), now, 5));
        assert!(should_lock(now - Duration::minutes(6), now, 5));
        assert!(!should_lock(now - Duration::days(3), now, 0));
    }
}
