use super::{ensure_non_negative, ensure_percentage};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Es,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            "es" => Some(Language::Es),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    None,
    PartTime,
    FullAccess,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::None => "none",
            SubscriptionTier::PartTime => "part_time",
            SubscriptionTier::FullAccess => "full_access",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(SubscriptionTier::None),
            "part_time" | "parttime" => Some(SubscriptionTier::PartTime),
            "full_access" | "full" => Some(SubscriptionTier::FullAccess),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SubscriptionStatus::Active),
            "expired" => Some(SubscriptionStatus::Expired),
            "cancelled" => Some(SubscriptionStatus::Cancelled),
            _ => None,
        }
    }
}

/// How the app is unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    #[default]
    None,
    Biometric,
    Pin,
    /// Biometric with PIN fallback
    Both,
}

impl SecurityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityType::None => "none",
            SecurityType::Biometric => "biometric",
            SecurityType::Pin => "pin",
            SecurityType::Both => "both",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(SecurityType::None),
            "biometric" => Some(SecurityType::Biometric),
            "pin" => Some(SecurityType::Pin),
            "both" => Some(SecurityType::Both),
            _ => None,
        }
    }

    pub fn requires_pin(&self) -> bool {
        matches!(self, SecurityType::Pin | SecurityType::Both)
    }
}

fn default_hourly_rate() -> f64 {
    15.0
}
fn default_deduction() -> f64 {
    30.0
}
fn default_tip_daily() -> f64 {
    100.0
}
fn default_tip_weekly() -> f64 {
    500.0
}
fn default_tip_monthly() -> f64 {
    2000.0
}
fn default_alert_minutes() -> Option<i32> {
    Some(60)
}
fn default_auto_lock() -> i32 {
    5
}

/// Row of the `users_profile` table: per-user settings and targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: f64,
    /// 0 = Sunday … 6 = Saturday
    #[serde(default)]
    pub week_start: u32,

    #[serde(default = "default_tip_daily")]
    pub target_tip_daily: f64,
    #[serde(default = "default_tip_weekly")]
    pub target_tip_weekly: f64,
    #[serde(default = "default_tip_monthly")]
    pub target_tip_monthly: f64,
    #[serde(default)]
    pub target_sales_daily: f64,
    #[serde(default)]
    pub target_sales_weekly: f64,
    #[serde(default)]
    pub target_sales_monthly: f64,
    #[serde(default)]
    pub target_hours_daily: f64,
    #[serde(default)]
    pub target_hours_weekly: f64,
    #[serde(default)]
    pub target_hours_monthly: f64,
    #[serde(default)]
    pub tip_target_percentage: f64,

    #[serde(default = "default_deduction")]
    pub average_deduction_percentage: f64,
    #[serde(default)]
    pub preferred_language: Language,
    #[serde(default = "default_alert_minutes")]
    pub default_alert_minutes: Option<i32>,
    #[serde(default)]
    pub use_multiple_employers: bool,
    #[serde(default)]
    pub default_employer_id: Option<Uuid>,

    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default)]
    pub subscription_expires_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub security_type: SecurityType,
    #[serde(default)]
    pub pin_code_hash: Option<String>,
    #[serde(default = "default_auto_lock")]
    pub auto_lock_minutes: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Profile with the app defaults, created on first use.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            name: None,
            default_hourly_rate: default_hourly_rate(),
            week_start: 0,
            target_tip_daily: default_tip_daily(),
            target_tip_weekly: default_tip_weekly(),
            target_tip_monthly: default_tip_monthly(),
            target_sales_daily: 0.0,
            target_sales_weekly: 0.0,
            target_sales_monthly: 0.0,
            target_hours_daily: 0.0,
            target_hours_weekly: 0.0,
            target_hours_monthly: 0.0,
            tip_target_percentage: 0.0,
            average_deduction_percentage: default_deduction(),
            preferred_language: Language::En,
            default_alert_minutes: default_alert_minutes(),
            use_multiple_employers: false,
            default_employer_id: None,
            subscription_tier: SubscriptionTier::None,
            subscription_status: SubscriptionStatus::Active,
            subscription_expires_at: None,
            security_type: SecurityType::None,
            pin_code_hash: None,
            auto_lock_minutes: default_auto_lock(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.week_start > 6 {
            return Err(AppError::Validation(format!(
                "Week start must be between 0 and 6 (got {})",
                self.week_start
            )));
        }
        ensure_percentage(
            "average_deduction_percentage",
            self.average_deduction_percentage,
        )?;
        ensure_percentage("tip_target_percentage", self.tip_target_percentage)?;
        ensure_non_negative("default_hourly_rate", self.default_hourly_rate)?;
        for (field, value) in [
            ("target_tip_daily", self.target_tip_daily),
            ("target_tip_weekly", self.target_tip_weekly),
            ("target_tip_monthly", self.target_tip_monthly),
            ("target_sales_daily", self.target_sales_daily),
            ("target_sales_weekly", self.target_sales_weekly),
            ("target_sales_monthly", self.target_sales_monthly),
            ("target_hours_daily", self.target_hours_daily),
            ("target_hours_weekly", self.target_hours_weekly),
            ("target_hours_monthly", self.target_hours_monthly),
        ] {
            ensure_non_negative(field, value)?;
        }
        if self.auto_lock_minutes < 0 {
            return Err(AppError::Validation(
                "auto_lock_minutes must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_app() {
        let p = UserProfile::new(Uuid::new_v4());
        assert_eq!(p.average_deduction_percentage, 30.0);
        assert_eq!(p.default_hourly_rate, 15.0);
        assert_eq!(p.target_tip_daily, 100.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn invalid_week_start_and_deduction() {
        let mut p = UserProfile::new(Uuid::new_v4());
        p.week_start = 7;
        assert!(p.validate().is_err());
        p.week_start = 1;
        p.average_deduction_percentage = 120.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn enums_use_wire_names() {
        let mut p = UserProfile::new(Uuid::new_v4());
        p.subscription_tier = SubscriptionTier::PartTime;
        p.preferred_language = Language::Fr;
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["subscription_tier"], "part_time");
        assert_eq!(v["preferred_language"], "fr");
        assert_eq!(v["security_type"], "none");
    }

    #[test]
    fn legacy_tier_names_are_accepted() {
        assert_eq!(
            SubscriptionTier::from_db_str("parttime"),
            Some(SubscriptionTier::PartTime)
        );
        assert_eq!(
            SubscriptionTier::from_db_str("full"),
            Some(SubscriptionTier::FullAccess)
        );
    }
}
