//! Subscription tiers and the part-time weekly limits.

use crate::core::calculator::period::{DateRange, start_of_week};
use crate::errors::{AppError, AppResult};
use crate::models::{SubscriptionStatus, SubscriptionTier, UserSubscription};
use crate::store::Store;
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;

pub const FULL_MONTHLY: &str = "com.protip365.monthly";
pub const FULL_ANNUAL: &str = "com.protip365.annual";
pub const PART_TIME_MONTHLY: &str = "com.protip365.parttime.monthly";
pub const PART_TIME_ANNUAL: &str = "com.protip365.parttime.Annual";

/// Shifts (and entries) a part-time subscriber may log per week.
pub const PART_TIME_WEEKLY_LIMIT: u32 = 3;

pub fn tier_for_product(product_id: &str) -> Option<SubscriptionTier> {
    match product_id.trim() {
        FULL_MONTHLY | FULL_ANNUAL => Some(SubscriptionTier::FullAccess),
        PART_TIME_MONTHLY | PART_TIME_ANNUAL => Some(SubscriptionTier::PartTime),
        _ => None,
    }
}

/// `None` means unlimited.
pub fn weekly_limit(tier: SubscriptionTier) -> Option<u32> {
    match tier {
        SubscriptionTier::PartTime => Some(PART_TIME_WEEKLY_LIMIT),
        SubscriptionTier::None | SubscriptionTier::FullAccess => None,
    }
}

fn check_limit(kind: &'static str, tier: SubscriptionTier, used: usize) -> AppResult<()> {
    match weekly_limit(tier) {
        Some(limit) if used >= limit as usize => Err(AppError::LimitReached {
            kind,
            tier: tier.as_str().to_string(),
            limit,
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionReport {
    pub tier: SubscriptionTier,
    pub subscription: Option<UserSubscription>,
    pub week: DateRange,
    pub shifts_this_week: usize,
    pub entries_this_week: usize,
    pub weekly_limit: Option<u32>,
}

pub struct SubscriptionLogic;

impl SubscriptionLogic {
    /// A stored subscription decides the tier; an inactive one means no
    /// tier. Without a record the profile value is used.
    pub fn effective_tier(store: &dyn Store) -> AppResult<SubscriptionTier> {
        let now = Utc::now();
        if let Some(sub) = store.current_subscription()? {
            if !sub.is_active_at(now) {
                return Ok(SubscriptionTier::None);
            }
            let tier = sub
                .product_id
                .as_deref()
                .and_then(tier_for_product)
                .unwrap_or(SubscriptionTier::None);
            return Ok(tier);
        }

        let profile = store.profile_or_default()?;
        let expired = profile
            .subscription_expires_at
            .map(|exp| exp <= now)
            .unwrap_or(false);
        if expired || profile.subscription_status != SubscriptionStatus::Active {
            return Ok(SubscriptionTier::None);
        }
        Ok(profile.subscription_tier)
    }

    fn week_of(store: &dyn Store, date: NaiveDate) -> AppResult<DateRange> {
        let profile = store.profile_or_default()?;
        let start = start_of_week(date, profile.week_start);
        Ok(DateRange::new(
            start,
            start.checked_add_days(Days::new(6)).unwrap_or(start),
        ))
    }

    pub fn ensure_can_add_shift(store: &dyn Store, date: NaiveDate) -> AppResult<()> {
        let tier = Self::effective_tier(store)?;
        if weekly_limit(tier).is_none() {
            return Ok(());
        }
        let week = Self::week_of(store, date)?;
        let used = store.list_expected_shifts(Some(week), None)?.len();
        check_limit("shifts", tier, used)
    }

    pub fn ensure_can_add_entry(store: &dyn Store, date: NaiveDate) -> AppResult<()> {
        let tier = Self::effective_tier(store)?;
        if weekly_limit(tier).is_none() {
            return Ok(());
        }
        let week = Self::week_of(store, date)?;
        let used = store.list_shift_entries(Some(week))?.len();
        check_limit("entries", tier, used)
    }

    pub fn report(store: &dyn Store, today: NaiveDate) -> AppResult<SubscriptionReport> {
        let tier = Self::effective_tier(store)?;
        let week = Self::week_of(store, today)?;
        Ok(SubscriptionReport {
            tier,
            subscription: store.current_subscription()?,
            week,
            shifts_this_week: store.list_expected_shifts(Some(week), None)?.len(),
            entries_this_week: store.list_shift_entries(Some(week))?.len(),
            weekly_limit: weekly_limit(tier),
        })
    }

    /// Record a purchase of `product_id` and mirror its tier on the profile.
    pub fn set_product(store: &dyn Store, product_id: &str) -> AppResult<UserSubscription> {
        let tier = tier_for_product(product_id).ok_or_else(|| {
            AppError::Validation(format!("Unknown product id '{}'", product_id.trim()))
        })?;

        let sub = store.upsert_subscription(&UserSubscription::new(store.user_id(), product_id.trim()))?;

        let mut profile = store.profile_or_default()?;
        profile.subscription_tier = tier;
        profile.subscription_status = SubscriptionStatus::Active;
        profile.subscription_expires_at = sub.expires_at;
        store.upsert_profile(&profile)?;

        store.audit(
            "subscription",
            product_id.trim(),
            &format!("Subscription set to {}", tier.as_str()),
        )?;
        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_map_to_tiers() {
        assert_eq!(
            tier_for_product("com.protip365.annual"),
            Some(SubscriptionTier::FullAccess)
        );
        assert_eq!(
            tier_for_product("com.protip365.parttime.Annual"),
            Some(SubscriptionTier::PartTime)
        );
        assert_eq!(tier_for_product("com.other.app"), None);
    }

    #[test]
    fn only_part_time_is_limited() {
        assert_eq!(weekly_limit(SubscriptionTier::PartTime), Some(3));
        assert_eq!(weekly_limit(SubscriptionTier::FullAccess), None);
        assert_eq!(weekly_limit(SubscriptionTier::None), None);

        assert!(check_limit("shifts", SubscriptionTier::PartTime, 2).is_ok());
        assert!(matches!(
            check_limit("shifts", SubscriptionTier::PartTime, 3),
            Err(AppError::LimitReached { limit: 3, .. })
        ));
        assert!(check_limit("shifts", SubscriptionTier::FullAccess, 50).is_ok());
    }
}
