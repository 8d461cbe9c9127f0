use super::SubscriptionStatus;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionEnvironment {
    Sandbox,
    Production,
}

impl SubscriptionEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionEnvironment::Sandbox => "sandbox",
            SubscriptionEnvironment::Production => "production",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "sandbox" => Some(SubscriptionEnvironment::Sandbox),
            "production" => Some(SubscriptionEnvironment::Production),
            _ => None,
        }
    }
}

/// Row of the `user_subscriptions` table (store receipts mirrored server-side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub environment: Option<SubscriptionEnvironment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserSubscription {
    pub fn new(user_id: Uuid, product_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            product_id: Some(product_id.to_string()),
            status: Some(SubscriptionStatus::Active),
            expires_at: None,
            transaction_id: None,
            purchase_date: Some(Utc::now()),
            environment: Some(SubscriptionEnvironment::Production),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(p) = &self.product_id
            && p.trim().is_empty()
        {
            return Err(AppError::Validation("product_id cannot be blank".into()));
        }
        Ok(())
    }

    /// Active and not past its expiry date.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        let active = matches!(self.status, Some(SubscriptionStatus::Active));
        let unexpired = self.expires_at.map(|exp| exp > now).unwrap_or(true);
        active && unexpired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_makes_subscription_inactive() {
        let now = Utc::now();
        let mut s = UserSubscription::new(Uuid::new_v4(), "com.protip365.monthly");
        assert!(s.is_active_at(now));
        s.expires_at = Some(now - Duration::days(1));
        assert!(!s.is_active_at(now));
        s.expires_at = Some(now + Duration::days(1));
        s.status = Some(SubscriptionStatus::Cancelled);
        assert!(!s.is_active_at(now));
    }
}
