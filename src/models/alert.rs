use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    MissingShift,
    IncompleteShift,
    TargetAchieved,
    NewPersonalBest,
    SubscriptionLimit,
    WeeklySummary,
    AchievementUnlocked,
    ShiftReminder,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::MissingShift => "missing_shift",
            AlertType::IncompleteShift => "incomplete_shift",
            AlertType::TargetAchieved => "target_achieved",
            AlertType::NewPersonalBest => "new_personal_best",
            AlertType::SubscriptionLimit => "subscription_limit",
            AlertType::WeeklySummary => "weekly_summary",
            AlertType::AchievementUnlocked => "achievement_unlocked",
            AlertType::ShiftReminder => "shift_reminder",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "missing_shift" => Some(AlertType::MissingShift),
            "incomplete_shift" => Some(AlertType::IncompleteShift),
            "target_achieved" => Some(AlertType::TargetAchieved),
            "new_personal_best" => Some(AlertType::NewPersonalBest),
            "subscription_limit" => Some(AlertType::SubscriptionLimit),
            "weekly_summary" => Some(AlertType::WeeklySummary),
            "achievement_unlocked" => Some(AlertType::AchievementUnlocked),
            "shift_reminder" => Some(AlertType::ShiftReminder),
            _ => None,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the `alerts` table (in-app notification centre).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub user_id: Uuid,
    pub alert_type: AlertType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn new(user_id: Uuid, alert_type: AlertType, title: &str, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            alert_type,
            title: title.to_string(),
            message: message.to_string(),
            is_read: false,
            action: None,
            data: None,
            created_at: Some(Utc::now()),
            read_at: None,
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        self.is_read = true;
        self.read_at = Some(at);
    }
}
