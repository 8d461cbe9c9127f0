use super::ensure_non_negative;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_HOURLY_RATE: f64 = 15.0;
pub const DEFAULT_COLOR: &str = "#4F46E5";

fn default_hourly_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}
fn default_active() -> bool {
    true
}
fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Row of the `employers` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Employer {
    pub fn new(user_id: Uuid, name: &str, hourly_rate: f64) -> AppResult<Self> {
        let employer = Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.trim().to_string(),
            hourly_rate,
            active: true,
            color: default_color(),
            created_at: Some(Utc::now()),
        };
        employer.validate()?;
        Ok(employer)
    }

    pub fn with_color(mut self, color: &str) -> AppResult<Self> {
        self.color = color.to_string();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Employer name cannot be empty".into()));
        }
        ensure_non_negative("hourly_rate", self.hourly_rate)?;
        if !is_hex_color(&self.color) {
            return Err(AppError::Validation(format!(
                "Invalid color tag '{}': expected #RRGGBB",
                self.color
            )));
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_employer_is_active_with_default_color() {
        let e = Employer::new(Uuid::new_v4(), "  Bistro  ", 17.5).unwrap();
        assert_eq!(e.name, "Bistro");
        assert!(e.active);
        assert_eq!(e.color, DEFAULT_COLOR);
    }

    #[test]
    fn rejects_blank_name_negative_rate_and_bad_color() {
        let user = Uuid::new_v4();
        assert!(Employer::new(user, "   ", 15.0).is_err());
        assert!(Employer::new(user, "Cafe", -1.0).is_err());
        let e = Employer::new(user, "Cafe", 15.0).unwrap();
        assert!(e.clone().with_color("red").is_err());
        assert!(e.with_color("#10b981").is_ok());
    }

    #[test]
    fn missing_columns_fall_back_to_defaults() {
        let json = format!(
            r#"{{"id":"{}","user_id":"{}","name":"Diner"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let e: Employer = serde_json::from_str(&json).unwrap();
        assert_eq!(e.hourly_rate, DEFAULT_HOURLY_RATE);
        assert!(e.active);
    }
}
