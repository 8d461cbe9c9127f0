use super::{get_enum, get_opt_instant, get_opt_uuid, get_uuid, instant_str};
use crate::errors::AppResult;
use crate::models::{Language, SecurityType, SubscriptionStatus, SubscriptionTier, UserProfile};
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

pub fn map_row(row: &Row) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        user_id: get_uuid(row, "user_id")?,
        name: row.get("name")?,
        default_hourly_rate: row.get("default_hourly_rate")?,
        week_start: row.get("week_start")?,
        target_tip_daily: row.get("target_tip_daily")?,
        target_tip_weekly: row.get("target_tip_weekly")?,
        target_tip_monthly: row.get("target_tip_monthly")?,
        target_sales_daily: row.get("target_sales_daily")?,
        target_sales_weekly: row.get("target_sales_weekly")?,
        target_sales_monthly: row.get("target_sales_monthly")?,
        target_hours_daily: row.get("target_hours_daily")?,
        target_hours_weekly: row.get("target_hours_weekly")?,
        target_hours_monthly: row.get("target_hours_monthly")?,
        tip_target_percentage: row.get("tip_target_percentage")?,
        average_deduction_percentage: row.get("average_deduction_percentage")?,
        preferred_language: get_enum(row, "preferred_language", Language::from_db_str)?,
        default_alert_minutes: row.get("default_alert_minutes")?,
        use_multiple_employers: row.get::<_, i64>("use_multiple_employers")? == 1,
        default_employer_id: get_opt_uuid(row, "default_employer_id")?,
        subscription_tier: get_enum(row, "subscription_tier", SubscriptionTier::from_db_str)?,
        subscription_status: get_enum(
            row,
            "subscription_status",
            SubscriptionStatus::from_db_str,
        )?,
        subscription_expires_at: get_opt_instant(row, "subscription_expires_at")?,
        security_type: get_enum(row, "security_type", SecurityType::from_db_str)?,
        pin_code_hash: row.get("pin_code_hash")?,
        auto_lock_minutes: row.get("auto_lock_minutes")?,
        created_at: get_opt_instant(row, "created_at")?,
        updated_at: get_opt_instant(row, "updated_at")?,
    })
}

pub fn get(conn: &Connection, user_id: Uuid) -> AppResult<Option<UserProfile>> {
    Ok(conn
        .query_row(
            "SELECT * FROM users_profile WHERE user_id = ?1",
            [user_id.to_string()],
            map_row,
        )
        .optional()?)
}

/// Insert, or replace every column of the existing row.
pub fn upsert(conn: &Connection, p: &UserProfile) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users_profile (
            user_id, name, default_hourly_rate, week_start,
            target_tip_daily, target_tip_weekly, target_tip_monthly,
            target_sales_daily, target_sales_weekly, target_sales_monthly,
            target_hours_daily, target_hours_weekly, target_hours_monthly,
            tip_target_percentage, average_deduction_percentage, preferred_language,
            default_alert_minutes, use_multiple_employers, default_employer_id,
            subscription_tier, subscription_status, subscription_expires_at,
            security_type, pin_code_hash, auto_lock_minutes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                 ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27)
         ON CONFLICT(user_id) DO UPDATE SET
            name = excluded.name,
            default_hourly_rate = excluded.default_hourly_rate,
            week_start = excluded.week_start,
            target_tip_daily = excluded.target_tip_daily,
            target_tip_weekly = excluded.target_tip_weekly,
            target_tip_monthly = excluded.target_tip_monthly,
            target_sales_daily = excluded.target_sales_daily,
            target_sales_weekly = excluded.target_sales_weekly,
            target_sales_monthly = excluded.target_sales_monthly,
            target_hours_daily = excluded.target_hours_daily,
            target_hours_weekly = excluded.target_hours_weekly,
            target_hours_monthly = excluded.target_hours_monthly,
            tip_target_percentage = excluded.tip_target_percentage,
            average_deduction_percentage = excluded.average_deduction_percentage,
            preferred_language = excluded.preferred_language,
            default_alert_minutes = excluded.default_alert_minutes,
            use_multiple_employers = excluded.use_multiple_employers,
            default_employer_id = excluded.default_employer_id,
            subscription_tier = excluded.subscription_tier,
            subscription_status = excluded.subscription_status,
            subscription_expires_at = excluded.subscription_expires_at,
            security_type = excluded.security_type,
            pin_code_hash = excluded.pin_code_hash,
            auto_lock_minutes = excluded.auto_lock_minutes,
            updated_at = excluded.updated_at",
        params![
            p.user_id.to_string(),
            p.name,
            p.default_hourly_rate,
            p.week_start,
            p.target_tip_daily,
            p.target_tip_weekly,
            p.target_tip_monthly,
            p.target_sales_daily,
            p.target_sales_weekly,
            p.target_sales_monthly,
            p.target_hours_daily,
            p.target_hours_weekly,
            p.target_hours_monthly,
            p.tip_target_percentage,
            p.average_deduction_percentage,
            p.preferred_language.as_str(),
            p.default_alert_minutes,
            p.use_multiple_employers as i64,
            p.default_employer_id.map(|id| id.to_string()),
            p.subscription_tier.as_str(),
            p.subscription_status.as_str(),
            instant_str(p.subscription_expires_at),
            p.security_type.as_str(),
            p.pin_code_hash,
            p.auto_lock_minutes,
            instant_str(p.created_at),
            instant_str(p.updated_at),
        ],
    )?;
    Ok(())
}
