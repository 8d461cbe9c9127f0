use super::{get_opt_enum, get_opt_instant, get_uuid, instant_str};
use crate::errors::AppResult;
use crate::models::{SubscriptionEnvironment, SubscriptionStatus, UserSubscription};
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

pub fn map_row(row: &Row) -> rusqlite::Result<UserSubscription> {
    Ok(UserSubscription {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        product_id: row.get("product_id")?,
        status: get_opt_enum(row, "status", SubscriptionStatus::from_db_str)?,
        expires_at: get_opt_instant(row, "expires_at")?,
        transaction_id: row.get("transaction_id")?,
        purchase_date: get_opt_instant(row, "purchase_date")?,
        environment: get_opt_enum(row, "environment", SubscriptionEnvironment::from_db_str)?,
        created_at: get_opt_instant(row, "created_at")?,
        updated_at: get_opt_instant(row, "updated_at")?,
    })
}

/// Most recently purchased subscription of the user.
pub fn current(conn: &Connection, user_id: Uuid) -> AppResult<Option<UserSubscription>> {
    Ok(conn
        .query_row(
            "SELECT * FROM user_subscriptions WHERE user_id = ?1
             ORDER BY IFNULL(purchase_date, created_at) DESC LIMIT 1",
            [user_id.to_string()],
            map_row,
        )
        .optional()?)
}

pub fn upsert(conn: &Connection, s: &UserSubscription) -> AppResult<()> {
    conn.execute(
        "INSERT INTO user_subscriptions (id, user_id, product_id, status, expires_at,
                                         transaction_id, purchase_date, environment,
                                         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(id) DO UPDATE SET
            product_id = excluded.product_id,
            status = excluded.status,
            expires_at = excluded.expires_at,
            transaction_id = excluded.transaction_id,
            purchase_date = excluded.purchase_date,
            environment = excluded.environment,
            updated_at = excluded.updated_at",
        params![
            s.id.to_string(),
            s.user_id.to_string(),
            s.product_id,
            s.status.map(|st| st.as_str()),
            instant_str(s.expires_at),
            s.transaction_id,
            instant_str(s.purchase_date),
            s.environment.map(|e| e.as_str()),
            instant_str(s.created_at),
            instant_str(s.updated_at),
        ],
    )?;
    Ok(())
}
