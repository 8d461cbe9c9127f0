//! Minimal Supabase Postgrest client used by the remote store.

pub mod client;
pub mod query;

pub use client::{PostgrestClient, normalize_supabase_url};
pub use query::Query;
