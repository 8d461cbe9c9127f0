use super::query::Query;
use crate::errors::{AppError, AppResult};
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const REST_PATH: &str = "/rest/v1";
const TIMEOUT_SECS: u64 = 20;

/// Normalise the project URL:
/// - ensure a scheme (http for localhost, https otherwise)
/// - strip trailing slashes and a trailing `/rest/v1`
pub fn normalize_supabase_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }

    while url.ends_with('/') {
        url.pop();
    }
    if url.ends_with(REST_PATH) {
        url.truncate(url.len() - REST_PATH.len());
    }
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn status_error(status: StatusCode) -> String {
    match status.as_u16() {
        401 => "access token is invalid or expired".to_string(),
        403 => "request rejected by row level security".to_string(),
        404 => "table or endpoint not found".to_string(),
        409 => "conflicting row already exists".to_string(),
        s if s >= 500 => format!("server error (HTTP {s})"),
        s => format!("unexpected response (HTTP {s})"),
    }
}

/// Pull `message`/`details` out of a Postgrest error body.
fn remote_error(status: StatusCode, body: &str) -> AppError {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            let message = json
                .get("message")
                .or_else(|| json.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status_error(status));
            match json.get("details").and_then(Value::as_str) {
                Some(details) if !details.is_empty() => format!("{message}: {details}"),
                _ => message,
            }
        }
        Err(_) if !body.trim().is_empty() => format!("{}: {}", status_error(status), body.trim()),
        Err(_) => status_error(status),
    };
    AppError::Remote {
        status: status.as_u16(),
        message,
    }
}

pub struct PostgrestClient {
    http: Client,
    base: String,
    anon_key: String,
    access_token: Option<String>,
}

impl PostgrestClient {
    pub fn new(url: &str, anon_key: &str, access_token: Option<String>) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base: format!("{}{}", normalize_supabase_url(url), REST_PATH),
            anon_key: anon_key.to_string(),
            access_token,
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base, table)
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> RequestBuilder {
        // Without a user token the anon key doubles as the bearer.
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, self.table_url(table))
            .query(&query.pairs())
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .header("Accept", "application/json")
    }

    fn send(&self, req: RequestBuilder, table: &str) -> AppResult<String> {
        let resp = req.send()?;
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if !status.is_success() {
            tracing::warn!(table, status = status.as_u16(), "postgrest request failed");
            return Err(remote_error(status, &body));
        }
        tracing::debug!(table, status = status.as_u16(), bytes = body.len(), "postgrest ok");
        Ok(body)
    }

    fn rows<R: DeserializeOwned>(body: &str) -> AppResult<Vec<R>> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(body)?)
    }

    pub fn select<R: DeserializeOwned>(&self, table: &str, query: &Query) -> AppResult<Vec<R>> {
        let body = self.send(self.request(Method::GET, table, query), table)?;
        Self::rows(&body)
    }

    pub fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> AppResult<Vec<R>> {
        let req = self
            .request(Method::POST, table, &Query::new())
            .header("Prefer", "return=representation")
            .json(row);
        Self::rows(&self.send(req, table)?)
    }

    /// Insert or merge on the given conflict column.
    pub fn upsert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &T,
    ) -> AppResult<Vec<R>> {
        let req = self
            .request(Method::POST, table, &Query::new())
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row);
        Self::rows(&self.send(req, table)?)
    }

    pub fn update<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        patch: &T,
    ) -> AppResult<Vec<R>> {
        let req = self
            .request(Method::PATCH, table, query)
            .header("Prefer", "return=representation")
            .json(patch);
        Self::rows(&self.send(req, table)?)
    }

    /// Number of rows removed.
    pub fn delete(&self, table: &str, query: &Query) -> AppResult<usize> {
        let req = self
            .request(Method::DELETE, table, query)
            .header("Prefer", "return=representation");
        let removed: Vec<Value> = Self::rows(&self.send(req, table)?)?;
        Ok(removed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_normalised() {
        assert_eq!(
            normalize_supabase_url("abc.supabase.co/"),
            "https://abc.supabase.co"
        );
        assert_eq!(
            normalize_supabase_url(" https://abc.supabase.co/rest/v1/ "),
            "https://abc.supabase.co"
        );
        assert_eq!(
            normalize_supabase_url("localhost:54321"),
            "http://localhost:54321"
        );
    }

    #[test]
    fn table_urls_point_at_the_rest_endpoint() {
        let c = PostgrestClient::new("abc.supabase.co", "anon", None).unwrap();
        assert_eq!(
            c.table_url("expected_shifts"),
            "https://abc.supabase.co/rest/v1/expected_shifts"
        );
    }

    #[test]
    fn error_bodies_become_remote_errors() {
        let body = r#"{"code":"23505","message":"duplicate key value","details":"Key (shift_id) exists"}"#;
        match remote_error(StatusCode::CONFLICT, body) {
            AppError::Remote { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "duplicate key value: Key (shift_id) exists");
            }
            other => panic!("unexpected {other:?}"),
        }
        match remote_error(StatusCode::UNAUTHORIZED, "") {
            AppError::Remote { message, .. } => {
                assert_eq!(message, "access token is invalid or expired")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
