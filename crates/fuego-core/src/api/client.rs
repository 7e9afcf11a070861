//! PostgREST client for the hosted database.
//!
//! This module provides `SupabaseClient`, which speaks the database service's
//! REST dialect directly: table endpoints, `eq.`/`neq.` filters and the
//! `Prefer` header for returning inserted rows.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{
    AnnouncementRow, MenuItem, MenuItemRow, NewAnnouncementRow, NewReservationRow, PriceUpdate,
    ReservationRow, ReservationStatus,
};

use super::{ApiError, RemoteStore};

// ============================================================================
// Constants
// ============================================================================

pub const RESERVATIONS_TABLE: &str = "reservations";
pub const ANNOUNCEMENTS_TABLE: &str = "announcements";
pub const MENU_ITEMS_TABLE: &str = "menu_items";

/// HTTP request timeout in seconds.
/// Short enough that an unreachable project degrades to the local cache quickly.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 500;

/// Filter value matching every row; PostgREST refuses unfiltered deletes.
const MATCH_ALL_IDS: &str = "neq.impossible_id_val";

/// Client for one hosted database project.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    rest_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a client for the project at `project_url` (e.g. `https://abc.supabase.co`).
    pub fn new(project_url: &str, anon_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", project_url.trim().trim_end_matches('/')),
            anon_key: anon_key.trim().to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", header::HeaderValue::from_str(&self.anon_key)?);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", self.anon_key))?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(response: reqwest::Response) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Send a request, rebuilding it for each retry after a 429.
    async fn send(&self, what: &str, build: impl Fn() -> RequestBuilder) -> Result<reqwest::Response> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = build()
                .headers(self.auth_headers()?)
                .send()
                .await
                .map_err(ApiError::from)
                .with_context(|| format!("Failed to send request: {}", what))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => return Ok(response),
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(request = what, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
            }
        }
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, order_by_created: bool) -> Result<Vec<T>> {
        let url = self.table_url(table);
        let mut query = vec![("select", "*")];
        if order_by_created {
            query.push(("order", "created_at.desc"));
        }

        let response = self
            .send(table, || self.client.get(&url).query(&query))
            .await?;

        let values: Vec<Value> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse rows from {}", table))?;
        debug!(table, rows = values.len(), "Rows received");

        Ok(parse_rows(values, table))
    }

    async fn insert_returning<B: Serialize + Sync, T: DeserializeOwned>(&self, table: &str, body: &B) -> Result<T> {
        let url = self.table_url(table);
        let response = self
            .send(table, || {
                self.client
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(&[body])
            })
            .await?;

        let mut rows: Vec<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse inserted row from {}", table))?;

        if rows.is_empty() {
            return Err(ApiError::InvalidResponse(format!("insert into {} returned no row", table)).into());
        }
        Ok(rows.swap_remove(0))
    }

    async fn update_by_id<B: Serialize + Sync>(&self, table: &str, id: &str, body: &B) -> Result<()> {
        let url = self.table_url(table);
        let filter = format!("eq.{}", id);
        self.send(table, || {
            self.client
                .patch(&url)
                .query(&[("id", filter.as_str())])
                .header("Prefer", "return=minimal")
                .json(body)
        })
        .await?;
        Ok(())
    }
}

/// Decode rows one at a time so a single malformed row does not sink the batch.
fn parse_rows<T: DeserializeOwned>(values: Vec<Value>, table: &str) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(table, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl RemoteStore for SupabaseClient {
    async fn ping(&self) -> Result<()> {
        let url = self.table_url(RESERVATIONS_TABLE);
        self.send("connection check", || {
            self.client
                .head(&url)
                .query(&[("select", "*")])
                .header("Prefer", "count=exact")
        })
        .await?;
        Ok(())
    }

    async fn select_reservations(&self) -> Result<Vec<ReservationRow>> {
        self.select(RESERVATIONS_TABLE, true).await
    }

    async fn insert_reservation(&self, row: &NewReservationRow) -> Result<ReservationRow> {
        self.insert_returning(RESERVATIONS_TABLE, row).await
    }

    async fn update_reservation_status(&self, id: &str, status: ReservationStatus) -> Result<()> {
        self.update_by_id(RESERVATIONS_TABLE, id, &serde_json::json!({ "status": status }))
            .await
    }

    async fn select_announcements(&self) -> Result<Vec<AnnouncementRow>> {
        self.select(ANNOUNCEMENTS_TABLE, true).await
    }

    async fn insert_announcement(&self, message: &str) -> Result<AnnouncementRow> {
        let row = NewAnnouncementRow { message, is_active: true };
        self.insert_returning(ANNOUNCEMENTS_TABLE, &row).await
    }

    async fn update_announcement_active(&self, id: &str, is_active: bool) -> Result<()> {
        self.update_by_id(ANNOUNCEMENTS_TABLE, id, &serde_json::json!({ "is_active": is_active }))
            .await
    }

    async fn select_menu_items(&self) -> Result<Vec<MenuItemRow>> {
        // menu_items has no created_at column
        self.select(MENU_ITEMS_TABLE, false).await
    }

    async fn update_menu_item_price(&self, id: &str, price: f64) -> Result<()> {
        self.update_by_id(MENU_ITEMS_TABLE, id, &PriceUpdate { price }).await
    }

    async fn replace_menu_items(&self, items: &[MenuItem]) -> Result<()> {
        let url = self.table_url(MENU_ITEMS_TABLE);

        self.send("menu delete", || {
            self.client.delete(&url).query(&[("id", MATCH_ALL_IDS)])
        })
        .await?;

        self.send("menu insert", || {
            self.client
                .post(&url)
                .header("Prefer", "return=minimal")
                .json(items)
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rest_url_is_normalized() {
        let client = SupabaseClient::new(" https://abc.supabase.co/ ", "anon").expect("client");
        assert_eq!(client.table_url(MENU_ITEMS_TABLE), "https://abc.supabase.co/rest/v1/menu_items");
    }

    #[test]
    fn test_auth_headers_carry_key_twice() {
        let client = SupabaseClient::new("https://abc.supabase.co", "secret-key").expect("client");
        let headers = client.auth_headers().expect("headers");
        assert_eq!(headers.get("apikey").and_then(|v| v.to_str().ok()), Some("secret-key"));
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer secret-key")
        );
    }

    #[test]
    fn test_parse_rows_skips_malformed_rows() {
        let values = vec![
            json!({ "id": "1", "name": "Burrata", "price": 55 }),
            json!("not an object"),
            json!({ "id": "2", "name": 12 }),
            json!({ "id": "3" }),
        ];
        let rows: Vec<MenuItemRow> = parse_rows(values, MENU_ITEMS_TABLE);
        let ids: Vec<_> = rows.into_iter().filter_map(|r| r.normalize()).map(|m| m.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_status_body_is_lowercase() {
        let body = json!({ "status": ReservationStatus::Cancelled });
        assert_eq!(body.to_string(), r#"{"status":"cancelled"}"#);
    }
}
