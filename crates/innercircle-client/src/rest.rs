//! PostgREST-style implementation of [`WaitlistClient`].

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use innercircle_core::{
    ChangeCallback, InsertError, NewEntry, ReferralCode, Referrer, Subscription,
    TransientBackendError, WaitlistClient,
};

use crate::config::{BackendConfig, ConfigError};
use crate::poller;

/// Stored procedure that returns a fresh unique referral code.
pub const GENERATE_CODE_RPC: &str = "generate_referral_code";

/// Unique constraint guarding the email column.
const EMAIL_CONSTRAINT: &str = "waitlist_email_key";

/// Postgres SQLSTATE for a unique violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Waitlist client talking to the managed backend over HTTP.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestWaitlist {
    http: Client,
    base: Url,
    config: BackendConfig,
}

impl RestWaitlist {
    /// Build a client, validating the config and installing auth headers.
    pub fn new(config: BackendConfig) -> Result<Self, ConfigError> {
        let base = config.validate()?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key).map_err(|_| ConfigError::InvalidKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|_| ConfigError::InvalidKey)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { http, base, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base.as_str().trim_end_matches('/'),
            self.config.table
        )
    }

    fn rpc_url(&self, name: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base.as_str().trim_end_matches('/'), name)
    }

    /// Fetch at most one row where `column` equals `value`.
    async fn select_one<T: DeserializeOwned>(
        &self,
        select: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<T>, TransientBackendError> {
        let filter = format!("eq.{value}");
        let response = self
            .http
            .get(self.table_url())
            .query(&[("select", select), (column, filter.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(transient)?;

        let rows: Vec<T> = ensure_success(response).await?.json().await.map_err(transient)?;
        Ok(rows.into_iter().next())
    }

    /// Exact row count from the `Content-Range` header of a HEAD request.
    pub async fn exact_count(&self) -> Result<u64, TransientBackendError> {
        let response = self
            .http
            .head(self.table_url())
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(transient)?;
        let response = ensure_success(response).await?;

        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| TransientBackendError::new("count response missing Content-Range"))?;

        parse_content_range(header).ok_or_else(|| {
            TransientBackendError::new(format!("unparseable Content-Range {header:?}"))
        })
    }
}

#[async_trait]
impl WaitlistClient for RestWaitlist {
    #[instrument(skip_all, fields(code = %code))]
    async fn lookup_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Referrer>, TransientBackendError> {
        self.select_one("full_name", "referral_code", code.as_str()).await
    }

    #[instrument(skip_all)]
    async fn email_exists(&self, email: &str) -> Result<bool, TransientBackendError> {
        let row: Option<serde_json::Value> = self.select_one("email", "email", email).await?;
        Ok(row.is_some())
    }

    #[instrument(skip_all)]
    async fn generate_referral_code(&self) -> Result<ReferralCode, TransientBackendError> {
        let response = self
            .http
            .post(self.rpc_url(GENERATE_CODE_RPC))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(transient)?;

        let code: String = ensure_success(response).await?.json().await.map_err(transient)?;
        ReferralCode::parse(&code)
            .ok_or_else(|| TransientBackendError::new("backend returned an empty referral code"))
    }

    #[instrument(skip_all, fields(code = %entry.referral_code))]
    async fn insert_entry(&self, entry: &NewEntry) -> Result<(), InsertError> {
        let response = self
            .http
            .post(self.table_url())
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await
            .map_err(transient)?;

        let status = response.status();
        if status.is_success() {
            debug!("Waitlist entry inserted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_insert_failure(status, &body))
    }

    #[instrument(skip_all)]
    async fn count_entries(&self) -> Result<u64, TransientBackendError> {
        self.exact_count().await
    }

    fn subscribe_to_changes(&self, on_change: ChangeCallback) -> Subscription {
        let client = self.clone();
        let interval = self.config.poll_interval();
        let task = tokio::spawn(poller::poll_changes(
            move || {
                let client = client.clone();
                async move { client.exact_count().await }
            },
            interval,
            on_change,
        ));
        Subscription::new(self.config.table.clone(), task)
    }
}

/// Error body returned by the backend on a failed request.
#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Decide whether a failed insert was a duplicate email.
///
/// A unique-violation (409 or SQLSTATE 23505) counts as a duplicate email
/// only when the message or details name the email constraint or column.
pub fn classify_insert_failure(status: StatusCode, body: &str) -> InsertError {
    let parsed: BackendErrorBody = serde_json::from_str(body).unwrap_or_default();

    let unique_violation =
        status == StatusCode::CONFLICT || parsed.code.as_deref() == Some(UNIQUE_VIOLATION);
    let mentions_email = [parsed.message.as_deref(), parsed.details.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| text.contains(EMAIL_CONSTRAINT) || text.contains("(email)"));

    if unique_violation && mentions_email {
        InsertError::DuplicateEmail
    } else {
        warn!(%status, body, "Insert rejected");
        InsertError::Transient(TransientBackendError::new(format!("status {status}: {body}")))
    }
}

/// Parse the total from a `Content-Range` value such as `0-9/42` or `*/0`.
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}

async fn ensure_success(response: Response) -> Result<Response, TransientBackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransientBackendError::new(format!("status {status}: {body}")))
}

fn transient(e: reqwest::Error) -> TransientBackendError {
    TransientBackendError::new(e.to_string())
}
