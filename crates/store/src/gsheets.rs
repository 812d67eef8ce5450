//! Worksheet backed by the Google Sheets values API.
//!
//! Authenticates as a service account with the OAuth 2.0 JWT bearer grant:
//! an RS256 assertion signed with the account's private key is exchanged for
//! a short-lived access token, which is cached until shortly before expiry.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fiber_survey_core::table::Table;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::store::SheetStore;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each signed assertion.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh the cached token this long before it actually expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// HTTP request timeout for every Sheets/OAuth call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// The fields of a service-account key file this store needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    /// Load a downloaded service-account JSON key.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

// ---------------------------------------------------------------------------
// Values API payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct ValueRangeBody<'a> {
    range: &'a str,
    #[serde(rename = "majorDimension")]
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// GoogleSheetStore
// ---------------------------------------------------------------------------

/// One worksheet (tab) of a spreadsheet.
pub struct GoogleSheetStore {
    client: reqwest::Client,
    key: ServiceAccountKey,
    spreadsheet_id: String,
    worksheet: String,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetStore {
    pub fn new(key: ServiceAccountKey, spreadsheet_id: String, worksheet: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            key,
            spreadsheet_id,
            worksheet,
            token: Mutex::new(None),
        }
    }

    fn values_url(&self) -> Result<Url, StoreError> {
        let mut url = Url::parse(SHEETS_API_BASE)
            .map_err(|e| StoreError::Unavailable(format!("bad Sheets API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StoreError::Unavailable("Sheets API base URL cannot be a base".into()))?
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&self.worksheet);
        Ok(url)
    }

    /// A valid access token, minting a new one when the cached one is stale.
    async fn access_token(&self) -> Result<String, StoreError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| Instant::now() < t.refresh_at) {
            return Ok(token.token.clone());
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.access_token.clone();
        let lifetime = Duration::from_secs(fresh.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        *cached = Some(CachedToken {
            token: fresh.access_token,
            refresh_at: Instant::now() + lifetime,
        });

        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = fresh.expires_in,
            "Sheets access token refreshed"
        );
        Ok(token)
    }

    async fn fetch_token(&self) -> Result<TokenResponse, StoreError> {
        let assertion = self.sign_assertion()?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<TokenResponse>().await?)
    }

    fn sign_assertion(&self) -> Result<String, StoreError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetStore {
    async fn read(&self) -> Result<Table, StoreError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.values_url()?)
            .bearer_auth(token)
            .send()
            .await?;
        let range: ValueRange = ensure_success(response).await?.json().await?;
        Ok(table_from_values(range.values))
    }

    async fn update(&self, table: &Table) -> Result<(), StoreError> {
        let token = self.access_token().await?;

        let mut values = Vec::with_capacity(table.len() + 1);
        values.push(table.columns().to_vec());
        values.extend(table.rows().iter().cloned());

        let mut url = self.values_url()?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRangeBody {
            range: &self.worksheet,
            major_dimension: "ROWS",
            values,
        };
        let response = self
            .client
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;

        tracing::debug!(worksheet = %self.worksheet, rows = table.len(), "Google sheet updated");
        Ok(())
    }
}

/// First row is the header; cells come back as strings or numbers.
fn table_from_values(values: Vec<Vec<serde_json::Value>>) -> Table {
    let mut rows = values.into_iter().map(|row| {
        row.into_iter()
            .map(|cell| match cell {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<String>>()
    });
    let columns = rows.next().unwrap_or_default();
    Table::new(columns, rows.collect())
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(StoreError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
