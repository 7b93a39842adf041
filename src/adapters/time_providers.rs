use crate::domain::ports::TimeProvider;
use crate::utils::error::{RenewError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use std::time::Duration;

pub const WORLD_TIME_API_URL: &str = "http://worldtimeapi.org/api/ip";
pub const WORLD_CLOCK_API_URL: &str = "http://worldclockapi.com/api/json/utc/now";
pub const APIHZ_URL: &str = "https://cn.apihz.cn/api/time/getapi.php";

/// Upper bound per provider request; an unreachable provider costs at most
/// this long before the resolver moves on.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

async fn fetch_json(client: &Client, url: &str) -> Result<serde_json::Value> {
    let response = client
        .get(url)
        .timeout(PROVIDER_TIMEOUT)
        .send()
        .await
        .map_err(RenewError::transient)?;

    if !response.status().is_success() {
        return Err(RenewError::Transient(format!("HTTP {}", response.status())));
    }

    response.json().await.map_err(RenewError::transient)
}

fn string_field<'a>(value: &'a serde_json::Value, field: &str) -> Result<&'a str> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RenewError::Transient(format!("response missing '{}' field", field)))
}

/// worldtimeapi.org; returns an RFC 3339 `datetime` for the caller's IP.
pub struct WorldTimeApi {
    client: Client,
    url: String,
}

impl WorldTimeApi {
    pub fn new(client: Client) -> Self {
        Self::with_url(client, WORLD_TIME_API_URL)
    }

    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TimeProvider for WorldTimeApi {
    fn name(&self) -> &'static str {
        "worldtimeapi"
    }

    async fn attempt(&self) -> Result<NaiveDateTime> {
        let body = fetch_json(&self.client, &self.url).await?;
        let raw = string_field(&body, "datetime")?;
        let parsed = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| RenewError::Transient(format!("unparseable datetime '{}': {}", raw, e)))?;
        Ok(parsed.with_timezone(&Local).naive_local())
    }
}

/// worldclockapi.com; `currentDateTime` is UTC, minute precision, with a
/// trailing `Z` (e.g. `2023-04-17T12:34Z`).
pub struct WorldClockApi {
    client: Client,
    url: String,
}

impl WorldClockApi {
    pub fn new(client: Client) -> Self {
        Self::with_url(client, WORLD_CLOCK_API_URL)
    }

    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TimeProvider for WorldClockApi {
    fn name(&self) -> &'static str {
        "worldclockapi"
    }

    async fn attempt(&self) -> Result<NaiveDateTime> {
        let body = fetch_json(&self.client, &self.url).await?;
        let raw = string_field(&body, "currentDateTime")?;
        let trimmed = raw.trim_end_matches('Z');
        let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
            .map_err(|e| {
                RenewError::Transient(format!("unparseable currentDateTime '{}': {}", raw, e))
            })?;
        Ok(Utc
            .from_utc_datetime(&naive)
            .with_timezone(&Local)
            .naive_local())
    }
}

/// cn.apihz.cn; needs account credentials and answers `{code, msg}` where
/// `msg` is a plain `YYYY-MM-DD HH:MM:SS` wall-clock string.
pub struct ApihzTime {
    client: Client,
    url: String,
    api_id: String,
    api_key: String,
}

impl ApihzTime {
    pub fn new(client: Client, api_id: String, api_key: String) -> Self {
        Self::with_url(client, APIHZ_URL, api_id, api_key)
    }

    pub fn with_url(
        client: Client,
        url: impl Into<String>,
        api_id: String,
        api_key: String,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_id,
            api_key,
        }
    }
}

#[async_trait]
impl TimeProvider for ApihzTime {
    fn name(&self) -> &'static str {
        "apihz"
    }

    async fn attempt(&self) -> Result<NaiveDateTime> {
        let url = format!(
            "{}?id={}&key={}&type=2",
            self.url, self.api_id, self.api_key
        );
        let body = fetch_json(&self.client, &url).await?;

        if body.get("code").and_then(|c| c.as_i64()) != Some(200) {
            return Err(RenewError::Transient(format!(
                "provider returned code {:?}",
                body.get("code")
            )));
        }

        let raw = string_field(&body, "msg")?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| RenewError::Transient(format!("unparseable msg '{}': {}", raw, e)))
    }
}
