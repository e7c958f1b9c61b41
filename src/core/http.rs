use std::time::Duration;

use chrono::Utc;
use reqwest::{
    header::{
        ACCEPT,
        USER_AGENT,
    },
    Client,
    Response,
};
use serde_json::Value;

use super::{
    models::cards_from_value,
    Card,
    CardexError,
};

pub fn http_client(timeout: Duration) -> Result<Client, CardexError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CardexError::Custom(format!("HTTP client build failed: {e}")))
}

/// Milliseconds since the epoch, appended as `t=` so caches never serve a
/// stale catalog.
pub fn cache_buster() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// `GET <endpoint>?t=<now>`. A payload that isn't an array is an empty
/// catalog; a non-2xx status is an error.
pub async fn fetch_catalog(client: &Client, endpoint: &str) -> Result<Vec<Card>, CardexError> {
    let resp = client
        .get(endpoint)
        .query(&[("t", cache_buster())])
        .header(USER_AGENT, "cardex/0.3 (+reqwest)")
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    ensure_success(&resp)?;

    let payload: Value = resp.json().await?;
    if !payload.is_array() {
        log::warn!("Catalog at {} is not a JSON array, treating it as empty", endpoint);
    }

    Ok(cards_from_value(&payload))
}

fn ensure_success(resp: &Response) -> Result<(), CardexError> {
    if !resp.status().is_success() {
        return Err(CardexError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
