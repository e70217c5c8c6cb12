use crate::error::FeedError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_PRIMARY_PRICE_URL: &str = "https://api-osmosis.imperator.co/tokens/v2/price/AKT";
pub const DEFAULT_FALLBACK_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=akash-network&vs_currencies=usd";
pub const DEFAULT_ASSET_ID: &str = "akash-network";
pub const DEFAULT_PRICE_API_TIMEOUT_SECS: u64 = 10;

/// Somewhere the USD price of one native token can be fetched from.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_usd_price(&self) -> Result<f64, FeedError>;
}

/// JSON price API reached over HTTP GET.
pub struct HttpPriceSource {
    name: String,
    url: String,
    asset_id: String,
    client: Client,
}

impl HttpPriceSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            name: name.into(),
            url: url.into(),
            asset_id: DEFAULT_ASSET_ID.to_string(),
            client,
        })
    }

    /// Key under which nested-shape responses carry the asset.
    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = asset_id.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_usd_price(&self) -> Result<f64, FeedError> {
        tracing::debug!(source = %self.name, url = %self.url, "fetching token price");

        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;
        extract_usd_price(&body, &self.asset_id)
    }
}

/// Reads the USD price out of either response shape the price APIs use:
/// `{"price": 2.5}` or `{"<asset_id>": {"usd": 2.5}}`. Numbers sent as
/// strings are accepted.
pub fn extract_usd_price(body: &Value, asset_id: &str) -> Result<f64, FeedError> {
    let price = body
        .get("price")
        .and_then(as_number)
        .or_else(|| body.get(asset_id).and_then(|asset| asset.get("usd")).and_then(as_number))
        .ok_or_else(|| FeedError::MissingField(format!("neither `price` nor `{asset_id}.usd`")))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(FeedError::NonPositive(price));
    }
    Ok(price)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
