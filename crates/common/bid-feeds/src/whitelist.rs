use crate::error::FeedError;
use crate::metrics;
use crate::store::SnapshotStore;
use chrono::{Duration, Utc};
use reqwest::Client;
use tracing::{debug, info};

/// How long a downloaded whitelist is trusted before it is fetched again.
pub const WHITELIST_MAX_AGE_MINUTES: i64 = 10;

/// Accounts a provider is willing to bid for, downloaded from a URL as
/// one account per line and cached in a snapshot store.
pub struct Whitelist {
    url: String,
    client: Client,
    store: Box<dyn SnapshotStore>,
    max_age: Duration,
}

impl Whitelist {
    pub fn new(url: impl Into<String>, store: Box<dyn SnapshotStore>, timeout: std::time::Duration) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
            store,
            max_age: Duration::minutes(WHITELIST_MAX_AGE_MINUTES),
        })
    }

    /// Current whitelist text, downloading it first when the cached copy
    /// is missing or too old.
    pub async fn contents(&self) -> Result<String, FeedError> {
        if let Some(snapshot) = self.store.load()? {
            if Utc::now() - snapshot.written_at < self.max_age {
                debug!("using cached whitelist");
                return Ok(snapshot.body);
            }
        }

        let body = self.fetch().await.map_err(|e| {
            metrics::record_whitelist_refresh("error");
            FeedError::WhitelistFetch(e.to_string())
        })?;
        self.store.save(&body)?;
        metrics::record_whitelist_refresh("ok");
        info!(url = %self.url, "refreshed whitelist");
        Ok(body)
    }

    /// Succeeds only if `owner` appears on its own line in the whitelist.
    pub async fn check(&self, owner: &str) -> Result<(), FeedError> {
        let contents = self.contents().await?;
        if contains(&contents, owner) {
            Ok(())
        } else {
            Err(FeedError::NotWhitelisted(owner.to_string()))
        }
    }

    async fn fetch(&self) -> Result<String, FeedError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(resp.text().await?)
    }
}

/// Whether `owner` is one of the (whitespace-trimmed) lines of `contents`.
pub fn contains(contents: &str, owner: &str) -> bool {
    contents.lines().any(|line| line.trim() == owner)
}
