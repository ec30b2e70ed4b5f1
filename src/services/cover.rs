use anyhow::{anyhow, Result};
use async_trait::async_trait;
use url::Url;

use crate::util::join_url;

/// Open Library answers `default=false` lookups it has no cover for by
/// leaving the flag on the final URL.
const NO_PLACEHOLDER_FLAG: &str = "default=false";

/// Best-effort cover image discovery. Implementations swallow every failure
/// and report it as "no cover".
#[async_trait]
pub trait CoverLookup: Send + Sync {
    async fn cover_url(&self, title: &str) -> Option<String>;
}

pub struct OpenLibraryCovers {
    client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryCovers {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// `<base>/b/title/<title>-L.jpg?default=false`, with the title
    /// percent-encoded as a single path segment. A path on the base URL is
    /// kept as a prefix.
    pub fn lookup_url(&self, title: &str) -> Result<Url> {
        let base = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        let mut url = join_url(&base, "b/title/")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("cover api url cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push(&format!("{}-L.jpg", title));
        url.query_pairs_mut().append_pair("default", "false");
        Ok(url)
    }

    async fn fetch_cover(&self, title: &str) -> Result<Option<String>> {
        let url = self.lookup_url(title)?;
        // reqwest follows redirects, so `response.url()` is where we ended up.
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().as_str();
        if final_url.contains(NO_PLACEHOLDER_FLAG) {
            return Ok(None);
        }
        Ok(Some(final_url.to_string()))
    }
}

#[async_trait]
impl CoverLookup for OpenLibraryCovers {
    async fn cover_url(&self, title: &str) -> Option<String> {
        match self.fetch_cover(title).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                log::info!("No cover found for {}", title);
                None
            }
            Err(e) => {
                log::debug!("cover lookup failed: {:?}", e);
                log::info!("No cover found for {}", title);
                None
            }
        }
    }
}
