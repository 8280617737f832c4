use anyhow::Result;
use reqwest::Client;
use tracing::{debug, warn};

/// Fetch the raw text of Gentoo's `profiles/license_groups`.
pub async fn fetch_license_groups(client: &Client, url: &str) -> Result<Option<String>> {
    debug!("Fetching license groups from {}", url);

    let response = client
        .get(url)
        .header("User-Agent", "freedom-checkr/0.1.0 (license freedom checker)")
        .send()
        .await?;

    if !response.status().is_success() {
        warn!("{} returned status {}", url, response.status());
        return Ok(None);
    }

    Ok(Some(response.text().await?))
}
