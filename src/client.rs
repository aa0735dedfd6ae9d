use {
  super::*,
  reqwest::header::{ACCEPT, CACHE_CONTROL},
};

#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

impl Client {
  pub(crate) const DEFAULT_API_BASE_URL: &str = "https://public.api.bsky.app";

  const THREAD_ENDPOINT: &str = "xrpc/app.bsky.feed.getPostThread";

  pub(crate) async fn fetch_thread(&self, uri: &PostUri) -> Result<Thread> {
    let url = self.thread_url();

    tracing::debug!(%uri, %url, "fetching thread");

    let response = self
      .client
      .get(&url)
      .query(&[("uri", uri.as_str())])
      .header(ACCEPT, "application/json")
      .header(CACHE_CONTROL, "no-store")
      .send()
      .await
      .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();

      tracing::error!(%status, %body, "thread fetch failed");

      bail!(
        "failed to fetch thread: {}",
        status.canonical_reason().unwrap_or(status.as_str())
      );
    }

    let thread = response
      .json::<ThreadResponse>()
      .await
      .context("failed to decode thread response")?
      .into_thread();

    if let Err(error) = &thread {
      tracing::error!(%error, %uri, "thread response rejected");
    }

    thread
  }

  pub(crate) fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      client: reqwest::Client::new(),
    }
  }

  fn thread_url(&self) -> String {
    format!(
      "{}/{}",
      self.base_url.trim_end_matches('/'),
      Self::THREAD_ENDPOINT
    )
  }
}
