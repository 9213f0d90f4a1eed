use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use bytes::Bytes;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use tokio::sync::Semaphore;
use url::Url;

use crate::progress::Progress;

const MAX_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    semaphore: Arc<Semaphore>,
    progress: Option<Arc<Progress>>,
}

impl Fetcher {
    pub fn new(
        user_agent: &str,
        max_concurrency: usize,
        progress: Option<Arc<Progress>>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(max_concurrency.max(1))),
            progress,
        })
    }

    pub async fn get_bytes(&self, url: Url) -> anyhow::Result<(Bytes, HeaderMap)> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .context("acquire download permit")?;

        if let Some(p) = &self.progress {
            p.http_start(&url);
        }
        let res = self.get_with_retry(&url).await;
        if let Some(p) = &self.progress {
            match &res {
                Ok((bytes, _)) => p.http_ok(&url, bytes.len()),
                Err(_) => p.http_err(&url),
            }
        }
        res
    }

    async fn get_with_retry(&self, url: &Url) -> anyhow::Result<(Bytes, HeaderMap)> {
        let mut backoff = Duration::from_millis(250);

        for attempt in 1..=MAX_ATTEMPTS {
            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("GET {}", url))?;

            let status = resp.status();
            let headers = resp.headers().clone();

            if status.is_success() {
                let bytes = resp.bytes().await.context("read response body")?;
                tracing::debug!(%url, bytes = bytes.len(), "downloaded");
                return Ok((bytes, headers));
            }

            if status.as_u16() == 429 || status.as_u16() == 503 {
                let wait = retry_after_duration(&headers).unwrap_or(backoff);
                tracing::warn!(
                    %status,
                    attempt,
                    wait_ms = wait.as_millis(),
                    "throttled; backing off"
                );
                if let Some(p) = &self.progress {
                    p.http_throttled(url, status.as_u16(), wait);
                }
                tokio::time::sleep(wait).await;
                backoff = (backoff * 2).min(Duration::from_secs(10));
                continue;
            }

            return Err(anyhow!("GET {} failed with status {}", url, status));
        }

        Err(anyhow!("GET {} failed after retries", url))
    }
}

fn retry_after_duration(headers: &HeaderMap) -> Option<Duration> {
    let v = headers.get(RETRY_AFTER)?;
    let s = v.to_str().ok()?.trim();
    let seconds: u64 = s.parse().ok()?;
    Some(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static(" 3 "));
        assert_eq!(retry_after_duration(&headers), Some(Duration::from_secs(3)));
    }

    #[test]
    fn retry_after_http_date_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(retry_after_duration(&headers), None);
        assert_eq!(retry_after_duration(&HeaderMap::new()), None);
    }
}
