use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::debug;

use crate::config::HttpConfig;
use crate::utils::error::{AppError, Result};

/// Retrying HTTP transport shared by page fetches and image downloads.
///
/// Transient network failures are retried with exponentially doubling delay
/// plus random jitter; a definitive HTTP error status fails immediately.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch a page body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        self.retry(url, || async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            response.text().await
        })
        .await
    }

    /// Fetch a binary body, e.g. a product image.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {url}");
        self.retry(url, || async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        })
        .await
    }

    async fn retry<T, F, Fut>(&self, url: &str, action: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, reqwest::Error>>,
    {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(self.config.retry_delay_ms / 2)
            .map(jitter)
            .take(self.config.retry_attempts as usize);

        RetryIf::spawn(strategy, action, is_transient)
            .await
            .map_err(|source| AppError::Download {
                url: url.to_string(),
                source,
            })
    }
}

/// Connection resets, timeouts and protocol violations are worth another
/// attempt; an HTTP error status or a malformed request is not.
fn is_transient(error: &reqwest::Error) -> bool {
    if error.is_status() || error.is_builder() || error.is_redirect() {
        return false;
    }
    error.is_timeout()
        || error.is_connect()
        || error.is_request()
        || error.is_body()
        || error.is_decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_client_builds_from_default_config() {
        let config = AppConfig::default();
        assert!(HttpClient::new(config.http).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_wrapped_as_download_error() {
        let mut config = AppConfig::default().http;
        config.request_timeout = 1;
        config.retry_attempts = 1;
        config.retry_delay_ms = 10;
        let client = HttpClient::new(config).unwrap();

        // Port 9 (discard) is not listening in the test environment.
        let result = client.get_text("http://127.0.0.1:9/page.html").await;
        assert!(matches!(result, Err(AppError::Download { .. })));
    }
}
