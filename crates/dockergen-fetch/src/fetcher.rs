use crate::error::FetchError;

/// Abstraction over outbound HTTP GETs for testability.
///
/// Production code uses [`ReqwestFetcher`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait HttpFetcher: Send + Sync {
    /// GET `url` and return the body of a 200 response as text.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher. No timeout is configured.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpFetcher for ReqwestFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_owned(),
            detail: e.to_string(),
        })
    }
}
