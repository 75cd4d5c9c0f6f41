use crate::error::FetchError;
use crate::fetcher::{HttpFetcher, ReqwestFetcher};

/// Written into the Dockerfile when the `.sha256` file could not be fetched.
pub const MISSING_SHA256: &str = "MISSING_SHA256_ERROR";

/// Written into the Dockerfile when the `.sha256` response body was unreadable.
pub const HTTP_ERROR: &str = "HTTP_ERROR";

/// Fetches published `.sha256` sidecar files.
///
/// Checksums are advisory: every failure is logged and mapped to a sentinel
/// string so that generation carries on.
pub struct ChecksumClient<F: HttpFetcher = ReqwestFetcher> {
    fetcher: F,
}

impl ChecksumClient<ReqwestFetcher> {
    pub fn new() -> Self {
        Self {
            fetcher: ReqwestFetcher::new(),
        }
    }
}

impl Default for ChecksumClient<ReqwestFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: HttpFetcher> ChecksumClient<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Returns the digest published for `package_url`, or a sentinel.
    pub async fn sha256(&self, package_url: &str) -> String {
        let url = format!("{package_url}.sha256");
        tracing::info!(url = %url, "fetching checksum");

        match self.fetcher.get_text(&url).await {
            Ok(body) => match parse_sha256(&body) {
                Some(digest) => digest.to_owned(),
                None => {
                    tracing::warn!(url = %url, "checksum file is empty");
                    MISSING_SHA256.to_owned()
                }
            },
            Err(e @ FetchError::Body { .. }) => {
                tracing::warn!(error = %e, "error downloading content of SHA256 file");
                HTTP_ERROR.to_owned()
            }
            Err(e) => {
                tracing::warn!(error = %e, "error downloading SHA256 file");
                MISSING_SHA256.to_owned()
            }
        }
    }
}

/// First whitespace-delimited token of a `sha256sum`-style body.
pub fn parse_sha256(body: &str) -> Option<&str> {
    body.split_whitespace().next()
}
