use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::FetchError;
use crate::profile::HeaderProfile;

#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    pub profile: &'a HeaderProfile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The server rejected the client identity.
    pub fn is_blocked(&self) -> bool {
        self.status == 403
    }
}

/// Minimal HTTP capability the fetcher relies on.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, request: FetchRequest<'_>) -> Result<Response, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> reqwest::Result<Self> {
        let inner = reqwest::ClientBuilder::new()
            .gzip(true)
            .deflate(true)
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, request: FetchRequest<'_>) -> Result<Response, FetchError> {
        let headers = header_map(request.profile)?;
        let start = Instant::now();
        let resp = self.inner.get(request.url).headers(headers).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        Ok(Response {
            status,
            body,
            elapsed: start.elapsed(),
        })
    }
}

fn header_map(profile: &HeaderProfile) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    for (name, value) in profile.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_to_header_map() {
        let headers = header_map(&HeaderProfile::firefox()).unwrap();
        assert_eq!(headers.len(), 6);
        assert!(headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .contains("Firefox"));
    }

    #[test]
    fn invalid_header_name() {
        let profile = HeaderProfile::new("broken", [("Bad Header", "x")]);
        assert!(matches!(
            header_map(&profile),
            Err(FetchError::InvalidHeader(_))
        ));
    }

    #[test]
    fn blocked_status() {
        let resp = Response {
            status: 403,
            body: vec![],
            elapsed: Duration::ZERO,
        };
        assert!(resp.is_blocked());
        assert!(!resp.is_success());
    }
}
