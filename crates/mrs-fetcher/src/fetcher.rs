use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use futures::{stream, StreamExt};
use tokio::time::timeout;

use crate::client::{FetchRequest, HttpClient, Response};
use crate::config::FetcherConfig;
use crate::error::{BatchError, FetchError};
use crate::profile::HeaderProfile;

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub outcome: Result<Response, FetchError>,
}

impl FetchResult {
    pub fn response(&self) -> Option<&Response> {
        self.outcome.as_ref().ok()
    }

    fn is_blocked(&self) -> bool {
        self.response().map_or(false, Response::is_blocked)
    }
}

/// Results of a completed batch, index-aligned with the requested URLs.
#[derive(Debug)]
pub struct Batch {
    pub results: Vec<FetchResult>,
    pub attempt: usize,
    pub profile: String,
    /// Cumulative time spent by all responses
    pub elapsed: Duration,
}

pub async fn fetch_one<C>(
    client: &C,
    config: &FetcherConfig,
    request: FetchRequest<'_>,
) -> Result<Response, FetchError>
where
    C: HttpClient,
{
    match timeout(config.timeout(), client.get(request)).await {
        Ok(res) => res,
        Err(_) => Err(FetchError::Timeout(config.timeout())),
    }
}

/// Fetches `urls` starting with the first profile of the configured chain.
pub fn fetch_batch<'a, C>(
    client: &'a C,
    config: &'a FetcherConfig,
    urls: &'a [String],
) -> Pin<Box<dyn Future<Output = Result<Batch, BatchError>> + 'a>>
where
    C: HttpClient,
{
    fetch_all(client, config, urls, &config.profiles, 1)
}

/// Fetches every URL under `profiles[attempt - 1]`.
///
/// A single 403 in the batch discards it and the whole batch is fetched again
/// with the next profile, as long as one is left within `max_attempts`.
/// Otherwise the batch fails with [`BatchError::Blocked`] and requests still
/// in flight are dropped.
pub fn fetch_all<'a, C>(
    client: &'a C,
    config: &'a FetcherConfig,
    urls: &'a [String],
    profiles: &'a [HeaderProfile],
    attempt: usize,
) -> Pin<Box<dyn Future<Output = Result<Batch, BatchError>> + 'a>>
where
    C: HttpClient,
{
    Box::pin(async move {
        let profile = attempt
            .checked_sub(1)
            .and_then(|i| profiles.get(i))
            .ok_or(BatchError::NoProfile(attempt))?;
        let has_fallback = attempt < config.max_attempts && attempt < profiles.len();

        log::info!(
            "Fetching {} pages with profile `{}` (attempt {attempt})",
            urls.len(),
            profile.name()
        );

        let mut slots: Vec<Option<FetchResult>> = Vec::with_capacity(urls.len());
        slots.resize_with(urls.len(), || None);

        let mut in_flight = stream::iter(urls.iter().enumerate())
            .map(move |(idx, url)| async move {
                let request = FetchRequest {
                    url: url.as_str(),
                    profile,
                };
                let outcome = fetch_one(client, config, request).await;
                if let Err(e) = &outcome {
                    log::warn!("Request failed for {url}: {e}");
                }
                let result = FetchResult {
                    url: url.clone(),
                    outcome,
                };
                (idx, result)
            })
            .buffer_unordered(config.concurrency.max(1));

        while let Some((idx, result)) = in_flight.next().await {
            if result.is_blocked() && !has_fallback {
                return Err(BatchError::Blocked {
                    attempt,
                    profile: profile.name().to_string(),
                });
            }
            slots[idx] = Some(result);
        }

        let results = slots.into_iter().flatten().collect::<Vec<_>>();

        if results.iter().any(FetchResult::is_blocked) {
            log::warn!(
                "Received 403 with profile `{}`, retrying the whole batch with the next profile",
                profile.name()
            );
            return fetch_all(client, config, urls, profiles, attempt + 1).await;
        }

        if results.iter().all(|r| r.outcome.is_err()) {
            return Err(BatchError::EmptyResult(urls.len()));
        }

        let elapsed = results
            .iter()
            .filter_map(FetchResult::response)
            .map(|r| r.elapsed)
            .sum::<Duration>();
        log::info!(
            "Received {} responses in {:.1}s",
            results.iter().filter(|r| r.outcome.is_ok()).count(),
            elapsed.as_secs_f64()
        );

        Ok(Batch {
            results,
            attempt,
            profile: profile.name().to_string(),
            elapsed,
        })
    })
}
