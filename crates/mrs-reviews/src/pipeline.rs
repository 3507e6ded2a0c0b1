use anyhow::bail;
use mrs_document::HtmlDocument;
use mrs_fetcher::{fetch_batch, fetch_one, BatchError, FetchRequest, HttpClient};

use crate::assemble::{assemble, Assembly};
use crate::config::ScrapeConfig;
use crate::discovery::discover;

/// Scrapes the user reviews of every movie in the top movies index of `year`.
pub async fn scrape_year<C>(client: &C, config: &ScrapeConfig, year: u32) -> anyhow::Result<Assembly>
where
    C: HttpClient,
{
    let site = &config.site;
    let base = site.base()?;
    let index_url = site.index_url(year)?;
    let profile = config
        .fetcher
        .profiles
        .first()
        .ok_or(BatchError::NoProfile(1))?;

    log::info!("Requesting top movies index of {year}: {index_url}");
    let request = FetchRequest {
        url: index_url.as_str(),
        profile,
    };
    let index = fetch_one(client, &config.fetcher, request).await?;
    if !index.is_success() {
        bail!("Index {index_url} responded with status {}", index.status);
    }

    let urls = {
        let document = HtmlDocument::from_bytes(&index.body);
        discover(&document, &site.locator, &base, &site.review_path)?
    };
    log::info!("Gathered {} review page URLs", urls.len());

    let batch = fetch_batch(client, &config.fetcher, &urls).await?;
    let assembly = assemble(batch.results, &site.locator);

    log::info!(
        "Assembled {} reviews from {} pages, skipped {} pages",
        assembly.dataset.len(),
        assembly.pages,
        assembly.skipped.len()
    );

    Ok(assembly)
}
