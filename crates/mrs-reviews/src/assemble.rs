use mrs_document::HtmlDocument;
use mrs_fetcher::{FetchError, FetchResult, Response};

use crate::config::SiteLocator;
use crate::error::ExtractError;
use crate::extract::{extract, PageExtraction};

/// Reviews as three parallel columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub titles: Vec<String>,
    pub texts: Vec<String>,
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewRecord<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub score: f64,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Appends one row per review, repeating the page title.
    pub fn push_page(&mut self, page: PageExtraction) {
        for review in page.reviews {
            self.titles.push(page.title.clone());
            self.texts.push(review.text);
            self.scores.push(review.score);
        }
    }

    pub fn records(&self) -> impl Iterator<Item = ReviewRecord<'_>> {
        self.titles
            .iter()
            .zip(&self.texts)
            .zip(&self.scores)
            .map(|((title, text), &score)| ReviewRecord {
                title: title.as_str(),
                text: text.as_str(),
                score,
            })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("{0}")]
    Transport(#[from] FetchError),
    #[error("status {0}")]
    Status(u16),
    #[error("{0}")]
    Extract(#[from] ExtractError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPage {
    pub url: String,
    pub reason: SkipReason,
}

/// Outcome of a run: the dataset and the pages left out of it.
#[derive(Debug, Default)]
pub struct Assembly {
    pub dataset: Dataset,
    pub pages: usize,
    pub skipped: Vec<SkippedPage>,
}

/// Extracts every fetched page in order, a failing page is recorded in
/// `skipped` and contributes no rows.
pub fn assemble(results: Vec<FetchResult>, locator: &SiteLocator) -> Assembly {
    let mut assembly = Assembly::default();

    for FetchResult { url, outcome } in results {
        match page_extraction(outcome, locator) {
            Ok(page) => {
                assembly.pages += 1;
                assembly.dataset.push_page(page);
            }
            Err(reason) => {
                log::warn!("Skipping page {url} got: {reason}");
                assembly.skipped.push(SkippedPage { url, reason });
            }
        }
    }

    assembly
}

fn page_extraction(
    outcome: Result<Response, FetchError>,
    locator: &SiteLocator,
) -> Result<PageExtraction, SkipReason> {
    let response = outcome?;
    if !response.is_success() {
        return Err(SkipReason::Status(response.status));
    }
    let document = HtmlDocument::from_bytes(&response.body);
    Ok(extract(&document, locator)?)
}
