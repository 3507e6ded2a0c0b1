use mrs_document::Query;
use mrs_fetcher::FetcherConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::writer::CsvWriterConfig;

/// Everything a scraping run needs, usually read from a yaml file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeConfig {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub csv: CsvWriterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the top movies index, `{year}` is substituted
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Appended to each movie URL found on the index
    #[serde(default = "default_review_path")]
    pub review_path: String,

    #[serde(default)]
    pub locator: SiteLocator,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index_path: default_index_path(),
            review_path: default_review_path(),
            locator: SiteLocator::default(),
        }
    }
}

impl SiteConfig {
    pub fn base(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    /// The index path is appended to the base URL, keeping any base path.
    pub fn index_url(&self, year: u32) -> Result<Url, url::ParseError> {
        let path = self.index_path.replace("{year}", &year.to_string());
        Url::parse(&format!("{}{path}", self.base_url.trim_end_matches('/')))
    }
}

fn default_base_url() -> String {
    String::from("https://www.rottentomatoes.com")
}

fn default_index_path() -> String {
    String::from("/top/bestofrt/?year={year}")
}

fn default_review_path() -> String {
    String::from("/reviews?type=user")
}

/// Tag and class identifiers of the scraped site markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteLocator {
    pub index_row: Query,
    pub index_link: Query,
    pub link_attr: String,
    pub title: Query,
    /// Decoration trailing the title text, e.g. "Joker Reviews"
    pub title_suffix: String,
    pub review_text: Query,
    pub rating_widget: Query,
    pub filled_slot: Query,
    pub half_slot: Query,
}

impl Default for SiteLocator {
    fn default() -> Self {
        Self {
            index_row: Query::tag("tr").without_class(),
            index_link: Query::tag("a"),
            link_attr: String::from("href"),
            title: Query::tag_and_class("h2", "panel-heading"),
            title_suffix: String::from(" Reviews"),
            review_text: Query::tag_and_class("p", "audience-reviews__review"),
            rating_widget: Query::class("star-display"),
            filled_slot: Query::class("star-display__filled"),
            half_slot: Query::class("star-display__half"),
        }
    }
}
