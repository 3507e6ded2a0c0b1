mod assemble;
mod config;
mod discovery;
mod error;
mod extract;
mod pipeline;
mod score;
pub mod writer;

pub use assemble::{assemble, Assembly, Dataset, ReviewRecord, SkipReason, SkippedPage};
pub use config::{ScrapeConfig, SiteConfig, SiteLocator};
pub use discovery::discover;
pub use error::{ExtractError, Field};
pub use extract::{extract, PageExtraction, Review};
pub use pipeline::scrape_year;
pub use score::calculate_score;

pub use anyhow;
