mod client;
mod config;
mod error;
mod fetcher;
mod profile;

pub use client::{FetchRequest, HttpClient, ReqwestClient, Response};
pub use config::FetcherConfig;
pub use error::{BatchError, FetchError};
pub use fetcher::{fetch_all, fetch_batch, fetch_one, Batch, FetchResult};
pub use profile::HeaderProfile;

pub use async_trait::async_trait;
