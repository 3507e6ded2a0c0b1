use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_CHARSET: &str = "ISO-8859-1,utf-8;q=0.7,*;q=0.3";
const ACCEPT_ENCODING: &str = "none";
const ACCEPT_LANGUAGE: &str = "en-CA,en;q=0.8";
const CONNECTION: &str = "keep-alive";

/// A named set of request headers impersonating a given browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderProfile {
    name: String,
    headers: BTreeMap<String, String>,
}

impl HeaderProfile {
    pub fn new<I, K, V>(name: &str, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.to_string(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn safari() -> Self {
        Self::browser(
            "safari",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/13.1 Safari/605.1.15",
        )
    }

    pub fn firefox() -> Self {
        Self::browser(
            "firefox",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.6; rv:16.0) Gecko/20100101 Firefox/16.0",
        )
    }

    fn browser(name: &str, user_agent: &str) -> Self {
        Self::new(
            name,
            [
                ("User-Agent", user_agent),
                ("Accept", ACCEPT),
                ("Accept-Charset", ACCEPT_CHARSET),
                ("Accept-Encoding", ACCEPT_ENCODING),
                ("Accept-Language", ACCEPT_LANGUAGE),
                ("Connection", CONNECTION),
            ],
        )
    }

    /// Default fallback chain: first profile is tried first.
    pub fn fallback_chain() -> Vec<Self> {
        vec![Self::safari(), Self::firefox()]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(header))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
