//! Tag and class locators.

use serde::{Deserialize, Serialize};

/// Locates elements by tag name and/or class attribute.
///
/// A query with neither `tag` nor `class` matches every element. When
/// `classless` is set, only elements without any `class` attribute match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub classless: bool,
}

impl Query {
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Default::default()
        }
    }

    pub fn class(class: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            ..Default::default()
        }
    }

    pub fn tag_and_class(tag: &str, class: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            class: Some(class.to_string()),
            classless: false,
        }
    }

    /// Only matches elements that carry no `class` attribute at all.
    pub fn without_class(mut self) -> Self {
        self.class = None;
        self.classless = true;
        self
    }

    /// Returns true if an element named `name` with the given raw `class`
    /// attribute satisfies this query.
    pub fn matches(&self, name: &str, class_attr: Option<&str>) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(name) {
                return false;
            }
        }
        match (&self.class, class_attr) {
            (Some(wanted), Some(classes)) => classes.split_whitespace().any(|c| c == wanted),
            (Some(_), None) => false,
            (None, Some(_)) => !self.classless,
            (None, None) => true,
        }
    }
}
