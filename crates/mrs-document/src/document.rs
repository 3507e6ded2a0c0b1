//! Parsing-backend independent document capability.

use crate::query::Query;

/// How far below an element a lookup descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// All descendants, in document order.
    Descendants,
    /// Direct children only.
    Children,
}

/// A reference to an element node borrowed from its document.
pub trait Element<'a>: Copy {
    /// The tag name, `None` for text and comment nodes.
    fn name(&self) -> Option<&'a str>;

    fn attr(&self, name: &str) -> Option<&'a str>;

    /// All the descendant text nodes content concatenated.
    fn text(&self) -> String;

    /// Elements below `self` matching `query`, in document order.
    fn find_all(&self, query: &Query, scope: Scope) -> Vec<Self>;

    fn find_first(&self, query: &Query) -> Option<Self> {
        self.find_all(query, Scope::Descendants).into_iter().next()
    }

    fn matches(&self, query: &Query) -> bool {
        match self.name() {
            Some(name) => query.matches(name, self.attr("class")),
            None => false,
        }
    }
}

/// A parsed document that can be queried by tag and class.
pub trait Document {
    type Elem<'a>: Element<'a>
    where
        Self: 'a;

    /// Every element of the document matching `query`, in document order.
    fn find_all(&self, query: &Query) -> Vec<Self::Elem<'_>>;

    fn find_first(&self, query: &Query) -> Option<Self::Elem<'_>> {
        self.find_all(query).into_iter().next()
    }
}
