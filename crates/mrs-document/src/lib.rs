pub mod document;
pub mod html;
pub mod query;

pub use crate::document::{Document, Element, Scope};
pub use crate::html::{HtmlDocument, HtmlElement};
pub use crate::query::Query;
