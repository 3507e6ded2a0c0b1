//! HTML documents backed by the `select` crate.

use select::predicate::Any;

use crate::document::{Document, Element, Scope};
use crate::query::Query;

/// A parsed HTML document.
///
/// Parsing does not fail hard, malformed markup yields a best-effort tree.
pub struct HtmlDocument {
    inner: select::document::Document,
}

impl HtmlDocument {
    /// Parses a string of HTML as a document.
    pub fn parse(html: &str) -> Self {
        Self {
            inner: select::document::Document::from(html),
        }
    }

    /// Parses a raw response body, replacing invalid UTF-8 sequences.
    pub fn from_bytes(body: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(body))
    }
}

impl From<&str> for HtmlDocument {
    fn from(html: &str) -> Self {
        Self::parse(html)
    }
}

impl Document for HtmlDocument {
    type Elem<'a> = HtmlElement<'a>;

    fn find_all(&self, query: &Query) -> Vec<HtmlElement<'_>> {
        self.inner
            .find(Any)
            .map(HtmlElement)
            .filter(|elem| elem.matches(query))
            .collect()
    }
}

/// An element of an [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct HtmlElement<'a>(select::node::Node<'a>);

impl<'a> Element<'a> for HtmlElement<'a> {
    fn name(&self) -> Option<&'a str> {
        self.0.name()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.attr(name)
    }

    fn text(&self) -> String {
        self.0.text()
    }

    fn find_all(&self, query: &Query, scope: Scope) -> Vec<Self> {
        let matching = |node: &select::node::Node<'a>| HtmlElement(*node).matches(query);
        match scope {
            Scope::Descendants => self
                .0
                .descendants()
                .filter(matching)
                .map(HtmlElement)
                .collect(),
            Scope::Children => self
                .0
                .children()
                .filter(matching)
                .map(HtmlElement)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <table>
                <tr class="header"><th>Rank</th></tr>
                <tr><td><a href="/m/first">First</a></td></tr>
                <tr><td>no link</td></tr>
            </table>
            <div class="outer">
                <span class="leaf">1</span>
                <div class="inner"><span class="leaf">2</span></div>
                <span class="leaf">3</span>
            </div>
        </body></html>
    "#;

    #[test]
    fn find_all_in_document_order() {
        let doc = HtmlDocument::parse(PAGE);
        let leaves = doc.find_all(&Query::class("leaf"));
        let texts = leaves.iter().map(|e| e.text()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn children_scope_is_not_recursive() {
        let doc = HtmlDocument::parse(PAGE);
        let outer = doc.find_first(&Query::class("outer")).unwrap();

        let direct = outer.find_all(&Query::class("leaf"), Scope::Children);
        assert_eq!(direct.len(), 2);

        let all = outer.find_all(&Query::class("leaf"), Scope::Descendants);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn classless_rows_and_attributes() {
        let doc = HtmlDocument::parse(PAGE);
        let rows = doc.find_all(&Query::tag("tr").without_class());
        assert_eq!(rows.len(), 2);

        let link = rows[0].find_first(&Query::tag("a")).unwrap();
        assert_eq!(link.attr("href"), Some("/m/first"));
        assert!(rows[1].find_first(&Query::tag("a")).is_none());
    }

    #[test]
    fn text_nodes_never_match() {
        let doc = HtmlDocument::parse("<p>hello</p>");
        let everything = doc.find_all(&Query::default());
        assert!(everything.iter().all(|e| e.name().is_some()));
        assert!(everything.iter().any(|e| e.name() == Some("p")));
    }

    #[test]
    fn lossy_bytes() {
        let doc = HtmlDocument::from_bytes(b"<h2 class=\"t\">Caf\xe9</h2>");
        let title = doc.find_first(&Query::class("t")).unwrap();
        assert!(title.text().starts_with("Caf"));
    }
}
