use mrs_document::{Document, Element};
use url::Url;

use crate::config::SiteLocator;
use crate::error::{ExtractError, Field};

/// Review page URLs of every movie listed on an index page.
///
/// Rows without a usable link are logged and skipped.
pub fn discover<D>(
    document: &D,
    locator: &SiteLocator,
    base: &Url,
    review_path: &str,
) -> Result<Vec<String>, ExtractError>
where
    D: Document,
{
    let rows = document.find_all(&locator.index_row);
    if rows.is_empty() {
        return Err(ExtractError::NotFound(Field::IndexRows));
    }

    let mut urls = Vec::with_capacity(rows.len());
    for row in rows {
        let href = row
            .find_first(&locator.index_link)
            .and_then(|link| link.attr(&locator.link_attr))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        let href = match href {
            Some(href) => href,
            None => {
                log::warn!("Skipping index row without link");
                continue;
            }
        };

        match base.join(href) {
            Ok(movie_url) => {
                let movie_url = movie_url.as_str().trim_end_matches('/');
                urls.push(format!("{movie_url}{review_path}"));
            }
            Err(e) => log::warn!("Skipping index row with link {href} got: {e}"),
        }
    }

    Ok(urls)
}
