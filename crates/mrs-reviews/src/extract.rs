use mrs_document::{Document, Element};

use crate::config::SiteLocator;
use crate::error::{ExtractError, Field};
use crate::score::calculate_score;

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub text: String,
    pub score: f64,
}

/// Reviews of one movie page, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageExtraction {
    pub title: String,
    pub reviews: Vec<Review>,
}

/// Extracts the movie title and its scored reviews.
///
/// Scores and texts are paired by position, a page where their counts differ
/// is rejected as a whole with [`Field::AlignedReviews`].
pub fn extract<D>(document: &D, locator: &SiteLocator) -> Result<PageExtraction, ExtractError>
where
    D: Document,
{
    let widgets = document.find_all(&locator.rating_widget);
    if widgets.is_empty() {
        return Err(ExtractError::NotFound(Field::Ratings));
    }
    let scores = widgets
        .into_iter()
        .map(|widget| calculate_score(widget, locator))
        .collect::<Result<Vec<_>, _>>()?;

    let texts = document
        .find_all(&locator.review_text)
        .iter()
        .map(|elem| elem.text().trim().to_string())
        .collect::<Vec<_>>();
    if texts.is_empty() {
        return Err(ExtractError::NotFound(Field::ReviewText));
    }

    let title = extract_title(document, locator)?;

    if scores.len() != texts.len() {
        return Err(ExtractError::NotFound(Field::AlignedReviews));
    }

    let reviews = texts
        .into_iter()
        .zip(scores)
        .map(|(text, score)| Review { text, score })
        .collect();

    Ok(PageExtraction { title, reviews })
}

fn extract_title<D>(document: &D, locator: &SiteLocator) -> Result<String, ExtractError>
where
    D: Document,
{
    let raw = document
        .find_first(&locator.title)
        .map(|elem| elem.text())
        .ok_or(ExtractError::NotFound(Field::MovieTitle))?;

    let raw = raw.trim();
    let title = raw
        .strip_suffix(locator.title_suffix.trim())
        .unwrap_or(raw)
        .trim();

    if title.is_empty() {
        return Err(ExtractError::NotFound(Field::MovieTitle));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use mrs_document::HtmlDocument;

    use super::*;

    fn review(text: &str, filled: usize, half: usize) -> String {
        format!(
            r#"<div class="audience-reviews__item">
                <span class="star-display">{}{}</span>
                <p class="audience-reviews__review">  {text}
                </p>
            </div>"#,
            r#"<span class="star-display__filled"></span>"#.repeat(filled),
            r#"<span class="star-display__half"></span>"#.repeat(half),
        )
    }

    fn page(title: &str, body: &str) -> HtmlDocument {
        HtmlDocument::parse(&format!(
            r#"<html><body><h2 class="panel-heading">{title}</h2>{body}</body></html>"#
        ))
    }

    #[test]
    fn reviews_in_document_order() {
        let body = [
            review("Loved it", 5, 0),
            review("Meh", 2, 1),
            review("Fine", 3, 0),
        ]
        .concat();
        let doc = page("Parasite Reviews", &body);

        let page = extract(&doc, &SiteLocator::default()).unwrap();

        assert_eq!(page.title, "Parasite");
        let got = page
            .reviews
            .iter()
            .map(|r| (r.text.as_str(), r.score))
            .collect::<Vec<_>>();
        assert_eq!(got, vec![("Loved it", 5.0), ("Meh", 2.5), ("Fine", 3.0)]);
    }

    #[test]
    fn misaligned_page_is_rejected() {
        let body = format!(
            "{}{}{}",
            review("One", 1, 0),
            review("Two", 2, 0),
            r#"<span class="star-display"><span class="star-display__filled"></span></span>"#
        );
        let doc = page("Us Reviews", &body);

        assert_eq!(
            extract(&doc, &SiteLocator::default()),
            Err(ExtractError::NotFound(Field::AlignedReviews))
        );
    }

    #[test]
    fn missing_ratings() {
        let doc = page(
            "Us Reviews",
            r#"<p class="audience-reviews__review">No stars</p>"#,
        );
        assert_eq!(
            extract(&doc, &SiteLocator::default()),
            Err(ExtractError::NotFound(Field::Ratings))
        );
    }

    #[test]
    fn missing_review_text() {
        let doc = page(
            "Us Reviews",
            r#"<span class="star-display"><span class="star-display__half"></span></span>"#,
        );
        assert_eq!(
            extract(&doc, &SiteLocator::default()),
            Err(ExtractError::NotFound(Field::ReviewText))
        );
    }

    #[test]
    fn missing_or_empty_title() {
        let body = review("Good", 4, 0);

        let no_title = HtmlDocument::parse(&format!("<html><body>{body}</body></html>"));
        assert_eq!(
            extract(&no_title, &SiteLocator::default()),
            Err(ExtractError::NotFound(Field::MovieTitle))
        );

        let only_suffix = page(" Reviews ", &body);
        assert_eq!(
            extract(&only_suffix, &SiteLocator::default()),
            Err(ExtractError::NotFound(Field::MovieTitle))
        );
    }

    #[test]
    fn ratings_are_checked_before_title() {
        let doc = HtmlDocument::parse("<html><body><p>nothing here</p></body></html>");
        assert_eq!(
            extract(&doc, &SiteLocator::default()),
            Err(ExtractError::NotFound(Field::Ratings))
        );
    }
}
