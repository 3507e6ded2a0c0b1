use mrs_document::{Element, Scope};

use crate::config::SiteLocator;
use crate::error::ExtractError;

/// Score of a single rating widget: one point per filled slot, half a point
/// per half slot. Only the widget's direct children are counted.
pub fn calculate_score<'a, E>(widget: E, locator: &SiteLocator) -> Result<f64, ExtractError>
where
    E: Element<'a>,
{
    if !widget.matches(&locator.rating_widget) {
        return Err(ExtractError::InvalidInput {
            found: describe(&widget),
        });
    }

    let filled = widget.find_all(&locator.filled_slot, Scope::Children).len();
    let half = widget.find_all(&locator.half_slot, Scope::Children).len();

    Ok(filled as f64 + 0.5 * half as f64)
}

fn describe<'a, E: Element<'a>>(elem: &E) -> String {
    match (elem.name(), elem.attr("class")) {
        (Some(name), Some(class)) => format!("<{name} class=\"{class}\">"),
        (Some(name), None) => format!("<{name}>"),
        (None, _) => String::from("a non-element node"),
    }
}
