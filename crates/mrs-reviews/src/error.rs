use std::fmt;

/// A structural element a review page must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ratings,
    ReviewText,
    MovieTitle,
    AlignedReviews,
    IndexRows,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ratings => "ratings",
            Self::ReviewText => "review text",
            Self::MovieTitle => "movie title",
            Self::AlignedReviews => "aligned reviews",
            Self::IndexRows => "index rows",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The element handed to the score calculator is not a rating widget.
    #[error("expected a rating widget, got {found}")]
    InvalidInput { found: String },
    #[error("{0} not found")]
    NotFound(Field),
}
