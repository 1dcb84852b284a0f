use thiserror::Error;

/// Top-level error type for the hat filter.
#[derive(Debug, Error)]
pub enum HatFilterError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Rejected filter parameters.
///
/// Every variant is raised before any scanning takes place, so the input
/// contour is never touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("window must be odd and positive, got {window}")]
    InvalidWindow { window: i64 },

    #[error("window must be at least 3, got {window}")]
    WindowTooSmall { window: i64 },

    #[error("window {window} is too long for a contour of {points} points")]
    WindowTooLarge { window: i64, points: usize },

    #[error("number of protrusions must be at least 1, got {count}")]
    InvalidProtrusionCount { count: i64 },

    #[error("acceptance level must be a non-negative number, got {level}")]
    InvalidAcceptanceLevel { level: f64 },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate polygon: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`HatFilterError`].
pub type Result<T> = std::result::Result<T, HatFilterError>;
