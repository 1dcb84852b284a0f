use std::fmt;

use crate::error::ParameterError;

/// User-facing filter parameters.
///
/// Integer fields are signed so that nonsense input can be represented and
/// rejected by [`FilterParams::validate`] instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Number of consecutive vertices examined and removed at once.
    /// Must be odd, at least 3 and shorter than the contour.
    pub window: i64,
    /// How many protrusions to remove at most.
    pub protrusions: i64,
    /// Minimum normalized rank a window needs to be removed.
    /// Ranks are normalized to a maximum of 1.0, so `0.0` accepts everything.
    pub acceptance: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            window: 15,
            protrusions: 1,
            acceptance: 0.0,
        }
    }
}

impl fmt::Display for FilterParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "window={} pnum={} alev={}",
            self.window, self.protrusions, self.acceptance
        )
    }
}

impl FilterParams {
    /// Creates a parameter set.
    #[must_use]
    pub fn new(window: i64, protrusions: i64, acceptance: f64) -> Self {
        Self {
            window,
            protrusions,
            acceptance,
        }
    }

    /// Checks the parameters against a contour of `points` vertices.
    ///
    /// # Errors
    ///
    /// In order of precedence:
    /// - `InvalidWindow` if the window is even or not positive
    /// - `WindowTooSmall` if the window is shorter than 3
    /// - `WindowTooLarge` if the window is not shorter than the contour
    /// - `InvalidProtrusionCount` if fewer than one protrusion is requested
    /// - `InvalidAcceptanceLevel` if the acceptance level is negative or NaN
    pub fn validate(&self, points: usize) -> Result<WindowSpec, ParameterError> {
        let window = self.window;
        if window <= 0 || window % 2 == 0 {
            return Err(ParameterError::InvalidWindow { window });
        }
        if window < 3 {
            return Err(ParameterError::WindowTooSmall { window });
        }
        let too_large = ParameterError::WindowTooLarge { window, points };
        let window = usize::try_from(window).map_err(|_| too_large.clone())?;
        if window >= points {
            return Err(too_large);
        }
        if self.protrusions <= 0 {
            return Err(ParameterError::InvalidProtrusionCount {
                count: self.protrusions,
            });
        }
        if self.acceptance.is_nan() || self.acceptance < 0.0 {
            return Err(ParameterError::InvalidAcceptanceLevel {
                level: self.acceptance,
            });
        }

        Ok(WindowSpec {
            window,
            target: usize::try_from(self.protrusions).unwrap_or(usize::MAX),
            acceptance: self.acceptance,
        })
    }
}

/// Parameters that passed validation against a particular contour length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    window: usize,
    target: usize,
    acceptance: f64,
}

impl WindowSpec {
    /// Window length, odd and in `[3, n)`.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of protrusions to remove, at least 1.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Minimum normalized rank for acceptance, non-negative.
    #[must_use]
    pub fn acceptance(&self) -> f64 {
        self.acceptance
    }
}
