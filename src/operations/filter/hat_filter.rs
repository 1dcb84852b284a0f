use tracing::{debug, warn};

use super::assemble::assemble_output;
use super::index_range::{IndexRange, IndexRangeSet};
use super::params::FilterParams;
use super::scan::CandidateScanner;
use super::select::{ProtrusionSelector, Shortfall, ShortfallReason};
use crate::error::Result;
use crate::geometry::Contour;
use crate::math::Point2;

/// Result of one filter run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Surviving vertices in their original order.
    pub points: Vec<Point2>,
    /// Removed index ranges in ascending order. A window that wraps past
    /// the end of the contour appears as two ranges.
    pub removed: Vec<IndexRange>,
    /// Number of protrusions removed.
    pub found: usize,
    /// Set when fewer protrusions than requested were removed.
    pub shortfall: Option<Shortfall>,
}

impl FilterOutcome {
    /// Number of removed vertices.
    #[must_use]
    pub fn removed_count(&self) -> u64 {
        self.removed.iter().map(IndexRange::len).sum()
    }
}

/// Removes up to `protrusions` localized bumps from a closed contour.
///
/// # Algorithm
///
/// 1. **Scan**: a window of `window` vertices slides around the contour. Each
///    position is ranked by the signed circularity of the contour without the
///    window, divided by the spread of the window's own vertices. Ranks are
///    rescaled so the best is 1.0, and each window is flagged concave when all
///    its vertices lie inside the rest of the contour.
/// 2. **Select**: windows are taken greedily by rank. The best is always
///    taken; later ones must reach `acceptance`, share no vertex with earlier
///    picks and not be concave. Windows running past the end are split in two.
/// 3. **Assemble**: vertices covered by a picked window are dropped.
///
/// The filter holds only its parameters. Every run works on a read-only view
/// of the caller's points and keeps all tables local, so one filter can be
/// shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HatFilter {
    params: FilterParams,
}

impl HatFilter {
    /// Creates a filter with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn with_params(mut self, params: FilterParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the window length (odd, at least 3, shorter than the contour).
    #[must_use]
    pub fn with_window(mut self, window: i64) -> Self {
        self.params.window = window;
        self
    }

    /// Sets how many protrusions to remove at most.
    #[must_use]
    pub fn with_protrusions(mut self, protrusions: i64) -> Self {
        self.params.protrusions = protrusions;
        self
    }

    /// Sets the minimum normalized rank for removal.
    #[must_use]
    pub fn with_acceptance(mut self, acceptance: f64) -> Self {
        self.params.acceptance = acceptance;
        self
    }

    /// Current parameters.
    #[must_use]
    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// Filters `points`, returning the surviving vertices and a report of
    /// what was removed.
    ///
    /// # Errors
    ///
    /// Returns `HatFilterError::Parameter` if the parameters are invalid for
    /// a contour of this length. Nothing is computed in that case.
    pub fn execute(&self, points: &[Point2]) -> Result<FilterOutcome> {
        let window_spec = self.params.validate(points.len())?;
        debug!(params = %self.params, points = points.len(), "running hat filter");

        let contour = Contour::new(points);
        let table = CandidateScanner::new(contour, window_spec.window()).execute();
        let selection = ProtrusionSelector::new(&table, window_spec).execute();

        if let Some(shortfall) = &selection.shortfall {
            match shortfall.reason {
                ShortfallReason::NothingAboveAcceptance => debug!(%shortfall),
                ShortfallReason::BelowAcceptance | ShortfallReason::Exhausted => {
                    warn!(%shortfall);
                }
            }
        }

        let points = assemble_output(contour, &selection.ranges);
        debug!(
            removed = %DisplayRanges(&selection.ranges),
            remaining = points.len(),
            "hat filter done"
        );

        Ok(FilterOutcome {
            points,
            removed: selection.ranges.into_vec(),
            found: selection.found,
            shortfall: selection.shortfall,
        })
    }

    /// Like [`HatFilter::execute`], returning only the surviving vertices.
    ///
    /// # Errors
    ///
    /// Same as [`HatFilter::execute`].
    pub fn run(&self, points: &[Point2]) -> Result<Vec<Point2>> {
        self.execute(points).map(|outcome| outcome.points)
    }
}

struct DisplayRanges<'a>(&'a IndexRangeSet);

impl std::fmt::Display for DisplayRanges<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, r) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{r}")?;
        }
        f.write_str("}")
    }
}
