use tracing::trace;

use crate::geometry::Contour;
use crate::math::dispersion::dispersion_weight_2d;
use crate::math::polygon_2d::{all_points_inside_2d, circularity_2d};
use crate::math::{Point2, TOLERANCE};

/// Rank of the window starting at one contour index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateRecord {
    /// Index of the first window vertex in the original contour.
    pub start: usize,
    /// Weighted circularity as computed. Windows are ranked on this value.
    pub raw: f64,
    /// `raw` rescaled so the best window has exactly 1.0. Compared against
    /// the acceptance level.
    pub score: f64,
    /// `true` if every window vertex lies inside the contour formed by the
    /// remaining vertices, i.e. removing the window would cut a notch
    /// instead of trimming a bump.
    pub concave: bool,
}

/// Ranks for every window position of one contour, indexed by start vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateTable {
    records: Vec<CandidateRecord>,
}

impl CandidateTable {
    /// Builds a table from raw ranks, filling in each normalized `score`.
    ///
    /// The largest raw rank maps to 1.0 and the mapping never reorders
    /// records:
    /// - positive finite maximum: `raw / max`
    /// - infinite maximum: 1.0 for infinite ranks, 0.0 for the rest
    /// - negative maximum: `max / raw`, which stays in `(0, 1]`
    /// - zero maximum: the rest keep their negative raw value
    ///
    /// Records are re-indexed so that `start` matches position.
    #[must_use]
    pub fn normalized(mut records: Vec<CandidateRecord>) -> Self {
        let max = records
            .iter()
            .map(|r| r.raw)
            .fold(f64::NEG_INFINITY, f64::max);
        for (start, record) in records.iter_mut().enumerate() {
            record.start = start;
            record.score = normalize(record.raw, max);
        }
        Self { records }
    }

    /// All records, in start index order.
    #[must_use]
    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    /// Record of the window starting at `start`.
    #[must_use]
    pub fn get(&self, start: usize) -> Option<&CandidateRecord> {
        self.records.get(start)
    }

    /// Number of window positions (equal to the contour length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest-ranked record; the lowest start index wins a tie.
    #[must_use]
    pub fn best(&self) -> Option<&CandidateRecord> {
        self.records.iter().fold(None, |best, r| match best {
            Some(b) if b.raw >= r.raw => Some(b),
            _ => Some(r),
        })
    }

    /// Records by descending raw rank. Equal ranks keep ascending start order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&CandidateRecord> {
        let mut ranked: Vec<&CandidateRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.raw.total_cmp(&a.raw));
        ranked
    }
}

fn normalize(raw: f64, max: f64) -> f64 {
    if raw.is_nan() {
        f64::NEG_INFINITY
    } else if raw >= max {
        1.0
    } else if max.is_infinite() {
        0.0
    } else if max > 0.0 {
        raw / max
    } else if max < 0.0 {
        max / raw
    } else {
        raw
    }
}

/// Circularity divided by dispersion weight.
///
/// A weight within `TOLERANCE` of zero counts as an exact zero divisor, so
/// a perfectly compact window lands at the infinity matching the sign of
/// the circularity.
fn weighted_circularity(circularity: f64, weight: f64) -> f64 {
    if weight > TOLERANCE {
        circularity / weight
    } else if circularity > 0.0 {
        f64::INFINITY
    } else if circularity < 0.0 {
        f64::NEG_INFINITY
    } else {
        0.0
    }
}

/// Slides a window around a closed contour and ranks every position.
///
/// For each start index the contour is split into the window and the
/// complementary run of vertices. The rank is the signed circularity of the
/// complement divided by the dispersion of the window's own vertices, so on
/// a counter-clockwise contour compact spikes whose removal leaves a round
/// shape rank highest.
///
/// Windows are read through modulo-N indexing; the source points are never
/// rotated or copied in place.
#[derive(Debug)]
pub struct CandidateScanner<'a> {
    contour: Contour<'a>,
    window: usize,
}

impl<'a> CandidateScanner<'a> {
    /// Creates a scanner for windows of `window` vertices.
    #[must_use]
    pub fn new(contour: Contour<'a>, window: usize) -> Self {
        Self { contour, window }
    }

    /// Ranks every window position and normalizes the ranks.
    #[must_use]
    pub fn execute(&self) -> CandidateTable {
        let n = self.contour.len();
        let mut window_pts: Vec<Point2> = Vec::with_capacity(self.window);
        let mut rest_pts: Vec<Point2> = Vec::with_capacity(n.saturating_sub(self.window));

        let raw = (0..n)
            .map(|start| self.score_at(start, &mut window_pts, &mut rest_pts))
            .collect();
        CandidateTable::normalized(raw)
    }

    /// Raw rank of the window starting at `start`; `score` is filled in later.
    fn score_at(
        &self,
        start: usize,
        window_pts: &mut Vec<Point2>,
        rest_pts: &mut Vec<Point2>,
    ) -> CandidateRecord {
        window_pts.clear();
        window_pts.extend(self.contour.window(start, self.window));
        rest_pts.clear();
        rest_pts.extend(self.contour.complement(start, self.window));

        let circularity = circularity_2d(rest_pts);
        let weight = dispersion_weight_2d(window_pts);
        let raw = weighted_circularity(circularity, weight);
        let concave = all_points_inside_2d(rest_pts, window_pts);

        trace!(start, circularity, weight, raw, concave, "scanned window");

        CandidateRecord {
            start,
            raw,
            score: 0.0,
            concave,
        }
    }
}
