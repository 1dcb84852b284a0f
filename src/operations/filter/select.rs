use std::fmt;

use tracing::trace;

use super::index_range::{IndexRange, IndexRangeSet};
use super::params::WindowSpec;
use super::scan::CandidateTable;

/// Why fewer protrusions than requested were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortfallReason {
    /// Even the best window ranked below the acceptance level; nothing was removed.
    NothingAboveAcceptance,
    /// The remaining windows ranked below the acceptance level.
    BelowAcceptance,
    /// Every window was examined; the rest overlapped earlier picks or were concave.
    Exhausted,
}

impl fmt::Display for ShortfallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NothingAboveAcceptance => "no window reaches the acceptance level",
            Self::BelowAcceptance => "remaining windows rank below the acceptance level",
            Self::Exhausted => "no further candidates, consider a smaller window",
        };
        f.write_str(text)
    }
}

/// Non-fatal report that the requested number of protrusions was not reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub found: usize,
    pub requested: usize,
    pub reason: ShortfallReason,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removed {} of {} protrusions: {}",
            self.found, self.requested, self.reason
        )
    }
}

/// Windows chosen for removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Accepted index ranges; a wrapped window contributes two.
    pub ranges: IndexRangeSet,
    /// Number of accepted windows.
    pub found: usize,
    pub shortfall: Option<Shortfall>,
}

/// Index ranges covered by a window of `window` vertices starting at `start`
/// on a contour of `n` vertices.
///
/// A window running past the last vertex is split into `[start, n - 1]`
/// and `[0, window - (n - start) - 1]`.
#[must_use]
pub fn window_ranges(start: usize, window: usize, n: usize) -> Vec<IndexRange> {
    if start + window > n {
        let head = window - (n - start);
        vec![
            IndexRange::from_indices(start, n - 1),
            IndexRange::from_indices(0, head - 1),
        ]
    } else {
        vec![IndexRange::from_indices(start, start + window - 1)]
    }
}

/// Greedy choice of the best non-overlapping windows.
///
/// Windows are visited by descending raw rank. The best one is always taken.
/// Each later one is taken only if its normalized score reaches the
/// acceptance level, shares no vertex with a window already taken, and is not concave.
/// Visiting stops once the requested count is reached, at the first window
/// below the acceptance level, or when the table runs out.
#[derive(Debug)]
pub struct ProtrusionSelector<'a> {
    table: &'a CandidateTable,
    window_spec: WindowSpec,
}

impl<'a> ProtrusionSelector<'a> {
    /// Creates a selector over a normalized candidate table.
    #[must_use]
    pub fn new(table: &'a CandidateTable, window_spec: WindowSpec) -> Self {
        Self { table, window_spec }
    }

    /// Runs the selection.
    #[must_use]
    pub fn execute(&self) -> Selection {
        let n = self.table.len();
        let requested = self.window_spec.target();
        let acceptance = self.window_spec.acceptance();

        let shortfall = |found, reason| {
            Some(Shortfall {
                found,
                requested,
                reason,
            })
        };

        match self.table.best() {
            Some(best) if best.score >= acceptance => {}
            _ => {
                return Selection {
                    shortfall: shortfall(0, ShortfallReason::NothingAboveAcceptance),
                    ..Selection::default()
                };
            }
        }

        let mut ranges = IndexRangeSet::new();
        let mut found = 0;
        let mut reason = ShortfallReason::Exhausted;

        for candidate in self.table.ranked() {
            if found == requested {
                break;
            }
            if found > 0 {
                if candidate.score < acceptance {
                    reason = ShortfallReason::BelowAcceptance;
                    break;
                }
                if candidate.concave {
                    trace!(start = candidate.start, "skipped concave window");
                    continue;
                }
            }

            let window = window_ranges(candidate.start, self.window_spec.window(), n);
            if ranges.insert_all(&window) {
                found += 1;
                trace!(
                    start = candidate.start,
                    score = candidate.score,
                    found,
                    "accepted window"
                );
            }
        }

        Selection {
            ranges,
            found,
            shortfall: if found < requested {
                shortfall(found, reason)
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::filter::params::FilterParams;
    use crate::operations::filter::scan::CandidateRecord;

    fn table(scores: &[f64], concave: &[usize]) -> CandidateTable {
        let records = scores
            .iter()
            .enumerate()
            .map(|(start, &raw)| CandidateRecord {
                start,
                raw,
                score: 0.0,
                concave: concave.contains(&start),
            })
            .collect();
        CandidateTable::normalized(records)
    }

    fn window_spec(window: i64, pnum: i64, alev: f64, n: usize) -> WindowSpec {
        FilterParams::new(window, pnum, alev).validate(n).unwrap()
    }

    fn ranges(sel: &Selection) -> Vec<(i64, i64)> {
        sel.ranges.iter().map(|r| (r.lower(), r.upper())).collect()
    }

    #[test]
    fn window_inside_bounds() {
        assert_eq!(window_ranges(3, 5, 10), vec![IndexRange::new(3, 7)]);
        assert_eq!(window_ranges(5, 5, 10), vec![IndexRange::new(5, 9)]);
    }

    #[test]
    fn window_wraps_past_end() {
        assert_eq!(
            window_ranges(38, 5, 40),
            vec![IndexRange::new(38, 39), IndexRange::new(0, 2)]
        );
        assert_eq!(
            window_ranges(6, 5, 10),
            vec![IndexRange::new(6, 9), IndexRange::new(0, 0)]
        );
        assert_eq!(
            window_ranges(9, 5, 10),
            vec![IndexRange::new(9, 9), IndexRange::new(0, 3)]
        );
    }

    #[test]
    fn wrapped_window_covers_window_indices() {
        for start in 0..12 {
            let covered: u64 = window_ranges(start, 5, 12).iter().map(IndexRange::len).sum();
            assert_eq!(covered, 5, "start {start}");
        }
    }

    #[test]
    fn best_below_acceptance_selects_nothing() {
        // Normalization makes the best exactly 1.0.
        let t = table(&[0.1, 0.3, 0.2, 0.1, 0.1, 0.1, 0.1, 0.1], &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 2, 1.5, 8)).execute();
        assert!(sel.ranges.is_empty());
        assert_eq!(sel.found, 0);
        assert_eq!(
            sel.shortfall.unwrap().reason,
            ShortfallReason::NothingAboveAcceptance
        );
    }

    #[test]
    fn takes_best_non_overlapping_windows() {
        //           0    1    2    3    4    5    6    7    8    9
        let scores = [0.1, 0.2, 0.9, 1.0, 0.8, 0.1, 0.1, 0.7, 0.1, 0.1];
        let t = table(&scores, &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 2, 0.0, 10)).execute();
        // 3 -> [3,5]; 2 and 4 overlap it; 7 -> [7,9].
        assert_eq!(ranges(&sel), vec![(3, 5), (7, 9)]);
        assert_eq!(sel.found, 2);
        assert!(sel.shortfall.is_none());
    }

    #[test]
    fn adjacent_windows_may_both_be_taken() {
        let scores = [1.0, 0.1, 0.1, 0.9, 0.1, 0.1, 0.1, 0.1];
        let t = table(&scores, &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 2, 0.0, 8)).execute();
        assert_eq!(ranges(&sel), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn first_window_ignores_concavity() {
        let scores = [0.1, 1.0, 0.1, 0.1, 0.1, 0.5, 0.1, 0.1];
        let t = table(&scores, &[1, 5]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 2, 0.0, 8)).execute();
        // Window 1 is concave but ranked first. Window 5 is concave and
        // skipped, so the second pick is the first free low-ranked window.
        assert_eq!(ranges(&sel), vec![(1, 3), (4, 6)]);
        assert_eq!(sel.found, 2);
    }

    #[test]
    fn stops_at_acceptance_level() {
        let scores = [1.0, 0.1, 0.1, 0.1, 0.1, 0.95, 0.1, 0.1, 0.1, 0.1];
        let t = table(&scores, &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 4, 0.9, 10)).execute();
        assert_eq!(ranges(&sel), vec![(0, 2), (5, 7)]);
        let shortfall = sel.shortfall.unwrap();
        assert_eq!(shortfall.found, 2);
        assert_eq!(shortfall.requested, 4);
        assert_eq!(shortfall.reason, ShortfallReason::BelowAcceptance);
    }

    #[test]
    fn negative_ranks_keep_their_order() {
        // Clockwise contours produce negative ranks; the least negative wins.
        let scores = [-4.0, -1.0, -8.0, -8.0, -8.0, -2.0, -8.0, -8.0, -8.0, -8.0];
        let t = table(&scores, &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 3, 0.4, 10)).execute();
        // Window 5 normalizes to 0.5, window 0 to 0.25.
        assert_eq!(ranges(&sel), vec![(1, 3), (5, 7)]);
        assert_eq!(sel.shortfall.unwrap().reason, ShortfallReason::BelowAcceptance);
    }

    #[test]
    fn reports_exhaustion() {
        // Only two disjoint windows of 5 fit into 10 vertices.
        let scores = [1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];
        let t = table(&scores, &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(5, 3, 0.0, 10)).execute();
        assert_eq!(ranges(&sel), vec![(0, 4), (5, 9)]);
        assert_eq!(sel.shortfall.unwrap().reason, ShortfallReason::Exhausted);
        assert_eq!(sel.ranges.covered_count(), 10);
    }

    #[test]
    fn wrapped_window_is_split() {
        let scores = [0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 1.0];
        let t = table(&scores, &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 1, 0.0, 10)).execute();
        assert_eq!(ranges(&sel), vec![(0, 1), (9, 9)]);
        assert_eq!(sel.found, 1);
    }

    #[test]
    fn wrapped_window_conflicting_on_either_side_is_rejected() {
        // Window 8 wraps to [8,9] + [0,0]; window 0 already holds index 0.
        let scores = [1.0, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.9, 0.1];
        let t = table(&scores, &[]);
        let sel = ProtrusionSelector::new(&t, window_spec(3, 2, 0.0, 10)).execute();
        assert!(!sel.ranges.covers_index(8));
        assert_eq!(sel.found, 2);
        assert_eq!(sel.ranges.covered_count(), 6);
    }

    #[test]
    fn shortfall_message() {
        let s = Shortfall {
            found: 1,
            requested: 5,
            reason: ShortfallReason::BelowAcceptance,
        };
        assert_eq!(
            s.to_string(),
            "removed 1 of 5 protrusions: remaining windows rank below the acceptance level"
        );
    }
}
