use super::index_range::{to_signed, IndexRangeSet};
use crate::geometry::Contour;
use crate::math::Point2;

/// Copies every vertex not covered by `removed`, keeping the original order.
#[must_use]
pub fn assemble_output(contour: Contour<'_>, removed: &IndexRangeSet) -> Vec<Point2> {
    contour
        .points()
        .iter()
        .enumerate()
        .filter(|(i, _)| !removed.covers_index(to_signed(*i)))
        .map(|(_, p)| *p)
        .collect()
}
