use super::polygon_2d::{center_of_mass_2d, mean_point_2d};
use super::Point2;

/// Spread of a point cluster around its centroid.
///
/// Population standard deviation of the distances from each point to the
/// area-weighted centroid of the points taken as a polygon. When that
/// polygon is degenerate (collinear, too short, self-crossing) the plain
/// mean point is used as the centre instead.
///
/// A compact spike gives a small value, a run of points strung out along
/// the contour a large one. Empty input yields 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dispersion_weight_2d(points: &[Point2]) -> f64 {
    let Some(mean) = mean_point_2d(points) else {
        return 0.0;
    };
    let centre = center_of_mass_2d(points).unwrap_or(mean);

    let n = points.len() as f64;
    let distances: Vec<f64> = points
        .iter()
        .map(|p| nalgebra::distance(p, &centre))
        .collect();
    let avg = distances.iter().sum::<f64>() / n;
    let variance = distances.iter().map(|d| (d - avg).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
