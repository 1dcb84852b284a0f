use super::{Point2, TOLERANCE};

/// Returns `true` if the closed segments `a0-a1` and `b0-b1` cross or touch.
///
/// Parallel (including collinear) segments never count as crossing.
#[must_use]
pub fn segments_cross_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.perp(&db);
    if cross.abs() < TOLERANCE {
        return false;
    }

    let d = b0 - a0;
    let t = d.perp(&db) / cross;
    let u = d.perp(&da) / cross;

    // Endpoints count.
    let range = -TOLERANCE..=1.0 + TOLERANCE;
    range.contains(&t) && range.contains(&u)
}

/// Returns `true` if no two non-adjacent edges of the closed polygon cross
/// or touch.
///
/// Polygons with fewer than 3 vertices are never simple.
#[must_use]
pub fn is_simple_polygon_2d(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            // First and last edges share vertex 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segments_cross_2d(a0, a1, b0, b1) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        assert!(segments_cross_2d(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)));
    }

    #[test]
    fn touching_at_endpoint() {
        assert!(segments_cross_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
    }

    #[test]
    fn disjoint_segments() {
        assert!(!segments_cross_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(0.4, 0.5)));
    }

    #[test]
    fn parallel_segments() {
        assert!(!segments_cross_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0)));
    }

    #[test]
    fn square_is_simple() {
        let sq = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!(is_simple_polygon_2d(&sq));
    }

    #[test]
    fn bow_tie_is_not_simple() {
        let bow = [p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0), p(0.0, 1.0)];
        assert!(!is_simple_polygon_2d(&bow));
    }

    #[test]
    fn too_short_is_not_simple() {
        assert!(!is_simple_polygon_2d(&[p(0.0, 0.0), p(1.0, 0.0)]));
    }
}
