use std::f64::consts::PI;

use super::intersect_2d::is_simple_polygon_2d;
use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Length of the closed outline, including the edge from the last point
/// back to the first.
#[must_use]
pub fn perimeter_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| nalgebra::distance(&points[i], &points[(i + 1) % n]))
        .sum()
}

/// Circularity `4πA / P²` of a closed polygon.
///
/// 1.0 for a counter-clockwise circle, smaller for elongated or ragged
/// outlines. The area is signed, so a clockwise outline gives a negative
/// value. A zero-length outline yields 0.0.
#[must_use]
pub fn circularity_2d(points: &[Point2]) -> f64 {
    let perimeter = perimeter_2d(points);
    if perimeter < TOLERANCE {
        return 0.0;
    }
    4.0 * PI * signed_area_2d(points) / (perimeter * perimeter)
}

/// Area-weighted centroid of a simple polygon.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the polygon has fewer than 3
/// vertices, (near) zero area, or crossing edges.
pub fn center_of_mass_2d(points: &[Point2]) -> Result<Point2> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::Degenerate(format!("{n} vertices")).into());
    }
    let area = signed_area_2d(points);
    if area.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate("zero area".to_owned()).into());
    }
    if !is_simple_polygon_2d(points) {
        return Err(GeometryError::Degenerate("edges cross".to_owned()).into());
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let scale = 1.0 / (6.0 * area);
    Ok(Point2::new(cx * scale, cy * scale))
}

/// Arithmetic mean of the points, `None` when empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_point_2d(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Some(Point2::from(sum / points.len() as f64))
}

/// Point-in-polygon test using the winding number.
///
/// Returns `true` for a non-zero winding number. Polygons with fewer than 3
/// vertices contain nothing.
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    winding_number_2d(point, polygon) != 0
}

/// Returns `true` if every point of `test` lies inside the polygon `outer`.
#[must_use]
pub fn all_points_inside_2d(outer: &[Point2], test: &[Point2]) -> bool {
    if outer.len() < 3 {
        return false;
    }
    test.iter().all(|p| point_in_polygon_2d(p, outer))
}

/// Winding number of `point` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let v0 = &verts[i];
        let v1 = &verts[(i + 1) % n];
        let side = (v1 - v0).perp(&(point - v0));

        if v0.y <= point.y {
            if v1.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if v1.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}
