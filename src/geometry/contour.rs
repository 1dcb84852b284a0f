use crate::math::Point2;

/// A closed contour viewed as a circular sequence of vertices.
///
/// The contour borrows the caller's points and never reorders them: every
/// "rotation" is expressed as index arithmetic modulo the vertex count, so a
/// run that starts near the end continues from index 0.
#[derive(Debug, Clone, Copy)]
pub struct Contour<'a> {
    points: &'a [Point2],
}

impl<'a> Contour<'a> {
    /// Wraps an ordered vertex slice. The last vertex connects back to the first.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// The underlying vertices in their original order.
    #[must_use]
    pub fn points(&self) -> &'a [Point2] {
        self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the contour has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Original indices of the `len` consecutive vertices starting at `start`.
    ///
    /// Yields nothing for an empty contour.
    pub fn run_indices(&self, start: usize, len: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.points.len();
        let len = if n == 0 { 0 } else { len };
        (0..len).map(move |k| (start + k) % n)
    }

    /// The `len` consecutive vertices starting at `start`, in contour order.
    pub fn run(&self, start: usize, len: usize) -> impl Iterator<Item = Point2> + '_ {
        let points = self.points;
        self.run_indices(start, len).map(move |i| points[i])
    }

    /// Vertices of the window of `len` vertices starting at `start`.
    pub fn window(&self, start: usize, len: usize) -> impl Iterator<Item = Point2> + '_ {
        self.run(start, len.min(self.points.len()))
    }

    /// Every vertex outside the window, starting right after it and wrapping
    /// around, so the result is itself a closed contour.
    pub fn complement(&self, start: usize, len: usize) -> impl Iterator<Item = Point2> + '_ {
        let n = self.points.len();
        let len = len.min(n);
        self.run(start + len, n - len)
    }
}
