//! Protrusion removal for closed polygonal contours.
//!
//! A window of consecutive vertices slides around the contour; positions
//! whose removal leaves the roundest outline while covering a compact
//! cluster of vertices are ranked highest, and the best non-overlapping
//! ones are cut out. Everything else on the contour is left untouched.
//!
//! ```
//! use hat_filter::math::Point2;
//! use hat_filter::HatFilter;
//!
//! let mut points: Vec<Point2> = (0..40).map(|i| Point2::new(f64::from(i), 0.0)).collect();
//! for i in 18..=20 {
//!     points[i].y = 1.0;
//! }
//! let outcome = HatFilter::new().with_window(5).execute(&points)?;
//! assert_eq!(outcome.points.len(), 35);
//! # Ok::<(), hat_filter::HatFilterError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{HatFilterError, Result};
pub use operations::filter::{FilterOutcome, FilterParams, HatFilter};
