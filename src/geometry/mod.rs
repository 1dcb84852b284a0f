pub mod contour;

pub use contour::Contour;
