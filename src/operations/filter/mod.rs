mod assemble;
mod hat_filter;
mod index_range;
mod params;
mod scan;
mod select;

pub use assemble::assemble_output;
pub use hat_filter::{FilterOutcome, HatFilter};
pub use index_range::{IndexRange, IndexRangeSet};
pub use params::{FilterParams, WindowSpec};
pub use scan::{CandidateRecord, CandidateScanner, CandidateTable};
pub use select::{window_ranges, ProtrusionSelector, Selection, Shortfall, ShortfallReason};
