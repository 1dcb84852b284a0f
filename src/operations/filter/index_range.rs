use std::cmp::Ordering;
use std::fmt;

/// Inclusive range of vertex indices `[lower, upper]` in the original contour.
///
/// Two ranges *conflict* when they share at least one index: they overlap
/// or one contains the other. Ranges that merely sit next to each other,
/// like `[1, 5]` and `[6, 10]`, do not conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    lower: i64,
    upper: i64,
}

impl IndexRange {
    /// Creates a range from two bounds given in either order.
    #[must_use]
    pub fn new(a: i64, b: i64) -> Self {
        if a > b {
            Self { lower: b, upper: a }
        } else {
            Self { lower: a, upper: b }
        }
    }

    /// The range covering only `index`.
    #[must_use]
    pub fn single(index: i64) -> Self {
        Self {
            lower: index,
            upper: index,
        }
    }

    /// Range between two contour indices.
    #[must_use]
    pub fn from_indices(a: usize, b: usize) -> Self {
        Self::new(to_signed(a), to_signed(b))
    }

    /// Smallest covered index.
    #[must_use]
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Largest covered index.
    #[must_use]
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Number of covered indices.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.upper.abs_diff(self.lower) + 1
    }

    /// Always `false`: a range covers at least one index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `index` lies within the range.
    #[must_use]
    pub fn contains_index(&self, index: i64) -> bool {
        self.lower <= index && index <= self.upper
    }

    /// Position of this range relative to `other`.
    ///
    /// `Less` if entirely below, `Greater` if entirely above, `Equal` when the
    /// two conflict. This is not a total order on arbitrary ranges; it is
    /// only consistent over a set of mutually disjoint ranges.
    #[must_use]
    pub fn relation(&self, other: &IndexRange) -> Ordering {
        if self.upper < other.lower {
            Ordering::Less
        } else if self.lower > other.upper {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Returns `true` if the two ranges share an index.
    #[must_use]
    pub fn conflicts_with(&self, other: &IndexRange) -> bool {
        self.relation(other) == Ordering::Equal
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Converts a contour index, saturating on (theoretical) overflow.
pub(crate) fn to_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// A set of mutually non-conflicting index ranges kept in ascending order.
///
/// Insertion refuses any range that conflicts with a member, so the set
/// never needs repair after the fact. Because members are disjoint and
/// sorted, the conflict relation can be binary-searched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRangeSet {
    ranges: Vec<IndexRange>,
}

impl IndexRangeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `range` conflicts with any member.
    ///
    /// With a singleton range this answers whether that index is covered.
    #[must_use]
    pub fn contains(&self, range: &IndexRange) -> bool {
        self.ranges
            .binary_search_by(|member| member.relation(range))
            .is_ok()
    }

    /// Returns `true` if some member covers `index`.
    #[must_use]
    pub fn covers_index(&self, index: i64) -> bool {
        self.contains(&IndexRange::single(index))
    }

    /// Returns `true` if any of `ranges` conflicts with a member.
    #[must_use]
    pub fn conflicts_with_any(&self, ranges: &[IndexRange]) -> bool {
        ranges.iter().any(|r| self.contains(r))
    }

    /// Adds `range` unless it conflicts with a member.
    ///
    /// Returns `false`, leaving the set unchanged, on conflict.
    pub fn insert(&mut self, range: IndexRange) -> bool {
        match self
            .ranges
            .binary_search_by(|member| member.relation(&range))
        {
            Ok(_) => false,
            Err(pos) => {
                self.ranges.insert(pos, range);
                true
            }
        }
    }

    /// Adds all of `ranges` or none of them.
    ///
    /// Fails if any of them conflicts with a member or with another entry
    /// of `ranges`.
    pub fn insert_all(&mut self, ranges: &[IndexRange]) -> bool {
        if self.conflicts_with_any(ranges) {
            return false;
        }
        for (i, a) in ranges.iter().enumerate() {
            if ranges[i + 1..].iter().any(|b| a.conflicts_with(b)) {
                return false;
            }
        }
        for range in ranges {
            self.insert(*range);
        }
        true
    }

    /// Number of ranges in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the set holds no ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, IndexRange> {
        self.ranges.iter()
    }

    /// Total number of indices covered by the members.
    #[must_use]
    pub fn covered_count(&self) -> u64 {
        self.ranges.iter().map(IndexRange::len).sum()
    }

    /// Consumes the set, returning members in ascending order.
    #[must_use]
    pub fn into_vec(self) -> Vec<IndexRange> {
        self.ranges
    }
}

impl<'a> IntoIterator for &'a IndexRangeSet {
    type Item = &'a IndexRange;
    type IntoIter = std::slice::Iter<'a, IndexRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
