//! ## The `RangeSearch` Contract
//!
//! The abstract interface every orthogonal range-search index in this crate
//! family satisfies. The R+-tree (`r_plus_tree`) is the one production
//! implementation; a minimal sequential-scan implementation used only as a
//! test oracle lives under `tests/shared.rs`, not here, since the brute-force
//! baseline is an external collaborator to this core, not a deliverable.

/// A point usable as the query and payload type of a `RangeSearch` index.
///
/// Mirrors the corpus's `KdPoint` accessor trait, but fixed to the two axes
/// the R+-tree is defined over.
pub trait RPlusPoint: Clone + std::fmt::Debug {
    fn coord(&self, axis: crate::geometry::Axis) -> f64;
}

impl<T: Clone + std::fmt::Debug> RPlusPoint for crate::geometry::Point2D<T> {
    fn coord(&self, axis: crate::geometry::Axis) -> f64 {
        crate::geometry::Point2D::coord(self, axis)
    }
}

/// Common contract for indexes that answer 2D axis-aligned range queries.
pub trait RangeSearch<P: RPlusPoint> {
    /// Builds the index over `points`. `points` must be non-empty and free
    /// of duplicates; implementations assert this but do not attempt to
    /// deduplicate on the caller's behalf.
    fn assign(&mut self, points: Vec<P>);

    /// Appends every point of the indexed set that lies within the closed
    /// rectangle `[min, max]` to `out`, in traversal order (not sorted).
    fn report_range(&self, min: &P, max: &P, out: &mut Vec<P>);

    /// Counts the points within `[min, max]` without necessarily
    /// materializing them.
    ///
    /// The default implementation is the textbook "count what you'd report";
    /// the R+-tree overrides it with a pruning fast path that skips fully
    /// contained subtrees.
    fn count_range(&self, min: &P, max: &P) -> usize {
        let mut out = Vec::new();
        self.report_range(min, max, &mut out);
        out.len()
    }

    /// Convenience wrapper returning a fresh `Vec` instead of appending to
    /// a caller-supplied one.
    fn report_range_vec(&self, min: &P, max: &P) -> Vec<P> {
        let mut out = Vec::new();
        self.report_range(min, max, &mut out);
        out
    }
}
