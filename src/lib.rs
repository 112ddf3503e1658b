//! A bulk-loaded R+-tree for orthogonal range search over 2D points.
//!
//! The tree is built once from a complete point set ([`range_search::RangeSearch::assign`])
//! rather than grown incrementally; in exchange, sibling entries in a node
//! are guaranteed disjoint, which lets range counting prune whole subtrees
//! instead of visiting every point (see [`r_plus_tree`]).
//!
//! Set `RPLUS_TREE_DEBUG=1` with the `setup_tracing` feature enabled to get
//! `tracing` output at crate load time (see [`logging`]).

pub mod exceptions;
pub mod geometry;
#[cfg(feature = "setup_tracing")]
mod logging;
pub mod r_plus_tree;
pub mod range_search;
