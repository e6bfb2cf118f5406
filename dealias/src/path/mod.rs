//! Path handling: normalization and ancestry comparison.
//!
//! Alias targets and walked directories are compared structurally, not as
//! strings, so that the cycle guard cannot be fooled by sibling
//! directories sharing a name prefix.

pub mod normalize;
pub mod relationship;

pub use normalize::normalize;
pub use relationship::PathRelationship;
