#![forbid(unsafe_code)]

//! Mind-map structure recovery + canonical tree model (headless).
//!
//! Design goals:
//! - never fail on model output: structure recovery always degrades to a
//!   usable default skeleton instead of surfacing an error
//! - deterministic, testable outputs (stable ids, stable child order)
//! - no layout or drawing concerns here; see `mapling-render`

pub mod error;
pub mod structure;
pub mod tree;

pub use error::{Error, Result};
pub use structure::{MapBranch, MapStructure, extract_structure, recover_structure};
pub use tree::{MapNode, MapTree, ROOT_ID};

/// Recovers a tree from arbitrary model output and canonicalizes it.
///
/// This is the composition of [`recover_structure`] and
/// [`MapTree::from_structure`]: it never fails. Text with no parseable
/// structure yields the default two-branch skeleton.
pub fn build_diagram(text: &str) -> MapTree {
    MapTree::from_structure(&recover_structure(text))
}
