//! The Lattice layout engine.
//!
//! This crate owns the node tree and computes CSS-style layouts over it:
//! block, flexbox, and grid containers, plus measured leaf content.
//!
//! # Architecture
//!
//! 1. **Tree building**: [`LayoutTree`] is an arena of styled nodes
//! 2. **Layout**: `compute_layout` runs the algorithm matching each node's
//!    `display` style, memoizing sizing passes per node
//! 3. **Rounding**: unrounded results are rounded to whole pixels along
//!    absolute edges so sibling boundaries stay flush
//!
//! # Example
//!
//! ```ignore
//! use lattice_core::{AvailableSpace, Size, Style};
//! use lattice_layout::LayoutTree;
//!
//! let mut tree: LayoutTree<()> = LayoutTree::new();
//! let child = tree.new_leaf(Style::default())?;
//! let root = tree.new_with_children(Style::default(), &[child])?;
//!
//! tree.compute_layout(root, Size::MAX_CONTENT)?;
//! println!("{:?}", tree.layout(child)?);
//! ```

mod cache;
mod compute;
mod measure;
mod print;
mod round;
mod tree;

pub use measure::{Measure, NoMeasure};
pub use print::print_tree;
pub use tree::LayoutTree;
