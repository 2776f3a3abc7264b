//! Core value types for the Lattice layout engine.
//!
//! This crate holds the pure data shared by the layout crates: geometric
//! primitives, style properties, available-space constraints, node handles,
//! error types, and the computed [`Layout`] output. It contains no layout
//! algorithm; see `lattice-layout` for the engine itself.

pub mod available_space;
pub mod errors;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod node;
pub mod style;

pub use available_space::AvailableSpace;
pub use errors::{TreeError, TreeResult};
pub use geometry::{AbsoluteAxis, InlinePair, Point, Rect, Size};
pub use layout::Layout;
pub use math::MaybeMath;
pub use node::NodeId;
pub use style::{
    AlignContent, AlignItems, AlignSelf, BoxSizing, Dimension, Display, FlexDirection, FlexWrap, GridAutoFlow,
    GridPlacement, GridTemplateComponent, GridTrackRepetition, JustifyContent, LengthPercentage,
    LengthPercentageAuto, MaxTrackSizingFunction, MinTrackSizingFunction, Overflow, Position, Style, TextAlign,
    TrackSizingFunction,
};
