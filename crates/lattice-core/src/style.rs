//! Style properties describing how a node should be laid out.
//!
//! A [`Style`] is attached to every node and read by the layout algorithms.
//! Values follow CSS semantics: lengths are absolute units, percentages
//! resolve against a basis supplied by the containing algorithm, and `auto`
//! defers to the algorithm's own rules.

use crate::geometry::{AbsoluteAxis, InlinePair, Point, Rect, Size};

/// Which layout algorithm a node uses to lay out its children.
///
/// A node's own participation in its parent's algorithm is independent of
/// this: a grid container can itself be a flex item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Display {
    /// Children are stacked along the block axis
    Block,
    /// Children are laid out with the flexbox algorithm
    #[default]
    Flex,
    /// Children are laid out with the CSS grid algorithm
    Grid,
    /// The node and its subtree occupy no space and produce zero layouts
    None,
}

/// Whether size styles describe the border box or the content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoxSizing {
    /// `size`/`min_size`/`max_size` include padding and border
    #[default]
    BorderBox,
    /// `size`/`min_size`/`max_size` describe the content box; padding and
    /// border are added on top for layout purposes
    ContentBox,
}

/// How content overflowing a node's box is treated on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
    /// Content may paint outside the box and contributes to the parent's
    /// content size
    #[default]
    Visible,
    /// Content is clipped but the node is still sized by its content
    Clip,
    /// Content is clipped and the automatic minimum size is zero
    Hidden,
    /// As `Hidden`, and space for a scrollbar is reserved
    Scroll,
}

impl Overflow {
    /// True if this overflow mode makes the node a scroll container, which
    /// zeroes its automatic minimum size.
    pub fn is_scroll_container(self) -> bool {
        matches!(self, Self::Hidden | Self::Scroll)
    }

    /// The automatic minimum size contribution for this overflow mode:
    /// scroll containers have a definite automatic minimum size of zero.
    pub fn maybe_into_automatic_min_size(self) -> Option<f32> {
        if self.is_scroll_container() {
            Some(0.0)
        } else {
            None
        }
    }
}

/// How a node is positioned relative to its parent's layout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Laid out in flow, then shifted by any definite inset
    #[default]
    Relative,
    /// Taken out of flow and positioned by inset against the parent
    Absolute,
}

/// Legacy inline-axis alignment applied by the block algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlign {
    /// No legacy alignment
    #[default]
    Auto,
    /// Equivalent of `-webkit-left`
    LegacyLeft,
    /// Equivalent of `-webkit-center`
    LegacyCenter,
    /// Equivalent of `-webkit-right`
    LegacyRight,
}

/// A length or a percentage of some basis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthPercentage {
    /// An absolute length
    Length(f32),
    /// A fraction of the basis, stored as 0.0..=1.0
    Percent(f32),
}

impl LengthPercentage {
    /// A zero length.
    pub const ZERO: Self = Self::Length(0.0);

    /// Create an absolute length.
    pub const fn length(value: f32) -> Self {
        Self::Length(value)
    }

    /// Create a percentage. `1.0` is 100%.
    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// Resolve against a basis. Percentages against an indefinite basis
    /// resolve to "not definite" rather than zero.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(value) => Some(value),
            Self::Percent(fraction) => basis.map(|b| b * fraction),
        }
    }

    /// Resolve against a basis, treating an unresolvable value as zero.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }
}

/// A length, a percentage, or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthPercentageAuto {
    /// An absolute length
    Length(f32),
    /// A fraction of the basis
    Percent(f32),
    /// Defer to the layout algorithm
    #[default]
    Auto,
}

impl LengthPercentageAuto {
    /// A zero length.
    pub const ZERO: Self = Self::Length(0.0);

    /// Create an absolute length.
    pub const fn length(value: f32) -> Self {
        Self::Length(value)
    }

    /// Create a percentage. `1.0` is 100%.
    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// True for the `Auto` variant.
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve against a basis. `Auto` and percentages of an indefinite
    /// basis resolve to `None`.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(value) => Some(value),
            Self::Percent(fraction) => basis.map(|b| b * fraction),
            Self::Auto => None,
        }
    }

    /// Resolve against a basis, treating `auto` and unresolvable
    /// percentages as zero.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }
}

impl From<LengthPercentage> for LengthPercentageAuto {
    fn from(value: LengthPercentage) -> Self {
        match value {
            LengthPercentage::Length(v) => Self::Length(v),
            LengthPercentage::Percent(v) => Self::Percent(v),
        }
    }
}

/// A size dimension: a length, a percentage, or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// An absolute length
    Length(f32),
    /// A fraction of the basis
    Percent(f32),
    /// Size from content or containing algorithm
    #[default]
    Auto,
}

impl Dimension {
    /// Create an absolute length.
    pub const fn length(value: f32) -> Self {
        Self::Length(value)
    }

    /// Create a percentage. `1.0` is 100%.
    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// True for the `Auto` variant.
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve against a basis; `Auto` resolves to `None`.
    pub fn maybe_resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(value) => Some(value),
            Self::Percent(fraction) => basis.map(|b| b * fraction),
            Self::Auto => None,
        }
    }
}

impl From<LengthPercentage> for Dimension {
    fn from(value: LengthPercentage) -> Self {
        match value {
            LengthPercentage::Length(v) => Self::Length(v),
            LengthPercentage::Percent(v) => Self::Percent(v),
        }
    }
}

impl Size<Dimension> {
    /// A fully-`auto` size.
    pub const AUTO: Self = Self { width: Dimension::Auto, height: Dimension::Auto };

    /// Create a size from two absolute lengths.
    pub const fn from_lengths(width: f32, height: f32) -> Self {
        Self { width: Dimension::Length(width), height: Dimension::Length(height) }
    }

    /// Create a size from two percentages.
    pub const fn from_percent(width: f32, height: f32) -> Self {
        Self { width: Dimension::Percent(width), height: Dimension::Percent(height) }
    }

    /// Resolve both dimensions against an optional basis size.
    pub fn maybe_resolve(self, basis: Size<Option<f32>>) -> Size<Option<f32>> {
        Size { width: self.width.maybe_resolve(basis.width), height: self.height.maybe_resolve(basis.height) }
    }
}

impl Size<LengthPercentage> {
    /// A zero-length size (useful for `gap`).
    pub const ZERO: Self = Self { width: LengthPercentage::ZERO, height: LengthPercentage::ZERO };

    /// Resolve both dimensions or fall back to zero.
    pub fn resolve_or_zero(self, basis: Size<Option<f32>>) -> Size<f32> {
        Size {
            width: self.width.resolve_or_zero(basis.width),
            height: self.height.resolve_or_zero(basis.height),
        }
    }
}

impl Rect<LengthPercentage> {
    /// A rect of zero lengths.
    pub const ZERO: Self = Self {
        left: LengthPercentage::ZERO,
        right: LengthPercentage::ZERO,
        top: LengthPercentage::ZERO,
        bottom: LengthPercentage::ZERO,
    };

    /// Resolve every edge against a single basis (the containing block's
    /// inline size, per CSS), treating unresolvable values as zero.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> Rect<f32> {
        self.map(|edge| edge.resolve_or_zero(basis))
    }
}

impl Rect<LengthPercentageAuto> {
    /// A rect of `auto` values.
    pub const AUTO: Self = Self {
        left: LengthPercentageAuto::Auto,
        right: LengthPercentageAuto::Auto,
        top: LengthPercentageAuto::Auto,
        bottom: LengthPercentageAuto::Auto,
    };

    /// A rect of zero lengths.
    pub const ZERO: Self = Self {
        left: LengthPercentageAuto::ZERO,
        right: LengthPercentageAuto::ZERO,
        top: LengthPercentageAuto::ZERO,
        bottom: LengthPercentageAuto::ZERO,
    };

    /// Resolve every edge against a single basis, `auto` edges to zero.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> Rect<f32> {
        self.map(|edge| edge.resolve_or_zero(basis))
    }

    /// Resolve horizontal edges against the width basis and vertical edges
    /// against the height basis, keeping `auto` edges unresolved.
    pub fn resolve_insets(self, basis: Size<Option<f32>>) -> Rect<Option<f32>> {
        Rect {
            left: self.left.resolve(basis.width),
            right: self.right.resolve(basis.width),
            top: self.top.resolve(basis.height),
            bottom: self.bottom.resolve(basis.height),
        }
    }
}

/// Used to control how child nodes are aligned, on the cross axis for flex
/// containers and the block axis for grid containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignItems {
    /// Pack toward the start of the axis
    Start,
    /// Pack toward the end of the axis
    End,
    /// As `Start`, flipped by reversed flex directions
    FlexStart,
    /// As `End`, flipped by reversed flex directions
    FlexEnd,
    /// Center along the axis
    Center,
    /// Align first text baselines
    Baseline,
    /// Stretch to fill the container
    Stretch,
}

/// Controls alignment of an individual item, overriding the parent's
/// `align_items` / `justify_items`.
pub type AlignSelf = AlignItems;

/// Distribution of lines/tracks/items along an axis when there is extra
/// space in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignContent {
    /// Pack toward the start of the axis
    Start,
    /// Pack toward the end of the axis
    End,
    /// As `Start`, flipped by reversed flex directions
    FlexStart,
    /// As `End`, flipped by reversed flex directions
    FlexEnd,
    /// Center along the axis
    Center,
    /// Stretch to fill the container
    Stretch,
    /// Equal space between successive items, none at the ends
    SpaceBetween,
    /// Equal space between successive items and half-size space at the ends
    SpaceAround,
    /// Equal space between successive items and at the ends
    SpaceEvenly,
}

/// Distribution of items along the main axis of a flex container or the
/// inline axis of a grid container.
pub type JustifyContent = AlignContent;

/// The direction of a flex container's main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexDirection {
    /// Main axis is horizontal, items flow left to right
    #[default]
    Row,
    /// Main axis is vertical, items flow top to bottom
    Column,
    /// Main axis is horizontal, items flow right to left
    RowReverse,
    /// Main axis is vertical, items flow bottom to top
    ColumnReverse,
}

impl FlexDirection {
    /// True if the main axis is horizontal.
    pub fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// True if the main axis is vertical.
    pub fn is_column(self) -> bool {
        !self.is_row()
    }

    /// True if items flow against the axis direction.
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }

    /// The absolute axis of the main axis.
    pub fn main_axis(self) -> AbsoluteAxis {
        if self.is_row() {
            AbsoluteAxis::Horizontal
        } else {
            AbsoluteAxis::Vertical
        }
    }

    /// The absolute axis of the cross axis.
    pub fn cross_axis(self) -> AbsoluteAxis {
        self.main_axis().other()
    }
}

/// Whether flex items wrap onto multiple lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexWrap {
    /// All items on a single line
    #[default]
    NoWrap,
    /// Items wrap onto additional lines as needed
    Wrap,
    /// As `Wrap`, with lines stacked in reverse cross-axis order
    WrapReverse,
}

/// The sizing function for the minimum size of a grid track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinTrackSizingFunction {
    /// A fixed length or percentage of the grid's definite inner size
    Fixed(LengthPercentage),
    /// The largest min-content contribution of items spanning the track
    MinContent,
    /// The largest max-content contribution of items spanning the track
    MaxContent,
    /// Behaves as min-content for sizing purposes
    #[default]
    Auto,
}

impl MinTrackSizingFunction {
    /// The definite value of this function if it has one.
    pub fn definite_value(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Fixed(lp) => lp.resolve(basis),
            _ => None,
        }
    }

    /// True for the intrinsic (content-based) variants.
    pub fn is_intrinsic(self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::Auto)
    }
}

/// The sizing function for the maximum size of a grid track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxTrackSizingFunction {
    /// A fixed length or percentage of the grid's definite inner size
    Fixed(LengthPercentage),
    /// The largest min-content contribution of items spanning the track
    MinContent,
    /// The largest max-content contribution of items spanning the track
    MaxContent,
    /// As max-content but clamped by the given limit
    FitContent(LengthPercentage),
    /// Grows to absorb content, then stretches with leftover space
    #[default]
    Auto,
    /// A share of leftover space, in `fr` units
    Fraction(f32),
}

impl MaxTrackSizingFunction {
    /// The definite value of this function if it has one.
    pub fn definite_value(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Fixed(lp) => lp.resolve(basis),
            _ => None,
        }
    }

    /// True for the intrinsic (content-based) variants.
    pub fn is_intrinsic(self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::FitContent(_) | Self::Auto)
    }

    /// True for the `Fraction` variant.
    pub fn is_flexible(self) -> bool {
        matches!(self, Self::Fraction(_))
    }
}

/// The complete sizing function for a single grid track: a min/max pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSizingFunction {
    /// Lower bound sizing function
    pub min: MinTrackSizingFunction,
    /// Upper bound sizing function
    pub max: MaxTrackSizingFunction,
}

impl TrackSizingFunction {
    /// A track sized `auto`.
    pub const AUTO: Self = Self { min: MinTrackSizingFunction::Auto, max: MaxTrackSizingFunction::Auto };

    /// A fixed-length track.
    pub const fn length(value: f32) -> Self {
        Self {
            min: MinTrackSizingFunction::Fixed(LengthPercentage::Length(value)),
            max: MaxTrackSizingFunction::Fixed(LengthPercentage::Length(value)),
        }
    }

    /// A percentage-sized track.
    pub const fn percent(fraction: f32) -> Self {
        Self {
            min: MinTrackSizingFunction::Fixed(LengthPercentage::Percent(fraction)),
            max: MaxTrackSizingFunction::Fixed(LengthPercentage::Percent(fraction)),
        }
    }

    /// A flexible track taking `factor` shares of the leftover space.
    /// Its minimum is `auto` as for the `fr` shorthand in CSS.
    pub const fn fr(factor: f32) -> Self {
        Self { min: MinTrackSizingFunction::Auto, max: MaxTrackSizingFunction::Fraction(factor) }
    }

    /// A min-content sized track.
    pub const fn min_content() -> Self {
        Self { min: MinTrackSizingFunction::MinContent, max: MaxTrackSizingFunction::MinContent }
    }

    /// A max-content sized track.
    pub const fn max_content() -> Self {
        Self { min: MinTrackSizingFunction::MaxContent, max: MaxTrackSizingFunction::MaxContent }
    }

    /// A `fit-content(limit)` track.
    pub const fn fit_content(limit: LengthPercentage) -> Self {
        Self { min: MinTrackSizingFunction::Auto, max: MaxTrackSizingFunction::FitContent(limit) }
    }

    /// An explicit `minmax(min, max)` track.
    pub const fn minmax(min: MinTrackSizingFunction, max: MaxTrackSizingFunction) -> Self {
        Self { min, max }
    }
}

/// The number of repetitions in a `repeat()` track list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridTrackRepetition {
    /// As many whole repetitions as fit in the definite inner size
    AutoFill,
    /// As `AutoFill`, but empty repeated tracks collapse to zero
    AutoFit,
    /// A fixed number of repetitions
    Count(u16),
}

/// One entry in a grid template track list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridTemplateComponent {
    /// A single track
    Single(TrackSizingFunction),
    /// A repeated group of tracks
    Repeat(GridTrackRepetition, Vec<TrackSizingFunction>),
}

impl From<TrackSizingFunction> for GridTemplateComponent {
    fn from(track: TrackSizingFunction) -> Self {
        Self::Single(track)
    }
}

/// Controls auto-placement direction and packing density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridAutoFlow {
    /// Fill rows first, sparse packing
    #[default]
    Row,
    /// Fill columns first, sparse packing
    Column,
    /// Fill rows first, dense (backfilling) packing
    RowDense,
    /// Fill columns first, dense (backfilling) packing
    ColumnDense,
}

impl GridAutoFlow {
    /// True for the dense packing variants.
    pub fn is_dense(self) -> bool {
        matches!(self, Self::RowDense | Self::ColumnDense)
    }

    /// The axis along which auto-placement advances first.
    pub fn primary_axis(self) -> AbsoluteAxis {
        match self {
            Self::Row | Self::RowDense => AbsoluteAxis::Horizontal,
            Self::Column | Self::ColumnDense => AbsoluteAxis::Vertical,
        }
    }
}

/// Placement of a grid item on one axis: a line, a span, or automatic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridPlacement {
    /// Place automatically
    #[default]
    Auto,
    /// Place at the given grid line (1-indexed; negative counts from the
    /// end of the explicit grid)
    Line(i16),
    /// Span the given number of tracks
    Span(u16),
}

impl GridPlacement {
    /// Shorthand for `Line`.
    pub const fn from_line_index(index: i16) -> Self {
        Self::Line(index)
    }

    /// Shorthand for `Span`.
    pub const fn from_span(span: u16) -> Self {
        Self::Span(span)
    }
}

impl InlinePair<GridPlacement> {
    /// A fully-automatic placement.
    pub const AUTO: Self = Self { start: GridPlacement::Auto, end: GridPlacement::Auto };

    /// The definite span indicated by this placement, defaulting to 1.
    pub fn indefinite_span(&self) -> u16 {
        match (self.start, self.end) {
            (GridPlacement::Span(span), _) => span.max(1),
            (_, GridPlacement::Span(span)) => span.max(1),
            _ => 1,
        }
    }
}

/// Convenience constructor for a single-cell placement at `line`.
pub fn grid_line(index: i16) -> InlinePair<GridPlacement> {
    InlinePair { start: GridPlacement::Line(index), end: GridPlacement::Auto }
}

/// Convenience constructor for an auto-placed span of `span` tracks.
pub fn grid_span(span: u16) -> InlinePair<GridPlacement> {
    InlinePair { start: GridPlacement::Span(span), end: GridPlacement::Auto }
}

/// The full set of layout properties for a node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Which algorithm lays out this node's children
    pub display: Display,
    /// Whether size styles describe the border box or content box
    pub box_sizing: BoxSizing,
    /// Overflow handling per axis (`x` then `y`)
    pub overflow: Point<Overflow>,
    /// Space reserved for a scrollbar when `overflow` is `Scroll`
    pub scrollbar_width: f32,
    /// In-flow or absolute positioning
    pub position: Position,
    /// Position offsets for relatively/absolutely positioned nodes
    pub inset: Rect<LengthPercentageAuto>,

    /// Preferred size
    pub size: Size<Dimension>,
    /// Minimum size
    pub min_size: Size<Dimension>,
    /// Maximum size
    pub max_size: Size<Dimension>,
    /// Width divided by height; used to derive one axis from the other
    pub aspect_ratio: Option<f32>,

    /// Outer spacing; `auto` margins absorb free space
    pub margin: Rect<LengthPercentageAuto>,
    /// Inner spacing between border and content
    pub padding: Rect<LengthPercentage>,
    /// Border widths
    pub border: Rect<LengthPercentage>,

    /// Default cross-axis (flex) / block-axis (grid) alignment of children
    pub align_items: Option<AlignItems>,
    /// Cross/block-axis alignment override for this node within its parent
    pub align_self: Option<AlignSelf>,
    /// Default inline-axis alignment of children within grid areas
    pub justify_items: Option<AlignItems>,
    /// Inline-axis alignment override for this node within its grid area
    pub justify_self: Option<AlignSelf>,
    /// Cross-axis distribution of flex lines / block-axis distribution of
    /// grid tracks
    pub align_content: Option<AlignContent>,
    /// Main/inline-axis distribution of items or tracks
    pub justify_content: Option<JustifyContent>,
    /// Spacing between adjacent items, lines, and tracks
    pub gap: Size<LengthPercentage>,
    /// Legacy inline-axis alignment for block containers
    pub text_align: TextAlign,

    /// Main-axis direction of a flex container
    pub flex_direction: FlexDirection,
    /// Line wrapping of a flex container
    pub flex_wrap: FlexWrap,
    /// Hypothetical main size of this node as a flex item
    pub flex_basis: Dimension,
    /// Share of positive free space distributed to this node
    pub flex_grow: f32,
    /// Share of negative free space absorbed by this node
    pub flex_shrink: f32,

    /// Explicit grid row template
    pub grid_template_rows: Vec<GridTemplateComponent>,
    /// Explicit grid column template
    pub grid_template_columns: Vec<GridTemplateComponent>,
    /// Sizes for implicitly created rows, cycled as needed
    pub grid_auto_rows: Vec<TrackSizingFunction>,
    /// Sizes for implicitly created columns, cycled as needed
    pub grid_auto_columns: Vec<TrackSizingFunction>,
    /// Auto-placement flow direction and density
    pub grid_auto_flow: GridAutoFlow,
    /// Row placement of this node as a grid item
    pub grid_row: InlinePair<GridPlacement>,
    /// Column placement of this node as a grid item
    pub grid_column: InlinePair<GridPlacement>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: Display::default(),
            box_sizing: BoxSizing::BorderBox,
            overflow: Point { x: Overflow::Visible, y: Overflow::Visible },
            scrollbar_width: 0.0,
            position: Position::Relative,
            inset: Rect::AUTO,
            size: Size::AUTO,
            min_size: Size::AUTO,
            max_size: Size::AUTO,
            aspect_ratio: None,
            margin: Rect::<LengthPercentageAuto>::ZERO,
            padding: Rect::<LengthPercentage>::ZERO,
            border: Rect::<LengthPercentage>::ZERO,
            align_items: None,
            align_self: None,
            justify_items: None,
            justify_self: None,
            align_content: None,
            justify_content: None,
            gap: Size::<LengthPercentage>::ZERO,
            text_align: TextAlign::Auto,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::NoWrap,
            flex_basis: Dimension::Auto,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            grid_template_rows: Vec::new(),
            grid_template_columns: Vec::new(),
            grid_auto_rows: Vec::new(),
            grid_auto_columns: Vec::new(),
            grid_auto_flow: GridAutoFlow::Row,
            grid_row: InlinePair::AUTO,
            grid_column: InlinePair::AUTO,
        }
    }
}

impl Style {
    /// The style a node gets when none is specified.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if either axis makes this node a scroll container.
    pub fn is_scroll_container(&self) -> bool {
        self.overflow.x.is_scroll_container() || self.overflow.y.is_scroll_container()
    }

    /// The box-sizing adjustment to convert content-box styled sizes to
    /// border-box sizes: padding plus border when `box_sizing` is
    /// `ContentBox`, zero otherwise.
    pub fn box_sizing_adjustment(&self, basis: Option<f32>) -> Size<f32> {
        match self.box_sizing {
            BoxSizing::BorderBox => Size::<f32>::ZERO,
            BoxSizing::ContentBox => {
                (self.padding.resolve_or_zero(basis) + self.border.resolve_or_zero(basis)).sum_axes()
            }
        }
    }

    /// The grid placement for the given absolute axis.
    pub fn grid_placement(&self, axis: AbsoluteAxis) -> InlinePair<GridPlacement> {
        match axis {
            AbsoluteAxis::Horizontal => self.grid_column,
            AbsoluteAxis::Vertical => self.grid_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_against_indefinite_basis() {
        assert_eq!(LengthPercentage::percent(0.5).resolve(None), None);
        assert_eq!(LengthPercentage::percent(0.5).resolve(Some(200.0)), Some(100.0));
        assert_eq!(Dimension::percent(0.25).maybe_resolve(None), None);
        assert_eq!(LengthPercentageAuto::Auto.resolve(Some(100.0)), None);
    }

    #[test]
    fn test_default_style() {
        let style = Style::default();
        assert_eq!(style.display, Display::Flex);
        assert_eq!(style.flex_shrink, 1.0);
        assert_eq!(style.size, Size::AUTO);
        assert!(!style.is_scroll_container());
    }

    #[test]
    fn test_box_sizing_adjustment() {
        let style = Style {
            box_sizing: BoxSizing::ContentBox,
            padding: Rect::uniform(LengthPercentage::length(10.0)),
            border: Rect::uniform(LengthPercentage::length(2.0)),
            ..Default::default()
        };
        assert_eq!(style.box_sizing_adjustment(None), Size::new(24.0, 24.0));

        let border_box = Style { box_sizing: BoxSizing::BorderBox, ..style };
        assert_eq!(border_box.box_sizing_adjustment(None), Size::<f32>::ZERO);
    }

    #[test]
    fn test_track_helpers() {
        let track = TrackSizingFunction::fr(2.0);
        assert!(track.max.is_flexible());
        assert!(track.min.is_intrinsic());
        assert_eq!(TrackSizingFunction::length(40.0).max.definite_value(None), Some(40.0));
        assert_eq!(TrackSizingFunction::percent(0.5).min.definite_value(Some(100.0)), Some(50.0));
    }

    #[test]
    fn test_grid_placement_span() {
        assert_eq!(grid_span(2).indefinite_span(), 2);
        assert_eq!(grid_line(3).indefinite_span(), 1);
        assert_eq!(InlinePair::<GridPlacement>::AUTO.indefinite_span(), 1);
    }
}
