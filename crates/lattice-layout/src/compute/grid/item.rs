//! Per-item bookkeeping for the grid algorithm.

use core::ops::Range;

use lattice_core::{
    AbsoluteAxis, AlignItems, AlignSelf, Dimension, InlinePair, LengthPercentageAuto, MaybeMath,
    MinTrackSizingFunction, NodeId, Overflow, Point, Rect, Size, Style,
};

use crate::compute::grid::types::{GridTrack, OriginZeroLine, OriginZeroLineRange};
use crate::compute::{measure_child_size, SizingMode};
use crate::measure::Measure;
use crate::tree::LayoutTree;

/// A single in-flow grid item with its resolved placement and the style
/// fields the track sizing and alignment passes consult.
pub(super) struct GridItem {
    pub node: NodeId,
    /// Position in the parent's child list, used for paint order
    pub source_order: u16,

    /// Placement as origin-zero lines (resolved by the placement step)
    pub row: InlinePair<OriginZeroLine>,
    pub column: InlinePair<OriginZeroLine>,

    /// Placement as indexes into the axis track vectors, filled in once the
    /// final track counts are known
    pub row_indexes: Range<u16>,
    pub column_indexes: Range<u16>,

    pub crosses_flexible_row: bool,
    pub crosses_flexible_column: bool,
    pub crosses_intrinsic_row: bool,
    pub crosses_intrinsic_column: bool,

    pub overflow: Point<Overflow>,
    pub size: Size<Dimension>,
    pub min_size: Size<Dimension>,
    pub max_size: Size<Dimension>,
    pub aspect_ratio: Option<f32>,
    pub margin: Rect<LengthPercentageAuto>,
    pub align_self: AlignSelf,

    /// First baseline measured during row sizing, if this item takes part
    /// in baseline alignment
    pub baseline: Option<f32>,
    /// Extra space above the item that lines its baseline up with the
    /// largest baseline in its row
    pub baseline_shim: f32,

    /// Border-box vertical position and height of the final layout, kept
    /// for the container baseline
    pub y_position: f32,
    pub height: f32,
}

impl GridItem {
    pub(super) fn new_with_placement_style_and_order(
        node: NodeId,
        column_span: InlinePair<OriginZeroLine>,
        row_span: InlinePair<OriginZeroLine>,
        style: &Style,
        parent_align_items: AlignItems,
        source_order: u16,
    ) -> Self {
        Self {
            node,
            source_order,
            row: row_span,
            column: column_span,
            row_indexes: 0..0,
            column_indexes: 0..0,
            crosses_flexible_row: false,
            crosses_flexible_column: false,
            crosses_intrinsic_row: false,
            crosses_intrinsic_column: false,
            overflow: style.overflow,
            size: style.size,
            min_size: style.min_size,
            max_size: style.max_size,
            aspect_ratio: style.aspect_ratio,
            margin: style.margin,
            align_self: style.align_self.unwrap_or(parent_align_items),
            baseline: None,
            baseline_shim: 0.0,
            y_position: 0.0,
            height: 0.0,
        }
    }

    pub(super) fn placement(&self, axis: AbsoluteAxis) -> InlinePair<OriginZeroLine> {
        match axis {
            AbsoluteAxis::Horizontal => self.column,
            AbsoluteAxis::Vertical => self.row,
        }
    }

    pub(super) fn placement_indexes(&self, axis: AbsoluteAxis) -> Range<u16> {
        match axis {
            AbsoluteAxis::Horizontal => self.column_indexes.clone(),
            AbsoluteAxis::Vertical => self.row_indexes.clone(),
        }
    }

    /// Track-vector range covering only the tracks this item spans, skipping
    /// the bounding gutters.
    pub(super) fn track_range_excluding_lines(&self, axis: AbsoluteAxis) -> Range<usize> {
        let indexes = self.placement_indexes(axis);
        (indexes.start as usize + 1)..(indexes.end as usize)
    }

    pub(super) fn span(&self, axis: AbsoluteAxis) -> u16 {
        self.placement(axis).span()
    }

    pub(super) fn crosses_flexible_track(&self, axis: AbsoluteAxis) -> bool {
        match axis {
            AbsoluteAxis::Horizontal => self.crosses_flexible_column,
            AbsoluteAxis::Vertical => self.crosses_flexible_row,
        }
    }

    pub(super) fn crosses_intrinsic_track(&self, axis: AbsoluteAxis) -> bool {
        match axis {
            AbsoluteAxis::Horizontal => self.crosses_intrinsic_column,
            AbsoluteAxis::Vertical => self.crosses_intrinsic_row,
        }
    }

    /// Estimate the item's known dimensions for measurement while sizing
    /// `axis`: the sized axis stays unknown and the other axis is the sum of
    /// the (estimated) sizes of the tracks the item spans.
    pub(super) fn known_dimensions(
        &self,
        axis: AbsoluteAxis,
        other_axis_tracks: &[GridTrack],
        other_axis_available_space: Option<f32>,
        get_track_size_estimate: fn(&GridTrack, Option<f32>) -> Option<f32>,
    ) -> Size<Option<f32>> {
        let other_axis_size: Option<f32> = other_axis_tracks
            [self.track_range_excluding_lines(axis.other())]
        .iter()
        .map(|track| {
            get_track_size_estimate(track, other_axis_available_space)
                .map(|size| size + track.content_alignment_adjustment)
        })
        .sum();

        let mut size = Size::NONE;
        size.set_abs(axis.other(), other_axis_size);
        size
    }

    /// The sum of fixed max track sizing functions across the spanned
    /// tracks, if every spanned track has one. Used to cap contributions of
    /// items that span only fixed tracks.
    pub(super) fn spanned_track_limit(
        &self,
        axis: AbsoluteAxis,
        axis_tracks: &[GridTrack],
        axis_inner_node_size: Option<f32>,
    ) -> Option<f32> {
        let spanned_tracks = &axis_tracks[self.track_range_excluding_lines(axis)];
        let all_fixed =
            spanned_tracks.iter().all(|track| track.max_definite_limit(axis_inner_node_size).is_some());
        if all_fixed {
            let limit: f32 = spanned_tracks
                .iter()
                .filter_map(|track| track.max_definite_limit(axis_inner_node_size))
                .sum();
            Some(limit)
        } else {
            None
        }
    }

    /// Margin sums per axis, with the baseline shim folded into the top
    /// margin. Percentage margins resolve against the inline size of the
    /// container in both axes.
    pub(super) fn margins_axis_sums_with_baseline_shims(&self, inner_node_width: Option<f32>) -> Size<f32> {
        Rect {
            left: self.margin.left.resolve_or_zero(inner_node_width),
            right: self.margin.right.resolve_or_zero(inner_node_width),
            top: self.margin.top.resolve_or_zero(inner_node_width) + self.baseline_shim,
            bottom: self.margin.bottom.resolve_or_zero(inner_node_width),
        }
        .sum_axes()
    }

    pub(super) fn min_content_contribution<Ctx, M: Measure<Ctx>>(
        &self,
        axis: AbsoluteAxis,
        tree: &mut LayoutTree<Ctx>,
        measure: &mut M,
        known_dimensions: Size<Option<f32>>,
        inner_node_size: Size<Option<f32>>,
    ) -> f32 {
        measure_child_size(
            tree,
            measure,
            self.node,
            known_dimensions,
            inner_node_size,
            Size::MIN_CONTENT,
            SizingMode::InherentSize,
        )
        .get_abs(axis)
    }

    pub(super) fn max_content_contribution<Ctx, M: Measure<Ctx>>(
        &self,
        axis: AbsoluteAxis,
        tree: &mut LayoutTree<Ctx>,
        measure: &mut M,
        known_dimensions: Size<Option<f32>>,
        inner_node_size: Size<Option<f32>>,
    ) -> f32 {
        measure_child_size(
            tree,
            measure,
            self.node,
            known_dimensions,
            inner_node_size,
            Size::MAX_CONTENT,
            SizingMode::InherentSize,
        )
        .get_abs(axis)
    }

    /// The item's contribution to intrinsic minimum track sizes.
    ///
    /// This is the resolved preferred size, else the resolved min size, else
    /// zero for scroll containers, else the content-based minimum when the
    /// spanned tracks make one applicable.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn minimum_contribution<Ctx, M: Measure<Ctx>>(
        &self,
        tree: &mut LayoutTree<Ctx>,
        measure: &mut M,
        axis: AbsoluteAxis,
        axis_tracks: &[GridTrack],
        known_dimensions: Size<Option<f32>>,
        inner_node_size: Size<Option<f32>>,
    ) -> f32 {
        let style_size = self
            .size
            .maybe_resolve(known_dimensions)
            .maybe_apply_aspect_ratio(self.aspect_ratio)
            .get_abs(axis);
        let style_min_size = self
            .min_size
            .maybe_resolve(known_dimensions)
            .maybe_apply_aspect_ratio(self.aspect_ratio)
            .get_abs(axis);
        let automatic_min_size = self.overflow.get_abs(axis).maybe_into_automatic_min_size();

        if let Some(definite) = style_size.or(style_min_size).or(automatic_min_size) {
            return definite;
        }

        // Automatic minimum: applies when the item spans an auto-min track
        // and does not span a flexible track (unless it spans exactly one
        // track)
        let spanned_tracks = &axis_tracks[self.track_range_excluding_lines(axis)];
        let spans_auto_min_track = spanned_tracks
            .iter()
            .any(|track| matches!(track.min_track_sizing_function, MinTrackSizingFunction::Auto));
        let only_span_one_track = spanned_tracks.len() == 1;
        let spans_a_flexible_track = spanned_tracks.iter().any(|track| track.is_flexible());

        if spans_auto_min_track && (only_span_one_track || !spans_a_flexible_track) {
            self.min_content_contribution(axis, tree, measure, known_dimensions, inner_node_size)
                .maybe_min(self.max_size.maybe_resolve(known_dimensions).get_abs(axis))
        } else {
            0.0
        }
    }
}
