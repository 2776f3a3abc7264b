//! The grid track sizing algorithm.
//!
//! Sizes one axis at a time through the CSS Grid resolution order:
//! initialise track sizes, resolve intrinsic sizes from item contributions,
//! maximise tracks, expand flexible tracks, then stretch auto tracks.
//! Gutters participate as fixed-size tracks that no item ever spans.

use core::cmp::Ordering;

use lattice_core::{
    AbsoluteAxis, AlignContent, AlignSelf, AvailableSpace, LengthPercentage, MaybeMath,
    MaxTrackSizingFunction, MinTrackSizingFunction, Size,
};

use crate::compute::grid::item::GridItem;
use crate::compute::grid::types::{GridTrack, OriginZeroLineRange, TrackCounts};
use crate::compute::{perform_child_layout, SizingMode};
use crate::measure::Measure;
use crate::tree::LayoutTree;

/// Whether a minimum or a maximum size's space is being distributed, which
/// selects the filter used when distributing space beyond limits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum IntrinsicContributionType {
    Minimum,
    Maximum,
}

fn max_is_fit_content(track: &GridTrack) -> bool {
    matches!(track.max_track_sizing_function, MaxTrackSizingFunction::FitContent(_))
}

/// Max-content, or fit-content which behaves as max-content up to a limit.
fn max_is_max_content_alike(track: &GridTrack) -> bool {
    matches!(
        track.max_track_sizing_function,
        MaxTrackSizingFunction::MaxContent | MaxTrackSizingFunction::FitContent(_)
    )
}

fn max_uses_percentage(track: &GridTrack) -> bool {
    matches!(
        track.max_track_sizing_function,
        MaxTrackSizingFunction::Fixed(LengthPercentage::Percent(_))
            | MaxTrackSizingFunction::FitContent(LengthPercentage::Percent(_))
    )
}

/// Walks items sorted by (crosses-flex, span, start) and yields batches of
/// equal-span non-flex items, then all flex-crossing items as one batch.
///
/// A manual version of `Iterator::next` taking `items` as a parameter on
/// each call, so the caller keeps ownership of the slice between batches.
struct ItemBatcher {
    axis: AbsoluteAxis,
    index_offset: usize,
    current_span: u16,
    current_is_flex: bool,
}

impl ItemBatcher {
    fn new(axis: AbsoluteAxis) -> Self {
        ItemBatcher { axis, index_offset: 0, current_span: 1, current_is_flex: false }
    }

    fn next<'items>(&mut self, items: &'items mut [GridItem]) -> Option<(&'items mut [GridItem], bool)> {
        if self.current_is_flex || self.index_offset >= items.len() {
            return None;
        }

        let item = &items[self.index_offset];
        self.current_span = item.span(self.axis);
        self.current_is_flex = item.crosses_flexible_track(self.axis);

        let next_index_offset = if self.current_is_flex {
            items.len()
        } else {
            items
                .iter()
                .position(|item| {
                    item.crosses_flexible_track(self.axis) || item.span(self.axis) > self.current_span
                })
                .unwrap_or(items.len())
        };

        let batch_range = self.index_offset..next_index_offset;
        self.index_offset = next_index_offset;

        Some((&mut items[batch_range], self.current_is_flex))
    }
}

/// Bundles the state needed to measure item size contributions so it does
/// not have to be threaded through every sizing pass separately.
struct IntrinsicSizeMeasurer<'tree, 'm, 'oat, Ctx, M: Measure<Ctx>> {
    tree: &'tree mut LayoutTree<Ctx>,
    measure: &'m mut M,
    other_axis_tracks: &'oat [GridTrack],
    get_track_size_estimate: fn(&GridTrack, Option<f32>) -> Option<f32>,
    axis: AbsoluteAxis,
    inner_node_size: Size<Option<f32>>,
}

impl<Ctx, M: Measure<Ctx>> IntrinsicSizeMeasurer<'_, '_, '_, Ctx, M> {
    fn known_dimensions(&self, item: &GridItem) -> Size<Option<f32>> {
        item.known_dimensions(
            self.axis,
            self.other_axis_tracks,
            self.inner_node_size.get_abs(self.axis.other()),
            self.get_track_size_estimate,
        )
    }

    fn margins_axis_sums_with_baseline_shims(&self, item: &GridItem) -> Size<f32> {
        item.margins_axis_sums_with_baseline_shims(self.inner_node_size.width)
    }

    fn min_content_contribution(&mut self, item: &GridItem) -> f32 {
        let known_dimensions = self.known_dimensions(item);
        let margin_axis_sums = self.margins_axis_sums_with_baseline_shims(item);
        let contribution = item.min_content_contribution(
            self.axis,
            self.tree,
            self.measure,
            known_dimensions,
            self.inner_node_size,
        );
        contribution + margin_axis_sums.get_abs(self.axis)
    }

    fn max_content_contribution(&mut self, item: &GridItem) -> f32 {
        let known_dimensions = self.known_dimensions(item);
        let margin_axis_sums = self.margins_axis_sums_with_baseline_shims(item);
        let contribution = item.max_content_contribution(
            self.axis,
            self.tree,
            self.measure,
            known_dimensions,
            self.inner_node_size,
        );
        contribution + margin_axis_sums.get_abs(self.axis)
    }

    /// The smallest outer size the item can have: its resolved preferred or
    /// minimum size where one applies, else a content-based minimum.
    fn minimum_contribution(&mut self, item: &GridItem, axis_tracks: &[GridTrack]) -> f32 {
        let known_dimensions = self.known_dimensions(item);
        let margin_axis_sums = self.margins_axis_sums_with_baseline_shims(item);
        let contribution = item.minimum_contribution(
            self.tree,
            self.measure,
            self.axis,
            axis_tracks,
            known_dimensions,
            self.inner_node_size,
        );
        contribution + margin_axis_sums.get_abs(self.axis)
    }
}

/// Order items for the sizing passes: items not crossing a flexible track
/// first, then by ascending span, then by start line.
pub(super) fn cmp_by_cross_flex_then_span_then_start(
    axis: AbsoluteAxis,
) -> impl FnMut(&GridItem, &GridItem) -> Ordering {
    move |item_a: &GridItem, item_b: &GridItem| -> Ordering {
        match (item_a.crosses_flexible_track(axis), item_b.crosses_flexible_track(axis)) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => {
                let placement_a = item_a.placement(axis);
                let placement_b = item_b.placement(axis);
                match placement_a.span().cmp(&placement_b.span()) {
                    Ordering::Less => Ordering::Less,
                    Ordering::Greater => Ordering::Greater,
                    Ordering::Equal => placement_a.start.cmp(&placement_b.start),
                }
            }
        }
    }
}

/// Extra size added to each inner gutter when estimating item sizes in the
/// opposite axis, accounting for content-distribution alignment there.
///
/// Items never cross the outermost gutters, so the start/end variants all
/// behave alike here and only the distributed keywords contribute.
pub(super) fn compute_alignment_gutter_adjustment(
    alignment: AlignContent,
    axis_inner_node_size: Option<f32>,
    get_track_size_estimate: impl Fn(&GridTrack, Option<f32>) -> Option<f32>,
    tracks: &[GridTrack],
) -> f32 {
    if tracks.len() <= 1 {
        return 0.0;
    }

    let outer_gutter_weight = match alignment {
        AlignContent::Stretch | AlignContent::SpaceBetween => 0,
        _ => 1,
    };

    let inner_gutter_weight = match alignment {
        AlignContent::SpaceBetween => 1,
        AlignContent::SpaceAround => 2,
        AlignContent::SpaceEvenly => 1,
        _ => 0,
    };

    if inner_gutter_weight == 0 {
        return 0.0;
    }

    if let Some(axis_inner_node_size) = axis_inner_node_size {
        let free_space = tracks
            .iter()
            .map(|track| get_track_size_estimate(track, Some(axis_inner_node_size)))
            .sum::<Option<f32>>()
            .map(|track_size_sum| f32::max(0.0, axis_inner_node_size - track_size_sum))
            .unwrap_or(0.0);

        let weighted_track_count =
            (((tracks.len() - 3) / 2) * inner_gutter_weight) + (2 * outer_gutter_weight);

        return (free_space / weighted_track_count as f32) * inner_gutter_weight as f32;
    }

    0.0
}

/// Convert each item's origin-zero placement into indexes into the track
/// vectors, once the final track counts are known.
pub(super) fn resolve_item_track_indexes(
    items: &mut [GridItem],
    column_counts: TrackCounts,
    row_counts: TrackCounts,
) {
    for item in items {
        item.column_indexes = (item.column.start.into_track_vec_index(column_counts) as u16)
            ..(item.column.end.into_track_vec_index(column_counts) as u16);
        item.row_indexes = (item.row.start.into_track_vec_index(row_counts) as u16)
            ..(item.row.end.into_track_vec_index(row_counts) as u16);
    }
}

/// Record per-item whether it crosses any flexible or intrinsic tracks in
/// each axis.
pub(super) fn determine_if_item_crosses_flexible_or_intrinsic_tracks(
    items: &mut [GridItem],
    columns: &[GridTrack],
    rows: &[GridTrack],
) {
    for item in items {
        item.crosses_flexible_column = item
            .track_range_excluding_lines(AbsoluteAxis::Horizontal)
            .any(|i| columns[i].is_flexible());
        item.crosses_intrinsic_column = item
            .track_range_excluding_lines(AbsoluteAxis::Horizontal)
            .any(|i| columns[i].has_intrinsic_sizing_function());
        item.crosses_flexible_row =
            item.track_range_excluding_lines(AbsoluteAxis::Vertical).any(|i| rows[i].is_flexible());
        item.crosses_intrinsic_row = item
            .track_range_excluding_lines(AbsoluteAxis::Vertical)
            .any(|i| rows[i].has_intrinsic_sizing_function());
    }
}

/// Run the full track sizing algorithm for one axis.
#[allow(clippy::too_many_arguments)]
pub(super) fn track_sizing_algorithm<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    axis: AbsoluteAxis,
    axis_min_size: Option<f32>,
    axis_max_size: Option<f32>,
    axis_alignment: AlignContent,
    other_axis_alignment: AlignContent,
    available_grid_space: Size<AvailableSpace>,
    inner_node_size: Size<Option<f32>>,
    axis_tracks: &mut [GridTrack],
    other_axis_tracks: &mut [GridTrack],
    items: &mut [GridItem],
    get_track_size_estimate: fn(&GridTrack, Option<f32>) -> Option<f32>,
    has_baseline_aligned_item: bool,
) {
    // 11.4 Initialise track sizes
    let percentage_basis = inner_node_size.get_abs(axis).or(axis_min_size);
    initialize_track_sizes(axis_tracks, percentage_basis);

    // 11.5.1 Shim item baselines
    if has_baseline_aligned_item {
        resolve_item_baselines(tree, measure, axis, items, inner_node_size);
    }

    // Fully fixed tracks need none of the content-driven passes
    if axis_tracks.iter().all(|track| track.base_size == track.growth_limit) {
        return;
    }

    // Content-distribution alignment in the other axis widens the gutters
    // items span when estimating their available space
    let gutter_alignment_adjustment = compute_alignment_gutter_adjustment(
        other_axis_alignment,
        inner_node_size.get_abs(axis.other()),
        get_track_size_estimate,
        other_axis_tracks,
    );
    if other_axis_tracks.len() > 3 {
        let len = other_axis_tracks.len();
        for track in other_axis_tracks[2..len].iter_mut().step_by(2) {
            track.content_alignment_adjustment = gutter_alignment_adjustment;
        }
    }

    // 11.5 Resolve intrinsic track sizes
    resolve_intrinsic_track_sizes(
        tree,
        measure,
        axis,
        axis_tracks,
        other_axis_tracks,
        items,
        available_grid_space.get_abs(axis),
        inner_node_size,
        get_track_size_estimate,
    );

    // 11.6 Maximise tracks
    maximise_tracks(axis_tracks, inner_node_size.get_abs(axis), available_grid_space.get_abs(axis));

    // The final expansion steps only expand into space generated by the
    // container's own size, not into arbitrary available space, so definite
    // available space maps to max-content when the inner size is unknown
    let axis_available_space_for_expansion = if let Some(available_space) = inner_node_size.get_abs(axis)
    {
        AvailableSpace::Definite(available_space)
    } else {
        match available_grid_space.get_abs(axis) {
            AvailableSpace::MinContent => AvailableSpace::MinContent,
            AvailableSpace::MaxContent | AvailableSpace::Definite(_) => AvailableSpace::MaxContent,
        }
    };

    // 11.7 Expand flexible tracks
    expand_flexible_tracks(
        tree,
        measure,
        axis,
        axis_tracks,
        items,
        axis_min_size,
        axis_max_size,
        axis_available_space_for_expansion,
        inner_node_size,
    );

    // 11.8 Stretch auto tracks
    if axis_alignment == AlignContent::Stretch {
        stretch_auto_tracks(axis_tracks, axis_min_size, axis_available_space_for_expansion);
    }
}

fn flush_planned_base_size_increases(tracks: &mut [GridTrack]) {
    for track in tracks {
        track.base_size += track.base_size_planned_increase;
        track.base_size_planned_increase = 0.0;
    }
}

fn flush_planned_growth_limit_increases(tracks: &mut [GridTrack], set_infinitely_growable: bool) {
    for track in tracks {
        if track.growth_limit_planned_increase > 0.0 {
            track.growth_limit = if track.growth_limit == f32::INFINITY {
                track.base_size + track.growth_limit_planned_increase
            } else {
                track.growth_limit + track.growth_limit_planned_increase
            };
            track.infinitely_growable = set_infinitely_growable;
        } else {
            track.infinitely_growable = false;
        }
        track.growth_limit_planned_increase = 0.0;
    }
}

/// 11.4 Initialise track sizes.
///
/// Fixed sizing functions resolve directly; intrinsic ones start at zero
/// base size and infinite growth limit.
fn initialize_track_sizes(axis_tracks: &mut [GridTrack], axis_inner_node_size: Option<f32>) {
    for track in axis_tracks.iter_mut() {
        track.base_size =
            track.min_track_sizing_function.definite_value(axis_inner_node_size).unwrap_or(0.0);
        track.growth_limit = track
            .max_track_sizing_function
            .definite_value(axis_inner_node_size)
            .unwrap_or(f32::INFINITY);

        if track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
    }
}

/// 11.5.1 Shim baseline-aligned items so their size contributions reflect
/// their baseline alignment.
fn resolve_item_baselines<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    axis: AbsoluteAxis,
    items: &mut [GridItem],
    inner_node_size: Size<Option<f32>>,
) {
    // Group items by their start track in the other axis (their row)
    let other_axis = axis.other();
    items.sort_by_key(|item| item.placement(other_axis).start);

    let mut remaining_items = &mut items[0..];
    while !remaining_items.is_empty() {
        let current_row = remaining_items[0].placement(other_axis).start;
        let next_row_first_item =
            remaining_items.iter().position(|item| item.placement(other_axis).start != current_row);

        let row_items = if let Some(index) = next_row_first_item {
            let (row_items, tail) = remaining_items.split_at_mut(index);
            remaining_items = tail;
            row_items
        } else {
            let row_items = remaining_items;
            remaining_items = &mut [];
            row_items
        };

        // Baseline alignment is a no-op for rows with fewer than two
        // participating items
        let row_baseline_item_count =
            row_items.iter().filter(|item| item.align_self == AlignSelf::Baseline).count();
        if row_baseline_item_count <= 1 {
            continue;
        }

        for item in row_items.iter_mut() {
            let measured_size_and_baselines = perform_child_layout(
                tree,
                measure,
                item.node,
                Size::NONE,
                inner_node_size,
                Size::MIN_CONTENT,
                SizingMode::InherentSize,
            );

            let baseline = measured_size_and_baselines.first_baselines.y;
            let height = measured_size_and_baselines.size.height;
            item.baseline =
                Some(baseline.unwrap_or(height) + item.margin.top.resolve_or_zero(inner_node_size.width));
        }

        let row_max_baseline =
            row_items.iter().map(|item| item.baseline.unwrap_or(0.0)).fold(0.0, f32::max);
        for item in row_items.iter_mut() {
            item.baseline_shim = row_max_baseline - item.baseline.unwrap_or(0.0);
        }
    }
}

/// 11.5 Resolve intrinsic track sizes.
#[allow(clippy::too_many_arguments)]
fn resolve_intrinsic_track_sizes<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    axis: AbsoluteAxis,
    axis_tracks: &mut [GridTrack],
    other_axis_tracks: &[GridTrack],
    items: &mut [GridItem],
    axis_available_grid_space: AvailableSpace,
    inner_node_size: Size<Option<f32>>,
    get_track_size_estimate: fn(&GridTrack, Option<f32>) -> Option<f32>,
) {
    // Items are processed in ascending span order, non-flex-crossing items
    // first, which the batcher below relies on
    items.sort_by(cmp_by_cross_flex_then_span_then_start(axis));

    let axis_inner_node_size = inner_node_size.get_abs(axis);
    let flex_factor_sum = axis_tracks.iter().map(|track| track.flex_factor()).sum::<f32>();
    let mut item_sizer = IntrinsicSizeMeasurer {
        tree,
        measure,
        other_axis_tracks,
        axis,
        inner_node_size,
        get_track_size_estimate,
    };

    let mut batched_item_iterator = ItemBatcher::new(axis);
    while let Some((batch, is_flex)) = batched_item_iterator.next(items) {
        // Step 2: size tracks to fit non-spanning items. Single-span items
        // contribute directly to their one track
        let batch_span = batch[0].placement(axis).span();
        if !is_flex && batch_span == 1 {
            for item in batch.iter_mut() {
                let track_index = item.placement_indexes(axis).start + 1;
                let track = &axis_tracks[track_index as usize];

                let new_base_size = match track.min_track_sizing_function {
                    MinTrackSizingFunction::MinContent => {
                        f32::max(track.base_size, item_sizer.min_content_contribution(item))
                    }
                    // Percentage tracks in an indefinite container behave as
                    // min-content until the container size resolves
                    MinTrackSizingFunction::Fixed(LengthPercentage::Percent(_)) => {
                        if axis_inner_node_size.is_none() {
                            f32::max(track.base_size, item_sizer.min_content_contribution(item))
                        } else {
                            track.base_size
                        }
                    }
                    MinTrackSizingFunction::MaxContent => {
                        f32::max(track.base_size, item_sizer.max_content_contribution(item))
                    }
                    MinTrackSizingFunction::Auto => {
                        let space = match axis_available_grid_space {
                            // Under an intrinsic sizing constraint, use the
                            // limited min-content contribution instead of the
                            // minimum contribution, except for scroll
                            // containers whose automatic minimum of zero wins
                            AvailableSpace::MinContent | AvailableSpace::MaxContent
                                if !item.overflow.get_abs(axis).is_scroll_container() =>
                            {
                                let axis_minimum_size =
                                    item_sizer.minimum_contribution(item, axis_tracks);
                                let axis_min_content_size = item_sizer.min_content_contribution(item);
                                let limit = track.max_definite_limit(axis_inner_node_size);
                                axis_min_content_size.maybe_min(limit).max(axis_minimum_size)
                            }
                            _ => item_sizer.minimum_contribution(item, axis_tracks),
                        };
                        f32::max(track.base_size, space)
                    }
                    MinTrackSizingFunction::Fixed(LengthPercentage::Length(_)) => track.base_size,
                };
                let track = &mut axis_tracks[track_index as usize];
                track.base_size = new_base_size;

                let track = &axis_tracks[track_index as usize];
                if max_is_fit_content(track) {
                    let mut planned_increase = track.growth_limit_planned_increase;
                    if !item.overflow.get_abs(axis).is_scroll_container() {
                        planned_increase =
                            f32::max(planned_increase, item_sizer.min_content_contribution(item));
                    }

                    // The max-content contribution counts only up to the
                    // fit-content limit
                    let fit_content_limit = track.fit_content_limit(axis_inner_node_size);
                    let max_content_contribution =
                        f32::min(item_sizer.max_content_contribution(item), fit_content_limit);
                    planned_increase = f32::max(planned_increase, max_content_contribution);
                    axis_tracks[track_index as usize].growth_limit_planned_increase = planned_increase;
                } else if max_is_max_content_alike(track)
                    || (max_uses_percentage(track) && axis_inner_node_size.is_none())
                {
                    let planned_increase = f32::max(
                        track.growth_limit_planned_increase,
                        item_sizer.max_content_contribution(item),
                    );
                    axis_tracks[track_index as usize].growth_limit_planned_increase = planned_increase;
                } else if track.max_track_sizing_function.is_intrinsic() {
                    let planned_increase = f32::max(
                        track.growth_limit_planned_increase,
                        item_sizer.min_content_contribution(item),
                    );
                    axis_tracks[track_index as usize].growth_limit_planned_increase = planned_increase;
                }
            }

            for track in axis_tracks.iter_mut() {
                if track.growth_limit_planned_increase > 0.0 {
                    track.growth_limit = if track.growth_limit == f32::INFINITY {
                        track.growth_limit_planned_increase
                    } else {
                        f32::max(track.growth_limit, track.growth_limit_planned_increase)
                    };
                }
                track.infinitely_growable = false;
                track.growth_limit_planned_increase = 0.0;
                if track.growth_limit < track.base_size {
                    track.growth_limit = track.base_size;
                }
            }

            continue;
        }

        let use_flex_factor_for_distribution = is_flex && flex_factor_sum != 0.0;

        // Step 3 pass 1: intrinsic minimums. Increase base sizes of tracks
        // with an intrinsic min sizing function per item minimum
        // contributions
        for item in batch.iter_mut().filter(|item| item.crosses_intrinsic_track(axis)) {
            let space = match axis_available_grid_space {
                AvailableSpace::MinContent | AvailableSpace::MaxContent
                    if !item.overflow.get_abs(axis).is_scroll_container() =>
                {
                    let axis_minimum_size = item_sizer.minimum_contribution(item, axis_tracks);
                    let axis_min_content_size = item_sizer.min_content_contribution(item);
                    let limit = item.spanned_track_limit(axis, axis_tracks, axis_inner_node_size);
                    axis_min_content_size.maybe_min(limit).max(axis_minimum_size)
                }
                _ => item_sizer.minimum_contribution(item, axis_tracks),
            };
            let is_scroll_container = item.overflow.get_abs(axis).is_scroll_container();
            let tracks = &mut axis_tracks[item.track_range_excluding_lines(axis)];
            if space > 0.0 {
                let has_intrinsic_min_track_sizing_function = |track: &GridTrack| {
                    track.min_track_sizing_function.definite_value(axis_inner_node_size).is_none()
                };
                if is_scroll_container {
                    distribute_item_space_to_base_size(
                        is_flex,
                        use_flex_factor_for_distribution,
                        space,
                        tracks,
                        has_intrinsic_min_track_sizing_function,
                        move |track| track.fit_content_limited_growth_limit(axis_inner_node_size),
                        IntrinsicContributionType::Minimum,
                    );
                } else {
                    distribute_item_space_to_base_size(
                        is_flex,
                        use_flex_factor_for_distribution,
                        space,
                        tracks,
                        has_intrinsic_min_track_sizing_function,
                        |track| track.growth_limit,
                        IntrinsicContributionType::Minimum,
                    );
                }
            }
        }
        flush_planned_base_size_increases(axis_tracks);

        // Step 3 pass 2: content-based minimums for min-content/max-content
        // min sizing functions
        let has_min_or_max_content_min_track_sizing_function = |track: &GridTrack| {
            matches!(
                track.min_track_sizing_function,
                MinTrackSizingFunction::MinContent | MinTrackSizingFunction::MaxContent
            )
        };
        for item in batch.iter_mut() {
            let space = item_sizer.min_content_contribution(item);
            let is_scroll_container = item.overflow.get_abs(axis).is_scroll_container();
            let tracks = &mut axis_tracks[item.track_range_excluding_lines(axis)];
            if space > 0.0 {
                if is_scroll_container {
                    distribute_item_space_to_base_size(
                        is_flex,
                        use_flex_factor_for_distribution,
                        space,
                        tracks,
                        has_min_or_max_content_min_track_sizing_function,
                        move |track| track.fit_content_limited_growth_limit(axis_inner_node_size),
                        IntrinsicContributionType::Minimum,
                    );
                } else {
                    distribute_item_space_to_base_size(
                        is_flex,
                        use_flex_factor_for_distribution,
                        space,
                        tracks,
                        has_min_or_max_content_min_track_sizing_function,
                        |track| track.growth_limit,
                        IntrinsicContributionType::Minimum,
                    );
                }
            }
        }
        flush_planned_base_size_increases(axis_tracks);

        // Step 3 pass 3: under a max-content constraint, limited max-content
        // contributions go to auto and max-content minimum tracks
        if axis_available_grid_space == AvailableSpace::MaxContent {
            // Max-content minimums take priority over auto minimums when
            // both kinds of track are spanned, matching browser behaviour
            fn has_auto_min_track_sizing_function(track: &GridTrack) -> bool {
                matches!(track.min_track_sizing_function, MinTrackSizingFunction::Auto)
                    && !matches!(track.max_track_sizing_function, MaxTrackSizingFunction::MinContent)
            }

            fn has_max_content_min_track_sizing_function(track: &GridTrack) -> bool {
                matches!(track.min_track_sizing_function, MinTrackSizingFunction::MaxContent)
            }

            for item in batch.iter_mut() {
                let axis_max_content_size = item_sizer.max_content_contribution(item);
                let limit = item.spanned_track_limit(axis, axis_tracks, axis_inner_node_size);
                let space = axis_max_content_size.maybe_min(limit);
                let tracks = &mut axis_tracks[item.track_range_excluding_lines(axis)];
                if space > 0.0 {
                    if tracks.iter().any(has_max_content_min_track_sizing_function) {
                        distribute_item_space_to_base_size(
                            is_flex,
                            use_flex_factor_for_distribution,
                            space,
                            tracks,
                            has_max_content_min_track_sizing_function,
                            |_| f32::INFINITY,
                            IntrinsicContributionType::Maximum,
                        );
                    } else {
                        distribute_item_space_to_base_size(
                            is_flex,
                            use_flex_factor_for_distribution,
                            space,
                            tracks,
                            has_auto_min_track_sizing_function,
                            move |track| track.fit_content_limited_growth_limit(axis_inner_node_size),
                            IntrinsicContributionType::Maximum,
                        );
                    }
                }
            }
            flush_planned_base_size_increases(axis_tracks);
        }

        // Step 3 pass 4: max-content contributions always go to max-content
        // minimum tracks
        let has_max_content_min_track_sizing_function = |track: &GridTrack| {
            matches!(track.min_track_sizing_function, MinTrackSizingFunction::MaxContent)
        };
        for item in batch.iter_mut() {
            let space = item_sizer.max_content_contribution(item);
            let tracks = &mut axis_tracks[item.track_range_excluding_lines(axis)];
            if space > 0.0 {
                distribute_item_space_to_base_size(
                    is_flex,
                    use_flex_factor_for_distribution,
                    space,
                    tracks,
                    has_max_content_min_track_sizing_function,
                    |track| track.growth_limit,
                    IntrinsicContributionType::Maximum,
                );
            }
        }
        flush_planned_base_size_increases(axis_tracks);

        // Step 4: growth limits never fall below base sizes
        for track in axis_tracks.iter_mut() {
            if track.growth_limit < track.base_size {
                track.growth_limit = track.base_size;
            }
        }

        // Flexible tracks have no intrinsic max sizing function, so the
        // growth limit passes only apply to non-flex batches
        if !is_flex {
            // Step 5: intrinsic maximums grow from min-content contributions
            let has_intrinsic_max_track_sizing_function = |track: &GridTrack| {
                track.max_track_sizing_function.definite_value(axis_inner_node_size).is_none()
            };
            for item in batch.iter_mut() {
                let space = item_sizer.min_content_contribution(item);
                let tracks = &mut axis_tracks[item.track_range_excluding_lines(axis)];
                if space > 0.0 {
                    distribute_item_space_to_growth_limit(
                        space,
                        tracks,
                        has_intrinsic_max_track_sizing_function,
                        inner_node_size.get_abs(axis),
                    );
                }
            }
            // Tracks whose growth limit became finite here stay infinitely
            // growable for the next step
            flush_planned_growth_limit_increases(axis_tracks, true);

            // Step 6: max-content maximums grow from max-content
            // contributions, fit-content tracks limited by their argument
            let has_max_content_max_track_sizing_function = |track: &GridTrack| {
                max_is_max_content_alike(track)
                    || (max_uses_percentage(track) && axis_inner_node_size.is_none())
            };
            for item in batch.iter_mut() {
                let space = item_sizer.max_content_contribution(item);
                let tracks = &mut axis_tracks[item.track_range_excluding_lines(axis)];
                if space > 0.0 {
                    distribute_item_space_to_growth_limit(
                        space,
                        tracks,
                        has_max_content_max_track_sizing_function,
                        inner_node_size.get_abs(axis),
                    );
                }
            }
            flush_planned_growth_limit_increases(axis_tracks, false);
        }
    }

    // Step 5: any remaining infinite growth limit (e.g. empty or flexible
    // tracks) collapses to the base size so the maximise step cannot grow it
    axis_tracks
        .iter_mut()
        .filter(|track| track.growth_limit == f32::INFINITY)
        .for_each(|track| track.growth_limit = track.base_size);
}

/// 11.5.1 Distributing extra space across spanned tracks (base sizes).
fn distribute_item_space_to_base_size(
    is_flex: bool,
    use_flex_factor_for_distribution: bool,
    space: f32,
    tracks: &mut [GridTrack],
    track_is_affected: impl Fn(&GridTrack) -> bool,
    track_limit: impl Fn(&GridTrack) -> f32,
    intrinsic_contribution_type: IntrinsicContributionType,
) {
    if is_flex {
        let filter = |track: &GridTrack| track.is_flexible() && track_is_affected(track);
        if use_flex_factor_for_distribution {
            distribute_item_space_to_base_size_inner(
                space,
                tracks,
                filter,
                |track| track.flex_factor(),
                track_limit,
                intrinsic_contribution_type,
            )
        } else {
            distribute_item_space_to_base_size_inner(
                space,
                tracks,
                filter,
                |_| 1.0,
                track_limit,
                intrinsic_contribution_type,
            )
        }
    } else {
        distribute_item_space_to_base_size_inner(
            space,
            tracks,
            track_is_affected,
            |_| 1.0,
            track_limit,
            intrinsic_contribution_type,
        )
    }

    fn distribute_item_space_to_base_size_inner(
        space: f32,
        tracks: &mut [GridTrack],
        track_is_affected: impl Fn(&GridTrack) -> bool,
        track_distribution_proportion: impl Fn(&GridTrack) -> f32,
        track_limit: impl Fn(&GridTrack) -> f32,
        intrinsic_contribution_type: IntrinsicContributionType,
    ) {
        if space == 0.0 || !tracks.iter().any(&track_is_affected) {
            return;
        }

        let get_base_size = |track: &GridTrack| track.base_size;

        // 1. Find the space to distribute
        let track_sizes: f32 = tracks.iter().map(|track| track.base_size).sum();
        let extra_space: f32 = f32::max(0.0, space - track_sizes);

        // 2. Distribute space up to limits
        // Stop short of exactly zero to avoid infinite loops from rounding
        const THRESHOLD: f32 = 0.000001;

        let extra_space = distribute_space_up_to_limits(
            extra_space,
            tracks,
            &track_is_affected,
            &track_distribution_proportion,
            get_base_size,
            &track_limit,
        );

        // 3. Distribute remaining space beyond limits. Minimum contributions
        // grow intrinsic-max tracks; maximum contributions grow max-content
        // tracks; if no spanned track matches, all affected tracks grow
        if extra_space > THRESHOLD {
            let mut filter = match intrinsic_contribution_type {
                IntrinsicContributionType::Minimum => {
                    (|track: &GridTrack| track.max_track_sizing_function.is_intrinsic())
                        as fn(&GridTrack) -> bool
                }
                IntrinsicContributionType::Maximum => {
                    (|track: &GridTrack| {
                        matches!(track.min_track_sizing_function, MinTrackSizingFunction::MaxContent)
                            || matches!(
                                track.max_track_sizing_function,
                                MaxTrackSizingFunction::MaxContent
                                    | MaxTrackSizingFunction::FitContent(_)
                            )
                    }) as fn(&GridTrack) -> bool
                }
            };

            let number_of_tracks =
                tracks.iter().filter(|track| track_is_affected(track)).filter(|track| filter(track)).count();
            if number_of_tracks == 0 {
                filter = (|_| true) as fn(&GridTrack) -> bool;
            }

            distribute_space_up_to_limits(
                extra_space,
                tracks,
                filter,
                &track_distribution_proportion,
                get_base_size,
                &track_limit,
            );
        }

        // 4. Fold the item-incurred increases into the planned increases
        for track in tracks.iter_mut() {
            if track.item_incurred_increase > track.base_size_planned_increase {
                track.base_size_planned_increase = track.item_incurred_increase;
            }
            track.item_incurred_increase = 0.0;
        }
    }
}

/// 11.5.1 Distributing extra space across spanned tracks (growth limits).
///
/// For growth limits the per-track limit is either infinity or the limit
/// itself, so space goes entirely to infinitely growable tracks when any
/// exist and is otherwise distributed beyond limits.
fn distribute_item_space_to_growth_limit(
    space: f32,
    tracks: &mut [GridTrack],
    track_is_affected: impl Fn(&GridTrack) -> bool,
    axis_inner_node_size: Option<f32>,
) {
    if space == 0.0 || !tracks.iter().any(&track_is_affected) {
        return;
    }

    // 1. Find the space to distribute
    let track_sizes: f32 = tracks
        .iter()
        .map(|track| if track.growth_limit == f32::INFINITY { track.base_size } else { track.growth_limit })
        .sum();
    let extra_space: f32 = f32::max(0.0, space - track_sizes);

    // 2. Distribute space up to limits
    let is_growable = |track: &GridTrack| {
        track.infinitely_growable
            || track.fit_content_limited_growth_limit(axis_inner_node_size) == f32::INFINITY
    };
    let number_of_growable_tracks =
        tracks.iter().filter(|track| track_is_affected(track)).filter(|track| is_growable(track)).count();
    if number_of_growable_tracks > 0 {
        let item_incurred_increase = extra_space / number_of_growable_tracks as f32;
        for track in
            tracks.iter_mut().filter(|track| track_is_affected(track)).filter(|track| is_growable(track))
        {
            track.item_incurred_increase = item_incurred_increase;
        }
    } else {
        // 3. Distribute space beyond limits
        distribute_space_up_to_limits(
            extra_space,
            tracks,
            track_is_affected,
            |_| 1.0,
            |track| if track.growth_limit == f32::INFINITY { track.base_size } else { track.growth_limit },
            move |track| track.fit_content_limit(axis_inner_node_size),
        );
    }

    // 4. Fold the item-incurred increases into the planned increases
    for track in tracks.iter_mut() {
        if track.item_incurred_increase > track.growth_limit_planned_increase {
            track.growth_limit_planned_increase = track.item_incurred_increase;
        }
        track.item_incurred_increase = 0.0;
    }
}

/// 11.6 Maximise tracks: grow base sizes up to growth limits with any free
/// space.
fn maximise_tracks(
    axis_tracks: &mut [GridTrack],
    axis_inner_node_size: Option<f32>,
    axis_available_grid_space: AvailableSpace,
) {
    let used_space: f32 = axis_tracks.iter().map(|track| track.base_size).sum();
    let free_space = axis_available_grid_space.compute_free_space(used_space);
    if free_space == f32::INFINITY {
        axis_tracks.iter_mut().for_each(|track| track.base_size = track.growth_limit);
    } else if free_space > 0.0 {
        distribute_space_up_to_limits(
            free_space,
            axis_tracks,
            |_| true,
            |_| 1.0,
            |track| track.base_size,
            move |track: &GridTrack| track.fit_content_limited_growth_limit(axis_inner_node_size),
        );
        for track in axis_tracks.iter_mut() {
            track.base_size += track.item_incurred_increase;
            track.item_incurred_increase = 0.0;
        }
    }
}

/// 11.7 Expand flexible tracks by finding the largest fr size that fits the
/// available space.
#[allow(clippy::too_many_arguments)]
fn expand_flexible_tracks<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    axis: AbsoluteAxis,
    axis_tracks: &mut [GridTrack],
    items: &mut [GridItem],
    axis_min_size: Option<f32>,
    axis_max_size: Option<f32>,
    axis_available_space_for_expansion: AvailableSpace,
    inner_node_size: Size<Option<f32>>,
) {
    let flex_fraction = match axis_available_space_for_expansion {
        AvailableSpace::Definite(available_space) => {
            let used_space: f32 = axis_tracks.iter().map(|track| track.base_size).sum();
            let free_space = available_space - used_space;
            if free_space <= 0.0 {
                0.0
            } else {
                find_size_of_fr(axis_tracks, available_space)
            }
        }
        // A min-content constraint gives flexible tracks no space
        AvailableSpace::MinContent => 0.0,
        // Indefinite free space: the used flex fraction is the maximum of
        // the per-track and per-item flex fractions
        AvailableSpace::MaxContent => {
            let flex_fraction = f32::max(
                axis_tracks
                    .iter()
                    .filter(|track| track.is_flexible())
                    .map(|track| {
                        let flex_factor = track.flex_factor();
                        if flex_factor > 1.0 {
                            track.base_size / flex_factor
                        } else {
                            track.base_size
                        }
                    })
                    .fold(0.0, f32::max),
                items
                    .iter()
                    .filter(|item| item.crosses_flexible_track(axis))
                    .map(|item| {
                        let tracks = &axis_tracks[item.track_range_excluding_lines(axis)];
                        let max_content_contribution = item.max_content_contribution(
                            axis,
                            tree,
                            measure,
                            Size::NONE,
                            inner_node_size,
                        );
                        find_size_of_fr(tracks, max_content_contribution)
                    })
                    .fold(0.0, f32::max),
            );

            // Redo against the min/max size if the hypothetical grid size
            // violates either (min size takes precedence)
            let hypothetical_grid_size: f32 = axis_tracks
                .iter()
                .map(|track| {
                    if track.is_flexible() {
                        f32::max(track.base_size, track.flex_factor() * flex_fraction)
                    } else {
                        track.base_size
                    }
                })
                .sum();
            let axis_min_size = axis_min_size.unwrap_or(0.0);
            let axis_max_size = axis_max_size.unwrap_or(f32::INFINITY);
            if hypothetical_grid_size < axis_min_size {
                find_size_of_fr(axis_tracks, axis_min_size)
            } else if hypothetical_grid_size > axis_max_size {
                find_size_of_fr(axis_tracks, axis_max_size)
            } else {
                flex_fraction
            }
        }
    };

    for track in axis_tracks.iter_mut().filter(|track| track.is_flexible()) {
        track.base_size = f32::max(track.base_size, track.flex_factor() * flex_fraction);
    }
}

/// 11.7.1 Find the size of an fr: the largest fr size that does not overflow
/// the space to fill.
fn find_size_of_fr(tracks: &[GridTrack], space_to_fill: f32) -> f32 {
    // No space means no fr size, and skipping this guard would loop forever
    if space_to_fill == 0.0 {
        return 0.0;
    }

    // Tracks whose base size exceeds their share are treated as inflexible
    // and the algorithm restarts; starting from an infinite hypothetical fr
    // size makes the first iteration unconditionally valid
    let mut hypothetical_fr_size = f32::INFINITY;
    let mut previous_iter_hypothetical_fr_size;
    loop {
        let mut used_space = 0.0;
        let mut naive_flex_factor_sum = 0.0;
        for track in tracks.iter() {
            if track.is_flexible() && track.flex_factor() * hypothetical_fr_size >= track.base_size {
                naive_flex_factor_sum += track.flex_factor();
            } else {
                used_space += track.base_size;
            }
        }
        let leftover_space = space_to_fill - used_space;
        let flex_factor = f32::max(naive_flex_factor_sum, 1.0);

        previous_iter_hypothetical_fr_size = hypothetical_fr_size;
        hypothetical_fr_size = leftover_space / flex_factor;

        let hypothetical_fr_size_is_valid = tracks.iter().all(|track| {
            if track.is_flexible() {
                let flex_factor = track.flex_factor();
                flex_factor * hypothetical_fr_size >= track.base_size
                    || flex_factor * previous_iter_hypothetical_fr_size < track.base_size
            } else {
                true
            }
        });
        if hypothetical_fr_size_is_valid {
            break;
        }
    }

    hypothetical_fr_size
}

/// 11.8 Stretch auto tracks: divide remaining definite free space equally
/// among tracks with an auto max sizing function.
fn stretch_auto_tracks(
    axis_tracks: &mut [GridTrack],
    axis_min_size: Option<f32>,
    axis_available_space_for_expansion: AvailableSpace,
) {
    let num_auto_tracks = axis_tracks
        .iter()
        .filter(|track| matches!(track.max_track_sizing_function, MaxTrackSizingFunction::Auto))
        .count();
    if num_auto_tracks > 0 {
        let used_space: f32 = axis_tracks.iter().map(|track| track.base_size).sum();

        // Indefinite free space still stretches up to a definite min size
        let free_space = if axis_available_space_for_expansion.is_definite() {
            axis_available_space_for_expansion.compute_free_space(used_space)
        } else {
            match axis_min_size {
                Some(size) => size - used_space,
                None => 0.0,
            }
        };
        if free_space > 0.0 {
            let extra_space_per_auto_track = free_space / num_auto_tracks as f32;
            axis_tracks
                .iter_mut()
                .filter(|track| matches!(track.max_track_sizing_function, MaxTrackSizingFunction::Auto))
                .for_each(|track| track.base_size += extra_space_per_auto_track);
        }
    }
}

/// Distribute space to tracks evenly (or by a proportion), stopping at each
/// track's limit. Returns the space that could not be distributed.
fn distribute_space_up_to_limits(
    space_to_distribute: f32,
    tracks: &mut [GridTrack],
    track_is_affected: impl Fn(&GridTrack) -> bool,
    track_distribution_proportion: impl Fn(&GridTrack) -> f32,
    track_affected_property: impl Fn(&GridTrack) -> f32,
    track_limit: impl Fn(&GridTrack) -> f32,
) -> f32 {
    // Stop short of exactly zero to avoid infinite loops from rounding
    const THRESHOLD: f32 = 0.01;

    let mut space_to_distribute = space_to_distribute;
    while space_to_distribute > THRESHOLD {
        let track_distribution_proportion_sum: f32 = tracks
            .iter()
            .filter(|track| track_affected_property(track) + track.item_incurred_increase < track_limit(track))
            .filter(|track| track_is_affected(track))
            .map(&track_distribution_proportion)
            .sum();

        if track_distribution_proportion_sum == 0.0 {
            break;
        }

        let min_increase_limit = tracks
            .iter()
            .filter(|track| track_affected_property(track) + track.item_incurred_increase < track_limit(track))
            .filter(|track| track_is_affected(track))
            .map(|track| {
                (track_limit(track) - track_affected_property(track)) / track_distribution_proportion(track)
            })
            .min_by(|a, b| a.total_cmp(b))
            .unwrap_or(f32::INFINITY);
        let iteration_item_incurred_increase =
            f32::min(min_increase_limit, space_to_distribute / track_distribution_proportion_sum);

        for track in tracks.iter_mut().filter(|track| track_is_affected(track)) {
            let increase = iteration_item_incurred_increase * track_distribution_proportion(track);
            if increase > 0.0 && track_affected_property(track) + increase <= track_limit(track) + THRESHOLD {
                track.item_incurred_increase += increase;
                space_to_distribute -= increase;
            }
        }
    }

    space_to_distribute
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::TrackSizingFunction;

    fn fixed_track(size: f32) -> GridTrack {
        let sizing = TrackSizingFunction::length(size);
        let mut track = GridTrack::new(sizing.min, sizing.max);
        track.base_size = size;
        track.growth_limit = size;
        track
    }

    fn fr_track(factor: f32) -> GridTrack {
        let sizing = TrackSizingFunction::fr(factor);
        GridTrack::new(sizing.min, sizing.max)
    }

    #[test]
    fn test_find_size_of_fr_divides_leftover_space() {
        let tracks = vec![fixed_track(100.0), fr_track(1.0), fr_track(1.0)];
        assert_eq!(find_size_of_fr(&tracks, 300.0), 100.0);
    }

    #[test]
    fn test_find_size_of_fr_respects_base_size_floors() {
        // The first fr track's base size exceeds its fair share, so it is
        // treated as inflexible and the remainder goes to the second track
        let mut big = fr_track(1.0);
        big.base_size = 150.0;
        let tracks = vec![big, fr_track(1.0)];
        assert_eq!(find_size_of_fr(&tracks, 200.0), 50.0);
    }

    #[test]
    fn test_find_size_of_fr_zero_space() {
        let tracks = vec![fr_track(1.0)];
        assert_eq!(find_size_of_fr(&tracks, 0.0), 0.0);
    }

    #[test]
    fn test_distribute_space_up_to_limits_stops_at_limits() {
        let mut tracks = vec![fixed_track(10.0), fixed_track(10.0)];
        tracks[0].growth_limit = 15.0;
        tracks[1].growth_limit = 100.0;

        let remaining = distribute_space_up_to_limits(
            30.0,
            &mut tracks,
            |_| true,
            |_| 1.0,
            |track| track.base_size,
            |track| track.growth_limit,
        );

        // First track caps at +5, the rest flows to the second track
        assert!(remaining < 0.01);
        assert!((tracks[0].item_incurred_increase - 5.0).abs() < 0.01);
        assert!((tracks[1].item_incurred_increase - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_gutter_adjustment_only_for_distributed_alignments() {
        let tracks: Vec<GridTrack> = vec![
            GridTrack::gutter(LengthPercentage::ZERO),
            fixed_track(50.0),
            GridTrack::gutter(LengthPercentage::ZERO),
            fixed_track(50.0),
            GridTrack::gutter(LengthPercentage::ZERO),
        ];
        let estimate =
            |track: &GridTrack, basis: Option<f32>| track.max_track_sizing_function.definite_value(basis);

        let adjustment =
            compute_alignment_gutter_adjustment(AlignContent::Start, Some(200.0), estimate, &tracks);
        assert_eq!(adjustment, 0.0);

        // 100 free space, weights: 2 outer * 1 + 1 inner * 1 = 3 shares
        let adjustment =
            compute_alignment_gutter_adjustment(AlignContent::SpaceEvenly, Some(200.0), estimate, &tracks);
        assert!((adjustment - 100.0 / 3.0).abs() < 0.001);
    }
}
