//! Alignment of tracks and final positioning of items.

use lattice_core::{
    AlignContent, AlignItems, AvailableSpace, InlinePair, Layout, MaybeMath, NodeId, Overflow,
    Point, Position, Rect, Size,
};

use crate::compute::common::alignment::{apply_alignment_fallback, compute_alignment_offset};
use crate::compute::grid::types::GridTrack;
use crate::compute::{compute_content_size_contribution, perform_child_layout, SizingMode};
use crate::measure::Measure;
use crate::tree::LayoutTree;

/// Align the tracks of one axis within the container according to
/// `align-content` (rows) or `justify-content` (columns), assigning each
/// track its final offset.
pub(super) fn align_tracks(
    grid_container_content_box_size: f32,
    padding: InlinePair<f32>,
    border: InlinePair<f32>,
    tracks: &mut [GridTrack],
    track_alignment_style: AlignContent,
) {
    let used_size: f32 = tracks.iter().map(|track| track.base_size).sum();
    let size_diff = grid_container_content_box_size - used_size;
    let free_space = f32::max(size_diff, 0.0);
    let overflow = f32::min(size_diff, 0.0);

    // When the tracks overflow the container, the alignment style decides
    // which side they overflow past
    let origin = padding.start
        + border.start
        + match track_alignment_style {
            AlignContent::End | AlignContent::FlexEnd => overflow,
            AlignContent::Center => overflow / 2.0,
            _ => 0.0,
        };

    // Number of non-collapsed tracks, not counting gutters
    let num_tracks = tracks.iter().skip(1).step_by(2).filter(|track| !track.is_collapsed).count();

    // Gaps are already modelled as gutter tracks, and grid axes are never
    // reversed
    let gap = 0.0;
    let layout_is_reversed = false;
    let track_alignment = apply_alignment_fallback(free_space, num_tracks, track_alignment_style, false);

    let mut total_offset = origin;
    for (i, track) in tracks.iter_mut().enumerate() {
        // Even indexes are gutters
        let is_gutter = i % 2 == 0;

        // The first non-gutter track is index 1
        let is_first = i == 1;

        let offset = if is_gutter {
            0.0
        } else {
            compute_alignment_offset(free_space, num_tracks, gap, track_alignment, layout_is_reversed, is_first)
        };

        track.offset = total_offset + offset;
        total_offset = total_offset + offset + track.base_size;
    }
}

/// Size and align one item into its grid area, write its final layout, and
/// return its content size contribution plus the vertical position and
/// height needed for the container baseline.
pub(super) fn align_and_position_item<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    order: u32,
    grid_area: Rect<f32>,
    container_alignment_styles: Point<Option<AlignItems>>,
    baseline_shim: f32,
) -> (Size<f32>, f32, f32) {
    let grid_area_size =
        Size { width: grid_area.right - grid_area.left, height: grid_area.bottom - grid_area.top };

    let style = tree.node(node).style.clone();
    let aspect_ratio = style.aspect_ratio;
    let justify_self = style.justify_self;
    let align_self = style.align_self;
    let overflow = style.overflow;
    let scrollbar_width = style.scrollbar_width;

    let position = style.position;
    let inset = style.inset.resolve_insets(grid_area_size.map(Some));
    let inset_horizontal = InlinePair { start: inset.left, end: inset.right };
    let inset_vertical = InlinePair { start: inset.top, end: inset.bottom };

    let padding = style.padding.resolve_or_zero(Some(grid_area_size.width));
    let border = style.border.resolve_or_zero(Some(grid_area_size.width));
    let box_sizing_adjustment = style.box_sizing_adjustment(Some(grid_area_size.width));

    let inherent_size = style
        .size
        .maybe_resolve(grid_area_size.map(Some))
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);
    let min_size = style
        .min_size
        .maybe_resolve(grid_area_size.map(Some))
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);
    let max_size = style
        .max_size
        .maybe_resolve(grid_area_size.map(Some))
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);

    // Default alignment when neither the parent nor the item sets one: items
    // with an inherent size (or one implied by an aspect ratio in the block
    // axis) start-align, everything else stretches
    let alignment_styles = Point {
        x: justify_self.or(container_alignment_styles.x).unwrap_or(if inherent_size.width.is_some() {
            AlignItems::Start
        } else {
            AlignItems::Stretch
        }),
        y: align_self.or(container_alignment_styles.y).unwrap_or(
            if inherent_size.height.is_some() || aspect_ratio.is_some() {
                AlignItems::Start
            } else {
                AlignItems::Stretch
            },
        ),
    };

    // Both horizontal and vertical margins resolve against the width of the
    // grid area
    let margin = style.margin.map(|margin| margin.resolve(Some(grid_area_size.width)));

    let grid_area_minus_item_margins_size = Size {
        width: grid_area_size.width.maybe_sub(margin.left).maybe_sub(margin.right),
        height: grid_area_size.height.maybe_sub(margin.top).maybe_sub(margin.bottom) - baseline_shim,
    };

    // An absolutely positioned item with both insets set in an axis derives
    // its size in that axis from them; otherwise stretch alignment fills the
    // grid area provided neither margin in the axis is auto
    let width = inherent_size.width.or_else(|| {
        if position == Position::Absolute {
            if let (Some(left), Some(right)) = (inset_horizontal.start, inset_horizontal.end) {
                return Some(f32::max(grid_area_minus_item_margins_size.width - left - right, 0.0));
            }
        }

        if margin.left.is_some()
            && margin.right.is_some()
            && alignment_styles.x == AlignItems::Stretch
            && position != Position::Absolute
        {
            return Some(grid_area_minus_item_margins_size.width);
        }

        None
    });
    // Reapply the aspect ratio after stretch and absolute position width
    // adjustments
    let Size { width, height } =
        Size { width, height: inherent_size.height }.maybe_apply_aspect_ratio(aspect_ratio);

    let height = height.or_else(|| {
        if position == Position::Absolute {
            if let (Some(top), Some(bottom)) = (inset_vertical.start, inset_vertical.end) {
                return Some(f32::max(grid_area_minus_item_margins_size.height - top - bottom, 0.0));
            }
        }

        if margin.top.is_some()
            && margin.bottom.is_some()
            && alignment_styles.y == AlignItems::Stretch
            && position != Position::Absolute
        {
            return Some(grid_area_minus_item_margins_size.height);
        }

        None
    });
    // Reapply the aspect ratio again after height adjustments
    let Size { width, height } = Size { width, height }.maybe_apply_aspect_ratio(aspect_ratio);

    let Size { width, height } = Size { width, height }.maybe_clamp(min_size, max_size);

    let layout_output = perform_child_layout(
        tree,
        measure,
        node,
        Size { width, height },
        grid_area_size.map(Some),
        grid_area_minus_item_margins_size.map(AvailableSpace::Definite),
        SizingMode::InherentSize,
    );

    // Resolve the final size
    let Size { width, height } =
        Size { width, height }.unwrap_or(layout_output.size).maybe_clamp(min_size, max_size);

    let (x, x_margin) = align_item_within_area(
        InlinePair { start: grid_area.left, end: grid_area.right },
        alignment_styles.x,
        width,
        position,
        inset_horizontal,
        InlinePair { start: margin.left, end: margin.right },
        0.0,
    );
    let (y, y_margin) = align_item_within_area(
        InlinePair { start: grid_area.top, end: grid_area.bottom },
        alignment_styles.y,
        height,
        position,
        inset_vertical,
        InlinePair { start: margin.top, end: margin.bottom },
        baseline_shim,
    );

    let scrollbar_size = Size {
        width: if overflow.y == Overflow::Scroll { scrollbar_width } else { 0.0 },
        height: if overflow.x == Overflow::Scroll { scrollbar_width } else { 0.0 },
    };

    let size = Size { width, height };
    let location = Point { x, y };
    tree.set_unrounded_layout(
        node,
        Layout {
            order,
            size,
            content_size: layout_output.content_size,
            scrollbar_size,
            location,
            padding,
            border,
            margin: Rect {
                left: x_margin.start,
                right: x_margin.end,
                top: y_margin.start,
                bottom: y_margin.end,
            },
        },
    );

    let contribution =
        compute_content_size_contribution(location, size, layout_output.content_size, overflow);
    (contribution, y, height)
}

/// Align one item along a single axis within its grid area. Returns the
/// item's absolute position in the axis and its resolved margins, with auto
/// margins expanded to absorb the free space.
fn align_item_within_area(
    grid_area: InlinePair<f32>,
    alignment_style: AlignItems,
    resolved_size: f32,
    position: Position,
    inset: InlinePair<Option<f32>>,
    margin: InlinePair<Option<f32>>,
    baseline_shim: f32,
) -> (f32, InlinePair<f32>) {
    let non_auto_margin = InlinePair {
        start: margin.start.unwrap_or(0.0) + baseline_shim,
        end: margin.end.unwrap_or(0.0),
    };
    let grid_area_size = f32::max(grid_area.end - grid_area.start, 0.0);
    let free_space =
        f32::max(grid_area_size - resolved_size - non_auto_margin.start - non_auto_margin.end, 0.0);

    // Auto margins split the free space between them
    let auto_margin_count = margin.start.is_none() as u8 + margin.end.is_none() as u8;
    let auto_margin_size = if auto_margin_count > 0 { free_space / auto_margin_count as f32 } else { 0.0 };
    let resolved_margin = InlinePair {
        start: margin.start.unwrap_or(auto_margin_size) + baseline_shim,
        end: margin.end.unwrap_or(auto_margin_size),
    };

    let alignment_based_offset = match alignment_style {
        AlignItems::Start | AlignItems::FlexStart => resolved_margin.start,
        AlignItems::End | AlignItems::FlexEnd => grid_area_size - resolved_size - resolved_margin.end,
        AlignItems::Center => {
            (grid_area_size - resolved_size + resolved_margin.start - resolved_margin.end) / 2.0
        }
        // Baseline alignment acts on the item's baseline shim, which is
        // already folded into the start margin
        AlignItems::Baseline => resolved_margin.start,
        AlignItems::Stretch => resolved_margin.start,
    };

    let offset_within_area = if position == Position::Absolute {
        if let Some(start) = inset.start {
            start + non_auto_margin.start
        } else if let Some(end) = inset.end {
            grid_area_size - end - resolved_size - non_auto_margin.end
        } else {
            alignment_based_offset
        }
    } else {
        alignment_based_offset
    };

    let mut start = grid_area.start + offset_within_area;
    if position == Position::Relative {
        start += inset.start.or(inset.end.map(|pos| -pos)).unwrap_or(0.0);
    }

    (start, resolved_margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::{LengthPercentage, TrackSizingFunction};

    fn sized_track(size: f32) -> GridTrack {
        let sizing = TrackSizingFunction::length(size);
        let mut track = GridTrack::new(sizing.min, sizing.max);
        track.base_size = size;
        track
    }

    fn track_vector(sizes: &[f32]) -> Vec<GridTrack> {
        let mut tracks = vec![GridTrack::gutter(LengthPercentage::ZERO)];
        for size in sizes {
            tracks.push(sized_track(*size));
            tracks.push(GridTrack::gutter(LengthPercentage::ZERO));
        }
        tracks
    }

    #[test]
    fn test_align_tracks_start() {
        let mut tracks = track_vector(&[100.0, 100.0]);
        align_tracks(
            300.0,
            InlinePair { start: 5.0, end: 0.0 },
            InlinePair { start: 2.0, end: 0.0 },
            &mut tracks,
            AlignContent::Start,
        );
        assert_eq!(tracks[1].offset, 7.0);
        assert_eq!(tracks[3].offset, 107.0);
    }

    #[test]
    fn test_align_tracks_center() {
        let mut tracks = track_vector(&[100.0, 100.0]);
        align_tracks(
            300.0,
            InlinePair { start: 0.0, end: 0.0 },
            InlinePair { start: 0.0, end: 0.0 },
            &mut tracks,
            AlignContent::Center,
        );
        assert_eq!(tracks[1].offset, 50.0);
        assert_eq!(tracks[3].offset, 150.0);
    }

    #[test]
    fn test_align_tracks_space_between() {
        let mut tracks = track_vector(&[100.0, 100.0]);
        align_tracks(
            300.0,
            InlinePair { start: 0.0, end: 0.0 },
            InlinePair { start: 0.0, end: 0.0 },
            &mut tracks,
            AlignContent::SpaceBetween,
        );
        assert_eq!(tracks[1].offset, 0.0);
        assert_eq!(tracks[3].offset, 200.0);
    }

    #[test]
    fn test_align_tracks_overflow_end() {
        // Content larger than the container overflows toward the start when
        // end-aligned
        let mut tracks = track_vector(&[200.0, 200.0]);
        align_tracks(
            300.0,
            InlinePair { start: 0.0, end: 0.0 },
            InlinePair { start: 0.0, end: 0.0 },
            &mut tracks,
            AlignContent::End,
        );
        assert_eq!(tracks[1].offset, -100.0);
        assert_eq!(tracks[3].offset, 100.0);
    }

    #[test]
    fn test_align_item_within_area_center() {
        let (position, margin) = align_item_within_area(
            InlinePair { start: 0.0, end: 100.0 },
            AlignItems::Center,
            40.0,
            Position::Relative,
            InlinePair { start: None, end: None },
            InlinePair { start: Some(0.0), end: Some(0.0) },
            0.0,
        );
        assert_eq!(position, 30.0);
        assert_eq!(margin, InlinePair { start: 0.0, end: 0.0 });
    }

    #[test]
    fn test_align_item_auto_margins_absorb_free_space() {
        let (position, margin) = align_item_within_area(
            InlinePair { start: 0.0, end: 100.0 },
            AlignItems::Start,
            40.0,
            Position::Relative,
            InlinePair { start: None, end: None },
            InlinePair { start: None, end: None },
            0.0,
        );
        assert_eq!(margin, InlinePair { start: 30.0, end: 30.0 });
        assert_eq!(position, 30.0);
    }

    #[test]
    fn test_align_item_absolute_inset_end() {
        let (position, _) = align_item_within_area(
            InlinePair { start: 0.0, end: 100.0 },
            AlignItems::Start,
            40.0,
            Position::Absolute,
            InlinePair { start: None, end: Some(10.0) },
            InlinePair { start: Some(0.0), end: Some(0.0) },
            0.0,
        );
        assert_eq!(position, 50.0);
    }
}
