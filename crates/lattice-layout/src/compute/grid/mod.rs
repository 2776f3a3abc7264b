//! CSS Grid layout.
//!
//! Layout proceeds in phases: resolve the explicit grid from the track
//! templates, place items (resolving the implicit grid), size the tracks in
//! each axis, then align tracks and position items into their grid areas.

use lattice_core::{
    AbsoluteAxis, AlignContent, AlignItems, AlignSelf, AvailableSpace, Display, InlinePair, Layout,
    MaybeMath, NodeId, Overflow, Point, Position, Rect, Size, Style,
};

use crate::compute::{compute_child_layout, LayoutInput, LayoutOutput, RunMode, SizingMode};
use crate::measure::Measure;
use crate::tree::LayoutTree;

use alignment::{align_and_position_item, align_tracks};
use explicit::{expand_explicit_tracks, initialize_grid_tracks};
use implicit::compute_grid_size_estimate;
use item::GridItem;
use occupancy::CellOccupancyMatrix;
use placement::place_grid_items;
use track_sizing::{
    determine_if_item_crosses_flexible_or_intrinsic_tracks, resolve_item_track_indexes,
    track_sizing_algorithm,
};
use types::{into_origin_zero_placement_pair, GridTrack, OriginZeroPlacementPair};

mod alignment;
mod explicit;
mod implicit;
mod item;
mod occupancy;
mod placement;
mod track_sizing;
mod types;

/// Lay out a grid container and its children.
pub(crate) fn compute_grid_layout<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let LayoutInput { known_dimensions, parent_size, available_space, run_mode, .. } = inputs;

    let style = tree.node(node).style.clone();

    // 1. Available grid space
    let aspect_ratio = style.aspect_ratio;
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border = padding + border;
    let padding_border_size = padding_border.sum_axes();
    let box_sizing_adjustment = style.box_sizing_adjustment(parent_size.width);

    let min_size = style
        .min_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);
    let max_size = style
        .max_size
        .maybe_resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);
    let preferred_size = if inputs.sizing_mode == SizingMode::InherentSize {
        style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment)
    } else {
        Size::NONE
    };

    // A vertically scrolling node reserves horizontal space for its
    // scrollbar, hence the transpose
    let scrollbar_gutter = style.overflow.transpose().map(|overflow| match overflow {
        Overflow::Scroll => style.scrollbar_width,
        _ => 0.0,
    });
    let mut content_box_inset = padding_border;
    content_box_inset.right += scrollbar_gutter.x;
    content_box_inset.bottom += scrollbar_gutter.y;

    let align_content = style.align_content.unwrap_or(AlignContent::Stretch);
    let justify_content = style.justify_content.unwrap_or(AlignContent::Stretch);
    let align_items = style.align_items;
    let justify_items = style.justify_items;

    let constrained_available_space = Size {
        width: known_dimensions
            .width
            .or(preferred_size.width)
            .map(AvailableSpace::Definite)
            .unwrap_or(available_space.width)
            .maybe_clamp(min_size.width, max_size.width)
            .maybe_max(Some(padding_border_size.width)),
        height: known_dimensions
            .height
            .or(preferred_size.height)
            .map(AvailableSpace::Definite)
            .unwrap_or(available_space.height)
            .maybe_clamp(min_size.height, max_size.height)
            .maybe_max(Some(padding_border_size.height)),
    };

    let available_grid_space = Size {
        width: constrained_available_space
            .width
            .map_definite_value(|space| space - content_box_inset.horizontal_axis_sum()),
        height: constrained_available_space
            .height
            .map_definite_value(|space| space - content_box_inset.vertical_axis_sum()),
    };

    let outer_node_size =
        known_dimensions.or(preferred_size).maybe_clamp(min_size, max_size).maybe_max(padding_border_size);
    let mut inner_node_size = Size {
        width: outer_node_size.width.map(|space| space - content_box_inset.horizontal_axis_sum()),
        height: outer_node_size.height.map(|space| space - content_box_inset.vertical_axis_sum()),
    };

    if let (RunMode::ComputeSize, Some(width), Some(height)) =
        (run_mode, outer_node_size.width, outer_node_size.height)
    {
        return LayoutOutput::from_outer_size(Size { width, height });
    }

    // 2. Resolve the explicit grid

    // Like the inner node size, except that an indefinite inner size falls
    // back to the min and max size styles for auto-repetition fitting
    let auto_fit_container_size = outer_node_size
        .or(max_size)
        .or(min_size)
        .maybe_clamp(min_size, max_size)
        .maybe_max(padding_border_size)
        .maybe_sub(content_box_inset.sum_axes());

    let column_gap = style.gap.width.resolve_or_zero(auto_fit_container_size.width);
    let row_gap = style.gap.height.resolve_or_zero(auto_fit_container_size.height);

    let explicit_col_tracks =
        expand_explicit_tracks(&style.grid_template_columns, auto_fit_container_size.width, column_gap);
    let explicit_row_tracks =
        expand_explicit_tracks(&style.grid_template_rows, auto_fit_container_size.height, row_gap);
    let explicit_col_count = explicit_col_tracks.len() as u16;
    let explicit_row_count = explicit_row_tracks.len() as u16;

    // 3. Estimate the implicit grid, pre-sizing the occupancy matrix
    let child_ids = tree.child_ids(node);
    let (est_col_counts, est_row_counts) = compute_grid_size_estimate(
        explicit_col_count,
        explicit_row_count,
        child_ids.iter().map(|child| {
            let child_style = &tree.node(*child).style;
            (child_style.grid_column, child_style.grid_row)
        }),
    );

    // 4. Place grid items
    let in_flow_children: Vec<(usize, NodeId, Style)> = child_ids
        .iter()
        .enumerate()
        .map(|(index, child)| (index, *child, tree.node(*child).style.clone()))
        .filter(|(_, _, style)| style.display != Display::None && style.position != Position::Absolute)
        .collect();

    let mut items: Vec<GridItem> = Vec::with_capacity(in_flow_children.len());
    let mut cell_occupancy_matrix = CellOccupancyMatrix::with_track_counts(est_col_counts, est_row_counts);
    place_grid_items(
        &mut cell_occupancy_matrix,
        &mut items,
        &in_flow_children,
        style.grid_auto_flow,
        align_items.unwrap_or(AlignItems::Stretch),
    );

    // Auto-placement can grow the implicit grid beyond the estimate
    let final_col_counts = cell_occupancy_matrix.track_counts(AbsoluteAxis::Horizontal);
    let final_row_counts = cell_occupancy_matrix.track_counts(AbsoluteAxis::Vertical);

    // 5. Initialize tracks and gutters
    let mut columns: Vec<GridTrack> = Vec::new();
    let mut rows: Vec<GridTrack> = Vec::new();
    initialize_grid_tracks(
        &mut columns,
        final_col_counts,
        &explicit_col_tracks,
        &style.grid_auto_columns,
        style.gap.width,
        |column_index| cell_occupancy_matrix.column_is_occupied(column_index),
    );
    initialize_grid_tracks(
        &mut rows,
        final_row_counts,
        &explicit_row_tracks,
        &style.grid_auto_rows,
        style.gap.height,
        |row_index| cell_occupancy_matrix.row_is_occupied(row_index),
    );

    // 6. Track sizing
    resolve_item_track_indexes(&mut items, final_col_counts, final_row_counts);
    determine_if_item_crosses_flexible_or_intrinsic_tracks(&mut items, &columns, &rows);
    let has_baseline_aligned_item = items.iter().any(|item| item.align_self == AlignSelf::Baseline);

    track_sizing_algorithm(
        tree,
        measure,
        AbsoluteAxis::Horizontal,
        min_size.width,
        max_size.width,
        justify_content,
        align_content,
        available_grid_space,
        inner_node_size,
        &mut columns,
        &mut rows,
        &mut items,
        |track: &GridTrack, basis| track.max_track_sizing_function.definite_value(basis),
        has_baseline_aligned_item,
    );
    let initial_column_sum = columns.iter().map(|track| track.base_size).sum::<f32>();
    inner_node_size.width = inner_node_size.width.or(Some(initial_column_sum));

    track_sizing_algorithm(
        tree,
        measure,
        AbsoluteAxis::Vertical,
        min_size.height,
        max_size.height,
        align_content,
        justify_content,
        available_grid_space,
        inner_node_size,
        &mut rows,
        &mut columns,
        &mut items,
        |track: &GridTrack, _| Some(track.base_size),
        false,
    );
    let initial_row_sum = rows.iter().map(|track| track.base_size).sum::<f32>();
    inner_node_size.height = inner_node_size.height.or(Some(initial_row_sum));

    // 7. Container size
    let resolved_style_size = known_dimensions.or(preferred_size);
    let container_border_box = Size {
        width: resolved_style_size
            .width
            .unwrap_or(initial_column_sum + content_box_inset.horizontal_axis_sum())
            .maybe_clamp(min_size.width, max_size.width)
            .max(padding_border_size.width),
        height: resolved_style_size
            .height
            .unwrap_or(initial_row_sum + content_box_inset.vertical_axis_sum())
            .maybe_clamp(min_size.height, max_size.height)
            .max(padding_border_size.height),
    };
    let container_content_box = Size {
        width: f32::max(0.0, container_border_box.width - content_box_inset.horizontal_axis_sum()),
        height: f32::max(0.0, container_border_box.height - content_box_inset.vertical_axis_sum()),
    };

    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(container_border_box);
    }

    // 8. Re-resolve percentage track sizes. Against an indefinitely sized
    // container they resolved to zero during initialisation, so they take
    // their share of the content-sized content box here instead
    if !available_grid_space.width.is_definite() {
        for column in columns.iter_mut() {
            let min = column.min_resolved_percentage_size(container_content_box.width);
            let max = column.max_resolved_percentage_size(container_content_box.width);
            column.base_size = column.base_size.maybe_clamp(min, max);
        }
    }
    if !available_grid_space.height.is_definite() {
        for row in rows.iter_mut() {
            let min = row.min_resolved_percentage_size(container_content_box.height);
            let max = row.max_resolved_percentage_size(container_content_box.height);
            row.base_size = row.base_size.maybe_clamp(min, max);
        }
    }

    // Percentage tracks in an initially indefinite axis only receive their
    // final size once the container is content-sized, so that axis is sized
    // a second time
    let rerun_column_sizing =
        !available_space.width.is_definite() && columns.iter().any(|track| track.uses_percentage());
    if rerun_column_sizing {
        track_sizing_algorithm(
            tree,
            measure,
            AbsoluteAxis::Horizontal,
            min_size.width,
            max_size.width,
            justify_content,
            align_content,
            available_grid_space,
            inner_node_size,
            &mut columns,
            &mut rows,
            &mut items,
            |track: &GridTrack, _| Some(track.base_size),
            has_baseline_aligned_item,
        );
    }
    let rerun_row_sizing =
        !available_space.height.is_definite() && rows.iter().any(|track| track.uses_percentage());
    if rerun_row_sizing {
        track_sizing_algorithm(
            tree,
            measure,
            AbsoluteAxis::Vertical,
            min_size.height,
            max_size.height,
            align_content,
            justify_content,
            available_grid_space,
            inner_node_size,
            &mut rows,
            &mut columns,
            &mut items,
            |track: &GridTrack, _| Some(track.base_size),
            false,
        );
    }

    // 9. Track alignment
    align_tracks(
        container_content_box.width,
        InlinePair { start: padding.left, end: padding.right },
        InlinePair { start: border.left, end: border.right },
        &mut columns,
        justify_content,
    );
    align_tracks(
        container_content_box.height,
        InlinePair { start: padding.top, end: padding.bottom },
        InlinePair { start: border.top, end: border.bottom },
        &mut rows,
        align_content,
    );

    // 10. Size, align, and position items
    let mut item_content_size_contribution = Size::<f32>::ZERO;

    // Restore source order so paint order matches the child list
    items.sort_by_key(|item| item.source_order);

    let container_alignment_styles = Point { x: justify_items, y: align_items };

    for (index, item) in items.iter_mut().enumerate() {
        let grid_area = Rect {
            top: rows[item.row_indexes.start as usize + 1].offset,
            bottom: rows[item.row_indexes.end as usize].offset,
            left: columns[item.column_indexes.start as usize + 1].offset,
            right: columns[item.column_indexes.end as usize].offset,
        };
        let (content_size_contribution, y_position, height) = align_and_position_item(
            tree,
            measure,
            item.node,
            index as u32,
            grid_area,
            container_alignment_styles,
            item.baseline_shim,
        );
        item.y_position = y_position;
        item.height = height;
        item_content_size_contribution = item_content_size_contribution.f32_max(content_size_contribution);
    }

    // Hidden and absolutely positioned children
    let mut order = items.len() as u32;
    for child in child_ids.iter().copied() {
        let child_style = tree.node(child).style.clone();

        if child_style.display == Display::None {
            tree.set_unrounded_layout(child, Layout::with_order(order));
            compute_child_layout(tree, measure, child, LayoutInput::HIDDEN);
            order += 1;
            continue;
        }

        if child_style.position == Position::Absolute {
            // Each definite placement line resolves to a track vector index;
            // auto and unresolvable span placements fall back to the
            // container's content box edge. Lines outside the final implicit
            // grid fall back the same way
            let maybe_col_indexes =
                into_origin_zero_placement_pair(child_style.grid_column, final_col_counts.explicit)
                    .resolve_absolutely_positioned_grid_tracks()
                    .map(|maybe_line| {
                        maybe_line
                            .map(|line| line.into_track_vec_index(final_col_counts))
                            .filter(|index| *index < columns.len())
                    });
            let maybe_row_indexes =
                into_origin_zero_placement_pair(child_style.grid_row, final_row_counts.explicit)
                    .resolve_absolutely_positioned_grid_tracks()
                    .map(|maybe_line| {
                        maybe_line
                            .map(|line| line.into_track_vec_index(final_row_counts))
                            .filter(|index| *index < rows.len())
                    });

            let grid_area = Rect {
                top: maybe_row_indexes.start.map(|index| rows[index].offset).unwrap_or(border.top),
                bottom: maybe_row_indexes
                    .end
                    .map(|index| rows[index].offset)
                    .unwrap_or(container_border_box.height - border.bottom - scrollbar_gutter.y),
                left: maybe_col_indexes.start.map(|index| columns[index].offset).unwrap_or(border.left),
                right: maybe_col_indexes
                    .end
                    .map(|index| columns[index].offset)
                    .unwrap_or(container_border_box.width - border.right - scrollbar_gutter.x),
            };

            let (content_size_contribution, _, _) =
                align_and_position_item(tree, measure, child, order, grid_area, container_alignment_styles, 0.0);
            item_content_size_contribution =
                item_content_size_contribution.f32_max(content_size_contribution);

            order += 1;
        }
    }

    if items.is_empty() {
        return LayoutOutput::from_outer_size(container_border_box);
    }

    // The container's first baseline comes from the first row with items:
    // its first baseline-aligned item, or failing that its first item
    let grid_container_baseline: f32 = {
        items.sort_by_key(|item| item.row_indexes.start);
        let first_row = items[0].row_indexes.start;
        let first_row_items =
            items.split(|item: &GridItem| item.row_indexes.start != first_row).next().unwrap_or(&[]);

        let item = first_row_items
            .iter()
            .find(|item| item.align_self == AlignSelf::Baseline)
            .unwrap_or(&first_row_items[0]);
        item.y_position + item.baseline.unwrap_or(item.height)
    };

    LayoutOutput::from_sizes_and_baselines(
        container_border_box,
        item_content_size_contribution,
        Point { x: None, y: Some(grid_container_baseline) },
    )
}

#[cfg(test)]
mod tests {
    use crate::tree::LayoutTree;
    use lattice_core::{
        AlignContent, Dimension, Display, GridAutoFlow, GridPlacement,
        GridTemplateComponent, GridTrackRepetition, InlinePair, LengthPercentage, LengthPercentageAuto,
        Point, Position, Rect, Size, Style, TrackSizingFunction as Tsf,
    };

    fn grid_style() -> Style {
        Style { display: Display::Grid, ..Default::default() }
    }

    #[test]
    fn test_fixed_tracks_place_children_in_cells() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child_a = tree.new_leaf(Style::default()).unwrap();
        let child_b = tree.new_leaf(Style::default()).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    grid_template_columns: vec![Tsf::length(100.0).into(), Tsf::length(100.0).into()],
                    grid_template_rows: vec![Tsf::length(50.0).into()],
                    ..grid_style()
                },
                &[child_a, child_b],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(root).unwrap().size, Size::new(200.0, 50.0));
        assert_eq!(tree.layout(child_a).unwrap().size, Size::new(100.0, 50.0));
        assert_eq!(tree.layout(child_a).unwrap().location, Point { x: 0.0, y: 0.0 });
        assert_eq!(tree.layout(child_b).unwrap().size, Size::new(100.0, 50.0));
        assert_eq!(tree.layout(child_b).unwrap().location, Point { x: 100.0, y: 0.0 });
    }

    #[test]
    fn test_fr_tracks_share_free_space_by_flex_factor() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child_a = tree.new_leaf(Style::default()).unwrap();
        let child_b = tree.new_leaf(Style::default()).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    size: Size::<Dimension>::from_lengths(300.0, 50.0),
                    grid_template_columns: vec![Tsf::fr(1.0).into(), Tsf::fr(2.0).into()],
                    ..grid_style()
                },
                &[child_a, child_b],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child_a).unwrap().size, Size::new(100.0, 50.0));
        assert_eq!(tree.layout(child_b).unwrap().size, Size::new(200.0, 50.0));
        assert_eq!(tree.layout(child_b).unwrap().location.x, 100.0);
    }

    #[test]
    fn test_gap_separates_tracks() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child_a = tree.new_leaf(Style::default()).unwrap();
        let child_b = tree.new_leaf(Style::default()).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    grid_template_columns: vec![Tsf::length(50.0).into(), Tsf::length(50.0).into()],
                    grid_template_rows: vec![Tsf::length(20.0).into()],
                    gap: Size { width: LengthPercentage::length(10.0), height: LengthPercentage::ZERO },
                    ..grid_style()
                },
                &[child_a, child_b],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(root).unwrap().size, Size::new(110.0, 20.0));
        assert_eq!(tree.layout(child_a).unwrap().location.x, 0.0);
        assert_eq!(tree.layout(child_b).unwrap().location.x, 60.0);
    }

    #[test]
    fn test_percent_tracks_resolve_against_container() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child_a = tree.new_leaf(Style::default()).unwrap();
        let child_b = tree.new_leaf(Style::default()).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    size: Size::<Dimension>::from_lengths(200.0, 40.0),
                    grid_template_columns: vec![Tsf::percent(0.25).into(), Tsf::percent(0.75).into()],
                    ..grid_style()
                },
                &[child_a, child_b],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child_a).unwrap().size.width, 50.0);
        assert_eq!(tree.layout(child_b).unwrap().size.width, 150.0);
        assert_eq!(tree.layout(child_b).unwrap().location.x, 50.0);
    }

    #[test]
    fn test_justify_content_centers_tracks() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child_a = tree.new_leaf(Style::default()).unwrap();
        let child_b = tree.new_leaf(Style::default()).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    size: Size::<Dimension>::from_lengths(300.0, 50.0),
                    grid_template_columns: vec![Tsf::length(100.0).into(), Tsf::length(100.0).into()],
                    justify_content: Some(AlignContent::Center),
                    ..grid_style()
                },
                &[child_a, child_b],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child_a).unwrap().location.x, 50.0);
        assert_eq!(tree.layout(child_b).unwrap().location.x, 150.0);
    }

    #[test]
    fn test_span_grows_the_implicit_grid() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(Style {
                grid_column: InlinePair { start: GridPlacement::from_line_index(1), end: GridPlacement::from_span(2) },
                ..Default::default()
            })
            .unwrap();
        let root = tree
            .new_with_children(
                Style {
                    grid_template_columns: vec![Tsf::length(40.0).into()],
                    grid_template_rows: vec![Tsf::length(20.0).into()],
                    grid_auto_columns: vec![Tsf::length(40.0)],
                    ..grid_style()
                },
                &[child],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        // The span-2 item forces one implicit column sized by grid_auto_columns
        assert_eq!(tree.layout(root).unwrap().size, Size::new(80.0, 20.0));
        assert_eq!(tree.layout(child).unwrap().size, Size::new(80.0, 20.0));
    }

    #[test]
    fn test_column_flow_fills_rows_first() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let item = Style {
            size: Size { width: Dimension::Length(20.0), height: Dimension::Auto },
            ..Default::default()
        };
        let child_a = tree.new_leaf(item.clone()).unwrap();
        let child_b = tree.new_leaf(item.clone()).unwrap();
        let child_c = tree.new_leaf(item).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    grid_template_rows: vec![Tsf::length(10.0).into(), Tsf::length(10.0).into()],
                    grid_auto_flow: GridAutoFlow::Column,
                    ..grid_style()
                },
                &[child_a, child_b, child_c],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child_a).unwrap().location, Point { x: 0.0, y: 0.0 });
        assert_eq!(tree.layout(child_b).unwrap().location, Point { x: 0.0, y: 10.0 });
        assert_eq!(tree.layout(child_c).unwrap().location, Point { x: 20.0, y: 0.0 });
        assert_eq!(tree.layout(root).unwrap().size, Size::new(40.0, 20.0));
    }

    #[test]
    fn test_auto_fit_collapses_empty_repetitions() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree.new_leaf(Style::default()).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    size: Size::<Dimension>::from_lengths(120.0, 20.0),
                    grid_template_columns: vec![GridTemplateComponent::Repeat(
                        GridTrackRepetition::AutoFit,
                        vec![Tsf::length(40.0)],
                    )],
                    ..grid_style()
                },
                &[child],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        // Three repetitions fit, two collapse, leaving the child in a single
        // forty-pixel track
        assert_eq!(tree.layout(child).unwrap().size.width, 40.0);
        assert_eq!(tree.layout(child).unwrap().location.x, 0.0);
    }

    #[test]
    fn test_absolute_child_sizes_from_insets() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(Style {
                position: Position::Absolute,
                inset: Rect {
                    left: LengthPercentageAuto::length(10.0),
                    right: LengthPercentageAuto::length(10.0),
                    top: LengthPercentageAuto::length(5.0),
                    bottom: LengthPercentageAuto::length(5.0),
                },
                ..Default::default()
            })
            .unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(200.0, 100.0), ..grid_style() }, &[child])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child).unwrap().size, Size::new(180.0, 90.0));
        assert_eq!(tree.layout(child).unwrap().location, Point { x: 10.0, y: 5.0 });
    }

    #[test]
    fn test_fixed_placement_overrides_flow() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(Style {
                grid_column: InlinePair { start: GridPlacement::from_line_index(2), end: GridPlacement::Auto },
                grid_row: InlinePair { start: GridPlacement::from_line_index(1), end: GridPlacement::Auto },
                ..Default::default()
            })
            .unwrap();
        let root = tree
            .new_with_children(
                Style {
                    grid_template_columns: vec![Tsf::length(30.0).into(), Tsf::length(30.0).into()],
                    grid_template_rows: vec![Tsf::length(10.0).into()],
                    ..grid_style()
                },
                &[child],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child).unwrap().location, Point { x: 30.0, y: 0.0 });
        assert_eq!(tree.layout(child).unwrap().size, Size::new(30.0, 10.0));
    }
}
