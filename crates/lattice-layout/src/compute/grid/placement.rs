//! Placement of grid items into definite tracks, growing the implicit grid
//! as needed.
//!
//! Items are placed in three passes: fully definite items first, then items
//! definite only in the cross ("secondary") axis of the flow, then the rest
//! via the auto-placement cursor. Sparse flow never moves the cursor
//! backwards; dense flow restarts the scan from the grid origin per item.

use lattice_core::{AbsoluteAxis, AlignItems, GridAutoFlow, InlinePair, NodeId, Point, Style};

use crate::compute::grid::item::GridItem;
use crate::compute::grid::occupancy::{CellOccupancyMatrix, CellOccupancyState};
use crate::compute::grid::types::{
    into_origin_zero_placement_pair, OriginZeroLine, OriginZeroPlacement, OriginZeroPlacementPair,
};

/// Place all in-flow children of a grid container.
///
/// `children` carries each child's position in the parent's child list
/// (used as the paint source order) alongside its style.
pub(super) fn place_grid_items(
    cell_occupancy_matrix: &mut CellOccupancyMatrix,
    items: &mut Vec<GridItem>,
    children: &[(usize, NodeId, Style)],
    grid_auto_flow: GridAutoFlow,
    align_items: AlignItems,
) {
    let primary_axis = grid_auto_flow.primary_axis();
    let secondary_axis = primary_axis.other();

    let explicit_col_count = cell_occupancy_matrix.track_counts(AbsoluteAxis::Horizontal).explicit;
    let explicit_row_count = cell_occupancy_matrix.track_counts(AbsoluteAxis::Vertical).explicit;
    let origin_zero_placement = |style: &Style| -> Point<InlinePair<OriginZeroPlacement>> {
        Point {
            x: into_origin_zero_placement_pair(style.grid_column, explicit_col_count),
            y: into_origin_zero_placement_pair(style.grid_row, explicit_row_count),
        }
    };

    // 1. Items with definite positions in both axes
    for (index, node, style) in children {
        let placement = origin_zero_placement(style);
        if !(placement.get_abs(primary_axis).is_definite()
            && placement.get_abs(secondary_axis).is_definite())
        {
            continue;
        }

        let primary_span = placement.get_abs(primary_axis).resolve_definite_grid_lines();
        let secondary_span = placement.get_abs(secondary_axis).resolve_definite_grid_lines();
        record_grid_placement(
            cell_occupancy_matrix,
            items,
            *node,
            *index,
            style,
            align_items,
            primary_axis,
            primary_span,
            secondary_span,
            CellOccupancyState::DefinitelyPlaced,
        );
    }

    // 2. Items with a definite position only in the secondary axis
    for (index, node, style) in children {
        let placement = origin_zero_placement(style);
        if !placement.get_abs(secondary_axis).is_definite()
            || placement.get_abs(primary_axis).is_definite()
        {
            continue;
        }

        let (primary_span, secondary_span) =
            place_definite_secondary_axis_item(cell_occupancy_matrix, placement, grid_auto_flow);
        record_grid_placement(
            cell_occupancy_matrix,
            items,
            *node,
            *index,
            style,
            align_items,
            primary_axis,
            primary_span,
            secondary_span,
            CellOccupancyState::AutoPlaced,
        );
    }

    // 3. Items with no definite secondary axis position, placed by scanning
    // from the auto-placement cursor
    let primary_neg_tracks = cell_occupancy_matrix.track_counts(primary_axis).negative_implicit as i16;
    let secondary_neg_tracks =
        cell_occupancy_matrix.track_counts(secondary_axis).negative_implicit as i16;
    let grid_start_position =
        (OriginZeroLine(-primary_neg_tracks), OriginZeroLine(-secondary_neg_tracks));
    let mut grid_position = grid_start_position;

    for (index, node, style) in children {
        let placement = origin_zero_placement(style);
        if placement.get_abs(secondary_axis).is_definite() {
            continue;
        }

        let (primary_span, secondary_span) = place_indefinitely_positioned_item(
            cell_occupancy_matrix,
            placement,
            grid_auto_flow,
            grid_position,
        );
        record_grid_placement(
            cell_occupancy_matrix,
            items,
            *node,
            *index,
            style,
            align_items,
            primary_axis,
            primary_span,
            secondary_span,
            CellOccupancyState::AutoPlaced,
        );

        grid_position = match grid_auto_flow.is_dense() {
            true => grid_start_position,
            false => (primary_span.end, secondary_span.start),
        };
    }
}

/// Scan along the primary axis for the first free area matching an item
/// whose secondary axis position is already definite.
fn place_definite_secondary_axis_item(
    cell_occupancy_matrix: &CellOccupancyMatrix,
    placement: Point<InlinePair<OriginZeroPlacement>>,
    auto_flow: GridAutoFlow,
) -> (InlinePair<OriginZeroLine>, InlinePair<OriginZeroLine>) {
    let primary_axis = auto_flow.primary_axis();
    let secondary_axis = primary_axis.other();

    let secondary_axis_placement = placement.get_abs(secondary_axis).resolve_definite_grid_lines();
    let primary_axis_grid_start_line =
        cell_occupancy_matrix.track_counts(primary_axis).implicit_start_line();
    let starting_position = match auto_flow.is_dense() {
        true => primary_axis_grid_start_line,
        false => cell_occupancy_matrix
            .last_of_type(primary_axis, secondary_axis_placement.start, CellOccupancyState::AutoPlaced)
            .unwrap_or(primary_axis_grid_start_line),
    };

    let mut position = starting_position;
    loop {
        let primary_axis_placement =
            placement.get_abs(primary_axis).resolve_indefinite_grid_tracks(position);

        let does_fit = cell_occupancy_matrix.line_area_is_unoccupied(
            primary_axis,
            primary_axis_placement,
            secondary_axis_placement,
        );
        if does_fit {
            return (primary_axis_placement, secondary_axis_placement);
        }
        position += 1;
    }
}

/// Place an item with no definite secondary axis position, starting from the
/// auto-placement cursor.
fn place_indefinitely_positioned_item(
    cell_occupancy_matrix: &CellOccupancyMatrix,
    placement: Point<InlinePair<OriginZeroPlacement>>,
    auto_flow: GridAutoFlow,
    grid_position: (OriginZeroLine, OriginZeroLine),
) -> (InlinePair<OriginZeroLine>, InlinePair<OriginZeroLine>) {
    let primary_axis = auto_flow.primary_axis();

    let primary_placement_style = placement.get_abs(primary_axis);
    let secondary_placement_style = placement.get_abs(primary_axis.other());

    let primary_span = primary_placement_style.indefinite_span();
    let secondary_span = secondary_placement_style.indefinite_span();
    let has_definite_primary_axis_position = primary_placement_style.is_definite();
    let primary_axis_grid_start_line =
        cell_occupancy_matrix.track_counts(primary_axis).implicit_start_line();
    let primary_axis_grid_end_line =
        cell_occupancy_matrix.track_counts(primary_axis).implicit_end_line();
    let secondary_axis_grid_start_line =
        cell_occupancy_matrix.track_counts(primary_axis.other()).implicit_start_line();

    let line_area_is_occupied = |primary_span, secondary_span| {
        !cell_occupancy_matrix.line_area_is_unoccupied(primary_axis, primary_span, secondary_span)
    };

    let (mut primary_idx, mut secondary_idx) = grid_position;

    if has_definite_primary_axis_position {
        let definite_primary_placement = primary_placement_style.resolve_definite_grid_lines();
        let defined_primary_idx = definite_primary_placement.start;

        // The scan can only move forwards: if the definite position is
        // behind the cursor, wrap to the next secondary track
        if defined_primary_idx < primary_idx && secondary_idx != secondary_axis_grid_start_line {
            secondary_idx = secondary_axis_grid_start_line;
            primary_idx = defined_primary_idx + 1;
        } else {
            primary_idx = defined_primary_idx;
        }

        // Fixed primary position: scan the secondary axis for a free area
        loop {
            let primary_span = InlinePair { start: primary_idx, end: primary_idx + primary_span };
            let secondary_span =
                InlinePair { start: secondary_idx, end: secondary_idx + secondary_span };

            if line_area_is_occupied(primary_span, secondary_span) {
                secondary_idx += 1;
                continue;
            }

            return (primary_span, secondary_span);
        }
    } else {
        // No fixed position in either axis: scan along the primary axis,
        // wrapping to the next secondary track at the end of the grid
        loop {
            let primary_span = InlinePair { start: primary_idx, end: primary_idx + primary_span };
            let secondary_span =
                InlinePair { start: secondary_idx, end: secondary_idx + secondary_span };

            let primary_out_of_bounds = primary_span.end > primary_axis_grid_end_line;
            if primary_out_of_bounds {
                secondary_idx += 1;
                primary_idx = primary_axis_grid_start_line;
                continue;
            }

            if line_area_is_occupied(primary_span, secondary_span) {
                primary_idx += 1;
                continue;
            }

            return (primary_span, secondary_span);
        }
    }
}

/// Mark the placed area as occupied and record the item.
#[allow(clippy::too_many_arguments)]
fn record_grid_placement(
    cell_occupancy_matrix: &mut CellOccupancyMatrix,
    items: &mut Vec<GridItem>,
    node: NodeId,
    index: usize,
    style: &Style,
    align_items: AlignItems,
    primary_axis: AbsoluteAxis,
    primary_span: InlinePair<OriginZeroLine>,
    secondary_span: InlinePair<OriginZeroLine>,
    placement_type: CellOccupancyState,
) {
    cell_occupancy_matrix.mark_area_as(primary_axis, primary_span, secondary_span, placement_type);

    let (col_span, row_span) = match primary_axis {
        AbsoluteAxis::Horizontal => (primary_span, secondary_span),
        AbsoluteAxis::Vertical => (secondary_span, primary_span),
    };
    items.push(GridItem::new_with_placement_style_and_order(
        node,
        col_span,
        row_span,
        style,
        align_items,
        index as u16,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::implicit::compute_grid_size_estimate;
    use crate::compute::grid::types::TrackCounts;
    use lattice_core::GridPlacement;

    /// (col_start, col_end, row_start, row_end) in origin-zero coordinates
    type ExpectedPlacement = (i16, i16, i16, i16);

    fn auto() -> GridPlacement {
        GridPlacement::Auto
    }

    fn style_with_placement(
        col_start: GridPlacement,
        col_end: GridPlacement,
        row_start: GridPlacement,
        row_end: GridPlacement,
    ) -> Style {
        Style {
            grid_column: InlinePair { start: col_start, end: col_end },
            grid_row: InlinePair { start: row_start, end: row_end },
            ..Style::default()
        }
    }

    /// Children are listed in tree order; the first tuple element gives the
    /// expected position of the item in the output list.
    fn placement_test_runner(
        explicit_col_count: u16,
        explicit_row_count: u16,
        children: Vec<(usize, Style, ExpectedPlacement)>,
        expected_col_counts: TrackCounts,
        expected_row_counts: TrackCounts,
        flow: GridAutoFlow,
    ) {
        let children_data: Vec<(usize, NodeId, Style)> = children
            .iter()
            .enumerate()
            .map(|(tree_index, (output_order, style, _))| {
                (tree_index, NodeId::new(*output_order as u64), style.clone())
            })
            .collect();

        let estimated_sizes = compute_grid_size_estimate(
            explicit_col_count,
            explicit_row_count,
            children.iter().map(|(_, style, _)| (style.grid_column, style.grid_row)),
        );

        let mut items: Vec<GridItem> = Vec::new();
        let mut cell_occupancy_matrix =
            CellOccupancyMatrix::with_track_counts(estimated_sizes.0, estimated_sizes.1);

        place_grid_items(&mut cell_occupancy_matrix, &mut items, &children_data, flow, AlignItems::Start);

        let mut sorted_children = children.clone();
        sorted_children.sort_by_key(|child| child.0);
        for ((output_order, _, expected_placement), item) in sorted_children.iter().zip(items.iter()) {
            assert_eq!(item.node, NodeId::new(*output_order as u64));
            let actual_placement =
                (item.column.start.0, item.column.end.0, item.row.start.0, item.row.end.0);
            assert_eq!(actual_placement, *expected_placement, "item {output_order}");
        }

        let actual_col_counts = cell_occupancy_matrix.track_counts(AbsoluteAxis::Horizontal);
        assert_eq!(actual_col_counts, expected_col_counts, "column track counts");
        let actual_row_counts = cell_occupancy_matrix.track_counts(AbsoluteAxis::Vertical);
        assert_eq!(actual_row_counts, expected_row_counts, "row track counts");
    }

    #[test]
    fn test_only_fixed_placement() {
        placement_test_runner(
            2,
            2,
            vec![
                (1, style_with_placement(GridPlacement::from_line_index(1), auto(), GridPlacement::from_line_index(1), auto()), (0, 1, 0, 1)),
                (2, style_with_placement(GridPlacement::from_line_index(-4), auto(), GridPlacement::from_line_index(-3), auto()), (-1, 0, 0, 1)),
                (3, style_with_placement(GridPlacement::from_line_index(-3), auto(), GridPlacement::from_line_index(-4), auto()), (0, 1, -1, 0)),
                (4, style_with_placement(GridPlacement::from_line_index(3), GridPlacement::from_span(2), GridPlacement::from_line_index(5), auto()), (2, 4, 4, 5)),
            ],
            TrackCounts::from_raw(1, 2, 2),
            TrackCounts::from_raw(1, 2, 3),
            GridAutoFlow::Row,
        );
    }

    #[test]
    fn test_placement_spanning_origin() {
        placement_test_runner(
            2,
            2,
            vec![
                (1, style_with_placement(GridPlacement::from_line_index(-1), GridPlacement::from_line_index(-1), GridPlacement::from_line_index(-1), GridPlacement::from_line_index(-1)), (2, 3, 2, 3)),
                (2, style_with_placement(GridPlacement::from_line_index(-1), GridPlacement::from_span(2), GridPlacement::from_line_index(-1), GridPlacement::from_span(2)), (2, 4, 2, 4)),
                (3, style_with_placement(GridPlacement::from_line_index(-4), GridPlacement::from_line_index(-4), GridPlacement::from_line_index(-4), GridPlacement::from_line_index(-4)), (-1, 0, -1, 0)),
                (4, style_with_placement(GridPlacement::from_line_index(-4), GridPlacement::from_span(2), GridPlacement::from_line_index(-4), GridPlacement::from_span(2)), (-1, 1, -1, 1)),
            ],
            TrackCounts::from_raw(1, 2, 2),
            TrackCounts::from_raw(1, 2, 2),
            GridAutoFlow::Row,
        );
    }

    #[test]
    fn test_only_auto_placement_row_flow() {
        let auto_child = || style_with_placement(auto(), auto(), auto(), auto());
        placement_test_runner(
            2,
            2,
            vec![
                (1, auto_child(), (0, 1, 0, 1)),
                (2, auto_child(), (1, 2, 0, 1)),
                (3, auto_child(), (0, 1, 1, 2)),
                (4, auto_child(), (1, 2, 1, 2)),
                (5, auto_child(), (0, 1, 2, 3)),
                (6, auto_child(), (1, 2, 2, 3)),
                (7, auto_child(), (0, 1, 3, 4)),
                (8, auto_child(), (1, 2, 3, 4)),
            ],
            TrackCounts::from_raw(0, 2, 0),
            TrackCounts::from_raw(0, 2, 2),
            GridAutoFlow::Row,
        );
    }

    #[test]
    fn test_only_auto_placement_column_flow() {
        let auto_child = || style_with_placement(auto(), auto(), auto(), auto());
        placement_test_runner(
            2,
            2,
            vec![
                (1, auto_child(), (0, 1, 0, 1)),
                (2, auto_child(), (0, 1, 1, 2)),
                (3, auto_child(), (1, 2, 0, 1)),
                (4, auto_child(), (1, 2, 1, 2)),
                (5, auto_child(), (2, 3, 0, 1)),
                (6, auto_child(), (2, 3, 1, 2)),
                (7, auto_child(), (3, 4, 0, 1)),
                (8, auto_child(), (3, 4, 1, 2)),
            ],
            TrackCounts::from_raw(0, 2, 2),
            TrackCounts::from_raw(0, 2, 0),
            GridAutoFlow::Column,
        );
    }

    #[test]
    fn test_oversized_item() {
        placement_test_runner(
            2,
            2,
            vec![(1, style_with_placement(GridPlacement::from_span(5), auto(), auto(), auto()), (0, 5, 0, 1))],
            TrackCounts::from_raw(0, 2, 3),
            TrackCounts::from_raw(0, 2, 0),
            GridAutoFlow::Row,
        );
    }

    #[test]
    fn test_fixed_in_secondary_axis() {
        placement_test_runner(
            2,
            2,
            vec![
                (1, style_with_placement(GridPlacement::from_span(2), auto(), GridPlacement::from_line_index(1), auto()), (0, 2, 0, 1)),
                (2, style_with_placement(auto(), auto(), GridPlacement::from_line_index(2), auto()), (0, 1, 1, 2)),
                (3, style_with_placement(auto(), auto(), GridPlacement::from_line_index(1), auto()), (2, 3, 0, 1)),
                (4, style_with_placement(auto(), auto(), GridPlacement::from_line_index(4), auto()), (0, 1, 3, 4)),
            ],
            TrackCounts::from_raw(0, 2, 1),
            TrackCounts::from_raw(0, 2, 2),
            GridAutoFlow::Row,
        );
    }

    #[test]
    fn test_definite_in_secondary_axis_with_fully_definite_negative() {
        placement_test_runner(
            2,
            2,
            vec![
                (2, style_with_placement(auto(), auto(), GridPlacement::from_line_index(2), auto()), (0, 1, 1, 2)),
                (1, style_with_placement(GridPlacement::from_line_index(-4), auto(), GridPlacement::from_line_index(2), auto()), (-1, 0, 1, 2)),
                (3, style_with_placement(auto(), auto(), GridPlacement::from_line_index(1), auto()), (-1, 0, 0, 1)),
            ],
            TrackCounts::from_raw(1, 2, 0),
            TrackCounts::from_raw(0, 2, 0),
            GridAutoFlow::Row,
        );
    }

    #[test]
    fn test_dense_packing_algorithm() {
        placement_test_runner(
            4,
            4,
            vec![
                // Definitely positioned in column 2
                (1, style_with_placement(GridPlacement::from_line_index(2), auto(), GridPlacement::from_line_index(1), auto()), (1, 2, 0, 1)),
                // Spans 2 columns, so positioned after item 1
                (2, style_with_placement(GridPlacement::from_span(2), auto(), auto(), auto()), (2, 4, 0, 1)),
                // Spans 1 column, so backfills before item 1
                (3, style_with_placement(auto(), auto(), auto(), auto()), (0, 1, 0, 1)),
            ],
            TrackCounts::from_raw(0, 4, 0),
            TrackCounts::from_raw(0, 4, 0),
            GridAutoFlow::RowDense,
        );
    }

    #[test]
    fn test_sparse_packing_algorithm() {
        placement_test_runner(
            4,
            4,
            vec![
                // Width 3
                (1, style_with_placement(auto(), GridPlacement::from_span(3), auto(), auto()), (0, 3, 0, 1)),
                // Width 3 (wraps to next row)
                (2, style_with_placement(auto(), GridPlacement::from_span(3), auto(), auto()), (0, 3, 1, 2)),
                // Width 1 (uses second row as the cursor is already on it)
                (3, style_with_placement(auto(), GridPlacement::from_span(1), auto(), auto()), (3, 4, 1, 2)),
            ],
            TrackCounts::from_raw(0, 4, 0),
            TrackCounts::from_raw(0, 4, 0),
            GridAutoFlow::Row,
        );
    }

    #[test]
    fn test_auto_placement_in_negative_tracks() {
        placement_test_runner(
            2,
            2,
            vec![
                // Row 1. Definitely positioned in column -2
                (1, style_with_placement(GridPlacement::from_line_index(-5), auto(), GridPlacement::from_line_index(1), auto()), (-2, -1, 0, 1)),
                // Row 2. Auto positioned in column -2
                (2, style_with_placement(auto(), auto(), GridPlacement::from_line_index(2), auto()), (-2, -1, 1, 2)),
                // Row 1. Auto positioned in column -1
                (3, style_with_placement(auto(), auto(), auto(), auto()), (-1, 0, 0, 1)),
            ],
            TrackCounts::from_raw(2, 2, 0),
            TrackCounts::from_raw(0, 2, 0),
            GridAutoFlow::RowDense,
        );
    }
}
