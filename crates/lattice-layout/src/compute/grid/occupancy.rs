//! Tracks which cells of the implicit grid already hold an item during
//! placement.

use core::cmp::{max, min};
use core::ops::Range;

use lattice_core::{AbsoluteAxis, InlinePair};

use crate::compute::grid::types::{OriginZeroLine, TrackCounts};

/// The occupancy state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum CellOccupancyState {
    #[default]
    Unoccupied,
    /// Occupied by an item with a definite placement in both axes
    DefinitelyPlaced,
    /// Occupied by an item placed by the auto-placement algorithm
    AutoPlaced,
}

/// A dense row-major matrix of cell states covering the implicit grid.
///
/// The matrix grows as placement discovers items that hang off either end
/// of the grid; coordinates passed in are origin-zero lines or signed track
/// indexes, which stay valid across growth.
pub(super) struct CellOccupancyMatrix {
    cells: Vec<CellOccupancyState>,
    columns: TrackCounts,
    rows: TrackCounts,
}

impl CellOccupancyMatrix {
    /// An empty matrix sized for the given track counts.
    pub(super) fn with_track_counts(columns: TrackCounts, rows: TrackCounts) -> Self {
        Self { cells: vec![CellOccupancyState::Unoccupied; columns.len() * rows.len()], columns, rows }
    }

    pub(super) fn track_counts(&self, axis: AbsoluteAxis) -> TrackCounts {
        match axis {
            AbsoluteAxis::Horizontal => self.columns,
            AbsoluteAxis::Vertical => self.rows,
        }
    }

    /// Whether both track ranges fall inside the currently allocated grid.
    pub(super) fn is_area_in_range(
        &self,
        primary_axis: AbsoluteAxis,
        primary_range: Range<i16>,
        secondary_range: Range<i16>,
    ) -> bool {
        let (primary_count, secondary_count) = match primary_axis {
            AbsoluteAxis::Horizontal => (self.columns.len(), self.rows.len()),
            AbsoluteAxis::Vertical => (self.rows.len(), self.columns.len()),
        };
        primary_range.start >= 0
            && primary_range.end <= primary_count as i16
            && secondary_range.start >= 0
            && secondary_range.end <= secondary_count as i16
    }

    /// Grow the matrix so the given (possibly out-of-bounds) track ranges
    /// fit, padding new cells as unoccupied and bumping the implicit counts.
    fn expand_to_fit_range(&mut self, row_range: Range<i16>, col_range: Range<i16>) {
        let req_negative_rows = min(row_range.start, 0).unsigned_abs();
        let req_positive_rows = max(row_range.end - self.rows.len() as i16, 0) as u16;
        let req_negative_cols = min(col_range.start, 0).unsigned_abs();
        let req_positive_cols = max(col_range.end - self.columns.len() as i16, 0) as u16;

        let old_row_count = self.rows.len();
        let old_col_count = self.columns.len();
        let new_row_count = old_row_count + (req_negative_rows + req_positive_rows) as usize;
        let new_col_count = old_col_count + (req_negative_cols + req_positive_cols) as usize;

        let mut cells = Vec::with_capacity(new_row_count * new_col_count);
        cells.resize(req_negative_rows as usize * new_col_count, CellOccupancyState::Unoccupied);
        for row in 0..old_row_count {
            cells.resize(cells.len() + req_negative_cols as usize, CellOccupancyState::Unoccupied);
            cells.extend_from_slice(&self.cells[row * old_col_count..(row + 1) * old_col_count]);
            cells.resize(cells.len() + req_positive_cols as usize, CellOccupancyState::Unoccupied);
        }
        cells.resize(new_row_count * new_col_count, CellOccupancyState::Unoccupied);

        self.rows.negative_implicit += req_negative_rows;
        self.rows.positive_implicit += req_positive_rows;
        self.columns.negative_implicit += req_negative_cols;
        self.columns.positive_implicit += req_positive_cols;
        self.cells = cells;
    }

    /// Mark the rectangle of cells covered by the two line spans, expanding
    /// the matrix first if the spans reach outside it.
    pub(super) fn mark_area_as(
        &mut self,
        primary_axis: AbsoluteAxis,
        primary_span: InlinePair<OriginZeroLine>,
        secondary_span: InlinePair<OriginZeroLine>,
        value: CellOccupancyState,
    ) {
        let (row_span, column_span) = match primary_axis {
            AbsoluteAxis::Horizontal => (secondary_span, primary_span),
            AbsoluteAxis::Vertical => (primary_span, secondary_span),
        };

        let mut col_range = self.columns.oz_line_range_to_track_range(column_span);
        let mut row_range = self.rows.oz_line_range_to_track_range(row_span);

        // Expansion shifts track indexes, so re-resolve the ranges after it
        if !self.is_area_in_range(AbsoluteAxis::Horizontal, col_range.clone(), row_range.clone()) {
            self.expand_to_fit_range(row_range, col_range);
            col_range = self.columns.oz_line_range_to_track_range(column_span);
            row_range = self.rows.oz_line_range_to_track_range(row_span);
        }

        let num_cols = self.columns.len();
        for row in row_range {
            for col in col_range.clone() {
                self.cells[row as usize * num_cols + col as usize] = value;
            }
        }
    }

    /// Whether the rectangle of cells identified by two line spans is free.
    pub(super) fn line_area_is_unoccupied(
        &self,
        primary_axis: AbsoluteAxis,
        primary_span: InlinePair<OriginZeroLine>,
        secondary_span: InlinePair<OriginZeroLine>,
    ) -> bool {
        let primary_range = self.track_counts(primary_axis).oz_line_range_to_track_range(primary_span);
        let secondary_range =
            self.track_counts(primary_axis.other()).oz_line_range_to_track_range(secondary_span);
        self.track_area_is_unoccupied(primary_axis, primary_range, secondary_range)
    }

    /// Whether the rectangle of cells identified by two track ranges is
    /// free. Cells outside the allocated grid count as unoccupied.
    pub(super) fn track_area_is_unoccupied(
        &self,
        primary_axis: AbsoluteAxis,
        primary_range: Range<i16>,
        secondary_range: Range<i16>,
    ) -> bool {
        let (row_range, col_range) = match primary_axis {
            AbsoluteAxis::Horizontal => (secondary_range, primary_range),
            AbsoluteAxis::Vertical => (primary_range, secondary_range),
        };

        let num_rows = self.rows.len() as i16;
        let num_cols = self.columns.len() as i16;
        for row in row_range {
            if row < 0 || row >= num_rows {
                continue;
            }
            for col in col_range.clone() {
                if col < 0 || col >= num_cols {
                    continue;
                }
                if self.cells[row as usize * num_cols as usize + col as usize]
                    != CellOccupancyState::Unoccupied
                {
                    return false;
                }
            }
        }
        true
    }

    /// Whether any cell in the given row holds an item.
    pub(super) fn row_is_occupied(&self, row_index: usize) -> bool {
        if row_index >= self.rows.len() {
            return false;
        }
        let num_cols = self.columns.len();
        self.cells[row_index * num_cols..(row_index + 1) * num_cols]
            .iter()
            .any(|cell| *cell != CellOccupancyState::Unoccupied)
    }

    /// Whether any cell in the given column holds an item.
    pub(super) fn column_is_occupied(&self, column_index: usize) -> bool {
        if column_index >= self.columns.len() {
            return false;
        }
        let num_cols = self.columns.len();
        (0..self.rows.len()).any(|row| self.cells[row * num_cols + column_index] != CellOccupancyState::Unoccupied)
    }

    /// The start line of the last cell of the given kind along `track_type`
    /// within the single cross-axis track identified by `start_at`.
    ///
    /// Sparse auto-placement uses this to resume scanning after previously
    /// auto-placed items rather than from the start of the axis.
    pub(super) fn last_of_type(
        &self,
        track_type: AbsoluteAxis,
        start_at: OriginZeroLine,
        kind: CellOccupancyState,
    ) -> Option<OriginZeroLine> {
        let secondary_index = self.track_counts(track_type.other()).oz_line_to_next_track(start_at);
        let num_cols = self.columns.len();

        let maybe_index = match track_type {
            AbsoluteAxis::Horizontal => {
                if secondary_index < 0 || secondary_index as usize >= self.rows.len() {
                    return None;
                }
                let row = secondary_index as usize;
                (0..num_cols).rev().find(|&col| self.cells[row * num_cols + col] == kind)
            }
            AbsoluteAxis::Vertical => {
                if secondary_index < 0 || secondary_index as usize >= num_cols {
                    return None;
                }
                let col = secondary_index as usize;
                (0..self.rows.len()).rev().find(|&row| self.cells[row * num_cols + col] == kind)
            }
        };

        maybe_index.map(|index| self.track_counts(track_type).track_to_prev_oz_line(index as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: i16, end: i16) -> InlinePair<OriginZeroLine> {
        InlinePair { start: OriginZeroLine(start), end: OriginZeroLine(end) }
    }

    #[test]
    fn test_marked_area_is_occupied() {
        let mut matrix = CellOccupancyMatrix::with_track_counts(
            TrackCounts::from_raw(0, 3, 0),
            TrackCounts::from_raw(0, 2, 0),
        );
        matrix.mark_area_as(AbsoluteAxis::Horizontal, span(0, 2), span(0, 1), CellOccupancyState::AutoPlaced);

        assert!(!matrix.line_area_is_unoccupied(AbsoluteAxis::Horizontal, span(0, 2), span(0, 1)));
        assert!(matrix.line_area_is_unoccupied(AbsoluteAxis::Horizontal, span(2, 3), span(0, 1)));
        assert!(matrix.line_area_is_unoccupied(AbsoluteAxis::Horizontal, span(0, 3), span(1, 2)));
        assert!(matrix.column_is_occupied(0));
        assert!(!matrix.column_is_occupied(2));
        assert!(matrix.row_is_occupied(0));
        assert!(!matrix.row_is_occupied(1));
    }

    #[test]
    fn test_marking_out_of_bounds_expands_the_grid() {
        let mut matrix = CellOccupancyMatrix::with_track_counts(
            TrackCounts::from_raw(0, 2, 0),
            TrackCounts::from_raw(0, 2, 0),
        );
        matrix.mark_area_as(AbsoluteAxis::Horizontal, span(-1, 1), span(2, 3), CellOccupancyState::DefinitelyPlaced);

        assert_eq!(matrix.track_counts(AbsoluteAxis::Horizontal), TrackCounts::from_raw(1, 2, 0));
        assert_eq!(matrix.track_counts(AbsoluteAxis::Vertical), TrackCounts::from_raw(0, 2, 1));
        assert!(!matrix.line_area_is_unoccupied(AbsoluteAxis::Horizontal, span(-1, 0), span(2, 3)));
        assert!(matrix.line_area_is_unoccupied(AbsoluteAxis::Horizontal, span(0, 2), span(0, 2)));
    }

    #[test]
    fn test_out_of_bounds_area_reads_as_unoccupied() {
        let matrix = CellOccupancyMatrix::with_track_counts(
            TrackCounts::from_raw(0, 2, 0),
            TrackCounts::from_raw(0, 2, 0),
        );
        assert!(matrix.line_area_is_unoccupied(AbsoluteAxis::Horizontal, span(5, 7), span(0, 1)));
    }

    #[test]
    fn test_last_of_type_scans_a_single_cross_track() {
        let mut matrix = CellOccupancyMatrix::with_track_counts(
            TrackCounts::from_raw(0, 4, 0),
            TrackCounts::from_raw(0, 2, 0),
        );
        matrix.mark_area_as(AbsoluteAxis::Horizontal, span(0, 1), span(0, 1), CellOccupancyState::AutoPlaced);
        matrix.mark_area_as(AbsoluteAxis::Horizontal, span(2, 3), span(0, 1), CellOccupancyState::AutoPlaced);
        matrix.mark_area_as(AbsoluteAxis::Horizontal, span(3, 4), span(1, 2), CellOccupancyState::AutoPlaced);

        let found = matrix.last_of_type(AbsoluteAxis::Horizontal, OriginZeroLine(0), CellOccupancyState::AutoPlaced);
        assert_eq!(found, Some(OriginZeroLine(2)));
        let found = matrix.last_of_type(AbsoluteAxis::Horizontal, OriginZeroLine(0), CellOccupancyState::DefinitelyPlaced);
        assert_eq!(found, None);
    }
}
