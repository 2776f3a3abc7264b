//! Pre-placement estimation of the implicit grid's size.
//!
//! The estimate pre-sizes the occupancy matrix so placement rarely needs to
//! reallocate. The negative implicit and explicit counts are exact; the
//! positive implicit count is a lower bound that placement may still grow.

use core::cmp::{max, min};

use lattice_core::{GridPlacement, InlinePair};

use crate::compute::grid::types::{
    into_origin_zero_placement_pair, OriginZeroLine, OriginZeroPlacement, OriginZeroPlacementPair,
    TrackCounts,
};

/// Estimate the track counts of both axes from the explicit track counts
/// and the children's placement styles.
pub(super) fn compute_grid_size_estimate(
    explicit_col_count: u16,
    explicit_row_count: u16,
    child_placements: impl Iterator<Item = (InlinePair<GridPlacement>, InlinePair<GridPlacement>)>,
) -> (TrackCounts, TrackCounts) {
    let (mut col_min, mut col_max, mut col_max_span) = (OriginZeroLine(0), OriginZeroLine(0), 0);
    let (mut row_min, mut row_max, mut row_max_span) = (OriginZeroLine(0), OriginZeroLine(0), 0);
    for (column, row) in child_placements {
        let (child_col_min, child_col_max, child_col_span) =
            child_min_line_max_line_span(column, explicit_col_count);
        let (child_row_min, child_row_max, child_row_span) =
            child_min_line_max_line_span(row, explicit_row_count);
        col_min = min(col_min, child_col_min);
        col_max = max(col_max, child_col_max);
        col_max_span = max(col_max_span, child_col_span);
        row_min = min(row_min, child_row_min);
        row_max = max(row_max, child_row_max);
        row_max_span = max(row_max_span, child_row_span);
    }

    let negative_implicit_cols = col_min.implied_negative_implicit_tracks();
    let mut positive_implicit_cols = col_max.implied_positive_implicit_tracks(explicit_col_count);
    let negative_implicit_rows = row_min.implied_negative_implicit_tracks();
    let mut positive_implicit_rows = row_max.implied_positive_implicit_tracks(explicit_row_count);

    // A span larger than the whole estimated axis forces extra tracks at
    // the end so indefinitely placed items are guaranteed to fit
    let total_cols = negative_implicit_cols + explicit_col_count + positive_implicit_cols;
    if total_cols < col_max_span {
        positive_implicit_cols = col_max_span - explicit_col_count - negative_implicit_cols;
    }
    let total_rows = negative_implicit_rows + explicit_row_count + positive_implicit_rows;
    if total_rows < row_max_span {
        positive_implicit_rows = row_max_span - explicit_row_count - negative_implicit_rows;
    }

    (
        TrackCounts::from_raw(negative_implicit_cols, explicit_col_count, positive_implicit_cols),
        TrackCounts::from_raw(negative_implicit_rows, explicit_row_count, positive_implicit_rows),
    )
}

/// The smallest and largest grid line one item's placement can touch in one
/// axis, along with its span if it is placed indefinitely.
///
/// Items placed purely by span or auto report lines (0, 0): their space
/// requirement is carried entirely by the returned span.
fn child_min_line_max_line_span(
    placement: InlinePair<GridPlacement>,
    explicit_track_count: u16,
) -> (OriginZeroLine, OriginZeroLine, u16) {
    use OriginZeroPlacement::{Auto, Line, Span};

    let oz_placement = into_origin_zero_placement_pair(placement, explicit_track_count);

    let min_line = match (oz_placement.start, oz_placement.end) {
        (Line(track1), Line(track2)) => {
            if track1 == track2 {
                track1
            } else {
                min(track1, track2)
            }
        }
        (Line(track), Auto) => track,
        (Line(track), Span(_)) => track,
        (Auto, Line(track)) => track,
        (Span(span), Line(track)) => track - span,
        (Auto | Span(_), Auto | Span(_)) => OriginZeroLine(0),
    };

    let max_line = match (oz_placement.start, oz_placement.end) {
        (Line(track1), Line(track2)) => {
            if track1 == track2 {
                track1 + 1
            } else {
                max(track1, track2)
            }
        }
        (Line(track), Auto) => track + 1,
        (Line(track), Span(span)) => track + span,
        (Auto, Line(track)) => track,
        (Span(_), Line(track)) => track,
        (Auto | Span(_), Auto | Span(_)) => OriginZeroLine(0),
    };

    let span = match (oz_placement.start, oz_placement.end) {
        (Auto | Span(_), Auto | Span(_)) => oz_placement.indefinite_span(),
        _ => 1,
    };

    (min_line, max_line, span)
}
