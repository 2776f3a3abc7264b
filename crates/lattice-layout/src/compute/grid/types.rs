//! Internal coordinate and track representations for grid layout.
//!
//! Grid lines in styles are 1-based and may be negative (counting back from
//! the end of the explicit grid). Internally everything is converted to
//! "origin-zero" coordinates where line 0 is the start of the explicit grid,
//! so implicit tracks before the explicit grid get negative line numbers.

use core::cmp::{max, min, Ordering};
use core::ops::{Add, AddAssign, Range, Sub};

use lattice_core::{
    GridPlacement, InlinePair, LengthPercentage, MaxTrackSizingFunction, MinTrackSizingFunction,
};

/// A grid line in origin-zero coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct OriginZeroLine(pub i16);

impl OriginZeroLine {
    /// Convert a 1-based (possibly negative) style grid line.
    ///
    /// Callers map line 0 (which CSS defines as invalid) to auto placement
    /// before reaching this conversion.
    pub(super) fn from_grid_line(line: i16, explicit_track_count: u16) -> Self {
        let explicit_line_count = explicit_track_count as i16 + 1;
        match line.cmp(&0) {
            Ordering::Greater => Self(line - 1),
            Ordering::Less => Self(line + explicit_line_count),
            Ordering::Equal => Self(0),
        }
    }

    /// The index of the gutter at this line within a track vector laid out
    /// as `[gutter, track, gutter, track, ..., gutter]`.
    pub(super) fn into_track_vec_index(self, counts: TrackCounts) -> usize {
        2 * (self.0 + counts.negative_implicit as i16) as usize
    }

    /// Implicit tracks this line implies before the explicit grid.
    pub(super) fn implied_negative_implicit_tracks(self) -> u16 {
        if self.0 < 0 {
            self.0.unsigned_abs()
        } else {
            0
        }
    }

    /// Implicit tracks this line implies after the explicit grid.
    pub(super) fn implied_positive_implicit_tracks(self, explicit_track_count: u16) -> u16 {
        if self.0 > explicit_track_count as i16 {
            (self.0 - explicit_track_count as i16) as u16
        } else {
            0
        }
    }
}

impl Add<u16> for OriginZeroLine {
    type Output = Self;
    fn add(self, rhs: u16) -> Self {
        Self(self.0 + rhs as i16)
    }
}

impl Sub<u16> for OriginZeroLine {
    type Output = Self;
    fn sub(self, rhs: u16) -> Self {
        Self(self.0 - rhs as i16)
    }
}

impl AddAssign<u16> for OriginZeroLine {
    fn add_assign(&mut self, rhs: u16) {
        self.0 += rhs as i16;
    }
}

/// Extra operations on a start/end pair of origin-zero lines.
pub(super) trait OriginZeroLineRange {
    /// The number of tracks between the lines (zero if reversed).
    fn span(self) -> u16;
}

impl OriginZeroLineRange for InlinePair<OriginZeroLine> {
    fn span(self) -> u16 {
        max(self.end.0 - self.start.0, 0) as u16
    }
}

/// A grid item placement with definite lines already shifted to origin-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum OriginZeroPlacement {
    /// Place automatically according to the auto-placement algorithm
    #[default]
    Auto,
    /// Place at this origin-zero line
    Line(OriginZeroLine),
    /// Span this many tracks from wherever the opposite line lands
    Span(u16),
}

/// Convert one style placement into origin-zero coordinates.
///
/// Style line 0 does not exist and degrades to auto placement.
pub(super) fn into_origin_zero_placement(
    placement: GridPlacement,
    explicit_track_count: u16,
) -> OriginZeroPlacement {
    match placement {
        GridPlacement::Auto => OriginZeroPlacement::Auto,
        GridPlacement::Span(span) => OriginZeroPlacement::Span(span.max(1)),
        GridPlacement::Line(0) => OriginZeroPlacement::Auto,
        GridPlacement::Line(line) => {
            OriginZeroPlacement::Line(OriginZeroLine::from_grid_line(line, explicit_track_count))
        }
    }
}

/// Convert a start/end placement pair into origin-zero coordinates.
pub(super) fn into_origin_zero_placement_pair(
    placement: InlinePair<GridPlacement>,
    explicit_track_count: u16,
) -> InlinePair<OriginZeroPlacement> {
    InlinePair {
        start: into_origin_zero_placement(placement.start, explicit_track_count),
        end: into_origin_zero_placement(placement.end, explicit_track_count),
    }
}

/// Resolution of an origin-zero placement pair into concrete lines.
pub(super) trait OriginZeroPlacementPair {
    /// Whether at least one side names a definite line.
    fn is_definite(self) -> bool;

    /// The span implied by the pair before any line is known.
    fn indefinite_span(self) -> u16;

    /// Resolve a pair with at least one definite line into start/end lines.
    fn resolve_definite_grid_lines(self) -> InlinePair<OriginZeroLine>;

    /// Resolve a fully indefinite pair against a cursor position.
    fn resolve_indefinite_grid_tracks(self, position: OriginZeroLine) -> InlinePair<OriginZeroLine>;

    /// Resolve whichever lines are definite for an absolutely positioned
    /// item, leaving the rest to fall back to the container's edges.
    fn resolve_absolutely_positioned_grid_tracks(self) -> InlinePair<Option<OriginZeroLine>>;
}

impl OriginZeroPlacementPair for InlinePair<OriginZeroPlacement> {
    fn is_definite(self) -> bool {
        matches!(self.start, OriginZeroPlacement::Line(_))
            || matches!(self.end, OriginZeroPlacement::Line(_))
    }

    fn indefinite_span(self) -> u16 {
        use OriginZeroPlacement::{Auto, Line, Span};
        match (self.start, self.end) {
            (Line(_), Auto) | (Auto, Line(_)) | (Auto, Auto) => 1,
            (Line(_), Span(span)) | (Span(span), Line(_)) => span,
            (Span(span), Auto) | (Auto, Span(span)) | (Span(span), Span(_)) => span,
            (Line(_), Line(_)) => 1,
        }
        .max(1)
    }

    fn resolve_definite_grid_lines(self) -> InlinePair<OriginZeroLine> {
        use OriginZeroPlacement::{Auto, Line, Span};
        match (self.start, self.end) {
            (Line(line1), Line(line2)) => {
                if line1 == line2 {
                    InlinePair { start: line1, end: line1 + 1 }
                } else {
                    InlinePair { start: min(line1, line2), end: max(line1, line2) }
                }
            }
            (Line(line), Span(span)) => InlinePair { start: line, end: line + span },
            (Line(line), Auto) => InlinePair { start: line, end: line + 1 },
            (Span(span), Line(line)) => InlinePair { start: line - span, end: line },
            (Auto, Line(line)) => InlinePair { start: line - 1, end: line },
            _ => unreachable!("resolve_definite_grid_lines requires at least one definite line"),
        }
    }

    fn resolve_indefinite_grid_tracks(self, position: OriginZeroLine) -> InlinePair<OriginZeroLine> {
        use OriginZeroPlacement::{Auto, Span};
        match (self.start, self.end) {
            (Auto, Auto) => InlinePair { start: position, end: position + 1 },
            (Span(span), Auto) | (Auto, Span(span)) | (Span(span), Span(_)) => {
                InlinePair { start: position, end: position + span }
            }
            _ => unreachable!("resolve_indefinite_grid_tracks requires an indefinite placement"),
        }
    }

    fn resolve_absolutely_positioned_grid_tracks(self) -> InlinePair<Option<OriginZeroLine>> {
        use OriginZeroPlacement::{Auto, Line, Span};
        match (self.start, self.end) {
            (Line(line1), Line(line2)) => {
                if line1 == line2 {
                    InlinePair { start: Some(line1), end: Some(line1 + 1) }
                } else {
                    InlinePair { start: Some(min(line1, line2)), end: Some(max(line1, line2)) }
                }
            }
            (Line(line), Span(span)) => InlinePair { start: Some(line), end: Some(line + span) },
            (Line(line), Auto) => InlinePair { start: Some(line), end: None },
            (Span(span), Line(line)) => InlinePair { start: Some(line - span), end: Some(line) },
            (Auto, Line(line)) => InlinePair { start: None, end: Some(line) },
            _ => InlinePair { start: None, end: None },
        }
    }
}

/// How many implicit and explicit tracks an axis of the grid has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct TrackCounts {
    /// Implicit tracks before the explicit grid
    pub negative_implicit: u16,
    /// Tracks from the `grid-template-rows`/`grid-template-columns` styles
    pub explicit: u16,
    /// Implicit tracks after the explicit grid
    pub positive_implicit: u16,
}

impl TrackCounts {
    pub(super) fn from_raw(negative_implicit: u16, explicit: u16, positive_implicit: u16) -> Self {
        Self { negative_implicit, explicit, positive_implicit }
    }

    /// Total number of tracks in the axis.
    pub(super) fn len(&self) -> usize {
        (self.negative_implicit + self.explicit + self.positive_implicit) as usize
    }

    /// The first line of the implicit grid.
    pub(super) fn implicit_start_line(&self) -> OriginZeroLine {
        OriginZeroLine(-(self.negative_implicit as i16))
    }

    /// The line just past the last implicit track.
    pub(super) fn implicit_end_line(&self) -> OriginZeroLine {
        OriginZeroLine((self.explicit + self.positive_implicit) as i16)
    }

    /// The index of the track immediately after the given line.
    pub(super) fn oz_line_to_next_track(&self, line: OriginZeroLine) -> i16 {
        line.0 + self.negative_implicit as i16
    }

    /// Convert a line range into the range of track indexes it encloses.
    pub(super) fn oz_line_range_to_track_range(
        &self,
        range: InlinePair<OriginZeroLine>,
    ) -> Range<i16> {
        self.oz_line_to_next_track(range.start)..self.oz_line_to_next_track(range.end)
    }

    /// The line immediately before the given track index.
    pub(super) fn track_to_prev_oz_line(&self, index: u16) -> OriginZeroLine {
        OriginZeroLine(index as i16 - self.negative_implicit as i16)
    }
}

/// Whether an entry in the track vector is a proper track or a gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GridTrackKind {
    Track,
    Gutter,
}

/// One track (or gutter) of the grid in one axis, carrying the working state
/// of the track sizing algorithm.
#[derive(Debug, Clone)]
pub(super) struct GridTrack {
    pub kind: GridTrackKind,

    /// An auto-fit track with no items collapses to zero size and sizes as
    /// if it were not there
    pub is_collapsed: bool,

    pub min_track_sizing_function: MinTrackSizingFunction,
    pub max_track_sizing_function: MaxTrackSizingFunction,

    /// Distance from the start of the axis content box to this track
    pub offset: f32,

    pub base_size: f32,
    /// `f32::INFINITY` while the limit is unconstrained
    pub growth_limit: f32,

    /// Extra size contributed by content-distribution alignment in the
    /// opposite axis, folded into item available-space estimates
    pub content_alignment_adjustment: f32,

    // Scratch space for the track sizing algorithm
    pub item_incurred_increase: f32,
    pub base_size_planned_increase: f32,
    pub growth_limit_planned_increase: f32,
    pub infinitely_growable: bool,
}

impl GridTrack {
    fn new_with_kind(
        kind: GridTrackKind,
        min_track_sizing_function: MinTrackSizingFunction,
        max_track_sizing_function: MaxTrackSizingFunction,
    ) -> Self {
        Self {
            kind,
            is_collapsed: false,
            min_track_sizing_function,
            max_track_sizing_function,
            offset: 0.0,
            base_size: 0.0,
            growth_limit: 0.0,
            content_alignment_adjustment: 0.0,
            item_incurred_increase: 0.0,
            base_size_planned_increase: 0.0,
            growth_limit_planned_increase: 0.0,
            infinitely_growable: false,
        }
    }

    pub(super) fn new(
        min_track_sizing_function: MinTrackSizingFunction,
        max_track_sizing_function: MaxTrackSizingFunction,
    ) -> Self {
        Self::new_with_kind(GridTrackKind::Track, min_track_sizing_function, max_track_sizing_function)
    }

    pub(super) fn gutter(size: LengthPercentage) -> Self {
        Self::new_with_kind(
            GridTrackKind::Gutter,
            MinTrackSizingFunction::Fixed(size),
            MaxTrackSizingFunction::Fixed(size),
        )
    }

    /// Collapse the track so it sizes to zero and is skipped by alignment.
    pub(super) fn collapse(&mut self) {
        self.is_collapsed = true;
        self.min_track_sizing_function = MinTrackSizingFunction::Fixed(LengthPercentage::ZERO);
        self.max_track_sizing_function = MaxTrackSizingFunction::Fixed(LengthPercentage::ZERO);
    }

    pub(super) fn is_flexible(&self) -> bool {
        matches!(self.max_track_sizing_function, MaxTrackSizingFunction::Fraction(_))
    }

    pub(super) fn flex_factor(&self) -> f32 {
        match self.max_track_sizing_function {
            MaxTrackSizingFunction::Fraction(flex) => flex,
            _ => 0.0,
        }
    }

    pub(super) fn has_intrinsic_sizing_function(&self) -> bool {
        self.min_track_sizing_function.is_intrinsic() || self.max_track_sizing_function.is_intrinsic()
    }

    /// Whether either sizing function needs a definite basis to resolve.
    pub(super) fn uses_percentage(&self) -> bool {
        let min_uses = matches!(
            self.min_track_sizing_function,
            MinTrackSizingFunction::Fixed(LengthPercentage::Percent(_))
        );
        let max_uses = matches!(
            self.max_track_sizing_function,
            MaxTrackSizingFunction::Fixed(LengthPercentage::Percent(_))
                | MaxTrackSizingFunction::FitContent(LengthPercentage::Percent(_))
        );
        min_uses || max_uses
    }

    pub(super) fn min_resolved_percentage_size(&self, basis: f32) -> Option<f32> {
        match self.min_track_sizing_function {
            MinTrackSizingFunction::Fixed(LengthPercentage::Percent(percent)) => Some(percent * basis),
            _ => None,
        }
    }

    pub(super) fn max_resolved_percentage_size(&self, basis: f32) -> Option<f32> {
        match self.max_track_sizing_function {
            MaxTrackSizingFunction::Fixed(LengthPercentage::Percent(percent)) => Some(percent * basis),
            _ => None,
        }
    }

    /// The fit-content argument as a limit, infinite for other functions.
    pub(super) fn fit_content_limit(&self, axis_inner_node_size: Option<f32>) -> f32 {
        match self.max_track_sizing_function {
            MaxTrackSizingFunction::FitContent(limit) => {
                limit.resolve(axis_inner_node_size).unwrap_or(f32::INFINITY)
            }
            _ => f32::INFINITY,
        }
    }

    /// The growth limit clamped by any fit-content argument.
    pub(super) fn fit_content_limited_growth_limit(&self, axis_inner_node_size: Option<f32>) -> f32 {
        self.growth_limit.min(self.fit_content_limit(axis_inner_node_size))
    }

    /// The definite limit this track cannot grow beyond, if it has one.
    /// Fit-content tracks limit at their argument rather than at a fixed max.
    pub(super) fn max_definite_limit(&self, axis_inner_node_size: Option<f32>) -> Option<f32> {
        match self.max_track_sizing_function {
            MaxTrackSizingFunction::FitContent(limit) => limit.resolve(axis_inner_node_size),
            _ => self.max_track_sizing_function.definite_value(axis_inner_node_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grid_line_positive() {
        assert_eq!(OriginZeroLine::from_grid_line(1, 3), OriginZeroLine(0));
        assert_eq!(OriginZeroLine::from_grid_line(4, 3), OriginZeroLine(3));
        assert_eq!(OriginZeroLine::from_grid_line(6, 3), OriginZeroLine(5));
    }

    #[test]
    fn test_from_grid_line_negative_counts_from_end() {
        // With 3 explicit tracks line -1 is the last explicit line
        assert_eq!(OriginZeroLine::from_grid_line(-1, 3), OriginZeroLine(3));
        assert_eq!(OriginZeroLine::from_grid_line(-4, 3), OriginZeroLine(0));
        assert_eq!(OriginZeroLine::from_grid_line(-6, 3), OriginZeroLine(-2));
    }

    #[test]
    fn test_line_zero_becomes_auto() {
        assert_eq!(into_origin_zero_placement(GridPlacement::Line(0), 3), OriginZeroPlacement::Auto);
    }

    #[test]
    fn test_implied_implicit_tracks() {
        assert_eq!(OriginZeroLine(-2).implied_negative_implicit_tracks(), 2);
        assert_eq!(OriginZeroLine(1).implied_negative_implicit_tracks(), 0);
        assert_eq!(OriginZeroLine(5).implied_positive_implicit_tracks(3), 2);
        assert_eq!(OriginZeroLine(2).implied_positive_implicit_tracks(3), 0);
    }

    #[test]
    fn test_resolve_definite_grid_lines() {
        use OriginZeroPlacement::{Auto, Line, Span};

        let pair = InlinePair { start: Line(OriginZeroLine(1)), end: Line(OriginZeroLine(1)) };
        assert_eq!(
            pair.resolve_definite_grid_lines(),
            InlinePair { start: OriginZeroLine(1), end: OriginZeroLine(2) }
        );

        // Reversed lines swap
        let pair = InlinePair { start: Line(OriginZeroLine(3)), end: Line(OriginZeroLine(0)) };
        assert_eq!(
            pair.resolve_definite_grid_lines(),
            InlinePair { start: OriginZeroLine(0), end: OriginZeroLine(3) }
        );

        let pair = InlinePair { start: Span(2), end: Line(OriginZeroLine(4)) };
        assert_eq!(
            pair.resolve_definite_grid_lines(),
            InlinePair { start: OriginZeroLine(2), end: OriginZeroLine(4) }
        );

        let pair = InlinePair { start: Auto, end: Line(OriginZeroLine(2)) };
        assert_eq!(
            pair.resolve_definite_grid_lines(),
            InlinePair { start: OriginZeroLine(1), end: OriginZeroLine(2) }
        );
    }

    #[test]
    fn test_track_counts_line_conversions() {
        let counts = TrackCounts::from_raw(2, 3, 1);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts.implicit_start_line(), OriginZeroLine(-2));
        assert_eq!(counts.implicit_end_line(), OriginZeroLine(4));
        assert_eq!(counts.oz_line_to_next_track(OriginZeroLine(-2)), 0);
        assert_eq!(counts.oz_line_to_next_track(OriginZeroLine(0)), 2);
        assert_eq!(counts.track_to_prev_oz_line(2), OriginZeroLine(0));
    }

    #[test]
    fn test_collapsed_track_sizes_to_zero() {
        let mut track = GridTrack::new(MinTrackSizingFunction::Auto, MaxTrackSizingFunction::Fraction(1.0));
        track.collapse();
        assert!(track.is_collapsed);
        assert_eq!(track.min_track_sizing_function.definite_value(None), Some(0.0));
        assert_eq!(track.max_track_sizing_function.definite_value(None), Some(0.0));
    }
}
