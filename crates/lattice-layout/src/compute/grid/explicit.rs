//! Expansion of track templates into concrete explicit tracks and
//! construction of the per-axis track vectors.

use lattice_core::{
    GridTemplateComponent, GridTrackRepetition, LengthPercentage, MaxTrackSizingFunction,
    MinTrackSizingFunction, TrackSizingFunction,
};

use crate::compute::grid::types::{GridTrack, TrackCounts};

/// One explicit track produced by template expansion.
#[derive(Debug, Clone, Copy)]
pub(super) struct TemplateTrack {
    pub sizing: TrackSizingFunction,
    /// Tracks from an auto-fit repetition collapse when nothing is placed
    /// in them
    pub collapsible: bool,
}

/// The resolved size a track contributes to repetition fitting: its fixed
/// max (falling back to its fixed min), or zero for intrinsic tracks.
fn fixed_track_size(sizing: &TrackSizingFunction, axis_inner_size: Option<f32>) -> f32 {
    sizing
        .max
        .definite_value(axis_inner_size)
        .or_else(|| sizing.min.definite_value(axis_inner_size))
        .unwrap_or(0.0)
}

/// Expand a track template into its explicit track list, resolving any
/// `repeat()` components.
///
/// Counted repetitions expand directly. Auto-fill and auto-fit repetitions
/// expand to as many whole repetitions as fit in `axis_inner_size` after
/// the non-repeated tracks and gaps are subtracted, with a minimum of one
/// repetition; against an indefinite size they produce one repetition.
pub(super) fn expand_explicit_tracks(
    template: &[GridTemplateComponent],
    axis_inner_size: Option<f32>,
    gap: f32,
) -> Vec<TemplateTrack> {
    if template.is_empty() {
        return Vec::new();
    }

    let auto_repetition_count = template
        .iter()
        .find_map(|component| match component {
            GridTemplateComponent::Repeat(
                GridTrackRepetition::AutoFill | GridTrackRepetition::AutoFit,
                tracks,
            ) => Some(tracks),
            _ => None,
        })
        .map(|repetition_tracks| {
            let inner_size = match axis_inner_size {
                Some(size) => size,
                None => return 1,
            };

            let mut non_repeated_count: usize = 0;
            let mut non_repeated_size = 0.0;
            for component in template {
                match component {
                    GridTemplateComponent::Single(sizing) => {
                        non_repeated_count += 1;
                        non_repeated_size += fixed_track_size(sizing, axis_inner_size);
                    }
                    GridTemplateComponent::Repeat(GridTrackRepetition::Count(count), tracks) => {
                        non_repeated_count += *count as usize * tracks.len();
                        non_repeated_size += *count as f32
                            * tracks.iter().map(|t| fixed_track_size(t, axis_inner_size)).sum::<f32>();
                    }
                    GridTemplateComponent::Repeat(_, _) => {}
                }
            }

            let per_repetition_size = repetition_tracks
                .iter()
                .map(|t| fixed_track_size(t, axis_inner_size))
                .sum::<f32>()
                + gap * repetition_tracks.len() as f32;
            if per_repetition_size <= 0.0 {
                return 1;
            }

            let free_space =
                inner_size + gap - non_repeated_size - gap * non_repeated_count as f32;
            (free_space / per_repetition_size).floor().max(1.0) as usize
        })
        .unwrap_or(1);

    let mut tracks = Vec::new();
    for component in template {
        match component {
            GridTemplateComponent::Single(sizing) => {
                tracks.push(TemplateTrack { sizing: *sizing, collapsible: false });
            }
            GridTemplateComponent::Repeat(repetition, repetition_tracks) => {
                let (count, collapsible) = match repetition {
                    GridTrackRepetition::Count(count) => (*count as usize, false),
                    GridTrackRepetition::AutoFill => (auto_repetition_count, false),
                    GridTrackRepetition::AutoFit => (auto_repetition_count, true),
                };
                for _ in 0..count {
                    for sizing in repetition_tracks {
                        tracks.push(TemplateTrack { sizing: *sizing, collapsible });
                    }
                }
            }
        }
    }
    tracks
}

/// Build the track vector for one axis in the layout
/// `[gutter, track, gutter, track, ..., track, gutter]`.
///
/// Implicit tracks take their sizing functions from the auto-track list,
/// cycled so that the list stays aligned with the explicit grid's first
/// track. Gaps apply only between tracks, so both outer gutters are
/// zero-sized. Collapsible (auto-fit) tracks with no items collapse along
/// with their trailing gutter.
pub(super) fn initialize_grid_tracks(
    tracks: &mut Vec<GridTrack>,
    counts: TrackCounts,
    explicit_tracks: &[TemplateTrack],
    auto_tracks: &[TrackSizingFunction],
    gap: LengthPercentage,
    track_is_occupied: impl Fn(usize) -> bool,
) {
    tracks.clear();
    tracks.reserve(counts.len() * 2 + 1);

    tracks.push(GridTrack::gutter(LengthPercentage::ZERO));

    // Negative implicit tracks, offset so the cycle of auto tracks lines up
    // with the start of the explicit grid
    if auto_tracks.is_empty() {
        for _ in 0..counts.negative_implicit {
            tracks.push(GridTrack::new(MinTrackSizingFunction::Auto, MaxTrackSizingFunction::Auto));
            tracks.push(GridTrack::gutter(gap));
        }
    } else {
        let offset = (auto_tracks.len()
            - (counts.negative_implicit as usize % auto_tracks.len()))
            % auto_tracks.len();
        for sizing in auto_tracks
            .iter()
            .cycle()
            .skip(offset)
            .take(counts.negative_implicit as usize)
        {
            tracks.push(GridTrack::new(sizing.min, sizing.max));
            tracks.push(GridTrack::gutter(gap));
        }
    }

    for (index, template_track) in explicit_tracks.iter().enumerate() {
        let mut track = GridTrack::new(template_track.sizing.min, template_track.sizing.max);
        let mut gutter = GridTrack::gutter(gap);

        let overall_track_index = counts.negative_implicit as usize + index;
        if template_track.collapsible && !track_is_occupied(overall_track_index) {
            track.collapse();
            gutter.collapse();
        }

        tracks.push(track);
        tracks.push(gutter);
    }

    // Positive implicit tracks
    if auto_tracks.is_empty() {
        for _ in 0..counts.positive_implicit {
            tracks.push(GridTrack::new(MinTrackSizingFunction::Auto, MaxTrackSizingFunction::Auto));
            tracks.push(GridTrack::gutter(gap));
        }
    } else {
        for sizing in auto_tracks.iter().cycle().take(counts.positive_implicit as usize) {
            tracks.push(GridTrack::new(sizing.min, sizing.max));
            tracks.push(GridTrack::gutter(gap));
        }
    }

    if let Some(last) = tracks.last_mut() {
        last.min_track_sizing_function = MinTrackSizingFunction::Fixed(LengthPercentage::ZERO);
        last.max_track_sizing_function = MaxTrackSizingFunction::Fixed(LengthPercentage::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::types::GridTrackKind;
    use lattice_core::GridTemplateComponent;
    use lattice_core::TrackSizingFunction as Tsf;

    fn expand(template: &[GridTemplateComponent], size: Option<f32>, gap: f32) -> usize {
        expand_explicit_tracks(template, size, gap).len()
    }

    #[test]
    fn test_counted_repeat_expands_in_place() {
        let template =
            vec![Tsf::length(10.0).into(), GridTemplateComponent::Repeat(GridTrackRepetition::Count(3), vec![Tsf::fr(1.0), Tsf::length(20.0)])];
        assert_eq!(expand(&template, None, 0.0), 7);
    }

    #[test]
    fn test_auto_fill_fills_the_axis() {
        let template =
            vec![GridTemplateComponent::Repeat(GridTrackRepetition::AutoFill, vec![Tsf::length(40.0)])];
        assert_eq!(expand(&template, Some(100.0), 0.0), 2);
        assert_eq!(expand(&template, Some(120.0), 0.0), 3);
        // Gaps count against the available space
        assert_eq!(expand(&template, Some(110.0), 10.0), 2);
        assert_eq!(expand(&template, Some(200.0), 10.0), 4);
    }

    #[test]
    fn test_auto_fill_produces_at_least_one_repetition() {
        let template =
            vec![GridTemplateComponent::Repeat(GridTrackRepetition::AutoFill, vec![Tsf::length(40.0)])];
        assert_eq!(expand(&template, Some(10.0), 0.0), 1);
        assert_eq!(expand(&template, None, 0.0), 1);
    }

    #[test]
    fn test_auto_fill_accounts_for_fixed_tracks() {
        let template = vec![
            Tsf::length(50.0).into(),
            GridTemplateComponent::Repeat(GridTrackRepetition::AutoFill, vec![Tsf::length(40.0)]),
        ];
        // 200 - 50 leaves room for 3 forty-pixel repetitions
        assert_eq!(expand(&template, Some(200.0), 0.0), 4);
    }

    #[test]
    fn test_track_vector_layout() {
        let explicit: Vec<TemplateTrack> =
            expand_explicit_tracks(&[Tsf::length(10.0).into(), Tsf::length(20.0).into()], None, 0.0);
        let mut tracks = Vec::new();
        initialize_grid_tracks(
            &mut tracks,
            TrackCounts::from_raw(1, 2, 1),
            &explicit,
            &[Tsf::length(5.0)],
            LengthPercentage::length(4.0),
            |_| true,
        );

        // gutter, track, gutter, track, gutter, track, gutter, track, gutter
        assert_eq!(tracks.len(), 9);
        let kinds: Vec<GridTrackKind> = tracks.iter().map(|t| t.kind).collect();
        for (index, kind) in kinds.iter().enumerate() {
            if index % 2 == 0 {
                assert_eq!(*kind, GridTrackKind::Gutter);
            } else {
                assert_eq!(*kind, GridTrackKind::Track);
            }
        }

        // Outer gutters are zero-sized, inner gutters take the gap
        assert_eq!(tracks[0].min_track_sizing_function.definite_value(None), Some(0.0));
        assert_eq!(tracks[8].min_track_sizing_function.definite_value(None), Some(0.0));
        assert_eq!(tracks[2].min_track_sizing_function.definite_value(None), Some(4.0));

        // Implicit tracks take the auto track sizing function
        assert_eq!(tracks[1].min_track_sizing_function.definite_value(None), Some(5.0));
        assert_eq!(tracks[7].min_track_sizing_function.definite_value(None), Some(5.0));
        // Explicit tracks keep their template order
        assert_eq!(tracks[3].min_track_sizing_function.definite_value(None), Some(10.0));
        assert_eq!(tracks[5].min_track_sizing_function.definite_value(None), Some(20.0));
    }

    #[test]
    fn test_auto_fit_collapses_empty_tracks() {
        let template =
            vec![GridTemplateComponent::Repeat(GridTrackRepetition::AutoFit, vec![Tsf::length(40.0)])];
        let explicit = expand_explicit_tracks(&template, Some(120.0), 0.0);
        assert_eq!(explicit.len(), 3);
        assert!(explicit.iter().all(|t| t.collapsible));

        let mut tracks = Vec::new();
        initialize_grid_tracks(
            &mut tracks,
            TrackCounts::from_raw(0, 3, 0),
            &explicit,
            &[],
            LengthPercentage::ZERO,
            |index| index < 2,
        );

        assert!(!tracks[1].is_collapsed);
        assert!(!tracks[3].is_collapsed);
        assert!(tracks[5].is_collapsed);
        assert_eq!(tracks[5].max_track_sizing_function.definite_value(None), Some(0.0));
    }
}
