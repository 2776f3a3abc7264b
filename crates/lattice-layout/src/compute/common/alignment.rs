//! Content-distribution arithmetic shared by the flexbox and grid
//! algorithms.

use lattice_core::AlignContent;

/// Degrade a distribution keyword that cannot apply to the situation.
///
/// With a single item (or line, or track) the distributed keywords have no
/// gaps to distribute into, and with negative free space the safe variants
/// all fall back to start alignment.
pub(crate) fn apply_alignment_fallback(
    free_space: f32,
    num_items: usize,
    mut alignment_mode: AlignContent,
    mut is_safe: bool,
) -> AlignContent {
    if num_items <= 1 || free_space <= 0.0 {
        (alignment_mode, is_safe) = match alignment_mode {
            AlignContent::Stretch => (AlignContent::FlexStart, true),
            AlignContent::SpaceBetween => (AlignContent::FlexStart, true),
            AlignContent::SpaceAround => (AlignContent::Center, true),
            AlignContent::SpaceEvenly => (AlignContent::Center, true),
            _ => (alignment_mode, is_safe),
        }
    }

    if free_space <= 0.0 && is_safe {
        alignment_mode = AlignContent::Start;
    }

    alignment_mode
}

/// The gap to insert before one item in a run of aligned items.
///
/// `is_first` selects between the leading offset and the between-item
/// offset. `layout_is_reversed` flips the flex-relative keywords.
pub(crate) fn compute_alignment_offset(
    free_space: f32,
    num_items: usize,
    gap: f32,
    alignment_mode: AlignContent,
    layout_is_reversed: bool,
    is_first: bool,
) -> f32 {
    if is_first {
        match alignment_mode {
            AlignContent::Start => 0.0,
            AlignContent::FlexStart => {
                if layout_is_reversed {
                    free_space
                } else {
                    0.0
                }
            }
            AlignContent::End => free_space,
            AlignContent::FlexEnd => {
                if layout_is_reversed {
                    0.0
                } else {
                    free_space
                }
            }
            AlignContent::Center => free_space / 2.0,
            AlignContent::Stretch => 0.0,
            AlignContent::SpaceBetween => 0.0,
            AlignContent::SpaceAround => {
                if free_space >= 0.0 {
                    (free_space / num_items as f32) / 2.0
                } else {
                    free_space / 2.0
                }
            }
            AlignContent::SpaceEvenly => {
                if free_space >= 0.0 {
                    free_space / (num_items + 1) as f32
                } else {
                    free_space / 2.0
                }
            }
        }
    } else {
        gap + match alignment_mode {
            AlignContent::Start => 0.0,
            AlignContent::FlexStart => 0.0,
            AlignContent::End => 0.0,
            AlignContent::FlexEnd => 0.0,
            AlignContent::Center => 0.0,
            AlignContent::Stretch => 0.0,
            AlignContent::SpaceBetween => free_space / (num_items - 1) as f32,
            AlignContent::SpaceAround => free_space / num_items as f32,
            AlignContent::SpaceEvenly => free_space / (num_items + 1) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_between_falls_back_for_single_item() {
        let mode = apply_alignment_fallback(100.0, 1, AlignContent::SpaceBetween, false);
        assert_eq!(mode, AlignContent::FlexStart);
    }

    #[test]
    fn test_safe_center_falls_back_to_start_when_overflowing() {
        let mode = apply_alignment_fallback(-20.0, 3, AlignContent::SpaceAround, false);
        assert_eq!(mode, AlignContent::Start);
    }

    #[test]
    fn test_space_evenly_offsets() {
        // 3 items, 40 free: gaps of 10 before each item and after the last
        let first = compute_alignment_offset(40.0, 3, 0.0, AlignContent::SpaceEvenly, false, true);
        let later = compute_alignment_offset(40.0, 3, 0.0, AlignContent::SpaceEvenly, false, false);
        assert_eq!(first, 10.0);
        assert_eq!(later, 10.0);
    }

    #[test]
    fn test_flex_end_respects_reversed_axis() {
        assert_eq!(compute_alignment_offset(30.0, 2, 0.0, AlignContent::FlexEnd, true, true), 0.0);
        assert_eq!(compute_alignment_offset(30.0, 2, 0.0, AlignContent::FlexEnd, false, true), 30.0);
    }
}
