//! Per-node memoization of layout results.

use lattice_core::{AvailableSpace, Size};

use crate::compute::{LayoutOutput, RunMode};

/// The number of measure slots for each node.
const CACHE_SIZE: usize = 9;

/// A single cached result together with the constraints it was computed
/// under.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheEntry<T> {
    /// The known dimensions the result was computed with
    known_dimensions: Size<Option<f32>>,
    /// The available space the result was computed with
    available_space: Size<AvailableSpace>,
    /// The cached result
    content: T,
}

/// Memoized layout results for one node.
///
/// A node is sized several times during a single layout pass as its parent
/// probes it under different constraints, so a single slot would thrash.
/// Measure results are keyed into one of nine slots by which known
/// dimensions are set and whether the unset axes are under a min-content
/// constraint (definite and max-content constraints share a slot, since a
/// node is generally probed under one or the other but not both). The full
/// layout result has its own slot so measure probes never evict it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cache {
    /// The cached result of the node's final layout pass
    final_layout_entry: Option<CacheEntry<LayoutOutput>>,
    /// The cached results of size-only probes
    measure_entries: [Option<CacheEntry<Size<f32>>>; CACHE_SIZE],
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    /// An empty cache.
    pub const fn new() -> Self {
        Self { final_layout_entry: None, measure_entries: [None; CACHE_SIZE] }
    }

    /// The measure slot for the given constraints.
    ///
    /// Slot 0: both dimensions known. Slots 1-4: exactly one dimension
    /// known, split by which one and whether the other axis is min-content
    /// constrained. Slots 5-8: neither known, split by the min-content-ness
    /// of each axis.
    #[inline]
    fn compute_cache_slot(known_dimensions: Size<Option<f32>>, available_space: Size<AvailableSpace>) -> usize {
        use AvailableSpace::MinContent;

        let has_known_width = known_dimensions.width.is_some();
        let has_known_height = known_dimensions.height.is_some();

        if has_known_width && has_known_height {
            return 0;
        }

        if has_known_width {
            return 1 + (available_space.height == MinContent) as usize;
        }

        if has_known_height {
            return 3 + (available_space.width == MinContent) as usize;
        }

        5 + 2 * (available_space.width == MinContent) as usize + (available_space.height == MinContent) as usize
    }

    /// True if an entry computed under `entry_known`/`entry_available` with
    /// result size `cached_size` can satisfy a query for
    /// `known_dimensions`/`available_space`.
    ///
    /// A known dimension matches if it equals what the entry was keyed on,
    /// or if it equals the size the entry produced anyway. Available space
    /// only needs to match on axes whose dimension is not already known.
    #[inline]
    fn entry_matches(
        entry_known: Size<Option<f32>>,
        entry_available: Size<AvailableSpace>,
        cached_size: Size<f32>,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
    ) -> bool {
        (known_dimensions.width == entry_known.width || known_dimensions.width == Some(cached_size.width))
            && (known_dimensions.height == entry_known.height || known_dimensions.height == Some(cached_size.height))
            && (known_dimensions.width.is_some() || entry_available.width.is_roughly_equal(available_space.width))
            && (known_dimensions.height.is_some() || entry_available.height.is_roughly_equal(available_space.height))
    }

    /// Look up a cached result for the given constraints.
    #[inline]
    pub fn get(
        &self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
    ) -> Option<LayoutOutput> {
        match run_mode {
            RunMode::PerformLayout => self
                .final_layout_entry
                .filter(|entry| {
                    Self::entry_matches(
                        entry.known_dimensions,
                        entry.available_space,
                        entry.content.size,
                        known_dimensions,
                        available_space,
                    )
                })
                .map(|entry| entry.content),
            RunMode::ComputeSize => {
                for entry in self.measure_entries.iter().flatten() {
                    if Self::entry_matches(
                        entry.known_dimensions,
                        entry.available_space,
                        entry.content,
                        known_dimensions,
                        available_space,
                    ) {
                        return Some(LayoutOutput::from_outer_size(entry.content));
                    }
                }
                None
            }
            RunMode::PerformHiddenLayout => None,
        }
    }

    /// Store a computed result under the given constraints.
    pub fn store(
        &mut self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
        layout_output: LayoutOutput,
    ) {
        match run_mode {
            RunMode::PerformLayout => {
                self.final_layout_entry = Some(CacheEntry { known_dimensions, available_space, content: layout_output });
            }
            RunMode::ComputeSize => {
                let slot = Self::compute_cache_slot(known_dimensions, available_space);
                self.measure_entries[slot] =
                    Some(CacheEntry { known_dimensions, available_space, content: layout_output.size });
            }
            RunMode::PerformHiddenLayout => {}
        }
    }

    /// Drop every cached result.
    pub fn clear(&mut self) {
        self.final_layout_entry = None;
        self.measure_entries = [None; CACHE_SIZE];
    }

    /// True if no result is cached.
    pub fn is_empty(&self) -> bool {
        self.final_layout_entry.is_none() && self.measure_entries.iter().all(|entry| entry.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::Point;

    fn probe(width: AvailableSpace, height: AvailableSpace) -> Size<AvailableSpace> {
        Size { width, height }
    }

    #[test]
    fn test_slots_are_distinct() {
        use AvailableSpace::{MaxContent, MinContent};
        let none = Size::NONE;
        let known_width = Size { width: Some(10.0), height: None };
        let known_height = Size { width: None, height: Some(10.0) };
        let known_both = Size { width: Some(10.0), height: Some(10.0) };

        let slots = [
            Cache::compute_cache_slot(known_both, probe(MaxContent, MaxContent)),
            Cache::compute_cache_slot(known_width, probe(MaxContent, MaxContent)),
            Cache::compute_cache_slot(known_width, probe(MaxContent, MinContent)),
            Cache::compute_cache_slot(known_height, probe(MaxContent, MaxContent)),
            Cache::compute_cache_slot(known_height, probe(MinContent, MaxContent)),
            Cache::compute_cache_slot(none, probe(MaxContent, MaxContent)),
            Cache::compute_cache_slot(none, probe(MaxContent, MinContent)),
            Cache::compute_cache_slot(none, probe(MinContent, MaxContent)),
            Cache::compute_cache_slot(none, probe(MinContent, MinContent)),
        ];
        assert_eq!(slots, [0, 1, 2, 3, 4, 5, 6, 7, 8]);

        // Definite shares a slot with max-content
        assert_eq!(Cache::compute_cache_slot(none, probe(AvailableSpace::Definite(5.0), MaxContent)), 5);
    }

    #[test]
    fn test_store_and_get_roundtrip() {
        let mut cache = Cache::new();
        let known = Size { width: Some(100.0), height: None };
        let space = Size::MAX_CONTENT;
        let output = LayoutOutput::from_outer_size(Size::new(100.0, 40.0));

        assert!(cache.get(known, space, RunMode::ComputeSize).is_none());
        cache.store(known, space, RunMode::ComputeSize, output);
        let hit = cache.get(known, space, RunMode::ComputeSize).unwrap();
        assert_eq!(hit.size, Size::new(100.0, 40.0));

        // A measure probe never satisfies a layout query
        assert!(cache.get(known, space, RunMode::PerformLayout).is_none());
    }

    #[test]
    fn test_known_dimension_matching_cached_size_hits() {
        let mut cache = Cache::new();
        let space = Size::MAX_CONTENT;
        cache.store(Size::NONE, space, RunMode::ComputeSize, LayoutOutput::from_outer_size(Size::new(50.0, 20.0)));

        // Asking with the produced size as a known dimension reuses the entry
        let known = Size { width: Some(50.0), height: None };
        assert!(cache.get(known, space, RunMode::ComputeSize).is_some());

        let mismatched = Size { width: Some(51.0), height: None };
        assert!(cache.get(mismatched, space, RunMode::ComputeSize).is_none());
    }

    #[test]
    fn test_hidden_mode_bypasses_cache() {
        let mut cache = Cache::new();
        let output = LayoutOutput {
            size: Size::new(10.0, 10.0),
            content_size: Size::<f32>::ZERO,
            first_baselines: Point::NONE,
        };
        cache.store(Size::NONE, Size::MAX_CONTENT, RunMode::PerformHiddenLayout, output);
        assert!(cache.is_empty());
        assert!(cache.get(Size::NONE, Size::MAX_CONTENT, RunMode::PerformHiddenLayout).is_none());
    }

    #[test]
    fn test_clear() {
        let mut cache = Cache::new();
        cache.store(
            Size::NONE,
            Size::MAX_CONTENT,
            RunMode::ComputeSize,
            LayoutOutput::from_outer_size(Size::new(1.0, 1.0)),
        );
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
