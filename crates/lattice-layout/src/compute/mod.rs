//! The layout algorithms and the dispatch machinery that drives them.
//!
//! Every node is laid out through [`compute_child_layout`], which consults
//! the node's cache and then hands off to the algorithm selected by the
//! node's `display` style. Containers recurse into their children through
//! the same entry point, so caching and dispatch behave identically at
//! every level of the tree.

pub(crate) mod block;
pub(crate) mod common;
pub(crate) mod flexbox;
pub(crate) mod grid;
pub(crate) mod leaf;

use lattice_core::{AvailableSpace, BoxSizing, Display, Layout, MaybeMath, NodeId, Overflow, Point, Size};

use crate::measure::Measure;
use crate::tree::LayoutTree;

/// Whether a layout pass must produce a full layout or only a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Compute sizes and positions and store layouts for the whole subtree
    PerformLayout,
    /// Compute the node's size only; positions need not be valid and
    /// descendant layouts need not be stored
    ComputeSize,
    /// Store zero-sized layouts for the whole subtree
    PerformHiddenLayout,
}

/// Whether a node's own size styles participate in sizing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
    /// Ignore the node's `size`/`min_size`/`max_size` styles; the caller
    /// wants a pure content measurement
    ContentSize,
    /// Apply the node's size styles as usual
    InherentSize,
}

/// The constraints a parent passes down when sizing or laying out a child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    /// Whether to produce a full layout or only a size
    pub run_mode: RunMode,
    /// Whether the node's own size styles apply
    pub sizing_mode: SizingMode,
    /// Dimensions already fixed by the caller; the output must match these
    /// exactly where set
    pub known_dimensions: Size<Option<f32>>,
    /// The parent's content-box size, used as the percentage basis
    pub parent_size: Size<Option<f32>>,
    /// The space the node may lay out into
    pub available_space: Size<AvailableSpace>,
}

impl LayoutInput {
    /// The input used for the subtree of a `Display::None` node.
    pub const HIDDEN: Self = Self {
        run_mode: RunMode::PerformHiddenLayout,
        sizing_mode: SizingMode::InherentSize,
        known_dimensions: Size::NONE,
        parent_size: Size::NONE,
        available_space: Size::MAX_CONTENT,
    };
}

/// What a layout pass reports back up to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOutput {
    /// The node's border-box size
    pub size: Size<f32>,
    /// The extent of the node's content, which may exceed `size`
    pub content_size: Size<f32>,
    /// First-baseline positions, where the algorithm produces them
    pub first_baselines: Point<Option<f32>>,
}

impl LayoutOutput {
    /// The output of a hidden node.
    pub const HIDDEN: Self = Self { size: Size::<f32>::ZERO, content_size: Size::<f32>::ZERO, first_baselines: Point::NONE };

    /// An output with the given size, no tracked content, and no baselines.
    pub fn from_outer_size(size: Size<f32>) -> Self {
        Self { size, content_size: Size::<f32>::ZERO, first_baselines: Point::NONE }
    }

    /// An output carrying size, content size, and baselines.
    pub fn from_sizes_and_baselines(
        size: Size<f32>,
        content_size: Size<f32>,
        first_baselines: Point<Option<f32>>,
    ) -> Self {
        Self { size, content_size, first_baselines }
    }
}

/// Lay out the root of a tree.
///
/// Block-display roots stretch-fit their width to a definite available
/// space the way an in-flow block child would; all other roots size purely
/// from style and content.
pub(crate) fn compute_root_layout<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    root: NodeId,
    available_space: Size<AvailableSpace>,
) {
    let mut known_dimensions = Size::NONE;
    let parent_size = available_space.into_options();
    let style = tree.node(root).style.clone();

    if style.display == Display::Block {
        let aspect_ratio = style.aspect_ratio;
        let margin = style.margin.resolve_or_zero(parent_size.width);
        let padding = style.padding.resolve_or_zero(parent_size.width);
        let border = style.border.resolve_or_zero(parent_size.width);
        let padding_border_size = (padding + border).sum_axes();
        let box_sizing_adjustment =
            if style.box_sizing == BoxSizing::ContentBox { padding_border_size } else { Size::<f32>::ZERO };

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
        let clamped_style_size = style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment)
            .maybe_clamp(min_size, max_size);

        // A min bound at or above the max bound fixes the size outright
        let min_max_definite_size = min_size.zip_map(max_size, |min, max| match (min, max) {
            (Some(min), Some(max)) if max <= min => Some(min),
            _ => None,
        });

        let available_space_based_size = Size {
            width: available_space.width.into_option().maybe_sub(margin.horizontal_axis_sum()),
            height: None,
        };

        known_dimensions = known_dimensions
            .or(min_max_definite_size)
            .or(clamped_style_size)
            .or(available_space_based_size)
            .maybe_max(padding_border_size);
    }

    let output = compute_child_layout(
        tree,
        measure,
        root,
        LayoutInput {
            run_mode: RunMode::PerformLayout,
            sizing_mode: SizingMode::InherentSize,
            known_dimensions,
            parent_size,
            available_space,
        },
    );

    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let margin = style.margin.resolve_or_zero(parent_size.width);
    let scrollbar_size = Size {
        width: if style.overflow.y == Overflow::Scroll { style.scrollbar_width } else { 0.0 },
        height: if style.overflow.x == Overflow::Scroll { style.scrollbar_width } else { 0.0 },
    };

    tree.set_unrounded_layout(
        root,
        Layout {
            order: 0,
            location: Point::ZERO,
            size: output.size,
            content_size: output.content_size,
            scrollbar_size,
            padding,
            border,
            margin,
        },
    );
}

/// Size or lay out one node, consulting its cache first.
///
/// This is the recursion point all container algorithms call for each of
/// their children.
pub(crate) fn compute_child_layout<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    if inputs.run_mode == RunMode::PerformHiddenLayout {
        return compute_hidden_layout(tree, node);
    }

    let cached = tree.node(node).cache.get(inputs.known_dimensions, inputs.available_space, inputs.run_mode);
    if let Some(output) = cached {
        return output;
    }

    let display = tree.node(node).style.display;
    let has_children = !tree.node(node).children.is_empty();
    let output = match (display, has_children) {
        (Display::None, _) => compute_hidden_layout(tree, node),
        (Display::Block, true) => block::compute_block_layout(tree, measure, node, inputs),
        (Display::Flex, true) => flexbox::compute_flexbox_layout(tree, measure, node, inputs),
        (Display::Grid, true) => grid::compute_grid_layout(tree, measure, node, inputs),
        (_, false) => leaf::compute_leaf_layout(tree, measure, node, inputs),
    };

    tree.node_mut(node).cache.store(inputs.known_dimensions, inputs.available_space, inputs.run_mode, output);
    output
}

/// Store zeroed layouts for a node and its whole subtree.
pub(crate) fn compute_hidden_layout<Ctx>(tree: &mut LayoutTree<Ctx>, node: NodeId) -> LayoutOutput {
    tree.node_mut(node).cache.clear();
    tree.set_unrounded_layout(node, Layout::with_order(0));

    for child in tree.child_ids(node) {
        hide_subtree(tree, child);
    }

    LayoutOutput::HIDDEN
}

fn hide_subtree<Ctx>(tree: &mut LayoutTree<Ctx>, node: NodeId) {
    tree.node_mut(node).cache.clear();
    tree.set_unrounded_layout(node, Layout::with_order(0));
    for child in tree.child_ids(node) {
        hide_subtree(tree, child);
    }
}

/// Probe a child for its size under the given constraints.
#[allow(clippy::too_many_arguments)]
pub(crate) fn measure_child_size<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    sizing_mode: SizingMode,
) -> Size<f32> {
    compute_child_layout(
        tree,
        measure,
        node,
        LayoutInput { run_mode: RunMode::ComputeSize, sizing_mode, known_dimensions, parent_size, available_space },
    )
    .size
}

/// Fully lay out a child under the given constraints.
#[allow(clippy::too_many_arguments)]
pub(crate) fn perform_child_layout<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    sizing_mode: SizingMode,
) -> LayoutOutput {
    compute_child_layout(
        tree,
        measure,
        node,
        LayoutInput { run_mode: RunMode::PerformLayout, sizing_mode, known_dimensions, parent_size, available_space },
    )
}

/// A child's contribution to its parent's content size.
///
/// Only `Overflow::Visible` axes propagate overflowing content; on other
/// axes the child contributes its border box.
pub(crate) fn compute_content_size_contribution(
    location: Point<f32>,
    size: Size<f32>,
    content_size: Size<f32>,
    overflow: Point<Overflow>,
) -> Size<f32> {
    let size_contribution = Size {
        width: match overflow.x {
            Overflow::Visible => size.width.max(content_size.width),
            _ => size.width,
        },
        height: match overflow.y {
            Overflow::Visible => size.height.max(content_size.height),
            _ => size.height,
        },
    };
    if size_contribution.width > 0.0 && size_contribution.height > 0.0 {
        Size { width: location.x + size_contribution.width, height: location.y + size_contribution.height }
    } else {
        Size::<f32>::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::LayoutTree;
    use lattice_core::{Dimension, Style};

    #[test]
    fn test_hidden_layout_zeroes_subtree() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let sized = Style { size: Size::<Dimension>::from_lengths(50.0, 50.0), ..Default::default() };

        let grandchild_a = tree.new_leaf(sized.clone()).unwrap();
        let grandchild_b = tree.new_leaf(sized.clone()).unwrap();
        let child = tree.new_with_children(sized.clone(), &[grandchild_a, grandchild_b]).unwrap();
        let root = tree
            .new_with_children(
                Style { display: Display::None, size: Size::<Dimension>::from_lengths(50.0, 50.0), ..Default::default() },
                &[child],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        for node in [root, child, grandchild_a, grandchild_b] {
            let layout = tree.layout(node).unwrap();
            assert_eq!(layout.size, Size::<f32>::ZERO);
            assert_eq!(layout.location, Point::ZERO);
        }
    }

    #[test]
    fn test_content_size_contribution_clipping() {
        let location = Point { x: 10.0, y: 10.0 };
        let size = Size::new(20.0, 20.0);
        let content = Size::new(100.0, 100.0);

        let visible = Point { x: Overflow::Visible, y: Overflow::Visible };
        assert_eq!(compute_content_size_contribution(location, size, content, visible), Size::new(110.0, 110.0));

        let hidden = Point { x: Overflow::Hidden, y: Overflow::Hidden };
        assert_eq!(compute_content_size_contribution(location, size, content, hidden), Size::new(30.0, 30.0));
    }
}
