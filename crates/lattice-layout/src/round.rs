//! Pixel rounding of computed layouts.
//!
//! Rounding parent-relative widths directly lets neighbouring edges drift
//! apart by a pixel, so instead each node's absolute edges are rounded and
//! the rounded extents are taken as differences. Reading from the retained
//! unrounded layouts means repeated passes never compound error.

use lattice_core::NodeId;

use crate::tree::LayoutTree;

/// Round the subtree's unrounded layouts into the final layouts.
pub(crate) fn round_layout<Ctx>(tree: &mut LayoutTree<Ctx>, node: NodeId) {
    round_subtree(tree, node, 0.0, 0.0);
}

fn round_subtree<Ctx>(tree: &mut LayoutTree<Ctx>, node: NodeId, cumulative_x: f32, cumulative_y: f32) {
    let unrounded = tree.node(node).unrounded_layout;
    let mut layout = unrounded;

    let cumulative_x = cumulative_x + unrounded.location.x;
    let cumulative_y = cumulative_y + unrounded.location.y;

    layout.location.x = unrounded.location.x.round();
    layout.location.y = unrounded.location.y.round();
    layout.size.width = (cumulative_x + unrounded.size.width).round() - cumulative_x.round();
    layout.size.height = (cumulative_y + unrounded.size.height).round() - cumulative_y.round();
    layout.content_size.width = (cumulative_x + unrounded.content_size.width).round() - cumulative_x.round();
    layout.content_size.height = (cumulative_y + unrounded.content_size.height).round() - cumulative_y.round();
    layout.scrollbar_size.width = unrounded.scrollbar_size.width.round();
    layout.scrollbar_size.height = unrounded.scrollbar_size.height.round();
    layout.border.left = (cumulative_x + unrounded.border.left).round() - cumulative_x.round();
    layout.border.right = (cumulative_x + unrounded.size.width).round()
        - (cumulative_x + unrounded.size.width - unrounded.border.right).round();
    layout.border.top = (cumulative_y + unrounded.border.top).round() - cumulative_y.round();
    layout.border.bottom = (cumulative_y + unrounded.size.height).round()
        - (cumulative_y + unrounded.size.height - unrounded.border.bottom).round();
    layout.padding.left = (cumulative_x + unrounded.padding.left).round() - cumulative_x.round();
    layout.padding.right = (cumulative_x + unrounded.size.width).round()
        - (cumulative_x + unrounded.size.width - unrounded.padding.right).round();
    layout.padding.top = (cumulative_y + unrounded.padding.top).round() - cumulative_y.round();
    layout.padding.bottom = (cumulative_y + unrounded.size.height).round()
        - (cumulative_y + unrounded.size.height - unrounded.padding.bottom).round();

    tree.node_mut(node).final_layout = layout;

    for child in tree.child_ids(node) {
        round_subtree(tree, child, cumulative_x, cumulative_y);
    }
}

/// Publish the unrounded layouts unchanged, for trees with rounding
/// disabled.
pub(crate) fn copy_unrounded_layout<Ctx>(tree: &mut LayoutTree<Ctx>, node: NodeId) {
    let data = tree.node_mut(node);
    data.final_layout = data.unrounded_layout;
    for child in tree.child_ids(node) {
        copy_unrounded_layout(tree, child);
    }
}

#[cfg(test)]
mod tests {
    use lattice_core::{AlignContent, Dimension, Size, Style};

    use crate::tree::LayoutTree;

    #[test]
    fn test_sibling_edges_stay_flush() {
        // Three 100.3-wide children centered in a fractional-width parent.
        // Rounding each width independently would open or overlap seams.
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child_style = Style {
            size: Size { width: Dimension::Length(100.3), height: Dimension::Length(50.0) },
            ..Default::default()
        };
        let a = tree.new_leaf(child_style.clone()).unwrap();
        let b = tree.new_leaf(child_style.clone()).unwrap();
        let c = tree.new_leaf(child_style).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    display: lattice_core::Display::Flex,
                    justify_content: Some(AlignContent::Center),
                    size: Size { width: Dimension::Length(963.3333), height: Dimension::Length(50.0) },
                    ..Default::default()
                },
                &[a, b, c],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        let la = *tree.layout(a).unwrap();
        let lb = *tree.layout(b).unwrap();
        let lc = *tree.layout(c).unwrap();
        assert_eq!(la.location.x + la.size.width, lb.location.x);
        assert_eq!(lb.location.x + lb.size.width, lc.location.x);
        assert_eq!(la.size.width + lb.size.width + lc.size.width, 301.0);
        assert_eq!(la.size.width.fract(), 0.0);
        assert_eq!(lb.size.width.fract(), 0.0);
    }

    #[test]
    fn test_repeated_rounding_does_not_drift() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(Style {
                size: Size { width: Dimension::Length(33.3), height: Dimension::Length(33.3) },
                ..Default::default()
            })
            .unwrap();
        let root = tree.new_with_children(Style::default(), &[child]).unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        let first = *tree.layout(child).unwrap();
        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(*tree.layout(child).unwrap(), first);
    }

    #[test]
    fn test_disable_rounding_reports_exact_values() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        tree.disable_rounding();
        let node = tree
            .new_leaf(Style {
                size: Size { width: Dimension::Length(10.7), height: Dimension::Length(5.2) },
                ..Default::default()
            })
            .unwrap();
        tree.compute_layout(node, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(node).unwrap().size, Size::new(10.7, 5.2));
    }
}
