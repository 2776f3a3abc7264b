//! End-to-end layout tests exercising the public tree API across the
//! block, flexbox, and grid algorithms.

use lattice_core::{
    AlignContent, AvailableSpace, Dimension, Display, GridTemplateComponent, LengthPercentage, NodeId, Rect,
    Size, Style, TrackSizingFunction,
};
use lattice_layout::LayoutTree;

fn length(value: f32) -> Dimension {
    Dimension::Length(value)
}

#[test]
fn test_block_children_stack_in_order() {
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let a = tree
        .new_leaf(Style { size: Size { width: length(100.0), height: length(20.0) }, ..Default::default() })
        .unwrap();
    let b = tree
        .new_leaf(Style { size: Size { width: length(100.0), height: length(30.0) }, ..Default::default() })
        .unwrap();
    let root = tree
        .new_with_children(
            Style { display: Display::Block, size: Size::<Dimension>::from_lengths(100.0, 50.0), ..Default::default() },
            &[a, b],
        )
        .unwrap();

    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert_eq!(tree.layout(a).unwrap().location.y, 0.0);
    assert_eq!(tree.layout(b).unwrap().location.y, 20.0);
}

#[test]
fn test_flex_grow_fills_the_row() {
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let fixed = tree
        .new_leaf(Style { size: Size { width: length(40.0), height: length(10.0) }, ..Default::default() })
        .unwrap();
    let grower = tree.new_leaf(Style { flex_grow: 1.0, ..Default::default() }).unwrap();
    let root = tree
        .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 10.0), ..Default::default() }, &[fixed, grower])
        .unwrap();

    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert_eq!(tree.layout(fixed).unwrap().size.width, 40.0);
    assert_eq!(tree.layout(grower).unwrap().size.width, 60.0);
    assert_eq!(tree.layout(grower).unwrap().location.x, 40.0);
}

#[test]
fn test_grid_inside_flex() {
    // Display mode governs a node's children only; the grid container
    // itself still participates in its parent's flex row.
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let cell_a = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(30.0, 10.0), ..Default::default() }).unwrap();
    let cell_b = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(30.0, 10.0), ..Default::default() }).unwrap();
    let grid = tree
        .new_with_children(
            Style {
                display: Display::Grid,
                grid_template_columns: vec![
                    GridTemplateComponent::Single(TrackSizingFunction::length(30.0)),
                    GridTemplateComponent::Single(TrackSizingFunction::length(30.0)),
                ],
                ..Default::default()
            },
            &[cell_a, cell_b],
        )
        .unwrap();
    let sibling = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(20.0, 10.0), ..Default::default() }).unwrap();
    let root = tree
        .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 10.0), ..Default::default() }, &[sibling, grid])
        .unwrap();

    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert_eq!(tree.layout(grid).unwrap().location.x, 20.0);
    assert_eq!(tree.layout(grid).unwrap().size.width, 60.0);
    assert_eq!(tree.layout(cell_b).unwrap().location.x, 30.0);
}

#[test]
fn test_display_none_subtree_is_zeroed() {
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let inner = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(50.0, 50.0), ..Default::default() }).unwrap();
    let hidden = tree
        .new_with_children(
            Style { display: Display::None, size: Size::<Dimension>::from_lengths(50.0, 50.0), ..Default::default() },
            &[inner],
        )
        .unwrap();
    let visible = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(20.0, 20.0), ..Default::default() }).unwrap();
    let root = tree.new_with_children(Style::default(), &[hidden, visible]).unwrap();

    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert_eq!(tree.layout(root).unwrap().size, Size::new(20.0, 20.0));
    assert_eq!(tree.layout(hidden).unwrap().size, Size::<f32>::ZERO);
    assert_eq!(tree.layout(inner).unwrap().size, Size::<f32>::ZERO);
    assert_eq!(tree.layout(visible).unwrap().location.x, 0.0);
}

#[test]
fn test_measured_leaf_wraps_to_known_width() {
    // A text-like measure: a fixed content area reflowed into whatever
    // width the algorithm offers.
    const AREA: f32 = 50.0 * 40.0;
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let text = tree
        .new_leaf_with_context(Style { size: Size { width: length(50.0), height: Dimension::Auto }, ..Default::default() }, ())
        .unwrap();
    let root = tree.new_with_children(Style::default(), &[text]).unwrap();

    tree.compute_layout_with_measure(
        root,
        Size::MAX_CONTENT,
        |known: Size<Option<f32>>, _: Size<AvailableSpace>, _: NodeId, _: Option<&mut ()>, _: &Style| {
            let width = known.width.unwrap_or(50.0);
            Size { width, height: known.height.unwrap_or(AREA / width) }
        },
    )
    .unwrap();

    assert_eq!(tree.layout(text).unwrap().size, Size::new(50.0, 40.0));
}

#[test]
fn test_flex_clamping_terminates_and_respects_bounds() {
    // Many items competing for space with conflicting min/max clamps. The
    // freeze-and-redistribute loop must settle with every clamp honored.
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let mut children = Vec::new();
    for i in 0..16 {
        let min = 5.0 + i as f32;
        let max = 20.0 + i as f32;
        children.push(
            tree.new_leaf(Style {
                flex_grow: 1.0 + (i % 3) as f32,
                flex_shrink: 1.0,
                min_size: Size { width: length(min), height: Dimension::Auto },
                max_size: Size { width: length(max), height: Dimension::Auto },
                ..Default::default()
            })
            .unwrap(),
        );
    }
    let root = tree
        .new_with_children(Style { size: Size::<Dimension>::from_lengths(300.0, 20.0), ..Default::default() }, &children)
        .unwrap();

    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    for (i, child) in children.iter().enumerate() {
        let width = tree.layout(*child).unwrap().size.width;
        assert!(width >= 5.0 + i as f32 - 0.001);
        assert!(width <= 20.0 + i as f32 + 0.001);
    }
}

#[test]
fn test_centered_fractional_siblings_stay_flush_after_rounding() {
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let child_style = Style { size: Size::<Dimension>::from_lengths(100.3, 100.3), ..Default::default() };
    let a = tree.new_leaf(child_style.clone()).unwrap();
    let b = tree.new_leaf(child_style).unwrap();
    let root = tree
        .new_with_children(
            Style {
                justify_content: Some(AlignContent::Center),
                size: Size::<Dimension>::from_lengths(963.3333, 1000.0),
                ..Default::default()
            },
            &[a, b],
        )
        .unwrap();

    tree.compute_layout(root, Size::<AvailableSpace>::from_lengths(963.3333, 1000.0)).unwrap();
    let la = tree.layout(a).unwrap();
    let lb = tree.layout(b).unwrap();
    assert_eq!(la.location.x + la.size.width, lb.location.x);
}

#[test]
fn test_layout_survives_child_list_mutation() {
    let mut tree: LayoutTree<()> = LayoutTree::new();
    let a = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(10.0, 10.0), ..Default::default() }).unwrap();
    let b = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(10.0, 10.0), ..Default::default() }).unwrap();
    let root = tree.new_with_children(Style::default(), &[a]).unwrap();

    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert_eq!(tree.layout(root).unwrap().size.width, 10.0);

    tree.add_child(root, b).unwrap();
    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert_eq!(tree.layout(root).unwrap().size.width, 20.0);

    tree.remove_child(root, a).unwrap();
    tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
    assert_eq!(tree.layout(root).unwrap().size.width, 10.0);
    assert_eq!(tree.layout(b).unwrap().location.x, 0.0);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rounded sibling edges never open a gap or overlap, whatever the
        /// fractional widths involved.
        #[test]
        fn rounded_siblings_stay_flush(
            w1 in 0.1f32..400.0,
            w2 in 0.1f32..400.0,
            parent in 100.0f32..1000.0,
        ) {
            let mut tree: LayoutTree<()> = LayoutTree::new();
            let a = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(w1, 10.0), ..Default::default() }).unwrap();
            let b = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(w2, 10.0), ..Default::default() }).unwrap();
            let root = tree
                .new_with_children(
                    Style {
                        justify_content: Some(AlignContent::Center),
                        size: Size::<Dimension>::from_lengths(parent, 10.0),
                        ..Default::default()
                    },
                    &[a, b],
                )
                .unwrap();

            tree.compute_layout(root, Size::<AvailableSpace>::from_lengths(parent, 10.0)).unwrap();
            let la = *tree.layout(a).unwrap();
            let lb = *tree.layout(b).unwrap();
            prop_assert_eq!(la.location.x + la.size.width, lb.location.x);
            prop_assert_eq!(la.size.width.fract(), 0.0);
            prop_assert_eq!(lb.size.width.fract(), 0.0);
        }

        /// Recomputing an unchanged tree reproduces the identical layout.
        #[test]
        fn relayout_is_idempotent(
            width in 0.0f32..500.0,
            height in 0.0f32..500.0,
            pad in 0.0f32..40.0,
        ) {
            let mut tree: LayoutTree<()> = LayoutTree::new();
            let child = tree
                .new_leaf(Style {
                    size: Size::<Dimension>::from_lengths(width, height),
                    padding: Rect::uniform(LengthPercentage::Length(pad)),
                    ..Default::default()
                })
                .unwrap();
            let root = tree.new_with_children(Style::default(), &[child]).unwrap();

            tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
            let first = *tree.layout(child).unwrap();
            tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
            prop_assert_eq!(*tree.layout(child).unwrap(), first);
        }

        /// A node's used size never dips below its padding plus border on
        /// either axis.
        #[test]
        fn size_is_floored_by_padding_and_border(
            width in 0.0f32..100.0,
            pad in 0.0f32..60.0,
            border in 0.0f32..60.0,
        ) {
            let mut tree: LayoutTree<()> = LayoutTree::new();
            let node = tree
                .new_leaf(Style {
                    size: Size { width: Dimension::Length(width), height: Dimension::Auto },
                    padding: Rect::uniform(LengthPercentage::Length(pad)),
                    border: Rect::uniform(LengthPercentage::Length(border)),
                    ..Default::default()
                })
                .unwrap();

            tree.disable_rounding();
            tree.compute_layout(node, Size::MAX_CONTENT).unwrap();
            let layout = tree.layout(node).unwrap();
            prop_assert!(layout.size.width >= 2.0 * (pad + border) - 0.001);
            prop_assert!(layout.size.height >= 2.0 * (pad + border) - 0.001);
        }
    }
}
