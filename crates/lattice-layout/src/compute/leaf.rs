//! Sizing for nodes with no children.
//!
//! A leaf's size comes from its styles where they are definite and from
//! its measure function otherwise. Nodes without a context value never
//! invoke the measure function and fall back to style-only sizing.

use lattice_core::{BoxSizing, MaybeMath, Point, Size};

use crate::compute::{LayoutInput, LayoutOutput, SizingMode};
use crate::measure::Measure;
use crate::tree::LayoutTree;
use lattice_core::NodeId;

pub(crate) fn compute_leaf_layout<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let LayoutInput { known_dimensions, parent_size, available_space, sizing_mode, .. } = inputs;
    let style = &tree.node(node).style;

    // In ContentSize mode the node's own size styles are ignored; the
    // caller wants a pure content measurement.
    let (node_size, node_min_size, node_max_size, aspect_ratio) = match sizing_mode {
        SizingMode::ContentSize => (known_dimensions, Size::NONE, Size::NONE, None),
        SizingMode::InherentSize => {
            let aspect_ratio = style.aspect_ratio;
            let box_sizing_adjustment = if style.box_sizing == BoxSizing::ContentBox {
                let padding = style.padding.resolve_or_zero(parent_size.width);
                let border = style.border.resolve_or_zero(parent_size.width);
                (padding + border).sum_axes()
            } else {
                Size::<f32>::ZERO
            };
            let style_size = style
                .size
                .maybe_resolve(parent_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_add(box_sizing_adjustment);
            let style_min_size = style
                .min_size
                .maybe_resolve(parent_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_add(box_sizing_adjustment);
            let style_max_size = style
                .max_size
                .maybe_resolve(parent_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_add(box_sizing_adjustment);

            (known_dimensions.or(style_size), style_min_size, style_max_size, aspect_ratio)
        }
    };

    // All percentage padding and borders resolve against the containing
    // block's inline size, vertical edges included. This matches CSS.
    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border = padding + border;
    let pb_sum = padding_border.sum_axes();

    // Both dimensions pinned: no measurement needed
    if let Size { width: Some(width), height: Some(height) } = node_size {
        let size = Size { width, height }.maybe_clamp(node_min_size, node_max_size).f32_max(pb_sum);
        return LayoutOutput { size, content_size: size, first_baselines: Point::NONE };
    }

    if tree.node(node).context.is_some() {
        let available_space = Size {
            width: available_space
                .width
                .maybe_sub(margin.horizontal_axis_sum())
                .maybe_set(node_size.width)
                .maybe_set(node_max_size.width)
                .map_definite_value(|size| size.maybe_clamp(node_min_size.width, node_max_size.width)),
            height: available_space
                .height
                .maybe_sub(margin.vertical_axis_sum())
                .maybe_set(node_size.height)
                .maybe_set(node_max_size.height)
                .map_definite_value(|size| size.maybe_clamp(node_min_size.height, node_max_size.height)),
        };

        let measured_size = tree.measure_node(measure, node, known_dimensions, available_space);
        let measured_size = Size {
            width: measured_size.width,
            height: measured_size
                .height
                .max(aspect_ratio.map(|ratio| measured_size.width / ratio).unwrap_or(0.0)),
        };

        let size = node_size.unwrap_or(measured_size).maybe_clamp(node_min_size, node_max_size).f32_max(pb_sum);
        let content_size = measured_size.f32_max(pb_sum);
        return LayoutOutput { size, content_size, first_baselines: Point::NONE };
    }

    // No content to measure: style alone determines the size, floored by
    // the resolved padding and border
    let size = Size {
        width: node_size
            .width
            .unwrap_or(0.0)
            .maybe_clamp(node_min_size.width, node_max_size.width)
            .max(padding_border.horizontal_axis_sum()),
        height: node_size
            .height
            .unwrap_or(0.0)
            .maybe_clamp(node_min_size.height, node_max_size.height)
            .max(padding_border.vertical_axis_sum()),
    };

    let size = Size {
        width: size.width.max(aspect_ratio.map(|ratio| size.height * ratio).unwrap_or(0.0)),
        height: size.height.max(aspect_ratio.map(|ratio| size.width / ratio).unwrap_or(0.0)),
    };

    LayoutOutput { size, content_size: size, first_baselines: Point::NONE }
}

#[cfg(test)]
mod tests {
    use crate::tree::LayoutTree;
    use lattice_core::{AvailableSpace, Dimension, LengthPercentage, Rect, Size, Style};

    #[test]
    fn test_styled_leaf_uses_style_size() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let node = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(40.0, 30.0), ..Default::default() }).unwrap();
        tree.compute_layout(node, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(node).unwrap().size, Size::new(40.0, 30.0));
    }

    #[test]
    fn test_padding_border_floor_single_edge() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let node = tree
            .new_leaf(Style {
                border: Rect {
                    left: LengthPercentage::length(10.0),
                    right: LengthPercentage::ZERO,
                    top: LengthPercentage::ZERO,
                    bottom: LengthPercentage::ZERO,
                },
                ..Default::default()
            })
            .unwrap();
        tree.compute_layout(node, Size::MAX_CONTENT).unwrap();
        let layout = tree.layout(node).unwrap();
        // Width is floored by the border edge; the unpadded axis stays zero
        assert_eq!(layout.size, Size::new(10.0, 0.0));
        assert_eq!(layout.size.width * layout.size.height, 0.0);
    }

    #[test]
    fn test_percentage_padding_resolves_against_width_basis() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let node = tree
            .new_leaf(Style {
                padding: Rect {
                    left: LengthPercentage::percent(1.0),
                    right: LengthPercentage::ZERO,
                    top: LengthPercentage::percent(1.0),
                    bottom: LengthPercentage::ZERO,
                },
                ..Default::default()
            })
            .unwrap();
        tree.compute_layout(node, Size::<AvailableSpace>::from_lengths(200.0, 100.0)).unwrap();
        // Both edges resolve against the inline basis of 200
        assert_eq!(tree.layout(node).unwrap().size, Size::new(200.0, 200.0));
    }

    #[test]
    fn test_measured_leaf() {
        let mut tree: LayoutTree<Size<f32>> = LayoutTree::new();
        let node = tree.new_leaf_with_context(Style::default(), Size::new(120.0, 35.0)).unwrap();
        tree.compute_layout_with_measure(
            node,
            Size::MAX_CONTENT,
            |known: Size<Option<f32>>, _space: Size<AvailableSpace>, _id, ctx: Option<&mut Size<f32>>, _style: &Style| {
                let wanted = ctx.map(|size| *size).unwrap_or(Size::<f32>::ZERO);
                Size { width: known.width.unwrap_or(wanted.width), height: known.height.unwrap_or(wanted.height) }
            },
        )
        .unwrap();
        assert_eq!(tree.layout(node).unwrap().size, Size::new(120.0, 35.0));
    }

    #[test]
    fn test_root_without_size_is_zero_under_definite_space() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let node = tree.new_leaf(Style::default()).unwrap();
        tree.compute_layout(node, Size::<AvailableSpace>::from_lengths(100.0, 100.0)).unwrap();
        assert_eq!(tree.layout(node).unwrap().size, Size::<f32>::ZERO);
    }
}
