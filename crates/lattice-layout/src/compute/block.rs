//! The block layout algorithm.
//!
//! Children are stacked top to bottom in source order. Every child's
//! vertical margins contribute fully to the flow; adjoining margins are
//! never collapsed. In-flow children stretch-fit the container's inner
//! width unless they have a definite width of their own.

use lattice_core::{
    AvailableSpace, BoxSizing, Display, Layout, LengthPercentageAuto, MaybeMath, NodeId, Overflow, Point, Position,
    Rect, Size, TextAlign,
};

use crate::compute::{
    compute_child_layout, compute_content_size_contribution, measure_child_size, perform_child_layout, LayoutInput,
    LayoutOutput, RunMode, SizingMode,
};
use crate::measure::Measure;
use crate::tree::LayoutTree;

/// Per-child state accumulated over the course of the algorithm.
struct BlockItem {
    node_id: NodeId,
    /// Index among the container's in-flow children, used as paint order
    order: u32,

    size: Size<Option<f32>>,
    min_size: Size<Option<f32>>,
    max_size: Size<Option<f32>>,

    overflow: Point<Overflow>,
    scrollbar_width: f32,

    position: Position,
    inset: Rect<LengthPercentageAuto>,
    margin: Rect<LengthPercentageAuto>,
    padding: Rect<f32>,
    border: Rect<f32>,
    padding_border_sum: Size<f32>,

    /// The static position of the item: where it would sit if it were
    /// in flow. Used as the fallback position for absolute children with
    /// no inset.
    static_position: Point<f32>,
}

pub(crate) fn compute_block_layout<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node_id: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let LayoutInput { known_dimensions, parent_size, run_mode, .. } = inputs;
    let style = &tree.node(node_id).style;

    let aspect_ratio = style.aspect_ratio;
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
    let clamped_style_size = if inputs.sizing_mode == SizingMode::InherentSize {
        style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment)
            .maybe_clamp(min_size, max_size)
    } else {
        Size::NONE
    };

    // A min bound at or above the max bound fixes the size outright
    let min_max_definite_size = min_size.zip_map(max_size, |min, max| match (min, max) {
        (Some(min), Some(max)) if max <= min => Some(min),
        _ => None,
    });

    let styled_based_known_dimensions =
        known_dimensions.or(min_max_definite_size).or(clamped_style_size).maybe_max(padding_border_size);

    if run_mode == RunMode::ComputeSize {
        if let Size { width: Some(width), height: Some(height) } = styled_based_known_dimensions {
            return LayoutOutput::from_outer_size(Size { width, height });
        }
    }

    compute_inner(tree, measure, node_id, LayoutInput { known_dimensions: styled_based_known_dimensions, ..inputs })
}

fn compute_inner<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node_id: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let LayoutInput { known_dimensions, parent_size, available_space, run_mode, .. } = inputs;

    let style = tree.node(node_id).style.clone();
    let aspect_ratio = style.aspect_ratio;
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);

    // A node that scrolls vertically reserves horizontal space for its
    // scrollbar, so the axes are transposed here.
    let scrollbar_gutter = {
        let offsets = style.overflow.transpose().map(|overflow| match overflow {
            Overflow::Scroll => style.scrollbar_width,
            _ => 0.0,
        });
        Rect { top: 0.0, left: 0.0, right: offsets.x, bottom: offsets.y }
    };
    let padding_border = padding + border;
    let padding_border_size = padding_border.sum_axes();
    let content_box_inset = padding_border + scrollbar_gutter;
    let container_content_box_size = known_dimensions.maybe_sub(content_box_inset.sum_axes());

    let box_sizing_adjustment =
        if style.box_sizing == BoxSizing::ContentBox { padding_border_size } else { Size::<f32>::ZERO };
    let size =
        style.size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio).maybe_add(box_sizing_adjustment);
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
    let text_align = style.text_align;

    // 1. Generate items
    let mut items = generate_item_list(tree, node_id, container_content_box_size);

    // 2. Compute container width
    let container_outer_width = known_dimensions.width.unwrap_or_else(|| {
        let available_width = available_space.width.maybe_sub(content_box_inset.horizontal_axis_sum());
        let intrinsic_width = determine_content_based_container_width(tree, measure, &items, available_width)
            + content_box_inset.horizontal_axis_sum();
        intrinsic_width.maybe_clamp(min_size.width, max_size.width).max(padding_border_size.width)
    });

    if let (RunMode::ComputeSize, Some(container_outer_height)) = (run_mode, known_dimensions.height) {
        return LayoutOutput::from_outer_size(Size { width: container_outer_width, height: container_outer_height });
    }

    let container_percentage_resolution_height =
        known_dimensions.height.or(size.height.maybe_max(min_size.height)).or(min_size.height);

    // 3. Lay out in-flow children and measure the content height
    let resolved_padding = style.padding.resolve_or_zero(Some(container_outer_width));
    let resolved_border = style.border.resolve_or_zero(Some(container_outer_width));
    let resolved_content_box_inset = resolved_padding + resolved_border + scrollbar_gutter;
    let (inflow_content_size, intrinsic_outer_height) = perform_final_layout_on_in_flow_children(
        tree,
        measure,
        &mut items,
        container_outer_width,
        container_percentage_resolution_height,
        resolved_content_box_inset,
        text_align,
    );

    let container_outer_height = known_dimensions
        .height
        .unwrap_or(intrinsic_outer_height.maybe_clamp(min_size.height, max_size.height))
        .max(padding_border_size.height);
    let final_outer_size = Size { width: container_outer_width, height: container_outer_height };

    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(final_outer_size);
    }

    // 4. Lay out absolutely positioned children
    let absolute_position_inset = resolved_border + scrollbar_gutter;
    let absolute_position_area = final_outer_size - absolute_position_inset.sum_axes();
    let absolute_position_offset = Point { x: absolute_position_inset.left, y: absolute_position_inset.top };
    let absolute_content_size = perform_absolute_layout_on_absolute_children(
        tree,
        measure,
        &items,
        absolute_position_area,
        absolute_position_offset,
    );

    // 5. Hidden children still get zeroed layouts stored at their index
    for (order, child) in tree.child_ids(node_id).into_iter().enumerate() {
        if tree.node(child).style.display == Display::None {
            tree.set_unrounded_layout(child, Layout::with_order(order as u32));
            compute_child_layout(tree, measure, child, LayoutInput::HIDDEN);
        }
    }

    let content_size = inflow_content_size.f32_max(absolute_content_size);

    LayoutOutput { size: final_outer_size, content_size, first_baselines: Point::NONE }
}

/// Collect the non-hidden children into `BlockItem`s, resolving the styles
/// the algorithm needs against the container's content-box size.
#[inline]
fn generate_item_list<Ctx>(
    tree: &LayoutTree<Ctx>,
    node: NodeId,
    node_inner_size: Size<Option<f32>>,
) -> Vec<BlockItem> {
    tree.node(node)
        .children
        .iter()
        .map(|child_id| (*child_id, &tree.node(*child_id).style))
        .filter(|(_, style)| style.display != Display::None)
        .enumerate()
        .map(|(order, (child_id, child_style))| {
            let aspect_ratio = child_style.aspect_ratio;
            let padding = child_style.padding.resolve_or_zero(node_inner_size.width);
            let border = child_style.border.resolve_or_zero(node_inner_size.width);
            let pb_sum = (padding + border).sum_axes();
            let box_sizing_adjustment =
                if child_style.box_sizing == BoxSizing::ContentBox { pb_sum } else { Size::<f32>::ZERO };

            BlockItem {
                node_id: child_id,
                order: order as u32,
                size: child_style
                    .size
                    .maybe_resolve(node_inner_size)
                    .maybe_apply_aspect_ratio(aspect_ratio)
                    .maybe_add(box_sizing_adjustment),
                min_size: child_style
                    .min_size
                    .maybe_resolve(node_inner_size)
                    .maybe_apply_aspect_ratio(aspect_ratio)
                    .maybe_add(box_sizing_adjustment),
                max_size: child_style
                    .max_size
                    .maybe_resolve(node_inner_size)
                    .maybe_apply_aspect_ratio(aspect_ratio)
                    .maybe_add(box_sizing_adjustment),
                overflow: child_style.overflow,
                scrollbar_width: child_style.scrollbar_width,
                position: child_style.position,
                inset: child_style.inset,
                margin: child_style.margin,
                padding,
                border,
                padding_border_sum: pb_sum,
                static_position: Point::ZERO,
            }
        })
        .collect()
}

/// The content-based width used when the container's width is indefinite:
/// the widest in-flow child's margin-box width.
#[inline]
fn determine_content_based_container_width<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    items: &[BlockItem],
    available_width: AvailableSpace,
) -> f32 {
    let available_space = Size { width: available_width, height: AvailableSpace::MinContent };

    let mut max_child_width: f32 = 0.0;
    for item in items.iter().filter(|item| item.position != Position::Absolute) {
        let known_dimensions = item.size.maybe_clamp(item.min_size, item.max_size);

        let item_x_margin_sum =
            item.margin.resolve_or_zero(available_space.width.into_option()).horizontal_axis_sum();
        let width = known_dimensions.width.unwrap_or_else(|| {
            measure_child_size(
                tree,
                measure,
                item.node_id,
                known_dimensions,
                Size::NONE,
                available_space.map_width(|w| w.maybe_sub(item_x_margin_sum)),
                SizingMode::InherentSize,
            )
            .width
        });
        let width = width.max(item.padding_border_sum.width) + item_x_margin_sum;

        max_child_width = max_child_width.max(width);
    }

    max_child_width
}

/// Size and position every in-flow child, returning the content size and
/// the container's intrinsic outer height.
#[inline]
fn perform_final_layout_on_in_flow_children<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    items: &mut [BlockItem],
    container_outer_width: f32,
    container_percentage_resolution_height: Option<f32>,
    resolved_content_box_inset: Rect<f32>,
    text_align: TextAlign,
) -> (Size<f32>, f32) {
    let container_inner_width = container_outer_width - resolved_content_box_inset.horizontal_axis_sum();
    let container_percentage_resolution_height =
        container_percentage_resolution_height.maybe_sub(resolved_content_box_inset.vertical_axis_sum());
    let parent_size = Size { width: Some(container_inner_width), height: container_percentage_resolution_height };

    let mut inflow_content_size = Size::<f32>::ZERO;
    let mut committed_y_offset = resolved_content_box_inset.top;

    for item in items.iter_mut() {
        if item.position == Position::Absolute {
            item.static_position = Point { x: resolved_content_box_inset.left, y: committed_y_offset };
            continue;
        }

        let item_margin = item.margin.map(|margin| margin.resolve(Some(container_outer_width)));
        let item_non_auto_margin = item_margin.map(|m| m.unwrap_or(0.0));
        let item_non_auto_x_margin_sum = item_non_auto_margin.horizontal_axis_sum();

        let scrollbar_size = Size {
            width: if item.overflow.y == Overflow::Scroll { item.scrollbar_width } else { 0.0 },
            height: if item.overflow.x == Overflow::Scroll { item.scrollbar_width } else { 0.0 },
        };

        // In-flow children stretch-fit the container's inner width
        let stretch_width = container_inner_width - item_non_auto_x_margin_sum;
        let known_dimensions = item
            .size
            .map_width(|width| Some(width.unwrap_or(stretch_width).maybe_clamp(item.min_size.width, item.max_size.width)))
            .maybe_clamp(item.min_size, item.max_size);

        let item_layout = perform_child_layout(
            tree,
            measure,
            item.node_id,
            known_dimensions,
            parent_size,
            Size { width: AvailableSpace::Definite(stretch_width), height: AvailableSpace::MinContent },
            SizingMode::InherentSize,
        );
        let final_size = item_layout.size;

        // Horizontal auto margins absorb leftover space; vertical auto
        // margins on block items resolve to zero
        let free_x_space = (stretch_width - final_size.width).max(0.0);
        let x_axis_auto_margin_size = {
            let auto_margin_count = item_margin.left.is_none() as u8 + item_margin.right.is_none() as u8;
            if auto_margin_count > 0 {
                free_x_space / auto_margin_count as f32
            } else {
                0.0
            }
        };
        let resolved_margin = Rect {
            left: item_margin.left.unwrap_or(x_axis_auto_margin_size),
            right: item_margin.right.unwrap_or(x_axis_auto_margin_size),
            top: item_margin.top.unwrap_or(0.0),
            bottom: item_margin.bottom.unwrap_or(0.0),
        };

        // A definite inset shifts a relatively positioned item without
        // affecting the flow
        let inset =
            item.inset.resolve_insets(Size { width: Some(container_inner_width), height: Some(0.0) });
        let inset_offset = Point {
            x: inset.left.or(inset.right.map(|x| -x)).unwrap_or(0.0),
            y: inset.top.or(inset.bottom.map(|x| -x)).unwrap_or(0.0),
        };

        item.static_position = Point { x: resolved_content_box_inset.left, y: committed_y_offset };
        let mut location = Point {
            x: resolved_content_box_inset.left + inset_offset.x + resolved_margin.left,
            y: committed_y_offset + inset_offset.y + resolved_margin.top,
        };

        // Legacy text-align shifts narrower items within the line
        let item_outer_width = final_size.width + resolved_margin.horizontal_axis_sum();
        if item_outer_width < stretch_width {
            match text_align {
                TextAlign::Auto | TextAlign::LegacyLeft => {}
                TextAlign::LegacyRight => location.x += stretch_width - item_outer_width,
                TextAlign::LegacyCenter => location.x += (stretch_width - item_outer_width) / 2.0,
            }
        }

        tree.set_unrounded_layout(
            item.node_id,
            Layout {
                order: item.order,
                size: final_size,
                content_size: item_layout.content_size,
                scrollbar_size,
                location,
                padding: item.padding,
                border: item.border,
                margin: resolved_margin,
            },
        );

        inflow_content_size = inflow_content_size.f32_max(compute_content_size_contribution(
            location,
            final_size,
            item_layout.content_size,
            item.overflow,
        ));

        committed_y_offset += resolved_margin.top + final_size.height + resolved_margin.bottom;
    }

    committed_y_offset += resolved_content_box_inset.bottom;
    let content_height = committed_y_offset.max(0.0);
    (inflow_content_size, content_height)
}

/// Lay out every absolutely positioned child against the container's
/// absolute positioning area.
#[inline]
fn perform_absolute_layout_on_absolute_children<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    items: &[BlockItem],
    area_size: Size<f32>,
    area_offset: Point<f32>,
) -> Size<f32> {
    let area_width = area_size.width;
    let area_height = area_size.height;

    let mut absolute_content_size = Size::<f32>::ZERO;

    for item in items.iter().filter(|item| item.position == Position::Absolute) {
        let child_style = tree.node(item.node_id).style.clone();

        let aspect_ratio = child_style.aspect_ratio;
        let margin = child_style.margin.map(|margin| margin.resolve(Some(area_width)));
        let padding = child_style.padding.resolve_or_zero(Some(area_width));
        let border = child_style.border.resolve_or_zero(Some(area_width));
        let padding_border_sum = (padding + border).sum_axes();
        let box_sizing_adjustment =
            if child_style.box_sizing == BoxSizing::ContentBox { padding_border_sum } else { Size::<f32>::ZERO };

        let left = child_style.inset.left.resolve(Some(area_width));
        let right = child_style.inset.right.resolve(Some(area_width));
        let top = child_style.inset.top.resolve(Some(area_height));
        let bottom = child_style.inset.bottom.resolve(Some(area_height));

        let style_size = child_style
            .size
            .maybe_resolve(area_size.map(Some))
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment);
        let min_size = child_style
            .min_size
            .maybe_resolve(area_size.map(Some))
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment)
            .or(padding_border_sum.map(Some))
            .maybe_max(padding_border_sum);
        let max_size = child_style
            .max_size
            .maybe_resolve(area_size.map(Some))
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment);
        let mut known_dimensions = style_size.maybe_clamp(min_size, max_size);

        // Width from opposing insets when not already known
        if let (None, Some(left), Some(right)) = (known_dimensions.width, left, right) {
            let new_width_raw = area_width.maybe_sub(margin.left).maybe_sub(margin.right) - left - right;
            known_dimensions.width = Some(new_width_raw.max(0.0));
            known_dimensions = known_dimensions.maybe_apply_aspect_ratio(aspect_ratio).maybe_clamp(min_size, max_size);
        }
        if let (None, Some(top), Some(bottom)) = (known_dimensions.height, top, bottom) {
            let new_height_raw = area_height.maybe_sub(margin.top).maybe_sub(margin.bottom) - top - bottom;
            known_dimensions.height = Some(new_height_raw.max(0.0));
            known_dimensions = known_dimensions.maybe_apply_aspect_ratio(aspect_ratio).maybe_clamp(min_size, max_size);
        }

        let available_space = Size {
            width: AvailableSpace::Definite(area_width.maybe_clamp(min_size.width, max_size.width)),
            height: AvailableSpace::Definite(area_height.maybe_clamp(min_size.height, max_size.height)),
        };

        let measured_size = measure_child_size(
            tree,
            measure,
            item.node_id,
            known_dimensions,
            area_size.map(Some),
            available_space,
            SizingMode::ContentSize,
        );
        let final_size = known_dimensions.unwrap_or(measured_size).maybe_clamp(min_size, max_size);

        let layout_output = perform_child_layout(
            tree,
            measure,
            item.node_id,
            final_size.map(Some),
            area_size.map(Some),
            available_space,
            SizingMode::ContentSize,
        );

        let non_auto_margin = Rect {
            left: if left.is_some() { margin.left.unwrap_or(0.0) } else { 0.0 },
            right: if right.is_some() { margin.right.unwrap_or(0.0) } else { 0.0 },
            top: if top.is_some() { margin.top.unwrap_or(0.0) } else { 0.0 },
            bottom: if bottom.is_some() { margin.bottom.unwrap_or(0.0) } else { 0.0 },
        };

        // Auto margins only absorb space on axes with a definite inset
        let auto_margin = {
            let absolute_auto_margin_space = Point {
                x: right.map(|right| area_size.width - right - left.unwrap_or(0.0)).unwrap_or(final_size.width),
                y: bottom.map(|bottom| area_size.height - bottom - top.unwrap_or(0.0)).unwrap_or(final_size.height),
            };
            let free_space = Size {
                width: absolute_auto_margin_space.x - final_size.width - non_auto_margin.horizontal_axis_sum(),
                height: absolute_auto_margin_space.y - final_size.height - non_auto_margin.vertical_axis_sum(),
            };

            let auto_margin_size = Size {
                width: {
                    let auto_margin_count = margin.left.is_none() as u8 + margin.right.is_none() as u8;
                    if auto_margin_count == 2
                        && style_size.width.map(|width| width >= free_space.width).unwrap_or(true)
                    {
                        0.0
                    } else if auto_margin_count > 0 {
                        free_space.width / auto_margin_count as f32
                    } else {
                        0.0
                    }
                },
                height: {
                    let auto_margin_count = margin.top.is_none() as u8 + margin.bottom.is_none() as u8;
                    if auto_margin_count == 2
                        && style_size.height.map(|height| height >= free_space.height).unwrap_or(true)
                    {
                        0.0
                    } else if auto_margin_count > 0 {
                        free_space.height / auto_margin_count as f32
                    } else {
                        0.0
                    }
                },
            };

            Rect {
                left: margin.left.map(|_| 0.0).unwrap_or(auto_margin_size.width),
                right: margin.right.map(|_| 0.0).unwrap_or(auto_margin_size.width),
                top: margin.top.map(|_| 0.0).unwrap_or(auto_margin_size.height),
                bottom: margin.bottom.map(|_| 0.0).unwrap_or(auto_margin_size.height),
            }
        };

        let resolved_margin = Rect {
            left: margin.left.unwrap_or(auto_margin.left),
            right: margin.right.unwrap_or(auto_margin.right),
            top: margin.top.unwrap_or(auto_margin.top),
            bottom: margin.bottom.unwrap_or(auto_margin.bottom),
        };

        let location = Point {
            x: left
                .map(|left| left + resolved_margin.left)
                .or(right.map(|right| area_size.width - final_size.width - right - resolved_margin.right))
                .maybe_add(Some(area_offset.x))
                .unwrap_or(item.static_position.x + resolved_margin.left),
            y: top
                .map(|top| top + resolved_margin.top)
                .or(bottom.map(|bottom| area_size.height - final_size.height - bottom - resolved_margin.bottom))
                .maybe_add(Some(area_offset.y))
                .unwrap_or(item.static_position.y + resolved_margin.top),
        };
        let scrollbar_size = Size {
            width: if item.overflow.y == Overflow::Scroll { item.scrollbar_width } else { 0.0 },
            height: if item.overflow.x == Overflow::Scroll { item.scrollbar_width } else { 0.0 },
        };

        tree.set_unrounded_layout(
            item.node_id,
            Layout {
                order: item.order,
                size: final_size,
                content_size: layout_output.content_size,
                scrollbar_size,
                location,
                padding,
                border,
                margin: resolved_margin,
            },
        );

        absolute_content_size = absolute_content_size.f32_max(compute_content_size_contribution(
            location,
            final_size,
            layout_output.content_size,
            item.overflow,
        ));
    }

    absolute_content_size
}

#[cfg(test)]
mod tests {
    use crate::tree::LayoutTree;
    use lattice_core::{Dimension, Display, LengthPercentageAuto, Rect, Size, Style, TextAlign};

    fn block(style: Style) -> Style {
        Style { display: Display::Block, ..style }
    }

    #[test]
    fn test_children_stack_without_margin_collapsing() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child_style = block(Style {
            size: Size::<Dimension>::from_lengths(50.0, 20.0),
            margin: Rect {
                left: LengthPercentageAuto::ZERO,
                right: LengthPercentageAuto::ZERO,
                top: LengthPercentageAuto::length(10.0),
                bottom: LengthPercentageAuto::length(10.0),
            },
            ..Default::default()
        });
        let first = tree.new_leaf(child_style.clone()).unwrap();
        let second = tree.new_leaf(child_style).unwrap();
        let root = tree
            .new_with_children(block(Style { size: Size::<Dimension>::from_lengths(100.0, 200.0), ..Default::default() }), &[
                first, second,
            ])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        // Adjoining 10px margins contribute 20px of separation, not 10
        assert_eq!(tree.layout(first).unwrap().location.y, 10.0);
        assert_eq!(tree.layout(second).unwrap().location.y, 50.0);
    }

    #[test]
    fn test_stretch_fit_width() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree.new_leaf(block(Style::default())).unwrap();
        let root = tree
            .new_with_children(block(Style { size: Size::<Dimension>::from_lengths(120.0, 40.0), ..Default::default() }), &[child])
            .unwrap();
        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(child).unwrap().size.width, 120.0);
    }

    #[test]
    fn test_auto_margins_center_fixed_width_child() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(block(Style {
                size: Size::<Dimension>::from_lengths(50.0, 20.0),
                margin: Rect {
                    left: LengthPercentageAuto::Auto,
                    right: LengthPercentageAuto::Auto,
                    top: LengthPercentageAuto::ZERO,
                    bottom: LengthPercentageAuto::ZERO,
                },
                ..Default::default()
            }))
            .unwrap();
        let root = tree
            .new_with_children(block(Style { size: Size::<Dimension>::from_lengths(150.0, 40.0), ..Default::default() }), &[child])
            .unwrap();
        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(child).unwrap().location.x, 50.0);
    }

    #[test]
    fn test_legacy_center_alignment() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(block(Style { size: Size::<Dimension>::from_lengths(40.0, 10.0), ..Default::default() }))
            .unwrap();
        let root = tree
            .new_with_children(
                block(Style {
                    size: Size::<Dimension>::from_lengths(100.0, 20.0),
                    text_align: TextAlign::LegacyCenter,
                    ..Default::default()
                }),
                &[child],
            )
            .unwrap();
        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(child).unwrap().location.x, 30.0);
    }

    #[test]
    fn test_intrinsic_height_sums_children() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let first = tree.new_leaf(block(Style { size: Size::<Dimension>::from_lengths(10.0, 25.0), ..Default::default() })).unwrap();
        let second =
            tree.new_leaf(block(Style { size: Size::<Dimension>::from_lengths(10.0, 35.0), ..Default::default() })).unwrap();
        let root = tree
            .new_with_children(
                block(Style {
                    size: Size { width: Dimension::length(60.0), height: Dimension::Auto },
                    ..Default::default()
                }),
                &[first, second],
            )
            .unwrap();
        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(root).unwrap().size, Size::new(60.0, 60.0));
    }
}
