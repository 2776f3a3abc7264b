//! The flexbox layout algorithm.
//!
//! Follows the CSS Flexible Box Layout Module Level 1 resolution order:
//! flex base sizes, line collection, flexible length resolution, cross
//! sizing, then main- and cross-axis alignment.

use lattice_core::{
    AlignContent, AlignItems, AlignSelf, AvailableSpace, BoxSizing, Dimension, Display, FlexDirection, FlexWrap,
    JustifyContent, Layout, LengthPercentageAuto, MaybeMath, NodeId, Overflow, Point, Position, Rect, Size,
};

use crate::compute::common::alignment::{apply_alignment_fallback, compute_alignment_offset};
use crate::compute::{
    compute_child_layout, compute_content_size_contribution, measure_child_size, perform_child_layout, LayoutInput,
    LayoutOutput, RunMode, SizingMode,
};
use crate::measure::Measure;
use crate::tree::LayoutTree;

/// The intermediate results for a single flex item.
struct FlexItem {
    node: NodeId,
    /// The order of the node relative to its siblings
    order: u32,

    /// The base size of this item
    size: Size<Option<f32>>,
    /// The minimum allowable size of this item
    min_size: Size<Option<f32>>,
    /// The maximum allowable size of this item
    max_size: Size<Option<f32>>,
    /// The cross-alignment of this item
    align_self: AlignSelf,

    overflow: Point<Overflow>,
    scrollbar_width: f32,
    flex_shrink: f32,
    flex_grow: f32,

    /// The minimum size of the item, including content based automatic
    /// minimum sizes
    resolved_minimum_main_size: f32,

    inset: Rect<Option<f32>>,
    margin: Rect<f32>,
    margin_is_auto: Rect<bool>,
    padding: Rect<f32>,
    border: Rect<f32>,

    /// The default size of this item
    flex_basis: f32,
    /// The default size of this item, minus padding and border
    inner_flex_basis: f32,
    /// The amount by which this item has deviated from its target size
    violation: f32,
    /// Is the size of this item locked
    frozen: bool,

    /// Either the max- or min-content flex fraction, used when sizing the
    /// container under an intrinsic constraint
    content_flex_fraction: f32,

    hypothetical_inner_size: Size<f32>,
    hypothetical_outer_size: Size<f32>,
    target_size: Size<f32>,
    outer_target_size: Size<f32>,

    /// The position of this item's baseline
    baseline: f32,

    /// Main-axis offset from the item's natural flow position
    offset_main: f32,
    /// Cross-axis offset from the item's natural flow position
    offset_cross: f32,
}

/// A run of items placed on the same main-axis line.
struct FlexLine<'a> {
    items: &'a mut [FlexItem],
    /// The dimension of the line in the cross axis
    cross_size: f32,
    /// The relative offset of the line in the cross axis
    offset_cross: f32,
}

/// Values computed once at the start of the algorithm and threaded through
/// every step.
struct AlgoConstants {
    dir: FlexDirection,
    is_row: bool,
    is_column: bool,
    is_wrap: bool,
    is_wrap_reverse: bool,

    min_size: Size<Option<f32>>,
    max_size: Size<Option<f32>>,
    margin: Rect<f32>,
    border: Rect<f32>,
    /// Padding + border + scrollbar gutter
    content_box_inset: Rect<f32>,
    scrollbar_gutter: Point<f32>,
    gap: Size<f32>,
    align_items: AlignItems,
    align_content: AlignContent,
    justify_content: Option<JustifyContent>,

    /// The border-box size of the node being laid out (if known)
    node_outer_size: Size<Option<f32>>,
    /// The content-box size of the node being laid out (if known)
    node_inner_size: Size<Option<f32>>,

    /// The used border-box size of the container
    container_size: Size<f32>,
    /// The used content-box size of the container
    inner_container_size: Size<f32>,
}

pub(crate) fn compute_flexbox_layout<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let LayoutInput { known_dimensions, parent_size, run_mode, .. } = inputs;
    let style = tree.node(node).style.clone();

    let aspect_ratio = style.aspect_ratio;
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border_sum = padding.sum_axes() + border.sum_axes();
    let box_sizing_adjustment = if style.box_sizing == BoxSizing::ContentBox { padding_border_sum } else { Size::<f32>::ZERO };

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

    // If min and max in an axis are both set and max <= min then the size
    // in that axis is fixed outright
    let min_max_definite_size = min_size.zip_map(max_size, |min, max| match (min, max) {
        (Some(min), Some(max)) if max <= min => Some(min),
        _ => None,
    });

    // The container size is floored by its padding and border
    let styled_based_known_dimensions =
        known_dimensions.or(min_max_definite_size.or(clamped_style_size).maybe_max(padding_border_sum));

    if run_mode == RunMode::ComputeSize {
        if let Size { width: Some(width), height: Some(height) } = styled_based_known_dimensions {
            return LayoutOutput::from_outer_size(Size { width, height });
        }
    }

    compute_preliminary(tree, measure, node, LayoutInput { known_dimensions: styled_based_known_dimensions, ..inputs })
}

/// Run the flexbox algorithm proper.
fn compute_preliminary<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let LayoutInput { known_dimensions, parent_size, available_space, run_mode, .. } = inputs;

    let style = tree.node(node).style.clone();
    let mut constants = compute_constants(&style, known_dimensions, parent_size);

    // 1. Generate anonymous flex items
    let mut flex_items = generate_anonymous_flex_items(tree, node, &constants);

    // 2. Determine the available main and cross space for the flex items
    let available_space = determine_available_space(known_dimensions, available_space, &constants);

    // 3. Determine the flex base size and hypothetical main size of each item
    determine_flex_base_size(tree, measure, &constants, available_space, &mut flex_items);

    // 5. Collect flex items into flex lines
    let mut flex_lines = collect_flex_lines(&constants, available_space, &mut flex_items);

    // Determine the container's main size, then re-resolve percentage gaps
    // against the newly determined size
    if let Some(inner_main_size) = constants.node_inner_size.main(constants.dir) {
        let outer_main_size = inner_main_size + constants.content_box_inset.main_axis_sum(constants.dir);
        constants.inner_container_size.set_main(constants.dir, inner_main_size);
        constants.container_size.set_main(constants.dir, outer_main_size);
    } else {
        determine_container_main_size(tree, measure, available_space, &mut flex_lines, &mut constants);
        constants.node_inner_size.set_main(constants.dir, Some(constants.inner_container_size.main(constants.dir)));
        constants.node_outer_size.set_main(constants.dir, Some(constants.container_size.main(constants.dir)));

        let inner_main_size = constants.inner_container_size.main(constants.dir);
        let new_gap = style.gap.main(constants.dir).resolve_or_zero(Some(inner_main_size));
        constants.gap.set_main(constants.dir, new_gap);
    }

    // 6. Resolve the flexible lengths of all the flex items
    for line in &mut flex_lines {
        resolve_flexible_lengths(line, &constants);
    }

    // 7. Determine the hypothetical cross size of each item
    for line in &mut flex_lines {
        determine_hypothetical_cross_size(tree, measure, line, &constants, available_space);
    }

    // Child baselines are only needed when baseline alignment is in play
    calculate_children_base_lines(tree, measure, known_dimensions, available_space, &mut flex_lines, &constants);

    // 8. Calculate the cross size of each flex line
    calculate_cross_size(&mut flex_lines, known_dimensions, &constants);

    // 9. Handle 'align-content: stretch'
    handle_align_content_stretch(&mut flex_lines, known_dimensions, &constants);

    // 11. Determine the used cross size of each flex item
    determine_used_cross_size(tree, &mut flex_lines, &constants);

    // 12. Distribute any remaining free space along the main axis
    distribute_remaining_free_space(&mut flex_lines, &constants);

    // 13/14. Resolve cross-axis auto margins and align items
    resolve_cross_axis_auto_margins(&mut flex_lines, &constants);

    // 15. Determine the flex container's used cross size
    let total_line_cross_size = determine_container_cross_size(&flex_lines, known_dimensions, &mut constants);

    // The container size is now fully determined
    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(constants.container_size);
    }

    // 16. Align all flex lines per align-content
    align_flex_lines_per_align_content(&mut flex_lines, &constants, total_line_cross_size);

    let inflow_content_size = final_layout_pass(tree, measure, &mut flex_lines, &constants);

    let absolute_content_size = perform_absolute_layout_on_absolute_children(tree, measure, node, &constants);

    for (order, child) in tree.child_ids(node).into_iter().enumerate() {
        if tree.node(child).style.display == Display::None {
            tree.set_unrounded_layout(child, Layout::with_order(order as u32));
            compute_child_layout(tree, measure, child, LayoutInput::HIDDEN);
        }
    }

    // The container's first baseline comes from its first line
    let first_vertical_baseline = if flex_lines.is_empty() {
        None
    } else {
        flex_lines[0]
            .items
            .iter()
            .find(|item| constants.is_column || item.align_self == AlignSelf::Baseline)
            .or_else(|| flex_lines[0].items.first())
            .map(|child| {
                let offset_vertical = if constants.is_row { child.offset_cross } else { child.offset_main };
                offset_vertical + child.baseline
            })
    };

    LayoutOutput::from_sizes_and_baselines(
        constants.container_size,
        inflow_content_size.f32_max(absolute_content_size),
        Point { x: None, y: first_vertical_baseline },
    )
}

#[inline]
fn compute_constants(
    style: &lattice_core::Style,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
) -> AlgoConstants {
    let dir = style.flex_direction;
    let is_row = dir.is_row();
    let is_column = dir.is_column();
    let is_wrap = matches!(style.flex_wrap, FlexWrap::Wrap | FlexWrap::WrapReverse);
    let is_wrap_reverse = style.flex_wrap == FlexWrap::WrapReverse;

    let aspect_ratio = style.aspect_ratio;
    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border_sum = padding.sum_axes() + border.sum_axes();
    let box_sizing_adjustment = if style.box_sizing == BoxSizing::ContentBox { padding_border_sum } else { Size::<f32>::ZERO };

    let align_items = style.align_items.unwrap_or(AlignItems::Stretch);
    let align_content = style.align_content.unwrap_or(AlignContent::Stretch);
    let justify_content = style.justify_content;

    // A node that scrolls vertically reserves horizontal space for its
    // scrollbar, hence the transpose
    let scrollbar_gutter = style.overflow.transpose().map(|overflow| match overflow {
        Overflow::Scroll => style.scrollbar_width,
        _ => 0.0,
    });
    let mut content_box_inset = padding + border;
    content_box_inset.right += scrollbar_gutter.x;
    content_box_inset.bottom += scrollbar_gutter.y;

    let node_outer_size = known_dimensions;
    let node_inner_size = node_outer_size.maybe_sub(content_box_inset.sum_axes());
    let gap = style.gap.resolve_or_zero(node_inner_size);

    AlgoConstants {
        dir,
        is_row,
        is_column,
        is_wrap,
        is_wrap_reverse,
        min_size: style
            .min_size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment),
        max_size: style
            .max_size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment),
        margin,
        border,
        gap,
        content_box_inset,
        scrollbar_gutter,
        align_items,
        align_content,
        justify_content,
        node_outer_size,
        node_inner_size,
        container_size: Size::<f32>::ZERO,
        inner_container_size: Size::<f32>::ZERO,
    }
}

/// Generate a flex item for every in-flow child.
#[inline]
fn generate_anonymous_flex_items<Ctx>(
    tree: &LayoutTree<Ctx>,
    node: NodeId,
    constants: &AlgoConstants,
) -> Vec<FlexItem> {
    let mut items = Vec::with_capacity(tree.node(node).children.len());

    for (index, child) in tree.child_ids(node).into_iter().enumerate() {
        let child_style = &tree.node(child).style;
        if child_style.position == Position::Absolute || child_style.display == Display::None {
            continue;
        }

        let aspect_ratio = child_style.aspect_ratio;
        let padding = child_style.padding.resolve_or_zero(constants.node_inner_size.width);
        let border = child_style.border.resolve_or_zero(constants.node_inner_size.width);
        let pb_sum = (padding + border).sum_axes();
        let box_sizing_adjustment = if child_style.box_sizing == BoxSizing::ContentBox { pb_sum } else { Size::<f32>::ZERO };

        items.push(FlexItem {
            node: child,
            order: index as u32,
            size: child_style
                .size
                .maybe_resolve(constants.node_inner_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_add(box_sizing_adjustment),
            min_size: child_style
                .min_size
                .maybe_resolve(constants.node_inner_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_add(box_sizing_adjustment),
            max_size: child_style
                .max_size
                .maybe_resolve(constants.node_inner_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_add(box_sizing_adjustment),

            inset: child_style.inset.resolve_insets(constants.node_inner_size),
            margin: child_style.margin.resolve_or_zero(constants.node_inner_size.width),
            margin_is_auto: child_style.margin.map(|m| m == LengthPercentageAuto::Auto),
            padding,
            border,
            align_self: child_style.align_self.unwrap_or(constants.align_items),
            overflow: child_style.overflow,
            scrollbar_width: child_style.scrollbar_width,
            flex_grow: child_style.flex_grow,
            flex_shrink: child_style.flex_shrink,
            flex_basis: 0.0,
            inner_flex_basis: 0.0,
            violation: 0.0,
            frozen: false,

            resolved_minimum_main_size: 0.0,
            hypothetical_inner_size: Size::<f32>::ZERO,
            hypothetical_outer_size: Size::<f32>::ZERO,
            target_size: Size::<f32>::ZERO,
            outer_target_size: Size::<f32>::ZERO,
            content_flex_fraction: 0.0,

            baseline: 0.0,

            offset_main: 0.0,
            offset_cross: 0.0,
        });
    }

    items
}

/// Determine the space available to the flex items in each axis.
#[inline]
#[must_use]
fn determine_available_space(
    known_dimensions: Size<Option<f32>>,
    outer_available_space: Size<AvailableSpace>,
    constants: &AlgoConstants,
) -> Size<AvailableSpace> {
    // Min/max/preferred size styles have already been applied to
    // known_dimensions by the caller
    let width = match known_dimensions.width {
        Some(node_width) => AvailableSpace::Definite(node_width - constants.content_box_inset.horizontal_axis_sum()),
        None => outer_available_space
            .width
            .maybe_sub(constants.margin.horizontal_axis_sum())
            .maybe_sub(constants.content_box_inset.horizontal_axis_sum()),
    };

    let height = match known_dimensions.height {
        Some(node_height) => AvailableSpace::Definite(node_height - constants.content_box_inset.vertical_axis_sum()),
        None => outer_available_space
            .height
            .maybe_sub(constants.margin.vertical_axis_sum())
            .maybe_sub(constants.content_box_inset.vertical_axis_sum()),
    };

    Size { width, height }
}

/// Determine the flex base size and hypothetical main size of each item.
#[inline]
fn determine_flex_base_size<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
    flex_items: &mut [FlexItem],
) {
    let dir = constants.dir;

    for child in flex_items.iter_mut() {
        let cross_axis_parent_size = constants.node_inner_size.cross(dir);
        let child_parent_size = Size::NONE.with_cross(dir, cross_axis_parent_size);

        let cross_axis_margin_sum = constants.margin.cross_axis_sum(dir);
        let child_min_cross = child.min_size.cross(dir).maybe_add(cross_axis_margin_sum);
        let child_max_cross = child.max_size.cross(dir).maybe_add(cross_axis_margin_sum);
        let cross_axis_available_space: AvailableSpace = available_space
            .cross(dir)
            .map_definite_value(|val| cross_axis_parent_size.unwrap_or(val))
            .maybe_clamp(child_min_cross, child_max_cross);

        let child_known_dimensions = {
            let mut ckd = child.size.with_main(dir, None);
            if child.align_self == AlignSelf::Stretch && ckd.cross(dir).is_none() {
                ckd.set_cross(
                    dir,
                    cross_axis_available_space.into_option().maybe_sub(child.margin.cross_axis_sum(dir)),
                );
            }
            ckd
        };

        let container_width = constants.node_inner_size.main(dir);
        let (style_flex_basis, style_box_sizing, style_padding, style_border) = {
            let child_style = &tree.node(child.node).style;
            (child_style.flex_basis, child_style.box_sizing, child_style.padding, child_style.border)
        };
        let box_sizing_adjustment = if style_box_sizing == BoxSizing::ContentBox {
            let padding = style_padding.resolve_or_zero(container_width);
            let border = style_border.resolve_or_zero(container_width);
            (padding + border).sum_axes()
        } else {
            Size::<f32>::ZERO
        }
        .main(dir);
        let flex_basis = style_flex_basis.maybe_resolve(container_width).maybe_add(box_sizing_adjustment);

        child.flex_basis = 'flex_basis: {
            // A definite used flex basis (or, failing that, a definite main
            // size) is the flex base size. The item's size has already been
            // resolved against its aspect ratio, so a definite cross size
            // also lands here.
            let main_size = child.size.main(dir);
            if let Some(flex_basis) = flex_basis.or(main_size) {
                break 'flex_basis flex_basis;
            };

            // Otherwise size the item into the available space with its
            // used flex basis treated as max-content
            let child_available_space = Size::MAX_CONTENT
                .with_main(
                    dir,
                    if available_space.main(dir) == AvailableSpace::MinContent {
                        AvailableSpace::MinContent
                    } else {
                        AvailableSpace::MaxContent
                    },
                )
                .with_cross(dir, cross_axis_available_space);

            break 'flex_basis measure_child_size(
                tree,
                measure,
                child.node,
                child_known_dimensions,
                child_parent_size,
                child_available_space,
                SizingMode::ContentSize,
            )
            .main(dir);
        };

        // Floor the flex basis by padding + border, which floors the inner
        // flex basis at zero. Chrome and Firefox both do this despite a
        // literal reading of the CSS flexbox algorithm saying otherwise.
        let padding_border_sum = child.padding.main_axis_sum(constants.dir) + child.border.main_axis_sum(constants.dir);
        child.flex_basis = child.flex_basis.max(padding_border_sum);

        child.inner_flex_basis =
            child.flex_basis - child.padding.main_axis_sum(constants.dir) - child.border.main_axis_sum(constants.dir);

        let padding_border_axes_sums = (child.padding + child.border).sum_axes().map(Some);

        // Automatic minimum size: a scroll container's automatic minimum is
        // zero, otherwise it is the min-content size clamped by the
        // preferred and max sizes
        let automatic_min = child.overflow.map(Overflow::maybe_into_automatic_min_size);
        let style_min_main_size =
            child.min_size.or(Size { width: automatic_min.x, height: automatic_min.y }).main(dir);

        child.resolved_minimum_main_size = style_min_main_size.unwrap_or({
            let min_content_main_size = {
                let child_available_space = Size::MIN_CONTENT.with_cross(dir, cross_axis_available_space);

                measure_child_size(
                    tree,
                    measure,
                    child.node,
                    child_known_dimensions,
                    child_parent_size,
                    child_available_space,
                    SizingMode::ContentSize,
                )
                .main(dir)
            };

            let clamped_min_content_size =
                min_content_main_size.maybe_min(child.size.main(dir)).maybe_min(child.max_size.main(dir));
            clamped_min_content_size.maybe_max(padding_border_axes_sums.main(dir))
        });

        // The hypothetical main size is the flex base size clamped by the
        // used min and max main sizes
        let hypothetical_inner_min_main =
            child.resolved_minimum_main_size.maybe_max(padding_border_axes_sums.main(constants.dir));
        let hypothetical_inner_size =
            child.flex_basis.maybe_clamp(Some(hypothetical_inner_min_main), child.max_size.main(constants.dir));
        let hypothetical_outer_size = hypothetical_inner_size + child.margin.main_axis_sum(constants.dir);

        child.hypothetical_inner_size.set_main(constants.dir, hypothetical_inner_size);
        child.hypothetical_outer_size.set_main(constants.dir, hypothetical_outer_size);
    }
}

/// Collect flex items into flex lines.
///
/// A non-wrapping container always produces a single line. Under a
/// max-content constraint items never wrap; under a min-content constraint
/// every item gets its own line.
#[inline]
fn collect_flex_lines<'a>(
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
    flex_items: &'a mut Vec<FlexItem>,
) -> Vec<FlexLine<'a>> {
    if !constants.is_wrap {
        return vec![FlexLine { items: flex_items.as_mut_slice(), cross_size: 0.0, offset_cross: 0.0 }];
    }

    let main_axis_available_space = match constants.max_size.main(constants.dir) {
        Some(max_size) => AvailableSpace::Definite(
            available_space
                .main(constants.dir)
                .into_option()
                .unwrap_or(max_size)
                .maybe_max(constants.min_size.main(constants.dir)),
        ),
        None => available_space.main(constants.dir),
    };

    match main_axis_available_space {
        AvailableSpace::MaxContent => {
            vec![FlexLine { items: flex_items.as_mut_slice(), cross_size: 0.0, offset_cross: 0.0 }]
        }
        AvailableSpace::MinContent => {
            let mut lines = Vec::with_capacity(flex_items.len());
            let mut items = &mut flex_items[..];
            while !items.is_empty() {
                let (line_items, rest) = items.split_at_mut(1);
                lines.push(FlexLine { items: line_items, cross_size: 0.0, offset_cross: 0.0 });
                items = rest;
            }
            lines
        }
        AvailableSpace::Definite(main_axis_available_space) => {
            let mut lines = Vec::with_capacity(1);
            let mut flex_items = &mut flex_items[..];
            let main_axis_gap = constants.gap.main(constants.dir);

            while !flex_items.is_empty() {
                // Find the first item that overflows the line. The first
                // item of a line never wraps, even if it overflows alone.
                let mut line_length = 0.0;
                let index = flex_items
                    .iter()
                    .enumerate()
                    .find(|&(idx, child)| {
                        let gap_contribution = if idx == 0 { 0.0 } else { main_axis_gap };
                        line_length += child.hypothetical_outer_size.main(constants.dir) + gap_contribution;
                        line_length > main_axis_available_space && idx != 0
                    })
                    .map(|(idx, _)| idx)
                    .unwrap_or(flex_items.len());

                let (items, rest) = flex_items.split_at_mut(index);
                lines.push(FlexLine { items, cross_size: 0.0, offset_cross: 0.0 });
                flex_items = rest;
            }
            lines
        }
    }
}

/// Determine the container's main size when it is not already known.
fn determine_container_main_size<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    available_space: Size<AvailableSpace>,
    lines: &mut [FlexLine<'_>],
    constants: &mut AlgoConstants,
) {
    let dir = constants.dir;
    let main_content_box_inset = constants.content_box_inset.main_axis_sum(constants.dir);

    let outer_main_size: f32 = constants.node_outer_size.main(constants.dir).unwrap_or_else(|| {
        match available_space.main(dir) {
            AvailableSpace::Definite(main_axis_available_space) => {
                let longest_line_length: f32 = lines
                    .iter()
                    .map(|line| {
                        let line_main_axis_gap = sum_axis_gaps(constants.gap.main(constants.dir), line.items.len());
                        let total_target_size = line
                            .items
                            .iter()
                            .map(|child| {
                                let padding_border_sum = (child.padding + child.border).main_axis_sum(constants.dir);
                                (child.flex_basis + child.margin.main_axis_sum(constants.dir)).max(padding_border_sum)
                            })
                            .sum::<f32>();
                        total_target_size + line_main_axis_gap
                    })
                    .max_by(|a, b| a.total_cmp(b))
                    .unwrap_or(0.0);
                let size = longest_line_length + main_content_box_inset;
                if lines.len() > 1 {
                    size.max(main_axis_available_space)
                } else {
                    size
                }
            }
            AvailableSpace::MinContent if constants.is_wrap => {
                let longest_line_length: f32 = lines
                    .iter()
                    .map(|line| {
                        let line_main_axis_gap = sum_axis_gaps(constants.gap.main(constants.dir), line.items.len());
                        let total_target_size = line
                            .items
                            .iter()
                            .map(|child| {
                                let padding_border_sum = (child.padding + child.border).main_axis_sum(constants.dir);
                                (child.flex_basis + child.margin.main_axis_sum(constants.dir)).max(padding_border_sum)
                            })
                            .sum::<f32>();
                        total_target_size + line_main_axis_gap
                    })
                    .max_by(|a, b| a.total_cmp(b))
                    .unwrap_or(0.0);
                longest_line_length + main_content_box_inset
            }
            AvailableSpace::MinContent | AvailableSpace::MaxContent => {
                // The intrinsic main size is the largest sum over the lines
                // of each item's content contribution flexed by its
                // min/max-content flex fraction
                let mut main_size = 0.0_f32;

                for line in lines.iter_mut() {
                    for item in line.items.iter_mut() {
                        let style_min = item.min_size.main(constants.dir);
                        let style_preferred = item.size.main(constants.dir);
                        let style_max = item.max_size.main(constants.dir);

                        // An inflexible item's flex basis bounds its
                        // contribution. This matches Chrome and Firefox.
                        let clamping_basis = Some(item.flex_basis).maybe_max(style_preferred);
                        let flex_basis_min = clamping_basis.filter(|_| item.flex_shrink == 0.0);
                        let flex_basis_max = clamping_basis.filter(|_| item.flex_grow == 0.0);

                        let min_main_size = style_min
                            .maybe_max(flex_basis_min)
                            .or(flex_basis_min)
                            .unwrap_or(item.resolved_minimum_main_size)
                            .max(item.resolved_minimum_main_size);
                        let max_main_size =
                            style_max.maybe_min(flex_basis_max).or(flex_basis_max).unwrap_or(f32::INFINITY);

                        let content_contribution = match (min_main_size, style_preferred, max_main_size) {
                            // When the clamps fully determine the outcome,
                            // skip the content measurement
                            (min, Some(pref), max) if max <= min || max <= pref => {
                                pref.min(max).max(min) + item.margin.main_axis_sum(constants.dir)
                            }
                            (min, _, max) if max <= min => min + item.margin.main_axis_sum(constants.dir),
                            _ => {
                                let cross_axis_parent_size = constants.node_inner_size.cross(dir);

                                let cross_axis_margin_sum = constants.margin.cross_axis_sum(dir);
                                let child_min_cross = item.min_size.cross(dir).maybe_add(cross_axis_margin_sum);
                                let child_max_cross = item.max_size.cross(dir).maybe_add(cross_axis_margin_sum);
                                let cross_axis_available_space: AvailableSpace = available_space
                                    .cross(dir)
                                    .map_definite_value(|val| cross_axis_parent_size.unwrap_or(val))
                                    .maybe_clamp(child_min_cross, child_max_cross);

                                let child_available_space = available_space.with_cross(dir, cross_axis_available_space);

                                let child_known_dimensions = {
                                    let mut ckd = item.size.with_main(dir, None);
                                    if item.align_self == AlignSelf::Stretch && ckd.cross(dir).is_none() {
                                        ckd.set_cross(
                                            dir,
                                            cross_axis_available_space
                                                .into_option()
                                                .maybe_sub(item.margin.cross_axis_sum(dir)),
                                        );
                                    }
                                    ckd
                                };

                                let content_main_size = measure_child_size(
                                    tree,
                                    measure,
                                    item.node,
                                    child_known_dimensions,
                                    constants.node_inner_size,
                                    child_available_space,
                                    SizingMode::InherentSize,
                                )
                                .main(constants.dir)
                                    + item.margin.main_axis_sum(constants.dir);

                                // The automatic main size of a column
                                // container is a max-content size, so a
                                // vertical flex basis does not shrink below
                                // the content. Rows take the plain clamped
                                // contribution. This matches browsers.
                                if constants.is_row {
                                    content_main_size.maybe_clamp(style_min, style_max).max(main_content_box_inset)
                                } else {
                                    content_main_size
                                        .max(item.flex_basis)
                                        .maybe_clamp(style_min, style_max)
                                        .max(main_content_box_inset)
                                }
                            }
                        };
                        item.content_flex_fraction = {
                            let diff = content_contribution - item.flex_basis;
                            if diff > 0.0 {
                                diff / item.flex_grow.max(1.0)
                            } else if diff < 0.0 {
                                let scaled_shrink_factor = (item.flex_shrink * item.inner_flex_basis).max(1.0);
                                diff / scaled_shrink_factor
                            } else {
                                0.0
                            }
                        };
                    }

                    // Flex each item's base size by its own flex fraction
                    // and sum. Browsers do not use the line's max fraction
                    // here, so neither do we.
                    let item_main_size_sum = line
                        .items
                        .iter_mut()
                        .map(|item| {
                            let flex_fraction = item.content_flex_fraction;

                            let flex_contribution = if item.content_flex_fraction > 0.0 {
                                item.flex_grow.max(1.0) * flex_fraction
                            } else if item.content_flex_fraction < 0.0 {
                                let scaled_shrink_factor = item.flex_shrink.max(1.0) * item.inner_flex_basis;
                                scaled_shrink_factor * flex_fraction
                            } else {
                                0.0
                            };
                            let size = item.flex_basis + flex_contribution;
                            item.outer_target_size.set_main(constants.dir, size);
                            item.target_size.set_main(constants.dir, size);
                            size
                        })
                        .sum::<f32>();

                    let gap_sum = sum_axis_gaps(constants.gap.main(constants.dir), line.items.len());
                    main_size = main_size.max(item_main_size_sum + gap_sum)
                }

                main_size + main_content_box_inset
            }
        }
    });

    let outer_main_size = outer_main_size
        .maybe_clamp(constants.min_size.main(constants.dir), constants.max_size.main(constants.dir))
        .max(main_content_box_inset - constants.scrollbar_gutter.main(constants.dir));

    let inner_main_size = (outer_main_size - main_content_box_inset).max(0.0);
    constants.container_size.set_main(constants.dir, outer_main_size);
    constants.inner_container_size.set_main(constants.dir, inner_main_size);
    constants.node_inner_size.set_main(constants.dir, Some(inner_main_size));
}

/// Resolve the flexible lengths of the items within a flex line, setting
/// the main component of each item's `target_size` and `outer_target_size`.
#[inline]
fn resolve_flexible_lengths(line: &mut FlexLine, constants: &AlgoConstants) {
    let total_main_axis_gap = sum_axis_gaps(constants.gap.main(constants.dir), line.items.len());

    // 1. Determine the used flex factor
    let total_hypothetical_outer_main_size =
        line.items.iter().map(|child| child.hypothetical_outer_size.main(constants.dir)).sum::<f32>();
    let used_flex_factor: f32 = total_main_axis_gap + total_hypothetical_outer_main_size;
    let growing = used_flex_factor < constants.node_inner_size.main(constants.dir).unwrap_or(0.0);
    let shrinking = used_flex_factor > constants.node_inner_size.main(constants.dir).unwrap_or(0.0);
    let exactly_sized = !growing && !shrinking;

    // 2. Size and freeze inflexible items at their hypothetical main size
    for child in line.items.iter_mut() {
        let inner_target_size = child.hypothetical_inner_size.main(constants.dir);
        child.target_size.set_main(constants.dir, inner_target_size);

        if exactly_sized
            || (child.flex_grow == 0.0 && child.flex_shrink == 0.0)
            || (growing && child.flex_basis > child.hypothetical_inner_size.main(constants.dir))
            || (shrinking && child.flex_basis < child.hypothetical_inner_size.main(constants.dir))
        {
            child.frozen = true;
            let outer_target_size = inner_target_size + child.margin.main_axis_sum(constants.dir);
            child.outer_target_size.set_main(constants.dir, outer_target_size);
        }
    }

    if exactly_sized {
        return;
    }

    // 3. Calculate initial free space
    let used_space: f32 = total_main_axis_gap
        + line
            .items
            .iter()
            .map(|child| {
                if child.frozen {
                    child.outer_target_size.main(constants.dir)
                } else {
                    child.flex_basis + child.margin.main_axis_sum(constants.dir)
                }
            })
            .sum::<f32>();

    let initial_free_space = constants.node_inner_size.main(constants.dir).maybe_sub(used_space).unwrap_or(0.0);

    // 4. Distribute free space until every item is frozen. Each round
    // freezes at least one item, so this terminates.
    loop {
        if line.items.iter().all(|child| child.frozen) {
            break;
        }

        let used_space: f32 = total_main_axis_gap
            + line
                .items
                .iter()
                .map(|child| {
                    if child.frozen {
                        child.outer_target_size.main(constants.dir)
                    } else {
                        child.flex_basis + child.margin.main_axis_sum(constants.dir)
                    }
                })
                .sum::<f32>();

        let mut unfrozen: Vec<&mut FlexItem> = line.items.iter_mut().filter(|child| !child.frozen).collect();

        let (sum_flex_grow, sum_flex_shrink): (f32, f32) =
            unfrozen.iter().fold((0.0, 0.0), |(flex_grow, flex_shrink), item| {
                (flex_grow + item.flex_grow, flex_shrink + item.flex_shrink)
            });

        // If the sum of the unfrozen flex factors is less than one, scale
        // the initial free space by that sum
        let free_space = if growing && sum_flex_grow < 1.0 {
            (initial_free_space * sum_flex_grow - total_main_axis_gap)
                .maybe_min(constants.node_inner_size.main(constants.dir).maybe_sub(used_space))
        } else if shrinking && sum_flex_shrink < 1.0 {
            (initial_free_space * sum_flex_shrink - total_main_axis_gap)
                .maybe_max(constants.node_inner_size.main(constants.dir).maybe_sub(used_space))
        } else {
            (constants.node_inner_size.main(constants.dir).maybe_sub(used_space))
                .unwrap_or(used_flex_factor - used_space)
        };

        // Distribute free space proportional to flex factors. Shrinking
        // uses the scaled shrink factor (shrink factor times inner flex
        // basis) so that larger items shrink faster.
        if free_space.is_normal() {
            if growing && sum_flex_grow > 0.0 {
                for child in &mut unfrozen {
                    child
                        .target_size
                        .set_main(constants.dir, child.flex_basis + free_space * (child.flex_grow / sum_flex_grow));
                }
            } else if shrinking && sum_flex_shrink > 0.0 {
                let sum_scaled_shrink_factor: f32 =
                    unfrozen.iter().map(|child| child.inner_flex_basis * child.flex_shrink).sum();

                if sum_scaled_shrink_factor > 0.0 {
                    for child in &mut unfrozen {
                        let scaled_shrink_factor = child.inner_flex_basis * child.flex_shrink;
                        child.target_size.set_main(
                            constants.dir,
                            child.flex_basis + free_space * (scaled_shrink_factor / sum_scaled_shrink_factor),
                        )
                    }
                }
            }
        }

        // Fix min/max violations, flooring the content box at zero
        let total_violation = unfrozen.iter_mut().fold(0.0, |acc, child| -> f32 {
            let resolved_min_main: Option<f32> = Some(child.resolved_minimum_main_size);
            let max_main = child.max_size.main(constants.dir);
            let clamped = child.target_size.main(constants.dir).maybe_clamp(resolved_min_main, max_main).max(0.0);
            child.violation = clamped - child.target_size.main(constants.dir);
            child.target_size.set_main(constants.dir, clamped);
            child.outer_target_size.set_main(
                constants.dir,
                child.target_size.main(constants.dir) + child.margin.main_axis_sum(constants.dir),
            );

            acc + child.violation
        });

        // Freeze over-flexed items: all of them when the total violation
        // is zero, the min violators when positive, the max violators when
        // negative
        for child in &mut unfrozen {
            match total_violation {
                v if v > 0.0 => child.frozen = child.violation > 0.0,
                v if v < 0.0 => child.frozen = child.violation < 0.0,
                _ => child.frozen = true,
            }
        }
    }
}

/// Determine the hypothetical cross size of each item by laying it out with
/// its used main size.
#[inline]
fn determine_hypothetical_cross_size<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    line: &mut FlexLine,
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
) {
    for child in line.items.iter_mut() {
        let padding_border_sum = (child.padding + child.border).cross_axis_sum(constants.dir);

        let child_known_main: AvailableSpace = constants.container_size.main(constants.dir).into();

        let child_cross = child
            .size
            .cross(constants.dir)
            .maybe_clamp(child.min_size.cross(constants.dir), child.max_size.cross(constants.dir))
            .maybe_max(padding_border_sum);

        let child_available_cross = available_space
            .cross(constants.dir)
            .maybe_clamp(child.min_size.cross(constants.dir), child.max_size.cross(constants.dir))
            .maybe_max(Some(padding_border_sum));

        let child_inner_cross = child_cross.unwrap_or_else(|| {
            measure_child_size(
                tree,
                measure,
                child.node,
                Size {
                    width: if constants.is_row { Some(child.target_size.width) } else { child_cross },
                    height: if constants.is_row { child_cross } else { Some(child.target_size.height) },
                },
                constants.node_inner_size,
                Size {
                    width: if constants.is_row { child_known_main } else { child_available_cross },
                    height: if constants.is_row { child_available_cross } else { child_known_main },
                },
                SizingMode::ContentSize,
            )
            .cross(constants.dir)
            .maybe_clamp(child.min_size.cross(constants.dir), child.max_size.cross(constants.dir))
            .max(padding_border_sum)
        });
        let child_outer_cross = child_inner_cross + child.margin.cross_axis_sum(constants.dir);

        child.hypothetical_inner_size.set_cross(constants.dir, child_inner_cross);
        child.hypothetical_outer_size.set_cross(constants.dir, child_outer_cross);
    }
}

/// Calculate baselines for children participating in baseline alignment.
///
/// Baseline alignment only applies in the cross axis of rows, and is a
/// no-op for lines with fewer than two participating items.
#[inline]
fn calculate_children_base_lines<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    flex_lines: &mut [FlexLine],
    constants: &AlgoConstants,
) {
    if !constants.is_row {
        return;
    }

    for line in flex_lines {
        let line_baseline_child_count =
            line.items.iter().filter(|child| child.align_self == AlignSelf::Baseline).count();
        if line_baseline_child_count <= 1 {
            continue;
        }

        for child in line.items.iter_mut() {
            if child.align_self != AlignSelf::Baseline {
                continue;
            }

            let measured_size_and_baselines = perform_child_layout(
                tree,
                measure,
                child.node,
                Size {
                    width: if constants.is_row {
                        Some(child.target_size.width)
                    } else {
                        Some(child.hypothetical_inner_size.width)
                    },
                    height: if constants.is_row {
                        Some(child.hypothetical_inner_size.height)
                    } else {
                        Some(child.target_size.height)
                    },
                },
                constants.node_inner_size,
                Size {
                    width: if constants.is_row {
                        constants.container_size.width.into()
                    } else {
                        available_space.width.maybe_set(node_size.width)
                    },
                    height: if constants.is_row {
                        available_space.height.maybe_set(node_size.height)
                    } else {
                        constants.container_size.height.into()
                    },
                },
                SizingMode::ContentSize,
            );

            let baseline = measured_size_and_baselines.first_baselines.y;
            let height = measured_size_and_baselines.size.height;

            child.baseline = baseline.unwrap_or(height) + child.margin.top;
        }
    }
}

/// Calculate the cross size of each flex line.
#[inline]
fn calculate_cross_size(flex_lines: &mut [FlexLine], node_size: Size<Option<f32>>, constants: &AlgoConstants) {
    // A single-line container with a definite cross size gives its line the
    // container's inner cross size
    if !constants.is_wrap && node_size.cross(constants.dir).is_some() {
        let cross_axis_padding_border = constants.content_box_inset.cross_axis_sum(constants.dir);
        let cross_min_size = constants.min_size.cross(constants.dir);
        let cross_max_size = constants.max_size.cross(constants.dir);
        flex_lines[0].cross_size = node_size
            .cross(constants.dir)
            .maybe_clamp(cross_min_size, cross_max_size)
            .maybe_sub(cross_axis_padding_border)
            .maybe_max(0.0)
            .unwrap_or(0.0);
    } else {
        // Otherwise each line is as large as its largest item, where
        // baseline-aligned items contribute their baseline-adjusted extent
        for line in flex_lines.iter_mut() {
            let max_baseline: f32 = line.items.iter().map(|child| child.baseline).fold(0.0, |acc, x| acc.max(x));
            line.cross_size = line
                .items
                .iter()
                .map(|child| {
                    if child.align_self == AlignSelf::Baseline
                        && !child.margin_is_auto.cross_start(constants.dir)
                        && !child.margin_is_auto.cross_end(constants.dir)
                    {
                        max_baseline - child.baseline + child.hypothetical_outer_size.cross(constants.dir)
                    } else {
                        child.hypothetical_outer_size.cross(constants.dir)
                    }
                })
                .fold(0.0, |acc, x| acc.max(x));
        }

        // A single-line container clamps its line to the container's min
        // and max cross sizes
        if !constants.is_wrap {
            let cross_axis_padding_border = constants.content_box_inset.cross_axis_sum(constants.dir);
            let cross_min_size = constants.min_size.cross(constants.dir);
            let cross_max_size = constants.max_size.cross(constants.dir);
            flex_lines[0].cross_size = flex_lines[0].cross_size.maybe_clamp(
                cross_min_size.maybe_sub(cross_axis_padding_border),
                cross_max_size.maybe_sub(cross_axis_padding_border),
            );
        }
    }
}

/// Grow lines equally to fill a definite container cross size when
/// `align-content: stretch` applies.
#[inline]
fn handle_align_content_stretch(flex_lines: &mut [FlexLine], node_size: Size<Option<f32>>, constants: &AlgoConstants) {
    if constants.align_content == AlignContent::Stretch {
        let cross_axis_padding_border = constants.content_box_inset.cross_axis_sum(constants.dir);
        let cross_min_size = constants.min_size.cross(constants.dir);
        let cross_max_size = constants.max_size.cross(constants.dir);
        let container_min_inner_cross = node_size
            .cross(constants.dir)
            .or(cross_min_size)
            .maybe_clamp(cross_min_size, cross_max_size)
            .maybe_sub(cross_axis_padding_border)
            .maybe_max(0.0)
            .unwrap_or(0.0);

        let total_cross_axis_gap = sum_axis_gaps(constants.gap.cross(constants.dir), flex_lines.len());
        let lines_total_cross: f32 = flex_lines.iter().map(|line| line.cross_size).sum::<f32>() + total_cross_axis_gap;

        if lines_total_cross < container_min_inner_cross {
            let remaining = container_min_inner_cross - lines_total_cross;
            let addition = remaining / flex_lines.len() as f32;
            flex_lines.iter_mut().for_each(|line| line.cross_size += addition);
        }
    }
}

/// Determine the used cross size of each flex item.
///
/// A stretch-aligned item with an auto cross size and non-auto cross
/// margins takes its line's cross size, clamped by its min and max cross
/// sizes. All other items take their hypothetical cross size.
#[inline]
fn determine_used_cross_size<Ctx>(tree: &LayoutTree<Ctx>, flex_lines: &mut [FlexLine], constants: &AlgoConstants) {
    for line in flex_lines {
        let line_cross_size = line.cross_size;

        for child in line.items.iter_mut() {
            let child_style = &tree.node(child.node).style;
            child.target_size.set_cross(
                constants.dir,
                if child.align_self == AlignSelf::Stretch
                    && !child.margin_is_auto.cross_start(constants.dir)
                    && !child.margin_is_auto.cross_end(constants.dir)
                    && child_style.size.cross(constants.dir) == Dimension::Auto
                {
                    // Unusually, max_size does not transfer through the
                    // aspect ratio here. Chrome and Firefox agree.
                    let padding = child_style.padding.resolve_or_zero(constants.node_inner_size.width);
                    let border = child_style.border.resolve_or_zero(constants.node_inner_size.width);
                    let pb_sum = (padding + border).sum_axes();
                    let box_sizing_adjustment =
                        if child_style.box_sizing == BoxSizing::ContentBox { pb_sum } else { Size::<f32>::ZERO };

                    let max_size_ignoring_aspect_ratio =
                        child_style.max_size.maybe_resolve(constants.node_inner_size).maybe_add(box_sizing_adjustment);

                    (line_cross_size - child.margin.cross_axis_sum(constants.dir)).maybe_clamp(
                        child.min_size.cross(constants.dir),
                        max_size_ignoring_aspect_ratio.cross(constants.dir),
                    )
                } else {
                    child.hypothetical_inner_size.cross(constants.dir)
                },
            );

            child.outer_target_size.set_cross(
                constants.dir,
                child.target_size.cross(constants.dir) + child.margin.cross_axis_sum(constants.dir),
            );
        }
    }
}

/// Distribute remaining main-axis free space.
///
/// Positive free space goes to auto margins when any exist; otherwise
/// items are positioned per `justify-content`.
#[inline]
fn distribute_remaining_free_space(flex_lines: &mut [FlexLine], constants: &AlgoConstants) {
    for line in flex_lines {
        let total_main_axis_gap = sum_axis_gaps(constants.gap.main(constants.dir), line.items.len());
        let used_space: f32 = total_main_axis_gap
            + line.items.iter().map(|child| child.outer_target_size.main(constants.dir)).sum::<f32>();
        let free_space = constants.inner_container_size.main(constants.dir) - used_space;
        let mut num_auto_margins = 0;

        for child in line.items.iter_mut() {
            if child.margin_is_auto.main_start(constants.dir) {
                num_auto_margins += 1;
            }
            if child.margin_is_auto.main_end(constants.dir) {
                num_auto_margins += 1;
            }
        }

        if free_space > 0.0 && num_auto_margins > 0 {
            let margin = free_space / num_auto_margins as f32;

            for child in line.items.iter_mut() {
                if child.margin_is_auto.main_start(constants.dir) {
                    if constants.is_row {
                        child.margin.left = margin;
                    } else {
                        child.margin.top = margin;
                    }
                }
                if child.margin_is_auto.main_end(constants.dir) {
                    if constants.is_row {
                        child.margin.right = margin;
                    } else {
                        child.margin.bottom = margin;
                    }
                }
            }
        } else {
            let num_items = line.items.len();
            let layout_reverse = constants.dir.is_reverse();
            let gap = constants.gap.main(constants.dir);
            let is_safe = false;
            let raw_justify_content_mode = constants.justify_content.unwrap_or(JustifyContent::FlexStart);
            let justify_content_mode =
                apply_alignment_fallback(free_space, num_items, raw_justify_content_mode, is_safe);

            let justify_item = |(i, child): (usize, &mut FlexItem)| {
                child.offset_main =
                    compute_alignment_offset(free_space, num_items, gap, justify_content_mode, layout_reverse, i == 0);
            };

            if layout_reverse {
                line.items.iter_mut().rev().enumerate().for_each(justify_item);
            } else {
                line.items.iter_mut().enumerate().for_each(justify_item);
            }
        }
    }
}

/// Resolve cross-axis auto margins, and align items without them.
#[inline]
fn resolve_cross_axis_auto_margins(flex_lines: &mut [FlexLine], constants: &AlgoConstants) {
    for line in flex_lines {
        let line_cross_size = line.cross_size;
        let max_baseline: f32 = line.items.iter_mut().map(|child| child.baseline).fold(0.0, |acc, x| acc.max(x));

        for child in line.items.iter_mut() {
            let free_space = line_cross_size - child.outer_target_size.cross(constants.dir);

            if child.margin_is_auto.cross_start(constants.dir) && child.margin_is_auto.cross_end(constants.dir) {
                if constants.is_row {
                    child.margin.top = free_space / 2.0;
                    child.margin.bottom = free_space / 2.0;
                } else {
                    child.margin.left = free_space / 2.0;
                    child.margin.right = free_space / 2.0;
                }
            } else if child.margin_is_auto.cross_start(constants.dir) {
                if constants.is_row {
                    child.margin.top = free_space;
                } else {
                    child.margin.left = free_space;
                }
            } else if child.margin_is_auto.cross_end(constants.dir) {
                if constants.is_row {
                    child.margin.bottom = free_space;
                } else {
                    child.margin.right = free_space;
                }
            } else {
                child.offset_cross = align_flex_items_along_cross_axis(child, free_space, max_baseline, constants);
            }
        }
    }
}

/// The cross-axis offset of one item within its line, per `align-self`.
#[inline]
fn align_flex_items_along_cross_axis(
    child: &FlexItem,
    free_space: f32,
    max_baseline: f32,
    constants: &AlgoConstants,
) -> f32 {
    match child.align_self {
        AlignSelf::Start => 0.0,
        AlignSelf::FlexStart => {
            if constants.is_wrap_reverse {
                free_space
            } else {
                0.0
            }
        }
        AlignSelf::End => free_space,
        AlignSelf::FlexEnd => {
            if constants.is_wrap_reverse {
                0.0
            } else {
                free_space
            }
        }
        AlignSelf::Center => free_space / 2.0,
        AlignSelf::Baseline => {
            if constants.is_row {
                max_baseline - child.baseline
            } else {
                // Baseline alignment only makes sense in rows; columns
                // treat it as flex-start
                if constants.is_wrap_reverse {
                    free_space
                } else {
                    0.0
                }
            }
        }
        AlignSelf::Stretch => {
            if constants.is_wrap_reverse {
                free_space
            } else {
                0.0
            }
        }
    }
}

/// Determine the container's used cross size and return the sum of the
/// lines' cross sizes.
#[inline]
#[must_use]
fn determine_container_cross_size(
    flex_lines: &[FlexLine],
    node_size: Size<Option<f32>>,
    constants: &mut AlgoConstants,
) -> f32 {
    let total_cross_axis_gap = sum_axis_gaps(constants.gap.cross(constants.dir), flex_lines.len());
    let total_line_cross_size: f32 = flex_lines.iter().map(|line| line.cross_size).sum::<f32>();

    let padding_border_sum = constants.content_box_inset.cross_axis_sum(constants.dir);
    let cross_scrollbar_gutter = constants.scrollbar_gutter.cross(constants.dir);
    let min_cross_size = constants.min_size.cross(constants.dir);
    let max_cross_size = constants.max_size.cross(constants.dir);
    let outer_container_size = node_size
        .cross(constants.dir)
        .unwrap_or(total_line_cross_size + total_cross_axis_gap + padding_border_sum)
        .maybe_clamp(min_cross_size, max_cross_size)
        .max(padding_border_sum - cross_scrollbar_gutter);
    let inner_container_size = (outer_container_size - padding_border_sum).max(0.0);

    constants.container_size.set_cross(constants.dir, outer_container_size);
    constants.inner_container_size.set_cross(constants.dir, inner_container_size);

    total_line_cross_size
}

/// Position each line in the cross axis per `align-content`.
#[inline]
fn align_flex_lines_per_align_content(flex_lines: &mut [FlexLine], constants: &AlgoConstants, total_cross_size: f32) {
    let num_lines = flex_lines.len();
    let gap = constants.gap.cross(constants.dir);
    let total_cross_axis_gap = sum_axis_gaps(gap, num_lines);
    let free_space = constants.inner_container_size.cross(constants.dir) - total_cross_size - total_cross_axis_gap;
    let is_safe = false;

    let align_content_mode = apply_alignment_fallback(free_space, num_lines, constants.align_content, is_safe);

    let align_line = |(i, line): (usize, &mut FlexLine)| {
        line.offset_cross =
            compute_alignment_offset(free_space, num_lines, gap, align_content_mode, constants.is_wrap_reverse, i == 0);
    };

    if constants.is_wrap_reverse {
        flex_lines.iter_mut().rev().enumerate().for_each(align_line);
    } else {
        flex_lines.iter_mut().enumerate().for_each(align_line);
    }
}

/// Lay out a single flex item and store its final layout.
#[allow(clippy::too_many_arguments)]
fn calculate_flex_item<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    item: &mut FlexItem,
    total_offset_main: &mut f32,
    total_offset_cross: f32,
    line_offset_cross: f32,
    total_content_size: &mut Size<f32>,
    container_size: Size<f32>,
    node_inner_size: Size<Option<f32>>,
    direction: FlexDirection,
) {
    let layout_output = perform_child_layout(
        tree,
        measure,
        item.node,
        item.target_size.map(Some),
        node_inner_size,
        container_size.map(AvailableSpace::Definite),
        SizingMode::ContentSize,
    );
    let LayoutOutput { size, content_size, .. } = layout_output;

    let offset_main = *total_offset_main
        + item.offset_main
        + item.margin.main_start(direction)
        + (item.inset.main_start(direction).or(item.inset.main_end(direction).map(|pos| -pos)).unwrap_or(0.0));

    let offset_cross = total_offset_cross
        + item.offset_cross
        + line_offset_cross
        + item.margin.cross_start(direction)
        + (item.inset.cross_start(direction).or(item.inset.cross_end(direction).map(|pos| -pos)).unwrap_or(0.0));

    if direction.is_row() {
        let baseline_offset_cross = total_offset_cross + item.offset_cross + item.margin.cross_start(direction);
        let inner_baseline = layout_output.first_baselines.y.unwrap_or(size.height);
        item.baseline = baseline_offset_cross + inner_baseline;
    } else {
        let baseline_offset_main = *total_offset_main + item.offset_main + item.margin.main_start(direction);
        let inner_baseline = layout_output.first_baselines.y.unwrap_or(size.height);
        item.baseline = baseline_offset_main + inner_baseline;
    }

    let location = match direction.is_row() {
        true => Point { x: offset_main, y: offset_cross },
        false => Point { x: offset_cross, y: offset_main },
    };
    let scrollbar_size = Size {
        width: if item.overflow.y == Overflow::Scroll { item.scrollbar_width } else { 0.0 },
        height: if item.overflow.x == Overflow::Scroll { item.scrollbar_width } else { 0.0 },
    };

    tree.set_unrounded_layout(
        item.node,
        Layout {
            order: item.order,
            size,
            content_size,
            scrollbar_size,
            location,
            padding: item.padding,
            border: item.border,
            margin: item.margin,
        },
    );

    *total_offset_main += item.offset_main + item.margin.main_axis_sum(direction) + size.main(direction);

    *total_content_size =
        total_content_size.f32_max(compute_content_size_contribution(location, size, content_size, item.overflow));
}

/// Lay out one line of items, advancing the cumulative cross offset.
#[allow(clippy::too_many_arguments)]
fn calculate_layout_line<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    line: &mut FlexLine,
    total_offset_cross: &mut f32,
    content_size: &mut Size<f32>,
    container_size: Size<f32>,
    node_inner_size: Size<Option<f32>>,
    padding_border: Rect<f32>,
    direction: FlexDirection,
) {
    let mut total_offset_main = padding_border.main_start(direction);
    let line_offset_cross = line.offset_cross;

    if direction.is_reverse() {
        for item in line.items.iter_mut().rev() {
            calculate_flex_item(
                tree,
                measure,
                item,
                &mut total_offset_main,
                *total_offset_cross,
                line_offset_cross,
                content_size,
                container_size,
                node_inner_size,
                direction,
            );
        }
    } else {
        for item in line.items.iter_mut() {
            calculate_flex_item(
                tree,
                measure,
                item,
                &mut total_offset_main,
                *total_offset_cross,
                line_offset_cross,
                content_size,
                container_size,
                node_inner_size,
                direction,
            );
        }
    }

    *total_offset_cross += line_offset_cross + line.cross_size;
}

/// Do a final layout pass over every line and collect the content size.
#[inline]
fn final_layout_pass<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    flex_lines: &mut [FlexLine],
    constants: &AlgoConstants,
) -> Size<f32> {
    let mut total_offset_cross = constants.content_box_inset.cross_start(constants.dir);
    let mut content_size = Size::<f32>::ZERO;

    if constants.is_wrap_reverse {
        for line in flex_lines.iter_mut().rev() {
            calculate_layout_line(
                tree,
                measure,
                line,
                &mut total_offset_cross,
                &mut content_size,
                constants.container_size,
                constants.node_inner_size,
                constants.content_box_inset,
                constants.dir,
            );
        }
    } else {
        for line in flex_lines.iter_mut() {
            calculate_layout_line(
                tree,
                measure,
                line,
                &mut total_offset_cross,
                &mut content_size,
                constants.container_size,
                constants.node_inner_size,
                constants.content_box_inset,
                constants.dir,
            );
        }
    }

    content_size
}

/// Lay out every absolutely positioned child against the container.
#[inline]
fn perform_absolute_layout_on_absolute_children<Ctx, M: Measure<Ctx>>(
    tree: &mut LayoutTree<Ctx>,
    measure: &mut M,
    node: NodeId,
    constants: &AlgoConstants,
) -> Size<f32> {
    let container_width = constants.container_size.width;
    let container_height = constants.container_size.height;
    // Insets resolve against the container size minus its border and
    // reserved scrollbar gutters
    let inset_relative_size = constants.container_size
        - constants.border.sum_axes()
        - Size { width: constants.scrollbar_gutter.x, height: constants.scrollbar_gutter.y };

    let mut content_size = Size::<f32>::ZERO;

    for (order, child) in tree.child_ids(node).into_iter().enumerate() {
        let child_style = tree.node(child).style.clone();

        if child_style.display == Display::None || child_style.position != Position::Absolute {
            continue;
        }

        let overflow = child_style.overflow;
        let scrollbar_width = child_style.scrollbar_width;
        let aspect_ratio = child_style.aspect_ratio;
        let align_self = child_style.align_self.unwrap_or(constants.align_items);
        let margin = child_style.margin.map(|margin| margin.resolve(Some(inset_relative_size.width)));
        let padding = child_style.padding.resolve_or_zero(Some(inset_relative_size.width));
        let border = child_style.border.resolve_or_zero(Some(inset_relative_size.width));
        let padding_border_sum = (padding + border).sum_axes();
        let box_sizing_adjustment =
            if child_style.box_sizing == BoxSizing::ContentBox { padding_border_sum } else { Size::<f32>::ZERO };

        let left = child_style.inset.left.resolve(Some(inset_relative_size.width));
        let right = child_style.inset.right.resolve(Some(inset_relative_size.width));
        let top = child_style.inset.top.resolve(Some(inset_relative_size.height));
        let bottom = child_style.inset.bottom.resolve(Some(inset_relative_size.height));

        let style_size = child_style
            .size
            .maybe_resolve(inset_relative_size.map(Some))
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment);
        let min_size = child_style
            .min_size
            .maybe_resolve(inset_relative_size.map(Some))
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment)
            .or(padding_border_sum.map(Some))
            .maybe_max(padding_border_sum);
        let max_size = child_style
            .max_size
            .maybe_resolve(inset_relative_size.map(Some))
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_add(box_sizing_adjustment);
        let mut known_dimensions = style_size.maybe_clamp(min_size, max_size);

        // A width can be derived from opposing left and right insets, and
        // symmetrically for height
        if let (None, Some(left), Some(right)) = (known_dimensions.width, left, right) {
            let new_width_raw = inset_relative_size.width.maybe_sub(margin.left).maybe_sub(margin.right) - left - right;
            known_dimensions.width = Some(new_width_raw.max(0.0));
            known_dimensions = known_dimensions.maybe_apply_aspect_ratio(aspect_ratio).maybe_clamp(min_size, max_size);
        }

        if let (None, Some(top), Some(bottom)) = (known_dimensions.height, top, bottom) {
            let new_height_raw =
                inset_relative_size.height.maybe_sub(margin.top).maybe_sub(margin.bottom) - top - bottom;
            known_dimensions.height = Some(new_height_raw.max(0.0));
            known_dimensions = known_dimensions.maybe_apply_aspect_ratio(aspect_ratio).maybe_clamp(min_size, max_size);
        }

        let layout_output = perform_child_layout(
            tree,
            measure,
            child,
            known_dimensions,
            constants.node_inner_size,
            Size {
                width: AvailableSpace::Definite(container_width.maybe_clamp(min_size.width, max_size.width)),
                height: AvailableSpace::Definite(container_height.maybe_clamp(min_size.height, max_size.height)),
            },
            SizingMode::InherentSize,
        );
        let measured_size = layout_output.size;
        let final_size = known_dimensions.unwrap_or(measured_size).maybe_clamp(min_size, max_size);

        let non_auto_margin = margin.map(|m| m.unwrap_or(0.0));

        let free_space = Size {
            width: constants.container_size.width - final_size.width - non_auto_margin.horizontal_axis_sum(),
            height: constants.container_size.height - final_size.height - non_auto_margin.vertical_axis_sum(),
        }
        .f32_max(Size::<f32>::ZERO);

        // Auto margins expand to fill the free space
        let resolved_margin = {
            let auto_margin_size = Size {
                width: {
                    let auto_margin_count = margin.left.is_none() as u8 + margin.right.is_none() as u8;
                    if auto_margin_count > 0 {
                        free_space.width / auto_margin_count as f32
                    } else {
                        0.0
                    }
                },
                height: {
                    let auto_margin_count = margin.top.is_none() as u8 + margin.bottom.is_none() as u8;
                    if auto_margin_count > 0 {
                        free_space.height / auto_margin_count as f32
                    } else {
                        0.0
                    }
                },
            };

            Rect {
                left: margin.left.unwrap_or(auto_margin_size.width),
                right: margin.right.unwrap_or(auto_margin_size.width),
                top: margin.top.unwrap_or(auto_margin_size.height),
                bottom: margin.bottom.unwrap_or(auto_margin_size.height),
            }
        };

        let (start_main, end_main) = if constants.is_row { (left, right) } else { (top, bottom) };
        let (start_cross, end_cross) = if constants.is_row { (top, bottom) } else { (left, right) };

        // Main-axis position: from the start inset, else from the end
        // inset, else fall back to justify-content based positioning
        let offset_main = if let Some(start) = start_main {
            start + constants.border.main_start(constants.dir) + resolved_margin.main_start(constants.dir)
        } else if let Some(end) = end_main {
            constants.container_size.main(constants.dir)
                - constants.border.main_end(constants.dir)
                - constants.scrollbar_gutter.main(constants.dir)
                - final_size.main(constants.dir)
                - end
                - resolved_margin.main_end(constants.dir)
        } else {
            // Stretch is not a valid justify-content value in flexbox, so
            // it behaves as flex-start
            match (constants.justify_content.unwrap_or(JustifyContent::Start), constants.is_wrap_reverse) {
                (JustifyContent::SpaceBetween, _)
                | (JustifyContent::Start, _)
                | (JustifyContent::Stretch, false)
                | (JustifyContent::FlexStart, false)
                | (JustifyContent::FlexEnd, true) => {
                    constants.content_box_inset.main_start(constants.dir) + resolved_margin.main_start(constants.dir)
                }
                (JustifyContent::End, _)
                | (JustifyContent::FlexEnd, false)
                | (JustifyContent::FlexStart, true)
                | (JustifyContent::Stretch, true) => {
                    constants.container_size.main(constants.dir)
                        - constants.content_box_inset.main_end(constants.dir)
                        - final_size.main(constants.dir)
                        - resolved_margin.main_end(constants.dir)
                }
                (JustifyContent::SpaceEvenly, _) | (JustifyContent::SpaceAround, _) | (JustifyContent::Center, _) => {
                    (constants.container_size.main(constants.dir)
                        + constants.content_box_inset.main_start(constants.dir)
                        - constants.content_box_inset.main_end(constants.dir)
                        - final_size.main(constants.dir)
                        + resolved_margin.main_start(constants.dir)
                        - resolved_margin.main_end(constants.dir))
                        / 2.0
                }
            }
        };

        // Cross-axis position, driven by align-self. Stretch does not
        // apply to absolutely positioned items and behaves as flex-start.
        let offset_cross = if let Some(start) = start_cross {
            start + constants.border.cross_start(constants.dir) + resolved_margin.cross_start(constants.dir)
        } else if let Some(end) = end_cross {
            constants.container_size.cross(constants.dir)
                - constants.border.cross_end(constants.dir)
                - constants.scrollbar_gutter.cross(constants.dir)
                - final_size.cross(constants.dir)
                - end
                - resolved_margin.cross_end(constants.dir)
        } else {
            match (align_self, constants.is_wrap_reverse) {
                (AlignSelf::Start, _)
                | (AlignSelf::Baseline | AlignSelf::Stretch | AlignSelf::FlexStart, false)
                | (AlignSelf::FlexEnd, true) => {
                    constants.content_box_inset.cross_start(constants.dir) + resolved_margin.cross_start(constants.dir)
                }
                (AlignSelf::End, _)
                | (AlignSelf::Baseline | AlignSelf::Stretch | AlignSelf::FlexStart, true)
                | (AlignSelf::FlexEnd, false) => {
                    constants.container_size.cross(constants.dir)
                        - constants.content_box_inset.cross_end(constants.dir)
                        - final_size.cross(constants.dir)
                        - resolved_margin.cross_end(constants.dir)
                }
                (AlignSelf::Center, _) => {
                    (constants.container_size.cross(constants.dir)
                        + constants.content_box_inset.cross_start(constants.dir)
                        - constants.content_box_inset.cross_end(constants.dir)
                        - final_size.cross(constants.dir)
                        + resolved_margin.cross_start(constants.dir)
                        - resolved_margin.cross_end(constants.dir))
                        / 2.0
                }
            }
        };

        let location = match constants.is_row {
            true => Point { x: offset_main, y: offset_cross },
            false => Point { x: offset_cross, y: offset_main },
        };
        let scrollbar_size = Size {
            width: if overflow.y == Overflow::Scroll { scrollbar_width } else { 0.0 },
            height: if overflow.x == Overflow::Scroll { scrollbar_width } else { 0.0 },
        };
        tree.set_unrounded_layout(
            child,
            Layout {
                order: order as u32,
                size: final_size,
                content_size: layout_output.content_size,
                scrollbar_size,
                location,
                padding,
                border,
                margin: resolved_margin,
            },
        );

        content_size = content_size.f32_max(compute_content_size_contribution(
            location,
            final_size,
            layout_output.content_size,
            overflow,
        ));
    }

    content_size
}

/// The total space taken up by gaps between `num_items` items.
#[inline(always)]
fn sum_axis_gaps(gap: f32, num_items: usize) -> f32 {
    if num_items <= 1 {
        0.0
    } else {
        gap * (num_items - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::LayoutTree;
    use lattice_core::{
        AlignItems, Dimension, FlexDirection, FlexWrap, JustifyContent, LengthPercentage, LengthPercentageAuto,
        Point, Position, Rect, Size, Style,
    };

    fn length(value: f32) -> Dimension {
        Dimension::Length(value)
    }

    #[test]
    fn test_grow_distributes_free_space_equally() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let grow = Style { flex_grow: 1.0, ..Default::default() };
        let child_a = tree.new_leaf(grow.clone()).unwrap();
        let child_b = tree.new_leaf(grow).unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 50.0), ..Default::default() }, &[child_a, child_b])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        let a = tree.layout(child_a).unwrap();
        let b = tree.layout(child_b).unwrap();
        assert_eq!(a.size, Size::new(50.0, 50.0));
        assert_eq!(b.size, Size::new(50.0, 50.0));
        assert_eq!(a.location, Point { x: 0.0, y: 0.0 });
        assert_eq!(b.location, Point { x: 50.0, y: 0.0 });
    }

    #[test]
    fn test_shrink_scales_by_basis() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let wide = Style { size: Size { width: length(100.0), height: length(20.0) }, ..Default::default() };
        let child_a = tree.new_leaf(wide.clone()).unwrap();
        let child_b = tree.new_leaf(wide).unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 50.0), ..Default::default() }, &[child_a, child_b])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child_a).unwrap().size.width, 50.0);
        assert_eq!(tree.layout(child_b).unwrap().size.width, 50.0);
        assert_eq!(tree.layout(child_b).unwrap().location.x, 50.0);
    }

    #[test]
    fn test_gap_contributes_to_intrinsic_main_size() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let item = Style { size: Size::<Dimension>::from_lengths(20.0, 10.0), ..Default::default() };
        let children = [
            tree.new_leaf(item.clone()).unwrap(),
            tree.new_leaf(item.clone()).unwrap(),
            tree.new_leaf(item).unwrap(),
        ];
        let root = tree
            .new_with_children(
                Style {
                    gap: Size { width: LengthPercentage::length(10.0), height: LengthPercentage::ZERO },
                    ..Default::default()
                },
                &children,
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(root).unwrap().size, Size::new(80.0, 10.0));
        assert_eq!(tree.layout(children[0]).unwrap().location.x, 0.0);
        assert_eq!(tree.layout(children[1]).unwrap().location.x, 30.0);
        assert_eq!(tree.layout(children[2]).unwrap().location.x, 60.0);
    }

    #[test]
    fn test_justify_content_space_between() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let item = Style { size: Size::<Dimension>::from_lengths(20.0, 10.0), ..Default::default() };
        let child_a = tree.new_leaf(item.clone()).unwrap();
        let child_b = tree.new_leaf(item).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    size: Size::<Dimension>::from_lengths(100.0, 20.0),
                    justify_content: Some(JustifyContent::SpaceBetween),
                    ..Default::default()
                },
                &[child_a, child_b],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child_a).unwrap().location.x, 0.0);
        assert_eq!(tree.layout(child_b).unwrap().location.x, 80.0);
    }

    #[test]
    fn test_wrap_creates_second_line() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let item = Style { size: Size::<Dimension>::from_lengths(40.0, 10.0), ..Default::default() };
        let children = [
            tree.new_leaf(item.clone()).unwrap(),
            tree.new_leaf(item.clone()).unwrap(),
            tree.new_leaf(item).unwrap(),
        ];
        let root = tree
            .new_with_children(
                Style {
                    flex_wrap: FlexWrap::Wrap,
                    size: Size { width: length(100.0), height: Dimension::Auto },
                    ..Default::default()
                },
                &children,
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(root).unwrap().size.height, 20.0);
        assert_eq!(tree.layout(children[1]).unwrap().location, Point { x: 40.0, y: 0.0 });
        assert_eq!(tree.layout(children[2]).unwrap().location, Point { x: 0.0, y: 10.0 });
    }

    #[test]
    fn test_main_axis_auto_margins_center_item() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(Style {
                size: Size::<Dimension>::from_lengths(20.0, 10.0),
                margin: Rect {
                    left: LengthPercentageAuto::Auto,
                    right: LengthPercentageAuto::Auto,
                    top: LengthPercentageAuto::ZERO,
                    bottom: LengthPercentageAuto::ZERO,
                },
                ..Default::default()
            })
            .unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 20.0), ..Default::default() }, &[child])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child).unwrap().location.x, 40.0);
    }

    #[test]
    fn test_column_align_items_center() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(20.0, 20.0), ..Default::default() }).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    flex_direction: FlexDirection::Column,
                    align_items: Some(AlignItems::Center),
                    size: Size::<Dimension>::from_lengths(100.0, 100.0),
                    ..Default::default()
                },
                &[child],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child).unwrap().location, Point { x: 40.0, y: 0.0 });
    }

    #[test]
    fn test_max_size_freezes_item_and_redistributes() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let capped = tree
            .new_leaf(Style {
                flex_grow: 1.0,
                max_size: Size { width: length(10.0), height: Dimension::Auto },
                ..Default::default()
            })
            .unwrap();
        let hungry = tree.new_leaf(Style { flex_grow: 1.0, ..Default::default() }).unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 20.0), ..Default::default() }, &[capped, hungry])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(capped).unwrap().size.width, 10.0);
        assert_eq!(tree.layout(hungry).unwrap().size.width, 90.0);
        assert_eq!(tree.layout(hungry).unwrap().location.x, 10.0);
    }

    #[test]
    fn test_absolute_child_sized_by_opposing_insets() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let abs = tree
            .new_leaf(Style {
                position: Position::Absolute,
                inset: Rect {
                    left: LengthPercentageAuto::length(10.0),
                    right: LengthPercentageAuto::length(10.0),
                    top: LengthPercentageAuto::length(10.0),
                    bottom: LengthPercentageAuto::length(10.0),
                },
                ..Default::default()
            })
            .unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 100.0), ..Default::default() }, &[abs])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        let layout = tree.layout(abs).unwrap();
        assert_eq!(layout.size, Size::new(80.0, 80.0));
        assert_eq!(layout.location, Point { x: 10.0, y: 10.0 });
    }

    #[test]
    fn test_percentage_child_width_resolves_against_container() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(Style {
                size: Size { width: Dimension::Percent(0.5), height: length(10.0) },
                ..Default::default()
            })
            .unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(200.0, 50.0), ..Default::default() }, &[child])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        assert_eq!(tree.layout(child).unwrap().size.width, 100.0);
    }

    #[test]
    fn test_row_reverse_positions_from_end() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let item = Style { size: Size::<Dimension>::from_lengths(20.0, 10.0), ..Default::default() };
        let child_a = tree.new_leaf(item.clone()).unwrap();
        let child_b = tree.new_leaf(item).unwrap();
        let root = tree
            .new_with_children(
                Style {
                    flex_direction: FlexDirection::RowReverse,
                    size: Size::<Dimension>::from_lengths(100.0, 20.0),
                    ..Default::default()
                },
                &[child_a, child_b],
            )
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();

        // The first child lands at the visual end of the row
        assert_eq!(tree.layout(child_b).unwrap().location.x, 60.0);
        assert_eq!(tree.layout(child_a).unwrap().location.x, 80.0);
    }
}
