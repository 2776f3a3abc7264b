//! The measurement callback protocol for content-sized leaves.

use lattice_core::{AvailableSpace, NodeId, Size, Style};

/// Supplies content sizes for leaf nodes that carry a context value.
///
/// The engine calls this for a leaf whenever style alone cannot determine
/// its size. `known_dimensions` carries any dimensions already fixed by
/// style or the parent algorithm; a correct implementation echoes those
/// back unchanged and only computes the unknown axes against
/// `available_space`.
///
/// The same inputs must always produce the same output for a given node
/// state, as results are cached and replayed.
pub trait Measure<Ctx> {
    /// Measure the content of `node`.
    fn measure(
        &mut self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        node: NodeId,
        context: Option<&mut Ctx>,
        style: &Style,
    ) -> Size<f32>;
}

impl<Ctx, F> Measure<Ctx> for F
where
    F: FnMut(Size<Option<f32>>, Size<AvailableSpace>, NodeId, Option<&mut Ctx>, &Style) -> Size<f32>,
{
    fn measure(
        &mut self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        node: NodeId,
        context: Option<&mut Ctx>,
        style: &Style,
    ) -> Size<f32> {
        self(known_dimensions, available_space, node, context, style)
    }
}

/// The measure function used when the caller supplies none: every leaf
/// measures as zero-sized.
pub struct NoMeasure;

impl<Ctx> Measure<Ctx> for NoMeasure {
    fn measure(
        &mut self,
        _known_dimensions: Size<Option<f32>>,
        _available_space: Size<AvailableSpace>,
        _node: NodeId,
        _context: Option<&mut Ctx>,
        _style: &Style,
    ) -> Size<f32> {
        Size::<f32>::ZERO
    }
}
