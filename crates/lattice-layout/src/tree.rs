//! The node arena and the public tree-building API.

use indexmap::IndexMap;
use smallvec::SmallVec;

use lattice_core::{AvailableSpace, Layout, NodeId, Size, Style, TreeError, TreeResult};

use crate::cache::Cache;
use crate::compute::compute_root_layout;
use crate::measure::{Measure, NoMeasure};
use crate::round::{copy_unrounded_layout, round_layout};

/// Everything the tree stores for one node.
pub(crate) struct NodeData<Ctx> {
    pub(crate) style: Style,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    /// Opaque user data handed to the measure callback for leaves
    pub(crate) context: Option<Ctx>,
    pub(crate) cache: Cache,
    /// Layout in exact f32 coordinates, the input to the rounding pass
    pub(crate) unrounded_layout: Layout,
    /// The layout reported to callers, rounded when rounding is enabled
    pub(crate) final_layout: Layout,
}

impl<Ctx> NodeData<Ctx> {
    fn new(style: Style, context: Option<Ctx>) -> Self {
        Self {
            style,
            parent: None,
            children: SmallVec::new(),
            context,
            cache: Cache::new(),
            unrounded_layout: Layout::new(),
            final_layout: Layout::new(),
        }
    }
}

/// A tree of styled nodes and the engine that lays them out.
///
/// Nodes live in an arena keyed by [`NodeId`]. Ids are allocated
/// monotonically and never reused, so a stale id held after [`remove`]
/// yields [`TreeError::InvalidNodeId`] rather than aliasing a new node.
///
/// The context type parameter `Ctx` is per-node user data passed to the
/// measure callback of [`compute_layout_with_measure`]; trees that never
/// measure can leave it as `()`.
///
/// [`remove`]: LayoutTree::remove
/// [`compute_layout_with_measure`]: LayoutTree::compute_layout_with_measure
pub struct LayoutTree<Ctx = ()> {
    nodes: IndexMap<NodeId, NodeData<Ctx>>,
    next_id: u64,
    use_rounding: bool,
}

impl<Ctx> Default for LayoutTree<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> LayoutTree<Ctx> {
    /// An empty tree.
    pub fn new() -> Self {
        Self { nodes: IndexMap::new(), next_id: 0, use_rounding: true }
    }

    /// An empty tree with pre-allocated capacity for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: IndexMap::with_capacity(capacity), next_id: 0, use_rounding: true }
    }

    /// Round layouts to whole pixels after each compute pass. This is the
    /// default.
    pub fn enable_rounding(&mut self) {
        self.use_rounding = true;
    }

    /// Report layouts in exact f32 coordinates.
    pub fn disable_rounding(&mut self) {
        self.use_rounding = false;
    }

    fn allocate(&mut self, data: NodeData<Ctx>) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, data);
        id
    }

    fn data(&self, node: NodeId) -> TreeResult<&NodeData<Ctx>> {
        self.nodes.get(&node).ok_or(TreeError::InvalidNodeId(node))
    }

    fn data_mut(&mut self, node: NodeId) -> TreeResult<&mut NodeData<Ctx>> {
        self.nodes.get_mut(&node).ok_or(TreeError::InvalidNodeId(node))
    }

    /// Create a childless node.
    pub fn new_leaf(&mut self, style: Style) -> TreeResult<NodeId> {
        Ok(self.allocate(NodeData::new(style, None)))
    }

    /// Create a childless node carrying a context value for the measure
    /// callback.
    pub fn new_leaf_with_context(&mut self, style: Style, context: Ctx) -> TreeResult<NodeId> {
        Ok(self.allocate(NodeData::new(style, Some(context))))
    }

    /// Create a node with the given children.
    pub fn new_with_children(&mut self, style: Style, children: &[NodeId]) -> TreeResult<NodeId> {
        for child in children {
            self.data(*child)?;
        }
        let id = self.allocate(NodeData::new(style, None));
        for child in children {
            if let Some(child_data) = self.nodes.get_mut(child) {
                child_data.parent = Some(id);
            }
        }
        if let Some(data) = self.nodes.get_mut(&id) {
            data.children = SmallVec::from_slice(children);
        }
        Ok(id)
    }

    /// Remove a node from the tree, detaching it from its parent and
    /// orphaning its children. Returns the removed id, which is never
    /// allocated again.
    pub fn remove(&mut self, node: NodeId) -> TreeResult<NodeId> {
        let parent = self.data(node)?.parent;
        if let Some(parent) = parent {
            self.mark_dirty(parent)?;
            if let Some(parent_data) = self.nodes.get_mut(&parent) {
                parent_data.children.retain(|child| *child != node);
            }
        }

        let children: SmallVec<[NodeId; 4]> =
            self.nodes.get(&node).map(|data| data.children.clone()).unwrap_or_default();
        for child in children {
            if let Some(child_data) = self.nodes.get_mut(&child) {
                child_data.parent = None;
            }
        }

        self.nodes.swap_remove(&node);
        Ok(node)
    }

    /// Append a child to a parent's child list.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.data(child)?;
        self.data_mut(parent)?.children.push(child);
        if let Some(child_data) = self.nodes.get_mut(&child) {
            child_data.parent = Some(parent);
        }
        self.mark_dirty(parent)
    }

    /// Insert a child at a position in a parent's child list, shifting
    /// later children up.
    pub fn insert_child_at_index(&mut self, parent: NodeId, child_index: usize, child: NodeId) -> TreeResult<()> {
        self.data(child)?;
        let child_count = self.data(parent)?.children.len();
        if child_index > child_count {
            return Err(TreeError::ChildIndexOutOfBounds { parent, child_index, child_count });
        }
        self.data_mut(parent)?.children.insert(child_index, child);
        if let Some(child_data) = self.nodes.get_mut(&child) {
            child_data.parent = Some(parent);
        }
        self.mark_dirty(parent)
    }

    /// Replace a parent's entire child list.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> TreeResult<()> {
        for child in children {
            self.data(*child)?;
        }
        let old_children = core::mem::take(&mut self.data_mut(parent)?.children);
        for child in old_children {
            if let Some(child_data) = self.nodes.get_mut(&child) {
                child_data.parent = None;
            }
        }
        for child in children {
            if let Some(child_data) = self.nodes.get_mut(child) {
                child_data.parent = Some(parent);
            }
        }
        self.data_mut(parent)?.children = SmallVec::from_slice(children);
        self.mark_dirty(parent)
    }

    /// Remove a specific child from a parent's child list, leaving the
    /// child node itself in the tree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<NodeId> {
        let index = self
            .data(parent)?
            .children
            .iter()
            .position(|id| *id == child)
            .ok_or(TreeError::InvalidNodeId(child))?;
        self.remove_child_at_index(parent, index)
    }

    /// Remove the child at a position in a parent's child list, leaving the
    /// child node itself in the tree.
    pub fn remove_child_at_index(&mut self, parent: NodeId, child_index: usize) -> TreeResult<NodeId> {
        let child_count = self.data(parent)?.children.len();
        if child_index >= child_count {
            return Err(TreeError::ChildIndexOutOfBounds { parent, child_index, child_count });
        }
        let child = self.data_mut(parent)?.children.remove(child_index);
        if let Some(child_data) = self.nodes.get_mut(&child) {
            child_data.parent = None;
        }
        self.mark_dirty(parent)?;
        Ok(child)
    }

    /// Swap the child at a position for another node, returning the
    /// replaced child.
    pub fn replace_child_at_index(
        &mut self,
        parent: NodeId,
        child_index: usize,
        new_child: NodeId,
    ) -> TreeResult<NodeId> {
        self.data(new_child)?;
        let child_count = self.data(parent)?.children.len();
        if child_index >= child_count {
            return Err(TreeError::ChildIndexOutOfBounds { parent, child_index, child_count });
        }
        let old_child = core::mem::replace(&mut self.data_mut(parent)?.children[child_index], new_child);
        if let Some(old_data) = self.nodes.get_mut(&old_child) {
            old_data.parent = None;
        }
        if let Some(new_data) = self.nodes.get_mut(&new_child) {
            new_data.parent = Some(parent);
        }
        self.mark_dirty(parent)?;
        Ok(old_child)
    }

    /// The child at a position in a parent's child list.
    pub fn child_at_index(&self, parent: NodeId, child_index: usize) -> TreeResult<NodeId> {
        let children = &self.data(parent)?.children;
        children.get(child_index).copied().ok_or(TreeError::ChildIndexOutOfBounds {
            parent,
            child_index,
            child_count: children.len(),
        })
    }

    /// The number of children of a node.
    pub fn child_count(&self, parent: NodeId) -> TreeResult<usize> {
        Ok(self.data(parent)?.children.len())
    }

    /// The children of a node, in order.
    pub fn children(&self, parent: NodeId) -> TreeResult<Vec<NodeId>> {
        Ok(self.data(parent)?.children.to_vec())
    }

    /// The parent of a node, or `None` for a root.
    pub fn parent(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.data(node)?.parent)
    }

    /// The number of live nodes in the arena.
    pub fn total_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Replace a node's style and invalidate affected layouts.
    pub fn set_style(&mut self, node: NodeId, style: Style) -> TreeResult<()> {
        self.data_mut(node)?.style = style;
        self.mark_dirty(node)
    }

    /// A node's current style.
    pub fn style(&self, node: NodeId) -> TreeResult<&Style> {
        Ok(&self.data(node)?.style)
    }

    /// Remove every node. Ids stay retired; the allocator is not reset.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// A node's layout as of the last compute pass.
    pub fn layout(&self, node: NodeId) -> TreeResult<&Layout> {
        Ok(&self.data(node)?.final_layout)
    }

    /// Attach, replace, or remove (`None`) a node's measure context.
    pub fn set_node_context(&mut self, node: NodeId, context: Option<Ctx>) -> TreeResult<()> {
        self.data_mut(node)?.context = context;
        self.mark_dirty(node)
    }

    /// A node's measure context, if any.
    pub fn get_node_context(&self, node: NodeId) -> Option<&Ctx> {
        self.nodes.get(&node).and_then(|data| data.context.as_ref())
    }

    /// A node's measure context, mutably.
    pub fn get_node_context_mut(&mut self, node: NodeId) -> Option<&mut Ctx> {
        self.nodes.get_mut(&node).and_then(|data| data.context.as_mut())
    }

    /// True if the node's layout is out of date and will be recomputed by
    /// the next compute pass.
    pub fn dirty(&self, node: NodeId) -> TreeResult<bool> {
        Ok(self.data(node)?.cache.is_empty())
    }

    /// Invalidate the cached layout of a node and every ancestor.
    pub fn mark_dirty(&mut self, node: NodeId) -> TreeResult<()> {
        self.data(node)?;
        let mut current = Some(node);
        while let Some(id) = current {
            match self.nodes.get_mut(&id) {
                Some(data) => {
                    data.cache.clear();
                    current = data.parent;
                }
                None => current = None,
            }
        }
        Ok(())
    }

    /// Lay out the subtree rooted at `root` into the given available space.
    ///
    /// Leaves without styles sizes measure as zero; use
    /// [`compute_layout_with_measure`](Self::compute_layout_with_measure)
    /// to supply content measurement.
    pub fn compute_layout(&mut self, root: NodeId, available_space: Size<AvailableSpace>) -> TreeResult<()> {
        self.compute_layout_with_measure(root, available_space, NoMeasure)
    }

    /// Lay out the subtree rooted at `root`, measuring content-sized
    /// leaves through `measure`.
    pub fn compute_layout_with_measure<M: Measure<Ctx>>(
        &mut self,
        root: NodeId,
        available_space: Size<AvailableSpace>,
        mut measure: M,
    ) -> TreeResult<()> {
        self.data(root)?;
        compute_root_layout(self, &mut measure, root, available_space);
        if self.use_rounding {
            round_layout(self, root);
        } else {
            copy_unrounded_layout(self, root);
        }
        Ok(())
    }

    // Internal accessors for the layout algorithms. These index directly:
    // the algorithms only ever hold ids reachable from a live root.

    pub(crate) fn node(&self, node: NodeId) -> &NodeData<Ctx> {
        &self.nodes[&node]
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> &mut NodeData<Ctx> {
        &mut self.nodes[&node]
    }

    pub(crate) fn child_ids(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[&node].children.to_vec()
    }

    pub(crate) fn set_unrounded_layout(&mut self, node: NodeId, layout: Layout) {
        self.nodes[&node].unrounded_layout = layout;
    }

    pub(crate) fn measure_node<M: Measure<Ctx>>(
        &mut self,
        measure: &mut M,
        node: NodeId,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
    ) -> Size<f32> {
        match self.nodes.get_mut(&node) {
            Some(data) => {
                measure.measure(known_dimensions, available_space, node, data.context.as_mut(), &data.style)
            }
            None => Size::<f32>::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::{Dimension, Point};

    #[test]
    fn test_child_count_matches_children() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let a = tree.new_leaf(Style::default()).unwrap();
        let b = tree.new_leaf(Style::default()).unwrap();
        let parent = tree.new_with_children(Style::default(), &[a, b]).unwrap();

        assert_eq!(tree.child_count(parent).unwrap(), 2);
        assert_eq!(tree.children(parent).unwrap(), vec![a, b]);
        assert_eq!(tree.child_at_index(parent, 1).unwrap(), b);
        assert_eq!(tree.parent(a).unwrap(), Some(parent));
        assert_eq!(tree.total_node_count(), 3);
    }

    #[test]
    fn test_removed_node_id_is_invalid() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree.new_leaf(Style::default()).unwrap();
        let parent = tree.new_with_children(Style::default(), &[child]).unwrap();

        assert_eq!(tree.remove(child).unwrap(), child);
        assert_eq!(tree.child_count(parent).unwrap(), 0);
        assert!(matches!(tree.style(child), Err(TreeError::InvalidNodeId(id)) if id == child));
        assert!(matches!(tree.layout(child), Err(TreeError::InvalidNodeId(_))));

        // Ids are never reused
        let fresh = tree.new_leaf(Style::default()).unwrap();
        assert_ne!(fresh, child);
    }

    #[test]
    fn test_child_index_out_of_bounds() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree.new_leaf(Style::default()).unwrap();
        let parent = tree.new_with_children(Style::default(), &[child]).unwrap();

        let result = tree.child_at_index(parent, 5);
        assert!(matches!(
            result,
            Err(TreeError::ChildIndexOutOfBounds { child_index: 5, child_count: 1, .. })
        ));
        assert!(tree.remove_child_at_index(parent, 1).is_err());

        // Failed mutations leave the child list untouched
        assert_eq!(tree.children(parent).unwrap(), vec![child]);
    }

    #[test]
    fn test_insert_and_replace_children() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let a = tree.new_leaf(Style::default()).unwrap();
        let b = tree.new_leaf(Style::default()).unwrap();
        let c = tree.new_leaf(Style::default()).unwrap();
        let parent = tree.new_with_children(Style::default(), &[a, b]).unwrap();

        tree.insert_child_at_index(parent, 1, c).unwrap();
        assert_eq!(tree.children(parent).unwrap(), vec![a, c, b]);

        let replaced = tree.replace_child_at_index(parent, 0, b).unwrap();
        assert_eq!(replaced, a);
        assert_eq!(tree.parent(a).unwrap(), None);
        assert_eq!(tree.parent(b).unwrap(), Some(parent));
    }

    #[test]
    fn test_mark_dirty_propagates_to_ancestors() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let leaf = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(10.0, 10.0), ..Default::default() }).unwrap();
        let middle = tree.new_with_children(Style::default(), &[leaf]).unwrap();
        let root = tree.new_with_children(Style::default(), &[middle]).unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert!(!tree.dirty(root).unwrap());
        assert!(!tree.dirty(middle).unwrap());

        tree.mark_dirty(leaf).unwrap();
        assert!(tree.dirty(leaf).unwrap());
        assert!(tree.dirty(middle).unwrap());
        assert!(tree.dirty(root).unwrap());
    }

    #[test]
    fn test_set_style_invalidates_layout() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree.new_leaf(Style { size: Size::<Dimension>::from_lengths(10.0, 10.0), ..Default::default() }).unwrap();
        let root = tree.new_with_children(Style::default(), &[child]).unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(root).unwrap().size, Size::new(10.0, 10.0));

        tree.set_style(child, Style { size: Size::<Dimension>::from_lengths(25.0, 10.0), ..Default::default() }).unwrap();
        assert!(tree.dirty(root).unwrap());
        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(tree.layout(root).unwrap().size, Size::new(25.0, 10.0));
    }

    #[test]
    fn test_set_children_reparents() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let a = tree.new_leaf(Style::default()).unwrap();
        let b = tree.new_leaf(Style::default()).unwrap();
        let parent = tree.new_with_children(Style::default(), &[a]).unwrap();

        tree.set_children(parent, &[b]).unwrap();
        assert_eq!(tree.parent(a).unwrap(), None);
        assert_eq!(tree.parent(b).unwrap(), Some(parent));
        assert_eq!(tree.children(parent).unwrap(), vec![b]);
    }

    #[test]
    fn test_node_context_round_trip() {
        let mut tree: LayoutTree<u32> = LayoutTree::new();
        let node = tree.new_leaf_with_context(Style::default(), 7).unwrap();

        assert_eq!(tree.get_node_context(node), Some(&7));
        *tree.get_node_context_mut(node).unwrap() = 9;
        assert_eq!(tree.get_node_context(node), Some(&9));

        tree.set_node_context(node, None).unwrap();
        assert_eq!(tree.get_node_context(node), None);
    }

    #[test]
    fn test_compute_layout_on_invalid_node() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let node = tree.new_leaf(Style::default()).unwrap();
        tree.remove(node).unwrap();
        assert!(matches!(
            tree.compute_layout(node, Size::MAX_CONTENT),
            Err(TreeError::InvalidNodeId(_))
        ));
    }

    #[test]
    fn test_clear_empties_the_arena() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let a = tree.new_leaf(Style::default()).unwrap();
        tree.new_with_children(Style::default(), &[a]).unwrap();
        assert_eq!(tree.total_node_count(), 2);

        tree.clear();
        assert_eq!(tree.total_node_count(), 0);
        assert!(tree.style(a).is_err());

        // The allocator keeps running forward after a clear
        let fresh = tree.new_leaf(Style::default()).unwrap();
        assert_ne!(fresh, a);
    }

    #[test]
    fn test_relayout_is_idempotent() {
        let mut tree: LayoutTree<()> = LayoutTree::new();
        let child = tree
            .new_leaf(Style {
                size: Size { width: Dimension::Percent(0.5), height: Dimension::Length(30.0) },
                ..Default::default()
            })
            .unwrap();
        let root = tree
            .new_with_children(Style { size: Size::<Dimension>::from_lengths(100.0, 50.0), ..Default::default() }, &[child])
            .unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        let first_root = *tree.layout(root).unwrap();
        let first_child = *tree.layout(child).unwrap();

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(*tree.layout(root).unwrap(), first_root);
        assert_eq!(*tree.layout(child).unwrap(), first_child);

        assert_eq!(tree.layout(child).unwrap().location, Point::ZERO);
    }
}
