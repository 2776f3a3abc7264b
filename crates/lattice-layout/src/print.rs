//! Debug printing of computed layouts.

use lattice_core::{Display, NodeId};

use crate::tree::LayoutTree;

/// Print an indented representation of the subtree's final layouts to
/// stdout.
pub fn print_tree<Ctx>(tree: &LayoutTree<Ctx>, root: NodeId) {
    println!("TREE");
    print_node(tree, root, false, String::new());
}

fn print_node<Ctx>(tree: &LayoutTree<Ctx>, node: NodeId, has_sibling: bool, lines: String) {
    let data = tree.node(node);
    let layout = &data.final_layout;
    let label = match (data.style.display, data.children.is_empty()) {
        (Display::None, _) => "NONE",
        (_, true) => "LEAF",
        (Display::Block, false) => "BLOCK",
        (Display::Flex, false) => "FLEX",
        (Display::Grid, false) => "GRID",
    };

    let fork = if has_sibling { "├── " } else { "└── " };
    println!(
        "{lines}{fork} {label} [x: {x:<4} y: {y:<4} w: {w:<4} h: {h:<4} content_w: {cw:<4} content_h: {ch:<4}] ({node})",
        x = layout.location.x,
        y = layout.location.y,
        w = layout.size.width,
        h = layout.size.height,
        cw = layout.content_size.width,
        ch = layout.content_size.height,
    );

    let bar = if has_sibling { "│   " } else { "    " };
    let child_lines = lines + bar;
    let children = &data.children;
    for (index, child) in children.iter().enumerate() {
        let has_sibling = index < children.len() - 1;
        print_node(tree, *child, has_sibling, child_lines.clone());
    }
}
