//! Tests for the display-tree arena

#![allow(clippy::expect_used)]

use crate::tree::{Node, Tree};

fn sample_tree() -> Tree {
    let mut tree = Tree::new();
    let a = tree.push(Node::new("a", "package"), None);
    let _a1 = tree.push(Node::new("a1", "file"), Some(a));
    let a2 = tree.push(Node::new("a2", "file"), Some(a));
    let _a2x = tree.push(Node::new("a2x", "file"), Some(a2));
    let _b = tree.push(Node::new("b", "package"), None);
    tree
}

#[test]
fn parent_of_every_reachable_child_is_its_container() {
    let tree = sample_tree();
    for id in tree.ids() {
        for &child in tree.children(id) {
            assert_eq!(tree.parent(child), Some(id));
        }
    }
    for &root in tree.roots() {
        assert_eq!(tree.parent(root), None);
    }
}

#[test]
fn roots_keep_insertion_order() {
    let tree = sample_tree();
    let labels: Vec<&str> = tree.roots().iter().map(|&id| tree.get(id).label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);
}

#[test]
fn descriptor_reflects_children_and_error_flag() {
    let mut tree = Tree::new();
    let parent = tree.push(
        Node::new("p", "package").with_description("desc").with_error(true),
        None,
    );
    let leaf = tree.push(Node::new("c", "file"), Some(parent));

    let d = tree.descriptor(parent);
    assert!(d.expandable);
    assert!(d.is_error);
    assert_eq!(d.description, "desc");

    let d = tree.descriptor(leaf);
    assert!(!d.expandable);
    assert!(!d.is_error);
    assert!(d.tooltip.is_none());
}

#[test]
fn empty_tree_has_no_roots() {
    let tree = Tree::new();
    assert!(tree.is_empty());
    assert!(tree.roots().is_empty());
    assert_eq!(tree.len(), 0);
}
