//! Semantic-tree adapter
//!
//! Children follow the node's value kind: list items in order; a call's
//! callee followed by its arguments; a dict's key/value pairs
//! interleaved; a function's params then its body, with no body child
//! when the body is external. Scalars are leaves.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::adapter::{src_tooltip, Adapter, AdapterKind, RefreshTrigger};
use super::mo::open_action;
use super::node::{Node, NodeId, Tree};
use crate::lsp::types::{SemNode, SemVal};
use crate::lsp::{commands, CommandChannel};

/// Presents the analyzed tree of the package containing the associated
/// document, with attached analysis facts and error diagnostics.
pub struct SemAdapter;

#[async_trait]
impl Adapter for SemAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Sem
    }

    fn wants(&self, trigger: RefreshTrigger) -> bool {
        matches!(trigger, RefreshTrigger::Document)
    }

    async fn fetch_roots(&self, chan: &dyn CommandChannel, doc: Option<&Path>) -> Result<Tree> {
        let Some(doc) = doc else {
            return Ok(Tree::new());
        };
        let nodes = commands::src_pkg_mo_sem(chan, doc).await?;
        let mut tree = Tree::new();
        for node in nodes {
            insert(&mut tree, None, node);
        }
        Ok(tree)
    }
}

fn insert(tree: &mut Tree, parent: Option<NodeId>, sem: SemNode) {
    let info = sem.client_info.clone().unwrap_or_default();
    let mut label = match info.src_file_span {
        Some(span) => format!("{} · {}", span.label(), sem.val.kind_name()),
        None => sem.val.kind_name().to_string(),
    };
    for fact in facts(&sem) {
        label.push_str(" · ");
        label.push_str(fact);
    }

    let is_error = sem.err_own.is_some();
    let description = match &sem.err_own {
        Some(err) => format!("{}: {}", err.code, err.message),
        None => info.src_file_text.clone().unwrap_or_default(),
    };
    let excerpt = info.src_file_text.clone().unwrap_or_default();

    let mut node = Node::new(label, icon(&sem))
        .with_description(description)
        .with_error(is_error);
    if !excerpt.is_empty() {
        node = node.with_tooltip(src_tooltip(&excerpt));
    }
    if let Some(action) = open_action(&info) {
        node = node.with_action(action);
    }
    let id = tree.push(node, parent);

    match sem.val {
        SemVal::Scalar { .. } => {}
        SemVal::List { items } => {
            for item in items {
                insert(tree, Some(id), item);
            }
        }
        SemVal::Call { callee, args } => {
            insert(tree, Some(id), *callee);
            for arg in args {
                insert(tree, Some(id), arg);
            }
        }
        SemVal::Dict { keys, vals } => {
            for (key, val) in keys.into_iter().zip(vals) {
                insert(tree, Some(id), key);
                insert(tree, Some(id), val);
            }
        }
        SemVal::Func { params, body, .. } => {
            for param in params {
                insert(tree, Some(id), param);
            }
            if let Some(body) = body {
                insert(tree, Some(id), *body);
            }
        }
    }
}

fn facts(sem: &SemNode) -> Vec<&'static str> {
    let mut facts = Vec::new();
    if sem.definitely_unused {
        facts.push("unused");
    }
    if let SemVal::Func { is_macro: true, .. } = sem.val {
        facts.push("macro");
    }
    facts
}

fn icon(sem: &SemNode) -> &'static str {
    if sem.err_own.is_some() {
        return "symbol-event";
    }
    match sem.val {
        SemVal::Scalar { .. } => "symbol-variable",
        SemVal::List { .. } => "symbol-array",
        SemVal::Dict { .. } => "symbol-namespace",
        SemVal::Call { .. } => "symbol-call",
        SemVal::Func { .. } => "symbol-method",
    }
}
