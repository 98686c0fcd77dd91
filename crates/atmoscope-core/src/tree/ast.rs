//! Parse-tree adapter

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::adapter::{src_tooltip, Activation, Adapter, AdapterKind, RefreshTrigger};
use super::node::{Node, NodeId, Tree};
use crate::lsp::types::{AstNode, AstNodeKind};
use crate::lsp::{commands, CommandChannel};

/// Presents the syntax tree of the associated document. Activating a node
/// selects the span its tokens cover.
pub struct AstAdapter;

#[async_trait]
impl Adapter for AstAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Ast
    }

    fn wants(&self, trigger: RefreshTrigger) -> bool {
        matches!(trigger, RefreshTrigger::Document)
    }

    async fn fetch_roots(&self, chan: &dyn CommandChannel, doc: Option<&Path>) -> Result<Tree> {
        let Some(doc) = doc else {
            return Ok(Tree::new());
        };
        let nodes = commands::src_file_ast(chan, doc).await?;
        let mut tree = Tree::new();
        for node in nodes {
            insert(&mut tree, None, node);
        }
        Ok(tree)
    }
}

fn insert(tree: &mut Tree, parent: Option<NodeId>, ast: AstNode) {
    let span = ast.span();
    let label = match span {
        Some(span) => format!("{} · {}", span.label(), ast.kind),
        None => ast.kind.to_string(),
    };
    let mut node = Node::new(label, kind_icon(ast.kind))
        .with_tooltip(src_tooltip(&ast.src))
        .with_description(ast.src)
        .with_error(ast.kind == AstNodeKind::Err);
    if let Some(span) = span {
        node = node.with_action(Activation::SelectSpan(span));
    }
    let id = tree.push(node, parent);
    for sub in ast.nodes {
        insert(tree, Some(id), sub);
    }
}

fn kind_icon(kind: AstNodeKind) -> &'static str {
    match kind {
        AstNodeKind::Err => "symbol-event",
        AstNodeKind::Comment => "comment",
        AstNodeKind::Ident => "symbol-variable",
        AstNodeKind::Lit => "symbol-constant",
        AstNodeKind::Group => "symbol-namespace",
    }
}
