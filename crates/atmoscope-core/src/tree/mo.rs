//! Intermediate-representation adapter

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use super::adapter::{src_tooltip, Activation, Adapter, AdapterKind, RefreshTrigger};
use super::node::{Node, NodeId, Tree};
use crate::lsp::types::{ClientInfo, MoNode, MoPrimTypeTag};
use crate::lsp::{commands, CommandChannel};

/// Presents the lowered representation of the package containing the
/// associated document. Activating a node opens its originating file at
/// the recorded span.
pub struct MoAdapter;

#[async_trait]
impl Adapter for MoAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Mo
    }

    fn wants(&self, trigger: RefreshTrigger) -> bool {
        matches!(trigger, RefreshTrigger::Document)
    }

    async fn fetch_roots(&self, chan: &dyn CommandChannel, doc: Option<&Path>) -> Result<Tree> {
        let Some(doc) = doc else {
            return Ok(Tree::new());
        };
        let nodes = commands::src_pkg_mo(chan, doc).await?;
        let mut tree = Tree::new();
        for node in nodes {
            insert(&mut tree, None, node);
        }
        Ok(tree)
    }
}

fn insert(tree: &mut Tree, parent: Option<NodeId>, mo: MoNode) {
    let info = mo.client_info.unwrap_or_default();
    let label = match info.src_file_span {
        Some(span) => format!("{} · {}", span.label(), mo.prim_type_tag),
        None => mo.prim_type_tag.to_string(),
    };
    let excerpt = info.src_file_text.clone().unwrap_or_default();
    let mut node = Node::new(label, tag_icon(mo.prim_type_tag))
        .with_error(mo.prim_type_tag == MoPrimTypeTag::Err);
    if !excerpt.is_empty() {
        node = node.with_tooltip(src_tooltip(&excerpt)).with_description(excerpt);
    }
    if let Some(action) = open_action(&info) {
        node = node.with_action(action);
    }
    let id = tree.push(node, parent);
    for sub in mo.nodes {
        insert(tree, Some(id), sub);
    }
}

/// Nodes with recorded provenance open their file at the recorded span.
pub(crate) fn open_action(info: &ClientInfo) -> Option<Activation> {
    let path = info.src_file_path.as_ref().filter(|p| !p.is_empty())?;
    Some(Activation::OpenFile {
        path: PathBuf::from(path),
        span: info.src_file_span,
    })
}

fn tag_icon(tag: MoPrimTypeTag) -> &'static str {
    match tag {
        MoPrimTypeTag::Type => "symbol-parameter",
        MoPrimTypeTag::Ident => "symbol-variable",
        MoPrimTypeTag::NumInt | MoPrimTypeTag::NumUint | MoPrimTypeTag::NumFloat => {
            "symbol-operator"
        }
        MoPrimTypeTag::Char | MoPrimTypeTag::Str => "symbol-string",
        MoPrimTypeTag::Err => "symbol-event",
        MoPrimTypeTag::Dict | MoPrimTypeTag::DictEntry => "symbol-namespace",
        MoPrimTypeTag::List => "symbol-array",
        MoPrimTypeTag::Call => "symbol-color",
        MoPrimTypeTag::Func => "symbol-method",
    }
}
