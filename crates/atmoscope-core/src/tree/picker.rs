//! Picker adapter: the "none selected" placeholder
//!
//! Its roots are the selectable artifact adapters themselves, so the view
//! doubles as its own adapter picker. Activating an entry switches the
//! switcher to that adapter.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::adapter::{Activation, Adapter, AdapterKind, RefreshTrigger};
use super::node::{Node, Tree};
use crate::lsp::CommandChannel;

pub struct PickerAdapter;

#[async_trait]
impl Adapter for PickerAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Picker
    }

    fn wants(&self, _trigger: RefreshTrigger) -> bool {
        false
    }

    async fn fetch_roots(&self, _chan: &dyn CommandChannel, _doc: Option<&Path>) -> Result<Tree> {
        let mut tree = Tree::new();
        for kind in AdapterKind::SELECTABLE {
            tree.push(
                Node::new(kind.title(), "list-tree")
                    .with_description(describe(kind))
                    .with_action(Activation::SelectAdapter(kind)),
                None,
            );
        }
        Ok(tree)
    }
}

fn describe(kind: AdapterKind) -> &'static str {
    match kind {
        AdapterKind::Picker => "",
        AdapterKind::Pkgs => "source packages and their files",
        AdapterKind::Toks => "lexemes of the current file",
        AdapterKind::Ast => "syntax tree of the current file",
        AdapterKind::Mo => "lowered representation of the current package",
        AdapterKind::Sem => "analyzed tree of the current package",
    }
}
