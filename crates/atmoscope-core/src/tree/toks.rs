//! Tokens adapter: the flat lexeme list of the associated document

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::adapter::{src_tooltip, Activation, Adapter, AdapterKind, RefreshTrigger};
use super::node::{Node, Tree};
use crate::lsp::types::{Tok, TokKind};
use crate::lsp::{commands, CommandChannel};

// The tokenizer emits synthetic indent/outdent lexemes whose source text
// starts with these control characters.
const INDENT_MARK: char = '\u{10}';
const OUTDENT_MARK: char = '\u{11}';

/// Presents every token of the associated document as a leaf. Activating
/// one selects the token's source span in the editor.
pub struct ToksAdapter;

#[async_trait]
impl Adapter for ToksAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Toks
    }

    fn wants(&self, trigger: RefreshTrigger) -> bool {
        matches!(trigger, RefreshTrigger::Document)
    }

    async fn fetch_roots(&self, chan: &dyn CommandChannel, doc: Option<&Path>) -> Result<Tree> {
        let Some(doc) = doc else {
            return Ok(Tree::new());
        };
        let toks = commands::src_file_toks(chan, doc).await?;
        let mut tree = Tree::new();
        for tok in toks {
            tree.push(tok_node(&tok), None);
        }
        Ok(tree)
    }
}

fn tok_node(tok: &Tok) -> Node {
    let span = tok.span();
    let description = match tok.src.chars().next() {
        Some(INDENT_MARK) => "<indent>".to_string(),
        Some(OUTDENT_MARK) => "<outdent>".to_string(),
        _ => tok.src.clone(),
    };
    Node::new(format!("{} · {}", span.label(), tok.kind), tok_icon(tok))
        .with_tooltip(src_tooltip(&description))
        .with_description(description)
        .with_action(Activation::SelectSpan(span))
}

fn tok_icon(tok: &Tok) -> &'static str {
    match tok.src.chars().next() {
        Some(INDENT_MARK) => return "arrow-right",
        Some(OUTDENT_MARK) => return "arrow-left",
        _ => {}
    }
    match tok.kind {
        TokKind::Begin => "arrow-right",
        TokKind::End => "arrow-left",
        TokKind::Comment => "comment",
        TokKind::Brace => "symbol-array",
        TokKind::IdentWord => "symbol-key",
        TokKind::IdentOpish => "symbol-operator",
        TokKind::LitRune | TokKind::LitStr => "symbol-string",
        TokKind::LitInt | TokKind::LitFloat => "symbol-numeric",
    }
}
