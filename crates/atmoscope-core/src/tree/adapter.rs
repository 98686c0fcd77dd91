//! The adapter contract shared by all artifact trees
//!
//! Each compiler-pipeline stage gets one adapter. An adapter knows how to
//! fetch its root payload over the command channel, how a node's children
//! are enumerated, how a node renders, and what activating a node does.
//! Everything else (association, refresh filtering, parent lookups) is
//! generic and lives in the switcher and the arena.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use super::node::Tree;
use crate::lsp::types::SrcFileSpan;
use crate::lsp::CommandChannel;

/// What caused a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// The associated document was edited.
    Document,
    /// A watched file or folder was created, renamed, or deleted.
    Filesystem,
    /// An explicit user request (including switching adapters).
    Explicit,
}

/// Selector for the registered adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// Placeholder whose roots are the selectable adapters themselves.
    Picker,
    Pkgs,
    Toks,
    Ast,
    Mo,
    Sem,
}

impl AdapterKind {
    /// The artifact adapters a user can switch to, in pipeline order.
    pub const SELECTABLE: [AdapterKind; 5] = [
        AdapterKind::Pkgs,
        AdapterKind::Toks,
        AdapterKind::Ast,
        AdapterKind::Mo,
        AdapterKind::Sem,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Picker => "Inspectors",
            Self::Pkgs => "Packages",
            Self::Toks => "Tokens",
            Self::Ast => "Parse Tree",
            Self::Mo => "Intermediate Repr",
            Self::Sem => "Semantic Tree",
        }
    }
}

impl std::fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// What activating a rendered node does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Open a source file, optionally revealing a span.
    OpenFile {
        path: PathBuf,
        span: Option<SrcFileSpan>,
    },
    /// Reveal a package directory.
    RevealDir(PathBuf),
    /// Move the selection of the active document to a span.
    SelectSpan(SrcFileSpan),
    /// Make another adapter the active one.
    SelectAdapter(AdapterKind),
}

/// One compiler-pipeline artifact presented as a tree.
#[async_trait]
pub trait Adapter: Send + Sync {
    fn kind(&self) -> AdapterKind;

    /// Whether a (non-explicit) refresh trigger is relevant to this
    /// adapter's data. Explicit requests always apply and are not routed
    /// through here.
    fn wants(&self, trigger: RefreshTrigger) -> bool;

    /// Fetch the root payload for the associated document and build the
    /// display tree. Must resolve to an empty tree when the adapter is
    /// document-shaped and no document is associated, without touching
    /// the channel.
    async fn fetch_roots(&self, chan: &dyn CommandChannel, doc: Option<&Path>) -> Result<Tree>;
}

/// Fenced-code tooltip for a source excerpt.
#[must_use]
pub(crate) fn src_tooltip(text: &str) -> String {
    format!("```atmo\n{text}\n```\n")
}
