//! Tree switcher: one view, many adapters
//!
//! Holds the adapter registry, the single active adapter, and the active
//! document association. Switching adapters is an explicit transition and
//! triggers exactly one refresh. Refresh events irrelevant to the active
//! adapter's declared triggers are discarded before they can reach the
//! command channel.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::adapter::{Adapter, AdapterKind, RefreshTrigger};
use super::ast::AstAdapter;
use super::debounce::TriggerSet;
use super::mo::MoAdapter;
use super::node::Tree;
use super::picker::PickerAdapter;
use super::pkgs::PkgsAdapter;
use super::sem::SemAdapter;
use super::toks::ToksAdapter;
use crate::lsp::CommandChannel;

/// Where a view instance stands relative to its associated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No document associated; the view is empty.
    Unassociated,
    /// A document is associated but its roots have not been fetched yet.
    Associated,
    /// Roots fetched and parent links resolved.
    Populated,
}

pub struct TreeSwitcher {
    adapters: Vec<Box<dyn Adapter>>,
    active: usize,
    doc: Option<PathBuf>,
    tree: Tree,
    populated: bool,
}

impl Default for TreeSwitcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSwitcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: vec![
                Box::new(PickerAdapter),
                Box::new(PkgsAdapter),
                Box::new(ToksAdapter),
                Box::new(AstAdapter),
                Box::new(MoAdapter),
                Box::new(SemAdapter),
            ],
            active: 0,
            doc: None,
            tree: Tree::new(),
            populated: false,
        }
    }

    #[must_use]
    pub fn active(&self) -> AdapterKind {
        self.adapters[self.active].kind()
    }

    #[must_use]
    pub fn document(&self) -> Option<&Path> {
        self.doc.as_deref()
    }

    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        match (&self.doc, self.populated) {
            (None, _) => ViewState::Unassociated,
            (Some(_), false) => ViewState::Associated,
            (Some(_), true) => ViewState::Populated,
        }
    }

    /// Associate a document (or clear the association). Returns true when
    /// the association actually changed; the caller then owes a refresh.
    pub fn set_document(&mut self, doc: Option<PathBuf>) -> bool {
        if self.doc == doc {
            return false;
        }
        self.doc = doc;
        self.tree = Tree::new();
        self.populated = false;
        true
    }

    /// Make another adapter the active one and refresh once for it.
    ///
    /// # Errors
    /// Returns an error when the fetch for the new adapter fails.
    pub async fn select(&mut self, kind: AdapterKind, chan: &dyn CommandChannel) -> Result<()> {
        if let Some(index) = self.adapters.iter().position(|a| a.kind() == kind) {
            self.active = index;
            self.refresh(chan).await?;
        }
        Ok(())
    }

    /// Whether the active adapter cares about a refresh trigger.
    #[must_use]
    pub fn wants(&self, trigger: RefreshTrigger) -> bool {
        trigger == RefreshTrigger::Explicit || self.adapters[self.active].wants(trigger)
    }

    /// Handle one refresh trigger: re-fetch if the active adapter cares,
    /// otherwise do nothing. Returns whether a fetch happened.
    ///
    /// # Errors
    /// Returns an error when the fetch fails.
    pub async fn handle(&mut self, trigger: RefreshTrigger, chan: &dyn CommandChannel) -> Result<bool> {
        if !self.wants(trigger) {
            return Ok(false);
        }
        self.refresh(chan).await?;
        Ok(true)
    }

    /// Handle a coalesced set of triggers with at most one fetch.
    ///
    /// # Errors
    /// Returns an error when the fetch fails.
    pub async fn handle_coalesced(
        &mut self,
        triggers: TriggerSet,
        chan: &dyn CommandChannel,
    ) -> Result<bool> {
        let wanted = (triggers.explicit && self.wants(RefreshTrigger::Explicit))
            || (triggers.document && self.wants(RefreshTrigger::Document))
            || (triggers.filesystem && self.wants(RefreshTrigger::Filesystem));
        if !wanted {
            return Ok(false);
        }
        self.refresh(chan).await?;
        Ok(true)
    }

    /// Re-fetch the active adapter's roots for the associated document.
    /// A fetch that completes later than a newer one simply overwrites it:
    /// last fetch wins, accepted for a read-only debugging view.
    ///
    /// # Errors
    /// Returns an error when the fetch fails; the previous tree is kept.
    pub async fn refresh(&mut self, chan: &dyn CommandChannel) -> Result<()> {
        let adapter = &self.adapters[self.active];
        let tree = adapter.fetch_roots(chan, self.doc.as_deref()).await?;
        tracing::debug!(
            "refreshed {} with {} nodes",
            adapter.kind(),
            tree.len()
        );
        self.tree = tree;
        self.populated = true;
        Ok(())
    }
}
