//! Tree module: artifact trees and the view machinery
//!
//! One adapter per compiler-pipeline stage, each building a display-tree
//! arena from its server payload; a switcher multiplexing between them;
//! and the refresh debouncer.

mod adapter;
mod ast;
mod debounce;
mod mo;
mod node;
mod picker;
mod pkgs;
mod sem;
mod switcher;
mod toks;

pub use adapter::{Activation, Adapter, AdapterKind, RefreshTrigger};
pub use ast::AstAdapter;
pub use debounce::{Debouncer, TriggerSet, REFRESH_DELAY};
pub use mo::MoAdapter;
pub use node::{Descriptor, Node, NodeId, Tree};
pub use picker::PickerAdapter;
pub use pkgs::PkgsAdapter;
pub use sem::SemAdapter;
pub use switcher::{TreeSwitcher, ViewState};
pub use toks::ToksAdapter;

#[cfg(test)]
mod tests;
