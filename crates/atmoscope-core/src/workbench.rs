//! Workbench capability surface
//!
//! Everything the front end asks of its host editor goes through this
//! trait: opening documents, moving selections, notifications, the
//! status indicator, and the interactive-terminal escape hatch. UI calls
//! are fire-and-forget from the front end's point of view.

use std::path::Path;

use crate::lsp::types::SrcFileSpan;

pub trait Workbench: Send + Sync {
    /// Open a source file, revealing the given span when present.
    fn open_file(&self, path: &Path, span: Option<SrcFileSpan>);

    /// Reveal a package directory.
    fn reveal_dir(&self, path: &Path);

    /// Move the active document's selection to a span.
    fn select_span(&self, span: SrcFileSpan);

    fn show_info(&self, message: &str);

    fn show_error(&self, message: &str);

    /// Show (Some) or clear (None) the transient status indicator.
    fn set_status(&self, message: Option<&str>);

    /// Open an interactive terminal in a directory and run a command
    /// there, leaving the terminal up for the user.
    fn run_in_terminal(&self, dir: &Path, command: &str);
}
