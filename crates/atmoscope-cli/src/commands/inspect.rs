//! Inspect command: fetch one pipeline artifact tree and print it

use std::path::{Path, PathBuf};

use anyhow::Result;
use atmoscope_core::config::Config;
use atmoscope_core::session::{EditorEvent, Session};
use atmoscope_core::tree::{NodeId, Tree};
use tracing::info;

use super::types::Stage;
use crate::workbench::ConsoleWorkbench;

/// Run the inspect command
///
/// # Errors
/// Returns an error if the server cannot be started or the fetch fails.
pub async fn run(config: Config, file: Option<PathBuf>, stage: Stage) -> Result<()> {
    let workbench = ConsoleWorkbench;
    let file = file.map(|f| f.canonicalize().unwrap_or(f));
    let root = workspace_root(file.as_deref())?;

    let mut session = Session::activate(config, &root).await?;
    if !session.enabled() {
        println!("LSP integration is disabled; nothing to inspect");
        return Ok(());
    }

    session
        .handle_event(EditorEvent::ActiveDocChanged(file.clone()), &workbench)
        .await?;
    session.settle(&workbench).await;
    session.select_adapter(stage.into()).await?;

    if let Some(switcher) = session.switcher() {
        let rendered = render_tree(switcher.tree());
        if rendered.is_empty() {
            info!("nothing to show for this stage");
        } else {
            print!("{rendered}");
        }
    }

    session.deactivate().await?;
    Ok(())
}

fn workspace_root(file: Option<&Path>) -> Result<PathBuf> {
    match file.and_then(Path::parent) {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Render the tree as indented lines, one node per line. Error nodes are
/// marked so they stand out in plain text the way their icon would in a
/// graphical view.
pub(crate) fn render_tree(tree: &Tree) -> String {
    let mut out = String::new();
    for &root in tree.roots() {
        render_node(tree, root, 0, &mut out);
    }
    out
}

fn render_node(tree: &Tree, id: NodeId, depth: usize, out: &mut String) {
    let descriptor = tree.descriptor(id);
    for _ in 0..depth {
        out.push_str("  ");
    }
    if descriptor.is_error {
        out.push_str("[err] ");
    }
    out.push_str(descriptor.label);
    if !descriptor.description.is_empty() {
        out.push_str("  · ");
        out.push_str(descriptor.description);
    }
    out.push('\n');
    for &child in tree.children(id) {
        render_node(tree, child, depth + 1, out);
    }
}
