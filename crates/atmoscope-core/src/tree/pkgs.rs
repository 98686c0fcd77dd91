//! Packages adapter: in-session source packages and their files

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use super::adapter::{Activation, Adapter, AdapterKind, RefreshTrigger};
use super::node::{Node, Tree};
use crate::lsp::{commands, CommandChannel};

/// Presents the server's package list: package directories with their
/// source files underneath. Package data is session-wide, so it needs no
/// document association and only goes stale on filesystem changes, never
/// on keystrokes.
pub struct PkgsAdapter;

#[async_trait]
impl Adapter for PkgsAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Pkgs
    }

    fn wants(&self, trigger: RefreshTrigger) -> bool {
        matches!(trigger, RefreshTrigger::Filesystem)
    }

    async fn fetch_roots(&self, chan: &dyn CommandChannel, _doc: Option<&Path>) -> Result<Tree> {
        let pkgs = commands::src_pkgs(chan).await?;
        let mut tree = Tree::new();
        for pkg in pkgs {
            let pkg_id = tree.push(
                Node::new(&pkg.dir_path, "package")
                    .with_description(&pkg.dir_path)
                    .with_tooltip(&pkg.dir_path)
                    .with_action(Activation::RevealDir(PathBuf::from(&pkg.dir_path))),
                None,
            );
            for file in pkg.files {
                let label = Path::new(&file.file_path)
                    .file_name()
                    .map_or_else(|| file.file_path.clone(), |name| name.to_string_lossy().into_owned());
                tree.push(
                    Node::new(label, "file")
                        .with_description(&file.file_path)
                        .with_tooltip(&file.file_path)
                        .with_action(Activation::OpenFile {
                            path: PathBuf::from(&file.file_path),
                            span: None,
                        }),
                    Some(pkg_id),
                );
            }
        }
        Ok(tree)
    }
}
