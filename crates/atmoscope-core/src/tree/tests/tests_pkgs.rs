//! Tests for the packages adapter

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::lsp::commands::CMD_SRC_PKGS;
use crate::test_support::StubChannel;
use crate::tree::{Activation, Adapter, PkgsAdapter, RefreshTrigger};

fn channel_with_one_pkg() -> StubChannel {
    StubChannel::default().with_result(
        CMD_SRC_PKGS,
        json!([{"DirPath": "/p", "Files": [{"FilePath": "/p/a.src"}]}]),
    )
}

#[tokio::test]
async fn package_children_are_its_files_and_link_back() {
    let channel = channel_with_one_pkg();
    let tree = PkgsAdapter
        .fetch_roots(&channel, None)
        .await
        .expect("fetch");

    let roots = tree.roots();
    assert_eq!(roots.len(), 1);
    let pkg = roots[0];
    assert_eq!(tree.get(pkg).label, "/p");

    let files = tree.children(pkg);
    assert_eq!(files.len(), 1);
    let file = files[0];
    assert_eq!(tree.get(file).description, "/p/a.src");

    // The file's parent back-reference is exactly the package node.
    assert_eq!(tree.parent(file), Some(pkg));
    assert!(tree.children(file).is_empty());
}

#[tokio::test]
async fn activations_open_files_and_reveal_dirs() {
    let channel = channel_with_one_pkg();
    let tree = PkgsAdapter
        .fetch_roots(&channel, None)
        .await
        .expect("fetch");
    let pkg = tree.roots()[0];
    let file = tree.children(pkg)[0];

    assert_eq!(
        tree.get(pkg).action,
        Some(Activation::RevealDir(PathBuf::from("/p")))
    );
    assert_eq!(
        tree.get(file).action,
        Some(Activation::OpenFile { path: PathBuf::from("/p/a.src"), span: None })
    );
}

#[tokio::test]
async fn fetches_without_a_document_association() {
    // Package data is session-wide; no document needed.
    let channel = channel_with_one_pkg();
    let tree = PkgsAdapter
        .fetch_roots(&channel, Some(Path::new("/p/a.src")))
        .await
        .expect("fetch");
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(channel.call_count(), 1);
}

#[test]
fn cares_about_filesystem_changes_only() {
    assert!(PkgsAdapter.wants(RefreshTrigger::Filesystem));
    assert!(!PkgsAdapter.wants(RefreshTrigger::Document));
}

#[tokio::test]
async fn empty_payload_renders_empty() {
    let channel = StubChannel::default();
    let tree = PkgsAdapter.fetch_roots(&channel, None).await.expect("fetch");
    assert!(tree.is_empty());
}
