//! Tests for the intermediate-representation adapter

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::lsp::commands::CMD_SRC_PKG_MO;
use crate::test_support::StubChannel;
use crate::tree::{Activation, Adapter, MoAdapter};

#[tokio::test]
async fn nodes_open_their_recorded_file_at_span() {
    let channel = StubChannel::default().with_result(
        CMD_SRC_PKG_MO,
        json!([{
            "PrimTypeTag": 10,
            "ClientInfo": {
                "SrcFilePath": "/p/a.at",
                "SrcFileSpan": {"Start": {"Line": 2, "Char": 1}, "End": {"Line": 2, "Char": 9}},
                "SrcFileText": "foo bar!"
            },
            "Nodes": [
                {"PrimTypeTag": 1, "ClientInfo": {"SrcFilePath": "/p/a.at"}, "Nodes": []}
            ]
        }]),
    );
    let tree = MoAdapter
        .fetch_roots(&channel, Some(Path::new("/p/a.at")))
        .await
        .expect("fetch");

    let call = tree.roots()[0];
    assert_eq!(tree.get(call).label, "L2 C1 - L2 C9 · Call");
    assert_eq!(tree.get(call).description, "foo bar!");
    let Some(Activation::OpenFile { path, span }) = &tree.get(call).action else {
        panic!("expected open-file activation");
    };
    assert_eq!(path, &PathBuf::from("/p/a.at"));
    assert!(span.is_some());

    let ident = tree.children(call)[0];
    assert_eq!(tree.parent(ident), Some(call));
    // Provenance without a span still opens the file.
    let Some(Activation::OpenFile { span, .. }) = &tree.get(ident).action else {
        panic!("expected open-file activation");
    };
    assert!(span.is_none());
}

#[tokio::test]
async fn err_tag_renders_distinctly_and_missing_info_degrades() {
    let channel = StubChannel::default().with_result(
        CMD_SRC_PKG_MO,
        json!([{"PrimTypeTag": 7, "Nodes": []}]),
    );
    let tree = MoAdapter
        .fetch_roots(&channel, Some(Path::new("/p/a.at")))
        .await
        .expect("fetch");
    let err = tree.get(tree.roots()[0]);
    assert!(err.is_error);
    assert_eq!(err.icon, "symbol-event");
    assert_eq!(err.label, "Err");
    assert!(err.action.is_none());
}

#[tokio::test]
async fn no_document_means_empty_and_no_fetch() {
    let channel = StubChannel::default();
    let tree = MoAdapter.fetch_roots(&channel, None).await.expect("fetch");
    assert!(tree.is_empty());
    assert_eq!(channel.call_count(), 0);
}
