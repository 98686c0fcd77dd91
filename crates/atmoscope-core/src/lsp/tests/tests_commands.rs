//! Tests for the typed command wrappers

#![allow(clippy::expect_used)]

use std::path::Path;

use serde_json::json;

use crate::lsp::commands;
use crate::test_support::StubChannel;

#[tokio::test]
async fn src_pkgs_decodes_stubbed_payload() {
    let channel = StubChannel::default().with_result(
        commands::CMD_SRC_PKGS,
        json!([{"DirPath": "/p", "Files": [{"FilePath": "/p/a.at"}]}]),
    );
    let pkgs = commands::src_pkgs(&channel).await.expect("pkgs");
    assert_eq!(pkgs.len(), 1);
    assert_eq!(pkgs[0].files[0].file_path, "/p/a.at");
    assert_eq!(channel.call_count(), 1);
}

#[tokio::test]
async fn null_result_decodes_to_empty() {
    let channel = StubChannel::default().with_result(commands::CMD_SRC_PKGS, json!(null));
    let pkgs = commands::src_pkgs(&channel).await.expect("pkgs");
    assert!(pkgs.is_empty());
}

#[tokio::test]
async fn malformed_result_is_an_error() {
    let channel =
        StubChannel::default().with_result(commands::CMD_SRC_FILE_TOKS, json!({"not": "a list"}));
    let result = commands::src_file_toks(&channel, Path::new("/p/a.at")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn file_commands_pass_the_path_argument() {
    let channel = StubChannel::default();
    let _ = commands::src_file_ast(&channel, Path::new("/p/a.at")).await;
    let calls = channel.calls();
    assert_eq!(calls[0].0, commands::CMD_SRC_FILE_AST);
    assert_eq!(calls[0].1, vec![json!("/p/a.at")]);
}

#[tokio::test]
async fn eval_expr_sends_empty_context_for_untitled() {
    let channel = StubChannel::default().with_result(commands::CMD_EVAL_EXPR, json!("3"));
    let result = commands::eval_expr(&channel, None, "1 + 2").await.expect("eval");
    assert_eq!(result.as_deref(), Some("3"));
    let calls = channel.calls();
    assert_eq!(calls[0].1, vec![json!(""), json!("1 + 2")]);
}

#[tokio::test]
async fn eval_renders_non_string_results_as_json() {
    let channel =
        StubChannel::default().with_result(commands::CMD_EVAL_EXPR, json!({"ok": true}));
    let result = commands::eval_expr(&channel, Some(Path::new("/p/a.at")), "x")
        .await
        .expect("eval");
    assert_eq!(result.as_deref(), Some(r#"{"ok":true}"#));
}

#[tokio::test]
async fn eval_in_file_sends_span_in_wire_shape() {
    use crate::lsp::types::{SrcFileSpan, SrcPos};

    let channel = StubChannel::default();
    let span = SrcFileSpan {
        start: SrcPos { line: 3, char: 5 },
        end: SrcPos { line: 3, char: 8 },
    };
    let _ = commands::eval_in_file(&channel, Path::new("/p/a.at"), span).await;
    let calls = channel.calls();
    assert_eq!(calls[0].0, commands::CMD_EVAL_IN_FILE);
    assert_eq!(
        calls[0].1[1],
        json!({"Start": {"Line": 3, "Char": 5}, "End": {"Line": 3, "Char": 8}})
    );
}
