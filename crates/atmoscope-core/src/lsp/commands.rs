//! Typed wrappers for the server's custom commands
//!
//! Each wrapper names one `workspace/executeCommand` command, passes its
//! positional arguments, and decodes the JSON result into the payload
//! types. An absent or null result decodes to the empty value for the
//! command, per the fail-soft contract of the channel.

use std::path::Path;

use anyhow::{Context, Result};
use async_lsp::lsp_types::ExecuteCommandParams;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::channel::CommandChannel;
use super::types::{AstNode, MoNode, SemNode, SrcFileSpan, SrcPkg, Tok};

pub const CMD_ANNOUNCE: &str = "announce-atmo-vscext";
pub const CMD_SRC_PKGS: &str = "getSrcPkgs";
pub const CMD_SRC_FILE_TOKS: &str = "getSrcFileToks";
pub const CMD_SRC_FILE_AST: &str = "getSrcFileAst";
pub const CMD_SRC_PKG_MO: &str = "getSrcPkgMo";
pub const CMD_SRC_PKG_MO_SEM: &str = "getSrcPackMoSem";
pub const CMD_EVAL_EXPR: &str = "eval-expr";
pub const CMD_EVAL_IN_FILE: &str = "eval-in-file";

/// Parameters for the one-shot startup notice.
#[must_use]
pub fn announce_params() -> ExecuteCommandParams {
    ExecuteCommandParams {
        command: CMD_ANNOUNCE.into(),
        arguments: vec![],
        work_done_progress_params: Default::default(),
    }
}

fn decode_list<T: DeserializeOwned>(result: Option<Value>, command: &str) -> Result<Vec<T>> {
    match result {
        None | Some(Value::Null) => Ok(vec![]),
        Some(value) => {
            serde_json::from_value(value).with_context(|| format!("decoding {command} result"))
        }
    }
}

fn path_arg(path: &Path) -> Value {
    Value::String(path.display().to_string())
}

/// List the in-session source packages.
///
/// # Errors
/// Returns an error if the request fails or the payload cannot be decoded.
pub async fn src_pkgs(chan: &dyn CommandChannel) -> Result<Vec<SrcPkg>> {
    let result = chan.execute(CMD_SRC_PKGS, vec![]).await?;
    decode_list(result, CMD_SRC_PKGS)
}

/// Fetch the lexeme list for one source file.
///
/// # Errors
/// Returns an error if the request fails or the payload cannot be decoded.
pub async fn src_file_toks(chan: &dyn CommandChannel, file: &Path) -> Result<Vec<Tok>> {
    let result = chan.execute(CMD_SRC_FILE_TOKS, vec![path_arg(file)]).await?;
    decode_list(result, CMD_SRC_FILE_TOKS)
}

/// Fetch the parse tree for one source file.
///
/// # Errors
/// Returns an error if the request fails or the payload cannot be decoded.
pub async fn src_file_ast(chan: &dyn CommandChannel, file: &Path) -> Result<Vec<AstNode>> {
    let result = chan.execute(CMD_SRC_FILE_AST, vec![path_arg(file)]).await?;
    decode_list(result, CMD_SRC_FILE_AST)
}

/// Fetch the lowered representation of the package containing a file.
///
/// # Errors
/// Returns an error if the request fails or the payload cannot be decoded.
pub async fn src_pkg_mo(chan: &dyn CommandChannel, file: &Path) -> Result<Vec<MoNode>> {
    let result = chan.execute(CMD_SRC_PKG_MO, vec![path_arg(file)]).await?;
    decode_list(result, CMD_SRC_PKG_MO)
}

/// Fetch the analyzed semantic tree of the package containing a file.
///
/// # Errors
/// Returns an error if the request fails or the payload cannot be decoded.
pub async fn src_pkg_mo_sem(chan: &dyn CommandChannel, file: &Path) -> Result<Vec<SemNode>> {
    let result = chan.execute(CMD_SRC_PKG_MO_SEM, vec![path_arg(file)]).await?;
    decode_list(result, CMD_SRC_PKG_MO_SEM)
}

/// Evaluate an expression, optionally in the context of a file.
///
/// Returns the server's rendering of the result, or None when no server
/// is attached.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn eval_expr(
    chan: &dyn CommandChannel,
    context_file: Option<&Path>,
    expr: &str,
) -> Result<Option<String>> {
    let file_arg = context_file.map_or_else(|| Value::String(String::new()), path_arg);
    let result = chan
        .execute(CMD_EVAL_EXPR, vec![file_arg, Value::String(expr.into())])
        .await?;
    Ok(result.map(render_result))
}

/// Evaluate the expression covered by a span of a file.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn eval_in_file(
    chan: &dyn CommandChannel,
    file: &Path,
    span: SrcFileSpan,
) -> Result<Option<String>> {
    let result = chan
        .execute(CMD_EVAL_IN_FILE, vec![path_arg(file), json!(span)])
        .await?;
    Ok(result.map(render_result))
}

/// Render an eval result for display: strings verbatim, everything else
/// as compact JSON.
fn render_result(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
