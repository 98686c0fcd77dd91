//! Command channel: custom requests against the running server
//!
//! Wraps "send a `workspace/executeCommand` request and await its JSON
//! result" into one call. The handle to the server is optional: with no
//! server attached every call resolves to no result, so call sites render
//! empty instead of erroring. Transport failures are propagated for
//! user-facing display, never swallowed here, and never retried: these
//! are idempotent read-only queries and the next refresh re-issues them.

use anyhow::Result;
use async_lsp::lsp_types::ExecuteCommandParams;
use async_lsp::{LanguageServer, ServerSocket};
use async_trait::async_trait;
use serde_json::Value;

/// Sends custom commands to the language server.
#[async_trait]
pub trait CommandChannel: Send + Sync {
    /// Execute a named server command with positional JSON arguments.
    ///
    /// Resolves to `None` when no server is attached or the server had no
    /// result for the command.
    ///
    /// # Errors
    /// Returns an error when the request reached a server and failed.
    async fn execute(&self, command: &str, arguments: Vec<Value>) -> Result<Option<Value>>;
}

/// The LSP-backed channel.
pub struct LspChannel {
    server: Option<ServerSocket>,
}

impl LspChannel {
    /// A channel bound to a running server.
    #[must_use]
    pub fn connected(server: ServerSocket) -> Self {
        Self { server: Some(server) }
    }

    /// A channel with no server attached; every call resolves to `None`.
    #[must_use]
    pub fn detached() -> Self {
        Self { server: None }
    }

    /// Whether a server is attached.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.server.is_some()
    }
}

#[async_trait]
impl CommandChannel for LspChannel {
    async fn execute(&self, command: &str, arguments: Vec<Value>) -> Result<Option<Value>> {
        let Some(server) = &self.server else {
            return Ok(None);
        };
        // ServerSocket is a cheap clonable handle to the client mainloop.
        let mut server = server.clone();
        tracing::debug!("executeCommand {command} ({} args)", arguments.len());
        let result = server
            .execute_command(ExecuteCommandParams {
                command: command.into(),
                arguments,
                work_done_progress_params: Default::default(),
            })
            .await?;
        Ok(result)
    }
}
