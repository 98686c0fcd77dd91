//! Session: process-wide activation, event routing, deactivation
//!
//! Owns the one optional client connection, the tree switcher, the REPL
//! kernel, and the refresh debouncer. Editor events flow in here and are
//! fanned out: association changes and edits to the switcher (through
//! the debouncer), filesystem changes additionally to the server as
//! watched-files notifications, saves to build-on-save.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;

use crate::build_on_save;
use crate::config::Config;
use crate::is_src_file;
use crate::lsp::commands;
use crate::lsp::types::SrcFileSpan;
use crate::lsp::watch::{watched_events, FsChange};
use crate::lsp::{CommandChannel, LspChannel, LspClient, ServerLaunch};
use crate::repl::{Cell, Kernel};
use crate::tree::{Activation, AdapterKind, Debouncer, NodeId, RefreshTrigger, TreeSwitcher};
use crate::workbench::Workbench;

/// An event observed by the host editor.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// The focused document changed (None: no editor focused).
    ActiveDocChanged(Option<PathBuf>),
    /// A document's content changed.
    DocEdited(PathBuf),
    /// A document was saved to disk.
    DocSaved(PathBuf),
    /// A file or folder was created, changed, renamed, or deleted.
    Fs(FsChange),
    /// The user asked for a refresh.
    RefreshRequested,
}

pub struct Session {
    config: Config,
    client: Option<LspClient>,
    channel: LspChannel,
    switcher: Option<TreeSwitcher>,
    kernel: Kernel,
    debouncer: Debouncer,
    last_eval_expr: String,
}

impl Session {
    /// Bring the front end up: spawn and initialize the server unless the
    /// integration is disabled, and register the tree views. With the
    /// integration disabled, no views exist and every command resolves to
    /// nothing.
    ///
    /// # Errors
    /// Returns an error if the configured server cannot be spawned or
    /// initialized.
    pub async fn activate(config: Config, root_path: &Path) -> Result<Self> {
        let launch = ServerLaunch::from_config(&config.lsp, root_path.to_path_buf());
        let (client, channel, switcher) = match launch {
            Some(launch) => {
                tracing::info!("starting {} in {}", launch.command, launch.root_path.display());
                let mut client = LspClient::start(launch).await?;
                client.initialize().await?;
                let channel = LspChannel::connected(client.socket());
                (Some(client), channel, Some(TreeSwitcher::new()))
            }
            None => {
                tracing::info!("LSP integration disabled");
                (None, LspChannel::detached(), None)
            }
        };

        Ok(Self {
            config,
            client,
            channel,
            switcher,
            kernel: Kernel::new(),
            debouncer: Debouncer::default(),
            last_eval_expr: String::new(),
        })
    }

    /// Tear the front end down, shutting the server down when running.
    ///
    /// # Errors
    /// Returns an error if the shutdown handshake fails.
    pub async fn deactivate(&mut self) -> Result<()> {
        if let Some(client) = &mut self.client {
            client.shutdown().await?;
        }
        self.client = None;
        self.channel = LspChannel::detached();
        Ok(())
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.switcher.is_some()
    }

    #[must_use]
    pub fn channel(&self) -> &dyn CommandChannel {
        &self.channel
    }

    #[must_use]
    pub fn switcher(&self) -> Option<&TreeSwitcher> {
        self.switcher.as_ref()
    }

    #[must_use]
    pub fn kernel_mut(&mut self) -> &mut Kernel {
        &mut self.kernel
    }

    #[must_use]
    pub fn last_eval_expr(&self) -> &str {
        &self.last_eval_expr
    }

    /// Route one editor event. Refreshes are never performed here
    /// directly; they are scheduled through the debouncer and performed
    /// by [`Session::settle`] once the delay elapses.
    ///
    /// # Errors
    /// Returns an error if a watched-files notification cannot be sent.
    pub async fn handle_event(
        &mut self,
        event: EditorEvent,
        workbench: &dyn Workbench,
    ) -> Result<()> {
        match event {
            EditorEvent::ActiveDocChanged(path) => {
                let doc = path.filter(|p| is_src_file(p));
                if let Some(switcher) = &mut self.switcher {
                    if switcher.set_document(doc) {
                        self.debouncer.request(RefreshTrigger::Document, Instant::now());
                    }
                }
            }
            EditorEvent::DocEdited(path) => {
                if self.is_associated(&path) {
                    self.debouncer.request(RefreshTrigger::Document, Instant::now());
                }
            }
            EditorEvent::DocSaved(path) => {
                self.forward_fs(&FsChange::Changed(path.clone()))?;
                if self.is_associated(&path) {
                    self.debouncer.request(RefreshTrigger::Document, Instant::now());
                }
                build_on_save::on_saved(&self.config, workbench, &path).await?;
            }
            EditorEvent::Fs(change) => {
                self.forward_fs(&change)?;
                self.debouncer.request(RefreshTrigger::Filesystem, Instant::now());
            }
            EditorEvent::RefreshRequested => {
                self.debouncer.request(RefreshTrigger::Explicit, Instant::now());
            }
        }
        Ok(())
    }

    fn is_associated(&self, path: &Path) -> bool {
        is_src_file(path)
            && self
                .switcher
                .as_ref()
                .is_some_and(|s| s.document() == Some(path))
    }

    fn forward_fs(&mut self, change: &FsChange) -> Result<()> {
        if let Some(client) = &mut self.client {
            client.notify_watched_files(watched_events(change))?;
        }
        Ok(())
    }

    /// Wait out the pending debounced refresh, if any, then perform it.
    /// Fetch failures surface as error notifications, matching the
    /// call-site handling everywhere else.
    pub async fn settle(&mut self, workbench: &dyn Workbench) {
        let Some(deadline) = self.debouncer.deadline() else {
            return;
        };
        let now = Instant::now();
        if deadline > now {
            tokio::time::sleep(deadline - now).await;
        }
        let Some(triggers) = self.debouncer.fire(Instant::now()) else {
            return;
        };
        if let Some(switcher) = &mut self.switcher {
            if let Err(e) = switcher.handle_coalesced(triggers, &self.channel).await {
                workbench.show_error(&format!("refresh failed: {e}"));
            }
        }
    }

    /// Switch the active adapter; the refresh is immediate, not debounced.
    ///
    /// # Errors
    /// Returns an error when the fetch for the new adapter fails.
    pub async fn select_adapter(&mut self, kind: AdapterKind) -> Result<()> {
        if let Some(switcher) = &mut self.switcher {
            switcher.select(kind, &self.channel).await?;
        }
        Ok(())
    }

    /// Perform a node's activation against the workbench.
    ///
    /// # Errors
    /// Returns an error when activating a picker entry and the fetch for
    /// the newly selected adapter fails.
    pub async fn activate_node(&mut self, id: NodeId, workbench: &dyn Workbench) -> Result<()> {
        let Some(switcher) = &self.switcher else {
            return Ok(());
        };
        let Some(action) = switcher.tree().get(id).action.clone() else {
            return Ok(());
        };
        match action {
            Activation::OpenFile { path, span } => workbench.open_file(&path, span),
            Activation::RevealDir(path) => workbench.reveal_dir(&path),
            Activation::SelectSpan(span) => workbench.select_span(span),
            Activation::SelectAdapter(kind) => self.select_adapter(kind).await?,
        }
        Ok(())
    }

    /// Quick-eval: evaluate an expression in the context of a file. With
    /// no expression given, the previously evaluated one is reused. The
    /// result (or failure) is surfaced through the workbench.
    pub async fn quick_eval(
        &mut self,
        expr: Option<String>,
        context_file: Option<&Path>,
        workbench: &dyn Workbench,
    ) {
        let expr = expr
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| self.last_eval_expr.clone());
        if expr.is_empty() {
            return;
        }
        self.last_eval_expr = expr.clone();
        match commands::eval_expr(&self.channel, context_file, &expr).await {
            Ok(Some(result)) => workbench.show_info(&result),
            Ok(None) => workbench.show_info("(no result)"),
            Err(e) => workbench.show_error(&format!("eval failed: {e}")),
        }
    }

    /// Evaluate the expression covered by a selection span of a file.
    pub async fn eval_selection(
        &mut self,
        file: &Path,
        span: SrcFileSpan,
        workbench: &dyn Workbench,
    ) {
        match commands::eval_in_file(&self.channel, file, span).await {
            Ok(Some(result)) => workbench.show_info(&result),
            Ok(None) => workbench.show_info("(no result)"),
            Err(e) => workbench.show_error(&format!("eval failed: {e}")),
        }
    }

    /// A notebook seeded with the given expression, for
    /// new-REPL-from-expression.
    #[must_use]
    pub fn repl_seed(&self, text: &str) -> Vec<Cell> {
        vec![Cell::code(text)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_support::RecordingWorkbench;

    fn disabled_config() -> Config {
        let mut config = Config::default();
        config.lsp.disabled = true;
        config
    }

    #[tokio::test]
    async fn disabled_session_registers_nothing() {
        let session = Session::activate(disabled_config(), Path::new("/tmp"))
            .await
            .expect("activate");
        assert!(!session.enabled());
        assert!(session.switcher().is_none());
        let result = session
            .channel()
            .execute("getSrcPkgs", vec![])
            .await
            .expect("execute");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn quick_eval_remembers_last_expression() {
        let mut session = Session::activate(disabled_config(), Path::new("/tmp"))
            .await
            .expect("activate");
        let workbench = RecordingWorkbench::default();

        session.quick_eval(Some("  1 + 2 ".into()), None, &workbench).await;
        assert_eq!(session.last_eval_expr(), "1 + 2");

        // No expression given: the previous one is reused.
        session.quick_eval(None, None, &workbench).await;
        assert_eq!(session.last_eval_expr(), "1 + 2");
        assert_eq!(workbench.infos().len(), 2);
    }

    #[tokio::test]
    async fn quick_eval_with_nothing_to_eval_is_a_no_op() {
        let mut session = Session::activate(disabled_config(), Path::new("/tmp"))
            .await
            .expect("activate");
        let workbench = RecordingWorkbench::default();
        session.quick_eval(None, None, &workbench).await;
        assert!(workbench.infos().is_empty());
        assert!(workbench.errors().is_empty());
    }

    #[test]
    fn repl_seed_is_one_code_cell() {
        let config = disabled_config();
        let session = futures::executor::block_on(Session::activate(
            config,
            Path::new("/tmp"),
        ))
        .expect("activate");
        let cells = session.repl_seed("(list 1 2)");
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].value, "(list 1 2)");
    }
}
