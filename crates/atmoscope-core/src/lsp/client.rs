//! LSP client: spawns the Atmo server and drives the protocol lifecycle

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Result;
use async_lsp::concurrency::ConcurrencyLayer;
use async_lsp::panic::CatchUnwindLayer;
use async_lsp::tracing::TracingLayer;
use async_lsp::{LanguageServer, ServerSocket};
// Use lsp_types re-exported from async_lsp to avoid version mismatch
use async_lsp::lsp_types::{
    ClientCapabilities, DidChangeWatchedFilesClientCapabilities, DidChangeWatchedFilesParams,
    FileEvent, InitializeParams, InitializedParams, Url, WindowClientCapabilities,
    WorkspaceClientCapabilities, WorkspaceFolder,
};
use tower::ServiceBuilder;

use super::commands;
use super::state::{ClientState, Stop};
use crate::config::LspConfig;

/// How to launch the server process.
#[derive(Debug, Clone)]
pub struct ServerLaunch {
    /// Command to start the server
    pub command: String,
    /// Arguments to the command
    pub args: Vec<String>,
    /// Working directory and workspace root
    pub root_path: PathBuf,
}

impl ServerLaunch {
    /// Build a launch description from the user configuration.
    ///
    /// Returns None when the integration is disabled or the command list
    /// is empty.
    #[must_use]
    pub fn from_config(config: &LspConfig, root_path: PathBuf) -> Option<Self> {
        if config.disabled {
            return None;
        }
        let (command, args) = config.cmd.split_first()?;
        Some(Self {
            command: command.clone(),
            args: args.to_vec(),
            root_path,
        })
    }
}

/// Client for communicating with the Atmo language server.
pub struct LspClient {
    server: ServerSocket,
    #[allow(dead_code)]
    mainloop_handle: tokio::task::JoinHandle<()>,
    #[allow(dead_code)]
    child: async_process::Child,
    launch: ServerLaunch,
}

impl LspClient {
    /// Start the server process and create a client
    ///
    /// # Errors
    /// Returns an error if the server cannot be started.
    pub async fn start(launch: ServerLaunch) -> Result<Self> {
        let (mainloop, server) = async_lsp::MainLoop::new_client(|_server| {
            ServiceBuilder::new()
                .layer(TracingLayer::default())
                .layer(CatchUnwindLayer::default())
                .layer(ConcurrencyLayer::default())
                .service(ClientState::new_router())
        });

        // Spawn the LSP server process
        let mut child = async_process::Command::new(&launch.command)
            .args(&launch.args)
            .current_dir(&launch.root_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to get stdout from LSP process"))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to get stdin from LSP process"))?;

        // Run the mainloop in a background task
        let mainloop_handle = tokio::spawn(async move {
            if let Err(e) = mainloop.run_buffered(stdout, stdin).await {
                tracing::warn!("LSP mainloop error: {}", e);
            }
        });

        Ok(Self {
            server,
            mainloop_handle,
            child,
            launch,
        })
    }

    /// Initialize the server, then send the one-shot announce notice that
    /// tells it an inspector front end is attached.
    ///
    /// # Errors
    /// Returns an error if initialization fails.
    pub async fn initialize(&mut self) -> Result<()> {
        let root_url = Url::from_directory_path(&self.launch.root_path)
            .map_err(|()| anyhow::anyhow!("workspace root is not an absolute path"))?;

        #[allow(deprecated)]
        let params = InitializeParams {
            process_id: Some(std::process::id()),
            root_uri: Some(root_url.clone()),
            workspace_folders: Some(vec![WorkspaceFolder {
                uri: root_url,
                name: "root".into(),
            }]),
            capabilities: ClientCapabilities {
                window: Some(WindowClientCapabilities {
                    work_done_progress: Some(true),
                    ..Default::default()
                }),
                workspace: Some(WorkspaceClientCapabilities {
                    did_change_watched_files: Some(DidChangeWatchedFilesClientCapabilities {
                        dynamic_registration: Some(true),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let _result = self.server.initialize(params).await?;
        self.server.initialized(InitializedParams {})?;

        // One-shot startup notice, sent once the client is running.
        let announced = self
            .server
            .execute_command(commands::announce_params())
            .await;
        if let Err(e) = announced {
            tracing::debug!("announce notice not acknowledged: {}", e);
        }

        Ok(())
    }

    /// Forward filesystem changes to the server via the standard
    /// `workspace/didChangeWatchedFiles` notification.
    ///
    /// # Errors
    /// Returns an error if the notification cannot be sent.
    pub fn notify_watched_files(&mut self, changes: Vec<FileEvent>) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        self.server
            .did_change_watched_files(DidChangeWatchedFilesParams { changes })?;
        Ok(())
    }

    /// A cloned handle to the server socket, for the command channel.
    #[must_use]
    pub fn socket(&self) -> ServerSocket {
        self.server.clone()
    }

    /// Shutdown the server
    ///
    /// # Errors
    /// Returns an error if shutdown fails.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.server.shutdown(()).await?;
        self.server.exit(())?;
        self.server.emit(Stop)?;
        Ok(())
    }
}
