//! Shared helpers for unit tests

#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::lsp::types::SrcFileSpan;
use crate::lsp::CommandChannel;
use crate::workbench::Workbench;

/// A workbench that records every call for assertions.
#[derive(Default)]
pub struct RecordingWorkbench {
    opened: Mutex<Vec<(PathBuf, Option<SrcFileSpan>)>>,
    revealed: Mutex<Vec<PathBuf>>,
    selections: Mutex<Vec<SrcFileSpan>>,
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    statuses: Mutex<Vec<Option<String>>>,
    terminal_runs: Mutex<Vec<(PathBuf, String)>>,
}

impl RecordingWorkbench {
    pub fn opened(&self) -> Vec<(PathBuf, Option<SrcFileSpan>)> {
        self.opened.lock().unwrap().clone()
    }

    pub fn revealed(&self) -> Vec<PathBuf> {
        self.revealed.lock().unwrap().clone()
    }

    pub fn selections(&self) -> Vec<SrcFileSpan> {
        self.selections.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<Option<String>> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn terminal_runs(&self) -> Vec<(PathBuf, String)> {
        self.terminal_runs.lock().unwrap().clone()
    }
}

impl Workbench for RecordingWorkbench {
    fn open_file(&self, path: &Path, span: Option<SrcFileSpan>) {
        self.opened.lock().unwrap().push((path.to_path_buf(), span));
    }

    fn reveal_dir(&self, path: &Path) {
        self.revealed.lock().unwrap().push(path.to_path_buf());
    }

    fn select_span(&self, span: SrcFileSpan) {
        self.selections.lock().unwrap().push(span);
    }

    fn show_info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn set_status(&self, message: Option<&str>) {
        self.statuses.lock().unwrap().push(message.map(str::to_string));
    }

    fn run_in_terminal(&self, dir: &Path, command: &str) {
        self.terminal_runs
            .lock()
            .unwrap()
            .push((dir.to_path_buf(), command.to_string()));
    }
}

/// A channel that counts calls and replays canned results per command.
#[derive(Default)]
pub struct StubChannel {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    results: Mutex<Vec<(String, Value)>>,
}

impl StubChannel {
    pub fn with_result(self, command: &str, result: Value) -> Self {
        self.results.lock().unwrap().push((command.to_string(), result));
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CommandChannel for StubChannel {
    async fn execute(&self, command: &str, arguments: Vec<Value>) -> Result<Option<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), arguments));
        let result = self
            .results
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == command)
            .map(|(_, value)| value.clone());
        Ok(result)
    }
}
