//! REPL notebook shell
//!
//! A minimal notebook: cells serialize to a JSON array of `{kind, value}`
//! objects and back, and the kernel currently just echoes each code
//! cell's trimmed source as its output. Code cells carry the Atmo
//! language id, everything else is markdown.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::lsp::types::UnknownTag;

/// Language id assigned to code cells.
pub const CODE_LANGUAGE: &str = "atmo";
/// Language id assigned to markup cells.
pub const MARKUP_LANGUAGE: &str = "markdown";
/// Mime type of echoed outputs.
pub const OUTPUT_MIME: &str = "text/x-atmo";

/// Notebook cell kind, using the host's numeric tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Markup = 1,
    Code = 2,
}

impl TryFrom<i64> for CellKind {
    type Error = UnknownTag;

    fn try_from(value: i64) -> Result<Self, UnknownTag> {
        match value {
            1 => Ok(Self::Markup),
            2 => Ok(Self::Code),
            _ => Err(UnknownTag { what: "cell kind", value }),
        }
    }
}

impl<'de> Deserialize<'de> for CellKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::try_from(i64::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

impl Serialize for CellKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*self as i64)
    }
}

/// One notebook cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub value: String,
}

impl Cell {
    #[must_use]
    pub fn code(value: impl Into<String>) -> Self {
        Self { kind: CellKind::Code, value: value.into() }
    }

    #[must_use]
    pub fn markup(value: impl Into<String>) -> Self {
        Self { kind: CellKind::Markup, value: value.into() }
    }

    /// The language id the host should edit this cell with.
    #[must_use]
    pub fn language(&self) -> &'static str {
        match self.kind {
            CellKind::Code => CODE_LANGUAGE,
            CellKind::Markup => MARKUP_LANGUAGE,
        }
    }
}

/// Serialize a notebook to its on-disk byte form.
///
/// # Errors
/// Returns an error if JSON encoding fails.
pub fn serialize_notebook(cells: &[Cell]) -> Result<Vec<u8>> {
    serde_json::to_vec(cells).context("encoding notebook")
}

/// Deserialize a notebook from its on-disk byte form.
///
/// # Errors
/// Returns an error if the bytes are not a valid cell array.
pub fn deserialize_notebook(bytes: &[u8]) -> Result<Vec<Cell>> {
    serde_json::from_slice(bytes).context("decoding notebook")
}

/// The result of executing one code cell.
#[derive(Debug, Clone)]
pub struct CellExecution {
    /// Monotonic order across the kernel's lifetime, starting at 1.
    pub exec_order: u64,
    pub mime: &'static str,
    pub output: String,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub success: bool,
}

/// Notebook controller for the one supported language. Execution is a
/// stub: each code cell's trimmed source comes back as its own output.
#[derive(Debug, Default)]
pub struct Kernel {
    exec_order: u64,
}

impl Kernel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute the given cells, skipping non-code cells.
    pub fn execute(&mut self, cells: &[Cell]) -> Vec<CellExecution> {
        cells
            .iter()
            .filter(|cell| cell.kind == CellKind::Code)
            .map(|cell| {
                self.exec_order += 1;
                let started = Utc::now();
                let output = cell.value.trim().to_string();
                CellExecution {
                    exec_order: self.exec_order,
                    mime: OUTPUT_MIME,
                    output,
                    started,
                    finished: Utc::now(),
                    success: true,
                }
            })
            .collect()
    }
}
