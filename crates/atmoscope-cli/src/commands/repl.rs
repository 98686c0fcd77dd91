//! Repl command: line REPL backed by the notebook shell
//!
//! Each entered line becomes a code cell and is executed by the kernel
//! (currently an echo stub). With `--notebook`, cells persist across
//! sessions through the JSON serializer.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atmoscope_core::repl::{deserialize_notebook, serialize_notebook, Cell, CellExecution, Kernel};

/// Run the repl command
///
/// # Errors
/// Returns an error if the notebook file cannot be read or written.
pub fn run(notebook: Option<PathBuf>, seed: Option<String>) -> Result<()> {
    let mut cells = match &notebook {
        Some(path) => load_notebook(path)?,
        None => Vec::new(),
    };

    let mut kernel = Kernel::new();
    if let Some(seed) = seed {
        let cell = Cell::code(seed);
        print_outputs(&kernel.execute(std::slice::from_ref(&cell)));
        cells.push(cell);
    }

    let stdin = std::io::stdin();
    loop {
        write!(std::io::stderr(), "atmo> ")?;
        std::io::stderr().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches('\n');
        if line.trim().is_empty() {
            continue;
        }

        let cell = Cell::code(line);
        print_outputs(&kernel.execute(std::slice::from_ref(&cell)));
        cells.push(cell);
    }

    if let Some(path) = &notebook {
        save_notebook(path, &cells)?;
        tracing::info!("saved {} cells to {}", cells.len(), path.display());
    }
    Ok(())
}

pub(crate) fn load_notebook(path: &Path) -> Result<Vec<Cell>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("reading notebook {}", path.display()))?;
    deserialize_notebook(&bytes)
}

pub(crate) fn save_notebook(path: &Path, cells: &[Cell]) -> Result<()> {
    let bytes = serialize_notebook(cells)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("writing notebook {}", path.display()))
}

fn print_outputs(outputs: &[CellExecution]) {
    for output in outputs {
        println!("[{}] {}", output.exec_order, output.output);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn missing_notebook_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cells = load_notebook(&dir.path().join("none.atmo-repl")).expect("load");
        assert!(cells.is_empty());
    }

    #[test]
    fn notebook_survives_a_save_load_cycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.atmo-repl");
        let cells = vec![Cell::code("1 + 2"), Cell::markup("notes")];

        save_notebook(&path, &cells).expect("save");
        let loaded = load_notebook(&path).expect("load");
        assert_eq!(loaded, cells);

        // On-disk form is the serializer's JSON cell array.
        let raw = std::fs::read(&path).expect("read");
        let json: serde_json::Value = serde_json::from_slice(&raw).expect("json");
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[0]["kind"], 2);
    }

    #[test]
    fn corrupt_notebook_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.atmo-repl");
        std::fs::write(&path, "{nope").expect("write");
        assert!(load_notebook(&path).is_err());
    }
}
