//! Eval command: quick-eval an expression via the server

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use atmoscope_core::config::Config;
use atmoscope_core::session::Session;

use crate::workbench::ConsoleWorkbench;

/// Run the eval command. With no expression argument, one is read from
/// stdin, suggesting the last evaluated expression when there is one.
///
/// # Errors
/// Returns an error if the server cannot be started or stdin fails.
pub async fn run(config: Config, expr: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let workbench = ConsoleWorkbench;
    let file = file.map(|f| f.canonicalize().unwrap_or(f));
    let root = match file.as_deref().and_then(Path::parent) {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let mut session = Session::activate(config, &root).await?;
    if !session.enabled() {
        println!("LSP integration is disabled; eval is unavailable");
        return Ok(());
    }

    let expr = match expr {
        Some(expr) => Some(expr),
        None => prompt_expression(session.last_eval_expr())?,
    };
    if let Some(expr) = expr {
        session.quick_eval(Some(expr), file.as_deref(), &workbench).await;
    }

    session.deactivate().await?;
    Ok(())
}

fn prompt_expression(suggestion: &str) -> Result<Option<String>> {
    let mut err = std::io::stderr();
    if suggestion.is_empty() {
        write!(err, "expression> ")?;
    } else {
        write!(err, "expression [{suggestion}]> ")?;
    }
    err.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        if suggestion.is_empty() {
            return Ok(None);
        }
        return Ok(Some(suggestion.to_string()));
    }
    Ok(Some(line.to_string()))
}
