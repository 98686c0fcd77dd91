//! Console workbench: the host capability surface on a terminal

use std::path::Path;

use atmoscope_core::lsp::types::SrcFileSpan;
use atmoscope_core::workbench::Workbench;

/// Renders workbench interactions on stdout/stderr. File opens and span
/// selections become printed locations the user (or a wrapping editor)
/// can jump to.
pub struct ConsoleWorkbench;

impl Workbench for ConsoleWorkbench {
    fn open_file(&self, path: &Path, span: Option<SrcFileSpan>) {
        match span {
            Some(span) => println!("open {}:{}:{}", path.display(), span.start.line, span.start.char),
            None => println!("open {}", path.display()),
        }
    }

    fn reveal_dir(&self, path: &Path) {
        println!("reveal {}", path.display());
    }

    fn select_span(&self, span: SrcFileSpan) {
        println!("select {}", span.label());
    }

    fn show_info(&self, message: &str) {
        println!("{message}");
    }

    fn show_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn set_status(&self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("[{message}]");
        }
    }

    fn run_in_terminal(&self, dir: &Path, command: &str) {
        eprintln!("rerunning `{command}` in {}", dir.display());
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return;
        };
        let run = std::process::Command::new(program)
            .args(parts)
            .current_dir(dir)
            .status();
        if let Err(e) = run {
            eprintln!("error: could not run `{command}`: {e}");
        }
    }
}
