//! Build-on-save
//!
//! When a saved file sits inside an Atmo package (an ancestor directory
//! carrying `atmo.pkg`), run the toolchain's build there. The build is
//! tried in the background first; on any failure it falls back to an
//! interactive terminal so the user sees and can rerun the failing
//! command instead of it dying silently.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::workbench::Workbench;

/// Marker file that makes a directory an Atmo package root.
pub const PKG_MARKER: &str = "atmo.pkg";

/// The watched-files notification for the just-saved file must reach the
/// server before the build starts touching the package directory, so the
/// build waits this long first.
pub const SETTLE_DELAY: Duration = Duration::from_millis(321);

/// Walk upward from a file's directory looking for the package marker.
/// Stops at the filesystem root (a directory with no parent, or equal to
/// its parent) rather than assuming any particular root spelling.
#[must_use]
pub fn find_package_dir(saved_file: &Path) -> Option<PathBuf> {
    let mut dir = saved_file.parent()?;
    loop {
        if dir.join(PKG_MARKER).exists() {
            return Some(dir.to_path_buf());
        }
        let parent = dir.parent()?;
        if parent == dir {
            return None;
        }
        dir = parent;
    }
}

/// Run the build for the package containing a just-saved file, if
/// build-on-save is enabled and the file is inside a package.
///
/// # Errors
/// Returns an error only for spawn-level failures that also could not be
/// handed to a terminal; a failing build itself is handled via the
/// terminal fallback.
pub async fn on_saved(config: &Config, workbench: &dyn Workbench, saved_file: &Path) -> Result<()> {
    if !config.build_on_save {
        return Ok(());
    }
    let Some(pkg_dir) = find_package_dir(saved_file) else {
        return Ok(());
    };

    let tool = config.tool().to_string();
    let command = format!("{tool} build");
    tracing::info!("build-on-save: {command} in {}", pkg_dir.display());
    workbench.set_status(Some("build-on-save running..."));
    tokio::time::sleep(SETTLE_DELAY).await;

    let outcome = async_process::Command::new(&tool)
        .arg("build")
        .current_dir(&pkg_dir)
        .output()
        .await;

    match outcome {
        Ok(output) if output.status.success() => {}
        Ok(output) => {
            tracing::warn!("build-on-save failed with {}", output.status);
            workbench.run_in_terminal(&pkg_dir, &command);
        }
        Err(e) => {
            tracing::warn!("build-on-save could not run {tool}: {e}");
            workbench.run_in_terminal(&pkg_dir, &command);
        }
    }
    workbench.set_status(None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_marker_in_same_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(PKG_MARKER), "").expect("marker");
        let saved = dir.path().join("main.at");
        assert_eq!(find_package_dir(&saved), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn finds_marker_in_ancestor() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(PKG_MARKER), "").expect("marker");
        let nested = dir.path().join("sub").join("deeper");
        std::fs::create_dir_all(&nested).expect("mkdir");
        let saved = nested.join("main.at");
        assert_eq!(find_package_dir(&saved), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn no_marker_walks_to_root_and_gives_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        let saved = dir.path().join("main.at");
        assert_eq!(find_package_dir(&saved), None);
    }

    #[test]
    fn nearest_marker_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(PKG_MARKER), "").expect("outer marker");
        let inner = dir.path().join("inner");
        std::fs::create_dir_all(&inner).expect("mkdir");
        std::fs::write(inner.join(PKG_MARKER), "").expect("inner marker");
        let saved = inner.join("main.at");
        assert_eq!(find_package_dir(&saved), Some(inner));
    }
}
