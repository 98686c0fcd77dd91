//! Build command: run the build for the package containing a file

use std::path::PathBuf;

use anyhow::Result;
use atmoscope_core::build_on_save;
use atmoscope_core::config::Config;

use crate::workbench::ConsoleWorkbench;

/// Run the build command. An explicit invocation builds regardless of the
/// `buildOnSave` setting.
///
/// # Errors
/// Returns an error if the build cannot be started at all.
pub async fn run(config: Config, file: PathBuf) -> Result<()> {
    let mut config = config;
    config.build_on_save = true;

    let file = file.canonicalize().unwrap_or(file);
    if build_on_save::find_package_dir(&file).is_none() {
        println!(
            "no {} found in any ancestor of {}",
            build_on_save::PKG_MARKER,
            file.display()
        );
        return Ok(());
    }
    build_on_save::on_saved(&config, &ConsoleWorkbench, &file).await
}
