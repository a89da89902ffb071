//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands that
//! read a manifest exit with code 2 when it cannot be loaded.

pub mod check;
pub mod dispatcher;
pub mod lint;
pub mod list;
pub mod schema;

pub use dispatcher::{
    Command, CommandDispatcher, CommandResult, EXIT_FULFILLED, EXIT_MANIFEST_ERROR,
    EXIT_UNFULFILLED,
};

use std::path::Path;

use crate::config::{load_manifest, Manifest};
use crate::error::{DepVerifyError, Result};
use crate::ui::UserInterface;

/// Load a manifest, reporting load failures through `ui`.
///
/// Returns `Ok(None)` when the failure was reported.
fn load_for_command(path: &Path, ui: &mut dyn UserInterface) -> Result<Option<Manifest>> {
    match load_manifest(path) {
        Ok(manifest) => Ok(Some(manifest)),
        Err(DepVerifyError::ManifestNotFound { path }) => {
            ui.error(&format!("Manifest not found: {}", path.display()));
            Ok(None)
        }
        Err(DepVerifyError::ManifestParseError { path, message }) => {
            ui.error(&format!("Parse error in {}: {}", path.display(), message));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
