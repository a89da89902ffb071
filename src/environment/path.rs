//! Capability lookup on the executable search path.
//!
//! A capability is present when a file with exactly its name exists in one
//! of the search directories and may be executed.

use std::path::{Path, PathBuf};

/// Directories listed in `PATH`, in search order.
pub fn search_dirs() -> Vec<PathBuf> {
    match std::env::var_os("PATH") {
        Some(raw) => std::env::split_paths(&raw).collect(),
        None => Vec::new(),
    }
}

#[cfg(unix)]
fn runnable(candidate: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(candidate)
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn runnable(candidate: &Path) -> bool {
    candidate.is_file()
}

/// First runnable file named `capability` across `dirs`.
///
/// Names that are empty or contain a separator never match; a capability
/// is a bare name, not a path.
pub fn locate(capability: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let bare = !capability.is_empty()
        && !capability.contains(std::path::MAIN_SEPARATOR)
        && !capability.contains('/');
    if !bare {
        return None;
    }
    dirs.iter()
        .map(|dir| dir.join(capability))
        .find(|candidate| runnable(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn install(dir: &Path, name: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let target = dir.join(name);
        fs::write(&target, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();
        }
        target
    }

    #[test]
    fn earlier_directory_wins() {
        let root = TempDir::new().unwrap();
        let local = root.path().join("local");
        let system = root.path().join("system");
        let expected = install(&local, "imagick");
        install(&system, "imagick");

        assert_eq!(locate("imagick", &[local, system]), Some(expected));
    }

    #[test]
    fn absent_capability() {
        let root = TempDir::new().unwrap();
        install(&root.path().join("bin"), "curl");

        assert_eq!(locate("gzip", &[root.path().join("bin")]), None);
        assert_eq!(locate("gzip", &[]), None);
    }

    #[test]
    fn paths_are_not_capability_names() {
        let root = TempDir::new().unwrap();
        install(&root.path().join("bin"), "curl");
        let dirs = [root.path().to_path_buf()];

        assert_eq!(locate("bin/curl", &dirs), None);
        assert_eq!(locate("", &dirs), None);
    }

    #[test]
    fn directories_are_not_capabilities() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("curl")).unwrap();

        assert_eq!(locate("curl", &[root.path().to_path_buf()]), None);
    }

    #[cfg(unix)]
    #[test]
    fn files_without_execute_bits_are_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let plain = root.path().join("curl");
        fs::write(&plain, "data").unwrap();
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(locate("curl", &[root.path().to_path_buf()]), None);
    }
}
