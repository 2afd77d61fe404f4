//
//  bitbucket-api
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Settings File I/O
//!
//! Low-level file operations used by [`Settings`](super::Settings).
//!
//! ## Notes
//!
//! - All functions accept `&Path` to support both `Path` and `PathBuf`
//! - Write operations create parent directories
//! - On Unix the settings file is written with mode `0600`, since it may
//!   hold a token or app password

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the contents of a settings file.
///
/// # Errors
///
/// Fails if the file does not exist, cannot be read, or is not UTF-8. The
/// error names the path.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Writes a settings file, creating parent directories as needed.
///
/// # Parameters
///
/// * `path` - Destination; overwritten if it exists
/// * `content` - Full file contents
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut file = open_private(path).with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Checks if a settings file exists.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

/// Opens for writing with mode `0600`. An existing file is narrowed to
/// `0600` before it is truncated.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.set_len(0)?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(!config_exists(&path));
        write_config_file(&path, "base_url = \"x\"\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "base_url = \"x\"\n");
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = TempDir::new().unwrap();
        assert!(!config_exists(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_file_is_narrowed_and_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "token = \"old-and-much-longer\"\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_config_file(&path, "token = \"new\"\n").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(read_config_file(&path).unwrap(), "token = \"new\"\n");
    }

    #[test]
    fn test_read_missing_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
