//! One-shot fixture dumps.
//!
//! Glue around the core: derives where the dump goes, opens the output file the way the snapshot
//! facility expects it, builds and retains the fixture graph, calls [`crate::capture::capture`]
//! exactly once and reports the outcome. Unlike [`crate::capture::capture`], this layer turns a
//! failed capture into an [`Error::CaptureFailed`] carrying the OS last-error value.

use std::{
    ffi::OsString,
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    capture::{try_capture, DumpOptions},
    fixture::{self, RetentionGuard},
    Error, Result,
};

/// File extension of dump files
pub const DUMP_EXTENSION: &str = "dmp";

/// Outcome of a successful [`write_fixture_dump`]
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    /// Where the dump was written
    pub path: PathBuf,
    /// Architecture of the captured process, e.g. `x64`, `x86` or `arm64`
    pub arch: &'static str,
    /// The options the capture was requested with
    pub options: String,
    /// Size of the dump file in bytes
    pub bytes: u64,
    /// Number of live fixture instances held during the capture
    pub instances: usize,
}

/// Architecture label of the running process, in the names Windows uses for its platforms
#[must_use]
pub fn process_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        other => other,
    }
}

/// The dump path next to `exe`: same directory, same stem, `.dmp` extension.
///
/// # Errors
/// Returns [`Error::NoDumpDirectory`] if `exe` has no parent directory or no file stem
pub fn dump_path_for(exe: &Path) -> Result<PathBuf> {
    let directory = exe.parent().ok_or(Error::NoDumpDirectory)?;
    let stem = exe.file_stem().ok_or(Error::NoDumpDirectory)?;

    let mut name = OsString::from(stem);
    name.push(".");
    name.push(DUMP_EXTENSION);

    Ok(directory.join(name))
}

/// The dump path next to the running executable.
///
/// # Errors
/// Returns [`Error::FileError`] if the executable path cannot be determined, or
/// [`Error::NoDumpDirectory`] if it has no parent or stem
pub fn default_dump_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    dump_path_for(&exe)
}

/// Open `path` for a snapshot: created or truncated, read/write, with write sharing.
///
/// # Errors
/// Returns [`Error::FileError`] if the file cannot be created
pub fn open_dump_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).read(true).write(true).truncate(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(crate::capture::ffi::FILE_SHARE_WRITE);
    }

    Ok(options.open(path)?)
}

/// Build the fixture graph and capture a snapshot of this process into `path`.
///
/// The graph stays reachable until the capture call has returned. The capture is attempted once.
///
/// # Errors
/// - [`Error::Fixture`] if the graph cannot be built
/// - [`Error::FileError`] if the output file cannot be opened or inspected
/// - [`Error::CaptureFailed`] if the snapshot facility reports failure
pub fn write_fixture_dump(path: &Path, options: DumpOptions) -> Result<DumpReport> {
    let graph = RetentionGuard::new(fixture::build()?);
    let census = graph.census();
    let file = open_dump_file(path)?;

    log::debug!(
        "Capturing {} fixture instances into {}",
        census.len(),
        path.display()
    );

    graph
        .hold_across(|| try_capture(&file, options))
        .map_err(Error::CaptureFailed)?;

    let bytes = file.metadata()?.len();
    log::info!("Wrote {} bytes to {}", bytes, path.display());

    Ok(DumpReport {
        path: path.to_path_buf(),
        arch: process_arch(),
        options: options.to_string(),
        bytes,
        instances: census.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn dump_path_next_to_executable() {
        let exe = Path::new("some").join("dir").join("fixture.exe");
        let path = dump_path_for(&exe).unwrap();

        assert_eq!(path, Path::new("some").join("dir").join("fixture.dmp"));
    }

    #[test]
    fn dump_path_without_extension() {
        let exe = Path::new("bin").join("fixture");
        let path = dump_path_for(&exe).unwrap();

        assert_eq!(path, Path::new("bin").join("fixture.dmp"));
    }

    #[test]
    fn dump_path_requires_a_stem() {
        assert!(matches!(
            dump_path_for(Path::new("")),
            Err(Error::NoDumpDirectory)
        ));
    }

    #[test]
    fn default_path_is_a_dump() {
        let path = default_dump_path().unwrap();
        assert_eq!(
            path.extension().and_then(|e| e.to_str()),
            Some(DUMP_EXTENSION)
        );
    }

    #[test]
    fn open_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.dmp");
        std::fs::write(&path, b"stale contents").unwrap();

        let mut file = open_dump_file(&path).unwrap();
        assert_eq!(file.metadata().unwrap().len(), 0);
        file.write_all(b"MDMP").unwrap();
        drop(file);
        assert_eq!(std::fs::read(&path).unwrap(), b"MDMP");
    }

    #[test]
    fn open_missing_directory_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("fixture.dmp");

        assert!(matches!(open_dump_file(&path), Err(Error::FileError(_))));
    }

    #[cfg(not(windows))]
    #[test]
    fn capture_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.dmp");

        match write_fixture_dump(&path, DumpOptions::WITH_FULL_MEMORY) {
            Err(Error::CaptureFailed(os)) => {
                assert_eq!(os.kind(), std::io::ErrorKind::Unsupported)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn arch_label() {
        let expected = if cfg!(target_arch = "x86_64") {
            "x64"
        } else if cfg!(target_arch = "aarch64") {
            "arm64"
        } else {
            std::env::consts::ARCH
        };
        assert_eq!(process_arch(), expected);
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn arm_is_not_labelled_x64() {
        assert_eq!(process_arch(), "arm64");
    }
}
