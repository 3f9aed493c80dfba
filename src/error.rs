use thiserror::Error;

macro_rules! fixture_error {
    ($msg:expr) => {
        crate::Error::Fixture {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The capture interface itself never produces one of these: [`crate::capture::capture`] reports
/// only the boolean returned by the operating system. Errors come from the surrounding glue,
/// which opens the output file, builds the fixture graph and, when the snapshot facility reports
/// failure, consults the OS last-error value.
///
/// # Error Categories
///
/// ## Output File Errors
/// - [`Error::FileError`] - The dump file could not be created or inspected
/// - [`Error::NoDumpDirectory`] - No default output location could be derived
///
/// ## Capture Errors
/// - [`Error::CaptureFailed`] - The snapshot facility returned `false`
///
/// ## Input Errors
/// - [`Error::Fixture`] - A literal fixture value could not be constructed
/// - [`Error::InvalidOptions`] - Option flag text could not be parsed
///
/// # Examples
///
/// ```rust,no_run
/// use dumpfixture::{dump::write_fixture_dump, DumpOptions, Error};
/// use std::path::Path;
///
/// match write_fixture_dump(Path::new("fixture.dmp"), DumpOptions::WITH_FULL_MEMORY) {
///     Ok(report) => println!("wrote {} bytes", report.bytes),
///     Err(Error::CaptureFailed(os)) => eprintln!("snapshot facility failed: {}", os),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised while creating, opening or inspecting the
    /// output file. These happen before the snapshot facility is invoked.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The executable location has no parent directory or no file stem, so no
    /// default dump path can be derived from it.
    #[error("Could not derive a dump file location from the executable path")]
    NoDumpDirectory,

    /// The snapshot facility reported failure.
    ///
    /// Carries the operating system's last-error value observed right after the
    /// failed call, e.g. insufficient privilege, invalid handle or disk exhaustion.
    #[error("Snapshot capture failed - {0}")]
    CaptureFailed(std::io::Error),

    /// A literal fixture value could not be constructed.
    ///
    /// # Fields
    ///
    /// * `message` - What failed to build
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Fixture - {file}:{line}: {message}")]
    Fixture {
        /// The message to be printed for the Fixture error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Option flag text could not be parsed into [`crate::DumpOptions`].
    #[error("Invalid dump options - {0}")]
    InvalidOptions(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_error_records_location() {
        let line = line!() + 1;
        let error = fixture_error!("Invalid fixture timestamp");

        match error {
            Error::Fixture {
                message,
                file,
                line: at,
            } => {
                assert_eq!(message, "Invalid fixture timestamp");
                assert!(file.ends_with("error.rs"));
                assert_eq!(at, line);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
