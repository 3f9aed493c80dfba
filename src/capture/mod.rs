//! Snapshot capture of the calling process.
//!
//! This module wraps the operating system's process-snapshot facility (`MiniDumpWriteDump` from
//! the Windows debug help library). It resolves the current process handle and id, describes the
//! calling thread with an [`ExceptionContext`], and asks the facility to serialize the process
//! into an already opened output file.
//!
//! # Key Components
//!
//! - [`DumpOptions`] - Bitmask selecting which memory regions and metadata are captured
//! - [`ExceptionContext`] - Fixed-layout descriptor of the capturing thread
//! - [`CaptureRequest`] - Everything resolved from the OS right before the call
//! - [`capture`] - The entry point, returning the facility's success flag
//! - [`try_capture`] - The same call, carrying the OS last-error value on failure
//!
//! # Contract
//!
//! [`capture`] returns exactly what the facility returns. It never builds an error of its own:
//! insufficient privilege, an invalid handle, a full disk or a concurrent incompatible call all
//! surface as `false`. Callers that need a diagnosis use [`try_capture`], which reads the OS
//! last-error value immediately after the facility returns and before anything is logged.
//!
//! The call is synchronous and blocks the calling thread for the whole memory walk. It is
//! attempted once; nothing is retried.
//!
//! Capturing is only available on Windows. On other targets [`capture`] logs a warning and
//! returns `false`, and [`try_capture`] fails with [`std::io::ErrorKind::Unsupported`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use dumpfixture::capture::{capture, DumpOptions};
//! use std::fs::File;
//!
//! let file = File::create("self.dmp")?;
//! if capture(&file, DumpOptions::WITH_FULL_MEMORY) {
//!     println!("snapshot written");
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

mod descriptor;
#[cfg(windows)]
pub(crate) mod ffi;
mod options;

pub use descriptor::ExceptionContext;
pub use options::DumpOptions;

use std::{fs::File, io};
#[cfg(windows)]
use std::{os::windows::io::AsRawHandle, os::windows::io::RawHandle, ptr};

/// The values resolved from the operating system for one capture call.
///
/// Built by [`CaptureRequest::current`] on the thread that is going to perform the capture, so the
/// descriptor names that thread.
#[derive(Debug, Clone, Copy)]
pub struct CaptureRequest {
    process_id: u32,
    descriptor: ExceptionContext,
    options: DumpOptions,
}

impl CaptureRequest {
    /// Resolve the current process and thread for a capture with `options`.
    #[must_use]
    pub fn current(options: DumpOptions) -> Self {
        #[cfg(windows)]
        let (process_id, descriptor) = {
            // SAFETY: GetCurrentProcessId has no preconditions
            let process_id = unsafe { ffi::GetCurrentProcessId() };
            (process_id, ExceptionContext::current())
        };

        #[cfg(not(windows))]
        let (process_id, descriptor) = (std::process::id(), ExceptionContext::for_thread(0));

        CaptureRequest {
            process_id,
            descriptor,
            options,
        }
    }

    /// Numeric id of the process being captured
    #[must_use]
    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Descriptor of the capturing thread
    #[must_use]
    pub fn descriptor(&self) -> &ExceptionContext {
        &self.descriptor
    }

    /// The option mask, passed to the facility unmodified
    #[must_use]
    pub fn options(&self) -> DumpOptions {
        self.options
    }

    /// Invoke the snapshot facility against `handle`.
    ///
    /// The descriptor is not handed to the facility: the exception, user stream and callback
    /// parameters are all null. On failure the OS last-error value is read before returning.
    ///
    /// # Errors
    /// Returns the last-error value when the facility reports failure
    ///
    /// # Safety
    ///
    /// `handle` must either be invalid (the facility then fails) or an open file handle with
    /// write access that stays open for the duration of the call.
    #[cfg(windows)]
    pub unsafe fn write_to(&self, handle: RawHandle) -> io::Result<()> {
        let process = ffi::GetCurrentProcess();

        let written = ffi::MiniDumpWriteDump(
            process,
            self.process_id,
            handle as ffi::HANDLE,
            self.options.bits(),
            ptr::null(),
            ptr::null(),
            ptr::null(),
        );

        if written == 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(())
    }
}

/// Write a snapshot of the calling process into `output`.
///
/// `output` must be open for writing; the crate opens it with
/// [`crate::dump::open_dump_file`]. Returns the facility's success flag. When `true`, the file
/// holds a complete snapshot in the OS-defined format.
#[must_use]
pub fn capture(output: &File, options: DumpOptions) -> bool {
    try_capture(output, options).is_ok()
}

/// Write a snapshot of the calling process into `output`, keeping the failure reason.
///
/// # Errors
/// Returns the OS last-error value observed right after the facility reported failure
#[cfg(windows)]
pub fn try_capture(output: &File, options: DumpOptions) -> io::Result<()> {
    // SAFETY: the handle is borrowed from `output`, which outlives the call
    unsafe { try_capture_raw(output.as_raw_handle(), options) }
}

/// Write a snapshot of the calling process into `output`, keeping the failure reason.
///
/// # Errors
/// Always fails with [`io::ErrorKind::Unsupported`], no snapshot facility exists on this target
#[cfg(not(windows))]
pub fn try_capture(_output: &File, options: DumpOptions) -> io::Result<()> {
    let request = CaptureRequest::current(options);
    log::warn!(
        "Process snapshots are not supported on this platform (pid {}, options {})",
        request.process_id(),
        request.options()
    );
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "process snapshots require Windows",
    ))
}

/// Write a snapshot of the calling process into the raw `handle`.
///
/// # Safety
///
/// See [`CaptureRequest::write_to`].
#[cfg(windows)]
#[must_use]
pub unsafe fn capture_raw(handle: RawHandle, options: DumpOptions) -> bool {
    try_capture_raw(handle, options).is_ok()
}

/// Write a snapshot of the calling process into the raw `handle`, keeping the failure reason.
///
/// # Errors
/// Returns the OS last-error value observed right after the facility reported failure
///
/// # Safety
///
/// See [`CaptureRequest::write_to`].
#[cfg(windows)]
pub unsafe fn try_capture_raw(handle: RawHandle, options: DumpOptions) -> io::Result<()> {
    let request = CaptureRequest::current(options);
    log::debug!(
        "Capturing process {} with options {} from {:?}",
        request.process_id(),
        request.options(),
        request.descriptor()
    );

    // Logging may overwrite the last-error value, so the result is taken first
    let result = request.write_to(handle);
    match &result {
        Ok(()) => log::info!("Snapshot of process {} written", request.process_id()),
        Err(e) => log::warn!(
            "Snapshot facility failed for process {}: {}",
            request.process_id(),
            e
        ),
    }

    result
}
