//! The exception-context descriptor handed to the snapshot facility.
//!
//! Mirrors the `MINIDUMP_EXCEPTION_INFORMATION` structure: the calling thread's id, a pointer to
//! exception pointers and a flag saying whether that pointer lives in the client (target) process.
//! For a voluntary snapshot the pointer is null and the flag is `FALSE`, which tells the facility
//! that no fault triggered the capture.
//!
//! The structure is declared with 4-byte packing, so it is 12 bytes on 32-bit targets and 16 bytes
//! on 64-bit targets.

use std::{ffi::c_void, fmt, ptr};

/// Fixed-layout descriptor of the capturing thread, with no exception context.
#[repr(C, packed(4))]
#[derive(Clone, Copy)]
pub struct ExceptionContext {
    thread_id: u32,
    exception_pointers: *mut c_void,
    client_pointers: i32,
}

impl ExceptionContext {
    /// Create a descriptor for `thread_id` declaring that no exception pointers are supplied.
    #[must_use]
    pub const fn for_thread(thread_id: u32) -> Self {
        ExceptionContext {
            thread_id,
            exception_pointers: ptr::null_mut(),
            client_pointers: 0,
        }
    }

    /// Create a descriptor for the calling thread.
    ///
    /// The thread id is queried from the operating system at call time.
    #[cfg(windows)]
    #[must_use]
    pub fn current() -> Self {
        // SAFETY: GetCurrentThreadId has no preconditions
        let thread_id = unsafe { super::ffi::GetCurrentThreadId() };
        Self::for_thread(thread_id)
    }

    /// The id of the thread the snapshot is taken on
    #[must_use]
    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    /// Returns `true`, the descriptor never carries exception pointers
    #[must_use]
    pub fn is_voluntary(&self) -> bool {
        let pointers = self.exception_pointers;
        pointers.is_null()
    }

    /// Returns `true` if the (absent) pointers were declared as client-supplied
    #[must_use]
    pub fn client_pointers(&self) -> bool {
        self.client_pointers != 0
    }
}

impl fmt::Debug for ExceptionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Copy out of the packed struct before taking references
        let thread_id = self.thread_id;
        let exception_pointers = self.exception_pointers;
        let client_pointers = self.client_pointers != 0;

        f.debug_struct("ExceptionContext")
            .field("thread_id", &thread_id)
            .field("exception_pointers", &exception_pointers)
            .field("client_pointers", &client_pointers)
            .finish()
    }
}
