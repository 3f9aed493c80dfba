//! Hand-written bindings to the handful of Win32 functions the capture interface needs.
//!
//! Only four entry points are used, so they are declared here instead of pulling in a full
//! Windows binding crate whose type definitions change between releases.

#![allow(non_snake_case)]

use std::ffi::c_void;

use super::descriptor::ExceptionContext;

/// Win32 `HANDLE`
pub type HANDLE = *mut c_void;
/// Win32 `BOOL`
pub type BOOL = i32;

/// `FILE_SHARE_WRITE` sharing mode for `CreateFileW`
pub const FILE_SHARE_WRITE: u32 = 0x0000_0002;

#[link(name = "kernel32")]
extern "system" {
    /// [`GetCurrentProcess`](https://learn.microsoft.com/en-us/windows/win32/api/processthreadsapi/nf-processthreadsapi-getcurrentprocess),
    /// returns a pseudo handle that does not need to be closed
    pub fn GetCurrentProcess() -> HANDLE;

    /// [`GetCurrentProcessId`](https://learn.microsoft.com/en-us/windows/win32/api/processthreadsapi/nf-processthreadsapi-getcurrentprocessid)
    pub fn GetCurrentProcessId() -> u32;

    /// [`GetCurrentThreadId`](https://learn.microsoft.com/en-us/windows/win32/api/processthreadsapi/nf-processthreadsapi-getcurrentthreadid)
    pub fn GetCurrentThreadId() -> u32;
}

#[link(name = "dbghelp")]
extern "system" {
    /// [`MiniDumpWriteDump`](https://learn.microsoft.com/en-us/windows/win32/api/minidumpapiset/nf-minidumpapiset-minidumpwritedump)
    ///
    /// The user stream and callback parameters are never supplied and are typed as opaque
    /// pointers.
    pub fn MiniDumpWriteDump(
        hProcess: HANDLE,
        ProcessId: u32,
        hFile: HANDLE,
        DumpType: u32,
        ExceptionParam: *const ExceptionContext,
        UserStreamParam: *const c_void,
        CallbackParam: *const c_void,
    ) -> BOOL;
}
