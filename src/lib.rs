// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'capture/ffi.rs' declares the Win32 entry points used for capturing
// - 'capture/mod.rs' passes a raw file handle to MiniDumpWriteDump

//! # dumpfixture
//!
//! Builds a deliberately shaped in-memory object graph and then captures a full-process memory
//! snapshot (a Windows minidump) of itself. The resulting file is test input for snapshot
//! analyzers: it is guaranteed to contain at least one live instance of every
//! memory-representation category such an analyzer has to reconstruct.
//!
//! ## Covered Representations
//!
//! - **Composites** - one definition, held once on the heap and once inline
//! - **Boxed values** - a boxed `i32` and a boxed composite behind `Arc<dyn Any>`
//! - **Capability references** - values only reachable through `dyn Cap1` / `dyn Cap2`
//! - **Arrays** - of raw integers, of inline composites, of references
//! - **Lists** - growable vectors of references and of inline composites
//! - **Special values** - timestamp, duration, GUID, weekday, bit-flag constant
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dumpfixture::prelude::*;
//!
//! let path = default_dump_path()?;
//! let report = write_fixture_dump(&path, DumpOptions::WITH_FULL_MEMORY)?;
//! println!("Written {} dump file to {}.", report.arch, report.path.display());
//! # Ok::<(), dumpfixture::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`capture`] - The capture interface: option flags, exception-context descriptor and the
//!   call into the OS snapshot facility
//! - [`fixture`] - The fixture graph, its construction rules, the retention guard and the census
//! - [`dump`] - Output path derivation, output file handling and one-shot orchestration
//! - [`Error`] and [`Result`] - Error handling for the glue layer
//!
//! The capture interface reports only a boolean; everything that can go wrong around it (creating
//! the file, deriving its location, diagnosing a failed capture) is handled by [`dump`].
//!
//! ## Platform Support
//!
//! Capturing uses `MiniDumpWriteDump` from the Windows debug help library. On other targets the
//! fixture graph can still be built and inspected, but [`capture::capture`] returns `false`.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: graph construction, the capture request and the
//! release of the retained graph at debug level, capture results at info or warn level.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use dumpfixture::prelude::*;
///
/// let root = build()?;
/// assert!(root.census().missing().is_empty());
/// # Ok::<(), dumpfixture::Error>(())
/// ```
pub mod prelude;

/// Snapshot capture of the calling process.
///
/// See the module documentation for the success and failure contract of [`capture::capture`].
pub mod capture;

/// The fixture object graph and the retention guard keeping it alive.
pub mod fixture;

/// Output file handling and one-shot fixture dumps.
pub mod dump;

/// `dumpfixture` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dumpfixture` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use dumpfixture::{dump::write_fixture_dump, DumpOptions, Error};
///
/// match write_fixture_dump(std::path::Path::new("fixture.dmp"), DumpOptions::WITH_FULL_MEMORY) {
///     Ok(report) => println!("Wrote {} bytes", report.bytes),
///     Err(Error::CaptureFailed(os)) => println!("Capture failed: {}", os),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Snapshot content flags, see [`capture::DumpOptions`]
pub use capture::DumpOptions;
