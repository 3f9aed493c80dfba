//! # dumpfixture Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! from the dumpfixture library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dumpfixture operations
pub use crate::Error;

/// The result type used throughout dumpfixture
pub use crate::Result;

// ================================================================================================
// Capture Interface
// ================================================================================================

/// Capture entry point, option flags and thread descriptor
pub use crate::capture::{capture, try_capture, CaptureRequest, DumpOptions, ExceptionContext};

// ================================================================================================
// Fixture Graph
// ================================================================================================

/// Graph construction and retention
pub use crate::fixture::{build, RetentionGuard, Root};

/// Graph node types
pub use crate::fixture::{
    Cap1, Cap2, Composite, CompositeSeeds, LeafEntity, LeafValue, MemberFilter, SpecialValues,
};

/// Instance inventory
pub use crate::fixture::{Census, CensusEntry, Representation};

// ================================================================================================
// Dump Orchestration
// ================================================================================================

/// One-shot dumps and output file handling
pub use crate::dump::{
    default_dump_path, dump_path_for, open_dump_file, write_fixture_dump, DumpReport,
};
