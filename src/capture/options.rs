//! Option flags selecting what a process snapshot contains.
//!
//! The bit values are the ones defined by the `MINIDUMP_TYPE` enumeration of the Windows debug
//! help library. They are independent bits and are combined with `|`. The capture interface hands
//! the combined mask to the operating system untouched, so bits outside
//! [`DumpOptions::VALID_TYPE_FLAGS`] are kept here and rejected (if at all) by the facility.
//!
//! # Examples
//!
//! ```rust
//! use dumpfixture::DumpOptions;
//!
//! let options = DumpOptions::WITH_FULL_MEMORY | DumpOptions::WITH_HANDLE_DATA;
//! assert_eq!(options.bits(), 0x6);
//!
//! let parsed: DumpOptions = "WITH_FULL_MEMORY | WITH_HANDLE_DATA".parse()?;
//! assert_eq!(parsed, options);
//! # Ok::<(), dumpfixture::Error>(())
//! ```

use std::{fmt, str::FromStr};

use bitflags::bitflags;

use crate::Error;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Snapshot content flags, passed verbatim as the `DumpType` argument
    pub struct DumpOptions: u32 {
        /// Only the information needed to capture stack traces
        const NORMAL = 0x0000_0000;
        /// Data sections of all loaded modules
        const WITH_DATA_SEGS = 0x0000_0001;
        /// All accessible memory of the process
        const WITH_FULL_MEMORY = 0x0000_0002;
        /// High-level information about OS handles
        const WITH_HANDLE_DATA = 0x0000_0004;
        /// Stack and backing store memory is filtered
        const FILTER_MEMORY = 0x0000_0008;
        /// Stack and backing store memory is scanned for module references
        const SCAN_MEMORY = 0x0000_0010;
        /// The list of recently unloaded modules
        const WITH_UNLOADED_MODULES = 0x0000_0020;
        /// Pages referenced by locals or other stack memory
        const WITH_INDIRECTLY_REFERENCED_MEMORY = 0x0000_0040;
        /// Module paths are filtered down to file names
        const FILTER_MODULE_PATHS = 0x0000_0080;
        /// Complete per-process and per-thread information
        const WITH_PROCESS_THREAD_DATA = 0x0000_0100;
        /// All private read/write pages
        const WITH_PRIVATE_READ_WRITE_MEMORY = 0x0000_0200;
        /// Reduce the data that is not strictly necessary
        const WITHOUT_OPTIONAL_DATA = 0x0000_0400;
        /// Memory region information
        const WITH_FULL_MEMORY_INFO = 0x0000_0800;
        /// Thread state information
        const WITH_THREAD_INFO = 0x0000_1000;
        /// All code and code-related sections of loaded modules
        const WITH_CODE_SEGS = 0x0000_2000;
        /// Turns off secondary auxiliary-supported memory gathering
        const WITHOUT_AUXILIARY_STATE = 0x0000_4000;
        /// Requests that auxiliary data providers include their full state
        const WITH_FULL_AUXILIARY_STATE = 0x0000_8000;
        /// Private write-copy pages
        const WITH_PRIVATE_WRITE_COPY_MEMORY = 0x0001_0000;
        /// Inaccessible memory does not fail the whole operation
        const IGNORE_INACCESSIBLE_MEMORY = 0x0002_0000;
        /// Aggregate of every bit the facility understands
        const VALID_TYPE_FLAGS = 0x0003_ffff;
    }
}

impl DumpOptions {
    /// Build a flag set from a raw mask, keeping bits that have no name.
    #[must_use]
    pub const fn from_raw(mask: u32) -> Self {
        Self::from_bits_retain(mask)
    }

    /// Returns `true` if bits outside [`DumpOptions::VALID_TYPE_FLAGS`] are set.
    #[must_use]
    pub const fn has_unknown_bits(&self) -> bool {
        self.bits() & !Self::VALID_TYPE_FLAGS.bits() != 0
    }
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions::WITH_FULL_MEMORY
    }
}

impl fmt::Display for DumpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NORMAL");
        }

        bitflags::parser::to_writer(self, f)
    }
}

impl FromStr for DumpOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("NORMAL") {
            return Ok(DumpOptions::NORMAL);
        }

        let normalized = trimmed
            .split('|')
            .map(|token| {
                let token = token.trim();
                match token.get(..2) {
                    Some(prefix) if prefix.eq_ignore_ascii_case("0x") => {
                        format!("0x{}", &token[2..])
                    }
                    _ => token.to_ascii_uppercase(),
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");

        bitflags::parser::from_str::<DumpOptions>(&normalized)
            .map_err(|e| Error::InvalidOptions(format!("'{}': {}", s, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitflags::Flags;

    #[test]
    fn bit_values() {
        assert_eq!(DumpOptions::NORMAL.bits(), 0x0);
        assert_eq!(DumpOptions::WITH_DATA_SEGS.bits(), 0x1);
        assert_eq!(DumpOptions::WITH_FULL_MEMORY.bits(), 0x2);
        assert_eq!(DumpOptions::WITH_HANDLE_DATA.bits(), 0x4);
        assert_eq!(DumpOptions::FILTER_MEMORY.bits(), 0x8);
        assert_eq!(DumpOptions::SCAN_MEMORY.bits(), 0x10);
        assert_eq!(DumpOptions::WITH_UNLOADED_MODULES.bits(), 0x20);
        assert_eq!(DumpOptions::WITH_INDIRECTLY_REFERENCED_MEMORY.bits(), 0x40);
        assert_eq!(DumpOptions::FILTER_MODULE_PATHS.bits(), 0x80);
        assert_eq!(DumpOptions::WITH_PROCESS_THREAD_DATA.bits(), 0x100);
        assert_eq!(DumpOptions::WITH_PRIVATE_READ_WRITE_MEMORY.bits(), 0x200);
        assert_eq!(DumpOptions::WITHOUT_OPTIONAL_DATA.bits(), 0x400);
        assert_eq!(DumpOptions::WITH_FULL_MEMORY_INFO.bits(), 0x800);
        assert_eq!(DumpOptions::WITH_THREAD_INFO.bits(), 0x1000);
        assert_eq!(DumpOptions::WITH_CODE_SEGS.bits(), 0x2000);
        assert_eq!(DumpOptions::WITHOUT_AUXILIARY_STATE.bits(), 0x4000);
        assert_eq!(DumpOptions::WITH_FULL_AUXILIARY_STATE.bits(), 0x8000);
        assert_eq!(DumpOptions::WITH_PRIVATE_WRITE_COPY_MEMORY.bits(), 0x10000);
        assert_eq!(DumpOptions::IGNORE_INACCESSIBLE_MEMORY.bits(), 0x20000);
        assert_eq!(DumpOptions::VALID_TYPE_FLAGS.bits(), 0x3ffff);
    }

    #[test]
    fn valid_mask_covers_every_named_bit() {
        let union = DumpOptions::FLAGS
            .iter()
            .fold(0u32, |acc, flag| acc | flag.value().bits());

        assert_eq!(union, DumpOptions::VALID_TYPE_FLAGS.bits());
        assert!(!DumpOptions::all().has_unknown_bits());
    }

    #[test]
    fn unknown_bits_pass_through() {
        let options = DumpOptions::from_raw(0x0004_0002);

        assert!(options.contains(DumpOptions::WITH_FULL_MEMORY));
        assert!(options.has_unknown_bits());
        assert_eq!(options.bits(), 0x0004_0002);
    }

    #[test]
    fn default_is_full_memory() {
        assert_eq!(DumpOptions::default(), DumpOptions::WITH_FULL_MEMORY);
    }

    #[test]
    fn parse_names() {
        let options: DumpOptions = "with_full_memory | with_thread_info".parse().unwrap();
        assert_eq!(
            options,
            DumpOptions::WITH_FULL_MEMORY | DumpOptions::WITH_THREAD_INFO
        );

        let normal: DumpOptions = "Normal".parse().unwrap();
        assert!(normal.is_empty());

        let hex: DumpOptions = "0x2".parse().unwrap();
        assert_eq!(hex, DumpOptions::WITH_FULL_MEMORY);
    }

    #[test]
    fn parse_uppercase_hex_prefix() {
        let hex: DumpOptions = "0X2".parse().unwrap();
        assert_eq!(hex, DumpOptions::WITH_FULL_MEMORY);

        let mixed: DumpOptions = "0X1000 | with_full_memory".parse().unwrap();
        assert_eq!(mixed.bits(), 0x1002);

        let unknown: DumpOptions = "0X40000".parse().unwrap();
        assert!(unknown.has_unknown_bits());
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let result = "WITH_EVERYTHING".parse::<DumpOptions>();
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn display() {
        assert_eq!(DumpOptions::NORMAL.to_string(), "NORMAL");
        assert_eq!(DumpOptions::WITH_FULL_MEMORY.to_string(), "WITH_FULL_MEMORY");
    }
}
