//! Fixed-format special values.
//!
//! One field each for a timestamp, a duration, a unique identifier, an enumerated constant and a
//! bit-flag enumerated constant. The values are literals so an analyzer test can compare them
//! exactly.

use bitflags::bitflags;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use uguid::{guid, Guid};

use crate::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Member lookup filter, a bit-flag enumeration with the conventional binding flag values
    pub struct MemberFilter: u32 {
        /// No filtering
        const DEFAULT = 0x0000;
        /// Names are compared case-insensitively
        const IGNORE_CASE = 0x0001;
        /// Only members declared on the type itself
        const DECLARED_ONLY = 0x0002;
        /// Instance members
        const INSTANCE = 0x0004;
        /// Static members
        const STATIC = 0x0008;
        /// Public members
        const PUBLIC = 0x0010;
        /// Non-public members
        const NON_PUBLIC = 0x0020;
        /// Static members up the hierarchy
        const FLATTEN_HIERARCHY = 0x0040;
    }
}

/// The unique identifier stored in [`SpecialValues::guid`]
pub const FIXTURE_GUID: Guid = guid!("d4af2890-5b89-4fb9-aa6f-2df144ceac3f");

/// Seconds stored in [`SpecialValues::duration`]
pub const FIXTURE_DURATION_SECS: i64 = 42;

/// Record holding one value of each fixed-format type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialValues {
    /// 2019-07-16 19:33:05.445
    pub timestamp: NaiveDateTime,
    /// 42 seconds
    pub duration: TimeDelta,
    /// `d4af2890-5b89-4fb9-aa6f-2df144ceac3f`
    pub guid: Guid,
    /// Friday
    pub weekday: Weekday,
    /// `PUBLIC | INSTANCE`
    pub member_filter: MemberFilter,
}

impl SpecialValues {
    /// Build the record from its literal values.
    ///
    /// # Errors
    /// Returns [`crate::Error::Fixture`] if a literal date or duration is out of range
    pub fn create() -> Result<SpecialValues> {
        let timestamp = NaiveDate::from_ymd_opt(2019, 7, 16)
            .and_then(|date| date.and_hms_milli_opt(19, 33, 5, 445))
            .ok_or_else(|| fixture_error!("Invalid fixture timestamp"))?;

        let duration = TimeDelta::try_seconds(FIXTURE_DURATION_SECS)
            .ok_or_else(|| fixture_error!("Invalid fixture duration"))?;

        Ok(SpecialValues {
            timestamp,
            duration,
            guid: FIXTURE_GUID,
            weekday: Weekday::Fri,
            member_filter: MemberFilter::PUBLIC | MemberFilter::INSTANCE,
        })
    }
}
