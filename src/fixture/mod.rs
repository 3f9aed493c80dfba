//! The fixture object graph.
//!
//! The graph is built once, right before a snapshot is captured, and holds at least one live
//! instance of every memory-representation category a snapshot analyzer has to reconstruct:
//! heap and inline composites, boxed primitives and boxed composites, references that are only
//! reachable through a capability trait object, arrays and growable lists of values and
//! references, and a set of fixed-format special values.
//!
//! # Key Components
//!
//! - [`Root`] - Owns the two composites and the special values
//! - [`Composite`] - One definition, held once behind an `Arc` and once inline
//! - [`LeafEntity`] / [`LeafValue`] - Seeded leaves, implementing [`Cap1`] / [`Cap2`]
//! - [`SpecialValues`] - Timestamp, duration, GUID, weekday and member filter
//! - [`RetentionGuard`] - Keeps the graph reachable across the capture call
//! - [`Census`] - Lists every live instance with its category and address
//!
//! # Construction
//!
//! [`build`] is deterministic: each subtree uses its own increasing run of integer seeds (see
//! [`CompositeSeeds`]), so every value can be identified in an analyzer's output. Nothing is
//! mutated after construction.
//!
//! # Examples
//!
//! ```rust
//! use dumpfixture::fixture::{build, RetentionGuard};
//!
//! let guard = RetentionGuard::new(build()?);
//! assert_eq!(guard.heap.value, 10);
//! assert_eq!(&*guard.value.values, &[53, 54, 55]);
//! assert!(guard.census().missing().is_empty());
//! # Ok::<(), dumpfixture::Error>(())
//! ```

mod census;
mod composite;
mod guard;
mod leaf;
mod special;

pub use census::{Census, CensusEntry, Representation};
pub use composite::{Boxed, Composite, CompositeSeeds, LIST_LEN, OBJECT_ARRAY_LEN, VALUE_ARRAY_LEN};
pub use guard::RetentionGuard;
pub use leaf::{Cap1, Cap2, LeafEntity, LeafValue};
pub use special::{MemberFilter, SpecialValues, FIXTURE_DURATION_SECS, FIXTURE_GUID};

use std::sync::Arc;

use crate::Result;

/// Root of the fixture graph
#[derive(Debug, Clone)]
pub struct Root {
    /// Composite allocated on the heap and accessed by shared reference
    pub heap: Arc<Composite>,
    /// Composite stored inline in the root
    pub value: Composite,
    /// Fixed-format special values
    pub special: Arc<SpecialValues>,
}

impl Root {
    /// List every live instance in this graph.
    ///
    /// See [`Census::of`].
    #[must_use]
    pub fn census(&self) -> Census {
        Census::of(self)
    }
}

/// Build the fixture graph.
///
/// # Errors
/// Returns [`crate::Error::Fixture`] if a literal special value cannot be constructed
pub fn build() -> Result<Root> {
    let root = Root {
        heap: Arc::new(Composite::create(&CompositeSeeds::HEAP)),
        value: Composite::create(&CompositeSeeds::VALUE),
        special: Arc::new(SpecialValues::create()?),
    };

    log::debug!(
        "Built fixture graph: heap composite {}, value composite {}",
        root.heap.value,
        root.value.value
    );

    Ok(root)
}
