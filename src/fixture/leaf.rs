//! Leaf records used as array and collection elements and as targets of capability-qualified
//! references.
//!
//! Both records have the same shape: a raw integer and its textual rendering, built from a seed.
//! [`LeafEntity`] always lives on the heap behind an [`Arc`], [`LeafValue`] is stored inline in
//! whatever holds it and is copied on assignment.

use std::{fmt::Debug, sync::Arc};

/// Capability implemented by heap leaves.
///
/// Has no members; a field typed `Arc<dyn Cap1>` forces access through a trait object instead of
/// the concrete type.
pub trait Cap1: Debug + Send + Sync {}

/// Capability implemented by value leaves.
///
/// Has no members; a field typed `Arc<dyn Cap2>` boxes a [`LeafValue`] onto the heap behind a
/// trait object.
pub trait Cap2: Debug + Send + Sync {}

/// Heap-allocated leaf
#[derive(Debug, PartialEq, Eq)]
pub struct LeafEntity {
    /// The seed
    pub value: i32,
    /// The seed rendered as decimal text
    pub text: Arc<str>,
}

impl LeafEntity {
    /// Create a shared leaf from `seed`
    #[must_use]
    pub fn create(seed: i32) -> Arc<LeafEntity> {
        Arc::new(LeafEntity {
            value: seed,
            text: Arc::from(seed.to_string()),
        })
    }
}

impl Cap1 for LeafEntity {}

/// Value-type leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafValue {
    /// The seed
    pub value: i32,
    /// The seed rendered as decimal text
    pub text: Arc<str>,
}

impl LeafValue {
    /// Create an inline leaf from `seed`
    #[must_use]
    pub fn create(seed: i32) -> LeafValue {
        LeafValue {
            value: seed,
            text: Arc::from(seed.to_string()),
        }
    }
}

impl Cap2 for LeafValue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_rule() {
        for seed in [-1, 0, 11, 52, i32::MAX] {
            let entity = LeafEntity::create(seed);
            let value = LeafValue::create(seed);

            assert_eq!(entity.value, seed);
            assert_eq!(&*entity.text, seed.to_string());
            assert_eq!(value.value, seed);
            assert_eq!(&*value.text, seed.to_string());
        }
    }

    #[test]
    fn value_copy_is_independent() {
        let original = LeafValue::create(12);
        let copy = original.clone();

        assert_eq!(original, copy);
        assert_ne!(
            &original as *const LeafValue,
            &copy as *const LeafValue
        );
    }

    #[test]
    fn capability_keeps_concrete_shape() {
        let hidden: Arc<dyn Cap1> = LeafEntity::create(22);
        let boxed: Arc<dyn Cap2> = Arc::new(LeafValue::create(23));

        assert_eq!(
            format!("{:?}", hidden),
            r#"LeafEntity { value: 22, text: "22" }"#
        );
        assert_eq!(
            format!("{:?}", boxed),
            r#"LeafValue { value: 23, text: "23" }"#
        );
    }
}
