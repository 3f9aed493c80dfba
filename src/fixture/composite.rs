//! The composite record exercising the full representation taxonomy.
//!
//! A single [`Composite`] definition is used twice by [`crate::fixture::Root`]: once held behind an
//! [`Arc`] as a heap entity, once stored inline as a value. Cloning a composite copies its inline
//! parts (`value`, `inline`) and shares every reference, which is how a value type behaves on
//! assignment.

use std::{any::Any, fmt, sync::Arc};

use crate::fixture::leaf::{Cap1, Cap2, LeafEntity, LeafValue};

/// A value boxed onto the heap behind an untyped reference
pub type Boxed = Arc<dyn Any + Send + Sync>;

/// Multi-field record holding one instance of every representation category
#[derive(Clone)]
pub struct Composite {
    /// Raw integer
    pub value: i32,
    /// Textual value
    pub text: Arc<str>,
    /// Reference to a heap leaf
    pub object: Arc<LeafEntity>,
    /// Embedded value leaf
    pub inline: LeafValue,
    /// Array of raw integers
    pub values: Arc<[i32]>,
    /// Array of textual values
    pub texts: Arc<[Arc<str>]>,
    /// Array of heap leaf references
    pub objects: Arc<[Arc<LeafEntity>]>,
    /// Array of embedded value leaves
    pub inlines: Arc<[LeafValue]>,
    /// Always `None`
    pub absent: Option<Boxed>,
    /// Boxed `i32`
    pub boxed_int: Boxed,
    /// Boxed [`LeafValue`]
    pub boxed_value: Boxed,
    /// Heap leaf reachable only through [`Cap1`]
    pub hidden_object: Arc<dyn Cap1>,
    /// Value leaf boxed behind [`Cap2`]
    pub boxed_capability: Arc<dyn Cap2>,
    /// Growable list of heap leaf references
    pub object_list: Arc<Vec<Arc<LeafEntity>>>,
    /// Growable list of embedded value leaves
    pub value_list: Arc<Vec<LeafValue>>,
}

/// Seeds a [`Composite`] is built from.
///
/// Each range is the run of seeds for one sequence field, so every constructed value can be told
/// apart in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeSeeds {
    /// `value` and `text`
    pub base: i32,
    /// `object`
    pub object: i32,
    /// `inline`
    pub inline: i32,
    /// First seed of `values` and `texts` (three elements)
    pub values: i32,
    /// First seed of `objects` and `inlines` (four elements)
    pub arrays: i32,
    /// `boxed_int`
    pub boxed_int: i32,
    /// `boxed_value`
    pub boxed_value: i32,
    /// `hidden_object`
    pub hidden_object: i32,
    /// `boxed_capability`
    pub boxed_capability: i32,
    /// First seed of `object_list` (two elements)
    pub object_list: i32,
    /// First seed of `value_list` (two elements)
    pub value_list: i32,
}

impl CompositeSeeds {
    /// Seeds of the heap-allocated composite
    pub const HEAP: CompositeSeeds = CompositeSeeds {
        base: 10,
        object: 11,
        inline: 12,
        values: 13,
        arrays: 16,
        boxed_int: 20,
        boxed_value: 21,
        hidden_object: 22,
        boxed_capability: 23,
        object_list: 24,
        value_list: 26,
    };

    /// Seeds of the inline value composite
    pub const VALUE: CompositeSeeds = CompositeSeeds {
        base: 50,
        object: 51,
        inline: 52,
        values: 53,
        arrays: 66,
        boxed_int: 70,
        boxed_value: 71,
        hidden_object: 72,
        boxed_capability: 73,
        object_list: 74,
        value_list: 76,
    };
}

/// Number of elements in `values` and `texts`
pub const VALUE_ARRAY_LEN: i32 = 3;
/// Number of elements in `objects` and `inlines`
pub const OBJECT_ARRAY_LEN: i32 = 4;
/// Number of elements in `object_list` and `value_list`
pub const LIST_LEN: i32 = 2;

impl Composite {
    /// Build a composite from `seeds`.
    ///
    /// Every field is populated except `absent`.
    #[must_use]
    pub fn create(seeds: &CompositeSeeds) -> Composite {
        let values = seeds.values..seeds.values + VALUE_ARRAY_LEN;
        let arrays = seeds.arrays..seeds.arrays + OBJECT_ARRAY_LEN;
        let object_list = seeds.object_list..seeds.object_list + LIST_LEN;
        let value_list = seeds.value_list..seeds.value_list + LIST_LEN;

        Composite {
            value: seeds.base,
            text: Arc::from(seeds.base.to_string()),
            object: LeafEntity::create(seeds.object),
            inline: LeafValue::create(seeds.inline),
            values: values.clone().collect(),
            texts: values.map(|seed| Arc::<str>::from(seed.to_string())).collect(),
            objects: arrays.clone().map(LeafEntity::create).collect(),
            inlines: arrays.map(LeafValue::create).collect(),
            absent: None,
            boxed_int: Arc::new(seeds.boxed_int),
            boxed_value: Arc::new(LeafValue::create(seeds.boxed_value)),
            hidden_object: LeafEntity::create(seeds.hidden_object),
            boxed_capability: Arc::new(LeafValue::create(seeds.boxed_capability)),
            object_list: Arc::new(object_list.map(LeafEntity::create).collect()),
            value_list: Arc::new(value_list.map(LeafValue::create).collect()),
        }
    }

    /// The boxed integer, if `boxed_int` holds one
    #[must_use]
    pub fn unboxed_int(&self) -> Option<i32> {
        self.boxed_int.downcast_ref::<i32>().copied()
    }

    /// The boxed value leaf, if `boxed_value` holds one
    #[must_use]
    pub fn unboxed_value(&self) -> Option<&LeafValue> {
        self.boxed_value.downcast_ref::<LeafValue>()
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("value", &self.value)
            .field("text", &self.text)
            .field("object", &self.object)
            .field("inline", &self.inline)
            .field("values", &self.values)
            .field("texts", &self.texts)
            .field("objects", &self.objects)
            .field("inlines", &self.inlines)
            .field("absent", &self.absent.as_ref().map(|_| "<boxed>"))
            .field("boxed_int", &self.unboxed_int())
            .field("boxed_value", &self.unboxed_value())
            .field("hidden_object", &self.hidden_object)
            .field("boxed_capability", &self.boxed_capability)
            .field("object_list", &self.object_list)
            .field("value_list", &self.value_list)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[Arc<str>]) -> Vec<&str> {
        items.iter().map(|t| &**t).collect()
    }

    #[test]
    fn heap_literals() {
        let composite = Composite::create(&CompositeSeeds::HEAP);

        assert_eq!(composite.value, 10);
        assert_eq!(&*composite.text, "10");
        assert_eq!(composite.object.value, 11);
        assert_eq!(composite.inline.value, 12);
        assert_eq!(&*composite.values, &[13, 14, 15]);
        assert_eq!(texts(&composite.texts), vec!["13", "14", "15"]);
        assert_eq!(
            composite.objects.iter().map(|o| o.value).collect::<Vec<_>>(),
            vec![16, 17, 18, 19]
        );
        assert_eq!(
            composite.inlines.iter().map(|o| o.value).collect::<Vec<_>>(),
            vec![16, 17, 18, 19]
        );
        assert!(composite.absent.is_none());
        assert_eq!(composite.unboxed_int(), Some(20));
        assert_eq!(composite.unboxed_value(), Some(&LeafValue::create(21)));
        assert_eq!(
            format!("{:?}", composite.hidden_object),
            format!("{:?}", LeafEntity::create(22))
        );
        assert_eq!(
            format!("{:?}", composite.boxed_capability),
            format!("{:?}", LeafValue::create(23))
        );
        assert_eq!(
            composite.object_list.iter().map(|o| o.value).collect::<Vec<_>>(),
            vec![24, 25]
        );
        assert_eq!(
            composite.value_list.iter().map(|o| o.value).collect::<Vec<_>>(),
            vec![26, 27]
        );
    }

    #[test]
    fn value_literals() {
        let composite = Composite::create(&CompositeSeeds::VALUE);

        assert_eq!(composite.value, 50);
        assert_eq!(&*composite.text, "50");
        assert_eq!(composite.object.value, 51);
        assert_eq!(composite.inline.value, 52);
        assert_eq!(&*composite.values, &[53, 54, 55]);
        assert_eq!(texts(&composite.texts), vec!["53", "54", "55"]);
        assert_eq!(composite.objects.first().map(|o| o.value), Some(66));
        assert_eq!(composite.inlines.last().map(|o| o.value), Some(69));
        assert!(composite.absent.is_none());
        assert_eq!(composite.unboxed_int(), Some(70));
        assert_eq!(composite.unboxed_value().map(|v| v.value), Some(71));
        assert_eq!(composite.object_list[1].value, 75);
        assert_eq!(composite.value_list[0].value, 76);
    }

    #[test]
    fn clone_copies_inline_and_shares_references() {
        let original = Composite::create(&CompositeSeeds::VALUE);
        let copy = original.clone();

        assert!(!std::ptr::eq(&original.inline, &copy.inline));
        assert!(Arc::ptr_eq(&original.object, &copy.object));
        assert!(Arc::ptr_eq(&original.values, &copy.values));
        assert!(Arc::ptr_eq(&original.boxed_int, &copy.boxed_int));
        assert!(Arc::ptr_eq(&original.object_list, &copy.object_list));
        assert!(copy.absent.is_none());
    }

    #[test]
    fn construction_is_repeatable() {
        let first = Composite::create(&CompositeSeeds::HEAP);
        let second = Composite::create(&CompositeSeeds::HEAP);

        assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }
}
