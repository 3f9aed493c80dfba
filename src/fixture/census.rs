//! Inventory of the live instances in a fixture graph.
//!
//! A [`Census`] lists every instance the graph holds, tagged with its [`Representation`] and the
//! in-process address it lives at. Analyzer tests use it to find instances in a snapshot; the
//! crate uses it to assert that no representation category is missing.

use serde::Serialize;
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::fixture::{composite::Composite, Root};

/// Memory-representation categories an analyzer has to reconstruct
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Composite behind a shared heap reference
    HeapComposite,
    /// Composite stored inline
    ValueComposite,
    /// Heap leaf referenced directly
    HeapLeaf,
    /// Leaf stored inline
    ValueLeaf,
    /// Immutable text
    Text,
    /// Primitive boxed behind an untyped reference
    BoxedPrimitive,
    /// Composite value boxed behind an untyped reference
    BoxedComposite,
    /// Heap leaf reachable only through a capability
    CapabilityReference,
    /// Value leaf boxed behind a capability
    CapabilityBoxedValue,
    /// Array of raw integers
    RawArray,
    /// Array of inline value composites
    ValueCompositeArray,
    /// Array of references
    ReferenceArray,
    /// Growable list of references
    ReferenceList,
    /// Growable list of inline value composites
    ValueList,
    /// Reference that is deliberately absent
    AbsentReference,
    /// Calendar timestamp
    Timestamp,
    /// Time span
    Duration,
    /// 128-bit unique identifier
    UniqueId,
    /// Enumerated constant
    EnumConstant,
    /// Bit-flag enumerated constant
    FlagConstant,
}

/// One live instance of the fixture graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CensusEntry {
    /// Representation category of the instance
    pub category: Representation,
    /// Field path from the root, e.g. `heap.object_list`
    pub path: String,
    /// The seed the instance (or its first element) was built from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i32>,
    /// Address of the instance's storage, `0` for absent references
    pub address: usize,
}

/// All live instances of a fixture graph
#[derive(Debug, Clone, Default, Serialize)]
pub struct Census {
    entries: Vec<CensusEntry>,
}

fn address<T: ?Sized>(value: &T) -> usize {
    (value as *const T).cast::<u8>() as usize
}

impl Census {
    /// Take the census of `root`.
    ///
    /// Addresses stay valid as long as `root` is not moved.
    #[must_use]
    pub fn of(root: &Root) -> Census {
        let mut census = Census::default();

        census.push(
            Representation::HeapComposite,
            "heap".to_string(),
            Some(root.heap.value),
            address(&*root.heap),
        );
        census.push(
            Representation::ValueComposite,
            "value".to_string(),
            Some(root.value.value),
            address(&root.value),
        );
        census.composite("heap", &root.heap);
        census.composite("value", &root.value);

        let special = &root.special;
        census.push(
            Representation::Timestamp,
            "special.timestamp".to_string(),
            None,
            address(&special.timestamp),
        );
        census.push(
            Representation::Duration,
            "special.duration".to_string(),
            None,
            address(&special.duration),
        );
        census.push(
            Representation::UniqueId,
            "special.guid".to_string(),
            None,
            address(&special.guid),
        );
        census.push(
            Representation::EnumConstant,
            "special.weekday".to_string(),
            None,
            address(&special.weekday),
        );
        census.push(
            Representation::FlagConstant,
            "special.member_filter".to_string(),
            None,
            address(&special.member_filter),
        );

        census
    }

    fn push(&mut self, category: Representation, path: String, seed: Option<i32>, address: usize) {
        self.entries.push(CensusEntry {
            category,
            path,
            seed,
            address,
        });
    }

    fn composite(&mut self, prefix: &str, c: &Composite) {
        self.push(
            Representation::Text,
            format!("{prefix}.text"),
            Some(c.value),
            address(&*c.text),
        );
        self.push(
            Representation::HeapLeaf,
            format!("{prefix}.object"),
            Some(c.object.value),
            address(&*c.object),
        );
        self.push(
            Representation::ValueLeaf,
            format!("{prefix}.inline"),
            Some(c.inline.value),
            address(&c.inline),
        );
        self.push(
            Representation::RawArray,
            format!("{prefix}.values"),
            c.values.first().copied(),
            address(&*c.values),
        );
        self.push(
            Representation::ReferenceArray,
            format!("{prefix}.texts"),
            c.values.first().copied(),
            address(&*c.texts),
        );
        self.push(
            Representation::ReferenceArray,
            format!("{prefix}.objects"),
            c.objects.first().map(|o| o.value),
            address(&*c.objects),
        );
        self.push(
            Representation::ValueCompositeArray,
            format!("{prefix}.inlines"),
            c.inlines.first().map(|o| o.value),
            address(&*c.inlines),
        );
        self.push(
            Representation::AbsentReference,
            format!("{prefix}.absent"),
            None,
            c.absent.as_ref().map_or(0, |b| address(&**b)),
        );
        self.push(
            Representation::BoxedPrimitive,
            format!("{prefix}.boxed_int"),
            c.unboxed_int(),
            address(&*c.boxed_int),
        );
        self.push(
            Representation::BoxedComposite,
            format!("{prefix}.boxed_value"),
            c.unboxed_value().map(|v| v.value),
            address(&*c.boxed_value),
        );
        self.push(
            Representation::CapabilityReference,
            format!("{prefix}.hidden_object"),
            None,
            address(&*c.hidden_object),
        );
        self.push(
            Representation::CapabilityBoxedValue,
            format!("{prefix}.boxed_capability"),
            None,
            address(&*c.boxed_capability),
        );
        self.push(
            Representation::ReferenceList,
            format!("{prefix}.object_list"),
            c.object_list.first().map(|o| o.value),
            address(c.object_list.as_slice()),
        );
        self.push(
            Representation::ValueList,
            format!("{prefix}.value_list"),
            c.value_list.first().map(|o| o.value),
            address(c.value_list.as_slice()),
        );
    }

    /// All entries, in graph order
    #[must_use]
    pub fn entries(&self) -> &[CensusEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `path`, if any
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&CensusEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Categories without a single live instance
    #[must_use]
    pub fn missing(&self) -> Vec<Representation> {
        Representation::iter()
            .filter(|category| !self.entries.iter().any(|e| e.category == *category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::build;

    #[test]
    fn every_category_is_present() {
        let root = build().unwrap();
        let census = Census::of(&root);

        assert!(census.missing().is_empty());
        assert_eq!(Representation::COUNT, 20);
    }

    #[test]
    fn entries_carry_seeds() {
        let root = build().unwrap();
        let census = Census::of(&root);

        assert_eq!(census.get("heap").and_then(|e| e.seed), Some(10));
        assert_eq!(census.get("value").and_then(|e| e.seed), Some(50));
        assert_eq!(census.get("heap.values").and_then(|e| e.seed), Some(13));
        assert_eq!(census.get("value.objects").and_then(|e| e.seed), Some(66));
        assert_eq!(census.get("heap.boxed_int").and_then(|e| e.seed), Some(20));
        assert_eq!(census.get("value.value_list").and_then(|e| e.seed), Some(76));
    }

    #[test]
    fn only_absent_references_have_no_address() {
        let root = build().unwrap();
        let census = Census::of(&root);

        for entry in census.entries() {
            if entry.category == Representation::AbsentReference {
                assert_eq!(entry.address, 0, "{}", entry.path);
            } else {
                assert_ne!(entry.address, 0, "{}", entry.path);
            }
        }
    }

    #[test]
    fn inline_composite_lives_inside_root() {
        let root = build().unwrap();
        let census = Census::of(&root);

        let start = address(&root);
        let end = start + std::mem::size_of::<Root>();
        let value = census.get("value").map(|e| e.address).unwrap();
        let heap = census.get("heap").map(|e| e.address).unwrap();

        assert!((start..end).contains(&value));
        assert!(!(start..end).contains(&heap));
    }

    #[test]
    fn category_names() {
        assert_eq!(Representation::HeapComposite.to_string(), "heap_composite");
        assert_eq!(Representation::CapabilityBoxedValue.to_string(), "capability_boxed_value");
    }
}
