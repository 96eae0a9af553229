//! Reconciliation of persisted JSON against default values.
//!
//! Every persisted entity implements [`Reconcile`]: the receiver is the
//! default value and the argument is whatever storage produced for that node.
//! Leaves accept the persisted value only when it deserializes cleanly into
//! the leaf type; structs walk a declared field list; fixed-size arrays walk
//! element by element. Anything absent or malformed keeps its default, so a
//! field added in a later release is filled in without extra code.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Overlay persisted data onto a default value.
pub trait Reconcile: Sized {
    /// Consume the default (`self`) and return it with every well-formed
    /// field from `persisted` applied.
    fn reconcile(self, persisted: &Value) -> Self;
}

/// Reconcile a leaf: take the persisted value if it parses, else keep `default`.
pub fn reconcile_leaf<T: DeserializeOwned>(default: T, persisted: &Value) -> T {
    T::deserialize(persisted).unwrap_or(default)
}

macro_rules! reconcile_leaves {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reconcile for $ty {
                fn reconcile(self, persisted: &Value) -> Self {
                    reconcile_leaf(self, persisted)
                }
            }
        )*
    };
}

reconcile_leaves!(bool, u32, String, Option<String>);

impl<T: Reconcile, const N: usize> Reconcile for [T; N] {
    fn reconcile(self, persisted: &Value) -> Self {
        let Some(items) = persisted.as_array() else {
            return self;
        };
        let mut index = 0;
        self.map(|default| {
            let merged = match items.get(index) {
                Some(item) => default.reconcile(item),
                None => default,
            };
            index += 1;
            merged
        })
    }
}

/// Implement [`Reconcile`] for a struct from its persisted field list.
///
/// Fields left out of the list (identity fields such as day numbers) are
/// never read from storage. `field => "key" | "legacyKey"` also reads
/// `legacyKey` when `key` is absent.
macro_rules! reconcile_fields {
    ($ty:ty { $($field:ident => $key:literal $(| $legacy:literal)*),* $(,)? }) => {
        impl $crate::store::merge::Reconcile for $ty {
            fn reconcile(mut self, persisted: &serde_json::Value) -> Self {
                let Some(object) = persisted.as_object() else {
                    return self;
                };
                $(
                    let value = object.get($key)$(.or_else(|| object.get($legacy)))*;
                    if let Some(value) = value {
                        self.$field = $crate::store::merge::Reconcile::reconcile(self.$field, value);
                    }
                )*
                self
            }
        }
    };
}

pub(crate) use reconcile_fields;

/// Implement [`Reconcile`] as a leaf for types with their own `Deserialize`.
macro_rules! reconcile_as_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::store::merge::Reconcile for $ty {
                fn reconcile(self, persisted: &serde_json::Value) -> Self {
                    $crate::store::merge::reconcile_leaf(self, persisted)
                }
            }
        )*
    };
}

pub(crate) use reconcile_as_leaf;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        id: u32,
        name: String,
        done: bool,
        flags: [bool; 3],
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                id: 7,
                name: "default".to_owned(),
                done: false,
                flags: [false; 3],
            }
        }
    }

    reconcile_fields!(Sample {
        name => "name" | "title",
        done => "done",
        flags => "flags",
    });

    #[test]
    fn leaf_takes_well_typed_value() {
        assert!(!true.reconcile(&json!(false)));
        assert_eq!(5_u32.reconcile(&json!(12)), 12);
        assert_eq!("a".to_owned().reconcile(&json!("b")), "b");
    }

    #[test]
    fn leaf_keeps_default_on_type_mismatch() {
        assert_eq!(5_u32.reconcile(&json!("twelve")), 5);
        assert_eq!(5_u32.reconcile(&json!(-3)), 5);
        assert_eq!(5_u32.reconcile(&json!(2.5)), 5);
        assert!(true.reconcile(&json!(null)));
    }

    #[test]
    fn struct_overlays_present_fields_only() {
        let merged = Sample::default().reconcile(&json!({ "done": true }));
        assert!(merged.done);
        assert_eq!(merged.name, "default");
    }

    #[test]
    fn unlisted_fields_are_never_read() {
        let merged = Sample::default().reconcile(&json!({ "id": 99, "name": "x" }));
        assert_eq!(merged.id, 7);
        assert_eq!(merged.name, "x");
    }

    #[test]
    fn legacy_key_is_read_only_when_current_key_is_absent() {
        let merged = Sample::default().reconcile(&json!({ "title": "old" }));
        assert_eq!(merged.name, "old");

        let merged = Sample::default().reconcile(&json!({ "title": "old", "name": "new" }));
        assert_eq!(merged.name, "new");
    }

    #[test]
    fn non_object_keeps_default() {
        assert_eq!(Sample::default().reconcile(&json!([1, 2])), Sample::default());
    }

    #[test]
    fn arrays_merge_element_wise_and_keep_length() {
        let merged = [false; 3].reconcile(&json!([true]));
        assert_eq!(merged, [true, false, false]);

        let merged = [false; 3].reconcile(&json!([true, true, true, true, true]));
        assert_eq!(merged, [true, true, true]);

        let merged = [false; 3].reconcile(&json!([true, "x", true]));
        assert_eq!(merged, [true, false, true]);
    }

    #[test]
    fn array_field_rejects_non_array() {
        let merged = Sample::default().reconcile(&json!({ "flags": {"not": "an array"} }));
        assert_eq!(merged.flags, [false; 3]);
    }
}
