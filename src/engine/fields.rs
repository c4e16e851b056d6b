// src/engine/fields.rs

//! Display-model introspection.
//!
//! The attribution engine only needs one thing from a display model: the set
//! of field names it exposes. Three ways to provide it:
//! - `display_fields!` generates a compile-time descriptor for a Rust type
//! - [`ModelDescriptor`] registers a schema at runtime (used by the CLI)
//! - [`Reflected`] derives the names from the serde serialization of a value

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Field names exposed by a display model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet<'a> {
    names: BTreeSet<Cow<'a, str>>,
}

impl<'a> FieldSet<'a> {
    pub fn from_static(names: &'a [&'a str]) -> Self {
        Self {
            names: names.iter().map(|n| Cow::Borrowed(*n)).collect(),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }
}

/// A value whose readable field names are legitimate attribution targets.
pub trait DisplayModel {
    fn field_names(&self) -> FieldSet<'_>;
}

impl<M: DisplayModel + ?Sized> DisplayModel for &M {
    fn field_names(&self) -> FieldSet<'_> {
        (**self).field_names()
    }
}

impl DisplayModel for FieldSet<'_> {
    fn field_names(&self) -> FieldSet<'_> {
        FieldSet {
            names: self.names.iter().map(|n| Cow::Borrowed(n.as_ref())).collect(),
        }
    }
}

/// Implement [`DisplayModel`] for a struct from an explicit field list.
///
/// Each entry maps a Rust field to the name errors use for it. Listing a
/// field the struct does not have is a compile error.
///
/// ```
/// use statusmap::{display_fields, DisplayModel};
///
/// struct MemberView {
///     name: String,
///     email: String,
/// }
///
/// display_fields!(MemberView { name => "Name", email => "Email" });
///
/// let view = MemberView { name: String::new(), email: String::new() };
/// assert!(view.field_names().contains("Email"));
/// ```
#[macro_export]
macro_rules! display_fields {
    ($ty:ty { $($field:ident => $name:literal),* $(,)? }) => {
        impl $crate::DisplayModel for $ty {
            fn field_names(&self) -> $crate::FieldSet<'_> {
                let _ = |__v: &$ty| {
                    $(let _ = &__v.$field;)*
                };
                $crate::FieldSet::from_static(&[$($name),*])
            }
        }
    };
}

/// Display model registered by name at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub fields: Vec<String>,
}

impl ModelDescriptor {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl DisplayModel for ModelDescriptor {
    fn field_names(&self) -> FieldSet<'_> {
        FieldSet::from_names(self.fields.iter().map(String::as_str))
    }
}

/// Reflection fallback over serde.
///
/// Field names are the keys the value serializes with, so serde renames are
/// honoured. The type must serialize every field for every value: a field
/// marked `skip_serializing` or `skip_serializing_if` is missing from the set
/// whenever it is skipped. Use `display_fields!` for such types.
///
/// A unit struct serializes as `null` and exposes no fields.
///
/// Panics if the value serializes as anything else that is not a struct or
/// map: such a display model cannot be introspected and is a caller bug.
pub struct Reflected<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> DisplayModel for Reflected<'_, T> {
    fn field_names(&self) -> FieldSet<'_> {
        let type_name = std::any::type_name::<T>();

        let value = match serde_json::to_value(self.0) {
            Ok(v) => v,
            Err(e) => panic!("display model {} cannot be introspected: {}", type_name, e),
        };

        match value {
            serde_json::Value::Object(map) => {
                FieldSet::from_names(map.into_iter().map(|(k, _)| k))
            }
            serde_json::Value::Null => FieldSet::default(),
            other => panic!(
                "display model {} does not serialize as a struct (got {})",
                type_name,
                json_kind(&other)
            ),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
