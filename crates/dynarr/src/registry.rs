// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type registry.
//!
//! Authoritative set of type names a [`TypedArray`](crate::TypedArray) may be
//! bound to. The registry is an explicit object shared by `Arc` and injected
//! into each array rather than process-global state, so tests construct
//! isolated registries. The set is grow-only: the primitive baseline is
//! seeded at construction, names are only ever added, and there is no
//! deletion operation.
//!
//! Every operation acquires the registry's single exclusive lock for its full
//! duration. No operation calls another guarded operation while holding the
//! lock.

use crate::type_name::TypeName;
use crate::value::Value;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Names seeded into every registry at construction.
const BASELINE: [&str; 14] = [
    "bool", "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64", "complex64",
    "complex128", "string",
];

/// Grow-only set of registered type names behind one exclusive lock.
#[derive(Debug)]
pub struct TypeRegistry {
    types: Mutex<HashSet<TypeName>>,
}

impl TypeRegistry {
    /// Create a registry seeded with the primitive baseline.
    #[must_use]
    pub fn new() -> Self {
        let types = BASELINE.iter().map(|name| TypeName::parse(name)).collect();
        Self {
            types: Mutex::new(types),
        }
    }

    /// Register the concrete type of `value`.
    ///
    /// Idempotent: re-registering an already-known type is a no-op, never an
    /// error.
    pub fn register(&self, value: &Value) {
        let name = TypeName::of(value);
        let mut types = self.types.lock();
        if types.insert(name.clone()) {
            log::debug!("[REGISTRY] registered type <{}>", name);
        }
    }

    /// Exclusive-read membership test.
    #[must_use]
    pub fn is_registered(&self, name: &TypeName) -> bool {
        self.types.lock().contains(name)
    }

    /// Snapshot of the current contents, sorted.
    ///
    /// The returned vector is a defensive copy; mutating it never affects the
    /// registry.
    #[must_use]
    pub fn registered_types(&self) -> Vec<TypeName> {
        let mut names: Vec<TypeName> = self.types.lock().iter().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
