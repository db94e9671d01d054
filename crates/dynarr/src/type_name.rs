// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime type identity.
//!
//! A [`TypeName`] is the identity a [`Value`] carries for registry membership
//! and array type checks: a bare base identifier plus an explicit indirection
//! depth. The rendered string form uses one leading `*` marker per
//! indirection level (`"**Vector3"`), and parsing accepts the same form, so
//! the marker convention survives only at the string boundary; comparisons
//! and derivation work on the structured fields.

use crate::value::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Runtime type identity: bare base identifier plus indirection depth.
///
/// Two names are equal iff base and depth both match, which for the rendered
/// string form means byte-identical strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    base: String,
    indirection: u8,
}

impl TypeName {
    /// Derive the type name of a value.
    ///
    /// Pure function of the value's shape: `Ref` wrappers each contribute one
    /// indirection level, records contribute their declared name with any
    /// `::` path qualifier stripped, and every other tag maps to its
    /// primitive kind name.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Ref(inner) => {
                let mut name = Self::of(inner);
                name.indirection = name.indirection.saturating_add(1);
                name
            }
            Value::Bool(_) => Self::bare("bool"),
            Value::U8(_) => Self::bare("u8"),
            Value::U16(_) => Self::bare("u16"),
            Value::U32(_) => Self::bare("u32"),
            Value::U64(_) => Self::bare("u64"),
            Value::I8(_) => Self::bare("i8"),
            Value::I16(_) => Self::bare("i16"),
            Value::I32(_) => Self::bare("i32"),
            Value::I64(_) => Self::bare("i64"),
            Value::F32(_) => Self::bare("f32"),
            Value::F64(_) => Self::bare("f64"),
            Value::Complex64(..) => Self::bare("complex64"),
            Value::Complex128(..) => Self::bare("complex128"),
            Value::String(_) => Self::bare("string"),
            Value::Record(r) => Self::bare(r.type_name()),
        }
    }

    /// Parse the rendered form: a leading run of `*` markers followed by the
    /// base identifier. Any `::` path qualifier on the base is stripped, as
    /// in derivation. Never fails; an empty string is a valid (never
    /// registered) name.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let stripped = name.trim_start_matches('*');
        let depth = u8::try_from(name.len() - stripped.len()).unwrap_or(u8::MAX);
        let mut parsed = Self::bare(stripped);
        parsed.indirection = depth;
        parsed
    }

    /// Bare base identifier, without indirection markers.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Number of indirection levels the name encodes.
    #[must_use]
    pub fn indirection(&self) -> u8 {
        self.indirection
    }

    fn bare(base: &str) -> Self {
        let unqualified = base.rsplit("::").next().unwrap_or(base);
        Self {
            base: unqualified.to_string(),
            indirection: 0,
        }
    }
}

impl FromStr for TypeName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.indirection {
            f.write_str("*")?;
        }
        f.write_str(&self.base)
    }
}
