// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic value model.
//!
//! [`Value`] is the closed set of element shapes a
//! [`TypedArray`](crate::TypedArray) can hold: the primitive baseline,
//! caller-defined [`Record`] composites, and explicit [`Value::Ref`]
//! indirection. Type checking elsewhere in the crate reduces to comparing the
//! names derived from these tags, so no value ever needs reflective
//! inspection.
//!
//! Equality is structural: two values compare equal iff their tags and
//! payloads match, recursively through records and references.

use std::fmt;

/// A dynamic value holding one of the supported element shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Complex number in single precision (re, im).
    Complex64(f32, f32),
    /// Complex number in double precision (re, im).
    Complex128(f64, f64),
    String(String),
    /// Caller-defined composite value; the extension point beyond the
    /// primitive baseline.
    Record(Record),
    /// Reference to a value. Each wrapping adds one indirection level to the
    /// derived type name.
    Ref(Box<Value>),
}

macro_rules! value_accessor {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        #[doc = concat!("Try to get as `", stringify!($ty), "`.")]
        #[must_use]
        pub fn $fn_name(&self) -> Option<$ty> {
            match self {
                Self::$variant(v) => Some(*v),
                _ => None,
            }
        }
    };
}

impl Value {
    value_accessor!(as_bool, Bool, bool);
    value_accessor!(as_u8, U8, u8);
    value_accessor!(as_u16, U16, u16);
    value_accessor!(as_u32, U32, u32);
    value_accessor!(as_u64, U64, u64);
    value_accessor!(as_i8, I8, i8);
    value_accessor!(as_i16, I16, i16);
    value_accessor!(as_i32, I32, i32);
    value_accessor!(as_i64, I64, i64);
    value_accessor!(as_f32, F32, f32);
    value_accessor!(as_f64, F64, f64);

    /// Try to get as a complex64 (re, im) pair.
    #[must_use]
    pub fn as_complex64(&self) -> Option<(f32, f32)> {
        match self {
            Self::Complex64(re, im) => Some((*re, *im)),
            _ => None,
        }
    }

    /// Try to get as a complex128 (re, im) pair.
    #[must_use]
    pub fn as_complex128(&self) -> Option<(f64, f64)> {
        match self {
            Self::Complex128(re, im) => Some((*re, *im)),
            _ => None,
        }
    }

    /// Try to get as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a record.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Referent of a `Ref` value, one level deep.
    #[must_use]
    pub fn referent(&self) -> Option<&Value> {
        match self {
            Self::Ref(inner) => Some(inner),
            _ => None,
        }
    }

    /// Wrap a value in one level of indirection.
    #[must_use]
    pub fn reference(inner: impl Into<Value>) -> Self {
        Self::Ref(Box::new(inner.into()))
    }
}

macro_rules! value_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

value_from!(bool, Bool);
value_from!(u8, U8);
value_from!(u16, U16);
value_from!(u32, U32);
value_from!(u64, U64);
value_from!(i8, I8);
value_from!(i16, I16);
value_from!(i32, I32);
value_from!(i64, I64);
value_from!(f32, F32);
value_from!(f64, F64);
value_from!(String, String);
value_from!(Record, Record);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::U8(v) => write!(f, "{}", v),
            Self::U16(v) => write!(f, "{}", v),
            Self::U32(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::I8(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
            Self::Complex64(re, im) => write!(f, "({}+{}i)", re, im),
            Self::Complex128(re, im) => write!(f, "({}+{}i)", re, im),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Record(r) => write!(f, "{}", r),
            Self::Ref(inner) => write!(f, "&{}", inner),
        }
    }
}

/// Caller-defined composite value: a declared type name plus named fields in
/// declaration order.
///
/// The declared name (stripped of any `::` path qualifier) is the record's
/// type identity; two records of the same name are the same type regardless
/// of field shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record with the given declared type name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a named field, builder style.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    /// Declared type name, as given to [`Record::new`].
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.name
    }

    /// Field value by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}: {}", name, value)?;
        }
        f.write_str(" }")
    }
}
