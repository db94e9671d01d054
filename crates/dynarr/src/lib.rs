// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # dynarr - runtime-typed, concurrency-guarded dynamic array
//!
//! A generic sequence that enforces a single element type per instance at
//! runtime, validated against a shared [`TypeRegistry`], with every operation
//! serialized behind a per-instance exclusive lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use dynarr::{Record, TypeRegistry, TypedArray, Value};
//! use std::sync::Arc;
//!
//! fn main() -> dynarr::Result<()> {
//!     let registry = Arc::new(TypeRegistry::new());
//!
//!     // Primitive element types are pre-registered.
//!     let numbers = TypedArray::of_type(Arc::clone(&registry), "i32")?;
//!     numbers.append(1)?;
//!     numbers.append(2)?;
//!     assert_eq!(numbers.get(0), Some(Value::I32(1)));
//!
//!     // Caller-defined composite types register by example value.
//!     registry.register(&Value::Record(Record::new("Vector3")));
//!     let points = TypedArray::of_type(registry, "Vector3")?;
//!     points.append(Record::new("Vector3").with("x", 1.0).with("y", 2.0))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Runtime type safety**: every operand-carrying operation derives the
//!   operand's [`TypeName`] and rejects it with
//!   [`ArrayError::TypeMismatch`] unless it equals the array's bound type;
//!   the sequence is left unchanged on rejection.
//! - **Single-operation atomicity**: each public call locks the instance for
//!   its full duration. There is no composite atomicity across calls, so
//!   "check `contains` then `append`" can race with other threads.
//! - **Two failure tiers**: caller programming errors (wrong element type,
//!   double binding, unbound access, out-of-range `set_at`) surface as
//!   [`ArrayError`]; positional misses on read/remove surface as `None`.
//!
//! ## Modules Overview
//!
//! - [`Value`] / [`Record`] - the closed element model: primitive baseline,
//!   caller-defined composites, explicit indirection
//! - [`TypeName`] - runtime type identity derived from values
//! - [`TypeRegistry`] - grow-only set of bindable type names
//! - [`TypedArray`] - the lock-guarded container itself

mod array;
mod registry;
mod type_name;
mod value;

pub use array::{ArrayError, TypedArray};
pub use registry::TypeRegistry;
pub use type_name::TypeName;
pub use value::{Record, Value};

/// Convenience alias for fallible container operations.
pub type Result<T> = core::result::Result<T, ArrayError>;
