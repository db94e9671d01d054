// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime-typed, lock-guarded dynamic array.
//!
//! A [`TypedArray`] is a positionally indexed mutable sequence of [`Value`]s
//! bound to exactly one element type, validated against the
//! [`TypeRegistry`] at binding time and re-checked for every operand-carrying
//! operation. Every public operation acquires the instance's single exclusive
//! lock once, for its entire duration; the guard is released on every exit
//! path before an error value reaches the caller. That makes each call atomic
//! with respect to other calls on the same instance, and nothing more: a
//! check-then-act sequence across two calls is subject to races.
//!
//! Failure surfaces in two tiers. Misuse that indicates a caller programming
//! error (wrong element type, double binding, unbound access, out-of-range
//! `set_at`) returns an [`ArrayError`]; positional misses on read/remove
//! return `None`, because an out-of-range probe is a normal query outcome.

use crate::registry::TypeRegistry;
use crate::type_name::TypeName;
use crate::value::Value;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Errors for misuse of a [`TypedArray`].
///
/// All variants indicate state the caller should not have driven the array
/// into, as opposed to the `None` results of positional probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// Operand type differs from the array's bound element type.
    TypeMismatch { expected: TypeName, got: TypeName },
    /// The operation requires a bound element type, but none is set yet.
    UnboundType,
    /// `bind` on an array whose element type is already set.
    AlreadyBound { bound: TypeName },
    /// Binding to a name absent from the registry.
    UnregisteredType { name: TypeName },
    /// `set_at` index outside `[0, len)`.
    IndexOutOfRange { index: isize, length: usize },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, got } => {
                write!(
                    f,
                    "array of type <{}> cannot proceed with an element of type <{}>",
                    expected, got
                )
            }
            Self::UnboundType => write!(f, "array element type is not set yet"),
            Self::AlreadyBound { bound } => {
                write!(f, "array element type is already set to <{}>", bound)
            }
            Self::UnregisteredType { name } => {
                write!(f, "type <{}> is not registered", name)
            }
            Self::IndexOutOfRange { index, length } => {
                write!(f, "index {} out of range for array of length {}", index, length)
            }
        }
    }
}

impl std::error::Error for ArrayError {}

/// Lock-guarded interior: the element sequence and the single-assignment
/// type binding live behind the same mutex.
#[derive(Debug, Default)]
struct ArrayInner {
    element_type: Option<TypeName>,
    elements: Vec<Value>,
}

impl ArrayInner {
    /// Gate for operations carrying an element operand. Leaves the sequence
    /// untouched on failure.
    fn check_element(&self, got: &TypeName) -> Result<(), ArrayError> {
        match &self.element_type {
            None => {
                log::warn!("[ARRAY] rejected element of type <{}>: element type is not set yet", got);
                Err(ArrayError::UnboundType)
            }
            Some(expected) if expected != got => {
                log::warn!("[ARRAY] rejected element of type <{}> for array of <{}>", got, expected);
                Err(ArrayError::TypeMismatch {
                    expected: expected.clone(),
                    got: got.clone(),
                })
            }
            Some(_) => Ok(()),
        }
    }

    fn remove(&mut self, index: isize) -> Option<Value> {
        if index < 0 || index as usize >= self.elements.len() {
            return None;
        }
        Some(self.elements.remove(index as usize))
    }

    fn get(&self, index: isize) -> Option<Value> {
        if index < 0 {
            return None;
        }
        self.elements.get(index as usize).cloned()
    }

    fn position_of(&self, value: &Value) -> Option<usize> {
        self.elements.iter().position(|element| element == value)
    }
}

/// Type-safe, thread-safe, positionally indexed mutable sequence.
///
/// Created empty and untyped with [`TypedArray::new`], or bound at
/// construction with [`TypedArray::of_type`]. The binding is
/// single-assignment: once set, the element type never changes for the life
/// of the array. Share across threads with `Arc`.
#[derive(Debug)]
pub struct TypedArray {
    registry: Arc<TypeRegistry>,
    inner: Mutex<ArrayInner>,
}

impl TypedArray {
    /// Create an empty, untyped array. Bind an element type later with
    /// [`TypedArray::bind`].
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            inner: Mutex::new(ArrayInner::default()),
        }
    }

    /// Create an empty array bound to `type_name`.
    ///
    /// Fails with [`ArrayError::UnregisteredType`] if the name is not in the
    /// registry.
    pub fn of_type(registry: Arc<TypeRegistry>, type_name: &str) -> Result<Self, ArrayError> {
        let array = Self::new(registry);
        array.bind(type_name)?;
        Ok(array)
    }

    /// One-time type binding.
    ///
    /// The registry membership check runs before the array lock is taken;
    /// the registry lock and the array lock are never held together, and the
    /// grow-only registry keeps the check valid at the moment of binding.
    pub fn bind(&self, type_name: &str) -> Result<(), ArrayError> {
        let name = TypeName::parse(type_name);
        if !self.registry.is_registered(&name) {
            log::warn!("[ARRAY] bind rejected: type <{}> is not registered", name);
            return Err(ArrayError::UnregisteredType { name });
        }

        let mut inner = self.inner.lock();
        if let Some(bound) = &inner.element_type {
            let bound = bound.clone();
            drop(inner); // release before reporting
            log::warn!("[ARRAY] bind rejected: element type is already set to <{}>", bound);
            return Err(ArrayError::AlreadyBound { bound });
        }
        inner.element_type = Some(name);
        Ok(())
    }

    /// Bound element type, or [`ArrayError::UnboundType`] if none is set.
    pub fn element_type(&self) -> Result<TypeName, ArrayError> {
        match &self.inner.lock().element_type {
            Some(name) => Ok(name.clone()),
            None => Err(ArrayError::UnboundType),
        }
    }

    /// Append an element to the end.
    pub fn append<T: Into<Value>>(&self, element: T) -> Result<(), ArrayError> {
        let element = element.into();
        let name = TypeName::of(&element);
        let mut inner = self.inner.lock();
        inner.check_element(&name)?;
        inner.elements.push(element);
        Ok(())
    }

    /// Splice an element in before the element at `index`.
    ///
    /// Out-of-range indices are silently normalized rather than rejected:
    /// negative indices clamp to the front, at-or-beyond-length appends.
    pub fn insert_at<T: Into<Value>>(&self, element: T, index: isize) -> Result<(), ArrayError> {
        let element = element.into();
        let name = TypeName::of(&element);
        let mut inner = self.inner.lock();
        inner.check_element(&name)?;
        let at = index.max(0) as usize;
        if at >= inner.elements.len() {
            inner.elements.push(element);
        } else {
            inner.elements.insert(at, element);
        }
        Ok(())
    }

    /// Replace the element at `index`.
    ///
    /// Unlike [`TypedArray::insert_at`], an index outside `[0, len)` is a
    /// caller error and fails with [`ArrayError::IndexOutOfRange`].
    pub fn set_at<T: Into<Value>>(&self, element: T, index: isize) -> Result<(), ArrayError> {
        let element = element.into();
        let name = TypeName::of(&element);
        let mut inner = self.inner.lock();
        inner.check_element(&name)?;
        let length = inner.elements.len();
        if index < 0 || index as usize >= length {
            drop(inner); // release before reporting
            log::warn!("[ARRAY] set_at index {} out of range for length {}", index, length);
            return Err(ArrayError::IndexOutOfRange { index, length });
        }
        inner.elements[index as usize] = element;
        Ok(())
    }

    /// Remove and return the element at `index`, or `None` for out-of-range.
    pub fn remove_at(&self, index: isize) -> Option<Value> {
        self.inner.lock().remove(index)
    }

    /// Remove and return the first element, or `None` when empty.
    pub fn remove_first(&self) -> Option<Value> {
        self.inner.lock().remove(0)
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn remove_last(&self) -> Option<Value> {
        let mut inner = self.inner.lock();
        let last = inner.elements.len() as isize - 1;
        inner.remove(last)
    }

    /// Remove the first element deep-equal to `element`; no-op when absent.
    pub fn remove_value<T: Into<Value>>(&self, element: T) -> Result<(), ArrayError> {
        let element = element.into();
        let name = TypeName::of(&element);
        let mut inner = self.inner.lock();
        inner.check_element(&name)?;
        if let Some(found) = inner.position_of(&element) {
            inner.elements.remove(found);
        }
        Ok(())
    }

    /// Remove every element. The type binding stays in place.
    pub fn clear(&self) {
        self.inner.lock().elements.clear();
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().elements.len()
    }

    /// `true` when the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().elements.is_empty()
    }

    /// Whether any element is deep-equal to `element`.
    pub fn contains<T: Into<Value>>(&self, element: T) -> Result<bool, ArrayError> {
        self.index_of(element).map(|found| found.is_some())
    }

    /// Position of the first element deep-equal to `element`, scanning from
    /// index 0; `None` when absent.
    pub fn index_of<T: Into<Value>>(&self, element: T) -> Result<Option<usize>, ArrayError> {
        let element = element.into();
        let name = TypeName::of(&element);
        let inner = self.inner.lock();
        inner.check_element(&name)?;
        Ok(inner.position_of(&element))
    }

    /// Clone of the element at `index`, or `None` for out-of-range.
    #[must_use]
    pub fn get(&self, index: isize) -> Option<Value> {
        self.inner.lock().get(index)
    }

    /// Clone of the first element, or `None` when empty.
    #[must_use]
    pub fn first(&self) -> Option<Value> {
        self.inner.lock().get(0)
    }

    /// Clone of the last element, or `None` when empty.
    #[must_use]
    pub fn last(&self) -> Option<Value> {
        let inner = self.inner.lock();
        let last = inner.elements.len() as isize - 1;
        inner.get(last)
    }
}

impl fmt::Display for TypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        write!(f, "TypedArray<{:p}> of type <", self as *const Self)?;
        match &inner.element_type {
            Some(name) => write!(f, "{}", name)?,
            None => f.write_str("unbound")?,
        }
        f.write_str("> with elements: [")?;
        for (i, element) in inner.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", element)?;
        }
        f.write_str("]")
    }
}
