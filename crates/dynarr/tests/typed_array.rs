// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::cast_possible_wrap)] // Test conversions
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Typed array integration tests.
//!
//! Exercises the public API end to end: binding, positional CRUD, the
//! fatal/recoverable failure split, and multi-threaded use of shared
//! instances.

use dynarr::{ArrayError, Record, TypeName, TypeRegistry, TypedArray, Value};
use std::sync::Arc;
use std::thread;

fn registry() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::new())
}

#[test]
fn test_append_and_positional_reads() {
    let array = TypedArray::of_type(registry(), "i32").unwrap();
    assert!(array.is_empty());

    array.append(10).unwrap();
    array.append(20).unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array.get(array.len() as isize - 1), Some(Value::I32(20)));
    assert_eq!(array.first(), Some(Value::I32(10)));
    assert_eq!(array.last(), Some(Value::I32(20)));
    assert_eq!(array.element_type().unwrap(), TypeName::parse("i32"));
}

#[test]
fn test_insert_at_normalizes_out_of_range_indices() {
    let array = TypedArray::of_type(registry(), "i32").unwrap();
    array.append(1).unwrap();
    array.append(2).unwrap();

    // Negative indices clamp to the front.
    array.insert_at(0, -5).unwrap();
    assert_eq!(array.first(), Some(Value::I32(0)));

    // At-or-beyond-length behaves as append.
    array.insert_at(9, 9999).unwrap();
    assert_eq!(array.last(), Some(Value::I32(9)));

    // In-range splices before the existing element.
    array.insert_at(7, 1).unwrap();
    assert_eq!(array.get(1), Some(Value::I32(7)));
    assert_eq!(array.len(), 5);
}

#[test]
fn test_remove_at_range_policy() {
    let array = TypedArray::of_type(registry(), "i32").unwrap();
    for v in [1, 2, 3] {
        array.append(v).unwrap();
    }

    assert_eq!(array.remove_at(1), Some(Value::I32(2)));
    assert_eq!(array.len(), 2);

    // Out-of-range probes are recoverable misses, not errors.
    assert_eq!(array.remove_at(-1), None);
    assert_eq!(array.remove_at(2), None);
    assert_eq!(array.len(), 2);
}

#[test]
fn test_clear_and_empty_removals() {
    let array = TypedArray::of_type(registry(), "i32").unwrap();
    array.append(1).unwrap();
    array.clear();

    assert_eq!(array.len(), 0);
    assert!(array.is_empty());
    assert_eq!(array.remove_first(), None);
    assert_eq!(array.remove_last(), None);

    // The binding survives clearing.
    assert_eq!(array.element_type().unwrap(), TypeName::parse("i32"));
    array.append(2).unwrap();
    assert_eq!(array.len(), 1);
}

#[test]
fn test_contains_agrees_with_index_of() {
    let array = TypedArray::of_type(registry(), "string").unwrap();
    array.append("a").unwrap();
    array.append("b").unwrap();
    array.append("a").unwrap();

    assert!(array.contains("a").unwrap());
    assert_eq!(array.index_of("a").unwrap(), Some(0)); // first match wins
    assert_eq!(array.index_of("b").unwrap(), Some(1));
    assert!(!array.contains("c").unwrap());
    assert_eq!(array.index_of("c").unwrap(), None);
}

#[test]
fn test_remove_value_first_match_only() {
    let array = TypedArray::of_type(registry(), "string").unwrap();
    array.append("a").unwrap();
    array.append("b").unwrap();
    array.append("a").unwrap();

    array.remove_value("a").unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array.first(), Some(Value::String("b".to_string())));

    // Absent value is a silent no-op.
    array.remove_value("c").unwrap();
    assert_eq!(array.len(), 2);
}

#[test]
fn test_demo_scenario() {
    let array = TypedArray::of_type(registry(), "i32").unwrap();
    for v in [1, 2, 3] {
        array.append(v).unwrap();
    }

    array.insert_at(42, 0).unwrap();
    assert_eq!(array.remove_first(), Some(Value::I32(42)));
    assert_eq!(array.remove_last(), Some(Value::I32(3)));

    array.set_at(55, 0).unwrap();
    assert_eq!(array.get(0), Some(Value::I32(55)));
    assert_eq!(array.get(1), Some(Value::I32(2)));
    assert_eq!(array.len(), 2);

    assert_eq!(array.get(-1), None);
    assert_eq!(array.index_of(55).unwrap(), Some(0));
}

#[test]
fn test_record_elements() {
    let registry = registry();
    registry.register(&Value::Record(Record::new("Vector3")));

    let array = TypedArray::of_type(Arc::clone(&registry), "Vector3").unwrap();
    let v = Record::new("Vector3").with("x", 1.0).with("y", 2.0).with("z", 3.0);
    array.append(v.clone()).unwrap();

    // Identity is the declared name, not the field shape.
    array.append(Record::new("Vector3")).unwrap();
    assert_eq!(array.len(), 2);

    // Other record types are rejected.
    let err = array.append(Record::new("Quaternion")).unwrap_err();
    assert!(matches!(err, ArrayError::TypeMismatch { .. }));

    array.remove_value(v).unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array.first(), Some(Value::Record(Record::new("Vector3"))));
}

#[test]
fn test_reference_elements_are_a_distinct_type() {
    let registry = registry();
    registry.register(&Value::reference(Record::new("Vector3")));

    let array = TypedArray::of_type(Arc::clone(&registry), "*Vector3").unwrap();
    array.append(Value::reference(Record::new("Vector3"))).unwrap();

    // The value type is not interchangeable with its reference type.
    let err = array.append(Record::new("Vector3")).unwrap_err();
    assert_eq!(
        err,
        ArrayError::TypeMismatch {
            expected: TypeName::parse("*Vector3"),
            got: TypeName::parse("Vector3"),
        }
    );
}

#[test]
fn test_concurrent_appends_serialize() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 100;

    let array = Arc::new(TypedArray::of_type(registry(), "i32").unwrap());
    let mut handles = Vec::new();
    for t in 0..THREADS {
        let array = Arc::clone(&array);
        handles.push(thread::spawn(move || {
            for i in 0..PER_THREAD {
                array.append((t * PER_THREAD + i) as i32).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(array.len(), THREADS * PER_THREAD);
    for i in 0..array.len() {
        assert!(array.get(i as isize).unwrap().as_i32().is_some());
    }
}

#[test]
fn test_concurrent_bind_single_winner() {
    const THREADS: usize = 8;

    let array = Arc::new(TypedArray::new(registry()));
    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let array = Arc::clone(&array);
        handles.push(thread::spawn(move || array.bind("i32").is_ok()));
    }
    let wins: usize = handles
        .into_iter()
        .map(|handle| usize::from(handle.join().unwrap()))
        .sum();

    assert_eq!(wins, 1);
    assert_eq!(array.element_type().unwrap(), TypeName::parse("i32"));
}

#[test]
fn test_concurrent_mixed_ops_keep_elements_typed() {
    const WRITERS: usize = 4;
    const READERS: usize = 2;
    const OPS: usize = 500;

    let array = Arc::new(TypedArray::of_type(registry(), "i32").unwrap());
    let mut handles = Vec::new();

    for seed in 0..WRITERS {
        let array = Arc::clone(&array);
        handles.push(thread::spawn(move || {
            let mut rng = fastrand::Rng::with_seed(seed as u64);
            for i in 0..OPS {
                match rng.usize(0..4) {
                    0 => array.append(i as i32).unwrap(),
                    1 => array.insert_at(i as i32, rng.isize(-2..64)).unwrap(),
                    2 => {
                        array.remove_at(rng.isize(-2..64));
                    }
                    _ => {
                        array.remove_last();
                    }
                }
            }
        }));
    }
    for _ in 0..READERS {
        let array = Arc::clone(&array);
        handles.push(thread::spawn(move || {
            for i in 0..OPS {
                let len = array.len();
                if let Some(element) = array.get(i as isize % (len as isize + 1)) {
                    assert!(element.as_i32().is_some());
                }
                assert!(array.contains(-1i32).is_ok());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // Whatever interleaving happened, every surviving element type-matches.
    for i in 0..array.len() {
        assert!(array.get(i as isize).unwrap().as_i32().is_some());
    }
    assert_eq!(array.element_type().unwrap(), TypeName::parse("i32"));
}

#[test]
fn test_send_sync_bounds() {
    fn assert_shareable<T: Send + Sync>() {}
    assert_shareable::<TypedArray>();
    assert_shareable::<TypeRegistry>();
}
