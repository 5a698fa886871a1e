//! `PropertySet` for pass communication.
//!
//! Passes run in sequence over the same circuit and sometimes need to
//! hand data to later passes or to the caller (for example, how many gates
//! a cancellation pass removed). The `PropertySet` is a type-keyed store
//! threaded through every pass by the [`PassManager`](crate::PassManager).
//!
//! ```
//! use qsim_compile::PropertySet;
//!
//! #[derive(Debug, PartialEq)]
//! struct Marker(u32);
//!
//! let mut props = PropertySet::new();
//! props.insert(Marker(3));
//! assert_eq!(props.get::<Marker>(), Some(&Marker(3)));
//! ```

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap;

/// Gates removed by cancellation passes during one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancellationStats {
    /// Number of gates removed (always even: gates cancel in pairs).
    pub removed: usize,
}

/// Type-erased properties shared between passes.
#[derive(Debug, Default)]
pub struct PropertySet {
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing any previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }

    /// Check whether a property of type `T` is present.
    pub fn contains<T: Any>(&self) -> bool {
        self.custom.contains_key(&TypeId::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut props = PropertySet::new();
        assert!(!props.contains::<CancellationStats>());

        props.insert(CancellationStats { removed: 2 });
        assert_eq!(props.get::<CancellationStats>().unwrap().removed, 2);

        props.get_mut::<CancellationStats>().unwrap().removed += 2;
        let stats = props.remove::<CancellationStats>().unwrap();
        assert_eq!(stats.removed, 4);
        assert!(props.get::<CancellationStats>().is_none());
    }
}
