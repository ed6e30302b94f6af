//! Named stores for descriptor values.
//!
//! Population lists carry only names; the numeric vectors behind those
//! names live here. Registries are plain owned values passed explicitly
//! into every operation that needs them, so evolution calls stay
//! testable and reproducible.

use std::collections::HashMap;

use crate::descriptors::profiles::KeyProfile;
use crate::descriptors::transitions::KeyTransition;
use crate::error::{KeytunerError, Result};

/// Name-keyed store for one descriptor family.
#[derive(Debug, Clone)]
pub struct Registry<V> {
    entries: HashMap<String, V>,
}

pub type ProfileRegistry = Registry<KeyProfile>;
pub type TransitionRegistry = Registry<KeyTransition>;

impl<V> Registry<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Look up a descriptor by name. A miss is fatal: every name in a
    /// population must have been registered before it got there.
    pub fn get(&self, name: &str) -> Result<&V> {
        self.entries
            .get(name)
            .ok_or_else(|| KeytunerError::UnknownDescriptor(name.to_string()))
    }

    /// Register a descriptor, overwriting any previous value under the
    /// same name. Derived names can legitimately recur across
    /// generations, so overwriting is the intended behavior.
    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        self.entries.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut registry: Registry<Vec<f64>> = Registry::new();
        registry.insert("kp1", vec![1.0, 2.0]);
        assert_eq!(registry.get("kp1").unwrap(), &vec![1.0, 2.0]);
        assert!(registry.contains("kp1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_name_is_an_error() {
        let registry: Registry<Vec<f64>> = Registry::new();
        let err = registry.get("nope").unwrap_err();
        assert!(matches!(err, KeytunerError::UnknownDescriptor(name) if name == "nope"));
    }

    #[test]
    fn insert_overwrites_existing_name() {
        let mut registry: Registry<Vec<f64>> = Registry::new();
        registry.insert("kp1", vec![1.0]);
        registry.insert("kp1", vec![2.0]);
        assert_eq!(registry.get("kp1").unwrap(), &vec![2.0]);
        assert_eq!(registry.len(), 1);
    }
}
