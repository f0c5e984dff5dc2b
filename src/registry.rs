use std::collections::BTreeMap;

use crate::error::{PipelineError, Result};

/// Builds a fresh stage instance.
pub type Factory<T> = fn() -> Box<T>;

/// Name to factory catalog. Filled once at startup, read-only afterwards.
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    entries: BTreeMap<String, Factory<T>>,
}

impl<T: ?Sized> Registry<T> {
    /// `kind` names what is stored, for error messages ("filter", "output").
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, factory: Factory<T>) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(PipelineError::DuplicateRegistration {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        tracing::debug!("registered {} '{}'", self.kind, name);
        self.entries.insert(name.to_string(), factory);
        Ok(())
    }

    pub fn create(&self, name: &str) -> Option<Box<T>> {
        self.entries.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
