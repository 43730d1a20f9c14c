//! Model Registry
//!
//! Names the models and hooks that declarative schema documents refer to.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, TransformError};
use crate::model::Model;
use crate::schema::Hook;
use crate::value::Mapped;

/// Models and hooks addressable by name
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Model>,
    hooks: HashMap<String, Hook>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under its own name, replacing any previous one
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.models.insert(model.name().to_string(), model);
        self
    }

    /// Register a named hook
    pub fn register_hook<F>(&mut self, name: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn(Option<&Model>, Mapped, Option<&Value>, &Value) -> Mapped + Send + Sync + 'static,
    {
        self.hooks.insert(name.into(), Arc::new(hook));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Get a model by name, registering a record model on first use
    pub fn get_or_record(&mut self, name: &str) -> Model {
        self.models
            .entry(name.to_string())
            .or_insert_with(|| Model::record(name))
            .clone()
    }

    pub fn hook(&self, name: &str) -> Result<Hook> {
        self.hooks
            .get(name)
            .cloned()
            .ok_or_else(|| TransformError::UnknownHook(name.to_string()))
    }

    /// Registered model names, sorted
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_record_is_stable() {
        let mut registry = ModelRegistry::new();
        let first = registry.get_or_record("Person");
        let second = registry.get_or_record("Person");
        assert_eq!(first, second);
        assert_eq!(registry.model_names(), vec!["Person"]);
    }

    #[test]
    fn test_registered_model_wins() {
        let mut registry = ModelRegistry::new();
        let person = Model::record("Person");
        registry.register(person.clone());
        assert_eq!(registry.get_or_record("Person"), person);
    }

    #[test]
    fn test_unknown_hook() {
        let registry = ModelRegistry::new();
        assert!(matches!(registry.hook("stamp"), Err(TransformError::UnknownHook(name)) if name == "stamp"));
    }
}
