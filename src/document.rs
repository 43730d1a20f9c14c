//! Declarative schema documents
//!
//! A [`SchemaDocument`] is the serializable form of a [`SchemaNode`]: models
//! and hooks are referred to by name and resolved through a [`ModelRegistry`].
//!
//! ```json
//! {
//!   "model": "Person",
//!   "include": [
//!     { "field": "pet", "model": "Animal", "include": { "field": "collars", "model": "Item" } },
//!     { "field": "birthday", "model": "Date", "singleParam": true }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::ModelRegistry;
use crate::schema::{Include, SchemaNode};

/// Serializable schema node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeDocument>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub single_param: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multi_param: bool,

    /// Hook name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_transform: Option<String>,
}

/// Serializable include: one node or a list of siblings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncludeDocument {
    // Listed first: a struct would also accept an empty array.
    Many(Vec<SchemaDocument>),
    One(Box<SchemaDocument>),
}

impl SchemaDocument {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a document, choosing the format by file extension (`.toml` or JSON)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Build the schema tree, resolving names through `registry`.
    ///
    /// Unknown model names become record models; unknown hooks are an error.
    pub fn resolve(&self, registry: &mut ModelRegistry) -> Result<SchemaNode> {
        let include = match &self.include {
            None => None,
            Some(IncludeDocument::One(doc)) => Some(Include::from(doc.resolve(registry)?)),
            Some(IncludeDocument::Many(docs)) => Some(Include::Many(
                docs.iter()
                    .map(|doc| doc.resolve(registry))
                    .collect::<Result<Vec<_>>>()?,
            )),
        };
        let on_transform = match &self.on_transform {
            Some(name) => Some(registry.hook(name)?),
            None => None,
        };

        Ok(SchemaNode {
            field: self.field.clone(),
            model: self.model.as_deref().map(|name| registry.get_or_record(name)),
            include,
            single_param: self.single_param,
            multi_param: self.multi_param,
            on_transform,
        })
    }
}
