//! Object Model Transform
//!
//! Maps loosely-typed nested data (decoded JSON payloads) into typed model
//! instances, driven by a declarative schema tree instead of per-type mapping
//! code.
//!
//! ## Features
//!
//! - **Path Resolution**: Dotted fields (`"computer.favorite"`) reach into nested objects
//! - **Sibling Includes**: A list of nodes transforms several fields of one object
//! - **Array Fan-Out**: Sequences map the node over each element
//! - **Construction Modes**: Object merge, single-argument, or spread positional arguments
//! - **Hooks**: `onTransform` replaces instantiation with caller logic
//!
//! ## Architecture
//!
//! ```text
//! transform(value, schema)
//! └── engine
//!     ├── walker   schema nodes and sibling lists
//!     ├── path     dotted field resolution
//!     ├── guard    per-node validation
//!     └── policy   hook / single / multi / default merge
//! ```
//!
//! ## Example
//!
//! ```
//! use object_model_transform::{transform, Model, SchemaNode};
//! use serde_json::json;
//!
//! let person = Model::record("Person");
//! let animal = Model::record("Animal");
//! let schema = SchemaNode::new()
//!     .with_model(person.clone())
//!     .include(SchemaNode::field("pet").with_model(animal.clone()));
//!
//! let out = transform(&json!({"name": "Pat", "pet": {"name": "Li"}}), &schema).unwrap();
//! assert!(out.is_instance_of(&person));
//! assert!(out.get("pet").unwrap().is_instance_of(&animal));
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod model;
pub mod registry;
pub mod schema;
pub mod value;

pub use config::{MapperConfig, OutputFormat};
pub use document::{IncludeDocument, SchemaDocument};
pub use engine::{transform, transform_with, TransformOptions, ROOT_KEY};
pub use error::{Result, TransformError};
pub use model::{Capability, Entity, Instance, Model, Record};
pub use registry::ModelRegistry;
pub use schema::{Hook, Include, SchemaNode};
pub use value::{is_falsy, Fields, Mapped};
