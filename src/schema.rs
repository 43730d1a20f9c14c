//! Schema types and structures

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::guard;
use crate::error::{Result, TransformError};
use crate::model::Model;
use crate::value::Mapped;

/// Custom instantiation hook
///
/// Called with the node's model (if any), the already-transformed value, the
/// enclosing data container (`None` at the top level) and the untouched root
/// input. Its return value replaces default instantiation for the node.
pub type Hook = Arc<dyn Fn(Option<&Model>, Mapped, Option<&Value>, &Value) -> Mapped + Send + Sync>;

/// Nested schema applied to the value found at a node's field
#[derive(Debug, Clone)]
pub enum Include {
    /// A single nested node
    One(Box<SchemaNode>),
    /// Sibling nodes applied to the same container, merged into one object
    Many(Vec<SchemaNode>),
}

impl Include {
    /// Iterate the nodes of this include, in order
    pub fn nodes(&self) -> impl Iterator<Item = &SchemaNode> {
        let nodes: &[SchemaNode] = match self {
            Include::One(node) => std::slice::from_ref(node.as_ref()),
            Include::Many(nodes) => nodes,
        };
        nodes.iter()
    }
}

impl From<SchemaNode> for Include {
    fn from(node: SchemaNode) -> Self {
        Include::One(Box::new(node))
    }
}

impl From<Vec<SchemaNode>> for Include {
    fn from(nodes: Vec<SchemaNode>) -> Self {
        Include::Many(nodes)
    }
}

/// A declarative instruction for transforming one field of a container
#[derive(Clone, Default)]
pub struct SchemaNode {
    /// Dotted path into the current container (e.g. `"computer.favorite"`)
    pub field: Option<String>,
    /// Constructor applied at the path's terminal value
    pub model: Option<Model>,
    /// Nested schema for the terminal value
    pub include: Option<Include>,
    /// Pass the raw value as the single constructor argument
    pub single_param: bool,
    /// Spread a sequence value as positional constructor arguments
    pub multi_param: bool,
    /// Replaces default instantiation
    pub on_transform: Option<Hook>,
}

impl SchemaNode {
    /// An empty node, as used for the top-level schema
    pub fn new() -> Self {
        Self::default()
    }

    /// A node targeting `path`
    pub fn field(path: impl Into<String>) -> Self {
        Self {
            field: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn include(mut self, node: SchemaNode) -> Self {
        self.include = Some(Include::from(node));
        self
    }

    pub fn include_all(mut self, nodes: impl IntoIterator<Item = SchemaNode>) -> Self {
        self.include = Some(Include::Many(nodes.into_iter().collect()));
        self
    }

    pub fn single_param(mut self) -> Self {
        self.single_param = true;
        self
    }

    pub fn multi_param(mut self) -> Self {
        self.multi_param = true;
        self
    }

    pub fn on_transform<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&Model>, Mapped, Option<&Value>, &Value) -> Mapped + Send + Sync + 'static,
    {
        self.on_transform = Some(Arc::new(hook));
        self
    }

    /// Field name for diagnostics
    pub fn field_name(&self) -> &str {
        self.field.as_deref().unwrap_or("")
    }

    /// Check the whole tree up front.
    ///
    /// Transforms validate lazily as nodes are reached; this is for tooling
    /// that wants every node checked regardless of the data.
    pub fn validate_tree(&self) -> Result<()> {
        guard::validate(self)?;
        self.validate_includes(1)
    }

    fn validate_includes(&self, depth: usize) -> Result<()> {
        let Some(include) = &self.include else {
            return Ok(());
        };
        for node in include.nodes() {
            if node.field.is_none() {
                return Err(TransformError::MissingField { depth });
            }
            guard::validate(node)?;
            node.validate_includes(depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNode")
            .field("field", &self.field)
            .field("model", &self.model.as_ref().map(Model::name))
            .field("include", &self.include)
            .field("single_param", &self.single_param)
            .field("multi_param", &self.multi_param)
            .field("on_transform", &self.on_transform.is_some())
            .finish()
    }
}
