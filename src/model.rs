//! Model factories and the instances they construct
//!
//! A [`Model`] is the constructor capability a schema node refers to. It either
//! builds from a single argument (the default) or from a positional argument
//! list. What it builds is any [`Entity`]; callers get it back by downcasting
//! the [`Instance`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::value::{Fields, Mapped};

/// Type-erased access to a concrete entity
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A typed domain object produced by a model
pub trait Entity: AsAny + fmt::Debug + Send + Sync {
    /// Named field, for entities that expose a field view
    fn field(&self, _name: &str) -> Option<&Mapped> {
        None
    }

    /// Plain-data view used when the instance is serialized
    fn to_mapped(&self) -> Mapped {
        Mapped::Null
    }
}

type ObjectFactory = dyn Fn(Mapped) -> Arc<dyn Entity> + Send + Sync;
type PositionalFactory = dyn Fn(Vec<Mapped>) -> Arc<dyn Entity> + Send + Sync;

/// How a model accepts its constructor arguments
#[derive(Clone)]
pub enum Capability {
    /// Constructs from one argument
    Object(Arc<ObjectFactory>),
    /// Constructs from a positional argument list
    Positional(Arc<PositionalFactory>),
}

struct ModelInner {
    name: String,
    capability: Capability,
}

/// A named constructor for typed instances
///
/// Clones share identity: an instance built by one clone is an instance of
/// every other clone of the same model.
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    /// Create a model that constructs from a single argument
    pub fn new<E, F>(name: impl Into<String>, factory: F) -> Self
    where
        E: Entity + 'static,
        F: Fn(Mapped) -> E + Send + Sync + 'static,
    {
        let factory: Arc<ObjectFactory> =
            Arc::new(move |arg| -> Arc<dyn Entity> { Arc::new(factory(arg)) });
        Self::with_capability(name, Capability::Object(factory))
    }

    /// Create a model that constructs from positional arguments
    pub fn positional<E, F>(name: impl Into<String>, factory: F) -> Self
    where
        E: Entity + 'static,
        F: Fn(Vec<Mapped>) -> E + Send + Sync + 'static,
    {
        let factory: Arc<PositionalFactory> =
            Arc::new(move |args| -> Arc<dyn Entity> { Arc::new(factory(args)) });
        Self::with_capability(name, Capability::Positional(factory))
    }

    /// Generic model whose instances are [`Record`]s
    pub fn record(name: impl Into<String>) -> Self {
        Self::positional(name, Record::from_args)
    }

    pub fn with_capability(name: impl Into<String>, capability: Capability) -> Self {
        Self {
            inner: Arc::new(ModelInner {
                name: name.into(),
                capability,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn capability(&self) -> &Capability {
        &self.inner.capability
    }

    /// Construct an instance from constructor arguments.
    ///
    /// A single-argument model only sees the first argument.
    pub fn construct(&self, args: Vec<Mapped>) -> Instance {
        let entity = match &self.inner.capability {
            Capability::Object(factory) => factory(args.into_iter().next().unwrap_or_default()),
            Capability::Positional(factory) => factory(args),
        };
        Instance {
            model: self.clone(),
            entity,
        }
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capability = match self.inner.capability {
            Capability::Object(_) => "object",
            Capability::Positional(_) => "positional",
        };
        f.debug_struct("Model")
            .field("name", &self.inner.name)
            .field("capability", &capability)
            .finish()
    }
}

/// A value constructed by a [`Model`]
#[derive(Clone)]
pub struct Instance {
    model: Model,
    entity: Arc<dyn Entity>,
}

impl Instance {
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn is_instance_of(&self, model: &Model) -> bool {
        self.model == *model
    }

    pub fn entity(&self) -> &dyn Entity {
        self.entity.as_ref()
    }

    /// Borrow the concrete entity
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.entity.as_ref().as_any().downcast_ref::<T>()
    }

    pub fn field(&self, name: &str) -> Option<&Mapped> {
        self.entity.field(name)
    }

    pub fn to_mapped(&self) -> Mapped {
        self.entity.to_mapped()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && Arc::ptr_eq(&self.entity, &other.entity)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(self.model.name()).field(&self.entity).finish()
    }
}

/// Entity of [`Model::record`]: a bag of copied fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: Fields,
}

impl Record {
    /// One object argument is copied field by field; anything else is kept
    /// positionally under `"0"`, `"1"`, ...
    pub fn from_args(mut args: Vec<Mapped>) -> Self {
        if let [Mapped::Object(fields)] = args.as_mut_slice() {
            return Self {
                fields: std::mem::take(fields),
            };
        }
        let fields = args
            .into_iter()
            .enumerate()
            .map(|(i, arg)| (i.to_string(), arg))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Mapped> {
        self.fields.get(name)
    }
}

impl Entity for Record {
    fn field(&self, name: &str) -> Option<&Mapped> {
        self.fields.get(name)
    }

    fn to_mapped(&self) -> Mapped {
        Mapped::Object(self.fields.clone())
    }
}
