//! Schema data model and contribution seams for the cadre configuration
//! language.
//!
//! A schema is the statically-analyzable description of what operations a
//! declarative configuration document permits against a host type.
//! Subsystems contribute to it through three surfaces, bundled per
//! contributor as a [`SchemaComponent`]:
//!
//! - [`TypeDiscovery`] - extra types the schema should describe
//! - [`FunctionExtractor`] - member functions, constructors, top-level
//!   functions
//! - [`RuntimeAccessors`] - resolution of custom accessors to live objects
//!   during evaluation
//!
//! [`SchemaBuilder`] folds registered components into an immutable
//! [`Schema`] snapshot, which [`Schema::describe`] can summarize for
//! tooling.

pub mod builder;
pub mod contributions;
pub mod doc;
pub mod function;
pub mod runtime;
pub mod types;

pub use builder::{Schema, SchemaBuilder, SchemaError};
pub use contributions::{FixedTypeDiscovery, FunctionExtractor, SchemaComponent, TypeDiscovery};
pub use doc::{FunctionDoc, SchemaDoc};
pub use function::{
	AccessorId, ConfigureAccessor, ConfigureReturn, ConstructorSignature, FunctionSemantics,
	ParameterSpec, SchemaFunction,
};
pub use runtime::{ModelObject, Receiver, ResolveError, RuntimeAccessors};
pub use types::TypeHandle;
