//! Contribution seams consumed by the schema builder.
//!
//! A [`SchemaComponent`] bundles everything one subsystem adds to an
//! evaluation schema: extra discoverable types, member function extraction,
//! and runtime custom-accessor resolution. The builder walks each surface
//! without knowing what produced it.

use std::sync::Arc;

use crate::function::{ConstructorSignature, SchemaFunction};
use crate::runtime::RuntimeAccessors;
use crate::types::TypeHandle;

/// Contributes types the schema should describe even though they are not
/// statically referenced by the host type's declaration.
pub trait TypeDiscovery: Send + Sync {
	/// Returns additional types reachable from `host`.
	fn types_for(&self, host: &TypeHandle) -> Vec<TypeHandle>;
}

/// Type discovery over a fixed, precomputed set attached to one host type.
#[derive(Debug, Clone)]
pub struct FixedTypeDiscovery {
	host: TypeHandle,
	types: Vec<TypeHandle>,
}

impl FixedTypeDiscovery {
	pub fn new(host: TypeHandle, types: Vec<TypeHandle>) -> Self {
		Self { host, types }
	}
}

impl TypeDiscovery for FixedTypeDiscovery {
	fn types_for(&self, host: &TypeHandle) -> Vec<TypeHandle> {
		if *host == self.host {
			self.types.clone()
		} else {
			Vec::new()
		}
	}
}

/// Extracts function declarations for schema types.
///
/// All three operations are total: an extractor that has nothing to say for
/// a type returns empty rather than failing.
pub trait FunctionExtractor: Send + Sync {
	/// Member functions declared on `ty`.
	fn member_functions(&self, ty: &TypeHandle) -> Vec<SchemaFunction>;

	/// Constructors declared for `ty`.
	fn constructors(&self, ty: &TypeHandle) -> Vec<ConstructorSignature>;

	/// A free function available at the top level of a document.
	fn top_level_function(&self, name: &str) -> Option<SchemaFunction>;
}

/// One self-contained contribution to an evaluation schema.
///
/// Contributions are handed out as shared trait objects so a component can
/// keep ownership of the underlying snapshot while the builder and the
/// evaluator hold onto the surfaces they need.
pub trait SchemaComponent: Send + Sync {
	fn type_discoveries(&self) -> Vec<Arc<dyn TypeDiscovery>>;
	fn function_extractors(&self) -> Vec<Arc<dyn FunctionExtractor>>;
	fn runtime_accessors(&self) -> Vec<Arc<dyn RuntimeAccessors>>;
}
