//! Schema contribution for registered extensions.
//!
//! [`ExtensionSchemaComponent`] bridges the registry snapshot and the schema
//! builder: it synthesizes one configure function per extension and exposes
//! the three contribution surfaces the builder consumes. All artifacts are
//! derived once at construction; the contribution operations are total
//! functions over that snapshot and cannot fail.

use std::sync::Arc;

use cadre_schema::{
	ConstructorSignature, FixedTypeDiscovery, FunctionExtractor, RuntimeAccessors,
	SchemaComponent, SchemaFunction, TypeDiscovery, TypeHandle,
};

use crate::registry::ExtensionRegistry;
use crate::resolver::{AccessorResolver, AccessorTableError};
use crate::synthesize::{ExtensionInfo, synthesize};

/// Fatal component construction errors.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
	#[error(transparent)]
	Table(#[from] AccessorTableError),
}

/// Weaves every extension registered at construction time into the
/// evaluation schema of one host type.
///
/// Instances built with distinct accessor-id prefixes never collide, even
/// when their registries share type names.
pub struct ExtensionSchemaComponent {
	host: TypeHandle,
	infos: Vec<ExtensionInfo>,
	discovery: Arc<FixedTypeDiscovery>,
	extractor: Arc<ExtensionConfiguringFunctions>,
	resolver: Arc<AccessorResolver>,
}

impl ExtensionSchemaComponent {
	/// Snapshots `registry` and derives all schema artifacts for `host`.
	pub fn new(
		host: TypeHandle,
		accessor_id_prefix: &str,
		registry: &ExtensionRegistry,
	) -> Result<Self, ComponentError> {
		let infos = synthesize(registry.descriptors(), &host, accessor_id_prefix);
		let resolver = Arc::new(AccessorResolver::from_infos(&infos)?);
		let discovery = Arc::new(FixedTypeDiscovery::new(
			host,
			infos.iter().map(|info| *info.model_type()).collect(),
		));
		let extractor = Arc::new(ExtensionConfiguringFunctions {
			host,
			functions: infos.iter().map(|info| info.function().clone()).collect(),
		});

		tracing::debug!(
			host = %host,
			prefix = accessor_id_prefix,
			extensions = infos.len(),
			"built extension schema component"
		);

		Ok(Self {
			host,
			infos,
			discovery,
			extractor,
			resolver,
		})
	}

	/// Host type the synthesized functions are declared on.
	pub fn host(&self) -> &TypeHandle {
		&self.host
	}

	/// Synthesized set, in registration order.
	pub fn infos(&self) -> &[ExtensionInfo] {
		&self.infos
	}

	/// Evaluator-facing handle to the runtime accessor table.
	pub fn resolver(&self) -> Arc<AccessorResolver> {
		self.resolver.clone()
	}
}

impl SchemaComponent for ExtensionSchemaComponent {
	fn type_discoveries(&self) -> Vec<Arc<dyn TypeDiscovery>> {
		let discovery: Arc<dyn TypeDiscovery> = self.discovery.clone();
		vec![discovery]
	}

	fn function_extractors(&self) -> Vec<Arc<dyn FunctionExtractor>> {
		let extractor: Arc<dyn FunctionExtractor> = self.extractor.clone();
		vec![extractor]
	}

	fn runtime_accessors(&self) -> Vec<Arc<dyn RuntimeAccessors>> {
		let resolver: Arc<dyn RuntimeAccessors> = self.resolver.clone();
		vec![resolver]
	}
}

/// Function extraction over the synthesized set.
///
/// Extensions attach to exactly one configuration surface, so the host-type
/// comparison is strict identity, never an is-subtype-of check.
struct ExtensionConfiguringFunctions {
	host: TypeHandle,
	functions: Vec<SchemaFunction>,
}

impl FunctionExtractor for ExtensionConfiguringFunctions {
	fn member_functions(&self, ty: &TypeHandle) -> Vec<SchemaFunction> {
		if *ty == self.host {
			self.functions.clone()
		} else {
			Vec::new()
		}
	}

	fn constructors(&self, _ty: &TypeHandle) -> Vec<ConstructorSignature> {
		// Extensions never synthesize constructors.
		Vec::new()
	}

	fn top_level_function(&self, _name: &str) -> Option<SchemaFunction> {
		// Extensions are never exposed as free functions.
		None
	}
}
