//! Accessor synthesis.
//!
//! For each descriptor, derives the accessor id and the schema-level
//! configure-function declaration that expose the extension on the host
//! type. The id is the stable link between the two worlds: the schema
//! carries it inside the function's custom accessor, and the runtime table
//! maps it back to the activation routine.

use cadre_schema::{AccessorId, ConfigureAccessor, SchemaFunction, TypeHandle};

use crate::descriptor::{Activation, ExtensionDescriptor};

/// One descriptor plus the two artifacts derived from it.
#[derive(Debug, Clone)]
pub struct ExtensionInfo {
	descriptor: ExtensionDescriptor,
	accessor_id: AccessorId,
	function: SchemaFunction,
}

impl ExtensionInfo {
	pub fn type_name(&self) -> &str {
		self.descriptor.type_name()
	}

	pub fn model_type(&self) -> &TypeHandle {
		self.descriptor.model_type()
	}

	pub fn activation(&self) -> &Activation {
		self.descriptor.activation()
	}

	/// Id linking the synthesized function to its runtime table entry.
	pub fn accessor_id(&self) -> &AccessorId {
		&self.accessor_id
	}

	/// Schema declaration of the configure function.
	pub fn function(&self) -> &SchemaFunction {
		&self.function
	}
}

/// Derives one [`ExtensionInfo`] per descriptor.
///
/// Pure transformation; output order equals input order, since downstream
/// consumers rely on declaration order for diagnostics.
///
/// Precondition: type names are unique within `descriptors`. The registry
/// enforces this at registration time; it is not re-validated here.
pub fn synthesize(
	descriptors: &[ExtensionDescriptor],
	host: &TypeHandle,
	prefix: &str,
) -> Vec<ExtensionInfo> {
	descriptors
		.iter()
		.map(|descriptor| {
			let accessor_id = AccessorId::custom(prefix, descriptor.type_name());
			let function = SchemaFunction::access_and_configure(
				*host,
				descriptor.type_name(),
				ConfigureAccessor::Custom {
					model_type: *descriptor.model_type(),
					id: accessor_id.clone(),
				},
			);
			tracing::trace!(
				%accessor_id,
				type_name = descriptor.type_name(),
				"synthesized configure function"
			);
			ExtensionInfo {
				descriptor: descriptor.clone(),
				accessor_id,
				function,
			}
		})
		.collect()
}
