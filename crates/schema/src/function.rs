//! Schema-level function declarations.
//!
//! A [`SchemaFunction`] describes one operation a configuration document may
//! invoke on a receiver type. Functions synthesized for extensions use
//! access-and-configure semantics: calling `name { ... }` obtains an object
//! through a [`ConfigureAccessor`] and applies the nested block to it.

use crate::types::TypeHandle;

/// Stable string key linking a schema-time function declaration to a runtime
/// resolution entry.
///
/// Custom accessor ids are spelled `prefix:type_name`, where the prefix
/// identifies the contributing component instance. Ids must be unique across
/// a whole schema; the component enforces this at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccessorId(Box<str>);

impl AccessorId {
	/// Builds the id for a custom accessor owned by `prefix`.
	pub fn custom(prefix: &str, type_name: &str) -> Self {
		Self(format!("{prefix}:{type_name}").into_boxed_str())
	}

	/// Returns the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for AccessorId {
	fn from(raw: &str) -> Self {
		Self(Box::from(raw))
	}
}

impl std::fmt::Display for AccessorId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Declared parameter of a schema function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
	pub name: String,
	pub param_type: TypeHandle,
}

/// How the runtime obtains the object configured by an
/// access-and-configure function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureAccessor {
	/// Resolved during evaluation through a runtime accessor table keyed by
	/// a generated id.
	Custom {
		model_type: TypeHandle,
		id: AccessorId,
	},
}

impl ConfigureAccessor {
	/// Returns the accessor id used for runtime resolution.
	pub fn id(&self) -> &AccessorId {
		match self {
			Self::Custom { id, .. } => id,
		}
	}

	/// Returns the declared type of the object the accessor yields.
	pub fn model_type(&self) -> &TypeHandle {
		match self {
			Self::Custom { model_type, .. } => model_type,
		}
	}
}

/// Return value convention of an access-and-configure function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureReturn {
	Unit,
	ConfiguredObject,
}

/// Semantics of a schema member function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSemantics {
	/// `name { ... }` accesses an object and applies the nested
	/// configuration block to it.
	AccessAndConfigure {
		accessor: ConfigureAccessor,
		returns: ConfigureReturn,
	},
}

/// A member function declaration in the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFunction {
	/// Type the function is declared on.
	pub receiver: TypeHandle,
	/// Function name as written in configuration documents.
	pub name: String,
	/// Declared parameters; empty for synthesized configure functions.
	pub parameters: Vec<ParameterSpec>,
	/// When true, the function is only callable directly on the receiver,
	/// never through intermediate references.
	pub direct_access_only: bool,
	pub semantics: FunctionSemantics,
}

impl SchemaFunction {
	/// Declares a parameterless, direct-access-only configure function that
	/// returns unit.
	pub fn access_and_configure(
		receiver: TypeHandle,
		name: impl Into<String>,
		accessor: ConfigureAccessor,
	) -> Self {
		Self {
			receiver,
			name: name.into(),
			parameters: Vec::new(),
			direct_access_only: true,
			semantics: FunctionSemantics::AccessAndConfigure {
				accessor,
				returns: ConfigureReturn::Unit,
			},
		}
	}

	/// Returns the custom accessor backing this function, if any.
	pub fn custom_accessor(&self) -> Option<&ConfigureAccessor> {
		match &self.semantics {
			FunctionSemantics::AccessAndConfigure { accessor, .. } => Some(accessor),
		}
	}
}

/// A constructor declaration in the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorSignature {
	pub for_type: TypeHandle,
	pub parameters: Vec<ParameterSpec>,
}

#[cfg(test)]
mod tests {
	use super::{AccessorId, ConfigureAccessor, ConfigureReturn, FunctionSemantics, SchemaFunction};
	use crate::types::TypeHandle;

	struct Host;
	struct Model;

	#[test]
	fn custom_id_joins_prefix_and_name() {
		let id = AccessorId::custom("proj", "web");
		assert_eq!(id.as_str(), "proj:web");
		assert_eq!(id.to_string(), "proj:web");
	}

	#[test]
	fn access_and_configure_declares_unit_direct_function() {
		let accessor = ConfigureAccessor::Custom {
			model_type: TypeHandle::of::<Model>(),
			id: AccessorId::custom("proj", "web"),
		};
		let function =
			SchemaFunction::access_and_configure(TypeHandle::of::<Host>(), "web", accessor);

		assert_eq!(function.name, "web");
		assert!(function.parameters.is_empty());
		assert!(function.direct_access_only);
		let FunctionSemantics::AccessAndConfigure { accessor, returns } = &function.semantics;
		assert_eq!(*returns, ConfigureReturn::Unit);
		assert_eq!(accessor.id().as_str(), "proj:web");
		assert!(accessor.model_type().is::<Model>());
	}
}
