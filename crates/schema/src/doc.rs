//! Serializable schema descriptions.
//!
//! A [`SchemaDoc`] is a flat, name-based summary of a built [`Schema`] for
//! tooling and diagnostics: what types exist, what functions each type
//! carries, and which accessor ids back them. Type identity does not
//! round-trip; this is a description, not the schema itself.

use serde::{Deserialize, Serialize};

use crate::builder::Schema;
use crate::function::FunctionSemantics;

/// Name-based summary of a built schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDoc {
	pub host: String,
	pub types: Vec<String>,
	pub functions: Vec<FunctionDoc>,
}

/// One function declaration in a [`SchemaDoc`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDoc {
	pub receiver: String,
	pub name: String,
	pub direct_access_only: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub accessor_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub model_type: Option<String>,
}

impl Schema {
	/// Summarizes this schema for tooling and diagnostics.
	pub fn describe(&self) -> SchemaDoc {
		let mut functions = Vec::new();
		for &ty in self.types() {
			for function in self.member_functions(&ty) {
				let FunctionSemantics::AccessAndConfigure { accessor, .. } = &function.semantics;
				functions.push(FunctionDoc {
					receiver: ty.short_name().to_string(),
					name: function.name.clone(),
					direct_access_only: function.direct_access_only,
					accessor_id: Some(accessor.id().to_string()),
					model_type: Some(accessor.model_type().short_name().to_string()),
				});
			}
		}

		SchemaDoc {
			host: self.host().short_name().to_string(),
			types: self.types().iter().map(|t| t.short_name().to_string()).collect(),
			functions,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::SchemaDoc;
	use crate::builder::SchemaBuilder;
	use crate::contributions::{
		FixedTypeDiscovery, FunctionExtractor, SchemaComponent, TypeDiscovery,
	};
	use crate::function::{
		AccessorId, ConfigureAccessor, ConstructorSignature, SchemaFunction,
	};
	use crate::runtime::RuntimeAccessors;
	use crate::types::TypeHandle;

	#[derive(Debug)]
	struct Host;
	#[derive(Debug)]
	struct Model;

	struct OneFunction;

	impl FunctionExtractor for OneFunction {
		fn member_functions(&self, ty: &TypeHandle) -> Vec<SchemaFunction> {
			if !ty.is::<Host>() {
				return Vec::new();
			}
			vec![SchemaFunction::access_and_configure(
				TypeHandle::of::<Host>(),
				"web",
				ConfigureAccessor::Custom {
					model_type: TypeHandle::of::<Model>(),
					id: AccessorId::custom("proj", "web"),
				},
			)]
		}

		fn constructors(&self, _ty: &TypeHandle) -> Vec<ConstructorSignature> {
			Vec::new()
		}

		fn top_level_function(&self, _name: &str) -> Option<SchemaFunction> {
			None
		}
	}

	impl SchemaComponent for OneFunction {
		fn type_discoveries(&self) -> Vec<Arc<dyn TypeDiscovery>> {
			vec![Arc::new(FixedTypeDiscovery::new(
				TypeHandle::of::<Host>(),
				vec![TypeHandle::of::<Model>()],
			))]
		}

		fn function_extractors(&self) -> Vec<Arc<dyn FunctionExtractor>> {
			vec![Arc::new(OneFunction)]
		}

		fn runtime_accessors(&self) -> Vec<Arc<dyn RuntimeAccessors>> {
			Vec::new()
		}
	}

	#[test]
	fn describe_summarizes_functions_and_serializes() {
		let schema = SchemaBuilder::new(TypeHandle::of::<Host>())
			.add_component(Arc::new(OneFunction))
			.build()
			.expect("schema build");

		let doc = schema.describe();
		assert_eq!(doc.host, "Host");
		assert_eq!(doc.types, vec!["Host".to_string(), "Model".to_string()]);
		assert_eq!(doc.functions.len(), 1);
		assert_eq!(doc.functions[0].name, "web");
		assert_eq!(doc.functions[0].accessor_id.as_deref(), Some("proj:web"));
		assert_eq!(doc.functions[0].model_type.as_deref(), Some("Model"));

		let json = serde_json::to_string(&doc).expect("serialize");
		let parsed: SchemaDoc = serde_json::from_str(&json).expect("deserialize");
		assert_eq!(parsed.functions[0].accessor_id.as_deref(), Some("proj:web"));
	}
}
