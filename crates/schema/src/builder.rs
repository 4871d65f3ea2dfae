//! Schema aggregation.
//!
//! [`SchemaBuilder`] folds the contributions of every registered
//! [`SchemaComponent`] into one immutable [`Schema`] snapshot. Construction
//! runs once, single-threaded, before any evaluation begins; the snapshot is
//! freely shareable afterwards.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::sync::Arc;

use crate::contributions::SchemaComponent;
use crate::function::{ConstructorSignature, SchemaFunction};
use crate::types::TypeHandle;

/// Fatal schema aggregation errors.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	/// Two components declared a member function with the same name on the
	/// same receiver type.
	#[error("duplicate member function `{name}` on `{receiver}`")]
	DuplicateMemberFunction { receiver: TypeHandle, name: String },
}

/// Builds a [`Schema`] for one host type from registered components.
pub struct SchemaBuilder {
	host: TypeHandle,
	components: Vec<Arc<dyn SchemaComponent>>,
}

impl SchemaBuilder {
	/// Creates a builder for schemas rooted at `host`.
	pub fn new(host: TypeHandle) -> Self {
		Self {
			host,
			components: Vec::new(),
		}
	}

	/// Adds a component's contributions to the schema under construction.
	pub fn add_component(mut self, component: Arc<dyn SchemaComponent>) -> Self {
		self.components.push(component);
		self
	}

	/// Aggregates all contributions into an immutable snapshot.
	///
	/// Types are collected with a work-list walk starting at the host, so
	/// discoveries attached to discovered types are honored too. Declaration
	/// order is preserved throughout; duplicate member function names on one
	/// receiver fail fast.
	pub fn build(self) -> Result<Schema, SchemaError> {
		let mut types: Vec<TypeHandle> = vec![self.host];
		let mut seen: FxHashSet<TypeHandle> = types.iter().copied().collect();

		let mut cursor = 0;
		while cursor < types.len() {
			let current = types[cursor];
			cursor += 1;
			for component in &self.components {
				for discovery in component.type_discoveries() {
					for ty in discovery.types_for(&current) {
						if seen.insert(ty) {
							types.push(ty);
						}
					}
				}
			}
		}

		let mut member_functions: IndexMap<TypeHandle, Vec<SchemaFunction>> = IndexMap::new();
		let mut constructors: IndexMap<TypeHandle, Vec<ConstructorSignature>> = IndexMap::new();

		for &ty in &types {
			let mut functions: Vec<SchemaFunction> = Vec::new();
			let mut names: FxHashSet<String> = FxHashSet::default();
			let mut ctors: Vec<ConstructorSignature> = Vec::new();

			for component in &self.components {
				for extractor in component.function_extractors() {
					for function in extractor.member_functions(&ty) {
						if !names.insert(function.name.clone()) {
							return Err(SchemaError::DuplicateMemberFunction {
								receiver: ty,
								name: function.name,
							});
						}
						functions.push(function);
					}
					ctors.extend(extractor.constructors(&ty));
				}
			}

			if !functions.is_empty() {
				member_functions.insert(ty, functions);
			}
			if !ctors.is_empty() {
				constructors.insert(ty, ctors);
			}
		}

		tracing::debug!(
			host = %self.host,
			types = types.len(),
			functions = member_functions.values().map(Vec::len).sum::<usize>(),
			"built evaluation schema"
		);

		Ok(Schema {
			host: self.host,
			types,
			member_functions,
			constructors,
		})
	}
}

/// Immutable, statically-analyzable description of what a configuration
/// document may do against one host type.
#[derive(Debug)]
pub struct Schema {
	host: TypeHandle,
	types: Vec<TypeHandle>,
	member_functions: IndexMap<TypeHandle, Vec<SchemaFunction>>,
	constructors: IndexMap<TypeHandle, Vec<ConstructorSignature>>,
}

impl Schema {
	/// Returns the host type the schema is rooted at.
	pub fn host(&self) -> &TypeHandle {
		&self.host
	}

	/// Returns every type the schema describes, host first, in discovery
	/// order.
	pub fn types(&self) -> &[TypeHandle] {
		&self.types
	}

	/// Returns the member functions declared on `ty`, in declaration order.
	pub fn member_functions(&self, ty: &TypeHandle) -> &[SchemaFunction] {
		self.member_functions.get(ty).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Returns the constructors declared for `ty`.
	pub fn constructors(&self, ty: &TypeHandle) -> &[ConstructorSignature] {
		self.constructors.get(ty).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Looks up a member function on `ty` by name.
	pub fn find_member_function(&self, ty: &TypeHandle, name: &str) -> Option<&SchemaFunction> {
		self.member_functions(ty).iter().find(|f| f.name == name)
	}
}
