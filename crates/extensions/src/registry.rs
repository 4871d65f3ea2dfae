//! Extension registration.
//!
//! The registry is the single source of truth for which extensions exist in
//! a build. Downstream consumers (accessor synthesis, the schema component)
//! take an ordered snapshot and rely on type names being unique, so
//! uniqueness and identifier validity are enforced here, at registration
//! time, rather than re-validated downstream.

use rustc_hash::FxHashMap;

use crate::descriptor::ExtensionDescriptor;

/// Fatal registration errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("extension type name `{0}` is already registered")]
	DuplicateTypeName(String),

	/// Type names become function names in configuration documents, so they
	/// must be valid DSL identifiers.
	#[error("extension type name `{0}` is not a valid identifier")]
	InvalidTypeName(String),
}

/// Ordered collection of extension descriptors with unique type names.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
	entries: Vec<ExtensionDescriptor>,
	by_name: FxHashMap<String, usize>,
}

impl ExtensionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a descriptor, rejecting invalid and duplicate type names.
	pub fn register(&mut self, descriptor: ExtensionDescriptor) -> Result<(), RegistryError> {
		let name = descriptor.type_name();
		if !is_valid_type_name(name) {
			return Err(RegistryError::InvalidTypeName(name.to_string()));
		}
		if self.by_name.contains_key(name) {
			return Err(RegistryError::DuplicateTypeName(name.to_string()));
		}

		tracing::debug!(
			type_name = name,
			model_type = %descriptor.model_type(),
			"registered extension"
		);
		self.by_name.insert(name.to_string(), self.entries.len());
		self.entries.push(descriptor);
		Ok(())
	}

	/// Returns all descriptors in registration order.
	pub fn descriptors(&self) -> &[ExtensionDescriptor] {
		&self.entries
	}

	/// Looks up a descriptor by type name.
	pub fn get(&self, type_name: &str) -> Option<&ExtensionDescriptor> {
		self.by_name.get(type_name).map(|&index| &self.entries[index])
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// A type name is a DSL identifier: an ASCII letter or underscore followed
/// by ASCII alphanumerics or underscores.
fn is_valid_type_name(name: &str) -> bool {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	if !first.is_ascii_alphabetic() && first != '_' {
		return false;
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
