use std::any::{self, TypeId};
use std::hash::{Hash, Hasher};

/// Opaque handle to a Rust type referenced by schema declarations.
///
/// Equality and hashing use the underlying [`TypeId`] only, so two handles
/// compare equal exactly when they name the same concrete type. This is a
/// strict identity check; the schema has no subtyping.
#[derive(Debug, Clone, Copy)]
pub struct TypeHandle {
	id: TypeId,
	name: &'static str,
}

impl TypeHandle {
	/// Creates a handle for `T`.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: any::type_name::<T>(),
		}
	}

	/// Returns the underlying type id.
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Returns the fully-qualified type name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the type name without its module path.
	///
	/// Generic types keep their full spelling, since stripping path segments
	/// inside angle brackets is not worth the trouble for diagnostics.
	pub fn short_name(&self) -> &'static str {
		if self.name.contains('<') {
			return self.name;
		}
		self.name.rsplit("::").next().unwrap_or(self.name)
	}

	/// Returns true if this handle names `T`.
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}
}

impl PartialEq for TypeHandle {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl std::fmt::Display for TypeHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.short_name())
	}
}
