//! Runtime accessor resolution.
//!
//! The accessor table is the execution-time inverse of the schema-time
//! function set: every id reachable through the schema resolves here, and
//! the table holds no orphaned entries. It is built once per component and
//! read-only afterwards, so lookups need no locking.

use rustc_hash::FxHashMap;

use cadre_schema::{AccessorId, ModelObject, Receiver, ResolveError, RuntimeAccessors};

use crate::descriptor::Activation;
use crate::synthesize::ExtensionInfo;

/// Fatal accessor-table construction errors.
#[derive(Debug, thiserror::Error)]
pub enum AccessorTableError {
	/// Two synthesized functions map to the same accessor id. Rejected
	/// outright; a later entry never shadows an earlier one.
	#[error("duplicate custom accessor id `{id}`")]
	DuplicateAccessorId { id: AccessorId },
}

/// Maps accessor ids back to activation routines during evaluation.
///
/// The resolver does not cache activation results; idempotence across
/// repeated resolution of the same (receiver, id) pair is the activation
/// routine's contract.
#[derive(Debug)]
pub struct AccessorResolver {
	table: FxHashMap<AccessorId, Activation>,
}

impl AccessorResolver {
	/// Builds the table from a synthesized set, failing fast on colliding
	/// ids.
	pub fn from_infos(infos: &[ExtensionInfo]) -> Result<Self, AccessorTableError> {
		let mut table: FxHashMap<AccessorId, Activation> =
			FxHashMap::with_capacity_and_hasher(infos.len(), Default::default());
		for info in infos {
			if table
				.insert(info.accessor_id().clone(), info.activation().clone())
				.is_some()
			{
				return Err(AccessorTableError::DuplicateAccessorId {
					id: info.accessor_id().clone(),
				});
			}
		}
		Ok(Self { table })
	}

	/// Returns true if `id` has a table entry.
	pub fn contains(&self, id: &AccessorId) -> bool {
		self.table.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
}

impl RuntimeAccessors for AccessorResolver {
	fn object_from_custom_accessor(
		&self,
		receiver: &dyn Receiver,
		id: &AccessorId,
	) -> Result<ModelObject, ResolveError> {
		let Some(activation) = self.table.get(id) else {
			return Err(ResolveError::UnknownAccessor { id: id.clone() });
		};
		tracing::debug!(%id, "resolving custom accessor");
		activation.invoke(receiver).map_err(|source| ResolveError::Activation {
			id: id.clone(),
			source: Box::new(source),
		})
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use cadre_schema::{AccessorId, ResolveError, RuntimeAccessors, TypeHandle};

	use super::{AccessorResolver, AccessorTableError};
	use crate::descriptor::{Activation, ExtensionDescriptor};
	use crate::synthesize::synthesize;

	#[derive(Debug)]
	struct Host;
	#[derive(Debug)]
	struct WebModel;

	#[test]
	fn resolves_known_id_by_invoking_activation() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counted = calls.clone();
		let descriptors = vec![ExtensionDescriptor::new(
			"web",
			TypeHandle::of::<WebModel>(),
			Activation::from_fn(move |_| {
				counted.fetch_add(1, Ordering::SeqCst);
				Ok(Arc::new(WebModel))
			}),
		)];
		let infos = synthesize(&descriptors, &TypeHandle::of::<Host>(), "proj");
		let resolver = AccessorResolver::from_infos(&infos).expect("table build");

		let id = AccessorId::custom("proj", "web");
		let model = resolver
			.object_from_custom_accessor(&"receiver", &id)
			.expect("resolution");

		assert!(model.downcast_ref::<WebModel>().is_some());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn unknown_id_is_a_lookup_failure() {
		let resolver = AccessorResolver::from_infos(&[]).expect("table build");
		let err = resolver
			.object_from_custom_accessor(&"receiver", &AccessorId::custom("proj", "missing"))
			.expect_err("unknown id must fail");
		assert!(matches!(
			err,
			ResolveError::UnknownAccessor { id } if id.as_str() == "proj:missing"
		));
	}

	#[test]
	fn duplicate_ids_are_rejected_at_construction() {
		let descriptor = ExtensionDescriptor::new(
			"web",
			TypeHandle::of::<WebModel>(),
			Activation::from_fn(|_| Ok(Arc::new(WebModel))),
		);
		// Two identically-named descriptors cannot pass the registry; build
		// the collision directly to pin the table's own guard.
		let descriptors = vec![descriptor.clone(), descriptor];
		let infos = synthesize(&descriptors, &TypeHandle::of::<Host>(), "proj");

		let err = AccessorResolver::from_infos(&infos).expect_err("collision must fail");
		let AccessorTableError::DuplicateAccessorId { id } = err;
		assert_eq!(id.as_str(), "proj:web");
	}

	#[test]
	fn contains_reflects_table_membership() {
		let descriptors = vec![ExtensionDescriptor::new(
			"web",
			TypeHandle::of::<WebModel>(),
			Activation::from_fn(|_| Ok(Arc::new(WebModel))),
		)];
		let infos = synthesize(&descriptors, &TypeHandle::of::<Host>(), "proj");
		let resolver = AccessorResolver::from_infos(&infos).expect("table build");

		assert_eq!(resolver.len(), 1);
		assert!(resolver.contains(&AccessorId::custom("proj", "web")));
		assert!(!resolver.contains(&AccessorId::custom("proj", "native")));
	}
}
