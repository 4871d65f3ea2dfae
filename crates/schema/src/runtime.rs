//! Runtime side of the custom-accessor contract.
//!
//! During evaluation, a configuration block bound to a synthesized function
//! carries the accessor id generated at schema time. The evaluator hands
//! that id plus the current receiver to a [`RuntimeAccessors`]
//! implementation, which activates the backing extension and returns the
//! object to configure.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::function::AccessorId;

/// Live model object returned by an activation routine.
///
/// Models are shared handles: the evaluator mutates the object behind the
/// `Arc` according to the nested configuration block, so model types use
/// interior mutability.
pub type ModelObject = Arc<dyn Any + Send + Sync>;

/// Runtime object a configuration block is evaluated against.
///
/// Blanket-implemented for every debuggable `'static` type, so activation
/// routines can both downcast to the concrete kind they expect and name the
/// offending value when handed something else.
pub trait Receiver: Any + fmt::Debug + Send + Sync {
	fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> Receiver for T {
	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Resolves custom accessors to live objects during evaluation.
pub trait RuntimeAccessors: Send + Sync {
	/// Activates the extension bound to `id` against `receiver` and returns
	/// its model object.
	///
	/// An id absent from the table signals that the schema and the runtime
	/// were built from different registry snapshots; this is a fatal lookup
	/// failure, never silently ignored.
	fn object_from_custom_accessor(
		&self,
		receiver: &dyn Receiver,
		id: &AccessorId,
	) -> Result<ModelObject, ResolveError>;
}

/// Failure to resolve a custom accessor.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
	#[error("no runtime accessor registered for `{id}`")]
	UnknownAccessor { id: AccessorId },

	#[error("activation failed for `{id}`: {source}")]
	Activation {
		id: AccessorId,
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},
}
