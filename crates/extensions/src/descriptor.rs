//! Extension descriptors and activation routines.

use std::fmt;
use std::sync::Arc;

use cadre_schema::{ModelObject, Receiver, TypeHandle};

use crate::workspace::PluginError;

/// Signature of an activation routine.
pub type ActivateFn = dyn Fn(&dyn Receiver) -> Result<ModelObject, ActivationError> + Send + Sync;

/// Fatal activation failures.
///
/// None of these are retried or recovered locally: they indicate a
/// schema/runtime wiring bug, not a transient condition.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
	/// The receiver is not of the concrete kind the routine expects.
	#[error("unexpected receiver, expected a {expected} instance, got {received}")]
	UnexpectedReceiver {
		expected: &'static str,
		received: String,
	},

	#[error("plugin `{plugin_id}` failed during activation")]
	PluginFailed {
		plugin_id: String,
		#[source]
		source: PluginError,
	},

	/// The plugin applied cleanly but never registered the model object the
	/// descriptor promised.
	#[error("plugin `{plugin_id}` did not register a model named `{type_name}`")]
	ModelNotRegistered {
		plugin_id: String,
		type_name: String,
	},
}

/// Cloneable handle to an activation routine.
///
/// Contract for implementors: validate the receiver kind and fail with
/// [`ActivationError::UnexpectedReceiver`] otherwise; trigger activation of
/// the underlying extension exactly once per receiver, tolerating repeat
/// calls as a no-op re-activation; return the live model object matching
/// the descriptor's declared model type.
#[derive(Clone)]
pub struct Activation(Arc<ActivateFn>);

impl Activation {
	/// Wraps a closure as an activation routine.
	pub fn from_fn(
		f: impl Fn(&dyn Receiver) -> Result<ModelObject, ActivationError> + Send + Sync + 'static,
	) -> Self {
		Self(Arc::new(f))
	}

	/// Runs the routine against `receiver`.
	pub fn invoke(&self, receiver: &dyn Receiver) -> Result<ModelObject, ActivationError> {
		(self.0)(receiver)
	}
}

impl fmt::Debug for Activation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Activation(..)")
	}
}

/// Externally supplied description of one pluggable extension: a type name
/// exposed as a configuration surface, the public type of its model object,
/// and the routine that activates it.
///
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ExtensionDescriptor {
	type_name: String,
	model_type: TypeHandle,
	activation: Activation,
}

impl ExtensionDescriptor {
	pub fn new(
		type_name: impl Into<String>,
		model_type: TypeHandle,
		activation: Activation,
	) -> Self {
		Self {
			type_name: type_name.into(),
			model_type,
			activation,
		}
	}

	/// Name under which the extension appears in configuration documents.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Public type of the model object activation returns.
	pub fn model_type(&self) -> &TypeHandle {
		&self.model_type
	}

	pub fn activation(&self) -> &Activation {
		&self.activation
	}
}
