//! Workspace receiver model.
//!
//! A [`Workspace`] is the runtime object top-level configuration documents
//! are evaluated against. It carries the two capabilities the standard
//! activation routine needs: idempotent plugin application and a named
//! container of extension model objects. Plugins register their model into
//! the container when applied; the first configuration access triggers the
//! application, and the returned model is then mutated by the evaluator
//! according to the nested block.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashSet;

use cadre_schema::{ModelObject, TypeHandle};

use crate::descriptor::{Activation, ActivationError, ExtensionDescriptor};

/// Workspace-side plugin failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PluginError {
	#[error("extension `{0}` is already registered on this workspace")]
	ExtensionNameTaken(String),

	#[error("plugin `{plugin_id}` failed: {message}")]
	Failed { plugin_id: String, message: String },
}

/// A plugin applied to a workspace.
///
/// An extension-backing plugin registers its model object into the
/// workspace's [`Extensions`] container during [`apply`](Self::apply).
pub trait ConfigPlugin: Send + Sync {
	/// Stable id used for idempotent application.
	fn plugin_id(&self) -> &str;

	/// Applies this plugin to `target`. Invoked at most once per workspace.
	fn apply(&self, target: &Workspace) -> Result<(), PluginError>;
}

/// Named model objects registered on a workspace, in registration order.
pub struct Extensions {
	entries: RwLock<IndexMap<String, ModelObject>>,
}

impl Extensions {
	fn new() -> Self {
		Self {
			entries: RwLock::new(IndexMap::new()),
		}
	}

	/// Registers a model object under `name`. Names are unique per
	/// workspace.
	pub fn add(&self, name: impl Into<String>, model: ModelObject) -> Result<(), PluginError> {
		let name = name.into();
		let mut entries = self.entries.write();
		if entries.contains_key(&name) {
			return Err(PluginError::ExtensionNameTaken(name));
		}
		entries.insert(name, model);
		Ok(())
	}

	/// Returns the model registered under `name`, if any.
	pub fn get(&self, name: &str) -> Option<ModelObject> {
		self.entries.read().get(name).cloned()
	}

	/// Returns registered names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.entries.read().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl fmt::Debug for Extensions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.entries.read().keys()).finish()
	}
}

/// Runtime receiver for top-level configuration documents.
pub struct Workspace {
	name: String,
	applied: Mutex<FxHashSet<String>>,
	extensions: Extensions,
}

impl Workspace {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			applied: Mutex::new(FxHashSet::default()),
			extensions: Extensions::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn extensions(&self) -> &Extensions {
		&self.extensions
	}

	/// Applies `plugin` once; later calls with the same plugin id are
	/// no-ops returning `Ok(false)`.
	///
	/// Precondition: a single workspace is configured serially (the
	/// evaluator serializes per-receiver configuration), so this does not
	/// guard against concurrent first application of the same plugin.
	pub fn apply_plugin(&self, plugin: &dyn ConfigPlugin) -> Result<bool, PluginError> {
		if self.applied.lock().contains(plugin.plugin_id()) {
			return Ok(false);
		}
		plugin.apply(self)?;
		self.applied.lock().insert(plugin.plugin_id().to_string());
		tracing::debug!(
			workspace = %self.name,
			plugin = plugin.plugin_id(),
			"applied plugin"
		);
		Ok(true)
	}

	/// Returns true if `plugin_id` has been applied to this workspace.
	pub fn is_applied(&self, plugin_id: &str) -> bool {
		self.applied.lock().contains(plugin_id)
	}
}

impl fmt::Debug for Workspace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Workspace")
			.field("name", &self.name)
			.field("extensions", &self.extensions)
			.finish()
	}
}

/// Builds the standard activation for a plugin-backed extension: downcast
/// the receiver to [`Workspace`], apply the plugin (idempotently), and
/// return the model it registered under `type_name`.
///
/// The plugin application is a named, separately-testable step rather than
/// an anonymous side effect inside the routine.
pub fn plugin_backed_activation(
	type_name: impl Into<String>,
	plugin: Arc<dyn ConfigPlugin>,
) -> Activation {
	let type_name = type_name.into();
	Activation::from_fn(move |receiver| {
		let Some(workspace) = receiver.as_any().downcast_ref::<Workspace>() else {
			return Err(ActivationError::UnexpectedReceiver {
				expected: "Workspace",
				received: format!("{receiver:?}"),
			});
		};
		workspace
			.apply_plugin(plugin.as_ref())
			.map_err(|source| ActivationError::PluginFailed {
				plugin_id: plugin.plugin_id().to_string(),
				source,
			})?;
		workspace
			.extensions()
			.get(&type_name)
			.ok_or_else(|| ActivationError::ModelNotRegistered {
				plugin_id: plugin.plugin_id().to_string(),
				type_name: type_name.clone(),
			})
	})
}

impl ExtensionDescriptor {
	/// Describes a plugin-backed extension of model type `M` with the
	/// standard activation.
	pub fn plugin_backed<M: 'static>(type_name: &str, plugin: Arc<dyn ConfigPlugin>) -> Self {
		let activation = plugin_backed_activation(type_name, plugin);
		Self::new(type_name, TypeHandle::of::<M>(), activation)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use parking_lot::RwLock;

	use super::{ConfigPlugin, PluginError, Workspace, plugin_backed_activation};
	use crate::descriptor::ActivationError;

	#[derive(Debug, Default)]
	struct WebModel {
		domain: RwLock<String>,
	}

	struct WebPlugin {
		applications: AtomicUsize,
	}

	impl WebPlugin {
		fn new() -> Arc<Self> {
			Arc::new(Self {
				applications: AtomicUsize::new(0),
			})
		}
	}

	impl ConfigPlugin for WebPlugin {
		fn plugin_id(&self) -> &str {
			"cadre.web"
		}

		fn apply(&self, target: &Workspace) -> Result<(), PluginError> {
			self.applications.fetch_add(1, Ordering::SeqCst);
			target.extensions().add("web", Arc::new(WebModel::default()))
		}
	}

	struct FailingPlugin;

	impl ConfigPlugin for FailingPlugin {
		fn plugin_id(&self) -> &str {
			"cadre.broken"
		}

		fn apply(&self, _target: &Workspace) -> Result<(), PluginError> {
			Err(PluginError::Failed {
				plugin_id: self.plugin_id().to_string(),
				message: "missing toolchain".to_string(),
			})
		}
	}

	#[test]
	fn apply_plugin_is_idempotent_per_id() {
		let workspace = Workspace::new("demo");
		let plugin = WebPlugin::new();

		assert!(workspace.apply_plugin(plugin.as_ref()).expect("first apply"));
		assert!(!workspace.apply_plugin(plugin.as_ref()).expect("second apply"));
		assert_eq!(plugin.applications.load(Ordering::SeqCst), 1);
		assert!(workspace.is_applied("cadre.web"));
	}

	#[test]
	fn failed_apply_is_not_marked_applied() {
		let workspace = Workspace::new("demo");
		let err = workspace
			.apply_plugin(&FailingPlugin)
			.expect_err("apply must fail");
		assert!(matches!(err, PluginError::Failed { .. }));
		assert!(!workspace.is_applied("cadre.broken"));
	}

	#[test]
	fn extensions_reject_duplicate_names() {
		let workspace = Workspace::new("demo");
		workspace
			.extensions()
			.add("web", Arc::new(WebModel::default()))
			.expect("first add");
		let err = workspace
			.extensions()
			.add("web", Arc::new(WebModel::default()))
			.expect_err("duplicate must fail");
		assert!(matches!(err, PluginError::ExtensionNameTaken(name) if name == "web"));
	}

	#[test]
	fn standard_activation_applies_once_and_returns_the_model() {
		let workspace = Workspace::new("demo");
		let plugin = WebPlugin::new();
		let activation = plugin_backed_activation("web", plugin.clone());

		let first = activation.invoke(&workspace).expect("first activation");
		let second = activation.invoke(&workspace).expect("second activation");

		assert_eq!(plugin.applications.load(Ordering::SeqCst), 1);
		assert!(Arc::ptr_eq(&first, &second));

		let model = first.downcast_ref::<WebModel>().expect("model type");
		*model.domain.write() = "example.org".to_string();
	}

	#[test]
	fn standard_activation_rejects_unexpected_receivers() {
		let activation = plugin_backed_activation("web", WebPlugin::new());
		let err = activation.invoke(&"not a workspace").expect_err("must fail");
		match err {
			ActivationError::UnexpectedReceiver { expected, received } => {
				assert_eq!(expected, "Workspace");
				assert!(received.contains("not a workspace"));
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn missing_model_after_apply_is_reported() {
		struct SilentPlugin;
		impl ConfigPlugin for SilentPlugin {
			fn plugin_id(&self) -> &str {
				"cadre.silent"
			}
			fn apply(&self, _target: &Workspace) -> Result<(), PluginError> {
				Ok(())
			}
		}

		let workspace = Workspace::new("demo");
		let activation = plugin_backed_activation("web", Arc::new(SilentPlugin));
		let err = activation.invoke(&workspace).expect_err("must fail");
		assert!(matches!(err, ActivationError::ModelNotRegistered { .. }));
	}

	#[test]
	fn plugin_failure_surfaces_through_activation() {
		let workspace = Workspace::new("demo");
		let activation = plugin_backed_activation("web", Arc::new(FailingPlugin));
		let err = activation.invoke(&workspace).expect_err("must fail");
		assert!(matches!(err, ActivationError::PluginFailed { .. }));
	}
}
