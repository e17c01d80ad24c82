use std::path::PathBuf;

use pipewright_registry::{ComponentId, RegistryError, Role};

use crate::container::ResolveError;

/// Invalid configuration or parameter input.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid logging configuration: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("invalid component entry: {reason}")]
	InvalidEntry { reason: String },

	#[error("unknown parameter %{name}% in {template:?}")]
	UnknownParameter { name: String, template: String },

	#[error("unterminated placeholder in {template:?}")]
	UnterminatedPlaceholder { template: String },

	#[error("circular parameter reference through %{name}%")]
	CircularParameter { name: String },
}

/// Fatal failure of a composition run. Nothing is partially wired when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error("logger {id} is not a registered component")]
	UnknownLogger { id: ComponentId },

	#[error("{role} {id} does not resolve to a component")]
	UnresolvedComponent {
		id: ComponentId,
		role: Role,
		#[source]
		source: ResolveError,
	},

	#[error("{role} {id} resolves to the logger ({target}) it would be attached to")]
	AttachedToItself { id: ComponentId, role: Role, target: ComponentId },

	#[error("cannot inject logger into {id}: {reason}")]
	CapabilityInjection { id: ComponentId, reason: String },

	#[error("log directory {} cannot be created", path.display())]
	DirectoryCreation {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type Result<T, E = ComposeError> = std::result::Result<T, E>;
