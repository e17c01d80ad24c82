use crate::{ComponentId, Role};

/// Registration errors. A failed call never leaves the registry modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// Two declarations share the same identity.
	#[error("duplicate component identity: {id}")]
	DuplicateIdentity { id: ComponentId },

	/// A component was tagged with the same role twice.
	#[error("component {id} already holds role {role}")]
	DuplicateRole { id: ComponentId, role: Role },

	/// Operation referenced a component that was never registered.
	#[error("unknown component: {id}")]
	UnknownIdentity { id: ComponentId },

	/// Role name outside the supported set.
	#[error("unknown role {name:?}, expected one of: handler, processor")]
	UnknownRole { name: Box<str> },
}
