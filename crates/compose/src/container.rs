//! The slice of the host service container the composition run works against.
//!
//! Definitions live in a [`TagRegistry`], so tag lookups, priorities and
//! registration order come from one place. Materializing a definition into a
//! live object is the host's business; here a definition is only its factory,
//! arguments, flags and the setup calls composition appends to it.

use std::fmt;

use indexmap::IndexMap;
use pipewright_registry::{ComponentDecl, ComponentId, Registered, RegistryError, Role, TagRegistry};
use serde::Serialize;

use crate::Parameters;

bitflags::bitflags! {
	/// Behavioural contracts a definition opts into.
	#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
	pub struct Capabilities: u8 {
		/// Wants the composed logger injected after construction.
		const LOGGER_AWARE = 1 << 0;
	}
}

/// Components whose construction is owned by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinKind {
	Logger,
	BlueScreenRenderer,
	DebugAdapter,
	DebugUrlProcessor,
	PriorityProcessor,
	ExceptionProcessor,
	FallbackHandler,
}

impl BuiltinKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Logger => "logger",
			Self::BlueScreenRenderer => "blue-screen-renderer",
			Self::DebugAdapter => "debug-adapter",
			Self::DebugUrlProcessor => "debug-url-processor",
			Self::PriorityProcessor => "priority-processor",
			Self::ExceptionProcessor => "exception-processor",
			Self::FallbackHandler => "fallback-handler",
		}
	}
}

impl fmt::Display for BuiltinKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Factory {
	Builtin(BuiltinKind),
	/// Host-defined factory description.
	External(Box<str>),
	/// Stands for another definition.
	Reference(ComponentId),
}

impl fmt::Display for Factory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Builtin(kind) => write!(f, "builtin:{kind}"),
			Self::External(name) => f.write_str(name),
			Self::Reference(id) => write!(f, "@{id}"),
		}
	}
}

/// Constructor argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Arg {
	Value(String),
	/// Handle to another definition, resolved by the host at construction time.
	Service(ComponentId),
	Null,
}

impl fmt::Display for Arg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(value) => write!(f, "{value:?}"),
			Self::Service(id) => write!(f, "@{id}"),
			Self::Null => f.write_str("null"),
		}
	}
}

/// Call the host performs on a constructed component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", content = "service", rename_all = "camelCase")]
pub enum Setup {
	PushHandler(ComponentId),
	PushProcessor(ComponentId),
	SetLogger(ComponentId),
}

impl fmt::Display for Setup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::PushHandler(id) => write!(f, "pushHandler(@{id})"),
			Self::PushProcessor(id) => write!(f, "pushProcessor(@{id})"),
			Self::SetLogger(id) => write!(f, "setLogger(@{id})"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
	pub factory: Factory,
	pub args: IndexMap<Box<str>, Arg>,
	/// Whether the host may inject this definition by type.
	pub autowired: bool,
	pub capabilities: Capabilities,
	pub setup: Vec<Setup>,
}

impl Definition {
	pub fn new(factory: Factory) -> Self {
		Self {
			factory,
			args: IndexMap::new(),
			autowired: true,
			capabilities: Capabilities::empty(),
			setup: Vec::new(),
		}
	}

	pub fn builtin(kind: BuiltinKind) -> Self {
		Self::new(Factory::Builtin(kind))
	}

	pub fn with_arg(mut self, name: &str, arg: Arg) -> Self {
		self.args.insert(name.into(), arg);
		self
	}

	pub fn autowired(mut self, on: bool) -> Self {
		self.autowired = on;
		self
	}

	pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
		self.capabilities |= capabilities;
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("{id} is not defined")]
	Missing { id: ComponentId },

	#[error("reference cycle through {id}")]
	Cycle { id: ComponentId },
}

/// In-memory container builder.
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilder {
	definitions: TagRegistry<Definition>,
	aliases: IndexMap<ComponentId, ComponentId>,
	parameters: Parameters,
}

impl ContainerBuilder {
	pub fn new(parameters: Parameters) -> Self {
		Self {
			parameters,
			..Self::default()
		}
	}

	pub fn parameters(&self) -> &Parameters {
		&self.parameters
	}

	/// Adds a definition; its id must not collide with a definition or alias.
	pub fn add_definition(&mut self, decl: ComponentDecl<Definition>) -> Result<(), RegistryError> {
		if self.aliases.contains_key(&decl.id) {
			return Err(RegistryError::DuplicateIdentity { id: decl.id });
		}
		self.definitions.register(decl)
	}

	pub fn has_definition(&self, id: &str) -> bool {
		self.definitions.contains(id)
	}

	pub fn definition(&self, id: &str) -> Option<&Definition> {
		self.definitions.get(id).map(|entry| entry.payload())
	}

	pub fn definition_mut(&mut self, id: &str) -> Option<&mut Definition> {
		self.definitions.get_mut(id).map(|entry| entry.payload_mut())
	}

	pub fn remove_definition(&mut self, id: &str) -> Option<Definition> {
		self.definitions.remove(id).map(Registered::into_payload)
	}

	pub fn add_alias(&mut self, alias: impl Into<ComponentId>, target: impl Into<ComponentId>) -> Result<(), RegistryError> {
		let alias = alias.into();
		if self.definitions.contains(alias.as_str()) || self.aliases.contains_key(&alias) {
			return Err(RegistryError::DuplicateIdentity { id: alias });
		}
		self.aliases.insert(alias, target.into());
		Ok(())
	}

	pub fn alias_target(&self, alias: &str) -> Option<&ComponentId> {
		self.aliases.get(alias)
	}

	pub fn aliases(&self) -> impl Iterator<Item = (&ComponentId, &ComponentId)> {
		self.aliases.iter()
	}

	/// Follows aliases and reference factories to the definition that will
	/// actually be constructed.
	pub fn resolve(&self, id: &str) -> Result<(&ComponentId, &Definition), ResolveError> {
		let mut current = id;
		let mut visited: Vec<&str> = Vec::new();
		loop {
			if visited.contains(&current) {
				return Err(ResolveError::Cycle { id: current.into() });
			}
			visited.push(current);

			if let Some(target) = self.aliases.get(current) {
				current = target.as_str();
				continue;
			}
			let Some((key, entry)) = self.definitions.get_key_value(current) else {
				return Err(ResolveError::Missing { id: current.into() });
			};
			match &entry.payload().factory {
				Factory::Reference(target) => current = target.as_str(),
				_ => return Ok((key, entry.payload())),
			}
		}
	}

	/// Definitions declaring every capability in `capabilities`, in registration order.
	pub fn find_by_capability(&self, capabilities: Capabilities) -> Vec<ComponentId> {
		self.definitions
			.iter()
			.filter(|(_, entry)| entry.payload().capabilities.contains(capabilities))
			.map(|(id, _)| id.clone())
			.collect()
	}

	/// Definitions tagged with `role`, in registration order.
	pub fn find_by_role(&self, role: Role) -> &[ComponentId] {
		self.definitions.by_role(role)
	}

	pub fn registry(&self) -> &TagRegistry<Definition> {
		&self.definitions
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn external(name: &str) -> Definition {
		Definition::new(Factory::External(name.into()))
	}

	#[test]
	fn resolve_follows_aliases_and_references() {
		let mut container = ContainerBuilder::default();
		container.add_definition(ComponentDecl::new("mailer", external("smtp"))).unwrap();
		container
			.add_definition(ComponentDecl::new("ref", Definition::new(Factory::Reference("mailer".into()))))
			.unwrap();
		container.add_alias("mail", "ref").unwrap();

		let (id, def) = container.resolve("mail").unwrap();
		assert_eq!(id.as_str(), "mailer");
		assert_eq!(def.factory, Factory::External("smtp".into()));
	}

	#[test]
	fn resolve_reports_missing_target() {
		let mut container = ContainerBuilder::default();
		container
			.add_definition(ComponentDecl::new("ref", Definition::new(Factory::Reference("ghost".into()))))
			.unwrap();
		assert_eq!(container.resolve("ref").unwrap_err(), ResolveError::Missing { id: "ghost".into() });
	}

	#[test]
	fn resolve_reports_cycles() {
		let mut container = ContainerBuilder::default();
		container
			.add_definition(ComponentDecl::new("a", Definition::new(Factory::Reference("b".into()))))
			.unwrap();
		container.add_alias("b", "a").unwrap();
		assert!(matches!(container.resolve("a"), Err(ResolveError::Cycle { .. })));
	}

	#[test]
	fn alias_and_definition_share_a_namespace() {
		let mut container = ContainerBuilder::default();
		container.add_definition(ComponentDecl::new("x", external("x"))).unwrap();
		assert!(container.add_alias("x", "y").is_err());

		container.add_alias("y", "x").unwrap();
		assert!(container.add_definition(ComponentDecl::new("y", external("y"))).is_err());
		assert!(container.add_alias("y", "x").is_err());
	}

	#[test]
	fn find_by_capability_in_registration_order() {
		let mut container = ContainerBuilder::default();
		container
			.add_definition(ComponentDecl::new("b", external("b").with_capabilities(Capabilities::LOGGER_AWARE)))
			.unwrap();
		container.add_definition(ComponentDecl::new("plain", external("p"))).unwrap();
		container
			.add_definition(ComponentDecl::new("a", external("a").with_capabilities(Capabilities::LOGGER_AWARE)))
			.unwrap();

		let found = container.find_by_capability(Capabilities::LOGGER_AWARE);
		assert_eq!(found, [ComponentId::from("b"), ComponentId::from("a")]);
	}
}
