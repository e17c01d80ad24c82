//! Attaches the ordered handler and processor chains to the logger.
//!
//! Assembly validates everything up front and only then writes setup calls,
//! so an error leaves every definition as it was.

use pipewright_registry::{ComponentId, OrderedChain, Role};
use serde::Serialize;

use crate::container::{Capabilities, ContainerBuilder, Factory, Setup};
use crate::{ComposeError, Result};

/// The logger together with the chains attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerBinding {
	logger: ComponentId,
	handlers: OrderedChain,
	processors: OrderedChain,
	injected: Vec<ComponentId>,
}

impl LoggerBinding {
	pub fn logger(&self) -> &ComponentId {
		&self.logger
	}

	pub fn handlers(&self) -> &OrderedChain {
		&self.handlers
	}

	pub fn processors(&self) -> &OrderedChain {
		&self.processors
	}

	/// Components that received the logger, in registration order. A
	/// logger-aware reference contributes the definition it resolves to.
	pub fn injected(&self) -> &[ComponentId] {
		&self.injected
	}

	/// Attach calls in execution order: every handler, then every processor.
	pub fn attach_calls(&self) -> impl Iterator<Item = Setup> + '_ {
		let handlers = self.handlers.iter().cloned().map(Setup::PushHandler);
		let processors = self.processors.iter().cloned().map(Setup::PushProcessor);
		handlers.chain(processors)
	}
}

/// Builds both chains and wires them, plus logger injection, into `container`.
pub fn assemble(container: &mut ContainerBuilder, logger: &str) -> Result<LoggerBinding> {
	assemble_claiming(container, logger, &[])
}

/// [`assemble`], additionally rejecting chain entries that resolve to an id in
/// `claimed`. Those ids become aliases of the logger once finalized.
pub fn assemble_claiming(container: &mut ContainerBuilder, logger: &str, claimed: &[&str]) -> Result<LoggerBinding> {
	let logger = match container.resolve(logger) {
		Ok((id, _)) => id.clone(),
		Err(_) => return Err(ComposeError::UnknownLogger { id: logger.into() }),
	};

	let handlers = OrderedChain::collect(container.registry(), Role::Handler);
	let processors = OrderedChain::collect(container.registry(), Role::Processor);
	for chain in [&handlers, &processors] {
		for id in chain {
			let target = match container.resolve(id.as_str()) {
				Ok((target, _)) => target,
				Err(source) => {
					return Err(ComposeError::UnresolvedComponent {
						id: id.clone(),
						role: chain.role(),
						source,
					});
				}
			};
			if *target == logger || claimed.contains(&target.as_str()) {
				return Err(ComposeError::AttachedToItself {
					id: id.clone(),
					role: chain.role(),
					target: target.clone(),
				});
			}
		}
	}

	let mut injected: Vec<ComponentId> = Vec::new();
	for id in container.find_by_capability(Capabilities::LOGGER_AWARE) {
		let target = injection_target(container, &id, &logger)?;
		if !injected.contains(&target) {
			injected.push(target);
		}
	}

	let binding = LoggerBinding {
		logger,
		handlers,
		processors,
		injected,
	};

	let Some(definition) = container.definition_mut(binding.logger.as_str()) else {
		return Err(ComposeError::UnknownLogger { id: binding.logger.clone() });
	};
	for call in binding.attach_calls() {
		tracing::debug!(logger = %binding.logger, %call, "attach");
		definition.setup.push(call);
	}

	for id in &binding.injected {
		if let Some(definition) = container.definition_mut(id.as_str()) {
			tracing::debug!(component = %id, logger = %binding.logger, "inject logger");
			definition.setup.push(Setup::SetLogger(binding.logger.clone()));
		}
	}

	Ok(binding)
}

/// Definition that will actually be constructed for logger-aware `id`.
fn injection_target(container: &ContainerBuilder, id: &ComponentId, logger: &ComponentId) -> Result<ComponentId> {
	let reject = |reason: String| ComposeError::CapabilityInjection { id: id.clone(), reason };

	let (target, definition) = container.resolve(id.as_str()).map_err(|err| reject(err.to_string()))?;
	if target == logger {
		return Err(reject("a logger cannot receive itself".to_owned()));
	}
	if let Factory::Builtin(kind) = &definition.factory {
		return Err(reject(format!("built-in {kind} takes no logger")));
	}
	Ok(target.clone())
}
