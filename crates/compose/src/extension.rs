//! The composition run, split into its three phases.
//!
//! ```text
//! LoggingExtension::load      declare definitions, resolve + create log dir
//!   Loaded::assemble          fallback handler, ordered chains, logger injection
//!     Assembled::finalize     default logger takeover, log dir propagation
//! ```
//!
//! Other subsystems may keep registering into the container between phases.
//! Each phase consumes the previous one, so they cannot run out of order.

use std::sync::Arc;

use pipewright_registry::Role;

use crate::assembler::{LoggerBinding, assemble_claiming};
use crate::container::ContainerBuilder;
use crate::finalizer::{Finalization, finalize};
use crate::log_dir::{ResolvedLogDirectory, resolve_and_create};
use crate::schema::{DEFAULT_DEBUGGER_LOGGER, LOGGER, declare, declare_fallback_handler};
use crate::{DebugFacility, LoggingConfig, Result};

pub struct LoggingExtension {
	config: LoggingConfig,
	facility: Arc<DebugFacility>,
}

impl LoggingExtension {
	pub fn new(config: LoggingConfig, facility: Arc<DebugFacility>) -> Self {
		Self { config, facility }
	}

	/// Runs all phases back to back.
	pub fn compose(self, container: &mut ContainerBuilder) -> Result<Composition> {
		self.load(container)?.assemble(container)?.finalize(container)
	}

	/// First phase.
	pub fn load(self, container: &mut ContainerBuilder) -> Result<Loaded> {
		let log_dir = resolve_and_create(self.config.log_dir.as_deref(), container.parameters(), &self.facility)?;
		declare(&self.config, container, &log_dir, &self.facility)?;
		Ok(Loaded {
			config: self.config,
			facility: self.facility,
			log_dir,
		})
	}
}

pub struct Loaded {
	config: LoggingConfig,
	facility: Arc<DebugFacility>,
	log_dir: ResolvedLogDirectory,
}

impl Loaded {
	pub fn log_dir(&self) -> &ResolvedLogDirectory {
		&self.log_dir
	}

	pub fn assemble(self, container: &mut ContainerBuilder) -> Result<Assembled> {
		if self.config.register_fallback && container.find_by_role(Role::Handler).is_empty() {
			declare_fallback_handler(&self.config, container, &self.log_dir)?;
		}
		let claimed: &[&str] = if self.config.hook_to_debugger { &[DEFAULT_DEBUGGER_LOGGER] } else { &[] };
		let binding = assemble_claiming(container, LOGGER, claimed)?;
		Ok(Assembled {
			config: self.config,
			facility: self.facility,
			log_dir: self.log_dir,
			binding,
		})
	}
}

pub struct Assembled {
	config: LoggingConfig,
	facility: Arc<DebugFacility>,
	log_dir: ResolvedLogDirectory,
	binding: LoggerBinding,
}

impl Assembled {
	pub fn binding(&self) -> &LoggerBinding {
		&self.binding
	}

	pub fn finalize(self, container: &mut ContainerBuilder) -> Result<Composition> {
		let finalization = finalize(container, &self.binding, &self.log_dir, &self.facility, self.config.hook_to_debugger)?;
		tracing::info!(
			logger = %self.binding.logger(),
			handlers = self.binding.handlers().len(),
			processors = self.binding.processors().len(),
			injected = self.binding.injected().len(),
			log_dir = %self.log_dir.path().display(),
			"logging pipeline composed"
		);
		Ok(Composition {
			binding: self.binding,
			log_dir: self.log_dir,
			finalization,
		})
	}
}

/// Immutable result of a composition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
	pub binding: LoggerBinding,
	pub log_dir: ResolvedLogDirectory,
	pub finalization: Finalization,
}
