//! Declaration phase: turns [`LoggingConfig`] into container definitions.

use pipewright_registry::{ComponentDecl, Role};

use crate::config::{ComponentEntry, FactorySpec, LoggingConfig};
use crate::container::{Arg, BuiltinKind, Capabilities, ContainerBuilder, Definition, Factory};
use crate::log_dir::{LOG_DIR_PARAMETER, ResolvedLogDirectory};
use crate::{DebugFacility, Parameters, Result};

pub const PREFIX: &str = "logging";

pub const LOGGER: &str = "logging.logger";
/// Standalone, not autowired. Everything needing it holds an [`Arg::Service`] handle.
pub const RENDERER: &str = "logging.renderer";
pub const ADAPTER: &str = "logging.adapter";
pub const DEBUG_URL_PROCESSOR: &str = "logging.processor.debugUrl";
pub const PRIORITY_PROCESSOR: &str = "logging.processor.priority";
pub const EXCEPTION_PROCESSOR: &str = "logging.processor.exception";
pub const FALLBACK_HANDLER: &str = "logging.handler.fallback";

/// Logger the debugging subsystem registers on its own.
pub const DEFAULT_DEBUGGER_LOGGER: &str = "debugger.logger";

pub const DEBUG_URL_PRIORITY: i32 = 10;
pub const PRIORITY_PROCESSOR_PRIORITY: i32 = 20;
pub const EXCEPTION_PROCESSOR_PRIORITY: i32 = 100;

/// Registers the logger, its collaborators, the built-in processors and every
/// enabled configured handler and processor.
pub fn declare(
	config: &LoggingConfig,
	container: &mut ContainerBuilder,
	log_dir: &ResolvedLogDirectory,
	facility: &DebugFacility,
) -> Result<()> {
	let directory = log_dir.path().to_string_lossy().into_owned();

	// The renderer is built first and on its own; the logger never constructs it.
	container.add_definition(ComponentDecl::new(
		RENDERER,
		Definition::builtin(BuiltinKind::BlueScreenRenderer)
			.with_arg("directory", Arg::Value(directory.clone()))
			.autowired(false),
	))?;

	container.add_definition(ComponentDecl::new(
		LOGGER,
		Definition::builtin(BuiltinKind::Logger).with_arg("name", Arg::Value(config.name.clone())),
	))?;

	container.add_definition(ComponentDecl::new(
		ADAPTER,
		Definition::builtin(BuiltinKind::DebugAdapter)
			.with_arg("logger", Arg::Service(LOGGER.into()))
			.with_arg("renderer", Arg::Service(RENDERER.into()))
			.with_arg("email", facility.email().map_or(Arg::Null, |email| Arg::Value(email.to_owned())))
			.with_arg("accessPriority", Arg::Value(config.access_priority.to_string()))
			.autowired(false),
	))?;

	if let Some(base_url) = config.debugger_base_url() {
		container.add_definition(
			ComponentDecl::new(
				DEBUG_URL_PROCESSOR,
				Definition::builtin(BuiltinKind::DebugUrlProcessor).with_arg("baseUrl", Arg::Value(base_url.to_owned())),
			)
			.with_role(Role::Processor)
			.with_priority(DEBUG_URL_PRIORITY),
		)?;
	}

	if config.use_priority_processor {
		container.add_definition(
			ComponentDecl::new(PRIORITY_PROCESSOR, Definition::builtin(BuiltinKind::PriorityProcessor))
				.with_role(Role::Processor)
				.with_priority(PRIORITY_PROCESSOR_PRIORITY),
		)?;
	}

	container.add_definition(
		ComponentDecl::new(
			EXCEPTION_PROCESSOR,
			Definition::builtin(BuiltinKind::ExceptionProcessor).with_arg("renderer", Arg::Service(RENDERER.into())),
		)
		.with_role(Role::Processor)
		.with_priority(EXCEPTION_PROCESSOR_PRIORITY),
	)?;

	let mut parameters = container.parameters().clone();
	if parameters.get(LOG_DIR_PARAMETER).is_none_or(|dir| dir.trim().is_empty()) {
		parameters.insert(LOG_DIR_PARAMETER, directory);
	}
	declare_entries(container, &parameters, Role::Handler, &config.handlers)?;
	declare_entries(container, &parameters, Role::Processor, &config.processors)?;
	Ok(())
}

/// Registers the file handler used when nothing else is tagged as a handler.
pub fn declare_fallback_handler(config: &LoggingConfig, container: &mut ContainerBuilder, log_dir: &ResolvedLogDirectory) -> Result<()> {
	container.add_definition(
		ComponentDecl::new(
			FALLBACK_HANDLER,
			Definition::builtin(BuiltinKind::FallbackHandler)
				.with_arg("name", Arg::Value(config.name.clone()))
				.with_arg("directory", Arg::Value(log_dir.path().to_string_lossy().into_owned())),
		)
		.with_role(Role::Handler),
	)?;
	Ok(())
}

fn declare_entries<'a>(
	container: &mut ContainerBuilder,
	parameters: &Parameters,
	role: Role,
	entries: impl IntoIterator<Item = (&'a String, &'a ComponentEntry)>,
) -> Result<()> {
	for (key, entry) in entries {
		let id = format!("{PREFIX}.{role}.{key}");
		let decl = match entry {
			ComponentEntry::Disabled => {
				tracing::debug!(%id, "entry disabled");
				continue;
			}
			ComponentEntry::Reference(target) => ComponentDecl::new(id, Definition::new(Factory::Reference(target.clone()))),
			ComponentEntry::Factory(spec) => {
				let decl = ComponentDecl::new(id, external_definition(spec, parameters)?);
				match spec.priority {
					Some(priority) => decl.with_priority(priority),
					None => decl,
				}
			}
		};
		container.add_definition(decl.with_role(role))?;
	}
	Ok(())
}

fn external_definition(spec: &FactorySpec, parameters: &Parameters) -> Result<Definition> {
	let mut definition = Definition::new(Factory::External(spec.factory.as_str().into()));
	for (name, value) in &spec.args {
		let arg = match value.strip_prefix('@') {
			Some(target) => Arg::Service(target.into()),
			None => Arg::Value(parameters.expand(value)?),
		};
		definition = definition.with_arg(name, arg);
	}
	if spec.logger_aware {
		definition = definition.with_capabilities(Capabilities::LOGGER_AWARE);
	}
	Ok(definition)
}
