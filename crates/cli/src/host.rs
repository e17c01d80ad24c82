//! Host file: the application a composition runs inside.
//!
//! ```toml
//! [parameters]
//! appDir = "/srv/app/app"
//!
//! [debugger]
//! defaultLogger = true
//! logDir = "/var/log/app"
//! email = "ops@example.com"
//!
//! [services."mail.handler"]
//! factory = "mail"
//! roles = ["handler"]
//! priority = -10
//!
//! [logging]
//! tracyBaseUrl = "https://errors.example.com"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use indexmap::IndexMap;
use pipewright_compose::schema::DEFAULT_DEBUGGER_LOGGER;
use pipewright_compose::{Arg, Capabilities, ContainerBuilder, DebugFacility, Definition, Factory, LoggingConfig, Parameters};
use pipewright_registry::{ComponentDecl, Role};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostFile {
	pub parameters: IndexMap<String, String>,
	pub debugger: DebuggerSection,
	/// Definitions registered before the logging extension runs, keyed by id.
	pub services: IndexMap<String, ServiceSpec>,
	pub logging: LoggingConfig,
}

/// The debugging subsystem's own state before composition.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DebuggerSection {
	/// Register the debugger's own `debugger.logger`.
	pub default_logger: bool,
	pub log_dir: Option<PathBuf>,
	pub email: Option<String>,
}

impl Default for DebuggerSection {
	fn default() -> Self {
		Self {
			default_logger: true,
			log_dir: None,
			email: None,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ServiceSpec {
	/// Factory name, or `@id` to reuse another definition.
	pub factory: String,
	#[serde(default)]
	pub roles: Vec<String>,
	#[serde(default)]
	pub priority: Option<i32>,
	#[serde(default)]
	pub args: IndexMap<String, String>,
	#[serde(default)]
	pub logger_aware: bool,
	#[serde(default = "autowired_default")]
	pub autowired: bool,
}

fn autowired_default() -> bool {
	true
}

impl HostFile {
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let input = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
		Self::parse(&input).with_context(|| format!("parsing {}", path.display()))
	}

	pub fn parse(input: &str) -> anyhow::Result<Self> {
		Ok(toml::from_str(input)?)
	}

	pub fn parameters(&self) -> Parameters {
		self.parameters.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
	}

	/// Debug facility seeded from the `[debugger]` table. Non-empty overrides win.
	pub fn facility(&self, log_dir: Option<PathBuf>, email: Option<String>) -> DebugFacility {
		let mut facility = DebugFacility::new();
		if let Some(dir) = log_dir.or_else(|| self.debugger.log_dir.clone()) {
			facility = facility.with_log_directory(dir);
		}
		if let Some(email) = email.or_else(|| self.debugger.email.clone()) {
			facility = facility.with_email(email);
		}
		facility
	}

	/// Registers the debugger's default logger and every `[services]` entry.
	pub fn register_services(&self, container: &mut ContainerBuilder) -> anyhow::Result<()> {
		if self.debugger.default_logger {
			container.add_definition(ComponentDecl::new(
				DEFAULT_DEBUGGER_LOGGER,
				Definition::new(Factory::External("debugger-file-logger".into())),
			))?;
		}

		for (id, spec) in &self.services {
			let decl = spec.declaration(id).with_context(|| format!("service `{id}`"))?;
			container.add_definition(decl).with_context(|| format!("registering service `{id}`"))?;
			tracing::debug!(%id, factory = %spec.factory, "host service registered");
		}
		Ok(())
	}
}

impl ServiceSpec {
	fn declaration(&self, id: &str) -> anyhow::Result<ComponentDecl<Definition>> {
		let factory = match self.factory.strip_prefix('@') {
			Some(target) => Factory::Reference(target.into()),
			None => Factory::External(self.factory.as_str().into()),
		};

		let mut definition = Definition::new(factory).autowired(self.autowired);
		for (name, value) in &self.args {
			let arg = match value.strip_prefix('@') {
				Some(target) => Arg::Service(target.into()),
				None => Arg::Value(value.clone()),
			};
			definition = definition.with_arg(name, arg);
		}
		if self.logger_aware {
			definition = definition.with_capabilities(Capabilities::LOGGER_AWARE);
		}

		let mut decl = ComponentDecl::new(id, definition);
		for role in &self.roles {
			decl = decl.with_role(role.parse::<Role>()?);
		}
		if let Some(priority) = self.priority {
			decl = decl.with_priority(priority);
		}
		Ok(decl)
	}
}
