use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use pipewright_registry::{ComponentId, Role};
use serde::Serialize;

use crate::container::{Capabilities, ContainerBuilder};
use crate::extension::Composition;
use crate::finalizer::Finalization;
use crate::log_dir::LogDirSource;

/// Printable snapshot of a finished composition and the container it wired.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionPlan {
	pub logger: ComponentId,
	pub handlers: Vec<PlannedLink>,
	pub processors: Vec<PlannedLink>,
	pub injected: Vec<ComponentId>,
	pub log_dir: PathBuf,
	pub log_dir_source: LogDirSource,
	pub finalization: Finalization,
	pub services: Vec<ServicePlan>,
	pub aliases: IndexMap<ComponentId, ComponentId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedLink {
	pub id: ComponentId,
	pub priority: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlan {
	pub id: ComponentId,
	pub factory: String,
	pub roles: Vec<Role>,
	pub priority: Option<i32>,
	pub autowired: bool,
	pub logger_aware: bool,
	pub args: IndexMap<String, String>,
	pub setup: Vec<String>,
}

impl CompositionPlan {
	pub fn new(composition: &Composition, container: &ContainerBuilder) -> Self {
		let registry = container.registry();
		let links = |ids: &[ComponentId]| -> Vec<PlannedLink> {
			ids.iter()
				.map(|id| PlannedLink {
					id: id.clone(),
					priority: registry.priority_of(id.as_str()),
				})
				.collect()
		};

		let services: Vec<ServicePlan> = registry
			.iter()
			.map(|(id, entry)| {
				let def = entry.payload();
				ServicePlan {
					id: id.clone(),
					factory: def.factory.to_string(),
					roles: entry.roles().to_vec(),
					priority: entry.declared_priority(),
					autowired: def.autowired,
					logger_aware: def.capabilities.contains(Capabilities::LOGGER_AWARE),
					args: def.args.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
					setup: def.setup.iter().map(ToString::to_string).collect(),
				}
			})
			.collect();

		Self {
			logger: composition.binding.logger().clone(),
			handlers: links(composition.binding.handlers().ids()),
			processors: links(composition.binding.processors().ids()),
			injected: composition.binding.injected().to_vec(),
			log_dir: composition.log_dir.path().to_path_buf(),
			log_dir_source: composition.log_dir.source(),
			finalization: composition.finalization.clone(),
			services,
			aliases: container.aliases().map(|(a, t)| (a.clone(), t.clone())).collect(),
		}
	}
}

impl fmt::Display for CompositionPlan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "logger: {}", self.logger)?;
		writeln!(f, "log dir: {} ({})", self.log_dir.display(), self.log_dir_source)?;
		if self.finalization.wrote_log_directory {
			writeln!(f, "  propagated to debugger")?;
		}
		writeln!(f, "default logger taken over: {}", self.finalization.took_over_default_logger)?;
		if self.finalization.wrote_logger {
			writeln!(f, "debugger logger set to the adapter")?;
		}

		for (title, links) in [("handlers", &self.handlers), ("processors", &self.processors)] {
			writeln!(f, "{title}:")?;
			for link in links {
				writeln!(f, "  {:>5}  {}", link.priority, link.id)?;
			}
		}

		if !self.injected.is_empty() {
			writeln!(f, "logger injected into:")?;
			for id in &self.injected {
				writeln!(f, "  {id}")?;
			}
		}

		writeln!(f, "services:")?;
		for service in &self.services {
			let args: Vec<_> = service.args.iter().map(|(k, v)| format!("{k}: {v}")).collect();
			write!(f, "  {} = {}({})", service.id, service.factory, args.join(", "))?;
			if !service.autowired {
				write!(f, " [not autowired]")?;
			}
			writeln!(f)?;
			for call in &service.setup {
				writeln!(f, "    -> {call}")?;
			}
		}

		if !self.aliases.is_empty() {
			writeln!(f, "aliases:")?;
			for (alias, target) in &self.aliases {
				writeln!(f, "  {alias} -> {target}")?;
			}
		}
		Ok(())
	}
}
