//! Logging extension options.
//!
//! Deserialized from the host configuration with unknown keys rejected, so a
//! misspelled option aborts composition instead of being silently ignored.

use indexmap::IndexMap;
use pipewright_registry::ComponentId;
use serde::Deserialize;

use crate::{ConfigError, Level};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LoggingConfig {
	/// Handler declarations keyed by local name.
	pub handlers: IndexMap<String, ComponentEntry>,
	/// Processor declarations keyed by local name.
	pub processors: IndexMap<String, ComponentEntry>,
	/// Channel name handed to the logger.
	pub name: String,
	/// Replace the debugger's default logger with the composed one.
	#[serde(alias = "hookToTracy")]
	pub hook_to_debugger: bool,
	/// Enables the debug-url processor when set.
	#[serde(alias = "tracyBaseUrl")]
	pub debugger_base_url: Option<String>,
	pub use_priority_processor: bool,
	/// Minimum level the debug adapter shows to remote viewers.
	pub access_priority: Level,
	/// Log directory, may contain `%param%` placeholders.
	pub log_dir: Option<String>,
	/// Attach a file handler in the log directory when no handler is tagged.
	pub register_fallback: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			handlers: IndexMap::new(),
			processors: IndexMap::new(),
			name: "app".to_owned(),
			hook_to_debugger: true,
			debugger_base_url: None,
			use_priority_processor: true,
			access_priority: Level::Info,
			log_dir: None,
			register_fallback: true,
		}
	}
}

impl LoggingConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	/// Base url for the debug-url processor; `None` when unset or empty.
	pub fn debugger_base_url(&self) -> Option<&str> {
		self.debugger_base_url.as_deref().filter(|url| !url.is_empty())
	}
}

/// One `handlers`/`processors` entry.
///
/// Accepted shapes: `false` (disabled), `"@service"` (reference to an existing
/// definition), `"factory"` (shorthand) or a [`FactorySpec`] table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEntry")]
pub enum ComponentEntry {
	Disabled,
	Reference(ComponentId),
	Factory(FactorySpec),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FactorySpec {
	pub factory: String,
	/// Constructor arguments. `@id` values are service references, the rest
	/// are expanded against the container parameters.
	#[serde(default)]
	pub args: IndexMap<String, String>,
	#[serde(default)]
	pub priority: Option<i32>,
	/// Opt into receiving the composed logger.
	#[serde(default)]
	pub logger_aware: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
	Flag(bool),
	Name(String),
	Spec(FactorySpec),
}

impl TryFrom<RawEntry> for ComponentEntry {
	type Error = ConfigError;

	fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
		match raw {
			RawEntry::Flag(false) => Ok(Self::Disabled),
			RawEntry::Flag(true) => Err(ConfigError::InvalidEntry {
				reason: "`true` is not a factory, use `false` to disable an entry".to_owned(),
			}),
			RawEntry::Name(name) => match name.strip_prefix('@') {
				Some("") => Err(ConfigError::InvalidEntry {
					reason: "empty service reference".to_owned(),
				}),
				Some(target) => Ok(Self::Reference(target.into())),
				None if name.is_empty() => Err(ConfigError::InvalidEntry {
					reason: "empty factory name".to_owned(),
				}),
				None => Ok(Self::Factory(FactorySpec {
					factory: name,
					..FactorySpec::default()
				})),
			},
			RawEntry::Spec(spec) if spec.factory.is_empty() => Err(ConfigError::InvalidEntry {
				reason: "empty factory name".to_owned(),
			}),
			RawEntry::Spec(spec) => Ok(Self::Factory(spec)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = LoggingConfig::from_toml_str("").unwrap();
		assert_eq!(config, LoggingConfig::default());
		assert_eq!(config.name, "app");
		assert!(config.hook_to_debugger);
		assert!(config.use_priority_processor);
		assert_eq!(config.access_priority, Level::Info);
		assert!(config.debugger_base_url().is_none());
	}

	#[test]
	fn legacy_aliases() {
		let config = LoggingConfig::from_toml_str(
			r#"
			hookToTracy = false
			tracyBaseUrl = "https://errors.example.com"
			"#,
		)
		.unwrap();
		assert!(!config.hook_to_debugger);
		assert_eq!(config.debugger_base_url(), Some("https://errors.example.com"));
	}

	#[test]
	fn entry_shapes() {
		let config = LoggingConfig::from_toml_str(
			r#"
			[handlers]
			off = false
			shared = "@app.mailer"
			stream = "stream"

			[handlers.file]
			factory = "rotating-file"
			priority = -5
			loggerAware = true
			args = { path = "%logDir%/app.log" }
			"#,
		)
		.unwrap();

		assert_eq!(config.handlers["off"], ComponentEntry::Disabled);
		assert_eq!(config.handlers["shared"], ComponentEntry::Reference("app.mailer".into()));
		assert_eq!(
			config.handlers["stream"],
			ComponentEntry::Factory(FactorySpec {
				factory: "stream".to_owned(),
				..FactorySpec::default()
			})
		);
		let ComponentEntry::Factory(file) = &config.handlers["file"] else {
			panic!("file handler should be a factory");
		};
		assert_eq!(file.priority, Some(-5));
		assert!(file.logger_aware);
		assert_eq!(file.args["path"], "%logDir%/app.log");
	}

	#[test]
	fn unknown_option_is_rejected() {
		let err = LoggingConfig::from_toml_str("hookToDebuger = true").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn wrong_type_is_rejected() {
		assert!(LoggingConfig::from_toml_str("usePriorityProcessor = \"yes\"").is_err());
		assert!(LoggingConfig::from_toml_str("accessPriority = \"loud\"").is_err());
	}

	#[test]
	fn enabled_flag_is_not_a_factory() {
		assert!(LoggingConfig::from_toml_str("[handlers]\nbroken = true").is_err());
		assert!(LoggingConfig::from_toml_str("[processors]\nbroken = \"@\"").is_err());
	}
}
