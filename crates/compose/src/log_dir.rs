//! Log directory resolution.
//!
//! Resolution order, first hit wins:
//! 1. the explicit `logDir` option, or a `logDir` container parameter, unless
//!    it expands to a blank string;
//! 2. the directory already configured on the [`DebugFacility`];
//! 3. [`DEFAULT_LOG_DIR_TEMPLATE`] expanded against the parameters.

use std::{fmt, fs};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{ComposeError, ConfigError, DebugFacility, Parameters};

pub const LOG_DIR_PARAMETER: &str = "logDir";
pub const DEFAULT_LOG_DIR_TEMPLATE: &str = "%appDir%/../log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogDirSource {
	Explicit,
	ExternallySet,
	Default,
}

impl LogDirSource {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Explicit => "explicit",
			Self::ExternallySet => "externally-set",
			Self::Default => "default",
		}
	}
}

impl fmt::Display for LogDirSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLogDirectory {
	path: PathBuf,
	source: LogDirSource,
}

impl ResolvedLogDirectory {
	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn source(&self) -> LogDirSource {
		self.source
	}
}

/// Where the facility's log directory came from over one composition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "path", rename_all = "kebab-case")]
pub enum LogDirState {
	Unset,
	/// Configured outside this run; never written by it.
	ExternallySet(PathBuf),
	/// Written by this run.
	Resolved(PathBuf),
}

impl LogDirState {
	/// `Unset -> ExternallySet`. Terminal states are kept.
	pub fn observe_external(self, path: PathBuf) -> Self {
		match self {
			Self::Unset => Self::ExternallySet(path),
			terminal => terminal,
		}
	}

	/// `Unset -> Resolved`. Terminal states are kept.
	pub fn resolve(self, path: PathBuf) -> Self {
		match self {
			Self::Unset => Self::Resolved(path),
			terminal => terminal,
		}
	}

	pub fn path(&self) -> Option<&Path> {
		match self {
			Self::Unset => None,
			Self::ExternallySet(path) | Self::Resolved(path) => Some(path),
		}
	}
}

/// Picks the log directory without touching the filesystem.
pub fn resolve(explicit: Option<&str>, parameters: &Parameters, facility: &DebugFacility) -> Result<ResolvedLogDirectory, ConfigError> {
	let explicit = explicit.or_else(|| parameters.contains(LOG_DIR_PARAMETER).then_some("%logDir%"));
	if let Some(template) = explicit {
		let path = parameters.expand(template)?;
		if !path.trim().is_empty() {
			return Ok(ResolvedLogDirectory {
				path: path.into(),
				source: LogDirSource::Explicit,
			});
		}
		tracing::debug!(template, "explicit log directory is blank, ignoring");
	}

	if let Some(path) = facility.log_directory() {
		return Ok(ResolvedLogDirectory {
			path,
			source: LogDirSource::ExternallySet,
		});
	}

	Ok(ResolvedLogDirectory {
		path: parameters.expand(DEFAULT_LOG_DIR_TEMPLATE)?.into(),
		source: LogDirSource::Default,
	})
}

/// Creates `path` and its parents. An already existing directory is success,
/// including one created concurrently by another process.
pub fn ensure_directory(path: &Path) -> Result<(), ComposeError> {
	match fs::create_dir_all(path) {
		Ok(()) => Ok(()),
		Err(_) if path.is_dir() => Ok(()),
		Err(source) => Err(ComposeError::DirectoryCreation {
			path: path.to_path_buf(),
			source,
		}),
	}
}

/// [`resolve`] followed by [`ensure_directory`].
pub fn resolve_and_create(
	explicit: Option<&str>,
	parameters: &Parameters,
	facility: &DebugFacility,
) -> Result<ResolvedLogDirectory, ComposeError> {
	let resolved = resolve(explicit, parameters, facility)?;
	ensure_directory(resolved.path())?;
	tracing::debug!(path = %resolved.path.display(), source = ?resolved.source, "log directory ready");
	Ok(resolved)
}
