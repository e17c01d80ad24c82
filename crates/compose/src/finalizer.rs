//! Late-binding phase, run once everything else has registered.

use serde::Serialize;

use crate::assembler::LoggerBinding;
use crate::container::ContainerBuilder;
use crate::log_dir::{LogDirState, ResolvedLogDirectory};
use crate::schema::{ADAPTER, DEFAULT_DEBUGGER_LOGGER};
use crate::{DebugFacility, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finalization {
	/// The debugger's default logger was replaced by an alias to ours.
	pub took_over_default_logger: bool,
	/// This run set the facility's logger to the adapter.
	pub wrote_logger: bool,
	/// This run wrote the facility's log directory.
	pub wrote_log_directory: bool,
	pub log_dir_state: LogDirState,
}

pub fn finalize(
	container: &mut ContainerBuilder,
	binding: &LoggerBinding,
	log_dir: &ResolvedLogDirectory,
	facility: &DebugFacility,
	hook_to_debugger: bool,
) -> Result<Finalization> {
	let took_over_default_logger = hook_to_debugger && take_over_default_logger(container, binding)?;
	let wrote_logger = hook_to_debugger && facility.set_logger_if_unset(ADAPTER);
	if !hook_to_debugger && container.has_definition(DEFAULT_DEBUGGER_LOGGER) {
		tracing::warn!(default = DEFAULT_DEBUGGER_LOGGER, "takeover disabled, keeping default logger");
	}

	let mut state = LogDirState::Unset;
	if let Some(existing) = facility.log_directory() {
		state = state.observe_external(existing);
	}
	let wrote_log_directory = facility.set_log_directory_if_unset(log_dir.path());
	if wrote_log_directory {
		state = state.resolve(log_dir.path().to_path_buf());
	}

	Ok(Finalization {
		took_over_default_logger,
		wrote_logger,
		wrote_log_directory,
		log_dir_state: state,
	})
}

fn take_over_default_logger(container: &mut ContainerBuilder, binding: &LoggerBinding) -> Result<bool> {
	if container.remove_definition(DEFAULT_DEBUGGER_LOGGER).is_none() {
		return Ok(false);
	}
	container.add_alias(DEFAULT_DEBUGGER_LOGGER, binding.logger().clone())?;
	tracing::debug!(alias = DEFAULT_DEBUGGER_LOGGER, target = %binding.logger(), "default logger taken over");
	Ok(true)
}
