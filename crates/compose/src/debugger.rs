//! Process-wide debugging facility shared between subsystems.
//!
//! Created by the host before composition and passed in as an `Arc`. Its
//! writable fields are first-writer-wins: the check and the write happen under
//! one lock, so concurrent composers cannot both claim the field.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use pipewright_registry::ComponentId;

#[derive(Debug, Default)]
pub struct DebugFacility {
	log_directory: Mutex<Option<PathBuf>>,
	logger: Mutex<Option<ComponentId>>,
	email: Option<String>,
}

impl DebugFacility {
	pub fn new() -> Self {
		Self::default()
	}

	/// Contact address shown by the debug adapter.
	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}

	/// Facility whose log directory was configured by someone else.
	pub fn with_log_directory(self, path: impl Into<PathBuf>) -> Self {
		self.set_log_directory_if_unset(path);
		self
	}

	/// Facility whose logger was chosen by someone else.
	pub fn with_logger(self, id: impl Into<ComponentId>) -> Self {
		self.set_logger_if_unset(id);
		self
	}

	pub fn email(&self) -> Option<&str> {
		self.email.as_deref()
	}

	/// Current log directory. An empty path counts as unset.
	pub fn log_directory(&self) -> Option<PathBuf> {
		self.log_directory.lock().clone().filter(|p| !is_blank(p))
	}

	/// Stores `path` unless a directory is already configured.
	///
	/// Returns `true` when this call performed the write.
	pub fn set_log_directory_if_unset(&self, path: impl Into<PathBuf>) -> bool {
		let mut slot = self.log_directory.lock();
		if slot.as_deref().is_some_and(|p| !is_blank(p)) {
			return false;
		}
		*slot = Some(path.into());
		true
	}

	/// Logger the debugger reports through.
	pub fn logger(&self) -> Option<ComponentId> {
		self.logger.lock().clone()
	}

	/// Stores `id` unless a logger is already set. Returns `true` on write.
	pub fn set_logger_if_unset(&self, id: impl Into<ComponentId>) -> bool {
		let mut slot = self.logger.lock();
		if slot.is_some() {
			return false;
		}
		*slot = Some(id.into());
		true
	}
}

fn is_blank(path: &Path) -> bool {
	path.as_os_str().is_empty()
}
