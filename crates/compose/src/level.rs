use std::fmt;

use serde::{Deserialize, Serialize};

/// Record severity, least severe first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Debug,
	#[default]
	Info,
	Notice,
	#[serde(alias = "warn")]
	Warning,
	Error,
	Critical,
	Alert,
	Emergency,
}

impl Level {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Debug => "debug",
			Self::Info => "info",
			Self::Notice => "notice",
			Self::Warning => "warning",
			Self::Error => "error",
			Self::Critical => "critical",
			Self::Alert => "alert",
			Self::Emergency => "emergency",
		}
	}
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
