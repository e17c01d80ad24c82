use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// Role a component can be tagged with.
///
/// The set is closed: role names coming from configuration are validated
/// against it when parsed, never dispatched on as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Destination a finished record is dispatched to.
	Handler,
	/// Transformation applied to a record before dispatch.
	Processor,
}

impl Role {
	pub const ALL: [Role; 2] = [Role::Handler, Role::Processor];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Handler => "handler",
			Self::Processor => "processor",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = RegistryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|role| role.as_str() == s)
			.ok_or_else(|| RegistryError::UnknownRole { name: s.into() })
	}
}
