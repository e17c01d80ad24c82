//! Container parameters and `%name%` placeholder expansion.

use indexmap::IndexMap;
use serde::Serialize;

use crate::ConfigError;

/// Named string parameters supplied by the host container (`appDir`, `logDir`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters(IndexMap<String, String>);

impl Parameters {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.0.insert(name.into(), value.into())
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Expands `%name%` placeholders in `template`.
	///
	/// Parameter values are expanded recursively. `%%` yields a literal `%`.
	pub fn expand(&self, template: &str) -> Result<String, ConfigError> {
		let mut stack = Vec::new();
		self.expand_inner(template, &mut stack)
	}

	fn expand_inner<'a>(&'a self, template: &str, stack: &mut Vec<&'a str>) -> Result<String, ConfigError> {
		let mut out = String::with_capacity(template.len());
		let mut rest = template;

		while let Some(start) = rest.find('%') {
			out.push_str(&rest[..start]);
			let after = &rest[start + 1..];
			let Some(len) = after.find('%') else {
				return Err(ConfigError::UnterminatedPlaceholder {
					template: template.to_owned(),
				});
			};
			let name = &after[..len];
			rest = &after[len + 1..];

			if name.is_empty() {
				out.push('%');
				continue;
			}

			let Some((key, value)) = self.0.get_key_value(name) else {
				return Err(ConfigError::UnknownParameter {
					name: name.to_owned(),
					template: template.to_owned(),
				});
			};
			if stack.contains(&key.as_str()) {
				return Err(ConfigError::CircularParameter { name: name.to_owned() });
			}
			stack.push(key);
			let expanded = self.expand_inner(value, stack)?;
			stack.pop();
			out.push_str(&expanded);
		}

		out.push_str(rest);
		Ok(out)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params() -> Parameters {
		Parameters::new()
			.with("appDir", "/srv/app/app")
			.with("tempDir", "%appDir%/../temp")
	}

	#[test]
	fn expands_placeholders() {
		assert_eq!(params().expand("%appDir%/../log").unwrap(), "/srv/app/app/../log");
	}

	#[test]
	fn expands_recursively() {
		assert_eq!(params().expand("%tempDir%/cache").unwrap(), "/srv/app/app/../temp/cache");
	}

	#[test]
	fn double_percent_is_literal() {
		assert_eq!(params().expand("100%% of %appDir%").unwrap(), "100% of /srv/app/app");
	}

	#[test]
	fn plain_text_is_untouched() {
		assert_eq!(params().expand("/var/log/app").unwrap(), "/var/log/app");
	}

	#[test]
	fn unknown_parameter_is_an_error() {
		let err = params().expand("%wwwDir%/log").unwrap_err();
		assert!(matches!(err, ConfigError::UnknownParameter { ref name, .. } if name == "wwwDir"));
	}

	#[test]
	fn unterminated_placeholder_is_an_error() {
		let err = params().expand("%appDir/log").unwrap_err();
		assert!(matches!(err, ConfigError::UnterminatedPlaceholder { .. }));
	}

	#[test]
	fn circular_reference_is_an_error() {
		let params = Parameters::new().with("a", "%b%").with("b", "%a%");
		let err = params.expand("%a%").unwrap_err();
		assert!(matches!(err, ConfigError::CircularParameter { .. }));
	}
}
