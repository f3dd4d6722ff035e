//! Runtime settings.
//!
//! Settings can be built in code or read from JSON (for example a
//! `<script type="application/json">` block rendered into the host page).
//! Every field has a default, so `{}` is a valid configuration.
//!
//! ```
//! use mosaic::settings::RuntimeSettings;
//! use mosaic::ReentrancyPolicy;
//!
//! let settings = RuntimeSettings::from_json(
//!     r#"{ "root_id": "app", "event_types": ["submit", "click"], "reentrancy": "reject" }"#,
//! )
//! .unwrap();
//! assert_eq!(settings.root_id, "app");
//! assert_eq!(settings.reentrancy, ReentrancyPolicy::Reject);
//! assert_eq!(settings.attribute_prefix, "data-");
//! ```

use std::collections::HashSet;

use mosaic_events::DEFAULT_ATTRIBUTE_PREFIX;
use mosaic_router::ReentrancyPolicy;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The JSON document could not be parsed.
	#[error("failed to parse runtime settings: {0}")]
	Parse(#[from] serde_json::Error),
	/// A value is out of range.
	#[error("invalid runtime setting '{field}': {reason}")]
	Invalid {
		/// The offending field.
		field: &'static str,
		/// Why it was rejected.
		reason: String,
	},
}

/// Configuration for a [`Runtime`](crate::Runtime).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSettings {
	/// `id` of the element the application mounts into and delegates from.
	pub root_id: String,
	/// Event types that get one delegated listener each.
	pub event_types: Vec<String>,
	/// Prefix of the handler-name attribute (`data-` gives `data-submit`).
	pub attribute_prefix: String,
	/// Handling of navigations requested while one is running.
	pub reentrancy: ReentrancyPolicy,
}

impl Default for RuntimeSettings {
	fn default() -> Self {
		Self {
			root_id: "root".to_string(),
			event_types: ["submit", "click", "input", "change"]
				.into_iter()
				.map(String::from)
				.collect(),
			attribute_prefix: DEFAULT_ATTRIBUTE_PREFIX.to_string(),
			reentrancy: ReentrancyPolicy::Queue,
		}
	}
}

impl RuntimeSettings {
	/// Parses and validates settings from JSON.
	pub fn from_json(json: &str) -> Result<Self, SettingsError> {
		let settings: Self = serde_json::from_str(json)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Sets the root element id.
	pub fn with_root_id(mut self, root_id: impl Into<String>) -> Self {
		self.root_id = root_id.into();
		self
	}

	/// Replaces the delegated event types.
	pub fn with_event_types<I, S>(mut self, event_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.event_types = event_types.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the re-entrant navigation policy.
	pub fn with_reentrancy(mut self, policy: ReentrancyPolicy) -> Self {
		self.reentrancy = policy;
		self
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.root_id.trim().is_empty() {
			return Err(SettingsError::Invalid {
				field: "root_id",
				reason: "must not be empty".to_string(),
			});
		}
		if self.attribute_prefix.is_empty() {
			return Err(SettingsError::Invalid {
				field: "attribute_prefix",
				reason: "must not be empty".to_string(),
			});
		}

		let mut seen = HashSet::new();
		for event_type in &self.event_types {
			if event_type.is_empty() {
				return Err(SettingsError::Invalid {
					field: "event_types",
					reason: "event type names must not be empty".to_string(),
				});
			}
			if !seen.insert(event_type.as_str()) {
				return Err(SettingsError::Invalid {
					field: "event_types",
					reason: format!("'{}' is listed more than once", event_type),
				});
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = RuntimeSettings::default();
		assert_eq!(settings.root_id, "root");
		assert_eq!(settings.event_types, vec!["submit", "click", "input", "change"]);
		assert_eq!(settings.attribute_prefix, "data-");
		assert_eq!(settings.reentrancy, ReentrancyPolicy::Queue);
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_empty_json_uses_defaults() {
		assert_eq!(
			RuntimeSettings::from_json("{}").unwrap(),
			RuntimeSettings::default()
		);
	}

	#[rstest]
	#[case(r#"{ "root_id": "  " }"#, "root_id")]
	#[case(r#"{ "attribute_prefix": "" }"#, "attribute_prefix")]
	#[case(r#"{ "event_types": ["click", "click"] }"#, "event_types")]
	#[case(r#"{ "event_types": [""] }"#, "event_types")]
	fn test_invalid_values_rejected(#[case] json: &str, #[case] expected_field: &str) {
		match RuntimeSettings::from_json(json) {
			Err(SettingsError::Invalid { field, .. }) => assert_eq!(field, expected_field),
			other => panic!("expected invalid setting, got {:?}", other),
		}
	}

	#[rstest]
	fn test_unknown_field_is_parse_error() {
		let err = RuntimeSettings::from_json(r#"{ "rootid": "app" }"#).unwrap_err();
		assert!(matches!(err, SettingsError::Parse(_)));
	}

	#[rstest]
	fn test_builder_methods() {
		let settings = RuntimeSettings::default()
			.with_root_id("app")
			.with_event_types(["submit"])
			.with_reentrancy(ReentrancyPolicy::Reject);

		assert_eq!(settings.root_id, "app");
		assert_eq!(settings.event_types, vec!["submit"]);
		assert_eq!(settings.reentrancy, ReentrancyPolicy::Reject);
	}
}
