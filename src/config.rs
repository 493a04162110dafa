//! Normalized credential configuration and the loaders for its two external key shapes.
//!
//! [`CredentialsConfig`] is the single canonical schema consumed by the resolver. It is produced
//! either programmatically via [`CredentialsConfig::builder`] or from a JSON document via
//! [`CredentialsConfig::from_json_str`] / [`CredentialsConfig::from_json_value`], which accept the
//! unprefixed key set (`auth_method`, …) or the `aws_`-prefixed one (`aws_auth_method`, …).

pub mod field;
pub(crate) mod shape;

pub use field::*;

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::CredentialSecret, error::ConfigError};

/// Method used when `auth_method` is absent.
pub const DEFAULT_AUTH_METHOD: &str = "basic";
/// STS session duration used when `duration_in_seconds` is absent.
pub const DEFAULT_DURATION_IN_SECONDS: u32 = 3_600;
/// ARN partition used when `arn_partition` is absent.
pub const DEFAULT_ARN_PARTITION: &str = "aws";
/// Role session name used when `session_name` is absent.
pub const DEFAULT_SESSION_NAME: &str = "embulk";
/// Profile selected when `profile_name` is absent.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Immutable credential settings for one connector invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialsConfig {
	/// Selected method literal; parsed (case-sensitively) by the resolver.
	pub auth_method: String,
	/// Access key identifier (`basic`, `session`).
	pub access_key_id: Option<String>,
	/// Secret access key (`basic`, `session`).
	pub secret_access_key: Option<CredentialSecret>,
	/// Session token (`session`).
	pub session_token: Option<CredentialSecret>,
	/// Explicit profile file path (`profile`).
	pub profile_file: Option<PathBuf>,
	/// Profile name (`profile`).
	pub profile_name: Option<String>,
	/// Account owning the role (`assume_role`).
	pub account_id: Option<String>,
	/// Role to assume (`assume_role`).
	pub role_name: Option<String>,
	/// External ID presented to STS (`assume_role`).
	pub external_id: Option<String>,
	/// Full role ARN (`web_identity_token`).
	pub role_arn: Option<String>,
	/// Role session name for the web-identity exchange (`web_identity_token`).
	pub role_session_name: Option<String>,
	/// Web identity token file (`web_identity_token`).
	pub web_identity_token_file: Option<PathBuf>,
	/// Requested STS session duration in seconds; bounds are enforced by STS.
	pub duration_in_seconds: u32,
	/// ARN partition used to build assume-role ARNs.
	pub arn_partition: String,
	/// Role session name for the assume-role exchange.
	pub session_name: String,
	/// Key prefix of the shape the record came from; used to name options in errors.
	pub prefix: OptionPrefix,
}
impl CredentialsConfig {
	/// Creates a new builder for the provided method literal.
	pub fn builder(auth_method: impl Into<String>) -> CredentialsConfigBuilder {
		CredentialsConfigBuilder::new(auth_method)
	}

	/// Parses a JSON document shaped by `prefix`.
	pub fn from_json_str(input: &str, prefix: OptionPrefix) -> Result<Self, ConfigError> {
		let value =
			serde_json::from_str::<Value>(input).map_err(|source| ConfigError::Syntax { source })?;

		Self::from_json_value(value, prefix)
	}

	/// Converts an already-parsed JSON value shaped by `prefix`.
	pub fn from_json_value(value: Value, prefix: OptionPrefix) -> Result<Self, ConfigError> {
		let value = shape::strip_prefix(value, prefix);
		let shape: shape::ConfigShape = serde_path_to_error::deserialize(value).map_err(|source| {
			ConfigError::Parse { path: format!("{}{}", prefix.as_str(), source.path()), source }
		})?;

		Ok(shape.into_config(prefix))
	}

	/// Returns true when the optional option carries a value.
	pub fn is_present(&self, field: OptionField) -> bool {
		match field {
			OptionField::AccessKeyId => self.access_key_id.is_some(),
			OptionField::SecretAccessKey => self.secret_access_key.is_some(),
			OptionField::SessionToken => self.session_token.is_some(),
			OptionField::ProfileFile => self.profile_file.is_some(),
			OptionField::ProfileName => self.profile_name.is_some(),
			OptionField::AccountId => self.account_id.is_some(),
			OptionField::RoleName => self.role_name.is_some(),
			OptionField::ExternalId => self.external_id.is_some(),
			OptionField::RoleArn => self.role_arn.is_some(),
			OptionField::RoleSessionName => self.role_session_name.is_some(),
			OptionField::WebIdentityTokenFile => self.web_identity_token_file.is_some(),
		}
	}

	/// Set of optional options carrying a value.
	pub fn present_fields(&self) -> FieldSet {
		OptionField::ALL.into_iter().filter(|field| self.is_present(*field)).collect()
	}

	/// Option name for `field` as the user wrote it.
	pub fn option_name(&self, field: OptionField) -> String {
		field.option_name(self.prefix)
	}
}
impl Default for CredentialsConfig {
	fn default() -> Self {
		CredentialsConfigBuilder::new(DEFAULT_AUTH_METHOD).build()
	}
}

/// Builder for [`CredentialsConfig`] values.
#[derive(Debug)]
pub struct CredentialsConfigBuilder {
	config: CredentialsConfig,
}
impl CredentialsConfigBuilder {
	/// Creates a new builder seeded with the method literal and the documented defaults.
	pub fn new(auth_method: impl Into<String>) -> Self {
		Self {
			config: CredentialsConfig {
				auth_method: auth_method.into(),
				access_key_id: None,
				secret_access_key: None,
				session_token: None,
				profile_file: None,
				profile_name: None,
				account_id: None,
				role_name: None,
				external_id: None,
				role_arn: None,
				role_session_name: None,
				web_identity_token_file: None,
				duration_in_seconds: DEFAULT_DURATION_IN_SECONDS,
				arn_partition: DEFAULT_ARN_PARTITION.into(),
				session_name: DEFAULT_SESSION_NAME.into(),
				prefix: OptionPrefix::None,
			},
		}
	}

	/// Sets the access key identifier.
	pub fn access_key_id(mut self, value: impl Into<String>) -> Self {
		self.config.access_key_id = Some(value.into());

		self
	}

	/// Sets the secret access key.
	pub fn secret_access_key(mut self, value: impl Into<CredentialSecret>) -> Self {
		self.config.secret_access_key = Some(value.into());

		self
	}

	/// Sets the session token.
	pub fn session_token(mut self, value: impl Into<CredentialSecret>) -> Self {
		self.config.session_token = Some(value.into());

		self
	}

	/// Sets the profile file path.
	pub fn profile_file(mut self, value: impl Into<PathBuf>) -> Self {
		self.config.profile_file = Some(value.into());

		self
	}

	/// Sets the profile name.
	pub fn profile_name(mut self, value: impl Into<String>) -> Self {
		self.config.profile_name = Some(value.into());

		self
	}

	/// Sets the account ID.
	pub fn account_id(mut self, value: impl Into<String>) -> Self {
		self.config.account_id = Some(value.into());

		self
	}

	/// Sets the role name.
	pub fn role_name(mut self, value: impl Into<String>) -> Self {
		self.config.role_name = Some(value.into());

		self
	}

	/// Sets the external ID.
	pub fn external_id(mut self, value: impl Into<String>) -> Self {
		self.config.external_id = Some(value.into());

		self
	}

	/// Sets the full role ARN.
	pub fn role_arn(mut self, value: impl Into<String>) -> Self {
		self.config.role_arn = Some(value.into());

		self
	}

	/// Sets the web-identity role session name.
	pub fn role_session_name(mut self, value: impl Into<String>) -> Self {
		self.config.role_session_name = Some(value.into());

		self
	}

	/// Sets the web identity token file.
	pub fn web_identity_token_file(mut self, value: impl Into<PathBuf>) -> Self {
		self.config.web_identity_token_file = Some(value.into());

		self
	}

	/// Overrides the STS session duration.
	pub fn duration_in_seconds(mut self, value: u32) -> Self {
		self.config.duration_in_seconds = value;

		self
	}

	/// Overrides the ARN partition.
	pub fn arn_partition(mut self, value: impl Into<String>) -> Self {
		self.config.arn_partition = value.into();

		self
	}

	/// Overrides the assume-role session name.
	pub fn session_name(mut self, value: impl Into<String>) -> Self {
		self.config.session_name = value.into();

		self
	}

	/// Overrides the key prefix used to name options in errors.
	pub fn prefix(mut self, prefix: OptionPrefix) -> Self {
		self.config.prefix = prefix;

		self
	}

	/// Consumes the builder.
	pub fn build(self) -> CredentialsConfig {
		self.config
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn absent_keys_take_documented_defaults() {
		let config = CredentialsConfig::from_json_str("{}", OptionPrefix::None)
			.expect("An empty document should load with defaults.");

		assert_eq!(config, CredentialsConfig::default());
		assert_eq!(config.auth_method, "basic");
		assert_eq!(config.duration_in_seconds, 3_600);
		assert_eq!(config.arn_partition, "aws");
		assert_eq!(config.session_name, "embulk");
		assert!(config.present_fields().is_empty());
	}

	#[test]
	fn deprecated_aliases_resolve_to_canonical_fields() {
		let config = CredentialsConfig::from_json_str(
			r#"{
				"auth_method": "assume_role",
				"aws_account_id": "123456789012",
				"role_name": "exampleRole",
				"external_id": "ext",
				"duration": 900,
				"aws_partition": "aws-cn"
			}"#,
			OptionPrefix::None,
		)
		.expect("Aliased keys should load.");

		assert_eq!(config.account_id.as_deref(), Some("123456789012"));
		assert_eq!(config.duration_in_seconds, 900);
		assert_eq!(config.arn_partition, "aws-cn");
	}

	#[test]
	fn prefixed_shape_loads_and_remembers_prefix() {
		let config = CredentialsConfig::from_json_str(
			r#"{
				"aws_auth_method": "session",
				"aws_access_key_id": "AKIA",
				"aws_secret_access_key": "secret",
				"aws_session_token": "token",
				"access_key_id": "ignored",
				"bucket": "logs"
			}"#,
			OptionPrefix::Aws,
		)
		.expect("Prefixed document should load.");

		assert_eq!(config.auth_method, "session");
		assert_eq!(config.access_key_id.as_deref(), Some("AKIA"));
		assert_eq!(config.session_token.as_ref().map(CredentialSecret::expose), Some("token"));
		assert_eq!(config.prefix, OptionPrefix::Aws);
		assert_eq!(config.option_name(OptionField::SessionToken), "aws_session_token");
	}

	#[test]
	fn explicit_null_counts_as_absent() {
		let config = CredentialsConfig::from_json_str(
			r#"{ "auth_method": "env", "profile_name": null }"#,
			OptionPrefix::None,
		)
		.expect("Null optional values should load.");

		assert!(!config.is_present(OptionField::ProfileName));
	}

	#[test]
	fn parse_errors_name_the_prefixed_key() {
		let err = CredentialsConfig::from_json_str(
			r#"{ "aws_duration_in_seconds": "one hour" }"#,
			OptionPrefix::Aws,
		)
		.expect_err("A string duration should be rejected.");

		match &err {
			ConfigError::Parse { path, .. } => assert_eq!(path, "aws_duration_in_seconds"),
			other => panic!("Unexpected error: {other:?}."),
		}

		assert!(StdError::source(&err).is_some());
	}

	#[test]
	fn invalid_json_is_a_syntax_error() {
		let err = CredentialsConfig::from_json_str("{", OptionPrefix::None)
			.expect_err("Truncated JSON should be rejected.");

		assert!(matches!(err, ConfigError::Syntax { .. }));
	}

	#[test]
	fn builder_sets_fields_and_presence() {
		let config = CredentialsConfig::builder("profile")
			.profile_file("/tmp/credentials")
			.profile_name("ci")
			.prefix(OptionPrefix::Aws)
			.build();
		let present = config.present_fields();

		assert!(present.contains(OptionField::ProfileFile));
		assert!(present.contains(OptionField::ProfileName));
		assert_eq!(present.iter().count(), 2);
		assert_eq!(config.option_name(OptionField::ProfileFile), "aws_profile_file");
	}
}
