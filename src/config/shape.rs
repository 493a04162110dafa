//! Serde shape shared by the unprefixed and `aws_`-prefixed key sets.
//!
//! The prefixed shape is normalized by stripping `aws_` from its keys before deserialization, so
//! both shapes resolve through the same struct. Deprecated key aliases live here and nowhere else:
//!
//! - `duration` → `duration_in_seconds`
//! - `aws_partition` → `arn_partition`
//! - `aws_account_id` → `account_id`

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::CredentialSecret,
	config::{
		CredentialsConfig, DEFAULT_ARN_PARTITION, DEFAULT_AUTH_METHOD,
		DEFAULT_DURATION_IN_SECONDS, DEFAULT_SESSION_NAME, OptionPrefix,
	},
};

#[derive(Debug, Deserialize)]
pub(crate) struct ConfigShape {
	#[serde(default = "default_auth_method")]
	auth_method: String,
	#[serde(default)]
	access_key_id: Option<String>,
	#[serde(default)]
	secret_access_key: Option<CredentialSecret>,
	#[serde(default)]
	session_token: Option<CredentialSecret>,
	#[serde(default)]
	profile_file: Option<PathBuf>,
	#[serde(default)]
	profile_name: Option<String>,
	#[serde(default, alias = "aws_account_id")]
	account_id: Option<String>,
	#[serde(default)]
	role_name: Option<String>,
	#[serde(default)]
	external_id: Option<String>,
	#[serde(default)]
	role_arn: Option<String>,
	#[serde(default)]
	role_session_name: Option<String>,
	#[serde(default)]
	web_identity_token_file: Option<PathBuf>,
	#[serde(default = "default_duration_in_seconds", alias = "duration")]
	duration_in_seconds: u32,
	#[serde(default = "default_arn_partition", alias = "aws_partition")]
	arn_partition: String,
	#[serde(default = "default_session_name")]
	session_name: String,
}
impl ConfigShape {
	pub(crate) fn into_config(self, prefix: OptionPrefix) -> CredentialsConfig {
		CredentialsConfig {
			auth_method: self.auth_method,
			access_key_id: self.access_key_id,
			secret_access_key: self.secret_access_key,
			session_token: self.session_token,
			profile_file: self.profile_file,
			profile_name: self.profile_name,
			account_id: self.account_id,
			role_name: self.role_name,
			external_id: self.external_id,
			role_arn: self.role_arn,
			role_session_name: self.role_session_name,
			web_identity_token_file: self.web_identity_token_file,
			duration_in_seconds: self.duration_in_seconds,
			arn_partition: self.arn_partition,
			session_name: self.session_name,
			prefix,
		}
	}
}

/// Keeps only keys carrying the prefix and strips it; other keys belong to the host namespace.
pub(crate) fn strip_prefix(value: Value, prefix: OptionPrefix) -> Value {
	match (prefix, value) {
		(OptionPrefix::None, value) => value,
		(OptionPrefix::Aws, Value::Object(map)) => {
			let stripped = map
				.into_iter()
				.filter_map(|(key, value)| {
					key.strip_prefix(prefix.as_str()).map(|rest| (rest.to_owned(), value))
				})
				.collect::<Map<_, _>>();

			Value::Object(stripped)
		},
		(OptionPrefix::Aws, value) => value,
	}
}

fn default_auth_method() -> String {
	DEFAULT_AUTH_METHOD.into()
}

fn default_duration_in_seconds() -> u32 {
	DEFAULT_DURATION_IN_SECONDS
}

fn default_arn_partition() -> String {
	DEFAULT_ARN_PARTITION.into()
}

fn default_session_name() -> String {
	DEFAULT_SESSION_NAME.into()
}
