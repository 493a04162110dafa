//! Option validation against the legality table.

// self
use crate::{
	_prelude::*,
	auth::AuthMethod,
	config::{CredentialsConfig, OptionField},
	error::ConfigError,
	resolver::{MethodRules, RuleKey},
};

/// Validates `config` for `method` and returns the selected table row.
///
/// Forbidden options are checked before required ones, both in declaration order, so the first
/// reported error is deterministic.
pub fn validate(method: AuthMethod, config: &CredentialsConfig) -> Result<RuleKey, ConfigError> {
	let key = RuleKey::select(method, config);
	let rules = key.rules();

	reject_forbidden(rules, config)?;
	require_present(rules, config)?;

	Ok(key)
}

fn reject_forbidden(rules: MethodRules, config: &CredentialsConfig) -> Result<(), ConfigError> {
	let forbidden = OptionField::ALL
		.into_iter()
		.find(|field| rules.forbids(*field) && config.is_present(*field));

	match forbidden {
		Some(field) => Err(ConfigError::InvalidOption { option: config.option_name(field) }),
		None => Ok(()),
	}
}

// The first absent option is reported together with every required option declared after it.
fn require_present(rules: MethodRules, config: &CredentialsConfig) -> Result<(), ConfigError> {
	let required = rules.required.iter().collect::<Vec<_>>();

	match required.iter().position(|field| !config.is_present(*field)) {
		Some(first) => Err(ConfigError::MissingOption {
			options: required[first..].iter().map(|field| config.option_name(*field)).collect(),
		}),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::OptionPrefix;

	fn missing(err: ConfigError) -> Vec<String> {
		match err {
			ConfigError::MissingOption { options } => options,
			other => panic!("Expected a missing-option error, got {other:?}."),
		}
	}

	fn invalid(err: ConfigError) -> String {
		match err {
			ConfigError::InvalidOption { option } => option,
			other => panic!("Expected an invalid-option error, got {other:?}."),
		}
	}

	#[test]
	fn session_without_access_key_reports_all_three() {
		let config = CredentialsConfig::builder("session").build();
		let err = validate(AuthMethod::Session, &config)
			.expect_err("Session without keys must be rejected.");

		assert_eq!(missing(err), ["access_key_id", "secret_access_key", "session_token"]);
	}

	#[test]
	fn missing_list_starts_at_first_absent_option() {
		let config = CredentialsConfig::builder("session")
			.access_key_id("AKIA")
			.secret_access_key("secret")
			.build();
		let err = validate(AuthMethod::Session, &config)
			.expect_err("Session without a token must be rejected.");

		assert_eq!(missing(err), ["session_token"]);
	}

	#[test]
	fn forbidden_options_win_over_missing_ones() {
		let config = CredentialsConfig::builder("assume_role").profile_name("ci").build();
		let err = validate(AuthMethod::AssumeRole, &config)
			.expect_err("A profile name is forbidden for assume_role.");

		assert_eq!(invalid(err), "profile_name");
	}

	#[test]
	fn first_forbidden_option_in_declaration_order_is_reported() {
		let config = CredentialsConfig::builder("env")
			.role_name("exampleRole")
			.session_token("token")
			.prefix(OptionPrefix::Aws)
			.build();
		let err = validate(AuthMethod::Env, &config).expect_err("Env accepts no options.");

		assert_eq!(invalid(err), "aws_session_token");
	}

	#[test]
	fn basic_with_one_key_is_not_the_fallback() {
		let config = CredentialsConfig::builder("basic").secret_access_key("secret").build();
		let err = validate(AuthMethod::Basic, &config)
			.expect_err("Basic with only a secret key must be rejected.");

		assert_eq!(missing(err), ["access_key_id", "secret_access_key"]);
	}

	#[test]
	fn legacy_fallback_still_rejects_forbidden_options() {
		let keyless = CredentialsConfig::builder("basic").build();

		assert_eq!(validate(AuthMethod::Basic, &keyless).ok(), Some(RuleKey::LegacyAnonymous));

		let with_account = CredentialsConfig::builder("basic").account_id("123456789012").build();
		let err = validate(AuthMethod::Basic, &with_account)
			.expect_err("The fallback path still forbids account options.");

		assert_eq!(invalid(err), "account_id");
	}

	#[test]
	fn profile_accepts_file_and_name() {
		let config = CredentialsConfig::builder("profile")
			.profile_file("/tmp/credentials")
			.profile_name("ci")
			.build();

		assert_eq!(
			validate(AuthMethod::Profile, &config).ok(),
			Some(RuleKey::Method(AuthMethod::Profile))
		);
	}

	#[test]
	fn web_identity_session_name_is_optional() {
		let config = CredentialsConfig::builder("web_identity_token")
			.role_arn("arn:aws:iam::123456789012:role/web")
			.web_identity_token_file("/var/run/token")
			.build();

		assert!(validate(AuthMethod::WebIdentityToken, &config).is_ok());

		let named = CredentialsConfig::builder("web_identity_token")
			.role_arn("arn:aws:iam::123456789012:role/web")
			.web_identity_token_file("/var/run/token")
			.role_session_name("pipeline")
			.build();

		assert!(validate(AuthMethod::WebIdentityToken, &named).is_ok());
	}
}
