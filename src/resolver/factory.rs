//! Provider construction for validated configurations.

// self
use crate::{
	_prelude::*,
	auth::{AuthMethod, Credentials},
	config::{CredentialsConfig, DEFAULT_PROFILE_NAME, OptionField},
	error::ConfigError,
	provider::{
		self, AssumeRoleRequest, CredentialsProvider, Delegate, DelegateKind, ProfileLocation,
		Snapshot, StaticOrigin, WebIdentityRequest,
	},
	resolver::RuleKey,
	source::CredentialSources,
};

/// Builds the provider for a row returned by [`validate`](fn@crate::resolver::validate).
///
/// Snapshot sources (environment, system properties, profile file) are asked exactly once here;
/// a deferred read becomes [`CredentialsProvider::Deferred`]. Errors from `sources` are returned
/// unmodified.
pub fn build(
	key: RuleKey,
	config: &CredentialsConfig,
	sources: &dyn CredentialSources,
) -> Result<CredentialsProvider> {
	let method = match key {
		RuleKey::LegacyAnonymous => return Ok(CredentialsProvider::Anonymous),
		RuleKey::Method(method) => method,
	};
	let provider = match method {
		AuthMethod::Basic => {
			let access_key_id = require(config, OptionField::AccessKeyId, &config.access_key_id)?;
			let secret_access_key =
				require(config, OptionField::SecretAccessKey, &config.secret_access_key)?;

			CredentialsProvider::Static {
				origin: StaticOrigin::Basic,
				credentials: Credentials::new(access_key_id.clone(), secret_access_key.clone()),
			}
		},
		AuthMethod::Env => snapshot(StaticOrigin::Environment, sources.environment()?),
		AuthMethod::Instance =>
			delegate(DelegateKind::InstanceMetadata, sources.instance_metadata()?),
		AuthMethod::Profile => {
			let location = match &config.profile_file {
				Some(path) => ProfileLocation::Explicit(path.clone()),
				None => ProfileLocation::SourceDefault,
			};
			let name = config.profile_name.as_deref().unwrap_or(DEFAULT_PROFILE_NAME);

			snapshot(StaticOrigin::Profile, sources.profile(&location, name)?)
		},
		AuthMethod::Properties =>
			snapshot(StaticOrigin::SystemProperties, sources.system_properties()?),
		AuthMethod::Anonymous => CredentialsProvider::Anonymous,
		AuthMethod::Session => {
			let access_key_id = require(config, OptionField::AccessKeyId, &config.access_key_id)?;
			let secret_access_key =
				require(config, OptionField::SecretAccessKey, &config.secret_access_key)?;
			let session_token = require(config, OptionField::SessionToken, &config.session_token)?;

			CredentialsProvider::Session(Credentials::session(
				access_key_id.clone(),
				secret_access_key.clone(),
				session_token.clone(),
			))
		},
		AuthMethod::AssumeRole => {
			let account_id = require(config, OptionField::AccountId, &config.account_id)?;
			let role_name = require(config, OptionField::RoleName, &config.role_name)?;
			let external_id = require(config, OptionField::ExternalId, &config.external_id)?;
			let request = AssumeRoleRequest {
				role_arn: provider::role_arn(&config.arn_partition, account_id, role_name),
				session_name: config.session_name.clone(),
				external_id: external_id.clone(),
				duration_seconds: config.duration_in_seconds,
			};

			delegate(DelegateKind::AssumeRole, sources.assume_role(&request)?)
		},
		AuthMethod::WebIdentityToken => {
			let role_arn = require(config, OptionField::RoleArn, &config.role_arn)?;
			let token_file =
				require(config, OptionField::WebIdentityTokenFile, &config.web_identity_token_file)?;
			let request = WebIdentityRequest {
				role_arn: role_arn.clone(),
				role_session_name: config
					.role_session_name
					.clone()
					.unwrap_or_else(|| config.session_name.clone()),
				token_file: token_file.clone(),
			};

			delegate(DelegateKind::WebIdentityToken, sources.web_identity(&request)?)
		},
		AuthMethod::Default => delegate(DelegateKind::DefaultChain, sources.default_chain()?),
	};

	Ok(provider)
}

fn snapshot(origin: StaticOrigin, snapshot: Snapshot) -> CredentialsProvider {
	match snapshot {
		Snapshot::Ready(credentials) => CredentialsProvider::Static { origin, credentials },
		Snapshot::Deferred(read) => CredentialsProvider::Deferred { origin, read },
	}
}

fn delegate(kind: DelegateKind, inner: Arc<dyn provider::LiveCredentials>) -> CredentialsProvider {
	CredentialsProvider::Delegate(Delegate::from_shared(kind, inner))
}

// Validation guarantees presence; this keeps the factory total without panicking.
fn require<'a, T>(
	config: &CredentialsConfig,
	field: OptionField,
	value: &'a Option<T>,
) -> Result<&'a T, ConfigError> {
	value
		.as_ref()
		.ok_or_else(|| ConfigError::MissingOption { options: vec![config.option_name(field)] })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::FakeSources, error::SourceError, source::LocalSources};

	#[test]
	fn legacy_row_builds_anonymous_without_touching_sources() {
		let config = CredentialsConfig::builder("basic").build();
		let provider = build(RuleKey::LegacyAnonymous, &config, &LocalSources::isolated())
			.expect("The legacy row should always build.");

		assert!(matches!(provider, CredentialsProvider::Anonymous));
	}

	#[test]
	fn assume_role_request_carries_arn_and_session_settings() {
		let sources = FakeSources::new(Credentials::new("AKIALIVE", "live"));
		let config = CredentialsConfig::builder("assume_role")
			.account_id("123456789012")
			.role_name("exampleRole")
			.external_id("ext-1")
			.duration_in_seconds(900)
			.build();
		let provider = build(RuleKey::Method(AuthMethod::AssumeRole), &config, &sources)
			.expect("Assume-role should build against the fake.");
		let request = sources.last_assume_role().expect("The fake should record the request.");

		assert!(provider.is_live());
		assert_eq!(request.role_arn, "arn:aws:iam::123456789012:role/exampleRole");
		assert_eq!(request.session_name, "embulk");
		assert_eq!(request.external_id, "ext-1");
		assert_eq!(request.duration_seconds, 900);
	}

	#[test]
	fn web_identity_session_name_defaults_to_session_name() {
		let sources = FakeSources::new(Credentials::new("AKIALIVE", "live"));
		let config = CredentialsConfig::builder("web_identity_token")
			.role_arn("arn:aws:iam::123456789012:role/web")
			.web_identity_token_file("/var/run/token")
			.session_name("nightly")
			.build();

		build(RuleKey::Method(AuthMethod::WebIdentityToken), &config, &sources)
			.expect("Web identity should build against the fake.");

		let request = sources.last_web_identity().expect("The fake should record the request.");

		assert_eq!(request.role_session_name, "nightly");
		assert_eq!(request.token_file, PathBuf::from("/var/run/token"));
	}

	#[tokio::test]
	async fn deferred_snapshots_keep_their_origin() {
		let sources = FakeSources::new(Credentials::new("AKIALIVE", "live")).deferring_snapshots();
		let config = CredentialsConfig::builder("env").build();
		let provider = build(RuleKey::Method(AuthMethod::Env), &config, &sources)
			.expect("Env should build against the fake.");

		assert!(matches!(
			provider,
			CredentialsProvider::Deferred { origin: StaticOrigin::Environment, .. }
		));
		assert!(!provider.is_live());

		let credentials = provider.credentials().await.expect("The deferred read should succeed.");

		assert_eq!(credentials.access_key_id, crate::_preludet::ENV_ACCESS_KEY_ID);
	}

	#[test]
	fn source_errors_pass_through() {
		let config = CredentialsConfig::builder("instance").build();
		let err = build(
			RuleKey::Method(AuthMethod::Instance),
			&config,
			&LocalSources::isolated(),
		)
		.expect_err("Local sources cannot build instance-metadata delegates.");

		assert!(matches!(
			err,
			Error::Source(SourceError::Unsupported { delegate: "instance metadata" })
		));
	}
}
