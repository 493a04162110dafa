// std
use std::{env, fs, process};
// self
use aws_credentials_resolver::{
	_preludet::*,
	config::CredentialsConfig,
	error::SourceError,
	provider::{ProviderKind, StaticOrigin},
	resolver,
	source::LocalSources,
};

const CREDENTIALS: &str = "\
[default]
aws_access_key_id = AKIADEFAULTPROFILE01
aws_secret_access_key = default-profile-secret

[profile nightly]
aws_access_key_id = ASIANIGHTLYPROFILE01
aws_secret_access_key = nightly-secret
aws_session_token = nightly-token
";

struct TempCredentials {
	dir: PathBuf,
}
impl TempCredentials {
	fn new(tag: &str) -> Self {
		let dir = env::temp_dir().join(format!(
			"aws_credentials_resolver_{tag}_{}_{}",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		));

		fs::create_dir_all(dir.join(".aws")).expect("Failed to create the temporary home.");
		fs::write(dir.join(".aws").join("credentials"), CREDENTIALS)
			.expect("Failed to write the temporary credentials file.");

		Self { dir }
	}

	fn file(&self) -> PathBuf {
		self.dir.join(".aws").join("credentials")
	}
}
impl Drop for TempCredentials {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.dir);
	}
}

#[tokio::test]
async fn explicit_file_and_named_profile() {
	let temp = TempCredentials::new("explicit");
	let config = CredentialsConfig::builder("profile")
		.profile_file(temp.file())
		.profile_name("nightly")
		.build();
	let provider = resolver::resolve(&config, &LocalSources::isolated())
		.expect("The named profile should resolve.")
		.into_provider();
	let credentials = provider.credentials().await.expect("Profile snapshots never fail.");

	assert_eq!(provider.kind(), ProviderKind::Static(StaticOrigin::Profile));
	assert_eq!(credentials.access_key_id, "ASIANIGHTLYPROFILE01");
	assert_eq!(credentials.session_token.as_ref().map(|t| t.expose()), Some("nightly-token"));
}

#[test]
fn default_location_and_default_profile() {
	let temp = TempCredentials::new("home");
	let sources = LocalSources::isolated().with_home_dir(&temp.dir);
	let provider = resolver::resolve(&CredentialsConfig::builder("profile").build(), &sources)
		.expect("The default profile should resolve from the home directory.")
		.into_provider();

	assert_eq!(
		provider.static_credentials().map(|c| c.access_key_id).as_deref(),
		Some("AKIADEFAULTPROFILE01")
	);
}

#[test]
fn shared_credentials_override_wins_over_home() {
	let temp = TempCredentials::new("override");
	let sources = LocalSources::with_environment([(
		"AWS_SHARED_CREDENTIALS_FILE",
		temp.file().display().to_string(),
	)])
	.with_home_dir("/nonexistent/home");
	let config = CredentialsConfig::builder("profile").profile_name("nightly").build();

	assert!(resolver::resolve(&config, &sources).is_ok());
}

#[test]
fn profile_file_is_read_once_at_resolution() {
	let temp = TempCredentials::new("snapshot");
	let config = CredentialsConfig::builder("profile").profile_file(temp.file()).build();
	let provider = resolver::resolve(&config, &LocalSources::isolated())
		.expect("The default profile should resolve.")
		.into_provider();

	fs::write(temp.file(), "[default]\naws_access_key_id = CHANGED\naws_secret_access_key = x\n")
		.expect("Failed to rewrite the temporary credentials file.");

	assert_eq!(
		provider.static_credentials().map(|c| c.access_key_id).as_deref(),
		Some("AKIADEFAULTPROFILE01")
	);
}

#[test]
fn missing_profile_passes_through() {
	let temp = TempCredentials::new("missing");
	let config = CredentialsConfig::builder("profile")
		.profile_file(temp.file())
		.profile_name("absent")
		.build();
	let err = resolver::resolve(&config, &LocalSources::isolated())
		.expect_err("An undeclared profile must fail.");

	assert!(matches!(
		err,
		Error::Source(SourceError::MissingProfile { ref profile, .. }) if profile == "absent"
	));
	assert!(err.to_string().contains("'absent'"));
}
