//! Credential sources backed by `aws-config`.
//!
//! Environment and profile-file snapshots are read by the SDK's own providers on first use and
//! held afterwards. Live delegates whose builders are async are constructed on first use, so
//! resolution itself stays synchronous. Caching and retries stay with the SDK.

// std
use std::time::SystemTime;
// crates.io
use async_lock::OnceCell;
#[allow(deprecated)]
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::{
	default_provider::credentials::DefaultCredentialsChain,
	environment::EnvironmentVariableCredentialsProvider,
	imds::credentials::ImdsCredentialsProvider,
	profile::ProfileFileCredentialsProvider,
	sts::AssumeRoleProvider,
	web_identity_token::{StaticConfiguration, WebIdentityTokenCredentialsProvider},
};
use aws_credential_types::{
	Credentials as SdkCredentials,
	provider::{
		ProvideCredentials, SharedCredentialsProvider, error::CredentialsError, future,
	},
};
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::SourceError,
	provider::{
		AssumeRoleRequest, CredentialsProvider, DeferredRead, LiveCredentials, ProfileLocation,
		ProviderFuture, Snapshot, WebIdentityRequest,
	},
	source::{CredentialSources, LocalSources},
};

const PROVIDER_NAME: &str = "aws-credentials-resolver";

/// Credential sources whose snapshots and live delegates are AWS SDK providers.
///
/// System properties have no SDK counterpart and are read through an inner [`LocalSources`],
/// which also answers [`default_profile_location`](CredentialSources::default_profile_location).
#[derive(Clone, Debug, Default)]
pub struct AwsSdkSources {
	local: LocalSources,
}
impl AwsSdkSources {
	/// Sources over the process environment and the user's home directory.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sources reading system properties through `local`.
	pub fn with_local(local: LocalSources) -> Self {
		Self { local }
	}

	/// Inner local sources.
	pub fn local(&self) -> &LocalSources {
		&self.local
	}
}
impl CredentialSources for AwsSdkSources {
	fn environment(&self) -> Result<Snapshot, SourceError> {
		Ok(SdkSnapshot::deferred(EnvironmentVariableCredentialsProvider::new()))
	}

	fn system_properties(&self) -> Result<Snapshot, SourceError> {
		self.local.system_properties()
	}

	fn default_profile_location(&self) -> Result<PathBuf, SourceError> {
		self.local.default_profile_location()
	}

	// Without an explicit file the SDK resolves its own default locations, honoring
	// `AWS_SHARED_CREDENTIALS_FILE` and `AWS_CONFIG_FILE`.
	#[allow(deprecated)]
	fn profile(&self, location: &ProfileLocation, name: &str) -> Result<Snapshot, SourceError> {
		let builder = ProfileFileCredentialsProvider::builder().profile_name(name);
		let builder = match location {
			ProfileLocation::Explicit(path) => builder.profile_files(
				ProfileFiles::builder().with_file(ProfileFileKind::Credentials, path.clone()).build(),
			),
			ProfileLocation::SourceDefault => builder,
		};

		Ok(SdkSnapshot::deferred(builder.build()))
	}

	fn instance_metadata(&self) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Ok(Arc::new(SdkDelegate::new(Recipe::InstanceMetadata)))
	}

	fn assume_role(
		&self,
		request: &AssumeRoleRequest,
	) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Ok(Arc::new(SdkDelegate::new(Recipe::AssumeRole(request.clone()))))
	}

	fn web_identity(
		&self,
		request: &WebIdentityRequest,
	) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Ok(Arc::new(SdkDelegate::new(Recipe::WebIdentity(request.clone()))))
	}

	fn default_chain(&self) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Ok(Arc::new(SdkDelegate::new(Recipe::DefaultChain)))
	}
}

// Reads through the SDK provider once; failures are not cached, so a later call retries.
struct SdkSnapshot {
	provider: SharedCredentialsProvider,
	value: OnceCell<Credentials>,
}
impl SdkSnapshot {
	fn deferred(provider: impl 'static + ProvideCredentials) -> Snapshot {
		Snapshot::Deferred(DeferredRead::new(Self {
			provider: SharedCredentialsProvider::new(provider),
			value: OnceCell::new(),
		}))
	}
}
impl LiveCredentials for SdkSnapshot {
	fn fetch(&self) -> ProviderFuture<'_, Credentials> {
		Box::pin(async move {
			let credentials = self
				.value
				.get_or_try_init(|| async {
					let credentials = self
						.provider
						.provide_credentials()
						.await
						.map_err(SourceError::provider)?;

					Ok::<_, SourceError>(Credentials::from(&credentials))
				})
				.await?;

			Ok(credentials.clone())
		})
	}
}

#[derive(Clone, Debug)]
enum Recipe {
	InstanceMetadata,
	AssumeRole(AssumeRoleRequest),
	WebIdentity(WebIdentityRequest),
	DefaultChain,
}
impl Recipe {
	async fn build(&self) -> SharedCredentialsProvider {
		match self {
			Self::InstanceMetadata =>
				SharedCredentialsProvider::new(ImdsCredentialsProvider::builder().build()),
			Self::AssumeRole(request) => SharedCredentialsProvider::new(
				AssumeRoleProvider::builder(request.role_arn.clone())
					.session_name(request.session_name.clone())
					.external_id(request.external_id.clone())
					.session_length(request.session_length())
					.build()
					.await,
			),
			Self::WebIdentity(request) => SharedCredentialsProvider::new(
				WebIdentityTokenCredentialsProvider::builder()
					.static_configuration(StaticConfiguration {
						web_identity_token_file: request.token_file.clone(),
						role_arn: request.role_arn.clone(),
						session_name: request.role_session_name.clone(),
					})
					.build(),
			),
			Self::DefaultChain =>
				SharedCredentialsProvider::new(DefaultCredentialsChain::builder().build().await),
		}
	}
}

// `refresh` is the trait's no-op; the SDK providers have no refresh hook. The next `fetch` asks
// the provider again, a full round trip for STS and IMDS.
struct SdkDelegate {
	recipe: Recipe,
	provider: OnceCell<SharedCredentialsProvider>,
}
impl SdkDelegate {
	fn new(recipe: Recipe) -> Self {
		Self { recipe, provider: OnceCell::new() }
	}

	async fn provider(&self) -> &SharedCredentialsProvider {
		self.provider.get_or_init(|| self.recipe.build()).await
	}
}
impl LiveCredentials for SdkDelegate {
	fn fetch(&self) -> ProviderFuture<'_, Credentials> {
		Box::pin(async move {
			let credentials =
				self.provider().await.provide_credentials().await.map_err(SourceError::provider)?;

			Ok(Credentials::from(&credentials))
		})
	}
}
impl Debug for SdkDelegate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SdkDelegate")
			.field("recipe", &self.recipe)
			.field("initialized", &self.provider.is_initialized())
			.finish()
	}
}

impl From<&SdkCredentials> for Credentials {
	fn from(credentials: &SdkCredentials) -> Self {
		let mut converted =
			Credentials::new(credentials.access_key_id(), credentials.secret_access_key());

		if let Some(token) = credentials.session_token() {
			converted = converted.with_session_token(token);
		}
		if let Some(expiry) = credentials.expiry() {
			converted = converted.with_expiry(OffsetDateTime::from(expiry));
		}

		converted
	}
}
impl From<&Credentials> for SdkCredentials {
	fn from(credentials: &Credentials) -> Self {
		SdkCredentials::new(
			&credentials.access_key_id,
			credentials.secret_access_key.expose(),
			credentials.session_token.as_ref().map(|token| token.expose().to_owned()),
			credentials.expires_at.map(SystemTime::from),
			PROVIDER_NAME,
		)
	}
}

/// Lets a resolved provider be handed to SDK client builders.
///
/// The anonymous variant reports [`CredentialsError::CredentialsNotLoaded`] instead of signing
/// with empty keys; hosts wanting unsigned requests should configure the client for anonymous
/// access.
impl ProvideCredentials for CredentialsProvider {
	fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
	where
		Self: 'a,
	{
		if matches!(self, Self::Anonymous) {
			return future::ProvideCredentials::ready(Err(CredentialsError::not_loaded(
				"anonymous credentials carry no key material to sign with",
			)));
		}

		future::ProvideCredentials::new(async move {
			self.credentials()
				.await
				.map(|credentials| SdkCredentials::from(&credentials))
				.map_err(CredentialsError::provider_error)
		})
	}
}
