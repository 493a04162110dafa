//! Credential sources: the collaborator the resolver reads snapshots from and obtains live
//! delegates from.
//!
//! [`LocalSources`] covers everything that can be done in-process (environment variables,
//! system properties, shared-credentials profile files). `AwsSdkSources` (feature `aws-sdk`)
//! reads the environment and profile files through `aws-config` and adds the live delegates.

#[cfg(feature = "aws-sdk")] pub mod aws;
pub mod local;
pub mod profile;

#[cfg(feature = "aws-sdk")] pub use aws::*;
pub use local::*;
pub use profile::ProfileFile;

// self
use crate::{
	_prelude::*,
	error::SourceError,
	provider::{AssumeRoleRequest, LiveCredentials, ProfileLocation, Snapshot, WebIdentityRequest},
};

/// Collaborator contract implemented by credential sources.
///
/// Snapshot methods are called once per resolution and either read right away or hand back a
/// [`Snapshot::Deferred`] read that happens once, on first use. Live methods return delegates
/// whose network calls, caching, and retries belong to the implementation.
pub trait CredentialSources
where
	Self: Send + Sync,
{
	/// Reads credentials from environment variables.
	fn environment(&self) -> Result<Snapshot, SourceError>;

	/// Reads credentials from system properties.
	fn system_properties(&self) -> Result<Snapshot, SourceError>;

	/// Shared-credentials file used when the configuration names none.
	fn default_profile_location(&self) -> Result<PathBuf, SourceError>;

	/// Reads the named profile from a profile file.
	fn profile(&self, location: &ProfileLocation, name: &str) -> Result<Snapshot, SourceError>;

	/// Instance-metadata delegate.
	fn instance_metadata(&self) -> Result<Arc<dyn LiveCredentials>, SourceError>;

	/// STS assume-role delegate.
	fn assume_role(&self, request: &AssumeRoleRequest)
	-> Result<Arc<dyn LiveCredentials>, SourceError>;

	/// STS web-identity-token delegate.
	fn web_identity(
		&self,
		request: &WebIdentityRequest,
	) -> Result<Arc<dyn LiveCredentials>, SourceError>;

	/// Default provider chain delegate (environment, system properties, profile file, then
	/// instance metadata).
	fn default_chain(&self) -> Result<Arc<dyn LiveCredentials>, SourceError>;
}
