//! Live delegate contract wrapping credential providers owned by an external SDK.

// self
use crate::{_prelude::*, auth::Credentials, error::SourceError};

/// Boxed future returned by provider operations.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + 'a + Send>>;

/// Credential provider whose state (network calls, caching, retries) is owned by a collaborator.
///
/// The resolver never caches or retries on behalf of an implementation; `refresh` is forwarded
/// as-is and defaults to a no-op.
pub trait LiveCredentials
where
	Self: Send + Sync,
{
	/// Obtains current credentials from the collaborator.
	fn fetch(&self) -> ProviderFuture<'_, Credentials>;

	/// Asks the collaborator to refresh whatever it holds.
	fn refresh(&self) -> ProviderFuture<'_, ()> {
		Box::pin(async { Ok(()) })
	}
}

/// Live delegate kinds the resolver can hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DelegateKind {
	/// Instance-metadata credentials.
	InstanceMetadata,
	/// STS assume-role session credentials.
	AssumeRole,
	/// STS web-identity-token credentials.
	WebIdentityToken,
	/// SDK default provider chain.
	DefaultChain,
}
impl DelegateKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::InstanceMetadata => "instance_metadata",
			Self::AssumeRole => "assume_role",
			Self::WebIdentityToken => "web_identity_token",
			Self::DefaultChain => "default_chain",
		}
	}
}
impl Display for DelegateKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Shared handle to a live delegate tagged with its kind.
#[derive(Clone)]
pub struct Delegate {
	kind: DelegateKind,
	inner: Arc<dyn LiveCredentials>,
}
impl Delegate {
	/// Wraps an already shared delegate implementation.
	pub fn from_shared(kind: DelegateKind, inner: Arc<dyn LiveCredentials>) -> Self {
		Self { kind, inner }
	}

	/// Kind of collaborator behind the handle.
	pub fn kind(&self) -> DelegateKind {
		self.kind
	}

	/// Forwards to [`LiveCredentials::fetch`].
	pub fn fetch(&self) -> ProviderFuture<'_, Credentials> {
		self.inner.fetch()
	}

	/// Forwards to [`LiveCredentials::refresh`].
	pub fn refresh(&self) -> ProviderFuture<'_, ()> {
		self.inner.refresh()
	}
}
impl Debug for Delegate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Delegate").field("kind", &self.kind).finish_non_exhaustive()
	}
}
