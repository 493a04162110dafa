//! Uniform credentials capability returned by the resolver.
//!
//! [`CredentialsProvider`] is a tagged union over locally held credentials (static key pairs,
//! session credentials, snapshots read once from the environment, system properties, or a
//! profile file, and the anonymous sentinel) and live delegates whose state is owned by an
//! external collaborator. Every variant answers the same two operations: `credentials` and
//! `refresh`. `refresh` is a guaranteed no-op for every variant except [`Delegate`].

pub mod delegate;
pub mod request;
pub mod snapshot;

pub use delegate::*;
pub use request::*;
pub use snapshot::*;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	obs::{ResolveSpan, ResolveStage},
};

/// Where a static credential value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaticOrigin {
	/// Key pair given in the configuration (`basic`).
	Basic,
	/// Environment variables read once (`env`).
	Environment,
	/// Profile file read once (`profile`).
	Profile,
	/// System properties read once (`properties`).
	SystemProperties,
}
impl StaticOrigin {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Basic => "basic",
			Self::Environment => "environment",
			Self::Profile => "profile",
			Self::SystemProperties => "system_properties",
		}
	}
}

/// Provider variant label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
	/// Locally held key pair.
	Static(StaticOrigin),
	/// Locally held session credentials.
	Session,
	/// Anonymous sentinel.
	Anonymous,
	/// Live delegate.
	Delegate(DelegateKind),
}
impl ProviderKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Static(origin) => origin.as_str(),
			Self::Session => "session",
			Self::Anonymous => "anonymous",
			Self::Delegate(kind) => kind.as_str(),
		}
	}
}
impl Display for ProviderKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Credentials capability produced by the resolver.
#[derive(Clone, Debug)]
pub enum CredentialsProvider {
	/// Immutable key pair (possibly carrying a session token from a snapshot source).
	Static {
		/// Source of the value.
		origin: StaticOrigin,
		/// Held credentials.
		credentials: Credentials,
	},
	/// Snapshot an external collaborator reads on the first `credentials` call and holds.
	Deferred {
		/// Source of the value.
		origin: StaticOrigin,
		/// Pending read.
		read: DeferredRead,
	},
	/// Immutable session credentials given in the configuration.
	Session(Credentials),
	/// Anonymous sentinel credentials.
	Anonymous,
	/// Live delegate owned by an external collaborator.
	Delegate(Delegate),
}
impl CredentialsProvider {
	/// Returns the variant label.
	pub fn kind(&self) -> ProviderKind {
		match self {
			Self::Static { origin, .. } | Self::Deferred { origin, .. } =>
				ProviderKind::Static(*origin),
			Self::Session(_) => ProviderKind::Session,
			Self::Anonymous => ProviderKind::Anonymous,
			Self::Delegate(delegate) => ProviderKind::Delegate(delegate.kind()),
		}
	}

	/// Returns true when credentials come from a live delegate.
	pub fn is_live(&self) -> bool {
		matches!(self, Self::Delegate(_))
	}

	/// Returns the value already in hand; `None` for live delegates and deferred snapshots.
	pub fn static_credentials(&self) -> Option<Credentials> {
		match self {
			Self::Static { credentials, .. } | Self::Session(credentials) =>
				Some(credentials.clone()),
			Self::Anonymous => Some(Credentials::anonymous()),
			Self::Deferred { .. } | Self::Delegate(_) => None,
		}
	}

	/// Yields credentials; live delegates are asked every time.
	pub fn credentials(&self) -> ProviderFuture<'_, Credentials> {
		match self {
			Self::Delegate(delegate) => {
				let span =
					ResolveSpan::new(delegate.kind().as_str(), ResolveStage::DelegateFetch);

				Box::pin(span.instrument(delegate.fetch()))
			},
			Self::Deferred { read, .. } => read.fetch(),
			_ => {
				let held = self.static_credentials().unwrap_or_else(Credentials::anonymous);

				Box::pin(async move { Ok(held) })
			},
		}
	}

	/// Refreshes live delegates; a no-op for every other variant, deferred snapshots included.
	pub fn refresh(&self) -> ProviderFuture<'_, ()> {
		match self {
			Self::Delegate(delegate) => {
				let span =
					ResolveSpan::new(delegate.kind().as_str(), ResolveStage::DelegateRefresh);

				Box::pin(span.instrument(delegate.refresh()))
			},
			_ => Box::pin(async { Ok(()) }),
		}
	}
}
