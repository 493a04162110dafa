//! Resolve declarative AWS credential settings into one credentials provider with strict
//! per-method option validation and optional AWS SDK wiring.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod obs;
pub mod provider;
pub mod resolver;
pub mod source;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fakes for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use crate::{
		auth::Credentials,
		error::SourceError,
		provider::{
			AssumeRoleRequest, DeferredRead, LiveCredentials, ProfileLocation, ProviderFuture,
			Snapshot, WebIdentityRequest,
		},
		source::{CredentialSources, LocalSources, SystemProperties},
	};

	/// Access key returned by [`fixture_sources`] for the `env` method.
	pub const ENV_ACCESS_KEY_ID: &str = "AKIAENVIRONMENT00001";
	/// Secret key returned by [`fixture_sources`] for the `env` method.
	pub const ENV_SECRET_ACCESS_KEY: &str = "env-secret";
	/// Access key returned by [`fixture_sources`] for the `properties` method.
	pub const PROPERTY_ACCESS_KEY_ID: &str = "AKIAPROPERTIES000001";
	/// Secret key returned by [`fixture_sources`] for the `properties` method.
	pub const PROPERTY_SECRET_ACCESS_KEY: &str = "property-secret";

	/// Builds hermetic [`LocalSources`] with fixed environment variables and system properties.
	pub fn fixture_sources() -> LocalSources {
		let properties = SystemProperties::from_iter([
			("aws.accessKeyId", PROPERTY_ACCESS_KEY_ID),
			("aws.secretKey", PROPERTY_SECRET_ACCESS_KEY),
		]);

		LocalSources::with_environment([
			("AWS_ACCESS_KEY_ID", ENV_ACCESS_KEY_ID),
			("AWS_SECRET_ACCESS_KEY", ENV_SECRET_ACCESS_KEY),
		])
		.with_properties(properties)
	}

	/// Live delegate fake that counts calls and returns fixed credentials.
	#[derive(Debug)]
	pub struct RecordingDelegate {
		credentials: Credentials,
		fetches: AtomicUsize,
		refreshes: AtomicUsize,
	}
	impl RecordingDelegate {
		/// Creates a delegate that always yields the provided credentials.
		pub fn new(credentials: Credentials) -> Self {
			Self { credentials, fetches: AtomicUsize::new(0), refreshes: AtomicUsize::new(0) }
		}

		/// Number of `fetch` calls observed so far.
		pub fn fetches(&self) -> usize {
			self.fetches.load(Ordering::SeqCst)
		}

		/// Number of `refresh` calls observed so far.
		pub fn refreshes(&self) -> usize {
			self.refreshes.load(Ordering::SeqCst)
		}
	}
	impl LiveCredentials for RecordingDelegate {
		fn fetch(&self) -> ProviderFuture<'_, Credentials> {
			Box::pin(async move {
				self.fetches.fetch_add(1, Ordering::SeqCst);

				Ok(self.credentials.clone())
			})
		}

		fn refresh(&self) -> ProviderFuture<'_, ()> {
			Box::pin(async move {
				self.refreshes.fetch_add(1, Ordering::SeqCst);

				Ok(())
			})
		}
	}

	/// Collaborator fake that serves local snapshots from [`fixture_sources`] and hands out
	/// [`RecordingDelegate`]s for every live delegate, remembering the last STS requests.
	#[derive(Debug)]
	pub struct FakeSources {
		local: LocalSources,
		defer_snapshots: bool,
		delegate: Arc<RecordingDelegate>,
		assume_role: Mutex<Option<AssumeRoleRequest>>,
		web_identity: Mutex<Option<WebIdentityRequest>>,
	}
	impl FakeSources {
		/// Creates a fake whose live delegates yield the provided credentials.
		pub fn new(live: Credentials) -> Self {
			Self::with_local(fixture_sources(), live)
		}

		/// Creates a fake backed by custom local sources.
		pub fn with_local(local: LocalSources, live: Credentials) -> Self {
			Self {
				local,
				defer_snapshots: false,
				delegate: Arc::new(RecordingDelegate::new(live)),
				assume_role: Mutex::new(None),
				web_identity: Mutex::new(None),
			}
		}

		/// Hands snapshots back as [`Snapshot::Deferred`] reads, the way SDK-backed sources do.
		pub fn deferring_snapshots(mut self) -> Self {
			self.defer_snapshots = true;

			self
		}

		/// Shared delegate handed out for live methods.
		pub fn delegate(&self) -> Arc<RecordingDelegate> {
			self.delegate.clone()
		}

		/// Last assume-role request received, if any.
		pub fn last_assume_role(&self) -> Option<AssumeRoleRequest> {
			self.assume_role.lock().clone()
		}

		/// Last web-identity request received, if any.
		pub fn last_web_identity(&self) -> Option<WebIdentityRequest> {
			self.web_identity.lock().clone()
		}

		fn snapshot(&self, read: Result<Credentials, SourceError>) -> Result<Snapshot, SourceError> {
			let credentials = read?;

			Ok(if self.defer_snapshots {
				Snapshot::Deferred(DeferredRead::new(RecordingDelegate::new(credentials)))
			} else {
				Snapshot::Ready(credentials)
			})
		}
	}
	impl CredentialSources for FakeSources {
		fn environment(&self) -> Result<Snapshot, SourceError> {
			self.snapshot(self.local.read_environment())
		}

		fn system_properties(&self) -> Result<Snapshot, SourceError> {
			self.snapshot(self.local.read_system_properties())
		}

		fn default_profile_location(&self) -> Result<PathBuf, SourceError> {
			self.local.default_profile_location()
		}

		fn profile(&self, location: &ProfileLocation, name: &str) -> Result<Snapshot, SourceError> {
			self.snapshot(self.local.read_profile(location, name))
		}

		fn instance_metadata(&self) -> Result<Arc<dyn LiveCredentials>, SourceError> {
			Ok(self.delegate.clone())
		}

		fn assume_role(
			&self,
			request: &AssumeRoleRequest,
		) -> Result<Arc<dyn LiveCredentials>, SourceError> {
			*self.assume_role.lock() = Some(request.clone());

			Ok(self.delegate.clone())
		}

		fn web_identity(
			&self,
			request: &WebIdentityRequest,
		) -> Result<Arc<dyn LiveCredentials>, SourceError> {
			*self.web_identity.lock() = Some(request.clone());

			Ok(self.delegate.clone())
		}

		fn default_chain(&self) -> Result<Arc<dyn LiveCredentials>, SourceError> {
			Ok(self.delegate.clone())
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		path::{Path, PathBuf},
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "aws-sdk")] pub use aws_credential_types;
#[cfg(test)] use color_eyre as _;
