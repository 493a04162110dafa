//! Credential values handed out by providers.

// self
use crate::{_prelude::*, auth::CredentialSecret};

/// Access key / secret key / optional session token triple, or the anonymous sentinel.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	/// Access key identifier (not secret; safe to log).
	pub access_key_id: String,
	/// Secret access key.
	pub secret_access_key: CredentialSecret,
	/// Session token for temporary credentials.
	pub session_token: Option<CredentialSecret>,
	/// Expiry reported by live providers; static credentials never expire.
	pub expires_at: Option<OffsetDateTime>,
}
impl Credentials {
	/// Creates long-lived credentials from a key pair.
	pub fn new(
		access_key_id: impl Into<String>,
		secret_access_key: impl Into<CredentialSecret>,
	) -> Self {
		Self {
			access_key_id: access_key_id.into(),
			secret_access_key: secret_access_key.into(),
			session_token: None,
			expires_at: None,
		}
	}

	/// Creates temporary credentials carrying a session token.
	pub fn session(
		access_key_id: impl Into<String>,
		secret_access_key: impl Into<CredentialSecret>,
		session_token: impl Into<CredentialSecret>,
	) -> Self {
		Self::new(access_key_id, secret_access_key).with_session_token(session_token)
	}

	/// Well-known anonymous sentinel: no key material at all.
	pub fn anonymous() -> Self {
		Self::new(String::new(), String::new())
	}

	/// Attaches a session token.
	pub fn with_session_token(mut self, token: impl Into<CredentialSecret>) -> Self {
		self.session_token = Some(token.into());

		self
	}

	/// Attaches an expiry instant.
	pub fn with_expiry(mut self, expires_at: OffsetDateTime) -> Self {
		self.expires_at = Some(expires_at);

		self
	}

	/// Returns true for the anonymous sentinel.
	pub fn is_anonymous(&self) -> bool {
		self.access_key_id.is_empty() && self.secret_access_key.is_empty()
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("access_key_id", &self.access_key_id)
			.field("secret_access_key", &self.secret_access_key)
			.field("session_token", &self.session_token)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
