//! Closed set of authentication methods accepted by the resolver.

// self
use crate::{_prelude::*, config::OptionPrefix, error::ConfigError};

/// Authentication methods understood by the resolver.
///
/// Literals are case-sensitive; see [`AuthMethod::as_str`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
	/// Static access key + secret key (or the legacy anonymous fallback when both are absent).
	Basic,
	/// Environment variables, read once.
	Env,
	/// Live instance-metadata credentials.
	Instance,
	/// Shared-credentials profile file, read once.
	Profile,
	/// System properties, read once.
	Properties,
	/// Anonymous sentinel credentials.
	Anonymous,
	/// Static access key + secret key + session token.
	Session,
	/// Live STS assume-role delegate.
	AssumeRole,
	/// Live STS web-identity-token delegate.
	WebIdentityToken,
	/// Live default provider chain.
	Default,
}
impl AuthMethod {
	/// Every method, in the order used by lookup tables and error messages.
	pub const ALL: [Self; 10] = [
		Self::Basic,
		Self::Env,
		Self::Instance,
		Self::Profile,
		Self::Properties,
		Self::Anonymous,
		Self::Session,
		Self::AssumeRole,
		Self::WebIdentityToken,
		Self::Default,
	];

	/// Returns the configuration literal for the method.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Basic => "basic",
			Self::Env => "env",
			Self::Instance => "instance",
			Self::Profile => "profile",
			Self::Properties => "properties",
			Self::Anonymous => "anonymous",
			Self::Session => "session",
			Self::AssumeRole => "assume_role",
			Self::WebIdentityToken => "web_identity_token",
			Self::Default => "default",
		}
	}

	/// Parses a method literal read from the `auth_method` option under the given prefix.
	pub fn parse_option(value: &str, prefix: OptionPrefix) -> Result<Self, ConfigError> {
		Self::ALL.into_iter().find(|method| method.as_str() == value).ok_or_else(|| {
			ConfigError::UnknownMethod {
				option: prefix.auth_method_option(),
				method: value.to_owned(),
			}
		})
	}

	/// Human-readable list of every literal, e.g. `basic, env, … and default`.
	pub fn supported_list() -> String {
		let labels = Self::ALL.map(Self::as_str);
		let (head, last) = labels.split_at(labels.len() - 1);

		format!("{} and {}", head.join(", "), last.join(""))
	}
}
impl Display for AuthMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AuthMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse_option(s, OptionPrefix::None)
	}
}
