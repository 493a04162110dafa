//! Requests handed to credential sources for methods that need more than a snapshot.

// std
use std::time::Duration;
// self
use crate::_prelude::*;

/// Where the profile file lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProfileLocation {
	/// Path given in the configuration.
	Explicit(PathBuf),
	/// The source's default shared-credentials location.
	SourceDefault,
}

/// Parameters of an STS assume-role exchange.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssumeRoleRequest {
	/// Role ARN built from partition, account, and role name.
	pub role_arn: String,
	/// Role session name.
	pub session_name: String,
	/// External ID presented to STS.
	pub external_id: String,
	/// Requested session duration in seconds; STS enforces the accepted bounds.
	pub duration_seconds: u32,
}
impl AssumeRoleRequest {
	/// Requested session length.
	pub fn session_length(&self) -> Duration {
		Duration::from_secs(u64::from(self.duration_seconds))
	}
}

/// Parameters of an STS web-identity-token exchange.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WebIdentityRequest {
	/// Role ARN to assume.
	pub role_arn: String,
	/// Role session name.
	pub role_session_name: String,
	/// File holding the web identity token.
	pub token_file: PathBuf,
}

/// Builds `arn:{partition}:iam::{account_id}:role/{role_name}`.
pub fn role_arn(partition: &str, account_id: &str, role_name: &str) -> String {
	format!("arn:{partition}:iam::{account_id}:role/{role_name}")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn role_arn_follows_iam_layout() {
		assert_eq!(
			role_arn("aws", "123456789012", "exampleRole"),
			"arn:aws:iam::123456789012:role/exampleRole"
		);
		assert_eq!(
			role_arn("aws-us-gov", "123456789012", "ops"),
			"arn:aws-us-gov:iam::123456789012:role/ops"
		);
	}

	#[test]
	fn session_length_uses_seconds() {
		let request = AssumeRoleRequest {
			role_arn: "arn:aws:iam::1:role/r".into(),
			session_name: "embulk".into(),
			external_id: "ext".into(),
			duration_seconds: 900,
		};

		assert_eq!(request.session_length(), Duration::from_secs(900));
	}
}
