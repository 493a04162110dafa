//! Secret access keys and session tokens.

// self
use crate::_prelude::*;

/// AWS secret access key or session token.
///
/// Deserializes from a bare JSON string. `Debug` and `Display` print `<redacted>` whatever the
/// content, so configurations and providers can be logged as-is.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CredentialSecret(String);
impl CredentialSecret {
	/// Wraps `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw value, for signing and SDK hand-off only.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Empty for the anonymous sentinel.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for CredentialSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<String> for CredentialSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for CredentialSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for CredentialSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CredentialSecret").field(&"<redacted>").finish()
	}
}
impl Display for CredentialSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = CredentialSecret::new("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY");

		assert_eq!(format!("{secret:?}"), "CredentialSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY");
	}

	#[test]
	fn anonymous_secret_is_empty_but_still_redacted() {
		let secret = CredentialSecret::from("");

		assert!(secret.is_empty());
		assert_eq!(secret.to_string(), "<redacted>");
		assert!(!CredentialSecret::from(String::from("s")).is_empty());
	}

	#[test]
	fn secret_deserializes_from_plain_string() {
		let secret: CredentialSecret =
			serde_json::from_str("\"token\"").expect("Secret should deserialize from a string.");

		assert_eq!(secret.expose(), "token");
	}
}
