//! Resolver-level error types shared across configuration, validation, and credential sources.

// self
use crate::{_prelude::*, auth::AuthMethod};

/// Resolver-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical resolver error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The user configuration is invalid; surface it verbatim and do not retry.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A credential source failed; passed through unmodified.
	#[error(transparent)]
	Source(#[from] SourceError),
}

/// User configuration failures raised while loading or validating credential options.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Options required by the selected method are absent.
	#[error("Required option is not set: {}.", quote_options(.options))]
	MissingOption {
		/// Every option the user has to add, in declaration order.
		options: Vec<String>,
	},
	/// An option that the selected method does not accept is present.
	#[error("Invalid option is set: '{option}'.")]
	InvalidOption {
		/// Offending option name (including any key prefix).
		option: String,
	},
	/// The authentication method literal is not recognized.
	#[error("Unknown {option} '{method}'. Supported methods are {}.", AuthMethod::supported_list())]
	UnknownMethod {
		/// Option name that carried the method (including any key prefix).
		option: String,
		/// Literal supplied by the user.
		method: String,
	},

	/// The configuration document is not valid JSON.
	#[error("Credentials configuration is not valid JSON.")]
	Syntax {
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// A configuration value has the wrong type or shape.
	#[error("Credentials option `{path}` could not be parsed.")]
	Parse {
		/// Option path as written by the user.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Failures reported by credential sources (environment, profile files, SDK providers).
#[derive(Debug, ThisError)]
pub enum SourceError {
	/// A file could not be read.
	#[error("Failed to read {}: {source}.", path.display())]
	Io {
		/// File that failed.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// A profile file line could not be understood.
	#[error("Malformed profile file {} at line {line}: {reason}.", path.display())]
	MalformedProfile {
		/// Profile file path.
		path: PathBuf,
		/// One-based line number.
		line: usize,
		/// Human-readable parsing failure.
		reason: String,
	},
	/// The requested profile is not declared in the profile file.
	#[error("Profile '{profile}' is not declared in {}.", path.display())]
	MissingProfile {
		/// Requested profile name.
		profile: String,
		/// Profile file path.
		path: PathBuf,
	},
	/// The profile exists but lacks a credential key.
	#[error("Profile '{profile}' does not define `{key}`.")]
	MissingProfileKey {
		/// Profile name.
		profile: String,
		/// Missing key.
		key: &'static str,
	},
	/// An environment variable or system property is not set.
	#[error("Unable to load credentials from {origin}: `{name}` is not set.")]
	MissingVariable {
		/// Where the variable was looked up.
		origin: &'static str,
		/// Variable or property name.
		name: &'static str,
	},
	/// Neither an explicit profile file nor a home directory is available.
	#[error("No default profile file location is available.")]
	NoProfileLocation,
	/// The source cannot build the requested live delegate.
	#[error("The {delegate} credentials delegate is not available from this source.")]
	Unsupported {
		/// Delegate label.
		delegate: &'static str,
	},
	/// An external credentials provider failed.
	#[error("Credentials provider failed: {message}.")]
	Provider {
		/// Provider-supplied message.
		message: String,
		/// Underlying provider failure, when available.
		#[source]
		source: Option<BoxError>,
	},
}
impl SourceError {
	/// Wraps an external provider failure.
	pub fn provider(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Provider { message: src.to_string(), source: Some(Box::new(src)) }
	}
}

fn quote_options(options: &[String]) -> String {
	options.iter().map(|option| format!("'{option}'")).collect::<Vec<_>>().join(", ")
}
