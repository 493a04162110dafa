//! In-process credential sources: environment variables, system properties, and shared-credentials
//! profile files.

// crates.io
use directories::BaseDirs;
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::SourceError,
	provider::{AssumeRoleRequest, LiveCredentials, ProfileLocation, Snapshot, WebIdentityRequest},
	source::{CredentialSources, ProfileFile},
};

/// Primary access key environment variable.
pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
/// Legacy access key environment variable.
pub const ALTERNATE_ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY";
/// Primary secret key environment variable.
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
/// Legacy secret key environment variable.
pub const ALTERNATE_SECRET_KEY_ENV: &str = "AWS_SECRET_KEY";
/// Session token environment variable.
pub const SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";
/// Environment variable overriding the shared-credentials file location.
pub const SHARED_CREDENTIALS_FILE_ENV: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// Access key system property.
pub const ACCESS_KEY_PROPERTY: &str = "aws.accessKeyId";
/// Secret key system property.
pub const SECRET_KEY_PROPERTY: &str = "aws.secretKey";
/// Session token system property.
pub const SESSION_TOKEN_PROPERTY: &str = "aws.sessionToken";

const ENVIRONMENT_ORIGIN: &str = "environment variables";
const PROPERTIES_ORIGIN: &str = "system properties";

/// Host-owned key/value settings shared across clones.
///
/// Values are never printed by `Debug`.
#[derive(Clone, Default)]
pub struct SystemProperties(Arc<RwLock<BTreeMap<String, String>>>);
impl SystemProperties {
	/// Creates an empty property map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a property, returning the previous value.
	pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.0.write().insert(key.into(), value.into())
	}

	/// Removes a property, returning its value.
	pub fn remove(&self, key: &str) -> Option<String> {
		self.0.write().remove(key)
	}

	/// Returns a copy of a property value.
	pub fn get(&self, key: &str) -> Option<String> {
		self.0.read().get(key).cloned()
	}
}
impl<K, V> FromIterator<(K, V)> for SystemProperties
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let map = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self(Arc::new(RwLock::new(map)))
	}
}
impl Debug for SystemProperties {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_set().entries(self.0.read().keys()).finish()
	}
}

#[derive(Clone)]
enum Environment {
	Process,
	Fixed(Arc<BTreeMap<String, String>>),
}
impl Environment {
	fn var(&self, name: &str) -> Option<String> {
		match self {
			Self::Process => std::env::var(name).ok(),
			Self::Fixed(vars) => vars.get(name).cloned(),
		}
	}
}
impl Debug for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Process => f.write_str("Process"),
			Self::Fixed(vars) => f.debug_tuple("Fixed").field(&vars.keys().collect::<Vec<_>>()).finish(),
		}
	}
}

/// Credential sources that never leave the process.
///
/// Snapshot methods read the configured environment, the injected [`SystemProperties`], and
/// profile files. Live delegates need an SDK and are reported as [`SourceError::Unsupported`].
#[derive(Clone, Debug)]
pub struct LocalSources {
	environment: Environment,
	properties: SystemProperties,
	home_dir: Option<PathBuf>,
}
impl LocalSources {
	/// Sources reading the process environment and the user's home directory.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sources with an empty environment, no properties, and no home directory.
	pub fn isolated() -> Self {
		Self {
			environment: Environment::Fixed(Default::default()),
			properties: SystemProperties::default(),
			home_dir: None,
		}
	}

	/// Isolated sources reading environment variables from `vars` instead of the process.
	pub fn with_environment<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self { environment: Environment::Fixed(Arc::new(vars)), ..Self::isolated() }
	}

	/// Replaces the system properties.
	pub fn with_properties(mut self, properties: SystemProperties) -> Self {
		self.properties = properties;

		self
	}

	/// Replaces the home directory used for the default profile location.
	pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
		self.home_dir = Some(home_dir.into());

		self
	}

	/// Shared handle to the system properties.
	pub fn properties(&self) -> &SystemProperties {
		&self.properties
	}

	/// Reads `AWS_ACCESS_KEY_ID` (or `AWS_ACCESS_KEY`), `AWS_SECRET_ACCESS_KEY` (or
	/// `AWS_SECRET_KEY`), and the optional `AWS_SESSION_TOKEN`.
	pub fn read_environment(&self) -> Result<Credentials, SourceError> {
		let access_key_id = self
			.env_var(&[ACCESS_KEY_ENV, ALTERNATE_ACCESS_KEY_ENV])
			.ok_or(SourceError::MissingVariable { origin: ENVIRONMENT_ORIGIN, name: ACCESS_KEY_ENV })?;
		let secret_access_key = self
			.env_var(&[SECRET_KEY_ENV, ALTERNATE_SECRET_KEY_ENV])
			.ok_or(SourceError::MissingVariable { origin: ENVIRONMENT_ORIGIN, name: SECRET_KEY_ENV })?;
		let credentials = Credentials::new(access_key_id, secret_access_key);

		Ok(match self.env_var(&[SESSION_TOKEN_ENV]) {
			Some(token) => credentials.with_session_token(token),
			None => credentials,
		})
	}

	/// Reads the `aws.*` system properties.
	pub fn read_system_properties(&self) -> Result<Credentials, SourceError> {
		let access_key_id = self.property(ACCESS_KEY_PROPERTY).ok_or(
			SourceError::MissingVariable { origin: PROPERTIES_ORIGIN, name: ACCESS_KEY_PROPERTY },
		)?;
		let secret_access_key = self.property(SECRET_KEY_PROPERTY).ok_or(
			SourceError::MissingVariable { origin: PROPERTIES_ORIGIN, name: SECRET_KEY_PROPERTY },
		)?;
		let credentials = Credentials::new(access_key_id, secret_access_key);

		Ok(match self.property(SESSION_TOKEN_PROPERTY) {
			Some(token) => credentials.with_session_token(token),
			None => credentials,
		})
	}

	/// Loads profile `name` from `location` with [`ProfileFile`].
	pub fn read_profile(
		&self,
		location: &ProfileLocation,
		name: &str,
	) -> Result<Credentials, SourceError> {
		let path = match location {
			ProfileLocation::Explicit(path) => path.clone(),
			ProfileLocation::SourceDefault => self.default_profile_location()?,
		};

		ProfileFile::load(path)?.credentials(name)
	}

	// Empty and whitespace-only values count as unset.
	fn env_var(&self, names: &[&str]) -> Option<String> {
		names.iter().find_map(|name| non_empty(self.environment.var(name)))
	}

	fn property(&self, key: &str) -> Option<String> {
		non_empty(self.properties.get(key))
	}
}
impl Default for LocalSources {
	fn default() -> Self {
		Self {
			environment: Environment::Process,
			properties: SystemProperties::default(),
			home_dir: BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
		}
	}
}
impl CredentialSources for LocalSources {
	fn environment(&self) -> Result<Snapshot, SourceError> {
		self.read_environment().map(Snapshot::Ready)
	}

	fn system_properties(&self) -> Result<Snapshot, SourceError> {
		self.read_system_properties().map(Snapshot::Ready)
	}

	fn default_profile_location(&self) -> Result<PathBuf, SourceError> {
		if let Some(path) = self.env_var(&[SHARED_CREDENTIALS_FILE_ENV]) {
			return Ok(PathBuf::from(path));
		}

		self.home_dir
			.as_ref()
			.map(|home| home.join(".aws").join("credentials"))
			.ok_or(SourceError::NoProfileLocation)
	}

	fn profile(&self, location: &ProfileLocation, name: &str) -> Result<Snapshot, SourceError> {
		self.read_profile(location, name).map(Snapshot::Ready)
	}

	fn instance_metadata(&self) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Err(SourceError::Unsupported { delegate: "instance metadata" })
	}

	fn assume_role(
		&self,
		_: &AssumeRoleRequest,
	) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Err(SourceError::Unsupported { delegate: "assume role" })
	}

	fn web_identity(
		&self,
		_: &WebIdentityRequest,
	) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Err(SourceError::Unsupported { delegate: "web identity token" })
	}

	fn default_chain(&self) -> Result<Arc<dyn LiveCredentials>, SourceError> {
		Err(SourceError::Unsupported { delegate: "default chain" })
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
