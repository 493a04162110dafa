//! Shared-credentials profile file parser.
//!
//! Accepted syntax: `[name]` or `[profile name]` section headers (optionally followed by a
//! comment), `key = value` pairs, indented continuation lines, and full line comments starting
//! with `#` or `;`. A continuation line appends to the previous value after a newline. Keys are
//! case-insensitive; profile names are not. Sections declared twice are merged, later values
//! winning.

// self
use crate::{_prelude::*, auth::Credentials, error::SourceError};

/// Access key entry.
pub const ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
/// Secret key entry.
pub const SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";
/// Session token entry.
pub const SESSION_TOKEN_KEY: &str = "aws_session_token";

/// Parsed profile file.
#[derive(Clone)]
pub struct ProfileFile {
	path: PathBuf,
	profiles: BTreeMap<String, BTreeMap<String, String>>,
}
impl ProfileFile {
	/// Reads and parses the file at `path`.
	pub fn load(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
		let path = path.into();
		let content = std::fs::read_to_string(&path)
			.map_err(|source| SourceError::Io { path: path.clone(), source })?;

		Self::parse(path, &content)
	}

	/// Parses `content`; `path` is only used in errors.
	pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, SourceError> {
		let path = path.into();
		let mut profiles = BTreeMap::<String, BTreeMap<String, String>>::new();
		let mut current = None::<String>;
		let mut property = None::<String>;

		for (index, raw) in content.lines().enumerate() {
			let line = raw.trim();
			let malformed = |reason: &str| SourceError::MalformedProfile {
				path: path.clone(),
				line: index + 1,
				reason: reason.into(),
			};

			if line.is_empty() || is_comment(line) {
				continue;
			}
			if raw.starts_with(char::is_whitespace) && !line.starts_with('[') {
				let value = match (&current, &property) {
					(Some(name), Some(key)) =>
						profiles.get_mut(name).and_then(|profile| profile.get_mut(key)),
					_ => None,
				}
				.ok_or_else(|| malformed("continuation line without a preceding property"))?;

				value.push('\n');
				value.push_str(line);

				continue;
			}
			if let Some(header) = line.strip_prefix('[') {
				let (name, trailing) =
					header.split_once(']').ok_or_else(|| malformed("section header is not closed"))?;
				let trailing = trailing.trim();

				if !trailing.is_empty() && !is_comment(trailing) {
					return Err(malformed("unexpected text after section header"));
				}

				let name = name.trim();
				let name = name.strip_prefix("profile ").map(str::trim).unwrap_or(name);

				if name.is_empty() {
					return Err(malformed("profile name is empty"));
				}

				profiles.entry(name.to_owned()).or_default();

				current = Some(name.to_owned());
				property = None;

				continue;
			}

			let (key, value) =
				line.split_once('=').ok_or_else(|| malformed("expected `key = value`"))?;
			let key = key.trim().to_ascii_lowercase();

			if key.is_empty() {
				return Err(malformed("key is empty"));
			}

			let profile = current
				.as_ref()
				.and_then(|name| profiles.get_mut(name))
				.ok_or_else(|| malformed("property appears before any profile header"))?;

			profile.insert(key.clone(), value.trim().to_owned());

			property = Some(key);
		}

		Ok(Self { path, profiles })
	}

	/// Declared profile names, sorted.
	pub fn profile_names(&self) -> impl Iterator<Item = &str> {
		self.profiles.keys().map(String::as_str)
	}

	/// Credentials of profile `name`.
	pub fn credentials(&self, name: &str) -> Result<Credentials, SourceError> {
		let profile = self.profiles.get(name).ok_or_else(|| SourceError::MissingProfile {
			profile: name.into(),
			path: self.path.clone(),
		})?;
		let value = |key: &str| profile.get(key).map(String::as_str).filter(|v| !v.is_empty());
		let missing = |key: &'static str| SourceError::MissingProfileKey { profile: name.into(), key };
		let access_key_id = value(ACCESS_KEY_ID_KEY).ok_or_else(|| missing(ACCESS_KEY_ID_KEY))?;
		let secret_access_key =
			value(SECRET_ACCESS_KEY_KEY).ok_or_else(|| missing(SECRET_ACCESS_KEY_KEY))?;
		let credentials = Credentials::new(access_key_id, secret_access_key);

		Ok(match value(SESSION_TOKEN_KEY) {
			Some(token) => credentials.with_session_token(token),
			None => credentials,
		})
	}
}
impl Debug for ProfileFile {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProfileFile")
			.field("path", &self.path)
			.field("profiles", &self.profiles.keys().collect::<Vec<_>>())
			.finish()
	}
}

fn is_comment(text: &str) -> bool {
	text.starts_with('#') || text.starts_with(';')
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const SAMPLE: &str = "\
# shared credentials
[default]
aws_access_key_id = AKIADEFAULT
aws_secret_access_key = default-secret

; CI account
[profile ci]
AWS_Access_Key_Id=AKIACI
aws_secret_access_key =  ci-secret
aws_session_token = ci-token
";

	fn sample() -> ProfileFile {
		ProfileFile::parse("/tmp/credentials", SAMPLE).expect("Sample should parse.")
	}

	#[test]
	fn parses_plain_and_prefixed_headers() {
		let file = sample();

		assert_eq!(file.profile_names().collect::<Vec<_>>(), ["ci", "default"]);

		let ci = file.credentials("ci").expect("The ci profile should resolve.");

		assert_eq!(ci.access_key_id, "AKIACI");
		assert_eq!(ci.secret_access_key.expose(), "ci-secret");
		assert_eq!(ci.session_token.as_ref().map(|t| t.expose()), Some("ci-token"));

		let default = file.credentials("default").expect("The default profile should resolve.");

		assert!(default.session_token.is_none());
	}

	#[test]
	fn repeated_sections_merge() {
		let file = ProfileFile::parse(
			"/tmp/credentials",
			"[a]\naws_access_key_id = first\n[a]\naws_access_key_id = second\naws_secret_access_key = s\n",
		)
		.expect("Repeated sections should parse.");

		assert_eq!(file.credentials("a").map(|c| c.access_key_id).ok().as_deref(), Some("second"));
	}

	#[test]
	fn malformed_lines_report_their_number() {
		let err = ProfileFile::parse("/tmp/credentials", "[default]\naws_access_key_id AKIA\n")
			.expect_err("A line without `=` must fail.");

		assert!(matches!(err, SourceError::MalformedProfile { line: 2, .. }));

		let err = ProfileFile::parse("/tmp/credentials", "\n\n[default\n")
			.expect_err("An unterminated header must fail.");

		assert!(matches!(err, SourceError::MalformedProfile { line: 3, .. }));

		let err = ProfileFile::parse("/tmp/credentials", "aws_access_key_id = AKIA\n")
			.expect_err("A property outside a section must fail.");

		assert!(matches!(err, SourceError::MalformedProfile { line: 1, .. }));
	}

	#[test]
	fn header_comments_and_continuations_follow_the_shared_file_format() {
		let file = ProfileFile::parse(
			"/tmp/credentials",
			"[default] # main account\n\
			 aws_access_key_id = AKIAMAIN\n\
			 aws_secret_access_key = main-secret\n\
			 [profile ci] ; build account\n\
			 aws_access_key_id = AKIACI\n\
			 aws_secret_access_key = ci-secret\n\
			 aws_session_token = part1\n  part2\n",
		)
		.expect("Header comments and continuation lines are valid.");
		let main = file.credentials("default").expect("The default profile should resolve.");
		let ci = file.credentials("ci").expect("The ci profile should resolve.");

		assert_eq!(main.access_key_id, "AKIAMAIN");
		assert_eq!(ci.session_token.as_ref().map(|t| t.expose()), Some("part1\npart2"));
	}

	#[test]
	fn stray_continuations_and_header_text_are_rejected() {
		let err = ProfileFile::parse("/tmp/credentials", "[default]\n  dangling\n")
			.expect_err("A continuation needs a property to extend.");

		assert!(matches!(err, SourceError::MalformedProfile { line: 2, .. }));

		let err = ProfileFile::parse("/tmp/credentials", "[default] trailing\n")
			.expect_err("Only comments may follow a header.");

		assert!(matches!(err, SourceError::MalformedProfile { line: 1, .. }));
	}

	#[test]
	fn missing_profile_and_key_are_distinct() {
		let file = ProfileFile::parse("/tmp/credentials", "[partial]\naws_access_key_id = AKIA\n")
			.expect("Partial profile should parse.");

		assert!(matches!(
			file.credentials("other"),
			Err(SourceError::MissingProfile { ref profile, .. }) if profile == "other"
		));
		assert!(matches!(
			file.credentials("partial"),
			Err(SourceError::MissingProfileKey { key: SECRET_ACCESS_KEY_KEY, .. })
		));
	}

	#[test]
	fn load_reports_io_errors_with_path() {
		let err = ProfileFile::load("/nonexistent/aws/credentials")
			.expect_err("A missing file must fail.");

		assert!(matches!(
			err,
			SourceError::Io { ref path, .. } if path == Path::new("/nonexistent/aws/credentials")
		));
	}
}
