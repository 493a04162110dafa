//! Credential-method resolution: validation against the legality table, then provider
//! construction.
//!
//! [`resolve`] parses the method literal, runs [`validate()`], and hands the selected row to
//! [`build()`]. It is synchronous and stateless; the only source call that may block is the
//! snapshot request for `env`, `properties`, and `profile`, which SDK-backed sources defer to
//! first use.

pub mod factory;
pub mod rules;
pub mod validate;

pub use factory::*;
pub use rules::*;
pub use validate::*;

// self
use crate::{
	_prelude::*,
	auth::AuthMethod,
	config::{CredentialsConfig, OptionField},
	obs::{self, ResolveOutcome, ResolveSpan, ResolveStage},
	provider::CredentialsProvider,
	source::CredentialSources,
};

/// Notice returned when a deprecated configuration path was taken.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Deprecation {
	/// `basic` without either key was treated as `anonymous`.
	AnonymousFallback {
		/// Access key option name as the user would write it.
		access_key_option: String,
		/// Secret key option name as the user would write it.
		secret_key_option: String,
		/// Method option name as the user would write it.
		auth_method_option: String,
	},
}
impl Deprecation {
	fn anonymous_fallback(config: &CredentialsConfig) -> Self {
		Self::AnonymousFallback {
			access_key_option: config.option_name(OptionField::AccessKeyId),
			secret_key_option: config.option_name(OptionField::SecretAccessKey),
			auth_method_option: config.prefix.auth_method_option(),
		}
	}

	/// User-facing warning lines, in the order they should be shown.
	pub fn messages(&self) -> Vec<String> {
		match self {
			Self::AnonymousFallback { access_key_option, secret_key_option, auth_method_option } =>
				vec![
					format!(
						"Both '{access_key_option}' and '{secret_key_option}' are not set. \
						 Assuming that '{auth_method_option}: anonymous' option is set."
					),
					format!(
						"If you intentionally use anonymous authentication, please set \
						 '{auth_method_option}: anonymous' option."
					),
					"This behavior will be removed in a future release.".into(),
				],
		}
	}
}
impl Display for Deprecation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.messages().join(" "))
	}
}

/// Provider plus everything the host should know about how it was resolved.
#[derive(Clone, Debug)]
pub struct Resolution {
	/// Method named by the configuration.
	pub method: AuthMethod,
	/// Resolved provider.
	pub provider: CredentialsProvider,
	/// Deprecated paths taken; the host decides how to surface them.
	pub deprecations: Vec<Deprecation>,
}
impl Resolution {
	/// Returns true when the legacy anonymous fallback was taken.
	pub fn used_anonymous_fallback(&self) -> bool {
		self.deprecations.iter().any(|d| matches!(d, Deprecation::AnonymousFallback { .. }))
	}

	/// Drops the metadata and keeps the provider.
	pub fn into_provider(self) -> CredentialsProvider {
		self.provider
	}
}

/// Resolves `config` into a provider using `sources` for snapshots and live delegates.
///
/// Deprecation notices are returned in the [`Resolution`] and, with the `tracing` feature, also
/// logged at `warn` inside the resolve span.
pub fn resolve(config: &CredentialsConfig, sources: &dyn CredentialSources) -> Result<Resolution> {
	let span = ResolveSpan::new(&config.auth_method, ResolveStage::Resolve);

	span.in_scope(|| -> Result<Resolution> {
		let method =
			AuthMethod::parse_option(&config.auth_method, config.prefix).inspect_err(|_| {
				obs::record_resolution(None, ResolveOutcome::Failure);
			})?;

		obs::record_resolution(Some(method), ResolveOutcome::Attempt);

		let result = resolve_method(method, config, sources);
		let outcome = match &result {
			Ok(resolution) if resolution.used_anonymous_fallback() => {
				obs::emit_deprecations(&resolution.deprecations);

				ResolveOutcome::Fallback
			},
			Ok(_) => ResolveOutcome::Success,
			Err(_) => ResolveOutcome::Failure,
		};

		obs::record_resolution(Some(method), outcome);

		result
	})
}

fn resolve_method(
	method: AuthMethod,
	config: &CredentialsConfig,
	sources: &dyn CredentialSources,
) -> Result<Resolution> {
	let key = validate(method, config)?;
	let provider = build(key, config, sources)?;
	let deprecations = match key {
		RuleKey::LegacyAnonymous => vec![Deprecation::anonymous_fallback(config)],
		RuleKey::Method(_) => Vec::new(),
	};

	Ok(Resolution { method, provider, deprecations })
}

/// Reusable resolver bound to one set of credential sources.
#[derive(Clone)]
pub struct Resolver {
	sources: Arc<dyn CredentialSources>,
}
impl Resolver {
	/// Creates a resolver over the provided sources.
	pub fn new(sources: Arc<dyn CredentialSources>) -> Self {
		Self { sources }
	}

	/// Resolver over [`LocalSources`](crate::source::LocalSources) reading the process
	/// environment; live methods report the delegate as unsupported.
	pub fn local() -> Self {
		Self::new(Arc::new(crate::source::LocalSources::default()))
	}

	/// Resolver over [`AwsSdkSources`](crate::source::AwsSdkSources).
	#[cfg(feature = "aws-sdk")]
	pub fn aws_sdk() -> Self {
		Self::new(Arc::new(crate::source::AwsSdkSources::default()))
	}

	/// Resolves `config` with the bound sources.
	pub fn resolve(&self, config: &CredentialsConfig) -> Result<Resolution> {
		resolve(config, self.sources.as_ref())
	}
}
impl Debug for Resolver {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Resolver(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::fixture_sources, config::OptionPrefix, error::ConfigError};

	#[test]
	fn fallback_returns_three_messages_with_prefixed_names() {
		let config = CredentialsConfig::builder("basic").prefix(OptionPrefix::Aws).build();
		let resolution =
			resolve(&config, &fixture_sources()).expect("Keyless basic should fall back.");
		let messages = resolution
			.deprecations
			.first()
			.map(Deprecation::messages)
			.expect("The fallback should be reported.");

		assert!(resolution.used_anonymous_fallback());
		assert_eq!(resolution.deprecations.len(), 1);
		assert_eq!(messages.len(), 3);
		assert_eq!(
			messages[0],
			"Both 'aws_access_key_id' and 'aws_secret_access_key' are not set. Assuming that \
			 'aws_auth_method: anonymous' option is set."
		);
		assert!(matches!(resolution.provider, CredentialsProvider::Anonymous));
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn fallback_logs_each_notice_at_warn() {
		// std
		use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
		// crates.io
		use tracing::{Event, Level, Metadata, Subscriber, span};

		#[derive(Default)]
		struct WarnCounter {
			warnings: Arc<AtomicUsize>,
			next_span: AtomicU64,
		}
		impl Subscriber for WarnCounter {
			fn enabled(&self, _: &Metadata<'_>) -> bool {
				true
			}

			fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
				span::Id::from_u64(self.next_span.fetch_add(1, Ordering::SeqCst) + 1)
			}

			fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

			fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

			fn event(&self, event: &Event<'_>) {
				let metadata = event.metadata();

				if *metadata.level() == Level::WARN && metadata.target() == "aws_credentials" {
					self.warnings.fetch_add(1, Ordering::SeqCst);
				}
			}

			fn enter(&self, _: &span::Id) {}

			fn exit(&self, _: &span::Id) {}
		}

		let counter = WarnCounter::default();
		let warnings = counter.warnings.clone();
		let keyless = CredentialsConfig::builder("basic").build();
		let keyed =
			CredentialsConfig::builder("basic").access_key_id("AKIA").secret_access_key("s").build();

		tracing::subscriber::with_default(counter, || {
			resolve(&keyed, &fixture_sources()).expect("Keyed basic should resolve.");

			assert_eq!(warnings.load(Ordering::SeqCst), 0);

			resolve(&keyless, &fixture_sources()).expect("Keyless basic should fall back.");
		});

		assert_eq!(warnings.load(Ordering::SeqCst), 3);
	}

	#[test]
	fn unknown_method_fails_before_validation() {
		let config = CredentialsConfig::builder("role").profile_name("ignored").build();
		let err = resolve(&config, &fixture_sources()).expect_err("`role` is not a method.");

		assert!(matches!(err, Error::Config(ConfigError::UnknownMethod { .. })));
	}

	#[test]
	fn resolver_handle_reuses_sources() {
		let resolver = Resolver::new(Arc::new(fixture_sources()));
		let config = CredentialsConfig::builder("anonymous").build();
		let first = resolver.resolve(&config).expect("Anonymous should resolve.");
		let second = resolver.resolve(&config).expect("Anonymous should resolve twice.");

		assert_eq!(first.method, AuthMethod::Anonymous);
		assert!(first.deprecations.is_empty());
		assert_eq!(
			first.provider.static_credentials(),
			second.into_provider().static_credentials()
		);
	}
}
