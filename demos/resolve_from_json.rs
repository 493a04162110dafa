//! Resolves an `aws_`-prefixed JSON configuration (first argument, or a built-in session
//! document) against local sources and prints what the host would surface.

// std
use std::env;
// crates.io
use color_eyre::Result;
// self
use aws_credentials_resolver::{
	config::{CredentialsConfig, OptionPrefix},
	resolver::Resolver,
};

const FALLBACK_DOCUMENT: &str = r#"{
	"aws_auth_method": "session",
	"aws_access_key_id": "ASIADEMO000000000001",
	"aws_secret_access_key": "demo-secret",
	"aws_session_token": "demo-token",
	"bucket": "embulk-demo"
}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let document = env::args().nth(1).unwrap_or_else(|| FALLBACK_DOCUMENT.into());
	let config = CredentialsConfig::from_json_str(&document, OptionPrefix::Aws)?;
	let resolution = Resolver::local().resolve(&config)?;

	for deprecation in &resolution.deprecations {
		for message in deprecation.messages() {
			eprintln!("warning: {message}");
		}
	}

	println!("method: {}", resolution.method);
	println!("provider: {}", resolution.provider.kind());

	if resolution.provider.is_live() {
		println!("live delegate; credentials are fetched on demand");
	} else {
		let credentials = resolution.provider.credentials().await?;

		println!("credentials: {credentials:?}");
	}

	Ok(())
}
