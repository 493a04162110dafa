// self
use crate::{auth::AuthMethod, obs::ResolveOutcome};

/// Counter incremented once per resolver event.
pub const RESOLVE_COUNTER: &str = "aws_credentials_resolve_total";
/// `method` label used when the literal itself was not recognized.
pub const UNKNOWN_METHOD_LABEL: &str = "unknown";

/// Counts one resolver event under `method` and `outcome` (when `metrics` is enabled).
pub fn record_resolution(method: Option<AuthMethod>, outcome: ResolveOutcome) {
	let method = method_label(method);

	#[cfg(feature = "metrics")]
	metrics::counter!(RESOLVE_COUNTER, "method" => method, "outcome" => outcome.as_str())
		.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (method, outcome);
}

fn method_label(method: Option<AuthMethod>) -> &'static str {
	method.map_or(UNKNOWN_METHOD_LABEL, AuthMethod::as_str)
}
