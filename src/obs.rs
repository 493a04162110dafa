//! Observability for credential resolution; every helper compiles to nothing unless its feature
//! is enabled.
//!
//! # Feature Flags
//!
//! - `tracing`: `aws_credentials.resolve` spans with `method` and `stage` fields around resolution
//!   and delegate calls, plus a `warn` event per deprecation notice ([`emit_deprecations`]).
//! - `metrics`: the `aws_credentials_resolve_total` counter, labeled by `method` and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call site recorded in the span `stage` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolveStage {
	/// Validation and provider construction.
	Resolve,
	/// Live delegate `credentials` call.
	DelegateFetch,
	/// Live delegate `refresh` call.
	DelegateRefresh,
}
impl ResolveStage {
	/// Span field value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Resolve => "resolve",
			Self::DelegateFetch => "delegate_fetch",
			Self::DelegateRefresh => "delegate_refresh",
		}
	}
}

/// Metric `outcome` label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolveOutcome {
	/// Resolver entered with a known method.
	Attempt,
	/// Provider built.
	Success,
	/// Provider built through the deprecated anonymous fallback.
	Fallback,
	/// Error returned to the caller.
	Failure,
}
impl ResolveOutcome {
	/// Metric label value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Fallback => "fallback",
			Self::Failure => "failure",
		}
	}
}
impl Display for ResolveOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
