// self
use crate::{_prelude::*, obs::ResolveStage, resolver::Deprecation};

/// Future returned by [`ResolveSpan::instrument`]; the input future itself without `tracing`.
#[cfg(feature = "tracing")]
pub type Traced<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`ResolveSpan::instrument`]; the input future itself without `tracing`.
#[cfg(not(feature = "tracing"))]
pub type Traced<F> = F;

/// `aws_credentials.resolve` span carrying the method (or delegate) label and the stage.
#[derive(Clone, Debug)]
pub struct ResolveSpan {
	#[cfg(feature = "tracing")]
	inner: tracing::Span,
}
impl ResolveSpan {
	/// Opens a span for `label` at `stage`.
	pub fn new(label: &str, stage: ResolveStage) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self {
				inner: tracing::info_span!(
					"aws_credentials.resolve",
					method = label,
					stage = stage.as_str()
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (label, stage);

			Self {}
		}
	}

	/// Runs synchronous work inside the span.
	pub fn in_scope<T>(&self, work: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.inner.in_scope(work)
		}
		#[cfg(not(feature = "tracing"))]
		{
			work()
		}
	}

	/// Attaches the span to a future.
	pub fn instrument<F>(&self, future: F) -> Traced<F>
	where
		F: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(future, self.inner.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			future
		}
	}
}

/// Logs every deprecation line at `warn` under the `aws_credentials` target (when tracing is
/// enabled). [`resolve`](crate::resolver::resolve) calls it inside its span.
pub fn emit_deprecations(deprecations: &[Deprecation]) {
	#[cfg(feature = "tracing")]
	deprecations.iter().flat_map(Deprecation::messages).for_each(|message| {
		tracing::warn!(target: "aws_credentials", "{message}");
	});
	#[cfg(not(feature = "tracing"))]
	let _ = deprecations;
}
