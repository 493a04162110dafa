//! Snapshot reads: credentials a source reads once and then holds.

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	provider::{LiveCredentials, ProviderFuture},
};

/// Outcome of a snapshot read (`env`, `properties`, `profile`).
#[derive(Clone, Debug)]
pub enum Snapshot {
	/// Credentials already read.
	Ready(Credentials),
	/// Read postponed to the first credentials request.
	Deferred(DeferredRead),
}
impl From<Credentials> for Snapshot {
	fn from(credentials: Credentials) -> Self {
		Self::Ready(credentials)
	}
}

/// Snapshot read performed by an external collaborator on first use.
///
/// The wrapped implementation reads exactly once and yields that value on every later fetch.
/// Its `refresh` is never called.
#[derive(Clone)]
pub struct DeferredRead(Arc<dyn LiveCredentials>);
impl DeferredRead {
	/// Wraps a read-once implementation.
	pub fn new(inner: impl 'static + LiveCredentials) -> Self {
		Self(Arc::new(inner))
	}

	/// Performs the read, or returns the value held from the first one.
	pub fn fetch(&self) -> ProviderFuture<'_, Credentials> {
		self.0.fetch()
	}
}
impl Debug for DeferredRead {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("DeferredRead(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::RecordingDelegate;

	#[tokio::test]
	async fn deferred_reads_forward_to_the_collaborator() {
		let read = DeferredRead::new(RecordingDelegate::new(Credentials::new("AKIALATER", "later")));
		let credentials = read.fetch().await.expect("The recorder always yields.");

		assert_eq!(credentials.access_key_id, "AKIALATER");
		assert_eq!(format!("{:?}", Snapshot::Deferred(read)), "Deferred(DeferredRead(..))");
	}
}
