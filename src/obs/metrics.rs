// self
use crate::obs::{VerifyOutcome, VerifyPath};

/// Counter incremented once per [`VerifyOutcome`] of every verification.
pub const VERIFY_COUNTER: &str = "credential_verifier_verify_total";

/// Records a verification outcome via the global metrics recorder (when enabled).
pub fn record_verification(path: VerifyPath, outcome: VerifyOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			VERIFY_COUNTER,
			"path" => path.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (path, outcome);
	}
}


#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_verification_noop_without_recorder() {
		record_verification(VerifyPath::Remote, VerifyOutcome::Failure);
	}

	#[cfg(feature = "metrics")]
	#[test]
	fn record_verification_labels_path_and_outcome() {
		// self
		use crate::obs::recorder::CountingRecorder;

		let recorder = CountingRecorder::default();

		metrics::with_local_recorder(&recorder, || {
			record_verification(VerifyPath::Bypass, VerifyOutcome::Accepted);
			record_verification(VerifyPath::Bypass, VerifyOutcome::Accepted);
			record_verification(VerifyPath::Remote, VerifyOutcome::Rejected);
		});

		assert_eq!(recorder.verifications(VerifyPath::Bypass, VerifyOutcome::Accepted), 2);
		assert_eq!(recorder.verifications(VerifyPath::Remote, VerifyOutcome::Rejected), 1);
		assert_eq!(recorder.verifications(VerifyPath::Remote, VerifyOutcome::Accepted), 0);
	}
}
