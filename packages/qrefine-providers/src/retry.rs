use std::{future::Future, time::Duration};

const BASE_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_MS: u64 = 30_000;

/// Delay before retry number `attempt` (1-based), doubling from the base and capped.
pub fn backoff_for_attempt(attempt: u32) -> Duration {
	let exp = attempt.max(1).saturating_sub(1).min(6);
	let base = BASE_BACKOFF_MS.saturating_mul(1 << exp);

	Duration::from_millis(base.min(MAX_BACKOFF_MS))
}

/// Runs `op` once, then up to `max_retries` more times while it fails.
///
/// The last error is returned unchanged.
pub async fn with_backoff<T, E, F, Fut>(max_retries: u32, mut op: F) -> Result<T, E>
where
	E: std::fmt::Display,
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
{
	let mut attempt = 0;

	loop {
		match op().await {
			Ok(value) => return Ok(value),
			Err(err) if attempt < max_retries => {
				attempt += 1;

				let delay = backoff_for_attempt(attempt);

				tracing::warn!(
					error = %err,
					attempt,
					delay_ms = delay.as_millis() as u64,
					"Provider call failed; retrying."
				);

				tokio::time::sleep(delay).await;
			},
			Err(err) => return Err(err),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicU32, Ordering};

	use super::*;

	#[test]
	fn backoff_doubles_and_caps() {
		assert_eq!(backoff_for_attempt(0), Duration::from_millis(500));
		assert_eq!(backoff_for_attempt(1), Duration::from_millis(500));
		assert_eq!(backoff_for_attempt(2), Duration::from_millis(1_000));
		assert_eq!(backoff_for_attempt(4), Duration::from_millis(4_000));
		assert_eq!(backoff_for_attempt(7), Duration::from_millis(30_000));
		assert_eq!(backoff_for_attempt(40), Duration::from_millis(30_000));
	}

	#[tokio::test]
	async fn zero_retries_surfaces_first_failure() {
		let calls = AtomicU32::new(0);
		let result: Result<(), String> = with_backoff(0, || {
			calls.fetch_add(1, Ordering::SeqCst);

			async { Err("boom".to_string()) }
		})
		.await;

		assert_eq!(result, Err("boom".to_string()));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn retries_until_success() {
		let calls = AtomicU32::new(0);
		let result: Result<u32, String> = with_backoff(3, || {
			let call = calls.fetch_add(1, Ordering::SeqCst) + 1;

			async move { if call < 3 { Err(format!("attempt {call}")) } else { Ok(call) } }
		})
		.await;

		assert_eq!(result, Ok(3));
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}
}
