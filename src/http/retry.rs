use std::time::Duration;

use tracing::warn;

use super::HttpResponse;

/// First backoff interval.
const BASE_SLEEP: Duration = Duration::from_millis(1);

/// Backoff ceiling.
const MAX_SLEEP: Duration = Duration::from_millis(4096);

/// Consecutive server errors before logging a connectivity diagnostic.
const DEGRADED_AFTER: usize = 5;

/// Invoke `request` until it returns a non-5xx response or `max_attempts`
/// invocations have been made, sleeping between attempts with a doubling
/// backoff capped at [`MAX_SLEEP`].
///
/// Only server errors (500-599) are retried; 2xx, 4xx, and transport
/// failures (code 0) terminate immediately. The last response is returned
/// regardless of outcome; the caller inspects the status code. This
/// function itself never fails.
pub fn execute<F>(mut request: F, max_attempts: usize) -> HttpResponse
where
    F: FnMut() -> HttpResponse,
{
    let mut sleep = BASE_SLEEP;
    let mut attempt = 1usize;

    loop {
        let response = request();

        if !response.is_server_error() || attempt >= max_attempts {
            return response;
        }

        if attempt == DEGRADED_AFTER {
            warn!(
                code = response.code(),
                "detected degraded connection quality after {} server errors", attempt
            );
        }

        std::thread::sleep(sleep);
        sleep = (sleep * 2).min(MAX_SLEEP);
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn counting<F>(counter: &AtomicUsize, mut status: F) -> impl FnMut() -> HttpResponse + '_
    where
        F: FnMut(usize) -> u16 + 'static,
    {
        move || {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            HttpResponse::new(status(call), vec![])
        }
    }

    #[test]
    fn test_success_on_first_attempt() {
        let calls = AtomicUsize::new(0);
        let response = execute(counting(&calls, |_| 200), 10);

        assert_eq!(response.code(), 200);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_server_errors_retried_until_success() {
        let calls = AtomicUsize::new(0);
        let start = Instant::now();
        let response = execute(counting(&calls, |call| if call < 2 { 503 } else { 200 }), 10);

        assert_eq!(response.code(), 200);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Backoff doubles: 1ms + 2ms before the third attempt.
        assert!(start.elapsed() >= Duration::from_millis(3));
    }

    #[test]
    fn test_client_error_not_retried() {
        let calls = AtomicUsize::new(0);
        let response = execute(counting(&calls, |_| 404), 10);

        assert_eq!(response.code(), 404);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transport_failure_not_retried() {
        let calls = AtomicUsize::new(0);
        let response = execute(counting(&calls, |_| 0), 10);

        assert_eq!(response.code(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_attempt_budget_exhausted() {
        let calls = AtomicUsize::new(0);
        let response = execute(counting(&calls, |_| 503), 4);

        assert_eq!(response.code(), 503);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_zero_budget_still_invokes_once() {
        let calls = AtomicUsize::new(0);
        let response = execute(counting(&calls, |_| 503), 0);

        assert_eq!(response.code(), 503);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_last_response_returned_on_failure() {
        let calls = AtomicUsize::new(0);
        let response = execute(counting(&calls, |call| 500 + call as u16), 3);

        assert_eq!(response.code(), 502);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
