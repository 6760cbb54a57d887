//! Retrying HTTP fetch for upstream forecast requests.
//!
//! A GET is attempted up to `max_attempts` times; a failed attempt (either
//! a transport error or a non-2xx status) is followed by an exponentially
//! growing delay, except after the final attempt. Attempts are strictly
//! sequential, and the only suspension points are the request itself and
//! the backoff sleep.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Attempt budget and backoff schedule for [`fetch_with_retry`].
///
/// The delay after failed attempt `k` (0-indexed) is `base_delay * 2^k`,
/// so the defaults wait 1s then 2s between the three attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1)
    pub max_attempts: u32,
    /// Delay before the first retry; doubles after each further failure
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep after failed attempt `attempt` (0-indexed), or `None`
    /// when that attempt was the last one.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts.max(1) {
            None
        } else {
            Some(self.base_delay * 2u32.pow(attempt))
        }
    }
}

/// All attempts were exhausted without an ok response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The final attempt failed at the transport level (connect, timeout,
    /// or reading the body)
    #[error("upstream request failed after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The final attempt returned a non-success status
    #[error("upstream returned {status} after {attempts} attempt(s)")]
    Status { attempts: u32, status: StatusCode },
}

/// Outcome of a single attempt, kept separate so the loop can decide
/// whether to retry before the failure is promoted to a [`FetchError`].
enum AttemptFailure {
    Transport(reqwest::Error),
    Status(StatusCode),
}

impl AttemptFailure {
    fn into_error(self, attempts: u32) -> FetchError {
        match self {
            AttemptFailure::Transport(source) => FetchError::Transport { attempts, source },
            AttemptFailure::Status(status) => FetchError::Status { attempts, status },
        }
    }

    fn describe(&self) -> String {
        match self {
            AttemptFailure::Transport(e) => e.to_string(),
            AttemptFailure::Status(status) => format!("status {status}"),
        }
    }
}

/// Performs a GET against `url`, retrying per `policy`, and returns the body
/// of the first successful response.
///
/// GET semantics make repeated identical requests safe; nothing is mutated
/// upstream by a retry.
pub async fn fetch_with_retry(
    client: &Client,
    url: Url,
    policy: &RetryPolicy,
) -> Result<String, FetchError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match attempt_once(client, url.clone()).await {
            Ok(body) => return Ok(body),
            Err(failure) => match policy.delay_after(attempt) {
                Some(delay) => {
                    log::warn!(
                        "upstream attempt {}/{} failed ({}); retrying in {:?}",
                        attempt + 1,
                        max_attempts,
                        failure.describe(),
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    log::warn!(
                        "upstream attempt {}/{} failed ({}); giving up",
                        attempt + 1,
                        max_attempts,
                        failure.describe()
                    );
                    return Err(failure.into_error(max_attempts));
                }
            },
        }
    }
}

async fn attempt_once(client: &Client, url: Url) -> Result<String, AttemptFailure> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(AttemptFailure::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AttemptFailure::Status(status));
    }

    response.text().await.map_err(AttemptFailure::Transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_contract() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_backoff_schedule_doubles_per_failure() {
        let policy = RetryPolicy {
            max_attempts: 4,
            ..Default::default()
        };
        assert_eq!(policy.delay_after(0), Some(Duration::from_millis(1000)));
        assert_eq!(policy.delay_after(1), Some(Duration::from_millis(2000)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_millis(4000)));
    }

    #[test]
    fn test_no_delay_after_final_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(0), Some(Duration::from_millis(1000)));
        assert_eq!(policy.delay_after(1), Some(Duration::from_millis(2000)));
        assert_eq!(policy.delay_after(2), None);
        assert_eq!(policy.delay_after(3), None);
    }

    #[test]
    fn test_single_attempt_policy_never_sleeps() {
        let policy = RetryPolicy {
            max_attempts: 1,
            ..Default::default()
        };
        assert_eq!(policy.delay_after(0), None);
    }

    #[test]
    fn test_zero_attempts_is_treated_as_one() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(policy.delay_after(0), None);
    }

    #[tokio::test]
    async fn test_connection_refused_surfaces_as_transport_error() {
        // Bind then drop a listener so the port is free but unserved
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/v1/forecast")).unwrap();
        let policy = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
        };

        let err = fetch_with_retry(&Client::new(), url, &policy)
            .await
            .unwrap_err();
        match err {
            FetchError::Transport { attempts, .. } => assert_eq!(attempts, 2),
            FetchError::Status { .. } => panic!("expected a transport error"),
        }
    }
}
