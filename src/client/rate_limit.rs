use tokio::time::Duration;

/// Requests allowed per window. The API's own limit is 60 per minute.
#[cfg_attr(not(feature = "rate-limit"), allow(dead_code))]
pub(crate) const REQUESTS_PER_WINDOW: u8 = 55;

/// Length of a rate limiting window.
#[cfg_attr(not(feature = "rate-limit"), allow(dead_code))]
pub(crate) const WINDOW_DURATION: Duration = Duration::from_secs(60);

#[cfg(feature = "rate-limit")]
mod tokio_rate_limit;
#[cfg(feature = "rate-limit")]
pub(crate) use tokio_rate_limit::RateLimit;

#[cfg(not(feature = "rate-limit"))]
mod dummy_rate_limit;
#[cfg(not(feature = "rate-limit"))]
pub(crate) use dummy_rate_limit::RateLimit;
