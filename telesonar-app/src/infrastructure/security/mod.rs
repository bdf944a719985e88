mod clock;
mod rate_limiter;
mod response_sanitizer;

pub use clock::{Clock, SystemClock};
pub use rate_limiter::{RateLimiter, DEFAULT_MAX_TRACKED};
pub use response_sanitizer::{ResponseSanitizer, Step, STEPS};
