//! Opt-in bounded retry around a fetch.
//!
//! `fetch` itself never retries. Callers that want it wrap the call in
//! [`run_with_retry`]; only transport failures (timeouts, refused connections,
//! DNS) are retried, everything else is returned on the first attempt.

mod classify;
mod policy;
mod run;

pub use classify::classify;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
