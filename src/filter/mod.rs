//! Webhook filter handling.
//!
//! This module provides:
//! - The polymorphic filter argument codec ([`decode`], [`encode`], [`RawArg`])
//! - Filters in wire form ([`WebhookFilter`]) and flat form ([`FilterState`])
//! - A case-sensitive membership check ([`string_in_slice`])

mod argument;
mod error;
mod state;


pub use argument::{FilterArgument, RawArg, decode, encode};
pub use error::FilterError;
pub use state::{FilterArgumentState, FilterState, FilterType, WebhookFilter};

/// Returns true if `probe` is exactly one of `candidates`.
///
/// Comparison is case-sensitive; an empty candidate list never matches.
#[must_use]
pub fn string_in_slice<S: AsRef<str>>(candidates: &[S], probe: &str) -> bool {
    candidates.iter().any(|candidate| candidate.as_ref() == probe)
}
