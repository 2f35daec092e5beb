//! Network safety checks for outbound lookups.
//!
//! Page features fetch user-supplied URLs. Every hop is validated before a
//! request is sent, and the fetch client resolves names through
//! [`SafeResolver`] so the address it connects to has passed the same check.

mod safe_resolver;
mod url_validation;

pub use safe_resolver::SafeResolver;
pub use url_validation::{
    check_address, validate_fetch_target, validate_fetch_target_with, AddressPolicy, UnsafeTarget,
};
