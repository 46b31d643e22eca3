//! Redirect budget accounting for a single hop of a redirect chain.
//!
//! The client disables the transport's own redirect handling and asks
//! [`next_hop`] what to do with every response it receives.

use super::constants::REDIRECT_STATUSES;
use super::options::Method;

/// What the client does with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStep {
    /// Request the `Location` URL, spending one unit of budget.
    Follow,
    /// Return this response to the caller.
    Return,
    /// Fail with a redirect-limit error.
    LimitExceeded,
}

/// Returns true for the status codes that trigger redirect handling.
#[must_use]
pub fn is_redirect_status(status: u16) -> bool {
    REDIRECT_STATUSES.contains(&status)
}

/// Decides the next step for a response.
///
/// `limit` is the effective limit for the call and `remaining` the budget
/// left before this hop. A limit of zero means "never follow": the
/// redirect response itself is the result. A positive limit whose budget
/// is spent turns the next redirect into an error.
#[must_use]
pub fn next_hop(status: u16, has_location: bool, limit: u32, remaining: u32) -> RedirectStep {
    if !is_redirect_status(status) || !has_location || limit == 0 {
        return RedirectStep::Return;
    }
    if remaining == 0 {
        RedirectStep::LimitExceeded
    } else {
        RedirectStep::Follow
    }
}

/// Method for the request that follows a redirect.
///
/// A 303 always continues with GET (HEAD stays HEAD); other codes keep the method.
#[must_use]
pub fn method_after_redirect(status: u16, method: Method) -> Method {
    if status == 303 && method != Method::Head {
        Method::Get
    } else {
        method
    }
}
