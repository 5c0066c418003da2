//! Navigation error classification for embedded dashboard views.
//!
//! Web views report a cancelled navigation as an error whenever a page load is
//! superseded (redirects, a second `load` before the first finished). Those
//! are not failures. [`NavigationCompletion`] resolves a pending navigation,
//! turning an ignorable cancellation into success and passing every other
//! error through unchanged.

use thiserror::Error;
use tracing::debug;

/// Error domain of URL loading errors.
pub const URL_ERROR_DOMAIN: &str = "NSURLErrorDomain";
/// URL loading error code for a cancelled load.
pub const URL_ERROR_CANCELLED: i64 = -999;
/// URL loading error code for a timed-out load.
pub const URL_ERROR_TIMED_OUT: i64 = -1001;

/// Returns true iff `(domain, code)` is a cancelled URL load.
pub fn is_ignorable(domain: &str, code: i64) -> bool {
    domain == URL_ERROR_DOMAIN && code == URL_ERROR_CANCELLED
}

/// An error reported by a web view navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Navigation failed ({domain} {code})")]
pub struct NavigationError {
    /// Error domain.
    pub domain: String,
    /// Domain-specific error code.
    pub code: i64,
}

impl NavigationError {
    /// Creates a new navigation error.
    pub fn new(domain: impl Into<String>, code: i64) -> Self {
        Self {
            domain: domain.into(),
            code,
        }
    }

    /// A cancelled URL load.
    pub fn cancelled() -> Self {
        Self::new(URL_ERROR_DOMAIN, URL_ERROR_CANCELLED)
    }

    /// A timed-out URL load.
    pub fn timed_out() -> Self {
        Self::new(URL_ERROR_DOMAIN, URL_ERROR_TIMED_OUT)
    }

    /// Returns true if this error is an expected cancellation.
    pub fn is_ignorable(&self) -> bool {
        is_ignorable(&self.domain, self.code)
    }
}

type Completion = Box<dyn FnOnce(Result<(), NavigationError>) + Send>;

/// Resolves one pending navigation exactly once.
pub struct NavigationCompletion {
    completion: Option<Completion>,
}

impl NavigationCompletion {
    /// Wraps the callback to run when the navigation settles.
    pub fn new<F>(completion: F) -> Self
    where
        F: FnOnce(Result<(), NavigationError>) + Send + 'static,
    {
        Self {
            completion: Some(Box::new(completion)),
        }
    }

    /// The navigation finished loading.
    pub fn did_finish(&mut self) {
        self.resolve(Ok(()));
    }

    /// The navigation failed with `error`.
    ///
    /// Cancellations resolve as success.
    pub fn did_fail(&mut self, error: NavigationError) {
        if error.is_ignorable() {
            debug!(domain = %error.domain, code = error.code, "Ignoring cancelled navigation");
            self.resolve(Ok(()));
        } else {
            self.resolve(Err(error));
        }
    }

    /// Returns true once the callback has run.
    pub fn is_resolved(&self) -> bool {
        self.completion.is_none()
    }

    fn resolve(&mut self, result: Result<(), NavigationError>) {
        match self.completion.take() {
            Some(completion) => completion(result),
            None => debug!(?result, "Navigation already resolved, dropping event"),
        }
    }
}

impl std::fmt::Debug for NavigationCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationCompletion")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
