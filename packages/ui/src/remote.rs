//! View state for data fetched from the backend.

/// Banner text when the backend rejects the session token.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// The last good value of a query, whether a fetch is running, and the
/// banner text of the last failure.
///
/// A failed fetch keeps whatever was loaded before it.
#[derive(Clone, Debug, PartialEq)]
pub struct Remote<T> {
    data: Option<T>,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
        }
    }
}

impl<T> Remote<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Record the outcome of a fetch; `fallback` is shown when the backend gave no message.
    pub fn finish(&mut self, result: api::Result<T>, fallback: &str) {
        self.loading = false;
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("{}: {}", fallback, e);
                self.error = Some(SESSION_EXPIRED.to_string());
            }
            Err(e) => {
                tracing::warn!("{}: {}", fallback, e);
                self.error = Some(e.user_message(fallback));
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Loading with nothing to show yet.
    pub fn is_pending(&self) -> bool {
        self.loading && self.data.is_none() && self.error.is_none()
    }
}
