//! Error plumbing shared by startup code and the user source.
//!
//! Fetch failures travel as `DynError` and are shown through `Display`, so
//! anything returned by [`UserSource::fetch_users`] must not be wrapped with
//! context: the user sees exactly the message the source produced. Context is
//! for startup failures (runtime, log file, terminal).
//!
//! [`UserSource::fetch_users`]: crate::net::UserSource::fetch_users
use std::fmt::{Display, Formatter};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Attach a lazily built context string, rendered as `context: source`.
pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

/// A message-only error, e.g. the fixed text used for a non-2xx directory response.
#[derive(Debug)]
pub struct SimpleError(pub String);

impl SimpleError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SimpleError {}

pub fn simple_error(msg: impl Into<String>) -> DynError {
    Box::new(SimpleError::new(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_error_displays_message_verbatim() {
        let err = simple_error("Something went wrong!");
        assert_eq!(err.to_string(), "Something went wrong!");
    }

    #[test]
    fn with_ctx_prefixes_context_and_keeps_source() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = res.with_ctx(|| "open log".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "open log: missing");
        assert!(std::error::Error::source(&*err).is_some());
    }
}
