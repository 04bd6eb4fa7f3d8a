//! Error types for the direct client.
//!
//! # Design
//! `ServiceFault` is the one error a well-behaved caller should expect from
//! a supported operation: any filter stage that leaves a >= 400 status in
//! the response-side transport state is translated into it. The fault
//! carries a best-effort typed body recovered from the buffered response
//! bytes; recovery failures never replace the fault itself.
//!
//! Everything else in `ClientError` is a harness-usage error: calling a
//! verb this transport deliberately does not implement, naming an operation
//! the registry cannot resolve, or wiring up a controller that returns the
//! wrong payload type.

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// The uniform typed error raised for any >= 400 outcome.
#[derive(Error)]
#[error("service fault, status: {status_code} {status_text}")]
pub struct ServiceFault {
    pub status_code: u16,
    pub status_text: String,
    pub(crate) response_body: Option<Box<dyn Any + Send>>,
}

impl ServiceFault {
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            response_body: None,
        }
    }

    /// The recovered response body, if error translation managed to
    /// deserialize one, typed as the caller's expected response type.
    pub fn body_as<T: Any>(&self) -> Option<&T> {
        self.response_body.as_deref().and_then(|body| body.downcast_ref())
    }
}

impl fmt::Debug for ServiceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceFault")
            .field("status_code", &self.status_code)
            .field("status_text", &self.status_text)
            .field(
                "response_body",
                if self.response_body.is_some() { &"Some(..)" } else { &"None" },
            )
            .finish()
    }
}

/// Errors surfaced by `DirectClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A filter stage signalled failure; see [`ServiceFault`].
    #[error(transparent)]
    ServiceFault(#[from] ServiceFault),

    /// The operation is deliberately not implemented by this test
    /// transport. Carries the operation name.
    #[error("operation not supported by this test transport: {0}")]
    Unsupported(&'static str),

    /// GET-by-name could not resolve a request type. Carries the attempted
    /// fully-qualified type path.
    #[error("request type not found: {0}")]
    TypeNotFound(String),

    /// The execution collaborator returned a payload that is not the
    /// caller's expected response type.
    #[error("response payload was not the expected type {expected}")]
    UnexpectedResponseType { expected: &'static str },
}

/// Errors from the content-type codec seam, used only during best-effort
/// error-body recovery.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("no deserializer registered for content type {0:?}")]
    UnknownContentType(String),

    #[error("payload could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}
