//! Collaborator seams the dispatcher calls out to.
//!
//! # Design
//! The dispatcher orchestrates one call but owns none of the interesting
//! behavior: request execution, the filter stages, and the error-body codec
//! are all injected through the traits here. Payloads cross these seams as
//! `&dyn Any` because the pipeline is dispatch-by-identity — no bytes are
//! serialized on the happy path, exactly like an in-process call.
//!
//! `NoFilters` and `JsonContentTypes` are the defaults a plain
//! `DirectClient::new` wires in; tests swap in their own implementations to
//! force short-circuits or exotic content types.

use std::any::Any;
use std::cell::RefCell;

use crate::error::CodecError;
use crate::http::{MockHttpRequest, MockHttpResponse, APPLICATION_JSON};

/// How the call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAttributes {
    HttpGet,
    HttpPost,
}

/// Per-call metadata handed to the execution collaborator.
///
/// Created fresh for every invocation and discarded when the call returns.
/// Carries shared handles to the transport state so the collaborator can
/// write a failure status the same way a filter would.
pub struct CallContext<'a> {
    pub http_req: &'a RefCell<MockHttpRequest>,
    pub http_res: &'a RefCell<MockHttpResponse>,
    pub request: &'a dyn Any,
    pub attributes: RequestAttributes,
}

/// The opaque execution collaborator: routes a request payload to its
/// handler and returns the response payload.
///
/// A panic raised in here propagates to the caller unmodified; the
/// dispatcher does not catch it. Domain failures are instead expected to be
/// written into `ctx.http_res` as a >= 400 status.
pub trait ServiceController {
    fn execute(&self, request: &dyn Any, ctx: &CallContext<'_>) -> Box<dyn Any>;
}

/// Pre-execution filter stage. Returning `true` means a filter
/// short-circuited the call; whether that is a rejection or a benign
/// "already handled" is decided by the status it left in `res`.
pub trait RequestFilters {
    fn apply(
        &self,
        req: &mut MockHttpRequest,
        res: &mut MockHttpResponse,
        request: &dyn Any,
    ) -> bool;
}

/// Post-execution filter stage. Same short-circuit contract as
/// [`RequestFilters`], applied to the response payload.
pub trait ResponseFilters {
    fn apply(
        &self,
        req: &mut MockHttpRequest,
        res: &mut MockHttpResponse,
        response: &dyn Any,
    ) -> bool;
}

/// Filter stage that never short-circuits. The default for both stages.
pub struct NoFilters;

impl RequestFilters for NoFilters {
    fn apply(&self, _: &mut MockHttpRequest, _: &mut MockHttpResponse, _: &dyn Any) -> bool {
        false
    }
}

impl ResponseFilters for NoFilters {
    fn apply(&self, _: &mut MockHttpRequest, _: &mut MockHttpResponse, _: &dyn Any) -> bool {
        false
    }
}

/// Codec resolver, used only for best-effort error-body recovery.
pub trait ContentTypes {
    /// Parse `bytes` according to `content_type` into an untyped value the
    /// dispatcher then shapes into the caller's expected response type.
    fn deserialize(&self, content_type: &str, bytes: &[u8]) -> Result<serde_json::Value, CodecError>;
}

/// Default codec registry: JSON only.
pub struct JsonContentTypes;

impl ContentTypes for JsonContentTypes {
    fn deserialize(&self, content_type: &str, bytes: &[u8]) -> Result<serde_json::Value, CodecError> {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        if essence != APPLICATION_JSON {
            return Err(CodecError::UnknownContentType(content_type.to_string()));
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}
