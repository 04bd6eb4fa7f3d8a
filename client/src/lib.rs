//! Test-only, in-process stand-in for a networked service client.
//!
//! # Overview
//! `DirectClient` lets a test suite invoke service operations exactly as a
//! real client would — request object in, typed response or typed error out
//! — without opening a socket or serializing bytes. Calls dispatch straight
//! to an injected execution collaborator, with request/response filter
//! stages interposed around it; any >= 400 status a filter stage surfaces
//! is translated into one uniform `ServiceFault`.
//!
//! # Design
//! - Payloads cross the collaborator seams as `&dyn Any`; the happy path
//!   never serializes. Only error translation touches bytes, to recover a
//!   best-effort typed fault body from the mock transport state.
//! - The `ServiceClient` trait declares the full verb surface of a real
//!   client; this transport implements four operations and fails every
//!   other verb loudly with `ClientError::Unsupported`.
//! - Single-threaded by construction. One client per logical test thread;
//!   "async" entry points are synchronous calls in callback clothing.

pub mod client;
pub mod error;
pub mod host;
pub mod http;
pub mod registry;
pub mod rest;

pub use client::DirectClient;
pub use error::{ClientError, CodecError, ServiceFault};
pub use host::{
    CallContext, ContentTypes, JsonContentTypes, NoFilters, RequestAttributes, RequestFilters,
    ResponseFilters, ServiceController,
};
pub use http::{HttpMethod, MockHttpRequest, MockHttpResponse, APPLICATION_JSON};
pub use registry::OperationRegistry;
pub use rest::{ResponseDto, Returns, ServiceClient};
