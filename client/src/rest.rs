//! The full verb surface of a real service client.
//!
//! # Design
//! A real client exposes dozens of verb variants; this harness supports
//! exactly four (`send`, `get`, `send_one_way`, `send_async`) because its
//! job is to validate the filter/dispatch pipeline, not to emulate a whole
//! REST client. The trait still declares the whole surface so test code can
//! hold the same shaped API it would hold in production — every unsupported
//! operation shares one default body that fails loudly with
//! [`ClientError::Unsupported`] and never touches the pipeline.
//!
//! The trait is not object-safe (generic methods); it is meant to be
//! imported and called on a concrete client.

use std::any::Any;
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::MockHttpResponse;

/// Bounds every response type must satisfy: default-constructible for
/// zero-value short-circuits, deserializable for error-body recovery, and
/// `Any` for the direct-dispatch downcast.
pub trait ResponseDto: DeserializeOwned + Default + Any + Send {}

impl<T> ResponseDto for T where T: DeserializeOwned + Default + Any + Send {}

/// Marker connecting a request type to the response type it returns.
pub trait Returns {
    type Response: ResponseDto;
}

/// The capability surface of a service client.
///
/// Required methods are the ones this transport actually implements; all
/// defaulted methods are deliberately unsupported and fail immediately.
pub trait ServiceClient {
    /// Generic send: run the full pipeline with the method marked POST.
    fn send<T, Req>(&self, request: Req) -> Result<T, ClientError>
    where
        T: ResponseDto,
        Req: Any;

    /// Fire-and-forget: execute the request without filters, discarding the
    /// response.
    fn send_one_way<Req: Any>(&self, request: Req);

    /// GET-by-name: resolve the request type from the response type's
    /// module path plus `operation_name`, default-construct it, and run the
    /// full pipeline with the method marked GET.
    fn get<T: ResponseDto>(&self, operation_name: &str) -> Result<T, ClientError>;

    /// Callback-shaped send. Runs the identical pipeline synchronously,
    /// then invokes exactly one of the callbacks: `on_success` with the
    /// result, or `on_error` with a default result value and the fault.
    /// A panic inside either callback is swallowed and logged so the
    /// harness never crashes a test run on its own plumbing.
    fn send_async<T, Req, S, E>(
        &self,
        request: Req,
        on_success: S,
        on_error: E,
    ) -> Result<(), ClientError>
    where
        T: ResponseDto,
        Req: Any,
        S: FnOnce(T),
        E: FnOnce(T, ClientError);

    // Everything below is unsupported by this test transport by design.

    fn send_returning<R: Returns>(&self, _request: R) -> Result<R::Response, ClientError> {
        Err(ClientError::Unsupported("send_returning"))
    }

    fn get_returning<R: Returns>(&self, _request: R) -> Result<R::Response, ClientError> {
        Err(ClientError::Unsupported("get_returning"))
    }

    fn post<T, Req>(&self, _operation_name: &str, _request: Req) -> Result<T, ClientError>
    where
        T: ResponseDto,
        Req: Any,
    {
        Err(ClientError::Unsupported("post"))
    }

    fn put<T, Req>(&self, _operation_name: &str, _request: Req) -> Result<T, ClientError>
    where
        T: ResponseDto,
        Req: Any,
    {
        Err(ClientError::Unsupported("put"))
    }

    fn patch<T, Req>(&self, _operation_name: &str, _request: Req) -> Result<T, ClientError>
    where
        T: ResponseDto,
        Req: Any,
    {
        Err(ClientError::Unsupported("patch"))
    }

    fn delete<T: ResponseDto>(&self, _operation_name: &str) -> Result<T, ClientError> {
        Err(ClientError::Unsupported("delete"))
    }

    fn custom_method<T, Req>(&self, _verb: &str, _request: Req) -> Result<T, ClientError>
    where
        T: ResponseDto,
        Req: Any,
    {
        Err(ClientError::Unsupported("custom_method"))
    }

    fn head(&self, _operation_name: &str) -> Result<MockHttpResponse, ClientError> {
        Err(ClientError::Unsupported("head"))
    }

    fn post_file<T, F>(
        &self,
        _url: &str,
        _file: F,
        _file_name: &str,
        _mime_type: &str,
    ) -> Result<T, ClientError>
    where
        T: ResponseDto,
        F: Read,
    {
        Err(ClientError::Unsupported("post_file"))
    }

    fn post_file_with_request<T, F, Req>(
        &self,
        _url: &str,
        _file: F,
        _file_name: &str,
        _request: Req,
    ) -> Result<T, ClientError>
    where
        T: ResponseDto,
        F: Read,
        Req: Any,
    {
        Err(ClientError::Unsupported("post_file_with_request"))
    }

    fn set_credentials(&self, _user_name: &str, _password: &str) -> Result<(), ClientError> {
        Err(ClientError::Unsupported("set_credentials"))
    }

    fn get_async<T, S, E>(
        &self,
        _operation_name: &str,
        _on_success: S,
        _on_error: E,
    ) -> Result<(), ClientError>
    where
        T: ResponseDto,
        S: FnOnce(T),
        E: FnOnce(T, ClientError),
    {
        Err(ClientError::Unsupported("get_async"))
    }

    fn post_async<T, Req, S, E>(
        &self,
        _operation_name: &str,
        _request: Req,
        _on_success: S,
        _on_error: E,
    ) -> Result<(), ClientError>
    where
        T: ResponseDto,
        Req: Any,
        S: FnOnce(T),
        E: FnOnce(T, ClientError),
    {
        Err(ClientError::Unsupported("post_async"))
    }

    fn put_async<T, Req, S, E>(
        &self,
        _operation_name: &str,
        _request: Req,
        _on_success: S,
        _on_error: E,
    ) -> Result<(), ClientError>
    where
        T: ResponseDto,
        Req: Any,
        S: FnOnce(T),
        E: FnOnce(T, ClientError),
    {
        Err(ClientError::Unsupported("put_async"))
    }

    fn delete_async<T, S, E>(
        &self,
        _operation_name: &str,
        _on_success: S,
        _on_error: E,
    ) -> Result<(), ClientError>
    where
        T: ResponseDto,
        S: FnOnce(T),
        E: FnOnce(T, ClientError),
    {
        Err(ClientError::Unsupported("delete_async"))
    }

    fn custom_method_async<T, Req, S, E>(
        &self,
        _verb: &str,
        _request: Req,
        _on_success: S,
        _on_error: E,
    ) -> Result<(), ClientError>
    where
        T: ResponseDto,
        Req: Any,
        S: FnOnce(T),
        E: FnOnce(T, ClientError),
    {
        Err(ClientError::Unsupported("custom_method_async"))
    }

    /// Cancellation is not a thing in a synchronous single-attempt
    /// pipeline; calling this is always an error, never a silent no-op.
    fn cancel_async(&self) -> Result<(), ClientError> {
        Err(ClientError::Unsupported("cancel_async"))
    }
}
