//! The direct dispatcher: one request/response cycle per call.
//!
//! # Design
//! `DirectClient` lets a test suite invoke service operations exactly as a
//! real client would — request object in, typed response or [`ClientError`]
//! out — while dispatching in-process. Each supported call walks the same
//! pipeline: mark the method on the request-side transport state, run the
//! request filters, execute, run the response filters, and translate any
//! >= 400 status a filter stage surfaced into a [`ServiceFault`].
//!
//! The client is deliberately single-threaded (`Rc` + `RefCell`): transport
//! state is confined to one call at a time, and callers wanting parallelism
//! construct one client per test thread. The transport carriers are
//! long-lived and are not reset between calls.

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::error::{ClientError, CodecError, ServiceFault};
use crate::host::{
    CallContext, ContentTypes, JsonContentTypes, NoFilters, RequestAttributes, RequestFilters,
    ResponseFilters, ServiceController,
};
use crate::http::{HttpMethod, MockHttpRequest, MockHttpResponse};
use crate::registry::{self, OperationRegistry};
use crate::rest::{ResponseDto, ServiceClient};

/// In-process stand-in for a networked service client.
pub struct DirectClient {
    controller: Rc<dyn ServiceController>,
    request_filters: Rc<dyn RequestFilters>,
    response_filters: Rc<dyn ResponseFilters>,
    content_types: Rc<dyn ContentTypes>,
    operations: OperationRegistry,
    http_req: RefCell<MockHttpRequest>,
    http_res: RefCell<MockHttpResponse>,
}

impl DirectClient {
    /// A client with no filters, the JSON codec, and an empty operation
    /// registry.
    pub fn new(controller: Rc<dyn ServiceController>) -> Self {
        Self {
            controller,
            request_filters: Rc::new(NoFilters),
            response_filters: Rc::new(NoFilters),
            content_types: Rc::new(JsonContentTypes),
            operations: OperationRegistry::default(),
            http_req: RefCell::new(MockHttpRequest::default()),
            http_res: RefCell::new(MockHttpResponse::default()),
        }
    }

    pub fn with_request_filters(mut self, filters: Rc<dyn RequestFilters>) -> Self {
        self.request_filters = filters;
        self
    }

    pub fn with_response_filters(mut self, filters: Rc<dyn ResponseFilters>) -> Self {
        self.response_filters = filters;
        self
    }

    pub fn with_content_types(mut self, content_types: Rc<dyn ContentTypes>) -> Self {
        self.content_types = content_types;
        self
    }

    pub fn with_operations(mut self, operations: OperationRegistry) -> Self {
        self.operations = operations;
        self
    }

    /// Request-side transport state, exposed for test assertions and
    /// seeding.
    pub fn http_request(&self) -> &RefCell<MockHttpRequest> {
        &self.http_req
    }

    /// Response-side transport state.
    pub fn http_response(&self) -> &RefCell<MockHttpResponse> {
        &self.http_res
    }

    fn run_pipeline<T: ResponseDto>(
        &self,
        request: Box<dyn Any>,
        method: HttpMethod,
        attributes: RequestAttributes,
    ) -> Result<T, ClientError> {
        self.http_req.borrow_mut().set_method(method);

        if self.apply_request_filters::<T>(request.as_ref())? {
            // A filter fully handled the call without rejecting it.
            return Ok(T::default());
        }

        let response = self.controller.execute(
            request.as_ref(),
            &CallContext {
                http_req: &self.http_req,
                http_res: &self.http_res,
                request: request.as_ref(),
                attributes,
            },
        );

        // Short-circuit or not, a surviving response-filter stage hands the
        // already-computed result back to the caller.
        self.apply_response_filters::<T>(response.as_ref())?;

        Self::downcast_response(response)
    }

    fn apply_request_filters<T: ResponseDto>(&self, request: &dyn Any) -> Result<bool, ClientError> {
        let short_circuited = self.request_filters.apply(
            &mut self.http_req.borrow_mut(),
            &mut self.http_res.borrow_mut(),
            request,
        );
        if short_circuited {
            log::debug!(
                "request filter short-circuited with status {}",
                self.http_res.borrow().status_code
            );
            self.raise_if_error::<T>()?;
        }
        Ok(short_circuited)
    }

    fn apply_response_filters<T: ResponseDto>(&self, response: &dyn Any) -> Result<bool, ClientError> {
        let short_circuited = self.response_filters.apply(
            &mut self.http_req.borrow_mut(),
            &mut self.http_res.borrow_mut(),
            response,
        );
        if short_circuited {
            log::debug!(
                "response filter short-circuited with status {}",
                self.http_res.borrow().status_code
            );
            self.raise_if_error::<T>()?;
        }
        Ok(short_circuited)
    }

    /// Translate a >= 400 status in the response-side state into a
    /// [`ServiceFault`]. Body recovery is best-effort: a codec failure is
    /// logged and the fault is raised without a body, never replaced.
    fn raise_if_error<T: ResponseDto>(&self) -> Result<(), ClientError> {
        let res = self.http_res.borrow();
        if !res.is_error() {
            return Ok(());
        }

        let mut fault = ServiceFault::new(res.status_code, res.status_text.clone());
        let content_type = self.http_req.borrow().response_content_type.clone();
        match self.recover_body::<T>(&content_type, res.read_body()) {
            Ok(body) => fault.response_body = Some(Box::new(body)),
            Err(err) => log::warn!("could not recover typed error body: {err}"),
        }
        Err(fault.into())
    }

    fn recover_body<T: ResponseDto>(&self, content_type: &str, bytes: &[u8]) -> Result<T, CodecError> {
        let value = self.content_types.deserialize(content_type, bytes)?;
        Ok(serde_json::from_value(value)?)
    }

    fn downcast_response<T: ResponseDto>(response: Box<dyn Any>) -> Result<T, ClientError> {
        response
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ClientError::UnexpectedResponseType {
                expected: type_name::<T>(),
            })
    }
}

impl ServiceClient for DirectClient {
    fn send<T, Req>(&self, request: Req) -> Result<T, ClientError>
    where
        T: ResponseDto,
        Req: Any,
    {
        self.run_pipeline(Box::new(request), HttpMethod::Post, RequestAttributes::HttpPost)
    }

    fn send_one_way<Req: Any>(&self, request: Req) {
        let request: Box<dyn Any> = Box::new(request);
        let _ = self.controller.execute(
            request.as_ref(),
            &CallContext {
                http_req: &self.http_req,
                http_res: &self.http_res,
                request: request.as_ref(),
                attributes: RequestAttributes::HttpPost,
            },
        );
    }

    fn get<T: ResponseDto>(&self, operation_name: &str) -> Result<T, ClientError> {
        self.http_req.borrow_mut().set_method(HttpMethod::Get);

        let type_path = registry::request_type_path::<T>(operation_name);
        let request = self
            .operations
            .create(&type_path)
            .ok_or(ClientError::TypeNotFound(type_path))?;

        self.run_pipeline(request, HttpMethod::Get, RequestAttributes::HttpGet)
    }

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
        E: FnOnce(T, ClientError),
    {
        match self.send::<T, Req>(request) {
            Ok(response) => invoke_guarded("success", move || on_success(response)),
            Err(err) => invoke_guarded("error", move || on_error(T::default(), err)),
        }
        Ok(())
    }
}

/// Run a caller-supplied callback, containing any panic it raises. The
/// harness reports pipeline outcomes; it must never die on someone else's
/// callback.
fn invoke_guarded(label: &str, callback: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
        log::error!("{label} callback panicked: {}", panic_message(payload.as_ref()));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
