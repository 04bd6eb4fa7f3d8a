//! Mock transport state for the direct-dispatch pipeline.
//!
//! # Design
//! These types describe one HTTP message exchange as plain data. Nothing
//! here ever touches a network — the dispatcher and the filter stages share
//! these carriers by reference so a filter can reject a call by writing a
//! failure status into the response side, and the dispatcher can observe
//! that status without a real round trip.
//!
//! Both carriers are passive value holders with no error conditions of
//! their own.

/// Default declared content type for responses.
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Request-side transport state.
///
/// `http_method` is unset until a call starts; the dispatcher marks it at
/// the top of every pipeline run. `response_content_type` declares which
/// codec the error-translation step should use when recovering a typed
/// error body.
#[derive(Debug, Clone)]
pub struct MockHttpRequest {
    pub http_method: Option<HttpMethod>,
    pub response_content_type: String,
}

impl Default for MockHttpRequest {
    fn default() -> Self {
        Self {
            http_method: None,
            response_content_type: APPLICATION_JSON.to_string(),
        }
    }
}

impl MockHttpRequest {
    /// Mark the call's method. Side effect only, no validation.
    pub fn set_method(&mut self, method: HttpMethod) {
        self.http_method = Some(method);
    }
}

/// Response-side transport state.
///
/// Mutated by the filter stages and read by the dispatcher's
/// error-translation step. A status code below 400 means success.
#[derive(Debug, Clone)]
pub struct MockHttpResponse {
    pub status_code: u16,
    pub status_text: String,
    pub content_type: String,
    body: Vec<u8>,
}

impl Default for MockHttpResponse {
    fn default() -> Self {
        Self {
            status_code: 200,
            status_text: "OK".to_string(),
            content_type: APPLICATION_JSON.to_string(),
            body: Vec::new(),
        }
    }
}

impl MockHttpResponse {
    /// The currently buffered response bytes (empty if never written).
    pub fn read_body(&self) -> &[u8] {
        &self.body
    }

    /// Replace the buffered response bytes.
    pub fn write_body(&mut self, bytes: impl Into<Vec<u8>>) {
        self.body = bytes.into();
    }

    /// Set status code and text in one go.
    pub fn set_status(&mut self, code: u16, text: impl Into<String>) {
        self.status_code = code;
        self.status_text = text.into();
    }

    /// Whether the buffered status indicates failure.
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}
