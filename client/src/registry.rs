//! Operation registry backing the GET-by-name lookup.
//!
//! # Design
//! The convention is "the request type lives in the same module as the
//! response type and is named after the operation." Rather than resolving
//! that at call time with reflection, request types are registered up front
//! under their fully-qualified path (`std::any::type_name`), and the lookup
//! recombines the response type's module path with the operation name. The
//! same `type_name` call produces both sides, so the harness only depends
//! on it being self-consistent within one build.

use std::any::{type_name, Any};
use std::collections::HashMap;

type RequestFactory = Box<dyn Fn() -> Box<dyn Any>>;

/// Startup-populated table mapping fully-qualified request type paths to
/// default-constructing factories.
#[derive(Default)]
pub struct OperationRegistry {
    factories: HashMap<&'static str, RequestFactory>,
}

impl OperationRegistry {
    /// Register `R` under its fully-qualified type path.
    pub fn register<R: Default + Any>(&mut self) {
        self.factories
            .insert(type_name::<R>(), Box::new(|| Box::new(R::default())));
    }

    /// Build a default instance of the request type registered at
    /// `type_path`, if any.
    pub fn create(&self, type_path: &str) -> Option<Box<dyn Any>> {
        self.factories.get(type_path).map(|factory| factory())
    }
}

/// The conventional request type path for `operation_name`, derived from
/// the response type's module path.
pub(crate) fn request_type_path<TResponse: Any>(operation_name: &str) -> String {
    match type_name::<TResponse>().rsplit_once("::") {
        Some((module_path, _)) => format!("{module_path}::{operation_name}"),
        None => operation_name.to_string(),
    }
}
