//! Test fixture service for the direct client.
//!
//! # Design
//! Plays the role a real service registry would play behind the dispatch
//! pipeline: sample DTO contracts plus a `DemoController` that routes
//! request payloads by downcast. The contracts are defined here, apart from
//! the client crate, so the GET-by-name convention ("request type lives in
//! the same module as its response type") is exercised across a real crate
//! boundary.
//!
//! `DemoController` counts its invocations so tests can assert whether a
//! filter short-circuit reached the execution step or not.

use std::any::Any;
use std::cell::Cell;

use direct_client::{CallContext, ServiceController};

pub mod contracts {
    //! Sample request/response DTOs.

    use direct_client::Returns;
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// Error detail convention carried inside response DTOs.
    #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ResponseStatus {
        pub error_code: String,
        pub message: String,
    }

    #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Ping;

    #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PingResponse {
        #[serde(default)]
        pub response_status: Option<ResponseStatus>,
    }

    impl Returns for Ping {
        type Response = PingResponse;
    }

    #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GetUsers;

    #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GetUsersResponse {
        pub users: Vec<User>,
        #[serde(default)]
        pub response_status: Option<ResponseStatus>,
    }

    impl Returns for GetUsers {
        type Response = GetUsersResponse;
    }
}

use contracts::{GetUsers, GetUsersResponse, Ping, PingResponse, User};

/// Routes request payloads by downcast and tracks how often it ran.
///
/// Unknown payloads write 404 into the shared response state and answer
/// with a unit payload, the way a real execution engine reports a missing
/// route through the transport state rather than by panicking.
#[derive(Default)]
pub struct DemoController {
    calls: Cell<usize>,
}

impl DemoController {
    /// How many times `execute` has run.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ServiceController for DemoController {
    fn execute(&self, request: &dyn Any, ctx: &CallContext<'_>) -> Box<dyn Any> {
        self.calls.set(self.calls.get() + 1);

        if request.downcast_ref::<Ping>().is_some() {
            return Box::new(PingResponse::default());
        }
        if request.downcast_ref::<GetUsers>().is_some() {
            return Box::new(GetUsersResponse {
                users: canned_users(),
                response_status: None,
            });
        }

        ctx.http_res.borrow_mut().set_status(404, "Not Found");
        Box::new(())
    }
}

fn canned_users() -> Vec<User> {
    vec![
        User {
            id: uuid::Uuid::from_u128(1),
            name: "alice".to_string(),
        },
        User {
            id: uuid::Uuid::from_u128(2),
            name: "bob".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use direct_client::{MockHttpRequest, MockHttpResponse, RequestAttributes};

    use super::*;

    fn context<'a>(
        req: &'a RefCell<MockHttpRequest>,
        res: &'a RefCell<MockHttpResponse>,
        request: &'a dyn Any,
    ) -> CallContext<'a> {
        CallContext {
            http_req: req,
            http_res: res,
            request,
            attributes: RequestAttributes::HttpPost,
        }
    }

    #[test]
    fn ping_gets_a_default_response() {
        let controller = DemoController::default();
        let req = RefCell::new(MockHttpRequest::default());
        let res = RefCell::new(MockHttpResponse::default());
        let ping = Ping;

        let response = controller.execute(&ping, &context(&req, &res, &ping));
        assert!(response.downcast_ref::<PingResponse>().is_some());
        assert_eq!(controller.calls(), 1);
    }

    #[test]
    fn get_users_returns_deterministic_users() {
        let controller = DemoController::default();
        let req = RefCell::new(MockHttpRequest::default());
        let res = RefCell::new(MockHttpResponse::default());
        let get_users = GetUsers;

        let response = controller.execute(&get_users, &context(&req, &res, &get_users));
        let response = response.downcast_ref::<GetUsersResponse>().unwrap();
        assert_eq!(response.users.len(), 2);
        assert_eq!(response.users[0].name, "alice");
    }

    #[test]
    fn unknown_request_marks_404_in_shared_state() {
        let controller = DemoController::default();
        let req = RefCell::new(MockHttpRequest::default());
        let res = RefCell::new(MockHttpResponse::default());
        let bogus = "no such operation";

        let response = controller.execute(&bogus, &context(&req, &res, &bogus));
        assert!(response.downcast_ref::<()>().is_some());
        assert_eq!(res.borrow().status_code, 404);
        assert_eq!(res.borrow().status_text, "Not Found");
    }

    #[test]
    fn contracts_serialize_round_trip() {
        let users = GetUsersResponse {
            users: canned_users(),
            response_status: None,
        };
        let json = serde_json::to_string(&users).unwrap();
        let back: GetUsersResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, users);
    }
}
