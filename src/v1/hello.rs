#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object, param::Query };

use crate::greeter::{self, DEFAULT_NAME};
use crate::utils::hello_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct HelloApi;

#[derive(Debug)]
struct ReqHello
{
    name: String,
}

#[derive(Object, Debug)]
pub struct RespHello
{
    message: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqHello {
    type Req = ReqHello;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request:");
        s.push_str("\n    name: ");
        s.push_str(&self.name);
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HelloApi {
    /// Greet the named caller.  The default name is used when the name
    /// query parameter is absent; an empty value is greeted as given.
    #[oai(path = "/hello", method = "get")]
    async fn hello_api(&self, http_req: &Request, name: Query<Option<String>>) -> Json<RespHello> {
        // Package the request parameters.
        let req = ReqHello {name: name.0.unwrap_or_else(|| DEFAULT_NAME.to_string())};

        // -------------------- Process Request ----------------------
        Json(RespHello::process(http_req, &req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespHello {
    /// Create a new response.
    fn new(message: String) -> Self {
        Self {message}
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqHello) -> RespHello {
        // Conditional logging depending on log level.
        hello_utils::debug_request(http_req, req);

        Self::new(greeter::hello(&req.name))
    }
}
