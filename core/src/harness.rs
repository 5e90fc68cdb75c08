#![deny(missing_docs)]

//! # Request Harness
//!
//! Builds a request through a [`Describer`], hands it to a caller-supplied
//! [`Requester`] and pairs the actual response with the expected one. The harness
//! itself never touches the network.

use crate::describer::Describer;
use crate::error::{AppError, AppResult};
use crate::synth::ExpectedResponse;
use http::{Request, Response, StatusCode};
use tracing::{debug, warn};

/// Performs (or simulates) a request.
pub trait Requester {
    /// Sends `request` and returns the response with its body read.
    fn send(&self, request: &Request<String>) -> AppResult<Response<String>>;
}

impl<F> Requester for F
where
    F: Fn(&Request<String>) -> AppResult<Response<String>>,
{
    fn send(&self, request: &Request<String>) -> AppResult<Response<String>> {
        self(request)
    }
}

/// One request with its expected and actual responses.
#[derive(Debug)]
pub struct Exchange {
    /// The request identifier the exchange was built from.
    pub request_id: String,
    /// The synthesized request.
    pub request: Request<String>,
    /// What the description promises.
    pub expected: ExpectedResponse,
    /// What the requester returned.
    pub actual: Response<String>,
}

/// Runs described requests through a requester.
pub struct Harness<'a, D: Describer + ?Sized, R: Requester> {
    api: &'a D,
    requester: R,
}

impl<'a, D: Describer + ?Sized, R: Requester> Harness<'a, D, R> {
    /// Creates a harness over `api` sending through `requester`.
    pub fn new(api: &'a D, requester: R) -> Self {
        Self { api, requester }
    }

    /// Synthesizes and sends the request; see [`Describer::get_request`] for `params`.
    pub fn run_request(&self, request_id: &str, body: &str, params: &[&str]) -> AppResult<Exchange> {
        let (request, expected) = self.api.get_request(request_id, body, params)?;
        debug!(request_id, method = %request.method(), uri = %request.uri(), "sending request");
        let actual = self.requester.send(&request)?;

        Ok(Exchange {
            request_id: request_id.to_string(),
            request,
            expected,
            actual,
        })
    }

    /// Like [`Harness::run_request`], then checks the status code.
    pub fn test_request(&self, request_id: &str, body: &str, params: &[&str]) -> AppResult<Exchange> {
        let exchange = self.run_request(request_id, body, params)?;
        if let Err(e) = match_status(exchange.actual.status(), &exchange.expected) {
            warn!(request_id, "{}", e);
            return Err(e);
        }
        Ok(exchange)
    }
}

/// Checks an actual status against the documented one.
pub fn match_status(actual: StatusCode, expected: &ExpectedResponse) -> AppResult<()> {
    if expected.accepts(actual) {
        return Ok(());
    }
    Err(AppError::StatusMismatch(format!(
        "HTTP status expected: {} {}. Got: {} {}.",
        expected.status_code(),
        expected.status_text,
        actual.as_u16(),
        actual.canonical_reason().unwrap_or_default()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::SwaggerDescriber;

    const API: &str = r#"
swagger: '2.0'
paths:
  /ping:
    get:
      operationId: ping
      responses:
        '200': { description: pong }
        default: { description: anything }
"#;

    fn respond(status: u16) -> impl Fn(&Request<String>) -> AppResult<Response<String>> {
        move |_req: &Request<String>| {
            Response::builder()
                .status(status)
                .body(String::new())
                .map_err(|e| AppError::General(e.to_string()))
        }
    }

    #[test]
    fn test_run_request_pairs_responses() {
        let api = SwaggerDescriber::from_yaml_str(API).unwrap();
        let harness = Harness::new(&api, respond(200));
        let exchange = harness.run_request("ping.200.0", "", &["&n", "1"]).unwrap();
        assert_eq!(exchange.request.uri(), "http://localhost/ping?n=1");
        assert_eq!(exchange.expected.status_code(), 200);
        assert_eq!(exchange.actual.status(), StatusCode::OK);
    }

    #[test]
    fn test_status_mismatch_message() {
        let api = SwaggerDescriber::from_yaml_str(API).unwrap();
        let harness = Harness::new(&api, respond(404));
        let err = harness.test_request("ping.200.0", "", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP status expected: 200 OK. Got: 404 Not Found."
        );
    }

    #[test]
    fn test_default_scenario_accepts_any_status() {
        let api = SwaggerDescriber::from_yaml_str(API).unwrap();
        let harness = Harness::new(&api, respond(503));
        assert!(harness.test_request("ping.default.0", "", &[]).is_ok());
    }

    #[test]
    fn test_requester_errors_propagate() {
        let api = SwaggerDescriber::from_yaml_str(API).unwrap();
        let failing = |_: &Request<String>| -> AppResult<Response<String>> {
            Err(AppError::General("connection refused".into()))
        };
        let harness = Harness::new(&api, failing);
        let err = harness.run_request("ping.200.0", "", &[]).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_dyn_describer() {
        let api = SwaggerDescriber::from_yaml_str(API).unwrap();
        let dyn_api: &dyn Describer = &api;
        let harness = Harness::new(dyn_api, respond(200));
        assert!(harness.test_request("ping.200.0", "", &[]).is_ok());
    }
}
