#![deny(missing_docs)]

//! # Synthesis
//!
//! Format-independent request and response synthesis. Describers resolve an
//! identifier to a [`RequestTemplate`] / [`ResponseTemplate`]; everything after that
//! lives here.
//!
//! - **params**: the `:` / `&` / `=` parameter grammar.
//! - **request**: URL, header and body assembly.
//! - **response**: the expected response of a scenario.

pub mod params;
pub mod request;
pub mod response;

pub use params::{ParamSet, ParamTarget};
pub use request::{build_request, RequestTemplate};
pub use response::{build_expected_response, ExpectedResponse, ResponseTemplate};
