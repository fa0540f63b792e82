//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `ItemClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network; a `Transport` (see `transport.rs`) performs
//! the actual round-trip.
//!
//! All fields use owned types (`String`, `Vec`) so values can be handed to any
//! executor without lifetime concerns.

use std::fmt;

/// HTTP method for a request. The item API has no update route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ItemClient::build_*` methods.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, passed to
/// `ItemClient::parse_*` methods for interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
