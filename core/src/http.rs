//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data.
//! `PetFriendsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; `transport::execute` is the only
//! place that performs I/O. Multipart uploads stay structured here and are
//! encoded by the transport.

use crate::form::MultipartForm;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody {
    /// Pre-encoded bytes; the `content-type` header travels in `headers`.
    Bytes(Vec<u8>),
    /// `multipart/form-data`; the transport picks the boundary and header.
    Multipart(MultipartForm),
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries any encoded query string.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
