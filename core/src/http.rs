//! Plain-data HTTP types for the host-does-IO pattern.
//!
//! # Design
//! The core never touches the network. It emits [`HttpRequest`] values and
//! interprets the [`HttpResponse`] the host hands back, so every state
//! transition in the sync layer is deterministic and testable with
//! fabricated responses. All fields are owned types so values can be passed
//! freely to whatever executes the I/O.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// An HTTP request described as plain data. The host executes it and
/// returns the corresponding [`HttpResponse`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A request with no body and no headers.
    pub(crate) fn bare(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A request carrying a JSON body.
    pub(crate) fn json(method: HttpMethod, url: String, body: String) -> Self {
        Self {
            method,
            url,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

/// An HTTP response described as plain data, constructed by the host after
/// executing an [`HttpRequest`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
