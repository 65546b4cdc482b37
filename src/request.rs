//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

use crate::response::{IntoResponse, Response};

/// An incoming HTTP request with its body already collected.
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    /// Builds a request from a method and a request target such as
    /// `/api/todos?query=code`.
    ///
    /// The server builds requests itself; this is for tests and for driving an
    /// [`App`](crate::App) without a socket.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, raw_query) = target.split_once('?').unwrap_or((target, ""));
        Self {
            method,
            path: path.to_owned(),
            query: parse_query(raw_query),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            params: HashMap::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a header. Invalid names or values are dropped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    pub(crate) fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            query: parse_query(parts.uri.query().unwrap_or("")),
            headers: parts.headers,
            body,
            params: HashMap::new(),
        }
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Header lookup. Names are case-insensitive; non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/api/todos/{todoId}`, `req.param("todoId")` on
    /// `/api/todos/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the first decoded value of a query-string key.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, JsonRejection> {
        serde_json::from_slice(&self.body).map_err(JsonRejection)
    }
}

/// `application/x-www-form-urlencoded` decoding: `+` is a space, then
/// percent-escapes. Malformed UTF-8 is replaced rather than rejected.
fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// The body could not be read as the requested JSON type.
///
/// Returned from a handler it becomes `400 Bad Request` with an
/// `{"error": ...}` body.
#[derive(Debug, thiserror::Error)]
#[error("malformed JSON body: {0}")]
pub struct JsonRejection(#[source] serde_json::Error);

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        Response::error(http::StatusCode::BAD_REQUEST, &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_and_decodes_query() {
        let req = Request::new(Method::GET, "/api/todos?query=code+changes&x=%2Fa%20b");
        assert_eq!(req.path(), "/api/todos");
        assert_eq!(req.query("query"), Some("code changes"));
        assert_eq!(req.query("x"), Some("/a b"));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn key_without_value_reads_as_empty() {
        let req = Request::new(Method::GET, "/api/todos?query");
        assert_eq!(req.query("query"), Some(""));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = Request::new(Method::GET, "/").with_header("Content-Type", "application/json");
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let req = Request::new(Method::POST, "/").with_body("{not json");
        let err = req.json::<serde_json::Value>().unwrap_err();
        assert!(err.to_string().starts_with("malformed JSON body"));
        assert!(std::error::Error::source(&err).is_some_and(|e| e.is::<serde_json::Error>()));
        assert_eq!(err.into_response().status_code(), http::StatusCode::BAD_REQUEST);
    }
}
