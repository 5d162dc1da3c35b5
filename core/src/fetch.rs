#![deny(missing_docs)]

//! # Fetch Primitive
//!
//! Thin wrapper over `ureq` that the generated call wrappers delegate to.
//! No caching, retries, or response transformation happens here; transport
//! errors are surfaced unchanged, and the response-kind overrides (`blob`,
//! `text`, `arrayBuffer`, `stream`) fix the result type regardless of the
//! declared schema.

use crate::oas::models::Method;
use derive_more::{Display, From};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Characters escaped when substituting a value into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Percent-encodes a path parameter value for substitution into a template.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Errors surfaced by the call wrappers.
///
/// The transport error is the fetch client's own error kind, carried
/// verbatim; nothing is caught, retried, or reclassified here.
#[derive(Debug, Display, From)]
pub enum FetchError {
    /// Transport or HTTP status error from the underlying client.
    #[display("Fetch Error: {_0}")]
    Http(Box<ureq::Error>),

    /// IO error while reading a response body.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Request body serialization error.
    #[display("Encode Error: {_0}")]
    Encode(serde_json::Error),
}

impl std::error::Error for FetchError {}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        FetchError::Http(Box::new(err))
    }
}

/// Options for the untyped call surface.
///
/// `method` defaults to `get` when not set.
pub struct RawOptions {
    /// HTTP method.
    pub method: Method,
    /// Query pairs, passed through without key checking.
    pub query: Vec<(String, String)>,
    /// JSON request body.
    pub body: Option<serde_json::Value>,
}

impl Default for RawOptions {
    fn default() -> Self {
        RawOptions {
            method: Method::Get,
            query: Vec::new(),
            body: None,
        }
    }
}

/// A one-shot HTTP client bound to a base URL.
pub struct FetchClient {
    agent: ureq::Agent,
    base_url: String,
}

impl FetchClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> FetchClient {
        FetchClient {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into(),
        }
    }

    fn prepare(&self, method: Method, path: &str, query: &[(String, String)]) -> ureq::Request {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.agent.request(method.verb(), &url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        request
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<ureq::Response, FetchError> {
        let request = self.prepare(method, path, query);
        let response = match body {
            Some(value) => request.send_json(value)?,
            None => request.call()?,
        };
        Ok(response)
    }

    /// Performs a call and decodes the JSON response body.
    pub fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, FetchError> {
        let response = self.send(method, path, query, body)?;
        Ok(response.into_json()?)
    }

    /// Performs a call and discards the response body.
    pub fn request_unit(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<(), FetchError> {
        self.send(method, path, query, body).map(|_| ())
    }

    /// `responseType: 'blob'` — the body as bytes, schema ignored.
    pub fn fetch_blob(&self, path: &str, options: &RawOptions) -> Result<Vec<u8>, FetchError> {
        self.read_bytes(path, options)
    }

    /// `responseType: 'arrayBuffer'` — the body as bytes, schema ignored.
    pub fn fetch_array_buffer(
        &self,
        path: &str,
        options: &RawOptions,
    ) -> Result<Vec<u8>, FetchError> {
        self.read_bytes(path, options)
    }

    /// `responseType: 'text'` — the body as a string, schema ignored.
    pub fn fetch_text(&self, path: &str, options: &RawOptions) -> Result<String, FetchError> {
        let response = self.send(options.method, path, &options.query, options.body.as_ref())?;
        Ok(response.into_string()?)
    }

    /// `responseType: 'stream'` — the body as a reader, schema ignored.
    pub fn fetch_stream(
        &self,
        path: &str,
        options: &RawOptions,
    ) -> Result<Box<dyn Read + Send>, FetchError> {
        let response = self.send(options.method, path, &options.query, options.body.as_ref())?;
        Ok(Box::new(response.into_reader()))
    }

    fn read_bytes(&self, path: &str, options: &RawOptions) -> Result<Vec<u8>, FetchError> {
        let response = self.send(options.method, path, &options.query, options.body.as_ref())?;
        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// The reactive calling convention's container: a nullable data slot and a
/// nullable error slot, for callers that observe the value after the fact.
#[derive(Debug)]
pub struct Deferred<T> {
    data: Option<T>,
    error: Option<FetchError>,
}

impl<T> Deferred<T> {
    /// Wraps a finished call.
    pub fn from_result(result: Result<T, FetchError>) -> Deferred<T> {
        match result {
            Ok(data) => Deferred {
                data: Some(data),
                error: None,
            },
            Err(error) => Deferred {
                data: None,
                error: Some(error),
            },
        }
    }

    /// The resolved value, when the call succeeded.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The fetch client's error, when the call failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// True when a value arrived.
    pub fn is_resolved(&self) -> bool {
        self.data.is_some()
    }

    /// Consumes the container, yielding the value if one arrived.
    pub fn take(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("3"), "3");
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("x/y"), "x%2Fy");
        assert_eq!(encode_segment("{id}"), "%7Bid%7D");
    }

    #[test]
    fn test_raw_options_default_method_is_get() {
        let options = RawOptions::default();
        assert_eq!(options.method, Method::Get);
        assert!(options.query.is_empty());
        assert!(options.body.is_none());
    }

    #[test]
    fn test_deferred_slots() {
        let resolved = Deferred::from_result(Ok(42));
        assert_eq!(resolved.data(), Some(&42));
        assert!(resolved.error().is_none());
        assert!(resolved.is_resolved());

        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let failed: Deferred<i32> = Deferred::from_result(Err(FetchError::Io(err)));
        assert!(failed.data().is_none());
        assert!(matches!(failed.error(), Some(FetchError::Io(_))));
        assert_eq!(failed.take(), None);
    }
}
