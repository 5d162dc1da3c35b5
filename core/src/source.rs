#![deny(missing_docs)]

//! # Schema Sources
//!
//! Loading of OpenAPI documents from the three accepted source forms: a URL,
//! an in-memory document, or a streaming byte source.

use crate::error::{AppError, AppResult};
use std::fmt;
use std::io::Read;
use url::Url;

/// Where the OpenAPI document comes from.
pub enum SchemaSource {
    /// A document reachable by URL (requires the `client` feature).
    Url(Url),
    /// An in-memory structured document.
    Inline(serde_json::Value),
    /// A streaming byte source (file, stdin, ...).
    Reader(Box<dyn Read + Send>),
}

impl fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            SchemaSource::Inline(_) => f.debug_tuple("Inline").finish(),
            SchemaSource::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}

impl SchemaSource {
    /// Classifies a CLI-style source argument: `-` reads stdin, an
    /// `http(s)` URL fetches, anything else opens a file.
    pub fn from_arg(arg: &str) -> AppResult<SchemaSource> {
        if arg == "-" {
            return Ok(SchemaSource::Reader(Box::new(std::io::stdin())));
        }
        if arg.starts_with("http://") || arg.starts_with("https://") {
            let url = Url::parse(arg)
                .map_err(|e| AppError::Source(format!("invalid source URL '{}': {}", arg, e)))?;
            return Ok(SchemaSource::Url(url));
        }
        let file = std::fs::File::open(arg)?;
        Ok(SchemaSource::Reader(Box::new(file)))
    }

    /// Loads the document text. Consumes the source (a stream can only be
    /// read once).
    pub fn load(self) -> AppResult<String> {
        match self {
            SchemaSource::Url(url) => fetch_url(&url),
            SchemaSource::Inline(value) => serde_json::to_string(&value)
                .map_err(|e| AppError::Source(format!("inline document not serializable: {}", e))),
            SchemaSource::Reader(mut reader) => {
                let mut text = String::new();
                reader.read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

#[cfg(feature = "client")]
fn fetch_url(url: &Url) -> AppResult<String> {
    let response = ureq::get(url.as_str())
        .call()
        .map_err(|e| AppError::Source(format!("failed to fetch '{}': {}", url, e)))?;
    response
        .into_string()
        .map_err(|e| AppError::Source(format!("failed to read '{}': {}", url, e)))
}

#[cfg(not(feature = "client"))]
fn fetch_url(url: &Url) -> AppResult<String> {
    Err(AppError::Source(format!(
        "cannot fetch '{}': built without the 'client' feature",
        url
    )))
}
