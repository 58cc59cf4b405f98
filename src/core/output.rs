//! Provider output shapes
//!
//! The generation provider has returned its result in several shapes over
//! time: a bare URL string, an object exposing a `url()` accessor, an object
//! with a `url` attribute, a list of any of those, or a file-like object that
//! can also be streamed. [`ProviderOutput`] models them as a tagged union so the
//! normalizer can resolve them in a fixed order.

use crate::core::providers::ProviderError;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Value produced by a URL accessor
pub enum UrlValue {
    /// Plain string
    Text(String),
    /// Structured URL; its `href` is used
    Location(Url),
    /// Anything else; converted with `Display`
    Opaque(Box<dyn fmt::Display + Send + Sync>),
}

impl UrlValue {
    /// Reduce to a URL candidate string
    pub fn into_candidate(self) -> String {
        match self {
            UrlValue::Text(text) => text,
            UrlValue::Location(url) => url.as_str().to_string(),
            UrlValue::Opaque(value) => value.to_string(),
        }
    }
}

/// Object exposing a zero-argument URL accessor
pub trait UrlAccessor: fmt::Debug + Send + Sync {
    fn url(&self) -> UrlValue;
}

/// Raw result of a generation call
#[derive(Debug, Clone)]
pub enum ProviderOutput {
    /// Bare string
    Text(String),
    /// Object with a `url()` accessor
    Accessor(Arc<dyn UrlAccessor>),
    /// Object with named attributes, possibly a string `url`
    Object(Map<String, Value>),
    /// Ordered sequence of outputs
    List(Vec<ProviderOutput>),
    /// File-like output that can be streamed and also exposes `url()`
    File(FileOutput),
    /// Any other JSON value
    Other(Value),
}

impl ProviderOutput {
    /// Convert a JSON output verbatim
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => ProviderOutput::Text(text),
            Value::Array(items) => {
                ProviderOutput::List(items.into_iter().map(Self::from_json).collect())
            }
            Value::Object(map) => ProviderOutput::Object(map),
            other => ProviderOutput::Other(other),
        }
    }

    /// Convert a JSON output, wrapping http(s) URL strings into file outputs
    pub fn from_json_with_files(value: Value, client: &reqwest::Client) -> Self {
        match value {
            Value::String(text) => match FileOutput::parse(&text, client) {
                Some(file) => ProviderOutput::File(file),
                None => ProviderOutput::Text(text),
            },
            Value::Array(items) => ProviderOutput::List(
                items
                    .into_iter()
                    .map(|item| Self::from_json_with_files(item, client))
                    .collect(),
            ),
            other => Self::from_json(other),
        }
    }

    /// Step 1: the value is already a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ProviderOutput::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Step 2: the value exposes a URL accessor
    pub fn url_accessor(&self) -> Option<&dyn UrlAccessor> {
        match self {
            ProviderOutput::Accessor(accessor) => Some(accessor.as_ref()),
            ProviderOutput::File(file) => Some(file),
            _ => None,
        }
    }

    /// Step 3: the value has a string-valued `url` attribute
    pub fn url_attribute(&self) -> Option<&str> {
        match self {
            ProviderOutput::Object(map) => map.get("url").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Step 4: first element of a non-empty sequence
    pub fn first_element(&self) -> Option<&ProviderOutput> {
        match self {
            ProviderOutput::List(items) => items.first(),
            _ => None,
        }
    }

    /// Short shape name for logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderOutput::Text(_) => "string",
            ProviderOutput::Accessor(_) => "url accessor",
            ProviderOutput::Object(_) => "object",
            ProviderOutput::List(items) if items.is_empty() => "empty list",
            ProviderOutput::List(_) => "list",
            ProviderOutput::File(_) => "file output",
            ProviderOutput::Other(Value::Null) => "null",
            ProviderOutput::Other(Value::Bool(_)) => "boolean",
            ProviderOutput::Other(Value::Number(_)) => "number",
            ProviderOutput::Other(_) => "unknown",
        }
    }
}

impl From<&str> for ProviderOutput {
    fn from(text: &str) -> Self {
        ProviderOutput::Text(text.to_string())
    }
}

impl From<Value> for ProviderOutput {
    fn from(value: Value) -> Self {
        ProviderOutput::from_json(value)
    }
}

/// Remote file produced by a prediction
///
/// `url()` hands back the provider's text unchanged; the parsed form is only
/// used for fetching.
#[derive(Debug, Clone)]
pub struct FileOutput {
    href: String,
    url: Url,
    client: reqwest::Client,
}

impl FileOutput {
    pub fn new(url: Url, client: reqwest::Client) -> Self {
        Self {
            href: url.as_str().to_string(),
            url,
            client,
        }
    }

    /// Wrap provider text that parses as an http(s) URL
    pub fn parse(text: &str, client: &reqwest::Client) -> Option<Self> {
        let url = Url::parse(text).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        Some(Self {
            href: text.to_string(),
            url,
            client: client.clone(),
        })
    }

    /// Open the file as a byte stream
    pub async fn stream(
        &self,
    ) -> Result<BoxStream<'static, Result<Bytes, ProviderError>>, ProviderError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest("file", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::api_error(
                "file",
                status.as_u16(),
                format!("Failed to fetch {}", self.url),
            ));
        }

        Ok(response
            .bytes_stream()
            .map_err(|e| ProviderError::from_reqwest("file", e))
            .boxed())
    }

    /// Read the whole file into memory
    pub async fn bytes(&self) -> Result<Vec<u8>, ProviderError> {
        let mut stream = self.stream().await?;
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk?);
        }
        Ok(data)
    }
}

impl UrlAccessor for FileOutput {
    fn url(&self) -> UrlValue {
        UrlValue::Text(self.href.clone())
    }
}
