//! Request transport seam.
//!
//! The client never talks to a socket directly. Anything that can turn a
//! [`Request`] into a JSON body implements [`Transport`]; `scout-mock` serves
//! the mock endpoints in-process through it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
	#[default]
	Get,
	Post,
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Get => "GET",
			Self::Post => "POST",
		})
	}
}

/// Outbound request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
	pub method: Method,
	pub path: String,
	pub query: Vec<(String, String)>,
	pub headers: Vec<(String, String)>,
	pub body: Option<Value>,
}

impl Request {
	pub fn get(path: impl Into<String>) -> Self {
		Self {
			method: Method::Get,
			path: path.into(),
			..Self::default()
		}
	}

	pub fn post(path: impl Into<String>, body: Value) -> Self {
		Self {
			method: Method::Post,
			path: path.into(),
			body: Some(body),
			..Self::default()
		}
	}

	pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
		self.query.extend(query);
		self
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// First query value for `key`.
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// First header value for `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}

/// Transport-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	/// The cancellation token fired before a response was produced.
	#[error("request cancelled")]
	Cancelled,

	/// No endpoint serves this method and path.
	#[error("no route for {method} {path}")]
	NotFound { method: Method, path: String },

	#[error("{0}")]
	Other(String),
}

/// Delivers requests and returns raw JSON response bodies.
///
/// Implementations must return [`TransportError::Cancelled`] promptly once
/// `cancel` fires.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
	async fn send(&self, request: Request, cancel: CancellationToken) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
	async fn send(&self, request: Request, cancel: CancellationToken) -> Result<Value, TransportError> {
		(**self).send(request, cancel).await
	}
}
