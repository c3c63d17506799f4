//! Wire types for the project listing endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ApiError;

/// Envelope code signalling success.
pub const CODE_OK: i32 = 0;

/// One project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
	pub id: u64,
	pub title: String,
	pub date: String,
	pub summary: String,
	pub details: String,
}

/// Which listing a request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
	/// The user's own projects.
	#[default]
	Current,
	/// Projects other users shared with this user.
	Shared,
}

impl ProjectKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Current => "current",
			Self::Shared => "shared",
		}
	}
}

impl fmt::Display for ProjectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Unrecognized [`ProjectKind`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown project kind '{0}' (expected 'current' or 'shared')")]
pub struct ParseKindError(pub String);

impl FromStr for ProjectKind {
	type Err = ParseKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"current" => Ok(Self::Current),
			"shared" => Ok(Self::Shared),
			_ => Err(ParseKindError(s.to_owned())),
		}
	}
}

/// Query for `GET /project/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
	pub page: u32,
	pub page_size: u32,
	#[serde(rename = "type")]
	pub kind: ProjectKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub keyword: Option<String>,
}

impl Default for ProjectListParams {
	fn default() -> Self {
		Self {
			page: 1,
			page_size: 20,
			kind: ProjectKind::Current,
			keyword: None,
		}
	}
}

impl ProjectListParams {
	/// Encodes the params as URL query pairs. A blank keyword is omitted.
	pub fn to_query(&self) -> Vec<(String, String)> {
		let mut query = vec![
			("page".to_owned(), self.page.to_string()),
			("pageSize".to_owned(), self.page_size.to_string()),
			("type".to_owned(), self.kind.as_str().to_owned()),
		];
		if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
			query.push(("keyword".to_owned(), keyword.to_owned()));
		}
		query
	}
}

/// One page of a project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListRes {
	pub list: Vec<ProjectItem>,
	pub total: u64,
	pub has_more: bool,
}

/// `{code, data, msg}` wrapper around every response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
	pub code: i32,
	pub data: Option<T>,
	#[serde(default)]
	pub msg: String,
}

impl<T> ApiResponse<T> {
	/// Successful envelope carrying `data`.
	pub fn ok(data: T) -> Self {
		Self {
			code: CODE_OK,
			data: Some(data),
			msg: "success".to_owned(),
		}
	}

	/// Failed envelope with an optional payload.
	pub fn fail(code: i32, msg: impl Into<String>, data: Option<T>) -> Self {
		Self {
			code,
			data,
			msg: msg.into(),
		}
	}

	/// Unwraps the payload of a successful envelope.
	pub fn into_result(self) -> Result<T, ApiError> {
		if self.code != CODE_OK {
			return Err(ApiError::Status {
				code: self.code,
				msg: self.msg,
			});
		}
		self.data.ok_or(ApiError::MissingData)
	}
}
