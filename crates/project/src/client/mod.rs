//! Typed client for the project endpoints.

use async_trait::async_trait;
use scout_search::{FetchError, Fetcher};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::{ApiError, Result};
use crate::transport::{Request, Transport};
use crate::types::{ApiResponse, ProjectItem, ProjectKind, ProjectListParams, ProjectListRes};

/// Path prefix every endpoint is mounted under.
pub const API_BASE: &str = "/api";

/// Unwraps response envelopes on top of a [`Transport`].
#[derive(Debug, Clone)]
pub struct ProjectClient<T> {
	transport: T,
	base: String,
}

impl<T: Transport> ProjectClient<T> {
	/// Client rooted at [`API_BASE`].
	pub fn new(transport: T) -> Self {
		Self::with_base(transport, API_BASE)
	}

	pub fn with_base(transport: T, base: impl Into<String>) -> Self {
		Self {
			transport,
			base: base.into(),
		}
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// `GET /project/list`.
	pub async fn project_list(&self, params: &ProjectListParams, cancel: CancellationToken) -> Result<ProjectListRes> {
		let request = Request::get(self.path("/project/list")).with_query(params.to_query());
		self.fetch(request, cancel).await
	}

	/// `GET /project/{id}`.
	pub async fn project_detail(&self, id: u64) -> Result<ProjectItem> {
		let request = Request::get(self.path(&format!("/project/{id}")));
		self.fetch(request, CancellationToken::new()).await
	}

	/// Adapter feeding first-page listing results into a search controller.
	pub fn search_fetcher(&self, kind: ProjectKind, page_size: u32) -> ProjectSearch<T>
	where
		T: Clone,
	{
		ProjectSearch {
			client: self.clone(),
			kind,
			page_size,
		}
	}

	async fn fetch<R: DeserializeOwned>(&self, request: Request, cancel: CancellationToken) -> Result<R> {
		tracing::trace!(method = %request.method, path = %request.path, "client.request");
		let body = self.transport.send(request, cancel).await?;
		let envelope: ApiResponse<R> = serde_json::from_value(body)?;
		envelope.into_result()
	}

	fn path(&self, route: &str) -> String {
		format!("{}{}", self.base.trim_end_matches('/'), route)
	}
}

/// Keyword search over one listing, for use with
/// [`scout_search::SearchController`].
#[derive(Debug, Clone)]
pub struct ProjectSearch<T> {
	client: ProjectClient<T>,
	kind: ProjectKind,
	page_size: u32,
}

#[async_trait]
impl<T: Transport> Fetcher<ProjectItem> for ProjectSearch<T> {
	type Error = ApiError;

	async fn fetch(&self, keyword: String, cancel: CancellationToken) -> std::result::Result<Vec<ProjectItem>, FetchError<ApiError>> {
		let params = ProjectListParams {
			page: 1,
			page_size: self.page_size,
			kind: self.kind,
			keyword: Some(keyword),
		};
		match self.client.project_list(&params, cancel).await {
			Ok(page) => Ok(page.list),
			Err(ApiError::Cancelled) => Err(FetchError::Cancelled),
			Err(error) => Err(FetchError::Failed(error)),
		}
	}
}
