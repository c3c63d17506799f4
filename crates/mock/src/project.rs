//! Generated project data and the two project endpoints.

use scout_project::{ApiResponse, ProjectItem, ProjectKind, ProjectListRes, Request};
use serde_json::Value;

use crate::envelope;

/// Shared project ids start above this offset.
pub const SHARED_ID_OFFSET: u64 = 1000;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PAGE_SIZE: u64 = 20;

/// Size of each generated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
	pub current_total: u64,
	pub shared_total: u64,
}

impl Default for Catalog {
	fn default() -> Self {
		Self {
			current_total: 40,
			shared_total: 30,
		}
	}
}

impl Catalog {
	pub const fn total(&self, kind: ProjectKind) -> u64 {
		match kind {
			ProjectKind::Current => self.current_total,
			ProjectKind::Shared => self.shared_total,
		}
	}

	/// Filters by case-insensitive title substring, then slices one page.
	pub fn page(&self, kind: ProjectKind, page: u64, page_size: u64, keyword: Option<&str>) -> ProjectListRes {
		let needle = keyword.map(str::trim).filter(|k| !k.is_empty()).map(str::to_lowercase);
		let matches: Vec<ProjectItem> = (1..=self.total(kind))
			.map(|n| item(kind, n))
			.filter(|item| needle.as_deref().is_none_or(|needle| item.title.to_lowercase().contains(needle)))
			.collect();

		let total = matches.len() as u64;
		let start = page.saturating_sub(1).saturating_mul(page_size);
		let list = matches
			.into_iter()
			.skip(usize::try_from(start).unwrap_or(usize::MAX))
			.take(usize::try_from(page_size).unwrap_or(usize::MAX))
			.collect();

		ProjectListRes {
			list,
			total,
			has_more: page.saturating_mul(page_size) < total,
		}
	}
}

/// Item `n` (1-based) of a listing.
pub fn item(kind: ProjectKind, n: u64) -> ProjectItem {
	match kind {
		ProjectKind::Current => ProjectItem {
			id: n,
			title: format!("Current project {n}"),
			date: "2025-05-16".to_owned(),
			summary: "A short description of the project covering its core features. Built on a modern stack that stays easy to extend and maintain.".to_owned(),
			details: format!(
				"Details for item {n} of the current list: full description, extra parameters and related notes. Ships a complete frontend and backend with a responsive layout for mobile and desktop."
			),
		},
		ProjectKind::Shared => ProjectItem {
			id: n + SHARED_ID_OFFSET,
			title: format!("Shared project {n}"),
			date: "2025-05-15".to_owned(),
			summary: "A project another user shared with you, with its key information and usage notes.".to_owned(),
			details: format!(
				"Details for item {n} of the shared list. Shared by other users: you can browse and use these resources or save them to your own list."
			),
		},
	}
}

/// `GET /project/list`.
pub fn list(catalog: &Catalog, request: &Request) -> Value {
	let page = positive_param(request, "page").unwrap_or(DEFAULT_PAGE);
	let page_size = positive_param(request, "pageSize").unwrap_or(DEFAULT_PAGE_SIZE);
	let kind = request.query_param("type").and_then(|t| t.parse().ok()).unwrap_or_default();
	let keyword = request.query_param("keyword");

	let res = catalog.page(kind, page, page_size, keyword);
	tracing::trace!(%kind, page, page_size, total = res.total, "mock.project.list");
	envelope(ApiResponse::ok(res))
}

/// `GET /project/{id}`. Ids above [`SHARED_ID_OFFSET`] belong to the shared list.
pub fn detail(raw_id: &str) -> Value {
	let Ok(id) = raw_id.parse::<u64>() else {
		return envelope(ApiResponse::<ProjectItem>::fail(400, format!("invalid project id '{raw_id}'"), None));
	};

	let project = if id > SHARED_ID_OFFSET {
		item(ProjectKind::Shared, id - SHARED_ID_OFFSET)
	} else {
		item(ProjectKind::Current, id)
	};
	envelope(ApiResponse::ok(project))
}

fn positive_param(request: &Request, key: &str) -> Option<u64> {
	request.query_param(key)?.trim().parse().ok().filter(|v| *v > 0)
}
