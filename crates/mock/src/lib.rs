//! In-process mock endpoints for scout.
//!
//! [`MockServer`] implements [`scout_project::Transport`], so a
//! [`scout_project::ProjectClient`] can run against it without a network.
//! Each route waits out its simulated latency before answering; firing the
//! request's cancellation token during that wait aborts the request with
//! [`TransportError::Cancelled`].
//!
//! | Route | Latency | Body |
//! |---|---|---|
//! | `GET /api/project/list` | 800 ms | one page of generated projects |
//! | `GET /api/project/{id}` | 500 ms | one project; ids above 1000 are shared |
//! | `/api/auth/login` | 500 ms | `{token}` |
//! | `/api/user/me` | 100 ms | `{uid, name, avatar}` |
//! | `/api/user/logout` | 500 ms | no data |
//! | `/api/user/email-code` | 1000 ms | fixed code |
//! | `/api/user/reset-password`, `/api/user/register` | 1000 ms | `true` |
//! | `/api/auth/verify-token` | 500 ms | `{valid}`; 401 when expired |
//! | `/api/auth/wechat/access-token` | 1000 ms | `{token, expires_in}`; 400 on invalid code |

pub mod account;
pub mod project;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use scout_project::{ApiResponse, Request, Transport, TransportError};
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

pub use project::Catalog;
pub use routes::{MockLatency, Route};

/// Mock server configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockConfig {
	pub latency: MockLatency,
	pub catalog: Catalog,
}

/// Cheap-to-clone handle serving the mock routes.
#[derive(Debug, Clone, Default)]
pub struct MockServer {
	config: Arc<MockConfig>,
}

impl MockServer {
	pub fn new(config: MockConfig) -> Self {
		Self { config: Arc::new(config) }
	}

	/// Server answering every route immediately.
	pub fn instant() -> Self {
		Self::new(MockConfig {
			latency: MockLatency::zero(),
			..MockConfig::default()
		})
	}

	pub fn config(&self) -> &MockConfig {
		&self.config
	}

	/// Builds the response body for an already resolved route.
	pub fn respond(&self, route: &Route, request: &Request) -> Value {
		match route {
			Route::ProjectList => project::list(&self.config.catalog, request),
			Route::ProjectDetail(id) => project::detail(id),
			Route::Login => account::login(),
			Route::Me => account::me(),
			Route::Logout => account::logout(),
			Route::EmailCode => account::email_code(),
			Route::ResetPassword | Route::Register => account::accepted(),
			Route::VerifyToken => account::verify_token(request),
			Route::WechatAccessToken => account::wechat_access_token(request),
		}
	}
}

/// Serializes a response envelope into the body every route answers with.
pub(crate) fn envelope<T: Serialize>(response: ApiResponse<T>) -> Value {
	serde_json::to_value(response).unwrap_or(Value::Null)
}

#[async_trait]
impl Transport for MockServer {
	async fn send(&self, request: Request, cancel: CancellationToken) -> Result<Value, TransportError> {
		let Some(route) = Route::resolve(request.method, &request.path) else {
			tracing::debug!(method = %request.method, path = %request.path, "mock.not_found");
			return Err(TransportError::NotFound {
				method: request.method,
				path: request.path,
			});
		};

		let latency = route.latency(&self.config.latency);
		tracing::debug!(route = route.name(), ?latency, "mock.request");

		tokio::select! {
			biased;
			_ = cancel.cancelled() => {
				tracing::trace!(route = route.name(), "mock.cancelled");
				return Err(TransportError::Cancelled);
			}
			_ = tokio::time::sleep(latency) => {}
		}

		Ok(self.respond(&route, &request))
	}
}
