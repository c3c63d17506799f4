use std::time::Duration;

use scout_project::Method;

/// Mount point shared by every mock endpoint.
pub const MOUNT: &str = "/api";

/// Endpoint served by [`crate::MockServer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
	ProjectList,
	ProjectDetail(String),
	Login,
	Me,
	Logout,
	EmailCode,
	ResetPassword,
	Register,
	VerifyToken,
	WechatAccessToken,
}

impl Route {
	/// Matches a request against the route table.
	///
	/// Project routes answer `GET` only; account routes accept any method.
	/// `/project/list` wins over `/project/{id}`.
	pub fn resolve(method: Method, path: &str) -> Option<Self> {
		let path = path.strip_prefix(MOUNT)?;
		let path = path.split('?').next().unwrap_or(path).trim_end_matches('/');

		let route = match path {
			"/project/list" => Self::ProjectList,
			"/auth/login" => Self::Login,
			"/user/me" => Self::Me,
			"/user/logout" => Self::Logout,
			"/user/email-code" => Self::EmailCode,
			"/user/reset-password" => Self::ResetPassword,
			"/user/register" => Self::Register,
			"/auth/verify-token" => Self::VerifyToken,
			"/auth/wechat/access-token" => Self::WechatAccessToken,
			other => {
				let id = other.strip_prefix("/project/")?;
				if id.is_empty() || id.contains('/') {
					return None;
				}
				Self::ProjectDetail(id.to_owned())
			}
		};

		if matches!(route, Self::ProjectList | Self::ProjectDetail(_)) && method != Method::Get {
			return None;
		}
		Some(route)
	}

	pub const fn name(&self) -> &'static str {
		match self {
			Self::ProjectList => "project.list",
			Self::ProjectDetail(_) => "project.detail",
			Self::Login => "auth.login",
			Self::Me => "user.me",
			Self::Logout => "user.logout",
			Self::EmailCode => "user.email_code",
			Self::ResetPassword => "user.reset_password",
			Self::Register => "user.register",
			Self::VerifyToken => "auth.verify_token",
			Self::WechatAccessToken => "auth.wechat_access_token",
		}
	}

	/// Simulated response latency for this route.
	pub fn latency(&self, latency: &MockLatency) -> Duration {
		match self {
			Self::ProjectList => latency.project_list,
			Self::ProjectDetail(_) => latency.project_detail,
			Self::Me => latency.profile,
			Self::Login | Self::Logout | Self::VerifyToken => latency.session,
			Self::EmailCode | Self::ResetPassword | Self::Register | Self::WechatAccessToken => latency.account,
		}
	}
}

/// Per-route simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
	pub project_list: Duration,
	pub project_detail: Duration,
	/// `/user/me`.
	pub profile: Duration,
	/// Login, logout and token verification.
	pub session: Duration,
	/// Email code, password reset, registration and third-party token exchange.
	pub account: Duration,
}

impl Default for MockLatency {
	fn default() -> Self {
		Self {
			project_list: Duration::from_millis(800),
			project_detail: Duration::from_millis(500),
			profile: Duration::from_millis(100),
			session: Duration::from_millis(500),
			account: Duration::from_millis(1000),
		}
	}
}

impl MockLatency {
	/// Every route answers without delay.
	pub const fn zero() -> Self {
		Self {
			project_list: Duration::ZERO,
			project_detail: Duration::ZERO,
			profile: Duration::ZERO,
			session: Duration::ZERO,
			account: Duration::ZERO,
		}
	}
}
