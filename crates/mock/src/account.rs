//! Login, profile and account endpoints served next to the project routes.

use std::time::{SystemTime, UNIX_EPOCH};

use scout_project::{ApiResponse, Request};
use serde_json::{Value, json};

use crate::envelope;

const AVATAR_URL: &str = "https://iconfont.alicdn.com/p/user/eZQFvSX6g8f1/f0d9fd95-a5f0-474d-98b0-d51e8450f2cf.png";

/// Token value treated as expired by `/auth/verify-token`.
pub const EXPIRED_TOKEN: &str = "expired";

/// Code value rejected by `/auth/wechat/access-token`.
pub const INVALID_WECHAT_CODE: &str = "invalid";

pub fn login() -> Value {
	envelope(ApiResponse::ok(json!({ "token": "admin" })))
}

pub fn me() -> Value {
	envelope(ApiResponse::ok(json!({ "uid": 1, "name": "admin", "avatar": AVATAR_URL })))
}

pub fn logout() -> Value {
	json!({ "code": 0, "msg": "success" })
}

pub fn email_code() -> Value {
	envelope(ApiResponse::ok("123456"))
}

/// Shared reply for password reset and registration.
pub fn accepted() -> Value {
	envelope(ApiResponse::ok(true))
}

/// Reads the `access-token` header in any letter case.
pub fn verify_token(request: &Request) -> Value {
	match request.header("access-token") {
		Some(token) if token != EXPIRED_TOKEN => envelope(ApiResponse {
			code: 0,
			data: Some(json!({ "valid": true })),
			msg: "token valid".to_owned(),
		}),
		_ => envelope(ApiResponse::fail(401, "token expired", Some(json!({ "valid": false })))),
	}
}

/// Exchanges the `code` in the request body for a time-stamped token.
pub fn wechat_access_token(request: &Request) -> Value {
	let code = request.body.as_ref().and_then(|body| body.get("code")).and_then(Value::as_str);
	if code == Some(INVALID_WECHAT_CODE) {
		return envelope(ApiResponse::<Value>::fail(400, "failed to obtain token", None));
	}

	let millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or_default();
	envelope(ApiResponse {
		code: 0,
		data: Some(json!({ "token": format!("wechat_token_{millis}"), "expires_in": 7200 })),
		msg: "token obtained".to_owned(),
	})
}
