// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::models::outcome::{BatchOutcome, ParseOutcome};

/// 将业务状态码映射为HTTP状态码
///
/// 上游透传的code可能不是合法的HTTP状态码，此时回落到500。
fn status_from_code(code: i32) -> StatusCode {
    u16::try_from(code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ParseOutcome {
    fn into_response(self) -> Response {
        (status_from_code(self.code), Json(self)).into_response()
    }
}

impl IntoResponse for BatchOutcome {
    fn into_response(self) -> Response {
        (status_from_code(self.code), Json(self)).into_response()
    }
}
