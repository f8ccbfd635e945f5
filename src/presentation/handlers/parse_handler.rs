// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::dto::parse_request::ParseQuery;
use crate::application::usecases::parse_single::ParseSingleUseCase;
use crate::domain::models::outcome::ParseOutcome;

/// 单条解析端点
///
/// `GET /api/parse?url=...`（兼容`GET /api/?url=...`）
pub async fn parse_video(
    Extension(usecase): Extension<Arc<ParseSingleUseCase>>,
    Query(query): Query<ParseQuery>,
) -> impl IntoResponse {
    let Some(url) = query.url.filter(|url| !url.trim().is_empty()) else {
        return ParseOutcome::failure(400, "请提供视频URL参数");
    };

    usecase.execute(&url).await
}
