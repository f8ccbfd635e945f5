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
    extract::{rejection::JsonRejection, Extension},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::application::dto::batch_request::BatchParseRequest;
use crate::application::usecases::parse_batch::ParseBatchUseCase;
use crate::domain::models::outcome::ParseOutcome;

/// 批量解析端点
///
/// `POST /api/batch`，请求体为`{"urls": [...]}`。
/// 非法JSON或形状不符的请求体直接以400结构化结果响应，
/// 不向客户端透出反序列化错误。
pub async fn parse_batch(
    Extension(usecase): Extension<Arc<ParseBatchUseCase>>,
    payload: Result<Json<BatchParseRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        debug!("Rejected malformed batch request body");
        return ParseOutcome::failure(400, "请求体格式错误").into_response();
    };

    usecase.execute(&request.urls).await.into_response()
}
