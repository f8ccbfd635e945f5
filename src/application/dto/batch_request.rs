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

use serde::Deserialize;

/// 批量解析请求体
///
/// 请求体不是合法JSON或`urls`不是字符串列表时，
/// 在路由层直接以400响应，不会进入用例。
#[derive(Debug, Deserialize)]
pub struct BatchParseRequest {
    /// 要解析的分享链接列表
    pub urls: Vec<String>,
}
