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

use std::sync::Arc;

use tracing::warn;

use crate::domain::models::outcome::ParseOutcome;
use crate::upstream::client::UpstreamClient;
use crate::upstream::resolver::ShortLinkResolver;
use crate::utils::url_utils;

/// 单条解析用例
///
/// 校验 → 短链还原 → 归一化 → 复验 → 上游调用 → 结果映射。
/// 该用例永不失败：任何错误都折叠为带状态码的`ParseOutcome`。
pub struct ParseSingleUseCase {
    client: Arc<UpstreamClient>,
    resolver: Arc<dyn ShortLinkResolver>,
}

impl ParseSingleUseCase {
    /// 创建单条解析用例
    pub fn new(client: Arc<UpstreamClient>, resolver: Arc<dyn ShortLinkResolver>) -> Self {
        Self { client, resolver }
    }

    /// 解析一条分享链接
    pub async fn execute(&self, raw_url: &str) -> ParseOutcome {
        self.execute_tracked(raw_url).await.1
    }

    /// 解析一条分享链接，同时返回归一化后的链接
    ///
    /// 批量解析用它把归一化链接写入每条结果。
    ///
    /// # 参数
    ///
    /// * `raw_url` - 原始分享链接
    ///
    /// # 返回值
    ///
    /// 归一化后的链接与解析结果
    pub async fn execute_tracked(&self, raw_url: &str) -> (String, ParseOutcome) {
        let raw_url = raw_url.trim();

        // 不受支持的链接直接拒绝，不产生任何网络请求
        if !url_utils::is_supported_link(raw_url) {
            return (
                raw_url.to_string(),
                ParseOutcome::failure(400, "无效的抖音视频链接"),
            );
        }

        let resolved = if url_utils::is_short_link(raw_url) {
            self.resolver.resolve(raw_url).await
        } else {
            raw_url.to_string()
        };
        let normalized = url_utils::normalize(&resolved);

        // 短链可能跳转到不受支持的站点，还原后需要复验
        if !url_utils::is_supported_link(&normalized) {
            return (normalized, ParseOutcome::failure(400, "无效的抖音视频链接"));
        }

        let outcome = match self.client.parse_video(&normalized).await {
            Ok(upstream) if upstream.code == 200 => match upstream.data {
                Some(data) => ParseOutcome::success("解析成功", data.into()),
                None => {
                    warn!("Upstream returned code 200 without data for {}", normalized);
                    ParseOutcome::failure(500, "解析失败，请稍后重试")
                }
            },
            // 上游自身的失败码原样透传
            Ok(upstream) => ParseOutcome::failure(upstream.code, upstream.msg),
            Err(err) => {
                warn!("Upstream parse failed for {}: {}", normalized, err);
                ParseOutcome::failure(500, "解析失败，请稍后重试")
            }
        };
        (normalized, outcome)
    }
}
