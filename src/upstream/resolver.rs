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

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::config::settings::UpstreamSettings;
use crate::upstream::client::UpstreamError;

/// 短链解析特质
///
/// 将短链还原为完整分享链接。解析必须静默降级：
/// 任何失败都返回原始输入，绝不中断解析流程。
#[async_trait]
pub trait ShortLinkResolver: Send + Sync {
    /// 还原短链，失败时返回原始输入
    async fn resolve(&self, url: &str) -> String;
}

/// 基于HEAD请求的短链解析器
///
/// 禁用自动重定向，读取Location头得到跳转目标。
pub struct HttpShortLinkResolver {
    http: reqwest::Client,
}

impl HttpShortLinkResolver {
    /// 根据配置创建短链解析器
    pub fn new(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .redirect(Policy::none())
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ShortLinkResolver for HttpShortLinkResolver {
    async fn resolve(&self, url: &str) -> String {
        match self.http.head(url).send().await {
            Ok(response) => response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .unwrap_or_else(|| url.to_string()),
            Err(err) => {
                debug!("Short link resolution failed for {}: {}", url, err);
                url.to_string()
            }
        }
    }
}
