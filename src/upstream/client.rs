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

use thiserror::Error;
use tracing::warn;

use crate::config::settings::UpstreamSettings;
use crate::upstream::response::UpstreamResponse;
use crate::upstream::retry_policy::RetryPolicy;

/// 上游调用错误类型
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// 请求失败
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// 上游返回非2xx状态
    #[error("Unexpected upstream status: {0}")]
    BadStatus(u16),
    /// 上游返回体无法解析
    #[error("Invalid upstream body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    /// 重试次数耗尽
    #[error("Retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<UpstreamError>,
    },
}

/// 上游解析API客户端
///
/// 对单一上游端点发起带固定指数退避重试的调用。
/// 每次请求都携带浏览器形态的User-Agent，上游会拒绝无此标识的请求。
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: String,
    policy: RetryPolicy,
}

impl UpstreamClient {
    /// 根据配置创建上游客户端
    ///
    /// # 参数
    ///
    /// * `settings` - 上游API配置
    ///
    /// # 返回值
    ///
    /// * `Ok(UpstreamClient)` - 客户端实例
    /// * `Err(UpstreamError)` - HTTP客户端构建失败
    pub fn new(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            policy: RetryPolicy::new(
                settings.max_retries,
                Duration::from_millis(settings.backoff_base_ms),
            ),
        })
    }

    /// 调用上游解析指定分享链接
    ///
    /// 传输错误和非2xx状态都计为失败并按退避策略重试；
    /// 重试耗尽后返回最后一次的错误，绝不返回部分结果。
    ///
    /// # 参数
    ///
    /// * `share_url` - 已归一化的分享链接
    ///
    /// # 返回值
    ///
    /// * `Ok(UpstreamResponse)` - 上游返回体（其自身的code可能表示失败）
    /// * `Err(UpstreamError)` - 重试耗尽或返回体非法
    pub async fn parse_video(&self, share_url: &str) -> Result<UpstreamResponse, UpstreamError> {
        let response = self.fetch_with_retry(share_url).await?;
        let body = response.text().await.map_err(UpstreamError::Request)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// 带重试的上游请求
    ///
    /// 第i次尝试（0起）失败后等待`base_delay * 2^i`再重试，
    /// 首次尝试前和最终失败后都不等待。
    async fn fetch_with_retry(&self, share_url: &str) -> Result<reqwest::Response, UpstreamError> {
        let mut attempt: u32 = 0;
        loop {
            match self.try_fetch(share_url).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if !self.policy.should_retry(attempt) {
                        return Err(UpstreamError::RetriesExhausted {
                            attempts: attempt + 1,
                            source: Box::new(err),
                        });
                    }
                    warn!(
                        "Upstream request failed (attempt {}): {}, retrying",
                        attempt + 1,
                        err
                    );
                    tokio::time::sleep(self.policy.backoff(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// 单次上游请求，非2xx状态视为失败
    async fn try_fetch(&self, share_url: &str) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("url", share_url)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::BadStatus(status.as_u16()));
        }
        Ok(response)
    }
}
