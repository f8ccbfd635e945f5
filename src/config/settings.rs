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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、速率限制、上游API和批量解析等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
    /// 上游解析API配置
    pub upstream: UpstreamSettings,
    /// 批量解析配置
    pub batch: BatchSettings,
    /// 静态资源目录（前端构建产物）
    pub static_dir: String,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 速率限制配置设置
#[derive(Debug, Deserialize)]
pub struct RateLimitingSettings {
    /// 是否启用速率限制
    pub enabled: bool,
    /// 固定窗口长度（秒）
    pub window_secs: u64,
    /// 单个IP在窗口内允许的最大请求数
    pub max_requests: u32,
}

/// 上游解析API配置设置
#[derive(Debug, Deserialize)]
pub struct UpstreamSettings {
    /// 上游解析API地址
    pub endpoint: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// 最大重试次数（不含首次请求）
    pub max_retries: u32,
    /// 指数退避基准时间（毫秒）
    pub backoff_base_ms: u64,
    /// 请求上游时使用的User-Agent（上游会拒绝无浏览器标识的请求）
    pub user_agent: String,
}

/// 批量解析配置设置
#[derive(Debug, Deserialize)]
pub struct BatchSettings {
    /// 去重后单批最多处理的链接数，超出部分直接丢弃
    pub max_urls: usize,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default Rate Limiting settings
            .set_default("rate_limiting.enabled", true)?
            .set_default("rate_limiting.window_secs", 60)?
            .set_default("rate_limiting.max_requests", 30)?
            // Default Upstream settings
            .set_default("upstream.endpoint", "https://api.pearktrue.cn/api/video/douyin/")?
            .set_default("upstream.timeout_secs", 30)?
            .set_default("upstream.max_retries", 3)?
            .set_default("upstream.backoff_base_ms", 1000)?
            .set_default(
                "upstream.user_agent",
                "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1",
            )?
            // Default Batch settings
            .set_default("batch.max_urls", 10)?
            // Default static assets directory
            .set_default("static_dir", "dist")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DYPARSE").separator("__"));

        builder.build()?.try_deserialize()
    }
}
