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
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use thiserror::Error;
use tokio::time::Instant;
use tracing::warn;

use crate::config::settings::RateLimitingSettings;
use crate::domain::models::outcome::ParseOutcome;

/// 限流表容量上限，超出后在插入前清理过期窗口
const DEFAULT_CAPACITY: usize = 10_000;

/// 速率限制错误类型
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// 请求过多错误
    #[error("Too many requests")]
    TooManyRequests,
}

/// 单个客户端IP的固定窗口记录
#[derive(Debug)]
struct RateWindow {
    count: u32,
    reset_at: Instant,
}

/// 固定窗口速率限制器
///
/// 进程级共享的按IP计数表。窗口过期采用惰性重置：
/// 过期后的第一个请求把计数置回1并开启新窗口，没有定时器。
/// 计数的读改写在DashMap分片锁内完成，并发请求不会都观察到
/// 未达上限而同时放行。
pub struct RateLimiter {
    windows: DashMap<String, RateWindow>,
    window: Duration,
    max_requests: u32,
    capacity: usize,
    enabled: bool,
}

impl RateLimiter {
    /// 根据配置创建速率限制器
    pub fn new(settings: &RateLimitingSettings) -> Self {
        Self {
            windows: DashMap::new(),
            window: Duration::from_secs(settings.window_secs),
            max_requests: settings.max_requests,
            capacity: DEFAULT_CAPACITY,
            enabled: settings.enabled,
        }
    }

    /// 指定容量上限创建，供测试使用
    #[cfg(test)]
    fn with_capacity(settings: &RateLimitingSettings, capacity: usize) -> Self {
        let mut limiter = Self::new(settings);
        limiter.capacity = capacity;
        limiter
    }

    /// 检查客户端IP是否可以放行
    ///
    /// # 参数
    ///
    /// * `client_ip` - 客户端IP标识
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 请求未超出限制
    /// * `Err(RateLimitError)` - 窗口内请求已达上限
    pub fn check(&self, client_ip: &str) -> Result<(), RateLimitError> {
        if !self.enabled {
            return Ok(());
        }

        let now = Instant::now();

        // 表满时先清理过期窗口，避免表随唯一IP数无限增长
        if self.windows.len() >= self.capacity && !self.windows.contains_key(client_ip) {
            self.windows.retain(|_, window| now <= window.reset_at);
        }

        let mut entry = self
            .windows
            .entry(client_ip.to_string())
            .or_insert_with(|| RateWindow {
                count: 0,
                reset_at: now + self.window,
            });

        // 窗口已过期：惰性重置
        if now > entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.window;
            return Ok(());
        }

        if entry.count >= self.max_requests {
            return Err(RateLimitError::TooManyRequests);
        }
        entry.count += 1;
        Ok(())
    }

    /// 当前跟踪的IP数量
    pub fn tracked_ips(&self) -> usize {
        self.windows.len()
    }
}

/// 从请求头推导客户端IP
///
/// 依次尝试CF-Connecting-IP、X-Forwarded-For首跳、X-Real-IP，
/// 都缺失时归入"unknown"桶。
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(ip) = headers.get("cf-connecting-ip").and_then(|v| v.to_str().ok()) {
        return ip.trim().to_string();
    }
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return ip.trim().to_string();
    }
    "unknown".to_string()
}

/// 速率限制中间件
///
/// 在路由分发前对所有API请求做一次准入判定，
/// 批量请求整体计为一次，与其包含的链接数无关。
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(request.headers());
    match limiter.check(&ip) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            warn!("Rate limit exceeded for {}: {}", ip, err);
            ParseOutcome::failure(429, "请求过于频繁，请稍后重试").into_response()
        }
    }
}
