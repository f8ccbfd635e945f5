// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 重试策略配置
///
/// 退避时间为确定性的`base_delay * 2^attempt`，仅在两次尝试之间等待，
/// 首次尝试前和最终失败后都不等待。
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数（不含首次请求）
    pub max_retries: u32,
    /// 退避基准时间
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// 创建新的重试策略
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// 计算第`attempt`次尝试（0起）失败后的退避时间
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(31))
    }

    /// 第`attempt`次尝试（0起）失败后是否还应重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}
