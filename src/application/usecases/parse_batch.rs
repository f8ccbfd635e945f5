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

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::usecases::parse_single::ParseSingleUseCase;
use crate::domain::models::outcome::{BatchItemResult, BatchOutcome};

/// 批量解析用例
///
/// 去重、截断后逐条顺序解析，单条失败不影响后续条目。
/// 顺序执行是有意为之：上游对请求频率敏感，并行会放大限流风险。
pub struct ParseBatchUseCase {
    single: Arc<ParseSingleUseCase>,
    max_urls: usize,
}

impl ParseBatchUseCase {
    /// 创建批量解析用例
    ///
    /// # 参数
    ///
    /// * `single` - 单条解析用例
    /// * `max_urls` - 去重后单批最多处理的链接数
    pub fn new(single: Arc<ParseSingleUseCase>, max_urls: usize) -> Self {
        Self { single, max_urls }
    }

    /// 批量解析链接列表
    ///
    /// # 参数
    ///
    /// * `urls` - 原始链接列表
    ///
    /// # 返回值
    ///
    /// 输入为空（或全为空白）时`code`为400；否则恒为200，
    /// 每条链接的成败记录在对应的`BatchItemResult`中，
    /// 顺序与去重、截断后的输入一致。
    pub async fn execute(&self, urls: &[String]) -> BatchOutcome {
        let deduped = dedup_urls(urls, self.max_urls);
        if deduped.is_empty() {
            return BatchOutcome {
                code: 400,
                msg: "请提供视频链接列表".to_string(),
                data: Vec::new(),
            };
        }

        let mut results = Vec::with_capacity(deduped.len());
        for url in &deduped {
            let (normalized, outcome) = self.single.execute_tracked(url).await;
            results.push(BatchItemResult::new(normalized, outcome));
        }

        BatchOutcome {
            code: 200,
            msg: format!("成功处理{}条链接", results.len()),
            data: results,
        }
    }
}

/// 去除重复和空白条目，保留首次出现顺序，最多保留`cap`条
fn dedup_urls(urls: &[String], cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for url in urls {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            deduped.push(trimmed.to_string());
            if deduped.len() == cap {
                break;
            }
        }
    }
    deduped
}
