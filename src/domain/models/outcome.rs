// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::video::ParsedVideo;

/// 单条解析的统一返回结构
///
/// 不变式：`data`非空当且仅当`code == 200`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// 业务状态码，与HTTP状态码一致
    pub code: i32,
    /// 提示信息
    pub msg: String,
    /// 解析结果，失败时为null
    pub data: Option<ParsedVideo>,
}

impl ParseOutcome {
    /// 构造解析成功的结果
    pub fn success(msg: impl Into<String>, video: ParsedVideo) -> Self {
        Self {
            code: 200,
            msg: msg.into(),
            data: Some(video),
        }
    }

    /// 构造解析失败的结果
    pub fn failure(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// 批量解析中单条链接的结果
///
/// 在`ParseOutcome`基础上附带归一化后的输入链接，
/// 结果顺序与去重、截断后的输入顺序一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemResult {
    /// 归一化后的输入链接
    pub url: String,
    /// 该条链接的业务状态码
    pub code: i32,
    /// 该条链接的提示信息
    pub msg: String,
    /// 该条链接的解析结果，失败时为null
    pub data: Option<ParsedVideo>,
}

impl BatchItemResult {
    /// 由单条解析结果和其归一化链接构造
    pub fn new(url: String, outcome: ParseOutcome) -> Self {
        Self {
            url,
            code: outcome.code,
            msg: outcome.msg,
            data: outcome.data,
        }
    }
}

/// 批量解析的整体返回结构
///
/// 批量接口本身不会部分失败：只要输入合法则`code`恒为200，
/// 单条失败体现在对应`BatchItemResult`的`code`中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// 整体状态码
    pub code: i32,
    /// 提示信息（包含处理条数）
    pub msg: String,
    /// 每条链接的结果，按处理顺序排列
    pub data: Vec<BatchItemResult>,
}
