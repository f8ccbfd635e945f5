// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 解析成功的视频元数据
///
/// 仅在上游解析成功时构造，一经构造不再修改。
/// 字段与上游返回逐一对应，不做任何值变换；
/// `create_time`/`video_duration` 缺失时不出现在JSON中，
/// `images` 缺失时为空列表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedVideo {
    /// 作者昵称
    pub author: String,
    /// 作者ID
    pub author_id: String,
    /// 视频标题
    pub title: String,
    /// 视频封面地址
    pub cover: String,
    /// 无水印视频地址
    pub url: String,
    /// 背景音乐地址
    pub music_url: String,
    /// 作者头像地址
    pub avatar: String,
    /// 发布时间（秒级时间戳）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    /// 视频时长（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<u64>,
    /// 图集模式下的图片列表
    #[serde(default)]
    pub images: Vec<String>,
}
