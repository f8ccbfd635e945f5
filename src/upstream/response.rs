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

use crate::domain::models::video::ParsedVideo;

/// 上游解析API的返回结构
///
/// 宽松反序列化：未声明的字段（如api_source）一律忽略。
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse {
    /// 上游业务状态码，200表示解析成功
    pub code: i32,
    /// 上游提示信息
    pub msg: String,
    /// 解析数据，失败时缺失
    #[serde(default)]
    pub data: Option<UpstreamVideoData>,
}

/// 上游返回的视频数据
#[derive(Debug, Deserialize)]
pub struct UpstreamVideoData {
    pub author: String,
    pub author_id: String,
    pub avatar: String,
    pub title: String,
    pub cover: String,
    pub url: String,
    pub music_url: String,
    pub create_time: Option<i64>,
    pub video_duration: Option<u64>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<UpstreamVideoData> for ParsedVideo {
    /// 将上游字段逐一映射为网关的视频模型，不做值变换
    fn from(data: UpstreamVideoData) -> Self {
        Self {
            author: data.author,
            author_id: data.author_id,
            title: data.title,
            cover: data.cover,
            url: data.url,
            music_url: data.music_url,
            avatar: data.avatar,
            create_time: data.create_time,
            video_duration: data.video_duration,
            images: data.images,
        }
    }
}
