// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// 抖音分享链接的域名模式
///
/// 支持主域名、国际化别名域名和短链域名，协议和www前缀可选，
/// 域名后必须跟非空路径。
static SHARE_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(douyin\.com|iesdouyin\.com|v\.douyin\.com)/.+").unwrap()
});

/// 分享链接中携带的跟踪参数，归一化时移除
const TRACKING_PARAMS: [&str; 9] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "share_token",
    "share_app_id",
    "share_link_id",
    "u_code",
    "did",
    "iid",
];

/// 判断字符串是否为受支持的抖音分享链接
pub fn is_supported_link(raw: &str) -> bool {
    SHARE_LINK_RE.is_match(raw)
}

/// 判断链接是否属于短链域名
pub fn is_short_link(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.host_str() == Some("v.douyin.com"),
        // 无协议前缀时Url::parse失败，退回字符串前缀判断
        Err(_) => raw.starts_with("v.douyin.com/"),
    }
}

/// 归一化分享链接，移除固定的跟踪查询参数
///
/// 归一化是尽力而为的：无法解析的输入原样返回，绝不报错。
///
/// # 参数
///
/// * `raw` - 原始链接字符串
///
/// # 返回值
///
/// 移除跟踪参数后重建的链接，解析失败时为原始输入
pub fn normalize(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if retained.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(retained);
    }
    url.to_string()
}
