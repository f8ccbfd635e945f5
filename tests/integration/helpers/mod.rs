// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum_test::TestServer;
use dyparse::config::settings::{
    BatchSettings, RateLimitingSettings, ServerSettings, Settings, UpstreamSettings,
};
use dyparse::presentation::routes;
use wiremock::MockServer;

/// 集成测试应用
///
/// 内嵌完整的网关路由和一个扮演上游解析API的mock服务器。
pub struct TestApp {
    pub server: TestServer,
    pub upstream: MockServer,
}

/// 使用默认限流配置创建测试应用
pub async fn create_test_app() -> TestApp {
    create_test_app_with_rate_limit(true, 30).await
}

/// 指定限流开关和上限创建测试应用
pub async fn create_test_app_with_rate_limit(enabled: bool, max_requests: u32) -> TestApp {
    let upstream = MockServer::start().await;

    let settings = Arc::new(Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        rate_limiting: RateLimitingSettings {
            enabled,
            window_secs: 60,
            max_requests,
        },
        upstream: UpstreamSettings {
            endpoint: format!("{}/api/video/douyin/", upstream.uri()),
            timeout_secs: 5,
            max_retries: 1,
            backoff_base_ms: 10,
            user_agent: "Mozilla/5.0 (test)".to_string(),
        },
        batch: BatchSettings { max_urls: 10 },
        static_dir: "dist".to_string(),
    });

    let app = routes::app(settings).expect("failed to build app");
    let server = TestServer::new(app).expect("failed to start test server");

    TestApp { server, upstream }
}

/// 上游解析成功的返回体
pub fn upstream_success_body(author: &str) -> serde_json::Value {
    serde_json::json!({
        "code": 200,
        "msg": "解析成功",
        "data": {
            "author": author,
            "author_id": "10086",
            "avatar": "https://example.com/avatar.jpg",
            "title": "测试视频",
            "cover": "https://example.com/cover.jpg",
            "url": "https://example.com/video.mp4",
            "music_url": "https://example.com/music.mp3",
            "create_time": 1700000000,
            "video_duration": 15000,
            "images": []
        },
        "api_source": "mock"
    })
}
