// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, upstream_success_body};
use axum::http::StatusCode;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// 测试单条解析成功
///
/// 验证上游成功返回时，网关将字段原样映射进响应。
#[tokio::test]
async fn test_parse_success() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/api/video/douyin/"))
        .and(query_param("url", "https://www.douyin.com/video/7001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_success_body("作者")))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/parse")
        .add_query_param("url", "https://www.douyin.com/video/7001")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 200);
    assert_eq!(body["msg"], "解析成功");
    assert_eq!(body["data"]["author"], "作者");
    assert_eq!(body["data"]["author_id"], "10086");
    assert_eq!(body["data"]["url"], "https://example.com/video.mp4");
    assert_eq!(body["data"]["music_url"], "https://example.com/music.mp3");
    assert_eq!(body["data"]["avatar"], "https://example.com/avatar.jpg");
    assert_eq!(body["data"]["create_time"], 1700000000);
    assert_eq!(body["data"]["video_duration"], 15000);
}

/// 测试`/api/`别名路径
#[tokio::test]
async fn test_parse_accepted_at_api_root() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/api/video/douyin/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_success_body("作者")))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/")
        .add_query_param("url", "https://www.douyin.com/video/7001")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 200);
}

/// 测试缺少url参数
#[tokio::test]
async fn test_parse_missing_url_param() {
    let app = create_test_app().await;

    let response = app.server.get("/api/parse").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 400);
    assert_eq!(body["msg"], "请提供视频URL参数");
    assert_eq!(body["data"], serde_json::Value::Null);
}

/// 测试不受支持的链接被拒绝且不访问上游
#[tokio::test]
async fn test_parse_invalid_link_makes_no_upstream_call() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/parse")
        .add_query_param("url", "https://www.bilibili.com/video/BV1")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 400);
    assert_eq!(body["msg"], "无效的抖音视频链接");
    assert!(app.upstream.received_requests().await.unwrap().is_empty());
}

/// 测试上游失败码原样透传
#[tokio::test]
async fn test_parse_upstream_failure_passed_through() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/api/video/douyin/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 404,
            "msg": "视频不存在"
        })))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/parse")
        .add_query_param("url", "https://www.douyin.com/video/7001")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 404);
    assert_eq!(body["msg"], "视频不存在");
    assert_eq!(body["data"], serde_json::Value::Null);
}

/// 测试上游持续失败时重试耗尽并返回500
///
/// max_retries=1，应恰好发出2次上游请求。
#[tokio::test]
async fn test_parse_upstream_exhaustion_yields_500() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/api/video/douyin/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/parse")
        .add_query_param("url", "https://www.douyin.com/video/7001")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 500);
    assert_eq!(body["msg"], "解析失败，请稍后重试");
    assert_eq!(app.upstream.received_requests().await.unwrap().len(), 2);
}

/// 测试上游可选字段缺失时的缺省行为
#[tokio::test]
async fn test_parse_optional_fields_defaulted() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/api/video/douyin/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "msg": "解析成功",
            "data": {
                "author": "作者",
                "author_id": "10086",
                "avatar": "a",
                "title": "t",
                "cover": "c",
                "url": "u",
                "music_url": "m"
            }
        })))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/parse")
        .add_query_param("url", "https://www.douyin.com/video/7001")
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 200);
    assert!(body["data"].get("create_time").is_none());
    assert!(body["data"].get("video_duration").is_none());
    assert_eq!(body["data"]["images"], serde_json::json!([]));
}

/// 测试API前缀下未定义路径固定返回400
#[tokio::test]
async fn test_unknown_api_path_is_400() {
    let app = create_test_app().await;

    let response = app.server.get("/api/unknown").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 400);
}

/// 测试OPTIONS请求无条件空200应答并携带CORS头
#[tokio::test]
async fn test_options_answered_with_cors_headers() {
    let app = create_test_app().await;

    let response = app.server.method(axum::http::Method::OPTIONS, "/api/parse").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
    assert!(response.text().is_empty());
}

/// 测试JSON响应携带宽松CORS头
#[tokio::test]
async fn test_json_responses_carry_cors_header() {
    let app = create_test_app().await;

    let response = app.server.get("/api/parse").await;

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

/// 测试API之外的路径回落到静态资源（目录缺失时404）
#[tokio::test]
async fn test_non_api_path_falls_back_to_static() {
    let app = create_test_app().await;

    let response = app.server.get("/no-such-page").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// 测试健康检查与版本端点
#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(!response.text().is_empty());
}
