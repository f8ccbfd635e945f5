// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::application::usecases::parse_batch::ParseBatchUseCase;
use crate::application::usecases::parse_single::ParseSingleUseCase;
use crate::config::settings::Settings;
use crate::domain::models::outcome::ParseOutcome;
use crate::presentation::handlers::{batch_handler, parse_handler};
use crate::presentation::middleware::rate_limit_middleware::{
    rate_limit_middleware, RateLimiter,
};
use crate::upstream::client::{UpstreamClient, UpstreamError};
use crate::upstream::resolver::HttpShortLinkResolver;

/// 创建应用路由
///
/// 组装全部组件并返回配置好的路由：
/// API前缀下先做OPTIONS应答，再做限流准入，然后分发到处理器；
/// API前缀之外回落到静态资源服务。所有响应经过宽松CORS层。
///
/// # 参数
///
/// * `settings` - 应用配置
///
/// # 返回值
///
/// * `Ok(Router)` - 配置好的路由
/// * `Err(UpstreamError)` - HTTP客户端构建失败
pub fn app(settings: Arc<Settings>) -> Result<Router, UpstreamError> {
    let client = Arc::new(UpstreamClient::new(&settings.upstream)?);
    let resolver = Arc::new(HttpShortLinkResolver::new(&settings.upstream)?);
    let single = Arc::new(ParseSingleUseCase::new(client, resolver));
    let batch = Arc::new(ParseBatchUseCase::new(
        single.clone(),
        settings.batch.max_urls,
    ));
    let rate_limiter = Arc::new(RateLimiter::new(&settings.rate_limiting));

    let api_routes = Router::new()
        .route("/", get(parse_handler::parse_video))
        .route("/parse", get(parse_handler::parse_video))
        .route("/batch", post(batch_handler::parse_batch))
        // API前缀下的其他路径固定返回400
        .fallback(unknown_api)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(preflight_middleware))
        .layer(Extension(single))
        .layer(Extension(batch));

    Ok(Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .nest("/api", api_routes)
        // API之外的路径交给前端静态资源，缺失时为404
        .fallback_service(ServeDir::new(&settings.static_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http()))
}

/// OPTIONS预检应答中间件
///
/// 对API前缀下的OPTIONS请求无条件返回空200，不经过限流。
/// CORS头由外层的宽松CORS层统一附加。
async fn preflight_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

/// API前缀下未定义路径的固定应答
async fn unknown_api() -> ParseOutcome {
    ParseOutcome::failure(400, "不支持的API路径")
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
