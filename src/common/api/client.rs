use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, ClientBuilder, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;
use tracing::{debug, error};

use super::error::ApiError;
use crate::parser::context::ParseContext;

/// 向上游发送 JSON、接收 JSON 的能力。
///
/// 解析器只依赖这个 trait，测试里可以换成内存实现。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value, ctx: &ParseContext) -> Result<Value, ApiError>;
}

// 基于 reqwest 的上游客户端，构建后只读，可在多个请求间共享
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    inner: Client,
}

impl UpstreamClient {
    // 整体超时由 ParseContext 的截止时间控制，这里只限制建立连接
    pub fn new() -> Result<Self, ApiError> {
        let inner = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .default_headers(Self::get_default_headers())
            .build()?;
        Ok(Self { inner })
    }

    pub fn get_default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"),
        );
        headers
    }

    async fn send(&self, url: &str, body: &Value, ctx: &ParseContext) -> Result<Value, ApiError> {
        let mut request = self.inner.post(url).json(body);
        // User-Agent 以 SDK 运行时配置为准
        if let Ok(ua) = HeaderValue::from_str(ctx.user_agent()) {
            request = request.header(USER_AGENT, ua);
        }

        let resp = request.send().await.map_err(|e| {
            error!("请求失败: {} {}", url, e);
            ApiError::Reqwest(e)
        })?;

        let status = resp.status();
        if status != StatusCode::OK {
            error!("上游返回异常状态码: {} {}", url, status);
            return Err(ApiError::Status(status.as_u16()));
        }

        let raw_body = resp.bytes().await?;
        let value: Value = serde_json::from_slice(&raw_body).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "{}. 原始响应: {}",
                e,
                String::from_utf8_lossy(&raw_body)
            ))
        })?;
        Ok(value)
    }
}

#[async_trait]
impl Transport for UpstreamClient {
    async fn post_json(&self, url: &str, body: &Value, ctx: &ParseContext) -> Result<Value, ApiError> {
        debug!("POST {}", url);
        // 取消或超时时直接丢弃进行中的请求
        tokio::select! {
            _ = ctx.done() => Err(ApiError::Cancelled),
            result = self.send(url, body, ctx) => result,
        }
    }
}
