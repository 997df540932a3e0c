use thiserror::Error;

use super::models::{ParseResponse, Platform};
use crate::common::api::error::ApiError;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("请求参数无效: {0}")]
    InvalidRequest(String),
    #[error("请求验证失败: {0}")]
    Validation(String),
    #[error("无法从URL中提取作品ID: {0}")]
    UnresolvableUrl(String),
    #[error("上游接口错误: {0}")]
    Upstream(String),
    #[error("平台 {0} 不受支持")]
    UnsupportedPlatform(Platform),
    #[error("解析超时")]
    Timeout,
    #[error("无效的解析器: {0}")]
    InvalidAdapter(String),
}

impl ParseError {
    // 超时属于上游错误的一种
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::Timeout)
    }
}

impl From<ApiError> for ParseError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Cancelled => ParseError::Timeout,
            other => ParseError::Upstream(other.to_string()),
        }
    }
}

/// `VideoSdk::parse` 的失败结果：错误本身加上 `success=false` 的响应信封，
/// 调用方用哪一个都可以。
#[derive(Debug, Error)]
#[error("解析失败")]
pub struct ParseFailure {
    #[source]
    pub error: ParseError,
    pub response: ParseResponse,
}

impl ParseFailure {
    pub fn new(error: ParseError) -> Self {
        let response = ParseResponse::failure(error.to_string());
        Self { error, response }
    }
}

impl From<ParseError> for ParseFailure {
    fn from(error: ParseError) -> Self {
        Self::new(error)
    }
}
