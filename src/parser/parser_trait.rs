use async_trait::async_trait;

use super::{
    context::ParseContext,
    errors::ParseError,
    models::{ParseRequest, Platform},
};
use crate::common::models::VideoInfo;

// 每个平台实现一个解析器，解析器构建后只持有只读配置，可被多个请求并发复用
#[async_trait]
pub trait Parser: Send + Sync {
    // 平台标识
    fn platform(&self) -> Platform;

    // 校验请求参数，id 和 url 至少要有一个，且平台要匹配
    fn validate_request(&self, req: &ParseRequest) -> Result<(), ParseError> {
        validate_common(&self.platform(), req)
    }

    // 从页面链接提取作品ID
    fn extract_video_id(&self, url: &str) -> Result<String, ParseError>;

    // 请求上游并转换成统一结构
    async fn parse_video(&self, req: &ParseRequest, ctx: &ParseContext) -> Result<VideoInfo, ParseError>;
}

pub fn validate_common(expected: &Platform, req: &ParseRequest) -> Result<(), ParseError> {
    if !req.has_target() {
        return Err(ParseError::Validation(
            "video_id 或 url 至少需要提供一个".to_string(),
        ));
    }

    if &req.platform != expected {
        return Err(ParseError::Validation(format!(
            "平台类型不匹配，期望: {}，实际: {}",
            expected, req.platform
        )));
    }

    Ok(())
}
