pub mod douyin;
pub mod kuaishou;
pub mod xiaohongshu;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use douyin::DouyinParser;
pub use kuaishou::KuaishouParser;
pub use xiaohongshu::XiaohongshuParser;

use crate::{
    common::{
        api::client::{Transport, UpstreamClient},
        models::VideoInfo,
    },
    parser::{
        context::ParseContext,
        errors::ParseError,
        models::{ParseRequest, Platform},
        parser_trait::Parser,
    },
};

// 各平台上游服务的基础地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub douyin: String,
    pub kuaishou: String,
    pub xiaohongshu: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            douyin: "http://localhost:5555".to_string(),
            kuaishou: "http://localhost:5557".to_string(),
            xiaohongshu: "http://localhost:5556".to_string(),
        }
    }
}

// 内置平台是编译期已知的封闭集合
pub enum AnyParser {
    Douyin(DouyinParser),
    Kuaishou(KuaishouParser),
    Xiaohongshu(XiaohongshuParser),
}

impl AnyParser {
    pub fn builtin(endpoints: &Endpoints) -> Result<Vec<AnyParser>, ParseError> {
        let transport: Arc<dyn Transport> = Arc::new(UpstreamClient::new()?);
        Ok(Self::builtin_with_transport(endpoints, transport))
    }

    pub fn builtin_with_transport(endpoints: &Endpoints, transport: Arc<dyn Transport>) -> Vec<AnyParser> {
        debug!("创建内置解析器: {:?}", endpoints);
        vec![
            AnyParser::Douyin(DouyinParser::with_transport(&endpoints.douyin, Arc::clone(&transport))),
            AnyParser::Kuaishou(KuaishouParser::with_transport(&endpoints.kuaishou, Arc::clone(&transport))),
            AnyParser::Xiaohongshu(XiaohongshuParser::with_transport(&endpoints.xiaohongshu, transport)),
        ]
    }
}

#[async_trait]
impl Parser for AnyParser {
    fn platform(&self) -> Platform {
        match self {
            AnyParser::Douyin(p) => p.platform(),
            AnyParser::Kuaishou(p) => p.platform(),
            AnyParser::Xiaohongshu(p) => p.platform(),
        }
    }

    fn validate_request(&self, req: &ParseRequest) -> Result<(), ParseError> {
        match self {
            AnyParser::Douyin(p) => p.validate_request(req),
            AnyParser::Kuaishou(p) => p.validate_request(req),
            AnyParser::Xiaohongshu(p) => p.validate_request(req),
        }
    }

    fn extract_video_id(&self, url: &str) -> Result<String, ParseError> {
        match self {
            AnyParser::Douyin(p) => p.extract_video_id(url),
            AnyParser::Kuaishou(p) => p.extract_video_id(url),
            AnyParser::Xiaohongshu(p) => p.extract_video_id(url),
        }
    }

    async fn parse_video(&self, req: &ParseRequest, ctx: &ParseContext) -> Result<VideoInfo, ParseError> {
        match self {
            AnyParser::Douyin(p) => p.parse_video(req, ctx).await,
            AnyParser::Kuaishou(p) => p.parse_video(req, ctx).await,
            AnyParser::Xiaohongshu(p) => p.parse_video(req, ctx).await,
        }
    }
}

// 基础地址末尾的 / 可有可无
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

// 快手、小红书响应里 message 含“成功”才算成功
pub(crate) fn ensure_success_message(resp: &serde_json::Value) -> Result<(), ParseError> {
    let message = resp
        .get("message")
        .map(crate::parser::utils::value_to_string)
        .unwrap_or_default();
    if !message.contains("成功") {
        return Err(crate::common::api::error::ApiError::ApiError(message).into());
    }
    Ok(())
}
