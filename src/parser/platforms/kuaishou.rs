use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::{ensure_success_message, join_url};
use crate::{
    common::{
        api::client::{Transport, UpstreamClient},
        models::{AuthorInfo, MediaType, VideoInfo, VideoStats, VideoType},
    },
    parser::{
        context::ParseContext,
        errors::ParseError,
        models::{ParseRequest, Platform},
        parser_trait::Parser,
        utils::{FieldReader, classify, parse_time_or_now},
    },
};

const DETAIL_PATH: &str = "/detail/";
const TIME_LAYOUTS: &[&str] = &["%Y-%m-%d_%H:%M:%S"];
const TYPE_LABELS: &[(&str, VideoType)] = &[("视频", VideoType::Video), ("图片", VideoType::Image)];

// 快手：上游直接接受分享链接，无需提取ID
pub struct KuaishouParser {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl KuaishouParser {
    pub fn new(base_url: &str) -> Result<Self, ParseError> {
        Ok(Self::with_transport(base_url, Arc::new(UpstreamClient::new()?)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    fn normalize(data: &Value) -> VideoInfo {
        let data = FieldReader::new(data);
        let mut info = VideoInfo::new(Platform::KUAISHOU);

        info.id = data.str("detailID");
        info.title = data.str("caption");
        info.description = info.title.clone();
        info.duration = data.str("duration");
        info.cover_url = data.str("coverUrl");
        if !info.id.is_empty() {
            info.url = format!("https://www.kuaishou.com/short-video/{}", info.id);
        }

        let photo_type = data.str("photoType");
        info.video_type = classify(&photo_type, TYPE_LABELS, VideoType::Unknown);
        info.create_time = parse_time_or_now(&data.str("timestamp"), TIME_LAYOUTS);

        // 多个链接以空格分隔
        let download_urls = data.urls("download");
        let media_type = if info.video_type == VideoType::Image {
            MediaType::Image
        } else {
            MediaType::Video
        };
        for url in &download_urls {
            info.push_download(url.as_str(), media_type);
        }

        info.author = AuthorInfo {
            uid: data.str("authorID"),
            nickname: data.str("name"),
            ..Default::default()
        };

        // viewCount 可能是“203.7万”
        info.stats = VideoStats {
            play_count: data.count("viewCount"),
            like_count: data.count("realLikeCount"),
            comment_count: data.count("commentCount"),
            share_count: data.count("shareCount"),
            collect_count: 0,
        };

        info.insert_extra("downloadURLs", download_urls);
        info.insert_extra("photoType", photo_type);

        info
    }
}

#[async_trait]
impl Parser for KuaishouParser {
    fn platform(&self) -> Platform {
        Platform::KUAISHOU
    }

    // 仅为接口兼容，原样返回
    fn extract_video_id(&self, url: &str) -> Result<String, ParseError> {
        Ok(url.to_string())
    }

    async fn parse_video(&self, req: &ParseRequest, ctx: &ParseContext) -> Result<VideoInfo, ParseError> {
        self.validate_request(req)?;

        // 只给了ID时把它当作链接
        let target_url = if !req.url.trim().is_empty() {
            req.url.trim()
        } else {
            req.video_id.trim()
        };
        let target_url = self.extract_video_id(target_url)?;
        debug!("快手作品链接: {}", target_url);

        let body = json!({
            "text": target_url,
            "cookie": req.cookie,
            "proxy": req.proxy,
        });
        let resp = self
            .transport
            .post_json(&join_url(&self.base_url, DETAIL_PATH), &body, ctx)
            .await?;

        ensure_success_message(&resp)?;
        match resp.get("data") {
            Some(data) if !data.is_null() => Ok(Self::normalize(data)),
            _ => Err(ParseError::Upstream("响应中缺少data字段".to_string())),
        }
    }
}
