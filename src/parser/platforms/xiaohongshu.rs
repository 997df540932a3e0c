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

const DETAIL_PATH: &str = "/xhs/detail";
const TIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%d"];
// 未知类型按视频处理
const TYPE_LABELS: &[(&str, VideoType)] = &[("视频", VideoType::Video), ("图文", VideoType::Image)];

/// 小红书解析器。上游接口直接接受作品链接，字段名是中文。
pub struct XiaohongshuParser {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl XiaohongshuParser {
    pub fn new(base_url: &str) -> Result<Self, ParseError> {
        Ok(Self::with_transport(base_url, Arc::new(UpstreamClient::new()?)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    // 作品标签可能是数组，也可能是逗号分隔的字符串
    fn tags(data: &FieldReader<'_>) -> Vec<String> {
        match data.get("作品标签") {
            Some(Value::Array(_)) => data.strings("作品标签"),
            Some(_) => {
                let raw = data.str("作品标签");
                if raw.is_empty() {
                    Vec::new()
                } else {
                    raw.split(',').map(str::to_string).collect()
                }
            }
            None => Vec::new(),
        }
    }

    fn normalize(data: &Value) -> VideoInfo {
        let data = FieldReader::new(data);
        let mut info = VideoInfo::new(Platform::XIAOHONGSHU);

        info.id = data.str("作品ID");
        info.title = data.str("作品标题");
        info.description = data.str("作品描述");
        info.url = data.str("作品链接");
        info.duration = "00:00:00".to_string();

        let work_type = data.str("作品类型");
        info.video_type = classify(&work_type, TYPE_LABELS, VideoType::Video);

        let publish_time = data.str("发布时间");
        info.create_time = parse_time_or_now(&publish_time, TIME_LAYOUTS);

        let download_urls = data.urls("下载地址");
        let gif_urls = data.urls("动图地址");

        // 封面取第一个下载地址，没有则取第一个动图
        info.cover_url = download_urls
            .iter()
            .chain(gif_urls.iter())
            .find(|url| !url.trim().is_empty())
            .cloned()
            .unwrap_or_default();

        let media_type = if info.video_type == VideoType::Image {
            MediaType::Image
        } else {
            MediaType::Video
        };
        for url in &download_urls {
            info.push_download(url.as_str(), media_type);
        }
        // 动图排在最后，按图片处理
        for url in &gif_urls {
            info.push_download(url.as_str(), MediaType::Image);
        }

        info.author = AuthorInfo {
            uid: data.str("作者ID"),
            nickname: data.str("作者昵称"),
            ..Default::default()
        };

        info.stats = VideoStats {
            play_count: 0,
            like_count: data.count("点赞数量"),
            comment_count: data.count("评论数量"),
            share_count: data.count("分享数量"),
            collect_count: data.count("收藏数量"),
        };

        info.tags = Self::tags(&data);

        info.insert_extra("publishTime", publish_time);
        info.insert_extra("updateTime", data.str("最后更新时间"));
        info.insert_extra("timestamp", data.str("时间戳"));
        info.insert_extra("workType", work_type);
        info.insert_extra("downloadURLs", download_urls);
        info.insert_extra("gifURLs", gif_urls);
        info.insert_extra("authorLink", data.str("作者链接"));

        info
    }
}

#[async_trait]
impl Parser for XiaohongshuParser {
    fn platform(&self) -> Platform {
        Platform::XIAOHONGSHU
    }

    fn extract_video_id(&self, url: &str) -> Result<String, ParseError> {
        if url.trim().is_empty() {
            return Err(ParseError::UnresolvableUrl("URL不能为空".to_string()));
        }
        Ok(url.to_string())
    }

    async fn parse_video(&self, req: &ParseRequest, ctx: &ParseContext) -> Result<VideoInfo, ParseError> {
        self.validate_request(req)?;

        // video_id 在小红书里实际就是链接
        let url = if !req.url.trim().is_empty() {
            req.url.trim()
        } else {
            req.video_id.trim()
        };
        let url = self.extract_video_id(url)?;
        debug!("小红书作品链接: {}", url);

        let body = json!({
            "url": url,
            "download": false,
            "index": [],
            "cookie": req.cookie,
            "proxy": req.proxy,
            "skip": false,
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
