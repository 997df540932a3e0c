use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Value, json};
use tracing::debug;

use super::join_url;
use crate::{
    common::{
        api::client::{Transport, UpstreamClient},
        models::{MediaType, MusicInfo, VideoInfo, VideoStats, VideoType, AuthorInfo},
    },
    parser::{
        context::ParseContext,
        errors::ParseError,
        models::{ParseRequest, Platform},
        parser_trait::Parser,
        utils::{FieldReader, classify, media_type_for, parse_time_or_now},
    },
};

const SHORT_LINK_DOMAIN: &str = "v.douyin.com";
const SHARE_PATH: &str = "/douyin/share";
const DETAIL_PATH: &str = "/douyin/detail";
const IMAGE_HOSTS: &[&str] = &["douyinpic.com"];
const TIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S"];
const TYPE_LABELS: &[(&str, VideoType)] = &[
    ("视频", VideoType::Video),
    ("图集", VideoType::Image),
    ("实况", VideoType::Live),
];

lazy_static! {
    // 按顺序匹配，第一个命中为准
    static ref VIDEO_ID_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"https?://www\.douyin\.com/video/(\d+)").unwrap(),
        Regex::new(r"https?://www\.iesdouyin\.com/share/video/(\d+)").unwrap(),
    ];
}

/// 抖音解析器：分享短链接 -> 完整链接 -> 作品ID -> 作品数据
pub struct DouyinParser {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl DouyinParser {
    pub fn new(base_url: &str) -> Result<Self, ParseError> {
        Ok(Self::with_transport(base_url, Arc::new(UpstreamClient::new()?)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    pub fn is_short_link(url: &str) -> bool {
        url.contains(SHORT_LINK_DOMAIN)
    }

    // 通过上游的分享链接接口展开短链接
    async fn resolve_short_url(&self, short_url: &str, req: &ParseRequest, ctx: &ParseContext) -> Result<String, ParseError> {
        debug!("解析抖音短链接: {}", short_url);
        let body = json!({
            "text": short_url,
            "proxy": req.proxy,
        });
        let resp = self
            .transport
            .post_json(&join_url(&self.base_url, SHARE_PATH), &body, ctx)
            .await?;

        let full_url = FieldReader::new(&resp).str("url");
        if full_url.is_empty() {
            return Err(ParseError::UnresolvableUrl(format!(
                "分享链接解析响应中未找到URL: {}",
                short_url
            )));
        }
        Ok(full_url)
    }

    // URL 优先；只给了ID时跳过解析
    async fn resolve_video_id(&self, req: &ParseRequest, ctx: &ParseContext) -> Result<String, ParseError> {
        let url = req.url.trim();
        if !url.is_empty() {
            if Self::is_short_link(url) {
                let full_url = self.resolve_short_url(url, req, ctx).await?;
                return self.extract_video_id(&full_url);
            }
            return self.extract_video_id(url);
        }

        let video_id = req.video_id.trim();
        if video_id.is_empty() {
            return Err(ParseError::Validation("必须提供URL或VideoID".to_string()));
        }
        Ok(video_id.to_string())
    }

    fn normalize(data: &Value) -> VideoInfo {
        let data = FieldReader::new(data);
        let mut info = VideoInfo::new(Platform::DOUYIN);

        info.id = data.str("id");
        info.title = data.str("desc");
        info.description = data.str("desc");
        info.url = data.str("share_url");
        info.duration = data.str("duration");
        info.video_type = classify(&data.str("type"), TYPE_LABELS, VideoType::Unknown);
        info.create_time = parse_time_or_now(&data.str("create_time"), TIME_LAYOUTS);

        info.cover_url = data.str("static_cover");
        info.width = data.int("width");
        info.height = data.int("height");

        // 图集和实况里混有视频，按链接所在 CDN 区分
        for url in data.urls("downloads") {
            let media_type = media_type_for(&url, IMAGE_HOSTS, MediaType::Video);
            info.push_download(url, media_type);
        }

        info.author = AuthorInfo {
            uid: data.str("uid"),
            sec_uid: data.str("sec_uid"),
            unique_id: data.str("unique_id"),
            nickname: data.str("nickname"),
            avatar: String::new(),
            signature: data.str("signature"),
            age: data.int("user_age"),
        };

        info.stats = VideoStats {
            play_count: data.count("play_count"),
            like_count: data.count("digg_count"),
            comment_count: data.count("comment_count"),
            share_count: data.count("share_count"),
            collect_count: data.count("collect_count"),
        };

        info.music = MusicInfo {
            id: String::new(),
            title: data.str("music_title"),
            author: data.str("music_author"),
            url: data.str("music_url"),
        };

        // 话题标签在前，分类标签在后
        info.tags = data.strings("text_extra");
        info.tags.extend(data.strings("tag"));

        info.insert_extra("collection_time", data.str("collection_time"));
        info.insert_extra("create_timestamp", data.int("create_timestamp"));
        info.insert_extra("uri", data.str("uri"));
        info.insert_extra("dynamic_cover", data.str("dynamic_cover"));
        info.insert_extra("mark", data.str("mark"));

        info
    }
}

#[async_trait]
impl Parser for DouyinParser {
    fn platform(&self) -> Platform {
        Platform::DOUYIN
    }

    fn extract_video_id(&self, url: &str) -> Result<String, ParseError> {
        VIDEO_ID_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(url))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ParseError::UnresolvableUrl(url.to_string()))
    }

    async fn parse_video(&self, req: &ParseRequest, ctx: &ParseContext) -> Result<VideoInfo, ParseError> {
        self.validate_request(req)?;

        let video_id = self.resolve_video_id(req, ctx).await?;
        debug!("抖音作品ID: {}", video_id);

        let body = json!({
            "detail_id": video_id,
            "cookie": req.cookie,
            "proxy": req.proxy,
            "source": req.source,
        });
        let resp = self
            .transport
            .post_json(&join_url(&self.base_url, DETAIL_PATH), &body, ctx)
            .await?;

        match resp.get("data") {
            Some(data) if !data.is_null() => Ok(Self::normalize(data)),
            _ => {
                let message = FieldReader::new(&resp).str("message");
                Err(ParseError::Upstream(if message.is_empty() {
                    "响应中未找到data字段".to_string()
                } else {
                    format!("响应中未找到data字段: {}", message)
                }))
            }
        }
    }
}
